use std::path::Path;

use crate::curve::{ControlPoint, Curve};
use crate::error::{BlendError, Result};

/// Parse a JSON array of `{x, y}` objects into a curve.
///
/// The only checks are the ones the engine needs: two or more points, and
/// coordinates inside the unit square.
pub fn parse_points(data: &str) -> Result<Curve> {
    let points: Vec<ControlPoint> = serde_json::from_str(data)
        .map_err(|err| BlendError::PointFile(format!("failed to parse points: {}", err)))?;
    Curve::new_in_unit_square(points)
}

pub fn load_points(path: &Path) -> Result<Curve> {
    let data = std::fs::read_to_string(path)
        .map_err(|err| BlendError::PointFile(format!("failed to read {}: {}", path.display(), err)))?;
    parse_points(&data)
}

pub fn write_points(curve: &Curve, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|err| BlendError::PointFile(format!("failed to create dir: {}", err)))?;
        }
    }
    let payload = serde_json::to_string_pretty(curve.points())
        .map_err(|err| BlendError::PointFile(format!("failed to serialize points: {}", err)))?;
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, payload)
        .map_err(|err| BlendError::PointFile(format!("failed to write points: {}", err)))?;
    std::fs::rename(&tmp_path, path)
        .map_err(|err| BlendError::PointFile(format!("failed to finalize points: {}", err)))?;
    Ok(())
}
