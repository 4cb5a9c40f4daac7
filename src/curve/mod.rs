pub mod bezier;
pub mod file;
pub mod presets;
pub mod random;

use serde::{Deserialize, Serialize};

use crate::error::{BlendError, Result};

pub use bezier::{Lut, LUT_SIZE};
pub use file::{load_points, parse_points, write_points};
pub use presets::{preset, preset_names, DEFAULT_PRESET};
pub use random::{random_curve, MAX_RANDOM_POINTS, MIN_RANDOM_POINTS};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub x: f64,
    pub y: f64,
}

impl ControlPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn lerp(self, other: ControlPoint, t: f64) -> ControlPoint {
        ControlPoint {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    fn in_unit_square(self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }
}

/// An ordered list of Bezier control points.
///
/// Order defines the shape. A point listed twice gains weight in the
/// Bernstein blend and pulls the curve toward it, so duplicates are kept.
/// A curve is never edited in place; callers build a new one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Curve {
    points: Vec<ControlPoint>,
}

impl Curve {
    pub fn new(points: Vec<ControlPoint>) -> Result<Self> {
        if points.len() < 2 {
            return Err(BlendError::InvalidCurve {
                points: points.len(),
            });
        }
        if let Some(index) = points
            .iter()
            .position(|point| !point.x.is_finite() || !point.y.is_finite())
        {
            return Err(BlendError::NonFiniteCoordinate { index });
        }
        Ok(Self { points })
    }

    /// Like [`Curve::new`], but also requires every point to lie in the unit
    /// square. Used for point lists reconstructed from files or requests.
    pub fn new_in_unit_square(points: Vec<ControlPoint>) -> Result<Self> {
        let curve = Self::new(points)?;
        if let Some((index, point)) = curve
            .points
            .iter()
            .enumerate()
            .find(|(_, point)| !point.in_unit_square())
        {
            return Err(BlendError::PointOutOfRange {
                index,
                x: point.x,
                y: point.y,
            });
        }
        Ok(curve)
    }

    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self> {
        Self::new(
            pairs
                .iter()
                .map(|&(x, y)| ControlPoint::new(x, y))
                .collect(),
        )
    }

    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn degree(&self) -> usize {
        self.points.len() - 1
    }

    pub fn first(&self) -> ControlPoint {
        self.points[0]
    }

    pub fn last(&self) -> ControlPoint {
        self.points[self.points.len() - 1]
    }

    /// Point on the curve at parameter `t` by De Casteljau reduction.
    pub fn evaluate(&self, t: f64) -> ControlPoint {
        let mut scratch = self.points.clone();
        for level in (1..scratch.len()).rev() {
            for idx in 0..level {
                scratch[idx] = scratch[idx].lerp(scratch[idx + 1], t);
            }
        }
        scratch[0]
    }

    /// Stable 64-bit identifier of the point list, for change detection by
    /// display clients.
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        for point in &self.points {
            hasher.update(point.x.to_bits().to_be_bytes());
            hasher.update(point.y.to_bits().to_be_bytes());
        }
        let digest = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        format!("{:016x}", u64::from_be_bytes(bytes))
    }
}
