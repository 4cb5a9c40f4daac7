use serde::Serialize;
use tracing::debug;

use crate::curve::{ControlPoint, Curve};

pub const LUT_SIZE: usize = 100;

/// Fixed-size table of curve samples taken at `t = i / 99`.
///
/// Samples are uniform in the curve parameter, not in arc length, so a curve
/// with bunched control points yields bunched samples.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Lut {
    samples: Vec<ControlPoint>,
}

impl Lut {
    pub fn sample(curve: &Curve) -> Self {
        let last = (LUT_SIZE - 1) as f64;
        let samples: Vec<ControlPoint> = (0..LUT_SIZE)
            .map(|idx| curve.evaluate(idx as f64 / last))
            .collect();
        debug!(degree = curve.degree(), samples = samples.len(), "sampled curve lut");
        Self { samples }
    }

    /// Sample at `index`, clamped into the table.
    pub fn at(&self, index: i32) -> ControlPoint {
        let idx = index.clamp(0, LUT_SIZE as i32 - 1) as usize;
        self.samples[idx]
    }

    pub fn samples(&self) -> &[ControlPoint] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
