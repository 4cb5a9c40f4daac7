pub mod config;
pub mod curve;
pub mod error;
pub mod scoring;
pub mod session;

use serde::Serialize;

pub use crate::curve::{ControlPoint, Curve, Lut};
pub use crate::error::{BlendError, Result};
pub use crate::scoring::{
    AxisLabels, BlendPipeline, InputPolicy, InputRange, OutputPolicy, ScoreMatrix, ScoreSettings,
    WeightSide, Weights,
};
pub use crate::session::{BlendSession, SessionSnapshot};

/// Everything a display client needs for one set of inputs.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub curve_id: String,
    pub score: i32,
    pub weights: Weights,
    pub heatmap: ScoreMatrix,
    pub labels: AxisLabels,
}

/// Run the full pipeline once: sample the curve, score the preview inputs and
/// build the heatmap.
pub fn evaluate(
    curve: &Curve,
    settings: ScoreSettings,
    views: i32,
    earnings: i32,
) -> Result<Evaluation> {
    let pipeline = BlendPipeline::new(curve, settings);
    let score = pipeline.try_score(views, earnings)?;
    Ok(Evaluation {
        curve_id: curve.fingerprint(),
        score,
        weights: pipeline.weights(earnings),
        heatmap: pipeline.heatmap(),
        labels: scoring::axis_labels(),
    })
}
