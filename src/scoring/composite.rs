use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::curve::Lut;
use crate::error::{BlendError, Result};
use crate::scoring::weights::{resolve_weights, WeightSide};

pub const SCORE_MAX: i32 = 100;

/// What happens to a composite score that leaves [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputPolicy {
    PassThrough,
    Clamp,
}

impl Default for OutputPolicy {
    fn default() -> Self {
        OutputPolicy::PassThrough
    }
}

impl OutputPolicy {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "pass-through" | "passthrough" | "raw" => Some(OutputPolicy::PassThrough),
            "clamp" | "clamped" => Some(OutputPolicy::Clamp),
            _ => None,
        }
    }
}

/// What happens to a views/earnings input outside the valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputPolicy {
    Clamp,
    Reject,
}

impl Default for InputPolicy {
    fn default() -> Self {
        InputPolicy::Clamp
    }
}

impl InputPolicy {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "clamp" => Some(InputPolicy::Clamp),
            "reject" | "strict" => Some(InputPolicy::Reject),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRange {
    pub min: i32,
    pub max: i32,
}

impl Default for InputRange {
    fn default() -> Self {
        Self {
            min: 0,
            max: SCORE_MAX,
        }
    }
}

impl InputRange {
    pub fn clamp(self, value: i32) -> i32 {
        value.clamp(self.min, self.max.max(self.min))
    }

    pub fn contains(self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Scalar controls that shape a composite score, apart from the curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreSettings {
    pub weight_side: WeightSide,
    pub invert: bool,
    #[serde(default)]
    pub output: OutputPolicy,
    #[serde(default)]
    pub input: InputPolicy,
    #[serde(default)]
    pub range: InputRange,
}

impl ScoreSettings {
    pub fn new(weight_side: WeightSide, invert: bool) -> Self {
        Self {
            weight_side,
            invert,
            ..Self::default()
        }
    }

    pub fn with_output(mut self, output: OutputPolicy) -> Self {
        self.output = output;
        self
    }

    pub fn with_input(mut self, input: InputPolicy) -> Self {
        self.input = input;
        self
    }

    pub fn with_range(mut self, range: InputRange) -> Self {
        self.range = range;
        self
    }
}

/// Blend a views score and an earnings score into one integer score.
///
/// Both inputs are clamped into `settings.range`. What gets weighted is each
/// metric's distance from the maximum, while the weight lookup uses the raw
/// earnings score. The weighted sum is rounded half up, then optionally
/// inverted (`100 - raw`). `OutputPolicy::PassThrough` leaves the result
/// unbounded when the curve produces weights outside [0, 1].
///
/// All arithmetic runs in `f64` and is cast once at the end, so extreme
/// weights or ranges saturate at the `i32` bounds instead of overflowing.
pub fn composite_score(views: i32, earnings: i32, lut: &Lut, settings: &ScoreSettings) -> i32 {
    let views = settings.range.clamp(views);
    let earnings = settings.range.clamp(earnings);

    let max = f64::from(SCORE_MAX);
    let inv_views = max - f64::from(views);
    let inv_earnings = max - f64::from(earnings);
    let weights = resolve_weights(earnings, lut, settings.weight_side);

    let raw = round_half_up(inv_views * weights.views + inv_earnings * weights.earnings);
    let score = if settings.invert { max - raw } else { raw };

    // `as` saturates at the i32 bounds and maps NaN to 0.
    match settings.output {
        OutputPolicy::PassThrough => score as i32,
        OutputPolicy::Clamp => score.clamp(0.0, max) as i32,
    }
}

/// [`composite_score`] honoring `InputPolicy::Reject`.
pub fn try_composite_score(
    views: i32,
    earnings: i32,
    lut: &Lut,
    settings: &ScoreSettings,
) -> Result<i32> {
    validate_inputs(Some(views), Some(earnings), settings)?;
    Ok(composite_score(views, earnings, lut, settings))
}

/// Check preview inputs against `settings.range` under `InputPolicy::Reject`.
///
/// `None` means the input is not being changed. Under `InputPolicy::Clamp`
/// every input is accepted.
pub fn validate_inputs(
    views: Option<i32>,
    earnings: Option<i32>,
    settings: &ScoreSettings,
) -> Result<()> {
    if settings.input != InputPolicy::Reject {
        return Ok(());
    }
    for (name, value) in [("views", views), ("earnings", earnings)] {
        if let Some(value) = value {
            check_input(name, value, settings.range)?;
        }
    }
    Ok(())
}

fn check_input(name: &'static str, value: i32, range: InputRange) -> Result<()> {
    if range.contains(value) {
        return Ok(());
    }
    warn!(name, value, min = range.min, max = range.max, "rejected score input");
    Err(BlendError::OutOfRangeInput {
        name,
        value,
        min: range.min,
        max: range.max,
    })
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
