use serde::{Deserialize, Serialize};

use crate::curve::Lut;

/// Which LUT axis feeds the views weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeightSide {
    /// Views weight from `x`, earnings weight from `y`.
    ViewsPrimary,
    /// Views weight from `y`, earnings weight from `x`.
    EarningsPrimary,
}

impl Default for WeightSide {
    fn default() -> Self {
        WeightSide::EarningsPrimary
    }
}

impl WeightSide {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "views" | "views-primary" | "x" => Some(WeightSide::ViewsPrimary),
            "earnings" | "earnings-primary" | "y" => Some(WeightSide::EarningsPrimary),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WeightSide::ViewsPrimary => "views",
            WeightSide::EarningsPrimary => "earnings",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            WeightSide::ViewsPrimary => WeightSide::EarningsPrimary,
            WeightSide::EarningsPrimary => WeightSide::ViewsPrimary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Weights {
    pub views: f64,
    pub earnings: f64,
}

/// Weight pair for an earnings score.
///
/// The earnings score is clamped into the LUT index range. The weights are
/// returned as sampled: a curve that leaves the unit square yields weights
/// outside [0, 1].
pub fn resolve_weights(earnings_score: i32, lut: &Lut, side: WeightSide) -> Weights {
    let point = lut.at(earnings_score);
    match side {
        WeightSide::ViewsPrimary => Weights {
            views: point.x,
            earnings: point.y,
        },
        WeightSide::EarningsPrimary => Weights {
            views: point.y,
            earnings: point.x,
        },
    }
}
