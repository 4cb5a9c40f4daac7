use serde::Serialize;
use tracing::debug;

use crate::curve::Lut;
use crate::scoring::composite::{composite_score, ScoreSettings};

pub const GRID_SIZE: usize = 100;

/// Scores over every (views, earnings) pair in `0..100`.
///
/// Rows are the views axis, columns the earnings axis: `get(v, e)` is the
/// score for views `v` and earnings `e`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreMatrix {
    rows: Vec<Vec<i32>>,
}

impl ScoreMatrix {
    pub fn get(&self, views: usize, earnings: usize) -> i32 {
        self.rows[views][earnings]
    }

    pub fn rows(&self) -> &[Vec<i32>] {
        &self.rows
    }

    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn min(&self) -> i32 {
        self.rows.iter().flatten().copied().min().unwrap_or(0)
    }

    pub fn max(&self) -> i32 {
        self.rows.iter().flatten().copied().max().unwrap_or(0)
    }

    pub fn to_csv(&self) -> String {
        let mut out = String::from("views");
        for earnings in 0..self.size() {
            out.push(',');
            out.push_str(&earnings.to_string());
        }
        out.push('\n');
        for (views, row) in self.rows.iter().enumerate() {
            out.push_str(&views.to_string());
            for score in row {
                out.push(',');
                out.push_str(&score.to_string());
            }
            out.push('\n');
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AxisLabels {
    pub views: Vec<String>,
    pub earnings: Vec<String>,
}

pub fn axis_labels() -> AxisLabels {
    AxisLabels {
        views: (1..=GRID_SIZE).map(|n| format!("VS {}", n)).collect(),
        earnings: (1..=GRID_SIZE).map(|n| format!("ES {}", n)).collect(),
    }
}

pub fn build_heatmap(lut: &Lut, settings: &ScoreSettings) -> ScoreMatrix {
    let rows: Vec<Vec<i32>> = (0..GRID_SIZE as i32)
        .map(|views| {
            (0..GRID_SIZE as i32)
                .map(|earnings| composite_score(views, earnings, lut, settings))
                .collect()
        })
        .collect();
    let matrix = ScoreMatrix { rows };
    debug!(
        side = settings.weight_side.label(),
        invert = settings.invert,
        min = matrix.min(),
        max = matrix.max(),
        "built heatmap"
    );
    matrix
}
