use serde::{Deserialize, Serialize};

use crate::curve::{ControlPoint, Lut};
use crate::scoring::composite::{composite_score, ScoreSettings, SCORE_MAX};
use crate::scoring::heatmap::GRID_SIZE;

/// Debug sweeps through the score grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TableKind {
    /// `views == earnings`, descending from 100.
    Diagonal,
    /// `earnings` ascending from 0 while `views` descends from 100.
    Cross,
}

impl TableKind {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "diagonal" | "diag" => Some(TableKind::Diagonal),
            "cross" | "anti-diagonal" => Some(TableKind::Cross),
            _ => None,
        }
    }

    fn inputs(self, step: i32) -> (i32, i32) {
        match self {
            TableKind::Diagonal => (SCORE_MAX - step, SCORE_MAX - step),
            TableKind::Cross => (SCORE_MAX - step, step),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub earnings: i32,
    pub views: i32,
    pub score: i32,
    pub weight: ControlPoint,
}

pub fn score_table(kind: TableKind, lut: &Lut, settings: &ScoreSettings) -> Vec<TableRow> {
    (0..GRID_SIZE as i32)
        .map(|step| {
            let (views, earnings) = kind.inputs(step);
            TableRow {
                earnings,
                views,
                score: composite_score(views, earnings, lut, settings),
                weight: lut.at(earnings),
            }
        })
        .collect()
}

pub fn format_table(rows: &[TableRow]) -> String {
    let mut out = format!(
        "{:>8}  {:>6}  {:>6}  {}\n",
        "earnings", "views", "score", "weight"
    );
    for row in rows {
        out.push_str(&format!(
            "{:>8}  {:>6}  {:>6}  {:.2} | {:.2}\n",
            row.earnings, row.views, row.score, row.weight.x, row.weight.y
        ));
    }
    out
}
