use crate::curve::{Curve, Lut};
use crate::error::Result;
use crate::scoring::composite::{composite_score, try_composite_score, ScoreSettings};
use crate::scoring::heatmap::{build_heatmap, ScoreMatrix};
use crate::scoring::table::{score_table, TableKind, TableRow};
use crate::scoring::weights::{resolve_weights, Weights};

/// A sampled curve together with the scalar controls applied to it.
#[derive(Debug, Clone)]
pub struct BlendPipeline {
    lut: Lut,
    settings: ScoreSettings,
}

impl BlendPipeline {
    pub fn new(curve: &Curve, settings: ScoreSettings) -> Self {
        Self {
            lut: Lut::sample(curve),
            settings,
        }
    }

    pub fn from_lut(lut: Lut, settings: ScoreSettings) -> Self {
        Self { lut, settings }
    }

    pub fn lut(&self) -> &Lut {
        &self.lut
    }

    pub fn settings(&self) -> &ScoreSettings {
        &self.settings
    }

    pub fn weights(&self, earnings: i32) -> Weights {
        let earnings = self.settings.range.clamp(earnings);
        resolve_weights(earnings, &self.lut, self.settings.weight_side)
    }

    pub fn score(&self, views: i32, earnings: i32) -> i32 {
        composite_score(views, earnings, &self.lut, &self.settings)
    }

    pub fn try_score(&self, views: i32, earnings: i32) -> Result<i32> {
        try_composite_score(views, earnings, &self.lut, &self.settings)
    }

    pub fn heatmap(&self) -> ScoreMatrix {
        build_heatmap(&self.lut, &self.settings)
    }

    pub fn table(&self, kind: TableKind) -> Vec<TableRow> {
        score_table(kind, &self.lut, &self.settings)
    }
}
