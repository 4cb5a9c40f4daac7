use serde::Serialize;
use tracing::debug;

use crate::curve::{Curve, Lut};
use crate::scoring::{BlendPipeline, ScoreMatrix, ScoreSettings, WeightSide};

/// Interactive state: the current curve, the scalar controls, and every
/// value derived from them.
///
/// Each setter recomputes the preview score and the full heatmap before it
/// returns, so readers always see a consistent snapshot. The grid does not
/// depend on the preview inputs, but it is rebuilt on their change too.
#[derive(Debug, Clone)]
pub struct BlendSession {
    curve: Curve,
    pipeline: BlendPipeline,
    views: i32,
    earnings: i32,
    score: i32,
    heatmap: ScoreMatrix,
    revision: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub revision: u64,
    pub curve: Curve,
    pub curve_id: String,
    pub settings: ScoreSettings,
    pub views: i32,
    pub earnings: i32,
    pub score: i32,
}

impl BlendSession {
    pub fn new(curve: Curve, settings: ScoreSettings, views: i32, earnings: i32) -> Self {
        let pipeline = BlendPipeline::new(&curve, settings);
        let views = settings.range.clamp(views);
        let earnings = settings.range.clamp(earnings);
        let score = pipeline.score(views, earnings);
        let heatmap = pipeline.heatmap();
        Self {
            curve,
            pipeline,
            views,
            earnings,
            score,
            heatmap,
            revision: 0,
        }
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    pub fn lut(&self) -> &Lut {
        self.pipeline.lut()
    }

    pub fn settings(&self) -> ScoreSettings {
        *self.pipeline.settings()
    }

    pub fn pipeline(&self) -> &BlendPipeline {
        &self.pipeline
    }

    pub fn views(&self) -> i32 {
        self.views
    }

    pub fn earnings(&self) -> i32 {
        self.earnings
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn heatmap(&self) -> &ScoreMatrix {
        &self.heatmap
    }

    /// Number of recomputations since the session was created.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_curve(&mut self, curve: Curve) {
        self.pipeline = BlendPipeline::new(&curve, self.settings());
        self.curve = curve;
        self.recompute("curve");
    }

    pub fn set_settings(&mut self, settings: ScoreSettings) {
        self.pipeline = BlendPipeline::from_lut(self.pipeline.lut().clone(), settings);
        self.views = settings.range.clamp(self.views);
        self.earnings = settings.range.clamp(self.earnings);
        self.recompute("settings");
    }

    pub fn set_weight_side(&mut self, weight_side: WeightSide) {
        let mut settings = self.settings();
        settings.weight_side = weight_side;
        self.set_settings(settings);
    }

    pub fn toggle_weight_side(&mut self) {
        self.set_weight_side(self.settings().weight_side.toggled());
    }

    pub fn set_invert(&mut self, invert: bool) {
        let mut settings = self.settings();
        settings.invert = invert;
        self.set_settings(settings);
    }

    pub fn toggle_invert(&mut self) {
        self.set_invert(!self.settings().invert);
    }

    pub fn set_views(&mut self, views: i32) {
        self.views = self.settings().range.clamp(views);
        self.recompute("views");
    }

    pub fn set_earnings(&mut self, earnings: i32) {
        self.earnings = self.settings().range.clamp(earnings);
        self.recompute("earnings");
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            revision: self.revision,
            curve: self.curve.clone(),
            curve_id: self.curve.fingerprint(),
            settings: self.settings(),
            views: self.views,
            earnings: self.earnings,
            score: self.score,
        }
    }

    fn recompute(&mut self, trigger: &'static str) {
        self.score = self.pipeline.score(self.views, self.earnings);
        self.heatmap = self.pipeline.heatmap();
        self.revision += 1;
        debug!(trigger, revision = self.revision, score = self.score, "session recomputed");
    }
}
