use serde::{Deserialize, Serialize};
use curve_blend::curve::{self, ControlPoint, Curve};
use curve_blend::scoring::{
    AxisLabels, InputPolicy, OutputPolicy, ScoreMatrix, ScoreSettings, TableKind, TableRow,
    WeightSide,
};

/// Scalar controls sent by the editing client. Missing fields keep the
/// current value.
#[derive(Debug, Default, Deserialize)]
pub struct ApiControls {
    pub weight_side: Option<String>,
    pub invert: Option<bool>,
    pub output: Option<String>,
    pub input: Option<String>,
    pub views: Option<i32>,
    pub earnings: Option<i32>,
}

impl ApiControls {
    pub fn apply(&self, settings: &mut ScoreSettings) -> Result<(), String> {
        if let Some(side) = self.weight_side.as_deref() {
            settings.weight_side = WeightSide::from_str(side)
                .ok_or_else(|| format!("invalid weight side: {}", side))?;
        }
        if let Some(invert) = self.invert {
            settings.invert = invert;
        }
        if let Some(output) = self.output.as_deref() {
            settings.output = OutputPolicy::from_str(output)
                .ok_or_else(|| format!("invalid output policy: {}", output))?;
        }
        if let Some(input) = self.input.as_deref() {
            settings.input = InputPolicy::from_str(input)
                .ok_or_else(|| format!("invalid input policy: {}", input))?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiCurveRequest {
    pub points: Option<Vec<ControlPoint>>,
    pub preset: Option<String>,
}

impl ApiCurveRequest {
    pub fn into_curve(self) -> Result<Curve, String> {
        match (self.points, self.preset) {
            (Some(points), _) => Curve::new_in_unit_square(points).map_err(|err| err.to_string()),
            (None, Some(name)) => curve::preset(&name).map_err(|err| err.to_string()),
            (None, None) => Err("points or preset is required".to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiEvaluateRequest {
    #[serde(flatten)]
    pub curve: ApiCurveRequest,
    #[serde(flatten)]
    pub controls: ApiControls,
}

#[derive(Debug, Deserialize)]
pub struct ApiRandomRequest {
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct ApiTableQuery {
    pub kind: Option<String>,
}

impl ApiTableQuery {
    pub fn kind(&self) -> Result<TableKind, String> {
        match self.kind.as_deref() {
            None => Ok(TableKind::Diagonal),
            Some(kind) => {
                TableKind::from_str(kind).ok_or_else(|| format!("invalid table kind: {}", kind))
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiPresetsResponse {
    pub default: &'static str,
    pub presets: Vec<ApiPreset>,
}

#[derive(Debug, Serialize)]
pub struct ApiPreset {
    pub name: &'static str,
    pub points: Vec<ControlPoint>,
}

#[derive(Debug, Serialize)]
pub struct ApiHeatmapResponse {
    pub revision: u64,
    pub curve_id: String,
    pub heatmap: ScoreMatrix,
    pub labels: AxisLabels,
}

#[derive(Debug, Serialize)]
pub struct ApiTableResponse {
    pub revision: u64,
    pub kind: TableKind,
    pub rows: Vec<TableRow>,
}
