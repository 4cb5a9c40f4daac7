pub mod composite;
pub mod heatmap;
pub mod pipeline;
pub mod table;
pub mod weights;

pub use composite::{
    composite_score, try_composite_score, validate_inputs, InputPolicy, InputRange, OutputPolicy,
    ScoreSettings, SCORE_MAX,
};
pub use heatmap::{axis_labels, build_heatmap, AxisLabels, ScoreMatrix, GRID_SIZE};
pub use pipeline::BlendPipeline;
pub use table::{format_table, score_table, TableKind, TableRow};
pub use weights::{resolve_weights, WeightSide, Weights};
