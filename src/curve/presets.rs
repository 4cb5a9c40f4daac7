use crate::curve::{ControlPoint, Curve};
use crate::error::{BlendError, Result};

pub const DEFAULT_PRESET: &str = "rand1";

const MANUAL: &[(f64, f64)] = &[(0.0, 0.0), (0.5, 0.5), (1.0, 1.0)];

const RAND1: &[(f64, f64)] = &[
    (0.4876945829913588, 0.2763923940734863),
    (0.11860458756424586, 0.00462294199983182),
    (0.6095959560413065, 0.6986860260328451),
    (0.03412761093918215, 0.6323919424424749),
    (0.532505169996403, 0.11403753819416007),
    (0.258076410483818, 0.8121209818780057),
];

const DRAWED1: &[(f64, f64)] = &[
    (0.43386243386243384, 0.09293680297397769),
    (0.5806878306878307, 0.137546468401487),
    (0.3492063492063492, 0.6914498141263941),
    (0.7777777777777778, 0.12267657992565056),
    (0.2037037037037037, 0.9553903345724907),
    (0.8108465608465608, 0.9814126394052045),
];

const PRESET_NAMES: &[&str] = &["manual", "rand1", "drawed1", "drawed1-doubled"];

pub fn preset_names() -> &'static [&'static str] {
    PRESET_NAMES
}

pub fn preset(name: &str) -> Result<Curve> {
    match name.trim().to_lowercase().as_str() {
        "manual" | "identity" => Curve::from_pairs(MANUAL),
        "rand1" => Curve::from_pairs(RAND1),
        "drawed1" => Curve::from_pairs(DRAWED1),
        "drawed1-doubled" => Curve::new(drawed1_doubled()),
        _ => Err(BlendError::UnknownPreset(name.to_string())),
    }
}

// drawed1 followed by its points 2..6 a second time, which biases the curve
// toward those points.
fn drawed1_doubled() -> Vec<ControlPoint> {
    DRAWED1
        .iter()
        .chain(DRAWED1[1..].iter())
        .map(|&(x, y)| ControlPoint::new(x, y))
        .collect()
}
