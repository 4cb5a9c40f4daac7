use rand::Rng;

use crate::curve::{ControlPoint, Curve};

pub const MIN_RANDOM_POINTS: usize = 2;
pub const MAX_RANDOM_POINTS: usize = 9;

/// Random curve with 2..=9 points drawn from the unit square.
pub fn random_curve<R: Rng + ?Sized>(rng: &mut R) -> Curve {
    let count = rng.gen_range(MIN_RANDOM_POINTS..=MAX_RANDOM_POINTS);
    // At least two points, all finite: the Curve invariants hold.
    Curve {
        points: (0..count)
            .map(|_| ControlPoint::new(rng.gen::<f64>(), rng.gen::<f64>()))
            .collect(),
    }
}
