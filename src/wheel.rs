mod angle;
mod animator;
mod controller;
mod distribution;
mod selector;

pub use angle::AngleResolver;
pub use animator::SpinAnimator;
pub use controller::{SpinObserver, WheelController};
pub use distribution::Distribution;
pub use selector::WeightedSelector;

const FULL_TURN: f64 = 360.0;

/// Reduces any angle into `[0, 360)`.
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(FULL_TURN);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= FULL_TURN { 0.0 } else { wrapped }
}

pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
