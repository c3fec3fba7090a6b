use std::time::Duration;

use crate::constants::SPIN_SETTINGS;

use super::{FULL_TURN, normalize_degrees};

pub fn ease_out_quart(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(4)
}

/// One planned rotation from `start_offset` to `destination`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpinPlan {
    pub start_offset: f64,
    pub destination: f64,
    /// `destination` reduced into `[0, 360)`; where the wheel comes to rest.
    pub target: f64,
    pub duration: Duration,
}

impl SpinPlan {
    pub fn angle_at(&self, elapsed: Duration) -> f64 {
        let t = if self.duration.is_zero() {
            1.0
        } else {
            elapsed.as_secs_f64() / self.duration.as_secs_f64()
        };
        self.start_offset + (self.destination - self.start_offset) * ease_out_quart(t)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum SpinPhase {
    #[default]
    Idle,
    Spinning(SpinPlan),
    Settling(SpinPlan),
}

impl SpinPhase {
    pub fn is_busy(&self) -> bool {
        !matches!(self, SpinPhase::Idle)
    }
}

/// Steps the spin state machine. `current` is returned unchanged while idle.
pub fn advance(phase: SpinPhase, elapsed: Duration, current: f64) -> (SpinPhase, f64) {
    match phase {
        SpinPhase::Idle => (SpinPhase::Idle, current),
        SpinPhase::Spinning(plan) if elapsed >= plan.duration => {
            (SpinPhase::Settling(plan), plan.target)
        }
        SpinPhase::Spinning(plan) => (SpinPhase::Spinning(plan), plan.angle_at(elapsed)),
        SpinPhase::Settling(plan) => (SpinPhase::Idle, plan.target),
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpinAnimator {
    extra_rotations: u32,
    duration: Duration,
}

impl Default for SpinAnimator {
    fn default() -> Self {
        Self::new(
            SPIN_SETTINGS.extra_rotations,
            Duration::from_millis(SPIN_SETTINGS.duration_ms),
        )
    }
}

impl SpinAnimator {
    pub fn new(extra_rotations: u32, duration: Duration) -> Self {
        if extra_rotations == 0 {
            log::warn!("extra rotations must be at least 1, using 1");
        }
        Self {
            extra_rotations: extra_rotations.max(1),
            duration,
        }
    }

    pub fn destination(&self, current_offset: f64, target_offset: f64) -> f64 {
        let remainder = normalize_degrees(target_offset - normalize_degrees(current_offset));
        current_offset + f64::from(self.extra_rotations) * FULL_TURN + remainder
    }

    pub fn plan(&self, current_offset: f64, target_offset: f64) -> SpinPlan {
        SpinPlan {
            start_offset: current_offset,
            destination: self.destination(current_offset, target_offset),
            target: normalize_degrees(target_offset),
            duration: self.duration,
        }
    }
}
