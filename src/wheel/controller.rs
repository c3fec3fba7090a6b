use std::time::{Duration, Instant};

use crate::{
    domain::{Category, WeightConfig},
    error::SpinRejection,
};

use super::{
    angle::AngleResolver,
    animator::{SpinAnimator, SpinPhase, advance},
    distribution::Distribution,
    selector::{UniformSource, WeightedSelector},
};

/// Receives what the wheel is doing; implemented by the presentation layer.
pub trait SpinObserver {
    fn on_frame(&mut self, offset: f64, distribution: &Distribution);
    fn on_complete(&mut self, category: &Category);
}

#[derive(Clone, Debug, Default)]
pub struct SpinState {
    pub offset: f64,
    pub phase: SpinPhase,
    pub started_at: Option<Instant>,
    pub last_selected: Option<Category>,
}

impl SpinState {
    pub fn is_spinning(&self) -> bool {
        self.phase.is_busy()
    }
}

pub struct WheelController {
    distribution: Distribution,
    resolver: AngleResolver,
    animator: SpinAnimator,
    state: SpinState,
}

impl WheelController {
    pub fn new(config: &WeightConfig, resolver: AngleResolver, animator: SpinAnimator) -> Self {
        Self {
            distribution: Distribution::from_config(config),
            resolver,
            animator,
            state: SpinState::default(),
        }
    }

    pub fn distribution(&self) -> &Distribution {
        &self.distribution
    }

    pub fn resolver(&self) -> &AngleResolver {
        &self.resolver
    }

    #[cfg(test)]
    pub fn state(&self) -> &SpinState {
        &self.state
    }

    pub fn offset(&self) -> f64 {
        self.state.offset
    }

    pub fn is_spinning(&self) -> bool {
        self.state.is_spinning()
    }

    pub fn can_spin(&self) -> bool {
        !self.distribution.is_empty()
    }

    /// Picks the winner up front and starts the animation toward it. Nothing
    /// is mutated when the request is rejected.
    pub fn request_spin<S: UniformSource + ?Sized>(
        &mut self,
        source: &mut S,
        now: Instant,
    ) -> Result<Category, SpinRejection> {
        if self.state.is_spinning() {
            log::debug!("spin rejected: already spinning");
            return Err(SpinRejection::AlreadySpinning);
        }

        let Some(entry) = WeightedSelector::select(&self.distribution, source) else {
            log::debug!("spin rejected: no categories");
            return Err(SpinRejection::NoCategories);
        };
        let category = entry.category.clone();

        let Some(target) = self
            .resolver
            .target_offset(&self.distribution, &category.key)
        else {
            return Err(SpinRejection::NoCategories);
        };

        let plan = self.animator.plan(self.state.offset, target);
        log::info!(
            "spinning to '{}' (target {:.2}, destination {:.2})",
            category.key,
            plan.target,
            plan.destination
        );

        self.state.phase = SpinPhase::Spinning(plan);
        self.state.started_at = Some(now);
        self.state.last_selected = Some(category.clone());

        Ok(category)
    }

    /// Advances the animation to `now`. Emits one frame per call while a
    /// spin is active, and the completion exactly once.
    pub fn tick(&mut self, now: Instant, observer: &mut dyn SpinObserver) {
        if !self.state.is_spinning() {
            return;
        }

        let elapsed = self
            .state
            .started_at
            .map_or(Duration::ZERO, |start| now.saturating_duration_since(start));

        let (phase, offset) = advance(self.state.phase, elapsed, self.state.offset);
        self.state.phase = phase;
        self.state.offset = offset;
        observer.on_frame(offset, &self.distribution);

        if let SpinPhase::Settling(_) = phase {
            let (phase, offset) = advance(phase, elapsed, offset);
            self.state.phase = phase;
            self.state.offset = offset;
            self.state.started_at = None;

            if let Some(category) = &self.state.last_selected {
                log::info!("spin settled on '{}'", category.key);
                observer.on_complete(category);
            }
        }
    }
}
