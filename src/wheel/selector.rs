use rand::Rng;

use super::distribution::{Distribution, DistributionEntry};

/// Source of uniform draws in `[0, 1)`.
pub trait UniformSource {
    fn next_unit(&mut self) -> f64;
}

impl<R: Rng + ?Sized> UniformSource for R {
    fn next_unit(&mut self) -> f64 {
        self.gen_range(0.0..1.0)
    }
}

pub struct WeightedSelector;

impl WeightedSelector {
    /// Returns `None` only when the distribution has nothing to draw from.
    pub fn select<'a, S: UniformSource + ?Sized>(
        distribution: &'a Distribution,
        source: &mut S,
    ) -> Option<&'a DistributionEntry> {
        if distribution.is_empty() || distribution.total_weight() <= 0.0 {
            log::debug!("selection skipped: distribution has no weight");
            return None;
        }

        let draw = source.next_unit() * distribution.total_weight();
        Self::select_at(distribution, draw)
    }

    /// Maps a point on `[0, total_weight)` to the entry owning it. Draws that
    /// land in an entry without an arc go to the next drawable entry.
    pub fn select_at(distribution: &Distribution, draw: f64) -> Option<&DistributionEntry> {
        let entries = distribution.entries();
        if let Some(entry) = entries
            .iter()
            .find(|entry| entry.is_drawable() && entry.breakpoint >= draw)
        {
            return Some(entry);
        }

        let fallback = entries.iter().rev().find(|entry| entry.is_drawable())?;
        log::debug!(
            "draw {} past last drawable breakpoint {}, falling back to '{}'",
            draw,
            fallback.breakpoint,
            fallback.category.key
        );
        Some(fallback)
    }
}
