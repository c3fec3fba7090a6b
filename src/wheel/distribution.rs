use itertools::{Itertools, Position};

use crate::{
    constants::DISTRIBUTION_SETTINGS,
    domain::{Category, CategoryKey, WeightConfig},
};

use super::{FULL_TURN, normalize_degrees, round_to_cents};

#[derive(Clone, Debug, PartialEq)]
pub struct DistributionEntry {
    pub category: Category,
    /// Weight after the all-zero redistribution, used for selection.
    pub effective_weight: f64,
    /// Rounded to two decimals, used for layout and display.
    pub percentage: f64,
    /// Running sum of effective weights up to and including this entry.
    pub breakpoint: f64,
}

impl DistributionEntry {
    /// Only entries with a visible arc can win, so the wheel always stops
    /// on the category that was drawn.
    pub fn is_drawable(&self) -> bool {
        self.effective_weight > 0.0 && self.percentage > 0.0
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Distribution {
    entries: Vec<DistributionEntry>,
    total_weight: f64,
}

impl Distribution {
    pub fn from_config(config: &WeightConfig) -> Self {
        Self::from_categories(config.categories())
    }

    pub fn from_categories(categories: &[Category]) -> Self {
        let mut total_weight: f64 = categories.iter().map(|c| c.weight).sum();

        if categories.is_empty() {
            log::warn!("no categories configured, distribution is empty");
            return Self::default();
        }

        let redistribute = total_weight == 0.0;
        if redistribute {
            log::warn!(
                "all {} category weights are zero, distributing equally",
                categories.len()
            );
            total_weight = categories.len() as f64;
        }

        let mut entries = Vec::with_capacity(categories.len());
        let mut rounded_sum = 0.0;
        let mut running_weight = 0.0;

        for (position, category) in categories.iter().with_position() {
            let effective_weight = if redistribute { 1.0 } else { category.weight };

            let percentage = match position {
                Position::Last | Position::Only => round_to_cents(100.0 - rounded_sum),
                Position::First | Position::Middle => {
                    let rounded = round_to_cents(effective_weight / total_weight * 100.0);
                    rounded_sum += rounded;
                    rounded
                }
            };

            running_weight += effective_weight;
            entries.push(DistributionEntry {
                category: category.clone(),
                effective_weight,
                percentage,
                breakpoint: running_weight,
            });
        }

        let final_sum: f64 = entries.iter().map(|e| e.percentage).sum();
        let residual = 100.0 - final_sum;
        if residual.abs() > DISTRIBUTION_SETTINGS.percent_tolerance {
            if let Some(last) = entries.last_mut() {
                log::debug!(
                    "absorbing rounding residual {:.4} into '{}'",
                    residual,
                    last.category.key
                );
                last.percentage = round_to_cents(last.percentage + residual);
            }
        }

        Self {
            entries,
            total_weight,
        }
    }

    pub fn entries(&self) -> &[DistributionEntry] {
        &self.entries
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn position_of(&self, key: &CategoryKey) -> Option<usize> {
        self.entries.iter().position(|e| &e.category.key == key)
    }

    pub fn percentage(&self, key: &CategoryKey) -> Option<f64> {
        self.position_of(key).map(|index| self.entries[index].percentage)
    }

    /// Index of the segment covering a static wheel angle (0 at 3 o'clock,
    /// clockwise), laid out from rounded percentages in config order.
    pub fn segment_at(&self, static_angle: f64) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }

        let angle = normalize_degrees(static_angle);
        let mut segment_end = 0.0;
        for (index, entry) in self.entries.iter().enumerate() {
            segment_end += entry.percentage / 100.0 * FULL_TURN;
            if angle < segment_end {
                return Some(index);
            }
        }
        Some(self.entries.len() - 1)
    }
}
