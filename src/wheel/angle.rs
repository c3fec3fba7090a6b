use crate::{constants::SPIN_SETTINGS, domain::CategoryKey};

use super::{FULL_TURN, distribution::Distribution, normalize_degrees};

/// Works out the wheel-zero offset that puts a segment's midpoint under
/// the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngleResolver {
    pointer_angle: f64,
}

impl Default for AngleResolver {
    fn default() -> Self {
        Self::new(SPIN_SETTINGS.pointer_angle)
    }
}

impl AngleResolver {
    pub fn new(pointer_angle: f64) -> Self {
        Self {
            pointer_angle: normalize_degrees(pointer_angle),
        }
    }

    pub fn target_offset(&self, distribution: &Distribution, key: &CategoryKey) -> Option<f64> {
        let mut cumulative_percent = 0.0;

        for entry in distribution.entries() {
            if &entry.category.key == key {
                let midpoint_percent = cumulative_percent + entry.percentage / 2.0;
                let midpoint_degrees = midpoint_percent / 100.0 * FULL_TURN;
                return Some(normalize_degrees(
                    midpoint_degrees - self.pointer_angle + FULL_TURN,
                ));
            }
            cumulative_percent += entry.percentage;
        }

        None
    }

    /// Static wheel angle currently sitting under the pointer.
    pub fn angle_under_pointer(&self, offset: f64) -> f64 {
        normalize_degrees(self.pointer_angle + offset)
    }

    pub fn segment_under_pointer(&self, distribution: &Distribution, offset: f64) -> Option<usize> {
        distribution.segment_at(self.angle_under_pointer(offset))
    }
}

#[cfg(test)]
mod tests {
    use ratatui::style::Color;

    use super::*;
    use crate::domain::{Category, WeightConfig};

    fn ranks() -> Distribution {
        Distribution::from_config(&WeightConfig::default_ranks())
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_first_rank_offset() {
        // E spans 0..126 degrees, midpoint 63
        let offset = AngleResolver::default()
            .target_offset(&ranks(), &CategoryKey::new("E"))
            .unwrap();
        assert_close(offset, 153.0);
    }

    #[test]
    fn test_last_rank_offset() {
        // NATIONAL spans 358.2..360, midpoint 359.1
        let offset = AngleResolver::default()
            .target_offset(&ranks(), &CategoryKey::new("NATIONAL"))
            .unwrap();
        assert_close(offset, 89.1);
    }

    #[test]
    fn test_offsets_stay_in_range_and_are_repeatable() {
        let distribution = ranks();
        let resolver = AngleResolver::default();

        for entry in distribution.entries() {
            let first = resolver
                .target_offset(&distribution, &entry.category.key)
                .unwrap();
            let second = resolver
                .target_offset(&distribution, &entry.category.key)
                .unwrap();
            assert_eq!(first, second);
            assert!((0.0..360.0).contains(&first));
        }
    }

    #[test]
    fn test_resolved_offset_puts_winner_under_pointer() {
        let distribution = Distribution::from_categories(&[
            Category::new("a", "a", 1.0, Color::White),
            Category::new("b", "b", 0.2, Color::White),
            Category::new("c", "c", 7.0, Color::White),
            Category::new("d", "d", 0.01, Color::White),
            Category::new("e", "e", 3.0, Color::White),
        ]);

        for pointer in [0.0, 90.0, 270.0, 333.3] {
            let resolver = AngleResolver::new(pointer);
            for (index, entry) in distribution.entries().iter().enumerate() {
                let offset = resolver
                    .target_offset(&distribution, &entry.category.key)
                    .unwrap();
                assert_eq!(
                    resolver.segment_under_pointer(&distribution, offset),
                    Some(index),
                    "pointer {pointer} category {}",
                    entry.category.key
                );
            }
        }
    }

    #[test]
    fn test_unknown_key_has_no_offset() {
        assert_eq!(
            AngleResolver::default().target_offset(&ranks(), &CategoryKey::new("Z")),
            None
        );
    }
}
