use std::{collections::HashSet, fmt};

use ratatui::style::Color;

use crate::{
    constants::{DEFAULT_RANKS, FALLBACK_COLOR},
    error::ConfigError,
};

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct CategoryKey(pub String);

impl CategoryKey {
    pub fn new(key: impl Into<String>) -> Self {
        CategoryKey(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Category {
    pub key: CategoryKey,
    pub name: String,
    pub weight: f64,
    pub color: Color,
}

impl Category {
    pub fn new(key: &str, name: &str, weight: f64, color: Color) -> Self {
        Self {
            key: CategoryKey::new(key),
            name: name.to_string(),
            weight,
            color,
        }
    }
}

/// Ordered category table. Order defines segment layout on the wheel.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeightConfig {
    categories: Vec<Category>,
}

impl WeightConfig {
    pub fn new(categories: Vec<Category>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();

        for (position, category) in categories.iter().enumerate() {
            if category.key.as_str().trim().is_empty() {
                return Err(ConfigError::EmptyKey(position));
            }
            if !category.weight.is_finite() || category.weight < 0.0 {
                return Err(ConfigError::InvalidWeight {
                    key: category.key.to_string(),
                    weight: category.weight,
                });
            }
            if !seen.insert(category.key.clone()) {
                return Err(ConfigError::DuplicateKey(category.key.to_string()));
            }
        }

        let total: f64 = categories.iter().map(|c| c.weight).sum();
        if !total.is_finite() {
            return Err(ConfigError::TotalOverflow(categories.len()));
        }

        Ok(Self { categories })
    }

    pub fn default_ranks() -> Self {
        let categories = DEFAULT_RANKS
            .iter()
            .map(|preset| {
                Category::new(
                    preset.key,
                    preset.name,
                    preset.weight,
                    parse_hex_color(preset.color).unwrap_or(FALLBACK_COLOR),
                )
            })
            .collect();
        Self { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }
}

pub fn parse_hex_color(value: &str) -> Option<Color> {
    let hex = value.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

pub fn color_to_hex(color: Color) -> String {
    match color {
        Color::Rgb(r, g, b) => format!("#{:02X}{:02X}{:02X}", r, g, b),
        _ => color_to_hex(FALLBACK_COLOR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#A9A9A9"), Some(Color::Rgb(169, 169, 169)));
        assert_eq!(parse_hex_color(" #6bcb77 "), Some(Color::Rgb(107, 203, 119)));
        assert_eq!(parse_hex_color("A9A9A9"), None);
        assert_eq!(parse_hex_color("#A9A9"), None);
        assert_eq!(parse_hex_color("#GGGGGG"), None);
    }

    #[test]
    fn test_color_to_hex_round_trips_rgb() {
        let color = Color::Rgb(0xE6, 0x7E, 0x22);
        assert_eq!(color_to_hex(color), "#E67E22");
        assert_eq!(parse_hex_color(&color_to_hex(color)), Some(color));
        assert_eq!(color_to_hex(Color::White), "#CCCCCC");
    }

    #[test]
    fn test_default_ranks_keep_declared_order() {
        let config = WeightConfig::default_ranks();
        let keys: Vec<&str> = config
            .categories()
            .iter()
            .map(|category| category.key.as_str())
            .collect();
        assert_eq!(keys, vec!["E", "D", "C", "B", "A", "S", "NATIONAL"]);
        let total: f64 = config.categories().iter().map(|c| c.weight).sum();
        assert_eq!(total, 100.0);
    }

    #[test]
    fn test_weight_config_rejects_negative_weight() {
        let result = WeightConfig::new(vec![Category::new("E", "E-Rank", -1.0, Color::White)]);
        assert!(matches!(result, Err(ConfigError::InvalidWeight { .. })));
    }

    #[test]
    fn test_weight_config_rejects_nan_weight() {
        let result = WeightConfig::new(vec![Category::new("E", "E-Rank", f64::NAN, Color::White)]);
        assert!(matches!(result, Err(ConfigError::InvalidWeight { .. })));
    }

    #[test]
    fn test_weight_config_rejects_overflowing_total() {
        let result = WeightConfig::new(vec![
            Category::new("a", "A", 1e308, Color::White),
            Category::new("b", "B", 1e308, Color::White),
        ]);
        assert!(matches!(result, Err(ConfigError::TotalOverflow(2))));

        let huge_but_finite = WeightConfig::new(vec![
            Category::new("a", "A", 1e307, Color::White),
            Category::new("b", "B", 1e307, Color::White),
        ]);
        assert!(huge_but_finite.is_ok());
    }

    #[test]
    fn test_weight_config_rejects_duplicate_key() {
        let result = WeightConfig::new(vec![
            Category::new("E", "E-Rank", 1.0, Color::White),
            Category::new("E", "Other", 2.0, Color::White),
        ]);
        assert!(matches!(result, Err(ConfigError::DuplicateKey(key)) if key == "E"));
    }

    #[test]
    fn test_weight_config_rejects_empty_key() {
        let result = WeightConfig::new(vec![
            Category::new("E", "E-Rank", 1.0, Color::White),
            Category::new("  ", "Blank", 2.0, Color::White),
        ]);
        assert!(matches!(result, Err(ConfigError::EmptyKey(1))));
    }

    #[test]
    fn test_weight_config_accepts_empty_and_zero_weights() {
        assert!(WeightConfig::new(Vec::new()).unwrap().is_empty());

        let zeros = WeightConfig::new(vec![
            Category::new("E", "E-Rank", 0.0, Color::White),
            Category::new("D", "D-Rank", 0.0, Color::White),
        ])
        .unwrap();
        assert_eq!(zeros.len(), 2);
    }
}
