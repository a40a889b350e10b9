//! Provider rate table: per-provider compute/storage/network rates and display colours.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::RateTableError;

const DEFAULT_RATES: &str = include_str!("../rates/default.toml");

/// An RGB display colour, written as `rgb(r, g, b)` or `#rrggbb` in rate files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Blend toward `background`. `intensity` 1.0 keeps the colour, 0.0 yields the background.
    pub fn shade(self, intensity: f64, background: Rgb) -> Rgb {
        let t = intensity.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| (bg as f64 + (fg as f64 - bg as f64) * t).round() as u8;
        Rgb(
            mix(self.0, background.0),
            mix(self.1, background.1),
            mix(self.2, background.2),
        )
    }
}

impl From<Rgb> for ratatui::style::Color {
    fn from(c: Rgb) -> Self {
        ratatui::style::Color::Rgb(c.0, c.1, c.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.0, self.1, self.2)
    }
}

impl FromStr for Rgb {
    type Err = RateTableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RateTableError::InvalidColor(s.to_string());
        let trimmed = s.trim();

        if let Some(hex) = trimmed.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(invalid());
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
            return Ok(Rgb(channel(0)?, channel(2)?, channel(4)?));
        }

        let inner = trimmed
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;
        let channels: Vec<u8> = inner
            .split(',')
            .map(|part| part.trim().parse::<u8>())
            .collect::<Result<_, _>>()
            .map_err(|_| invalid())?;
        match channels.as_slice() {
            [r, g, b] => Ok(Rgb(*r, *g, *b)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Rgb {
    type Error = RateTableError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_string()
    }
}

/// Rates for a single provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderRate {
    pub name: String,
    /// USD per hour of processing.
    #[serde(rename = "compute")]
    pub compute_rate: f64,
    /// Flat EUR amount, independent of workload size.
    #[serde(rename = "storage")]
    pub storage_rate: f64,
    /// Flat EUR amount, independent of workload size.
    #[serde(rename = "network")]
    pub network_rate: f64,
    #[serde(rename = "color")]
    pub display_color: Rgb,
}

#[derive(Debug, Deserialize)]
struct RateFile {
    providers: Vec<ProviderRate>,
}

/// Ordered, validated list of providers. Order is display order.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    providers: Vec<ProviderRate>,
}

impl RateTable {
    pub fn new(providers: Vec<ProviderRate>) -> Result<Self, RateTableError> {
        if providers.is_empty() {
            return Err(RateTableError::Empty);
        }

        let mut seen = std::collections::HashSet::new();
        for p in &providers {
            if !seen.insert(p.name.as_str()) {
                return Err(RateTableError::DuplicateProvider(p.name.clone()));
            }
            for (field, value) in [
                ("compute", p.compute_rate),
                ("storage", p.storage_rate),
                ("network", p.network_rate),
            ] {
                if !value.is_finite() || value < 0.0 {
                    return Err(RateTableError::InvalidRate {
                        provider: p.name.clone(),
                        field,
                        value,
                    });
                }
            }
        }

        Ok(Self { providers })
    }

    /// The three-provider table shipped with the binary.
    pub fn builtin() -> Self {
        Self::from_toml(DEFAULT_RATES).expect("embedded rate table must be valid")
    }

    pub fn from_toml(content: &str) -> Result<Self, RateTableError> {
        let file: RateFile = toml::from_str(content)?;
        Self::new(file.providers)
    }

    pub fn load(path: &Path) -> Result<Self, RateTableError> {
        let content = std::fs::read_to_string(path)?;
        let table = Self::from_toml(&content)?;
        tracing::info!(path = %path.display(), providers = table.provider_count(), "loaded rate table");
        Ok(table)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProviderRate> {
        self.providers.iter()
    }

    pub fn get(&self, name: &str) -> Option<&ProviderRate> {
        self.providers.iter().find(|p| p.name == name)
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(name: &str) -> ProviderRate {
        ProviderRate {
            name: name.to_string(),
            compute_rate: 1.0,
            storage_rate: 1.0,
            network_rate: 1.0,
            display_color: Rgb(0, 0, 0),
        }
    }

    #[test]
    fn test_builtin_table() {
        let table = RateTable::builtin();
        let names: Vec<&str> = table.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["AWS", "Google Cloud", "Azure"]);

        let aws = table.get("AWS").unwrap();
        assert!((aws.compute_rate - 0.526).abs() < f64::EPSILON);
        assert!((aws.storage_rate - 2.15).abs() < f64::EPSILON);
        assert!((aws.network_rate - 4.20).abs() < f64::EPSILON);
        assert_eq!(aws.display_color, Rgb(255, 153, 0));
    }

    #[test]
    fn test_parse_rgb_forms() {
        assert_eq!("rgb(66, 133, 244)".parse::<Rgb>().unwrap(), Rgb(66, 133, 244));
        assert_eq!("rgb(0,164,239)".parse::<Rgb>().unwrap(), Rgb(0, 164, 239));
        assert_eq!("#ff9900".parse::<Rgb>().unwrap(), Rgb(255, 153, 0));
    }

    #[test]
    fn test_parse_rgb_invalid() {
        assert!("rgb(1, 2)".parse::<Rgb>().is_err());
        assert!("rgb(256, 0, 0)".parse::<Rgb>().is_err());
        assert!("#12345".parse::<Rgb>().is_err());
        assert!("orange".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_rgb_display() {
        assert_eq!(Rgb(255, 153, 0).to_string(), "rgb(255, 153, 0)");
    }

    #[test]
    fn test_shade() {
        let c = Rgb(200, 100, 50);
        let bg = Rgb(0, 0, 0);
        assert_eq!(c.shade(1.0, bg), c);
        assert_eq!(c.shade(0.0, bg), bg);
        assert_eq!(c.shade(0.5, bg), Rgb(100, 50, 25));
    }

    #[test]
    fn test_empty_table_rejected() {
        assert!(matches!(RateTable::new(vec![]), Err(RateTableError::Empty)));
    }

    #[test]
    fn test_duplicate_rejected() {
        let err = RateTable::new(vec![provider("A"), provider("A")]).unwrap_err();
        assert!(matches!(err, RateTableError::DuplicateProvider(name) if name == "A"));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let mut p = provider("A");
        p.network_rate = -1.0;
        let err = RateTable::new(vec![p]).unwrap_err();
        assert!(matches!(err, RateTableError::InvalidRate { field: "network", .. }));
    }

    #[test]
    fn test_from_toml_bad_color() {
        let toml = r#"
            [[providers]]
            name = "X"
            compute = 1.0
            storage = 0.0
            network = 0.0
            color = "blue"
        "#;
        assert!(matches!(RateTable::from_toml(toml), Err(RateTableError::Toml(_))));
    }

    #[test]
    fn test_from_toml_preserves_order() {
        let toml = r##"
            [[providers]]
            name = "Zeta"
            compute = 1.0
            storage = 0.5
            network = 0.25
            color = "#000000"

            [[providers]]
            name = "Alpha"
            compute = 2.0
            storage = 0.0
            network = 0.0
            color = "rgb(1, 2, 3)"
        "##;
        let table = RateTable::from_toml(toml).unwrap();
        let names: Vec<&str> = table.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Zeta", "Alpha"]);
        assert_eq!(table.provider_count(), 2);
        assert_eq!(table.get("Zeta").unwrap().display_color, Rgb(0, 0, 0));
    }
}
