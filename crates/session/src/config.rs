//! Session configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use storefront_core::DEFAULT_MINOR_UNITS;

pub const DEFAULT_STORAGE_PREFIX: &str = "pcshop";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Namespace prepended to every persisted key.
    pub storage_prefix: String,
    /// Directory for the file-backed store; in-memory storage when unset.
    pub storage_dir: Option<PathBuf>,
    /// Decimal places discounts are rounded to.
    pub currency_minor_units: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_prefix: DEFAULT_STORAGE_PREFIX.to_string(),
            storage_dir: None,
            currency_minor_units: DEFAULT_MINOR_UNITS,
        }
    }
}

impl SessionConfig {
    /// Read `STOREFRONT_*` environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let storage_prefix = lookup("STOREFRONT_STORAGE_PREFIX")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.storage_prefix);

        let storage_dir = lookup("STOREFRONT_STORAGE_DIR")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let currency_minor_units = match lookup("STOREFRONT_CURRENCY_MINOR_UNITS") {
            None => defaults.currency_minor_units,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(units) if units <= 8 => units,
                _ => {
                    tracing::warn!(
                        value = %raw,
                        "STOREFRONT_CURRENCY_MINOR_UNITS is not a small integer; using default"
                    );
                    defaults.currency_minor_units
                }
            },
        };

        Self {
            storage_prefix,
            storage_dir,
            currency_minor_units,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let config = SessionConfig::from_lookup(lookup(&[]));
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.storage_prefix, "pcshop");
        assert_eq!(config.currency_minor_units, 2);
    }

    #[test]
    fn reads_overrides() {
        let config = SessionConfig::from_lookup(lookup(&[
            ("STOREFRONT_STORAGE_PREFIX", "shop-dev"),
            ("STOREFRONT_STORAGE_DIR", "/tmp/shop"),
            ("STOREFRONT_CURRENCY_MINOR_UNITS", "0"),
        ]));
        assert_eq!(config.storage_prefix, "shop-dev");
        assert_eq!(config.storage_dir, Some(PathBuf::from("/tmp/shop")));
        assert_eq!(config.currency_minor_units, 0);
    }

    #[test]
    fn bad_values_fall_back() {
        let config = SessionConfig::from_lookup(lookup(&[
            ("STOREFRONT_STORAGE_PREFIX", "   "),
            ("STOREFRONT_CURRENCY_MINOR_UNITS", "two"),
        ]));
        assert_eq!(config.storage_prefix, DEFAULT_STORAGE_PREFIX);
        assert_eq!(config.currency_minor_units, DEFAULT_MINOR_UNITS);
    }

    #[test]
    fn deserializes_partial_config() {
        let config: SessionConfig = serde_json::from_str(r#"{ "storage_prefix": "x" }"#).unwrap();
        assert_eq!(config.storage_prefix, "x");
        assert_eq!(config.currency_minor_units, DEFAULT_MINOR_UNITS);
    }
}
