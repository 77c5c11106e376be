//! Environment configuration for the catalog browser.
//!
//! | variable                    | default    |
//! |-----------------------------|------------|
//! | `SHELFVIEW_MAX_PRODUCTS`    | `100`      |
//! | `SHELFVIEW_MAX_TOTAL_PRICE` | `10000`    |
//! | `SHELFVIEW_CAPPING`         | `category` |
//! | `SHELFVIEW_SORT`            | `name_asc` |

use thiserror::Error;

use shelfview_catalog::{BusinessRules, CappingPolicy, SortSpec};

pub const MAX_PRODUCTS_VAR: &str = "SHELFVIEW_MAX_PRODUCTS";
pub const MAX_TOTAL_PRICE_VAR: &str = "SHELFVIEW_MAX_TOTAL_PRICE";
pub const CAPPING_VAR: &str = "SHELFVIEW_CAPPING";
pub const SORT_VAR: &str = "SHELFVIEW_SORT";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, value: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrowserConfig {
    pub rules: BusinessRules,
    pub capping: CappingPolicy,
    pub default_sort: SortSpec,
}

impl BrowserConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(MAX_PRODUCTS_VAR) {
            config.rules.max_count = raw
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid(MAX_PRODUCTS_VAR, &raw, format!("{e}")))?;
        }

        if let Some(raw) = lookup(MAX_TOTAL_PRICE_VAR) {
            let price: f64 = raw
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid(MAX_TOTAL_PRICE_VAR, &raw, format!("{e}")))?;
            if !price.is_finite() || price < 0.0 {
                return Err(ConfigError::invalid(
                    MAX_TOTAL_PRICE_VAR,
                    &raw,
                    "must be a non-negative number",
                ));
            }
            config.rules.max_total_price = price;
        }

        if let Some(raw) = lookup(CAPPING_VAR) {
            config.capping = match raw.trim().to_ascii_lowercase().as_str() {
                "category" => CappingPolicy::Category,
                "flat" => CappingPolicy::Flat,
                _ => {
                    return Err(ConfigError::invalid(
                        CAPPING_VAR,
                        &raw,
                        "expected 'category' or 'flat'",
                    ));
                }
            };
        }

        if let Some(raw) = lookup(SORT_VAR) {
            config.default_sort = raw
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid(SORT_VAR, &raw, format!("{e}")))?;
        }

        tracing::debug!(
            max_count = config.rules.max_count,
            max_total_price = config.rules.max_total_price,
            capping = ?config.capping,
            sort = %config.default_sort,
            "browser config loaded"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = BrowserConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.rules, BusinessRules::new(100, 10_000.0));
        assert_eq!(config.capping, CappingPolicy::Category);
        assert_eq!(config.default_sort.to_string(), "name_asc");
    }

    #[test]
    fn overrides_are_parsed() {
        let config = BrowserConfig::from_lookup(lookup(&[
            (MAX_PRODUCTS_VAR, "25"),
            (MAX_TOTAL_PRICE_VAR, " 2500.5 "),
            (CAPPING_VAR, "FLAT"),
            (SORT_VAR, "price_desc"),
        ]))
        .unwrap();
        assert_eq!(config.rules, BusinessRules::new(25, 2_500.5));
        assert_eq!(config.capping, CappingPolicy::Flat);
        assert_eq!(config.default_sort.to_string(), "price_desc");
    }

    #[test]
    fn invalid_values_are_rejected() {
        for (key, value) in [
            (MAX_PRODUCTS_VAR, "-1"),
            (MAX_TOTAL_PRICE_VAR, "-10"),
            (MAX_TOTAL_PRICE_VAR, "lots"),
            (CAPPING_VAR, "global"),
            (SORT_VAR, "price"),
        ] {
            let err = BrowserConfig::from_lookup(lookup(&[(key, value)])).unwrap_err();
            let ConfigError::Invalid { key: got, .. } = err;
            assert_eq!(got, key);
        }
    }
}
