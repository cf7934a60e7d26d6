//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `ATELIER_DATA_DIR` - Directory for persisted store snapshots (default: `.atelier`)
//! - `ATELIER_STORAGE_NAMESPACE` - Prefix for storage keys (default: `atelier`)
//! - `ATELIER_CATALOG_PATH` - JSON catalog file (default: built-in collection)
//! - `ATELIER_TOAST_TTL_MS` - Default toast lifetime in milliseconds (default: 4000)
//! - `ATELIER_MAX_TOASTS` - Toasts kept on screen (default: 5)
//! - `ATELIER_RECENTLY_VIEWED_MAX` - Recently viewed list length (default: 8)
//! - `ATELIER_LOCALE` - Display locale (default: en)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use atelier_core::Locale;
use thiserror::Error;

use crate::store::recently_viewed::DEFAULT_MAX_ENTRIES;
use crate::store::ui::{DEFAULT_MAX_TOASTS, DEFAULT_TOAST_TTL};

const MAX_NAMESPACE_LENGTH: usize = 64;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory holding persisted snapshots
    pub data_dir: PathBuf,
    /// Storage key prefix, so several storefronts can share one medium
    pub namespace: String,
    /// Optional JSON catalog replacing the built-in collection
    pub catalog_path: Option<PathBuf>,
    /// Default toast lifetime
    pub toast_ttl: Duration,
    /// Maximum toasts kept on screen
    pub max_toasts: usize,
    /// Maximum recently viewed entries
    pub recently_viewed_max: usize,
    /// Display locale
    pub locale: Locale,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".atelier"),
            namespace: "atelier".to_string(),
            catalog_path: None,
            toast_ttl: DEFAULT_TOAST_TTL,
            max_toasts: DEFAULT_MAX_TOASTS,
            recently_viewed_max: DEFAULT_MAX_ENTRIES,
            locale: Locale::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let namespace = lookup("ATELIER_STORAGE_NAMESPACE").unwrap_or(defaults.namespace);
        validate_namespace(&namespace, "ATELIER_STORAGE_NAMESPACE")?;

        let toast_ttl = parse_optional::<u64>(&lookup, "ATELIER_TOAST_TTL_MS")?
            .map_or(defaults.toast_ttl, Duration::from_millis);
        let max_toasts = parse_optional::<usize>(&lookup, "ATELIER_MAX_TOASTS")?
            .unwrap_or(defaults.max_toasts);
        let recently_viewed_max = parse_optional::<usize>(&lookup, "ATELIER_RECENTLY_VIEWED_MAX")?
            .unwrap_or(defaults.recently_viewed_max);

        require_positive(max_toasts, "ATELIER_MAX_TOASTS")?;
        require_positive(recently_viewed_max, "ATELIER_RECENTLY_VIEWED_MAX")?;

        Ok(Self {
            data_dir: lookup("ATELIER_DATA_DIR").map_or(defaults.data_dir, PathBuf::from),
            namespace,
            catalog_path: lookup("ATELIER_CATALOG_PATH").map(PathBuf::from),
            toast_ttl,
            max_toasts,
            recently_viewed_max,
            locale: parse_optional::<Locale>(&lookup, "ATELIER_LOCALE")?
                .unwrap_or(defaults.locale),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an optional variable with `FromStr`.
fn parse_optional<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
        .transpose()
}

fn require_positive(value: usize, key: &str) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Namespaces end up in storage keys and file names.
fn validate_namespace(namespace: &str, key: &str) -> Result<(), ConfigError> {
    if namespace.is_empty() || namespace.len() > MAX_NAMESPACE_LENGTH {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be 1-{MAX_NAMESPACE_LENGTH} characters"),
        ));
    }
    if !namespace
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "may only contain ASCII letters, digits, '-' and '_'".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = StorefrontConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, StorefrontConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            ("ATELIER_DATA_DIR", "/tmp/atelier"),
            ("ATELIER_STORAGE_NAMESPACE", "maison_2"),
            ("ATELIER_CATALOG_PATH", "catalog.json"),
            ("ATELIER_TOAST_TTL_MS", "1500"),
            ("ATELIER_MAX_TOASTS", "3"),
            ("ATELIER_RECENTLY_VIEWED_MAX", "12"),
            ("ATELIER_LOCALE", "fr-FR"),
        ]))
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/atelier"));
        assert_eq!(config.namespace, "maison_2");
        assert_eq!(config.catalog_path, Some(PathBuf::from("catalog.json")));
        assert_eq!(config.toast_ttl, Duration::from_millis(1500));
        assert_eq!(config.max_toasts, 3);
        assert_eq!(config.recently_viewed_max, 12);
        assert_eq!(config.locale, Locale::Fr);
    }

    #[test]
    fn test_invalid_number() {
        let err = StorefrontConfig::from_lookup(lookup(&[("ATELIER_MAX_TOASTS", "many")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "ATELIER_MAX_TOASTS"));
    }

    #[test]
    fn test_zero_limits_rejected() {
        assert!(
            StorefrontConfig::from_lookup(lookup(&[("ATELIER_RECENTLY_VIEWED_MAX", "0")])).is_err()
        );
    }

    #[test]
    fn test_unsupported_locale() {
        assert!(StorefrontConfig::from_lookup(lookup(&[("ATELIER_LOCALE", "de")])).is_err());
    }

    #[test]
    fn test_namespace_validation() {
        assert!(validate_namespace("atelier-prod", "NS").is_ok());
        assert!(validate_namespace("", "NS").is_err());
        assert!(validate_namespace("a:b", "NS").is_err());
        assert!(validate_namespace(&"x".repeat(65), "NS").is_err());
    }
}
