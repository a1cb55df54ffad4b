//! Environment-driven settings for the terminal registry.
//!
//! All variables are optional; an unset or blank value falls back to the
//! default.

use car_registry_core::db::resolve_db_path;
use car_registry_core::{default_log_level, DB_PATH_ENV};
use std::path::PathBuf;

pub const LOG_DIR_ENV: &str = "CAR_REGISTRY_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "CAR_REGISTRY_LOG_LEVEL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub db_path: PathBuf,
    /// Logging stays off when this is `None`.
    pub log_dir: Option<String>,
    pub log_level: String,
}

impl CliConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: resolve_db_path(read(DB_PATH_ENV).as_deref()),
            log_dir: read(LOG_DIR_ENV),
            log_level: read(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CliConfig, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use car_registry_core::{default_log_level, DB_PATH_ENV, DEFAULT_DB_FILE_NAME};
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = CliConfig::from_lookup(|_| None);
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_FILE_NAME));
        assert_eq!(config.log_dir, None);
        assert_eq!(config.log_level, default_log_level());
    }

    #[test]
    fn values_are_trimmed_and_blank_values_ignored() {
        let vars = HashMap::from([
            (DB_PATH_ENV, " /data/cars.db ".to_string()),
            (LOG_DIR_ENV, "   ".to_string()),
            (LOG_LEVEL_ENV, "warn".to_string()),
        ]);
        let config = CliConfig::from_lookup(|key| vars.get(key).cloned());
        assert_eq!(config.db_path, PathBuf::from("/data/cars.db"));
        assert_eq!(config.log_dir, None);
        assert_eq!(config.log_level, "warn");
    }
}
