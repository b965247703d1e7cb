//! Runtime configuration.
//!
//! Layers, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. An optional TOML file passed with `--config`
//! 3. `AQUAWATCH_*` environment variables, with `__` between nested keys
//!    (e.g. `AQUAWATCH_AQUARIUM__VOLUME_LITERS=200`)
//!
//! Command-line flags are applied on top by the binary.
//!
//! ```toml
//! tick_ms = 1000
//! seed = 42
//! log_filter = "aquawatch=debug"
//!
//! [aquarium]
//! volume_liters = 60.0
//! filter_description = "Hang-on-back"
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use config::{Config, Environment, File, FileFormat, Map};
use serde::{Deserialize, Serialize};

use crate::data::AquariumSettings;
use crate::source::DEFAULT_TICK;

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "AQUAWATCH";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Milliseconds between simulated readings.
    pub tick_ms: u64,
    /// Seed for the simulator; random when absent.
    pub seed: Option<u64>,
    /// `EnvFilter` directive used when logging to a file.
    pub log_filter: String,
    pub aquarium: AquariumSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK.as_millis() as u64,
            seed: None,
            log_filter: "info".to_string(),
            aquarium: AquariumSettings::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from an optional file and the process environment.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Load configuration, reading environment overrides from `env` instead
    /// of the process environment when given.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> anyhow::Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }
        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .context("failed to read configuration")?;

        let app: AppConfig = config
            .try_deserialize()
            .context("invalid configuration")?;
        if app.tick_ms == 0 {
            anyhow::bail!("tick_ms must be greater than zero");
        }
        Ok(app)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn no_env() -> Option<Map<String, String>> {
        Some(Map::new())
    }

    #[test]
    fn test_defaults_without_sources() {
        let config = AppConfig::load_with_env(None, no_env()).unwrap();
        assert_eq!(config.tick_ms, 3000);
        assert_eq!(config.seed, None);
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.tick(), Duration::from_secs(3));
        assert_eq!(config.aquarium.filter_media.len(), 3);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
tick_ms = 500
seed = 9

[aquarium]
volume_liters = 60.0
filter_description = "Hang-on-back"
"#
        )
        .unwrap();

        let config = AppConfig::load_with_env(Some(file.path()), no_env()).unwrap();
        assert_eq!(config.tick_ms, 500);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.aquarium.volume_liters, 60.0);
        assert_eq!(config.aquarium.filter_description, "Hang-on-back");
        // Unnamed aquarium fields keep their defaults
        assert_eq!(config.aquarium.fish.len(), 4);
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "tick_ms = 500").unwrap();

        let mut env = Map::new();
        env.insert("AQUAWATCH_TICK_MS".to_string(), "250".to_string());
        env.insert(
            "AQUAWATCH_AQUARIUM__VOLUME_LITERS".to_string(),
            "200".to_string(),
        );

        let config = AppConfig::load_with_env(Some(file.path()), Some(env)).unwrap();
        assert_eq!(config.tick_ms, 250);
        assert_eq!(config.aquarium.volume_liters, 200.0);
    }

    #[test]
    fn test_zero_tick_rejected() {
        let mut env = Map::new();
        env.insert("AQUAWATCH_TICK_MS".to_string(), "0".to_string());
        assert!(AppConfig::load_with_env(None, Some(env)).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let path = Path::new("/nonexistent/aquawatch.toml");
        let result = AppConfig::load_with_env(Some(path), no_env());
        assert!(result.is_err());
    }
}
