// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! Build the node settings
//!
//! ---
//! The node reads, and merges in this order (later sources override earlier ones):
//! 1. the file at the path in `TANGLE_CONFIG_PATH` (`base_config/config.toml` by default)
//! 2. the file at the path in `TANGLE_CONFIG_OVERRIDE_PATH` (`config/config.toml` by default), if it exists
//! 3. the user configuration directory of the platform, if it exists
//! 4. environment variables prefixed with `TANGLE`, nested keys separated by `__`
//!    (for example `TANGLE_TIP_SELECTION__ALPHA=0.5`)

use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;
use tangle_models::config::{LAG_SAMPLE_SIZE, MAX_TIPS, MIN_WEIGHT_MAGNITUDE};
use tangle_tipselection_exports::{RecyclerConfig, TipSelConfig};

const BASE_CONFIG_PATH: &str = "base_config/config.toml";
const OVERRIDE_CONFIG_PATH: &str = "config/config.toml";

/// Merge the configuration sources into `T`
pub fn build_tangle_settings<T: DeserializeOwned>(
    app_name: &str,
    env_prefix: &str,
) -> Result<T, config::ConfigError> {
    let mut builder = config::Config::builder();
    let config_path =
        std::env::var("TANGLE_CONFIG_PATH").unwrap_or_else(|_| BASE_CONFIG_PATH.to_string());
    builder = builder.add_source(config::File::with_name(&config_path));

    let config_override_path = std::env::var("TANGLE_CONFIG_OVERRIDE_PATH")
        .unwrap_or_else(|_| OVERRIDE_CONFIG_PATH.to_string());
    if Path::new(&config_override_path).is_file() {
        builder = builder.add_source(config::File::with_name(&config_override_path));
    }

    if let Some(proj_dirs) = ProjectDirs::from("org", "Tangle", app_name) {
        // Portable user config loading
        let user_config_path = proj_dirs.config_dir();
        if let (true, Some(path_str)) = (user_config_path.exists(), user_config_path.to_str()) {
            builder = builder.add_source(config::File::with_name(path_str));
        }
    }

    builder
        .add_source(config::Environment::with_prefix(env_prefix).separator("__"))
        .build()?
        .try_deserialize()
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct LoggingSettings {
    pub level: usize,
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct TangleSettings {
    pub tips_capacity: usize,
    pub min_weight_magnitude: u8,
}

impl Default for TangleSettings {
    fn default() -> Self {
        TangleSettings {
            tips_capacity: MAX_TIPS,
            min_weight_magnitude: MIN_WEIGHT_MAGNITUDE,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct StatsSettings {
    pub interval_ms: u64,
    #[serde(default = "default_lag_sample_size")]
    pub lag_sample_size: usize,
}

fn default_lag_sample_size() -> usize {
    LAG_SAMPLE_SIZE
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub logging: LoggingSettings,
    #[serde(default)]
    pub tangle: TangleSettings,
    pub stats: StatsSettings,
    #[serde(default)]
    pub tip_selection: TipSelConfig,
    #[serde(default)]
    pub recycler: RecyclerConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tangle_tipselection_exports::{BacktrackStrategy, EntryPointKind};

    #[test]
    fn test_base_config_is_valid() {
        let settings: Settings = config::Config::builder()
            .add_source(config::File::from_str(
                include_str!("../base_config/config.toml"),
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(settings.logging.level, 2);
        assert_eq!(settings.tangle.min_weight_magnitude, MIN_WEIGHT_MAGNITUDE);
        assert_eq!(
            settings.tip_selection.entry_point,
            EntryPointKind::CumulativeWeightThreshold
        );
        assert_eq!(settings.tip_selection.backtrack, BacktrackStrategy::Trunk);
        assert!(settings.tip_selection.check().is_ok());
        assert!(settings.recycler.align_to_sunday);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let settings: Settings = config::Config::builder()
            .add_source(config::File::from_str(
                "[logging]\nlevel = 3\n[stats]\ninterval_ms = 1000\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(settings.tangle.tips_capacity, MAX_TIPS);
        assert_eq!(settings.stats.lag_sample_size, LAG_SAMPLE_SIZE);
        assert_eq!(settings.tip_selection.cw_threshold, TipSelConfig::default().cw_threshold);
    }
}
