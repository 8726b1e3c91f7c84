// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr};

use tokio::fs;

use roomcal_core::{APP_NAME, Config as CoreConfig, get_config_dir};

const ROOMCAL_CONFIG_ENV: &str = "ROOMCAL_CONFIG";
const ROOMCAL_DEV_ENV: &str = "ROOMCAL_DEV";

const ROOMCAL_DEV_VALID_TRUE: &[&str] = &["1", "true", "yes"];
const ROOMCAL_DEV_VALID_FALSE: &[&str] = &["0", "false", "no"];

/// Loads and normalizes the configuration.
///
/// The path comes from `--config`, then `ROOMCAL_CONFIG`, then the user config
/// directory. A missing default file yields the default configuration, which
/// shows the demo hotel.
#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<(CoreConfig, Config), Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(ROOMCAL_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        if let Some(true) = is_dev_mode() {
            return Err(format!(
                "Development environment detected ({ROOMCAL_DEV_ENV} is set): config must be explicitly specified via --config or {ROOMCAL_CONFIG_ENV} environment variable",
            ).into());
        }
        let config = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        if !config.exists() {
            tracing::debug!(path = %config.display(), "no config found, using defaults");
            let mut core = CoreConfig::default();
            core.normalize()?;
            return Ok((core, Config::default()));
        }
        config
    };

    let raw = fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse::<ConfigRaw>()?;

    let mut core = raw.core;
    core.normalize()?;
    Ok((core, raw.tui))
}

/// Settings of the terminal front end.
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize)]
pub struct Config {
    /// Gap in terminal cells between the mouse pointer and a hover tooltip.
    #[serde(default = "default_tooltip_margin")]
    pub tooltip_margin: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tooltip_margin: default_tooltip_margin(),
        }
    }
}

fn default_tooltip_margin() -> f64 {
    1.0
}

#[derive(Debug, serde::Deserialize)]
struct ConfigRaw {
    #[serde(default)]
    core: CoreConfig,

    #[serde(default)]
    tui: Config,
}

impl FromStr for ConfigRaw {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

fn is_dev_mode() -> Option<bool> {
    let val = std::env::var(ROOMCAL_DEV_ENV).ok()?;
    let lower = val.to_lowercase();
    if ROOMCAL_DEV_VALID_TRUE.contains(&lower.as_str()) {
        Some(true)
    } else if ROOMCAL_DEV_VALID_FALSE.contains(&lower.as_str()) {
        Some(false)
    } else {
        tracing::warn!(
            "Unrecognized value for {}: '{}'. Expected one of: true: {}, false: {}. Treating as unset.",
            ROOMCAL_DEV_ENV,
            val,
            ROOMCAL_DEV_VALID_TRUE.join(", "),
            ROOMCAL_DEV_VALID_FALSE.join(", ")
        );
        None
    }
}
