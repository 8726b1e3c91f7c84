// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use chrono::Weekday;

use crate::{Error, SlotGrid, TOOLTIP_MARGIN, ViewMode};

/// The name of the application.
pub const APP_NAME: &str = "roomcal";

/// Configuration of the calendar core.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct Config {
    /// Path to a JSON or TOML snapshot of rooms and events. The built-in demo
    /// hotel is used when unset.
    #[serde(default)]
    pub data_path: Option<PathBuf>,

    /// The first day of a week in week mode.
    #[serde(default = "default_week_starts_on")]
    pub week_starts_on: Weekday,

    /// The view mode a calendar opens in.
    #[serde(default)]
    pub view_mode: ViewMode,

    /// Gap between the pointer and a hover tooltip.
    #[serde(default = "default_tooltip_margin")]
    pub tooltip_margin: f64,

    /// Geometry of the hour-slot view.
    #[serde(default)]
    pub slots: SlotGrid,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: None,
            week_starts_on: default_week_starts_on(),
            view_mode: ViewMode::default(),
            tooltip_margin: default_tooltip_margin(),
            slots: SlotGrid::default(),
        }
    }
}

impl Config {
    /// Normalize the configuration.
    pub fn normalize(&mut self) -> Result<(), Error> {
        // Normalize data path
        if let Some(path) = &self.data_path {
            self.data_path = Some(expand_path(path)?);
        }

        if self.tooltip_margin.is_nan() || self.tooltip_margin < 0.0 {
            tracing::warn!(
                margin = self.tooltip_margin,
                "tooltip margin must be non-negative, using default"
            );
            self.tooltip_margin = default_tooltip_margin();
        }

        self.slots.validate()
    }
}

fn default_week_starts_on() -> Weekday {
    Weekday::Mon
}

fn default_tooltip_margin() -> f64 {
    TOOLTIP_MARGIN
}

/// Handle tilde (~) and environment variables in the path
fn expand_path(path: &Path) -> Result<PathBuf, Error> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    let path = path
        .to_str()
        .ok_or_else(|| Error::Path(format!("Invalid path: {}", path.display())))?;

    // Handle tilde and home directory
    let home_prefixes: &[&str] = if cfg!(unix) {
        &["~/", "$HOME/", "${HOME}/"]
    } else {
        &[r"~\", "~/", r"%UserProfile%\", r"%UserProfile%/"]
    };
    for prefix in home_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_home_dir()?.join(stripped));
        }
    }

    // Handle config directories
    let config_prefixes: &[&str] = if cfg!(unix) {
        &["$XDG_CONFIG_HOME/", "${XDG_CONFIG_HOME}/"]
    } else {
        &[r"%LOCALAPPDATA%\", "%LOCALAPPDATA%/"]
    };
    for prefix in config_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_config_dir()?.join(stripped));
        }
    }

    Ok(path.into())
}

fn get_home_dir() -> Result<PathBuf, Error> {
    dirs::home_dir().ok_or_else(|| Error::Path("User-specific home directory not found".into()))
}

/// The user-specific configuration directory.
pub fn get_config_dir() -> Result<PathBuf, Error> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| Error::Path("User-specific config directory not found".into()))
}
