// SPDX-License-Identifier: MPL-2.0
//! This module handles the crate's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use cropframe::config::{self, Config};
//! use cropframe::media::retouch::Filter;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Remember the last retouch filter
//! config.filter = Some(Filter::Sepia);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

use crate::error::Result;
use crate::media::retouch::Filter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use defaults::{
    DEFAULT_BORDER_COLOR, DEFAULT_BORDER_LINE_WIDTH, DEFAULT_INITIAL_SIDE_RATIO,
    DEFAULT_LABEL_FONT_SIZE, DEFAULT_OVERLAY_OPACITY,
};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "cropframe";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub border_line_width: Option<f32>,
    #[serde(default)]
    pub border_color: Option<String>,
    #[serde(default)]
    pub overlay_opacity: Option<f32>,
    #[serde(default)]
    pub label_font_size: Option<f32>,
    #[serde(default)]
    pub initial_side_ratio: Option<f32>,
    /// Last retouch filter picked by the user.
    #[serde(default)]
    pub filter: Option<Filter>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            border_line_width: Some(DEFAULT_BORDER_LINE_WIDTH),
            border_color: Some(DEFAULT_BORDER_COLOR.to_string()),
            overlay_opacity: Some(DEFAULT_OVERLAY_OPACITY),
            label_font_size: Some(DEFAULT_LABEL_FONT_SIZE),
            initial_side_ratio: Some(DEFAULT_INITIAL_SIDE_RATIO),
            filter: Some(Filter::None),
        }
    }
}

impl Config {
    /// Initial side ratio, clamped to the accepted range.
    #[must_use]
    pub fn initial_side_ratio(&self) -> f32 {
        self.initial_side_ratio
            .unwrap_or(DEFAULT_INITIAL_SIDE_RATIO)
            .clamp(
                defaults::MIN_INITIAL_SIDE_RATIO,
                defaults::MAX_INITIAL_SIDE_RATIO,
            )
    }

    #[must_use]
    pub fn filter(&self) -> Filter {
        self.filter.unwrap_or_default()
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            log::warn!("Ignoring unreadable config {}: {err}", path.display());
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
