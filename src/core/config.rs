use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::window::layout::{LayoutKind, LayoutParams};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Percent of the available width given to the master area.
    pub master_factor: i32,
    /// Outer and inner gap, in pixels.
    pub gap: i32,
    pub border_focus_width: u32,
    pub border_unfocus_width: u32,
    /// X11 color names, resolved against the default colormap.
    pub border_focus_color: String,
    pub border_unfocus_color: String,
    pub min_width: i32,
    pub min_height: i32,
    /// Whether workspaces start in tiling mode.
    pub default_tiling: bool,
    pub default_layout: LayoutKind,
    pub terminal: Vec<String>,
    pub launcher: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            master_factor: 60,
            gap: 8,
            border_focus_width: 12,
            border_unfocus_width: 12,
            border_focus_color: "dodgerblue".to_string(),
            border_unfocus_color: "gray".to_string(),
            min_width: 32,
            min_height: 24,
            default_tiling: false,
            default_layout: LayoutKind::MasterStack,
            terminal: vec!["xterm".to_string()],
            launcher: vec!["dmenu_run".to_string()],
        }
    }
}

impl Config {
    /// Reads the TOML config, or the given explicit path. Any failure logs
    /// a warning and falls back to the defaults; a broken config file must
    /// not keep the session from starting.
    pub fn load(explicit: Option<&Path>) -> Config {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) => p,
                None => return Config::default(),
            },
        };
        match fs::read_to_string(&path) {
            Ok(text) => match toml::from_str(&text) {
                Ok(config) => {
                    debug!("loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("invalid config {}: {e}, using defaults", path.display());
                    Config::default()
                }
            },
            Err(e) => {
                if explicit.is_some() {
                    warn!("cannot read config {}: {e}, using defaults", path.display());
                }
                Config::default()
            }
        }
    }

    fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("driftwm").join("config.toml"))
    }

    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            master_factor: self.master_factor,
            gap: self.gap,
            border: self.border_unfocus_width as i32,
            min_width: self.min_width,
            min_height: self.min_height,
        }
    }
}
