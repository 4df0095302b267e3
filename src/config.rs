use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::field::Normalization;
use crate::mask::Threshold;
use crate::render::{DistanceMode, Glow};

/// Defaults applied when a command line flag is not given.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub gray_threshold: u8,
    pub alpha_threshold: u8,
    pub oversample: u32,
    pub pad: u32,
    pub normalization: Normalization,
    pub distance_mode: DistanceMode,
    pub distance_scale: f32,
    pub glow_outer_scale: f32,
    pub glow_inner_scale: f32,
    pub glow_gamma: f32,
}

impl Default for Settings {
    fn default() -> Self {
        let threshold = Threshold::default();
        let glow = Glow::default();
        Self {
            gray_threshold: threshold.gray,
            alpha_threshold: threshold.alpha,
            oversample: 1,
            pad: 0,
            normalization: Normalization::Legacy,
            distance_mode: DistanceMode::Signed,
            distance_scale: 1.0,
            glow_outer_scale: glow.outer_scale,
            glow_inner_scale: glow.inner_scale,
            glow_gamma: glow.gamma,
        }
    }
}

impl Settings {
    fn config_dir() -> Option<PathBuf> {
        std::env::var("HOME").ok().map(|h| PathBuf::from(h).join(".config").join("distancefield"))
    }

    /// `$HOME/.config/distancefield/settings.json`
    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("settings.json"))
    }

    /// Load settings from `path`, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load(path: &Path) -> Self {
        let Ok(data) = fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str(&data) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Ignoring malformed settings file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config dir {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
    }

    pub fn threshold(&self) -> Threshold {
        Threshold {
            gray: self.gray_threshold,
            alpha: self.alpha_threshold,
        }
    }

    pub fn glow(&self) -> Glow {
        Glow {
            outer_scale: self.glow_outer_scale,
            inner_scale: self.glow_inner_scale,
            gamma: self.glow_gamma,
            color: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("nope.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "oversample": 4, "normalization": "area", "distance_mode": "signed2" }"#)
            .unwrap();

        let settings = Settings::load(&path);
        assert_eq!(settings.oversample, 4);
        assert_eq!(settings.normalization, Normalization::Area);
        assert_eq!(settings.distance_mode, DistanceMode::Signed2);
        assert_eq!(settings.gray_threshold, 16);
        assert_eq!(settings.glow_gamma, 2.0);
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ oversample: ").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings {
            pad: 3,
            glow_inner_scale: 10.0,
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
    }
}
