use egui::Color32;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::engine::Brush;
use crate::error::ConfigError;

/// Environment variable naming a JSON config file for the binary
pub const CONFIG_ENV: &str = "FADE_OVERLAY_CONFIG";

/// How committed marks age
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FadeConfig {
    /// Marks fade at all
    pub enabled: bool,
    /// Seconds a mark stays fully opaque before it starts to fade
    pub delay: f32,
    /// Seconds from full opacity to gone
    pub duration: f32,
    /// Seconds between two fade ticks
    pub tick_interval: f32,
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            delay: 0.5,
            duration: 2.0,
            tick_interval: 1.0 / 60.0,
        }
    }
}

impl FadeConfig {
    /// Reject values the fade scheduler cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.duration > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "fade.duration must be positive, got {}",
                self.duration
            )));
        }
        if !(self.delay >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "fade.delay must not be negative, got {}",
                self.delay
            )));
        }
        if !(self.tick_interval > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "fade.tick_interval must be positive, got {}",
                self.tick_interval
            )));
        }
        Ok(())
    }
}

/// Overlay settings. Missing fields take their default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub color: Color32,
    pub size: f32,
    /// Colors offered by the tool palette
    pub palette: Vec<Color32>,
    /// Widths offered by the tool palette
    pub sizes: Vec<f32>,
    pub fade: FadeConfig,
    /// Upper bound on the seconds a single frame may advance the fade
    pub max_frame_time: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            color: Color32::RED,
            size: 4.0,
            palette: vec![
                Color32::RED,
                Color32::from_rgb(255, 165, 0),
                Color32::YELLOW,
                Color32::GREEN,
                Color32::from_rgb(0, 160, 255),
                Color32::WHITE,
                Color32::BLACK,
            ],
            sizes: vec![2.0, 4.0, 8.0, 16.0],
            fade: FadeConfig::default(),
            max_frame_time: 0.25,
        }
    }
}

impl OverlayConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fade = &self.fade;
        fade.validate()?;
        if !(self.size > 0.0) {
            return Err(ConfigError::Invalid(format!("size must be positive, got {}", self.size)));
        }
        if self.max_frame_time < fade.tick_interval {
            return Err(ConfigError::Invalid(format!(
                "max_frame_time ({}) must be at least fade.tick_interval ({})",
                self.max_frame_time, fade.tick_interval
            )));
        }
        Ok(())
    }

    pub fn brush(&self) -> Brush {
        Brush {
            color: self.color,
            size: self.size,
        }
    }
}
