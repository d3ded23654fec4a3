//! Runner settings
//!
//! Stored as JSON next to the binary or passed with `--settings`. Every field
//! has a default, so a partial file only overrides what it names.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{MAX_SUBSTEPS, REFERENCE_HEIGHT, REFERENCE_WIDTH, TICK_RATE};
use crate::tuning::Tuning;

/// Largest accepted screen dimension in pixels
const MAX_SCREEN_DIMENSION: f32 = 16384.0;

/// Settings load/save failures
#[derive(Debug, Error)]
pub enum SettingsError {
    /// File could not be read or written
    #[error("Settings file error: {0}")]
    Io(#[from] std::io::Error),

    /// File is not valid settings JSON
    #[error("Malformed settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// Values parse but cannot be used
    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// Runner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Display ===
    pub screen_width: f32,
    pub screen_height: f32,
    /// Text renderer grid size
    pub text_columns: usize,
    pub text_rows: usize,

    // === Timing ===
    /// Simulation ticks per second
    pub tick_rate: u32,
    /// Maximum ticks run for one frame
    pub max_substeps: u32,

    // === Headless run ===
    /// Session seed (random when absent)
    pub seed: Option<u64>,
    /// Stop after this many ticks
    pub max_ticks: u64,
    /// Draw a text frame every N ticks (0 disables drawing)
    pub draw_every: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Display
            screen_width: REFERENCE_WIDTH,
            screen_height: REFERENCE_HEIGHT,
            text_columns: 80,
            text_rows: 24,

            // Timing
            tick_rate: TICK_RATE,
            max_substeps: MAX_SUBSTEPS,

            // Headless run
            seed: None,
            max_ticks: 3600,
            draw_every: 0,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let dimension_ok = |d: f32| d.is_finite() && d > 0.0 && d <= MAX_SCREEN_DIMENSION;
        if !(dimension_ok(self.screen_width) && dimension_ok(self.screen_height)) {
            return Err(SettingsError::Invalid(format!(
                "screen size {}x{} must be positive and at most {MAX_SCREEN_DIMENSION}",
                self.screen_width, self.screen_height
            )));
        }
        if self.tick_rate == 0 {
            return Err(SettingsError::Invalid("tick_rate must be positive".into()));
        }
        if self.max_substeps == 0 {
            return Err(SettingsError::Invalid("max_substeps must be positive".into()));
        }
        if self.text_columns == 0 || self.text_rows == 0 {
            return Err(SettingsError::Invalid("text grid must not be empty".into()));
        }
        Ok(())
    }

    /// Game balance for the configured screen
    pub fn tuning(&self) -> Tuning {
        Tuning::for_screen(self.screen_width, self.screen_height)
    }

    /// Milliseconds per simulation tick
    pub fn tick_ms(&self) -> f32 {
        1000.0 / self.tick_rate.max(1) as f32
    }
}
