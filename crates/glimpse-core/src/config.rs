use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_DEBOUNCE_MS, DEFAULT_DIVIDER_HIT_WIDTH, DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE,
    DEFAULT_ZOOM_INTENSITY, SUPPORTED_EXTENSIONS,
};
use crate::error::{GlimpseError, Result};

/// Tunables for the comparison viewer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub zoom: ZoomLimits,
    pub divider: DividerConfig,
    /// Quiet period (milliseconds) before a parameter change triggers reprocessing.
    pub debounce_ms: u64,
    /// Lower-case file extensions accepted for opening.
    pub extensions: Vec<String>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            zoom: ZoomLimits::default(),
            divider: DividerConfig::default(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            extensions: SUPPORTED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl ViewerConfig {
    /// Check that the numeric bounds are usable.
    pub fn validate(&self) -> Result<()> {
        self.zoom.validate()?;
        if !(self.divider.hit_width > 0.0 && self.divider.hit_width.is_finite()) {
            return Err(GlimpseError::InvalidConfig(format!(
                "divider hit width must be positive, got {}",
                self.divider.hit_width
            )));
        }
        if self.extensions.is_empty() {
            return Err(GlimpseError::InvalidConfig(
                "extension allow-list must not be empty".into(),
            ));
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Scale bounds and zoom step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomLimits {
    pub min_scale: f32,
    pub max_scale: f32,
    /// Fraction of the current scale applied per zoom step.
    pub intensity: f32,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            intensity: DEFAULT_ZOOM_INTENSITY,
        }
    }
}

impl ZoomLimits {
    pub fn validate(&self) -> Result<()> {
        if !(self.min_scale > 0.0 && self.min_scale.is_finite()) {
            return Err(GlimpseError::InvalidConfig(format!(
                "min_scale must be positive, got {}",
                self.min_scale
            )));
        }
        if !(self.max_scale >= self.min_scale && self.max_scale.is_finite()) {
            return Err(GlimpseError::InvalidConfig(format!(
                "max_scale ({}) must be finite and >= min_scale ({})",
                self.max_scale, self.min_scale
            )));
        }
        if !(self.intensity > 0.0 && self.intensity < 1.0) {
            return Err(GlimpseError::InvalidConfig(format!(
                "zoom intensity must be in (0, 1), got {}",
                self.intensity
            )));
        }
        Ok(())
    }

    /// Never panics, even on limits that fail [`validate`](Self::validate).
    pub fn clamp(&self, scale: f32) -> f32 {
        scale.max(self.min_scale).min(self.max_scale)
    }
}

impl std::fmt::Display for ZoomLimits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.0}%..{:.0}% (step {:.0}%)",
            self.min_scale * 100.0,
            self.max_scale * 100.0,
            self.intensity * 100.0
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DividerConfig {
    /// Width of the grab band around the divider, in screen pixels.
    pub hit_width: f32,
}

impl Default for DividerConfig {
    fn default() -> Self {
        Self {
            hit_width: DEFAULT_DIVIDER_HIT_WIDTH,
        }
    }
}
