use std::path::Path;

use anyhow::{bail, Context, Result};
use glimpse_core::config::ViewerConfig;
use serde::{Deserialize, Serialize};

use super::choices::ResizeFilter;

pub const DEFAULT_QUALITY: u8 = 75;
pub const QUALITY_STEP: u8 = 5;

/// Target size for the resize step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeSettings {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub filter: ResizeFilter,
}

/// Settings for the preview processor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingSettings {
    /// JPEG quality, 1..=100.
    pub quality: u8,
    pub resize: Option<ResizeSettings>,
}

impl Default for ProcessingSettings {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            resize: None,
        }
    }
}

impl ProcessingSettings {
    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.quality) {
            bail!("processing.quality must be in 1..=100, got {}", self.quality);
        }
        if let Some(resize) = &self.resize {
            if resize.width == 0 || resize.height == 0 {
                bail!(
                    "processing.resize must be non-zero, got {}x{}",
                    resize.width,
                    resize.height
                );
            }
        }
        Ok(())
    }

    /// Step quality by `QUALITY_STEP`. Returns whether it changed.
    pub fn step_quality(&mut self, up: bool) -> bool {
        let next = if up {
            self.quality.saturating_add(QUALITY_STEP).min(100)
        } else {
            self.quality.saturating_sub(QUALITY_STEP).max(1)
        };
        let changed = next != self.quality;
        self.quality = next;
        changed
    }
}

/// Contents of the `--config` TOML file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub viewer: ViewerConfig,
    pub processing: ProcessingSettings,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        config
            .viewer
            .validate()
            .with_context(|| format!("Invalid [viewer] in {}", path.display()))?;
        config.processing.validate()?;
        Ok(config)
    }
}
