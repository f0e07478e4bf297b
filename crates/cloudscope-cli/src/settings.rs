//! Export settings, persisted as TOML in the user's config directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use cloudscope_raster::{RasterizerConfig, parse_hex_color};

/// Export settings. Missing keys fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Prefix of every artifact file name.
    pub product_name: String,

    /// Where artifacts are written.
    pub output_dir: PathBuf,

    /// Background painted behind the diagram while capturing, as `#rrggbb`.
    pub background: String,

    /// Wait before capturing so the surface can repaint with capture styling.
    pub settle_delay_ms: u64,

    /// Resolution multiplier for diagrams embedded in reports.
    pub document_pixel_ratio: f32,

    /// Resolution multiplier for standalone PNG snapshots.
    pub standalone_pixel_ratio: f32,

    /// Overlay control layers (id to SVG path) drawn over every diagram and
    /// hidden during capture.
    pub overlays: BTreeMap<String, PathBuf>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            product_name: "cloudscope".to_string(),
            output_dir: PathBuf::from("exports"),
            background: "#ffffff".to_string(),
            settle_delay_ms: 50,
            document_pixel_ratio: 0.5,
            standalone_pixel_ratio: 1.0,
            overlays: BTreeMap::new(),
        }
    }
}

impl ExportSettings {
    /// Load from the default path, or defaults if there is no settings file.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load from `path`. A missing file yields defaults; a malformed one is an
    /// error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings in {}", path.display()))
    }

    /// Default config file path.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("io", "Cloudscope", "cloudscope")
            .map(|dirs| dirs.config_dir().join("settings.toml"))
            .unwrap_or_else(|| PathBuf::from("settings.toml"))
    }

    /// Rasterizer configuration derived from these settings.
    pub fn rasterizer_config(&self) -> Result<RasterizerConfig> {
        let background = parse_hex_color(&self.background)
            .with_context(|| format!("Invalid background color '{}'", self.background))?;
        Ok(RasterizerConfig {
            background,
            settle_delay: Duration::from_millis(self.settle_delay_ms),
            document_pixel_ratio: self.document_pixel_ratio,
            standalone_pixel_ratio: self.standalone_pixel_ratio,
        })
    }
}
