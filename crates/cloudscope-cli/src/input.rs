//! Loading export inputs from disk.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use cloudscope_model::DependencySnapshot;
use cloudscope_raster::{RenderError, SvgSurface};

/// Read a dependency snapshot from a JSON file.
pub fn load_snapshot(path: &Path) -> Result<DependencySnapshot> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse snapshot {}", path.display()))
}

/// Parse an `id=path.svg` overlay argument.
pub fn parse_overlay(arg: &str) -> Result<(String, PathBuf)> {
    let Some((id, path)) = arg.split_once('=') else {
        bail!("expected ID=PATH, got '{arg}'");
    };
    let id = id.trim();
    if id.is_empty() || path.trim().is_empty() {
        bail!("expected ID=PATH, got '{arg}'");
    }
    Ok((id.to_string(), PathBuf::from(path.trim())))
}

/// Raw SVG bytes for a diagram and its overlay layers. A fresh surface is
/// built from it for every export.
#[derive(Debug, Clone, Default)]
pub struct DiagramSource {
    pub svg: Vec<u8>,
    /// Overlay layers by id, drawn in id order.
    pub overlays: BTreeMap<String, Vec<u8>>,
}

impl DiagramSource {
    /// Read the diagram and every overlay file.
    pub fn load(diagram: &Path, overlays: &BTreeMap<String, PathBuf>) -> Result<Self> {
        let svg = std::fs::read(diagram)
            .with_context(|| format!("Failed to read diagram {}", diagram.display()))?;
        let overlays = overlays
            .iter()
            .map(|(id, path)| {
                std::fs::read(path)
                    .with_context(|| format!("Failed to read overlay '{id}' from {}", path.display()))
                    .map(|data| (id.clone(), data))
            })
            .collect::<Result<_>>()?;
        Ok(Self { svg, overlays })
    }

    /// Parse into a mounted surface.
    pub fn surface(&self) -> Result<SvgSurface, RenderError> {
        self.overlays
            .iter()
            .try_fold(SvgSurface::from_svg(&self.svg)?, |surface, (id, data)| {
                surface.with_overlay(id.as_str(), data)
            })
    }
}
