//! Rasterization of rendered dependency graphs.
//!
//! - **Surface** (`surface`): the [`RenderSurface`] seam and its style snapshot
//! - **Scope** (`scope`): scoped style override with guaranteed restore
//! - **Capture** (`capture`): the [`Rasterizer`] and [`CapturedImage`]
//! - **SVG** (`svg`): a `resvg`-backed surface
//! - **PNG export** (`png`): standalone snapshot download

pub mod capture;
pub mod color;
pub mod png;
pub mod scope;
pub mod surface;
pub mod svg;

pub use capture::{CaptureTarget, CapturedImage, Rasterizer, RasterizerConfig};
pub use color::parse_hex_color;
pub use png::{PngOptions, export_png};
pub use scope::CaptureScope;
pub use surface::{Background, RenderError, RenderSurface, SurfaceStyle};
pub use svg::SvgSurface;
