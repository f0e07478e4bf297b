//! PDF output on top of printpdf.
//!
//! ```text
//! drawing calls ─▶ [PageWriter] (one page layer, points)
//!                        │
//!                        ▼
//!                  [PdfDocument] (pages, embedded fonts, images)
//!                        │ finish()
//!                        ▼
//!                    PDF bytes
//! ```
//!
//! Text is set in the bundled DejaVu Sans faces, embedded as TrueType, so
//! non-Latin service names keep their characters. The layout code above this
//! module measures text with the same faces.

mod document;
mod font;
mod page;

pub use document::{JpegImage, PdfDocument, PdfError};
pub use font::Font;
pub use page::{Color, PageWriter};
