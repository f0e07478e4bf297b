//! Document assembly on top of printpdf: pages, embedded fonts and images.

use std::io::Cursor;

use printpdf::image_crate::codecs::jpeg::JpegDecoder;
use printpdf::{
    Image, IndirectFontRef, Mm, PdfDocumentReference, PdfLayerIndex, PdfLayerReference,
    PdfPageIndex, Pt,
};
use thiserror::Error;

use super::font::Font;
use super::page::PageWriter;

const LAYER: &str = "Content";

/// Errors raised while building or serializing a document.
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("document has no pages")]
    NoPages,

    #[error("failed to embed {font:?}: {message}")]
    Font { font: Font, message: String },

    #[error("image has zero size ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("failed to decode JPEG: {0}")]
    Image(String),

    #[error("failed to serialize document: {0}")]
    Serialize(String),
}

/// The embedded faces of one document.
pub(crate) struct FontSet {
    sans: IndirectFontRef,
    sans_bold: IndirectFontRef,
}

impl FontSet {
    fn embed(doc: &PdfDocumentReference) -> Result<Self, PdfError> {
        let embed = |font: Font| {
            doc.add_external_font(font.data())
                .map_err(|e| PdfError::Font {
                    font,
                    message: e.to_string(),
                })
        };
        Ok(Self {
            sans: embed(Font::Sans)?,
            sans_bold: embed(Font::SansBold)?,
        })
    }

    pub(crate) fn get(&self, font: Font) -> &IndirectFontRef {
        match font {
            Font::Sans => &self.sans,
            Font::SansBold => &self.sans_bold,
        }
    }
}

/// A decoded baseline JPEG ready to be placed on a page.
pub struct JpegImage {
    pub(crate) image: Image,
    pub width: u32,
    pub height: u32,
}

impl JpegImage {
    pub fn decode(data: &[u8], width: u32, height: u32) -> Result<Self, PdfError> {
        if width == 0 || height == 0 {
            return Err(PdfError::EmptyImage { width, height });
        }
        let decoder =
            JpegDecoder::new(Cursor::new(data)).map_err(|e| PdfError::Image(e.to_string()))?;
        let image = Image::try_from(decoder).map_err(|e| PdfError::Image(e.to_string()))?;
        Ok(Self {
            image,
            width,
            height,
        })
    }
}

/// A document under construction. Every page has the same size; pages stay
/// drawable until [`finish`].
///
/// [`finish`]: PdfDocument::finish
pub struct PdfDocument {
    inner: PdfDocumentReference,
    fonts: FontSet,
    width: Mm,
    height: Mm,
    /// printpdf creates the first page together with the document; it is
    /// handed out by the first [`add_page`](PdfDocument::add_page).
    first: Option<(PdfPageIndex, PdfLayerIndex)>,
    layers: Vec<PdfLayerReference>,
}

impl PdfDocument {
    /// New document with a fixed page size in points and both report fonts
    /// embedded.
    pub fn new(title: &str, width: f32, height: f32) -> Result<Self, PdfError> {
        let (width, height) = (Mm::from(Pt(width)), Mm::from(Pt(height)));
        let (inner, page, layer) = printpdf::PdfDocument::new(title, width, height, LAYER);
        let fonts = FontSet::embed(&inner)?;
        Ok(Self {
            inner,
            fonts,
            width,
            height,
            first: Some((page, layer)),
            layers: Vec::new(),
        })
    }

    /// Append an empty page and return its zero-based index.
    pub fn add_page(&mut self) -> usize {
        let (page, layer) = self
            .first
            .take()
            .unwrap_or_else(|| self.inner.add_page(self.width, self.height, LAYER));
        self.layers
            .push(self.inner.get_page(page).get_layer(layer));
        self.layers.len() - 1
    }

    /// Writer for an existing page.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn page(&self, index: usize) -> PageWriter<'_> {
        PageWriter::new(self.layers[index].clone(), &self.fonts)
    }

    /// Serialize the document.
    pub fn finish(self) -> Result<Vec<u8>, PdfError> {
        if self.layers.is_empty() {
            return Err(PdfError::NoPages);
        }
        let Self { inner, layers, .. } = self;
        drop(layers);
        inner
            .save_to_bytes()
            .map_err(|e| PdfError::Serialize(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::Color;

    fn document() -> PdfDocument {
        PdfDocument::new("Test", 612.0, 792.0).unwrap()
    }

    #[test]
    fn empty_document_is_an_error() {
        assert!(matches!(document().finish(), Err(PdfError::NoPages)));
    }

    #[test]
    fn pages_are_numbered_in_order() {
        let mut doc = document();
        assert_eq!(doc.add_page(), 0);
        assert_eq!(doc.add_page(), 1);
        assert_eq!(doc.add_page(), 2);
    }

    #[test]
    fn serializes_with_embedded_fonts() {
        let mut doc = document();
        let index = doc.add_page();
        doc.page(index)
            .text(Font::Sans, 12.0, Color::BLACK, 72.0, 700.0, "Grüße, Платёжи");
        let bytes = doc.finish().unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(bytes.windows(b"FontFile2".len()).any(|w| w == b"FontFile2"));
    }

    #[test]
    fn rejects_empty_and_corrupt_images() {
        assert!(matches!(
            JpegImage::decode(&[], 0, 10),
            Err(PdfError::EmptyImage { width: 0, height: 10 })
        ));
        assert!(matches!(
            JpegImage::decode(b"not a jpeg", 4, 4),
            Err(PdfError::Image(_))
        ));
    }
}
