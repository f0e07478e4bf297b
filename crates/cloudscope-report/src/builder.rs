//! Page bookkeeping shared by the section writers.

use std::collections::BTreeSet;

use crate::layout::{
    Align, Canvas, FOOTER_BASELINE, LayoutCursor, MARGIN, PAGE_HEIGHT, PAGE_WIDTH, POINTS_PER_INCH,
};
use crate::pdf::{PdfDocument, PdfError};
use crate::sections::Section;
use crate::style;

/// What ended up on one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    /// One-based page number.
    pub number: usize,
    /// Sections drawn on this page, in order.
    pub sections: Vec<Section>,
    /// Lowest y (inches from the top edge) reached by section content.
    pub content_bottom: f32,
    /// Rightmost x (inches from the left edge) reached by any text.
    pub text_right: f32,
    /// Every line of text drawn, in drawing order.
    pub text_runs: Vec<String>,
    /// Images placed on the page.
    pub images: usize,
    /// Characters drawn without a glyph in the report font.
    pub missing_glyphs: BTreeSet<char>,
    /// Footer text, set by the pagination pass.
    pub footer: Option<String>,
}

impl PageLayout {
    pub fn new(number: usize) -> Self {
        Self {
            number,
            sections: Vec::new(),
            content_bottom: MARGIN,
            text_right: 0.0,
            text_runs: Vec::new(),
            images: 0,
            missing_glyphs: BTreeSet::new(),
            footer: None,
        }
    }
}

/// Document, cursor and per-page records, mutated section by section.
pub struct ReportBuilder {
    doc: PdfDocument,
    cursor: LayoutCursor,
    pages: Vec<PageLayout>,
}

impl ReportBuilder {
    pub fn new(title: &str) -> Result<Self, PdfError> {
        Ok(Self {
            doc: PdfDocument::new(
                title,
                PAGE_WIDTH * POINTS_PER_INCH,
                PAGE_HEIGHT * POINTS_PER_INCH,
            )?,
            cursor: LayoutCursor::top_of(0),
            pages: Vec::new(),
        })
    }

    /// Start a fresh page for `section` and move the cursor to its top.
    pub fn start_page(&mut self, section: Section) {
        let index = self.doc.add_page();
        self.cursor = LayoutCursor::top_of(index);
        let mut page = PageLayout::new(index + 1);
        page.sections.push(section);
        self.pages.push(page);
    }

    pub fn cursor(&self) -> LayoutCursor {
        self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut LayoutCursor {
        &mut self.cursor
    }

    /// Canvas for the page under the cursor.
    pub fn canvas(&mut self) -> Canvas<'_> {
        let index = self.cursor.page;
        Canvas::new(self.doc.page(index), &mut self.pages[index])
    }

    /// Stamp `Page X of N` on every page. Runs once all sections are drawn.
    pub fn paginate(&mut self) {
        let total = self.pages.len();
        for (index, page) in self.pages.iter_mut().enumerate() {
            let footer = format!("Page {} of {}", index + 1, total);
            // footers sit in the margin and do not count as content
            let content_bottom = page.content_bottom;
            Canvas::new(self.doc.page(index), page).text(
                style::FOOTER,
                PAGE_WIDTH / 2.0,
                FOOTER_BASELINE,
                Align::Center,
                &footer,
            );
            page.content_bottom = content_bottom;
            page.footer = Some(footer);
        }
    }

    /// Serialize the document.
    pub fn finish(self) -> Result<(Vec<u8>, Vec<PageLayout>), PdfError> {
        let bytes = self.doc.finish()?;
        Ok((bytes, self.pages))
    }
}
