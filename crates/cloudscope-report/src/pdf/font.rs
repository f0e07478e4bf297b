//! Embedded report typefaces and their metrics.
//!
//! Reports embed DejaVu Sans (regular and bold) so names in any script the
//! face covers (Latin, Greek, Cyrillic and more) reach the PDF unchanged.
//! Widths come from the font's own advance table.

use ttf_parser::{Face, GlyphId};

const SANS: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
const SANS_BOLD: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

/// Advance used for every character if a face fails to parse, in em.
const FALLBACK_ADVANCE: f32 = 0.6;

/// Fonts available to every report page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Sans,
    SansBold,
}

impl Font {
    /// The TrueType program embedded into documents.
    pub fn data(&self) -> &'static [u8] {
        match self {
            Self::Sans => SANS,
            Self::SansBold => SANS_BOLD,
        }
    }

    fn face(&self) -> Option<Face<'static>> {
        Face::parse(self.data(), 0).ok()
    }

    /// Width of `text` in points at `size` points. Characters without a
    /// glyph are measured as the missing-glyph box.
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        let Some(face) = self.face() else {
            return text.chars().count() as f32 * FALLBACK_ADVANCE * size;
        };
        let notdef = face.glyph_hor_advance(GlyphId(0)).unwrap_or(0);
        let units: u32 = text
            .chars()
            .map(|ch| {
                face.glyph_index(ch)
                    .and_then(|glyph| face.glyph_hor_advance(glyph))
                    .unwrap_or(notdef)
            })
            .map(u32::from)
            .sum();
        units as f32 * size / f32::from(face.units_per_em())
    }

    /// Printable characters of `text` the face has no glyph for.
    pub fn missing_glyphs<'a>(&self, text: &'a str) -> impl Iterator<Item = char> + 'a {
        let face = self.face();
        text.chars().filter(move |ch| {
            !ch.is_control()
                && face
                    .as_ref()
                    .is_none_or(|face| face.glyph_index(*ch).is_none())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Font; 2] = [Font::Sans, Font::SansBold];

    #[test]
    fn bundled_faces_parse() {
        for font in ALL {
            assert!(font.face().is_some(), "{font:?}");
        }
    }

    #[test]
    fn measures_text() {
        let regular = Font::Sans.text_width("Hi", 10.0);
        assert!(regular > 5.0 && regular < 15.0, "{regular}");
        assert!(Font::SansBold.text_width("Hi", 10.0) > regular);
        assert!((Font::Sans.text_width("Hi", 20.0) - 2.0 * regular).abs() < 1e-3);
        assert_eq!(Font::Sans.text_width("", 10.0), 0.0);
    }

    #[test]
    fn covers_latin_and_cyrillic() {
        for font in ALL {
            assert_eq!(font.missing_glyphs("café Платёжи-db \u{2022} \u{2026}").count(), 0);
            assert!(font.text_width("é", 10.0) > 0.0);
        }
    }

    #[test]
    fn reports_uncovered_characters() {
        let missing: Vec<char> = Font::Sans.missing_glyphs("支付-api\n").collect();
        assert_eq!(missing, vec!['支', '付']);
    }
}
