//! Report palette and text styles.

use crate::layout::TextStyle;
use crate::pdf::{Color, Font};

pub const BRAND: Color = Color::rgb(31, 78, 121);
pub const INK: Color = Color::rgb(33, 37, 41);
pub const MUTED: Color = Color::rgb(108, 117, 125);
pub const RULE: Color = Color::rgb(206, 212, 218);
pub const CARD_FILL: Color = Color::rgb(248, 249, 250);
pub const ROW_SHADE: Color = Color::rgb(241, 245, 249);
pub const NEUTRAL: Color = Color::rgb(74, 111, 165);
pub const HEALTHY: Color = Color::rgb(40, 167, 69);
pub const CONCERNING: Color = Color::rgb(220, 53, 69);

pub const TITLE: TextStyle = TextStyle::new(Font::SansBold, 26.0, Color::WHITE);
pub const SUBTITLE: TextStyle = TextStyle::new(Font::Sans, 13.0, Color::WHITE);
pub const HEADING: TextStyle = TextStyle::new(Font::SansBold, 18.0, BRAND);
pub const SUBHEADING: TextStyle = TextStyle::new(Font::SansBold, 13.0, INK);
pub const BODY: TextStyle = TextStyle::new(Font::Sans, 10.5, INK);
pub const CAPTION: TextStyle = TextStyle::new(Font::Sans, 9.0, MUTED);
pub const FOOTER: TextStyle = TextStyle::new(Font::Sans, 9.0, MUTED);
