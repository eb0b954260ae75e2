//! The decorative binary digit column.
//!
//! Digits come pre-computed (base pattern + scramble overlay); this widget
//! only maps display indices onto screen rows with a parallax offset, so
//! the strip travels at 40% of the content's scroll speed.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::core::binary::ScrambleMap;

use super::theme::Theme;

/// Vertical rows per digit slot.
pub const DIGIT_SPAN_ROWS: f64 = 1.0;
/// Strip scroll speed relative to the content.
pub const PARALLAX: f64 = 0.4;

pub struct BinaryStrip<'a> {
    digits: &'a str,
    scramble: &'a ScrambleMap,
    scroll_pos: f64,
}

impl<'a> BinaryStrip<'a> {
    pub fn new(digits: &'a str, scramble: &'a ScrambleMap, scroll_pos: f64) -> Self {
        Self { digits, scramble, scroll_pos }
    }
}

impl Widget for BinaryStrip<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 2 || self.digits.is_empty() {
            return;
        }

        let bytes = self.digits.as_bytes();
        let offset = self.scroll_pos * PARALLAX;

        for row in 0..area.height {
            let index = ((row as f64 + offset) / DIGIT_SPAN_ROWS).floor();
            if index < 0.0 {
                continue;
            }
            let index = index as usize;
            let Some(&digit) = bytes.get(index) else {
                continue;
            };
            let style = if self.scramble.contains(index) {
                Theme::binary_scrambled_style()
            } else {
                Theme::binary_style()
            };
            buf.set_string(
                area.x + 1,
                area.y + row,
                (digit as char).to_string(),
                style,
            );
        }
    }
}
