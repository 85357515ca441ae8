//! Font selection and pre-computed text styles for dial digits.
//!
//! Dial digits are sized in pixels (`digits_text_size`), but mono fonts
//! come in fixed point sizes. [`digits_font`] picks the largest `ProFont`
//! whose glyph height fits the requested size, so a 1000px gauge gets the
//! 24pt face and a small one falls back to 7pt.
//!
//! Text width for label placement is measured with the same font the
//! rasterizer draws with ([`text_width`]), so labels stay centered on their
//! ticks at every size.

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::text::{Alignment, Baseline, TextStyle, TextStyleBuilder};
use profont::{
    PROFONT_7_POINT,
    PROFONT_9_POINT,
    PROFONT_10_POINT,
    PROFONT_12_POINT,
    PROFONT_14_POINT,
    PROFONT_18_POINT,
    PROFONT_24_POINT,
};

/// Available digit faces, smallest first.
const DIGIT_FONTS: [&MonoFont<'static>; 7] = [
    &PROFONT_7_POINT,
    &PROFONT_9_POINT,
    &PROFONT_10_POINT,
    &PROFONT_12_POINT,
    &PROFONT_14_POINT,
    &PROFONT_18_POINT,
    &PROFONT_24_POINT,
];

/// Labels are anchored at their center point on the label circle.
pub const LABEL_TEXT_STYLE: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Middle)
    .build();

/// Largest digit font whose glyph height fits `text_size` pixels.
pub fn digits_font(text_size: f32) -> &'static MonoFont<'static> {
    let mut chosen = DIGIT_FONTS[0];
    for font in DIGIT_FONTS {
        if font.character_size.height as f32 <= text_size {
            chosen = font;
        }
    }
    chosen
}

/// Rendered width of `text` in pixels.
pub fn text_width(
    font: &MonoFont<'_>,
    text: &str,
) -> u32 {
    let chars = text.chars().count() as u32;
    if chars == 0 {
        return 0;
    }
    chars * font.character_size.width + (chars - 1) * font.character_spacing
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_font_picks_largest_fitting() {
        let big = digits_font(50.0);
        assert_eq!(big.character_size, PROFONT_24_POINT.character_size, "50px should use the biggest face");

        let tiny = digits_font(1.0);
        assert_eq!(tiny.character_size, PROFONT_7_POINT.character_size, "tiny sizes fall back to smallest");
    }

    #[test]
    fn test_digits_font_grows_with_size() {
        let mut prev = 0;
        for size in (4..60).map(|s| s as f32) {
            let height = digits_font(size).character_size.height;
            assert!(height >= prev, "font should never shrink as text size grows ({size}px)");
            prev = height;
        }
    }

    #[test]
    fn test_text_width() {
        let font = &PROFONT_12_POINT;
        assert_eq!(text_width(font, ""), 0);
        assert_eq!(text_width(font, "0"), font.character_size.width);
        assert_eq!(
            text_width(font, "220"),
            3 * font.character_size.width + 2 * font.character_spacing
        );
    }
}
