//! Color constants and channel interpolation for the gauge.
//!
//! # Rgb888 Color Format
//!
//! The gauge works in 24-bit `Rgb888` (8 bits per channel). This matches the
//! ARGB color ints of typical UI hosts with the alpha channel fixed at opaque,
//! and gives the needle flash enough resolution for a smooth fade.
//!
//! # Interpolation
//!
//! [`lerp_rgb888_ratio`] blends two colors channel by channel at an exact
//! rational position `num / den`, in integer math. Each channel is rounded
//! with `floor(x + 0.5)`, which commutes with integer offsets, so a fade
//! `a -> b` at `num / den` and the reverse fade `b -> a` at `(den - num) / den`
//! land on the same color with no float error in between. The needle flash
//! relies on this to be symmetric.
//!
//! [`lerp_rgb888`] takes an `f32` position and quantizes it to
//! [`LERP_SCALE`] steps first.

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait)
// =============================================================================

/// Pure black. Used for the screen clear around the round dial.
pub const BLACK: Rgb888 = Rgb888::BLACK;

/// Pure white. Default dial digit color.
pub const WHITE: Rgb888 = Rgb888::WHITE;

/// Pure red. Default border color and the needle flash alert color.
pub const RED: Rgb888 = Rgb888::RED;

/// Pure blue. Default base needle color and the digit glow.
pub const BLUE: Rgb888 = Rgb888::BLUE;

// =============================================================================
// Custom Colors
// =============================================================================

/// Dark gray dial face (0x44, 0x44, 0x44).
pub const DARK_GRAY: Rgb888 = Rgb888::new(0x44, 0x44, 0x44);

// =============================================================================
// Color Interpolation
// =============================================================================

/// Fixed-point steps per unit used by [`lerp_rgb888`].
pub const LERP_SCALE: u64 = 1 << 24;

/// Linear interpolation between two colors, channel by channel.
///
/// `t` is clamped to `[0.0, 1.0]`. At `t = 0.0` returns `from`, at `t = 1.0`
/// returns `to` exactly.
pub fn lerp_rgb888(
    from: Rgb888,
    to: Rgb888,
    t: f32,
) -> Rgb888 {
    let num = (t.clamp(0.0, 1.0) * LERP_SCALE as f32).round() as u64;
    lerp_rgb888_ratio(from, to, num, LERP_SCALE)
}

/// Interpolate at the exact position `num / den`.
///
/// `num` is clamped to `den`. A zero `den` returns `to`.
pub fn lerp_rgb888_ratio(
    from: Rgb888,
    to: Rgb888,
    num: u64,
    den: u64,
) -> Rgb888 {
    if den == 0 {
        return to;
    }
    let num = num.min(den);
    Rgb888::new(
        lerp_channel(from.r(), to.r(), num, den),
        lerp_channel(from.g(), to.g(), num, den),
        lerp_channel(from.b(), to.b(), num, den),
    )
}

/// `from + floor(delta * num / den + 1/2)`, exact.
fn lerp_channel(
    from: u8,
    to: u8,
    num: u64,
    den: u64,
) -> u8 {
    let delta = i128::from(to) - i128::from(from);
    let den = i128::from(den);
    let step = (2 * delta * i128::from(num) + den).div_euclid(2 * den);
    (i128::from(from) + step).clamp(0, 255) as u8
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints_exact() {
        assert_eq!(lerp_rgb888(BLUE, RED, 0.0), BLUE, "t=0 should return 'from'");
        assert_eq!(lerp_rgb888(BLUE, RED, 1.0), RED, "t=1 should return 'to'");
    }

    #[test]
    fn test_lerp_same_color() {
        assert_eq!(lerp_rgb888(DARK_GRAY, DARK_GRAY, 0.37), DARK_GRAY);
    }

    #[test]
    fn test_lerp_midpoint() {
        let mid = lerp_rgb888(BLACK, WHITE, 0.5);
        // 127.5 rounds half up
        assert_eq!(mid, Rgb888::new(128, 128, 128));
    }

    #[test]
    fn test_lerp_clamps_t() {
        assert_eq!(lerp_rgb888(BLACK, WHITE, -1.0), BLACK);
        assert_eq!(lerp_rgb888(BLACK, WHITE, 2.0), WHITE);
    }

    #[test]
    fn test_ratio_reverse_is_exact_mirror() {
        let den = 300_000_u64;
        for num in 0..=den {
            assert_eq!(
                lerp_rgb888_ratio(BLUE, RED, num, den),
                lerp_rgb888_ratio(RED, BLUE, den - num, den),
                "forward and reverse fades should meet at {num}/{den}"
            );
        }
    }

    #[test]
    fn test_ratio_rounds_half_up_and_clamps() {
        assert_eq!(lerp_rgb888_ratio(BLACK, WHITE, 1, 2), Rgb888::new(128, 128, 128));
        assert_eq!(lerp_rgb888_ratio(WHITE, BLACK, 1, 2), Rgb888::new(128, 128, 128));
        assert_eq!(lerp_rgb888_ratio(BLACK, WHITE, 5, 2), WHITE, "num past den clamps to 'to'");
        assert_eq!(lerp_rgb888_ratio(BLACK, WHITE, 0, 0), WHITE);
    }

    #[test]
    fn test_lerp_reverse_is_mirror() {
        for t in [0.125_f32, 0.25, 0.375, 0.5, 0.75] {
            assert_eq!(
                lerp_rgb888(BLUE, RED, t),
                lerp_rgb888(RED, BLUE, 1.0 - t),
                "forward and reverse fades should meet at t={t}"
            );
        }
    }
}
