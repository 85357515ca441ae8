//! Low-level drawing primitives for rasterizing a [`DrawList`].
//!
//! Each [`DrawCommand`] maps onto one `embedded-graphics` primitive:
//!
//! | Command | Primitive | Style |
//! |---------|-----------|-------|
//! | `Disc` | `Circle` | fill |
//! | `Ring` | `Circle` | stroke, centered on the radius |
//! | `Segment` | `Line` | stroke, width rounded, at least 1px |
//! | `Label` | `Text` | glow outline, then digits |
//!
//! Coordinates are rounded to the nearest pixel. Draw errors are ignored
//! per primitive, same as a dropped frame: the next dirty frame repaints
//! everything.
//!
//! # Label Glow
//!
//! Mono fonts cannot be drawn along a path or with a blur, so digits are
//! drawn upright at their anchor and the soft shadow behind them becomes a
//! 1px outline in [`DIGITS_GLOW`].
//!
//! # Feature Flags
//!
//! - **`simple-outline`**: 2-pass glow instead of the 8-pass outline. Cuts
//!   draw calls per label from 9 to 3.

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle};
use embedded_graphics::text::Text;

use crate::colors::BLUE;
use crate::geometry::PointF;
use crate::render::{DrawCommand, DrawList};
use crate::styles::{LABEL_TEXT_STYLE, digits_font};

/// Glow color drawn behind dial digits.
pub const DIGITS_GLOW: Rgb888 = BLUE;

/// Paint every command in order onto `display`.
pub fn paint<D>(
    display: &mut D,
    list: &DrawList,
) where
    D: DrawTarget<Color = Rgb888>,
{
    for command in list {
        match command {
            DrawCommand::Disc { center, radius, color } => draw_disc(display, *center, *radius, *color),
            DrawCommand::Ring { center, radius, stroke_width, color } => {
                draw_ring(display, *center, *radius, *stroke_width, *color);
            }
            DrawCommand::Segment { from, to, stroke_width, color } => {
                draw_segment(display, *from, *to, *stroke_width, *color);
            }
            DrawCommand::Label { anchor, text, text_size, color, .. } => {
                draw_label_with_glow(display, text, to_point(*anchor), digits_font(*text_size), *color);
            }
        }
    }
}

/// Nearest pixel to a viewport point.
#[inline]
pub fn to_point(p: PointF) -> Point { Point::new(p.x.round() as i32, p.y.round() as i32) }

/// Pixel diameter for a radius, never negative.
#[inline]
fn diameter(radius: f32) -> u32 { (radius * 2.0).round().max(0.0) as u32 }

/// Stroke width in whole pixels, at least 1.
#[inline]
fn stroke(width: f32) -> u32 { width.round().max(1.0) as u32 }

/// Draw a filled circle.
pub fn draw_disc<D>(
    display: &mut D,
    center: PointF,
    radius: f32,
    color: Rgb888,
) where
    D: DrawTarget<Color = Rgb888>,
{
    Circle::with_center(to_point(center), diameter(radius))
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(display)
        .ok();
}

/// Draw a stroked circle.
pub fn draw_ring<D>(
    display: &mut D,
    center: PointF,
    radius: f32,
    stroke_width: f32,
    color: Rgb888,
) where
    D: DrawTarget<Color = Rgb888>,
{
    Circle::with_center(to_point(center), diameter(radius))
        .into_styled(PrimitiveStyle::with_stroke(color, stroke(stroke_width)))
        .draw(display)
        .ok();
}

/// Draw a straight line.
pub fn draw_segment<D>(
    display: &mut D,
    from: PointF,
    to: PointF,
    stroke_width: f32,
    color: Rgb888,
) where
    D: DrawTarget<Color = Rgb888>,
{
    Line::new(to_point(from), to_point(to))
        .into_styled(PrimitiveStyle::with_stroke(color, stroke(stroke_width)))
        .draw(display)
        .ok();
}

/// Draw centered digits over a glow outline.
pub fn draw_label_with_glow<D>(
    display: &mut D,
    text: &str,
    position: Point,
    font: &MonoFont<'_>,
    text_color: Rgb888,
) where
    D: DrawTarget<Color = Rgb888>,
{
    let glow_style = MonoTextStyle::new(font, DIGITS_GLOW);
    let main_style = MonoTextStyle::new(font, text_color);

    #[cfg(feature = "simple-outline")]
    const OFFSETS: [(i32, i32); 2] = [(1, 1), (1, 0)];

    #[cfg(not(feature = "simple-outline"))]
    const OFFSETS: [(i32, i32); 8] = [
        (-1, -1),
        (0, -1),
        (1, -1), // top row
        (-1, 0),
        (1, 0), // middle row (skip center)
        (-1, 1),
        (0, 1),
        (1, 1), // bottom row
    ];

    for (dx, dy) in OFFSETS {
        Text::with_text_style(text, position + Point::new(dx, dy), glow_style, LABEL_TEXT_STYLE)
            .draw(display)
            .ok();
    }

    Text::with_text_style(text, position, main_style, LABEL_TEXT_STYLE)
        .draw(display)
        .ok();
}

// =============================================================================
// Unit Tests
// =============================================================================
