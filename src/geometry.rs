//! Dial geometry: mapping speeds to angles and angles to points.
//!
//! # Coordinate System
//!
//! Screen space, origin top-left, Y grows downward. Screen angles are in
//! radians and grow clockwise from the +X axis, which is what `cos`/`sin`
//! give when Y points down.
//!
//! # Dial Frame
//!
//! The scale covers a 270° sweep starting at [`DIAL_ROTATION_DEGREES`]
//! (bottom left) and running clockwise through the top to the bottom right:
//!
//! ```text
//!              max/2
//!          .-'  |  '-.
//!        /      o      \
//!         \           /
//!          0         max
//! ```
//!
//! Labels are placed by arc length along the label circle, the way
//! text-on-path works: offset `v * (0.75r * 1.5π) / max`, minus half the text
//! width so the text is centered. Ticks are placed by the dial-frame angle
//! `1.5π - v * (1.5π / max)`, which counts down from the end of the sweep.
//! [`tick_screen_angle`] maps that back to screen space so a tick and the
//! label for the same value share one angle.

use core::f32::consts::PI;

use crate::config::{DIAL_ROTATION_DEGREES, DIAL_SWEEP_DEGREES, LABEL_RADIUS_RATIO};

/// Dial sweep in radians (three quarters of a turn).
pub const THREE_QUARTERS: f32 = 1.5 * PI;

/// Screen direction of the unrotated needle. Rotating it by
/// [`needle_rotation_degrees`] lands speed 0 on the dial zero.
pub const NEEDLE_BASE_DEGREES: f32 = 225.0;

/// A point in viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointF {
    pub x: f32,
    pub y: f32,
}

impl PointF {
    pub const fn new(
        x: f32,
        y: f32,
    ) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    pub fn distance(
        self,
        other: Self,
    ) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Project an angle onto a circle.
#[inline]
pub fn polar(
    center: PointF,
    radius: f32,
    angle: f32,
) -> PointF {
    PointF::new(radius.mul_add(angle.cos(), center.x), radius.mul_add(angle.sin(), center.y))
}

/// Dial rotation in radians.
#[inline]
pub fn dial_rotation() -> f32 { DIAL_ROTATION_DEGREES.to_radians() }

/// Position of a speed along the scale, `0.0` at zero and `1.0` at `max_speed`.
///
/// Not clamped: speeds outside the scale extrapolate past the dial ends.
#[inline]
pub fn dial_fraction(
    value: f32,
    max_speed: u32,
) -> f32 {
    value / max_speed as f32
}

/// Start offset of a label along the label circle, measured from the
/// rotated path start.
pub fn label_arc_offset(
    value: f32,
    max_speed: u32,
    radius: f32,
    text_width: f32,
) -> f32 {
    let arc_length = LABEL_RADIUS_RATIO * radius * THREE_QUARTERS;
    value * arc_length / max_speed as f32 - text_width / 2.0
}

/// Screen angle at the center of a label.
///
/// Walks the label back from its start offset by half the text width and
/// converts arc length to an angle on the label circle.
pub fn label_angle(
    value: f32,
    max_speed: u32,
    radius: f32,
    text_width: f32,
) -> f32 {
    let label_radius = LABEL_RADIUS_RATIO * radius;
    if label_radius <= 0.0 {
        return dial_rotation() + dial_fraction(value, max_speed) * THREE_QUARTERS;
    }
    let center_offset = label_arc_offset(value, max_speed, radius, text_width) + text_width / 2.0;
    dial_rotation() + center_offset / label_radius
}

/// Dial-frame angle of the tick for `value`, counter-clockwise from the
/// dial zero.
#[inline]
pub fn tick_angle(
    value: f32,
    max_speed: u32,
) -> f32 {
    let step = THREE_QUARTERS / max_speed as f32;
    THREE_QUARTERS - step * value
}

/// Screen angle of the tick for `value`.
#[inline]
pub fn tick_screen_angle(
    value: f32,
    max_speed: u32,
) -> f32 {
    dial_rotation() + THREE_QUARTERS - tick_angle(value, max_speed)
}

/// Rotation applied to the needle, in degrees.
#[inline]
pub fn needle_rotation_degrees(
    speed: f32,
    max_speed: u32,
) -> f32 {
    dial_fraction(speed, max_speed) * DIAL_SWEEP_DEGREES - 90.0
}

/// Screen angle the needle points at.
#[inline]
pub fn needle_angle(
    speed: f32,
    max_speed: u32,
) -> f32 {
    (NEEDLE_BASE_DEGREES + needle_rotation_degrees(speed, max_speed)).to_radians()
}

// =============================================================================
// Unit Tests
// =============================================================================
