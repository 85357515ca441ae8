//! Square viewport measurement.
//!
//! The host offers each axis as a [`MeasureSpec`]. Each axis is resolved on
//! its own, then the gauge takes the smaller of the two so the dial stays
//! round.

use embedded_graphics::prelude::{Point, Size};

/// Sizing constraint offered by the host for one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeasureSpec {
    /// Use exactly this many pixels.
    Exactly(u32),
    /// Use at most this many pixels.
    AtMost(u32),
    /// No constraint, use the preferred size.
    Unspecified,
}

/// Resolve one axis against its constraint.
pub const fn measure_dimension(
    preferred: u32,
    spec: MeasureSpec,
) -> u32 {
    match spec {
        MeasureSpec::Exactly(size) => size,
        MeasureSpec::AtMost(bound) => {
            if preferred < bound {
                preferred
            } else {
                bound
            }
        }
        MeasureSpec::Unspecified => preferred,
    }
}

/// Width and height constraints for a layout pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Constraints {
    pub width: MeasureSpec,
    pub height: MeasureSpec,
}

impl Constraints {
    pub const fn new(
        width: MeasureSpec,
        height: MeasureSpec,
    ) -> Self {
        Self { width, height }
    }

    /// Both axes fixed to `size`.
    pub const fn exact(size: u32) -> Self { Self::new(MeasureSpec::Exactly(size), MeasureSpec::Exactly(size)) }

    /// Both axes unconstrained.
    pub const fn unbounded() -> Self { Self::new(MeasureSpec::Unspecified, MeasureSpec::Unspecified) }
}

/// Resolved square drawing area of the gauge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Side length in pixels.
    pub side: u32,
    /// Center X (and Y, the viewport is square).
    pub center: f32,
    /// Dial radius, half the side.
    pub radius: f32,
}

impl Viewport {
    /// An empty viewport. Renders nothing.
    pub const EMPTY: Self = Self { side: 0, center: 0.0, radius: 0.0 };

    /// Square viewport of the given side.
    pub fn square(side: u32) -> Self {
        let half = side as f32 / 2.0;
        Self { side, center: half, radius: half }
    }

    /// Measure both axes and keep the smaller one.
    pub fn measure(
        preferred: u32,
        constraints: Constraints,
    ) -> Self {
        let width = measure_dimension(preferred, constraints.width);
        let height = measure_dimension(preferred, constraints.height);
        Self::square(width.min(height))
    }

    /// Nothing can be drawn into a zero-size viewport.
    #[inline]
    pub const fn is_empty(&self) -> bool { self.side == 0 }

    #[inline]
    pub const fn size(&self) -> Size { Size::new(self.side, self.side) }

    /// Center as an integer pixel position.
    #[inline]
    pub fn center_point(&self) -> Point {
        let c = self.center.round() as i32;
        Point::new(c, c)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
