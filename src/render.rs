//! Gauge rendering as a list of vector drawing commands.
//!
//! The renderer is a pure function of (config, state, viewport): it never
//! touches pixels and never mutates state. The host rasterizes the returned
//! [`DrawList`] with [`crate::widgets::paint`] (or any other backend) after
//! checking the state's dirty flag.
//!
//! # Draw Order
//!
//! | # | Element | Geometry |
//! |---|---------|----------|
//! | 1 | Background | disc, radius `r` |
//! | 2 | Border | ring at `r - 5`, stroke 10 |
//! | 3 | Labels | every 20, on a circle of `0.75r` |
//! | 4 | Ticks | every 10, major `r..0.85r`, minor `r..0.92r` |
//! | 5 | Needle | line `0.35r..r`, hub `r/10`, dot `r/40` |
//!
//! Later commands paint over earlier ones, so the needle is always on top.

use core::f32::consts::FRAC_PI_2;
use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::Size;

use crate::config::{
    BORDER_WIDTH,
    GaugeConfig,
    LABEL_RADIUS_RATIO,
    LABEL_STEP,
    MAJOR_TICK_RATIO,
    MAJOR_TICK_STROKE_RATIO,
    MINOR_TICK_RATIO,
    MINOR_TICK_STROKE_RATIO,
    NEEDLE_DOT_COLOR,
    NEEDLE_DOT_DIVISOR,
    NEEDLE_HUB_DIVISOR,
    NEEDLE_INNER_RATIO,
    NEEDLE_STROKE_DIVISOR,
    TICK_STEP,
};
use crate::geometry::{PointF, label_angle, needle_angle, polar, tick_screen_angle};
use crate::layout::{Constraints, Viewport};
use crate::state::GaugeState;
use crate::styles::{digits_font, text_width};

/// Label text buffer. Holds any `u32` speed.
pub type LabelText = heapless::String<10>;

/// Ordered drawing commands for one frame.
pub type DrawList = Vec<DrawCommand>;

/// One vector drawing primitive in viewport coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Filled circle.
    Disc { center: PointF, radius: f32, color: Rgb888 },
    /// Stroked circle, stroke centered on `radius`.
    Ring {
        center: PointF,
        radius: f32,
        stroke_width: f32,
        color: Rgb888,
    },
    /// Straight line.
    Segment {
        from: PointF,
        to: PointF,
        stroke_width: f32,
        color: Rgb888,
    },
    /// Dial digits centered on `anchor`.
    ///
    /// `rotation` is the tangent of the label circle at the anchor, for
    /// backends that can draw rotated text.
    Label {
        anchor: PointF,
        text: LabelText,
        text_size: f32,
        rotation: f32,
        color: Rgb888,
    },
}

/// A widget that can be laid out and drawn without a host base class.
pub trait Renderable {
    /// Resolve the drawing area against the host's constraints.
    fn layout(
        &mut self,
        constraints: Constraints,
    ) -> Size;

    /// Produce this frame's drawing commands.
    fn draw(
        &self,
        config: &GaugeConfig,
        state: &GaugeState,
    ) -> DrawList;
}

/// Speedometer dial, ticks, labels and needle.
#[derive(Clone, Debug)]
pub struct GaugeRenderer {
    /// Size used when the host leaves an axis unconstrained.
    preferred_size: u32,

    /// Result of the last layout pass. Empty until laid out.
    viewport: Viewport,
}

impl GaugeRenderer {
    pub const fn new(preferred_size: u32) -> Self { Self { preferred_size, viewport: Viewport::EMPTY } }

    #[inline]
    pub const fn viewport(&self) -> Viewport { self.viewport }

    #[inline]
    pub const fn preferred_size(&self) -> u32 { self.preferred_size }

    /// Takes effect on the next layout pass.
    pub const fn set_preferred_size(
        &mut self,
        size: u32,
    ) {
        self.preferred_size = size;
    }

    fn draw_background(
        &self,
        config: &GaugeConfig,
        list: &mut DrawList,
    ) {
        let vp = self.viewport;
        list.push(DrawCommand::Disc {
            center: center_of(vp),
            radius: vp.radius,
            color: config.background_color(),
        });
    }

    fn draw_border(
        &self,
        config: &GaugeConfig,
        list: &mut DrawList,
    ) {
        let vp = self.viewport;
        list.push(DrawCommand::Ring {
            center: center_of(vp),
            radius: vp.radius - BORDER_WIDTH / 2.0,
            stroke_width: BORDER_WIDTH,
            color: config.border_color(),
        });
    }

    fn draw_labels(
        &self,
        config: &GaugeConfig,
        list: &mut DrawList,
    ) {
        let vp = self.viewport;
        let center = center_of(vp);
        let max_speed = config.max_speed();
        let font = digits_font(config.digits_text_size());

        for value in (0..=max_speed).step_by(LABEL_STEP as usize) {
            let mut text = LabelText::new();
            // u32::MAX has 10 digits, always fits
            write!(text, "{value}").ok();

            let width = text_width(font, &text) as f32;
            let angle = label_angle(value as f32, max_speed, vp.radius, width);
            list.push(DrawCommand::Label {
                anchor: polar(center, vp.radius * LABEL_RADIUS_RATIO, angle),
                text,
                text_size: config.digits_text_size(),
                rotation: angle + FRAC_PI_2,
                color: config.digits_color(),
            });
        }
    }

    fn draw_ticks(
        &self,
        config: &GaugeConfig,
        list: &mut DrawList,
    ) {
        let vp = self.viewport;
        let center = center_of(vp);
        let max_speed = config.max_speed();

        for value in (0..=max_speed).step_by(TICK_STEP as usize) {
            let (ratio, stroke_ratio) = if value % LABEL_STEP == 0 {
                (MAJOR_TICK_RATIO, MAJOR_TICK_STROKE_RATIO)
            } else {
                (MINOR_TICK_RATIO, MINOR_TICK_STROKE_RATIO)
            };
            let angle = tick_screen_angle(value as f32, max_speed);
            list.push(DrawCommand::Segment {
                from: polar(center, vp.radius, angle),
                to: polar(center, vp.radius * ratio, angle),
                stroke_width: vp.radius * stroke_ratio,
                color: config.border_color(),
            });
        }
    }

    fn draw_needle(
        &self,
        config: &GaugeConfig,
        state: &GaugeState,
        list: &mut DrawList,
    ) {
        let vp = self.viewport;
        let center = center_of(vp);
        let angle = needle_angle(state.current_speed(), config.max_speed());
        let color = state.needle_color();

        list.push(DrawCommand::Segment {
            from: polar(center, vp.radius * NEEDLE_INNER_RATIO, angle),
            to: polar(center, vp.radius, angle),
            stroke_width: config.digits_text_size() / NEEDLE_STROKE_DIVISOR,
            color,
        });
        list.push(DrawCommand::Disc { center, radius: vp.radius / NEEDLE_HUB_DIVISOR, color });
        list.push(DrawCommand::Disc {
            center,
            radius: vp.radius / NEEDLE_DOT_DIVISOR,
            color: NEEDLE_DOT_COLOR,
        });
    }
}

impl Renderable for GaugeRenderer {
    fn layout(
        &mut self,
        constraints: Constraints,
    ) -> Size {
        self.viewport = Viewport::measure(self.preferred_size, constraints);
        self.viewport.size()
    }

    fn draw(
        &self,
        config: &GaugeConfig,
        state: &GaugeState,
    ) -> DrawList {
        let mut list = DrawList::new();
        if self.viewport.is_empty() {
            return list;
        }

        self.draw_background(config, &mut list);
        self.draw_border(config, &mut list);
        self.draw_labels(config, &mut list);
        self.draw_ticks(config, &mut list);
        self.draw_needle(config, state, &mut list);

        log::trace!("gauge rendered {} commands at speed {:.1}", list.len(), state.current_speed());
        list
    }
}

#[inline]
const fn center_of(vp: Viewport) -> PointF { PointF::new(vp.center, vp.center) }

// =============================================================================
// Unit Tests
// =============================================================================
