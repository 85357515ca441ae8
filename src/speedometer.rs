//! The speedometer view: configuration, state, renderer and touch controller
//! behind one handle.
//!
//! A host embeds a [`Speedometer`] and drives it with three calls per frame:
//!
//! ```text
//! events ──on_touch()──> controller ──tick(dt)──> state (dirty)
//!                                                    │
//!                     display <──draw_into()──── renderer
//! ```
//!
//! Property setters (`set_current_speed`, `set_needle_color`, ...) write the
//! same state the animations write, so a programmatic speed change and a
//! touch-driven sweep never disagree about where the needle is.

use std::time::Duration;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::{DrawTarget, Size};

use crate::config::GaugeConfig;
use crate::controller::{TickOutcome, TouchAction, TouchAnimationController};
use crate::error::ConfigError;
use crate::layout::Constraints;
use crate::render::{DrawList, GaugeRenderer, Renderable};
use crate::state::{GaugeState, SavedState};
use crate::widgets::paint;

/// A complete, host-agnostic speedometer widget.
#[derive(Clone, Debug)]
pub struct Speedometer {
    config: GaugeConfig,
    state: GaugeState,
    renderer: GaugeRenderer,
    controller: TouchAnimationController,
}

impl Speedometer {
    pub fn new(config: GaugeConfig) -> Self {
        log::debug!(
            "speedometer created: max {} size {} digits {:.1}",
            config.max_speed(),
            config.size(),
            config.digits_text_size()
        );
        Self {
            state: GaugeState::from_config(&config),
            renderer: GaugeRenderer::new(config.size()),
            controller: TouchAnimationController::new(&config),
            config,
        }
    }

    // =========================================================================
    // Properties
    // =========================================================================

    #[inline]
    pub const fn config(&self) -> &GaugeConfig { &self.config }

    #[inline]
    pub const fn state(&self) -> &GaugeState { &self.state }

    #[inline]
    pub const fn controller(&self) -> &TouchAnimationController { &self.controller }

    #[inline]
    pub const fn current_speed(&self) -> f32 { self.state.current_speed() }

    /// Move the needle immediately. A running sweep overwrites this on its next tick.
    pub fn set_current_speed(
        &mut self,
        speed: f32,
    ) {
        self.state.set_current_speed(speed);
    }

    #[inline]
    pub const fn max_speed(&self) -> u32 { self.config.max_speed() }

    /// Change the top of the scale. Rejects non-positive values.
    pub fn set_max_speed(
        &mut self,
        max_speed: i32,
    ) -> Result<(), ConfigError> {
        self.config.set_max_speed(max_speed)?;
        self.controller.set_max_speed(self.config.max_speed());
        self.state.mark_dirty();
        Ok(())
    }

    /// Change the preferred diameter. Applies from the next [`Self::measure`].
    pub fn set_size(
        &mut self,
        size: i32,
    ) -> Result<(), ConfigError> {
        self.config.set_size(size)?;
        self.renderer.set_preferred_size(self.config.size());
        Ok(())
    }

    #[inline]
    pub const fn needle_color(&self) -> Rgb888 { self.state.needle_color() }

    /// Recolor the needle. The alert flash returns to this color.
    pub fn set_needle_color(
        &mut self,
        color: Rgb888,
    ) {
        self.state.set_needle_color(color);
        self.controller.set_base_color(color);
    }

    /// Recolor the static parts of the dial. Ticks follow the border color.
    pub fn set_dial_colors(
        &mut self,
        background: Rgb888,
        border: Rgb888,
        digits: Rgb888,
    ) {
        self.config.set_background_color(background);
        self.config.set_border_color(border);
        self.config.set_digits_color(digits);
        self.state.mark_dirty();
    }

    // =========================================================================
    // Input and Animation
    // =========================================================================

    /// Forward a touch event. Returns `true` when it was consumed.
    pub fn on_touch(
        &mut self,
        action: TouchAction,
    ) -> bool {
        self.controller.on_touch(action, &self.state)
    }

    /// Advance running animations by one frame.
    pub fn tick(
        &mut self,
        dt: Duration,
    ) -> TickOutcome {
        self.controller.tick(dt, &mut self.state)
    }

    #[inline]
    pub fn is_animating(&self) -> bool { self.controller.is_animating() }

    // =========================================================================
    // Layout and Drawing
    // =========================================================================

    /// Resolve the square drawing area and schedule a redraw.
    pub fn measure(
        &mut self,
        constraints: Constraints,
    ) -> Size {
        let size = self.renderer.layout(constraints);
        log::debug!("speedometer laid out at {}x{}", size.width, size.height);
        self.state.mark_dirty();
        size
    }

    /// This frame's drawing commands. Leaves the dirty flag alone.
    pub fn render(&self) -> DrawList { self.renderer.draw(&self.config, &self.state) }

    /// Paint onto `display` when something changed (or when `force` is set).
    ///
    /// Returns whether anything was painted. Clears the dirty flag.
    pub fn draw_into<D>(
        &mut self,
        display: &mut D,
        force: bool,
    ) -> bool
    where
        D: DrawTarget<Color = Rgb888>,
    {
        if !self.state.take_dirty() && !force {
            return false;
        }
        paint(display, &self.render());
        true
    }

    // =========================================================================
    // Saved State
    // =========================================================================

    /// Snapshot the needle position with the host's own state.
    pub fn save<H>(
        &self,
        host_state: Option<H>,
    ) -> SavedState<H> {
        self.state.save(host_state)
    }

    /// Put the needle back where a snapshot left it and hand back the host's state.
    pub fn restore<H>(
        &mut self,
        saved: SavedState<H>,
    ) -> Option<H> {
        log::debug!("speedometer restored at {:.1}", saved.current_speed);
        self.state.restore(saved)
    }
}

impl Default for Speedometer {
    fn default() -> Self { Self::new(GaugeConfig::default()) }
}

// =============================================================================
// Unit Tests
// =============================================================================
