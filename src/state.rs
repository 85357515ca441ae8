//! Frame-by-frame gauge state with redraw tracking.
//!
//! [`GaugeState`] holds the two values that change while the gauge is on
//! screen: the needle position and the needle color. Every setter marks the
//! state dirty; the host checks [`GaugeState::take_dirty`] once per frame and
//! only re-renders when something changed.
//!
//! # Update Strategy
//!
//! | Change | Dirty | Redraw |
//! |--------|-------|--------|
//! | `set_current_speed` | yes | next frame |
//! | `set_needle_color` | yes | next frame |
//! | `restore` | yes | before first render |
//! | layout change | via [`GaugeState::mark_dirty`] | next frame |
//!
//! # Saved State
//!
//! Across a host recreation (window rebuilt, screen rotated) only the speed
//! survives. [`SavedState`] carries it alongside whatever the host wants to
//! keep for itself, which the gauge passes back untouched.

use embedded_graphics::pixelcolor::Rgb888;

use crate::config::GaugeConfig;

/// Mutable gauge values plus a dirty flag.
#[derive(Clone, Debug, PartialEq)]
pub struct GaugeState {
    /// Needle position in scale units. Not clamped.
    current_speed: f32,

    /// Current (possibly flashing) needle color.
    needle_color: Rgb888,

    /// Set on every change, cleared by the host after redrawing.
    dirty: bool,
}

impl GaugeState {
    /// A new state starts dirty so the first frame is always drawn.
    pub const fn new(
        current_speed: f32,
        needle_color: Rgb888,
    ) -> Self {
        Self { current_speed, needle_color, dirty: true }
    }

    /// Initial state from a configuration.
    pub const fn from_config(config: &GaugeConfig) -> Self { Self::new(config.current_speed(), config.needle_color()) }

    #[inline]
    pub const fn current_speed(&self) -> f32 { self.current_speed }

    pub fn set_current_speed(
        &mut self,
        speed: f32,
    ) {
        self.current_speed = speed;
        self.dirty = true;
    }

    #[inline]
    pub const fn needle_color(&self) -> Rgb888 { self.needle_color }

    pub fn set_needle_color(
        &mut self,
        color: Rgb888,
    ) {
        self.needle_color = color;
        self.dirty = true;
    }

    #[inline]
    pub const fn is_dirty(&self) -> bool { self.dirty }

    /// Force a redraw, e.g. after a layout change.
    #[inline]
    pub const fn mark_dirty(&mut self) { self.dirty = true; }

    /// Return the dirty flag and clear it.
    #[inline]
    pub const fn take_dirty(&mut self) -> bool {
        let dirty = self.dirty;
        self.dirty = false;
        dirty
    }

    /// Snapshot the speed together with the host's own state.
    pub fn save<H>(
        &self,
        host_state: Option<H>,
    ) -> SavedState<H> {
        SavedState { current_speed: self.current_speed, host_state }
    }

    /// Restore the speed from a snapshot and hand back the host's state.
    pub fn restore<H>(
        &mut self,
        saved: SavedState<H>,
    ) -> Option<H> {
        self.set_current_speed(saved.current_speed);
        saved.host_state
    }
}

/// Minimal snapshot kept across host recreation.
#[derive(Clone, Debug, PartialEq)]
pub struct SavedState<H> {
    /// The only gauge value that survives.
    pub current_speed: f32,

    /// Opaque host state, passed through untouched.
    pub host_state: Option<H>,
}

// =============================================================================
// Unit Tests
// =============================================================================
