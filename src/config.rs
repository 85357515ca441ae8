//! Gauge configuration: compile-time constants and the validated [`GaugeConfig`].
//!
//! # Constants
//!
//! Geometry ratios, animation timings and defaults are `const` so the
//! renderer and the controller share one definition and nothing is
//! recomputed per frame. Ratios are relative to the dial radius unless
//! stated otherwise.
//!
//! # Building a Config
//!
//! ```ignore
//! let config = GaugeConfig::builder()
//!     .max_speed(260)
//!     .size(480)
//!     .build()?;
//! ```
//!
//! Every option has a default, so `GaugeConfig::builder().build()` is the
//! stock 220 km/h, 1000px gauge. `build()` validates and returns
//! [`ConfigError`] instead of letting a bad value reach the renderer.

use std::time::Duration;

use bon::bon;
use embedded_graphics::pixelcolor::Rgb888;

use crate::colors::{BLACK, BLUE, DARK_GRAY, RED, WHITE};
use crate::error::ConfigError;

// =============================================================================
// Defaults
// =============================================================================

/// Default top of the scale.
pub const DEFAULT_MAX_SPEED: i32 = 220;

/// Default preferred diameter in pixels.
pub const DEFAULT_SIZE: i32 = 1000;

/// Default digits text size is the diameter divided by this.
pub const DIGITS_TEXT_SIZE_DIVISOR: f32 = 20.0;

// =============================================================================
// Dial Geometry
// =============================================================================

/// Stroke width of the border ring.
pub const BORDER_WIDTH: f32 = 10.0;

/// Speed interval between dial labels (and major ticks).
pub const LABEL_STEP: u32 = 20;

/// Speed interval between tick marks.
pub const TICK_STEP: u32 = 10;

/// Dial sweep: three quarters of a turn.
pub const DIAL_SWEEP_DEGREES: f32 = 270.0;

/// Rotation of the dial zero from the unrotated 0° axis, clockwise on screen.
/// Puts zero at the bottom left and the end of the scale at the bottom right.
pub const DIAL_ROTATION_DEGREES: f32 = 135.0;

/// Radius of the circle the labels sit on.
pub const LABEL_RADIUS_RATIO: f32 = 0.75;

/// Inner end of a major tick (labelled speeds).
pub const MAJOR_TICK_RATIO: f32 = 0.85;

/// Inner end of a minor tick.
pub const MINOR_TICK_RATIO: f32 = 0.92;

/// Major tick stroke width.
pub const MAJOR_TICK_STROKE_RATIO: f32 = 0.04;

/// Minor tick stroke width.
pub const MINOR_TICK_STROKE_RATIO: f32 = 0.02;

// =============================================================================
// Needle Geometry
// =============================================================================

/// The needle line starts this far from the center.
pub const NEEDLE_INNER_RATIO: f32 = 0.35;

/// Hub disc radius is the dial radius divided by this.
pub const NEEDLE_HUB_DIVISOR: f32 = 10.0;

/// Center dot radius is the dial radius divided by this.
pub const NEEDLE_DOT_DIVISOR: f32 = 40.0;

/// Pivot dot drawn over the needle hub.
pub const NEEDLE_DOT_COLOR: Rgb888 = BLACK;

/// Needle stroke width is the digits text size divided by this.
pub const NEEDLE_STROKE_DIVISOR: f32 = 4.0;

// =============================================================================
// Animation Timing
// =============================================================================

/// Duration of a full needle sweep, up or down.
pub const POSITION_DURATION: Duration = Duration::from_millis(5000);

/// Decelerate easing factor for the needle sweep.
pub const DECELERATE_FACTOR: f32 = 0.7;

/// Speed at which the needle flashes.
pub const FLASH_THRESHOLD: f32 = 160.0;

/// Duration of the needle flash (base -> alert -> base).
pub const FLASH_DURATION: Duration = Duration::from_millis(300);

/// Color the needle flashes to.
pub const FLASH_COLOR: Rgb888 = RED;

// =============================================================================
// Simulator
// =============================================================================

/// Target frame time of the simulator loop (~60 FPS).
pub const FRAME_TIME: Duration = Duration::from_millis(16);

/// Preferred gauge diameter in the simulator window.
pub const SIMULATOR_SIZE: i32 = 480;

// =============================================================================
// Gauge Configuration
// =============================================================================

/// Rarely-changed gauge settings.
///
/// Always valid: the builder and the fallible setters reject anything that
/// would make the renderer divide by zero.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeConfig {
    max_speed: u32,
    size: u32,
    digits_text_size: f32,
    background_color: Rgb888,
    border_color: Rgb888,
    digits_color: Rgb888,
    needle_color: Rgb888,
    current_speed: f32,
}

#[bon]
impl GaugeConfig {
    /// Build a validated configuration.
    ///
    /// `digits_text_size` defaults to `size / 20`.
    #[builder]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        #[builder(default = DEFAULT_MAX_SPEED)] max_speed: i32,
        #[builder(default = DEFAULT_SIZE)] size: i32,
        digits_text_size: Option<f32>,
        #[builder(default = DARK_GRAY)] background_color: Rgb888,
        #[builder(default = RED)] border_color: Rgb888,
        #[builder(default = WHITE)] digits_color: Rgb888,
        #[builder(default = BLUE)] needle_color: Rgb888,
        #[builder(default)] current_speed: f32,
    ) -> Result<Self, ConfigError> {
        let max_speed = validate_max_speed(max_speed)?;
        let size = validate_size(size)?;
        let digits_text_size = digits_text_size.unwrap_or(size as f32 / DIGITS_TEXT_SIZE_DIVISOR);
        if !digits_text_size.is_finite() || digits_text_size <= 0.0 {
            return Err(ConfigError::InvalidTextSize(digits_text_size));
        }

        Ok(Self {
            max_speed,
            size,
            digits_text_size,
            background_color,
            border_color,
            digits_color,
            needle_color,
            current_speed,
        })
    }
}

impl GaugeConfig {
    /// Top of the scale.
    #[inline]
    pub const fn max_speed(&self) -> u32 { self.max_speed }

    /// Preferred diameter in pixels.
    #[inline]
    pub const fn size(&self) -> u32 { self.size }

    #[inline]
    pub const fn digits_text_size(&self) -> f32 { self.digits_text_size }

    #[inline]
    pub const fn background_color(&self) -> Rgb888 { self.background_color }

    #[inline]
    pub const fn border_color(&self) -> Rgb888 { self.border_color }

    #[inline]
    pub const fn digits_color(&self) -> Rgb888 { self.digits_color }

    /// Base needle color, the color the flash starts and ends on.
    #[inline]
    pub const fn needle_color(&self) -> Rgb888 { self.needle_color }

    /// Speed the gauge shows before any animation runs.
    #[inline]
    pub const fn current_speed(&self) -> f32 { self.current_speed }

    /// Override the top of the scale.
    pub fn set_max_speed(
        &mut self,
        max_speed: i32,
    ) -> Result<(), ConfigError> {
        self.max_speed = validate_max_speed(max_speed)?;
        Ok(())
    }

    /// Override the preferred diameter. The digits text size is left alone.
    pub fn set_size(
        &mut self,
        size: i32,
    ) -> Result<(), ConfigError> {
        self.size = validate_size(size)?;
        Ok(())
    }

    pub fn set_background_color(
        &mut self,
        color: Rgb888,
    ) {
        self.background_color = color;
    }

    pub fn set_border_color(
        &mut self,
        color: Rgb888,
    ) {
        self.border_color = color;
    }

    pub fn set_digits_color(
        &mut self,
        color: Rgb888,
    ) {
        self.digits_color = color;
    }
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            max_speed: DEFAULT_MAX_SPEED as u32,
            size: DEFAULT_SIZE as u32,
            digits_text_size: DEFAULT_SIZE as f32 / DIGITS_TEXT_SIZE_DIVISOR,
            background_color: DARK_GRAY,
            border_color: RED,
            digits_color: WHITE,
            needle_color: BLUE,
            current_speed: 0.0,
        }
    }
}

fn validate_max_speed(max_speed: i32) -> Result<u32, ConfigError> {
    if max_speed <= 0 {
        return Err(ConfigError::InvalidMaxSpeed(max_speed));
    }
    Ok(max_speed as u32)
}

fn validate_size(size: i32) -> Result<u32, ConfigError> {
    if size <= 0 {
        return Err(ConfigError::InvalidSize(size));
    }
    Ok(size as u32)
}

// =============================================================================
// Unit Tests
// =============================================================================
