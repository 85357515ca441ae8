//! Configuration error types.
//!
//! Every failure the gauge can report happens while building or overriding
//! a [`GaugeConfig`](crate::config::GaugeConfig). Rendering and animation
//! ticks never fail: a zero-size viewport renders nothing and out-of-range
//! speeds are extrapolated.

use thiserror::Error;

/// Errors raised when a gauge configuration is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The top of the scale must be a positive speed, otherwise every
    /// angle computation divides by zero.
    #[error("max speed must be positive, got {0}")]
    InvalidMaxSpeed(i32),

    /// The preferred gauge diameter must be positive.
    #[error("gauge size must be positive, got {0}px")]
    InvalidSize(i32),

    /// Dial digits need a finite, positive text size.
    #[error("digits text size must be a positive finite number, got {0}")]
    InvalidTextSize(f32),
}
