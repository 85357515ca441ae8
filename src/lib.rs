// Crate-level lints: Allow common graphics patterns that pedantic lints flag
#![allow(clippy::cast_possible_truncation)] // Intentional f32->i32, u32->i32 casts for pixel math
#![allow(clippy::cast_precision_loss)] // u32/i32->f32 in graphics calculations
#![allow(clippy::cast_possible_wrap)] // u32->i32 wrapping is acceptable for our value ranges
#![allow(clippy::cast_sign_loss)] // f32->u32 where we know sign is positive
#![allow(clippy::module_name_repetitions)]

//! Animated car speedometer gauge.
//!
//! The gauge is split into pieces that know nothing about any UI toolkit:
//!
//! - [`render`]: maps configuration, state and a square viewport to a list
//!   of vector drawing commands (dial face, border, labels, ticks, needle)
//! - [`widgets`]: rasterizes that list onto any `embedded-graphics` target
//! - [`controller`]: turns press / release into a needle sweep and fires a
//!   red needle flash when a press carries the needle to 160
//! - [`speedometer`]: bundles all of the above behind one host-facing handle
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐  on_touch   ┌────────────────────────────┐
//! │   Host   │ ──────────> │ TouchAnimationController   │
//! │ (window) │  tick(dt)   │  position: Timeline<f32>   │
//! │          │ ──────────> │  flash:    Timeline<Rgb888>│
//! └──────────┘             └─────────────┬──────────────┘
//!      ^                                 │ writes
//!      │ paint(DrawList)                 v
//! ┌────┴───────────┐   draw    ┌──────────────────┐
//! │ GaugeRenderer  │ <──────── │ GaugeState       │
//! │ (pure)         │           │ speed, color,    │
//! └────────────────┘           │ dirty            │
//!                              └──────────────────┘
//! ```
//!
//! # Dial Geometry
//!
//! | Quantity | Value |
//! |----------|-------|
//! | Sweep | 270°, open at the bottom |
//! | Zero | bottom-left (screen angle 135°) |
//! | Max | bottom-right (screen angle 45°) |
//! | Labels | every 20 on `0.75r` |
//! | Ticks | every 10, major on labels |
//!
//! # Feature Flags
//!
//! - **`simple-outline`**: 2-pass digit glow instead of 8-pass.

pub mod animations;
pub mod colors;
pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod render;
pub mod speedometer;
pub mod state;
pub mod styles;
pub mod widgets;

pub use animations::{Easing, Phase, Timeline};
pub use config::GaugeConfig;
pub use controller::{TickOutcome, TouchAction, TouchAnimationController};
pub use error::ConfigError;
pub use layout::{Constraints, MeasureSpec, Viewport};
pub use render::{DrawCommand, DrawList, GaugeRenderer, Renderable};
pub use speedometer::Speedometer;
pub use state::{GaugeState, SavedState};
