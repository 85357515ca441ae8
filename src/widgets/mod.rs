//! Rasterizing the gauge onto an `embedded-graphics` display.
//!
//! - [`primitives`]: one drawing function per [`DrawCommand`](crate::render::DrawCommand)
//!
//! The renderer only produces a [`DrawList`](crate::render::DrawList); this
//! module is the one place that knows about pixels, so any `DrawTarget` with
//! `Rgb888` color (the simulator window, a framebuffer, a test canvas) can
//! show the gauge.

mod primitives;

pub use primitives::{DIGITS_GLOW, draw_disc, draw_label_with_glow, draw_ring, draw_segment, paint, to_point};
