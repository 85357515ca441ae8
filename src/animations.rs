//! Animation timelines for the needle.
//!
//! This module provides the two building blocks the touch controller
//! sequences:
//! - **Easing curves**: linear, and a decelerating power curve
//! - **Timelines**: keyframed interpolation over a fixed wall-clock duration
//!
//! # Timeline Lifecycle
//!
//! ```text
//! Idle --start()--> Running --advance() reaches duration--> Finished
//!                      ^                                       |
//!                      +------------- retarget() --------------+
//! ```
//!
//! A timeline owns no clock. The host calls [`Timeline::advance`] once per
//! frame with the frame delta, and the timeline answers with the value for
//! that frame. Retargeting rewrites the keyframes in place and rewinds the
//! cursor, so there is never more than one instance per animated property.
//!
//! # Keyframes
//!
//! Keyframes are evenly spaced over the eased progress. With three keyframes
//! the middle one is hit exactly at progress `0.5`. Linear timelines locate
//! the segment in integer nanoseconds, so samples mirrored around the middle
//! of a palindromic run (base -> red -> base) are identical. The last keyframe
//! is returned verbatim once the duration has elapsed (no float drift at the
//! end of a sweep).

use std::time::Duration;

use embedded_graphics::pixelcolor::Rgb888;
use heapless::Vec;

use crate::colors::{LERP_SCALE, lerp_rgb888_ratio};

// =============================================================================
// Constants
// =============================================================================

/// Maximum keyframes per timeline. The needle flash needs three.
pub const MAX_KEYFRAMES: usize = 4;

/// Factors this close to 1.0 use the plain quadratic ease-out.
const UNIT_FACTOR_EPSILON: f32 = 1e-6;

// =============================================================================
// Easing
// =============================================================================

/// Maps linear progress `[0, 1]` to eased progress `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    /// Constant velocity.
    Linear,
    /// Starts fast and slows down: `1 - (1 - t)^(2 * factor)`.
    ///
    /// Factor 1.0 is a quadratic ease-out. Smaller factors decelerate more
    /// gently at the start and harder near the end.
    Decelerate(f32),
}

impl Easing {
    /// Eased progress for linear progress `t` (clamped to `[0, 1]`).
    pub fn apply(
        self,
        t: f32,
    ) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Decelerate(factor) => {
                let remaining = 1.0 - t;
                if (factor - 1.0).abs() < UNIT_FACTOR_EPSILON {
                    1.0 - remaining * remaining
                } else {
                    1.0 - remaining.powf(2.0 * factor)
                }
            }
        }
    }
}

// =============================================================================
// Interpolation
// =============================================================================

/// Position inside one keyframe segment, as the exact ratio `num / den`.
///
/// Linear timelines derive it from integer nanoseconds, so two samples
/// mirrored around the middle of the run get complementary fractions
/// (`num` and `den - num`) with no float error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fraction {
    num: u64,
    den: u64,
}

impl Fraction {
    pub const ZERO: Self = Self { num: 0, den: 1 };

    /// `num / den`, with `num` clamped to `den`. A zero `den` is treated as 1.
    pub const fn new(
        num: u64,
        den: u64,
    ) -> Self {
        let den = if den == 0 { 1 } else { den };
        let num = if num > den { den } else { num };
        Self { num, den }
    }

    /// Nearest fixed-point fraction to `t` (clamped to `[0, 1]`).
    pub fn from_f32(t: f32) -> Self {
        let num = (t.clamp(0.0, 1.0) * LERP_SCALE as f32).round() as u64;
        Self::new(num, LERP_SCALE)
    }

    #[inline]
    pub const fn num(self) -> u64 { self.num }

    #[inline]
    pub const fn den(self) -> u64 { self.den }

    #[inline]
    pub fn as_f32(self) -> f32 { (self.num as f64 / self.den as f64) as f32 }
}

/// Values a timeline can animate.
pub trait Interpolate: Copy {
    /// Blend `from` toward `to` by `t`.
    fn interpolate(
        from: Self,
        to: Self,
        t: Fraction,
    ) -> Self;
}

impl Interpolate for f32 {
    #[inline]
    fn interpolate(
        from: Self,
        to: Self,
        t: Fraction,
    ) -> Self {
        (to - from).mul_add(t.as_f32(), from)
    }
}

impl Interpolate for Rgb888 {
    #[inline]
    fn interpolate(
        from: Self,
        to: Self,
        t: Fraction,
    ) -> Self {
        lerp_rgb888_ratio(from, to, t.num(), t.den())
    }
}

// =============================================================================
// Timeline
// =============================================================================

/// Where a timeline is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Never started.
    Idle,
    /// Advancing with each tick.
    Running,
    /// Reached the last keyframe. Holds its value until restarted.
    Finished,
}

/// A keyframed interpolation over a fixed duration.
#[derive(Clone, Debug)]
pub struct Timeline<T: Interpolate> {
    /// Evenly spaced control values.
    keyframes: Vec<T, MAX_KEYFRAMES>,

    /// Wall-clock length of one run.
    duration: Duration,

    /// Curve applied to linear progress before keyframe lookup.
    easing: Easing,

    /// Time since the last start, saturating at `duration`.
    elapsed: Duration,

    phase: Phase,

    /// Value produced by the last start or tick.
    value: Option<T>,
}

impl<T: Interpolate> Timeline<T> {
    /// Create an idle timeline with no keyframes.
    pub const fn new(
        duration: Duration,
        easing: Easing,
    ) -> Self {
        Self {
            keyframes: Vec::new(),
            duration,
            easing,
            elapsed: Duration::ZERO,
            phase: Phase::Idle,
            value: None,
        }
    }

    /// Replace the keyframes. Extra values beyond [`MAX_KEYFRAMES`] are dropped.
    ///
    /// Does not start or rewind the timeline.
    pub fn set_values(
        &mut self,
        values: &[T],
    ) {
        self.keyframes.clear();
        for &value in values.iter().take(MAX_KEYFRAMES) {
            // Capacity is checked by take()
            let _ = self.keyframes.push(value);
        }
        if values.len() > MAX_KEYFRAMES {
            log::warn!("timeline keyframes truncated from {} to {MAX_KEYFRAMES}", values.len());
        }
    }

    /// Rewind to the first keyframe and start running.
    ///
    /// Returns `false` (and stays put) when there are no keyframes.
    pub fn start(&mut self) -> bool {
        let Some(&first) = self.keyframes.first() else {
            log::warn!("timeline started without keyframes");
            return false;
        };
        self.elapsed = Duration::ZERO;
        self.phase = Phase::Running;
        self.value = Some(first);
        true
    }

    /// Redirect toward `to`, starting from `from`.
    ///
    /// Duration and easing are kept, the cursor restarts at zero, and the
    /// animated value is `from` until the next tick.
    pub fn retarget(
        &mut self,
        from: T,
        to: T,
    ) {
        self.set_values(&[from, to]);
        self.start();
    }

    /// Advance by one frame. Returns the new value while running.
    pub fn advance(
        &mut self,
        dt: Duration,
    ) -> Option<T> {
        if self.phase != Phase::Running {
            return None;
        }
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        let value = self.value_at(self.elapsed)?;
        self.value = Some(value);
        if self.elapsed >= self.duration {
            self.phase = Phase::Finished;
        }
        Some(value)
    }

    /// Sample the timeline at an arbitrary elapsed time without moving the cursor.
    pub fn value_at(
        &self,
        elapsed: Duration,
    ) -> Option<T> {
        let count = self.keyframes.len();
        let last = *self.keyframes.last()?;
        if count == 1 || elapsed >= self.duration {
            return Some(last);
        }

        let (index, local) = match self.easing {
            Easing::Linear => linear_segment(elapsed, self.duration, count),
            easing => {
                let linear = (elapsed.as_secs_f64() / self.duration.as_secs_f64()) as f32;
                let scaled = easing.apply(linear) * (count - 1) as f32;
                let index = (scaled.floor() as usize).min(count - 2);
                (index, Fraction::from_f32(scaled - index as f32))
            }
        };
        Some(T::interpolate(self.keyframes[index], self.keyframes[index + 1], local))
    }

    /// Value produced by the most recent start or tick.
    #[inline]
    pub const fn animated_value(&self) -> Option<T> { self.value }

    #[inline]
    pub fn is_running(&self) -> bool { self.phase == Phase::Running }

    /// Whether the timeline has ever been started.
    #[inline]
    pub fn has_started(&self) -> bool { self.phase != Phase::Idle }

    #[inline]
    pub const fn phase(&self) -> Phase { self.phase }

    #[inline]
    pub const fn duration(&self) -> Duration { self.duration }

    #[inline]
    pub const fn easing(&self) -> Easing { self.easing }

    #[inline]
    pub const fn elapsed(&self) -> Duration { self.elapsed }

    #[inline]
    pub fn keyframes(&self) -> &[T] { &self.keyframes }
}

/// Segment index and exact position within it for a linear run.
///
/// `elapsed * (count - 1) / duration` is split into whole segments and a
/// remainder in integer nanoseconds.
fn linear_segment(
    elapsed: Duration,
    duration: Duration,
    count: usize,
) -> (usize, Fraction) {
    let den = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
    let elapsed = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
    let segments = count as u64 - 1;
    let scaled = u128::from(elapsed) * u128::from(segments);
    let index = (scaled / u128::from(den)) as u64;
    if index >= segments {
        return (count - 2, Fraction::new(den, den));
    }
    let rem = (scaled % u128::from(den)) as u64;
    (index as usize, Fraction::new(rem, den))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{BLUE, RED, lerp_rgb888};

    const FRAME: Duration = Duration::from_millis(16);

    fn flash() -> Timeline<Rgb888> {
        let mut timeline = Timeline::new(Duration::from_millis(300), Easing::Linear);
        timeline.set_values(&[BLUE, RED, BLUE]);
        timeline
    }

    // -------------------------------------------------------------------------
    // Easing Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::Decelerate(0.7), Easing::Decelerate(1.0)] {
            assert!(easing.apply(0.0).abs() < 1e-6, "{easing:?} should start at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{easing:?} should end at 1");
        }
    }

    #[test]
    fn test_decelerate_is_monotonic_and_ahead_of_linear() {
        let easing = Easing::Decelerate(0.7);
        let mut prev = 0.0;
        for step in 1..100 {
            let t = step as f32 / 100.0;
            let eased = easing.apply(t);
            assert!(eased >= prev, "eased progress decreased at t={t}");
            assert!(eased >= t, "decelerate should lead linear at t={t}");
            prev = eased;
        }
    }

    #[test]
    fn test_decelerate_unit_factor_is_quadratic() {
        assert!((Easing::Decelerate(1.0).apply(0.5) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_easing_clamps_input() {
        assert!((Easing::Decelerate(0.7).apply(2.0) - 1.0).abs() < 1e-6);
        assert!(Easing::Linear.apply(-1.0).abs() < 1e-6);
    }

    // -------------------------------------------------------------------------
    // Timeline Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_new_timeline_is_idle() {
        let timeline: Timeline<f32> = Timeline::new(Duration::from_secs(1), Easing::Linear);
        assert_eq!(timeline.phase(), Phase::Idle);
        assert!(!timeline.has_started());
        assert!(timeline.animated_value().is_none());
    }

    #[test]
    fn test_start_without_keyframes_fails() {
        let mut timeline: Timeline<f32> = Timeline::new(Duration::from_secs(1), Easing::Linear);
        assert!(!timeline.start(), "start needs keyframes");
        assert_eq!(timeline.phase(), Phase::Idle);
    }

    #[test]
    fn test_idle_timeline_does_not_advance() {
        let mut timeline: Timeline<f32> = Timeline::new(Duration::from_secs(1), Easing::Linear);
        timeline.set_values(&[0.0, 10.0]);
        assert!(timeline.advance(FRAME).is_none());
    }

    #[test]
    fn test_runs_to_exact_end_value() {
        let mut timeline = Timeline::new(Duration::from_millis(5000), Easing::Decelerate(0.7));
        timeline.set_values(&[0.3, 220.0]);
        assert!(timeline.start());

        let mut last = 0.0;
        while let Some(value) = timeline.advance(FRAME) {
            last = value;
        }
        assert_eq!(last, 220.0, "last tick should land on the end keyframe exactly");
        assert_eq!(timeline.phase(), Phase::Finished);
        assert!(!timeline.is_running());
        assert!(timeline.has_started());
        assert_eq!(timeline.elapsed(), timeline.duration(), "cursor saturates at duration");
    }

    #[test]
    fn test_retarget_is_continuous() {
        let mut timeline = Timeline::new(Duration::from_millis(5000), Easing::Decelerate(0.7));
        timeline.retarget(0.0, 220.0);
        for _ in 0..60 {
            timeline.advance(FRAME);
        }
        let x = timeline.animated_value().expect("running");
        assert!(x > 0.0 && x < 220.0);

        timeline.retarget(x, 0.0);
        assert_eq!(timeline.animated_value(), Some(x), "retarget must not jump");
        assert_eq!(timeline.keyframes(), &[x, 0.0]);
        assert_eq!(timeline.elapsed(), Duration::ZERO);
        assert_eq!(timeline.duration(), Duration::from_millis(5000), "duration preserved");
        assert_eq!(timeline.easing(), Easing::Decelerate(0.7), "easing preserved");
        assert_eq!(timeline.value_at(Duration::ZERO), Some(x));

        let next = timeline.advance(Duration::from_millis(1)).expect("running");
        assert!(next < x && (x - next) < 1.0, "first tick should move a little toward 0");
    }

    #[test]
    fn test_set_values_truncates() {
        let mut timeline: Timeline<f32> = Timeline::new(Duration::from_secs(1), Easing::Linear);
        timeline.set_values(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(timeline.keyframes().len(), MAX_KEYFRAMES);
    }

    #[test]
    fn test_single_keyframe_holds() {
        let mut timeline: Timeline<f32> = Timeline::new(Duration::from_secs(1), Easing::Linear);
        timeline.set_values(&[42.0]);
        assert_eq!(timeline.value_at(Duration::from_millis(500)), Some(42.0));
    }

    // -------------------------------------------------------------------------
    // Color Flash Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_flash_passes_through_control_colors() {
        let timeline = flash();
        assert_eq!(timeline.value_at(Duration::ZERO), Some(BLUE));
        assert_eq!(timeline.value_at(Duration::from_millis(150)), Some(RED));
        assert_eq!(timeline.value_at(Duration::from_millis(300)), Some(BLUE));
    }

    #[test]
    fn test_flash_is_symmetric() {
        let timeline = flash();
        for us in 0..=300_000_u64 {
            let forward = timeline.value_at(Duration::from_micros(us));
            let mirrored = timeline.value_at(Duration::from_micros(300_000 - us));
            assert_eq!(forward, mirrored, "flash should be symmetric at {us}us");
        }
    }

    #[test]
    fn test_linear_segment_fractions_are_complementary() {
        let duration = Duration::from_millis(300);
        let (index, local) = linear_segment(Duration::from_millis(5), duration, 3);
        assert_eq!(index, 0);
        let (mirror_index, mirror_local) = linear_segment(Duration::from_millis(295), duration, 3);
        assert_eq!(mirror_index, 1);
        assert_eq!(local.den(), mirror_local.den());
        assert_eq!(local.num() + mirror_local.num(), local.den(), "mirrored samples split the segment exactly");
    }

    #[test]
    fn test_fraction_clamps() {
        assert_eq!(Fraction::new(5, 2), Fraction::new(2, 2));
        assert_eq!(Fraction::new(0, 0).den(), 1);
        assert_eq!(Fraction::from_f32(-1.0), Fraction::new(0, LERP_SCALE));
        assert!((Fraction::from_f32(0.25).as_f32() - 0.25).abs() < f32::EPSILON);
        assert_eq!(Fraction::ZERO.as_f32(), 0.0);
    }

    #[test]
    fn test_flash_is_piecewise_linear() {
        let timeline = flash();
        let quarter = timeline.value_at(Duration::from_millis(75)).expect("keyframes");
        assert_eq!(quarter, lerp_rgb888(BLUE, RED, 0.5));
    }
}
