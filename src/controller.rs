//! Press-and-hold touch handling that drives the needle.
//!
//! Two timelines are sequenced here:
//! - **Position**: sweeps the needle toward max speed while pressed and back
//!   to zero on release (5 s, decelerating)
//! - **Flash**: fades the needle base -> red -> base (300 ms, linear) when
//!   a press carries the needle to or past the alert threshold
//!
//! # State Machines
//!
//! ```text
//! Position:  Idle --press--> Rising --release--> Falling --(reaches 0)--> rest
//!                              ^                    |
//!                              +------press---------+
//!
//! Flash:     Idle --armed and speed >= 160--> Flashing --300 ms--> Idle
//! ```
//!
//! Each press arms the flash once and release disarms it, so the needle
//! flashes at most once per press and never on the way down. A press that
//! starts at or above 160 flashes on its first tick. The flash is
//! non-reentrant: reaching the threshold while it is already running keeps
//! it armed until it finishes, and release never cancels it.
//!
//! # Continuity
//!
//! Every press or release retargets the single position timeline from where
//! the needle is right now: the timeline's interpolated value while it is
//! running, otherwise [`GaugeState::current_speed`]. The needle never jumps,
//! whether the gesture interrupts a sweep or starts from a restored speed.
//!
//! # Tick Ordering
//!
//! Within one [`TouchAnimationController::tick`] the position timeline runs
//! first and may start the flash. A flash started on this tick shows its
//! first color change on the next tick.

use std::time::Duration;

use embedded_graphics::pixelcolor::Rgb888;

use crate::animations::{Easing, Timeline};
use crate::config::{
    DECELERATE_FACTOR,
    FLASH_COLOR,
    FLASH_DURATION,
    FLASH_THRESHOLD,
    GaugeConfig,
    POSITION_DURATION,
};
use crate::state::GaugeState;

/// Touch input the controller understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchAction {
    /// Finger (or button) went down.
    Down,
    /// Finger (or button) went up.
    Up,
    /// Anything else: moves, cancels, hovers. Left for the host.
    Other,
}

/// What changed during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickOutcome {
    /// New needle position, if the position timeline ran.
    pub speed: Option<f32>,
    /// New needle color, if the flash ran.
    pub color: Option<Rgb888>,
    /// The flash was started on this tick.
    pub flash_started: bool,
}

impl TickOutcome {
    /// Whether anything was written to the gauge state.
    #[inline]
    pub const fn changed(&self) -> bool { self.speed.is_some() || self.color.is_some() }
}

/// Sequences the needle position and color flash timelines.
#[derive(Clone, Debug)]
pub struct TouchAnimationController {
    /// Target of a press.
    max_speed: f32,

    /// Needle sweep. One instance, retargeted in place.
    position: Timeline<f32>,

    /// Needle color flash. Keyframes fixed at construction.
    flash: Timeline<Rgb888>,

    /// Set by a press, cleared by release or when the flash fires.
    flash_armed: bool,
}

impl TouchAnimationController {
    /// Controller for a gauge. The configured needle color is the color the
    /// flash starts from and returns to.
    pub fn new(config: &GaugeConfig) -> Self {
        let mut controller = Self {
            max_speed: config.max_speed() as f32,
            position: Timeline::new(POSITION_DURATION, Easing::Decelerate(DECELERATE_FACTOR)),
            flash: Timeline::new(FLASH_DURATION, Easing::Linear),
            flash_armed: false,
        };
        controller.set_base_color(config.needle_color());
        controller
    }

    /// Dispatch a touch event. Returns `true` when the event was consumed.
    pub fn on_touch(
        &mut self,
        action: TouchAction,
        state: &GaugeState,
    ) -> bool {
        match action {
            TouchAction::Down => {
                self.press(state);
                true
            }
            TouchAction::Up => {
                self.release(state);
                true
            }
            TouchAction::Other => false,
        }
    }

    /// Start (or redirect) the sweep toward max speed.
    pub fn press(
        &mut self,
        state: &GaugeState,
    ) {
        let from = self.start_value(state);
        log::debug!("press: needle {from:.1} -> {:.1}", self.max_speed);
        self.flash_armed = true;
        self.position.retarget(from, self.max_speed);
    }

    /// Start (or redirect) the sweep back to zero.
    pub fn release(
        &mut self,
        state: &GaugeState,
    ) {
        let from = self.start_value(state);
        log::debug!("release: needle {from:.1} -> 0");
        self.flash_armed = false;
        self.position.retarget(from, 0.0);
    }

    /// Advance both timelines by one frame and write the results into `state`.
    pub fn tick(
        &mut self,
        dt: Duration,
        state: &mut GaugeState,
    ) -> TickOutcome {
        let flash_was_running = self.flash.is_running();
        let mut outcome = TickOutcome::default();

        if let Some(speed) = self.position.advance(dt) {
            state.set_current_speed(speed);
            outcome.speed = Some(speed);

            if self.flash_armed && speed >= FLASH_THRESHOLD && !self.flash.is_running() {
                log::debug!("needle reached {FLASH_THRESHOLD} at {speed:.1}, flashing");
                self.flash_armed = false;
                self.flash.start();
                outcome.flash_started = true;
            }
        }

        if flash_was_running && let Some(color) = self.flash.advance(dt) {
            state.set_needle_color(color);
            outcome.color = Some(color);
        }

        outcome
    }

    /// Follow a max speed override on the gauge. Applies from the next press.
    pub fn set_max_speed(
        &mut self,
        max_speed: u32,
    ) {
        self.max_speed = max_speed as f32;
    }

    /// Color the flash starts from and returns to. A flash in flight picks
    /// up the new keyframes on its next tick.
    pub fn set_base_color(
        &mut self,
        color: Rgb888,
    ) {
        self.flash.set_values(&[color, FLASH_COLOR, color]);
    }

    /// Where a new sweep starts: the live timeline value, else the gauge.
    fn start_value(
        &self,
        state: &GaugeState,
    ) -> f32 {
        if self.position.is_running() {
            self.position.animated_value().unwrap_or_else(|| state.current_speed())
        } else {
            state.current_speed()
        }
    }

    #[inline]
    pub const fn position(&self) -> &Timeline<f32> { &self.position }

    #[inline]
    pub const fn flash(&self) -> &Timeline<Rgb888> { &self.flash }

    /// Whether either timeline still needs ticks.
    #[inline]
    pub fn is_animating(&self) -> bool { self.position.is_running() || self.flash.is_running() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_graphics::pixelcolor::RgbColor;

    use super::*;
    use crate::animations::Phase;
    use crate::colors::{BLUE, RED};

    const FRAME: Duration = Duration::from_millis(16);

    fn setup() -> (TouchAnimationController, GaugeState) {
        let config = GaugeConfig::default();
        (TouchAnimationController::new(&config), GaugeState::from_config(&config))
    }

    /// Tick until the position timeline stops. Returns the number of flashes started.
    fn run_position(
        controller: &mut TouchAnimationController,
        state: &mut GaugeState,
    ) -> usize {
        let mut flashes = 0;
        for _ in 0..1000 {
            if !controller.position().is_running() {
                break;
            }
            if controller.tick(FRAME, state).flash_started {
                flashes += 1;
            }
        }
        flashes
    }

    // -------------------------------------------------------------------------
    // Touch Dispatch Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_other_action_not_handled() {
        let (mut controller, state) = setup();
        assert!(!controller.on_touch(TouchAction::Other, &state));
        assert_eq!(controller.position().phase(), Phase::Idle, "ignored events start nothing");
    }

    #[test]
    fn test_down_and_up_handled() {
        let (mut controller, state) = setup();
        assert!(controller.on_touch(TouchAction::Down, &state));
        assert!(controller.position().is_running());
        assert!(controller.on_touch(TouchAction::Up, &state));
        assert!(controller.position().is_running());
    }

    #[test]
    fn test_idle_tick_changes_nothing() {
        let (mut controller, mut state) = setup();
        state.take_dirty();
        let outcome = controller.tick(FRAME, &mut state);
        assert!(!outcome.changed());
        assert!(!state.is_dirty(), "no animation, no redraw");
    }

    // -------------------------------------------------------------------------
    // Scenario Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_press_from_rest_reaches_max_with_one_flash() {
        let (mut controller, mut state) = setup();
        controller.on_touch(TouchAction::Down, &state);
        assert_eq!(controller.position().keyframes(), &[0.0, 220.0]);
        assert_eq!(controller.position().duration(), Duration::from_millis(5000));
        assert_eq!(controller.position().easing(), Easing::Decelerate(0.7));

        let mut flashes = 0;
        let mut prev = state.current_speed();
        while controller.position().is_running() {
            let outcome = controller.tick(FRAME, &mut state);
            let speed = outcome.speed.expect("position running");
            assert!(speed >= prev, "needle should only rise while pressed");
            if prev < FLASH_THRESHOLD && speed >= FLASH_THRESHOLD {
                assert!(outcome.flash_started, "flash must start on the crossing tick ({speed})");
            }
            if outcome.flash_started {
                flashes += 1;
            }
            prev = speed;
        }

        assert!((state.current_speed() - 220.0).abs() < 1e-3, "needle should end at max");
        assert_eq!(flashes, 1, "flash should trigger exactly once");
        assert_eq!(state.needle_color(), BLUE, "flash should have faded back to base");
    }

    #[test]
    fn test_flash_hits_alert_color() {
        let (mut controller, mut state) = setup();
        controller.press(&state);

        let mut saw_red_ish = false;
        while controller.position().is_running() {
            if let Some(color) = controller.tick(FRAME, &mut state).color
                && color.r() > 200
            {
                saw_red_ish = true;
            }
        }
        assert!(saw_red_ish, "needle should visibly flash red");
    }

    #[test]
    fn test_release_from_180_falls_without_flash() {
        let (mut controller, mut state) = setup();
        state.set_current_speed(180.0);

        assert!(controller.on_touch(TouchAction::Up, &state));
        assert_eq!(controller.position().keyframes(), &[180.0, 0.0], "release starts where the needle is");
        assert_eq!(controller.position().animated_value(), Some(180.0));

        let flashes = run_position(&mut controller, &mut state);
        assert_eq!(flashes, 0, "descending through the threshold must not flash");
        assert!(state.current_speed().abs() < 1e-3, "needle should come to rest at 0");
        assert_eq!(state.needle_color(), BLUE);
    }

    #[test]
    fn test_release_after_crossing_does_not_rearm() {
        let (mut controller, mut state) = setup();
        controller.press(&state);
        while state.current_speed() < 180.0 {
            controller.tick(FRAME, &mut state);
        }

        let at_release = state.current_speed();
        controller.release(&state);
        assert_eq!(controller.position().keyframes(), &[at_release, 0.0]);

        let flashes = run_position(&mut controller, &mut state);
        assert_eq!(flashes, 0, "no new flash on the way down");
        assert!(state.current_speed().abs() < 1e-3);
    }

    #[test]
    fn test_press_mid_fall_retargets_without_jump() {
        let (mut controller, mut state) = setup();
        controller.press(&state);
        for _ in 0..100 {
            controller.tick(FRAME, &mut state);
        }
        controller.release(&state);
        for _ in 0..20 {
            controller.tick(FRAME, &mut state);
        }

        let falling_at = controller.position().animated_value().expect("running");
        assert!((falling_at - state.current_speed()).abs() < f32::EPSILON);

        controller.press(&state);
        assert_eq!(controller.position().keyframes(), &[falling_at, 220.0], "resume from the live value");
        let next = controller.tick(Duration::from_millis(1), &mut state).speed.expect("running");
        assert!(next >= falling_at && next - falling_at < 1.0, "no discontinuity on retarget");
    }

    #[test]
    fn test_first_press_starts_from_restored_speed() {
        let (mut controller, mut state) = setup();
        state.set_current_speed(90.0);
        controller.press(&state);
        assert_eq!(controller.position().keyframes(), &[90.0, 220.0]);
    }

    #[test]
    fn test_press_after_completed_sweep_uses_committed_speed() {
        let (mut controller, mut state) = setup();
        controller.press(&state);
        run_position(&mut controller, &mut state);
        assert_eq!(controller.position().phase(), Phase::Finished);

        // Host moved the needle after the sweep finished
        state.set_current_speed(40.0);
        controller.press(&state);
        assert_eq!(controller.position().keyframes(), &[40.0, 220.0]);
    }

    #[test]
    fn test_release_does_not_cancel_flash() {
        let (mut controller, mut state) = setup();
        controller.press(&state);
        while !controller.tick(FRAME, &mut state).flash_started {}

        controller.release(&state);
        assert!(controller.flash().is_running(), "release must leave the flash running");

        let mut ticks = 0;
        while controller.flash().is_running() {
            controller.tick(FRAME, &mut state);
            ticks += 1;
        }
        assert!(ticks >= 18, "flash should run its full 300ms, ran {ticks} ticks");
        assert_eq!(state.needle_color(), BLUE);
    }

    #[test]
    fn test_press_starting_above_threshold_flashes_once() {
        let (mut controller, mut state) = setup();
        state.set_current_speed(170.0);
        controller.press(&state);

        let first = controller.tick(FRAME, &mut state);
        assert!(first.flash_started, "a press from 170 should flash on its first tick");

        let flashes = run_position(&mut controller, &mut state);
        assert_eq!(flashes, 0, "only one flash per press");
        assert!((state.current_speed() - 220.0).abs() < 1e-3);
    }

    #[test]
    fn test_repress_while_falling_above_threshold_flashes() {
        let (mut controller, mut state) = setup();
        state.set_current_speed(200.0);
        controller.release(&state);
        for _ in 0..5 {
            assert!(!controller.tick(FRAME, &mut state).flash_started, "falling never flashes");
        }
        assert!(state.current_speed() >= FLASH_THRESHOLD);

        controller.press(&state);
        assert!(controller.tick(FRAME, &mut state).flash_started, "re-press above 160 flashes");
    }

    #[test]
    fn test_armed_press_waits_for_running_flash() {
        let (mut controller, mut state) = setup();
        state.set_current_speed(170.0);
        controller.press(&state);
        controller.flash.start();

        assert!(!controller.tick(FRAME, &mut state).flash_started, "flash already running");
        let mut started = 0;
        while controller.position().is_running() {
            if controller.tick(FRAME, &mut state).flash_started {
                started += 1;
            }
        }
        assert_eq!(started, 1, "the armed press flashes once the running flash ends");
    }

    #[test]
    fn test_flash_not_retriggered_while_active() {
        let (mut controller, mut state) = setup();
        state.set_current_speed(150.0);
        controller.press(&state);
        controller.flash.start();

        let outcome = controller.tick(Duration::from_millis(2500), &mut state);
        assert!(outcome.speed.expect("running") >= FLASH_THRESHOLD, "this tick crosses the threshold");
        assert!(!outcome.flash_started, "an active flash must not restart");
    }

    #[test]
    fn test_flash_advances_from_next_tick() {
        let (mut controller, mut state) = setup();
        state.set_current_speed(159.0);
        controller.press(&state);

        let outcome = controller.tick(Duration::from_millis(200), &mut state);
        assert!(outcome.flash_started);
        assert!(outcome.color.is_none(), "a flash started this tick shows on the next");
        assert_eq!(controller.flash().animated_value(), Some(BLUE));

        let outcome = controller.tick(FRAME, &mut state);
        let color = outcome.color.expect("flash running");
        assert!(color.r() > 0 && color != RED, "first flash step leaves the base color");
    }

    #[test]
    fn test_custom_base_color_and_max() {
        let config = GaugeConfig::builder()
            .max_speed(300)
            .needle_color(RED)
            .build()
            .expect("valid");
        let mut controller = TouchAnimationController::new(&config);
        assert_eq!(controller.flash().keyframes(), &[RED, FLASH_COLOR, RED]);

        controller.set_base_color(BLUE);
        assert_eq!(controller.flash().keyframes(), &[BLUE, FLASH_COLOR, BLUE]);

        controller.set_max_speed(260);
        controller.press(&GaugeState::from_config(&config));
        assert_eq!(controller.position().keyframes(), &[0.0, 260.0]);
    }
}
