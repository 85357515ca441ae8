//! Speedometer simulator for desktop.
//!
//! Opens an `embedded-graphics-simulator` window with a single gauge and
//! drives it like a touch screen: hold to accelerate, let go to brake.
//!
//! # Controls
//!
//! | Input | Action |
//! |-------|--------|
//! | Mouse button down / up | Press / release |
//! | `G` down / up | Press / release (key repeat ignored) |
//! | Close window | Quit |
//!
//! The needle flashes red once each time it climbs through 160.
//!
//! # Logging
//!
//! Uses `env_logger`, `info` by default. `RUST_LOG=debug` shows touch and
//! flash events, `RUST_LOG=trace` every rendered frame.

use std::thread;
use std::time::Instant;

use anyhow::Context;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use env_logger::Env;
use speedometer_gauge::colors::BLACK;
use speedometer_gauge::config::{FRAME_TIME, SIMULATOR_SIZE};
use speedometer_gauge::{Constraints, GaugeConfig, Speedometer, TouchAction};

/// Key that acts as the gas pedal.
const PEDAL_KEY: Keycode = Keycode::G;

/// Translate a window event into a touch action.
fn touch_action(event: &SimulatorEvent) -> TouchAction {
    match event {
        SimulatorEvent::MouseButtonDown { .. } => TouchAction::Down,
        SimulatorEvent::MouseButtonUp { .. } => TouchAction::Up,
        SimulatorEvent::KeyDown { keycode, repeat: false, .. } if *keycode == PEDAL_KEY => TouchAction::Down,
        SimulatorEvent::KeyUp { keycode, .. } if *keycode == PEDAL_KEY => TouchAction::Up,
        _ => TouchAction::Other,
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = GaugeConfig::builder()
        .size(SIMULATOR_SIZE)
        .build()
        .context("invalid simulator gauge configuration")?;
    let side = config.size();

    let mut speedometer = Speedometer::new(config);
    speedometer.measure(Constraints::exact(side));

    let mut display: SimulatorDisplay<Rgb888> = SimulatorDisplay::new(Size::new(side, side));
    let output_settings = OutputSettingsBuilder::new().build();
    let mut window = Window::new("Speedometer", &output_settings);

    // The window only exists after the first update
    display.clear(BLACK).ok();
    speedometer.draw_into(&mut display, true);
    window.update(&display);
    log::info!("hold the mouse button or G to accelerate, release to brake");

    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();

        for event in window.events() {
            if matches!(event, SimulatorEvent::Quit) {
                log::info!("window closed at {:.1}", speedometer.current_speed());
                return Ok(());
            }
            speedometer.on_touch(touch_action(&event));
        }

        let dt = frame_start.duration_since(last_frame);
        last_frame = frame_start;

        let outcome = speedometer.tick(dt);
        if outcome.flash_started {
            log::info!("speed alert at {:.0}", speedometer.current_speed());
        }

        if speedometer.state().is_dirty() {
            display.clear(BLACK).ok();
            speedometer.draw_into(&mut display, false);
        }
        window.update(&display);

        if let Some(remaining) = FRAME_TIME.checked_sub(frame_start.elapsed()) {
            thread::sleep(remaining);
        }
    }
}
