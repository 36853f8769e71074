//! Touch Relay Panel Simulator for Desktop.
//!
//! Runs the same `PanelController` as the firmware against an SDL window:
//! - Left mouse button: touch the panel
//! - `D`: unplug / replug the thermistor probe
//!
//! Relay and backlight levels are printed whenever they change, followed by the
//! panel's event log lines.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

mod hardware;

use std::cell::RefCell;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, Window};
use relay_panel::colors::BLACK;
use relay_panel::config::{LOOP_IDLE_MS, SCREEN_HEIGHT, SCREEN_WIDTH};
use relay_panel::graphics::GraphicsPanel;
use relay_panel::power::{Backlight, Polarity};
use relay_panel::{PanelController, PanelHardware};

use crate::hardware::{InputState, SimClock, SimLcd, SimPin, SimProbes, SimTouch, StdDelay};

fn main() {
    let size = Size::new(SCREEN_WIDTH, SCREEN_HEIGHT);
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let window = Rc::new(RefCell::new(Window::new("Relay Panel Sim", &output_settings)));

    // What the eye sees with the backlight off
    let mut dark: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(size);
    dark.clear(BLACK).ok();
    window.borrow_mut().update(&dark);

    let input = Rc::new(RefCell::new(InputState::default()));
    let backlight = SimPin::default();
    let relay_a = SimPin::default();
    let relay_b = SimPin::default();

    let hw = PanelHardware {
        clock: SimClock,
        backlight: Backlight::new(backlight.clone(), Polarity::ActiveHigh),
        delay: StdDelay,
        panel: GraphicsPanel::new(SimLcd::new(size)),
        touch: SimTouch::new(window.clone(), input.clone()),
        sensors: SimProbes::new(input.clone()),
        relay_a: relay_a.clone(),
        relay_b: relay_b.clone(),
    };

    let started = Instant::now();
    let now_ms = || started.elapsed().as_millis() as u64;

    let mut panel = PanelController::new(hw, now_ms());
    let mut printed = 0u32;
    let mut last_outputs = None;

    loop {
        panel.tick(now_ms());

        for line in panel.events().since(printed) {
            println!("[{:>8} ms] {}", line.at_ms, line.text);
        }
        printed = panel.events().total();

        let outputs = (backlight.0.get(), relay_a.0.get(), relay_b.0.get());
        if last_outputs != Some(outputs) {
            println!("[pins] backlight={} relay_a={} relay_b={}", outputs.0, outputs.1, outputs.2);
            last_outputs = Some(outputs);
        }

        if backlight.0.get() {
            window.borrow_mut().update(panel.panel().target().framebuffer());
        } else {
            window.borrow_mut().update(&dark);
        }

        if input.borrow().quit {
            return;
        }

        thread::sleep(Duration::from_millis(LOOP_IDLE_MS));
    }
}
