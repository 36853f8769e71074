//! Desktop stand-ins for the panel hardware.
//!
//! The SDL window is shared between the main loop (which presents frames) and
//! [`SimTouch`] (which pumps window events while the controller busy-waits for a
//! release), so it lives in an `Rc<RefCell<_>>`.

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{SimulatorDisplay, SimulatorEvent, Window};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use relay_panel::power::{ClockControl, CpuClock, PanelCommands};
use relay_panel::sensors::{DISCONNECTED_C, SENSOR_COUNT, TemperatureSensor};
use relay_panel::touch::{TouchInput, TouchSample};

/// Pause between polls while a button is held, so the release wait does not spin.
const HELD_POLL: Duration = Duration::from_millis(2);

// =============================================================================
// Input
// =============================================================================

/// What the window events have told us so far.
#[derive(Default)]
pub struct InputState {
    /// Mouse position while the left button is down.
    pub pressed: Option<Point>,
    pub quit: bool,
    /// Toggled with `D`: simulates unplugging the thermistor.
    pub probe_unplugged: bool,
}

/// Mouse-driven touch panel.
pub struct SimTouch {
    window: Rc<RefCell<Window>>,
    state: Rc<RefCell<InputState>>,
}

impl SimTouch {
    pub const fn new(
        window: Rc<RefCell<Window>>,
        state: Rc<RefCell<InputState>>,
    ) -> Self {
        Self { window, state }
    }

    fn pump_events(&self) {
        let mut window = self.window.borrow_mut();
        let mut state = self.state.borrow_mut();
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => state.quit = true,
                SimulatorEvent::MouseButtonDown { point, .. } => state.pressed = Some(point),
                SimulatorEvent::MouseButtonUp { .. } => state.pressed = None,
                SimulatorEvent::MouseMove { point } => {
                    if state.pressed.is_some() {
                        state.pressed = Some(point);
                    }
                }
                SimulatorEvent::KeyDown {
                    keycode: Keycode::D,
                    repeat: false,
                    ..
                } => state.probe_unplugged = !state.probe_unplugged,
                _ => {}
            }
        }
    }
}

impl TouchInput for SimTouch {
    fn poll(&mut self) -> Option<TouchSample> {
        self.pump_events();
        let state = self.state.borrow();
        // Closing the window counts as lifting the finger
        if state.quit {
            return None;
        }
        let point = state.pressed?;
        thread::sleep(HELD_POLL);
        Some(TouchSample::new(point.x, point.y, u16::MAX))
    }
}

// =============================================================================
// Display
// =============================================================================

/// Framebuffer that ignores drawing while the panel controller is asleep.
pub struct SimLcd {
    framebuffer: SimulatorDisplay<Rgb565>,
    asleep: bool,
}

impl SimLcd {
    pub fn new(size: Size) -> Self {
        Self {
            framebuffer: SimulatorDisplay::new(size),
            asleep: false,
        }
    }

    #[inline]
    pub const fn framebuffer(&self) -> &SimulatorDisplay<Rgb565> { &self.framebuffer }
}

impl PanelCommands for SimLcd {
    fn sleep_panel(&mut self) { self.asleep = true; }

    fn wake_panel(&mut self) { self.asleep = false; }
}

impl OriginDimensions for SimLcd {
    fn size(&self) -> Size { self.framebuffer.size() }
}

impl DrawTarget for SimLcd {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        if self.asleep {
            return Ok(());
        }
        self.framebuffer.draw_iter(pixels)
    }

    fn fill_solid(
        &mut self,
        area: &Rectangle,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        if self.asleep {
            return Ok(());
        }
        self.framebuffer.fill_solid(area, color)
    }
}

// =============================================================================
// Pins, Clock, Delay
// =============================================================================

/// Output pin whose level the main loop can observe.
#[derive(Clone, Default)]
pub struct SimPin(pub Rc<Cell<bool>>);

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.set(true);
        Ok(())
    }
}

/// Clock control that only reports the requested rate.
pub struct SimClock;

impl ClockControl for SimClock {
    fn set_cpu_clock(
        &mut self,
        clock: CpuClock,
    ) {
        println!("[clock] {clock:?}");
    }
}

/// Blocking delay on the host thread.
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(
        &mut self,
        ns: u32,
    ) {
        thread::sleep(Duration::from_nanos(u64::from(ns)));
    }
}

// =============================================================================
// Sensors
// =============================================================================

/// Synthetic probes: a slowly drifting room temperature and an unpluggable NTC.
pub struct SimProbes {
    started: Instant,
    state: Rc<RefCell<InputState>>,
    latest: [f32; SENSOR_COUNT],
}

impl SimProbes {
    pub fn new(state: Rc<RefCell<InputState>>) -> Self {
        Self {
            started: Instant::now(),
            state,
            latest: [DISCONNECTED_C; SENSOR_COUNT],
        }
    }
}

impl TemperatureSensor for SimProbes {
    fn request_temperatures(&mut self) {
        let t = self.started.elapsed().as_secs_f32();
        self.latest[0] = 22.0 + 1.5 * (t * 0.05).sin();
        self.latest[1] = if self.state.borrow().probe_unplugged {
            DISCONNECTED_C
        } else {
            48.0 + 6.0 * (t * 0.11).sin()
        };
    }

    fn read_celsius(
        &mut self,
        index: usize,
    ) -> f32 {
        self.latest.get(index).copied().unwrap_or(DISCONNECTED_C)
    }
}
