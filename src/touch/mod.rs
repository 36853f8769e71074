//! Touch input surface.
//!
//! - [`TouchSample`] / [`TouchInput`]: what the controller sees of the touch hardware
//! - [`dispatch`]: Button regions and the mode-dependent action table
//! - [`calibration`]: Raw-to-screen mapping and its persisted flash record
//! - [`xpt2046`]: Driver for the resistive touch controller
//!
//! The controller polls once per loop iteration. After a recognized touch it blocks
//! in [`wait_for_release`] until the finger lifts, which is the only debounce: there
//! is no timer, so a held finger can never fire the same button twice.

pub mod calibration;
pub mod dispatch;
pub mod xpt2046;

use embedded_graphics::prelude::Point;

pub use calibration::{Calibration, CalibrationError};
pub use dispatch::{ButtonAction, ButtonId, ButtonRegion, ToggleId, BUTTONS};
pub use xpt2046::Xpt2046;

/// One touch reading in screen pixels.
///
/// Only produced while the panel is pressed harder than the driver's threshold, so
/// callers never see "no touch" samples.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct TouchSample {
    pub x: i32,
    pub y: i32,
    /// Driver-specific pressure estimate, for diagnostics.
    pub pressure: u16,
}

impl TouchSample {
    pub const fn new(
        x: i32,
        y: i32,
        pressure: u16,
    ) -> Self {
        Self { x, y, pressure }
    }

    /// Position as an embedded-graphics point for region hit-testing.
    #[inline]
    pub const fn point(&self) -> Point { Point::new(self.x, self.y) }
}

/// Touch controller, already pressure-gated and calibrated.
pub trait TouchInput {
    /// Return the current touch, or `None` while nothing is pressed.
    fn poll(&mut self) -> Option<TouchSample>;
}

/// Busy-poll until the panel reports no touch.
///
/// Returns the number of polls that still saw the finger down.
pub fn wait_for_release<T: TouchInput>(touch: &mut T) -> u32 {
    let mut held = 0u32;
    while touch.poll().is_some() {
        held = held.saturating_add(1);
    }
    held
}
