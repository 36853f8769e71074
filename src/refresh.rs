//! Display refresh coordination.
//!
//! The state machine never draws directly. It marks what changed on a
//! [`RefreshState`] and the controller flushes the pending work once at the end of
//! each loop iteration:
//!
//! | Event | Marks |
//! |-------|-------|
//! | Boot / wake | full layout |
//! | System toggle | `SYSTEM` button + header status |
//! | Sampling fire (Active) | both sensor slots |
//! | Relay cycle fire (Active) | relay slot |
//! | Sleep | drops everything pending |
//!
//! A pending full layout supersedes every partial region. Nothing is drawn while the
//! panel is suspended.

use heapless::String;

use crate::power::PowerMode;
use crate::sensors::{self, Readings, NO_READINGS};
use crate::touch::ButtonId;

// =============================================================================
// Panel View
// =============================================================================

/// Text slots updated without a full redraw.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum StatusSlot {
    /// Header system state (`SYS ON` / `SYS OFF`).
    System,
    /// Temperature card for sensor 0.
    Sensor0,
    /// Temperature card for sensor 1.
    Sensor1,
    /// Relay status line.
    Relays,
}

impl StatusSlot {
    pub const COUNT: usize = 4;

    pub const ALL: [Self; Self::COUNT] = [Self::System, Self::Sensor0, Self::Sensor1, Self::Relays];

    #[inline]
    pub const fn index(self) -> usize { self as usize }

    /// Slot showing the reading of sensor `index`.
    pub const fn sensor(index: usize) -> Self {
        if index == 0 { Self::Sensor0 } else { Self::Sensor1 }
    }
}

/// Everything the drawing code needs for a full repaint.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PanelView {
    pub mode: PowerMode,
    pub system_enabled: bool,
    /// Energized state of `[relay A, relay B]`.
    pub relays: [bool; 2],
    pub readings: Readings,
}

impl Default for PanelView {
    fn default() -> Self {
        Self {
            mode: PowerMode::Active,
            system_enabled: false,
            relays: [false; 2],
            readings: NO_READINGS,
        }
    }
}

impl PanelView {
    /// Whether `button` is drawn in its "on" style.
    pub const fn button_on(
        &self,
        button: ButtonId,
    ) -> bool {
        match button {
            ButtonId::System => self.system_enabled,
            ButtonId::Sleep => false,
        }
    }

    /// Text shown in a status slot.
    pub fn status_text(
        &self,
        slot: StatusSlot,
    ) -> String<24> {
        let mut s: String<24> = String::new();
        match slot {
            StatusSlot::System => {
                let _ = s.push_str(if self.system_enabled { "SYS ON" } else { "SYS OFF" });
            }
            StatusSlot::Sensor0 => {
                let _ = s.push_str(&sensors::format_reading(self.readings[0]));
            }
            StatusSlot::Sensor1 => {
                let _ = s.push_str(&sensors::format_reading(self.readings[1]));
            }
            StatusSlot::Relays => {
                let label = |on: bool| if on { "ON" } else { "off" };
                let _ = s.push_str("R1 ");
                let _ = s.push_str(label(self.relays[0]));
                let _ = s.push_str("  R2 ");
                let _ = s.push_str(label(self.relays[1]));
            }
        }
        s
    }
}

// =============================================================================
// Drawing Collaborator
// =============================================================================

/// Drawing operations the refresh coordinator needs.
pub trait PanelDisplay {
    /// Repaint everything: header, cards, relay line and buttons.
    fn draw_full_layout(
        &mut self,
        view: &PanelView,
    );

    /// Repaint one button in its on/off style.
    fn draw_button(
        &mut self,
        button: ButtonId,
        on: bool,
    );

    /// Repaint one status text slot.
    fn draw_status_text(
        &mut self,
        slot: StatusSlot,
        text: &str,
    );
}

// =============================================================================
// Refresh State
// =============================================================================

/// Regions waiting to be drawn.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct PendingRefresh {
    pub full: bool,
    pub buttons: [bool; ButtonId::COUNT],
    pub status: [bool; StatusSlot::COUNT],
}

impl PendingRefresh {
    /// Nothing pending.
    pub const NONE: Self = Self {
        full: false,
        buttons: [false; ButtonId::COUNT],
        status: [false; StatusSlot::COUNT],
    };

    /// Check if nothing is pending.
    #[inline]
    pub fn is_empty(&self) -> bool { *self == Self::NONE }
}

/// Accumulates dirty regions during one loop iteration.
pub struct RefreshState {
    pending: PendingRefresh,
    full_redraws: u32,
}

impl RefreshState {
    /// Start with a full layout pending for the first frame.
    pub const fn new() -> Self {
        Self {
            pending: PendingRefresh {
                full: true,
                ..PendingRefresh::NONE
            },
            full_redraws: 0,
        }
    }

    /// Request a repaint of the whole layout.
    pub fn request_full(&mut self) { self.pending.full = true; }

    /// Request a repaint of one button.
    pub fn request_button(
        &mut self,
        button: ButtonId,
    ) {
        self.pending.buttons[button.index()] = true;
    }

    /// Request a repaint of one status slot.
    pub fn request_status(
        &mut self,
        slot: StatusSlot,
    ) {
        self.pending.status[slot.index()] = true;
    }

    /// Drop everything pending (used on sleep; wake repaints everything).
    pub fn discard(&mut self) { self.pending = PendingRefresh::NONE; }

    /// Pending regions.
    #[inline]
    pub const fn pending(&self) -> &PendingRefresh { &self.pending }

    /// Take the pending regions, leaving nothing pending.
    pub fn take(&mut self) -> PendingRefresh { core::mem::replace(&mut self.pending, PendingRefresh::NONE) }

    /// Number of full layouts drawn so far.
    #[inline]
    pub const fn full_redraws(&self) -> u32 { self.full_redraws }

    /// Draw everything pending for `view`.
    ///
    /// While suspended the pending regions are dropped instead of drawn.
    pub fn flush<P: PanelDisplay>(
        &mut self,
        display: &mut P,
        view: &PanelView,
    ) {
        let pending = self.take();
        if pending.is_empty() || !view.mode.is_active() {
            return;
        }

        if pending.full {
            display.draw_full_layout(view);
            self.full_redraws = self.full_redraws.wrapping_add(1);
            debug!("Refresh: full layout");
            return;
        }

        for button in ButtonId::ALL {
            if pending.buttons[button.index()] {
                display.draw_button(button, view.button_on(button));
            }
        }
        for slot in StatusSlot::ALL {
            if pending.status[slot.index()] {
                display.draw_status_text(slot, &view.status_text(slot));
            }
        }
    }
}

impl Default for RefreshState {
    fn default() -> Self { Self::new() }
}
