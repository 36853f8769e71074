//! Power mode state machine.
//!
//! The panel is either [`PowerMode::Active`] (full CPU clock, backlight on, panel
//! controller awake) or [`PowerMode::Suspended`] (reduced CPU clock, backlight off,
//! panel controller asleep). Only [`PowerController`] changes the mode.
//!
//! # Hardware Ordering
//!
//! The order of hardware operations is a timing requirement of the panel and must
//! not be rearranged:
//!
//! | Transition | Sequence |
//! |------------|----------|
//! | Wake | restore clock → wake panel → wait settle → backlight on |
//! | Sleep | backlight off → sleep panel → reduce clock |
//!
//! The clock stays high enough in [`CpuClock::LowPower`] for the touch and panel
//! buses to keep working, so the wake touch can still be read while suspended.
//!
//! All hardware writes are fire-and-forget: pin errors are discarded and nothing is
//! retried.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::PANEL_SETTLE_MS;
use crate::refresh::RefreshState;

// =============================================================================
// Power Mode
// =============================================================================

/// Current power state of the panel.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum PowerMode {
    /// Full clock, backlight on, panel awake. All buttons reachable.
    #[default]
    Active,
    /// Reduced clock, backlight off, panel asleep. Only the wake region is reachable.
    Suspended,
}

impl PowerMode {
    /// Check if the panel is active.
    #[inline]
    pub const fn is_active(self) -> bool { matches!(self, Self::Active) }

    /// Short label for logs and the header.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Suspended => "SUSPENDED",
        }
    }
}

// =============================================================================
// Hardware Capabilities
// =============================================================================

/// Discrete CPU clock rates supported by the clock controller.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum CpuClock {
    /// Full rate used while the panel is active.
    Performance,
    /// Reduced rate used while suspended. Must keep SPI/I2C timing stable.
    LowPower,
}

/// CPU clock frequency control.
pub trait ClockControl {
    /// Switch the CPU to one of the supported rates.
    fn set_cpu_clock(
        &mut self,
        clock: CpuClock,
    );
}

/// Display controller command channel (MIPI DCS `SLPIN` / `SLPOUT`).
pub trait PanelCommands {
    /// Put the panel controller to sleep.
    fn sleep_panel(&mut self);

    /// Wake the panel controller. The caller waits the settle delay afterwards.
    fn wake_panel(&mut self);
}

/// Electrical polarity of the backlight enable line.
///
/// Depends on the transistor topology of the board, so it is configured per target
/// instead of being baked into the on/off operations.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Polarity {
    /// High level lights the backlight.
    ActiveHigh,
    /// Low level lights the backlight (PNP / P-MOSFET high-side switch).
    ActiveLow,
}

/// Backlight enable line with named on/off operations.
pub struct Backlight<P> {
    pin: P,
    polarity: Polarity,
    lit: bool,
}

impl<P: OutputPin> Backlight<P> {
    /// Wrap an output pin. The pin level is not touched until `on()`/`off()`.
    pub const fn new(
        pin: P,
        polarity: Polarity,
    ) -> Self {
        Self {
            pin,
            polarity,
            lit: false,
        }
    }

    /// Light the backlight.
    pub fn on(&mut self) {
        match self.polarity {
            Polarity::ActiveHigh => self.pin.set_high().ok(),
            Polarity::ActiveLow => self.pin.set_low().ok(),
        };
        self.lit = true;
    }

    /// Switch the backlight off.
    pub fn off(&mut self) {
        match self.polarity {
            Polarity::ActiveHigh => self.pin.set_low().ok(),
            Polarity::ActiveLow => self.pin.set_high().ok(),
        };
        self.lit = false;
    }

    /// Whether the backlight was last switched on.
    #[inline]
    pub const fn is_on(&self) -> bool { self.lit }
}

// =============================================================================
// Power Controller
// =============================================================================

/// Owns the power mode and the clock/backlight/delay capabilities.
///
/// The panel command channel is borrowed per transition because the same display
/// object is also the drawing target.
pub struct PowerController<C, B, D> {
    clock: C,
    backlight: Backlight<B>,
    delay: D,
    mode: PowerMode,
}

impl<C, B, D> PowerController<C, B, D>
where
    C: ClockControl,
    B: OutputPin,
    D: DelayNs,
{
    /// Create the controller in [`PowerMode::Active`] and drive the hardware to match.
    pub fn new(
        mut clock: C,
        mut backlight: Backlight<B>,
        delay: D,
    ) -> Self {
        clock.set_cpu_clock(CpuClock::Performance);
        backlight.on();
        Self {
            clock,
            backlight,
            delay,
            mode: PowerMode::Active,
        }
    }

    /// Current power mode.
    #[inline]
    pub const fn mode(&self) -> PowerMode { self.mode }

    /// Whether the backlight is currently lit.
    #[inline]
    pub const fn backlight_on(&self) -> bool { self.backlight.is_on() }

    /// Leave [`PowerMode::Suspended`].
    ///
    /// Restores the clock, wakes the panel, waits [`PANEL_SETTLE_MS`], lights the
    /// backlight and requests a full redraw. Returns `false` (and does nothing) if
    /// already active.
    pub fn request_wake<P: PanelCommands>(
        &mut self,
        panel: &mut P,
        refresh: &mut RefreshState,
    ) -> bool {
        if self.mode.is_active() {
            return false;
        }

        self.clock.set_cpu_clock(CpuClock::Performance);
        panel.wake_panel();
        self.delay.delay_ms(PANEL_SETTLE_MS);
        self.backlight.on();
        self.mode = PowerMode::Active;

        // The panel may have lost its framebuffer while asleep
        refresh.request_full();

        info!("Power: wake -> {}", self.mode.label());
        true
    }

    /// Enter [`PowerMode::Suspended`].
    ///
    /// Switches the backlight off, sleeps the panel and reduces the clock. Pending
    /// partial redraws are dropped since nothing is visible. Returns `false` (and does
    /// nothing) if already suspended.
    pub fn request_sleep<P: PanelCommands>(
        &mut self,
        panel: &mut P,
        refresh: &mut RefreshState,
    ) -> bool {
        if !self.mode.is_active() {
            return false;
        }

        self.backlight.off();
        panel.sleep_panel();
        self.clock.set_cpu_clock(CpuClock::LowPower);
        self.mode = PowerMode::Suspended;

        refresh.discard();

        info!("Power: sleep -> {}", self.mode.label());
        true
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use core::convert::Infallible;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::vec::Vec;

    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    enum Op {
        Clock(CpuClock),
        PinHigh,
        PinLow,
        PanelSleep,
        PanelWake,
        DelayMs(u32),
    }

    type Journal = Rc<RefCell<Vec<Op>>>;

    struct FakeClock(Journal);
    impl ClockControl for FakeClock {
        fn set_cpu_clock(
            &mut self,
            clock: CpuClock,
        ) {
            self.0.borrow_mut().push(Op::Clock(clock));
        }
    }

    struct FakePin(Journal);
    impl embedded_hal::digital::ErrorType for FakePin {
        type Error = Infallible;
    }
    impl OutputPin for FakePin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.0.borrow_mut().push(Op::PinLow);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.0.borrow_mut().push(Op::PinHigh);
            Ok(())
        }
    }

    struct FakeDelay(Journal);
    impl DelayNs for FakeDelay {
        fn delay_ns(
            &mut self,
            _ns: u32,
        ) {
        }

        fn delay_ms(
            &mut self,
            ms: u32,
        ) {
            self.0.borrow_mut().push(Op::DelayMs(ms));
        }
    }

    struct FakePanel(Journal);
    impl PanelCommands for FakePanel {
        fn sleep_panel(&mut self) { self.0.borrow_mut().push(Op::PanelSleep); }

        fn wake_panel(&mut self) { self.0.borrow_mut().push(Op::PanelWake); }
    }

    fn setup(polarity: Polarity) -> (PowerController<FakeClock, FakePin, FakeDelay>, FakePanel, Journal) {
        let journal: Journal = Rc::new(RefCell::new(Vec::new()));
        let power = PowerController::new(
            FakeClock(journal.clone()),
            Backlight::new(FakePin(journal.clone()), polarity),
            FakeDelay(journal.clone()),
        );
        let panel = FakePanel(journal.clone());
        journal.borrow_mut().clear();
        (power, panel, journal)
    }

    #[test]
    fn test_starts_active_with_backlight_on() {
        let (power, _, _) = setup(Polarity::ActiveHigh);
        assert_eq!(power.mode(), PowerMode::Active);
        assert!(power.backlight_on());
    }

    #[test]
    fn test_sleep_sequence_order() {
        let (mut power, mut panel, journal) = setup(Polarity::ActiveHigh);
        let mut refresh = RefreshState::new();

        assert!(power.request_sleep(&mut panel, &mut refresh));
        assert_eq!(power.mode(), PowerMode::Suspended);
        assert_eq!(
            *journal.borrow(),
            [Op::PinLow, Op::PanelSleep, Op::Clock(CpuClock::LowPower)]
        );
    }

    #[test]
    fn test_wake_sequence_order() {
        let (mut power, mut panel, journal) = setup(Polarity::ActiveHigh);
        let mut refresh = RefreshState::new();
        power.request_sleep(&mut panel, &mut refresh);
        journal.borrow_mut().clear();

        assert!(power.request_wake(&mut panel, &mut refresh));
        assert_eq!(power.mode(), PowerMode::Active);
        assert_eq!(
            *journal.borrow(),
            [
                Op::Clock(CpuClock::Performance),
                Op::PanelWake,
                Op::DelayMs(PANEL_SETTLE_MS),
                Op::PinHigh,
            ]
        );
    }

    #[test]
    fn test_wake_requests_full_redraw() {
        let (mut power, mut panel, _) = setup(Polarity::ActiveHigh);
        let mut refresh = RefreshState::new();
        refresh.take();

        power.request_sleep(&mut panel, &mut refresh);
        assert!(!refresh.pending().full);

        power.request_wake(&mut panel, &mut refresh);
        assert!(refresh.pending().full);
    }

    #[test]
    fn test_sleep_while_suspended_is_noop() {
        let (mut power, mut panel, journal) = setup(Polarity::ActiveHigh);
        let mut refresh = RefreshState::new();
        power.request_sleep(&mut panel, &mut refresh);
        journal.borrow_mut().clear();

        assert!(!power.request_sleep(&mut panel, &mut refresh));
        assert_eq!(power.mode(), PowerMode::Suspended);
        assert!(journal.borrow().is_empty());
    }

    #[test]
    fn test_wake_while_active_is_noop() {
        let (mut power, mut panel, journal) = setup(Polarity::ActiveHigh);
        let mut refresh = RefreshState::new();
        refresh.take();

        assert!(!power.request_wake(&mut panel, &mut refresh));
        assert_eq!(power.mode(), PowerMode::Active);
        assert!(journal.borrow().is_empty());
        assert!(!refresh.pending().full);
    }

    #[test]
    fn test_transitions_alternate() {
        let (mut power, mut panel, _) = setup(Polarity::ActiveHigh);
        let mut refresh = RefreshState::new();
        for _ in 0..3 {
            assert!(power.request_sleep(&mut panel, &mut refresh));
            assert!(!power.request_sleep(&mut panel, &mut refresh));
            assert!(power.request_wake(&mut panel, &mut refresh));
            assert!(!power.request_wake(&mut panel, &mut refresh));
        }
    }

    #[test]
    fn test_active_low_backlight_levels() {
        let (mut power, mut panel, journal) = setup(Polarity::ActiveLow);
        let mut refresh = RefreshState::new();

        power.request_sleep(&mut panel, &mut refresh);
        assert_eq!(journal.borrow()[0], Op::PinHigh);
        assert!(!power.backlight_on());

        journal.borrow_mut().clear();
        power.request_wake(&mut panel, &mut refresh);
        assert_eq!(journal.borrow()[3], Op::PinLow);
        assert!(power.backlight_on());
    }

    #[test]
    fn test_power_mode_default() {
        assert_eq!(PowerMode::default(), PowerMode::Active);
        assert!(PowerMode::Active.is_active());
        assert!(!PowerMode::Suspended.is_active());
    }
}
