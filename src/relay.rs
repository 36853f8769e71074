//! Two-relay output bank.
//!
//! Every relay-cycle fire flips which relay is selected. The phase always advances,
//! but the coils are only energized while the system toggle is enabled, so switching
//! the system off drops both relays without losing the cycle position.

use embedded_hal::digital::OutputPin;

/// Two relay outputs driven in alternation.
pub struct RelayBank<A, B> {
    relay_a: A,
    relay_b: B,
    /// `false` selects relay A, `true` selects relay B.
    phase: bool,
    enabled: bool,
}

impl<A: OutputPin, B: OutputPin> RelayBank<A, B> {
    /// Create the bank with both relays released.
    pub fn new(
        relay_a: A,
        relay_b: B,
    ) -> Self {
        let mut bank = Self {
            relay_a,
            relay_b,
            phase: false,
            enabled: false,
        };
        bank.apply();
        bank
    }

    /// Advance the phase and drive the outputs.
    pub fn cycle(&mut self) {
        self.phase = !self.phase;
        self.apply();
    }

    /// Gate the outputs on the system toggle.
    pub fn set_enabled(
        &mut self,
        enabled: bool,
    ) {
        self.enabled = enabled;
        self.apply();
    }

    /// Energized state of `[relay A, relay B]`.
    #[inline]
    pub const fn outputs(&self) -> [bool; 2] { [self.enabled && !self.phase, self.enabled && self.phase] }

    /// Current phase (0 selects relay A, 1 selects relay B).
    #[inline]
    pub const fn phase(&self) -> u8 { self.phase as u8 }

    fn apply(&mut self) {
        let [a, b] = self.outputs();
        // Break before make
        if !a {
            self.relay_a.set_low().ok();
        }
        if !b {
            self.relay_b.set_low().ok();
        }
        if a {
            self.relay_a.set_high().ok();
        }
        if b {
            self.relay_b.set_high().ok();
        }
    }
}
