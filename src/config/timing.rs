//! Timing configuration for the control loop.
//!
//! All values are milliseconds on the monotonic clock handed to
//! [`PanelController::tick`](crate::PanelController::tick).

/// Interval between temperature sampling cycles.
pub const SAMPLING_INTERVAL_MS: u64 = 2_000;

/// Interval between relay alternations.
pub const RELAY_CYCLE_INTERVAL_MS: u64 = 3_000;

/// Wait after sending the panel wake-up opcode before it accepts further commands.
/// Mandated by the MIPI DCS `SLPOUT` timing (ILI9341/ST7789: 120 ms).
pub const PANEL_SETTLE_MS: u32 = 120;

/// Pause between control-loop iterations on the firmware target.
pub const LOOP_IDLE_MS: u64 = 10;
