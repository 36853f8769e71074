//! Application configuration.
//!
//! - `layout`: Display dimensions, card positions and button rectangles
//! - `power`: CPU clock rates for the two power modes
//! - `timing`: Periodic task intervals and hardware settle times
//! - `touch`: Default touch calibration, pressure gating and record location

pub mod layout;
pub mod power;
pub mod timing;
pub mod touch;

// Re-export the constants most modules need at config level for convenience
pub use layout::{
    BUTTON_BAR_Y,
    HEADER_HEIGHT,
    RELAY_LINE,
    SCREEN_HEIGHT,
    SCREEN_WIDTH,
    SLEEP_BUTTON,
    SYSTEM_BUTTON,
    TEMP_CARDS,
};
pub use timing::{
    LOOP_IDLE_MS,
    PANEL_SETTLE_MS,
    RELAY_CYCLE_INTERVAL_MS,
    SAMPLING_INTERVAL_MS,
};
