//! CPU clock configuration.
//!
//! The RP2350 `clk_sys` runs from the 150 MHz PLL. Low power mode divides it down
//! with the integer divider instead of reprogramming the PLL, so the switch is a
//! single register write. The timer runs from `clk_ref` and keeps counting
//! milliseconds at the same rate. SPI buses clocked from `clk_sys` slow down by the
//! same factor; both the panel and the touch controller accept the lower rate.

/// `clk_sys` frequency while the panel is active.
pub const PERFORMANCE_HZ: u32 = 150_000_000;

/// `clk_sys` frequency while suspended.
pub const LOW_POWER_HZ: u32 = 50_000_000;

/// Integer `clk_sys` divider that yields [`LOW_POWER_HZ`] from [`PERFORMANCE_HZ`].
pub const LOW_POWER_DIVIDER: u32 = PERFORMANCE_HZ / LOW_POWER_HZ;
