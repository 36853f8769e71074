//! `clk_sys` rate switching for the two power modes.
//!
//! Register addresses from the RP2350 datasheet (CLOCKS block):
//! - CLOCKS_BASE: 0x40010000
//! - CLK_SYS_DIV: +0x40, integer part in bits [31:16], fraction in [15:0]
//!
//! Only the divider changes; `clk_sys` keeps running from the PLL, so the switch
//! takes effect on the next clock edge without glitching.

use relay_panel::config::power::{LOW_POWER_DIVIDER, LOW_POWER_HZ, PERFORMANCE_HZ};
use relay_panel::power::{ClockControl, CpuClock};

const CLK_SYS_DIV: *mut u32 = (0x4001_0000 + 0x40) as *mut u32;

/// Divider value for an integer division with no fractional part.
const fn div_value(int: u32) -> u32 { int << 16 }

/// Direct `clk_sys` divider control.
pub struct SysClock {
    current: CpuClock,
}

impl SysClock {
    /// Take over the system clock, which `embassy_rp::init` left at full rate.
    pub const fn new() -> Self {
        Self {
            current: CpuClock::Performance,
        }
    }
}

impl ClockControl for SysClock {
    fn set_cpu_clock(
        &mut self,
        clock: CpuClock,
    ) {
        if clock == self.current {
            return;
        }
        let (divider, hz) = match clock {
            CpuClock::Performance => (1, PERFORMANCE_HZ),
            CpuClock::LowPower => (LOW_POWER_DIVIDER, LOW_POWER_HZ),
        };

        // SAFETY: Single writer; the loop owns the only SysClock
        unsafe {
            core::ptr::write_volatile(CLK_SYS_DIV, div_value(divider));
        }
        self.current = clock;
        defmt::info!("clk_sys: {} MHz", hz / 1_000_000);
    }
}
