//! Touch Relay Panel Firmware for Raspberry Pi Pico 2 (RP2350)
//!
//! Drives a 2.8" ILI9341 panel with an XPT2046 touch controller, two relays and two
//! temperature probes. All panel logic lives in the `relay-panel` library; this
//! binary wires the RP2350 peripherals into it and runs the control loop.
//!
//! # Pins
//!
//! | Function | GPIO |
//! |----------|------|
//! | Display SPI0 CLK / MOSI | 18 / 19 |
//! | Display CS / DC / RST | 17 / 20 / 21 |
//! | Backlight enable | 22 |
//! | Touch SPI1 CLK / MOSI / MISO / CS | 10 / 11 / 12 / 13 |
//! | Relay A / Relay B | 14 / 15 |
//! | NTC thermistor (ADC0) | 26 |

#![no_std]
#![no_main]

mod clock;
mod display;
mod sensors;
mod touch;

use defmt::info;
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc, Channel};
use embassy_rp::flash::{Blocking, Flash};
use embassy_rp::gpio::{Level, Output, Pull};
use embassy_rp::spi::Spi;
use embassy_time::{Delay, Instant, Timer};
use embedded_hal_bus::spi::ExclusiveDevice;
use relay_panel::config::LOOP_IDLE_MS;
use relay_panel::graphics::GraphicsPanel;
use relay_panel::power::{Backlight, Polarity};
use relay_panel::touch::{Xpt2046, calibration};
use relay_panel::{PanelController, PanelHardware};
use {defmt_rtt as _, panic_probe as _};

use crate::clock::SysClock;
use crate::display::{display_spi_config, init_display};
use crate::sensors::AdcProbes;
use crate::touch::{PanelTouch, touch_spi_config};

/// Pico 2 on-board flash size.
const FLASH_SIZE: usize = 4 * 1024 * 1024;

#[cfg(not(feature = "backlight-active-low"))]
const BACKLIGHT_POLARITY: Polarity = Polarity::ActiveHigh;
#[cfg(feature = "backlight-active-low")]
const BACKLIGHT_POLARITY: Polarity = Polarity::ActiveLow;

/// Backlight pin level that keeps the panel dark until the controller takes over.
const BACKLIGHT_OFF: Level = match BACKLIGHT_POLARITY {
    Polarity::ActiveHigh => Level::Low,
    Polarity::ActiveLow => Level::High,
};

// Program metadata for `picotool info`
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"relay-panel"),
    embassy_rp::binary_info::rp_program_description!(c"Two-relay touchscreen control panel"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Relay panel starting...");

    let p = embassy_rp::init(Default::default());

    // Outputs start released / dark
    let backlight = Output::new(p.PIN_22, BACKLIGHT_OFF);
    let relay_a = Output::new(p.PIN_14, Level::Low);
    let relay_b = Output::new(p.PIN_15, Level::Low);

    // Display (TX-only SPI, the panel is never read back)
    let cs = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_20, Level::Low);
    let rst = Output::new(p.PIN_21, Level::High);
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, display_spi_config());
    let lcd = init_display(spi, cs, dc, rst);
    info!("Display initialized!");

    // Calibration record in the last flash sector
    let mut flash = Flash::<_, Blocking, FLASH_SIZE>::new_blocking(p.FLASH);
    let (touch_calibration, calibration_fallback) = calibration::load_or_default(&mut flash);

    // Touch controller
    let touch_cs = Output::new(p.PIN_13, Level::High);
    let touch_spi = Spi::new_blocking(p.SPI1, p.PIN_10, p.PIN_11, p.PIN_12, touch_spi_config());
    let touch_device = ExclusiveDevice::new_no_delay(touch_spi, touch_cs).unwrap();
    let touch: PanelTouch<'_> = Xpt2046::new(touch_device, touch_calibration);

    // Temperature probes
    let adc = Adc::new_blocking(p.ADC, adc::Config::default());
    let die = Channel::new_temp_sensor(p.ADC_TEMP_SENSOR);
    let ntc = Channel::new_pin(p.PIN_26, Pull::None);
    let probes = AdcProbes::new(adc, die, ntc);

    let hw = PanelHardware {
        clock: SysClock::new(),
        backlight: Backlight::new(backlight, BACKLIGHT_POLARITY),
        delay: Delay,
        panel: GraphicsPanel::new(lcd),
        touch,
        sensors: probes,
        relay_a,
        relay_b,
    };
    let boot_ms = Instant::now().as_millis();
    let mut panel = PanelController::new(hw, boot_ms);
    if let Some(reason) = calibration_fallback {
        panel.record_calibration_fallback(boot_ms, reason);
    }

    info!("Starting control loop...");

    loop {
        panel.tick(Instant::now().as_millis());
        Timer::after_millis(LOOP_IDLE_MS).await;
    }
}
