//! XPT2046 touch controller wiring on SPI1.
//!
//! Pin mapping:
//! - CLK: GPIO10 (SPI1 CLK)
//! - MOSI: GPIO11 (SPI1 TX)
//! - MISO: GPIO12 (SPI1 RX)
//! - CS: GPIO13

use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI1;
use embassy_rp::spi::{Blocking, Config as SpiConfig, Spi};
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use relay_panel::touch::Xpt2046;

/// Touch driver type for the panel.
pub type PanelTouch<'d> = Xpt2046<ExclusiveDevice<Spi<'d, SPI1, Blocking>, Output<'d>, NoDelay>>;

/// SPI configuration for the XPT2046 (2 MHz maximum clock).
pub fn touch_spi_config() -> SpiConfig {
    let mut config = SpiConfig::default();
    config.frequency = 2_000_000;
    config
}
