//! Display driver for a 2.8" ILI9341 SPI panel (240x320, portrait).
//!
//! Pin mapping:
//! - CLK: GPIO18 (SPI0 CLK)
//! - MOSI: GPIO19 (SPI0 TX)
//! - CS: GPIO17
//! - DC: GPIO20
//! - Reset: GPIO21
//! - Backlight: GPIO22 (driven by the power controller, not by this module)

use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Config as SpiConfig, Spi};
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use mipidsi::Builder;
use mipidsi::interface::SpiInterface;
use mipidsi::models::ILI9341Rgb565;
use mipidsi::options::ColorOrder;
use relay_panel::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use relay_panel::lcd::MipiPanel;
use static_cell::StaticCell;

/// Pixel batch buffer for the SPI interface (256 RGB565 pixels).
const PIXEL_BUFFER_LEN: usize = 512;

/// Display bus: SPI0 with chip select, plus the DC pin.
pub type PanelBus<'d> = SpiInterface<'static, ExclusiveDevice<Spi<'d, SPI0, Blocking>, Output<'d>, NoDelay>, Output<'d>>;

/// The panel as both a drawing target and a sleep/wake command channel.
pub type Lcd<'d> = MipiPanel<PanelBus<'d>, ILI9341Rgb565, Output<'d>>;

/// Initialize the panel.
///
/// Returns the display awake and ready for drawing. The backlight stays off until
/// the power controller switches it on.
pub fn init_display<'d>(
    spi: Spi<'d, SPI0, Blocking>,
    cs: Output<'d>,
    dc: Output<'d>,
    rst: Output<'d>,
) -> Lcd<'d> {
    static PIXEL_BUFFER: StaticCell<[u8; PIXEL_BUFFER_LEN]> = StaticCell::new();
    let buffer = PIXEL_BUFFER.init([0; PIXEL_BUFFER_LEN]);

    // Create SPI device with chip select
    let spi_device = ExclusiveDevice::new_no_delay(spi, cs).unwrap();

    let di = SpiInterface::new(spi_device, dc, buffer);

    let driver = Builder::new(ILI9341Rgb565, di)
        .reset_pin(rst)
        .display_size(SCREEN_WIDTH as u16, SCREEN_HEIGHT as u16)
        .color_order(ColorOrder::Bgr)
        .init(&mut embassy_time::Delay)
        .unwrap();

    MipiPanel::new(driver)
}

/// SPI configuration for the ILI9341.
///
/// The ILI9341 write cycle is specified down to 66 ns (~15 MHz), but the common
/// modules run reliably at 40 MHz.
pub fn display_spi_config() -> SpiConfig {
    let mut config = SpiConfig::default();
    config.frequency = 40_000_000;
    config
}
