//! MIPI DCS panel adapter.
//!
//! Wraps a `mipidsi` display so it can be both the drawing target behind
//! [`GraphicsPanel`](crate::graphics::GraphicsPanel) and the sleep/wake command
//! channel of the power controller.
//!
//! Sleep and wake send the bare DCS opcodes. `mipidsi`'s own `sleep`/`wake` block
//! for 120 ms each through a caller-supplied delay; here the power controller
//! owns the settle wait after SLPOUT, and nothing is sent to the panel after SLPIN
//! until the next wake.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_hal::digital::OutputPin;
use mipidsi::dcs::{DcsCommand, EnterSleepMode, ExitSleepMode, InterfaceExt};
use mipidsi::interface::{Interface, InterfacePixelFormat};
use mipidsi::models::Model;
use mipidsi::Display;

use crate::power::PanelCommands;

/// A `mipidsi` display usable as [`PanelCommands`] and `DrawTarget`.
pub struct MipiPanel<DI, M, RST>
where
    DI: Interface,
    M: Model,
    M::ColorFormat: InterfacePixelFormat<DI::Word>,
    RST: OutputPin,
{
    driver: Display<DI, M, RST>,
}

impl<DI, M, RST> MipiPanel<DI, M, RST>
where
    DI: Interface,
    M: Model,
    M::ColorFormat: InterfacePixelFormat<DI::Word>,
    RST: OutputPin,
{
    /// Wrap an initialized (awake) display.
    pub const fn new(driver: Display<DI, M, RST>) -> Self { Self { driver } }

    fn send(
        &mut self,
        opcode: impl DcsCommand,
    ) {
        // SAFETY: sleep in/out changes no state the driver caches (MADCTL, window,
        // orientation), and no pixels are written while the panel sleeps
        let dcs = unsafe { self.driver.dcs() };
        if dcs.write_command(opcode).is_err() {
            warn!("Panel: DCS sleep/wake command failed");
        }
    }
}

impl<DI, M, RST> PanelCommands for MipiPanel<DI, M, RST>
where
    DI: Interface,
    M: Model,
    M::ColorFormat: InterfacePixelFormat<DI::Word>,
    RST: OutputPin,
{
    fn sleep_panel(&mut self) { self.send(EnterSleepMode); }

    fn wake_panel(&mut self) { self.send(ExitSleepMode); }
}

impl<DI, M, RST> OriginDimensions for MipiPanel<DI, M, RST>
where
    DI: Interface,
    M: Model,
    M::ColorFormat: InterfacePixelFormat<DI::Word>,
    RST: OutputPin,
{
    fn size(&self) -> Size { self.driver.size() }
}

impl<DI, M, RST> DrawTarget for MipiPanel<DI, M, RST>
where
    DI: Interface,
    M: Model,
    M::ColorFormat: InterfacePixelFormat<DI::Word>,
    RST: OutputPin,
{
    type Color = M::ColorFormat;
    type Error = DI::Error;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.driver.draw_iter(pixels)
    }

    fn fill_contiguous<I>(
        &mut self,
        area: &Rectangle,
        colors: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        self.driver.fill_contiguous(area, colors)
    }

    fn fill_solid(
        &mut self,
        area: &Rectangle,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        self.driver.fill_solid(area, color)
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        self.driver.clear(color)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::convert::Infallible;
    use std::rc::Rc;
    use std::vec::Vec;

    use embedded_graphics::pixelcolor::Rgb565;
    use embedded_hal::delay::DelayNs;
    use mipidsi::models::ILI9341Rgb565;
    use mipidsi::{Builder, NoResetPin};

    use super::*;
    use crate::config::layout::{SCREEN_HEIGHT, SCREEN_WIDTH};

    const SLPIN: u8 = 0x10;
    const SLPOUT: u8 = 0x11;

    /// Interface recording every command opcode.
    struct RecordingBus {
        commands: Rc<RefCell<Vec<u8>>>,
    }

    impl Interface for RecordingBus {
        type Word = u8;
        type Error = Infallible;

        fn send_command(
            &mut self,
            command: u8,
            _args: &[u8],
        ) -> Result<(), Self::Error> {
            self.commands.borrow_mut().push(command);
            Ok(())
        }

        fn send_pixels<const N: usize>(
            &mut self,
            pixels: impl IntoIterator<Item = [Self::Word; N]>,
        ) -> Result<(), Self::Error> {
            pixels.into_iter().for_each(drop);
            Ok(())
        }

        fn send_repeated_pixel<const N: usize>(
            &mut self,
            _pixel: [Self::Word; N],
            _count: u32,
        ) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    /// Init-sequence delay; host tests do not need real time.
    struct InstantDelay;

    impl DelayNs for InstantDelay {
        fn delay_ns(
            &mut self,
            _ns: u32,
        ) {
        }
    }

    type TestPanel = MipiPanel<RecordingBus, ILI9341Rgb565, NoResetPin>;

    fn panel() -> (TestPanel, Rc<RefCell<Vec<u8>>>) {
        let commands = Rc::new(RefCell::new(Vec::new()));
        let bus = RecordingBus {
            commands: commands.clone(),
        };
        let driver = Builder::new(ILI9341Rgb565, bus)
            .display_size(SCREEN_WIDTH as u16, SCREEN_HEIGHT as u16)
            .init(&mut InstantDelay)
            .unwrap();
        commands.borrow_mut().clear();
        (MipiPanel::new(driver), commands)
    }

    #[test]
    fn test_sleep_and_wake_send_bare_opcodes() {
        let (mut panel, commands) = panel();

        panel.sleep_panel();
        panel.wake_panel();

        assert_eq!(commands.borrow().as_slice(), &[SLPIN, SLPOUT]);
    }

    #[test]
    fn test_draws_through_driver() {
        let (mut panel, commands) = panel();
        assert_eq!(panel.size(), Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));

        panel.fill_solid(&Rectangle::new(Point::zero(), Size::new(4, 4)), Rgb565::RED).unwrap();

        // Column/page window then memory write
        assert_eq!(commands.borrow().as_slice(), &[0x2A, 0x2B, 0x2C]);
    }
}
