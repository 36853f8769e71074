//! XPT2046 resistive touch controller over an `embedded-hal` SPI device.
//!
//! Each poll reads pressure first and only reads the position when the panel is
//! pressed, so an idle poll costs two conversions. Any bus error ends the poll with
//! "no touch": a dead bus must never look like a finger resting on the panel.

use embedded_hal::spi::SpiDevice;

use crate::config::touch::PRESSURE_THRESHOLD;
use crate::touch::{Calibration, TouchInput, TouchSample};

// Control bytes: start bit, channel, 12-bit mode, differential reference, PENIRQ on
const READ_X: u8 = 0xD0;
const READ_Y: u8 = 0x90;
const READ_Z1: u8 = 0xB0;
const READ_Z2: u8 = 0xC0;

/// Full-scale 12-bit conversion.
const ADC_MAX: u16 = 4095;

/// XPT2046 driver producing calibrated, pressure-gated samples.
pub struct Xpt2046<SPI> {
    spi: SPI,
    calibration: Calibration,
}

impl<SPI: SpiDevice> Xpt2046<SPI> {
    pub const fn new(
        spi: SPI,
        calibration: Calibration,
    ) -> Self {
        Self { spi, calibration }
    }

    /// One 12-bit conversion.
    fn read_channel(
        &mut self,
        command: u8,
    ) -> Result<u16, SPI::Error> {
        let mut rx = [0u8; 3];
        self.spi.transfer(&mut rx, &[command, 0, 0])?;
        Ok(((u16::from(rx[1]) << 8) | u16::from(rx[2])) >> 3)
    }

    /// Pressure estimate: grows with touch force, 0 when released.
    fn pressure(&mut self) -> Result<u16, SPI::Error> {
        let z1 = self.read_channel(READ_Z1)?;
        let z2 = self.read_channel(READ_Z2)?;
        Ok((z1 + ADC_MAX).saturating_sub(z2))
    }

    /// Read one sample, `Ok(None)` while released.
    pub fn read(&mut self) -> Result<Option<TouchSample>, SPI::Error> {
        let pressure = self.pressure()?;
        if pressure < PRESSURE_THRESHOLD {
            return Ok(None);
        }

        let raw_x = self.read_channel(READ_X)?;
        let raw_y = self.read_channel(READ_Y)?;
        let point = self.calibration.map(raw_x, raw_y);
        Ok(Some(TouchSample::new(point.x, point.y, pressure)))
    }
}

impl<SPI: SpiDevice> TouchInput for Xpt2046<SPI> {
    fn poll(&mut self) -> Option<TouchSample> {
        match self.read() {
            Ok(sample) => sample,
            Err(_) => {
                debug!("Touch: SPI error, treated as released");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use embedded_hal::spi::{ErrorKind, ErrorType, Operation};

    use super::*;
    use crate::config::touch::DEFAULT_CALIBRATION;
    use crate::touch::wait_for_release;

    /// Controller answering each command with a fixed 12-bit value.
    struct FakeBus {
        x: u16,
        y: u16,
        z1: u16,
        z2: u16,
        /// Transfers left before every transfer fails; `None` never fails.
        healthy_transfers: Option<usize>,
    }

    impl FakeBus {
        fn pressed(
            x: u16,
            y: u16,
        ) -> Self {
            Self {
                x,
                y,
                z1: 600,
                z2: 3500,
                healthy_transfers: None,
            }
        }

        fn released() -> Self {
            Self {
                z1: 0,
                z2: 4095,
                ..Self::pressed(0, 0)
            }
        }

        fn failing_after(
            mut self,
            transfers: usize,
        ) -> Self {
            self.healthy_transfers = Some(transfers);
            self
        }

        fn value(
            &self,
            command: u8,
        ) -> u16 {
            match command {
                READ_X => self.x,
                READ_Y => self.y,
                READ_Z1 => self.z1,
                READ_Z2 => self.z2,
                _ => 0,
            }
        }
    }

    impl ErrorType for FakeBus {
        type Error = ErrorKind;
    }

    impl SpiDevice for FakeBus {
        fn transaction(
            &mut self,
            operations: &mut [Operation<'_, u8>],
        ) -> Result<(), Self::Error> {
            if let Some(left) = self.healthy_transfers.as_mut() {
                if *left == 0 {
                    return Err(ErrorKind::Other);
                }
                *left -= 1;
            }
            for op in operations {
                if let Operation::Transfer(read, write) = op {
                    // Result is clocked out one byte after the command, MSB-aligned
                    let word = self.value(write[0]) << 3;
                    read[1] = (word >> 8) as u8;
                    read[2] = word as u8;
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_released_panel_reads_none() {
        let mut touch = Xpt2046::new(FakeBus::released(), DEFAULT_CALIBRATION);
        assert_eq!(touch.read(), Ok(None));
        assert_eq!(touch.poll(), None);
    }

    #[test]
    fn test_pressed_panel_maps_through_calibration() {
        let mut touch = Xpt2046::new(FakeBus::pressed(2000, 3200), DEFAULT_CALIBRATION);
        let expected = DEFAULT_CALIBRATION.map(2000, 3200);

        let sample = touch.poll().unwrap();
        assert_eq!(sample.point(), expected);
        assert_eq!(sample.pressure, 600 + 4095 - 3500);
    }

    #[test]
    fn test_bus_error_reads_as_released() {
        // Z1 and Z2 both fail
        let mut touch = Xpt2046::new(FakeBus::pressed(2000, 3200).failing_after(0), DEFAULT_CALIBRATION);
        assert_eq!(touch.read(), Err(ErrorKind::Other));
        assert_eq!(touch.poll(), None);

        // Pressure reads fine, position read fails
        let mut touch = Xpt2046::new(FakeBus::pressed(2000, 3200).failing_after(2), DEFAULT_CALIBRATION);
        assert_eq!(touch.poll(), None);
    }

    #[test]
    fn test_release_wait_ends_on_dead_bus() {
        let mut touch = Xpt2046::new(FakeBus::pressed(2000, 3200).failing_after(12), DEFAULT_CALIBRATION);
        // Three full pressed polls of four transfers each, then the bus dies
        assert_eq!(wait_for_release(&mut touch), 3);
    }
}
