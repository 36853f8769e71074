//! Touch configuration.

use crate::touch::calibration::Calibration;

/// Default mapping used when no calibration record is stored.
///
/// Maps the usable 12-bit XPT2046 range (~200..3800) linearly onto 240x320 pixels.
pub const DEFAULT_CALIBRATION: Calibration = Calibration {
    alpha_x: 240.0 / 3600.0,
    beta_x: 0.0,
    delta_x: -200.0 * 240.0 / 3600.0,
    alpha_y: 0.0,
    beta_y: 320.0 / 3600.0,
    delta_y: -200.0 * 320.0 / 3600.0,
};

/// Minimum pressure (`z1 + 4095 - z2`) for a sample to count as a touch.
pub const PRESSURE_THRESHOLD: u16 = 400;

/// Size of the persisted calibration record in bytes.
pub const CALIBRATION_RECORD_LEN: usize = 32;

/// Flash erase sector size. The record lives at the start of the last sector.
pub const FLASH_SECTOR_SIZE: u32 = 4096;
