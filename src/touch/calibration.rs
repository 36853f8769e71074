//! Touch calibration and its persisted flash record.
//!
//! Raw XPT2046 readings are mapped to screen pixels with a 3-point affine transform:
//!
//! ```text
//! x = alpha_x * raw_x + beta_x * raw_y + delta_x
//! y = alpha_y * raw_x + beta_y * raw_y + delta_y
//! ```
//!
//! The coefficients are produced by an external calibration procedure and stored in
//! the last flash sector as a 32-byte record:
//!
//! | Offset | Size | Content |
//! |--------|------|---------|
//! | 0 | 4 | magic `b"TCAL"` |
//! | 4 | 24 | six little-endian `f32`, field order as in [`Calibration`] |
//! | 28 | 4 | little-endian `u32` additive checksum over bytes 4..28 |
//!
//! Loading never fails the boot: [`load_or_default`] falls back to
//! [`DEFAULT_CALIBRATION`] and hands the reason back so it can be recorded in the
//! panel's event log.

use embedded_graphics::prelude::Point;
use embedded_storage::nor_flash::ReadNorFlash;

use crate::config::layout::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::config::touch::{CALIBRATION_RECORD_LEN, DEFAULT_CALIBRATION, FLASH_SECTOR_SIZE};

/// Record magic.
const MAGIC: [u8; 4] = *b"TCAL";

/// Byte range of the coefficients inside the record.
const COEFFS: core::ops::Range<usize> = 4..28;

/// Why a stored calibration could not be used.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum CalibrationError {
    /// No record was ever written (magic absent, typically erased flash).
    Missing,
    /// Record present but checksum mismatch or non-finite coefficient.
    Corrupt,
    /// Flash too small for the record, or the read failed.
    Storage,
}

impl CalibrationError {
    /// Short lowercase name for event log lines.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Corrupt => "corrupt",
            Self::Storage => "storage error",
        }
    }
}

/// Affine raw-to-screen mapping.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Calibration {
    pub alpha_x: f32,
    pub beta_x: f32,
    pub delta_x: f32,
    pub alpha_y: f32,
    pub beta_y: f32,
    pub delta_y: f32,
}

impl Default for Calibration {
    fn default() -> Self { DEFAULT_CALIBRATION }
}

impl Calibration {
    /// Map a raw controller reading to a screen pixel, clamped to the panel.
    pub fn map(
        &self,
        raw_x: u16,
        raw_y: u16,
    ) -> Point {
        let rx = f32::from(raw_x);
        let ry = f32::from(raw_y);
        let x = self.alpha_x * rx + self.beta_x * ry + self.delta_x;
        let y = self.alpha_y * rx + self.beta_y * ry + self.delta_y;
        Point::new(
            x.clamp(0.0, (SCREEN_WIDTH - 1) as f32) as i32,
            y.clamp(0.0, (SCREEN_HEIGHT - 1) as f32) as i32,
        )
    }

    const fn coefficients(&self) -> [f32; 6] {
        [self.alpha_x, self.beta_x, self.delta_x, self.alpha_y, self.beta_y, self.delta_y]
    }

    /// Serialize into the persisted record layout.
    pub fn to_record(&self) -> [u8; CALIBRATION_RECORD_LEN] {
        let mut record = [0u8; CALIBRATION_RECORD_LEN];
        record[..4].copy_from_slice(&MAGIC);
        for (chunk, value) in record[COEFFS].chunks_exact_mut(4).zip(self.coefficients()) {
            chunk.copy_from_slice(&value.to_le_bytes());
        }
        let sum = checksum(&record[COEFFS]);
        record[COEFFS.end..].copy_from_slice(&sum.to_le_bytes());
        record
    }

    /// Parse a persisted record.
    pub fn from_record(record: &[u8; CALIBRATION_RECORD_LEN]) -> Result<Self, CalibrationError> {
        if record[..4] != MAGIC {
            return Err(CalibrationError::Missing);
        }

        let stored = u32::from_le_bytes(word(record, COEFFS.end));
        if stored != checksum(&record[COEFFS]) {
            return Err(CalibrationError::Corrupt);
        }

        let mut c = [0f32; 6];
        for (i, value) in c.iter_mut().enumerate() {
            *value = f32::from_le_bytes(word(record, COEFFS.start + i * 4));
            if !value.is_finite() {
                return Err(CalibrationError::Corrupt);
            }
        }

        Ok(Self {
            alpha_x: c[0],
            beta_x: c[1],
            delta_x: c[2],
            alpha_y: c[3],
            beta_y: c[4],
            delta_y: c[5],
        })
    }
}

fn word(
    record: &[u8; CALIBRATION_RECORD_LEN],
    at: usize,
) -> [u8; 4] {
    [record[at], record[at + 1], record[at + 2], record[at + 3]]
}

fn checksum(bytes: &[u8]) -> u32 { bytes.iter().fold(0u32, |acc, &b| acc.wrapping_add(u32::from(b))) }

/// Offset of the record: start of the last erase sector.
pub fn record_offset(capacity: usize) -> Result<u32, CalibrationError> {
    let capacity = u32::try_from(capacity).map_err(|_| CalibrationError::Storage)?;
    capacity.checked_sub(FLASH_SECTOR_SIZE).ok_or(CalibrationError::Storage)
}

/// Read and validate the stored calibration.
pub fn load<F: ReadNorFlash>(flash: &mut F) -> Result<Calibration, CalibrationError> {
    let offset = record_offset(flash.capacity())?;
    let mut record = [0u8; CALIBRATION_RECORD_LEN];
    flash.read(offset, &mut record).map_err(|_| CalibrationError::Storage)?;
    Calibration::from_record(&record)
}

/// Load the stored calibration, falling back to [`DEFAULT_CALIBRATION`].
///
/// The second value is the reason the stored record was not used, if any.
pub fn load_or_default<F: ReadNorFlash>(flash: &mut F) -> (Calibration, Option<CalibrationError>) {
    match load(flash) {
        Ok(calibration) => {
            info!("Touch: calibration loaded from flash");
            (calibration, None)
        }
        Err(e) => {
            warn!("Touch: using default calibration ({})", e);
            (DEFAULT_CALIBRATION, Some(e))
        }
    }
}
