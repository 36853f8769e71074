//! Temperature sensor surface and reading formatting.
//!
//! Sensors are sampled by the periodic sampling task. A reading of
//! [`DISCONNECTED_C`] means the probe did not answer; it is shown as a placeholder
//! and never retried before the next sampling cycle.

use core::fmt::Write;

use heapless::String;

/// Number of temperature sensors on the panel.
pub const SENSOR_COUNT: usize = 2;

/// Sentinel reported by a sensor that is not connected.
pub const DISCONNECTED_C: f32 = -127.0;

/// Placeholder text for a disconnected sensor.
pub const PLACEHOLDER: &str = "--.- C";

/// Latest reading per sensor index, in degrees Celsius.
pub type Readings = [f32; SENSOR_COUNT];

/// Readings before the first sampling cycle.
pub const NO_READINGS: Readings = [DISCONNECTED_C; SENSOR_COUNT];

/// Multi-probe temperature source.
///
/// Follows the conversion-then-read pattern of 1-Wire bus sensors: one request
/// starts a conversion on every probe, then each index is read separately.
pub trait TemperatureSensor {
    /// Start a conversion on all probes.
    fn request_temperatures(&mut self);

    /// Read one probe in degrees Celsius, or [`DISCONNECTED_C`].
    fn read_celsius(
        &mut self,
        index: usize,
    ) -> f32;
}

/// Run one full sampling cycle.
pub fn sample_all<S: TemperatureSensor>(sensor: &mut S) -> Readings {
    sensor.request_temperatures();
    let mut readings = NO_READINGS;
    for (index, reading) in readings.iter_mut().enumerate() {
        *reading = sensor.read_celsius(index);
    }
    readings
}

/// Check if a reading is the disconnected sentinel (or not a finite number at all).
#[inline]
pub fn is_disconnected(celsius: f32) -> bool { !celsius.is_finite() || celsius <= DISCONNECTED_C }

/// Format a reading for display, e.g. `"23.5 C"`.
///
/// Readings too wide for the status text show the placeholder instead of a cut-off
/// number.
pub fn format_reading(celsius: f32) -> String<12> {
    let mut s: String<12> = String::new();
    if is_disconnected(celsius) || write!(s, "{celsius:.1} C").is_err() {
        s.clear();
        let _ = s.push_str(PLACEHOLDER);
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probes {
        values: Readings,
        requests: u32,
    }

    impl TemperatureSensor for Probes {
        fn request_temperatures(&mut self) { self.requests += 1; }

        fn read_celsius(
            &mut self,
            index: usize,
        ) -> f32 {
            self.values[index]
        }
    }

    #[test]
    fn test_sample_all_requests_once() {
        let mut probes = Probes {
            values: [21.5, DISCONNECTED_C],
            requests: 0,
        };
        assert_eq!(sample_all(&mut probes), [21.5, DISCONNECTED_C]);
        assert_eq!(probes.requests, 1);
    }

    #[test]
    fn test_format_connected() {
        assert_eq!(format_reading(23.46).as_str(), "23.5 C");
        assert_eq!(format_reading(-5.0).as_str(), "-5.0 C");
        assert_eq!(format_reading(104.0).as_str(), "104.0 C");
    }

    #[test]
    fn test_format_disconnected() {
        assert_eq!(format_reading(DISCONNECTED_C).as_str(), PLACEHOLDER);
        assert_eq!(format_reading(f32::NAN).as_str(), PLACEHOLDER);
    }

    #[test]
    fn test_format_out_of_range_shows_placeholder() {
        assert_eq!(format_reading(1.0e9).as_str(), PLACEHOLDER);
        assert_eq!(format_reading(f32::INFINITY).as_str(), PLACEHOLDER);
        // Widest value that still fits
        assert_eq!(format_reading(-99999.0).as_str(), "-99999.0 C");
    }

    #[test]
    fn test_initial_readings_are_disconnected() {
        assert!(NO_READINGS.iter().copied().all(is_disconnected));
    }
}
