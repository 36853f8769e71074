//! Temperature probes read through the RP2350 ADC.
//!
//! - Sensor 0: on-die temperature sensor (ADC4)
//! - Sensor 1: 10k NTC thermistor (B = 3950) on GPIO26 / ADC0, with a 10k pull-up
//!   to 3.3 V
//!
//! A thermistor reading pinned to either rail means an open or shorted probe and is
//! reported as disconnected.

use embassy_rp::adc::{Adc, Blocking, Channel};
use relay_panel::sensors::{DISCONNECTED_C, SENSOR_COUNT, TemperatureSensor};

const ADC_FULL_SCALE: f32 = 4096.0;
const ADC_VREF: f32 = 3.3;

/// Raw readings this close to either rail count as a missing probe.
const RAIL_MARGIN: u16 = 16;

const NTC_NOMINAL_OHMS: f32 = 10_000.0;
const NTC_PULLUP_OHMS: f32 = 10_000.0;
const NTC_BETA: f32 = 3950.0;
const NTC_NOMINAL_K: f32 = 298.15;
const KELVIN_OFFSET: f32 = 273.15;

/// Both probes behind one blocking ADC.
pub struct AdcProbes<'d> {
    adc: Adc<'d, Blocking>,
    die: Channel<'d>,
    ntc: Channel<'d>,
    latest: [f32; SENSOR_COUNT],
}

impl<'d> AdcProbes<'d> {
    pub const fn new(
        adc: Adc<'d, Blocking>,
        die: Channel<'d>,
        ntc: Channel<'d>,
    ) -> Self {
        Self {
            adc,
            die,
            ntc,
            latest: [DISCONNECTED_C; SENSOR_COUNT],
        }
    }
}

impl TemperatureSensor for AdcProbes<'_> {
    fn request_temperatures(&mut self) {
        self.latest[0] = self.adc.blocking_read(&mut self.die).map_or(DISCONNECTED_C, die_celsius);
        self.latest[1] = self.adc.blocking_read(&mut self.ntc).map_or(DISCONNECTED_C, ntc_celsius);
    }

    fn read_celsius(
        &mut self,
        index: usize,
    ) -> f32 {
        self.latest.get(index).copied().unwrap_or(DISCONNECTED_C)
    }
}

/// On-die sensor: 0.706 V at 27 C, -1.721 mV/C.
fn die_celsius(raw: u16) -> f32 {
    let volts = f32::from(raw) * ADC_VREF / ADC_FULL_SCALE;
    27.0 - (volts - 0.706) / 0.001_721
}

/// Beta-equation conversion for the NTC divider.
fn ntc_celsius(raw: u16) -> f32 {
    if raw < RAIL_MARGIN || raw > (ADC_FULL_SCALE as u16 - 1) - RAIL_MARGIN {
        return DISCONNECTED_C;
    }
    let raw = f32::from(raw);
    let ohms = NTC_PULLUP_OHMS * raw / (ADC_FULL_SCALE - raw);
    let inv_t = 1.0 / NTC_NOMINAL_K + libm::logf(ohms / NTC_NOMINAL_OHMS) / NTC_BETA;
    1.0 / inv_t - KELVIN_OFFSET
}
