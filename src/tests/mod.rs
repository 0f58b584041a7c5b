
use log::LevelFilter;
use std::sync::Once;

use crate::{
    constants::{NANOS_TO_SECONDS, WEEK_NANOS},
    measurement::RawMeasurement,
};

static INIT: Once = Once::new();

pub fn init_logger() {
    INIT.call_once(|| {
        env_logger::builder()
            .is_test(true)
            .filter_level(LevelFilter::Debug)
            .init();
    });
}

/// Receiver clock [ns]
pub const TIME_NANOS: i64 = 1_000_000_000_000;

/// GPST of [TIME_NANOS]: 2020-06-25T00:00:00 GPST (thursday of week 2111)
pub const GPST_NANOS: i64 = 2111 * WEEK_NANOS + 4 * 86_400_000_000_000;

pub const FULL_BIAS_NANOS: i64 = TIME_NANOS - GPST_NANOS;

/// Propagation time of all synthetic signals [s]
pub const TAU_S: f64 = 0.07;

pub const PSEUDORANGE_RATE: f64 = -300.0;

pub const ADR_METERS: f64 = 1500.0;

pub const CN0: f64 = 42.5;

/// Satellite transmit time [ns], expressed in each constellation's own time system,
/// for a signal received at [GPST_NANOS] after [TAU_S].
fn received_sv_time_nanos(constellation: i64) -> f64 {
    // 345_600 s into the week
    let gpst_tow = (GPST_NANOS % WEEK_NANOS) as f64 * NANOS_TO_SECONDS - TAU_S;
    let seconds = match constellation {
        // time of day, GLONASST = GPST - 18 + 3h
        3 => (gpst_tow - 18.0 + 10_800.0) % 86_400.0,
        // BDT = GPST - 14
        5 => gpst_tow - 14.0,
        _ => gpst_tow,
    };
    (seconds * 1.0E9).round()
}

/// Builds a complete synthetic [RawMeasurement]
pub fn raw_measurement(constellation: i64, svid: i64, frequency: f64, state: u32) -> RawMeasurement {
    let fields = vec![
        ("TimeNanos", TIME_NANOS.to_string()),
        ("FullBiasNanos", FULL_BIAS_NANOS.to_string()),
        ("BiasNanos", "0.0".to_string()),
        ("TimeOffsetNanos", "0.0".to_string()),
        ("ConstellationType", constellation.to_string()),
        ("Svid", svid.to_string()),
        ("State", state.to_string()),
        (
            "ReceivedSvTimeNanos",
            received_sv_time_nanos(constellation).to_string(),
        ),
        ("ReceivedSvTimeUncertaintyNanos", "12".to_string()),
        ("Cn0DbHz", CN0.to_string()),
        ("PseudorangeRateMetersPerSecond", PSEUDORANGE_RATE.to_string()),
        ("AccumulatedDeltaRangeState", "1".to_string()),
        ("AccumulatedDeltaRangeMeters", ADR_METERS.to_string()),
        ("CarrierFrequencyHz", frequency.to_string()),
        ("MultipathIndicator", "0".to_string()),
    ];

    RawMeasurement::new(fields.iter().map(|(name, value)| (*name, value.as_str())))
}
