//! Physical and time system constants

/// Speed of light in vacuum [m/s]
pub const SPEED_OF_LIGHT_M_S: f64 = 299_792_458.0;

/// GNSS fundamental chip rate [Hz]
pub const CHIP_RATE_HZ: f64 = 10.23E6;

/// GPS L1 carrier frequency [Hz], assumed when the carrier is not reported
pub const GPS_L1_FREQUENCY_HZ: f64 = 154.0 * CHIP_RATE_HZ;

/// GLONASS L1 center frequency [Hz]
pub const GLO_L1_CENTER_FREQ_HZ: f64 = 1.60200E9;

/// GLONASS L1 channel spacing [Hz]
pub const GLO_L1_DFREQ_HZ: f64 = 0.56250E6;

pub const NANOS_TO_SECONDS: f64 = 1.0E-9;

pub const WEEK_SECONDS: f64 = 604_800.0;

pub const WEEK_NANOS: i64 = 604_800_000_000_000;

pub const DAY_SECONDS: f64 = 86_400.0;

/// BDT lags GPST by 14 leap seconds
pub const BDT_TO_GPST_SECONDS: f64 = 14.0;

/// GLONASS time is UTC(SU) + 3h
pub const GLOT_TO_UTC_SECONDS: f64 = 10_800.0;

/// GPST - UTC, frozen: leap second history is not maintained
pub const GPS_LEAP_SECONDS: i64 = 18;

/// Largest propagation time residual we accept after a crossover correction [s]
pub const MAX_PROPAGATION_RESIDUAL_SECONDS: f64 = 10.0;
