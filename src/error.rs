use thiserror::Error;

use hifitime::Epoch;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Carrier frequency does not match any supported RINEX band.
    /// Fatal for the measurement it was found in.
    #[error("cannot get rinex frequency band from frequency {frequency} Hz (multiplier {multiplier})")]
    UnknownFrequencyBand { frequency: f64, multiplier: i64 },

    #[error("unknown constellation type #{0}")]
    UnknownConstellation(i64),

    /// GLONASS reports the frequency channel number instead of
    /// the orbital slot number when the latter is not known yet.
    #[error("skipping GLONASS measurement without orbital slot number ({0})")]
    GlonassFrequencyChannel(String),

    /// A required bit of the `State` bitmask is missing
    #[error("state 0x{state:04x} ({state:016b}) has {flag} not valid")]
    SyncState { state: u32, flag: &'static str },

    /// `AccumulatedDeltaRangeState` is not marked valid
    #[error("adr state 0x{0:02x} ({0:08b}) has ADR_STATE_VALID not valid")]
    AdrState(u32),

    #[error("wrong measurement when merging batches: expected {expected}, got {got}")]
    EpochMismatch { expected: Epoch, got: Epoch },

    #[error("missing field \"{0}\"")]
    MissingField(&'static str),

    #[error("invalid value \"{value}\" for field \"{field}\"")]
    InvalidField { field: &'static str, value: String },

    /// No epoch can be derived without a valid `TimeNanos`
    #[error("invalid value of TimeNanos for satellite {0}")]
    InvalidTimeNanos(String),

    /// Receiver clock fields lead to a time prior GPST origin
    /// (corrupt `FullBiasNanos`, most likely)
    #[error("receiver clock resolves prior GPS time origin")]
    InvalidReceiverClock,

    #[error("i/o error: {0}")]
    Io(String),

    /// Data line using a record kind that the header never declared
    #[error("record kind \"{0}\" not declared in header")]
    UndeclaredRecord(String),
}

impl Error {
    /// True when the receiver clock (`TimeNanos`, shared by the whole batch)
    /// cannot be read. Every other [Error] is recovered for the single
    /// measurement that raised it.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InvalidTimeNanos(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
