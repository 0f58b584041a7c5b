//! Measurement processing: one raw measurement to
//! pseudo range, carrier phase, doppler and SSI.
use log::{debug, error, trace, warn};

use crate::{
    constants::SPEED_OF_LIGHT_M_S,
    constellation::SatelliteId,
    epoch::{EpochRecord, ProcessedMeasurement, SignalObservations},
    error::Error,
    frequency::ObservableCode,
    logfile::Batch,
    measurement::RawMeasurement,
    observable::{Observable, ObservationKind},
    state::{check_adr_state, check_sync_state},
    time::{propagation_time, transmit_tow, ReceiverTime},
};

/// How `FullBiasNanos` is managed over the course of a session
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub enum BiasPolicy {
    /// Use each measurement's own `FullBiasNanos`
    #[default]
    Refresh,
    /// Seed from the first measurement, then hold it
    /// for time stability.
    Hold,
    /// User defined value [ns]
    Fixed(i64),
}

/// Processing [Settings]
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Settings {
    /// Round epochs to the nearest integer second, and compensate
    /// pseudo ranges accordingly.
    pub integerize: bool,
    /// Externally determined bias [m], removed from all pseudo ranges
    pub pseudorange_bias: f64,
    /// [BiasPolicy]
    pub bias: BiasPolicy,
}

/// Processes one [RawMeasurement].
///
/// `full_bias_nanos` overrides the measurement's own `FullBiasNanos` when defined.
/// Returns `Ok(None)` when the measurement is dropped: unknown constellation
/// or invalid satellite identity. Pseudo range (resp. carrier phase) is set to zero
/// when the tracking state (resp. ADR state) does not allow trusting it.
/// Doppler and SSI are always reported.
pub fn process(
    meas: &RawMeasurement,
    full_bias_nanos: Option<i64>,
    settings: &Settings,
) -> Result<Option<ProcessedMeasurement>, Error> {
    let constellation = match meas.constellation() {
        Ok(constellation) => constellation,
        Err(e) => {
            warn!("{}: skipping measurement", e);
            return Ok(None);
        },
    };

    let sat = match SatelliteId::new(constellation, meas.svid()?) {
        Ok(sat) => sat,
        Err(e) => {
            warn!("{}", e);
            return Ok(None);
        },
    };

    let state = meas.state()?;
    let frequency = meas.carrier_frequency()?;
    let code = ObservableCode::new(frequency, constellation, state)?;

    let full_bias_nanos = match full_bias_nanos {
        Some(full_bias) => full_bias,
        None => meas.full_bias_nanos()?,
    };

    let time_nanos = meas
        .time_nanos()
        .map_err(|_| Error::InvalidTimeNanos(sat.to_string()))?;

    let bias_nanos = meas.float_or("BiasNanos", 0.0);
    let time_offset_nanos = meas.float_or("TimeOffsetNanos", 0.0);

    let rx_time = ReceiverTime::resolve(time_nanos, full_bias_nanos, bias_nanos, settings.integerize)?;
    let epoch = rx_time.epoch;
    let t_rx = rx_time.reception_tow(time_offset_nanos);

    let wavelength = SPEED_OF_LIGHT_M_S / frequency;
    let pseudorange_rate = meas.float("PseudorangeRateMetersPerSecond")?;

    let pseudorange = match check_sync_state(state, constellation, code.band) {
        Ok(_) => {
            let t_tx = transmit_tow(constellation, meas.float("ReceivedSvTimeNanos")?, epoch);
            let tau = propagation_time(constellation, t_rx, t_tx);

            let mut pr = tau * SPEED_OF_LIGHT_M_S - settings.pseudorange_bias;

            // consistent with the integer timestamp
            if settings.integerize {
                pr -= rx_time.frac_s * pseudorange_rate;
            }

            pr
        },
        Err(e) => {
            warn!("{}({}) - {}", epoch, sat, e);
            0.0
        },
    };

    let phase = match check_adr_state(meas.adr_state()?) {
        Ok(_) => meas.float("AccumulatedDeltaRangeMeters")? / wavelength,
        Err(e) => {
            warn!("{}({}) - {}", epoch, sat, e);
            0.0
        },
    };

    let doppler = -pseudorange_rate / wavelength;
    let cn0 = meas.float("Cn0DbHz")?;

    let observations = [pseudorange, phase, doppler, cn0]
        .into_iter()
        .zip(ObservationKind::ALL)
        .map(|(value, kind)| (Observable::new(kind, code), value))
        .collect::<SignalObservations>();

    let processed = ProcessedMeasurement {
        epoch,
        sat,
        observations,
    };

    trace!("{}", processed);
    Ok(Some(processed))
}

/// Processes all measurements of a [Batch] and merges them into one [EpochRecord].
/// Measurements that fail to process are reported and skipped, unless
/// the receiver clock itself cannot be read ([Error::is_fatal]).
pub fn process_batch(
    batch: &Batch,
    full_bias_nanos: Option<i64>,
    settings: &Settings,
) -> Result<Option<EpochRecord>, Error> {
    let mut processed = Vec::with_capacity(batch.len());

    for meas in batch.iter() {
        match process(meas, full_bias_nanos, settings) {
            Ok(meas) => processed.push(meas),
            Err(e) => {
                if e.is_fatal() {
                    return Err(e);
                }
                error!("{}: skipping measurement", e);
            },
        }
    }

    Ok(EpochRecord::merge(processed))
}

/// [Converter] processes consecutive batches and manages
/// `FullBiasNanos` according to the [BiasPolicy].
#[derive(Debug, Clone, Default)]
pub struct Converter {
    settings: Settings,
    full_bias_nanos: Option<i64>,
}

impl Converter {
    pub fn new(settings: Settings) -> Self {
        let full_bias_nanos = match settings.bias {
            BiasPolicy::Fixed(full_bias) => Some(full_bias),
            _ => None,
        };

        Self {
            settings,
            full_bias_nanos,
        }
    }

    /// `FullBiasNanos` currently applied (if any)
    pub fn full_bias_nanos(&self) -> Option<i64> {
        self.full_bias_nanos
    }

    /// Processes a new [Batch]
    pub fn process(&mut self, batch: &Batch) -> Result<Option<EpochRecord>, Error> {
        if self.settings.bias == BiasPolicy::Hold && self.full_bias_nanos.is_none() {
            if let Some(full_bias) = batch.iter().find_map(|meas| meas.full_bias_nanos().ok()) {
                debug!("holding full bias: {} ns", full_bias);
                self.full_bias_nanos = Some(full_bias);
            }
        }

        process_batch(batch, self.full_bias_nanos, &self.settings)
    }
}
