use std::collections::BTreeMap;

use hifitime::Epoch;
use log::error;
use serde::{Serialize, Serializer};

use crate::{constellation::SatelliteId, error::Error, observable::Observable};

/// Observations of one satellite, per [Observable]
pub type SignalObservations = BTreeMap<Observable, f64>;

fn serialize_epoch<S: Serializer>(epoch: &Epoch, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(epoch)
}

/// Output of one processed measurement: one satellite signal at one epoch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedMeasurement {
    /// Epoch of observation (GPST)
    #[serde(serialize_with = "serialize_epoch")]
    pub epoch: Epoch,
    pub sat: SatelliteId,
    pub observations: SignalObservations,
}

impl std::fmt::Display for ProcessedMeasurement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.epoch, self.sat)?;
        for (observable, value) in self.observations.iter() {
            write!(f, " {}={:.7E}", observable, value)?;
        }
        Ok(())
    }
}

/// All satellite observations sharing one receiver epoch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpochRecord {
    /// Epoch of observation (GPST)
    #[serde(serialize_with = "serialize_epoch")]
    pub epoch: Epoch,
    pub satellites: BTreeMap<SatelliteId, SignalObservations>,
}

impl From<ProcessedMeasurement> for EpochRecord {
    fn from(meas: ProcessedMeasurement) -> Self {
        let mut satellites = BTreeMap::new();
        satellites.insert(meas.sat, meas.observations);
        Self {
            epoch: meas.epoch,
            satellites,
        }
    }
}

impl EpochRecord {
    /// Folds one [ProcessedMeasurement] into this record.
    /// Observations of known satellites are updated (new observables are added,
    /// existing ones overwritten). Measurements from another epoch are rejected.
    pub fn fold(&mut self, meas: ProcessedMeasurement) -> Result<(), Error> {
        if meas.epoch != self.epoch {
            return Err(Error::EpochMismatch {
                expected: self.epoch,
                got: meas.epoch,
            });
        }

        self.satellites
            .entry(meas.sat)
            .or_default()
            .extend(meas.observations);

        Ok(())
    }

    /// Merges processed measurements into a single [EpochRecord].
    /// Failed measurements (`None`) are skipped. The first valid measurement
    /// defines the epoch: measurements from another epoch are dropped.
    /// Returns `None` when no valid measurement exists.
    pub fn merge<I>(measurements: I) -> Option<Self>
    where
        I: IntoIterator<Item = Option<ProcessedMeasurement>>,
    {
        let mut record: Option<Self> = None;

        for meas in measurements.into_iter().flatten() {
            match record.as_mut() {
                None => record = Some(meas.into()),
                Some(record) => {
                    if let Err(e) = record.fold(meas) {
                        error!("{}: will be skipped", e);
                    }
                },
            }
        }

        record
    }

    /// Returns observations of this satellite
    pub fn observations(&self, sat: &SatelliteId) -> Option<&SignalObservations> {
        self.satellites.get(sat)
    }

    /// Returns a single observation
    pub fn observation(&self, sat: &SatelliteId, observable: &Observable) -> Option<f64> {
        self.satellites.get(sat)?.get(observable).copied()
    }
}
