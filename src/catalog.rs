//! Header descriptors, accumulated over a whole session:
//! observables per constellation and GLONASS frequency channels.
use std::collections::{BTreeMap, BTreeSet};

use log::{error, warn};

use crate::{
    constants::{GLO_L1_CENTER_FREQ_HZ, GLO_L1_DFREQ_HZ},
    constellation::{ConstellationType, SatelliteId},
    error::Error,
    frequency::ObservableCode,
    logfile::Batch,
    measurement::RawMeasurement,
    observable::Observable,
};

/// Declared observables, per constellation, in RINEX order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservableCatalog {
    pub codes: BTreeMap<ConstellationType, Vec<Observable>>,
}

impl ObservableCatalog {
    pub fn get(&self, constellation: &ConstellationType) -> Option<&[Observable]> {
        self.codes.get(constellation).map(|codes| codes.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ConstellationType, &Vec<Observable>)> {
        self.codes.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// [CatalogBuilder] accumulates the signal codes of all measurements
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    codes: BTreeMap<ConstellationType, BTreeSet<ObservableCode>>,
}

impl CatalogBuilder {
    /// Accounts for a new measurement
    pub fn add(&mut self, meas: &RawMeasurement) -> Result<(), Error> {
        let constellation = meas.constellation()?;
        let code = ObservableCode::new(meas.carrier_frequency()?, constellation, meas.state()?)?;
        self.codes.entry(constellation).or_default().insert(code);
        Ok(())
    }

    /// Accounts for a complete [Batch]. Measurements that cannot be
    /// described are reported and skipped.
    pub fn add_batch(&mut self, batch: &Batch) {
        for meas in batch.iter() {
            if let Err(e) = self.add(meas) {
                error!("observable catalog: {}", e);
            }
        }
    }

    /// Sorts the codes and expands each of them to its four observables
    pub fn finalize(self) -> ObservableCatalog {
        ObservableCatalog {
            codes: self
                .codes
                .into_iter()
                .map(|(constellation, codes)| {
                    // BTreeSet iterates in lexicographic order
                    let observables = codes.into_iter().flat_map(Observable::expand).collect();
                    (constellation, observables)
                })
                .collect(),
        }
    }
}

/// Builds the [ObservableCatalog] of all these [Batch]es
pub fn build_catalog<'a>(batches: impl IntoIterator<Item = &'a Batch>) -> ObservableCatalog {
    let mut builder = CatalogBuilder::default();
    for batch in batches {
        builder.add_batch(batch);
    }
    builder.finalize()
}

/// GLONASS frequency channel number, per satellite
pub type GlonassChannels = BTreeMap<SatelliteId, i8>;

/// [GlonassChannelsBuilder] determines the frequency channel of each GLONASS
/// satellite, from its first observed carrier frequency.
#[derive(Debug, Clone, Default)]
pub struct GlonassChannelsBuilder {
    channels: GlonassChannels,
}

/// Frequency channel number from G1 carrier frequency [Hz]
pub fn glonass_channel(frequency: f64) -> i8 {
    ((frequency - GLO_L1_CENTER_FREQ_HZ) / GLO_L1_DFREQ_HZ).round() as i8
}

impl GlonassChannelsBuilder {
    /// Accounts for a new measurement. Other constellations are ignored.
    pub fn add(&mut self, meas: &RawMeasurement) -> Result<(), Error> {
        if meas.constellation()? != ConstellationType::Glonass {
            return Ok(());
        }

        let sat = SatelliteId::new(ConstellationType::Glonass, meas.svid()?)?;

        if !self.channels.contains_key(&sat) {
            let channel = glonass_channel(meas.carrier_frequency()?);
            self.channels.insert(sat, channel);
        }

        Ok(())
    }

    pub fn add_batch(&mut self, batch: &Batch) {
        for meas in batch.iter() {
            if let Err(e) = self.add(meas) {
                warn!("glonass channels: {}", e);
            }
        }
    }

    pub fn finalize(self) -> GlonassChannels {
        self.channels
    }
}
