#![doc(html_logo_url = "https://raw.githubusercontent.com/rtk-rs/.github/master/logos/logo2.jpg")]
#![cfg_attr(docsrs, feature(doc_cfg))]

/*
 * GNSSLOG2RINEX is part of the rtk-rs framework.
 * Authors: Guillaume W. Bres <guillaume.bressaix@gmail.com> et al,
 * (cf. https://github.com/rtk-rs/rinex/graphs/contributors)
 * This framework is shipped under Mozilla Public V2 license.
 *
 * Documentation: https://github.com/rtk-rs/gnsslog2rinex
 */

//! Android GNSS Logger raw measurements processing:
//! pseudo range, carrier phase, doppler and SSI, per satellite and per epoch,
//! ready to be formatted as RINEX observations.

extern crate gnss_rs as gnss;

pub mod catalog;
pub mod constants;
pub mod constellation;
pub mod epoch;
pub mod frequency;
pub mod logfile;
pub mod measurement;
pub mod observable;
pub mod processing;
pub mod state;
pub mod time;

mod error;

#[cfg(test)]
mod tests;

pub use error::Error;

pub mod prelude {
    pub use crate::catalog::{
        build_catalog, CatalogBuilder, GlonassChannels, GlonassChannelsBuilder, ObservableCatalog,
    };
    pub use crate::constellation::{ConstellationType, SatelliteId};
    pub use crate::epoch::{EpochRecord, ProcessedMeasurement, SignalObservations};
    pub use crate::error::Error;
    pub use crate::frequency::{attribute_of, band_of, Band, ObservableCode};
    pub use crate::logfile::{Batch, GnssLog, Header as LogHeader, RecordKind};
    pub use crate::measurement::{RawMeasurement, Value};
    pub use crate::observable::{Observable, ObservationKind};
    pub use crate::processing::{process, process_batch, BiasPolicy, Converter, Settings};
    pub use crate::state::{check_adr_state, check_sync_state, AdrState, SyncState};
    // re-export
    pub use hifitime::{Epoch, TimeScale};
}
