use std::{
    collections::HashMap,
    io::{BufWriter, Write},
    path::Path,
    str::FromStr,
};

use itertools::Itertools;

use rinex::{
    observation::HeaderFields as ObsHeader,
    prelude::{
        obs::{EpochFlag, ObsKey, Observations, SignalObservation},
        Constellation, Epoch, Header, Observable as RinexObservable, RinexType, CRINEX,
    },
};

use log::{debug, error, warn};

use gnsslog2rinex::prelude::{EpochRecord, GlonassChannels, Observable, ObservableCatalog};

use crate::collecter::{
    fd::FileDescriptor, observations::settings::Settings, settings::Settings as SharedSettings,
};

/// RINEX observable for this [Observable]. V2 only retains the band digit.
fn rinex_observable(observable: &Observable, v2: bool) -> Option<RinexObservable> {
    let code = if v2 {
        format!("{}{}", observable.kind.letter(), observable.code.band.digit())
    } else {
        observable.to_string()
    };

    match RinexObservable::from_str(&code) {
        Ok(observable) => Some(observable),
        Err(e) => {
            error!("{}: invalid observable ({})", code, e);
            None
        },
    }
}

/// Observation RINEX [Collecter]: formats [EpochRecord]s,
/// the header being released with the first of them.
pub struct Collecter {
    opts: Settings,
    shared_opts: SharedSettings,
    codes: HashMap<Constellation, Vec<RinexObservable>>,
    glo_channels: GlonassChannels,
    comments: Vec<String>,
    header: Option<ObsHeader>,
    fd: Option<BufWriter<FileDescriptor>>,
    filename: Option<String>,
}

impl Collecter {
    /// Builds new [Collecter], for this session's [ObservableCatalog]
    pub fn new(
        opts: Settings,
        shared_opts: SharedSettings,
        catalog: &ObservableCatalog,
        glo_channels: GlonassChannels,
        comments: Vec<String>,
    ) -> Self {
        let v2 = shared_opts.major == 2;

        let codes = catalog
            .iter()
            .filter_map(|(constellation, observables)| {
                let constellation = constellation.to_constellation()?;
                let observables = observables
                    .iter()
                    .filter_map(|observable| rinex_observable(observable, v2))
                    .unique()
                    .collect::<Vec<_>>();
                Some((constellation, observables))
            })
            .collect();

        Self {
            opts,
            shared_opts,
            codes,
            glo_channels,
            comments,
            fd: None,
            header: None,
            filename: None,
        }
    }

    /// Obtain a new file descriptor
    fn fd(&mut self, t: Epoch) -> FileDescriptor {
        let filename = self.opts.filename(t, &self.shared_opts);

        if let Some(parent) = Path::new(&filename).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).unwrap_or_else(|e| {
                    panic!("Failed to create directory {}: {}", parent.display(), e)
                });
            }
        }

        let fd = FileDescriptor::new(self.shared_opts.gzip, &filename);
        self.filename = Some(filename);
        fd
    }

    /// Collects a new [EpochRecord]
    pub fn collect(&mut self, record: &EpochRecord) {
        if self.fd.is_none() {
            self.release_header(record.epoch);
        }
        self.release_epoch(record);
    }

    /// Terminates the file. Returns its name, if any was produced.
    pub fn finalize(mut self) -> Option<String> {
        let fd = self.fd.take()?;

        match fd.into_inner() {
            Ok(fd) => {
                if let Err(e) = fd.finish() {
                    error!("failed to terminate file: {}", e);
                }
            },
            Err(e) => {
                error!("failed to flush file: {}", e);
            },
        }

        self.filename.take()
    }

    fn release_header(&mut self, time_of_first_obs: Epoch) {
        // obtain new file, release header
        let mut fd = BufWriter::new(self.fd(time_of_first_obs));

        let header = self.build_header();

        header.format(&mut fd).unwrap_or_else(|e| {
            panic!(
                "RINEX header formatting: {}. Aborting (avoiding corrupt file)",
                e
            )
        });

        let _ = fd.flush();

        self.fd = Some(fd);
        self.header = header.obs;
    }

    fn release_epoch(&mut self, record: &EpochRecord) {
        let v2 = self.shared_opts.major == 2;

        let (Some(mut fd), Some(header)) = (self.fd.as_mut(), self.header.as_ref()) else {
            error!("{}: no header released", record.epoch);
            return;
        };

        let key = ObsKey {
            epoch: record.epoch,
            flag: EpochFlag::Ok,
        };

        let mut buffer = Observations::default();

        for (sat, observations) in record.satellites.iter() {
            let Some(sv) = sat.to_sv() else {
                warn!("{}({}): not supported by RINEX", record.epoch, sat);
                continue;
            };

            for (observable, value) in observations.iter() {
                let Some(observable) = rinex_observable(observable, v2) else {
                    continue;
                };

                // V2 merges some signals onto the same code
                if buffer
                    .signals
                    .iter()
                    .any(|signal| signal.sv == sv && signal.observable == observable)
                {
                    debug!("{}({}): {} already collected", record.epoch, sv, observable);
                    continue;
                }

                buffer.signals.push(SignalObservation {
                    sv,
                    lli: None,
                    snr: None,
                    value: *value,
                    observable,
                });
            }
        }

        if buffer.signals.is_empty() {
            return;
        }

        match buffer.format(v2, &key, header, &mut fd) {
            Ok(_) => {
                let _ = fd.flush();
            },
            Err(e) => {
                error!("{} formatting issue: {}", record.epoch, e);
            },
        }
    }

    fn build_header(&self) -> Header {
        let mut header = Header::default();

        header.rinex_type = RinexType::ObservationData;
        header.version.major = self.shared_opts.major;

        let mut obs_header = ObsHeader::default();

        if self.opts.crinex {
            let mut crinex = CRINEX::default();

            if self.shared_opts.major == 2 {
                crinex.version.major = 2;
            } else {
                crinex.version.major = 3;
            }

            obs_header.crinex = Some(crinex);
        }

        if let Some(observer) = &self.shared_opts.observer {
            header.observer = Some(observer.clone());
        }

        if let Some(agency) = &self.shared_opts.agency {
            header.agency = Some(agency.clone());
        }

        header.comments = self.comments.clone();

        header.glo_channels = self
            .glo_channels
            .iter()
            .filter_map(|(sat, channel)| Some((sat.to_sv()?, *channel)))
            .collect();

        obs_header.codes = self.codes.clone();

        header.obs = Some(obs_header);
        header
    }
}
