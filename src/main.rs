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

use std::io::{stdout, BufWriter, Write};

use env_logger::{Builder, Target};

use itertools::Itertools;

use log::{debug, error, info};

use gnsslog2rinex::prelude::{CatalogBuilder, Converter, GlonassChannelsBuilder, GnssLog};

mod cli;
mod collecter;

use crate::{cli::Cli, collecter::observations::collecter::Collecter};

pub fn main() {
    // cli
    let cli = Cli::new();

    let json = cli.json();

    let mut builder = Builder::from_default_env();

    builder
        .target(if json { Target::Stderr } else { Target::Stdout })
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    // Settings
    let input_path = cli.input_path();
    let settings = cli.processing_settings();
    let shared_settings = cli.settings();
    let obs_settings = cli.obs_settings();

    let gnss_log = GnssLog::open(input_path)
        .unwrap_or_else(|e| panic!("Failed to open \"{}\": {}", input_path, e));

    let description = gnss_log
        .header
        .version
        .iter()
        .map(|(key, value)| format!("{}: {}", key, value))
        .join(" ");

    info!("{} - {}", input_path, description);

    // first pass: header descriptors
    let mut catalog = CatalogBuilder::default();
    let mut glo_channels = GlonassChannelsBuilder::default();

    let batches = gnss_log
        .raw_batches()
        .unwrap_or_else(|e| panic!("Failed to read \"{}\": {}", input_path, e));

    for batch in batches {
        match batch {
            Ok(batch) => {
                catalog.add_batch(&batch);
                glo_channels.add_batch(&batch);
            },
            Err(e) => error!("{}", e),
        }
    }

    let catalog = catalog.finalize();
    let glo_channels = glo_channels.finalize();

    for (constellation, observables) in catalog.iter() {
        debug!("{}: {}", constellation, observables.iter().join(" "));
    }

    if catalog.is_empty() {
        error!("no raw measurements to convert");
        return;
    }

    // second pass: conversion
    let mut converter = Converter::new(settings);

    let mut json_fd = BufWriter::new(stdout());

    let comments = std::iter::once("Converted from Android GNSS Logger".to_string())
        .chain(
            gnss_log
                .header
                .version
                .iter()
                .map(|(key, value)| format!("{}: {}", key, value)),
        )
        .collect::<Vec<_>>();

    let mut collecter = Collecter::new(
        obs_settings,
        shared_settings,
        &catalog,
        glo_channels,
        comments,
    );

    let batches = gnss_log
        .raw_batches()
        .unwrap_or_else(|e| panic!("Failed to read \"{}\": {}", input_path, e));

    let mut epochs = 0;

    for batch in batches {
        let batch = match batch {
            Ok(batch) => batch,
            Err(e) => {
                error!("{}", e);
                continue;
            },
        };

        let record = match converter.process(&batch) {
            Ok(Some(record)) => record,
            Ok(None) => continue,
            Err(e) => {
                error!("{}: skipping epoch", e);
                continue;
            },
        };

        epochs += 1;

        if json {
            let line = serde_json::to_string(&record)
                .unwrap_or_else(|e| panic!("JSON serialization: {}", e));

            if let Err(e) = writeln!(json_fd, "{}", line) {
                error!("failed to stream {}: {}", record.epoch, e);
            }
        } else {
            collecter.collect(&record);
        }
    }

    let _ = json_fd.flush();

    if let Some(filename) = collecter.finalize() {
        info!("{} generated ({} epochs)", filename, epochs);
    } else if !json {
        error!("no epoch could be resolved");
    }
}
