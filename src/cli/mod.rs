use clap::{Arg, ArgAction, ArgMatches, ColorChoice, Command};
use rinex::prelude::Duration;

mod observations;
use observations::*;

mod processing;
use processing::*;

use gnsslog2rinex::prelude::{BiasPolicy, Settings as ProcessingSettings};

use crate::collecter::{
    observations::settings::Settings as ObsSettings, settings::Settings as SharedSettings,
};

pub struct Cli {
    /// Arguments passed by user
    matches: ArgMatches,
}

impl Cli {
    /// Build new command line interface
    pub fn new() -> Self {
        let cmd =
            Command::new("gnsslog2rinex")
        .author("Guillaume W. Bres, <guillaume.bressaix@gmail.com>")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Android GNSS Logger to RINEX converter")
        .color(ColorChoice::Always)
        .arg_required_else_help(true)
        .next_help_heading("Input")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .required(true)
                .help("GNSS Logger file (.txt), possibly gzip compressed (.gz)")
        )
        .next_help_heading("RINEX Collection (shared)")
        .arg(
            Arg::new("name")
                .long("name")
                .short('n')
                .required(false)
                .action(ArgAction::Set)
                .help("Define a custom name. To respect standard naming conventions,
this should be a 4 letter code, usually named after your geodetic marker or phone model.
When not defined, the default value is \"GNSS\".")
        )
        .arg(
            Arg::new("prefix")
                .long("prefix")
                .required(false)
                .help("Custom directory prefix for output products. Default is none."),
        )
        .arg(
            Arg::new("country")
                .short('c')
                .action(ArgAction::Set)
                .help("Specify country code (3 letter) in case of V3 file name. Default: \"XXX\"")
        )
        .arg(
            Arg::new("agency")
                .long("agency")
                .action(ArgAction::Set)
                .required(false)
                .help("Define name of your Agency, to be used in all Headers"),
        )
        .arg(
            Arg::new("observer")
                .long("observer")
                .action(ArgAction::Set)
                .required(false)
                .help("Define name of Observer, to be used in all Headers"),
        )
        .arg(
            Arg::new("v2")
                .long("v2")
                .action(ArgAction::SetTrue)
                .conflicts_with("v4")
                .help("Collect RINEX V2. Default is RINEX V3."),
        )
        .arg(
            Arg::new("v4")
                .long("v4")
                .action(ArgAction::SetTrue)
                .conflicts_with("v2")
                .help("Collect RINEX V4. Default is RINEX V3."),
        )
        .arg(
            Arg::new("long")
                .short('l')
                .long("long")
                .action(ArgAction::SetTrue)
                .help("Prefer V3 (modern) longer filenames, instead of shortened (default).
Requires country code and other definitions to be complete.")
        )
        .arg(
            Arg::new("gzip")
                .long("gzip")
                .action(ArgAction::SetTrue)
                .help("Add GZIP compression.")
        );

        let cmd = cmd
            .next_help_heading("Measurements processing")
            .args(PROCESSING_ARGS.iter());

        let cmd = cmd
            .next_help_heading("Observations RINEX (specific)")
            .args(OBSERVATION_ARGS.iter());

        Self {
            matches: cmd.get_matches(),
        }
    }

    /// Returns input file path
    pub fn input_path(&self) -> &str {
        self.matches.get_one::<String>("input").unwrap()
    }

    /// True when JSON streaming replaces RINEX collection
    pub fn json(&self) -> bool {
        self.matches.get_flag("json")
    }

    fn full_bias(&self) -> Option<i64> {
        let full_bias = self.matches.get_one::<String>("full-bias")?;
        let full_bias = full_bias
            .trim()
            .parse::<i64>()
            .unwrap_or_else(|e| panic!("Invalid FullBiasNanos value: {}", e));
        Some(full_bias)
    }

    fn pseudorange_bias(&self) -> f64 {
        if let Some(bias) = self.matches.get_one::<String>("pr-bias") {
            bias.trim()
                .parse::<f64>()
                .unwrap_or_else(|e| panic!("Invalid pseudo range bias: {}", e))
        } else {
            0.0
        }
    }

    fn sampling_period(&self) -> Duration {
        if let Some(sampling) = self.matches.get_one::<String>("sampling") {
            sampling
                .trim()
                .parse::<Duration>()
                .unwrap_or_else(|e| panic!("Invalid duration: {}", e))
        } else {
            Duration::from_seconds(1.0)
        }
    }

    pub fn processing_settings(&self) -> ProcessingSettings {
        ProcessingSettings {
            integerize: self.matches.get_flag("integerize"),
            pseudorange_bias: self.pseudorange_bias(),
            bias: if let Some(full_bias) = self.full_bias() {
                BiasPolicy::Fixed(full_bias)
            } else if self.matches.get_flag("fix-bias") {
                BiasPolicy::Hold
            } else {
                BiasPolicy::Refresh
            },
        }
    }

    pub fn settings(&self) -> SharedSettings {
        SharedSettings {
            agency: self.matches.get_one::<String>("agency").cloned(),
            observer: self.matches.get_one::<String>("observer").cloned(),
            prefix: self.matches.get_one::<String>("prefix").cloned(),
            name: if let Some(name) = self.matches.get_one::<String>("name") {
                name.to_string()
            } else {
                "GNSS".to_string()
            },
            country_code: if let Some(country) = self.matches.get_one::<String>("country") {
                country.to_string()
            } else {
                "XXX".to_string()
            },
            gzip: self.matches.get_flag("gzip"),
            long_filename: self.matches.get_flag("long"),
            major: if self.matches.get_flag("v4") {
                4
            } else if self.matches.get_flag("v2") {
                2
            } else {
                3
            },
            snapshot_period: Duration::from_days(1.0),
        }
    }

    pub fn obs_settings(&self) -> ObsSettings {
        ObsSettings {
            crinex: self.matches.get_flag("crx"),
            sampling: self.sampling_period(),
        }
    }
}
