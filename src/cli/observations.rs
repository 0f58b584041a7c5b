use clap::{Arg, ArgAction};
use lazy_static::lazy_static;

lazy_static! {
    pub static ref OBSERVATION_ARGS: Vec<Arg> = vec![
        Arg::new("sampling")
            .short('s')
            .long("sampling")
            .required(false)
            .help("Sampling interval, used in V3 file names. Default value is 1s (GNSS Logger rate)."),
        Arg::new("crx")
            .long("crx")
            .action(ArgAction::SetTrue)
            .help("Add CRINEX compression. Disabled by default."),
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Stream one JSON object per epoch (on stdout) instead of collecting RINEX.
Logs are then redirected to stderr."),
    ];
}
