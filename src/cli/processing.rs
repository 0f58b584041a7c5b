use clap::{Arg, ArgAction};
use lazy_static::lazy_static;

lazy_static! {
    pub static ref PROCESSING_ARGS: Vec<Arg> = vec![
        Arg::new("integerize")
            .long("integerize")
            .action(ArgAction::SetTrue)
            .help("Round epochs to the nearest integer second.
Pseudo ranges are compensated, using the pseudo range rate."),
        Arg::new("fix-bias")
            .long("fix-bias")
            .action(ArgAction::SetTrue)
            .conflicts_with("full-bias")
            .help("Hold the first FullBiasNanos for the whole session, for time stability.
Default is to apply each epoch's own value."),
        Arg::new("full-bias")
            .long("full-bias")
            .value_name("NANOS (i64)")
            .required(false)
            .allow_negative_numbers(true)
            .conflicts_with("fix-bias")
            .help("Apply this FullBiasNanos value for the whole session."),
        Arg::new("pr-bias")
            .long("pr-bias")
            .value_name("METERS (f64)")
            .required(false)
            .allow_negative_numbers(true)
            .help("Externally determined pseudo range bias, removed from all pseudo ranges."),
    ];
}
