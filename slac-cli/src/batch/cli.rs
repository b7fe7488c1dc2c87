use clap::builder::RangedU64ValueParser;
use clap::{Arg, ArgAction, Command};

use crate::consts::DEFAULT_LENGTH;

pub const BATCH_CMD: &str = "batch";

pub fn create_batch_cli() -> Command {
    Command::new(BATCH_CMD)
        .about("Encode every row of a name/genomic/cds/hit table in parallel.")
        .arg(
            Arg::new("input")
                .required(true)
                .help("Tab-separated table (optionally .gz) of name, genomic, cds and hit"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Output table path (default: stdout)"),
        )
        .arg(
            Arg::new("threads")
                .long("threads")
                .short('t')
                .value_parser(clap::value_parser!(usize))
                .help("Number of worker threads (default: all cores)"),
        )
        .arg(
            Arg::new("length")
                .long("length")
                .short('l')
                .default_value(DEFAULT_LENGTH)
                .value_parser(RangedU64ValueParser::<usize>::new().range(1..))
                .help("Maximum length of each miniSLAC"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Abbreviator settings as a .toml or .yaml file"),
        )
        .arg(
            Arg::new("auto-align-cds")
                .long("auto-align-cds")
                .action(ArgAction::SetTrue)
                .help("Treat the cds column as ungapped and place it onto the genomic row"),
        )
        .arg(
            Arg::new("progress")
                .long("progress")
                .action(ArgAction::SetTrue)
                .help("Show a progress bar on stderr"),
        )
}
