use clap::builder::RangedU64ValueParser;
use clap::{Arg, ArgAction, Command};

use crate::consts::{DEFAULT_LENGTH, DEFAULT_THRESHOLD};
use crate::input::with_input_args;

pub const MINI_CMD: &str = "mini";

pub fn create_mini_cli() -> Command {
    let cmd = Command::new(MINI_CMD)
        .about("Abbreviate one alignment to a miniSLAC no longer than a character budget.")
        .arg(
            Arg::new("length")
                .long("length")
                .short('l')
                .default_value(DEFAULT_LENGTH)
                .value_parser(RangedU64ValueParser::<usize>::new().range(1..))
                .help("Maximum length of the miniSLAC"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Abbreviator settings as a .toml or .yaml file"),
        )
        .arg(
            Arg::new("map")
                .long("map")
                .action(ArgAction::SetTrue)
                .help("Also print a table mapping each token to its SLAC columns"),
        )
        .arg(
            Arg::new("blocks")
                .long("blocks")
                .action(ArgAction::SetTrue)
                .conflicts_with("map")
                .help("Print a fixed-width block summary instead of a miniSLAC"),
        )
        .arg(
            Arg::new("threshold")
                .long("threshold")
                .default_value(DEFAULT_THRESHOLD)
                .value_parser(clap::value_parser!(f64))
                .help("With --blocks: share of a block its most common glyph must cover to be shown as is"),
        );
    with_input_args(cmd)
}
