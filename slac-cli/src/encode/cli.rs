use clap::{Arg, ArgAction, Command};

use crate::consts::DEFAULT_MODE;
use crate::input::with_input_args;

pub const ENCODE_CMD: &str = "encode";

pub fn create_encode_cli() -> Command {
    let cmd = Command::new(ENCODE_CMD)
        .about("Encode one alignment as a full SLAC string.")
        .arg(
            Arg::new("mode")
                .long("mode")
                .short('m')
                .default_value(DEFAULT_MODE)
                .value_parser(["bases", "glyphs"])
                .help("Draw matches as base letters or as match glyphs"),
        )
        .arg(
            Arg::new("metrics")
                .long("metrics")
                .action(ArgAction::SetTrue)
                .help("Also print identity, coverage and concordance"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print a JSON record instead of plain text"),
        );
    with_input_args(cmd)
}
