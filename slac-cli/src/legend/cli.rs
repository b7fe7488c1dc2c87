use clap::{Arg, Command};

pub const LEGEND_CMD: &str = "legend";

pub fn create_legend_cli() -> Command {
    Command::new(LEGEND_CMD)
        .about("Print the SLAC alphabet and the miniSLAC glyphs.")
        .arg(
            Arg::new("config")
                .long("config")
                .help("Abbreviator settings used to describe run lengths"),
        )
}
