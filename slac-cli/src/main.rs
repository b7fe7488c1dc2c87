mod batch;
mod encode;
mod input;
mod legend;
mod mini;

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "slac";
    pub const DEFAULT_LENGTH: &str = "50";
    pub const DEFAULT_THRESHOLD: &str = "1.0";
    pub const DEFAULT_MODE: &str = "bases";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("Databio")
        .about("Encode a hit aligned to a gene's genomic and coding sequence as a single self-describing string.")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::Count)
                .global(true)
                .help("Increase logging verbosity (-v info, -vv debug, -vvv trace)"),
        )
        .subcommand(encode::cli::create_encode_cli())
        .subcommand(mini::cli::create_mini_cli())
        .subcommand(batch::cli::create_batch_cli())
        .subcommand(legend::cli::create_legend_cli())
}

fn init_logging(matches: &ArgMatches) {
    let level = match matches.get_count("verbose") {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();
    init_logging(&matches);

    match matches.subcommand() {
        //
        // FULL SLAC
        //
        Some((encode::cli::ENCODE_CMD, matches)) => {
            encode::handlers::run_encode(matches)?;
        }

        //
        // MINISLAC
        //
        Some((mini::cli::MINI_CMD, matches)) => {
            mini::handlers::run_mini(matches)?;
        }

        //
        // BATCH TABLE
        //
        Some((batch::cli::BATCH_CMD, matches)) => {
            batch::handlers::run_batch(matches)?;
        }

        //
        // LEGEND
        //
        Some((legend::cli::LEGEND_CMD, matches)) => {
            legend::handlers::run_legend(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
