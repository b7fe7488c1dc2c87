use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use log::info;

use slac_core::SlacString;
use slac_mini::blocks::summarize;
use slac_mini::{AbbreviatorConfig, MiniSlacString, abbreviate};

use crate::input::columns_from_matches;

/// Settings from `--config`, or the defaults.
pub fn load_config(matches: &ArgMatches) -> Result<AbbreviatorConfig> {
    match matches.get_one::<String>("config") {
        Some(path) => AbbreviatorConfig::try_from(Path::new(path))
            .with_context(|| format!("Failed to load abbreviator config: {}", path)),
        None => Ok(AbbreviatorConfig::default()),
    }
}

pub fn budget(matches: &ArgMatches) -> Result<usize> {
    matches
        .get_one::<usize>("length")
        .copied()
        .ok_or_else(|| anyhow!("--length is required"))
}

pub fn run_mini(matches: &ArgMatches) -> Result<()> {
    let budget = budget(matches)?;
    let columns = columns_from_matches(matches)?;
    let slac = SlacString::assemble(&columns).context("Failed to encode alignment")?;

    let mut stdout = io::stdout().lock();

    if matches.get_flag("blocks") {
        let threshold = matches.get_one::<f64>("threshold").copied().unwrap_or(1.0);
        writeln!(stdout, "{}", summarize(&slac, budget, threshold))?;
        return Ok(());
    }

    let config = load_config(matches)?;
    let mini = abbreviate(&slac, budget, &config)?;
    info!(
        "abbreviated {} columns to {} characters",
        slac.len(),
        mini.len()
    );

    writeln!(stdout, "{}", mini)?;
    if matches.get_flag("map") {
        write_token_map(&mut stdout, &mini)?;
    }
    Ok(())
}

/// One row per token: index, half-open column range, run length, truncation and text.
pub fn write_token_map<W: Write>(out: &mut W, mini: &MiniSlacString) -> io::Result<()> {
    writeln!(out, "token\tstart\tend\tcount\ttruncated\ttext")?;
    for (i, token) in mini.tokens().iter().enumerate() {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}",
            i,
            token.range.start,
            token.range.end,
            token.count,
            token.truncated,
            mini.token_text(i).unwrap_or("")
        )?;
    }
    Ok(())
}
