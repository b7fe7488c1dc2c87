use std::io::{self, Write};

use anyhow::Result;
use clap::ArgMatches;

use slac_core::LEGEND;
use slac_core::alphabet::GLYPHS;
use slac_mini::AbbreviatorConfig;

use crate::mini::handlers::load_config;

pub fn run_legend(matches: &ArgMatches) -> Result<()> {
    let config = load_config(matches)?;
    write_legend(&mut io::stdout().lock(), &config)?;
    Ok(())
}

pub fn write_legend<W: Write>(out: &mut W, config: &AbbreviatorConfig) -> io::Result<()> {
    writeln!(out, "SLAC")?;
    for entry in LEGEND.iter() {
        writeln!(out, "  {}\t{}", entry.symbol, entry.description)?;
    }

    writeln!(out)?;
    writeln!(out, "miniSLAC")?;
    writeln!(out, "  run\tellipsis\tstands for")?;
    for glyph in GLYPHS.iter() {
        writeln!(out, "  {}\t{}\t{}", glyph.run, glyph.ellipsis, glyph.description)?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "A glyph followed by a number is a run of that many columns. Runs longer than {} \
         are written {}. A single column carries no number. An ellipsis glyph marks a run \
         shortened to fit the length budget.",
        config.max_numeral(),
        config.numeral(config.max_numeral() + 1)
    )
}
