use std::io::{self, Write};

use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use log::info;
use serde::Serialize;

use slac_core::metrics::AlignmentMetrics;
use slac_core::{RenderMode, SlacString};

use crate::input::columns_from_matches;

#[derive(Serialize)]
struct EncodeOutput {
    slac: String,
    mode: String,
    length: usize,
    boundary_indices: Vec<usize>,
    notable_indices: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metrics: Option<AlignmentMetrics>,
}

pub fn run_encode(matches: &ArgMatches) -> Result<()> {
    let mode: RenderMode = matches
        .get_one::<String>("mode")
        .map(|m| m.parse())
        .transpose()
        .map_err(|e: String| anyhow!(e))?
        .unwrap_or_default();
    let with_metrics = matches.get_flag("metrics");
    let as_json = matches.get_flag("json");

    let columns = columns_from_matches(matches)?;
    let slac = SlacString::assemble(&columns).context("Failed to encode alignment")?;
    info!("encoded {} columns", slac.len());

    let metrics = if with_metrics {
        Some(AlignmentMetrics::from_columns(&columns)?)
    } else {
        None
    };

    let mut stdout = io::stdout().lock();
    if as_json {
        let output = EncodeOutput {
            slac: slac.render(mode),
            mode: mode.to_string(),
            length: slac.len(),
            boundary_indices: slac.boundary_indices().to_vec(),
            notable_indices: slac.notable_indices().to_vec(),
            metrics,
        };
        let json = serde_json::to_string_pretty(&output)
            .context("Failed to serialize output to JSON")?;
        writeln!(stdout, "{}", json)?;
        return Ok(());
    }

    writeln!(stdout, "{}", slac.render(mode))?;
    if let Some(metrics) = metrics {
        write_metrics(&mut stdout, &metrics)?;
    }
    Ok(())
}

fn write_metrics<W: Write>(out: &mut W, metrics: &AlignmentMetrics) -> io::Result<()> {
    writeln!(out, "identity_to_genomic\t{}", metrics.identity_to_genomic)?;
    writeln!(out, "coverage_to_genomic\t{}", metrics.coverage_to_genomic)?;
    writeln!(out, "concordance_to_genomic\t{}", metrics.concordance_to_genomic)?;
    writeln!(out, "identity_to_cds\t{}", metrics.identity_to_cds)?;
    writeln!(out, "coverage_to_cds\t{}", metrics.coverage_to_cds)?;
    writeln!(out, "concordance_to_cds\t{}", metrics.concordance_to_cds)?;
    writeln!(out, "hit_span\t{}", metrics.hit_span)
}
