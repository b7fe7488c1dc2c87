use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use clap::ArgMatches;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use rayon::prelude::*;

use slac_core::SlacString;
use slac_core::consts::DEFAULT_KMER_SIZE;
use slac_core::metrics::AlignmentMetrics;
use slac_core::utils::get_dynamic_reader;
use slac_mini::{AbbreviatorConfig, abbreviate};

use crate::input::columns_from_triplet;
use crate::mini::handlers::{budget, load_config};

pub const OUTPUT_HEADER: &str = "name\tminislac\tslac\tidentity_to_genomic\tcoverage_to_genomic\tidentity_to_cds\tcoverage_to_cds";

/// One input row: a named pre-aligned triplet.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRow {
    pub line: usize,
    pub name: String,
    pub genomic: String,
    pub cds: String,
    pub hit: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchRecord {
    pub name: String,
    pub minislac: String,
    pub slac: String,
    pub metrics: AlignmentMetrics,
}

impl BatchRecord {
    pub fn to_tsv(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.name,
            self.minislac,
            self.slac,
            self.metrics.identity_to_genomic,
            self.metrics.coverage_to_genomic,
            self.metrics.identity_to_cds,
            self.metrics.coverage_to_cds
        )
    }
}

/// Parse a row, or `None` for blank lines, comments and the header.
pub fn parse_row(line: usize, text: &str) -> Result<Option<BatchRow>> {
    let text = text.trim_end_matches(['\r', '\n']);
    if text.trim().is_empty() || text.starts_with('#') || text.starts_with("name\t") {
        return Ok(None);
    }

    let fields: Vec<&str> = text.split('\t').collect();
    if fields.len() != 4 {
        bail!(
            "Line {}: expected 4 tab-separated fields (name, genomic, cds, hit), found {}",
            line,
            fields.len()
        );
    }

    Ok(Some(BatchRow {
        line,
        name: fields[0].to_string(),
        genomic: fields[1].to_string(),
        cds: fields[2].to_string(),
        hit: fields[3].to_string(),
    }))
}

pub fn read_rows(path: &Path) -> Result<Vec<BatchRow>> {
    let reader = get_dynamic_reader(path)
        .with_context(|| format!("Failed to open input table: {}", path.display()))?;

    let mut rows = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", i + 1))?;
        if let Some(row) = parse_row(i + 1, &line)? {
            rows.push(row);
        }
    }
    Ok(rows)
}

pub fn process_row(
    row: &BatchRow,
    budget: usize,
    config: &AbbreviatorConfig,
    auto_align: Option<usize>,
) -> Result<BatchRecord> {
    let columns = columns_from_triplet(&row.genomic, &row.cds, &row.hit, auto_align)?;
    let slac = SlacString::assemble(&columns)?;
    let mini = abbreviate(&slac, budget, config)?;
    let metrics = AlignmentMetrics::from_columns(&columns)?;

    Ok(BatchRecord {
        name: row.name.clone(),
        minislac: mini.text().to_string(),
        slac: slac.text(),
        metrics,
    })
}

pub fn run_batch(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .ok_or_else(|| anyhow!("An input table is required"))?;
    let output = matches.get_one::<String>("output");
    let budget = budget(matches)?;
    let config = load_config(matches)?;
    let auto_align = matches
        .get_flag("auto-align-cds")
        .then_some(DEFAULT_KMER_SIZE);

    let rows = read_rows(Path::new(input))?;
    info!("read {} rows from {}", rows.len(), input);

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = matches.get_one::<usize>("threads") {
        builder = builder.num_threads(*threads);
    }
    let pool = builder
        .build()
        .context("Failed to configure thread pool")?;
    info!("using {} threads", pool.current_num_threads());

    let pb = if matches.get_flag("progress") {
        let pb = ProgressBar::new(rows.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")?,
        );
        pb.set_message("Encoding alignments");
        pb
    } else {
        ProgressBar::hidden()
    };

    let results: Vec<Result<BatchRecord>> = pool.install(|| {
        rows.par_iter()
            .map(|row| {
                let result = process_row(row, budget, &config, auto_align)
                    .with_context(|| format!("Line {} ({})", row.line, row.name));
                pb.inc(1);
                result
            })
            .collect()
    });
    pb.finish_and_clear();

    let mut writer: Box<dyn Write> = match output {
        Some(p) => Box::new(BufWriter::new(
            File::create(p).with_context(|| format!("Failed to create output file: {}", p))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    writeln!(writer, "{}", OUTPUT_HEADER)?;
    let mut failed = 0;
    for result in &results {
        match result {
            Ok(record) => writeln!(writer, "{}", record.to_tsv())?,
            Err(e) => {
                error!("{:#}", e);
                failed += 1;
            }
        }
    }
    writer.flush()?;

    if failed > 0 {
        bail!("{} of {} rows failed", failed, results.len());
    }
    info!("encoded {} rows", results.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("# comment")]
    #[case("name\tgenomic\tcds\thit")]
    fn test_skipped_lines(#[case] line: &str) {
        assert_eq!(parse_row(1, line).unwrap(), None);
    }

    #[test]
    fn test_parse_row() {
        let row = parse_row(3, "g1\tAACC-GT\t-ACC-G-\tAACTAGT\r").unwrap().unwrap();
        assert_eq!(row.line, 3);
        assert_eq!(row.name, "g1");
        assert_eq!(row.hit, "AACTAGT");
    }

    #[test]
    fn test_parse_row_rejects_short_rows() {
        assert!(parse_row(2, "g1\tACGT\tACGT").is_err());
    }

    #[test]
    fn test_process_row() {
        let row = parse_row(1, "g1\tAACC-GT\t-ACC-G-\tAACTAGT").unwrap().unwrap();
        let record = process_row(&row, 50, &AbbreviatorConfig::default(), None).unwrap();
        assert_eq!(record.slac, "aACX^Gt");
        assert_eq!(record.minislac, "aACX^Gt");
        assert!(record.to_tsv().starts_with("g1\taACX^Gt\taACX^Gt\t"));
    }

    #[test]
    fn test_process_row_reports_budget() {
        let row = parse_row(1, "g1\tAACC-GT\t-ACC-G-\tAACTAGT").unwrap().unwrap();
        assert!(process_row(&row, 1, &AbbreviatorConfig::default(), None).is_err());
    }
}
