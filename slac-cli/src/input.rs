use std::ops::Range;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Arg, ArgAction, ArgMatches, Command};
use log::info;

use slac_core::consts::DEFAULT_KMER_SIZE;
use slac_core::io::read_aligned_fasta_file;
use slac_core::models::base::GAP_CHARS;
use slac_core::models::{AlignedColumns, Annotation, ColumnsBuilder};
use slac_core::utils::align_cds_to_genomic;

/// Arguments shared by every subcommand that reads one alignment.
pub fn with_input_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("fasta")
            .long("fasta")
            .short('f')
            .help("Aligned FASTA (optionally .gz) with `genomic`, `cds` and `hit` records")
            .conflicts_with_all(["genomic", "hit", "cds", "cigar", "exons"]),
    )
    .arg(
        Arg::new("genomic")
            .long("genomic")
            .short('g')
            .help("Genomic sequence, gapped unless --cigar is given")
            .required_unless_present("fasta"),
    )
    .arg(
        Arg::new("cds")
            .long("cds")
            .short('c')
            .help("Coding sequence, aligned to the genomic unless --cigar, --exons or --auto-align-cds is given"),
    )
    .arg(
        Arg::new("hit")
            .long("hit")
            .help("Hit sequence, gapped unless --cigar is given"),
    )
    .arg(
        Arg::new("cigar")
            .long("cigar")
            .help("Alignment of the ungapped hit to the ungapped genomic, e.g. 5M1I3M")
            .requires("hit"),
    )
    .arg(
        Arg::new("exons")
            .long("exons")
            .short('e')
            .help("Exons as 0-based half-open genomic ranges, e.g. 10-40,120-200"),
    )
    .arg(
        Arg::new("auto-align-cds")
            .long("auto-align-cds")
            .action(ArgAction::SetTrue)
            .help("Place an ungapped --cds onto the aligned genomic sequence")
            .conflicts_with("cigar"),
    )
    .arg(
        Arg::new("kmer-size")
            .long("kmer-size")
            .value_parser(clap::value_parser!(usize))
            .default_value("5")
            .help("Widest k-mer tried by --auto-align-cds"),
    )
}

/// Parse `10-40,120-200` into half-open ranges.
pub fn parse_exons(exons: &str) -> Result<Vec<Range<usize>>> {
    exons
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| {
            let (start, end) = part
                .trim()
                .split_once('-')
                .ok_or_else(|| anyhow!("Exon '{}' is not of the form start-end", part))?;
            let start: usize = start
                .parse()
                .with_context(|| format!("Invalid exon start in '{}'", part))?;
            let end: usize = end
                .parse()
                .with_context(|| format!("Invalid exon end in '{}'", part))?;
            if end < start {
                return Err(anyhow!("Exon '{}' ends before it starts", part));
            }
            Ok(start..end)
        })
        .collect()
}

///
/// Columns from three pre-aligned rows. With `auto_align` the coding row is taken as
/// ungapped and placed onto the genomic row first.
///
pub fn columns_from_triplet(
    genomic: &str,
    cds: &str,
    hit: &str,
    auto_align: Option<usize>,
) -> Result<AlignedColumns> {
    let cds = match auto_align {
        Some(kmer_size) if !cds.is_empty() => {
            let aligned = align_cds_to_genomic(genomic, cds, kmer_size)?;
            info!("auto-aligned coding sequence: {}", aligned);
            aligned
        }
        _ => cds.to_string(),
    };
    Ok(AlignedColumns::from_aligned_triplet(genomic, &cds, hit)?)
}

/// Build the alignment columns from whichever input arguments were given.
pub fn columns_from_matches(matches: &ArgMatches) -> Result<AlignedColumns> {
    let auto_align = matches.get_flag("auto-align-cds").then(|| {
        matches
            .get_one::<usize>("kmer-size")
            .copied()
            .unwrap_or(DEFAULT_KMER_SIZE)
    });

    if let Some(fasta) = matches.get_one::<String>("fasta") {
        let fasta = read_aligned_fasta_file(&PathBuf::from(fasta))?;
        return columns_from_triplet(&fasta.genomic, &fasta.cds, &fasta.hit, auto_align);
    }

    let genomic = matches
        .get_one::<String>("genomic")
        .ok_or_else(|| anyhow!("A genomic sequence is required"))?;
    let cds = matches.get_one::<String>("cds");
    let hit = matches.get_one::<String>("hit").cloned().unwrap_or_default();
    let cigar = matches.get_one::<String>("cigar");
    let exons = matches
        .get_one::<String>("exons")
        .map(|exons| parse_exons(exons))
        .transpose()?;

    if cigar.is_none() && exons.is_none() {
        return columns_from_triplet(
            genomic,
            cds.map(String::as_str).unwrap_or(""),
            &hit,
            auto_align,
        );
    }

    let mut builder = ColumnsBuilder::new()
        .with_genomic(genomic.as_str())
        .with_hit(hit);
    if let Some(cds) = cds {
        builder = builder.with_cds(cds.as_str());
    }

    let genomic_len = match cigar {
        Some(cigar) => {
            builder = builder.with_cigar(cigar)?;
            genomic.len()
        }
        None => genomic.bytes().filter(|b| !GAP_CHARS.contains(b)).count(),
    };

    let annotation = match exons {
        Some(exons) => Annotation::from_exons(&exons, genomic_len)?,
        None => Annotation::non_coding(genomic_len),
    };

    Ok(builder.with_annotation(annotation).finish()?)
}
