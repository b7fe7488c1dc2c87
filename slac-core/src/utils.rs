use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::Context;
use flate2::read::MultiGzDecoder;
use log::debug;

use crate::errors::{self, SlacError};
use crate::models::base::GAP_CHARS;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> anyhow::Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

fn is_gap(b: u8) -> bool {
    GAP_CHARS.contains(&b)
}

///
/// Place an ungapped coding sequence onto an aligned genomic sequence.
///
/// Walks the genomic sequence and, at each base, tries to match the next `kmer_size`
/// coding bases, shrinking the window down to one base. Where nothing matches the coding
/// sequence gets a gap. Genomic gaps always get a gap. Assumes every exon is at least
/// `kmer_size` long and the coding sequence occurs in the genomic sequence exactly.
///
/// # Arguments
///
/// - aligned_genomic: the genomic row of the alignment, `-` or space for gaps
/// - cds: the coding sequence without gaps
/// - kmer_size: widest window to try at each position
///
pub fn align_cds_to_genomic(
    aligned_genomic: &str,
    cds: &str,
    kmer_size: usize,
) -> errors::Result<String> {
    let genomic = aligned_genomic.as_bytes();
    let cds = cds.as_bytes();

    if let Some(pos) = cds.iter().position(|&b| is_gap(b)) {
        return Err(SlacError::CodingSequenceMismatch {
            index: pos,
            reason: "the coding sequence must not contain gaps to be auto-aligned".to_string(),
        });
    }

    let mut aligned = String::with_capacity(genomic.len());
    let mut cds_index = 0;
    let mut i = 0;

    while i < genomic.len() {
        if is_gap(genomic[i]) {
            aligned.push('-');
            i += 1;
            continue;
        }

        let matched = (1..=kmer_size.max(1)).rev().find_map(|k| {
            let genomic_kmer = &genomic[i..(i + k).min(genomic.len())];
            let cds_kmer = &cds[cds_index..(cds_index + k).min(cds.len())];
            genomic_kmer
                .eq_ignore_ascii_case(cds_kmer)
                .then_some(cds_kmer)
        });

        match matched {
            Some(kmer) => {
                aligned.extend(kmer.iter().map(|&b| b as char));
                cds_index += kmer.len();
                i += kmer.len();
            }
            None => {
                aligned.push('-');
                i += 1;
            }
        }
    }

    if cds_index < cds.len() {
        return Err(SlacError::CodingSequenceMismatch {
            index: cds_index,
            reason: format!(
                "{} bases of the coding sequence were not placed on the genomic sequence",
                cds.len() - cds_index
            ),
        });
    }

    debug!(
        "placed {} coding bases onto {} aligned genomic columns",
        cds.len(),
        genomic.len()
    );

    Ok(aligned)
}
