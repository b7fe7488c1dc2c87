use std::io::Read;
use std::path::Path;

use anyhow::Context;
use bio::io::fasta;
use log::warn;

use crate::consts::{CDS_RECORD, GENOMIC_RECORD, HIT_RECORD};
use crate::errors::{Result, SlacError};
use crate::utils::get_dynamic_reader;

/// The aligned rows read from a FASTA file. Absent `cds` or `hit` records are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignedFasta {
    pub genomic: String,
    pub cds: String,
    pub hit: String,
}

///
/// Read the `genomic`, `cds` and `hit` records of an aligned FASTA. Other records are
/// skipped; only the first record of each name is used.
///
pub fn read_aligned_fasta<R: Read>(reader: R) -> Result<AlignedFasta> {
    let mut genomic = None;
    let mut cds = None;
    let mut hit = None;

    for record in fasta::Reader::new(reader).records() {
        let record = record?;
        let slot = match record.id() {
            GENOMIC_RECORD => &mut genomic,
            CDS_RECORD => &mut cds,
            HIT_RECORD => &mut hit,
            other => {
                warn!("skipping FASTA record '{}'", other);
                continue;
            }
        };
        if slot.is_some() {
            warn!("duplicate FASTA record '{}' ignored", record.id());
            continue;
        }
        *slot = Some(String::from_utf8_lossy(record.seq()).into_owned());
    }

    Ok(AlignedFasta {
        genomic: genomic.ok_or(SlacError::MissingInput("FASTA has no 'genomic' record"))?,
        cds: cds.unwrap_or_default(),
        hit: hit.unwrap_or_default(),
    })
}

/// [`read_aligned_fasta`] over a plain or gzip'd file.
pub fn read_aligned_fasta_file(path: &Path) -> anyhow::Result<AlignedFasta> {
    let reader = get_dynamic_reader(path)?;
    read_aligned_fasta(reader).with_context(|| format!("Failed to read FASTA: {:?}", path))
}
