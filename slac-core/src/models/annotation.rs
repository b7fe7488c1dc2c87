use std::ops::Range;

use crate::errors::{Result, SlacError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FeatureKind {
    Exon,
    Intron,
}

/// An annotated segment of genomic coordinates, `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Feature {
    pub start: usize,
    pub end: usize,
    pub kind: FeatureKind,
}

impl Feature {
    pub fn exon(start: usize, end: usize) -> Self {
        Feature {
            start,
            end,
            kind: FeatureKind::Exon,
        }
    }

    pub fn intron(start: usize, end: usize) -> Self {
        Feature {
            start,
            end,
            kind: FeatureKind::Intron,
        }
    }
}

///
/// Per-base coding flags over the (ungapped) genomic sequence.
///
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Annotation {
    flags: Vec<bool>,
}

impl Annotation {
    /// Raw flags, one per genomic base. Coverage is checked when columns are built.
    pub fn from_flags(flags: Vec<bool>) -> Self {
        Annotation { flags }
    }

    /// Every base non-coding.
    pub fn non_coding(genomic_len: usize) -> Self {
        Annotation {
            flags: vec![false; genomic_len],
        }
    }

    /// Every base coding.
    pub fn all_coding(genomic_len: usize) -> Self {
        Annotation {
            flags: vec![true; genomic_len],
        }
    }

    ///
    /// Build from exon and intron segments that must tile `[0, genomic_len)` exactly once.
    ///
    pub fn from_features(features: &[Feature], genomic_len: usize) -> Result<Self> {
        let mut coverage: Vec<Option<bool>> = vec![None; genomic_len];

        for feature in features {
            for pos in feature.start..feature.end {
                match coverage.get_mut(pos) {
                    Some(slot) if slot.is_none() => {
                        *slot = Some(feature.kind == FeatureKind::Exon)
                    }
                    // doubly covered or outside the genomic span
                    _ => return Err(SlacError::IncompleteAnnotation { coordinate: pos }),
                }
            }
        }

        let flags = coverage
            .into_iter()
            .enumerate()
            .map(|(pos, flag)| flag.ok_or(SlacError::IncompleteAnnotation { coordinate: pos }))
            .collect::<Result<Vec<bool>>>()?;

        Ok(Annotation { flags })
    }

    /// Mark the given exon ranges coding and everything else intronic.
    pub fn from_exons(exons: &[Range<usize>], genomic_len: usize) -> Result<Self> {
        let mut flags = vec![false; genomic_len];
        for exon in exons {
            for pos in exon.clone() {
                match flags.get_mut(pos) {
                    Some(flag) if !*flag => *flag = true,
                    _ => return Err(SlacError::IncompleteAnnotation { coordinate: pos }),
                }
            }
        }
        Ok(Annotation { flags })
    }

    /// Checks the flags cover exactly `genomic_len` bases.
    pub fn validate(&self, genomic_len: usize) -> Result<()> {
        if self.flags.len() != genomic_len {
            return Err(SlacError::IncompleteAnnotation {
                coordinate: self.flags.len().min(genomic_len),
            });
        }
        Ok(())
    }

    pub fn is_coding(&self, genomic_pos: usize) -> bool {
        self.flags.get(genomic_pos).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn coding_len(&self) -> usize {
        self.flags.iter().filter(|f| **f).count()
    }

    pub fn flags(&self) -> &[bool] {
        &self.flags
    }

    /// Exon runs as half-open genomic ranges.
    pub fn exons(&self) -> Vec<Range<usize>> {
        let mut exons = Vec::new();
        let mut start = None;
        for (pos, &coding) in self.flags.iter().enumerate() {
            match (coding, start) {
                (true, None) => start = Some(pos),
                (false, Some(s)) => {
                    exons.push(s..pos);
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            exons.push(s..self.flags.len());
        }
        exons
    }
}
