use std::fmt::{self, Display};
use std::str::FromStr;

use crate::errors::{Result, SlacError};

/// The kind of one alignment operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OpKind {
    /// Aligned pair, identity not asserted (`M`).
    Match,
    /// Aligned pair asserted identical (`=`).
    SequenceMatch,
    /// Aligned pair asserted different (`X`).
    Mismatch,
    /// Hit base with no genomic counterpart (`I`).
    Insertion,
    /// Genomic base with no hit counterpart (`D`, `N`).
    Deletion,
}

impl OpKind {
    pub fn consumes_genomic(&self) -> bool {
        !matches!(self, OpKind::Insertion)
    }

    pub fn consumes_hit(&self) -> bool {
        !matches!(self, OpKind::Deletion)
    }

    fn code(&self) -> char {
        match self {
            OpKind::Match => 'M',
            OpKind::SequenceMatch => '=',
            OpKind::Mismatch => 'X',
            OpKind::Insertion => 'I',
            OpKind::Deletion => 'D',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CigarOp {
    pub kind: OpKind,
    pub len: usize,
}

impl CigarOp {
    pub fn new(kind: OpKind, len: usize) -> Self {
        CigarOp { kind, len }
    }
}

///
/// Caller-supplied correspondence between hit and genomic coordinates.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Alignment {
    pub ops: Vec<CigarOp>,
}

impl Alignment {
    pub fn new(ops: Vec<CigarOp>) -> Self {
        Alignment { ops }
    }

    /// Number of genomic bases the operations consume.
    pub fn genomic_len(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| op.kind.consumes_genomic())
            .fold(0usize, |total, op| total.saturating_add(op.len))
    }

    /// Number of hit bases the operations consume.
    pub fn hit_len(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| op.kind.consumes_hit())
            .fold(0usize, |total, op| total.saturating_add(op.len))
    }

    /// Number of columns the alignment spans. Saturates at `usize::MAX`.
    pub fn column_count(&self) -> usize {
        self.ops
            .iter()
            .fold(0usize, |total, op| total.saturating_add(op.len))
    }
}

impl FromStr for Alignment {
    type Err = SlacError;

    fn from_str(s: &str) -> Result<Self> {
        let mut ops = Vec::new();
        let mut len: Option<usize> = None;
        let mut token_start = 0;

        for (offset, ch) in s.char_indices() {
            if let Some(digit) = ch.to_digit(10) {
                if len.is_none() {
                    token_start = offset;
                }
                len = len
                    .unwrap_or(0)
                    .checked_mul(10)
                    .and_then(|n| n.checked_add(digit as usize));
                if len.is_none() {
                    return Err(SlacError::malformed(token_start, "op length overflows"));
                }
                continue;
            }

            let kind = match ch {
                'M' => OpKind::Match,
                '=' => OpKind::SequenceMatch,
                'X' => OpKind::Mismatch,
                'I' => OpKind::Insertion,
                'D' | 'N' => OpKind::Deletion,
                'S' | 'H' | 'P' => {
                    return Err(SlacError::malformed(
                        offset,
                        format!("clipping/padding op '{}' is not supported", ch),
                    ));
                }
                _ => {
                    return Err(SlacError::malformed(
                        offset,
                        format!("unknown alignment op '{}'", ch),
                    ));
                }
            };

            match len.take() {
                Some(0) => {
                    return Err(SlacError::malformed(token_start, "zero-length op"));
                }
                Some(n) => ops.push(CigarOp::new(kind, n)),
                None => {
                    return Err(SlacError::malformed(
                        offset,
                        format!("op '{}' has no length", ch),
                    ));
                }
            }
        }

        if len.is_some() {
            return Err(SlacError::malformed(token_start, "trailing length without op"));
        }

        Ok(Alignment { ops })
    }
}

impl Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for op in &self.ops {
            write!(f, "{}{}", op.len, op.kind.code())?;
        }
        Ok(())
    }
}
