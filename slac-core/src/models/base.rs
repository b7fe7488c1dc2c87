use std::fmt::{self, Display};

use crate::errors::{Result, SlacError};

/// Gap characters accepted in aligned input.
pub const GAP_CHARS: [u8; 2] = [b'-', b' '];

///
/// A nucleotide in the genomic, coding or hit sequence.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Base {
    A,
    C,
    G,
    T,
    N,
}

impl Base {
    pub const ALL: [Base; 5] = [Base::A, Base::C, Base::G, Base::T, Base::N];

    /// Parse one byte of aligned sequence. Gaps come back as `None`.
    pub fn parse(byte: u8, coordinate: usize) -> Result<Option<Base>> {
        if GAP_CHARS.contains(&byte) {
            return Ok(None);
        }
        match byte.to_ascii_uppercase() {
            b'A' => Ok(Some(Base::A)),
            b'C' => Ok(Some(Base::C)),
            b'G' => Ok(Some(Base::G)),
            b'T' => Ok(Some(Base::T)),
            b'N' => Ok(Some(Base::N)),
            _ => Err(SlacError::InvalidBase {
                base: byte as char,
                coordinate,
            }),
        }
    }

    pub fn to_upper(self) -> char {
        match self {
            Base::A => 'A',
            Base::C => 'C',
            Base::G => 'G',
            Base::T => 'T',
            Base::N => 'N',
        }
    }

    pub fn to_lower(self) -> char {
        self.to_upper().to_ascii_lowercase()
    }
}

impl Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_upper())
    }
}

/// Parse a gapped sequence. Gaps are `None`.
pub fn parse_gapped(sequence: &str) -> Result<Vec<Option<Base>>> {
    sequence
        .bytes()
        .enumerate()
        .map(|(i, b)| Base::parse(b, i))
        .collect()
}

/// Parse an ungapped sequence. A gap character is reported as an invalid base.
pub fn parse_ungapped(sequence: &str) -> Result<Vec<Base>> {
    sequence
        .bytes()
        .enumerate()
        .map(|(i, b)| {
            Base::parse(b, i)?.ok_or(SlacError::InvalidBase {
                base: b as char,
                coordinate: i,
            })
        })
        .collect()
}
