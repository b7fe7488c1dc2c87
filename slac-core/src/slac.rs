use std::fmt::{self, Display};
use std::ops::Range;

use log::debug;

use crate::alphabet::{RenderMode, Symbol};
use crate::encoder::encode_column;
use crate::errors::{Result, SlacError};
use crate::models::{AlignedColumn, AlignedColumns};

///
/// The full, one-symbol-per-column encoding of an alignment.
///
/// Immutable once assembled. Position `i` in the string is column `i` of the alignment.
///
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlacString {
    symbols: Vec<Symbol>,
    boundary_indices: Vec<usize>,
    notable_indices: Vec<usize>,
    coding_track: Vec<Option<usize>>,
}

impl SlacString {
    /// Encode every column of a validated column set.
    pub fn assemble(columns: &AlignedColumns) -> Result<Self> {
        Self::assemble_columns(columns.columns())
    }

    ///
    /// Encode a raw column slice. Columns that break the coordinate model invariant fail
    /// with `InvalidColumn`.
    ///
    pub fn assemble_columns(columns: &[AlignedColumn]) -> Result<Self> {
        let mut symbols = Vec::with_capacity(columns.len());
        let mut boundary_indices = Vec::new();
        let mut notable_indices = Vec::new();

        for (i, column) in columns.iter().enumerate() {
            let symbol = encode_column(column, i)?;
            if column.is_boundary {
                boundary_indices.push(i);
            }
            if column.is_boundary || symbol.is_notable() {
                notable_indices.push(i);
            }
            symbols.push(symbol);
        }

        debug!(
            "assembled SLAC of {} symbols ({} boundaries, {} notable)",
            symbols.len(),
            boundary_indices.len(),
            notable_indices.len()
        );

        Ok(SlacString {
            symbols,
            boundary_indices,
            notable_indices,
            coding_track: columns.iter().map(|c| c.coding_index).collect(),
        })
    }

    ///
    /// Rebuild from stored SLAC text. Boundaries can't be recovered from the text alone,
    /// so they are supplied by the caller; notable indices are recomputed.
    ///
    pub fn from_text(text: &str, boundary_indices: &[usize]) -> Result<Self> {
        let symbols = text
            .chars()
            .enumerate()
            .map(|(index, c)| Symbol::from_char(c).ok_or(SlacError::InvalidSymbol { symbol: c, index }))
            .collect::<Result<Vec<Symbol>>>()?;

        let mut boundary_indices = boundary_indices.to_vec();
        boundary_indices.sort_unstable();
        boundary_indices.dedup();
        if let Some(&out_of_range) = boundary_indices.iter().find(|&&i| i >= symbols.len()) {
            return Err(SlacError::malformed(
                out_of_range,
                "boundary index outside the SLAC string",
            ));
        }

        let notable_indices = symbols
            .iter()
            .enumerate()
            .filter(|(i, s)| s.is_notable() || boundary_indices.binary_search(i).is_ok())
            .map(|(i, _)| i)
            .collect();

        let coding_track = vec![None; symbols.len()];
        Ok(SlacString {
            symbols,
            boundary_indices,
            notable_indices,
            coding_track,
        })
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn boundary_indices(&self) -> &[usize] {
        &self.boundary_indices
    }

    /// Sorted union of boundaries, mismatches and gaps.
    pub fn notable_indices(&self) -> &[usize] {
        &self.notable_indices
    }

    pub fn coding_track(&self) -> &[Option<usize>] {
        &self.coding_track
    }

    pub fn is_notable(&self, index: usize) -> bool {
        self.notable_indices.binary_search(&index).is_ok()
    }

    /// True if any column in `range` is notable.
    pub fn has_notable_in(&self, range: Range<usize>) -> bool {
        let first = self.notable_indices.partition_point(|&i| i < range.start);
        self.notable_indices
            .get(first)
            .is_some_and(|&i| i < range.end)
    }

    /// The canonical text.
    pub fn text(&self) -> String {
        self.render(RenderMode::Bases)
    }

    pub fn render(&self, mode: RenderMode) -> String {
        self.symbols.iter().map(|s| s.render(mode)).collect()
    }

    /// Canonical text of a column range.
    pub fn slice_text(&self, range: Range<usize>) -> String {
        self.symbols[range].iter().map(|s| s.to_char()).collect()
    }
}

impl Display for SlacString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}
