use crate::alphabet::Symbol;
use crate::errors::{Result, SlacError};
use crate::models::AlignedColumn;

///
/// Map one column to its SLAC symbol.
///
/// Priority, highest first: insertion, hit deletion, mismatch, match. Coding state picks
/// between sibling symbols. A column with both bases gapped is rejected.
///
/// # Arguments
///
/// - column: the column to encode
/// - index: its position, reported on error
///
pub fn encode_column(column: &AlignedColumn, index: usize) -> Result<Symbol> {
    let symbol = match (column.genomic, column.hit) {
        (None, None) => return Err(SlacError::InvalidColumn { index }),
        (None, Some(_)) => Symbol::Insertion,
        (Some(_), None) if column.is_coding => Symbol::CodingDeletion,
        (Some(_), None) => Symbol::NonCodingDeletion,
        (Some(g), Some(h)) if g != h && column.is_coding => Symbol::CodingMismatch,
        (Some(g), Some(h)) if g != h => Symbol::NonCodingMismatch,
        (Some(g), Some(_)) if column.is_coding => Symbol::CodingMatch(g),
        (Some(g), Some(_)) => Symbol::NonCodingMatch(g),
    };
    Ok(symbol)
}
