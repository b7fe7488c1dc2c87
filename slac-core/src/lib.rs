//! Encode a search hit aligned against a gene as one self-describing string.
//!
//! A SLAC string has one character per alignment column. Each character tells the base,
//! whether the position is inside an exon, and how the hit relates to the genomic
//! sequence there (match, mismatch, insertion or deletion).
//!
//! - `models` holds the shared column frame: bases, alignment operations, exon annotation
//!   and the validated column sequence
//! - `alphabet` is the closed SLAC alphabet and its legend
//! - `encoder` maps a single column to its symbol
//! - `slac` assembles the full string and its boundary/notable metadata
//! - `metrics` derives identity and coverage figures from the columns
//!
//! # Example
//!
//! ```rust
//! use slac_core::SlacString;
//! use slac_core::models::AlignedColumns;
//!
//! # fn main() -> slac_core::errors::Result<()> {
//! let columns = AlignedColumns::from_aligned_triplet("AACC-GT", "-ACC-G-", "AACTAGT")?;
//! let slac = SlacString::assemble(&columns)?;
//! assert_eq!(slac.text(), "aACX^Gt");
//! # Ok(())
//! # }
//! ```

pub mod alphabet;
pub mod encoder;
pub mod errors;
pub mod io;
pub mod metrics;
pub mod models;
pub mod slac;
pub mod utils;

// re-exports
pub use alphabet::{LEGEND, RenderMode, Symbol, SymbolClass};
pub use metrics::AlignmentMetrics;
pub use slac::SlacString;

pub mod consts {
    pub const DEFAULT_KMER_SIZE: usize = 5;
    pub const GENOMIC_RECORD: &str = "genomic";
    pub const CDS_RECORD: &str = "cds";
    pub const HIT_RECORD: &str = "hit";
}
