//! miniSLAC: SLAC strings shortened to a character budget.
//!
//! Runs of uneventful columns collapse to a glyph and a run length. Runs holding a
//! mismatch, a gap or an exon boundary are kept, and shortened behind an ellipsis glyph
//! only when the budget demands it. Each output token maps back to the SLAC columns
//! it stands for.
//!
//! # Example
//!
//! ```rust
//! use slac_core::SlacString;
//! use slac_mini::{AbbreviatorConfig, abbreviate};
//!
//! let slac = SlacString::from_text("AACXGGT^T", &[0]).unwrap();
//! let mini = abbreviate(&slac, 5, &AbbreviatorConfig::default()).unwrap();
//! assert_eq!(mini.text(), "!X|^|");
//! assert_eq!(mini.tokens()[0].range, 0..3);
//! ```

pub mod abbreviator;
pub mod blocks;
pub mod config;
pub mod errors;
pub mod runs;
pub mod token;

// re-exports
pub use abbreviator::{MiniSlacString, abbreviate};
pub use config::AbbreviatorConfig;
pub use token::{MiniToken, TokenForm};
