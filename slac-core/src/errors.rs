use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlacError {
    /// The alignment operations don't reconcile with the supplied sequences.
    #[error("Malformed alignment at coordinate {coordinate}: {reason}")]
    MalformedAlignment { coordinate: usize, reason: String },

    /// Coding/non-coding flags leave a genomic position uncovered (or cover one twice).
    #[error("Incomplete annotation at genomic coordinate {coordinate}")]
    IncompleteAnnotation { coordinate: usize },

    /// A column with both bases gapped reached the encoder.
    #[error("Invalid column at index {index}: genomic and hit bases are both gaps")]
    InvalidColumn { index: usize },

    #[error("Invalid base '{base}' at coordinate {coordinate}")]
    InvalidBase { base: char, coordinate: usize },

    #[error("Coding sequence disagrees with the genomic sequence at coding index {index}: {reason}")]
    CodingSequenceMismatch { index: usize, reason: String },

    #[error("Character '{symbol}' at index {index} is not part of the SLAC alphabet")]
    InvalidSymbol { symbol: char, index: usize },

    #[error("Missing input: {0}")]
    MissingInput(&'static str),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SlacError>;

impl SlacError {
    pub(crate) fn malformed(coordinate: usize, reason: impl Into<String>) -> Self {
        SlacError::MalformedAlignment {
            coordinate,
            reason: reason.into(),
        }
    }
}
