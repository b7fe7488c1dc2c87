use thiserror::Error;

use slac_core::errors::SlacError;

#[derive(Error, Debug)]
pub enum MiniSlacError {
    /// No abbreviation of the SLAC fits the budget without losing a notable column.
    #[error("Budget of {budget} characters is too small, the shortest miniSLAC is {minimal}")]
    BudgetTooSmall { budget: usize, minimal: usize },

    #[error("Invalid abbreviator config: {0}")]
    InvalidConfig(String),

    #[error(
        "Missing or invalid file extension in abbreviator config file. It must be `toml`, `yaml` or `yml`"
    )]
    InvalidConfigFileType,

    #[error(transparent)]
    Core(#[from] SlacError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, MiniSlacError>;
