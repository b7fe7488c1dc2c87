use std::ffi::OsStr;
use std::fs::read_to_string;
use std::path::Path;

use serde::{Deserialize, Serialize};

use slac_core::alphabet::{is_glyph_char, is_slac_char};

use crate::errors::{MiniSlacError, Result};

pub const DEFAULT_DIGIT_WIDTH: usize = 2;
pub const DEFAULT_OVERFLOW_MARKER: char = '+';
pub const MAX_DIGIT_WIDTH: usize = 9;

///
/// Knobs for the miniSLAC abbreviator. Every field is optional in config files.
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AbbreviatorConfig {
    /// Most digits a run-length numeral may use before it saturates.
    pub digit_width: usize,
    /// Appended to a saturated numeral, as in `99+`.
    pub overflow_marker: char,
    /// Hide numerals as a last resort when the budget is still exceeded.
    pub elide_numerals: bool,
}

impl Default for AbbreviatorConfig {
    fn default() -> Self {
        AbbreviatorConfig {
            digit_width: DEFAULT_DIGIT_WIDTH,
            overflow_marker: DEFAULT_OVERFLOW_MARKER,
            elide_numerals: true,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum ConfigFileType {
    Toml,
    Yaml,
}

impl ConfigFileType {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(OsStr::to_str) {
            Some("toml") => Ok(ConfigFileType::Toml),
            Some("yaml") | Some("yml") => Ok(ConfigFileType::Yaml),
            _ => Err(MiniSlacError::InvalidConfigFileType),
        }
    }
}

impl AbbreviatorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.digit_width == 0 || self.digit_width > MAX_DIGIT_WIDTH {
            return Err(MiniSlacError::InvalidConfig(format!(
                "digit_width must be between 1 and {}, got {}",
                MAX_DIGIT_WIDTH, self.digit_width
            )));
        }
        let marker = self.overflow_marker;
        if marker.is_ascii_digit() || is_slac_char(marker) || is_glyph_char(marker) {
            return Err(MiniSlacError::InvalidConfig(format!(
                "overflow_marker '{}' collides with a digit or a SLAC/glyph character",
                marker
            )));
        }
        Ok(())
    }

    /// Largest count a numeral shows without saturating.
    pub fn max_numeral(&self) -> usize {
        10usize.pow(self.digit_width as u32) - 1
    }

    /// Decimal numeral for `count`, saturated to `max_numeral` plus the overflow marker.
    pub fn numeral(&self, count: usize) -> String {
        let max = self.max_numeral();
        if count > max {
            format!("{}{}", max, self.overflow_marker)
        } else {
            count.to_string()
        }
    }
}

impl TryFrom<&Path> for AbbreviatorConfig {
    type Error = MiniSlacError;

    fn try_from(path: &Path) -> Result<Self> {
        let file_type = ConfigFileType::from_path(path)?;
        let raw = read_to_string(path)?;
        let config: AbbreviatorConfig = match file_type {
            ConfigFileType::Toml => toml::from_str(&raw)?,
            ConfigFileType::Yaml => serde_yaml::from_str(&raw)?,
        };
        config.validate()?;
        Ok(config)
    }
}
