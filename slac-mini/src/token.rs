use std::ops::Range;

use serde::{Deserialize, Serialize};

use slac_core::{SlacString, Symbol, SymbolClass};

use crate::config::AbbreviatorConfig;
use crate::runs::ClassRun;

/// How a token is drawn. `numeral` is whether the run length is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "lowercase")]
pub enum TokenForm {
    /// The run's own SLAC characters.
    Verbatim,
    /// Run glyph plus the run length.
    Collapsed { numeral: bool },
    /// Visible SLAC columns of a truncated run, an ellipsis glyph and the run length.
    Window { window: Range<usize>, numeral: bool },
    /// Ellipsis glyph plus the run length.
    Marker { numeral: bool },
}

/// One token of a miniSLAC and the source columns it stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiniToken {
    pub class: SymbolClass,
    pub representative: Symbol,
    pub range: Range<usize>,
    pub count: usize,
    pub form: TokenForm,
    pub truncated: bool,
}

impl MiniToken {
    pub fn verbatim(index: usize, symbol: Symbol) -> Self {
        MiniToken {
            class: symbol.class(),
            representative: symbol,
            range: index..index + 1,
            count: 1,
            form: TokenForm::Verbatim,
            truncated: false,
        }
    }

    pub fn from_run(run: &ClassRun) -> Self {
        let form = if run.protected {
            TokenForm::Verbatim
        } else {
            TokenForm::Collapsed { numeral: true }
        };
        MiniToken {
            class: run.class,
            representative: run.representative,
            range: run.range.clone(),
            count: run.len(),
            form,
            truncated: false,
        }
    }

    pub fn is_protected_form(&self) -> bool {
        !matches!(self.form, TokenForm::Collapsed { .. })
    }

    fn numeral_width(&self, shown: bool, config: &AbbreviatorConfig) -> usize {
        if shown && self.count >= 2 {
            config.numeral(self.count).chars().count()
        } else {
            0
        }
    }

    /// Rendered width of this token under `form`.
    pub fn width_of(&self, form: &TokenForm, config: &AbbreviatorConfig) -> usize {
        match form {
            TokenForm::Verbatim => self.range.len(),
            TokenForm::Collapsed { numeral } | TokenForm::Marker { numeral } => {
                1 + self.numeral_width(*numeral, config)
            }
            TokenForm::Window { window, numeral } => {
                window.len() + 1 + self.numeral_width(*numeral, config)
            }
        }
    }

    pub fn width(&self, config: &AbbreviatorConfig) -> usize {
        self.width_of(&self.form, config)
    }

    /// Width saved by hiding the numeral, if there is one to hide.
    pub fn numeral_saving(&self, config: &AbbreviatorConfig) -> usize {
        match self.elided_form() {
            Some(form) => self.width(config).saturating_sub(self.width_of(&form, config)),
            None => 0,
        }
    }

    /// This token's form with the numeral hidden. A verbatim run turns into a bare marker.
    pub fn elided_form(&self) -> Option<TokenForm> {
        match &self.form {
            TokenForm::Verbatim if self.range.len() >= 2 => {
                Some(TokenForm::Marker { numeral: false })
            }
            TokenForm::Collapsed { numeral: true } if self.count >= 2 => {
                Some(TokenForm::Collapsed { numeral: false })
            }
            TokenForm::Window {
                window,
                numeral: true,
            } => Some(TokenForm::Window {
                window: window.clone(),
                numeral: false,
            }),
            TokenForm::Marker { numeral: true } if self.count >= 2 => {
                Some(TokenForm::Marker { numeral: false })
            }
            _ => None,
        }
    }

    pub fn set_form(&mut self, form: TokenForm) {
        self.truncated = matches!(form, TokenForm::Window { .. } | TokenForm::Marker { .. });
        self.form = form;
    }

    pub fn render(&self, slac: &SlacString, config: &AbbreviatorConfig) -> String {
        let numeral = |shown: bool| {
            if shown && self.count >= 2 {
                config.numeral(self.count)
            } else {
                String::new()
            }
        };
        match &self.form {
            TokenForm::Verbatim => slac.slice_text(self.range.clone()),
            TokenForm::Collapsed { numeral: shown } => {
                format!("{}{}", self.representative.run_glyph(), numeral(*shown))
            }
            TokenForm::Window {
                window,
                numeral: shown,
            } => format!(
                "{}{}{}",
                slac.slice_text(window.clone()),
                self.representative.ellipsis_glyph(),
                numeral(*shown)
            ),
            TokenForm::Marker { numeral: shown } => {
                format!("{}{}", self.representative.ellipsis_glyph(), numeral(*shown))
            }
        }
    }
}
