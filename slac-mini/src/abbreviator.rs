use std::fmt::{self, Display};
use std::ops::Range;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use slac_core::SlacString;

use crate::config::AbbreviatorConfig;
use crate::errors::{MiniSlacError, Result};
use crate::runs::class_runs;
use crate::token::{MiniToken, TokenForm};

///
/// An abbreviated SLAC and the source columns behind each of its tokens.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiniSlacString {
    text: String,
    tokens: Vec<MiniToken>,
    /// Character span of each token in `text`.
    spans: Vec<Range<usize>>,
    source_len: usize,
}

impl MiniSlacString {
    fn render(tokens: Vec<MiniToken>, slac: &SlacString, config: &AbbreviatorConfig) -> Self {
        let mut text = String::new();
        let mut spans = Vec::with_capacity(tokens.len());
        for token in &tokens {
            let start = text.len();
            text.push_str(&token.render(slac, config));
            spans.push(start..text.len());
        }
        MiniSlacString {
            text,
            tokens,
            spans,
            source_len: slac.len(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[MiniToken] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Length of the SLAC this was derived from.
    pub fn source_len(&self) -> usize {
        self.source_len
    }

    /// Rendered text of one token.
    pub fn token_text(&self, token_index: usize) -> Option<&str> {
        self.spans
            .get(token_index)
            .map(|span| &self.text[span.clone()])
    }

    /// The full SLAC columns a token stands for.
    pub fn expand(&self, token_index: usize, slac: &SlacString) -> Option<String> {
        let token = self.tokens.get(token_index)?;
        (token.range.end <= slac.len()).then(|| slac.slice_text(token.range.clone()))
    }
}

impl Display for MiniSlacString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

///
/// Abbreviate a SLAC to at most `budget` characters.
///
/// Uneventful runs collapse to a glyph and a run length. Runs holding a notable column
/// are shortened only as far as needed, widest first, and always keep either a notable
/// column or an ellipsis marker in place.
///
/// # Arguments
///
/// - slac: the full SLAC
/// - budget: the maximum output length in characters
/// - config: numeral and elision settings
///
pub fn abbreviate(
    slac: &SlacString,
    budget: usize,
    config: &AbbreviatorConfig,
) -> Result<MiniSlacString> {
    config.validate()?;

    if slac.len() <= budget {
        let tokens = slac
            .symbols()
            .iter()
            .enumerate()
            .map(|(i, symbol)| MiniToken::verbatim(i, *symbol))
            .collect();
        return Ok(MiniSlacString::render(tokens, slac, config));
    }

    let runs = class_runs(slac);
    let mut tokens: Vec<MiniToken> = runs.iter().map(MiniToken::from_run).collect();

    let minimal = minimal_length(&tokens, config);
    if minimal > budget {
        return Err(MiniSlacError::BudgetTooSmall { budget, minimal });
    }

    let mut total: usize = tokens.iter().map(|t| t.width(config)).sum();
    debug!(
        "collapsed {} columns into {} runs ({} protected), width {} for budget {}",
        slac.len(),
        tokens.len(),
        runs.iter().filter(|r| r.protected).count(),
        total,
        budget
    );

    while total > budget {
        let Some((index, form)) = pick_truncation(&tokens, slac, config) else {
            break;
        };
        let token = &mut tokens[index];
        let before = token.width(config);
        token.set_form(form);
        total = total - before + token.width(config);
        trace!(
            "truncated run {:?} to {:?}, width {}",
            token.range, token.form, total
        );
    }

    if total > budget && config.elide_numerals {
        debug!("protected runs exhausted at width {}, eliding numerals", total);
        while total > budget {
            let Some(index) = pick_elision(&tokens, config) else {
                break;
            };
            let token = &mut tokens[index];
            let before = token.width(config);
            if let Some(form) = token.elided_form() {
                token.set_form(form);
            }
            total = total - before + token.width(config);
            trace!("elided numeral of run {:?}, width {}", token.range, total);
        }
    }

    if total > budget {
        return Err(MiniSlacError::BudgetTooSmall { budget, minimal });
    }

    debug!("abbreviated {} columns to {} characters", slac.len(), total);
    Ok(MiniSlacString::render(tokens, slac, config))
}

/// Shortest length any abbreviation of these runs can reach.
fn minimal_length(tokens: &[MiniToken], config: &AbbreviatorConfig) -> usize {
    if config.elide_numerals {
        return tokens.len();
    }
    tokens
        .iter()
        .map(|t| {
            if t.is_protected_form() {
                let marker = TokenForm::Marker { numeral: true };
                t.range.len().min(t.width_of(&marker, config))
            } else {
                t.width(config)
            }
        })
        .sum()
}

/// Widest protected token that can get narrower (ties leftmost), with its next form.
fn pick_truncation(
    tokens: &[MiniToken],
    slac: &SlacString,
    config: &AbbreviatorConfig,
) -> Option<(usize, TokenForm)> {
    let mut best: Option<(usize, usize, TokenForm)> = None;
    for (i, token) in tokens.iter().enumerate() {
        if !token.is_protected_form() {
            continue;
        }
        let width = token.width(config);
        if best.as_ref().is_some_and(|(_, w, _)| *w >= width) {
            continue;
        }
        if let Some(form) = next_narrower(token, slac, config) {
            best = Some((i, width, form));
        }
    }
    best.map(|(i, _, form)| (i, form))
}

/// Token whose numeral saves the most width when hidden (ties leftmost).
fn pick_elision(tokens: &[MiniToken], config: &AbbreviatorConfig) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (i, token) in tokens.iter().enumerate() {
        let saving = token.numeral_saving(config);
        if saving > 0 && best.is_none_or(|(_, s)| saving > s) {
            best = Some((i, saving));
        }
    }
    best.map(|(i, _)| i)
}

///
/// The next form of a protected token that is strictly narrower than its current one.
/// Trims the visible window one column from each end while a notable column stays in it.
/// Falls back to a bare marker once the window is down to one column.
///
fn next_narrower(
    token: &MiniToken,
    slac: &SlacString,
    config: &AbbreviatorConfig,
) -> Option<TokenForm> {
    let current = token.width(config);
    let mut window = match &token.form {
        TokenForm::Verbatim => token.range.clone(),
        TokenForm::Window { window, .. } => window.clone(),
        _ => return None,
    };

    while window.len() > 1 {
        let trimmed = trim_window(window.clone(), slac);
        if trimmed == window {
            break;
        }
        window = trimmed;
        let candidate = TokenForm::Window {
            window: window.clone(),
            numeral: true,
        };
        if token.width_of(&candidate, config) < current {
            return Some(candidate);
        }
    }

    let marker = TokenForm::Marker { numeral: true };
    (token.width_of(&marker, config) < current).then_some(marker)
}

fn trim_window(mut window: Range<usize>, slac: &SlacString) -> Range<usize> {
    if window.len() > 1 && slac.has_notable_in(window.start + 1..window.end) {
        window.start += 1;
    }
    if window.len() > 1 && slac.has_notable_in(window.start..window.end - 1) {
        window.end -= 1;
    }
    window
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn example() -> SlacString {
        SlacString::from_text("AACXGGT^T", &[0]).unwrap()
    }

    #[fixture]
    fn config() -> AbbreviatorConfig {
        AbbreviatorConfig::default()
    }

    #[rstest]
    fn test_identity_when_it_fits(example: SlacString, config: AbbreviatorConfig) {
        let mini = abbreviate(&example, 9, &config).unwrap();
        assert_eq!(mini.text(), "AACXGGT^T");
        assert_eq!(mini.tokens().len(), 9);
        assert!(mini.tokens().iter().all(|t| t.form == TokenForm::Verbatim));
    }

    #[rstest]
    #[case(8, "AACX|3^|")]
    #[case(7, "!3X|3^|")]
    #[case(6, "!X|3^|")]
    #[case(5, "!X|^|")]
    fn test_example_budgets(
        example: SlacString,
        config: AbbreviatorConfig,
        #[case] budget: usize,
        #[case] expected: &str,
    ) {
        let mini = abbreviate(&example, budget, &config).unwrap();
        assert_eq!(mini.text(), expected);
        assert!(mini.len() <= budget);
    }

    #[rstest]
    fn test_budget_too_small(example: SlacString, config: AbbreviatorConfig) {
        let err = abbreviate(&example, 4, &config).unwrap_err();
        assert!(matches!(
            err,
            MiniSlacError::BudgetTooSmall {
                budget: 4,
                minimal: 5
            }
        ));
    }

    #[rstest]
    fn test_no_elision_minimal(example: SlacString) {
        let config = AbbreviatorConfig {
            elide_numerals: false,
            ..Default::default()
        };
        assert_eq!(abbreviate(&example, 7, &config).unwrap().text(), "!3X|3^|");
        let err = abbreviate(&example, 6, &config).unwrap_err();
        assert!(matches!(
            err,
            MiniSlacError::BudgetTooSmall {
                budget: 6,
                minimal: 7
            }
        ));
    }

    #[test]
    fn test_uneventful_runs_collapse() {
        let text = format!("{}.{}", "a".repeat(20), "a".repeat(20));
        let slac = SlacString::from_text(&text, &[]).unwrap();

        let mini = abbreviate(&slac, 10, &AbbreviatorConfig::default()).unwrap();
        assert_eq!(mini.text(), "O20.O20");
        assert_eq!(mini.tokens()[1].range, 20..21);
        assert_eq!(mini.token_text(2), Some("O20"));
        assert_eq!(mini.expand(2, &slac), Some("a".repeat(20)));
    }

    #[test]
    fn test_long_protected_run_becomes_window() {
        // exon start at column 0 is the only notable column
        let slac = SlacString::from_text(&"A".repeat(30), &[0]).unwrap();
        let mini = abbreviate(&slac, 12, &AbbreviatorConfig::default()).unwrap();

        assert_eq!(mini.text(), format!("{}!30", "A".repeat(9)));
        assert_eq!(
            mini.tokens()[0].form,
            TokenForm::Window {
                window: 0..9,
                numeral: true
            }
        );
    }

    #[test]
    fn test_truncated_window_keeps_notable() {
        let slac = SlacString::from_text(&"_".repeat(30), &[]).unwrap();
        let config = AbbreviatorConfig::default();

        // trimmed from both ends
        let mini = abbreviate(&slac, 12, &config).unwrap();
        assert_eq!(mini.text(), format!("{}-30", "_".repeat(8)));
        let token = &mini.tokens()[0];
        assert!(token.truncated);
        assert_eq!(token.range, 0..30);
        assert_eq!(
            token.form,
            TokenForm::Window {
                window: 11..19,
                numeral: true
            }
        );
        assert_eq!(mini.expand(0, &slac), Some("_".repeat(30)));

        assert_eq!(abbreviate(&slac, 3, &config).unwrap().text(), "-30");
        assert_eq!(abbreviate(&slac, 1, &config).unwrap().text(), "-");
    }

    #[test]
    fn test_multibyte_overflow_marker_counts_characters() {
        let slac = SlacString::from_text(&"A".repeat(150), &[0]).unwrap();
        let config = AbbreviatorConfig {
            overflow_marker: '…',
            elide_numerals: false,
            ..Default::default()
        };

        let mini = abbreviate(&slac, 4, &config).unwrap();
        assert_eq!(mini.text(), "!99…");
        assert_eq!(mini.len(), 4);
        assert!(matches!(
            abbreviate(&slac, 3, &config),
            Err(MiniSlacError::BudgetTooSmall {
                budget: 3,
                minimal: 4
            })
        ));
    }

    #[rstest]
    fn test_abbreviation_is_idempotent(example: SlacString, config: AbbreviatorConfig) {
        for budget in 5..12 {
            assert_eq!(
                abbreviate(&example, budget, &config).unwrap(),
                abbreviate(&example, budget, &config).unwrap()
            );
        }
    }

    #[test]
    fn test_empty_slac() {
        let slac = SlacString::from_text("", &[]).unwrap();
        let mini = abbreviate(&slac, 0, &AbbreviatorConfig::default()).unwrap();
        assert!(mini.is_empty());
        assert_eq!(mini.source_len(), 0);
    }

    #[rstest]
    fn test_invalid_config_is_rejected(example: SlacString) {
        let config = AbbreviatorConfig {
            digit_width: 0,
            ..Default::default()
        };
        assert!(matches!(
            abbreviate(&example, 5, &config),
            Err(MiniSlacError::InvalidConfig(_))
        ));
    }
}
