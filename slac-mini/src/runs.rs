use std::ops::Range;

use slac_core::{SlacString, Symbol, SymbolClass};

/// A maximal stretch of columns sharing one symbol class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRun {
    pub class: SymbolClass,
    /// First symbol of the run.
    pub representative: Symbol,
    pub range: Range<usize>,
    /// Contains at least one notable column.
    pub protected: bool,
}

impl ClassRun {
    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

///
/// Split a SLAC into class runs. Match columns of different bases share a class, so
/// they stay in one run.
///
pub fn class_runs(slac: &SlacString) -> Vec<ClassRun> {
    let mut runs: Vec<ClassRun> = Vec::new();

    for (i, symbol) in slac.symbols().iter().enumerate() {
        let class = symbol.class();
        if let Some(run) = runs.last_mut().filter(|r| r.class == class) {
            run.range.end = i + 1;
            continue;
        }
        runs.push(ClassRun {
            class,
            representative: *symbol,
            range: i..i + 1,
            protected: false,
        });
    }

    for run in runs.iter_mut() {
        run.protected = slac.has_notable_in(run.range.clone());
    }

    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_class_runs() {
        // boundary at 0, mismatch at 3, insertion at 7
        let slac = SlacString::from_text("AACXGGT^T", &[0]).unwrap();
        let runs = class_runs(&slac);

        let summary: Vec<(Range<usize>, bool)> =
            runs.iter().map(|r| (r.range.clone(), r.protected)).collect();
        assert_eq!(
            summary,
            vec![
                (0..3, true),
                (3..4, true),
                (4..7, false),
                (7..8, true),
                (8..9, false),
            ]
        );
        assert_eq!(runs[2].class, SymbolClass::MatchCoding);
    }

    #[test]
    fn test_mixed_bases_share_a_run() {
        let slac = SlacString::from_text("acgtACGT", &[4]).unwrap();
        let runs = class_runs(&slac);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].class, SymbolClass::MatchNonCoding);
        assert!(!runs[0].protected);
        assert!(runs[1].protected);
    }

    #[test]
    fn test_deletions_of_both_kinds_merge() {
        let slac = SlacString::from_text("A=_a", &[0, 2]).unwrap();
        let runs = class_runs(&slac);
        assert_eq!(runs[1].range, 1..3);
        assert_eq!(runs[1].class, SymbolClass::GapHit);
    }
}
