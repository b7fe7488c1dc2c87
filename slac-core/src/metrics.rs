use crate::alphabet::Symbol;
use crate::encoder::encode_column;
use crate::errors::Result;
use crate::models::AlignedColumns;

/// Number of decimal places metrics are rounded to.
pub const METRIC_DECIMALS: i32 = 3;

/// Raw column tallies behind [`AlignmentMetrics`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnCounts {
    pub coding_matches: usize,
    pub coding_mismatches: usize,
    pub non_coding_matches: usize,
    pub non_coding_mismatches: usize,
    pub coding_insertions: usize,
    pub non_coding_insertions: usize,
    pub coding_deletions: usize,
    pub non_coding_deletions: usize,
    /// Hit bases outside the genomic span.
    pub unmatched_hit_overhang: usize,
    /// Coding genomic bases outside the hit span.
    pub coding_overhang: usize,
    /// Non-coding genomic bases outside the hit span.
    pub non_coding_overhang: usize,
}

///
/// Identity, coverage and concordance of a hit, in percent.
///
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlignmentMetrics {
    pub identity_to_genomic: f64,
    pub coverage_to_genomic: f64,
    pub concordance_to_genomic: f64,
    pub identity_to_cds: f64,
    pub coverage_to_cds: f64,
    pub concordance_to_cds: f64,
    /// Columns from the first to the last hit base, inclusive.
    pub hit_span: usize,
    pub counts: ColumnCounts,
}

impl AlignmentMetrics {
    pub fn from_columns(columns: &AlignedColumns) -> Result<Self> {
        let cols = columns.columns();
        let first_hit = cols.iter().position(|c| c.hit.is_some());
        let last_hit = cols.iter().rposition(|c| c.hit.is_some());
        let first_genomic = cols.iter().position(|c| c.genomic.is_some());
        let last_genomic = cols.iter().rposition(|c| c.genomic.is_some());

        let within = |i: usize, first: Option<usize>, last: Option<usize>| match (first, last) {
            (Some(first), Some(last)) => first <= i && i <= last,
            _ => false,
        };

        let mut counts = ColumnCounts::default();
        for (i, column) in cols.iter().enumerate() {
            let in_hit = within(i, first_hit, last_hit);
            match encode_column(column, i)? {
                Symbol::CodingMatch(_) => counts.coding_matches += 1,
                Symbol::NonCodingMatch(_) => counts.non_coding_matches += 1,
                Symbol::CodingMismatch => counts.coding_mismatches += 1,
                Symbol::NonCodingMismatch => counts.non_coding_mismatches += 1,
                Symbol::CodingDeletion if in_hit => counts.coding_deletions += 1,
                Symbol::CodingDeletion => counts.coding_overhang += 1,
                Symbol::NonCodingDeletion if in_hit => counts.non_coding_deletions += 1,
                Symbol::NonCodingDeletion => counts.non_coding_overhang += 1,
                Symbol::Insertion if column.is_coding => counts.coding_insertions += 1,
                Symbol::Insertion if within(i, first_genomic, last_genomic) => {
                    counts.non_coding_insertions += 1
                }
                Symbol::Insertion => counts.unmatched_hit_overhang += 1,
            }
        }

        let hit_span = match (first_hit, last_hit) {
            (Some(first), Some(last)) => last - first + 1,
            _ => 0,
        };

        Ok(Self::from_counts(counts, hit_span))
    }

    pub fn from_counts(counts: ColumnCounts, hit_span: usize) -> Self {
        let c = &counts;
        let mut metrics = AlignmentMetrics {
            hit_span,
            ..Default::default()
        };

        let matches = c.coding_matches + c.non_coding_matches;
        let mismatches = c.coding_mismatches + c.non_coding_mismatches;
        if matches > 0 {
            let aligned = matches + mismatches;
            metrics.identity_to_genomic = percent(
                matches,
                aligned
                    + c.coding_insertions
                    + c.non_coding_insertions
                    + c.coding_deletions
                    + c.non_coding_deletions,
            );
            metrics.coverage_to_genomic = percent(
                aligned,
                aligned
                    + c.coding_deletions
                    + c.non_coding_deletions
                    + c.coding_overhang
                    + c.non_coding_overhang,
            );
            metrics.concordance_to_genomic =
                concordance(metrics.coverage_to_genomic, metrics.identity_to_genomic);
        }

        if c.coding_matches > 0 {
            let aligned = c.coding_matches + c.coding_mismatches;
            metrics.identity_to_cds = percent(
                c.coding_matches,
                aligned + c.coding_insertions + c.coding_deletions,
            );
            metrics.coverage_to_cds =
                percent(aligned, aligned + c.coding_deletions + c.coding_overhang);
            metrics.concordance_to_cds =
                concordance(metrics.coverage_to_cds, metrics.identity_to_cds);
        }

        metrics.counts = counts;
        metrics
    }
}

fn round(value: f64) -> f64 {
    let scale = 10f64.powi(METRIC_DECIMALS);
    (value * scale).round() / scale
}

fn percent(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    round(numerator as f64 / denominator as f64 * 100.0)
}

fn concordance(coverage: f64, identity: f64) -> f64 {
    round(coverage * identity / 100.0)
}
