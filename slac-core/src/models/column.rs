use log::debug;

use super::alignment::{Alignment, OpKind};
use super::annotation::Annotation;
use super::base::{Base, parse_gapped};
use crate::errors::{Result, SlacError};

///
/// One position in the shared genomic/hit coordinate frame.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlignedColumn {
    /// `None` when the hit inserts relative to the genomic sequence.
    pub genomic: Option<Base>,
    /// `None` when the hit deletes this genomic position.
    pub hit: Option<Base>,
    pub is_coding: bool,
    pub is_boundary: bool,
    /// Index into the coding sequence; advances only on coding genomic bases.
    pub coding_index: Option<usize>,
}

impl AlignedColumn {
    /// Codon phase (0, 1 or 2) of the coding base in this column.
    pub fn codon_phase(&self) -> Option<usize> {
        self.coding_index.map(|i| i % 3)
    }

    pub fn is_gap(&self) -> bool {
        self.genomic.is_none() || self.hit.is_none()
    }

    pub fn is_mismatch(&self) -> bool {
        matches!((self.genomic, self.hit), (Some(g), Some(h)) if g != h)
    }
}

/// A raw column before coding state is derived.
struct RawColumn {
    genomic: Option<Base>,
    hit: Option<Base>,
    genomic_pos: Option<usize>,
}

///
/// The validated, read-only column sequence for one genomic/hit pair.
///
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlignedColumns {
    columns: Vec<AlignedColumn>,
    genomic_len: usize,
}

impl AlignedColumns {
    ///
    /// Build columns from ungapped sequences and an operation list.
    ///
    /// # Arguments
    ///
    /// - genomic: the genomic span
    /// - hit: the hit sequence
    /// - alignment: operations relating hit coordinates to genomic coordinates
    /// - annotation: coding flags, one per genomic base
    /// - coding: the coding sequence, checked against the coding genomic bases if supplied
    ///
    pub fn from_alignment(
        genomic: &[Base],
        hit: &[Base],
        alignment: &Alignment,
        annotation: &Annotation,
        coding: Option<&[Base]>,
    ) -> Result<Self> {
        annotation.validate(genomic.len())?;

        let capacity = alignment
            .column_count()
            .min(genomic.len().saturating_add(hit.len()));
        let mut raw = Vec::with_capacity(capacity);
        let mut g = 0;
        let mut h = 0;

        for op in &alignment.ops {
            if op.kind.consumes_genomic() && op.len > genomic.len() - g {
                return Err(SlacError::malformed(
                    genomic.len(),
                    format!(
                        "{:?} of length {} runs past the end of the genomic sequence",
                        op.kind, op.len
                    ),
                ));
            }
            if op.kind.consumes_hit() && op.len > hit.len() - h {
                return Err(SlacError::malformed(
                    g,
                    format!(
                        "{:?} of length {} runs past the end of the hit sequence",
                        op.kind, op.len
                    ),
                ));
            }

            for _ in 0..op.len {
                let column = match op.kind {
                    OpKind::Insertion => {
                        h += 1;
                        RawColumn {
                            genomic: None,
                            hit: Some(hit[h - 1]),
                            genomic_pos: None,
                        }
                    }
                    OpKind::Deletion => {
                        g += 1;
                        RawColumn {
                            genomic: Some(genomic[g - 1]),
                            hit: None,
                            genomic_pos: Some(g - 1),
                        }
                    }
                    OpKind::Match | OpKind::SequenceMatch | OpKind::Mismatch => {
                        let (gb, hb) = (genomic[g], hit[h]);
                        if op.kind == OpKind::SequenceMatch && gb != hb {
                            return Err(SlacError::malformed(
                                g,
                                format!("'=' op pairs {} with {}", gb, hb),
                            ));
                        }
                        if op.kind == OpKind::Mismatch && gb == hb {
                            return Err(SlacError::malformed(
                                g,
                                format!("'X' op pairs identical bases {}", gb),
                            ));
                        }
                        g += 1;
                        h += 1;
                        RawColumn {
                            genomic: Some(gb),
                            hit: Some(hb),
                            genomic_pos: Some(g - 1),
                        }
                    }
                };
                raw.push(column);
            }
        }

        if g != genomic.len() {
            return Err(SlacError::malformed(
                g,
                format!(
                    "alignment consumes {} of {} genomic bases",
                    g,
                    genomic.len()
                ),
            ));
        }
        if h != hit.len() {
            return Err(SlacError::malformed(
                g,
                format!("alignment consumes {} of {} hit bases", h, hit.len()),
            ));
        }

        Self::finish(raw, genomic.len(), |pos| annotation.is_coding(pos), coding)
    }

    ///
    /// Build columns from two equal-length, pre-aligned gapped strings. An ungapped
    /// `coding` sequence, if supplied, is checked against the coding genomic bases.
    ///
    pub fn from_gapped(
        genomic: &str,
        hit: &str,
        annotation: &Annotation,
        coding: Option<&[Base]>,
    ) -> Result<Self> {
        if genomic.len() != hit.len() {
            return Err(SlacError::malformed(
                genomic.len().min(hit.len()),
                format!(
                    "aligned genomic ({}) and hit ({}) differ in length",
                    genomic.len(),
                    hit.len()
                ),
            ));
        }

        let genomic = parse_gapped(genomic)?;
        let hit = parse_gapped(hit)?;
        let raw = pair_columns(&genomic, &hit)?;

        let genomic_len = raw.iter().filter(|c| c.genomic_pos.is_some()).count();
        annotation.validate(genomic_len)?;

        Self::finish(raw, genomic_len, |pos| annotation.is_coding(pos), coding)
    }

    ///
    /// Build columns from aligned genomic, coding and hit strings. A column is coding
    /// wherever the coding string carries a base. Empty `cds` or `hit` strings are
    /// treated as all gaps.
    ///
    pub fn from_aligned_triplet(genomic: &str, cds: &str, hit: &str) -> Result<Self> {
        let width = genomic.len().max(cds.len()).max(hit.len());
        if width == 0 {
            return Err(SlacError::MissingInput("no sequences supplied"));
        }
        if genomic.is_empty() && !cds.is_empty() {
            return Err(SlacError::MissingInput(
                "a coding sequence requires a genomic sequence",
            ));
        }
        for seq in [genomic, cds, hit] {
            if !seq.is_empty() && seq.len() != width {
                return Err(SlacError::malformed(
                    seq.len().min(width),
                    "aligned sequences differ in length",
                ));
            }
        }

        let padded = |seq: &str| -> Result<Vec<Option<Base>>> {
            if seq.is_empty() {
                Ok(vec![None; width])
            } else {
                parse_gapped(seq)
            }
        };
        let genomic = padded(genomic)?;
        let cds = padded(cds)?;
        let hit = padded(hit)?;

        let raw = pair_columns(&genomic, &hit)?;

        let mut flags = Vec::with_capacity(width);
        let mut coding = Vec::new();
        for (i, (g, c)) in genomic.iter().zip(cds.iter()).enumerate() {
            match (g, c) {
                (Some(g), Some(c)) => {
                    if g != c {
                        return Err(SlacError::CodingSequenceMismatch {
                            index: coding.len(),
                            reason: format!("coding base {} aligned to genomic base {}", c, g),
                        });
                    }
                    flags.push(true);
                    coding.push(*c);
                }
                (Some(_), None) => flags.push(false),
                (None, Some(_)) => {
                    return Err(SlacError::malformed(
                        i,
                        "coding base aligned to a genomic gap",
                    ));
                }
                (None, None) => {}
            }
        }

        let genomic_len = flags.len();
        Self::finish(raw, genomic_len, |pos| flags[pos], Some(&coding))
    }

    /// Derive coding state, boundaries and the coding track.
    fn finish<F>(
        raw: Vec<RawColumn>,
        genomic_len: usize,
        is_coding: F,
        coding: Option<&[Base]>,
    ) -> Result<Self>
    where
        F: Fn(usize) -> bool,
    {
        let first_genomic = raw.iter().position(|c| c.genomic_pos.is_some());
        let last_genomic = raw.iter().rposition(|c| c.genomic_pos.is_some());

        let mut columns: Vec<AlignedColumn> = Vec::with_capacity(raw.len());
        let mut previous_genomic_coding = false;
        let mut coding_index = 0;

        for (i, col) in raw.iter().enumerate() {
            let col_coding = match col.genomic_pos {
                Some(pos) => {
                    previous_genomic_coding = is_coding(pos);
                    previous_genomic_coding
                }
                None => match (first_genomic, last_genomic) {
                    (Some(first), Some(last)) if first < i && i < last => previous_genomic_coding,
                    _ => false,
                },
            };

            let index = match (col_coding, col.genomic) {
                (true, Some(base)) => {
                    if let Some(coding) = coding {
                        match coding.get(coding_index) {
                            Some(expected) if *expected == base => {}
                            Some(expected) => {
                                return Err(SlacError::CodingSequenceMismatch {
                                    index: coding_index,
                                    reason: format!(
                                        "coding base {} but genomic base {}",
                                        expected, base
                                    ),
                                });
                            }
                            None => {
                                return Err(SlacError::CodingSequenceMismatch {
                                    index: coding_index,
                                    reason: "coding sequence is shorter than the annotated exons"
                                        .to_string(),
                                });
                            }
                        }
                    }
                    coding_index += 1;
                    Some(coding_index - 1)
                }
                _ => None,
            };

            let is_boundary = match columns.last() {
                Some(prev) => prev.is_coding != col_coding,
                None => col_coding,
            };

            columns.push(AlignedColumn {
                genomic: col.genomic,
                hit: col.hit,
                is_coding: col_coding,
                is_boundary,
                coding_index: index,
            });
        }

        if let Some(coding) = coding {
            if coding.len() != coding_index {
                return Err(SlacError::CodingSequenceMismatch {
                    index: coding_index,
                    reason: format!(
                        "coding sequence has {} bases but the exons cover {}",
                        coding.len(),
                        coding_index
                    ),
                });
            }
        }

        debug!(
            "built {} columns over {} genomic bases ({} coding)",
            columns.len(),
            genomic_len,
            coding_index
        );

        Ok(AlignedColumns {
            columns,
            genomic_len,
        })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn genomic_len(&self) -> usize {
        self.genomic_len
    }

    pub fn columns(&self) -> &[AlignedColumn] {
        &self.columns
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AlignedColumn> {
        self.columns.iter()
    }

    /// Coding index per column (`None` outside exons and on insertions).
    pub fn coding_track(&self) -> Vec<Option<usize>> {
        self.columns.iter().map(|c| c.coding_index).collect()
    }
}

impl<'a> IntoIterator for &'a AlignedColumns {
    type Item = &'a AlignedColumn;
    type IntoIter = std::slice::Iter<'a, AlignedColumn>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

fn pair_columns(genomic: &[Option<Base>], hit: &[Option<Base>]) -> Result<Vec<RawColumn>> {
    let mut genomic_pos = 0;
    genomic
        .iter()
        .zip(hit.iter())
        .enumerate()
        .map(|(i, (g, h))| {
            if g.is_none() && h.is_none() {
                return Err(SlacError::malformed(i, "genomic and hit are both gaps"));
            }
            let pos = g.map(|_| {
                genomic_pos += 1;
                genomic_pos - 1
            });
            Ok(RawColumn {
                genomic: *g,
                hit: *h,
                genomic_pos: pos,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::base::parse_ungapped;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn genomic() -> Vec<Base> {
        parse_ungapped("AACCGGTT").unwrap()
    }

    #[fixture]
    fn hit() -> Vec<Base> {
        // mismatch at genomic 3, one-base insertion after genomic 6
        parse_ungapped("AACGGGTAT").unwrap()
    }

    #[rstest]
    fn test_columns_from_cigar(genomic: Vec<Base>, hit: Vec<Base>) {
        let aln: Alignment = "7M1I1M".parse().unwrap();
        let annotation = Annotation::all_coding(genomic.len());
        let columns = AlignedColumns::from_alignment(&genomic, &hit, &aln, &annotation, None)
            .unwrap();

        assert_eq!(columns.len(), 9);
        assert_eq!(columns.genomic_len(), 8);
        assert!(columns.columns()[3].is_mismatch());
        assert_eq!(columns.columns()[7].genomic, None);
        assert_eq!(columns.columns()[7].hit, Some(Base::A));
        // insertion inside the exon stays coding but doesn't advance the track
        assert!(columns.columns()[7].is_coding);
        assert_eq!(columns.columns()[7].coding_index, None);
        assert_eq!(columns.columns()[8].coding_index, Some(7));

        let boundaries: Vec<usize> = columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_boundary)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(boundaries, vec![0]);
    }

    #[rstest]
    #[case("8M", 8)]
    #[case("6M", 6)]
    #[case("4M1D3M1I1M", 8)]
    #[case("100000000000000M", 8)]
    #[case("4M18446744073709551615D", 8)]
    fn test_columns_unreconciled(
        genomic: Vec<Base>,
        hit: Vec<Base>,
        #[case] cigar: &str,
        #[case] coordinate: usize,
    ) {
        let aln: Alignment = cigar.parse().unwrap();
        let annotation = Annotation::all_coding(genomic.len());
        match AlignedColumns::from_alignment(&genomic, &hit, &aln, &annotation, None) {
            Err(SlacError::MalformedAlignment { coordinate: c, .. }) => assert_eq!(c, coordinate),
            other => panic!("expected MalformedAlignment, got {:?}", other),
        }
    }

    #[rstest]
    fn test_columns_strict_ops(genomic: Vec<Base>, hit: Vec<Base>) {
        let aln: Alignment = "7=1I1M".parse().unwrap();
        let annotation = Annotation::all_coding(genomic.len());
        match AlignedColumns::from_alignment(&genomic, &hit, &aln, &annotation, None) {
            Err(SlacError::MalformedAlignment { coordinate, .. }) => assert_eq!(coordinate, 3),
            other => panic!("expected MalformedAlignment, got {:?}", other),
        }
    }

    #[rstest]
    fn test_columns_incomplete_annotation(genomic: Vec<Base>, hit: Vec<Base>) {
        let aln: Alignment = "7M1I1M".parse().unwrap();
        let annotation = Annotation::from_flags(vec![true; 5]);
        let err = AlignedColumns::from_alignment(&genomic, &hit, &aln, &annotation, None)
            .unwrap_err();
        assert!(matches!(err, SlacError::IncompleteAnnotation { coordinate: 5 }));
    }

    #[rstest]
    fn test_coding_sequence_checked(genomic: Vec<Base>, hit: Vec<Base>) {
        let aln: Alignment = "7M1I1M".parse().unwrap();
        let annotation = Annotation::from_exons(&[2..6], genomic.len()).unwrap();

        let good = parse_ungapped("CCGG").unwrap();
        let columns =
            AlignedColumns::from_alignment(&genomic, &hit, &aln, &annotation, Some(&good))
                .unwrap();
        let phases: Vec<Option<usize>> = columns.iter().map(|c| c.codon_phase()).collect();
        assert_eq!(
            phases,
            vec![None, None, Some(0), Some(1), Some(2), Some(0), None, None, None]
        );

        let bad = parse_ungapped("CCTG").unwrap();
        let err = AlignedColumns::from_alignment(&genomic, &hit, &aln, &annotation, Some(&bad))
            .unwrap_err();
        assert!(matches!(err, SlacError::CodingSequenceMismatch { index: 2, .. }));

        let short = parse_ungapped("CCG").unwrap();
        assert!(
            AlignedColumns::from_alignment(&genomic, &hit, &aln, &annotation, Some(&short))
                .is_err()
        );
    }

    #[test]
    fn test_boundaries_on_exon_edges() {
        let annotation = Annotation::from_exons(&[2..5], 8).unwrap();
        let columns = AlignedColumns::from_gapped("AACCGGTT", "AACCGGTT", &annotation, None).unwrap();
        let boundaries: Vec<usize> = columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_boundary)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(boundaries, vec![2, 5]);
    }

    #[test]
    fn test_gapped_rejects_double_gap() {
        let annotation = Annotation::non_coding(3);
        let err = AlignedColumns::from_gapped("AC-G", "A--G", &annotation, None).unwrap_err();
        assert!(matches!(err, SlacError::MalformedAlignment { coordinate: 2, .. }));
    }

    #[test]
    fn test_triplet_coding_flags() {
        let columns =
            AlignedColumns::from_aligned_triplet("AAC-CTT", "-AC-C--", "AACGCT-").unwrap();
        let coding: Vec<bool> = columns.iter().map(|c| c.is_coding).collect();
        assert_eq!(coding, vec![false, true, true, true, true, false, false]);
        assert_eq!(columns.genomic_len(), 6);
    }

    #[test]
    fn test_triplet_leading_insertion_is_non_coding() {
        let columns = AlignedColumns::from_aligned_triplet("-ACG", "-ACG", "TACG").unwrap();
        assert!(!columns.columns()[0].is_coding);
        assert!(columns.columns()[1].is_boundary);
    }

    #[test]
    fn test_triplet_cds_mismatch() {
        let err = AlignedColumns::from_aligned_triplet("AACG", "-ATG", "AACG").unwrap_err();
        assert!(matches!(err, SlacError::CodingSequenceMismatch { index: 1, .. }));
    }
}
