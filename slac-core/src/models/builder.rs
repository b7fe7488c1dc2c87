use super::alignment::Alignment;
use super::annotation::Annotation;
use super::base::parse_ungapped;
use super::column::AlignedColumns;
use crate::errors::{Result, SlacError};

/// Builder for [`AlignedColumns`] from whichever inputs the caller has.
///
/// - With an alignment: genomic, hit and the optional CDS are ungapped, and an
///   annotation is required.
/// - With an annotation but no alignment: genomic and hit are pre-aligned gapped strings,
///   and the optional CDS is ungapped.
/// - With neither: genomic, CDS and hit are a pre-aligned triplet.
///
/// # Examples
///
/// ```rust
/// use slac_core::models::{Annotation, ColumnsBuilder};
///
/// # fn main() -> slac_core::errors::Result<()> {
/// let columns = ColumnsBuilder::new()
///     .with_genomic("AACCGGTT")
///     .with_hit("AACGGGTAT")
///     .with_cigar("7M1I1M")?
///     .with_annotation(Annotation::all_coding(8))
///     .finish()?;
/// assert_eq!(columns.len(), 9);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default, Clone)]
pub struct ColumnsBuilder {
    genomic: Option<String>,
    cds: Option<String>,
    hit: Option<String>,
    alignment: Option<Alignment>,
    annotation: Option<Annotation>,
}

impl ColumnsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_genomic(mut self, genomic: impl Into<String>) -> Self {
        self.genomic = Some(genomic.into());
        self
    }

    pub fn with_cds(mut self, cds: impl Into<String>) -> Self {
        self.cds = Some(cds.into());
        self
    }

    pub fn with_hit(mut self, hit: impl Into<String>) -> Self {
        self.hit = Some(hit.into());
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn with_cigar(self, cigar: &str) -> Result<Self> {
        Ok(self.with_alignment(cigar.parse()?))
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotation = Some(annotation);
        self
    }

    pub fn finish(self) -> Result<AlignedColumns> {
        let genomic = self.genomic.unwrap_or_default();
        let hit = self.hit.unwrap_or_default();

        match (self.alignment, self.annotation) {
            (Some(alignment), Some(annotation)) => {
                if genomic.is_empty() {
                    return Err(SlacError::MissingInput("genomic sequence"));
                }
                let genomic = parse_ungapped(&genomic)?;
                let hit = parse_ungapped(&hit)?;
                let cds = self.cds.as_deref().map(parse_ungapped).transpose()?;
                AlignedColumns::from_alignment(
                    &genomic,
                    &hit,
                    &alignment,
                    &annotation,
                    cds.as_deref(),
                )
            }
            (Some(_), None) => Err(SlacError::MissingInput(
                "an alignment requires an exon/intron annotation",
            )),
            (None, Some(annotation)) => {
                let cds = self.cds.as_deref().map(parse_ungapped).transpose()?;
                AlignedColumns::from_gapped(&genomic, &hit, &annotation, cds.as_deref())
            }
            (None, None) => AlignedColumns::from_aligned_triplet(
                &genomic,
                self.cds.as_deref().unwrap_or(""),
                &hit,
            ),
        }
    }
}
