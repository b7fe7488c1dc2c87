use std::fs::File;
use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use tempfile::tempdir;

use slac_core::alphabet::is_slac_char;
use slac_core::io::read_aligned_fasta_file;
use slac_core::models::{AlignedColumns, Annotation, ColumnsBuilder, Feature};
use slac_core::utils::align_cds_to_genomic;
use slac_core::{AlignmentMetrics, RenderMode, SlacString};

fn metrics(genomic: &str, cds: &str, hit: &str) -> AlignmentMetrics {
    let columns = AlignedColumns::from_aligned_triplet(genomic, cds, hit).unwrap();
    AlignmentMetrics::from_columns(&columns).unwrap()
}

#[fixture]
fn utr_genomic() -> String {
    format!("{}{}{}", "A".repeat(5), "C".repeat(10), "T".repeat(5))
}

#[fixture]
fn utr_cds() -> String {
    format!("{}{}{}", "-".repeat(5), "C".repeat(10), "-".repeat(5))
}

#[test]
fn test_metrics_all_match_genomic_only() {
    let genomic = format!("{}{}{}", "A".repeat(5), "G".repeat(10), "T".repeat(5));
    let m = metrics(&genomic, "", &genomic);
    assert_eq!(m.identity_to_genomic, 100.0);
    assert_eq!(m.coverage_to_genomic, 100.0);
    assert_eq!(m.concordance_to_genomic, 100.0);
    assert_eq!(m.identity_to_cds, 0.0);
    assert_eq!(m.coverage_to_cds, 0.0);
}

#[test]
fn test_metrics_all_match_genomic_and_cds() {
    let genomic = format!("{}{}{}", "A".repeat(5), "G".repeat(10), "T".repeat(5));
    let m = metrics(&genomic, &genomic, &genomic);
    assert_eq!(m.identity_to_genomic, 100.0);
    assert_eq!(m.coverage_to_genomic, 100.0);
    assert_eq!(m.identity_to_cds, 100.0);
    assert_eq!(m.coverage_to_cds, 100.0);
}

#[rstest]
fn test_metrics_flanking_utrs(utr_genomic: String, utr_cds: String) {
    let m = metrics(&utr_genomic, &utr_cds, &utr_cds);
    assert_eq!(m.identity_to_genomic, 100.0);
    assert_eq!(m.coverage_to_genomic, 50.0);
    assert_eq!(m.identity_to_cds, 100.0);
    assert_eq!(m.coverage_to_cds, 100.0);
    assert_eq!(m.counts.non_coding_overhang, 10);
}

#[rstest]
fn test_metrics_no_hit(utr_genomic: String, utr_cds: String) {
    let m = metrics(&utr_genomic, &utr_cds, &"-".repeat(20));
    assert_eq!(
        m,
        AlignmentMetrics {
            counts: m.counts.clone(),
            ..Default::default()
        }
    );
    assert_eq!(m.counts.coding_overhang, 10);
}

#[rstest]
#[case(5, 25.0)]
#[case(1, 5.0)]
fn test_metrics_partial_hit(
    utr_genomic: String,
    utr_cds: String,
    #[case] hit_bases: usize,
    #[case] coverage: f64,
) {
    let hit = format!("{}{}", "A".repeat(hit_bases), "-".repeat(20 - hit_bases));
    let m = metrics(&utr_genomic, &utr_cds, &hit);
    assert_eq!(m.identity_to_genomic, 100.0);
    assert_eq!(m.coverage_to_genomic, coverage);
    assert_eq!(m.identity_to_cds, 0.0);
}

#[test]
fn test_cigar_input_end_to_end() {
    let annotation = Annotation::from_features(
        &[Feature::intron(0, 2), Feature::exon(2, 6), Feature::intron(6, 8)],
        8,
    )
    .unwrap();
    let columns = ColumnsBuilder::new()
        .with_genomic("AACCGGTT")
        .with_cds("CCGG")
        .with_hit("AACGGGTAT")
        .with_cigar("7M1I1M")
        .unwrap()
        .with_annotation(annotation)
        .finish()
        .unwrap();
    let slac = SlacString::assemble(&columns).unwrap();

    assert_eq!(slac.len(), columns.len());
    assert_eq!(slac.text(), "aaCXGGt^t");
    assert_eq!(slac.render(RenderMode::Glyphs), "OO|X||O^O");
    assert_eq!(slac.boundary_indices(), &[2, 6]);
    assert_eq!(slac.notable_indices(), &[2, 3, 6, 7]);
    assert!(slac.text().chars().all(is_slac_char));
}

#[test]
fn test_auto_aligned_cds_matches_annotation() {
    let genomic = "TTTTTATGAAACCCCCCCGGGTAGTTTTT";
    let cds = align_cds_to_genomic(genomic, "ATGAAAGGGTAG", 5).unwrap();
    assert_eq!(cds, "-----ATGAAA-------GGGTAG-----");

    let columns = AlignedColumns::from_aligned_triplet(genomic, &cds, genomic).unwrap();
    let slac = SlacString::assemble(&columns).unwrap();
    assert_eq!(slac.text(), "tttttATGAAAcccccccGGGTAGttttt");
    assert_eq!(slac.boundary_indices(), &[5, 11, 18, 24]);
}

#[rstest]
#[case("hit.fa")]
#[case("hit.fa.gz")]
fn test_fasta_file_input(#[case] name: &str) {
    let dir = tempdir().unwrap();
    let path = dir.path().join(name);
    let body = b">genomic\nAACC-GT\n>cds\n-ACC-G-\n>hit\nAACTAGT\n";

    let file = File::create(&path).unwrap();
    if name.ends_with(".gz") {
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(body).unwrap();
        encoder.finish().unwrap();
    } else {
        let mut file = file;
        file.write_all(body).unwrap();
    }

    let fasta = read_aligned_fasta_file(&path).unwrap();
    let columns =
        AlignedColumns::from_aligned_triplet(&fasta.genomic, &fasta.cds, &fasta.hit).unwrap();
    let slac = SlacString::assemble(&columns).unwrap();
    assert_eq!(slac.text(), "aACX^Gt");
}

#[test]
fn test_fasta_file_missing() {
    let dir = tempdir().unwrap();
    assert!(read_aligned_fasta_file(&dir.path().join("absent.fa")).is_err());
}
