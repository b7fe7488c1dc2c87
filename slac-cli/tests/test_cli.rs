use std::fs;
use std::process::Command;

use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::tempdir;

fn slac(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_slac"))
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[rstest]
#[case("bases", "aACX^Gt")]
#[case("glyphs", "O||X^|O")]
fn test_encode_triplet(#[case] mode: &str, #[case] expected: &str) {
    let output = slac(&[
        "encode", "-g", "AACC-GT", "-c", "-ACC-G-", "--hit", "AACTAGT", "--mode", mode,
    ]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), expected);
}

#[test]
fn test_encode_json() {
    let output = slac(&[
        "encode", "-g", "AACCGGTT", "--hit", "AACGGGTAT", "--cigar", "7M1I1M", "-e", "0-8",
        "--json", "--metrics",
    ]);
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["slac"], "AACXGGT^T");
    assert_eq!(value["boundary_indices"], serde_json::json!([0]));
    assert!(value["metrics"]["identity_to_genomic"].is_number());
}

#[test]
fn test_mini_with_map() {
    let output = slac(&[
        "mini", "-g", "AACCGGTT", "--hit", "AACGGGTAT", "--cigar", "7M1I1M", "-e", "0-8",
        "-l", "5", "--map",
    ]);
    assert!(output.status.success());
    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "!X|^|");
    assert_eq!(lines[1], "token\tstart\tend\tcount\ttruncated\ttext");
    assert_eq!(lines.len(), 7);
}

#[test]
fn test_mini_budget_too_small_fails() {
    let output = slac(&[
        "mini", "-g", "AACCGGTT", "--hit", "AACGGGTAT", "--cigar", "7M1I1M", "-e", "0-8",
        "-l", "4",
    ]);
    assert!(!output.status.success());
}

#[test]
fn test_batch_table() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("hits.tsv");
    let out = dir.path().join("out.tsv");
    fs::write(
        &input,
        "name\tgenomic\tcds\thit\ng1\tAACC-GT\t-ACC-G-\tAACTAGT\ng2\tACGT\t----\tACGT\n",
    )
    .unwrap();

    let output = slac(&[
        "batch",
        input.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
        "-t",
        "2",
    ]);
    assert!(output.status.success());

    let table = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("g1\taACX^Gt\taACX^Gt\t"));
    assert!(lines[2].starts_with("g2\tacgt\tacgt\t"));
}

#[test]
fn test_batch_reports_bad_rows() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("hits.tsv");
    let out = dir.path().join("out.tsv");
    fs::write(&input, "g1\tAACC-GT\t-ACC-G-\tAACTAGT\ng2\tACGT\t----\tAC\n").unwrap();

    let output = slac(&["batch", input.to_str().unwrap(), "-o", out.to_str().unwrap()]);
    assert!(!output.status.success());

    let table = fs::read_to_string(&out).unwrap();
    assert_eq!(table.lines().count(), 2);
}

#[test]
fn test_legend() {
    let output = slac(&["legend"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("insertion in the hit"));
}
