//! CLI Integration Tests
//!
//! Runs the minorvar binary against small SAM and FASTA fixtures.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SINGLE_REFERENCE: &str = ">ref\nACG\n";
const TWO_REFERENCES: &str = ">ref\nACG\n>other\nACGTACGT\n";

fn sam(references: &[(&str, usize)], records: &[&str]) -> String {
    let mut text = String::from("@HD\tVN:1.6\n");
    for (name, length) in references {
        text.push_str(&format!("@SQ\tSN:{name}\tLN:{length}\n"));
    }
    for record in records {
        text.push_str(record);
        text.push('\n');
    }
    text
}

fn scenario_sam() -> String {
    sam(
        &[("ref", 3)],
        &[
            "read1\t0\tref\t1\t60\t3M\t*\t0\t0\tACG\t*",
            "read2\t0\tref\t1\t60\t3M\t*\t0\t0\tACT\t*",
        ],
    )
}

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn minorvar() -> Command {
    Command::cargo_bin("minorvar").unwrap()
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_call_scenario() {
    let dir = TempDir::new().unwrap();
    let fasta = write(&dir, "ref.fa", SINGLE_REFERENCE);
    let input = write(&dir, "s1.sam", &scenario_sam());
    let output = dir.path().join("out.tsv");

    minorvar()
        .arg("call")
        .arg("-r")
        .arg(&fasta)
        .arg(&input)
        .args(["--min-coverage", "2"])
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    assert_eq!(read(&output), "pos\tvariant\t0\n2\tT\t0.5\n");
}

#[test]
fn test_call_reference_from_header() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "s1.sam", &scenario_sam());
    let output = dir.path().join("out.tsv");

    minorvar()
        .arg("call")
        .arg(&input)
        .args(["--min-coverage", "2", "--sample-ids", "patient"])
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    assert_eq!(read(&output), "pos\tvariant\tpatient\n2\tT\t0.5\n");
}

#[test]
fn test_default_coverage_masks_everything() {
    let dir = TempDir::new().unwrap();
    let fasta = write(&dir, "ref.fa", SINGLE_REFERENCE);
    let input = write(&dir, "s1.sam", &scenario_sam());
    let output = dir.path().join("out.tsv");

    minorvar()
        .arg("call")
        .arg("-r")
        .arg(&fasta)
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    assert_eq!(read(&output), "pos\tvariant\t0\n");
}

#[test]
fn test_multiple_references_rejected() {
    let dir = TempDir::new().unwrap();
    let fasta = write(&dir, "ref.fa", TWO_REFERENCES);
    let input = write(
        &dir,
        "s1.sam",
        &sam(
            &[("ref", 3), ("other", 8)],
            &["read1\t0\tref\t1\t60\t3M\t*\t0\t0\tACG\t*"],
        ),
    );
    let output = dir.path().join("out.tsv");

    minorvar()
        .arg("call")
        .arg("-r")
        .arg(&fasta)
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("exactly one"));

    assert!(!output.exists());
}

#[test]
fn test_contig_selects_reference() {
    let dir = TempDir::new().unwrap();
    let fasta = write(&dir, "ref.fa", TWO_REFERENCES);
    let input = write(
        &dir,
        "s1.sam",
        &sam(
            &[("ref", 3), ("other", 8)],
            &[
                "read1\t0\tref\t1\t60\t3M\t*\t0\t0\tACG\t*",
                "read2\t0\tother\t3\t60\t2M\t*\t0\t0\tGT\t*",
                "read3\t0\tother\t3\t60\t2M\t*\t0\t0\tGA\t*",
            ],
        ),
    );
    let output = dir.path().join("out.tsv");

    minorvar()
        .arg("call")
        .arg("-r")
        .arg(&fasta)
        .arg(&input)
        .args(["--contig", "other", "--min-coverage", "1", "--absolute-positions"])
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    // A (index 0) wins the tie at position 3 over T
    assert_eq!(read(&output), "pos\tvariant\t0\n3\tT\t0.5\n");
}

#[test]
fn test_unknown_contig_rejected() {
    let dir = TempDir::new().unwrap();
    let fasta = write(&dir, "ref.fa", SINGLE_REFERENCE);
    let input = write(&dir, "s1.sam", &scenario_sam());

    minorvar()
        .arg("call")
        .arg("-r")
        .arg(&fasta)
        .arg(&input)
        .args(["--contig", "missing"])
        .arg("-o")
        .arg(dir.path().join("out.tsv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing"));
}

#[test]
fn test_sample_id_count_mismatch() {
    let dir = TempDir::new().unwrap();
    let fasta = write(&dir, "ref.fa", SINGLE_REFERENCE);
    let input = write(&dir, "s1.sam", &scenario_sam());
    let output = dir.path().join("out.tsv");

    minorvar()
        .arg("call")
        .arg("-r")
        .arg(&fasta)
        .arg(&input)
        .args(["--sample-ids", "a,b"])
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("2 sample identifiers for 1 input"));

    assert!(!output.exists());
}

#[test]
fn test_start_without_end_rejected() {
    let dir = TempDir::new().unwrap();
    let fasta = write(&dir, "ref.fa", SINGLE_REFERENCE);
    let input = write(&dir, "s1.sam", &scenario_sam());

    minorvar()
        .arg("call")
        .arg("-r")
        .arg(&fasta)
        .arg(&input)
        .args(["--start", "1"])
        .arg("-o")
        .arg(dir.path().join("out.tsv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("without an end"));
}

#[test]
fn test_end_without_start_warns() {
    let dir = TempDir::new().unwrap();
    let fasta = write(&dir, "ref.fa", SINGLE_REFERENCE);
    let input = write(&dir, "s1.sam", &scenario_sam());
    let output = dir.path().join("out.tsv");

    minorvar()
        .arg("call")
        .arg("-r")
        .arg(&fasta)
        .arg(&input)
        .args(["--end", "2", "--min-coverage", "2"])
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("starting at 0"));

    // Locus 2 lies outside [0, 2)
    assert_eq!(read(&output), "pos\tvariant\t0\n");
}

#[test]
fn test_region_past_reference_end() {
    let dir = TempDir::new().unwrap();
    let fasta = write(&dir, "ref.fa", SINGLE_REFERENCE);
    let input = write(&dir, "s1.sam", &scenario_sam());

    minorvar()
        .arg("call")
        .arg("-r")
        .arg(&fasta)
        .arg(&input)
        .args(["--start", "0", "--end", "10"])
        .arg("-o")
        .arg(dir.path().join("out.tsv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds length"));
}

#[test]
fn test_amino_acid_alphabet_not_implemented() {
    let dir = TempDir::new().unwrap();
    let fasta = write(&dir, "ref.fa", SINGLE_REFERENCE);
    let input = write(&dir, "s1.sam", &scenario_sam());

    minorvar()
        .arg("call")
        .arg("-r")
        .arg(&fasta)
        .arg(&input)
        .args(["--alphabet", "amino-acid"])
        .arg("-o")
        .arg(dir.path().join("out.tsv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("not implemented"));
}

#[test]
fn test_hard_clip_policy() {
    let dir = TempDir::new().unwrap();
    let fasta = write(&dir, "ref.fa", SINGLE_REFERENCE);
    let input = write(
        &dir,
        "s1.sam",
        &sam(
            &[("ref", 3)],
            &[
                "read1\t0\tref\t1\t60\t3M\t*\t0\t0\tACG\t*",
                "clipped\t0\tref\t1\t60\t5H3M\t*\t0\t0\tACT\t*",
            ],
        ),
    );
    let output = dir.path().join("out.tsv");

    minorvar()
        .arg("call")
        .arg("-r")
        .arg(&fasta)
        .arg(&input)
        .args(["--min-coverage", "2"])
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("hard clip"));

    minorvar()
        .arg("call")
        .arg("-r")
        .arg(&fasta)
        .arg(&input)
        .args(["--min-coverage", "2", "--hard-clips", "skip"])
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    assert_eq!(read(&output), "pos\tvariant\t0\n2\tT\t0.5\n");
}

#[test]
fn test_unmapped_reads_ignored() {
    let dir = TempDir::new().unwrap();
    let fasta = write(&dir, "ref.fa", SINGLE_REFERENCE);
    let input = write(
        &dir,
        "s1.sam",
        &sam(
            &[("ref", 3)],
            &[
                "read1\t0\tref\t1\t60\t3M\t*\t0\t0\tACG\t*",
                "read2\t0\tref\t1\t60\t3M\t*\t0\t0\tACT\t*",
                "lost\t4\t*\t0\t0\t*\t*\t0\t0\tTTT\t*",
            ],
        ),
    );
    let output = dir.path().join("out.tsv");

    minorvar()
        .arg("call")
        .arg("-r")
        .arg(&fasta)
        .arg(&input)
        .args(["--min-coverage", "2"])
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    assert_eq!(read(&output), "pos\tvariant\t0\n2\tT\t0.5\n");
}

#[test]
fn test_two_samples_with_masking() {
    let dir = TempDir::new().unwrap();
    let fasta = write(&dir, "ref.fa", SINGLE_REFERENCE);
    let first = write(&dir, "s1.sam", &scenario_sam());
    let second = write(
        &dir,
        "s2.sam",
        &sam(&[("ref", 3)], &["read1\t0\tref\t1\t60\t3M\t*\t0\t0\tACT\t*"]),
    );
    let output = dir.path().join("out.tsv");

    minorvar()
        .arg("call")
        .arg("-r")
        .arg(&fasta)
        .arg(&first)
        .arg(&second)
        .args(["--min-coverage", "2", "--sample-ids", "s1,s2", "--threads", "2"])
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    // s2 has depth 1 everywhere and is masked
    assert_eq!(read(&output), "pos\tvariant\ts1\ts2\n2\tT\t0.5\t0\n");
}

#[test]
fn test_depth_command() {
    let dir = TempDir::new().unwrap();
    let fasta = write(&dir, "ref.fa", SINGLE_REFERENCE);
    let input = write(&dir, "s1.sam", &scenario_sam());
    let output = dir.path().join("depth.tsv");

    minorvar()
        .arg("depth")
        .arg("-r")
        .arg(&fasta)
        .arg(&input)
        .args(["--min-coverage", "2"])
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    assert_eq!(read(&output), "pos\t0\n0\t2\n1\t2\n2\t2\n");
}

#[test]
fn test_json_output_to_stdout() {
    let dir = TempDir::new().unwrap();
    let fasta = write(&dir, "ref.fa", SINGLE_REFERENCE);
    let input = write(&dir, "s1.sam", &scenario_sam());

    let output = minorvar()
        .args(["--format", "json", "call", "-r"])
        .arg(&fasta)
        .arg(&input)
        .args(["--min-coverage", "2", "-o", "-"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["reference"], "ref");
    assert_eq!(report["variants"][0]["pos"], 2);
    assert_eq!(report["variants"][0]["variant"], "T");
    assert_eq!(report["variants"][0]["frequencies"][0], 0.5);
}

#[test]
fn test_missing_input_file() {
    let dir = TempDir::new().unwrap();
    let fasta = write(&dir, "ref.fa", SINGLE_REFERENCE);

    minorvar()
        .arg("call")
        .arg("-r")
        .arg(&fasta)
        .arg(dir.path().join("absent.sam"))
        .arg("-o")
        .arg(dir.path().join("out.tsv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.sam"));
}
