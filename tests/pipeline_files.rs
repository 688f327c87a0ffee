use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use dotalign::formats::{check_output_path, InputError};
use dotalign::model::{Alphabet, AlphabetPolicy};
use dotalign::pipeline::{analyze_files, AnalysisOptions};
use dotalign::plot::DotPlot;
use dotalign::report::render_report;
use dotalign::ErrorKind;

fn write(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_full_run_from_files() {
    let dir = TempDir::new().unwrap();
    let fasta = write(&dir, "pair.fasta", b">s1 first\nAC\nGT\n>s2 second\nACCT\n");
    let params = write(&dir, "params.txt", b"# custom\nmatch_score = 2\nmismatch_penalty = -1\n");

    let analysis = analyze_files(&fasta, Some(params.as_path()), &AnalysisOptions::default()).unwrap();
    assert_eq!(analysis.report.per_position, vec![2.0, 2.0, -1.0, 2.0]);
    assert_eq!(analysis.report.score, 5.0);
    assert_eq!(analysis.matrix.diagonal(), analysis.report.per_position);

    let report = render_report(&analysis);
    assert!(report.starts_with("s1-s2: Identity: 3/4 (75.0%), Gaps: 0/4 (0.0%), Score=5\n"));

    let plot_dir = dir.path().join("dotplots");
    let path = DotPlot::from_analysis(&analysis)
        .save_pgm(&plot_dir, &analysis.pair, 3)
        .unwrap();
    assert_eq!(path, plot_dir.join("s1_s2.pgm"));
    let image = fs::read(&path).unwrap();
    let header = b"P5\n12 12\n255\n";
    assert!(image.starts_with(header));
    assert_eq!(image.len(), header.len() + 144);
}

#[test]
fn test_defaults_without_parameter_file() {
    let dir = TempDir::new().unwrap();
    let fasta = write(&dir, "pair.fa", b">a\nACGT\n>b\nACCT\n");
    let analysis = analyze_files(&fasta, None, &AnalysisOptions::default()).unwrap();
    assert_eq!(analysis.report.score, 2.0);
}

#[test]
fn test_fixture_error_classes() {
    let dir = TempDir::new().unwrap();
    let cases: &[(&str, &[u8], ErrorKind)] = &[
        ("no_header.fasta", b"ACGT\nACGT\n", ErrorKind::Format),
        ("corrupted.fasta", b">a\n>b\nACGT\n", ErrorKind::Format),
        ("single.fasta", b">a\nACGT\n", ErrorKind::Count),
        ("three.fasta", b">a\nACGT\n>b\nACGT\n>c\nACGT\n", ErrorKind::Count),
        ("unequal.fasta", b">a\nACGT\n>b\nACG\n", ErrorKind::LengthMismatch),
        ("invalid_chars.fasta", b">a\nAC1T\n>b\nACGT\n", ErrorKind::Alphabet),
        ("binary.fasta", b">a\nAC\xfe\xffT\n>b\nACGT\n", ErrorKind::Format),
        ("single_invalid.fasta", b">a\nAC1T\n", ErrorKind::Count),
        ("three_invalid.fasta", b">a\nACGT\n>b\nACGT\n>c\nAC1T\n", ErrorKind::Count),
        ("three_invalid_first.fasta", b">a\nAC!T\n>b\nACGT\n>c\nACGT\n", ErrorKind::Count),
    ];

    for (name, content, kind) in cases {
        let fasta = write(&dir, name, content);
        let err = analyze_files(&fasta, None, &AnalysisOptions::default()).unwrap_err();
        assert_eq!(err.kind(), *kind, "{name}: {err}");
    }
}

#[test]
fn test_parameter_error_classes() {
    let dir = TempDir::new().unwrap();
    let fasta = write(&dir, "pair.fasta", b">a\nACGT\n>b\nACGT\n");
    let cases: &[(&str, &[u8], ErrorKind)] = &[
        ("double_equals.txt", b"match_score=2=3\n", ErrorKind::MalformedParameter),
        ("no_equals.txt", b"match_score 2\n", ErrorKind::MalformedParameter),
        ("misspelled.txt", b"matchscore=2\n", ErrorKind::UnknownParameter),
        ("not_number.txt", b"match_score=two\n", ErrorKind::ParameterType),
    ];

    for (name, content, kind) in cases {
        let params = write(&dir, name, content);
        let err = analyze_files(&fasta, Some(params.as_path()), &AnalysisOptions::default()).unwrap_err();
        assert_eq!(err.kind(), *kind, "{name}: {err}");
    }
}

#[test]
fn test_lenient_invalid_characters() {
    let dir = TempDir::new().unwrap();
    let fasta = write(&dir, "warn.fasta", b">a\nACXT\n>b\nACGT\n");
    let options = AnalysisOptions {
        alphabet: Alphabet::Nucleotide,
        policy: AlphabetPolicy::Lenient,
    };
    let analysis = analyze_files(&fasta, None, &options).unwrap();
    assert_eq!(analysis.pair.first().sequence(), "ACNT");
    assert_eq!(analysis.warnings.len(), 1);
    assert!(render_report(&analysis).contains("Warnings:"));
}

#[test]
fn test_file_checks() {
    let dir = TempDir::new().unwrap();

    let wrong_ext = write(&dir, "pair.txt", b">a\nA\n>b\nA\n");
    let err = analyze_files(&wrong_ext, None, &AnalysisOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Input);

    let missing = dir.path().join("missing.fasta");
    let err = analyze_files(&missing, None, &AnalysisOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Input);

    let fasta = write(&dir, "pair.fasta", b">a\nA\n>b\nA\n");
    let bad_params = write(&dir, "params.cfg", b"match_score=1\n");
    let err = analyze_files(&fasta, Some(bad_params.as_path()), &AnalysisOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Input);
}

#[test]
fn test_existing_output_needs_force() {
    let dir = TempDir::new().unwrap();
    let existing = write(&dir, "report.txt", b"old\n");

    let err = check_output_path(&existing, false).unwrap_err();
    assert!(matches!(err, InputError::OutputExists(_)));
    assert!(check_output_path(&existing, true).is_ok());

    // Only the default report in the working directory is exempt.
    let elsewhere = write(&dir, "output_fasta.txt", b"old\n");
    assert!(matches!(
        check_output_path(&elsewhere, false),
        Err(InputError::OutputExists(_))
    ));
}

#[test]
fn test_byte_order_mark_is_ignored() {
    let dir = TempDir::new().unwrap();
    let fasta = write(&dir, "bom.fasta", b"\xef\xbb\xbf>a\nACGT\n>b\nACGT\n");
    let analysis = analyze_files(&fasta, None, &AnalysisOptions::default()).unwrap();
    assert_eq!(analysis.pair.first().id(), "a");
    assert_eq!(analysis.report.matches, 4);
}
