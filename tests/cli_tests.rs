//! Integration tests for the CLI application
//!
//! These tests verify that the CLI commands work correctly with real data files.

use std::io::Write;
use std::process::Command;
use tempfile::{NamedTempFile, TempDir};

/// Helper to create a small property CSV file
fn property_csv() -> std::io::Result<NamedTempFile> {
    let mut file = NamedTempFile::with_suffix(".csv")?;
    writeln!(file, "smiles,logp,solubility")?;
    writeln!(file, "CCO,-0.3,-0.77")?;
    writeln!(file, "C1=CC=CC=C1,2.1,-2.1")?;
    writeln!(file, "CC(C)O,0.05,")?;
    writeln!(file, "CCN,-0.1,-0.2")?;
    writeln!(file, "CCCC,2.9,")?;
    writeln!(file, "c1ccncc1,0.65,-0.5")?;
    file.flush()?;
    Ok(file)
}

fn cli_binary() -> &'static str {
    env!("CARGO_BIN_EXE_moldata")
}

#[test]
fn test_cli_inspect_command() {
    let data = property_csv().expect("Failed to create test data");

    let output = Command::new(cli_binary())
        .args(["inspect", "--data", data.path().to_str().unwrap()])
        .output()
        .expect("Failed to run inspect");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Molecules: 6"));
    assert!(stdout.contains("Tasks: 2"));
    assert!(stdout.contains("Task 0: 6/6"));
    assert!(stdout.contains("Task 1: 4/6"));
}

#[test]
fn test_cli_inspect_compound_names() {
    let mut file = NamedTempFile::with_suffix(".csv").expect("Failed to create temp file");
    writeln!(file, "name,smiles,y").expect("Failed to write");
    writeln!(file, "ethanol,CCO,1.0").expect("Failed to write");
    writeln!(file, "benzene,C1=CC=CC=C1,2.0").expect("Failed to write");
    file.flush().expect("Failed to flush");

    let output = Command::new(cli_binary())
        .args([
            "inspect",
            "--data",
            file.path().to_str().unwrap(),
            "--compound-names",
        ])
        .output()
        .expect("Failed to run inspect");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Molecules: 2"));
    assert!(stdout.contains("Compound names: yes"));
}

#[test]
fn test_cli_split_command() {
    let data = property_csv().expect("Failed to create test data");
    let out_dir = TempDir::new().expect("Failed to create temp dir");

    let output = Command::new(cli_binary())
        .args([
            "split",
            "--data",
            data.path().to_str().unwrap(),
            "--num-chunks",
            "3",
            "--seed",
            "42",
            "--output",
            out_dir.path().to_str().unwrap(),
        ])
        .output()
        .expect("Failed to run split");

    assert!(output.status.success());

    // ceil(6/3) = 2, so three files of two molecules each
    let mut total_rows = 0;
    for i in 0..3 {
        let path = out_dir.path().join(format!("chunk_{i}.csv"));
        assert!(path.exists(), "chunk_{i}.csv should exist");
        let content = std::fs::read_to_string(&path).expect("Failed to read chunk");
        total_rows += content.lines().count() - 1; // minus header
    }
    assert_eq!(total_rows, 6);
}

#[test]
fn test_cli_split_deterministic_with_seed() {
    let data = property_csv().expect("Failed to create test data");
    let dir_a = TempDir::new().expect("Failed to create temp dir");
    let dir_b = TempDir::new().expect("Failed to create temp dir");

    for dir in [&dir_a, &dir_b] {
        let output = Command::new(cli_binary())
            .args([
                "split",
                "--data",
                data.path().to_str().unwrap(),
                "--num-chunks",
                "2",
                "--seed",
                "7",
                "--output",
                dir.path().to_str().unwrap(),
            ])
            .output()
            .expect("Failed to run split");
        assert!(output.status.success());
    }

    for i in 0..2 {
        let a = std::fs::read_to_string(dir_a.path().join(format!("chunk_{i}.csv")))
            .expect("Failed to read chunk");
        let b = std::fs::read_to_string(dir_b.path().join(format!("chunk_{i}.csv")))
            .expect("Failed to read chunk");
        assert_eq!(a, b);
    }
}

#[test]
fn test_cli_error_handling_missing_file() {
    let output = Command::new(cli_binary())
        .args(["inspect", "--data", "/nonexistent/file.csv"])
        .output()
        .expect("Failed to run inspect");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error"));
}

#[test]
fn test_cli_error_handling_bad_data() {
    let mut file = NamedTempFile::with_suffix(".csv").expect("Failed to create temp file");
    writeln!(file, "smiles,y").expect("Failed to write");
    writeln!(file, "CCO,not_a_number").expect("Failed to write");
    file.flush().expect("Failed to flush");

    let output = Command::new(cli_binary())
        .args(["inspect", "--data", file.path().to_str().unwrap()])
        .output()
        .expect("Failed to run inspect");

    assert!(!output.status.success());
}

#[test]
fn test_cli_help() {
    let output = Command::new(cli_binary())
        .args(["--help"])
        .output()
        .expect("Failed to run help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("inspect"));
    assert!(stdout.contains("split"));
}
