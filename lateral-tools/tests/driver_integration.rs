//! End-to-end batch driver tests against mock tool binaries

use lateral_core::{Config, RunParams};
use lateral_tools::driver::{enumerate_gene_trees, gene_number, run_batch};
use lateral_tools::testing::{write_mock_binary, MockDetector};
use std::fs;
use std::path::{Path, PathBuf};

struct Fixture {
    _dir: tempfile::TempDir,
    gene_trees: PathBuf,
    work: PathBuf,
    bin: PathBuf,
}

fn fixture(gene_files: &[&str]) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let gene_trees = dir.path().join("trees");
    let work = dir.path().join("work");
    let bin = dir.path().join("bin");
    fs::create_dir_all(&gene_trees).unwrap();
    fs::create_dir_all(&bin).unwrap();

    for name in gene_files {
        fs::write(gene_trees.join(name), "((A,B),C);\n").unwrap();
    }
    let species = dir.path().join("species.nwk");
    fs::write(&species, "((A,B),C);\n").unwrap();

    Fixture {
        _dir: dir,
        gene_trees,
        work,
        bin,
    }
}

fn params(fx: &Fixture) -> RunParams {
    let species = fx.gene_trees.parent().unwrap().join("species.nwk");
    RunParams {
        gene_trees_dir: Some(fx.gene_trees.clone()),
        species_tree: Some(species),
        work_dir: Some(fx.work.clone()),
        ..Default::default()
    }
    .resolved()
}

#[test]
fn test_batch_produces_one_record_per_gene_in_enumeration_order() {
    let fx = fixture(&["gene_0.nwk", "gene_1.nwk", "gene_2.nwk"]);
    let binary = write_mock_binary(&fx.bin, "mock-hgt", "echo 'hgts:1 donors:1 recipients:1'")
        .unwrap();

    let detector = MockDetector::new(binary);
    let summary = run_batch(&detector, &params(&fx), &Config::default()).unwrap();
    assert_eq!(summary.genes, 3);

    // expected order is whatever the filesystem enumerated
    let expected: Vec<String> = enumerate_gene_trees(&fx.gene_trees, ".nwk")
        .unwrap()
        .iter()
        .map(|p| gene_number(p.file_name().unwrap().to_str().unwrap()))
        .collect();

    let text = fs::read_to_string(&summary.summary_path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 1 + 3 + 2); // header + records + totals
    assert_eq!(lines[0], "#T-REX");
    for (i, gene) in expected.iter().enumerate() {
        assert_eq!(
            lines[1 + i],
            format!("{i}\t{gene}\thgts:1 donors:1 recipients:1")
        );
    }

    // totals render as non-negative decimals
    let wall = lines[4].strip_prefix("Total wall time T-REX: ").unwrap();
    let user = lines[5].strip_prefix("Total user time T-REX: ").unwrap();
    assert!(wall.parse::<f64>().unwrap() >= 0.0);
    assert!(user.parse::<f64>().unwrap() >= 0.0);

    // raw accumulation carries every gene's tagged output
    let raw = fs::read_to_string(&summary.raw_path).unwrap();
    for i in 0..3 {
        assert!(raw.contains(&format!("== gene tree {i} ==")));
    }
}

#[test]
fn test_scratch_is_clean_after_successful_batch() {
    let fx = fixture(&["gene_7.nwk"]);
    let binary = write_mock_binary(&fx.bin, "mock-hgt", "echo ok").unwrap();

    let detector = MockDetector::new(binary);
    run_batch(&detector, &params(&fx), &Config::default()).unwrap();

    let scratch = fx.work.join("scratch_trex");
    let leftovers: Vec<_> = fs::read_dir(&scratch)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|n| n != "workspace.json")
        .collect();
    assert!(leftovers.is_empty(), "scratch not cleaned: {leftovers:?}");
}

#[test]
fn test_failing_tool_aborts_batch_and_leaves_scratch() {
    let fx = fixture(&["gene_0.nwk", "gene_1.nwk"]);
    let binary =
        write_mock_binary(&fx.bin, "mock-hgt", "echo 'boom' >&2; exit 3").unwrap();

    let detector = MockDetector::new(binary);
    let err = run_batch(&detector, &params(&fx), &Config::default()).unwrap_err();
    assert!(format!("{err:#}").contains("exit code 3"));

    // no record lines were written past the header
    let summary = fs::read_to_string(fx.work.join("trex_results.txt")).unwrap();
    assert_eq!(summary.lines().count(), 1);

    // failure path keeps the iteration's scratch files for diagnosis
    let scratch_input = fx.work.join("scratch_trex").join("mock_input.txt");
    assert!(scratch_input.exists());
}

#[test]
fn test_missing_binary_aborts_before_any_output() {
    let fx = fixture(&["gene_0.nwk"]);
    let detector = MockDetector::new(PathBuf::from("/nonexistent/mock-hgt"));

    let err = run_batch(&detector, &params(&fx), &Config::default()).unwrap_err();
    assert!(format!("{err}").contains("not available"));
    assert!(!fx.work.join("trex_results.txt").exists());
}

#[test]
fn test_empty_batch_reports_zero_genes() {
    let fx = fixture(&[]);
    let binary = write_mock_binary(&fx.bin, "mock-hgt", "echo ok").unwrap();

    let detector = MockDetector::new(binary);
    let summary = run_batch(&detector, &params(&fx), &Config::default()).unwrap();
    assert_eq!(summary.genes, 0);

    let text = fs::read_to_string(&summary.summary_path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3); // header + two totals
    assert_eq!(lines[1], "Total wall time T-REX: 0.000");
}

#[test]
fn test_gene_number_with_no_digits_propagates_empty_field() {
    let fx = fixture(&["gene.nwk"]);
    let binary = write_mock_binary(&fx.bin, "mock-hgt", "echo ok").unwrap();

    let detector = MockDetector::new(binary);
    let summary = run_batch(&detector, &params(&fx), &Config::default()).unwrap();

    let text = fs::read_to_string(&summary.summary_path).unwrap();
    assert!(text.lines().any(|l| l == "0\t\tok"));
}

#[test]
fn test_absent_work_dir_parameter_fails_fast() {
    let fx = fixture(&["gene_0.nwk"]);
    let binary = write_mock_binary(&fx.bin, "mock-hgt", "echo ok").unwrap();

    let mut p = params(&fx);
    p.work_dir = None;
    let err = run_batch(&MockDetector::new(binary), &p, &Config::default()).unwrap_err();
    assert!(format!("{err}").contains("--work-dir"));
}
