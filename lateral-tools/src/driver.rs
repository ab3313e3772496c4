//! Generic per-tool batch driver.
//!
//! One control flow for all five detectors: enumerate gene trees, convert,
//! invoke, time, parse, record, clean scratch. The batch is strictly
//! sequential and fails fast: the first conversion, invocation, or parse
//! failure aborts the whole run for that tool.

use crate::invoke::run_timed;
use crate::traits::{HgtDetector, RunContext};
use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use lateral_core::{Config, RunParams};
use lateral_utils::{BatchReport, ElapsedTimes, Scratch, TimingTotals};
use std::path::{Path, PathBuf};

/// Outcome of one tool's batch
#[derive(Debug)]
pub struct BatchSummary {
    pub genes: usize,
    pub totals: TimingTotals,
    pub summary_path: PathBuf,
    pub raw_path: PathBuf,
}

/// Extract the "gene number" from a filename by stripping every non-digit
/// character. No digits yields an empty string; both are propagated as-is.
pub fn gene_number(file_name: &str) -> String {
    file_name.chars().filter(char::is_ascii_digit).collect()
}

/// List gene-tree files with the given suffix, in filesystem enumeration
/// order (deliberately unsorted; the batch index follows this order).
pub fn enumerate_gene_trees(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    let mut trees = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to list gene-tree directory {:?}", dir))?
    {
        let entry = entry?;
        let path = entry.path();
        let is_match = path.is_file()
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(suffix));
        if is_match {
            trees.push(path);
        }
    }
    Ok(trees)
}

/// Run one detector over every gene tree in the batch
pub fn run_batch(
    detector: &dyn HgtDetector,
    params: &RunParams,
    config: &Config,
) -> Result<BatchSummary> {
    let tool = detector.tool();

    // preflight: a missing or unexecutable tool aborts before any output
    if !detector.is_available(params) {
        bail!(
            "{} is not available; install it under the tools directory or put '{}' on PATH",
            tool.display_name(),
            tool.binary_name()
        );
    }

    let gene_dir = params.require_gene_trees_dir()?;
    let work_dir = params.require_work_dir()?;
    std::fs::create_dir_all(work_dir)
        .with_context(|| format!("Failed to create working directory {:?}", work_dir))?;

    let trees = enumerate_gene_trees(gene_dir, &config.run.gene_tree_suffix)?;
    tracing::info!(tool = tool.name(), genes = trees.len(), "starting batch");

    let scratch = Scratch::create(work_dir, tool.name())?;
    // residue from an aborted earlier run must not leak into gene 0
    scratch.clear()?;
    let mut report = BatchReport::create(work_dir, tool.name(), tool.display_name())?;
    let mut totals = TimingTotals::default();

    let progress = if params.verbose {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(trees.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{prefix:>10} [{bar:40}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_prefix(tool.display_name());
        bar
    };

    let ctx = RunContext {
        params,
        config,
        scratch: &scratch,
    };

    for (index, tree) in trees.iter().enumerate() {
        let file_name = tree
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("Gene tree {:?} has no usable file name", tree))?;
        let gene = gene_number(file_name);
        progress.set_message(file_name.to_string());

        let prepared = detector
            .prepare_input(&ctx, tree)
            .with_context(|| format!("Input conversion failed for {file_name}"))?;

        let mut raw = String::new();
        let mut times = ElapsedTimes::default();
        for mut cmd in detector.commands(&ctx, &prepared)? {
            let out = run_timed(&mut cmd)?;
            times.merge(&out.times);
            raw.push_str(&out.stdout);
            raw.push_str(&out.stderr);
            if !out.success() {
                bail!(
                    "{} failed on {} (exit code {}): {}",
                    tool.display_name(),
                    file_name,
                    out.exit_code,
                    out.stderr.trim()
                );
            }
        }

        // fold in output the tool wrote to a file instead of stdout
        if let Some(capture) = &prepared.capture_file {
            if capture.exists() {
                raw.push_str(&std::fs::read_to_string(capture)?);
            }
        }

        let stats = detector
            .parse_summary(&raw)
            .with_context(|| format!("Output parsing failed for {file_name}"))?;
        report.record(index, &gene, &stats)?;
        report.append_raw(index, &raw)?;
        totals.add(&times);

        // success path only; a failure above leaves scratch for diagnosis
        scratch.clear()?;
        progress.inc(1);
    }
    progress.finish_and_clear();

    let genes = report.records();
    let (summary_path, raw_path) = report.finish(&totals)?;
    tracing::info!(tool = tool.name(), genes, "batch complete");

    Ok(BatchSummary {
        genes,
        totals,
        summary_path,
        raw_path,
    })
}
