/// Trait for HGT-detection tool drivers
use crate::types::Tool;
use anyhow::Result;
use lateral_core::{Config, RunParams};
use lateral_utils::Scratch;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Everything a detector needs for one batch run
pub struct RunContext<'a> {
    pub params: &'a RunParams,
    pub config: &'a Config,
    pub scratch: &'a Scratch,
}

/// Converted input for one gene tree, written to fixed scratch paths that
/// are overwritten each iteration
#[derive(Debug)]
pub struct PreparedInput {
    /// The main converted input file handed to the tool
    pub primary: PathBuf,
    /// Output file the tool writes instead of stdout, if any; the driver
    /// appends its contents to the captured text before parsing
    pub capture_file: Option<PathBuf>,
}

/// Per-tool descriptor: format conversion, binary invocation, and output
/// parsing for one external HGT-detection tool. The generic batch driver
/// supplies the shared control flow.
pub trait HgtDetector {
    /// Symbolic identity of the tool this detector drives
    fn tool(&self) -> Tool;

    /// Whether the tool's binaries can be resolved (preflight check)
    fn is_available(&self, params: &RunParams) -> bool;

    /// Convert one gene tree (plus species tree / MSA where the tool needs
    /// them) into the tool's expected input encoding
    fn prepare_input(&self, ctx: &RunContext, gene_tree: &Path) -> Result<PreparedInput>;

    /// The command sequence that runs the tool on the prepared input
    fn commands(&self, ctx: &RunContext, prepared: &PreparedInput) -> Result<Vec<Command>>;

    /// Scrape the captured output into one normalized statistic line
    fn parse_summary(&self, raw: &str) -> Result<String>;
}
