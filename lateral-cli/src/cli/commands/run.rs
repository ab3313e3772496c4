use crate::cli::output::*;
use clap::Args;
use lateral_core::{lateral_workspace_dir, Config, RunParams};
use lateral_tools::{detector_for, run_batch, Tool};
use lateral_utils::fmt_seconds;
use std::path::PathBuf;

#[derive(Args)]
pub struct RunArgs {
    /// Tool to drive (trex, ranger, riata, jane, consel)
    #[arg(long, value_parser = super::parse_tool)]
    pub tool: Tool,

    /// Directory holding the gene-tree files
    #[arg(long)]
    pub gene_trees_dir: Option<PathBuf>,

    /// Species tree (Newick)
    #[arg(long)]
    pub species_tree: Option<PathBuf>,

    /// Directory holding per-gene Phylip alignments (CONSEL only)
    #[arg(long)]
    pub msa_dir: Option<PathBuf>,

    /// Working directory for reports and scratch files
    /// (defaults to $LATERAL_WORKSPACE_DIR)
    #[arg(long)]
    pub work_dir: Option<PathBuf>,

    /// Root directory of tool installations
    #[arg(long)]
    pub tools_dir: Option<PathBuf>,
}

pub fn run(args: RunArgs, verbose: bool) -> anyhow::Result<()> {
    let config = Config::load_default()?;
    let params = RunParams {
        gene_trees_dir: args.gene_trees_dir,
        species_tree: args.species_tree,
        msa_dir: args.msa_dir,
        work_dir: args.work_dir.or_else(|| Some(lateral_workspace_dir())),
        tools_dir: args.tools_dir,
        verbose,
    }
    .resolved();

    let detector = detector_for(args.tool);
    section_header(&format!("{} batch", args.tool.display_name()));

    let summary = run_batch(detector.as_ref(), &params, &config)?;

    success(&format!(
        "{} processed {} gene tree(s)",
        args.tool.display_name(),
        summary.genes
    ));
    info(&format!("results:     {}", summary.summary_path.display()));
    info(&format!("raw output:  {}", summary.raw_path.display()));
    info(&format!(
        "wall time:   {} s, user time: {} s",
        fmt_seconds(summary.totals.wall()),
        fmt_seconds(summary.totals.user())
    ));

    Ok(())
}
