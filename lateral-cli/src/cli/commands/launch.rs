use crate::cli::output::*;
use anyhow::bail;
use clap::Args;
use lateral_core::{lateral_workspace_dir, Config, RunParams};
use lateral_tools::{queue::launch_plan, Resources, SubmitMode, Submitter, Tool};
use std::path::PathBuf;

#[derive(Args)]
pub struct LaunchArgs {
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
    #[arg(long)]
    pub work_dir: Option<PathBuf>,

    /// Root directory of tool installations
    #[arg(long)]
    pub tools_dir: Option<PathBuf>,

    /// Tools to launch; defaults to all five
    #[arg(long, value_parser = super::parse_tool, value_delimiter = ',')]
    pub tools: Vec<Tool>,

    /// Submit to the batch queue instead of executing locally
    #[arg(long)]
    pub queue: bool,

    /// Threads per job (0 = all available)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Wall-time limit per job (h_rt)
    #[arg(long)]
    pub wall_time: Option<String>,

    /// Memory request per job (mem_free)
    #[arg(long)]
    pub memory: Option<String>,
}

pub fn run(args: LaunchArgs, verbose: bool) -> anyhow::Result<()> {
    let config = Config::load_default()?;
    let mut queue_config = config.queue.clone();
    if let Some(threads) = args.threads {
        queue_config.threads = if threads == 0 { num_cpus::get() } else { threads };
    }
    if let Some(wall_time) = args.wall_time {
        queue_config.wall_time = wall_time;
    }
    if let Some(memory) = args.memory {
        queue_config.memory = memory;
    }

    let params = RunParams {
        gene_trees_dir: args.gene_trees_dir,
        species_tree: args.species_tree,
        msa_dir: args.msa_dir,
        work_dir: args.work_dir.or_else(|| Some(lateral_workspace_dir())),
        tools_dir: args.tools_dir,
        verbose,
    }
    .resolved();

    // fail fast before any job is submitted
    params.require_gene_trees_dir()?;
    params.require_species_tree()?;
    params.require_work_dir()?;

    let tools: Vec<Tool> = if args.tools.is_empty() {
        Tool::all().to_vec()
    } else {
        args.tools
    };

    let mode = if args.queue {
        SubmitMode::Queue
    } else {
        SubmitMode::Local
    };
    let submitter = Submitter::new(mode, &queue_config);
    submitter.preflight()?;

    let jobs = launch_plan(&params, &tools, &Resources::from(&queue_config))?;

    section_header(&format!("Launching {} tool job(s)", jobs.len()));
    let mut failed = Vec::new();
    for job in jobs {
        let name = job.name.clone();
        info(&format!("{name}: {}", job.command));
        // a failed submission only loses this tool; the rest still launch
        match submitter.submit(job) {
            Ok(()) => success(&name),
            Err(e) => {
                warning(&format!("{name}: {e:#}"));
                failed.push(name);
            }
        }
    }

    if !failed.is_empty() {
        bail!("{} job(s) failed to launch: {}", failed.len(), failed.join(", "));
    }
    Ok(())
}
