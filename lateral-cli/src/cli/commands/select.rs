use crate::cli::output::*;
use anyhow::bail;
use clap::Args;
use lateral_utils::select::{
    distance_sum, select_exhaustive, select_maxdist, DistanceMatrix, DEFAULT_MAX_COMBINATIONS,
};
use std::path::PathBuf;

#[derive(Args)]
pub struct SelectArgs {
    /// Tab-separated pairwise distance matrix
    #[arg(long)]
    pub distance_matrix: PathBuf,

    /// Number of prototypes to select (>= 2, < matrix size)
    #[arg(long, short = 'k')]
    pub count: usize,

    /// Selection algorithm: maxdist (greedy) or exhaustive (exact, small
    /// instances only)
    #[arg(long, default_value = "maxdist")]
    pub method: String,
}

pub fn run(args: SelectArgs) -> anyhow::Result<()> {
    let dm = DistanceMatrix::from_file(&args.distance_matrix)?;

    let selected = match args.method.as_str() {
        "maxdist" => select_maxdist(&dm, args.count)?,
        "exhaustive" => select_exhaustive(&dm, args.count, DEFAULT_MAX_COMBINATIONS)?,
        other => bail!("Unknown selection method '{other}' (expected maxdist or exhaustive)"),
    };

    let indices: Vec<usize> = dm
        .ids()
        .iter()
        .enumerate()
        .filter(|(_, id)| selected.contains(id))
        .map(|(i, _)| i)
        .collect();
    let objective = distance_sum(&indices, &dm);

    section_header(&format!(
        "{} of {} elements selected ({})",
        selected.len(),
        dm.len(),
        args.method
    ));
    for id in &selected {
        println!("{id}");
    }
    info(&format!("objective (sum of pairwise distances): {objective:.4}"));
    Ok(())
}
