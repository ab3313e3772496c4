//! RANGER-DTL reconciliation driver

use crate::convert;
use crate::traits::{HgtDetector, PreparedInput, RunContext};
use crate::types::{find_binary, Tool};
use anyhow::{Context, Result};
use lateral_core::RunParams;
use regex::Regex;
use std::path::Path;
use std::process::Command;

/// RANGER-DTL integration. The binary reads the species tree and gene tree
/// from one two-line Newick file and writes its reconciliation to the `-o`
/// file; the driver folds that file back into the captured text.
pub struct RangerDetector;

impl RangerDetector {
    fn binary(&self, params: &RunParams) -> Result<std::path::PathBuf> {
        find_binary(
            params.tools_dir(),
            Tool::RangerDtl,
            Tool::RangerDtl.binary_name(),
        )
        .with_context(|| {
            format!(
                "{} binary '{}' not found in the tools directory or on PATH",
                Tool::RangerDtl.display_name(),
                Tool::RangerDtl.binary_name()
            )
        })
    }
}

impl HgtDetector for RangerDetector {
    fn tool(&self) -> Tool {
        Tool::RangerDtl
    }

    fn is_available(&self, params: &RunParams) -> bool {
        self.binary(params).is_ok()
    }

    fn prepare_input(&self, ctx: &RunContext, gene_tree: &Path) -> Result<PreparedInput> {
        let species = convert::read_newick(ctx.params.require_species_tree()?)?;
        let gene = convert::read_newick(gene_tree)?;
        let input = ctx.scratch.file("ranger_input.txt");
        convert::write_tree_pair(&species, &gene, &input)?;
        Ok(PreparedInput {
            primary: input,
            capture_file: Some(ctx.scratch.file("ranger_output.txt")),
        })
    }

    fn commands(&self, ctx: &RunContext, prepared: &PreparedInput) -> Result<Vec<Command>> {
        let output = prepared
            .capture_file
            .as_ref()
            .context("RANGER-DTL output path missing from prepared input")?;
        let mut cmd = Command::new(self.binary(ctx.params)?);
        cmd.arg("-i")
            .arg(&prepared.primary)
            .arg("-o")
            .arg(output)
            .current_dir(&ctx.scratch.root);
        Ok(vec![cmd])
    }

    fn parse_summary(&self, raw: &str) -> Result<String> {
        let re = Regex::new(
            r"The minimum reconciliation cost is:\s*(\d+)\s*\(Duplications:\s*(\d+),\s*Transfers:\s*(\d+),\s*Losses:\s*(\d+)\)",
        )?;
        let cap = re.captures(raw).with_context(|| {
            "No reconciliation cost line found in RANGER-DTL output".to_string()
        })?;
        Ok(format!(
            "cost:{} duplications:{} transfers:{} losses:{}",
            &cap[1], &cap[2], &cap[3], &cap[4]
        ))
    }
}
