//! RIATA-HGT driver (PhyloNet's RIATAHGT command)

use crate::convert;
use crate::traits::{HgtDetector, PreparedInput, RunContext};
use crate::types::{find_binary, Tool};
use anyhow::{bail, Context, Result};
use lateral_core::RunParams;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::Command;

/// RIATA-HGT runs inside PhyloNet, so the invocation is `java -jar
/// PhyloNet.jar <nexus>`; the NEXUS file carries both trees and the
/// RIATAHGT command block.
pub struct RiataDetector;

impl RiataDetector {
    fn jar(&self, params: &RunParams) -> Result<PathBuf> {
        find_binary(params.tools_dir(), Tool::RiataHgt, Tool::RiataHgt.binary_name())
            .with_context(|| {
                format!(
                    "{} not found in the tools directory or on PATH",
                    Tool::RiataHgt.binary_name()
                )
            })
    }

    fn java(&self) -> Result<PathBuf> {
        which::which("java").context("java not found on PATH (required for PhyloNet)")
    }
}

impl HgtDetector for RiataDetector {
    fn tool(&self) -> Tool {
        Tool::RiataHgt
    }

    fn is_available(&self, params: &RunParams) -> bool {
        self.jar(params).is_ok() && self.java().is_ok()
    }

    fn prepare_input(&self, ctx: &RunContext, gene_tree: &Path) -> Result<PreparedInput> {
        let species = convert::read_newick(ctx.params.require_species_tree()?)?;
        let gene = convert::read_newick(gene_tree)?;
        let input = ctx.scratch.file("riata_input.nex");
        convert::write_riata_nexus(&species, &gene, &input)?;
        Ok(PreparedInput {
            primary: input,
            capture_file: None,
        })
    }

    fn commands(&self, ctx: &RunContext, prepared: &PreparedInput) -> Result<Vec<Command>> {
        let mut cmd = Command::new(self.java()?);
        cmd.arg("-jar")
            .arg(self.jar(ctx.params)?)
            .arg(&prepared.primary)
            .current_dir(&ctx.scratch.root);
        Ok(vec![cmd])
    }

    fn parse_summary(&self, raw: &str) -> Result<String> {
        if raw.trim().is_empty() {
            bail!("PhyloNet produced no output");
        }

        let component_re = Regex::new(r"There are (\d+) component")?;
        let components = component_re
            .captures(raw)
            .map(|cap| cap[1].to_string())
            .unwrap_or_else(|| "1".to_string());

        // each solution event is printed as `donor -> recipient`
        let event_re = Regex::new(r"(?m)^\s*\S+\s*->\s*\S+")?;
        let events = event_re.find_iter(raw).count();

        Ok(format!("events:{events} components:{components}"))
    }
}
