//! T-REX hgt detection driver

use crate::convert;
use crate::traits::{HgtDetector, PreparedInput, RunContext};
use crate::types::{find_binary, Tool};
use anyhow::{bail, Context, Result};
use lateral_core::RunParams;
use regex::Regex;
use std::path::Path;
use std::process::Command;

/// T-REX integration: the `hgt3.4` console binary reads a single input
/// file holding the species tree and the gene tree as two Newick lines.
pub struct TrexDetector;

impl TrexDetector {
    fn binary(&self, params: &RunParams) -> Result<std::path::PathBuf> {
        find_binary(params.tools_dir(), Tool::Trex, Tool::Trex.binary_name()).with_context(|| {
            format!(
                "{} binary '{}' not found in the tools directory or on PATH",
                Tool::Trex.display_name(),
                Tool::Trex.binary_name()
            )
        })
    }
}

impl HgtDetector for TrexDetector {
    fn tool(&self) -> Tool {
        Tool::Trex
    }

    fn is_available(&self, params: &RunParams) -> bool {
        self.binary(params).is_ok()
    }

    fn prepare_input(&self, ctx: &RunContext, gene_tree: &Path) -> Result<PreparedInput> {
        let species = convert::read_newick(ctx.params.require_species_tree()?)?;
        let gene = convert::read_newick(gene_tree)?;
        let input = ctx.scratch.file("trex_input.txt");
        convert::write_tree_pair(&species, &gene, &input)?;
        Ok(PreparedInput {
            primary: input,
            capture_file: None,
        })
    }

    fn commands(&self, ctx: &RunContext, prepared: &PreparedInput) -> Result<Vec<Command>> {
        let mut cmd = Command::new(self.binary(ctx.params)?);
        cmd.arg(format!("-inputfile={}", prepared.primary.display()));
        cmd.current_dir(&ctx.scratch.root);
        Ok(vec![cmd])
    }

    fn parse_summary(&self, raw: &str) -> Result<String> {
        if raw.trim().is_empty() {
            bail!("T-REX produced no output");
        }

        let pair_re = Regex::new(r"(?i)from\s+subtree\s+(\S+)\s+to\s+subtree\s+(\S+)")?;
        let mut donors = Vec::new();
        let mut recipients = Vec::new();
        for cap in pair_re.captures_iter(raw) {
            let donor = cap[1].trim_end_matches(',').to_string();
            let recipient = cap[2].trim_end_matches(',').to_string();
            if !donors.contains(&donor) {
                donors.push(donor);
            }
            if !recipients.contains(&recipient) {
                recipients.push(recipient);
            }
        }

        let count_re = Regex::new(r"(?i)number of HGTs?\s*(?:found|detected)?\s*[=:]\s*(\d+)")?;
        let hgts = match count_re.captures(raw) {
            Some(cap) => cap[1].parse::<usize>()?,
            None => pair_re.captures_iter(raw).count(),
        };

        Ok(format!(
            "hgts:{} donors:{} recipients:{}",
            hgts,
            donors.len(),
            recipients.len()
        ))
    }
}
