//! Jane 4 cophylogeny driver

use crate::convert;
use crate::traits::{HgtDetector, PreparedInput, RunContext};
use crate::types::{find_binary, Tool};
use anyhow::{Context, Result};
use lateral_core::RunParams;
use regex::Regex;
use std::path::Path;
use std::process::Command;

/// Jane 4 integration: the CLI wrapper script reads a NEXUS tanglegram
/// (host tree = species tree, parasite tree = gene tree, one-to-one leaf
/// ranges) and prints the best solution's event counts. Host switches are
/// the transfer events.
pub struct JaneDetector;

impl JaneDetector {
    fn binary(&self, params: &RunParams) -> Result<std::path::PathBuf> {
        find_binary(params.tools_dir(), Tool::Jane, Tool::Jane.binary_name()).with_context(|| {
            format!(
                "{} script '{}' not found in the tools directory or on PATH",
                Tool::Jane.display_name(),
                Tool::Jane.binary_name()
            )
        })
    }

    fn count(re: &Regex, raw: &str) -> Option<String> {
        re.captures(raw).map(|cap| cap[1].to_string())
    }
}

impl HgtDetector for JaneDetector {
    fn tool(&self) -> Tool {
        Tool::Jane
    }

    fn is_available(&self, params: &RunParams) -> bool {
        self.binary(params).is_ok()
    }

    fn prepare_input(&self, ctx: &RunContext, gene_tree: &Path) -> Result<PreparedInput> {
        let species = convert::read_newick(ctx.params.require_species_tree()?)?;
        let gene = convert::read_newick(gene_tree)?;
        let input = ctx.scratch.file("jane_input.nex");
        convert::write_jane_nexus(&species, &gene, &input)?;
        Ok(PreparedInput {
            primary: input,
            capture_file: None,
        })
    }

    fn commands(&self, ctx: &RunContext, prepared: &PreparedInput) -> Result<Vec<Command>> {
        let mut cmd = Command::new(self.binary(ctx.params)?);
        cmd.arg(&prepared.primary).current_dir(&ctx.scratch.root);
        Ok(vec![cmd])
    }

    fn parse_summary(&self, raw: &str) -> Result<String> {
        let switches = Self::count(&Regex::new(r"Host Switch(?:es)?:\s*(\d+)")?, raw)
            .context("No host-switch count found in Jane output")?;
        let cost = Self::count(&Regex::new(r"(?i)(?:best\s+)?(?:solution\s+)?cost:\s*(\d+)")?, raw)
            .unwrap_or_else(|| "0".to_string());
        let cospeciations = Self::count(&Regex::new(r"Cospeciations?:\s*(\d+)")?, raw)
            .unwrap_or_else(|| "0".to_string());
        let duplications = Self::count(&Regex::new(r"Duplications?:\s*(\d+)")?, raw)
            .unwrap_or_else(|| "0".to_string());
        let losses = Self::count(&Regex::new(r"Loss(?:es)?:\s*(\d+)")?, raw)
            .unwrap_or_else(|| "0".to_string());

        Ok(format!(
            "cost:{cost} cospeciations:{cospeciations} duplications:{duplications} \
             switches:{switches} losses:{losses}"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Jane 4 command line interface
Solving...
Best Solution Cost: 7
Cospeciations: 3
Duplications: 1
Host Switches: 2
Losses: 1
Failures to Diverge: 0
";

    #[test]
    fn test_parse_event_counts() {
        let stats = JaneDetector.parse_summary(SAMPLE).unwrap();
        assert_eq!(
            stats,
            "cost:7 cospeciations:3 duplications:1 switches:2 losses:1"
        );
    }

    #[test]
    fn test_missing_switch_count_is_an_error() {
        let err = JaneDetector
            .parse_summary("Jane 4\nno events here\n")
            .unwrap_err();
        assert!(format!("{err:#}").contains("host-switch"));
    }

    #[test]
    fn test_singular_event_labels() {
        let raw = "Cost: 2\nCospeciation: 1\nDuplication: 0\nHost Switch: 1\nLoss: 0\n";
        let stats = JaneDetector.parse_summary(raw).unwrap();
        assert_eq!(stats, "cost:2 cospeciations:1 duplications:0 switches:1 losses:0");
    }
}
