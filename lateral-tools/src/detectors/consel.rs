//! CONSEL AU-test pipeline driver
//!
//! The AU test needs per-site log likelihoods for the candidate topologies
//! (the gene tree and the species tree), so each gene runs a four-step
//! pipeline: `raxmlHPC -f g` over the per-gene alignment, then CONSEL's
//! `makermt --puzzle`, `consel`, and `catpv`. Only `catpv` prints to
//! stdout; everything else lands in scratch files named off the fixed
//! `au` basename, which the per-iteration clear removes.

use crate::convert;
use crate::traits::{HgtDetector, PreparedInput, RunContext};
use crate::types::{find_binary, Tool};
use anyhow::{bail, Context, Result};
use lateral_core::RunParams;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::Command;

const BASENAME: &str = "au";

pub struct ConselDetector;

impl ConselDetector {
    fn resolve(&self, params: &RunParams, binary: &str) -> Result<PathBuf> {
        find_binary(params.tools_dir(), Tool::Consel, binary).with_context(|| {
            format!("'{binary}' not found in the tools directory or on PATH")
        })
    }
}

impl HgtDetector for ConselDetector {
    fn tool(&self) -> Tool {
        Tool::Consel
    }

    fn is_available(&self, params: &RunParams) -> bool {
        ["raxmlHPC", "makermt", "consel", "catpv"]
            .iter()
            .all(|b| self.resolve(params, b).is_ok())
    }

    fn prepare_input(&self, ctx: &RunContext, gene_tree: &Path) -> Result<PreparedInput> {
        let msa_dir = ctx.params.require_msa_dir()?;
        let msa = convert::msa_for_gene_tree(msa_dir, gene_tree, &ctx.config.run.msa_suffix)?;
        convert::check_phylip(&msa)?;

        let species = convert::read_newick(ctx.params.require_species_tree()?)?;
        let gene = convert::read_newick(gene_tree)?;

        // candidate topologies, one per line: gene tree first, species second
        let trees = ctx.scratch.file("consel_trees.txt");
        convert::write_tree_pair(&gene, &species, &trees)?;

        Ok(PreparedInput {
            primary: msa,
            capture_file: None,
        })
    }

    fn commands(&self, ctx: &RunContext, prepared: &PreparedInput) -> Result<Vec<Command>> {
        let scratch = &ctx.scratch.root;
        let trees = ctx.scratch.file("consel_trees.txt");

        let mut raxml = Command::new(self.resolve(ctx.params, "raxmlHPC")?);
        raxml
            .arg("-f")
            .arg("g")
            .arg("-s")
            .arg(&prepared.primary)
            .arg("-z")
            .arg(&trees)
            .arg("-m")
            .arg(&ctx.config.tools.raxml_model)
            .arg("-n")
            .arg(BASENAME)
            .arg("-w")
            .arg(scratch)
            .current_dir(scratch);

        let mut makermt = Command::new(self.resolve(ctx.params, "makermt")?);
        makermt
            .arg("--puzzle")
            .arg(format!("RAxML_perSiteLLs.{BASENAME}"))
            .arg(BASENAME)
            .current_dir(scratch);

        let mut consel = Command::new(self.resolve(ctx.params, "consel")?);
        consel.arg(BASENAME).current_dir(scratch);

        let mut catpv = Command::new(self.resolve(ctx.params, "catpv")?);
        catpv.arg(BASENAME).current_dir(scratch);

        Ok(vec![raxml, makermt, consel, catpv])
    }

    fn parse_summary(&self, raw: &str) -> Result<String> {
        // catpv table rows: `# rank item obs au np | ...`
        let row_re =
            Regex::new(r"(?m)^#?\s*\d+\s+(\d+)\s+(-?[\d.]+)\s+([\d.]+)\s+([\d.]+)")?;
        let mut items = Vec::new();
        for cap in row_re.captures_iter(raw) {
            items.push(format!("item{}={}", &cap[1], &cap[3]));
        }
        if items.is_empty() {
            bail!("No AU p-value rows found in catpv output");
        }
        Ok(format!("au_items:{} {}", items.len(), items.join(" ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# reading au.pv
# rank item    obs     au     np |     bp     pp     kh     sh    wkh    wsh |
#    1    1   -2.3  0.954  0.848 |  0.844  1.000  0.897  0.897  0.897  0.897 |
#    2    2    2.3  0.046  0.152 |  0.156  0.000  0.103  0.103  0.103  0.103 |
";

    #[test]
    fn test_parse_au_rows() {
        let stats = ConselDetector.parse_summary(SAMPLE).unwrap();
        assert_eq!(stats, "au_items:2 item1=0.954 item2=0.046");
    }

    #[test]
    fn test_header_rows_are_not_matched() {
        let raw = "# rank item obs au np |\n";
        assert!(ConselDetector.parse_summary(raw).is_err());
    }

    #[test]
    fn test_missing_table_is_an_error() {
        assert!(ConselDetector.parse_summary("no table at all").is_err());
    }
}
