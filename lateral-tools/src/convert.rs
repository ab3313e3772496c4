//! Tree and alignment format translation for the external tools.
//!
//! Pure text reshaping: Newick strings are wrapped into each tool's input
//! encoding (two-line tree pairs, NEXUS blocks, Jane tanglegrams). No tree
//! semantics are interpreted beyond tokenizing leaf names.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Read a Newick tree as a single line; a missing trailing ';' is repaired
pub fn read_newick(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read tree file {:?}", path))?;
    let line = content
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .with_context(|| format!("Tree file {:?} is empty", path))?;
    let mut tree = line.to_string();
    if !tree.ends_with(';') {
        tree.push(';');
    }
    Ok(tree)
}

/// Extract leaf names from a Newick string.
/// A leaf name is any label that directly follows '(' or ','; labels after
/// ')' are internal names and are skipped, as are branch lengths.
pub fn leaf_names(newick: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut current = String::new();
    let mut at_leaf_position = false;
    let mut in_branch_length = false;

    for ch in newick.chars() {
        match ch {
            '(' | ',' => {
                if at_leaf_position && !current.is_empty() {
                    names.push(current.clone());
                }
                current.clear();
                at_leaf_position = true;
                in_branch_length = false;
            }
            ')' | ';' => {
                if at_leaf_position && !current.is_empty() {
                    names.push(current.clone());
                }
                current.clear();
                at_leaf_position = false;
                in_branch_length = false;
            }
            ':' => in_branch_length = true,
            c if c.is_whitespace() => {}
            c => {
                if !in_branch_length {
                    current.push(c);
                }
            }
        }
    }
    names
}

/// Write the two-line `species tree + gene tree` input shared by T-REX and
/// RANGER-DTL
pub fn write_tree_pair(species: &str, gene: &str, out: &Path) -> Result<()> {
    fs::write(out, format!("{species}\n{gene}\n"))
        .with_context(|| format!("Failed to write tree pair {:?}", out))?;
    Ok(())
}

/// Write the NEXUS input PhyloNet's RIATAHGT command expects
pub fn write_riata_nexus(species: &str, gene: &str, out: &Path) -> Result<()> {
    let nexus = format!(
        "#NEXUS\n\n\
         BEGIN TREES;\n\
         Tree speciesTree = {species}\n\
         Tree geneTree = {gene}\n\
         END;\n\n\
         BEGIN PHYLONET;\n\
         RIATAHGT speciesTree {{geneTree}};\n\
         END;\n"
    );
    fs::write(out, nexus).with_context(|| format!("Failed to write NEXUS input {:?}", out))?;
    Ok(())
}

/// Write the Jane tanglegram: HOST/PARASITE trees plus a one-to-one
/// DISTRIBUTION range mapping each gene-tree leaf to the same-named species
pub fn write_jane_nexus(species: &str, gene: &str, out: &Path) -> Result<()> {
    let leaves = leaf_names(gene);
    if leaves.is_empty() {
        bail!("Gene tree has no leaf names; cannot build Jane tanglegram");
    }
    let ranges = leaves
        .iter()
        .map(|l| format!("{l}:{l}"))
        .collect::<Vec<_>>()
        .join(", ");

    let nexus = format!(
        "#NEXUS\n\
         begin host;\n\
         tree host = {species}\n\
         endblock;\n\
         begin parasite;\n\
         tree parasite = {gene}\n\
         endblock;\n\
         begin distribution;\n\
         range {ranges};\n\
         endblock;\n"
    );
    fs::write(out, nexus).with_context(|| format!("Failed to write Jane input {:?}", out))?;
    Ok(())
}

/// Locate the per-gene Phylip alignment next to a gene tree: same file
/// stem, MSA suffix. Missing alignments are fatal for the whole batch.
pub fn msa_for_gene_tree(msa_dir: &Path, gene_tree: &Path, msa_suffix: &str) -> Result<PathBuf> {
    let stem = gene_tree
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("Gene tree {:?} has no usable file name", gene_tree))?;
    let msa = msa_dir.join(format!("{stem}{msa_suffix}"));
    if !msa.exists() {
        bail!(
            "No alignment for gene tree {:?}: expected {:?}",
            gene_tree,
            msa
        );
    }
    Ok(msa)
}

/// Light validation of a Phylip alignment header: `<ntaxa> <nsites>`
pub fn check_phylip(path: &Path) -> Result<()> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read alignment {:?}", path))?;
    let header = content
        .lines()
        .next()
        .with_context(|| format!("Alignment {:?} is empty", path))?;
    let mut fields = header.split_whitespace();
    let ntaxa = fields.next().and_then(|f| f.parse::<usize>().ok());
    let nsites = fields.next().and_then(|f| f.parse::<usize>().ok());
    match (ntaxa, nsites) {
        (Some(t), Some(s)) if t > 0 && s > 0 => Ok(()),
        _ => bail!("Alignment {:?} has a malformed Phylip header: '{header}'", path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_read_newick_repairs_semicolon() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.nwk");
        fs::write(&path, "\n(A,(B,C))\n").unwrap();
        assert_eq!(read_newick(&path).unwrap(), "(A,(B,C));");
    }

    #[test]
    fn test_read_newick_empty_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.nwk");
        fs::write(&path, "  \n").unwrap();
        assert!(read_newick(&path).is_err());
    }

    #[test]
    fn test_leaf_names_skips_internal_labels_and_lengths() {
        let names = leaf_names("((A:0.1,B:0.2)internal:0.3,(C,D)E);");
        assert_eq!(names, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_leaf_names_single_taxon() {
        assert_eq!(leaf_names("(Wolbachia);"), vec!["Wolbachia"]);
    }

    #[test]
    fn test_write_tree_pair() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("pair.txt");
        write_tree_pair("(A,B);", "(B,A);", &out).unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), "(A,B);\n(B,A);\n");
    }

    #[test]
    fn test_riata_nexus_contains_phylonet_block() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("in.nex");
        write_riata_nexus("(A,B);", "(B,A);", &out).unwrap();
        let text = fs::read_to_string(&out).unwrap();
        assert!(text.starts_with("#NEXUS"));
        assert!(text.contains("Tree speciesTree = (A,B);"));
        assert!(text.contains("RIATAHGT speciesTree {geneTree};"));
    }

    #[test]
    fn test_jane_nexus_maps_leaves_one_to_one() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("in.nex");
        write_jane_nexus("(A,(B,C));", "((A,B),C);", &out).unwrap();
        let text = fs::read_to_string(&out).unwrap();
        assert!(text.contains("begin host;"));
        assert!(text.contains("range A:A, B:B, C:C;"));
    }

    #[test]
    fn test_msa_lookup_by_stem() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("gene_3.phy"), "2 10\nA AAAAAAAAAA\nB AAAAAAAAAA\n").unwrap();

        let found =
            msa_for_gene_tree(dir.path(), Path::new("/trees/gene_3.nwk"), ".phy").unwrap();
        assert!(found.ends_with("gene_3.phy"));
        check_phylip(&found).unwrap();

        let missing = msa_for_gene_tree(dir.path(), Path::new("/trees/gene_4.nwk"), ".phy");
        assert!(missing.is_err());
    }

    #[test]
    fn test_check_phylip_rejects_bad_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.phy");
        fs::write(&path, ">fasta_not_phylip\nACGT\n").unwrap();
        assert!(check_phylip(&path).is_err());
    }
}
