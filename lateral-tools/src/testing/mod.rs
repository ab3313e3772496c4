//! Test support: mock external binaries and a mock detector.
//!
//! External HGT tools are never present on CI, so driver tests run against
//! executable shell scripts that imitate each tool's observable behavior.

use crate::convert;
use crate::traits::{HgtDetector, PreparedInput, RunContext};
use crate::types::Tool;
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Write an executable shell script that stands in for a tool binary
pub fn write_mock_binary(dir: &Path, name: &str, script: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{script}"))
        .with_context(|| format!("Failed to write mock binary {:?}", path))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(&path)?.permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms)?;
    }

    Ok(path)
}

/// Detector driven by an arbitrary mock binary; the stat line is the first
/// non-empty line of the captured output.
pub struct MockDetector {
    binary: PathBuf,
}

impl MockDetector {
    pub fn new(binary: PathBuf) -> Self {
        Self { binary }
    }
}

impl HgtDetector for MockDetector {
    fn tool(&self) -> Tool {
        Tool::Trex
    }

    fn is_available(&self, _params: &lateral_core::RunParams) -> bool {
        self.binary.exists()
    }

    fn prepare_input(&self, ctx: &RunContext, gene_tree: &Path) -> Result<PreparedInput> {
        let gene = convert::read_newick(gene_tree)?;
        let input = ctx.scratch.file("mock_input.txt");
        std::fs::write(&input, format!("{gene}\n"))?;
        Ok(PreparedInput {
            primary: input,
            capture_file: None,
        })
    }

    fn commands(&self, _ctx: &RunContext, prepared: &PreparedInput) -> Result<Vec<Command>> {
        let mut cmd = Command::new(&self.binary);
        cmd.arg(&prepared.primary);
        Ok(vec![cmd])
    }

    fn parse_summary(&self, raw: &str) -> Result<String> {
        match raw.lines().map(str::trim).find(|l| !l.is_empty()) {
            Some(line) => Ok(line.to_string()),
            None => bail!("mock tool produced no output"),
        }
    }
}
