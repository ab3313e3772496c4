//! Common types for tool orchestration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The external HGT-detection tools driven by Lateral
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tool {
    Trex,
    RangerDtl,
    RiataHgt,
    Jane,
    Consel,
}

impl Tool {
    /// Every supported tool, in launch order
    pub fn all() -> [Tool; 5] {
        [
            Tool::Trex,
            Tool::RangerDtl,
            Tool::RiataHgt,
            Tool::Jane,
            Tool::Consel,
        ]
    }

    /// Get the short name of the tool (file stems, scratch dirs, job names)
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Trex => "trex",
            Tool::RangerDtl => "ranger",
            Tool::RiataHgt => "riata",
            Tool::Jane => "jane",
            Tool::Consel => "consel",
        }
    }

    /// Get the display name of the tool (report headers, messages)
    pub fn display_name(&self) -> &'static str {
        match self {
            Tool::Trex => "T-REX",
            Tool::RangerDtl => "RANGER-DTL",
            Tool::RiataHgt => "RIATA-HGT",
            Tool::Jane => "Jane",
            Tool::Consel => "CONSEL",
        }
    }

    /// Get the primary binary name for the tool
    pub fn binary_name(&self) -> &'static str {
        match self {
            Tool::Trex => "hgt3.4",
            Tool::RangerDtl => "ranger-dtl-U",
            Tool::RiataHgt => "PhyloNet.jar",
            Tool::Jane => "jane-cli.sh",
            Tool::Consel => "consel",
        }
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Tool {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "trex" | "t-rex" => Ok(Tool::Trex),
            "ranger" | "ranger-dtl" => Ok(Tool::RangerDtl),
            "riata" | "riata-hgt" | "riatahgt" => Ok(Tool::RiataHgt),
            "jane" | "jane4" => Ok(Tool::Jane),
            "consel" => Ok(Tool::Consel),
            _ => anyhow::bail!("Unknown tool: {}", s),
        }
    }
}

/// Resolve a binary for a tool: the installation directory is tried first
/// (`<install_dir>/<tool>/<binary>`, then flat), falling back to `PATH`.
pub fn find_binary(install_dir: Option<&Path>, tool: Tool, binary: &str) -> Option<PathBuf> {
    if let Some(dir) = install_dir {
        let candidate = dir.join(tool.name()).join(binary);
        if candidate.exists() {
            return Some(candidate);
        }
        let flat = dir.join(binary);
        if flat.exists() {
            return Some(flat);
        }
    }
    which::which(binary).ok()
}
