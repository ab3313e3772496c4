//! Configuration types for Lateral

use crate::LateralError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub queue: QueueConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Filename suffix used to enumerate gene-tree files
    #[serde(default = "default_gene_tree_suffix")]
    pub gene_tree_suffix: String,
    /// Filename suffix for per-gene Phylip alignments
    #[serde(default = "default_msa_suffix")]
    pub msa_suffix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueConfig {
    #[serde(default = "default_threads")]
    pub threads: usize,
    /// Hard wall-time limit passed to the scheduler (h_rt)
    #[serde(default = "default_wall_time")]
    pub wall_time: String,
    /// Memory request passed to the scheduler (mem_free)
    #[serde(default = "default_memory")]
    pub memory: String,
    /// Seconds to sleep between consecutive submissions
    #[serde(default = "default_submit_delay_secs")]
    pub submit_delay_secs: u64,
    /// Shell snippet prepended to every queued command
    #[serde(default = "default_preamble")]
    pub preamble: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Root directory holding one subdirectory per installed tool
    #[serde(default)]
    pub install_dir: Option<String>,
    /// Substitution model handed to the likelihood step of the AU pipeline
    #[serde(default = "default_raxml_model")]
    pub raxml_model: String,
}

// Default value functions
fn default_gene_tree_suffix() -> String {
    ".nwk".to_string()
}
fn default_msa_suffix() -> String {
    ".phy".to_string()
}
fn default_threads() -> usize {
    1
}
fn default_wall_time() -> String {
    "72:00:00".to_string()
}
fn default_memory() -> String {
    "8G".to_string()
}
fn default_submit_delay_secs() -> u64 {
    2
}
fn default_preamble() -> String {
    "source $HOME/.bash_profile".to_string()
}
fn default_raxml_model() -> String {
    "GTRGAMMA".to_string()
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            gene_tree_suffix: default_gene_tree_suffix(),
            msa_suffix: default_msa_suffix(),
        }
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            threads: default_threads(),
            wall_time: default_wall_time(),
            memory: default_memory(),
            submit_delay_secs: default_submit_delay_secs(),
            preamble: default_preamble(),
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            install_dir: None,
            raxml_model: default_raxml_model(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, LateralError> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load `$LATERAL_HOME/config.toml` if present, defaults otherwise
    pub fn load_default() -> Result<Self, LateralError> {
        let path = crate::system::paths::lateral_home().join("config.toml");
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<(), LateralError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| LateralError::Configuration(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}
