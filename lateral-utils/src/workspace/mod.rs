//! Per-tool scratch directory management.
//!
//! Each driver owns one scratch directory under the working directory,
//! named after its tool so co-located drivers cannot collide. Per-iteration
//! files are overwritten in place and removed by `clear()` on the success
//! path only; a failure mid-iteration deliberately leaves them behind for
//! diagnosis.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

const METADATA_FILE: &str = "workspace.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScratchMetadata {
    pub id: String,
    pub tool: String,
    pub created_at: u64,
}

#[derive(Debug)]
pub struct Scratch {
    pub root: PathBuf,
    metadata: ScratchMetadata,
}

impl Scratch {
    /// Create (or reuse) the scratch directory for one tool
    pub fn create(work_dir: &Path, tool: &str) -> Result<Self> {
        let root = work_dir.join(format!("scratch_{tool}"));
        fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create scratch directory {:?}", root))?;

        let created_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let metadata = ScratchMetadata {
            id: format!("{created_at}_{tool}"),
            tool: tool.to_string(),
            created_at,
        };

        let json = serde_json::to_string_pretty(&metadata)?;
        fs::write(root.join(METADATA_FILE), json)
            .with_context(|| format!("Failed to write scratch metadata in {:?}", root))?;

        Ok(Self { root, metadata })
    }

    /// Path of a scratch file; the same name is reused every iteration
    pub fn file(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn metadata(&self) -> &ScratchMetadata {
        &self.metadata
    }

    /// Remove every per-iteration file (the metadata file stays)
    pub fn clear(&self) -> Result<()> {
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let path = entry.path();
            if path.file_name().and_then(|n| n.to_str()) == Some(METADATA_FILE) {
                continue;
            }
            if path.is_dir() {
                fs::remove_dir_all(&path)
                    .with_context(|| format!("Failed to remove scratch subdir {:?}", path))?;
            } else {
                fs::remove_file(&path)
                    .with_context(|| format!("Failed to remove scratch file {:?}", path))?;
            }
        }
        Ok(())
    }

    /// True when no per-iteration files remain
    pub fn is_clean(&self) -> Result<bool> {
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.path().file_name().and_then(|n| n.to_str()) != Some(METADATA_FILE) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
