//! Resolved run parameters shared by every per-tool driver.
//!
//! Parameters arrive from the CLI as optional paths. `resolved()` rewrites
//! every supplied path to absolute, symlink-resolved form; an absent
//! parameter stays `None` and only fails when a `require_*` accessor
//! dereferences it. Path resolution failures are kept non-fatal here and
//! surface at the point of use instead.

use crate::error::{LateralError, LateralResult};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct RunParams {
    pub gene_trees_dir: Option<PathBuf>,
    pub species_tree: Option<PathBuf>,
    pub msa_dir: Option<PathBuf>,
    pub work_dir: Option<PathBuf>,
    pub tools_dir: Option<PathBuf>,
    pub verbose: bool,
}

/// Rewrite a path to absolute, symlink-resolved form.
/// Unresolvable paths are returned as given; consumers report the failure.
pub fn absolutize(path: &Path) -> PathBuf {
    if let Ok(resolved) = path.canonicalize() {
        return resolved;
    }
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}

impl RunParams {
    /// Normalize all supplied paths; absent parameters stay absent.
    pub fn resolved(mut self) -> Self {
        for field in [
            &mut self.gene_trees_dir,
            &mut self.species_tree,
            &mut self.msa_dir,
            &mut self.work_dir,
            &mut self.tools_dir,
        ] {
            if let Some(path) = field {
                *path = absolutize(path);
            }
        }
        self
    }

    fn require<'a>(field: &'a Option<PathBuf>, flag: &str) -> LateralResult<&'a Path> {
        let path = field
            .as_deref()
            .ok_or_else(|| LateralError::NotFound(format!("parameter --{flag} not set")))?;
        if !path.exists() {
            return Err(LateralError::NotFound(format!(
                "no such path for --{flag}: {}",
                path.display()
            )));
        }
        Ok(path)
    }

    pub fn require_gene_trees_dir(&self) -> LateralResult<&Path> {
        Self::require(&self.gene_trees_dir, "gene-trees-dir")
    }

    pub fn require_species_tree(&self) -> LateralResult<&Path> {
        Self::require(&self.species_tree, "species-tree")
    }

    pub fn require_msa_dir(&self) -> LateralResult<&Path> {
        Self::require(&self.msa_dir, "msa-dir")
    }

    /// The working directory may not exist yet; the driver creates it.
    pub fn require_work_dir(&self) -> LateralResult<&Path> {
        self.work_dir
            .as_deref()
            .ok_or_else(|| LateralError::NotFound("parameter --work-dir not set".to_string()))
    }

    pub fn tools_dir(&self) -> Option<&Path> {
        self.tools_dir.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_parameter_is_inert_until_dereferenced() {
        let params = RunParams::default().resolved();
        // building the set succeeds with every parameter absent
        assert!(params.gene_trees_dir.is_none());

        // dereferencing is what fails, with a clear message
        let err = params.require_gene_trees_dir().unwrap_err();
        assert!(format!("{err}").contains("--gene-trees-dir"));
    }

    #[test]
    fn test_missing_path_reports_no_such_path() {
        let params = RunParams {
            species_tree: Some(PathBuf::from("/nonexistent/species.nwk")),
            ..Default::default()
        }
        .resolved();

        let err = params.require_species_tree().unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("no such path"));
        assert!(msg.contains("/nonexistent/species.nwk"));
    }

    #[test]
    fn test_relative_path_becomes_absolute() {
        let params = RunParams {
            work_dir: Some(PathBuf::from("some/relative/dir")),
            ..Default::default()
        }
        .resolved();

        assert!(params.work_dir.as_ref().unwrap().is_absolute());
    }

    #[test]
    fn test_existing_path_resolves_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        let params = RunParams {
            gene_trees_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        }
        .resolved();

        let resolved = params.require_gene_trees_dir().unwrap();
        assert_eq!(resolved, dir.path().canonicalize().unwrap());
    }
}
