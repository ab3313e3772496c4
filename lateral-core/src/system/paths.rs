use std::path::PathBuf;
use std::sync::OnceLock;

// Cache the paths to avoid repeated environment lookups
static LATERAL_HOME: OnceLock<PathBuf> = OnceLock::new();
static LATERAL_TOOLS_DIR: OnceLock<PathBuf> = OnceLock::new();
static LATERAL_WORKSPACE_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Generate a UTC timestamp for report headers and job names
/// Returns format: YYYYMMDD_HHMMSS (in UTC timezone)
pub fn generate_utc_timestamp() -> String {
    chrono::Utc::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Get the Lateral home directory
/// Checks LATERAL_HOME environment variable, falls back to ${HOME}/.lateral
pub fn lateral_home() -> PathBuf {
    LATERAL_HOME
        .get_or_init(|| {
            if let Ok(path) = std::env::var("LATERAL_HOME") {
                PathBuf::from(path)
            } else {
                let home = std::env::var("HOME").unwrap_or_else(|_| {
                    std::env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string())
                });
                PathBuf::from(home).join(".lateral")
            }
        })
        .clone()
}

/// Get the tool installation root
/// Checks LATERAL_TOOLS_DIR environment variable, falls back to LATERAL_HOME/tools
pub fn lateral_tools_dir() -> PathBuf {
    LATERAL_TOOLS_DIR
        .get_or_init(|| {
            if let Ok(path) = std::env::var("LATERAL_TOOLS_DIR") {
                PathBuf::from(path)
            } else {
                lateral_home().join("tools")
            }
        })
        .clone()
}

/// Get the default workspace directory for scratch files
/// Checks LATERAL_WORKSPACE_DIR, falls back to $TMPDIR/lateral or /tmp/lateral
pub fn lateral_workspace_dir() -> PathBuf {
    LATERAL_WORKSPACE_DIR
        .get_or_init(|| {
            if let Ok(path) = std::env::var("LATERAL_WORKSPACE_DIR") {
                PathBuf::from(path)
            } else if let Ok(tmpdir) = std::env::var("TMPDIR") {
                PathBuf::from(tmpdir).join("lateral")
            } else {
                PathBuf::from("/tmp/lateral")
            }
        })
        .clone()
}
