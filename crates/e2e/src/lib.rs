//! Shared helpers for end-to-end tests

use std::path::PathBuf;
use std::process::Command;

/// Check whether a binary is reachable on PATH.
pub fn in_path(bin: &str) -> bool {
    Command::new("sh")
        .arg("-lc")
        .arg(format!("command -v {bin} >/dev/null 2>&1"))
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Workspace root, derived from this crate's manifest directory.
pub fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .expect("crates/e2e sits two levels below the workspace root")
        .to_path_buf()
}
