//! Locating the bundled `templates/` directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Name of the directory holding bundled config templates.
pub const TEMPLATES_DIR_NAME: &str = "templates";

/// Number of candidate directories examined while walking up.
const MAX_SEARCH_HOPS: usize = 5;

/// Find the bundled templates directory relative to the running binary.
///
/// Walks up from the executable's directory, which covers both an installed
/// layout (`bin/agentup` next to `templates/`) and a development build under
/// `target/debug/`.
pub fn bundled_templates_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to locate the running executable")?;
    let start = exe
        .parent()
        .context("Executable has no parent directory")?;
    find_templates_dir(start).with_context(|| {
        format!(
            "No {TEMPLATES_DIR_NAME} directory found near {}",
            start.display()
        )
    })
}

fn find_templates_dir(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    for _ in 0..MAX_SEARCH_HOPS {
        let candidate = dir.join(TEMPLATES_DIR_NAME);
        if candidate.is_dir() {
            return Some(candidate);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}
