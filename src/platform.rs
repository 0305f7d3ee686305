//! Environment probing: home directory resolution, `~` expansion and CI
//! detection.

use std::path::{Path, PathBuf};

/// Overrides the detected home directory when set.
///
/// Everything the tool writes under `~` goes through [`home_dir`], so
/// pointing this at a scratch directory sandboxes a whole run.
pub const HOME_ENV: &str = "AGENTUP_HOME";

/// Forces non-interactive mode when set to `true`.
pub const CI_ENV: &str = "AGENTUP_CI";

/// Resolve the directory that `~` refers to.
pub fn home_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(HOME_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Expand a leading `~` in `path` against `home`.
///
/// Paths without a tilde prefix pass through untouched.
pub fn expand_home(path: &str, home: &Path) -> PathBuf {
    if path == "~" {
        return home.to_path_buf();
    }
    if let Some(rest) = path.strip_prefix("~/") {
        return home.join(rest);
    }
    PathBuf::from(path)
}

/// Whether this run should skip prompts and take defaults.
pub fn is_ci() -> bool {
    ci_from_env(
        std::env::var(CI_ENV).ok().as_deref(),
        std::env::var("CI").ok().as_deref(),
    )
}

fn ci_from_env(agentup_ci: Option<&str>, ci: Option<&str>) -> bool {
    agentup_ci == Some("true") || ci == Some("true")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_home_replaces_tilde_prefix() {
        let home = Path::new("/home/dev");
        assert_eq!(
            expand_home("~/.claude/CLAUDE.md", home),
            PathBuf::from("/home/dev/.claude/CLAUDE.md")
        );
    }

    #[test]
    fn expand_home_handles_bare_tilde() {
        let home = Path::new("/home/dev");
        assert_eq!(expand_home("~", home), PathBuf::from("/home/dev"));
    }

    #[test]
    fn expand_home_leaves_other_paths_alone() {
        let home = Path::new("/home/dev");
        assert_eq!(expand_home("/etc/hosts", home), PathBuf::from("/etc/hosts"));
        assert_eq!(expand_home("relative/file", home), PathBuf::from("relative/file"));
    }

    #[test]
    fn ci_detection_requires_explicit_true() {
        assert!(ci_from_env(Some("true"), None));
        assert!(ci_from_env(None, Some("true")));
        assert!(!ci_from_env(Some("1"), None));
        assert!(!ci_from_env(None, Some("false")));
        assert!(!ci_from_env(None, None));
    }
}
