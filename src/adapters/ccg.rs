//! CCG Workflow: launched through npx, detected via its config file.
//!
//! The installer is interactive and writes `~/.claude/.ccg/config.toml` when
//! it finishes; that file is the only reliable install signal, so the probe
//! reports "detected" instead of a version number.

use std::path::PathBuf;

use anyhow::{Context, Result};

use super::{AdapterMeta, InstallMethod, ToolAdapter, ToolStatus};
use crate::shell;

const PACKAGE: &str = "ccg-workflow";

pub struct CcgAdapter {
    meta: AdapterMeta,
    ccg_dir: PathBuf,
}

impl CcgAdapter {
    pub fn new(home: PathBuf) -> Self {
        Self {
            meta: AdapterMeta {
                name: "ccg",
                display_name: "CCG Workflow",
                description: "Claude Code enhanced multi-model workflow",
                install_method: InstallMethod::Npx,
                required: false,
                order: 4,
                interactive: true,
                pinned_version: Some("1.7.61"),
            },
            ccg_dir: home.join(".claude/.ccg"),
        }
    }

    fn config_path(&self) -> PathBuf {
        self.ccg_dir.join("config.toml")
    }
}

impl ToolAdapter for CcgAdapter {
    fn meta(&self) -> &AdapterMeta {
        &self.meta
    }

    fn check(&self) -> Result<ToolStatus> {
        if !self.config_path().exists() {
            return Ok(ToolStatus::missing());
        }
        Ok(ToolStatus {
            installed: true,
            version: Some("detected".to_string()),
            ..Default::default()
        })
    }

    fn install(&self, version: Option<&str>) -> Result<()> {
        let spec = format!("{PACKAGE}@{}", version.unwrap_or("latest"));
        shell::run_inherit("npx", &[&spec])
    }

    fn update(&self, version: Option<&str>) -> Result<()> {
        self.install(version)
    }

    /// ccg ships no uninstall command; removing its directory is the
    /// documented way to get rid of it.
    fn uninstall(&self) -> Result<()> {
        if self.ccg_dir.exists() {
            std::fs::remove_dir_all(&self.ccg_dir)
                .with_context(|| format!("Failed to remove {}", self.ccg_dir.display()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn check_reports_missing_without_config_file() {
        let home = TempDir::new().unwrap();
        let adapter = CcgAdapter::new(home.path().to_path_buf());
        let status = adapter.check().unwrap();
        assert!(!status.installed);
        assert!(status.version.is_none());
    }

    #[test]
    fn check_reports_detected_when_config_exists() {
        let home = TempDir::new().unwrap();
        let config_dir = home.path().join(".claude/.ccg");
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(config_dir.join("config.toml"), "model = \"opus\"\n").unwrap();

        let adapter = CcgAdapter::new(home.path().to_path_buf());
        let status = adapter.check().unwrap();
        assert!(status.installed);
        assert_eq!(status.version.as_deref(), Some("detected"));
        assert!(!status.update_available);
    }

    #[test]
    fn uninstall_removes_the_ccg_directory() {
        let home = TempDir::new().unwrap();
        let config_dir = home.path().join(".claude/.ccg");
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(config_dir.join("config.toml"), "").unwrap();

        let adapter = CcgAdapter::new(home.path().to_path_buf());
        adapter.uninstall().unwrap();
        assert!(!config_dir.exists());
        assert!(home.path().join(".claude").exists());

        // Second uninstall has nothing to remove.
        adapter.uninstall().unwrap();
    }
}
