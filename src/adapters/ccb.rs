//! Claude Code Bridge: cloned from git and managed by its install script.

use std::path::PathBuf;

use anyhow::Result;

use super::{AdapterMeta, InstallMethod, ToolAdapter, ToolStatus};
use crate::shell;

const REPO_URL: &str = "https://github.com/bfly123/claude_code_bridge.git";
const BIN: &str = "ccb";

pub struct CcbAdapter {
    meta: AdapterMeta,
    clone_dir: PathBuf,
}

impl CcbAdapter {
    pub fn new(home: PathBuf) -> Self {
        Self {
            meta: AdapterMeta {
                name: "ccb",
                display_name: "Claude Code Bridge (CCB)",
                description: "Multi-model collaboration via split-pane terminal",
                install_method: InstallMethod::GitCloneScript,
                required: false,
                order: 3,
                interactive: false,
                pinned_version: None,
            },
            clone_dir: home.join(".local/share/claude_code_bridge"),
        }
    }

    pub fn clone_dir(&self) -> &PathBuf {
        &self.clone_dir
    }

    fn clone_repo(&self) -> Result<()> {
        let dir = self.clone_dir.to_string_lossy();
        shell::run_inherit("git", &["clone", REPO_URL, &dir])
    }

    fn run_install_script(&self, action: &str) -> Result<()> {
        shell::run_inherit_in(&self.clone_dir, "bash", &["./install.sh", action])
    }
}

impl ToolAdapter for CcbAdapter {
    fn meta(&self) -> &AdapterMeta {
        &self.meta
    }

    fn check(&self) -> Result<ToolStatus> {
        if !shell::command_exists(BIN) {
            return Ok(ToolStatus::missing());
        }
        // No registry to ask for a newer version; installed is all we know.
        Ok(ToolStatus {
            installed: true,
            version: shell::version_from_command(BIN, &["--version"]),
            ..Default::default()
        })
    }

    fn install(&self, _version: Option<&str>) -> Result<()> {
        if !self.clone_dir.exists() {
            self.clone_repo()?;
        }
        self.run_install_script("install")
    }

    fn update(&self, _version: Option<&str>) -> Result<()> {
        if self.clone_dir.exists() {
            let dir = self.clone_dir.to_string_lossy();
            shell::run_inherit("git", &["-C", &dir, "pull"])?;
        } else {
            self.clone_repo()?;
        }
        self.run_install_script("install")
    }

    fn uninstall(&self) -> Result<()> {
        if self.clone_dir.exists() {
            self.run_install_script("uninstall")?;
        }
        Ok(())
    }
}
