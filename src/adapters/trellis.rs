//! Trellis: AI workflow scaffolding, installed globally via npm.

use std::path::Path;

use anyhow::Result;

use super::{AdapterMeta, InstallMethod, ToolAdapter, ToolStatus};
use crate::shell;

const PACKAGE: &str = "@mindfoldhq/trellis";
const BIN: &str = "trellis";

pub struct TrellisAdapter {
    meta: AdapterMeta,
}

impl TrellisAdapter {
    pub fn new() -> Self {
        Self {
            meta: AdapterMeta {
                name: "trellis",
                display_name: "Trellis",
                description: "AI workflow structure for Claude Code and Cursor",
                install_method: InstallMethod::NpmGlobal,
                required: false,
                order: 2,
                interactive: false,
                pinned_version: Some("0.2.15"),
            },
        }
    }
}

impl Default for TrellisAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolAdapter for TrellisAdapter {
    fn meta(&self) -> &AdapterMeta {
        &self.meta
    }

    fn check(&self) -> Result<ToolStatus> {
        Ok(super::npm_tool_status(BIN, PACKAGE))
    }

    fn install(&self, version: Option<&str>) -> Result<()> {
        let spec = super::npm_package_spec(PACKAGE, version);
        shell::run_inherit("npm", &["install", "-g", &spec])
    }

    fn update(&self, version: Option<&str>) -> Result<()> {
        match version {
            // A pinned update is just an install at that version.
            Some(_) => self.install(version),
            None => shell::run_inherit("npm", &["update", "-g", PACKAGE]),
        }
    }

    fn uninstall(&self) -> Result<()> {
        shell::run_inherit("npm", &["uninstall", "-g", PACKAGE])
    }

    fn supports_project_init(&self) -> bool {
        true
    }

    fn init_project(&self, cwd: &Path) -> Result<()> {
        shell::run_inherit_in(cwd, BIN, &["init"])
    }
}
