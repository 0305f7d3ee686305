//! OpenSpec: spec-driven development CLI, installed globally via npm.

use std::path::Path;

use anyhow::Result;

use super::{AdapterMeta, InstallMethod, ToolAdapter, ToolStatus};
use crate::shell;

const PACKAGE: &str = "@fission-ai/openspec";
const BIN: &str = "openspec";

pub struct OpenSpecAdapter {
    meta: AdapterMeta,
}

impl OpenSpecAdapter {
    pub fn new() -> Self {
        Self {
            meta: AdapterMeta {
                name: "openspec",
                display_name: "OpenSpec",
                description: "AI-native spec-driven development",
                install_method: InstallMethod::NpmGlobal,
                required: false,
                order: 1,
                interactive: false,
                pinned_version: Some("1.1.1"),
            },
        }
    }
}

impl Default for OpenSpecAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolAdapter for OpenSpecAdapter {
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
