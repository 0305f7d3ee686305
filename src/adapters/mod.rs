//! Tool adapters: one per managed AI workflow tool.
//!
//! Every adapter exposes the same capability set behind [`ToolAdapter`], so
//! the runner and the CLI never special-case individual tools. Registration
//! is static in [`all_adapters`]; priority comes from [`AdapterMeta::order`].

pub mod ccb;
pub mod ccg;
pub mod openspec;
pub mod trellis;

use std::path::Path;

use anyhow::Result;
use semver::Version;

use crate::platform;
use crate::shell;

/// How a tool gets onto the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallMethod {
    NpmGlobal,
    Npx,
    GitCloneScript,
}

/// Static facts about a managed tool.
#[derive(Debug, Clone)]
pub struct AdapterMeta {
    pub name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub install_method: InstallMethod,
    pub required: bool,
    /// Position in the setup sequence; lower runs first.
    pub order: u32,
    /// Interactive tools take over the terminal during install.
    pub interactive: bool,
    /// Version the workflow was tested against, when one is pinned.
    pub pinned_version: Option<&'static str>,
}

/// What a probe learned about an installed tool.
#[derive(Debug, Clone, Default)]
pub struct ToolStatus {
    pub installed: bool,
    pub version: Option<String>,
    pub latest_version: Option<String>,
    pub update_available: bool,
}

impl ToolStatus {
    pub fn missing() -> Self {
        Self::default()
    }
}

/// Uniform capability set for one managed tool.
pub trait ToolAdapter {
    fn meta(&self) -> &AdapterMeta;

    /// Probe the machine for the tool and any available update.
    fn check(&self) -> Result<ToolStatus>;

    /// Install the tool, optionally at a specific version.
    fn install(&self, version: Option<&str>) -> Result<()>;

    /// Update the tool, optionally to a specific version.
    fn update(&self, version: Option<&str>) -> Result<()>;

    fn uninstall(&self) -> Result<()>;

    /// Whether the tool has a per-project init step.
    fn supports_project_init(&self) -> bool {
        false
    }

    /// Run the tool's project init in `cwd`.
    fn init_project(&self, _cwd: &Path) -> Result<()> {
        Ok(())
    }
}

/// Every registered adapter, sorted by priority.
pub fn all_adapters() -> Vec<Box<dyn ToolAdapter>> {
    let home = platform::home_dir();
    let mut adapters: Vec<Box<dyn ToolAdapter>> = vec![
        Box::new(openspec::OpenSpecAdapter::new()),
        Box::new(trellis::TrellisAdapter::new()),
        Box::new(ccb::CcbAdapter::new(home.clone())),
        Box::new(ccg::CcgAdapter::new(home)),
    ];
    adapters.sort_by_key(|adapter| adapter.meta().order);
    adapters
}

// ==== Shared npm helpers ====

pub(crate) fn npm_package_spec(package: &str, version: Option<&str>) -> String {
    match version {
        Some(version) => format!("{package}@{version}"),
        None => package.to_string(),
    }
}

/// Latest published version of an npm package, or `None` when the registry
/// is unreachable or npm is missing.
pub(crate) fn latest_npm_version(package: &str) -> Option<String> {
    shell::run("npm", &["info", package, "version"])
        .ok()
        .map(|result| result.stdout.trim().to_string())
        .filter(|version| !version.is_empty())
}

/// Whether `latest` is an upgrade over `current`. Falls back to plain
/// inequality when either side is not a semver triple.
pub(crate) fn update_available(current: Option<&str>, latest: Option<&str>) -> bool {
    let (Some(current), Some(latest)) = (current, latest) else {
        return false;
    };
    match (Version::parse(current), Version::parse(latest)) {
        (Ok(current), Ok(latest)) => current < latest,
        _ => current != latest,
    }
}

/// Status probe shared by the npm-global tools.
pub(crate) fn npm_tool_status(bin: &str, package: &str) -> ToolStatus {
    if !shell::command_exists(bin) {
        return ToolStatus::missing();
    }
    let version = shell::version_from_command(bin, &["--version"]);
    let latest_version = latest_npm_version(package);
    let update_available = update_available(version.as_deref(), latest_version.as_deref());
    ToolStatus {
        installed: true,
        version,
        latest_version,
        update_available,
    }
}
