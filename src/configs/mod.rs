//! Declarative config deployment rules.
//!
//! Each [`ConfigTarget`] names a tool's config destination and carries an
//! ordered list of [`DeployRule`]s. The deploy engine interprets the rules;
//! the definitions here stay purely declarative.

pub mod claude;

use std::path::Path;

use crate::platform;

/// How a source template is merged into its target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStrategy {
    /// Back up the existing target, then copy the source over it.
    Replace,
    /// Append the source once; later deploys of identical content are no-ops.
    Append,
    /// Replace the region between the section markers, appending when the
    /// markers are missing.
    MergeSection,
}

/// Literal sentinel strings delimiting a replaceable region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionMarker {
    pub start: &'static str,
    pub end: &'static str,
}

/// One source template mapped onto one target path.
#[derive(Debug, Clone)]
pub struct DeployRule {
    /// Path relative to `templates/<target-name>/`.
    pub source: String,
    /// Destination path; a leading `~` expands to the home directory.
    pub target: String,
    pub strategy: MergeStrategy,
    /// Required for [`MergeStrategy::MergeSection`], absent otherwise.
    pub section_marker: Option<SectionMarker>,
}

/// A named destination with ordered deployment rules.
#[derive(Debug, Clone)]
pub struct ConfigTarget {
    /// Unique id, doubling as the template subdirectory name.
    pub name: &'static str,
    pub display_name: &'static str,
    /// `~`-style path of the owning tool's config directory.
    pub config_dir: &'static str,
    /// Applied in declaration order.
    pub rules: Vec<DeployRule>,
}

impl ConfigTarget {
    /// Whether the owning tool appears to be present on this machine.
    pub fn detected(&self, home: &Path) -> bool {
        platform::expand_home(self.config_dir, home).exists()
    }
}

/// All shipped config targets, in deployment order.
pub fn all_config_targets() -> Vec<ConfigTarget> {
    vec![claude::target()]
}

/// Subset of targets matching `names`, preserving registry order.
pub fn config_targets_by_names(names: &[String]) -> Vec<ConfigTarget> {
    all_config_targets()
        .into_iter()
        .filter(|target| names.iter().any(|name| name == target.name))
        .collect()
}
