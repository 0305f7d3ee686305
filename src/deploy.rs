//! The config deployment engine.
//!
//! Applies each target's ordered rules against a resolved template root.
//! File rules dispatch on their merge strategy; a directory source is
//! mirrored wholesale regardless of strategy. Failures are contained at
//! target granularity so one broken target never blocks the rest.

use std::path::{Path, PathBuf};

use chrono::Utc;
use walkdir::WalkDir;

use crate::configs::{ConfigTarget, DeployRule, MergeStrategy, SectionMarker};
use crate::platform;
use crate::ui;

/// What can go wrong while deploying one target.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// A rule declared `MergeSection` without its marker pair. This is a
    /// configuration mistake, not a filesystem condition.
    #[error("merge-section requires a section marker for {rule_source}")]
    MissingSectionMarker { rule_source: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Outcome of deploying one config target.
#[derive(Debug, Clone)]
pub struct TargetReport {
    pub name: &'static str,
    pub display_name: &'static str,
    /// Files written, including those copied by directory rules. Rules whose
    /// source was absent contribute nothing.
    pub deployed: usize,
    pub error: Option<String>,
}

impl TargetReport {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Deploy every rule of every target, one target at a time.
///
/// `templates_dir` and `home` are resolved by the caller and injected; the
/// engine touches no ambient state beyond the filesystem paths it is given.
/// A failing target is recorded in its report and deployment moves on.
pub fn deploy_configs(
    templates_dir: &Path,
    home: &Path,
    targets: &[ConfigTarget],
) -> Vec<TargetReport> {
    targets
        .iter()
        .map(|target| {
            let mut deployed = 0;
            let error = match apply_rules(templates_dir, home, target, &mut deployed) {
                Ok(()) => None,
                Err(err) => {
                    tracing::error!(target = %target.name, error = %err, "Config deployment failed");
                    Some(err.to_string())
                }
            };
            TargetReport {
                name: target.name,
                display_name: target.display_name,
                deployed,
                error,
            }
        })
        .collect()
}

fn apply_rules(
    templates_dir: &Path,
    home: &Path,
    target: &ConfigTarget,
    deployed: &mut usize,
) -> Result<(), DeployError> {
    for rule in &target.rules {
        let source_path = templates_dir.join(target.name).join(&rule.source);

        // Absent sources are fine: template bundles may ship a subset.
        if !source_path.exists() {
            continue;
        }

        let target_path = platform::expand_home(&rule.target, home);
        if let Some(parent) = target_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        if source_path.is_dir() {
            *deployed += deploy_directory(&source_path, &target_path)?;
        } else {
            deploy_file(&source_path, &target_path, rule)?;
            *deployed += 1;
        }
    }
    Ok(())
}

fn deploy_file(source: &Path, target: &Path, rule: &DeployRule) -> Result<(), DeployError> {
    match rule.strategy {
        MergeStrategy::Replace => replace_file(source, target),
        MergeStrategy::Append => append_file(source, target),
        MergeStrategy::MergeSection => {
            let marker = rule
                .section_marker
                .ok_or_else(|| DeployError::MissingSectionMarker {
                    rule_source: rule.source.clone(),
                })?;
            merge_section(source, target, &marker)
        }
    }
}

/// Full-file replace. The previous target survives as a timestamped sibling.
fn replace_file(source: &Path, target: &Path) -> Result<(), DeployError> {
    if target.exists() {
        std::fs::rename(target, backup_path(target))?;
    }
    std::fs::copy(source, target)?;
    Ok(())
}

fn backup_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_os_string();
    name.push(format!(".bak.{}", Utc::now().timestamp_millis()));
    PathBuf::from(name)
}

/// Append once. A target that already contains the trimmed source is left
/// untouched, so repeated deploys are no-ops.
fn append_file(source: &Path, target: &Path) -> Result<(), DeployError> {
    let content = std::fs::read_to_string(source)?;
    if !target.exists() {
        std::fs::write(target, &content)?;
        return Ok(());
    }
    let existing = std::fs::read_to_string(target)?;
    if existing.contains(content.trim()) {
        return Ok(());
    }
    std::fs::write(target, format!("{existing}\n{content}"))?;
    Ok(())
}

/// Swap out the marker-delimited region for the source content. The source
/// carries its own marker lines, so the markers survive for the next deploy.
/// When either marker is missing the source is appended instead; that path
/// has no duplicate guard, unlike [`append_file`].
fn merge_section(
    source: &Path,
    target: &Path,
    marker: &SectionMarker,
) -> Result<(), DeployError> {
    let section = std::fs::read_to_string(source)?;
    if !target.exists() {
        std::fs::write(target, &section)?;
        return Ok(());
    }

    let existing = std::fs::read_to_string(target)?;
    let start_idx = existing.find(marker.start);
    let end_idx = existing.find(marker.end);

    match (start_idx, end_idx) {
        (Some(start), Some(end)) => {
            let before = &existing[..start];
            let after = &existing[end + marker.end.len()..];
            std::fs::write(target, format!("{before}{section}{after}"))?;
        }
        _ => {
            let shown = target
                .file_name()
                .map_or_else(|| target.display().to_string(), |n| n.to_string_lossy().into_owned());
            ui::warn(&format!(
                "Section markers not found in {shown}, appending instead"
            ));
            tracing::warn!(target = %target.display(), "Section markers missing, appended to end");
            std::fs::write(target, format!("{existing}\n{section}"))?;
        }
    }
    Ok(())
}

/// Mirror a template directory into the target, overwriting leaves in place.
/// No backups here; directory rules are treated as wholly owned by agentup.
fn deploy_directory(source: &Path, target: &Path) -> Result<usize, DeployError> {
    std::fs::create_dir_all(target)?;
    let mut count = 0;
    for entry in WalkDir::new(source).min_depth(1) {
        let entry = entry.map_err(std::io::Error::from)?;
        let Ok(relative) = entry.path().strip_prefix(source) else {
            continue;
        };
        let destination = target.join(relative);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&destination)?;
        } else {
            std::fs::copy(entry.path(), &destination)?;
            count += 1;
        }
    }
    Ok(count)
}
