//! agentup - AI workflow tool installer
//!
//! Installs and updates a curated set of AI-assistant CLI tools, then deploys
//! their configuration files into the user's home and project directories.
//! Adapters wrap each managed tool behind a uniform capability set, and the
//! deploy engine merges bundled templates with three strategies: full replace
//! with backup, idempotent append, and marker-delimited section merge.

pub mod adapters;
pub mod configs;
pub mod deploy;
pub mod init;
pub mod platform;
pub mod runner;
pub mod shell;
pub mod templates;
pub mod ui;

pub use adapters::{AdapterMeta, InstallMethod, ToolAdapter, ToolStatus};
pub use configs::{ConfigTarget, DeployRule, MergeStrategy, SectionMarker};
pub use deploy::{DeployError, TargetReport, deploy_configs};
pub use runner::{Action, AdapterAction};
