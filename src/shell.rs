//! Child process helpers shared by the tool adapters.
//!
//! Two modes of execution: [`run`] captures output for probing (version
//! checks, registry lookups), [`run_inherit`] streams the child's stdio to
//! the terminal for installs the user should watch.

use std::path::Path;
use std::process::{Command, Output, Stdio};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;

/// Captured outcome of a finished child process.
#[derive(Debug, Clone)]
pub struct ExecResult {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Run a command and capture its output, failing on a non-zero exit.
pub fn run(program: &str, args: &[&str]) -> Result<ExecResult> {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .with_context(|| format!("Failed to run {program}"))?;
    let result = ExecResult::from(output);
    if !result.success {
        anyhow::bail!(
            "{program} {} failed: {}",
            args.join(" "),
            result.stderr.trim()
        );
    }
    Ok(result)
}

/// Run a command with inherited stdio so the user sees live output.
pub fn run_inherit(program: &str, args: &[&str]) -> Result<()> {
    let status = Command::new(program)
        .args(args)
        .status()
        .with_context(|| format!("Failed to run {program}"))?;
    if !status.success() {
        anyhow::bail!("{program} {} exited with {status}", args.join(" "));
    }
    Ok(())
}

/// Like [`run_inherit`], but executed from `dir`.
pub fn run_inherit_in(dir: &Path, program: &str, args: &[&str]) -> Result<()> {
    let status = Command::new(program)
        .args(args)
        .current_dir(dir)
        .status()
        .with_context(|| format!("Failed to run {program} in {}", dir.display()))?;
    if !status.success() {
        anyhow::bail!("{program} {} exited with {status}", args.join(" "));
    }
    Ok(())
}

/// Check whether `program` resolves to an executable on `PATH`.
pub fn command_exists(program: &str) -> bool {
    let Some(paths) = std::env::var_os("PATH") else {
        return false;
    };
    std::env::split_paths(&paths).any(|dir| is_executable(&dir.join(program)))
}

fn is_executable(path: &Path) -> bool {
    let Ok(metadata) = std::fs::metadata(path) else {
        return false;
    };
    if !metadata.is_file() {
        return false;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o111 != 0
    }
    #[cfg(not(unix))]
    {
        true
    }
}

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"v?(\d+\.\d+\.\d+)").unwrap());

/// Run `program args` and pull the first semver-looking version out of its
/// stdout. Returns `None` when the command is missing or prints no version.
pub fn version_from_command(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    extract_version(&String::from_utf8_lossy(&output.stdout))
}

/// Extract the first `x.y.z` triple from arbitrary command output.
pub fn extract_version(text: &str) -> Option<String> {
    VERSION_RE.captures(text).map(|caps| caps[1].to_string())
}
