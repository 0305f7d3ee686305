//! Project-level initialization behind `agentup init`.
//!
//! The command layer drives the flow; the pieces here do the filesystem
//! work so they stay testable against a scratch project directory.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// Directory agentup keeps its per-project state in.
pub const STATE_DIR: &str = ".agentup";

/// Subdirectory of the template root holding init file replacements.
pub const INIT_TEMPLATES_SUBDIR: &str = "init";

pub const WORKFLOW_SECTION_START: &str = "<!-- agentup-workflow -->";
pub const WORKFLOW_SECTION_END: &str = "<!-- agentup-workflow-end -->";

/// Init template directories and their in-project destinations. Only
/// top-level files are copied; the tools own anything deeper.
pub const INIT_TEMPLATE_MAPPINGS: [(&str, &str); 4] = [
    ("claude-agents", ".claude/agents"),
    ("claude-hooks", ".claude/hooks"),
    ("claude-commands-trellis", ".claude/commands/trellis"),
    ("trellis-scripts", ".trellis/scripts"),
];

#[derive(Debug, Serialize)]
pub struct ProjectTools {
    pub openspec: bool,
    pub trellis: bool,
}

/// Shape of `.agentup/init-state.json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitState {
    pub version: String,
    pub initialized_at: String,
    pub tools: ProjectTools,
}

/// Which workflow tools already left their footprint in the project.
pub fn detect_project_tools(cwd: &Path) -> ProjectTools {
    ProjectTools {
        openspec: cwd.join("openspec").exists() || cwd.join("specs").exists(),
        trellis: cwd.join(".trellis").exists(),
    }
}

/// Record when and with what version the project was initialized.
pub fn write_init_state(cwd: &Path, version: &str) -> Result<()> {
    let state_dir = cwd.join(STATE_DIR);
    std::fs::create_dir_all(&state_dir)
        .with_context(|| format!("Failed to create {}", state_dir.display()))?;

    let state = InitState {
        version: version.to_string(),
        initialized_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        tools: detect_project_tools(cwd),
    };
    let state_file = state_dir.join("init-state.json");
    let json = serde_json::to_string_pretty(&state)?;
    std::fs::write(&state_file, json)
        .with_context(|| format!("Failed to write {}", state_file.display()))?;
    Ok(())
}

/// Outcome of [`upsert_project_doc`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocChange {
    Created,
    SectionAdded,
    AlreadyPresent,
}

fn build_workflow_section(cwd: &Path) -> String {
    let mut parts = vec![
        WORKFLOW_SECTION_START.to_string(),
        String::new(),
        "## Workflow".to_string(),
        String::new(),
    ];
    let tools = detect_project_tools(cwd);
    if tools.openspec {
        parts.push("- OpenSpec specs available in `specs/` or `openspec/`".to_string());
    }
    if tools.trellis {
        parts.push("- Trellis workflow configured in `.trellis/`".to_string());
    }
    parts.push(String::new());
    parts.push(WORKFLOW_SECTION_END.to_string());
    parts.join("\n")
}

fn project_name(cwd: &Path) -> String {
    cwd.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Project".to_string())
}

/// Create the project `CLAUDE.md`, or append the workflow section to an
/// existing one. A present start marker means nothing to do.
pub fn upsert_project_doc(cwd: &Path) -> Result<DocChange> {
    let doc_path = cwd.join("CLAUDE.md");
    if !doc_path.exists() {
        let content = format!(
            "# {}\n\n{}",
            project_name(cwd),
            build_workflow_section(cwd)
        );
        std::fs::write(&doc_path, content)
            .with_context(|| format!("Failed to write {}", doc_path.display()))?;
        return Ok(DocChange::Created);
    }

    let existing = std::fs::read_to_string(&doc_path)
        .with_context(|| format!("Failed to read {}", doc_path.display()))?;
    if existing.contains(WORKFLOW_SECTION_START) {
        return Ok(DocChange::AlreadyPresent);
    }
    let updated = format!("{existing}\n{}", build_workflow_section(cwd));
    std::fs::write(&doc_path, updated)
        .with_context(|| format!("Failed to write {}", doc_path.display()))?;
    Ok(DocChange::SectionAdded)
}

/// Copy the top-level files of each init template mapping into the project.
/// Returns how many files were written.
pub fn deploy_init_templates(init_dir: &Path, cwd: &Path) -> Result<usize> {
    let mut count = 0;
    for (source, target) in INIT_TEMPLATE_MAPPINGS {
        let source_dir = init_dir.join(source);
        if !source_dir.is_dir() {
            continue;
        }
        let target_dir = cwd.join(target);
        std::fs::create_dir_all(&target_dir)
            .with_context(|| format!("Failed to create {}", target_dir.display()))?;

        for entry in std::fs::read_dir(&source_dir)
            .with_context(|| format!("Failed to read {}", source_dir.display()))?
        {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            std::fs::copy(entry.path(), target_dir.join(entry.file_name()))?;
            count += 1;
        }
    }
    Ok(count)
}

/// Append `.agentup/` to an existing `.gitignore` once. Projects without a
/// `.gitignore` are left alone.
pub fn append_gitignore_entry(cwd: &Path) -> Result<bool> {
    let gitignore = cwd.join(".gitignore");
    if !gitignore.exists() {
        return Ok(false);
    }
    let existing = std::fs::read_to_string(&gitignore)
        .with_context(|| format!("Failed to read {}", gitignore.display()))?;
    if existing.contains(&format!("{STATE_DIR}/")) {
        return Ok(false);
    }
    let updated = format!("{}\n{STATE_DIR}/\n", existing.trim_end());
    std::fs::write(&gitignore, updated)
        .with_context(|| format!("Failed to write {}", gitignore.display()))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn state_file_records_version_and_detected_tools() {
        let cwd = TempDir::new().unwrap();
        fs::create_dir(cwd.path().join("specs")).unwrap();

        write_init_state(cwd.path(), "0.1.0").unwrap();

        let raw = fs::read_to_string(cwd.path().join(".agentup/init-state.json")).unwrap();
        let state: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(state["version"], "0.1.0");
        assert_eq!(state["tools"]["openspec"], true);
        assert_eq!(state["tools"]["trellis"], false);
        let stamp = state["initializedAt"].as_str().unwrap();
        assert!(stamp.ends_with('Z'), "expected a UTC timestamp, got {stamp}");
    }

    #[test]
    fn doc_is_created_with_project_heading_and_markers() {
        let cwd = TempDir::new().unwrap();
        fs::create_dir(cwd.path().join(".trellis")).unwrap();

        assert_eq!(upsert_project_doc(cwd.path()).unwrap(), DocChange::Created);

        let doc = fs::read_to_string(cwd.path().join("CLAUDE.md")).unwrap();
        let name = cwd.path().file_name().unwrap().to_string_lossy();
        assert!(doc.starts_with(&format!("# {name}")));
        assert!(doc.contains(WORKFLOW_SECTION_START));
        assert!(doc.contains(WORKFLOW_SECTION_END));
        assert!(doc.contains("Trellis workflow configured"));
        assert!(!doc.contains("OpenSpec specs available"));
    }

    #[test]
    fn doc_section_is_appended_exactly_once() {
        let cwd = TempDir::new().unwrap();
        fs::write(cwd.path().join("CLAUDE.md"), "# My Project\n\nhouse rules\n").unwrap();

        assert_eq!(
            upsert_project_doc(cwd.path()).unwrap(),
            DocChange::SectionAdded
        );
        let after_first = fs::read_to_string(cwd.path().join("CLAUDE.md")).unwrap();
        assert!(after_first.starts_with("# My Project"));
        assert!(after_first.contains("house rules"));
        assert!(after_first.contains(WORKFLOW_SECTION_START));

        assert_eq!(
            upsert_project_doc(cwd.path()).unwrap(),
            DocChange::AlreadyPresent
        );
        let after_second = fs::read_to_string(cwd.path().join("CLAUDE.md")).unwrap();
        assert_eq!(after_first, after_second);
    }

    #[test]
    fn init_templates_copy_top_level_files_only() {
        let templates = TempDir::new().unwrap();
        let cwd = TempDir::new().unwrap();
        let agents = templates.path().join("claude-agents");
        fs::create_dir_all(agents.join("nested")).unwrap();
        fs::write(agents.join("reviewer.md"), "reviewer\n").unwrap();
        fs::write(agents.join("nested/deep.md"), "deep\n").unwrap();
        let scripts = templates.path().join("trellis-scripts");
        fs::create_dir_all(&scripts).unwrap();
        fs::write(scripts.join("check.sh"), "#!/bin/sh\n").unwrap();

        let count = deploy_init_templates(templates.path(), cwd.path()).unwrap();

        assert_eq!(count, 2);
        assert!(cwd.path().join(".claude/agents/reviewer.md").exists());
        assert!(!cwd.path().join(".claude/agents/nested/deep.md").exists());
        assert!(cwd.path().join(".trellis/scripts/check.sh").exists());
    }

    #[test]
    fn missing_init_template_dirs_deploy_nothing() {
        let templates = TempDir::new().unwrap();
        let cwd = TempDir::new().unwrap();
        assert_eq!(
            deploy_init_templates(templates.path(), cwd.path()).unwrap(),
            0
        );
    }

    #[test]
    fn gitignore_entry_is_appended_once() {
        let cwd = TempDir::new().unwrap();
        assert!(!append_gitignore_entry(cwd.path()).unwrap());

        fs::write(cwd.path().join(".gitignore"), "node_modules\n").unwrap();
        assert!(append_gitignore_entry(cwd.path()).unwrap());
        assert_eq!(
            fs::read_to_string(cwd.path().join(".gitignore")).unwrap(),
            "node_modules\n.agentup/\n"
        );

        assert!(!append_gitignore_entry(cwd.path()).unwrap());
        assert_eq!(
            fs::read_to_string(cwd.path().join(".gitignore")).unwrap(),
            "node_modules\n.agentup/\n"
        );
    }
}
