//! `agentup init`: initialize the current project.
//!
//! Runs the project-init step of every tool that has one, then seeds the
//! agentup state directory, the project `CLAUDE.md` and the init template
//! files.

use std::path::Path;

use anyhow::{Context, Result};

use agentup::{adapters, init, shell, templates, ui};

pub fn run() -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to resolve the current directory")?;

    ui::title("agentup init");

    if !cwd.join(".git").exists() {
        anyhow::bail!("Current directory is not a git repository. Run \"git init\" first.");
    }

    run_tool_inits(&cwd);
    own_init(&cwd)?;

    println!();
    ui::title("Init Complete");
    ui::success(&format!("Project initialized at {}", cwd.display()));
    Ok(())
}

/// Tool init failures are reported but never abort agentup's own init.
fn run_tool_inits(cwd: &Path) {
    for adapter in adapters::all_adapters() {
        if !adapter.supports_project_init() {
            continue;
        }
        let meta = adapter.meta();
        if !shell::command_exists(meta.name) {
            ui::warn(&format!(
                "{} not installed. Run \"agentup setup\" first to install it.",
                meta.display_name
            ));
            ui::info(&format!("Skipping {} init...", meta.display_name));
            continue;
        }

        println!();
        ui::info(&format!("Running {} init...", meta.display_name));
        println!();
        match adapter.init_project(cwd) {
            Ok(()) => ui::success(&format!("{} init complete", meta.display_name)),
            Err(err) => ui::error(&format!("{} init failed: {err}", meta.display_name)),
        }
    }
}

fn own_init(cwd: &Path) -> Result<()> {
    println!();
    ui::info("Running agentup init...");

    init::write_init_state(cwd, env!("CARGO_PKG_VERSION"))?;

    match init::upsert_project_doc(cwd)? {
        init::DocChange::Created => ui::success("Created project CLAUDE.md"),
        init::DocChange::SectionAdded => {
            ui::success("Updated project CLAUDE.md with agentup section");
        }
        init::DocChange::AlreadyPresent => {
            ui::info("CLAUDE.md already contains agentup section, skipping");
        }
    }

    let init_dir = templates::bundled_templates_dir()
        .ok()
        .map(|root| root.join(init::INIT_TEMPLATES_SUBDIR))
        .filter(|dir| dir.is_dir());
    match init_dir {
        Some(dir) => {
            let count = init::deploy_init_templates(&dir, cwd)?;
            if count > 0 {
                ui::success(&format!("Deployed {count} agentup enhanced file(s)"));
            }
        }
        None => ui::warn("Init templates not found, skipping file replacements"),
    }

    init::append_gitignore_entry(cwd)?;

    ui::success("agentup init complete");
    Ok(())
}
