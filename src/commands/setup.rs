//! `agentup setup`: probe, select, install and update the managed tools,
//! then deploy config files.
//!
//! Interactive by default. CI mode (`--yes`, a CI environment or a non-tty
//! stdin) takes every actionable tool and skips the config deployment phase.

use std::collections::HashMap;

use anyhow::Result;
use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, MultiSelect, Select};
use is_terminal::IsTerminal;

use agentup::runner::{self, Action, AdapterAction};
use agentup::{adapters, configs, deploy, platform, templates, ui};

pub fn run(yes: bool) -> Result<()> {
    let ci_mode = yes || platform::is_ci() || !std::io::stdin().is_terminal();

    ui::title("agentup setup");

    let adapters = adapters::all_adapters();
    let actions = runner::check_all(&adapters);

    print_status_table(&actions);

    let actionable: Vec<AdapterAction<'_>> = actions
        .iter()
        .filter(|a| a.action != Action::Skip)
        .cloned()
        .collect();
    let skippable: Vec<AdapterAction<'_>> = actions
        .iter()
        .filter(|a| a.action == Action::Skip)
        .cloned()
        .collect();

    if actionable.is_empty() {
        ui::success("All tools are up to date!");
    }

    let selected: Vec<AdapterAction<'_>> = if ci_mode {
        actionable
    } else if actionable.is_empty() {
        select_reconfigure(&skippable)?
    } else {
        select_actionable(&actionable)?
    };

    if !selected.is_empty() {
        let versions = if ci_mode {
            HashMap::new()
        } else {
            prompt_version_strategies(&selected)?
        };

        println!();
        for item in &selected {
            let version = versions.get(item.adapter.meta().name).copied();
            if let Err(err) = runner::run_adapter(item, version) {
                ui::error(&format!(
                    "Failed: {} - {err}",
                    item.adapter.meta().display_name
                ));
            }
        }
    }

    deploy_phase(ci_mode)?;

    println!();
    ui::title("Setup Complete");
    if selected.is_empty() {
        ui::info("No tools were installed or updated.");
    } else {
        for item in &selected {
            let verb = if item.action == Action::Update {
                "Updated"
            } else {
                "Installed"
            };
            ui::success(&format!("{verb}: {}", item.adapter.meta().display_name));
        }
    }
    Ok(())
}

fn print_status_table(actions: &[AdapterAction<'_>]) {
    println!();
    let header = format!(
        "  {} {} {} Action",
        pad("Tool", 24),
        pad("Status", 10),
        pad("Version", 12)
    );
    println!("{}", header.dimmed());
    println!("  {}", "─".repeat(64).dimmed());

    for entry in actions {
        let meta = entry.adapter.meta();
        let name = pad(meta.display_name, 24);
        let status = if entry.status.installed {
            pad("OK", 10).green()
        } else {
            pad("Missing", 10).red()
        };
        let version = pad(entry.status.version.as_deref().unwrap_or("-"), 12);
        let action = match entry.action {
            Action::Install => "Install".yellow().to_string(),
            Action::Update => format!(
                "Update → {}",
                entry.status.latest_version.as_deref().unwrap_or("?")
            )
            .cyan()
            .to_string(),
            Action::Skip => "Skip".dimmed().to_string(),
        };
        println!("  {name} {status} {version} {action}");
    }
    println!();
}

fn pad(text: &str, width: usize) -> String {
    format!("{text:<width$}")
}

fn action_label(entry: &AdapterAction<'_>) -> String {
    let meta = entry.adapter.meta();
    match entry.action {
        Action::Update => format!(
            "{} - Update to {}",
            meta.display_name,
            entry.status.latest_version.as_deref().unwrap_or("latest")
        ),
        _ => format!("{} - Install", meta.display_name),
    }
}

/// Everything is current: offer to reinstall tools anyway.
fn select_reconfigure<'a>(
    skippable: &[AdapterAction<'a>],
) -> Result<Vec<AdapterAction<'a>>> {
    let reconfigure = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("All tools installed. Reconfigure any tool?")
        .default(false)
        .interact()?;
    if !reconfigure {
        return Ok(Vec::new());
    }

    let labels: Vec<String> = skippable
        .iter()
        .map(|a| format!("{} (reconfigure)", a.adapter.meta().display_name))
        .collect();
    let picked = MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Select tools to reconfigure:")
        .items(&labels)
        .interact()?;

    // Reconfiguring means reinstalling.
    Ok(picked
        .into_iter()
        .map(|i| AdapterAction {
            action: Action::Install,
            ..skippable[i].clone()
        })
        .collect())
}

fn select_actionable<'a>(
    actionable: &[AdapterAction<'a>],
) -> Result<Vec<AdapterAction<'a>>> {
    let labels: Vec<String> = actionable.iter().map(action_label).collect();
    let defaults = vec![true; labels.len()];
    let picked = MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Select tools to install/update:")
        .items(&labels)
        .defaults(&defaults)
        .interact()?;

    Ok(picked.into_iter().map(|i| actionable[i].clone()).collect())
}

/// Ask pinned-vs-latest for each selected tool that ships a pin.
fn prompt_version_strategies(
    selected: &[AdapterAction<'_>],
) -> Result<HashMap<&'static str, &'static str>> {
    let mut versions = HashMap::new();
    for item in selected {
        let meta = item.adapter.meta();
        let Some(pin) = meta.pinned_version else {
            continue;
        };
        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("{} - Version strategy:", meta.display_name))
            .items(&[
                format!("Pinned v{pin} (tested with agentup)"),
                "Latest version".to_string(),
            ])
            .default(0)
            .interact()?;
        if choice == 0 {
            versions.insert(meta.name, pin);
        }
    }
    Ok(versions)
}

fn deploy_phase(ci_mode: bool) -> Result<()> {
    println!();
    if ci_mode {
        ui::info("Config deployment skipped in CI mode (use agentup setup interactively)");
        return Ok(());
    }

    let deploy_now = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Deploy AI tool config files?")
        .default(true)
        .interact()?;
    if !deploy_now {
        return Ok(());
    }

    let home = platform::home_dir();
    let targets = configs::all_config_targets();
    let labels: Vec<String> = targets
        .iter()
        .map(|t| format!("{} ({}/)", t.display_name, t.config_dir))
        .collect();
    let defaults: Vec<bool> = targets.iter().map(|t| t.detected(&home)).collect();
    let picked = MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Deploy configs to:")
        .items(&labels)
        .defaults(&defaults)
        .interact()?;

    if picked.is_empty() {
        ui::info("No config targets selected, skipping.");
        return Ok(());
    }

    let names: Vec<String> = picked
        .into_iter()
        .map(|i| targets[i].name.to_string())
        .collect();
    let selected = configs::config_targets_by_names(&names);
    let templates_dir = templates::bundled_templates_dir()?;

    let reports = deploy::deploy_configs(&templates_dir, &home, &selected);
    for report in &reports {
        if report.succeeded() {
            ui::success(&format!(
                "{}: {} file(s) deployed",
                report.display_name, report.deployed
            ));
        } else {
            ui::error(&format!("{}: deploy failed", report.display_name));
            if let Some(err) = &report.error {
                ui::error(err);
            }
        }
    }
    Ok(())
}
