//! Probing the registered adapters and executing the chosen actions.

use anyhow::Result;
use colored::Colorize;

use crate::adapters::{ToolAdapter, ToolStatus};
use crate::ui;

/// What setup should do with one tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Install,
    Update,
    Skip,
}

/// One adapter paired with its probe result and classification.
#[derive(Clone)]
pub struct AdapterAction<'a> {
    pub adapter: &'a dyn ToolAdapter,
    pub status: ToolStatus,
    pub action: Action,
}

/// Probe every adapter and classify what setup should do with each.
///
/// A failed probe downgrades to "not installed" so a broken tool can still
/// be reinstalled.
pub fn check_all(adapters: &[Box<dyn ToolAdapter>]) -> Vec<AdapterAction<'_>> {
    ui::info("Checking installed tools...");
    let results = adapters
        .iter()
        .map(|adapter| {
            let status = match adapter.check() {
                Ok(status) => status,
                Err(err) => {
                    tracing::warn!(
                        tool = adapter.meta().name,
                        error = %err,
                        "Check failed, treating as not installed"
                    );
                    ToolStatus::missing()
                }
            };
            let action = classify(&status);
            AdapterAction {
                adapter: adapter.as_ref(),
                status,
                action,
            }
        })
        .collect();
    ui::success("Tool check complete");
    results
}

fn classify(status: &ToolStatus) -> Action {
    if !status.installed {
        Action::Install
    } else if status.update_available {
        Action::Update
    } else {
        Action::Skip
    }
}

/// Execute one resolved action. `Skip` runs a fresh install; the reconfigure
/// path routes deliberately re-picked tools through here.
///
/// Interactive tools get the terminal to themselves; everything else gets a
/// progress line and a ✔/✖ verdict.
pub fn run_adapter(item: &AdapterAction<'_>, version: Option<&str>) -> Result<()> {
    let meta = item.adapter.meta();
    let updating = item.action == Action::Update;

    if meta.interactive {
        println!();
        ui::info(&format!("Starting {} (interactive)...", meta.display_name));
        println!();
        let result = if updating {
            item.adapter.update(version)
        } else {
            item.adapter.install(version)
        };
        println!();
        return result;
    }

    let suffix = version.map(|v| format!("@{v}")).unwrap_or_default();
    let verb = if updating { "Updating" } else { "Installing" };
    println!("{} {verb} {}{suffix}...", "→".cyan(), meta.display_name);

    let result = if updating {
        item.adapter.update(version)
    } else {
        item.adapter.install(version)
    };
    match &result {
        Ok(()) => {
            let done = if updating { "updated" } else { "installed" };
            let pinned = version.map(|v| format!(" (v{v})")).unwrap_or_default();
            ui::success(&format!("{} {done}{pinned}", meta.display_name));
        }
        Err(_) => {
            let stage = if updating { "update" } else { "install" };
            ui::error(&format!("{} {stage} failed", meta.display_name));
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{AdapterMeta, InstallMethod};
    use std::cell::Cell;

    struct StubAdapter {
        meta: AdapterMeta,
        /// `None` makes the probe fail.
        check_result: Option<ToolStatus>,
        installs: Cell<usize>,
        updates: Cell<usize>,
    }

    impl StubAdapter {
        fn new(check_result: Option<ToolStatus>) -> Self {
            Self {
                meta: AdapterMeta {
                    name: "stub",
                    display_name: "Stub",
                    description: "test double",
                    install_method: InstallMethod::NpmGlobal,
                    required: false,
                    order: 1,
                    interactive: false,
                    pinned_version: None,
                },
                check_result,
                installs: Cell::new(0),
                updates: Cell::new(0),
            }
        }
    }

    impl ToolAdapter for StubAdapter {
        fn meta(&self) -> &AdapterMeta {
            &self.meta
        }

        fn check(&self) -> Result<ToolStatus> {
            self.check_result
                .clone()
                .ok_or_else(|| anyhow::anyhow!("probe exploded"))
        }

        fn install(&self, _version: Option<&str>) -> Result<()> {
            self.installs.set(self.installs.get() + 1);
            Ok(())
        }

        fn update(&self, _version: Option<&str>) -> Result<()> {
            self.updates.set(self.updates.get() + 1);
            Ok(())
        }

        fn uninstall(&self) -> Result<()> {
            Ok(())
        }
    }

    fn installed(update_available: bool) -> ToolStatus {
        let latest = if update_available { "1.1.0" } else { "1.0.0" };
        ToolStatus {
            installed: true,
            version: Some("1.0.0".to_string()),
            latest_version: Some(latest.to_string()),
            update_available,
        }
    }

    #[test]
    fn classification_covers_all_probe_outcomes() {
        let adapters: Vec<Box<dyn ToolAdapter>> = vec![
            Box::new(StubAdapter::new(Some(ToolStatus::missing()))),
            Box::new(StubAdapter::new(Some(installed(true)))),
            Box::new(StubAdapter::new(Some(installed(false)))),
            Box::new(StubAdapter::new(None)),
        ];

        let actions = check_all(&adapters);
        let kinds: Vec<Action> = actions.iter().map(|a| a.action).collect();
        assert_eq!(
            kinds,
            [Action::Install, Action::Update, Action::Skip, Action::Install]
        );
        assert!(!actions[3].status.installed);
    }

    #[test]
    fn update_action_dispatches_to_update() {
        let stub = StubAdapter::new(Some(installed(true)));
        let item = AdapterAction {
            adapter: &stub,
            status: installed(true),
            action: Action::Update,
        };

        run_adapter(&item, None).unwrap();
        assert_eq!(stub.updates.get(), 1);
        assert_eq!(stub.installs.get(), 0);
    }

    #[test]
    fn skip_is_coerced_to_install() {
        let stub = StubAdapter::new(Some(installed(false)));
        let item = AdapterAction {
            adapter: &stub,
            status: installed(false),
            action: Action::Skip,
        };

        run_adapter(&item, Some("1.0.0")).unwrap();
        assert_eq!(stub.installs.get(), 1);
        assert_eq!(stub.updates.get(), 0);
    }
}
