//! Deployment rules for Claude Code.
//!
//! Two marker-delimited sections share the user's global `CLAUDE.md`, and
//! three template directories are mirrored wholesale into `~/.claude`.

use super::{ConfigTarget, DeployRule, MergeStrategy, SectionMarker};

/// Delimits the managed workflow section in `~/.claude/CLAUDE.md`.
pub const GLOBAL_SECTION: SectionMarker = SectionMarker {
    start: "<!-- agentup:global -->",
    end: "<!-- agentup:global:end -->",
};

/// Delimits the ccg guidance section in `~/.claude/CLAUDE.md`.
pub const CCG_SECTION: SectionMarker = SectionMarker {
    start: "<!-- agentup:ccg -->",
    end: "<!-- agentup:ccg:end -->",
};

pub fn target() -> ConfigTarget {
    ConfigTarget {
        name: "claude",
        display_name: "Claude Code",
        config_dir: "~/.claude",
        rules: vec![
            merge_rule("CLAUDE.md", "~/.claude/CLAUDE.md", GLOBAL_SECTION),
            merge_rule("CLAUDE-ccg.md", "~/.claude/CLAUDE.md", CCG_SECTION),
            replace_rule("rules", "~/.claude/rules"),
            replace_rule("skills", "~/.claude/skills"),
            replace_rule("commands", "~/.claude/commands"),
        ],
    }
}

fn merge_rule(source: &str, target: &str, marker: SectionMarker) -> DeployRule {
    DeployRule {
        source: source.to_string(),
        target: target.to_string(),
        strategy: MergeStrategy::MergeSection,
        section_marker: Some(marker),
    }
}

fn replace_rule(source: &str, target: &str) -> DeployRule {
    DeployRule {
        source: source.to_string(),
        target: target.to_string(),
        strategy: MergeStrategy::Replace,
        section_marker: None,
    }
}
