//! Terminal output helpers.
//!
//! Status lines for the user go to stdout through these helpers; developer
//! diagnostics go through `tracing` to stderr so scripted output stays clean.

use colored::Colorize;

pub fn info(message: &str) {
    println!("{} {message}", "ℹ".blue());
}

pub fn success(message: &str) {
    println!("{} {message}", "✔".green());
}

pub fn warn(message: &str) {
    println!("{} {message}", "⚠".yellow());
}

pub fn error(message: &str) {
    println!("{} {message}", "✖".red());
}

/// Section heading with a dimmed underline.
pub fn title(text: &str) {
    println!();
    println!("{}", text.bold().cyan());
    println!("{}", "─".repeat(text.chars().count() + 4).dimmed());
}
