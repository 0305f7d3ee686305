//! Subcommand implementations for the agentup binary.

pub mod init;
pub mod setup;
