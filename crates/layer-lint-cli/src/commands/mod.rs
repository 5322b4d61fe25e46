//! Subcommand implementations.

pub mod check;
pub mod graph;
pub mod init;
pub mod list_rules;
pub mod output;
