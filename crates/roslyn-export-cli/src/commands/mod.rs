//! Subcommand implementations.

pub mod export;
pub mod init;
pub mod languages;
pub mod output;
