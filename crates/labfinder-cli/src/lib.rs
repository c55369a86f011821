//! Lab Finder CLI library.
//!
//! Subcommand handlers and output formatting for the `labfinder-cli` binary.

pub mod commands;
pub mod output;
pub mod terminal;
