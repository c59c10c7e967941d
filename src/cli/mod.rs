//! Command-line interface for fleet-doclink
//!
//! Each subcommand lives in `commands`; `args` holds the flags shared between
//! them and `report` renders session state as text or JSON.

pub mod args;
pub mod commands;
pub mod output;
pub mod report;

pub use commands::Cli;
pub use output::Output;
