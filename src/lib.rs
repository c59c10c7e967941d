//! # fleet-doclink
//!
//! Links fleet documents to vehicles by the identifier at the start of their
//! filenames. Operators choose vehicles and a match key, scan a document store,
//! review the proposed links and commit them in one pass.
//!
//! ## Quick Start
//!
//! ```bash
//! # Review what would be linked
//! fleet-doclink scan --data fleet.json --vehicle 1,2
//!
//! # Write the links after confirmation
//! fleet-doclink link --data fleet.json --all-vehicles --key license-plate
//! ```
//!
//! The library side is usable without the CLI: open a
//! [`linker::LinkSession`] over any [`store::DocumentStore`], then
//! `scan` and `commit`.

pub mod cli;
pub mod config;
pub mod error;
pub mod linker;
pub mod store;

pub use error::{LinkError, Result};

/// Current version of fleet-doclink
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
