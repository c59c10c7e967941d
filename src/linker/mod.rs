//! Filename-to-vehicle matching and the link workflow.
//!
//! - **extract**: token extraction from document names
//! - **matcher**: token/vehicle comparison, first match wins
//! - **filters**: extension allowlist and custom name patterns
//! - **scanner**: one `MatchLine` per eligible document
//! - **committer**: link writes with per-document failure capture
//! - **session**: the configure/review/done state machine
//! - **preview**: read-only match listing for diagnostics

pub mod committer;
pub mod extract;
pub mod filters;
pub mod matcher;
pub mod preview;
pub mod scanner;
pub mod session;
pub mod types;

pub use extract::extract;
pub use matcher::{Matcher, find_match};
pub use preview::{PreviewMatch, PreviewReport, preview_matches};
pub use scanner::ScanOutcome;
pub use session::LinkSession;
pub use types::{
    FailedItem, KeyFn, LinkOptions, LinkResult, MatchKeyKind, MatchLine, ScanStats, SessionState,
};
