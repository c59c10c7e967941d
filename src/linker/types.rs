use serde::{Deserialize, Serialize};
use std::fmt;

use crate::store::{DocumentId, FolderId, Vehicle};

/// Accessor for the vehicle attribute compared against document tokens
pub type KeyFn = fn(&Vehicle) -> Option<&str>;

/// Which vehicle attribute a session matches document names against
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum MatchKeyKind {
    /// Fleet short identifier (e.g. `0001_invoice.pdf`)
    #[default]
    ShortId,
    /// License plate (e.g. `ABC123_insurance.pdf`)
    LicensePlate,
    /// Short identifier, narrowed by the session's custom pattern
    Custom,
}

impl MatchKeyKind {
    /// Resolve the variant to its accessor once, instead of per document
    pub fn key_fn(self) -> KeyFn {
        match self {
            MatchKeyKind::ShortId | MatchKeyKind::Custom => Vehicle::short_id,
            MatchKeyKind::LicensePlate => Vehicle::license_plate,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MatchKeyKind::ShortId => "short-id",
            MatchKeyKind::LicensePlate => "license-plate",
            MatchKeyKind::Custom => "custom",
        }
    }
}

impl fmt::Display for MatchKeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Editable configuration of a link session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkOptions {
    pub match_key: MatchKeyKind,
    /// Regex applied when `match_key` is `custom`; `{vehicle_field}` expands
    /// to the candidate vehicle's short id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_pattern: Option<String>,
    /// Accepted document extensions; empty accepts everything
    pub allowed_extensions: Vec<String>,
    /// Restrict the scan to one document folder
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<FolderId>,
}

pub const DEFAULT_EXTENSIONS: [&str; 6] = ["pdf", "jpg", "jpeg", "png", "doc", "docx"];

impl Default for LinkOptions {
    fn default() -> Self {
        Self {
            match_key: MatchKeyKind::default(),
            custom_pattern: None,
            allowed_extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            folder: None,
        }
    }
}

/// Lifecycle of a link session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Configuring,
    Reviewing,
    Done,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionState::Configuring => "configuring",
            SessionState::Reviewing => "reviewing",
            SessionState::Done => "done",
        };
        f.write_str(label)
    }
}

/// One scanned document and the vehicle it resolved to, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchLine {
    pub document_name: String,
    pub document_ref: DocumentId,
    pub matched_vehicle: Option<Vehicle>,
    pub(crate) linked: bool,
}

impl MatchLine {
    pub fn new(document_name: impl Into<String>, document_ref: DocumentId, matched_vehicle: Option<Vehicle>) -> Self {
        Self {
            document_name: document_name.into(),
            document_ref,
            matched_vehicle,
            linked: false,
        }
    }

    pub fn is_matched(&self) -> bool {
        self.matched_vehicle.is_some()
    }

    /// True once the committer wrote this line's link successfully
    pub fn is_linked(&self) -> bool {
        self.linked
    }
}

/// A document whose link write failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedItem {
    pub document_name: String,
    pub message: String,
}

/// Summary of a commit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkResult {
    pub linked_count: usize,
    pub failed_items: Vec<FailedItem>,
}

impl LinkResult {
    pub fn error_count(&self) -> usize {
        self.failed_items.len()
    }

    /// One `name: message` line per failure
    pub fn error_messages(&self) -> Option<String> {
        if self.failed_items.is_empty() {
            return None;
        }
        Some(
            self.failed_items
                .iter()
                .map(|item| format!("{}: {}", item.document_name, item.message))
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }
}

/// Counters from a single scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub documents_found: usize,
    pub skipped_unnamed: usize,
    pub skipped_by_extension: usize,
    pub lines: usize,
    pub matched: usize,
}
