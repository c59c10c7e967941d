//! Host data store contracts.
//!
//! The linker never owns documents or vehicles. It reads them through
//! `DocumentStore` / `VehicleRegistry` handles passed in explicitly by the
//! caller and writes back only the document's link target.

mod memory;

pub use memory::{MemoryStore, Snapshot};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{StoreError, WriteError};

/// Identifier of a document record in the host store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub u64);

/// Identifier of a vehicle record in the host registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(pub u64);

/// Identifier of a document folder
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FolderId(pub u64);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A document record as seen by the linker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<FolderId>,
    /// Vehicle this document is attached to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_target: Option<VehicleId>,
}

impl Document {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: DocumentId(id),
            name: name.into(),
            folder: None,
            link_target: None,
        }
    }

    pub fn in_folder(mut self, folder: u64) -> Self {
        self.folder = Some(FolderId(folder));
        self
    }
}

/// A fleet vehicle record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    #[serde(default)]
    pub name: String,
    /// Short fleet identifier, e.g. "0001"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_plate: Option<String>,
}

impl Vehicle {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: VehicleId(id),
            name: name.into(),
            short_id: None,
            license_plate: None,
        }
    }

    pub fn with_short_id(mut self, short_id: impl Into<String>) -> Self {
        self.short_id = Some(short_id.into());
        self
    }

    pub fn with_license_plate(mut self, plate: impl Into<String>) -> Self {
        self.license_plate = Some(plate.into());
        self
    }

    pub fn short_id(&self) -> Option<&str> {
        self.short_id.as_deref()
    }

    pub fn license_plate(&self) -> Option<&str> {
        self.license_plate.as_deref()
    }
}

/// Document query; `None` fields do not constrain the search
#[derive(Debug, Clone, Default)]
pub struct DocumentFilter {
    pub folder: Option<FolderId>,
}

impl DocumentFilter {
    pub fn matches(&self, document: &Document) -> bool {
        match self.folder {
            Some(folder) => document.folder == Some(folder),
            None => true,
        }
    }
}

/// Vehicle query; `ids: None` selects every vehicle
#[derive(Debug, Clone, Default)]
pub struct VehicleFilter {
    pub ids: Option<Vec<VehicleId>>,
}

impl VehicleFilter {
    pub fn by_ids(ids: impl IntoIterator<Item = VehicleId>) -> Self {
        Self {
            ids: Some(ids.into_iter().collect()),
        }
    }

    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        match &self.ids {
            Some(ids) => ids.contains(&vehicle.id),
            None => true,
        }
    }
}

/// Document storage used by the scanner (reads) and committer (link writes)
pub trait DocumentStore {
    fn search_documents(&self, filter: &DocumentFilter) -> Result<Vec<Document>, StoreError>;

    /// Point `document` at `vehicle`. Fails on permission or constraint violations.
    fn write_link(&mut self, document: DocumentId, vehicle: VehicleId) -> Result<(), WriteError>;
}

/// Read-only access to fleet vehicles
pub trait VehicleRegistry {
    fn search_vehicles(&self, filter: &VehicleFilter) -> Result<Vec<Vehicle>, StoreError>;
}
