use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use super::{
    Document, DocumentFilter, DocumentId, DocumentStore, Vehicle, VehicleFilter, VehicleId,
    VehicleRegistry,
};
use crate::error::{StoreError, WriteError};

/// On-disk form of a `MemoryStore`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Documents whose link target may not be changed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locked_documents: Vec<DocumentId>,
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
    #[serde(default)]
    pub documents: Vec<Document>,
}

/// In-memory document store and vehicle registry.
///
/// Reference host for the CLI and tests. Link writes enforce the same checks a
/// real store would: the document must exist and be writable, and the target
/// vehicle must exist.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: Vec<Document>,
    vehicles: Vec<Vehicle>,
    locked: BTreeSet<DocumentId>,
}

impl MemoryStore {
    pub fn new(vehicles: Vec<Vehicle>, documents: Vec<Document>) -> Self {
        Self {
            documents,
            vehicles,
            locked: BTreeSet::new(),
        }
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            documents: snapshot.documents,
            vehicles: snapshot.vehicles,
            locked: snapshot.locked_documents.into_iter().collect(),
        }
    }

    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            vehicles: self.vehicles.clone(),
            documents: self.documents.clone(),
            locked_documents: self.locked.iter().copied().collect(),
        }
    }

    /// Mark a document read-only so link writes against it fail
    pub fn lock(&mut self, document: DocumentId) {
        self.locked.insert(document);
    }

    pub fn document(&self, id: DocumentId) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    pub fn remove_document(&mut self, id: DocumentId) -> Option<Document> {
        let pos = self.documents.iter().position(|d| d.id == id)?;
        Some(self.documents.remove(pos))
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Load a snapshot file; the format follows the file extension
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?;

        let snapshot: Snapshot = match extension(path).as_str() {
            "json" => serde_json::from_str(&raw)?,
            "toml" => toml::from_str(&raw)?,
            "yaml" | "yml" => serde_yml::from_str(&raw)?,
            other => bail!("Unsupported snapshot format '{}' for {}", other, path.display()),
        };

        tracing::debug!(
            "Loaded snapshot {} ({} vehicles, {} documents)",
            path.display(),
            snapshot.vehicles.len(),
            snapshot.documents.len()
        );
        Ok(Self::from_snapshot(snapshot))
    }

    /// Write the current state back to a snapshot file
    pub fn save(&self, path: &Path) -> Result<()> {
        let snapshot = self.to_snapshot();
        let raw = match extension(path).as_str() {
            "json" => serde_json::to_string_pretty(&snapshot)?,
            "toml" => toml::to_string_pretty(&snapshot)?,
            "yaml" | "yml" => serde_yml::to_string(&snapshot)?,
            other => bail!("Unsupported snapshot format '{}' for {}", other, path.display()),
        };
        std::fs::write(path, raw)
            .with_context(|| format!("Failed to write snapshot {}", path.display()))?;
        Ok(())
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase()
}

impl DocumentStore for MemoryStore {
    fn search_documents(&self, filter: &DocumentFilter) -> Result<Vec<Document>, StoreError> {
        Ok(self
            .documents
            .iter()
            .filter(|d| filter.matches(d))
            .cloned()
            .collect())
    }

    fn write_link(&mut self, document: DocumentId, vehicle: VehicleId) -> Result<(), WriteError> {
        if !self.vehicles.iter().any(|v| v.id == vehicle) {
            return Err(WriteError::new(format!(
                "constraint violation: vehicle {} does not exist",
                vehicle
            )));
        }
        if self.locked.contains(&document) {
            return Err(WriteError::new(format!(
                "permission denied: document {} is read-only",
                document
            )));
        }
        let Some(record) = self.documents.iter_mut().find(|d| d.id == document) else {
            return Err(WriteError::new(format!("document {} no longer exists", document)));
        };
        record.link_target = Some(vehicle);
        Ok(())
    }
}

impl VehicleRegistry for MemoryStore {
    fn search_vehicles(&self, filter: &VehicleFilter) -> Result<Vec<Vehicle>, StoreError> {
        Ok(self
            .vehicles
            .iter()
            .filter(|v| filter.matches(v))
            .cloned()
            .collect())
    }
}
