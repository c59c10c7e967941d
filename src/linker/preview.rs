//! Read-only diagnostic listing which documents would match which vehicles.
//!
//! Unlike a session scan this ignores folder and extension configuration and
//! always compares against the short id, walking vehicles first. It is meant
//! to sanity-check naming conventions before running a real link.

use serde::Serialize;

use super::extract::extract;
use crate::error::{LinkError, Result};
use crate::store::{DocumentFilter, DocumentId, DocumentStore, Vehicle};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewMatch {
    pub vehicle: String,
    pub vehicle_key: String,
    pub document: String,
    pub document_id: DocumentId,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PreviewReport {
    /// Total matches found, including those past the display limit
    pub total: usize,
    /// At most `limit` matches
    pub matches: Vec<PreviewMatch>,
}

impl PreviewReport {
    pub fn is_truncated(&self) -> bool {
        self.total > self.matches.len()
    }
}

pub fn preview_matches(store: &dyn DocumentStore, vehicles: &[Vehicle], limit: usize) -> Result<PreviewReport> {
    if vehicles.is_empty() {
        return Err(LinkError::configuration("Select at least one vehicle"));
    }

    let documents = store.search_documents(&DocumentFilter::default())?;
    let mut report = PreviewReport::default();

    for vehicle in vehicles {
        let Some(key) = vehicle.short_id().filter(|k| !k.is_empty()) else {
            continue;
        };
        let key_upper = key.to_uppercase();

        for document in documents.iter().filter(|d| !d.name.is_empty()) {
            if extract(&document.name) != key_upper {
                continue;
            }
            report.total += 1;
            if report.matches.len() < limit {
                report.matches.push(PreviewMatch {
                    vehicle: vehicle.name.clone(),
                    vehicle_key: key.to_string(),
                    document: document.name.clone(),
                    document_id: document.id,
                });
            }
        }
    }

    Ok(report)
}
