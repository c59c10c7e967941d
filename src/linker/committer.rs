use super::types::{FailedItem, LinkResult, MatchLine};
use crate::error::{LinkError, Result};
use crate::store::DocumentStore;

/// Write the matched vehicle onto every matched line's document.
///
/// Unmatched lines are ignored. A failed write is recorded in the result and
/// the batch carries on; nothing is retried or rolled back. Refuses to run
/// (before any write) when no line is matched.
pub fn commit(lines: &mut [MatchLine], store: &mut dyn DocumentStore) -> Result<LinkResult> {
    if !lines.iter().any(MatchLine::is_matched) {
        return Err(LinkError::configuration("There are no matched documents to link"));
    }

    let result = lines
        .iter_mut()
        .filter_map(|line| {
            let vehicle = line.matched_vehicle.as_ref()?.id;
            Some((line, vehicle))
        })
        .fold(LinkResult::default(), |mut result, (line, vehicle)| {
            match store.write_link(line.document_ref, vehicle) {
                Ok(()) => {
                    line.linked = true;
                    result.linked_count += 1;
                }
                Err(e) => {
                    tracing::error!("Error linking document {}: {}", line.document_name, e);
                    line.linked = false;
                    result.failed_items.push(FailedItem {
                        document_name: line.document_name.clone(),
                        message: e.message,
                    });
                }
            }
            result
        });

    tracing::info!(
        "Linked {} documents ({} failed)",
        result.linked_count,
        result.error_count()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StoreError, WriteError};
    use crate::store::{Document, DocumentFilter, DocumentId, MemoryStore, Vehicle, VehicleId};

    /// Counts writes and fails the ones listed
    #[derive(Default)]
    struct RecordingStore {
        writes: Vec<(DocumentId, VehicleId)>,
        fail: Vec<DocumentId>,
    }

    impl DocumentStore for RecordingStore {
        fn search_documents(&self, _filter: &DocumentFilter) -> std::result::Result<Vec<Document>, StoreError> {
            Ok(vec![])
        }

        fn write_link(&mut self, document: DocumentId, vehicle: VehicleId) -> std::result::Result<(), WriteError> {
            self.writes.push((document, vehicle));
            if self.fail.contains(&document) {
                return Err(WriteError::new("constraint violation"));
            }
            Ok(())
        }
    }

    fn truck() -> Vehicle {
        Vehicle::new(1, "Truck").with_short_id("0001")
    }

    #[test]
    fn test_empty_matched_set_performs_no_writes() {
        let mut store = RecordingStore::default();

        let err = commit(&mut [], &mut store).unwrap_err();
        assert!(matches!(err, LinkError::Configuration(_)));

        let mut lines = vec![MatchLine::new("loose.pdf", DocumentId(3), None)];
        let err = commit(&mut lines, &mut store).unwrap_err();
        assert!(matches!(err, LinkError::Configuration(_)));
        assert!(store.writes.is_empty());
    }

    #[test]
    fn test_unmatched_lines_are_ignored() {
        let mut store = RecordingStore::default();
        let mut lines = vec![
            MatchLine::new("0001_a.pdf", DocumentId(1), Some(truck())),
            MatchLine::new("loose.pdf", DocumentId(2), None),
        ];

        let result = commit(&mut lines, &mut store).unwrap();
        assert_eq!(result.linked_count, 1);
        assert!(result.failed_items.is_empty());
        assert_eq!(store.writes, vec![(DocumentId(1), VehicleId(1))]);
        assert!(lines[0].is_linked());
        assert!(!lines[1].is_linked());
    }

    #[test]
    fn test_partial_failure_continues_batch() {
        let mut store = RecordingStore {
            fail: vec![DocumentId(2)],
            ..Default::default()
        };
        let mut lines = vec![
            MatchLine::new("0001_a.pdf", DocumentId(1), Some(truck())),
            MatchLine::new("0001_b.pdf", DocumentId(2), Some(truck())),
            MatchLine::new("0001_c.pdf", DocumentId(3), Some(truck())),
        ];

        let result = commit(&mut lines, &mut store).unwrap();
        assert_eq!(result.linked_count, 2);
        assert_eq!(result.failed_items.len(), 1);
        assert_eq!(result.failed_items[0].document_name, "0001_b.pdf");
        assert!(!result.failed_items[0].message.is_empty());

        assert!(lines[0].is_linked());
        assert!(!lines[1].is_linked());
        assert!(lines[2].is_linked());
        // Every matched line was attempted exactly once
        assert_eq!(store.writes.len(), 3);
    }

    #[test]
    fn test_links_written_to_memory_store() {
        let mut store = MemoryStore::new(
            vec![truck()],
            vec![Document::new(1, "0001_a.pdf"), Document::new(2, "0001_b.pdf")],
        );
        store.lock(DocumentId(2));

        let mut lines = vec![
            MatchLine::new("0001_a.pdf", DocumentId(1), Some(truck())),
            MatchLine::new("0001_b.pdf", DocumentId(2), Some(truck())),
        ];
        let result = commit(&mut lines, &mut store).unwrap();

        assert_eq!(result.linked_count, 1);
        assert!(result.failed_items[0].message.contains("read-only"));
        assert_eq!(store.document(DocumentId(1)).unwrap().link_target, Some(VehicleId(1)));
        assert_eq!(store.document(DocumentId(2)).unwrap().link_target, None);
    }
}
