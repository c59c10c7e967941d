use std::time::Instant;

use super::filters::{CustomPattern, ExtensionFilter};
use super::matcher::Matcher;
use super::types::{LinkOptions, MatchKeyKind, MatchLine, ScanStats};
use crate::error::Result;
use crate::store::{DocumentFilter, DocumentStore, Vehicle};

/// Lines and counters produced by one scan
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub lines: Vec<MatchLine>,
    pub stats: ScanStats,
}

/// Scan the document store and match every eligible document against `vehicles`.
///
/// Documents outside the configured folder are never fetched. Unnamed documents
/// and documents with a disallowed extension produce no line. Everything else
/// produces exactly one line, matched or not, in store order.
pub fn scan(store: &dyn DocumentStore, vehicles: &[Vehicle], options: &LinkOptions) -> Result<ScanOutcome> {
    let start_time = Instant::now();

    // Resolve configuration before touching the store so a bad pattern fails fast
    let extensions = ExtensionFilter::new(&options.allowed_extensions)?;
    let pattern = match (options.match_key, options.custom_pattern.as_deref()) {
        (_, Some(template)) if template.trim().is_empty() => None,
        (MatchKeyKind::Custom, Some(template)) => Some(CustomPattern::parse(template)?),
        (kind, Some(template)) => {
            tracing::warn!(
                "Ignoring custom pattern '{}': it only applies with match key custom, not {}",
                template,
                kind
            );
            None
        }
        (_, None) => None,
    };
    let matcher = Matcher::new(vehicles, options.match_key.key_fn(), pattern.as_ref())?;

    let documents = store.search_documents(&DocumentFilter {
        folder: options.folder,
    })?;

    let mut stats = ScanStats {
        documents_found: documents.len(),
        ..ScanStats::default()
    };
    let mut lines = Vec::with_capacity(documents.len());

    for document in documents {
        if document.name.is_empty() {
            stats.skipped_unnamed += 1;
            continue;
        }
        if !extensions.allows(&document.name) {
            tracing::trace!("Skipping {} (extension not allowed)", document.name);
            stats.skipped_by_extension += 1;
            continue;
        }

        let vehicle = matcher.match_document(&document.name);
        if let Some(vehicle) = vehicle {
            tracing::trace!("{} -> {}", document.name, vehicle.name);
            stats.matched += 1;
        }
        lines.push(MatchLine::new(document.name, document.id, vehicle.cloned()));
    }

    stats.lines = lines.len();
    tracing::debug!(
        "Scanned {} documents by {} in {:?}: {} lines, {} matched, {} skipped by extension",
        stats.documents_found,
        options.match_key,
        start_time.elapsed(),
        stats.lines,
        stats.matched,
        stats.skipped_by_extension
    );

    Ok(ScanOutcome { lines, stats })
}
