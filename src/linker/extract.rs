//! Vehicle token extraction from document names.

/// Extract the vehicle token from a document name.
///
/// The token is everything before the first `_`; without an underscore it is
/// the stem before the first `.`; without either it is the whole name. The
/// result is upper-cased. `""` yields `""`.
pub fn extract(document_name: &str) -> String {
    let head = match document_name.split_once('_') {
        Some((head, _)) => head,
        None => document_name
            .split_once('.')
            .map_or(document_name, |(stem, _)| stem),
    };
    head.to_uppercase()
}
