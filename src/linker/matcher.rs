use regex::Regex;
use std::collections::HashMap;

use super::extract::extract;
use super::filters::CustomPattern;
use super::types::KeyFn;
use crate::error::Result;
use crate::store::Vehicle;

/// Find the first candidate whose comparison key equals `token`.
///
/// Keys are upper-cased before comparison; the token is expected to be
/// upper-cased already (see `extract`). Empty tokens and empty keys never
/// match. When several candidates share a key the earliest one wins.
pub fn find_match<'a>(token: &str, candidates: &'a [Vehicle], key_fn: KeyFn) -> Option<&'a Vehicle> {
    if token.is_empty() {
        return None;
    }
    candidates.iter().find(|vehicle| key_equals(vehicle, key_fn, token))
}

fn key_equals(vehicle: &Vehicle, key_fn: KeyFn, token: &str) -> bool {
    key_fn(vehicle).is_some_and(|key| !key.is_empty() && key.to_uppercase() == token)
}

/// Per-scan matcher: the key accessor and any custom patterns are resolved
/// once, then applied to every document.
pub struct Matcher<'a> {
    candidates: &'a [Vehicle],
    key_fn: KeyFn,
    /// One compiled pattern per candidate, index-aligned with `candidates`
    patterns: Option<Vec<Option<Regex>>>,
}

impl<'a> Matcher<'a> {
    pub fn new(candidates: &'a [Vehicle], key_fn: KeyFn, pattern: Option<&CustomPattern>) -> Result<Self> {
        let patterns = match pattern {
            Some(pattern) => Some(
                candidates
                    .iter()
                    .map(|vehicle| pattern.compile_for(vehicle))
                    .collect::<Result<Vec<_>>>()?,
            ),
            None => None,
        };

        warn_duplicate_keys(candidates, key_fn);

        Ok(Self {
            candidates,
            key_fn,
            patterns,
        })
    }

    /// Resolve a document name to its vehicle, if any
    pub fn match_document(&self, document_name: &str) -> Option<&'a Vehicle> {
        let token = extract(document_name);

        let Some(patterns) = &self.patterns else {
            return find_match(&token, self.candidates, self.key_fn);
        };

        if token.is_empty() {
            return None;
        }
        self.candidates
            .iter()
            .zip(patterns)
            .find(|(vehicle, pattern)| {
                key_equals(vehicle, self.key_fn, &token)
                    && matches!(pattern, Some(re) if re.is_match(document_name))
            })
            .map(|(vehicle, _)| vehicle)
    }
}

/// Shared keys resolve silently to the first vehicle; make that visible in logs.
fn warn_duplicate_keys(candidates: &[Vehicle], key_fn: KeyFn) {
    let mut seen: HashMap<String, &Vehicle> = HashMap::new();
    for vehicle in candidates {
        let Some(key) = key_fn(vehicle).filter(|k| !k.is_empty()) else {
            continue;
        };
        let key = key.to_uppercase();
        match seen.get(&key) {
            Some(first) => tracing::warn!(
                "Vehicles '{}' and '{}' share comparison key '{}'; documents will link to '{}'",
                first.name,
                vehicle.name,
                key,
                first.name
            ),
            None => {
                seen.insert(key, vehicle);
            }
        }
    }
}
