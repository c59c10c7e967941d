use std::collections::HashSet;

use super::committer;
use super::scanner::{self, ScanOutcome};
use super::types::{LinkOptions, LinkResult, MatchKeyKind, MatchLine, ScanStats, SessionState};
use crate::error::{LinkError, Result};
use crate::store::{DocumentStore, FolderId, Vehicle};

/// Operator-driven link workflow: configure, review the scan, commit.
///
/// ```text
/// configuring --scan--> reviewing --commit--> done
///      ^                    |
///      +-------back---------+
/// ```
///
/// A failed action leaves the session exactly as it was.
#[derive(Debug, Clone)]
pub struct LinkSession {
    state: SessionState,
    vehicles: Vec<Vehicle>,
    options: LinkOptions,
    lines: Vec<MatchLine>,
    /// Set by `back`; the retained lines no longer reflect the configuration
    stale: bool,
    stats: Option<ScanStats>,
    result: Option<LinkResult>,
}

impl LinkSession {
    /// Open a session on the operator's preselected vehicles
    pub fn open(preselected: Vec<Vehicle>, options: LinkOptions) -> Self {
        let vehicles = dedup_vehicles(preselected);
        tracing::debug!(
            "Opened link session with {} vehicles, matching by {}",
            vehicles.len(),
            options.match_key
        );
        Self {
            state: SessionState::Configuring,
            vehicles,
            options,
            lines: Vec::new(),
            stale: false,
            stats: None,
            result: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn selected_vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn options(&self) -> &LinkOptions {
        &self.options
    }

    pub fn lines(&self) -> &[MatchLine] {
        &self.lines
    }

    /// Lines kept from a scan made before the operator went back
    pub fn lines_are_stale(&self) -> bool {
        self.stale
    }

    pub fn scan_stats(&self) -> Option<&ScanStats> {
        self.stats.as_ref()
    }

    /// Commit summary, available once the session is done
    pub fn result(&self) -> Option<&LinkResult> {
        self.result.as_ref()
    }

    pub fn total_scanned(&self) -> usize {
        self.lines.len()
    }

    pub fn total_matched(&self) -> usize {
        self.lines.iter().filter(|l| l.is_matched()).count()
    }

    pub fn total_vehicles(&self) -> usize {
        self.vehicles.len()
    }

    pub fn select_vehicles(&mut self, vehicles: Vec<Vehicle>) -> Result<()> {
        self.ensure_editable("select vehicles for")?;
        self.vehicles = dedup_vehicles(vehicles);
        Ok(())
    }

    pub fn set_match_key(&mut self, kind: MatchKeyKind) -> Result<()> {
        self.ensure_editable("reconfigure")?;
        self.options.match_key = kind;
        Ok(())
    }

    pub fn set_custom_pattern(&mut self, pattern: Option<String>) -> Result<()> {
        self.ensure_editable("reconfigure")?;
        self.options.custom_pattern = pattern;
        Ok(())
    }

    pub fn set_allowed_extensions(&mut self, extensions: Vec<String>) -> Result<()> {
        self.ensure_editable("reconfigure")?;
        self.options.allowed_extensions = extensions;
        Ok(())
    }

    pub fn set_folder(&mut self, folder: Option<FolderId>) -> Result<()> {
        self.ensure_editable("reconfigure")?;
        self.options.folder = folder;
        Ok(())
    }

    /// Scan the store and move to review. Previous lines are replaced wholesale.
    pub fn scan(&mut self, store: &dyn DocumentStore) -> Result<&[MatchLine]> {
        if self.state != SessionState::Configuring {
            return Err(LinkError::invalid_transition("scan", self.state));
        }
        if self.vehicles.is_empty() {
            return Err(LinkError::configuration("At least one vehicle must be selected"));
        }

        let ScanOutcome { lines, stats } = scanner::scan(store, &self.vehicles, &self.options)?;
        tracing::info!(
            "Found {} documents, {} matching {} vehicles",
            stats.lines,
            stats.matched,
            self.vehicles.len()
        );

        self.lines = lines;
        self.stats = Some(stats);
        self.stale = false;
        self.state = SessionState::Reviewing;
        Ok(&self.lines)
    }

    /// Return to configuration; the current lines stay visible until rescanned
    pub fn back(&mut self) -> Result<()> {
        if self.state != SessionState::Reviewing {
            return Err(LinkError::invalid_transition("go back from", self.state));
        }
        self.state = SessionState::Configuring;
        self.stale = true;
        Ok(())
    }

    /// Link every matched line and finish the session
    pub fn commit(&mut self, store: &mut dyn DocumentStore) -> Result<&LinkResult> {
        if self.state != SessionState::Reviewing {
            return Err(LinkError::invalid_transition("commit", self.state));
        }

        let result = committer::commit(&mut self.lines, store)?;
        self.state = SessionState::Done;
        Ok(self.result.insert(result))
    }

    fn ensure_editable(&self, action: &'static str) -> Result<()> {
        if self.state == SessionState::Done {
            return Err(LinkError::invalid_transition(action, self.state));
        }
        Ok(())
    }
}

/// The selection is a set: keep the first occurrence of each vehicle id
fn dedup_vehicles(vehicles: Vec<Vehicle>) -> Vec<Vehicle> {
    let mut seen = HashSet::new();
    vehicles.into_iter().filter(|v| seen.insert(v.id)).collect()
}
