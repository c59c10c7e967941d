//! Rendering of session state for the terminal or as JSON

use anyhow::Result;
use serde::Serialize;

use super::output::Output;
use crate::linker::{LinkResult, LinkSession, MatchLine, PreviewReport, ScanStats, SessionState};
use crate::store::{DocumentId, VehicleId};

#[derive(Serialize)]
struct LineReport<'a> {
    document: &'a str,
    document_id: DocumentId,
    vehicle: Option<&'a str>,
    vehicle_id: Option<VehicleId>,
    is_matched: bool,
    is_linked: bool,
}

impl<'a> From<&'a MatchLine> for LineReport<'a> {
    fn from(line: &'a MatchLine) -> Self {
        Self {
            document: &line.document_name,
            document_id: line.document_ref,
            vehicle: line.matched_vehicle.as_ref().map(|v| v.name.as_str()),
            vehicle_id: line.matched_vehicle.as_ref().map(|v| v.id),
            is_matched: line.is_matched(),
            is_linked: line.is_linked(),
        }
    }
}

#[derive(Serialize)]
struct SessionReport<'a> {
    state: SessionState,
    match_key: &'static str,
    total_vehicles: usize,
    total_scanned: usize,
    total_matched: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<&'a ScanStats>,
    lines: Vec<LineReport<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a LinkResult>,
}

impl<'a> SessionReport<'a> {
    fn new(session: &'a LinkSession) -> Self {
        Self {
            state: session.state(),
            match_key: session.options().match_key.as_str(),
            total_vehicles: session.total_vehicles(),
            total_scanned: session.total_scanned(),
            total_matched: session.total_matched(),
            stats: session.scan_stats(),
            lines: session.lines().iter().map(LineReport::from).collect(),
            result: session.result(),
        }
    }
}

pub fn print_session_json(session: &LinkSession) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&SessionReport::new(session))?);
    Ok(())
}

pub fn print_preview_json(report: &PreviewReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Review table plus totals
pub fn print_review(session: &LinkSession, output: &Output, verbose: bool) {
    output.header("Review");
    for line in session.lines() {
        match &line.matched_vehicle {
            Some(vehicle) => output.match_row(true, &line.document_name, &vehicle.name),
            None if verbose => output.match_row(false, &line.document_name, "no match"),
            None => {}
        }
    }

    output.blank_line();
    output.key_value("Match key", session.options().match_key.as_str());
    output.summary_stats("Vehicles selected", session.total_vehicles());
    output.summary_stats("Documents scanned", session.total_scanned());
    output.summary_stats("Documents matched", session.total_matched());

    if let Some(stats) = session.scan_stats() {
        if stats.skipped_by_extension > 0 {
            output.summary_stats("Skipped (extension)", stats.skipped_by_extension);
        }
        if stats.skipped_unnamed > 0 {
            output.summary_stats("Skipped (unnamed)", stats.skipped_unnamed);
        }
    }
}

pub fn print_result(result: &LinkResult, output: &Output) {
    output.blank_line();
    if result.linked_count > 0 {
        output.success(&format!("Linked {} document(s)", result.linked_count));
    }

    if result.error_count() > 0 {
        output.error(&format!("{} document(s) failed to link", result.error_count()));
        for item in &result.failed_items {
            output.error_item(&format!("{}: {}", item.document_name, item.message));
        }
    }
}

pub fn print_preview(report: &PreviewReport, output: &Output) {
    output.header("Preview");
    if report.matches.is_empty() {
        output.info("No documents match the selected vehicles");
        return;
    }

    for found in &report.matches {
        output.match_row(
            true,
            &found.document,
            &format!("{} [{}]", found.vehicle, found.vehicle_key),
        );
    }

    output.blank_line();
    if report.is_truncated() {
        output.info(&format!(
            "Showing {} of {} matches",
            report.matches.len(),
            report.total
        ));
    } else {
        output.summary_stats("Matches", report.total);
    }
}
