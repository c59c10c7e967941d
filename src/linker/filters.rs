//! Document filters applied during a scan.
//!
//! - `ExtensionFilter` restricts which documents produce a line at all
//! - `CustomPattern` narrows which candidate vehicle a document may match

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use regex::{Regex, RegexBuilder};

use crate::error::{LinkError, Result};
use crate::store::Vehicle;

/// Placeholder in a custom pattern that expands to the vehicle's short id
pub const VEHICLE_FIELD_PLACEHOLDER: &str = "{vehicle_field}";

/// Case-insensitive extension allowlist, compiled once per scan
#[derive(Debug, Clone)]
pub struct ExtensionFilter {
    globs: Option<GlobSet>,
}

impl ExtensionFilter {
    /// Build from extensions such as `pdf`, `.JPG` or ` docx `. An empty list
    /// accepts every document.
    pub fn new(extensions: &[String]) -> Result<Self> {
        let normalized: Vec<String> = extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();

        if normalized.is_empty() {
            return Ok(Self { globs: None });
        }

        let mut builder = GlobSetBuilder::new();
        for ext in &normalized {
            let glob = GlobBuilder::new(&format!("*.{}", globset::escape(ext)))
                .case_insensitive(true)
                .build()
                .map_err(|e| {
                    LinkError::configuration(format!("Invalid file extension '{}': {}", ext, e))
                })?;
            builder.add(glob);
        }
        let globs = builder
            .build()
            .map_err(|e| LinkError::configuration(format!("Invalid file extensions: {}", e)))?;

        tracing::debug!("Compiled extension filter for {} extensions", normalized.len());
        Ok(Self { globs: Some(globs) })
    }

    pub fn allows(&self, document_name: &str) -> bool {
        match &self.globs {
            Some(globs) => globs.is_match(document_name),
            None => true,
        }
    }
}

/// User-supplied regex template checked against document names
#[derive(Debug, Clone)]
pub struct CustomPattern {
    template: String,
}

impl CustomPattern {
    /// Validate the template by compiling it with a sample expansion
    pub fn parse(template: &str) -> Result<Self> {
        let template = template.trim();
        if template.is_empty() {
            return Err(LinkError::configuration("Custom pattern is empty"));
        }
        compile(&template.replace(VEHICLE_FIELD_PLACEHOLDER, "X"))?;
        Ok(Self {
            template: template.to_string(),
        })
    }

    /// Expand the placeholder with `vehicle`'s short id and compile.
    /// Vehicles without a short id get `None`; they can never match anyway.
    pub fn compile_for(&self, vehicle: &Vehicle) -> Result<Option<Regex>> {
        let Some(key) = vehicle.short_id().filter(|k| !k.is_empty()) else {
            return Ok(None);
        };
        let expanded = self
            .template
            .replace(VEHICLE_FIELD_PLACEHOLDER, &regex::escape(key));
        compile(&expanded).map(Some)
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| LinkError::configuration(format!("Invalid custom pattern '{}': {}", pattern, e)))
}
