//! Configuration management for fleet-doclink
//!
//! Settings are layered with figment: embedded defaults, user config, repo
//! config, an explicit `--config` file, `FLEET_DOCLINK_*` environment variables
//! and finally CLI flags. `LinkerConfig::settings` extracts the typed view.

pub mod core;
pub mod formats;
pub mod overrides;

pub use self::core::LinkerConfig;
pub use formats::ConfigFormat;

use serde::{Deserialize, Serialize};

use crate::linker::LinkOptions;

/// Typed configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkerSettings {
    /// Initial options for every link session
    pub linker: LinkOptions,
    pub preview: PreviewSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewSettings {
    /// Maximum matches listed by the preview command
    pub limit: usize,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self { limit: 10 }
    }
}
