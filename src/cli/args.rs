use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde_json::json;
use std::path::PathBuf;

use crate::config::LinkerConfig;
use crate::linker::{LinkSession, MatchKeyKind};
use crate::store::{MemoryStore, Vehicle, VehicleFilter, VehicleId, VehicleRegistry};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON format
    Json,
}

/// Snapshot location and vehicle selection
#[derive(Args, Debug, Clone)]
pub struct VehicleArgs {
    /// Fleet snapshot with vehicles and documents (JSON, YAML or TOML)
    #[arg(short, long, value_name = "FILE")]
    pub data: PathBuf,

    /// Vehicle ids to link documents to (comma-separated or repeated)
    #[arg(long = "vehicle", value_name = "ID", value_delimiter = ',')]
    pub vehicles: Vec<u64>,

    /// Select every vehicle in the snapshot
    #[arg(long, conflicts_with = "vehicles")]
    pub all_vehicles: bool,
}

impl VehicleArgs {
    pub fn vehicle_filter(&self) -> VehicleFilter {
        if self.all_vehicles {
            VehicleFilter::default()
        } else {
            VehicleFilter::by_ids(self.vehicles.iter().copied().map(VehicleId))
        }
    }

    pub fn load_store(&self) -> Result<MemoryStore> {
        MemoryStore::load(&self.data)
            .with_context(|| format!("Failed to load fleet data from {}", self.data.display()))
    }

    /// Resolve the selection against the registry, warning about unknown ids
    pub fn resolve_vehicles(&self, registry: &dyn VehicleRegistry) -> Result<Vec<Vehicle>> {
        let vehicles = registry.search_vehicles(&self.vehicle_filter())?;
        for id in &self.vehicles {
            if !vehicles.iter().any(|v| v.id.0 == *id) {
                tracing::warn!("Vehicle {} not found in {}", id, self.data.display());
            }
        }
        Ok(vehicles)
    }
}

/// Options shared by every command that opens a link session
#[derive(Args, Debug, Clone)]
pub struct SessionArgs {
    #[command(flatten)]
    pub selection: VehicleArgs,

    /// Vehicle attribute compared against the filename token
    #[arg(long, value_enum)]
    pub key: Option<MatchKeyKind>,

    /// Regex document names must match with --key custom ({vehicle_field} = short id)
    #[arg(long)]
    pub pattern: Option<String>,

    /// Allowed document extensions (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Scan documents of any extension
    #[arg(long, conflicts_with = "extensions")]
    pub any_extension: bool,

    /// Only scan documents in this folder
    #[arg(long, value_name = "ID")]
    pub folder: Option<u64>,
}

impl SessionArgs {
    /// Flags as a config overlay; unset flags are dropped before merging
    pub fn overrides(&self) -> serde_json::Value {
        json!({
            "linker": {
                "match_key": self.key,
                "custom_pattern": self.pattern,
                "allowed_extensions": self.extensions,
                "folder": self.folder,
            }
        })
    }
}

/// Everything a command needs to drive one session
pub struct SessionContext {
    pub store: MemoryStore,
    pub session: LinkSession,
}

/// Load configuration and the snapshot, resolve the selected vehicles and open a session
pub fn open_session(args: &SessionArgs, config_path: Option<&str>) -> Result<SessionContext> {
    let config = LinkerConfig::load(config_path, Some(args.overrides()))?;
    let mut settings = config.settings()?;
    if args.any_extension {
        settings.linker.allowed_extensions.clear();
    }

    let store = args.selection.load_store()?;
    let vehicles = args.selection.resolve_vehicles(&store)?;

    let session = LinkSession::open(vehicles, settings.linker);
    Ok(SessionContext { store, session })
}
