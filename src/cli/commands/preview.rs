use anyhow::Result;
use clap::Args;
use serde_json::json;

use crate::cli::args::{OutputFormat, VehicleArgs};
use crate::cli::output::Output;
use crate::cli::report;
use crate::config::LinkerConfig;
use crate::linker::preview_matches;

#[derive(Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub selection: VehicleArgs,

    /// Maximum number of matches to list
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

pub fn execute(args: PreviewArgs, quiet: bool, config: Option<&str>) -> Result<()> {
    let output = Output::new(false, quiet);
    let config = LinkerConfig::load(config, Some(json!({ "preview": { "limit": args.limit } })))?;
    let settings = config.settings()?;

    let store = args.selection.load_store()?;
    let vehicles = args.selection.resolve_vehicles(&store)?;
    let report = preview_matches(&store, &vehicles, settings.preview.limit)?;

    match args.format {
        OutputFormat::Json => report::print_preview_json(&report),
        OutputFormat::Text => {
            report::print_preview(&report, &output);
            Ok(())
        }
    }
}
