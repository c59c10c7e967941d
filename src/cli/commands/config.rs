use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::{ConfigFormat, LinkerConfig};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Display current merged configuration
    Show {
        /// Output format
        #[arg(short, long, value_enum, default_value = "toml")]
        format: ConfigFormat,
    },
    /// Get a configuration value or section (dot-separated path)
    Get { key: String },
}

pub fn execute(args: ConfigArgs, custom_config: Option<&str>) -> Result<()> {
    let config = LinkerConfig::load(custom_config, None::<&()>)?;

    match args.command {
        ConfigCommand::Show { format } => {
            let output = config.settings()?.export(format)?;
            println!("{}", output.trim_end());
        }
        ConfigCommand::Get { key } => match config.get_section(&key)? {
            serde_json::Value::String(value) => println!("{value}"),
            value @ (serde_json::Value::Object(_) | serde_json::Value::Array(_)) => {
                println!("{}", serde_json::to_string_pretty(&value)?)
            }
            value => println!("{value}"),
        },
    }

    Ok(())
}
