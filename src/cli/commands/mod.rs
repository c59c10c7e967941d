use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod config;
pub mod link;
pub mod preview;
pub mod scan;
pub mod version;

#[derive(Parser)]
#[command(
    name = "fleet-doclink",
    version = env!("CARGO_PKG_VERSION"),
    about = "Link fleet documents to vehicles by the identifier in their filenames",
    long_about = "fleet-doclink scans a document store, matches each filename's leading token \
                  against a vehicle attribute and writes the document-to-vehicle links \
                  after review."
)]
pub struct Cli {
    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use custom configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan documents and show which vehicle each one would link to
    Scan(scan::ScanArgs),
    /// Scan, review and write document-to-vehicle links
    Link(link::LinkArgs),
    /// Quick look at documents whose filename token equals a vehicle short id
    Preview(preview::PreviewArgs),
    /// Configuration management
    Config(config::ConfigArgs),
    /// Show version information
    Version(version::VersionArgs),
}

impl Cli {
    pub fn run(self) -> Result<()> {
        setup_logging(self.verbose, self.quiet);

        let config_path = self.config.as_deref();
        match self.command {
            Commands::Scan(args) => scan::execute(args, self.verbose, self.quiet, config_path),
            Commands::Link(args) => link::execute(args, self.verbose, self.quiet, config_path),
            Commands::Preview(args) => preview::execute(args, self.quiet, config_path),
            Commands::Config(args) => config::execute(args, config_path),
            Commands::Version(args) => version::execute(args),
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            match verbose {
                0 => tracing_subscriber::EnvFilter::new("warn"),
                1 => tracing_subscriber::EnvFilter::new("info,globset=warn"),
                2 => tracing_subscriber::EnvFilter::new("debug,globset=warn"),
                _ => tracing_subscriber::EnvFilter::new("trace"),
            }
        });

    // stdout is reserved for reports
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
