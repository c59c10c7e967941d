use anyhow::Result;
use clap::Parser;

use fleet_doclink::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
