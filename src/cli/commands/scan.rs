use anyhow::Result;
use clap::Args;
use std::time::Instant;

use crate::cli::args::{open_session, OutputFormat, SessionArgs};
use crate::cli::output::Output;
use crate::cli::report;

#[derive(Args)]
pub struct ScanArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Scan without writing anything
pub fn execute(args: ScanArgs, verbose: u8, quiet: bool, config: Option<&str>) -> Result<()> {
    let output = Output::new(verbose > 0, quiet);
    let mut ctx = open_session(&args.session, config)?;

    let start = Instant::now();
    ctx.session.scan(&ctx.store)?;
    output.verbose(&format!("Scan finished in {:?}", start.elapsed()));

    match args.format {
        OutputFormat::Json => report::print_session_json(&ctx.session),
        OutputFormat::Text => {
            report::print_review(&ctx.session, &output, verbose > 0);
            if ctx.session.total_matched() == 0 {
                output.blank_line();
                output.warning("No documents matched the selected vehicles");
            }
            Ok(())
        }
    }
}
