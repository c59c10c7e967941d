use anyhow::{bail, Result};
use clap::Args;

use crate::cli::args::{open_session, OutputFormat, SessionArgs};
use crate::cli::output::Output;
use crate::cli::report;

#[derive(Args)]
pub struct LinkArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Write links without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Run the commit against the loaded data without saving it
    #[arg(long)]
    pub dry_run: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

pub fn execute(args: LinkArgs, verbose: u8, quiet: bool, config: Option<&str>) -> Result<()> {
    let output = Output::new(verbose > 0, quiet);
    let needs_prompt = !args.yes && !args.dry_run;
    if needs_prompt && args.format == OutputFormat::Json {
        bail!("--format json requires --yes or --dry-run");
    }

    let mut ctx = open_session(&args.session, config)?;
    ctx.session.scan(&ctx.store)?;

    if args.format == OutputFormat::Text {
        report::print_review(&ctx.session, &output, verbose > 0);
        output.blank_line();
    }

    if needs_prompt && ctx.session.total_matched() > 0 {
        let question = format!("Link {} document(s)?", ctx.session.total_matched());
        if !output.confirm(&question)? {
            output.info("Link cancelled; nothing was written");
            return Ok(());
        }
    }

    let result = ctx.session.commit(&mut ctx.store)?.clone();

    if args.dry_run {
        tracing::info!("Dry run; {} left unchanged", args.session.selection.data.display());
    } else if result.linked_count > 0 {
        ctx.store.save(&args.session.selection.data)?;
        tracing::info!("Saved links to {}", args.session.selection.data.display());
    }

    match args.format {
        OutputFormat::Json => report::print_session_json(&ctx.session),
        OutputFormat::Text => {
            report::print_result(&result, &output);
            if args.dry_run {
                output.info("Dry run: fleet data was not saved");
            }
            Ok(())
        }
    }
}
