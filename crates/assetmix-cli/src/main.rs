//! assetmix - Asset allocation breakdown for brokerage exports.
//!
//! # Usage
//!
//! ```bash
//! # Analyze every account in the configured export
//! assetmix
//!
//! # One account, with a Markdown report
//! assetmix --account "*1234" --report allocation.md
//!
//! # List accounts as JSON
//! assetmix accounts --format json
//!
//! # Show the resolved configuration
//! assetmix config show
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod error;
mod history;
mod loader;
mod output;
mod report;

use cli::{Cli, Commands};
use commands::RunContext;
use history::HistoryLog;
use output::Console;

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = RunContext::load(cli.config.as_deref(), cli.input.clone(), cli.format)?;
    let mut console = Console::new(cli.quiet);

    // Execute command
    let analysis_run = match &cli.command {
        None => {
            commands::analyze::execute(&cli.analyze, &ctx, &mut console)?;
            true
        }
        Some(Commands::Analyze(args)) => {
            commands::analyze::execute(args, &ctx, &mut console)?;
            true
        }
        Some(Commands::Accounts) => {
            commands::accounts::execute(&ctx, &mut console)?;
            false
        }
        Some(Commands::Config(args)) => {
            commands::config::execute(args, &ctx, &mut console)?;
            false
        }
    };

    if analysis_run && !cli.no_history {
        let log = HistoryLog::new(&ctx.config.history_path);
        match log.append(console.transcript()) {
            Ok(()) => debug!(path = %log.path().display(), "appended run history"),
            Err(e) => warn!(path = %log.path().display(), error = %e, "could not write history"),
        }
    }

    Ok(())
}
