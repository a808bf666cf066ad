//! Analyze command implementation.
//!
//! Loads holdings, runs the allocation pipeline and prints every view.

use std::path::PathBuf;

use anyhow::Result;
use assetmix_core::{analyze, list_accounts, AllocationAnalysis, Holding};
use chrono::Local;
use clap::Args;
use tracing::info;

use super::accounts::print_usage_hint;
use super::RunContext;
use crate::cli::OutputFormat;
use crate::output::{
    account_rows, allocation_rows, csv_rows, holding_rows, render_csv, render_json, rollup_rows,
    Console,
};
use crate::report::MarkdownReport;

/// Arguments for the analyze command.
#[derive(Args, Debug, Clone, Default)]
pub struct AnalyzeArgs {
    /// Restrict the analysis to one account (e.g. "*1234")
    #[arg(short, long)]
    pub account: Option<String>,

    /// Also write a Markdown report to this path
    #[arg(short, long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

/// Executes the analyze command.
pub fn execute(args: &AnalyzeArgs, ctx: &RunContext, console: &mut Console) -> Result<()> {
    let holdings = ctx.holdings()?;
    let selector = args
        .account
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let analysis = analyze(&holdings, selector, &ctx.config.allocation_config());
    info!(
        account = selector.unwrap_or("all"),
        holdings = analysis.all_holdings.holding_count(),
        "analysis finished"
    );

    match ctx.format {
        OutputFormat::Table => print_tables(&analysis, &holdings, ctx, console),
        OutputFormat::Json => console.block(&render_json(&analysis)?),
        OutputFormat::Csv => console.block(&render_csv(&csv_rows(&analysis))?),
    }

    if let Some(path) = &args.report {
        MarkdownReport::new(&analysis, &ctx.config).write(path, Local::now().naive_local())?;
        // JSON and CSV stdout must stay machine-readable
        if ctx.format == OutputFormat::Table {
            console.info(&format!("Report written to {}", path.display()));
        }
    }

    Ok(())
}

fn print_tables(
    analysis: &AllocationAnalysis,
    holdings: &[Holding],
    ctx: &RunContext,
    console: &mut Console,
) {
    match analysis.account_selector.as_deref() {
        Some(selector) => {
            let banner = match ctx.config.nickname_for(selector) {
                Some(nickname) => format!("Analyzing account: {selector} ({nickname})"),
                None => format!("Analyzing account: {selector}"),
            };
            console.info(&banner);
            if analysis.all_holdings.is_empty() {
                console.warning(&format!("No holdings match account {selector}"));
            }
        }
        None => console.info("Analyzing all accounts"),
    }

    console.header("Asset Allocation Summary");
    console.table(&holding_rows(&analysis.all_holdings, &ctx.config));

    console.header("Detailed Allocation Summary");
    console.table(&allocation_rows(&analysis.all_holdings));

    console.header("Detailed Allocation Minus Cash");
    let excluded = &analysis.excluding_cash.excluded_symbols;
    if !excluded.is_empty() {
        console.info(&format!("Excluding: {}", excluded.join(", ")));
    }
    console.table(&allocation_rows(&analysis.excluding_cash));

    console.header("Stock / Cash / Other");
    console.table(&rollup_rows(&analysis.all_holdings_rollup));

    console.header("Stock / Cash / Other Minus Cash");
    console.table(&rollup_rows(&analysis.excluding_cash_rollup));

    console.header("Available Accounts");
    console.table(&account_rows(&list_accounts(holdings), &ctx.config));
    print_usage_hint(console);
}
