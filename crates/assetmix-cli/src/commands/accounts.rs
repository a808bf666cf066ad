//! Accounts command implementation.
//!
//! Lists the distinct accounts in the holdings file.

use anyhow::Result;
use assetmix_core::list_accounts;

use super::RunContext;
use crate::cli::OutputFormat;
use crate::output::{account_rows, render_csv, render_json, Console};

/// Executes the accounts command.
pub fn execute(ctx: &RunContext, console: &mut Console) -> Result<()> {
    let holdings = ctx.holdings()?;
    let rows = account_rows(&list_accounts(&holdings), &ctx.config);

    match ctx.format {
        OutputFormat::Table => {
            console.header("Available Accounts");
            console.table(&rows);
            print_usage_hint(console);
        }
        OutputFormat::Json => console.block(&render_json(&rows)?),
        OutputFormat::Csv => console.block(&render_csv(&rows)?),
    }

    Ok(())
}

/// Prints how to restrict a run to one account.
pub fn print_usage_hint(console: &mut Console) {
    console.info("To analyze a specific account, use:");
    console.info("Example: assetmix --account \"*1234\"");
}
