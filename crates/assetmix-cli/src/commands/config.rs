//! Config command implementation.
//!
//! Shows the configuration a run would use.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use super::RunContext;
use crate::cli::OutputFormat;
use crate::output::{render_csv, render_json, Console};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the resolved configuration
    Show,

    /// Show which configuration file is in use
    Path,
}

/// A setting and its value for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct Setting {
    #[tabled(rename = "Setting")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl Setting {
    fn new(key: &str, value: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            value: value.into(),
        }
    }
}

/// Executes the config command.
pub fn execute(args: &ConfigArgs, ctx: &RunContext, console: &mut Console) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show(ctx, console),
        ConfigCommand::Path => {
            console.line(source_label(ctx));
            Ok(())
        }
    }
}

fn source_label(ctx: &RunContext) -> String {
    ctx.config_path
        .as_ref()
        .map_or_else(|| "(defaults)".to_string(), |p| p.display().to_string())
}

fn show(ctx: &RunContext, console: &mut Console) -> Result<()> {
    let config = &ctx.config;

    match ctx.format {
        OutputFormat::Json => {
            console.block(&render_json(config)?);
            return Ok(());
        }
        OutputFormat::Csv => {
            console.block(&render_csv(&settings(ctx))?);
            return Ok(());
        }
        OutputFormat::Table => {}
    }

    console.header("Configuration");
    console.table(&settings(ctx));

    if !config.account_nicknames.is_empty() {
        console.header("Account Nicknames");
        let rows: Vec<Setting> = config
            .account_nicknames
            .iter()
            .map(|(account, nickname)| Setting::new(account, nickname.clone()))
            .collect();
        console.table(&rows);
    }

    Ok(())
}

fn settings(ctx: &RunContext) -> Vec<Setting> {
    let config = &ctx.config;
    let holdings = config
        .holdings_path(ctx.input.as_deref())
        .map_or_else(|_| "(not set)".to_string(), |p| p.display().to_string());
    let cash = if config.cash_symbols.is_empty() {
        "(none)".to_string()
    } else {
        config.cash_symbols.join(", ")
    };

    vec![
        Setting::new("source", source_label(ctx)),
        Setting::new("holdings_file", holdings),
        Setting::new("cash_symbols", cash),
        Setting::new("account_match", config.account_match.name()),
        Setting::new(
            "nicknames_file",
            config
                .nicknames_file
                .as_ref()
                .map_or_else(|| "(none)".to_string(), |p| p.display().to_string()),
        ),
        Setting::new("history_path", config.history_path.display().to_string()),
    ]
}
