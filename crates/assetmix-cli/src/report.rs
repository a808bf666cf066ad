//! Markdown report document.
//!
//! One section per view, separated by horizontal rules so each prints as its
//! own page. Figures come straight from the [`AllocationAnalysis`].

use std::fmt::Write as _;
use std::path::Path;

use assetmix_core::AllocationAnalysis;
use chrono::NaiveDateTime;
use tabled::{settings::Style, Table, Tabled};
use tracing::info;

use crate::config::AppConfig;
use crate::error::CliResult;
use crate::output::{allocation_rows, holding_rows, rollup_rows};

const PAGE_BREAK: &str = "\n---\n\n";

/// Markdown report generator.
pub struct MarkdownReport<'a> {
    analysis: &'a AllocationAnalysis,
    config: &'a AppConfig,
}

impl<'a> MarkdownReport<'a> {
    /// Creates a report over one analysis run.
    pub fn new(analysis: &'a AllocationAnalysis, config: &'a AppConfig) -> Self {
        Self { analysis, config }
    }

    /// Renders the document.
    #[must_use]
    pub fn generate(&self, generated_at: NaiveDateTime) -> String {
        let analysis = self.analysis;
        let scope = match analysis.account_selector.as_deref() {
            Some(selector) => match self.config.nickname_for(selector) {
                Some(nickname) => format!("Account {selector} ({nickname})"),
                None => format!("Account {selector}"),
            },
            None => "All accounts".to_string(),
        };

        let mut report = format!(
            "# Asset Allocation Report\n\n\
- Scope: {scope}\n\
- Generated: {}\n\
- Holdings: {}\n",
            generated_at.format("%Y-%m-%d %H:%M:%S"),
            analysis.all_holdings.holding_count(),
        );

        let pages = [
            (
                "Asset Allocation Summary",
                markdown_table(&holding_rows(&analysis.all_holdings, self.config)),
            ),
            (
                "Detailed Allocation Summary",
                markdown_table(&allocation_rows(&analysis.all_holdings)),
            ),
            (
                "Detailed Allocation Minus Cash",
                markdown_table(&allocation_rows(&analysis.excluding_cash)),
            ),
            (
                "Stock / Cash / Other",
                markdown_table(&rollup_rows(&analysis.all_holdings_rollup)),
            ),
            (
                "Stock / Cash / Other Minus Cash",
                markdown_table(&rollup_rows(&analysis.excluding_cash_rollup)),
            ),
        ];

        for (title, table) in pages {
            report.push_str(PAGE_BREAK);
            let _ = writeln!(report, "## {title}\n");
            report.push_str(&table);
            report.push('\n');
        }

        let excluded = &analysis.excluding_cash.excluded_symbols;
        if !excluded.is_empty() {
            let _ = writeln!(report, "\nExcluded as cash: {}", excluded.join(", "));
        }

        report
    }

    /// Renders the document and writes it to `path`.
    pub fn write(&self, path: &Path, generated_at: NaiveDateTime) -> CliResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.generate(generated_at))?;
        info!(path = %path.display(), "wrote report");
        Ok(())
    }
}

fn markdown_table<T: Tabled>(rows: &[T]) -> String {
    if rows.is_empty() {
        return "_No holdings._\n".to_string();
    }
    let mut table = Table::new(rows).with(Style::markdown()).to_string();
    table.push('\n');
    table
}
