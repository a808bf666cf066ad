//! Output formatting utilities.
//!
//! Console text goes through [`Console`], which prints each line and keeps a
//! plain-text copy for the run history.

use assetmix_core::{
    percentage_of, AccountSummary, AggregationResult, AllocationAnalysis, AssetClass, Rollup,
};
use colored::Colorize;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::config::AppConfig;

/// Prints console output and records it for the history log.
#[derive(Debug, Default)]
pub struct Console {
    quiet: bool,
    transcript: Vec<String>,
}

impl Console {
    /// Creates a console. A quiet console drops banners and hints.
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            transcript: Vec::new(),
        }
    }

    /// Prints a section header.
    pub fn header(&mut self, title: &str) {
        println!("\n{}", title.bold().underline());
        self.transcript.push(String::new());
        self.transcript.push(title.to_string());
    }

    /// Prints a line.
    pub fn line(&mut self, text: impl Into<String>) {
        let text = text.into();
        println!("{text}");
        self.transcript.push(text);
    }

    /// Prints an informational line unless quiet.
    pub fn info(&mut self, text: &str) {
        if self.quiet {
            return;
        }
        println!("{}", text.cyan());
        self.transcript.push(text.to_string());
    }

    /// Prints a warning line.
    pub fn warning(&mut self, text: &str) {
        eprintln!("{} {}", "⚠".yellow(), text.yellow());
        self.transcript.push(format!("Warning: {text}"));
    }

    /// Prints a multi-line block such as JSON or CSV output.
    pub fn block(&mut self, text: &str) {
        let text = text.trim_end();
        println!("{text}");
        self.transcript.extend(text.lines().map(str::to_string));
    }

    /// Prints rows as a rounded table.
    pub fn table<T: Tabled>(&mut self, rows: &[T]) {
        if rows.is_empty() {
            self.line("No results.");
            return;
        }
        let rendered = render_table(rows);
        println!("{rendered}");
        self.transcript.extend(rendered.lines().map(str::to_string));
    }

    /// Plain-text lines printed so far.
    #[must_use]
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }
}

/// Renders rows for the terminal: rounded borders, labels left, figures right.
#[must_use]
pub fn render_table<T: Tabled>(rows: &[T]) -> String {
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string()
}

/// Renders any serializable value as pretty JSON.
pub fn render_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// Renders rows as CSV with a header line.
pub fn render_csv<T: Serialize>(rows: &[T]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for row in rows {
        wtr.serialize(row)?;
    }
    let bytes = wtr.into_inner().map_err(|e| anyhow::anyhow!(e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats dollars as `$1,234.56`.
#[must_use]
pub fn format_currency(value: Decimal) -> String {
    let rounded = round_cents(value);
    let text = format!("{:.2}", rounded.abs());
    let (int, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${grouped}.{frac}")
}

/// Formats a percentage already scaled to 0-100 as `60.00%`.
#[must_use]
pub fn format_percent(value: Decimal) -> String {
    format!("{:.2}%", round_cents(value))
}

/// Plain two-decimal rendering used in CSV output.
#[must_use]
pub fn format_plain(value: Decimal) -> String {
    format!("{:.2}", round_cents(value))
}

/// Percentage shown on a TOTAL row.
#[must_use]
pub fn total_percent(grand_total: Decimal) -> String {
    if grand_total.is_zero() {
        format_percent(Decimal::ZERO)
    } else {
        format_percent(Decimal::ONE_HUNDRED)
    }
}

/// One holding in the per-row table, with its dollars in every class.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct HoldingRow {
    /// Ticker.
    #[tabled(rename = "Symbol")]
    pub symbol: String,
    /// Security name.
    #[tabled(rename = "Description")]
    pub description: String,
    /// Account nickname, or the raw identifier.
    #[tabled(rename = "Account")]
    pub account: String,
    #[tabled(rename = "Domestic Stock")]
    pub domestic_stock: String,
    #[tabled(rename = "Foreign Stock")]
    pub foreign_stock: String,
    #[tabled(rename = "Bonds")]
    pub bonds: String,
    #[tabled(rename = "Short_term")]
    pub short_term: String,
    #[tabled(rename = "Unknown")]
    pub unknown: String,
    #[tabled(rename = "Other")]
    pub other: String,
    #[tabled(rename = "Convertibles")]
    pub convertibles: String,
    #[tabled(rename = "Preferred")]
    pub preferred: String,
    /// Dollars across all classes.
    #[tabled(rename = "Total")]
    pub dollars: String,
    /// Share of the grand total.
    #[tabled(rename = "Share")]
    pub share: String,
}

/// One category line of an allocation table.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct AllocationRow {
    /// Asset class or rollup bucket label.
    #[tabled(rename = "Category")]
    pub category: String,
    /// Dollars in the category.
    #[tabled(rename = "Dollars")]
    pub dollars: String,
    /// Percentage of the grand total.
    #[tabled(rename = "Percentage")]
    pub percentage: String,
}

impl AllocationRow {
    fn total(grand_total: Decimal) -> Self {
        Self {
            category: "TOTAL".to_string(),
            dollars: format_currency(grand_total),
            percentage: total_percent(grand_total),
        }
    }
}

/// One account in the available-accounts listing.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct AccountRow {
    /// Raw account identifier.
    #[tabled(rename = "Account")]
    pub account: String,
    /// Configured nickname, blank when none.
    #[tabled(rename = "Nickname")]
    pub nickname: String,
    /// Number of holdings in the account.
    #[tabled(rename = "Holdings")]
    pub holdings: usize,
}

/// One line of CSV output.
#[derive(Debug, Clone, Serialize)]
pub struct CsvRow {
    /// Which of the four views the line belongs to.
    pub view: &'static str,
    /// Asset class or bucket label, or `TOTAL`.
    pub category: String,
    /// Dollars, two decimals.
    pub dollars: String,
    /// Percentage, two decimals.
    pub percentage: String,
}

/// Builds the per-holding table.
#[must_use]
pub fn holding_rows(result: &AggregationResult, config: &AppConfig) -> Vec<HoldingRow> {
    result
        .per_row
        .iter()
        .map(|holding| HoldingRow {
            symbol: holding.symbol.clone(),
            description: holding.description.clone(),
            account: config
                .nickname_for(&holding.account_id)
                .map_or_else(|| holding.account_id.clone(), str::to_string),
            domestic_stock: format_currency(holding.amount(AssetClass::DomesticStock)),
            foreign_stock: format_currency(holding.amount(AssetClass::ForeignStock)),
            bonds: format_currency(holding.amount(AssetClass::Bonds)),
            short_term: format_currency(holding.amount(AssetClass::ShortTerm)),
            unknown: format_currency(holding.amount(AssetClass::Unknown)),
            other: format_currency(holding.amount(AssetClass::Other)),
            convertibles: format_currency(holding.amount(AssetClass::Convertibles)),
            preferred: format_currency(holding.amount(AssetClass::Preferred)),
            dollars: format_currency(holding.total()),
            share: format_percent(percentage_of(holding.total(), result.grand_total)),
        })
        .collect()
}

/// Builds the per-class table with a TOTAL row.
#[must_use]
pub fn allocation_rows(result: &AggregationResult) -> Vec<AllocationRow> {
    let mut rows: Vec<AllocationRow> = result
        .class_totals
        .values()
        .map(|total| AllocationRow {
            category: total.class_name.clone(),
            dollars: format_currency(total.total_amount),
            percentage: format_percent(total.percentage_of_portfolio),
        })
        .collect();
    rows.push(AllocationRow::total(result.grand_total));
    rows
}

/// Builds the three-bucket table with a TOTAL row.
#[must_use]
pub fn rollup_rows(rollup: &Rollup) -> Vec<AllocationRow> {
    let mut rows: Vec<AllocationRow> = rollup
        .iter()
        .map(|(_, total)| AllocationRow {
            category: total.class_name.clone(),
            dollars: format_currency(total.total_amount),
            percentage: format_percent(total.percentage_of_portfolio),
        })
        .collect();
    rows.push(AllocationRow::total(rollup.grand_total));
    rows
}

/// Builds the available-accounts table.
#[must_use]
pub fn account_rows(accounts: &[AccountSummary], config: &AppConfig) -> Vec<AccountRow> {
    accounts
        .iter()
        .map(|summary| AccountRow {
            account: summary.account_id.clone(),
            nickname: config
                .nickname_for(&summary.account_id)
                .unwrap_or_default()
                .to_string(),
            holdings: summary.holding_count,
        })
        .collect()
}

/// Flattens the four views into CSV lines.
#[must_use]
pub fn csv_rows(analysis: &AllocationAnalysis) -> Vec<CsvRow> {
    let mut rows = Vec::new();

    for (view, result) in [
        ("all_holdings", &analysis.all_holdings),
        ("excluding_cash", &analysis.excluding_cash),
    ] {
        rows.extend(result.class_totals.values().map(|total| CsvRow {
            view,
            category: total.class_name.clone(),
            dollars: format_plain(total.total_amount),
            percentage: format_plain(total.percentage_of_portfolio),
        }));
        rows.push(CsvRow::total(view, result.grand_total));
    }

    for (view, rollup) in [
        ("all_holdings_rollup", &analysis.all_holdings_rollup),
        ("excluding_cash_rollup", &analysis.excluding_cash_rollup),
    ] {
        rows.extend(rollup.iter().map(|(_, total)| CsvRow {
            view,
            category: total.class_name.clone(),
            dollars: format_plain(total.total_amount),
            percentage: format_plain(total.percentage_of_portfolio),
        }));
        rows.push(CsvRow::total(view, rollup.grand_total));
    }

    rows
}

impl CsvRow {
    fn total(view: &'static str, grand_total: Decimal) -> Self {
        let percentage = if grand_total.is_zero() {
            Decimal::ZERO
        } else {
            Decimal::ONE_HUNDRED
        };
        Self {
            view,
            category: "TOTAL".to_string(),
            dollars: format_plain(grand_total),
            percentage: format_plain(percentage),
        }
    }
}
