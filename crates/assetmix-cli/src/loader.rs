//! Holdings loader for CSV allocation exports.
//!
//! The brokerage export starts with an optional title row, then a header row
//! (`Symbol, Description, Account, Domestic Stock, ...`), then one row per
//! holding, then free-text disclaimer rows. Only the holding rows are kept.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use assetmix_core::{AssetClass, Holding};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{CliError, CliResult};

const SYMBOL: &str = "Symbol";
const DESCRIPTION: &str = "Description";
const ACCOUNT: &str = "Account";

/// Loads holdings from a CSV export.
pub fn load_holdings(path: &Path) -> CliResult<Vec<Holding>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    if matches!(extension.as_deref(), Some("xls" | "xlsx" | "xlsm")) {
        return Err(CliError::UnsupportedFormat {
            path: path.to_path_buf(),
        });
    }

    let file = std::fs::File::open(path)?;
    let holdings = read_holdings(file).map_err(|e| match e {
        CliError::MissingHeader { .. } => CliError::MissingHeader {
            path: path.to_path_buf(),
        },
        other => other,
    })?;

    debug!(path = %path.display(), holdings = holdings.len(), "loaded holdings");
    Ok(holdings)
}

/// Column positions located in the header row.
struct Columns {
    symbol: usize,
    description: usize,
    account: usize,
    classes: Vec<(usize, AssetClass)>,
}

impl Columns {
    fn from_header(header: &csv::StringRecord) -> CliResult<Self> {
        let find = |name: &str| {
            header
                .iter()
                .position(|cell| cell.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| CliError::MissingColumn {
                    column: name.to_string(),
                })
        };

        let symbol = find(SYMBOL)?;
        let description = find(DESCRIPTION)?;
        let account = find(ACCOUNT)?;

        let mut classes = Vec::new();
        for (idx, cell) in header.iter().enumerate() {
            if idx == symbol || idx == description || idx == account || cell.trim().is_empty() {
                continue;
            }
            match AssetClass::from_header(cell) {
                Some(class) => classes.push((idx, class)),
                None => warn!(column = cell.trim(), "ignoring unrecognized column"),
            }
        }

        for class in AssetClass::all() {
            if !classes.iter().any(|(_, c)| c == class) {
                debug!(class = class.label(), "column absent, treating as zero");
            }
        }

        Ok(Self {
            symbol,
            description,
            account,
            classes,
        })
    }
}

/// Reads holdings from any CSV source.
pub fn read_holdings<R: Read>(source: R) -> CliResult<Vec<Holding>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source);

    let mut columns: Option<Columns> = None;
    let mut holdings = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let row = record.position().map_or(idx + 1, |p| p.line() as usize);

        if let Some(cols) = columns.as_ref() {
            if let Some(holding) = parse_row(&record, cols, row)? {
                holdings.push(holding);
            }
        } else if record
            .iter()
            .any(|cell| cell.trim().eq_ignore_ascii_case(SYMBOL))
        {
            columns = Some(Columns::from_header(&record)?);
        }
    }

    if columns.is_none() {
        return Err(CliError::MissingHeader {
            path: Default::default(),
        });
    }

    Ok(holdings)
}

fn parse_row(record: &csv::StringRecord, cols: &Columns, row: usize) -> CliResult<Option<Holding>> {
    let cell = |idx: usize| record.get(idx).map_or("", str::trim);

    let symbol = cell(cols.symbol);
    if symbol.is_empty() {
        return Ok(None);
    }

    let account = cell(cols.account);
    if account.is_empty() && cols.classes.iter().all(|(idx, _)| cell(*idx).is_empty()) {
        debug!(row, "skipping footer row");
        return Ok(None);
    }

    let mut builder = Holding::builder()
        .symbol(symbol)
        .description(cell(cols.description))
        .account(account);

    for (idx, class) in &cols.classes {
        let raw = cell(*idx);
        let amount = parse_amount(raw).ok_or_else(|| CliError::InvalidAmount {
            row,
            column: class.label().to_string(),
            value: raw.to_string(),
        })?;
        builder = builder.allocation(*class, amount);
    }

    builder
        .build()
        .map(Some)
        .map_err(|source| CliError::InvalidHolding { row, source })
}

/// Parses a dollar cell such as `$1,234.56`.
///
/// Blank cells and `--` placeholders are zero. Negative or unparseable text
/// yields `None`.
#[must_use]
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "--" || trimmed == "-" || trimmed.eq_ignore_ascii_case("n/a")
    {
        return Some(Decimal::ZERO);
    }

    let cleaned: String = trimmed
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect();

    let amount = Decimal::from_str(&cleaned).ok()?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return None;
    }
    Some(amount)
}

#[derive(Debug, Deserialize)]
struct NicknameRecord {
    #[serde(rename = "Account", alias = "account")]
    account: String,
    #[serde(rename = "Nickname", alias = "nickname")]
    nickname: String,
}

/// Loads an `Account,Nickname` CSV file.
pub fn load_nicknames(path: &Path) -> CliResult<BTreeMap<String, String>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut nicknames = BTreeMap::new();
    for result in reader.deserialize() {
        let record: NicknameRecord = result?;
        if !record.account.is_empty() {
            nicknames.insert(record.account, record.nickname);
        }
    }
    Ok(nicknames)
}
