//! Card transaction export parser
//!
//! Expected header (order does not matter, extra columns are ignored):
//!   Date (UTC),Date Cleared (UTC),Status,Cardholder Name,Cardholder Department,
//!   Merchant,Category,Currency,Amount,Exchanged rate,Charged amount (USD),
//!   Card name,Last 4,Receipt name,Group,Notes,Card Transaction ID
//!
//! Normalization is total: bad dates become `None`, bad numbers take their
//! defaults, empty strings take their defaults. No row is ever rejected.

use anyhow::{Context, Result};
use cardspend_core::{
    parse_export_datetime, Transaction, DEFAULT_CATEGORY, DEFAULT_CURRENCY, DEFAULT_MERCHANT,
    DEFAULT_STATUS,
};
use regex::Regex;
use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

use crate::types::{columns, CsvImport, ImportWarning, RawRow};

// Longest leading decimal number, e.g. "12.5" out of "12.5 USD"
static NUMERIC_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?")
        .expect("numeric prefix pattern is valid")
});

fn parse_number(raw: Option<&str>) -> Option<f64> {
    let m = NUMERIC_PREFIX.find(raw?.trim())?;
    m.as_str().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn text(row: &RawRow, column: &str) -> String {
    row.get(column).unwrap_or("").trim().to_string()
}

fn text_or(row: &RawRow, column: &str, default: &str) -> String {
    match row.get(column).map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}

/// Convert one raw row into a [`Transaction`], substituting defaults.
pub fn normalize_row(row: &RawRow) -> Transaction {
    let exchanged_rate = match parse_number(row.get(columns::EXCHANGED_RATE)) {
        // A zero rate is as useless as a missing one
        Some(r) if r != 0.0 => r,
        _ => 1.0,
    };

    Transaction {
        date: row.get(columns::DATE).and_then(parse_export_datetime),
        date_cleared: row.get(columns::DATE_CLEARED).and_then(parse_export_datetime),
        status: text_or(row, columns::STATUS, DEFAULT_STATUS),
        cardholder_name: text(row, columns::CARDHOLDER_NAME),
        cardholder_department: text(row, columns::CARDHOLDER_DEPARTMENT),
        merchant: text_or(row, columns::MERCHANT, DEFAULT_MERCHANT),
        category: text_or(row, columns::CATEGORY, DEFAULT_CATEGORY),
        currency: text_or(row, columns::CURRENCY, DEFAULT_CURRENCY),
        amount: parse_number(row.get(columns::AMOUNT)).unwrap_or(0.0),
        exchanged_rate,
        charged_amount_usd: parse_number(row.get(columns::CHARGED_AMOUNT_USD)).unwrap_or(0.0),
        card_name: text(row, columns::CARD_NAME),
        last4: text(row, columns::LAST4),
        receipt_name: text(row, columns::RECEIPT_NAME),
        group: text(row, columns::GROUP),
        notes: text(row, columns::NOTES),
        transaction_id: text(row, columns::TRANSACTION_ID),
    }
}

/// Normalize every row, preserving order.
pub fn parse_rows(rows: &[RawRow]) -> Vec<Transaction> {
    rows.iter().map(normalize_row).collect()
}

/// Read an export from any reader.
///
/// Only I/O failures are errors. Ragged rows and invalid UTF-8 are reported
/// as warnings and the affected rows are still imported.
pub fn parse_csv_reader<R: Read>(reader: R) -> Result<CsvImport> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .byte_headers()
        .context("reading CSV header")?
        .iter()
        .map(|h| String::from_utf8_lossy(h).trim().to_string())
        .collect();

    let mut out = CsvImport::default();
    if headers.iter().all(|h| h.is_empty()) {
        tracing::warn!("CSV export has no header row");
        return Ok(out);
    }

    for result in rdr.byte_records() {
        let record = result.context("reading CSV record")?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() < headers.len() {
            out.warnings.push(ImportWarning::TooFewFields {
                line,
                expected: headers.len(),
                found: record.len(),
            });
        } else if record.len() > headers.len() {
            out.warnings.push(ImportWarning::TooManyFields {
                line,
                expected: headers.len(),
                found: record.len(),
            });
        }

        let mut row = RawRow::new();
        let mut lossy = false;
        for (header, field) in headers.iter().zip(record.iter()) {
            let value = match std::str::from_utf8(field) {
                Ok(s) => s.to_string(),
                Err(_) => {
                    lossy = true;
                    String::from_utf8_lossy(field).into_owned()
                }
            };
            row.insert(header, value);
        }
        if lossy {
            out.warnings.push(ImportWarning::InvalidUtf8 { line });
        }

        out.transactions.push(normalize_row(&row));
    }

    for w in &out.warnings {
        tracing::warn!("CSV parsing warning: {w}");
    }
    tracing::debug!(
        rows = out.transactions.len(),
        warnings = out.warnings.len(),
        "parsed card export"
    );

    Ok(out)
}

/// Read an export held in memory.
pub fn parse_csv_str(text: &str) -> Result<CsvImport> {
    parse_csv_reader(text.as_bytes())
}

/// Read an export from disk.
pub fn parse_csv_path(path: impl AsRef<Path>) -> Result<CsvImport> {
    let path = path.as_ref();
    let file =
        std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    parse_csv_reader(file).with_context(|| format!("parsing {}", path.display()))
}
