use cardspend_core::Transaction;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Column headers of the card transaction export
pub mod columns {
    pub const DATE: &str = "Date (UTC)";
    pub const DATE_CLEARED: &str = "Date Cleared (UTC)";
    pub const STATUS: &str = "Status";
    pub const CARDHOLDER_NAME: &str = "Cardholder Name";
    pub const CARDHOLDER_DEPARTMENT: &str = "Cardholder Department";
    pub const MERCHANT: &str = "Merchant";
    pub const CATEGORY: &str = "Category";
    pub const CURRENCY: &str = "Currency";
    pub const AMOUNT: &str = "Amount";
    pub const EXCHANGED_RATE: &str = "Exchanged rate";
    pub const CHARGED_AMOUNT_USD: &str = "Charged amount (USD)";
    pub const CARD_NAME: &str = "Card name";
    pub const LAST4: &str = "Last 4";
    pub const RECEIPT_NAME: &str = "Receipt name";
    pub const GROUP: &str = "Group";
    pub const NOTES: &str = "Notes";
    pub const TRANSACTION_ID: &str = "Card Transaction ID";
}

/// One CSV row keyed by (trimmed) header name, in header order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    fields: Vec<(String, String)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field. The header is trimmed; the first occurrence of a header wins.
    pub fn insert(&mut self, header: &str, value: impl Into<String>) {
        let header = header.trim();
        if self.fields.iter().any(|(k, _)| k == header) {
            return;
        }
        self.fields.push((header.to_string(), value.into()));
    }

    /// Look up a column by exact trimmed name, falling back to the first
    /// case-insensitive match in header order
    pub fn get(&self, column: &str) -> Option<&str> {
        let column = column.trim();
        self.fields
            .iter()
            .find(|(k, _)| k == column)
            .or_else(|| self.fields.iter().find(|(k, _)| k.eq_ignore_ascii_case(column)))
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (k, v) in iter {
            row.insert(k.as_ref(), v);
        }
        row
    }
}

/// Structural problem found while reading an export. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImportWarning {
    /// Row has fewer fields than the header; missing columns take defaults
    TooFewFields { line: u64, expected: usize, found: usize },
    /// Row has more fields than the header; extras are ignored
    TooManyFields { line: u64, expected: usize, found: usize },
    /// Row contained bytes that are not UTF-8; they were replaced
    InvalidUtf8 { line: u64 },
}

impl fmt::Display for ImportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportWarning::TooFewFields { line, expected, found } => write!(
                f,
                "line {line}: too few fields (expected {expected}, found {found})"
            ),
            ImportWarning::TooManyFields { line, expected, found } => write!(
                f,
                "line {line}: too many fields (expected {expected}, found {found})"
            ),
            ImportWarning::InvalidUtf8 { line } => {
                write!(f, "line {line}: invalid UTF-8 replaced")
            }
        }
    }
}

/// Result of reading one export
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvImport {
    pub transactions: Vec<Transaction>,
    pub warnings: Vec<ImportWarning>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_row_trims_headers() {
        let row: RawRow = [("  Merchant ", "Acme")].into_iter().collect();
        assert_eq!(row.get(columns::MERCHANT), Some("Acme"));
    }

    #[test]
    fn test_raw_row_case_insensitive_fallback() {
        let row: RawRow = [("STATUS", "Cleared")].into_iter().collect();
        assert_eq!(row.get(columns::STATUS), Some("Cleared"));
        assert_eq!(row.get(columns::NOTES), None);
    }

    #[test]
    fn test_raw_row_first_header_wins() {
        let row: RawRow = [("Notes", "first"), ("Notes", "second")]
            .into_iter()
            .collect();
        assert_eq!(row.get("Notes"), Some("first"));
        assert_eq!(row.len(), 1);
    }

    #[test]
    fn test_warning_display() {
        let w = ImportWarning::TooFewFields {
            line: 4,
            expected: 17,
            found: 3,
        };
        assert_eq!(w.to_string(), "line 4: too few fields (expected 17, found 3)");
    }

    #[test]
    fn test_case_insensitive_lookup_takes_first_header() {
        for _ in 0..32 {
            let row: RawRow = [("merchant", "first"), ("MERCHANT", "second")]
                .into_iter()
                .collect();
            assert_eq!(row.get(columns::MERCHANT), Some("first"));
        }
        let exact: RawRow = [("merchant", "lower"), ("Merchant", "exact")]
            .into_iter()
            .collect();
        assert_eq!(exact.get(columns::MERCHANT), Some("exact"));
    }
}
