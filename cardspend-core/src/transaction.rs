//! Card transaction record as produced by the export normalizer

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::time::month_key;

pub const DEFAULT_STATUS: &str = "Unknown";
pub const DEFAULT_MERCHANT: &str = "Unknown";
pub const DEFAULT_CATEGORY: &str = "Uncategorized";
pub const DEFAULT_CURRENCY: &str = "USD";

/// Status value that marks a settled charge
pub const STATUS_CLEARED: &str = "Cleared";

/// A single card transaction, immutable once imported
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Local timestamp of the charge, `None` when the export had no usable date
    pub date: Option<NaiveDateTime>,
    pub date_cleared: Option<NaiveDateTime>,
    pub status: String,
    pub cardholder_name: String,
    pub cardholder_department: String,
    pub merchant: String,
    pub category: String,
    /// Original currency of `amount`
    pub currency: String,
    pub amount: f64,
    pub exchanged_rate: f64,
    /// Settled amount in USD; the only figure used for spend totals
    pub charged_amount_usd: f64,
    pub card_name: String,
    pub last4: String,
    pub receipt_name: String,
    pub group: String,
    pub notes: String,
    pub transaction_id: String,
}

impl Default for Transaction {
    fn default() -> Self {
        Self {
            date: None,
            date_cleared: None,
            status: DEFAULT_STATUS.to_string(),
            cardholder_name: String::new(),
            cardholder_department: String::new(),
            merchant: DEFAULT_MERCHANT.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            amount: 0.0,
            exchanged_rate: 1.0,
            charged_amount_usd: 0.0,
            card_name: String::new(),
            last4: String::new(),
            receipt_name: String::new(),
            group: String::new(),
            notes: String::new(),
            transaction_id: String::new(),
        }
    }
}

impl Transaction {
    /// Calendar year of the charge date
    pub fn year(&self) -> Option<i32> {
        self.date.map(|d| d.year())
    }

    /// 0-based calendar month of the charge date (January = 0)
    pub fn month0(&self) -> Option<u32> {
        self.date.map(|d| d.month0())
    }

    /// Grouping key `YYYY-MM`, or `"Unknown"` for undated records
    pub fn month_key(&self) -> String {
        month_key(self.date)
    }

    /// Returns true if this transaction counts toward spend totals.
    ///
    /// Refunds, pending and voided charges never do.
    pub fn is_cleared_spend(&self) -> bool {
        self.status == STATUS_CLEARED && self.charged_amount_usd > 0.0
    }
}
