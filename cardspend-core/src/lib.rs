//! cardspend-core: transaction model, filter selections, store and filter engine

pub mod filter;
pub mod format;
pub mod selection;
pub mod store;
pub mod time;
pub mod transaction;

pub use filter::{cleared, filter_transactions, sort_by_date_desc};
pub use format::{format_currency, format_date, format_month_label, month_name, MONTH_NAMES};
pub use selection::{FilterSelection, Selection, ALL};
pub use store::{locale_cmp, FilterOptions, TransactionStore};
pub use time::{month_key, parse_export_datetime, UNKNOWN_MONTH};
pub use transaction::{
    Transaction, DEFAULT_CATEGORY, DEFAULT_CURRENCY, DEFAULT_MERCHANT, DEFAULT_STATUS,
    STATUS_CLEARED,
};
