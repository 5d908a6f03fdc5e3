//! cardspend-ingest: card export CSV reading and record normalization.

pub mod parsers;
pub mod types;

pub use parsers::card_export::{
    normalize_row, parse_csv_path, parse_csv_reader, parse_csv_str, parse_rows,
};
pub use types::{columns, CsvImport, ImportWarning, RawRow};
