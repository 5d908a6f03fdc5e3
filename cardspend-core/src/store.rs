//! Transaction store: the imported record set plus the active filter selection.

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::filter::{cleared, filter_transactions, sort_by_date_desc};
use crate::selection::{FilterSelection, Selection};
use crate::transaction::Transaction;

/// Option lists for the four filter controls
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOptions {
    /// Distinct years, newest first
    pub years: Vec<i32>,
    /// 0-based months present in the selected year; empty when year is all
    pub months: Vec<u32>,
    pub merchants: Vec<String>,
    pub categories: Vec<String>,
}

/// Owns the imported transactions and the current selection.
///
/// Records are only ever replaced as a whole by [`TransactionStore::replace`].
#[derive(Debug, Clone, Default)]
pub struct TransactionStore {
    records: Vec<Transaction>,
    selection: FilterSelection,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_transactions(records: Vec<Transaction>) -> Self {
        let mut store = Self::new();
        store.replace(records);
        store
    }

    /// Install a freshly imported record set and reset every filter to all.
    ///
    /// The caller hands over a fully built collection, so readers never see
    /// a partial import.
    pub fn replace(&mut self, records: Vec<Transaction>) {
        tracing::info!(
            previous = self.records.len(),
            imported = records.len(),
            "replacing transaction set"
        );
        self.records = records;
        self.reset_filters();
    }

    pub fn reset_filters(&mut self) {
        self.selection = FilterSelection::default();
    }

    pub fn records(&self) -> &[Transaction] {
        &self.records
    }

    pub fn has_data(&self) -> bool {
        !self.records.is_empty()
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn set_selection(&mut self, selection: FilterSelection) {
        self.selection = selection;
    }

    pub fn set_year(&mut self, year: Selection<i32>) {
        self.selection.year = year;
    }

    pub fn set_month(&mut self, month0: Selection<u32>) {
        self.selection.month = month0;
    }

    pub fn set_merchant(&mut self, merchant: Selection<String>) {
        self.selection.merchant = merchant;
    }

    pub fn set_category(&mut self, category: Selection<String>) {
        self.selection.category = category;
    }

    /// Records matching the current selection, in import order
    pub fn filtered(&self) -> Vec<&Transaction> {
        filter_transactions(&self.records, &self.selection)
    }

    /// Cleared spend within the current selection
    pub fn cleared(&self) -> Vec<&Transaction> {
        cleared(self.filtered())
    }

    /// Cleared spend across the whole import, ignoring the selection
    pub fn cleared_unfiltered(&self) -> Vec<&Transaction> {
        cleared(&self.records)
    }

    /// Filtered records for the table view, newest first
    pub fn sorted(&self) -> Vec<&Transaction> {
        sort_by_date_desc(self.filtered())
    }

    pub fn available_years(&self) -> Vec<i32> {
        let years: BTreeSet<i32> = self.records.iter().filter_map(|t| t.year()).collect();
        years.into_iter().rev().collect()
    }

    /// Months present in the selected year. Empty when no year is selected.
    pub fn available_months(&self) -> Vec<u32> {
        let Selection::Only(year) = self.selection.year else {
            return Vec::new();
        };
        let months: BTreeSet<u32> = self
            .records
            .iter()
            .filter(|t| t.year() == Some(year))
            .filter_map(|t| t.month0())
            .collect();
        months.into_iter().collect()
    }

    pub fn available_merchants(&self) -> Vec<String> {
        distinct_sorted(self.records.iter().map(|t| t.merchant.as_str()))
    }

    pub fn available_categories(&self) -> Vec<String> {
        distinct_sorted(self.records.iter().map(|t| t.category.as_str()))
    }

    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            years: self.available_years(),
            months: self.available_months(),
            merchants: self.available_merchants(),
            categories: self.available_categories(),
        }
    }
}

fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let set: HashSet<&str> = values.filter(|v| !v.is_empty()).collect();
    let mut out: Vec<String> = set.into_iter().map(str::to_string).collect();
    out.sort_by(|a, b| locale_cmp(a, b));
    out
}

/// Dictionary order for names.
///
/// Letters compare without accents or case first ("Éclair" sorts between
/// "Eclair" and "Eddie"), then unaccented before accented, then lowercase
/// before uppercase.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| folded(a).cmp(folded(b)))
        .then_with(|| b.cmp(a))
}

fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    folded(s).filter(|c| !is_combining_mark(*c))
}
