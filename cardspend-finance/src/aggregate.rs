//! Aggregation engine: spend totals, monthly series and breakdowns.
//!
//! Monetary figures are computed over cleared spend only (see
//! [`Transaction::is_cleared_spend`]); status counts use the filtered set.

use cardspend_core::{format_month_label, Transaction};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::ops::AddAssign;

/// Merchants given their own line in the monthly series
pub const MONTHLY_TOP_MERCHANTS: usize = 8;
/// Merchants listed in the merchant breakdown
pub const TOP_MERCHANTS: usize = 10;
/// Series name for spend outside the top merchants
pub const OTHERS: &str = "Others";
/// Placeholder when there is no category to report
pub const NO_CATEGORY: &str = "N/A";

/// Running values keyed by label, remembering first-seen order
#[derive(Debug, Clone)]
pub(crate) struct Tally<V> {
    index: HashMap<String, usize>,
    entries: Vec<(String, V)>,
}

impl<V> Default for Tally<V> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<V: Copy + Default + AddAssign> Tally<V> {
    pub(crate) fn add(&mut self, key: &str, value: V) {
        match self.index.get(key) {
            Some(&i) => self.entries[i].1 += value,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), value));
            }
        }
    }

    pub(crate) fn get(&self, key: &str) -> Option<V> {
        self.index.get(key).map(|&i| self.entries[i].1)
    }

    pub(crate) fn into_entries(self) -> Vec<(String, V)> {
        self.entries
    }
}

/// Sum `charged_amount_usd` per key, in first-seen order
pub(crate) fn sum_by<'a, F>(txns: &[&'a Transaction], key: F) -> Tally<f64>
where
    F: Fn(&'a Transaction) -> &'a str,
{
    let mut tally = Tally::default();
    for &t in txns {
        tally.add(key(t), t.charged_amount_usd);
    }
    tally
}

/// Sort descending by value. Stable, so equal values keep first-seen order.
pub(crate) fn ranked(mut entries: Vec<(String, f64)>) -> Vec<(String, f64)> {
    entries.sort_by(|a, b| b.1.total_cmp(&a.1));
    entries
}

/// Headline numbers for cleared spend
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    pub total_spent: f64,
    pub transaction_count: usize,
    pub average_transaction: f64,
}

pub fn totals(cleared: &[&Transaction]) -> Totals {
    let total_spent = cleared.iter().fold(0.0, |acc, t| acc + t.charged_amount_usd);
    let transaction_count = cleared.len();
    let average_transaction = if transaction_count > 0 {
        total_spent / transaction_count as f64
    } else {
        0.0
    };
    Totals {
        total_spent,
        transaction_count,
        average_transaction,
    }
}

/// Parallel label/value lists, largest first
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Breakdown {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl Breakdown {
    fn from_entries(entries: impl IntoIterator<Item = (String, f64)>) -> Self {
        let (labels, values) = entries.into_iter().unzip();
        Self { labels, values }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// Spend per category, largest first
pub fn category_breakdown(cleared: &[&Transaction]) -> Breakdown {
    let tally = sum_by(cleared, |t| t.category.as_str());
    Breakdown::from_entries(ranked(tally.into_entries()))
}

/// Largest category, or `"N/A"` when there is no spend
pub fn top_category(categories: &Breakdown) -> &str {
    categories
        .labels
        .first()
        .map(String::as_str)
        .unwrap_or(NO_CATEGORY)
}

/// Spend per merchant, the top ten only
pub fn merchant_breakdown(cleared: &[&Transaction]) -> Breakdown {
    let tally = sum_by(cleared, |t| t.merchant.as_str());
    Breakdown::from_entries(ranked(tally.into_entries()).into_iter().take(TOP_MERCHANTS))
}

/// Record count per status in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusCounts {
    pub labels: Vec<String>,
    pub values: Vec<usize>,
}

pub fn status_breakdown(filtered: &[&Transaction]) -> StatusCounts {
    let mut tally: Tally<usize> = Tally::default();
    for t in filtered {
        tally.add(&t.status, 1);
    }
    let (labels, values) = tally.into_entries().into_iter().unzip();
    StatusCounts { labels, values }
}

/// One stacked series of the monthly chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MerchantSeries {
    pub merchant: String,
    /// One value per month, aligned with [`MonthlySeries::keys`]
    pub values: Vec<f64>,
}

/// Monthly spend with a per-merchant split
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonthlySeries {
    /// `YYYY-MM` keys in chronological order, `Unknown` last
    pub keys: Vec<String>,
    /// Display labels like `Mar 2024`
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub counts: Vec<usize>,
    /// Top merchants overall, then `Others` if any month has spend outside them
    pub merchant_breakdown: Vec<MerchantSeries>,
}

#[derive(Debug, Default)]
struct MonthBucket {
    total: f64,
    count: usize,
    merchants: Tally<f64>,
}

impl MonthBucket {
    fn merchant_total(&self, merchant: &str) -> f64 {
        self.merchants.get(merchant).unwrap_or(0.0)
    }
}

pub fn monthly_series(cleared: &[&Transaction]) -> MonthlySeries {
    // YYYY-MM sorts chronologically as text
    let mut months: BTreeMap<String, MonthBucket> = BTreeMap::new();
    for t in cleared {
        let bucket = months.entry(t.month_key()).or_default();
        bucket.total += t.charged_amount_usd;
        bucket.count += 1;
        bucket.merchants.add(&t.merchant, t.charged_amount_usd);
    }

    let top: Vec<String> = ranked(sum_by(cleared, |t| t.merchant.as_str()).into_entries())
        .into_iter()
        .take(MONTHLY_TOP_MERCHANTS)
        .map(|(merchant, _)| merchant)
        .collect();

    let mut merchant_breakdown: Vec<MerchantSeries> = top
        .iter()
        .map(|merchant| MerchantSeries {
            merchant: merchant.clone(),
            values: months.values().map(|b| b.merchant_total(merchant)).collect(),
        })
        .collect();

    // Summed from the remaining merchants directly, so a month with no
    // merchant outside the top set is exactly zero
    let named: HashSet<&str> = top.iter().map(String::as_str).collect();
    let others: Vec<f64> = months
        .values()
        .map(|b| {
            b.merchants
                .entries
                .iter()
                .filter(|(m, _)| !named.contains(m.as_str()))
                .fold(0.0_f64, |acc, (_, v)| acc + *v)
        })
        .collect();

    if others.iter().any(|v| *v > 0.0) {
        merchant_breakdown.push(MerchantSeries {
            merchant: OTHERS.to_string(),
            values: others,
        });
    }

    tracing::debug!(
        months = months.len(),
        series = merchant_breakdown.len(),
        "built monthly series"
    );

    MonthlySeries {
        labels: months.keys().map(|k| format_month_label(k)).collect(),
        values: months.values().map(|b| b.total).collect(),
        counts: months.values().map(|b| b.count).collect(),
        keys: months.into_keys().collect(),
        merchant_breakdown,
    }
}
