//! Filter engine: derives the visible subset from a [`FilterSelection`].

use std::cmp::Ordering;

use crate::selection::FilterSelection;
use crate::transaction::Transaction;

/// Apply the selection in fixed order: year, month, merchant, category.
///
/// Returns an order-preserving subsequence of the input. Undated records
/// never match an active year or month filter.
pub fn filter_transactions<'a, I>(txns: I, sel: &FilterSelection) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    txns.into_iter()
        .filter(|t| sel.year.admits(t.year().as_ref()))
        .filter(|t| sel.month.admits(t.month0().as_ref()))
        .filter(|t| sel.merchant.admits(Some(&t.merchant)))
        .filter(|t| sel.category.admits(Some(&t.category)))
        .collect()
}

/// Keep only settled positive charges, the basis for every spend figure.
pub fn cleared<'a, I>(txns: I) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    txns.into_iter().filter(|t| t.is_cleared_spend()).collect()
}

/// Newest first; undated records go last and keep their relative order.
pub fn sort_by_date_desc<'a, I>(txns: I) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut out: Vec<&Transaction> = txns.into_iter().collect();
    out.sort_by(|a, b| match (a.date, b.date) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(y: i32, m: u32, d: u32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(12, 0, 0)
    }

    fn tx(id: &str, date: Option<NaiveDateTime>, merchant: &str, category: &str) -> Transaction {
        Transaction {
            transaction_id: id.to_string(),
            date,
            status: "Cleared".to_string(),
            merchant: merchant.to_string(),
            category: category.to_string(),
            charged_amount_usd: 10.0,
            ..Default::default()
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx("a", at(2024, 3, 15), "Acme", "Travel"),
            tx("b", at(2024, 4, 2), "Beta", "Meals"),
            tx("c", None, "Acme", "Travel"),
            tx("d", at(2023, 3, 9), "Acme", "Meals"),
            tx("e", at(2024, 3, 20), "Gamma", "Travel"),
        ]
    }

    fn ids(txns: &[&Transaction]) -> Vec<String> {
        txns.iter().map(|t| t.transaction_id.clone()).collect()
    }

    #[test]
    fn test_no_filter_keeps_everything_in_order() {
        let all = sample();
        let out = filter_transactions(&all, &FilterSelection::new());
        assert_eq!(ids(&out), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_year_and_month_exclude_undated() {
        let all = sample();
        let sel = FilterSelection::new().with_year(2024).with_month(2);
        assert_eq!(ids(&filter_transactions(&all, &sel)), vec!["a", "e"]);

        let sel = FilterSelection::new().with_year(2024);
        assert_eq!(ids(&filter_transactions(&all, &sel)), vec!["a", "b", "e"]);
    }

    #[test]
    fn test_month_without_year_spans_years() {
        let all = sample();
        let sel = FilterSelection::new().with_month(2);
        assert_eq!(ids(&filter_transactions(&all, &sel)), vec!["a", "d", "e"]);
    }

    #[test]
    fn test_merchant_and_category() {
        let all = sample();
        let sel = FilterSelection::new()
            .with_merchant("Acme")
            .with_category("Travel");
        assert_eq!(ids(&filter_transactions(&all, &sel)), vec!["a", "c"]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let all = sample();
        let sel = FilterSelection::new().with_year(2024).with_category("Travel");
        let once = filter_transactions(&all, &sel);
        let twice = filter_transactions(once.iter().copied(), &sel);
        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn test_cleared_drops_refunds_and_pending() {
        let mut all = sample();
        all[1].charged_amount_usd = -10.0;
        all[3].status = "Pending".to_string();
        assert_eq!(ids(&cleared(&all)), vec!["a", "c", "e"]);
    }

    #[test]
    fn test_sort_desc_with_undated_last() {
        let mut all = sample();
        all.push(tx("f", None, "Zed", "Misc"));
        let sorted = sort_by_date_desc(&all);
        assert_eq!(ids(&sorted), vec!["b", "e", "a", "d", "c", "f"]);
    }
}
