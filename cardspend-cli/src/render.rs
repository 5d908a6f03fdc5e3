//! Plain-text rendering of dashboard views.

use cardspend_core::{format_currency, format_date, month_name};
use cardspend_finance::{Breakdown, Dashboard};
use std::fmt::Write;

pub fn summary(d: &Dashboard) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Filters: {}", selection_line(d));
    let _ = writeln!(out, "Total spent:     {}", format_currency(d.totals.total_spent));
    let _ = writeln!(out, "Transactions:    {}", d.totals.transaction_count);
    let _ = writeln!(
        out,
        "Average:         {}",
        format_currency(d.totals.average_transaction)
    );
    let _ = writeln!(out, "Top category:    {}", d.top_category);
    out
}

pub fn monthly(d: &Dashboard) -> String {
    let m = &d.monthly;
    if m.keys.is_empty() {
        return "No cleared spend for these filters.\n".to_string();
    }
    let mut out = String::new();
    for i in 0..m.keys.len() {
        let _ = writeln!(
            out,
            "{:<10} {:>14}  ({} txns)",
            m.labels[i],
            format_currency(m.values[i]),
            m.counts[i]
        );
        for series in &m.merchant_breakdown {
            let v = series.values[i];
            if v != 0.0 {
                let _ = writeln!(out, "    {:<28} {:>14}", series.merchant, format_currency(v));
            }
        }
    }
    out
}

pub fn categories(d: &Dashboard) -> String {
    breakdown(&d.categories, None, usize::MAX)
}

pub fn merchants(d: &Dashboard, limit: usize) -> String {
    breakdown(&d.merchants, Some(d), limit)
}

fn breakdown(b: &Breakdown, colors: Option<&Dashboard>, limit: usize) -> String {
    if b.is_empty() {
        return "No cleared spend for these filters.\n".to_string();
    }
    let mut out = String::new();
    for (label, value) in b.iter().take(limit) {
        match colors {
            Some(d) => {
                let _ = writeln!(
                    out,
                    "{:<30} {:>14}  {}",
                    label,
                    format_currency(value),
                    d.color_for(label)
                );
            }
            None => {
                let _ = writeln!(out, "{:<30} {:>14}", label, format_currency(value));
            }
        }
    }
    out
}

pub fn statuses(d: &Dashboard) -> String {
    let mut out = String::new();
    for (label, count) in d.statuses.labels.iter().zip(&d.statuses.values) {
        let _ = writeln!(out, "{:<16} {:>6}", label, count);
    }
    out
}

pub fn table(d: &Dashboard, limit: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<13} {:<28} {:<18} {:>12}  {}",
        "Date", "Merchant", "Category", "USD", "Status"
    );
    for t in d.table.iter().take(limit) {
        let _ = writeln!(
            out,
            "{:<13} {:<28} {:<18} {:>12}  {}",
            format_date(t.date),
            t.merchant,
            t.category,
            format_currency(t.charged_amount_usd),
            t.status
        );
    }
    if d.table.len() > limit {
        let _ = writeln!(out, "... {} more", d.table.len() - limit);
    }
    out
}

pub fn filters(d: &Dashboard) -> String {
    let o = &d.options;
    let years: Vec<String> = o.years.iter().map(|y| y.to_string()).collect();
    let months: Vec<&str> = o.months.iter().map(|&m| month_name(m)).collect();
    let mut out = String::new();
    let _ = writeln!(out, "Years:      {}", list_or_dash(&years));
    let _ = writeln!(out, "Months:     {}", list_or_dash(&months));
    let _ = writeln!(out, "Merchants:  {}", list_or_dash(&o.merchants));
    let _ = writeln!(out, "Categories: {}", list_or_dash(&o.categories));
    out
}

pub fn dashboard(d: &Dashboard, table_limit: usize, merchant_limit: usize) -> String {
    let mut out = summary(d);
    out.push_str("\n## Monthly\n");
    out.push_str(&monthly(d));
    out.push_str("\n## Categories\n");
    out.push_str(&categories(d));
    out.push_str("\n## Merchants\n");
    out.push_str(&merchants(d, merchant_limit));
    out.push_str("\n## Statuses\n");
    out.push_str(&statuses(d));
    out.push_str("\n## Transactions\n");
    out.push_str(&table(d, table_limit));
    out
}

fn selection_line(d: &Dashboard) -> String {
    let s = &d.selection;
    let month = match s.month.value() {
        Some(&m) => month_name(m).to_string(),
        None => s.month.to_string(),
    };
    format!(
        "year={} month={} merchant={} category={}",
        s.year, month, s.merchant, s.category
    )
}

fn list_or_dash<S: AsRef<str>>(items: &[S]) -> String {
    if items.is_empty() {
        return "-".to_string();
    }
    items.iter().map(|s| s.as_ref()).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardspend_core::{Selection, Transaction, TransactionStore};
    use chrono::NaiveDate;

    fn store() -> TransactionStore {
        let at = |m, d| NaiveDate::from_ymd_opt(2024, m, d).unwrap().and_hms_opt(9, 30, 0);
        let tx = |date, status: &str, merchant: &str, category: &str, usd| Transaction {
            date,
            status: status.to_string(),
            merchant: merchant.to_string(),
            category: category.to_string(),
            charged_amount_usd: usd,
            ..Default::default()
        };
        TransactionStore::from_transactions(vec![
            tx(at(1, 5), "Cleared", "Acme", "Office", 1234.5),
            tx(at(2, 9), "Cleared", "Beta", "Travel", 20.0),
            tx(at(2, 10), "Pending", "Beta", "Travel", 5.0),
        ])
    }

    #[test]
    fn test_summary_text() {
        let s = store();
        let d = Dashboard::build(&s);
        let text = summary(&d);
        assert!(text.contains("Total spent:     $1,254.50"));
        assert!(text.contains("Transactions:    2"));
        assert!(text.contains("Top category:    Office"));
        assert!(text.contains("year=all month=all"));
    }

    #[test]
    fn test_selection_shows_month_name() {
        let mut s = store();
        s.set_year(Selection::Only(2024));
        s.set_month(Selection::Only(1));
        let d = Dashboard::build(&s);
        assert!(summary(&d).contains("year=2024 month=Feb"));
    }

    #[test]
    fn test_table_limit_and_order() {
        let s = store();
        let d = Dashboard::build(&s);
        let text = table(&d, 2);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("Feb 10, 2024"));
        assert_eq!(lines[3], "... 1 more");
    }

    #[test]
    fn test_monthly_lists_merchants() {
        let s = store();
        let d = Dashboard::build(&s);
        let text = monthly(&d);
        assert!(text.starts_with("Jan 2024"));
        assert!(text.contains("Acme"));
    }

    #[test]
    fn test_empty_views() {
        let s = TransactionStore::new();
        let d = Dashboard::build(&s);
        assert_eq!(categories(&d), "No cleared spend for these filters.\n");
        assert!(filters(&d).contains("Years:      -"));
    }
}
