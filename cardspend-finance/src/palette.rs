//! Stable merchant colors shared by every chart.
//!
//! Ranks come from the whole import, not the filtered view, so a merchant
//! keeps its color while filters change.

use cardspend_core::Transaction;
use serde::Serialize;
use std::collections::HashMap;

use crate::aggregate::{ranked, sum_by};

pub const PALETTE: [&str; 20] = [
    "#0052ff", // blue
    "#00d395", // green
    "#ff5c00", // orange
    "#9b59b6", // purple
    "#e91e63", // pink
    "#00bcd4", // cyan
    "#ffc107", // amber
    "#8bc34a", // light green
    "#ff6b6b", // coral
    "#3f51b5", // indigo
    "#009688", // teal
    "#ff9800", // deep orange
    "#673ab7", // deep purple
    "#2196f3", // light blue
    "#4caf50", // green
    "#f44336", // red
    "#607d8b", // blue grey
    "#795548", // brown
    "#cddc39", // lime
    "#03a9f4", // sky blue
];

/// Neutral grey for merchants outside the ranked set
pub const FALLBACK_COLOR: &str = "#9ca3af";

/// Merchants that get a palette color
pub const COLORED_MERCHANTS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MerchantColor {
    pub merchant: String,
    pub color: &'static str,
}

/// Merchant to color assignment, in rank order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MerchantColors {
    pub entries: Vec<MerchantColor>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl MerchantColors {
    /// Rank merchants by cleared spend and color the top twenty.
    ///
    /// Pass the cleared subset of the *unfiltered* import.
    pub fn from_cleared(all_cleared: &[&Transaction]) -> Self {
        let entries: Vec<MerchantColor> =
            ranked(sum_by(all_cleared, |t| t.merchant.as_str()).into_entries())
                .into_iter()
                .take(COLORED_MERCHANTS)
                .enumerate()
                .map(|(rank, (merchant, _))| MerchantColor {
                    merchant,
                    color: PALETTE[rank % PALETTE.len()],
                })
                .collect();
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.merchant.clone(), i))
            .collect();
        Self { entries, index }
    }

    pub fn color_for(&self, merchant: &str) -> &'static str {
        self.index
            .get(merchant)
            .map(|&i| self.entries[i].color)
            .unwrap_or(FALLBACK_COLOR)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spend(merchant: &str, usd: f64) -> Transaction {
        Transaction {
            status: "Cleared".to_string(),
            merchant: merchant.to_string(),
            charged_amount_usd: usd,
            ..Default::default()
        }
    }

    #[test]
    fn test_colors_follow_rank() {
        let txns = vec![spend("Small", 1.0), spend("Big", 50.0), spend("Mid", 10.0)];
        let refs: Vec<&Transaction> = txns.iter().collect();
        let colors = MerchantColors::from_cleared(&refs);
        assert_eq!(colors.color_for("Big"), PALETTE[0]);
        assert_eq!(colors.color_for("Mid"), PALETTE[1]);
        assert_eq!(colors.color_for("Small"), PALETTE[2]);
        assert_eq!(colors.color_for("Nobody"), FALLBACK_COLOR);
    }

    #[test]
    fn test_only_top_twenty_colored() {
        let txns: Vec<Transaction> = (0..25)
            .map(|i| spend(&format!("M{i:02}"), 100.0 - i as f64))
            .collect();
        let refs: Vec<&Transaction> = txns.iter().collect();
        let colors = MerchantColors::from_cleared(&refs);
        assert_eq!(colors.len(), 20);
        assert_eq!(colors.color_for("M19"), PALETTE[19]);
        assert_eq!(colors.color_for("M20"), FALLBACK_COLOR);
    }

    #[test]
    fn test_palette_has_no_duplicates() {
        let mut seen = std::collections::HashSet::new();
        for c in PALETTE {
            assert!(seen.insert(c), "duplicate color {c}");
        }
    }
}
