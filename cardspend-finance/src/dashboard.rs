//! Dashboard view model: every derived view for one store snapshot.

use cardspend_core::{FilterOptions, FilterSelection, Transaction, TransactionStore};
use serde::Serialize;

use crate::aggregate::{
    category_breakdown, merchant_breakdown, monthly_series, status_breakdown, top_category,
    totals, Breakdown, MonthlySeries, StatusCounts, Totals,
};
use crate::palette::MerchantColors;

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard<'a> {
    pub selection: FilterSelection,
    pub options: FilterOptions,
    pub totals: Totals,
    pub top_category: String,
    pub monthly: MonthlySeries,
    pub categories: Breakdown,
    pub merchants: Breakdown,
    pub statuses: StatusCounts,
    pub merchant_colors: MerchantColors,
    /// Filtered records, newest first
    pub table: Vec<&'a Transaction>,
}

impl<'a> Dashboard<'a> {
    /// Compute every view from the store's records and current selection.
    pub fn build(store: &'a TransactionStore) -> Self {
        let filtered = store.filtered();
        let cleared = cardspend_core::cleared(filtered.iter().copied());
        let categories = category_breakdown(&cleared);

        let dashboard = Self {
            selection: store.selection().clone(),
            options: store.filter_options(),
            totals: totals(&cleared),
            top_category: top_category(&categories).to_string(),
            monthly: monthly_series(&cleared),
            merchants: merchant_breakdown(&cleared),
            statuses: status_breakdown(&filtered),
            merchant_colors: MerchantColors::from_cleared(&store.cleared_unfiltered()),
            table: cardspend_core::sort_by_date_desc(filtered),
            categories,
        };

        tracing::debug!(
            filtered = dashboard.table.len(),
            cleared = dashboard.totals.transaction_count,
            "built dashboard"
        );
        dashboard
    }

    pub fn color_for(&self, merchant: &str) -> &'static str {
        self.merchant_colors.color_for(merchant)
    }
}
