//! cardspend-finance: spend aggregates, merchant colors and the dashboard view model

pub mod aggregate;
pub mod dashboard;
pub mod palette;

pub use aggregate::{
    category_breakdown, merchant_breakdown, monthly_series, status_breakdown, top_category,
    totals, Breakdown, MerchantSeries, MonthlySeries, StatusCounts, Totals,
    MONTHLY_TOP_MERCHANTS, NO_CATEGORY, OTHERS, TOP_MERCHANTS,
};
pub use dashboard::Dashboard;
pub use palette::{MerchantColor, MerchantColors, FALLBACK_COLOR, PALETTE};
