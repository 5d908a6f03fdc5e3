//! Filter selections: each dimension is either "all" or one concrete value.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Textual marker for an inactive filter
pub const ALL: &str = "all";

/// One filter dimension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T> Selection<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Selection::All => None,
            Selection::Only(v) => Some(v),
        }
    }
}

impl<T: PartialEq> Selection<T> {
    /// True when the filter is inactive or `candidate` equals the selected value.
    ///
    /// A missing candidate (e.g. an undated record) only passes an inactive filter.
    pub fn admits(&self, candidate: Option<&T>) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(v) => candidate == Some(v),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str(ALL),
            Selection::Only(v) => v.fmt(f),
        }
    }
}

impl<T> FromStr for Selection<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(ALL) {
            return Ok(Selection::All);
        }
        let v = s
            .parse::<T>()
            .with_context(|| format!("invalid filter value '{s}'"))?;
        Ok(Selection::Only(v))
    }
}

/// The four independent dashboard filters.
///
/// `month` is 0-based (January = 0). It is normally only set together with
/// `year`, but when year is all it applies across every year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FilterSelection {
    pub year: Selection<i32>,
    pub month: Selection<u32>,
    pub merchant: Selection<String>,
    pub category: Selection<String>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Selection::Only(year);
        self
    }

    pub fn with_month(mut self, month0: u32) -> Self {
        self.month = Selection::Only(month0);
        self
    }

    pub fn with_merchant(mut self, merchant: impl Into<String>) -> Self {
        self.merchant = Selection::Only(merchant.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Selection::Only(category.into());
        self
    }

    /// True when no filter is active
    pub fn is_unfiltered(&self) -> bool {
        self.year.is_all() && self.month.is_all() && self.merchant.is_all() && self.category.is_all()
    }
}
