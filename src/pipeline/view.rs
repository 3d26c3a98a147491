use std::fmt;
use std::str::FromStr;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::Category;
use crate::error::{ChartError, ChartResult};

/// Inclusive `[start, end]` window in milliseconds with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(i64, i64)", into = "(i64, i64)")]
pub struct TimeRange {
    start: i64,
    end: i64,
}

impl TimeRange {
    pub fn new(start: i64, end: i64) -> ChartResult<Self> {
        if start >= end {
            return Err(ChartError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Window of `span_ms` ending at `end`.
    pub fn trailing(end: i64, span_ms: i64) -> ChartResult<Self> {
        Self::new(end.saturating_sub(span_ms), end)
    }

    #[must_use]
    pub fn start(self) -> i64 {
        self.start
    }

    #[must_use]
    pub fn end(self) -> i64 {
        self.end
    }

    #[must_use]
    pub fn contains(self, timestamp: i64) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }
}

impl TryFrom<(i64, i64)> for TimeRange {
    type Error = ChartError;

    fn try_from((start, end): (i64, i64)) -> Result<Self, Self::Error> {
        Self::new(start, end)
    }
}

impl From<TimeRange> for (i64, i64) {
    fn from(range: TimeRange) -> Self {
        (range.start, range.end)
    }
}

/// Time-bucket aggregation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Aggregation {
    #[default]
    #[serde(rename = "raw")]
    Raw,
    #[serde(rename = "1min")]
    OneMinute,
    #[serde(rename = "5min")]
    FiveMinutes,
    #[serde(rename = "1hour")]
    OneHour,
}

impl Aggregation {
    pub const ALL: [Self; 4] = [Self::Raw, Self::OneMinute, Self::FiveMinutes, Self::OneHour];

    /// Bucket width, `None` for raw grouping.
    #[must_use]
    pub const fn interval_ms(self) -> Option<i64> {
        match self {
            Self::Raw => None,
            Self::OneMinute => Some(60_000),
            Self::FiveMinutes => Some(300_000),
            Self::OneHour => Some(3_600_000),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::OneMinute => "1min",
            Self::FiveMinutes => "5min",
            Self::OneHour => "1hour",
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Aggregation {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| ChartError::InvalidData(format!("unknown aggregation mode `{s}`")))
    }
}

/// View configuration pushed by the host UI.
///
/// Category order is kept so that heatmap rows follow the host's selection
/// order; hashing and equality ignore it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    pub selected_categories: IndexSet<Category>,
    pub time_range: TimeRange,
    #[serde(default)]
    pub aggregation: Aggregation,
}

impl ViewConfig {
    #[must_use]
    pub fn new<I, C>(categories: I, time_range: TimeRange) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Category>,
    {
        Self {
            selected_categories: categories.into_iter().map(Into::into).collect(),
            time_range,
            aggregation: Aggregation::Raw,
        }
    }

    #[must_use]
    pub fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    /// Flips membership of one category; returns whether it is now selected.
    pub fn toggle_category(&mut self, category: impl Into<Category>) -> bool {
        let category = category.into();
        if self.selected_categories.shift_remove(&category) {
            false
        } else {
            self.selected_categories.insert(category);
            true
        }
    }

    #[must_use]
    pub fn is_selected(&self, category: &str) -> bool {
        self.selected_categories.contains(category)
    }

    /// Order-independent fingerprint used by the pipeline cache.
    pub(crate) fn fingerprint(&self) -> (Vec<&str>, TimeRange, Aggregation) {
        let mut names: Vec<&str> = self
            .selected_categories
            .iter()
            .map(Category::as_str)
            .collect();
        names.sort_unstable();
        (names, self.time_range, self.aggregation)
    }
}

impl PartialEq for ViewConfig {
    fn eq(&self, other: &Self) -> bool {
        self.fingerprint() == other.fingerprint()
    }
}
