use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_millis, decimal_to_f64};
use crate::error::{ChartError, ChartResult};

/// Series category name. Clones share one allocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Category(Arc<str>);

impl Category {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.0.to_string()
    }
}

impl Borrow<str> for Category {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Typed extension payload carried by a point.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PointMetadata {
    #[default]
    None,
    /// Index of the point inside a backfill batch.
    Sequence(u64),
    /// Point produced by a live tick.
    Live,
    Text(String),
    /// Opaque payload for producers with their own encoding.
    Bytes(Vec<u8>),
}

/// One immutable observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub timestamp: i64,
    pub value: f64,
    pub category: Category,
    #[serde(default)]
    pub metadata: PointMetadata,
}

impl DataPoint {
    #[must_use]
    pub fn new(timestamp: i64, value: f64, category: impl Into<Category>) -> Self {
        Self {
            timestamp,
            value,
            category: category.into(),
            metadata: PointMetadata::None,
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: PointMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn from_decimal_time(
        time: DateTime<Utc>,
        value: Decimal,
        category: impl Into<Category>,
    ) -> ChartResult<Self> {
        let value = decimal_to_f64(value, "value")?;
        if !value.is_finite() || value < 0.0 {
            return Err(ChartError::InvalidData(
                "value must be finite and >= 0".to_owned(),
            ));
        }
        Ok(Self::new(datetime_to_unix_millis(time), value, category))
    }
}

/// Pan/zoom window applied on top of chart pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub width: u32,
    pub height: u32,
    pub zoom: f64,
}

impl Viewport {
    /// Identity viewport covering a `width x height` chart.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
            zoom: 1.0,
        }
    }

    #[must_use]
    pub fn with_pan(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    #[must_use]
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0
            && self.height > 0
            && self.x.is_finite()
            && self.y.is_finite()
            && self.zoom.is_finite()
            && self.zoom > 0.0
    }

    #[must_use]
    pub fn is_identity(self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.zoom == 1.0
    }

    /// Maps a chart pixel into the panned and zoomed window.
    #[must_use]
    pub fn apply(self, x: f64, y: f64) -> (f64, f64) {
        ((x - self.x) * self.zoom, (y - self.y) * self.zoom)
    }
}
