use std::collections::BTreeMap;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::charts::{HEATMAP_PADDING, begin_frame};
use crate::core::primitives::floor_to_interval;
use crate::core::{Category, DataPoint, value_bounds};
use crate::error::ChartResult;
use crate::pipeline::{HEATMAP_SAMPLE_TARGET, SampleTarget, stride_sample, unique_categories};
use crate::render::{Color, DrawingSurface, RenderFrame, SurfaceSize, TextHAlign, TextStyle};

const SLOT_MS: i64 = 1_000;
const LABEL_FONT_SIZE: f64 = 10.0;
const LABEL_X: f64 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapOptions {
    /// Row order; defaults to categories in first-seen order.
    pub categories: Option<IndexSet<Category>>,
    pub sample_target: SampleTarget,
}

impl Default for HeatmapOptions {
    fn default() -> Self {
        Self {
            categories: None,
            sample_target: SampleTarget::Bounded(HEATMAP_SAMPLE_TARGET),
        }
    }
}

/// Time-slot by category matrix behind a heatmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapGrid {
    /// Row labels, top to bottom.
    pub categories: Vec<Category>,
    /// Slot start timestamps in milliseconds, left to right.
    pub slots: Vec<i64>,
    /// `cells[slot][row]`; `None` where the slot holds no sample for the row.
    pub cells: Vec<Vec<Option<f64>>>,
    /// Bounds over the sampled values that landed in a slot.
    pub value_bounds: Option<(f64, f64)>,
}

impl HeatmapGrid {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty() || self.categories.is_empty()
    }
}

/// Buckets sampled points into one-second slots.
///
/// Within a slot the last sample for a category wins.
#[must_use]
pub fn build_heatmap_grid(points: &[DataPoint], options: &HeatmapOptions) -> HeatmapGrid {
    let categories: Vec<Category> = match &options.categories {
        Some(categories) => categories.iter().cloned().collect(),
        None => unique_categories(points).into_iter().collect(),
    };

    let mut slots: BTreeMap<i64, IndexMap<&Category, f64>> = BTreeMap::new();
    let sampled = stride_sample(points, options.sample_target);
    for point in &sampled {
        slots
            .entry(floor_to_interval(point.timestamp, SLOT_MS))
            .or_default()
            .insert(&point.category, point.value);
    }

    let bounds = value_bounds(slots.values().flat_map(|values| values.values().copied()));
    let cells = slots
        .values()
        .map(|values| {
            categories
                .iter()
                .map(|category| values.get(category).copied())
                .collect()
        })
        .collect();

    HeatmapGrid {
        categories,
        slots: slots.keys().copied().collect(),
        cells,
        value_bounds: bounds,
    }
}

/// Blue (low) to red (high) ramp over `[min, min + range]`.
#[must_use]
pub fn heatmap_color(value: f64, min: f64, range: f64) -> Color {
    let normalized = ((value - min) / range).clamp(0.0, 1.0);
    Color::from_hsl((1.0 - normalized) * 240.0, 1.0, 0.5)
}

/// Category rows against one-second time columns, coloured by value.
///
/// Cells without a sample paint as value 0.
pub fn render_heatmap(
    points: &[DataPoint],
    size: SurfaceSize,
    options: &HeatmapOptions,
) -> ChartResult<RenderFrame> {
    let mut frame = begin_frame(size)?;
    let grid = build_heatmap_grid(points, options);
    let Some((min, max)) = grid.value_bounds else {
        return Ok(frame);
    };
    if grid.is_empty() {
        return Ok(frame);
    }

    let range = if max > min { max - min } else { 1.0 };
    let width = f64::from(size.width);
    let height = f64::from(size.height);
    let cell_width = (width - 2.0 * HEATMAP_PADDING) / grid.slots.len() as f64;
    let cell_height = (height - 2.0 * HEATMAP_PADDING) / grid.categories.len() as f64;

    for (slot_index, row) in grid.cells.iter().enumerate() {
        for (category_index, cell) in row.iter().enumerate() {
            let color = heatmap_color(cell.unwrap_or(0.0), min, range);
            frame.draw_rect(
                HEATMAP_PADDING + slot_index as f64 * cell_width,
                HEATMAP_PADDING + category_index as f64 * cell_height,
                cell_width,
                cell_height,
                Some(color),
                None,
                0.0,
            );
        }
    }

    let label_style = TextStyle::default()
        .with_font_size(LABEL_FONT_SIZE)
        .with_align(TextHAlign::Left);
    for (index, category) in grid.categories.iter().enumerate() {
        if category.as_str().is_empty() {
            continue;
        }
        frame.draw_text(
            category.as_str(),
            LABEL_X,
            HEATMAP_PADDING + index as f64 * cell_height + cell_height / 2.0,
            &label_style,
        );
    }

    Ok(frame)
}
