use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::charts::{
    BarChartOptions, ChartKind, HeatmapOptions, LineChartOptions, ScatterPlotOptions,
    render_bar_chart, render_heatmap, render_line_chart, render_scatter_plot,
};
use crate::core::{BufferSnapshot, Category, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::perf::{PassTimings, measure};
use crate::pipeline::{
    Aggregation, Pipeline, PipelineCacheStats, PipelineOutput, SampleTarget, TimeRange, ViewConfig,
};
use crate::render::{RenderFrame, Renderer, SurfaceSize};

use super::DashboardConfig;

/// Host-side supplier of one drawing target per chart.
pub trait SurfaceProvider {
    fn acquire(&mut self, kind: ChartKind) -> ChartResult<&mut dyn Renderer>;
}

impl<R: Renderer> SurfaceProvider for IndexMap<ChartKind, R> {
    fn acquire(&mut self, kind: ChartKind) -> ChartResult<&mut dyn Renderer> {
        match self.get_mut(&kind) {
            Some(renderer) => Ok(renderer),
            None => Err(ChartError::SurfaceUnavailable(format!(
                "no surface registered for {kind} chart"
            ))),
        }
    }
}

/// Outcome of one [`Dashboard::render_pass`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderReport {
    pub generation: u64,
    pub rendered: Vec<ChartKind>,
    /// Charts skipped this pass; other charts are unaffected.
    pub failures: Vec<(ChartKind, ChartError)>,
    pub timings: PassTimings,
}

impl RenderReport {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Owns the view configuration and paints every chart from one snapshot.
#[derive(Debug)]
pub struct Dashboard {
    view: ViewConfig,
    pipeline: Pipeline,
    size: SurfaceSize,
    line: LineChartOptions,
    bar: BarChartOptions,
    scatter: ScatterPlotOptions,
    heatmap: HeatmapOptions,
}

impl Dashboard {
    pub fn new(config: &DashboardConfig, view: ViewConfig) -> ChartResult<Self> {
        config.validate()?;
        let colors = config.colors.resolve()?;
        let mut dashboard = Self {
            view: view.clone(),
            pipeline: Pipeline::new(),
            size: config.surface_size(),
            line: LineChartOptions {
                color: colors.line,
                ..LineChartOptions::default()
            },
            bar: BarChartOptions {
                color: colors.bar,
                sample_target: SampleTarget::Bounded(config.bar_sample_target),
                ..BarChartOptions::default()
            },
            scatter: ScatterPlotOptions {
                color: colors.scatter,
                sample_target: SampleTarget::Bounded(config.scatter_sample_target),
                ..ScatterPlotOptions::default()
            },
            heatmap: HeatmapOptions {
                sample_target: SampleTarget::Bounded(config.heatmap_sample_target),
                ..HeatmapOptions::default()
            },
        };
        dashboard.set_view(view);
        Ok(dashboard)
    }

    /// Dashboard over every configured category and the configured window
    /// around `now_ms`.
    pub fn from_config(config: &DashboardConfig, now_ms: i64) -> ChartResult<Self> {
        let view = ViewConfig::new(
            config.categories.iter().map(String::as_str),
            config.time_range_around(now_ms)?,
        )
        .with_aggregation(config.aggregation);
        Self::new(config, view)
    }

    #[must_use]
    pub fn view(&self) -> &ViewConfig {
        &self.view
    }

    /// The line chart draws the pipeline output as is: bucket keys may precede
    /// the range start, so the window is not applied a second time.
    pub fn set_view(&mut self, view: ViewConfig) {
        self.heatmap.categories = Some(view.selected_categories.clone());
        self.view = view;
    }

    /// Flips one category; returns whether it is now selected.
    pub fn toggle_category(&mut self, category: impl Into<Category>) -> bool {
        let selected = self.view.toggle_category(category);
        self.heatmap.categories = Some(self.view.selected_categories.clone());
        selected
    }

    pub fn set_time_range(&mut self, start: i64, end: i64) -> ChartResult<()> {
        self.view.time_range = TimeRange::new(start, end)?;
        Ok(())
    }

    pub fn set_aggregation(&mut self, aggregation: Aggregation) {
        self.view.aggregation = aggregation;
    }

    pub fn set_surface_size(&mut self, size: SurfaceSize) -> ChartResult<()> {
        size.validate()?;
        self.size = size;
        Ok(())
    }

    #[must_use]
    pub fn surface_size(&self) -> SurfaceSize {
        self.size
    }

    /// Pan and zoom for the line chart; `None` restores the identity view.
    pub fn set_line_viewport(&mut self, viewport: Option<Viewport>) -> ChartResult<()> {
        if let Some(viewport) = viewport {
            if !viewport.is_valid() {
                return Err(ChartError::InvalidViewport {
                    width: viewport.width,
                    height: viewport.height,
                });
            }
        }
        self.line.viewport = viewport;
        Ok(())
    }

    #[must_use]
    pub fn cache_stats(&self) -> PipelineCacheStats {
        self.pipeline.cache_stats()
    }

    /// Runs the pipeline over `snapshot` with the current view.
    pub fn process(&mut self, snapshot: &BufferSnapshot) -> Arc<PipelineOutput> {
        self.pipeline.run(snapshot, &self.view)
    }

    /// Builds one chart's frame from a pipeline output.
    pub fn build_frame(&self, kind: ChartKind, output: &PipelineOutput) -> ChartResult<RenderFrame> {
        match kind {
            ChartKind::Line => render_line_chart(&output.series, self.size, &self.line),
            ChartKind::Bar => render_bar_chart(&output.series, self.size, &self.bar),
            ChartKind::Scatter => render_scatter_plot(&output.series, self.size, &self.scatter),
            ChartKind::Heatmap => render_heatmap(&output.series, self.size, &self.heatmap),
        }
    }

    /// Runs one pipeline pass over `snapshot` and paints every chart.
    ///
    /// Each frame is fully built before its surface is acquired, so a failing
    /// surface skips that chart without a partial paint.
    pub fn render_pass(
        &mut self,
        snapshot: &BufferSnapshot,
        surfaces: &mut dyn SurfaceProvider,
    ) -> RenderReport {
        let (output, processing_ms) =
            measure("pipeline pass", || self.pipeline.run(snapshot, &self.view));

        let ((rendered, failures), render_ms) = measure("render pass", || {
            let mut rendered = Vec::with_capacity(ChartKind::ALL.len());
            let mut failures = Vec::new();
            for kind in ChartKind::ALL {
                let result = self
                    .build_frame(kind, &output)
                    .and_then(|frame| surfaces.acquire(kind)?.render(&frame));
                match result {
                    Ok(()) => rendered.push(kind),
                    Err(err) => {
                        warn!(chart = %kind, error = %err, "chart skipped this pass");
                        failures.push((kind, err));
                    }
                }
            }
            (rendered, failures)
        });

        let timings = PassTimings {
            processing_ms,
            render_ms,
            data_point_count: snapshot.len(),
        };
        debug!(
            generation = snapshot.generation(),
            rendered = rendered.len(),
            failed = failures.len(),
            processing_ms,
            render_ms,
            "render pass finished"
        );
        RenderReport {
            generation: snapshot.generation(),
            rendered,
            failures,
            timings,
        }
    }
}
