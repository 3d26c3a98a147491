use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use std::f64::consts::TAU;

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, DrawingSurface, RenderFrame, Renderer, TextHAlign, TextStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub circles_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// `DrawingSurface` over a borrowed Cairo context.
///
/// Cairo reports failures per call; the first one is kept and returned by
/// `finish`.
struct CairoSurface<'a> {
    context: &'a Context,
    stats: CairoRenderStats,
    first_error: Option<ChartError>,
}

impl<'a> CairoSurface<'a> {
    fn new(context: &'a Context) -> Self {
        Self {
            context,
            stats: CairoRenderStats::default(),
            first_error: None,
        }
    }

    fn check(&mut self, what: &str, result: Result<(), cairo::Error>) {
        if let Err(err) = result {
            self.first_error
                .get_or_insert_with(|| map_backend_error(what, err));
        }
    }

    fn finish(self) -> ChartResult<CairoRenderStats> {
        match self.first_error {
            Some(err) => Err(err),
            None => Ok(self.stats),
        }
    }
}

impl DrawingSurface for CairoSurface<'_> {
    fn clear(&mut self, width: f64, height: f64, background: Color) {
        apply_color(self.context, background);
        self.context.rectangle(0.0, 0.0, width, height);
        let result = self.context.fill();
        self.check("failed to clear surface", result);
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Color, width: f64) {
        apply_color(self.context, color);
        self.context.set_line_width(width);
        self.context.move_to(x1, y1);
        self.context.line_to(x2, y2);
        let result = self.context.stroke();
        self.check("failed to stroke line", result);
        self.stats.lines_drawn += 1;
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Option<Color>,
        stroke: Option<Color>,
        stroke_width: f64,
    ) {
        if let Some(fill) = fill {
            apply_color(self.context, fill);
            self.context.rectangle(x, y, width, height);
            let result = self.context.fill();
            self.check("failed to fill rectangle", result);
        }
        if let Some(stroke) = stroke {
            apply_color(self.context, stroke);
            self.context.set_line_width(stroke_width);
            self.context.rectangle(x, y, width, height);
            let result = self.context.stroke();
            self.check("failed to stroke rectangle", result);
        }
        self.stats.rects_drawn += 1;
    }

    fn draw_circle(&mut self, x: f64, y: f64, radius: f64, fill: Option<Color>, stroke: Option<Color>) {
        self.context.new_path();
        self.context.arc(x, y, radius, 0.0, TAU);
        if let Some(fill) = fill {
            apply_color(self.context, fill);
            let result = if stroke.is_some() {
                self.context.fill_preserve()
            } else {
                self.context.fill()
            };
            self.check("failed to fill circle", result);
        }
        if let Some(stroke) = stroke {
            apply_color(self.context, stroke);
            let result = self.context.stroke();
            self.check("failed to stroke circle", result);
        }
        self.context.new_path();
        self.stats.circles_drawn += 1;
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        let layout = pangocairo::functions::create_layout(self.context);
        let font_description =
            FontDescription::from_string(&format!("{} {}", style.font_family, style.font_size_px));
        layout.set_font_description(Some(&font_description));
        layout.set_text(text);

        // Canvas text is anchored on the baseline; pango lays out from the top.
        let (text_width, _text_height) = layout.pixel_size();
        let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);
        let x = match style.align {
            TextHAlign::Left => x,
            TextHAlign::Center => x - f64::from(text_width) / 2.0,
            TextHAlign::Right => x - f64::from(text_width),
        };

        apply_color(self.context, style.color);
        self.context.move_to(x, y - baseline);
        pangocairo::functions::show_layout(self.context, &layout);
        self.stats.texts_drawn += 1;
    }
}

/// Cairo + Pango renderer with a device-pixel-ratio scaled backing store.
///
/// The image surface is allocated at physical resolution and the context is
/// scaled once, so frames keep drawing in logical pixels.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    device_pixel_ratio: f64,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(size: crate::render::SurfaceSize) -> ChartResult<Self> {
        size.validate()?;
        let (width, height) = size.backing_size();
        let width = i32::try_from(width)
            .map_err(|_| ChartError::SurfaceUnavailable("surface width overflows i32".to_owned()))?;
        let height = i32::try_from(height).map_err(|_| {
            ChartError::SurfaceUnavailable("surface height overflows i32".to_owned())
        })?;

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            device_pixel_ratio: size.device_pixel_ratio,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        let mut surface = CairoSurface::new(context);
        frame.replay(&mut surface);
        self.last_stats = surface.finish()?;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        context.scale(self.device_pixel_ratio, self.device_pixel_ratio);
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::SurfaceUnavailable(format!("{prefix}: {err}"))
}
