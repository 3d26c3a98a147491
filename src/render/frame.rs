use serde::{Deserialize, Serialize};

use crate::error::ChartResult;
use crate::render::{
    CirclePrimitive, Color, DrawingSurface, LinePrimitive, RectPrimitive, SurfaceSize,
    TextPrimitive, TextStyle,
};

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Clear {
        width: f64,
        height: f64,
        color: Color,
    },
    Line(LinePrimitive),
    Rect(RectPrimitive),
    Circle(CirclePrimitive),
    Text(TextPrimitive),
}

impl DrawCommand {
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Clear { color, .. } => color.validate(),
            Self::Line(line) => line.validate(),
            Self::Rect(rect) => rect.validate(),
            Self::Circle(circle) => circle.validate(),
            Self::Text(text) => text.validate(),
        }
    }
}

/// Backend-agnostic scene for one chart draw pass.
///
/// Recording every call in order keeps chart code deterministic and lets a
/// backend paint the whole pass at once, or not at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub size: SurfaceSize,
    pub commands: Vec<DrawCommand>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.size.validate()?;
        for command in &self.commands {
            command.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// True when the pass painted nothing beyond the background.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.commands
            .iter()
            .all(|command| matches!(command, DrawCommand::Clear { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &LinePrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Line(line) => Some(line),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectPrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Rect(rect) => Some(rect),
            _ => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = &CirclePrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Circle(circle) => Some(circle),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text(text) => Some(text),
            _ => None,
        })
    }

    /// Replays the recorded commands onto another surface.
    pub fn replay(&self, surface: &mut dyn DrawingSurface) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear {
                    width,
                    height,
                    color,
                } => surface.clear(*width, *height, *color),
                DrawCommand::Line(line) => surface.draw_line(
                    line.x1,
                    line.y1,
                    line.x2,
                    line.y2,
                    line.color,
                    line.stroke_width,
                ),
                DrawCommand::Rect(rect) => surface.draw_rect(
                    rect.x,
                    rect.y,
                    rect.width,
                    rect.height,
                    rect.fill_color,
                    rect.stroke_color,
                    rect.stroke_width,
                ),
                DrawCommand::Circle(circle) => surface.draw_circle(
                    circle.x,
                    circle.y,
                    circle.radius,
                    circle.fill_color,
                    circle.stroke_color,
                ),
                DrawCommand::Text(text) => surface.draw_text(&text.text, text.x, text.y, &text.style),
            }
        }
    }
}

impl DrawingSurface for RenderFrame {
    fn clear(&mut self, width: f64, height: f64, background: Color) {
        self.commands.push(DrawCommand::Clear {
            width,
            height,
            color: background,
        });
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Color, width: f64) {
        self.commands
            .push(DrawCommand::Line(LinePrimitive::new(x1, y1, x2, y2, width, color)));
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
        self.commands.push(DrawCommand::Rect(RectPrimitive {
            x,
            y,
            width,
            height,
            fill_color: fill,
            stroke_color: stroke,
            stroke_width,
        }));
    }

    fn draw_circle(&mut self, x: f64, y: f64, radius: f64, fill: Option<Color>, stroke: Option<Color>) {
        self.commands.push(DrawCommand::Circle(CirclePrimitive {
            x,
            y,
            radius,
            fill_color: fill,
            stroke_color: stroke,
        }));
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        self.commands
            .push(DrawCommand::Text(TextPrimitive::new(text, x, y, style.clone())));
    }
}
