//! The drawing surface the overlays render through.
//!
//! The core never talks to a window or canvas directly. It calls into a
//! [`Surface`], which the host implements over whatever 2D API it has. Two
//! surfaces live here: [`RecordingSurface`] keeps a list of commands (tests,
//! JSON export) and [`Translate`] offsets another surface. The SVG writer is
//! in [`crate::svg`].

use crate::arc::{ArcPath, ArcSpec};
use crate::color::Rgb;
use crate::geometry::{Line, Point, Rect};

/// Average glyph advance as a fraction of the font size (sans-serif digits).
pub const AVERAGE_GLYPH_WIDTH: f64 = 0.55;

/// Line height as a fraction of the font size.
pub const LINE_HEIGHT: f64 = 1.15;

/// Measured extent of a text run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextSize {
    pub width: f64,
    pub height: f64,
}

/// A 2D stroke-only drawing target.
///
/// ## Rust Lesson #14: Traits
///
/// A trait is an interface. The overlay code is generic over `S: Surface`,
/// so the same render function writes SVG, records commands in tests, or
/// drives a host canvas, with static dispatch in each case.
pub trait Surface {
    fn draw_line(&mut self, from: Point, to: Point, color: Rgb, stroke_width: f64);

    fn draw_rectangle(&mut self, rect: Rect, stroke: Rgb, stroke_width: f64);

    /// Stroke (never fill) the arc described by `arc`.
    fn draw_arc_path(&mut self, arc: &ArcSpec, stroke: Rgb, stroke_width: f64);

    fn measure_text(&self, text: &str, font_size: f64) -> TextSize;

    /// Draw `text` with its top-left corner at `position`.
    fn draw_text(&mut self, text: &str, position: Point, font_size: f64, color: Rgb);
}

/// Text metrics estimated from the font size alone.
///
/// Good enough for label placement when no font engine is around.
pub fn estimate_text_size(text: &str, font_size: f64) -> TextSize {
    TextSize {
        width: text.chars().count() as f64 * font_size * AVERAGE_GLYPH_WIDTH,
        height: font_size * LINE_HEIGHT,
    }
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        from: Point,
        to: Point,
        color: Rgb,
        stroke_width: f64,
    },
    Rectangle {
        rect: Rect,
        stroke: Rgb,
        stroke_width: f64,
    },
    Arc {
        arc: ArcSpec,
        stroke: Rgb,
        stroke_width: f64,
    },
    Text {
        text: String,
        position: Point,
        font_size: f64,
        color: Rgb,
    },
}

impl DrawCommand {
    /// Stroke color of the command.
    pub fn color(&self) -> Rgb {
        match self {
            DrawCommand::Line { color, .. } | DrawCommand::Text { color, .. } => *color,
            DrawCommand::Rectangle { stroke, .. } | DrawCommand::Arc { stroke, .. } => *stroke,
        }
    }

    /// Line segments for plotter-style output. Text produces none.
    pub fn to_lines(&self, tolerance: f64) -> Vec<Line> {
        match self {
            DrawCommand::Line { from, to, .. } => vec![Line::between(*from, *to)],
            DrawCommand::Rectangle { rect, .. } => rect.edges().to_vec(),
            DrawCommand::Arc { arc, .. } => {
                let path: ArcPath = arc.path();
                path.flatten(tolerance)
            }
            DrawCommand::Text { .. } => Vec::new(),
        }
    }
}

/// Surface that remembers every call, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Line { .. }))
    }

    pub fn rectangles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Rectangle { .. }))
    }

    pub fn arcs(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Arc { .. }))
    }

    pub fn texts(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Text { .. }))
    }

    /// Flatten all recorded geometry into line segments.
    pub fn to_lines(&self, tolerance: f64) -> Vec<Line> {
        self.commands.iter().flat_map(|c| c.to_lines(tolerance)).collect()
    }
}

impl Surface for RecordingSurface {
    fn draw_line(&mut self, from: Point, to: Point, color: Rgb, stroke_width: f64) {
        self.commands.push(DrawCommand::Line { from, to, color, stroke_width });
    }

    fn draw_rectangle(&mut self, rect: Rect, stroke: Rgb, stroke_width: f64) {
        self.commands.push(DrawCommand::Rectangle { rect, stroke, stroke_width });
    }

    fn draw_arc_path(&mut self, arc: &ArcSpec, stroke: Rgb, stroke_width: f64) {
        self.commands.push(DrawCommand::Arc { arc: *arc, stroke, stroke_width });
    }

    fn measure_text(&self, text: &str, font_size: f64) -> TextSize {
        estimate_text_size(text, font_size)
    }

    fn draw_text(&mut self, text: &str, position: Point, font_size: f64, color: Rgb) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            font_size,
            color,
        });
    }
}

/// Forwards to another surface with every coordinate shifted by `(dx, dy)`.
///
/// Used to place an overlay somewhere other than the origin, the way the
/// host positions each overlay on its canvas.
pub struct Translate<'a, S: Surface + ?Sized> {
    inner: &'a mut S,
    dx: f64,
    dy: f64,
}

impl<'a, S: Surface + ?Sized> Translate<'a, S> {
    pub fn new(inner: &'a mut S, dx: f64, dy: f64) -> Self {
        Self { inner, dx, dy }
    }
}

impl<S: Surface + ?Sized> Surface for Translate<'_, S> {
    fn draw_line(&mut self, from: Point, to: Point, color: Rgb, stroke_width: f64) {
        self.inner.draw_line(
            from.offset(self.dx, self.dy),
            to.offset(self.dx, self.dy),
            color,
            stroke_width,
        );
    }

    fn draw_rectangle(&mut self, rect: Rect, stroke: Rgb, stroke_width: f64) {
        self.inner.draw_rectangle(rect.translate(self.dx, self.dy), stroke, stroke_width);
    }

    fn draw_arc_path(&mut self, arc: &ArcSpec, stroke: Rgb, stroke_width: f64) {
        self.inner.draw_arc_path(&arc.translate(self.dx, self.dy), stroke, stroke_width);
    }

    fn measure_text(&self, text: &str, font_size: f64) -> TextSize {
        self.inner.measure_text(text, font_size)
    }

    fn draw_text(&mut self, text: &str, position: Point, font_size: f64, color: Rgb) {
        self.inner.draw_text(text, position.offset(self.dx, self.dy), font_size, color);
    }
}
