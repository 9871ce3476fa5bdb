//! The two golden-ratio overlays drawn on top of the ruler.
//!
//! Both start from [`golden_root`] and walk the same [`Subdivision`]; they
//! differ only in what each step puts on the surface.

use crate::arc::{build_quarter_arc, render_arc};
use crate::color::{Rgb, color_at};
use crate::error::GeometryError;
use crate::geometry::{Point, pt_to_dip};
use crate::orientation::Orientation;
use crate::subdivide::{
    DEFAULT_DEPTH, Subdivision, SubdivisionStep, Turn, golden_root, subdivide_with,
};
use crate::surface::Surface;

/// Stroke and label settings shared by both overlays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    /// Width of rectangle and square outlines.
    pub stroke_width: f64,
    pub arc_color: Rgb,
    pub arc_width: f64,
    pub font_size: f64,
    /// Write the square size inside each square (spiral only).
    pub labels: bool,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            stroke_width: 1.5,
            arc_color: Rgb::RED,
            arc_width: 2.0,
            font_size: pt_to_dip(8.0),
            labels: true,
        }
    }
}

/// Square size as shown on the spiral: rounded to three decimals.
pub fn format_size(size: f64) -> String {
    format!("{}", (size * 1000.0).round() / 1000.0)
}

/// Golden spiral: nested squares, each with a quarter circle and its size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoldenSpiral {
    /// Width of the root rectangle.
    pub length: f64,
    /// Corner the first square is carved from.
    pub orientation: Orientation,
    pub depth: usize,
}

impl GoldenSpiral {
    pub fn new(length: f64, orientation: Orientation) -> Self {
        Self {
            length,
            orientation,
            depth: DEFAULT_DEPTH,
        }
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn steps(&self) -> Result<Subdivision, GeometryError> {
        subdivide_with(golden_root(self.length), self.depth, self.orientation, Turn::Rotate)
    }

    /// Draw the spiral. Returns the number of levels drawn.
    ///
    /// Per level: remainder outline, arc, square outline, then the label if
    /// it is shorter than the square.
    pub fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        style: &OverlayStyle,
    ) -> Result<usize, GeometryError> {
        let mut drawn = 0;
        for step in self.steps()? {
            draw_spiral_step(surface, &step, style);
            drawn += 1;
        }
        log::debug!("spiral: {} levels at {}", drawn, self.orientation);
        Ok(drawn)
    }
}

fn draw_spiral_step<S: Surface + ?Sized>(
    surface: &mut S,
    step: &SubdivisionStep,
    style: &OverlayStyle,
) {
    let pen = color_at(step.depth);
    let square = step.square;

    surface.draw_rectangle(step.remainder, pen, style.stroke_width);
    render_arc(
        surface,
        &build_quarter_arc(square, step.orientation),
        style.arc_color,
        style.arc_width,
    );
    surface.draw_rectangle(square, pen, style.stroke_width);

    if !style.labels {
        return;
    }
    let text = format_size(square.height);
    let size = surface.measure_text(&text, style.font_size);
    if size.height < square.height {
        let at = Point::new(square.x + square.height / 2.8, square.y + square.height / 2.2);
        surface.draw_text(&text, at, style.font_size, pen);
    }
}

/// Phi matrix: the spiral's rectangles without arcs or labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhiMatrix {
    pub length: f64,
    pub orientation: Orientation,
    pub depth: usize,
    pub turn: Turn,
}

impl PhiMatrix {
    pub fn new(length: f64, orientation: Orientation) -> Self {
        Self {
            length,
            orientation,
            depth: DEFAULT_DEPTH,
            turn: Turn::default(),
        }
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_turn(mut self, turn: Turn) -> Self {
        self.turn = turn;
        self
    }

    pub fn steps(&self) -> Result<Subdivision, GeometryError> {
        subdivide_with(golden_root(self.length), self.depth, self.orientation, self.turn)
    }

    /// Draw remainder and square outlines per level. Returns the level count.
    pub fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        style: &OverlayStyle,
    ) -> Result<usize, GeometryError> {
        let mut drawn = 0;
        for step in self.steps()? {
            let pen = color_at(step.depth);
            surface.draw_rectangle(step.remainder, pen, style.stroke_width);
            surface.draw_rectangle(step.square, pen, style.stroke_width);
            drawn += 1;
        }
        log::debug!("phi matrix: {} levels at {} ({:?})", drawn, self.orientation, self.turn);
        Ok(drawn)
    }
}

// ============================================================================
// TESTS
// ============================================================================
