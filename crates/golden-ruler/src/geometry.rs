//! Core geometry types for golden-ruler.
//!
//! ## Rust Lesson #3: Structs & Derives
//!
//! The `#[derive(...)]` macro auto-generates common functionality:
//! - `Debug` = lets you print with `{:?}`
//! - `Clone` / `Copy` = small stack values that copy implicitly
//! - `PartialEq` = can compare with `==`
//!
//! Everything here is `Copy` and passed by value.

/// Device-independent units per inch.
pub const DIPS_PER_INCH: f64 = 96.0;

/// Typographic points per inch.
pub const POINTS_PER_INCH: f64 = 72.0;

/// A 2D point with x,y coordinates (y grows downward, screen style).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A line segment defined by two endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// An axis-aligned rectangle: origin at the top-left corner plus a size.
///
/// Width and height are expected to be non-negative. Constructors don't
/// enforce it; the subdivision entry point rejects degenerate roots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Shift the point by `(dx, dy)`.
    #[inline]
    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

impl Line {
    #[inline]
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Build a line from two points.
    #[inline]
    pub fn between(from: Point, to: Point) -> Self {
        Self::new(from.x, from.y, to.x, to.y)
    }

    /// Get the start point of the line.
    #[inline]
    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    /// Get the end point of the line.
    #[inline]
    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    /// Length of the line segment.
    #[inline]
    pub fn length(&self) -> f64 {
        self.start().distance(self.end())
    }
}

impl Rect {
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Build a rectangle from an origin point and a size.
    #[inline]
    pub fn from_origin(origin: Point, width: f64, height: f64) -> Self {
        Self::new(origin.x, origin.y, width, height)
    }

    /// Top-left corner.
    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Center of the rectangle.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// The longer of width and height.
    #[inline]
    pub fn longer_side(&self) -> f64 {
        if self.height > self.width { self.height } else { self.width }
    }

    /// The shorter of width and height.
    #[inline]
    pub fn shorter_side(&self) -> f64 {
        if self.height > self.width { self.width } else { self.height }
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// True when either side is zero, negative, infinite or NaN.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        let positive = self.width > 0.0 && self.height > 0.0;
        !(positive && self.width.is_finite() && self.height.is_finite())
    }

    /// Same size, origin shifted by `(dx, dy)`.
    #[inline]
    pub fn translate(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Same origin, both sides multiplied by `factor`.
    #[inline]
    pub fn scale_size(&self, factor: f64) -> Rect {
        Rect::new(self.x, self.y, self.width * factor, self.height * factor)
    }

    /// The four edges, clockwise from the top edge.
    pub fn edges(&self) -> [Line; 4] {
        let (l, t, r, b) = (self.x, self.y, self.right(), self.bottom());
        [
            Line::new(l, t, r, t),
            Line::new(r, t, r, b),
            Line::new(r, b, l, b),
            Line::new(l, b, l, t),
        ]
    }
}

/// Convert a font size in points to device-independent units.
///
/// 8pt becomes 10.666.. dips, the label size used by every overlay.
#[inline]
pub fn pt_to_dip(points: f64) -> f64 {
    points * DIPS_PER_INCH / POINTS_PER_INCH
}

// ============================================================================
// TESTS
// ============================================================================
