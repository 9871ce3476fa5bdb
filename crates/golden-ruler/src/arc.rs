//! Elliptical arc construction.
//!
//! An arc is described the way a drawing API wants it: a box holding the whole
//! ellipse, a start angle and a signed sweep (degrees, 0° pointing right,
//! positive sweeping clockwise on a y-down screen). [`ArcSpec::path`] turns
//! that into explicit endpoints, radii and flags, which is what an SVG `A`
//! command or a path builder consumes.
//!
//! ## Quarter circles inside a square
//!
//! The spiral draws one quarter circle per square, with both ends on two
//! adjacent corners. The circle it belongs to is centered on a corner of the
//! square, so the ellipse box is twice the square's size and shifted so that
//! the visible quarter lands inside the square. Which way it shifts depends
//! on the 90° band the start angle falls in, see [`quarter_bounds`].

use lyon_geom::{Angle, ArcFlags, SvgArc, point, vector};

use crate::color::Rgb;
use crate::geometry::{Line, Point, Rect};
use crate::orientation::Orientation;
use crate::surface::Surface;

/// Direction an arc is traced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepDirection {
    Clockwise,
    Counterclockwise,
}

/// A segment of the ellipse inscribed in `bounds`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpec {
    /// Box holding the whole ellipse.
    pub bounds: Rect,
    /// Start angle in degrees, 0° to the right.
    pub start_degrees: f64,
    /// Signed sweep in degrees; negative is counterclockwise.
    pub sweep_degrees: f64,
}

/// A resolved arc: move to `start`, arc to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPath {
    pub start: Point,
    pub end: Point,
    /// Ellipse radii (half the box width and height).
    pub radius_x: f64,
    pub radius_y: f64,
    pub large_arc: bool,
    pub direction: SweepDirection,
}

impl ArcSpec {
    pub fn new(bounds: Rect, start_degrees: f64, sweep_degrees: f64) -> Self {
        Self {
            bounds,
            start_degrees,
            sweep_degrees,
        }
    }

    /// Resolve endpoints, radii and flags.
    pub fn path(&self) -> ArcPath {
        let start = self.start_degrees.to_radians();
        let end = (self.start_degrees + self.sweep_degrees).to_radians();

        let dx = self.bounds.width / 2.0;
        let dy = self.bounds.height / 2.0;
        let cx = self.bounds.x + dx;
        let cy = self.bounds.y + dy;

        ArcPath {
            start: Point::new(cx + start.cos() * dx, cy + start.sin() * dy),
            end: Point::new(cx + end.cos() * dx, cy + end.sin() * dy),
            radius_x: dx,
            radius_y: dy,
            large_arc: self.sweep_degrees.abs() > 180.0,
            direction: if self.sweep_degrees < 0.0 {
                SweepDirection::Counterclockwise
            } else {
                SweepDirection::Clockwise
            },
        }
    }

    /// Same arc moved by `(dx, dy)`.
    pub fn translate(&self, dx: f64, dy: f64) -> ArcSpec {
        ArcSpec::new(self.bounds.translate(dx, dy), self.start_degrees, self.sweep_degrees)
    }
}

impl ArcPath {
    /// SVG path data: `M sx,sy A rx,ry 0 large,sweep ex,ey`.
    pub fn svg_data(&self) -> String {
        format!(
            "M{:.3},{:.3} A{:.3},{:.3} 0 {},{} {:.3},{:.3}",
            self.start.x,
            self.start.y,
            self.radius_x,
            self.radius_y,
            self.large_arc as u8,
            (self.direction == SweepDirection::Clockwise) as u8,
            self.end.x,
            self.end.y
        )
    }

    /// The same arc as a lyon SVG arc.
    pub fn to_svg_arc(&self) -> SvgArc<f64> {
        SvgArc {
            from: point(self.start.x, self.start.y),
            to: point(self.end.x, self.end.y),
            radii: vector(self.radius_x, self.radius_y),
            x_rotation: Angle::radians(0.0),
            flags: ArcFlags {
                large_arc: self.large_arc,
                sweep: self.direction == SweepDirection::Clockwise,
            },
        }
    }

    /// Approximate the arc with line segments no further than `tolerance`
    /// from the true curve. Consecutive segments share endpoints.
    pub fn flatten(&self, tolerance: f64) -> Vec<Line> {
        let mut lines = Vec::new();
        self.to_svg_arc().for_each_flattened(tolerance, &mut |segment| {
            lines.push(Line::new(segment.from.x, segment.from.y, segment.to.x, segment.to.y));
        });
        lines
    }
}

/// Ellipse box for a quarter circle whose visible part sits in `square`.
///
/// The band of `start_degrees` (mod 360) picks the corner the circle is
/// centered on:
/// - `[180, 270)`: top-left stays put
/// - `[270, 360)`: shifted left by the width
/// - `[0, 90)`: shifted left and up
/// - `[90, 180)`: shifted up (by the width; squares make it the same thing)
pub fn quarter_bounds(square: Rect, start_degrees: f64) -> Rect {
    let band = start_degrees.rem_euclid(360.0);
    let doubled = square.scale_size(2.0);

    if (180.0..270.0).contains(&band) {
        doubled
    } else if (270.0..360.0).contains(&band) {
        doubled.translate(-square.width, 0.0)
    } else if (0.0..90.0).contains(&band) {
        doubled.translate(-square.width, -square.height)
    } else {
        doubled.translate(0.0, -square.width)
    }
}

/// The spiral's quarter circle for one subdivision square.
///
/// Starts at `orientation + 180°` and sweeps 90° clockwise, so both ends land
/// on adjacent corners of `square`.
pub fn build_quarter_arc(square: Rect, orientation: Orientation) -> ArcSpec {
    let start_degrees = ((orientation.degrees() + 180) % 360) as f64;
    ArcSpec::new(quarter_bounds(square, start_degrees), start_degrees, 90.0)
}

/// Stroke an arc as an open, unfilled path.
pub fn render_arc<S: Surface + ?Sized>(
    surface: &mut S,
    arc: &ArcSpec,
    stroke: Rgb,
    stroke_width: f64,
) {
    surface.draw_arc_path(arc, stroke, stroke_width);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn near(a: Point, b: Point) -> bool {
        a.distance(b) < 1e-9
    }

    #[test]
    fn quarter_arc_at_zero_degrees() {
        let square = Rect::new(0.0, 0.0, 10.0, 10.0);
        let arc = build_quarter_arc(square, Orientation::Deg0);

        assert_eq!(arc.bounds, Rect::new(0.0, 0.0, 20.0, 20.0));
        assert_eq!(arc.start_degrees, 180.0);
        assert_eq!(arc.sweep_degrees, 90.0);

        let path = arc.path();
        assert!(near(path.start, Point::new(0.0, 10.0)), "start {:?}", path.start);
        assert!(near(path.end, Point::new(10.0, 0.0)), "end {:?}", path.end);
        assert_eq!(path.radius_x, 10.0);
        assert_eq!(path.radius_y, 10.0);
        assert!(!path.large_arc);
        assert_eq!(path.direction, SweepDirection::Clockwise);
    }

    #[test]
    fn quarter_arc_ends_on_adjacent_corners() {
        let square = Rect::new(30.0, 40.0, 8.0, 8.0);
        let tl = Point::new(30.0, 40.0);
        let tr = Point::new(38.0, 40.0);
        let br = Point::new(38.0, 48.0);
        let bl = Point::new(30.0, 48.0);

        let expected = [
            (Orientation::Deg0, bl, tr),
            (Orientation::Deg90, tl, br),
            (Orientation::Deg180, tr, bl),
            (Orientation::Deg270, br, tl),
        ];

        for (orientation, start, end) in expected {
            let path = build_quarter_arc(square, orientation).path();
            assert!(near(path.start, start), "{}: start {:?}", orientation, path.start);
            assert!(near(path.end, end), "{}: end {:?}", orientation, path.end);
        }
    }

    #[test]
    fn bands_shift_the_box() {
        let square = Rect::new(10.0, 10.0, 4.0, 4.0);
        assert_eq!(quarter_bounds(square, 200.0), Rect::new(10.0, 10.0, 8.0, 8.0));
        assert_eq!(quarter_bounds(square, 300.0), Rect::new(6.0, 10.0, 8.0, 8.0));
        assert_eq!(quarter_bounds(square, 45.0), Rect::new(6.0, 6.0, 8.0, 8.0));
        assert_eq!(quarter_bounds(square, 135.0), Rect::new(10.0, 6.0, 8.0, 8.0));
        // Out-of-range angles fold into the same bands.
        assert_eq!(quarter_bounds(square, 540.0), quarter_bounds(square, 180.0));
        assert_eq!(quarter_bounds(square, -90.0), quarter_bounds(square, 270.0));
    }

    #[test]
    fn general_arc_flags() {
        let bounds = Rect::new(0.0, 0.0, 40.0, 20.0);

        let ccw = ArcSpec::new(bounds, 0.0, -90.0).path();
        assert_eq!(ccw.direction, SweepDirection::Counterclockwise);
        assert!(!ccw.large_arc);
        assert!(near(ccw.start, Point::new(40.0, 10.0)));
        assert!(near(ccw.end, Point::new(20.0, 0.0)));

        let big = ArcSpec::new(bounds, 0.0, 270.0).path();
        assert!(big.large_arc);
        assert_eq!(big.radius_x, 20.0);
        assert_eq!(big.radius_y, 10.0);

        let half = ArcSpec::new(bounds, 90.0, 180.0).path();
        assert!(!half.large_arc, "exactly 180 is not a large arc");
    }

    #[test]
    fn svg_data_matches_path() {
        let path = build_quarter_arc(Rect::new(0.0, 0.0, 10.0, 10.0), Orientation::Deg0).path();
        assert_eq!(path.svg_data(), "M0.000,10.000 A10.000,10.000 0 0,1 10.000,0.000");
    }

    #[test]
    fn lyon_agrees_on_the_center() {
        let square = Rect::new(5.0, 5.0, 20.0, 20.0);
        for &orientation in Orientation::all() {
            let spec = build_quarter_arc(square, orientation);
            let arc = spec.path().to_svg_arc().to_arc();
            let center = spec.bounds.center();
            assert!((arc.center.x - center.x).abs() < 1e-6, "{}: {:?}", orientation, arc.center);
            assert!((arc.center.y - center.y).abs() < 1e-6, "{}: {:?}", orientation, arc.center);
        }
    }

    #[test]
    fn flattened_points_stay_on_the_circle() {
        let square = Rect::new(0.0, 0.0, 100.0, 100.0);
        for &orientation in Orientation::all() {
            let spec = build_quarter_arc(square, orientation);
            let path = spec.path();
            let lines = path.flatten(0.05);
            assert!(lines.len() > 4, "{}: only {} segments", orientation, lines.len());

            let center = spec.bounds.center();
            for line in &lines {
                let r = line.end().distance(center);
                assert!((r - 100.0).abs() < 1e-6, "{}: radius {}", orientation, r);
            }

            assert!(lines[0].start().distance(path.start) < 1e-6);
            assert!(lines.last().unwrap().end().distance(path.end) < 1e-6);
            for pair in lines.windows(2) {
                assert!(pair[0].end().distance(pair[1].start()) < 1e-9);
            }
        }
    }
}
