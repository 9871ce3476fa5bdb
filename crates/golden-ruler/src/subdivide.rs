//! Recursive golden-rectangle subdivision.
//!
//! A golden rectangle splits into a square and a smaller rectangle with the
//! same proportions. Repeating that on the remainder, turning the corner we
//! carve from by 90° each time, gives the nested squares of the golden spiral.
//! The phi matrix overlay walks the same steps but only draws the rectangles.
//!
//! ## Rust Lesson #11: Iterators
//!
//! Instead of recursing and drawing as we go, [`Subdivision`] implements
//! `Iterator`. Each call to `next()` performs one level of the recursion, so
//! callers can `take()`, `collect()` or stop early without allocating.

use crate::error::GeometryError;
use crate::geometry::{Point, Rect};
use crate::orientation::Orientation;

/// Golden ratio, truncated to three decimals. Every split uses this value,
/// not the irrational constant.
pub const GOLDEN_RATIO: f64 = 1.618;

/// Depth used by the spiral and phi matrix overlays.
pub const DEFAULT_DEPTH: usize = 11;

/// Hard cap on recursion depth. Squares past this are far below a pixel.
pub const MAX_DEPTH: usize = 24;

/// One level of the subdivision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubdivisionStep {
    /// The square carved off at this level.
    pub square: Rect,
    /// What is left over; the next level subdivides this.
    pub remainder: Rect,
    /// Corner the square was carved from.
    pub orientation: Orientation,
    /// Remaining depth, counting down to 1 on the last step.
    pub depth: usize,
}

/// How the orientation changes between levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Turn {
    /// +90° per level: the spiral layout.
    #[default]
    Rotate,
    /// Same corner every level: squares stack toward one side.
    Hold,
}

/// Lazy sequence of [`SubdivisionStep`]s. Built by [`subdivide`].
#[derive(Debug, Clone)]
pub struct Subdivision {
    rect: Rect,
    orientation: Orientation,
    remaining: usize,
    turn: Turn,
}

/// The root rectangle both overlays start from: `length` wide, `length / φ`
/// tall, anchored at the origin.
pub fn golden_root(length: f64) -> Rect {
    Rect::new(0.0, 0.0, length, length / GOLDEN_RATIO)
}

/// Subdivide `root` into at most `max_depth` square/remainder pairs, turning
/// the orientation by +90° per level.
///
/// Fails with `DegenerateRectangle` when either side of `root` is not
/// positive. A `max_depth` of zero gives an empty sequence; anything above
/// [`MAX_DEPTH`] is truncated.
pub fn subdivide(
    root: Rect,
    max_depth: usize,
    orientation: Orientation,
) -> Result<Subdivision, GeometryError> {
    subdivide_with(root, max_depth, orientation, Turn::Rotate)
}

/// [`subdivide`] with an explicit turn policy.
pub fn subdivide_with(
    root: Rect,
    max_depth: usize,
    orientation: Orientation,
    turn: Turn,
) -> Result<Subdivision, GeometryError> {
    if root.is_degenerate() {
        return Err(GeometryError::DegenerateRectangle {
            width: root.width,
            height: root.height,
        });
    }

    let remaining = if max_depth > MAX_DEPTH {
        log::debug!("subdivision depth {} truncated to {}", max_depth, MAX_DEPTH);
        MAX_DEPTH
    } else {
        max_depth
    };

    Ok(Subdivision {
        rect: root,
        orientation,
        remaining,
        turn,
    })
}

/// Carve one square out of `rect` from the corner named by `orientation`.
///
/// Returns `(square, remainder)`. The square side is `a / φ` where `a` is the
/// longer side of `rect`.
pub fn split(rect: Rect, orientation: Orientation) -> (Rect, Rect) {
    let a = rect.longer_side();
    let a1 = a / GOLDEN_RATIO;

    // (square origin, remainder origin, remainder size)
    let (square_at, rest_at, rest_w, rest_h) = match orientation {
        Orientation::Deg0 => (
            rect.origin(),
            Point::new(rect.x + a1, rect.y),
            a - a1,
            a1,
        ),
        Orientation::Deg90 => (
            rect.origin(),
            Point::new(rect.x, rect.y + a1),
            a1,
            a - a1,
        ),
        Orientation::Deg180 => (
            Point::new(rect.x + a - a1, rect.y),
            rect.origin(),
            a - a1,
            a1,
        ),
        Orientation::Deg270 => (
            Point::new(rect.x, rect.y + a - a1),
            rect.origin(),
            a1,
            a - a1,
        ),
    };

    (
        Rect::from_origin(square_at, a1, a1),
        Rect::from_origin(rest_at, rest_w, rest_h),
    )
}

impl Subdivision {
    /// Levels left to produce.
    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

impl Iterator for Subdivision {
    type Item = SubdivisionStep;

    fn next(&mut self) -> Option<SubdivisionStep> {
        if self.remaining == 0 {
            return None;
        }

        let (square, remainder) = split(self.rect, self.orientation);
        let step = SubdivisionStep {
            square,
            remainder,
            orientation: self.orientation,
            depth: self.remaining,
        };
        log::trace!(
            "depth {} at {}: square {:.3} at ({:.3}, {:.3})",
            step.depth,
            step.orientation,
            square.width,
            square.x,
            square.y
        );

        self.rect = remainder;
        if self.turn == Turn::Rotate {
            self.orientation = self.orientation.turned();
        }
        self.remaining -= 1;

        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Subdivision {}

impl std::iter::FusedIterator for Subdivision {}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    fn rect_close(a: Rect, b: Rect) -> bool {
        close(a.x, b.x) && close(a.y, b.y) && close(a.width, b.width) && close(a.height, b.height)
    }

    #[test]
    fn zero_depth_is_empty() {
        for &o in Orientation::all() {
            let steps: Vec<_> = subdivide(golden_root(100.0), 0, o).unwrap().collect();
            assert!(steps.is_empty(), "{} produced steps", o);
        }
    }

    #[test]
    fn degenerate_root_is_refused() {
        let err = subdivide(Rect::new(0.0, 0.0, 0.0, 10.0), 3, Orientation::Deg0).unwrap_err();
        assert_eq!(err, GeometryError::DegenerateRectangle { width: 0.0, height: 10.0 });

        assert!(subdivide(Rect::new(0.0, 0.0, 10.0, -1.0), 3, Orientation::Deg0).is_err());
        assert!(subdivide(golden_root(f64::INFINITY), 3, Orientation::Deg0).is_err());
    }

    #[test]
    fn first_step_for_each_orientation() {
        let root = Rect::new(10.0, 20.0, 161.8, 100.0);
        let a = 161.8;
        let a1 = a / GOLDEN_RATIO; // 100.0

        let cases = [
            (
                Orientation::Deg0,
                Rect::new(10.0, 20.0, a1, a1),
                Rect::new(10.0 + a1, 20.0, a - a1, a1),
            ),
            (
                Orientation::Deg90,
                Rect::new(10.0, 20.0, a1, a1),
                Rect::new(10.0, 20.0 + a1, a1, a - a1),
            ),
            (
                Orientation::Deg180,
                Rect::new(10.0 + a - a1, 20.0, a1, a1),
                Rect::new(10.0, 20.0, a - a1, a1),
            ),
            (
                Orientation::Deg270,
                Rect::new(10.0, 20.0 + a - a1, a1, a1),
                Rect::new(10.0, 20.0, a1, a - a1),
            ),
        ];

        for (orientation, square, remainder) in cases {
            let step = subdivide(root, 1, orientation).unwrap().next().unwrap();
            assert!(rect_close(step.square, square), "{}: square {:?}", orientation, step.square);
            assert!(
                rect_close(step.remainder, remainder),
                "{}: remainder {:?}",
                orientation,
                step.remainder
            );
            assert_eq!(step.orientation, orientation);
            assert_eq!(step.depth, 1);
        }
    }

    #[test]
    fn next_level_starts_from_the_remainder() {
        let steps: Vec<_> = subdivide(golden_root(550.0), 3, Orientation::Deg0)
            .unwrap()
            .collect();
        for pair in steps.windows(2) {
            let (square, _) = split(pair[0].remainder, pair[1].orientation);
            assert_eq!(pair[1].square, square);
        }
    }

    #[test]
    fn orientation_cycles_every_four_steps() {
        let steps: Vec<_> = subdivide(golden_root(300.0), 5, Orientation::Deg90)
            .unwrap()
            .collect();
        let degrees: Vec<i32> = steps.iter().map(|s| s.orientation.degrees()).collect();
        assert_eq!(degrees, vec![90, 180, 270, 0, 90]);
        assert_eq!(steps[0].orientation, steps[4].orientation);
    }

    #[test]
    fn hold_keeps_the_corner() {
        let steps: Vec<_> = subdivide_with(golden_root(300.0), 4, Orientation::Deg180, Turn::Hold)
            .unwrap()
            .collect();
        assert!(steps.iter().all(|s| s.orientation == Orientation::Deg180));
    }

    #[test]
    fn depth_is_capped() {
        let sub = subdivide(golden_root(1000.0), MAX_DEPTH + 10, Orientation::Deg0).unwrap();
        assert_eq!(sub.len(), MAX_DEPTH);
        assert_eq!(sub.count(), MAX_DEPTH);
    }

    #[test]
    fn default_depth_squares_shrink() {
        let steps: Vec<_> = subdivide(golden_root(550.0), DEFAULT_DEPTH, Orientation::Deg0)
            .unwrap()
            .collect();
        assert_eq!(steps.len(), DEFAULT_DEPTH);
        for pair in steps.windows(2) {
            assert!(pair[1].square.width < pair[0].square.width);
        }
    }

    #[test]
    fn iteration_can_stop_early() {
        let mut sub = subdivide(golden_root(100.0), 8, Orientation::Deg0).unwrap();
        let first_two: Vec<_> = sub.by_ref().take(2).collect();
        assert_eq!(first_two.len(), 2);
        assert_eq!(sub.remaining(), 6);
        assert_eq!(sub.next().map(|s| s.depth), Some(6));
    }

    proptest! {
        #[test]
        fn yields_exactly_depth_steps(
            length in 1.0f64..5000.0,
            depth in 0usize..=MAX_DEPTH,
            index in 0usize..4,
        ) {
            let orientation = Orientation::all()[index];
            let steps: Vec<_> = subdivide(golden_root(length), depth, orientation)
                .unwrap()
                .collect();
            prop_assert_eq!(steps.len(), depth);
            for (i, step) in steps.iter().enumerate() {
                prop_assert_eq!(step.depth, depth - i);
            }
            if let Some(last) = steps.last() {
                prop_assert_eq!(last.depth, 1);
            }
        }

        #[test]
        fn square_and_remainder_partition_each_level(
            length in 1.0f64..5000.0,
            depth in 1usize..=12,
            index in 0usize..4,
        ) {
            let root = golden_root(length);
            let orientation = Orientation::all()[index];
            let mut current = root;
            for step in subdivide(root, depth, orientation).unwrap() {
                let a = current.longer_side();
                let reference = a * (a / GOLDEN_RATIO);
                let covered = step.square.area() + step.remainder.area();
                prop_assert!((covered - reference).abs() <= 1e-9 * reference.max(1.0));
                // The truncated ratio leaves a sliver well under 0.1%.
                prop_assert!((covered - current.area()).abs() <= 1e-3 * current.area());
                current = step.remainder;
            }
        }

        #[test]
        fn same_input_same_output(length in 1.0f64..2000.0, depth in 0usize..16) {
            let root = golden_root(length);
            let a: Vec<_> = subdivide(root, depth, Orientation::Deg0).unwrap().collect();
            let b: Vec<_> = subdivide(root, depth, Orientation::Deg0).unwrap().collect();
            prop_assert_eq!(a, b);
        }
    }
}
