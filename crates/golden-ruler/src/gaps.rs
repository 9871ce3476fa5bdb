//! Gap measurement between ruler pins.
//!
//! Pins are markers the user drops along the ruler. [`measure`] orders them
//! along the ruler axis and reports the distance between each neighbouring
//! pair; [`render_gaps`] draws those distances as a colored rule with a
//! label above each segment.
//!
//! On a horizontal ruler, pins without a label are skipped: the live pin
//! that follows the cursor has none until it is dropped, and it should not
//! produce a gap while it moves. A vertical ruler keeps every pin. The two
//! axes have always behaved differently here; keep it that way until the
//! ruler's host says otherwise.

use crate::color::Rgb;
use crate::geometry::{Point, pt_to_dip};
use crate::orientation::Orientation;
use crate::surface::{Surface, Translate};

/// Distance of the gap measurer from the ruler edge.
pub const GAP_MEASURER_OFFSET: f64 = 100.0;

/// A marker on the ruler axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Pin {
    /// Left coordinate on a horizontal ruler, top coordinate on a vertical one.
    pub position: f64,
    pub color: Rgb,
    /// Reading shown next to the pin. `None` while the pin is still moving.
    pub label: Option<String>,
    /// Ruler orientation the pin was dropped on (0° or 90°).
    pub orientation: Orientation,
}

/// Distance between two neighbouring pins.
#[derive(Debug, Clone, PartialEq)]
pub struct GapSegment {
    pub from: Pin,
    pub to: Pin,
    /// `to.position - from.position`.
    pub gap: f64,
    /// Copied from `from`.
    pub color: Rgb,
}

impl Pin {
    pub fn new(position: f64, color: Rgb, orientation: Orientation) -> Self {
        Self {
            position,
            color,
            label: None,
            orientation,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// True when the label is missing, empty or only whitespace.
    pub fn is_unlabeled(&self) -> bool {
        self.label.as_deref().is_none_or(|l| l.trim().is_empty())
    }
}

/// Order pins along the axis and measure each neighbouring gap.
///
/// Fewer than two pins (after filtering) gives no segments. The sort is
/// stable, so pins sharing a position keep their input order.
pub fn measure(pins: &[Pin], horizontal: bool) -> Vec<GapSegment> {
    let mut ordered: Vec<&Pin> = if horizontal {
        pins.iter().filter(|p| !p.is_unlabeled()).collect()
    } else {
        pins.iter().collect()
    };

    // total_cmp keeps the sort well-defined even if a NaN slips in.
    ordered.sort_by(|a, b| a.position.total_cmp(&b.position));

    ordered
        .windows(2)
        .map(|pair| {
            let (from, to) = (pair[0], pair[1]);
            GapSegment {
                from: from.clone(),
                to: to.clone(),
                gap: to.position - from.position,
                color: from.color,
            }
        })
        .collect()
}

/// Text shown for a gap: shortest decimal that round-trips.
pub fn format_gap(gap: f64) -> String {
    format!("{}", gap)
}

/// Layout constants for the gap rule and pins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapStyle {
    /// Distance of the rule from the measurer's edge (y on a horizontal
    /// ruler, x on a vertical one).
    pub rule_offset: f64,
    pub stroke_width: f64,
    pub font_size: f64,
}

impl Default for GapStyle {
    fn default() -> Self {
        Self {
            rule_offset: 20.0,
            stroke_width: 1.5,
            font_size: pt_to_dip(8.0),
        }
    }
}

/// Where a gap label goes along the axis.
///
/// Centered over the segment when it fits, otherwise pinned to the segment
/// start so it doesn't spill over the next pin.
pub fn label_start(segment: &GapSegment, label_width: f64) -> f64 {
    let span = segment.to.position - segment.from.position;
    if span - label_width > 0.0 {
        segment.from.position + (span - label_width) / 2.0
    } else {
        segment.from.position
    }
}

/// Draw each segment as a rule plus its gap label.
pub fn render_gaps<S: Surface + ?Sized>(
    surface: &mut S,
    segments: &[GapSegment],
    horizontal: bool,
    style: &GapStyle,
) {
    for segment in segments {
        let a = segment.from.position;
        let b = segment.to.position;
        let text = format_gap(segment.gap);
        let size = surface.measure_text(&text, style.font_size);
        let along = label_start(segment, size.width);

        let (p1, p2, label_at) = if horizontal {
            (
                Point::new(a, style.rule_offset),
                Point::new(b, style.rule_offset),
                Point::new(along, 0.0),
            )
        } else {
            (
                Point::new(style.rule_offset, a),
                Point::new(style.rule_offset, b),
                Point::new(style.rule_offset, along),
            )
        };

        surface.draw_line(p1, p2, segment.color, style.stroke_width);
        surface.draw_text(&text, label_at, style.font_size, segment.color);
    }
}

/// Draw the gap measurer where the ruler window puts it: [`render_gaps`]
/// pushed [`GAP_MEASURER_OFFSET`] away from the ruler edge, clear of the pin
/// labels.
pub fn render_gap_measurer<S: Surface + ?Sized>(
    surface: &mut S,
    segments: &[GapSegment],
    horizontal: bool,
    style: &GapStyle,
) {
    let (dx, dy) = if horizontal {
        (0.0, GAP_MEASURER_OFFSET)
    } else {
        (GAP_MEASURER_OFFSET, 0.0)
    };
    render_gaps(&mut Translate::new(surface, dx, dy), segments, horizontal, style);
}

/// Draw a pin: a line of `length` running across the ruler from the pin
/// position, with its label just above and left of the start.
pub fn render_pin<S: Surface + ?Sized>(surface: &mut S, pin: &Pin, length: f64, style: &GapStyle) {
    let (start, end) = if pin.orientation.is_horizontal() {
        (Point::new(pin.position, 0.0), Point::new(pin.position, length))
    } else {
        (Point::new(0.0, pin.position), Point::new(length, pin.position))
    };

    surface.draw_line(start, end, pin.color, style.stroke_width);

    if let Some(label) = pin.label.as_deref().filter(|l| !l.is_empty()) {
        surface.draw_text(label, start.offset(-15.0, -15.0), style.font_size, pin.color);
    }
}

// ============================================================================
// TESTS
// ============================================================================
