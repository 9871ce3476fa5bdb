//! Ruler interaction state.
//!
//! [`MeasurementSession`] is everything the ruler window tracks between
//! pointer moves: the axis it lies on, which overlay mode is active, the
//! current reading and the dropped pins. It owns no window; the host feeds it
//! readings and key presses and draws what it reports.
//!
//! ## Pins
//!
//! In pin mode the last entry of the pin list is the cursor pin. It follows
//! the reading and carries no label. Dropping labels it with the reading and
//! starts a fresh cursor pin, so a session with `n` dropped pins holds
//! `n + 1` pins.

use crate::color::color_at;
use crate::gaps::{GapSegment, GapStyle, Pin, measure, render_gap_measurer, render_pin};
use crate::orientation::Orientation;
use crate::subdivide::GOLDEN_RATIO;
use crate::surface::Surface;

/// Smallest ruler the window shows.
pub const MIN_RULER_LENGTH: f64 = 550.0;

/// Readings up to this keep the ruler at [`MIN_RULER_LENGTH`].
pub const MIN_RULER_READING: f64 = 200.0;

/// Past [`MIN_RULER_READING`], the reading fills this share of the ruler.
pub const RULER_FILL: f64 = 0.7;

/// Length of a pin line across the ruler.
pub const PIN_LENGTH: f64 = 2000.0;

/// Pins needed before gaps are measured: the cursor pin plus two dropped.
pub const MIN_MEASURED_PINS: usize = 3;

/// What the ruler overlays while measuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RulerMode {
    /// Golden spiral sized from the reading.
    #[default]
    GoldenRectangle,
    /// Pins and the gap measurer.
    Pin,
    /// Plain ruler.
    Standard,
}

impl RulerMode {
    /// Mode-switch key order: Pin, Standard, GoldenRectangle, back to Pin.
    pub fn next(self) -> RulerMode {
        match self {
            RulerMode::Pin => RulerMode::Standard,
            RulerMode::Standard => RulerMode::GoldenRectangle,
            RulerMode::GoldenRectangle => RulerMode::Pin,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RulerMode::GoldenRectangle => "golden-rectangle",
            RulerMode::Pin => "pin",
            RulerMode::Standard => "standard",
        }
    }
}

impl std::fmt::Display for RulerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// State of one ruler window.
#[derive(Debug, Clone)]
pub struct MeasurementSession {
    axis: Orientation,
    spiral_orientation: Orientation,
    mode: RulerMode,
    reading: f64,
    /// Where the ruler's zero mark sits along its axis.
    origin: f64,
    pins: Vec<Pin>,
}

impl Default for MeasurementSession {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl MeasurementSession {
    /// Horizontal ruler in golden-rectangle mode, zero mark at `origin`.
    pub fn new(origin: f64) -> Self {
        Self {
            axis: Orientation::Deg0,
            spiral_orientation: Orientation::Deg0,
            mode: RulerMode::default(),
            reading: 0.0,
            origin,
            pins: Vec::new(),
        }
    }

    pub fn axis(&self) -> Orientation {
        self.axis
    }

    pub fn mode(&self) -> RulerMode {
        self.mode
    }

    pub fn reading(&self) -> f64 {
        self.reading
    }

    pub fn origin(&self) -> f64 {
        self.origin
    }

    pub fn spiral_orientation(&self) -> Orientation {
        self.spiral_orientation
    }

    pub fn set_spiral_orientation(&mut self, orientation: Orientation) {
        self.spiral_orientation = orientation;
    }

    /// All pins, cursor pin last.
    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    /// Pins that have been dropped (labeled).
    pub fn dropped_pins(&self) -> impl Iterator<Item = &Pin> {
        self.pins.iter().filter(|p| !p.is_unlabeled())
    }

    fn cursor_position(&self) -> f64 {
        self.origin + self.reading
    }

    fn new_cursor_pin(&self) -> Pin {
        Pin::new(self.cursor_position(), color_at(self.pins.len() + 1), self.axis)
    }

    /// Record a new reading. In pin mode the cursor pin follows it.
    pub fn update_reading(&mut self, reading: f64) {
        self.reading = reading;
        if self.mode != RulerMode::Pin {
            return;
        }

        let position = self.cursor_position();
        match self.pins.last_mut() {
            Some(cursor) if cursor.is_unlabeled() => cursor.position = position,
            _ => {
                let pin = self.new_cursor_pin();
                self.pins.push(pin);
            }
        }
    }

    /// Ruler length for the current reading.
    pub fn ruler_length(&self) -> f64 {
        if self.reading > MIN_RULER_READING {
            self.reading / RULER_FILL
        } else {
            MIN_RULER_LENGTH
        }
    }

    /// Width of the golden rectangle overlay.
    ///
    /// When the spiral's long side runs along the ruler the reading is used
    /// as is; across the ruler it is the short side, so the width grows by φ.
    pub fn golden_length(&self) -> f64 {
        if self.axis.same_axis(self.spiral_orientation) {
            self.reading
        } else {
            self.reading * GOLDEN_RATIO
        }
    }

    /// Label the cursor pin with the reading and start a new cursor pin.
    ///
    /// Does nothing outside pin mode. Returns whether a pin was dropped.
    pub fn drop_pin(&mut self) -> bool {
        if self.mode != RulerMode::Pin {
            return false;
        }

        let label = format!("{}", self.reading);
        let position = self.cursor_position();
        match self.pins.last_mut() {
            Some(cursor) if cursor.is_unlabeled() => {
                cursor.position = position;
                cursor.label = Some(label);
            }
            _ => {
                let pin = self.new_cursor_pin().with_label(label);
                self.pins.push(pin);
            }
        }

        let cursor = self.new_cursor_pin();
        self.pins.push(cursor);
        log::debug!("pin dropped at {} ({} pins)", position, self.pins.len());
        true
    }

    /// True when the cursor sits on a dropped pin.
    pub fn can_remove_pin(&self) -> bool {
        let position = self.cursor_position();
        self.mode == RulerMode::Pin && self.dropped_pins().any(|p| p.position == position)
    }

    /// Remove the dropped pin under the cursor. Returns whether one was removed.
    pub fn remove_pin(&mut self) -> bool {
        if !self.can_remove_pin() {
            return false;
        }
        let position = self.cursor_position();
        let Some(index) = self
            .pins
            .iter()
            .position(|p| !p.is_unlabeled() && p.position == position)
        else {
            return false;
        };
        self.pins.remove(index);
        log::debug!("pin removed at {} ({} pins)", position, self.pins.len());
        true
    }

    /// The pin key: remove the pin under the cursor if there is one,
    /// otherwise drop a new one.
    pub fn toggle_pin(&mut self) -> bool {
        if self.can_remove_pin() {
            self.remove_pin()
        } else {
            self.drop_pin()
        }
    }

    pub fn clear_pins(&mut self) {
        self.pins.clear();
    }

    /// Switch mode. Any mode other than pin mode drops all pins.
    pub fn set_mode(&mut self, mode: RulerMode) {
        if mode != RulerMode::Pin {
            self.clear_pins();
        }
        log::debug!("mode {} -> {}", self.mode, mode);
        self.mode = mode;
    }

    pub fn cycle_mode(&mut self) -> RulerMode {
        self.set_mode(self.mode.next());
        self.mode
    }

    /// Flip the ruler between horizontal and vertical. Resets the reading
    /// and drops all pins.
    pub fn rotate(&mut self) {
        self.axis = if self.axis == Orientation::Deg0 {
            Orientation::Deg90
        } else {
            Orientation::Deg0
        };
        self.reading = 0.0;
        self.clear_pins();
        log::debug!("ruler rotated to {}", self.axis);
    }

    pub fn gap_measurer_active(&self) -> bool {
        self.pins.len() >= MIN_MEASURED_PINS
    }

    /// Gaps between pins, or nothing until the measurer is active.
    pub fn gaps(&self) -> Vec<GapSegment> {
        if self.gap_measurer_active() {
            measure(&self.pins, self.axis.is_horizontal())
        } else {
            Vec::new()
        }
    }

    /// Draw every pin, then the gap measurer offset from the ruler edge.
    pub fn render_pins<S: Surface + ?Sized>(&self, surface: &mut S, style: &GapStyle) {
        for pin in &self.pins {
            render_pin(surface, pin, PIN_LENGTH, style);
        }

        let gaps = self.gaps();
        if gaps.is_empty() {
            return;
        }
        render_gap_measurer(surface, &gaps, self.axis.is_horizontal(), style);
    }
}

// ============================================================================
// TESTS
// ============================================================================
