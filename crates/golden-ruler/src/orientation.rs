//! The four right-angle orientations.
//!
//! An orientation says which corner of the current rectangle the next square
//! is carved from. It turns by +90° at every subdivision step, which is what
//! gives the squares their pinwheel layout.

use crate::error::GeometryError;

/// One of the four legal right-angle orientations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Orientation {
    /// Get all orientations in turning order.
    pub fn all() -> &'static [Orientation] {
        &[
            Orientation::Deg0,
            Orientation::Deg90,
            Orientation::Deg180,
            Orientation::Deg270,
        ]
    }

    /// Parse an angle in degrees. Only 0, 90, 180 and 270 are accepted;
    /// anything else (including 360 or -90) is an error, never coerced.
    pub fn from_degrees(degrees: i32) -> Result<Orientation, GeometryError> {
        match degrees {
            0 => Ok(Orientation::Deg0),
            90 => Ok(Orientation::Deg90),
            180 => Ok(Orientation::Deg180),
            270 => Ok(Orientation::Deg270),
            other => Err(GeometryError::InvalidOrientation(other)),
        }
    }

    /// The angle in degrees.
    pub fn degrees(&self) -> i32 {
        match self {
            Orientation::Deg0 => 0,
            Orientation::Deg90 => 90,
            Orientation::Deg180 => 180,
            Orientation::Deg270 => 270,
        }
    }

    /// Rotate by +90° (mod 360).
    pub fn turned(&self) -> Orientation {
        match self {
            Orientation::Deg0 => Orientation::Deg90,
            Orientation::Deg90 => Orientation::Deg180,
            Orientation::Deg180 => Orientation::Deg270,
            Orientation::Deg270 => Orientation::Deg0,
        }
    }

    /// True for 0° and 180°, the orientations whose long side runs along x.
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Orientation::Deg0 | Orientation::Deg180)
    }

    /// True when both orientations lie along the same axis.
    pub fn same_axis(&self, other: Orientation) -> bool {
        self.is_horizontal() == other.is_horizontal()
    }
}

impl TryFrom<i32> for Orientation {
    type Error = GeometryError;

    fn try_from(degrees: i32) -> Result<Self, Self::Error> {
        Orientation::from_degrees(degrees)
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}
