//! Error types for the geometry core.
//!
//! ## Rust Lesson #20: Error Handling
//!
//! Rust uses `Result<T, E>` instead of exceptions:
//! - `Ok(value)` = success
//! - `Err(error)` = failure
//!
//! Implementing `Display` and `std::error::Error` lets these errors travel
//! through `?` into callers that use `Box<dyn Error>` or `anyhow`.

use std::fmt;

/// Errors raised by the subdivision and orientation entry points.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Orientation outside {0, 90, 180, 270}.
    InvalidOrientation(i32),
    /// Root rectangle with a zero, negative, infinite or NaN side.
    DegenerateRectangle { width: f64, height: f64 },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::InvalidOrientation(degrees) => write!(
                f,
                "invalid orientation {}: expected one of 0, 90, 180, 270",
                degrees
            ),
            GeometryError::DegenerateRectangle { width, height } => write!(
                f,
                "degenerate rectangle {}x{}: both sides must be positive and finite",
                width, height
            ),
        }
    }
}

impl std::error::Error for GeometryError {}

/// A color string that could not be parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorError(pub String);

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color: {}", self.0)
    }
}

impl std::error::Error for ColorError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_bad_value() {
        let err = GeometryError::InvalidOrientation(45);
        assert!(err.to_string().contains("45"));

        let err = GeometryError::DegenerateRectangle { width: 0.0, height: 3.0 };
        assert!(err.to_string().contains("0x3"), "got {}", err);
    }
}
