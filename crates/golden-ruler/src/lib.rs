//! # golden-ruler
//!
//! Geometry core of a golden-ratio screen ruler.
//!
//! - [`subdivide`] splits a golden rectangle into nested squares
//! - [`arc`] builds the quarter circles that turn those squares into a spiral
//! - [`gaps`] measures distances between pins dropped on the ruler
//! - [`overlay`] draws the spiral and phi matrix onto a [`Surface`]
//! - [`session`] tracks the ruler's mode, reading and pins
//!
//! Everything renders through the [`Surface`] trait; [`SvgSurface`] writes
//! SVG and [`RecordingSurface`] keeps the calls for inspection.
//!
//! ## Rust Lesson #7: Modules
//!
//! Rust modules are like ES6 modules but more explicit:
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level
//!
//! Unlike Node.js, you must explicitly declare every module.

pub mod arc;
pub mod color;
pub mod error;
pub mod gaps;
pub mod geometry;
pub mod orientation;
pub mod overlay;
pub mod session;
pub mod subdivide;
pub mod surface;
pub mod svg;

// Re-export common types at crate root for convenience.
pub use arc::{ArcPath, ArcSpec, SweepDirection, build_quarter_arc, quarter_bounds, render_arc};
pub use color::{PALETTE, PALETTE_NAMES, Rgb, color_at};
pub use error::{ColorError, GeometryError};
pub use gaps::{
    GAP_MEASURER_OFFSET, GapSegment, GapStyle, Pin, measure, render_gap_measurer, render_gaps,
    render_pin,
};
pub use geometry::{Line, Point, Rect, pt_to_dip};
pub use orientation::Orientation;
pub use overlay::{GoldenSpiral, OverlayStyle, PhiMatrix};
pub use session::{MeasurementSession, RulerMode};
pub use subdivide::{
    DEFAULT_DEPTH, GOLDEN_RATIO, MAX_DEPTH, Subdivision, SubdivisionStep, Turn, golden_root, split,
    subdivide, subdivide_with,
};
pub use surface::{DrawCommand, RecordingSurface, Surface, TextSize, Translate};
pub use svg::{SvgError, SvgSurface};
