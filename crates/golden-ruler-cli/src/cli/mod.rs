//! CLI command implementations.
//!
//! This module contains the implementations for the various CLI subcommands:
//! - `spiral` - Render the golden spiral overlay
//! - `matrix` - Render the phi matrix overlay
//! - `gaps` - Measure gaps between pins
//! - `recipe` - Render layered overlay compositions from YAML

pub mod common;
pub mod gaps;
pub mod recipe;
pub mod spiral;

pub use gaps::cmd_gaps;
pub use recipe::cmd_recipe;
pub use spiral::{cmd_matrix, cmd_spiral};
