//! Spatial data structures for the maze
//!
//! This module contains:
//! - Integer cell coordinates and the four grid directions
//! - The cell grid with pass flags, open-neighbor degrees and carved passages

/// Cell coordinates and directions
pub mod coordinate;
/// Cell grid state and passage records
pub mod grid;

pub use coordinate::{Coordinate, Direction};
pub use grid::Grid;
