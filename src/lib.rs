//! Step-wise depth-first maze carving on a rectangular cell grid
//!
//! A generator carves one cell per step, either freely (every cell ends up open
//! and the maze lives in the carved passages) or under a degree constraint that
//! keeps carved corridors one cell wide with solid walls between them. Clicking
//! an open cell paves a breadth-first distance field from it. Every visible change
//! is pushed to a render sink.

#![forbid(unsafe_code)]

/// Maze generation, distance-field pavement and the session tying them together
pub mod algorithm;
/// Render sinks, image export, command line and error handling
pub mod io;
/// Interpolation helpers for coloring distance ratios
pub mod math;
/// Coordinates and the cell grid
pub mod spatial;

pub use io::error::{MazeError, Result};
