//! Breadth-first distance fields over open cells
//!
//! A pavement run floods outward from a seed cell, recording the step count to
//! every reachable open cell, then reports each reached cell to the sink as a
//! ratio of the largest distance found.

use std::collections::VecDeque;

use log::debug;
use ndarray::Array2;

use crate::io::error::Result;
use crate::io::sink::RenderSink;
use crate::spatial::{Coordinate, Grid};

/// Distance marker for cells the last run did not reach
pub const UNREACHED: i32 = -1;

/// Which moves a pavement run may make
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Adjacency {
    /// Step between any two open 4-neighbors
    #[default]
    OpenCells,
    /// Step only along carved links between open cells
    Passages,
}

impl Adjacency {
    fn permits(self, grid: &Grid, from: Coordinate, to: Coordinate) -> Result<bool> {
        let open = grid.is_open(to)?;
        Ok(match self {
            Self::OpenCells => open,
            Self::Passages => open && grid.is_linked(from, to),
        })
    }
}

/// Distance field and frontier of the most recent pavement run
#[derive(Debug, Clone)]
pub struct Pavement {
    /// Steps from the seed indexed by `[row, col]`, `UNREACHED` if not reached
    distances: Array2<i32>,
    frontier: VecDeque<Coordinate>,
    max_distance: u32,
    seed: Option<Coordinate>,
    reached: usize,
}

impl Pavement {
    /// Create an empty pavement sized for `grid`
    pub fn for_grid(grid: &Grid) -> Self {
        Self {
            distances: Array2::from_elem((grid.height(), grid.width()), UNREACHED),
            frontier: VecDeque::new(),
            max_distance: 0,
            seed: None,
            reached: 0,
        }
    }

    /// Flood the grid from `seed` and report normalized distances to `sink`
    ///
    /// A wall seed is a no-op: no state changes and nothing is reported.
    /// Returns whether a run took place.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `seed` is not on the grid
    pub fn pave<S: RenderSink + ?Sized>(
        &mut self,
        grid: &Grid,
        seed: Coordinate,
        adjacency: Adjacency,
        sink: &mut S,
    ) -> Result<bool> {
        if !grid.is_open(seed)? {
            return Ok(false);
        }

        self.reset(grid);
        self.seed = Some(seed);
        self.set_distance(seed, 0);
        self.reached = 1;
        self.frontier.push_back(seed);

        while let Some(from) = self.frontier.pop_front() {
            let Some(from_distance) = self.distance(from) else {
                continue;
            };
            let next_distance = from_distance + 1;
            for adjacent in grid.neighbors(from) {
                let improves = self
                    .distance(adjacent)
                    .is_none_or(|known| known > next_distance);
                if improves && adjacency.permits(grid, from, adjacent)? {
                    if self.distance(adjacent).is_none() {
                        self.reached += 1;
                    }
                    self.set_distance(adjacent, next_distance);
                    self.max_distance = self.max_distance.max(next_distance);
                    self.frontier.push_back(adjacent);
                }
            }
        }

        debug!(
            "paved {} cells from {seed}, max distance {}",
            self.reached, self.max_distance
        );

        for coordinate in grid.iter() {
            if let Some(ratio) = self.ratio(coordinate) {
                sink.on_cell_distance(coordinate, ratio);
            }
        }
        Ok(true)
    }

    fn reset(&mut self, grid: &Grid) {
        if self.distances.dim() == (grid.height(), grid.width()) {
            self.distances.fill(UNREACHED);
        } else {
            self.distances = Array2::from_elem((grid.height(), grid.width()), UNREACHED);
        }
        self.frontier.clear();
        self.max_distance = 0;
        self.seed = None;
        self.reached = 0;
    }

    fn set_distance(&mut self, coordinate: Coordinate, distance: u32) {
        if let Some(cell) = cell_index(coordinate)
            .and_then(|index| self.distances.get_mut(index))
        {
            *cell = i32::try_from(distance).unwrap_or(i32::MAX);
        }
    }

    /// Steps from the seed of the last run, `None` if unreached or off-grid
    pub fn distance(&self, coordinate: Coordinate) -> Option<u32> {
        cell_index(coordinate)
            .and_then(|index| self.distances.get(index))
            .and_then(|&distance| u32::try_from(distance).ok())
    }

    /// `distance / max_distance` in `[0, 1]`; 0 when only the seed was reached
    pub fn ratio(&self, coordinate: Coordinate) -> Option<f64> {
        self.distance(coordinate).map(|distance| {
            if self.max_distance == 0 {
                0.0
            } else {
                f64::from(distance) / f64::from(self.max_distance)
            }
        })
    }

    /// Largest finite distance of the last run
    pub const fn max_distance(&self) -> u32 {
        self.max_distance
    }

    /// Seed of the last run, if any
    pub const fn seed(&self) -> Option<Coordinate> {
        self.seed
    }

    /// Number of cells the last run reached, seed included
    pub const fn reached_count(&self) -> usize {
        self.reached
    }

    /// Raw distance matrix indexed by `[row, col]`
    pub const fn distances(&self) -> &Array2<i32> {
        &self.distances
    }

    /// Cells at the maximum distance, row-major
    pub fn furthest_cells(&self) -> Vec<Coordinate> {
        if self.seed.is_none() {
            return Vec::new();
        }
        let target = i32::try_from(self.max_distance).unwrap_or(i32::MAX);
        self.distances
            .indexed_iter()
            .filter(|&(_, &distance)| distance == target)
            .map(|((row, col), _)| Coordinate::new(col as i32, row as i32))
            .collect()
    }
}

/// `[row, col]` for non-negative coordinates; ndarray bounds-checks the rest
fn cell_index(coordinate: Coordinate) -> Option<[usize; 2]> {
    let col = usize::try_from(coordinate.x).ok()?;
    let row = usize::try_from(coordinate.y).ok()?;
    Some([row, col])
}
