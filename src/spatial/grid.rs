//! Fixed-size pass/wall grid with optional open-neighbor degree tracking
//!
//! The pass bitmap is the single source of truth for which cells are carved.
//! When degree tracking is enabled every open/close updates the degree of the
//! in-bounds 4-neighbors, so `degree[c]` always equals the number of open
//! neighbors of `c`. Carved links between adjacent cells are kept in two
//! bitmaps (east and north edges) so both layouts can be rendered.

use bitvec::vec::BitVec;
use ndarray::Array2;

use crate::io::configuration::MAX_CELLS;
use crate::io::error::{MazeError, Result, invalid_parameter, invalid_size};
use crate::io::sink::{CellState, RenderSink};
use crate::spatial::coordinate::{Coordinate, Direction};

/// Carve state of a `width x height` cell grid
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Row-major pass flags, `true` = open
    passes: BitVec,
    /// Open 4-neighbor counts indexed by `[row, col]`
    degrees: Option<Array2<u8>>,
    /// Link between `(x, y)` and `(x + 1, y)`
    east_passages: BitVec,
    /// Link between `(x, y)` and `(x, y + 1)`
    north_passages: BitVec,
}

impl Grid {
    /// Create an all-wall grid without degree tracking
    ///
    /// # Errors
    ///
    /// Returns `InvalidSize` if either dimension is zero or the cell count
    /// exceeds `MAX_CELLS`
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::build(width, height, false)
    }

    /// Create an all-wall grid that maintains per-cell open-neighbor degrees
    ///
    /// # Errors
    ///
    /// Returns `InvalidSize` if either dimension is zero or the cell count
    /// exceeds `MAX_CELLS`
    pub fn with_degree_tracking(width: usize, height: usize) -> Result<Self> {
        Self::build(width, height, true)
    }

    fn build(width: usize, height: usize, track_degrees: bool) -> Result<Self> {
        let cells = validate_size(width, height)?;

        Ok(Self {
            width,
            height,
            passes: BitVec::repeat(false, cells),
            degrees: track_degrees.then(|| Array2::zeros((height, width))),
            east_passages: BitVec::repeat(false, cells),
            north_passages: BitVec::repeat(false, cells),
        })
    }

    /// Grid width in cells
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Whether open-neighbor degrees are maintained
    pub const fn tracks_degrees(&self) -> bool {
        self.degrees.is_some()
    }

    /// True iff `0 <= x < width` and `0 <= y < height`
    pub const fn in_bounds(&self, coordinate: Coordinate) -> bool {
        coordinate.x >= 0
            && coordinate.y >= 0
            && (coordinate.x as usize) < self.width
            && (coordinate.y as usize) < self.height
    }

    /// Row-major index of an in-bounds coordinate
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the coordinate lies outside the grid
    pub const fn index_of(&self, coordinate: Coordinate) -> Result<usize> {
        if self.in_bounds(coordinate) {
            Ok(coordinate.y as usize * self.width + coordinate.x as usize)
        } else {
            Err(self.out_of_bounds(coordinate))
        }
    }

    /// Coordinate of a row-major index
    pub const fn coordinate_of(&self, index: usize) -> Coordinate {
        Coordinate::new((index % self.width) as i32, (index / self.width) as i32)
    }

    /// Whether a cell is carved
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the coordinate lies outside the grid
    pub fn is_open(&self, coordinate: Coordinate) -> Result<bool> {
        let index = self.index_of(coordinate)?;
        Ok(self.passes.get(index).as_deref() == Some(&true))
    }

    /// Open or close a cell
    ///
    /// Does nothing when the cell already has the requested state. On change
    /// the degrees of all in-bounds neighbors move by one and the sink is told
    /// about `coordinate` only. Returns whether the state changed.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the coordinate lies outside the grid
    pub fn set_open<S: RenderSink + ?Sized>(
        &mut self,
        coordinate: Coordinate,
        open: bool,
        sink: &mut S,
    ) -> Result<bool> {
        let index = self.index_of(coordinate)?;
        if self.passes.get(index).as_deref() == Some(&open) {
            return Ok(false);
        }
        self.passes.set(index, open);

        if self.degrees.is_some() {
            for neighbor in coordinate.neighbors4() {
                if let Ok([row, col]) = self.cell_of(neighbor)
                    && let Some(degree) = self
                        .degrees
                        .as_mut()
                        .and_then(|degrees| degrees.get_mut([row, col]))
                {
                    *degree = if open {
                        degree.saturating_add(1)
                    } else {
                        degree.saturating_sub(1)
                    };
                }
            }
        }

        sink.on_cell_changed(coordinate, CellState::from_open(open));
        Ok(true)
    }

    /// Number of open 4-neighbors as maintained by degree tracking
    ///
    /// `None` when the grid was built without degree tracking.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the coordinate lies outside the grid
    pub fn degree(&self, coordinate: Coordinate) -> Result<Option<u8>> {
        let cell = self.cell_of(coordinate)?;
        Ok(self
            .degrees
            .as_ref()
            .and_then(|degrees| degrees.get(cell).copied()))
    }

    /// Number of open 4-neighbors counted directly from the pass bitmap
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the coordinate lies outside the grid
    pub fn open_neighbor_count(&self, coordinate: Coordinate) -> Result<usize> {
        self.index_of(coordinate)?;
        Ok(self
            .neighbors(coordinate)
            .filter(|&neighbor| self.is_open(neighbor).unwrap_or(false))
            .count())
    }

    /// In-bounds 4-neighbors in east, north, west, south order
    pub fn neighbors(&self, coordinate: Coordinate) -> impl Iterator<Item = Coordinate> + '_ {
        coordinate
            .neighbors4()
            .into_iter()
            .filter(move |&neighbor| self.in_bounds(neighbor))
    }

    /// Record a carved link between two adjacent cells
    ///
    /// Returns whether the link is new; the sink hears only about new links.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if either cell lies outside the grid and
    /// `InvalidParameter` if the cells are not 4-adjacent
    pub fn link<S: RenderSink + ?Sized>(
        &mut self,
        from: Coordinate,
        to: Coordinate,
        sink: &mut S,
    ) -> Result<bool> {
        let (index, direction) = self.passage_slot(from, to)?;
        let passages = match direction {
            Direction::East => &mut self.east_passages,
            _ => &mut self.north_passages,
        };
        if passages.get(index).as_deref() == Some(&true) {
            return Ok(false);
        }
        passages.set(index, true);
        sink.on_passage_opened(from, to);
        Ok(true)
    }

    /// Whether a carved link joins two cells
    ///
    /// False for out-of-bounds or non-adjacent pairs.
    pub fn is_linked(&self, a: Coordinate, b: Coordinate) -> bool {
        self.passage_slot(a, b)
            .is_ok_and(|(index, direction)| match direction {
                Direction::East => self.east_passages.get(index).as_deref() == Some(&true),
                _ => self.north_passages.get(index).as_deref() == Some(&true),
            })
    }

    /// Neighbors joined to `coordinate` by a carved link
    pub fn links(&self, coordinate: Coordinate) -> impl Iterator<Item = Coordinate> + '_ {
        self.neighbors(coordinate)
            .filter(move |&neighbor| self.is_linked(coordinate, neighbor))
    }

    /// Total number of carved links
    pub fn passage_count(&self) -> usize {
        self.east_passages.count_ones() + self.north_passages.count_ones()
    }

    /// Total number of open cells
    pub fn open_count(&self) -> usize {
        self.passes.count_ones()
    }

    /// All coordinates in row-major order
    pub fn iter(&self) -> impl Iterator<Item = Coordinate> + '_ {
        (0..self.cell_count()).map(move |index| self.coordinate_of(index))
    }

    /// Wall every cell and drop all links and degrees without notifying
    pub fn reset(&mut self) {
        self.passes.fill(false);
        self.east_passages.fill(false);
        self.north_passages.fill(false);
        if let Some(degrees) = self.degrees.as_mut() {
            degrees.fill(0);
        }
    }

    /// `[row, col]` of an in-bounds coordinate
    fn cell_of(&self, coordinate: Coordinate) -> Result<[usize; 2]> {
        self.index_of(coordinate)?;
        Ok([coordinate.y as usize, coordinate.x as usize])
    }

    /// Normalize a link to the east/north edge of its lower cell
    fn passage_slot(&self, a: Coordinate, b: Coordinate) -> Result<(usize, Direction)> {
        self.index_of(a)?;
        self.index_of(b)?;
        let direction = a.direction_to(b).ok_or_else(|| {
            invalid_parameter("passage", &format!("{a} -> {b}"), &"cells are not adjacent")
        })?;
        match direction {
            Direction::East | Direction::North => Ok((self.index_of(a)?, direction)),
            Direction::West | Direction::South => {
                Ok((self.index_of(b)?, direction.opposite()))
            }
        }
    }

    const fn out_of_bounds(&self, coordinate: Coordinate) -> MazeError {
        MazeError::OutOfBounds {
            coordinate,
            width: self.width,
            height: self.height,
        }
    }
}

/// Reject degenerate or oversized dimensions before anything is allocated
///
/// Returns the cell count on success.
///
/// # Errors
///
/// Returns `InvalidSize` if either dimension is zero or the cell count
/// exceeds `MAX_CELLS`
pub fn validate_size(width: usize, height: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(invalid_size(width, height, "dimensions must be positive"));
    }
    if width > i32::MAX as usize || height > i32::MAX as usize {
        return Err(invalid_size(width, height, "dimension exceeds coordinate range"));
    }
    width
        .checked_mul(height)
        .filter(|&cells| cells <= MAX_CELLS)
        .ok_or_else(|| invalid_size(width, height, "cell count exceeds limit"))
}
