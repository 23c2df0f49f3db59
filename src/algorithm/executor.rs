//! Maze session tying generation, pavement, randomness and rendering together
//!
//! This is the surface external callers drive: size or clear the maze, advance
//! generation one step at a time or to completion, and click cells to pave
//! distance fields.

use log::{debug, info};

use crate::algorithm::generator::{GenerationStats, MazeGenerator, StepOutcome, Strategy};
use crate::algorithm::pavement::{Adjacency, Pavement};
use crate::algorithm::selection::ChoiceSource;
use crate::io::error::Result;
use crate::io::sink::RenderSink;
use crate::spatial::grid::validate_size;
use crate::spatial::{Coordinate, Grid};

/// Session owning one generator, its pavement state, a choice source and a sink
#[derive(Debug)]
pub struct Maze<C: ChoiceSource, S: RenderSink> {
    generator: MazeGenerator,
    pavement: Pavement,
    adjacency: Adjacency,
    selector: C,
    sink: S,
}

impl<C: ChoiceSource, S: RenderSink> Maze<C, S> {
    /// Create a maze with a uniformly random seed cell
    ///
    /// # Errors
    ///
    /// Returns `InvalidSize` for zero or oversized dimensions
    pub fn new(
        strategy: Strategy,
        width: usize,
        height: usize,
        mut selector: C,
        mut sink: S,
    ) -> Result<Self> {
        validate_size(width, height)?;
        sink.on_grid_resized(width, height);
        let generator = MazeGenerator::new(strategy, width, height, &mut selector, &mut sink)?;
        let pavement = Pavement::for_grid(generator.grid());

        Ok(Self {
            generator,
            pavement,
            adjacency: default_adjacency(strategy),
            selector,
            sink,
        })
    }

    /// Rebuild the grid at a new size with a fresh random seed cell
    ///
    /// The size is validated before anything is touched, so a rejected size
    /// leaves the session unchanged.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSize` for zero or oversized dimensions
    pub fn set_size(&mut self, width: usize, height: usize) -> Result<()> {
        validate_size(width, height)?;
        let strategy = self.generator.strategy();
        self.sink.on_grid_resized(width, height);
        self.generator =
            MazeGenerator::new(strategy, width, height, &mut self.selector, &mut self.sink)?;
        self.pavement = Pavement::for_grid(self.generator.grid());
        debug!("maze resized to {width}x{height}");
        Ok(())
    }

    /// Wall every cell and restart generation from a fresh random seed cell
    pub fn clear(&mut self) {
        self.generator.reset(&mut self.selector, &mut self.sink);
        self.pavement = Pavement::for_grid(self.generator.grid());
    }

    /// Advance generation one step; `false` once done
    ///
    /// # Errors
    ///
    /// Propagates grid access errors, which indicate a corrupted traversal
    pub fn step(&mut self) -> Result<bool> {
        self.generator.step(&mut self.selector, &mut self.sink)
    }

    /// Advance generation one step and report what it did
    ///
    /// # Errors
    ///
    /// Propagates grid access errors, which indicate a corrupted traversal
    pub fn step_outcome(&mut self) -> Result<StepOutcome> {
        self.generator.step_outcome(&mut self.selector, &mut self.sink)
    }

    /// Step until done; returns the number of steps this call took
    ///
    /// # Errors
    ///
    /// Propagates grid access errors, which indicate a corrupted traversal
    pub fn run(&mut self) -> Result<usize> {
        let steps = self.generator.run(&mut self.selector, &mut self.sink)?;
        let stats = self.generator.stats();
        info!(
            "{} maze {}x{} generated: {} open cells, {} carves, {} backtracks",
            self.generator.strategy().name(),
            self.grid().width(),
            self.grid().height(),
            self.grid().open_count(),
            stats.carves,
            stats.backtracks
        );
        Ok(steps)
    }

    /// Pave a distance field from a clicked cell
    ///
    /// Clicking a wall or outside the grid does nothing and reports nothing.
    /// Returns whether a pavement run happened.
    ///
    /// The flood follows the session's adjacency. Unconstrained mazes default to
    /// `Adjacency::Passages`: every cell ends open there, so stepping between open
    /// neighbors would ignore the carved walls and yield Manhattan distances.
    /// Use `set_adjacency(Adjacency::OpenCells)` to pave over open cells directly.
    pub fn on_click(&mut self, coordinate: Coordinate) -> bool {
        if !self.generator.grid().in_bounds(coordinate) {
            return false;
        }
        self.pavement
            .pave(
                self.generator.grid(),
                coordinate,
                self.adjacency,
                &mut self.sink,
            )
            .unwrap_or(false)
    }

    /// Click at a point of the unit square, scaled onto the grid
    ///
    /// Points outside `[0, 1) x [0, 1)` are ignored.
    pub fn click_normalized(&mut self, u: f64, v: f64) -> bool {
        if !(0.0..1.0).contains(&u) || !(0.0..1.0).contains(&v) {
            return false;
        }
        let grid = self.generator.grid();
        let x = (u * grid.width() as f64).floor() as i32;
        let y = (v * grid.height() as f64).floor() as i32;
        self.on_click(Coordinate::new(x, y))
    }

    /// Override which moves pavement runs may make
    pub const fn set_adjacency(&mut self, adjacency: Adjacency) {
        self.adjacency = adjacency;
    }

    /// Moves pavement runs may make
    pub const fn adjacency(&self) -> Adjacency {
        self.adjacency
    }

    /// Current carve state
    pub const fn grid(&self) -> &Grid {
        self.generator.grid()
    }

    /// Underlying generator
    pub const fn generator(&self) -> &MazeGenerator {
        &self.generator
    }

    /// Distance field of the last click
    pub const fn pavement(&self) -> &Pavement {
        &self.pavement
    }

    /// Whether generation has finished
    pub fn is_done(&self) -> bool {
        self.generator.is_done()
    }

    /// Generation counters since the last reset
    pub const fn stats(&self) -> GenerationStats {
        self.generator.stats()
    }

    /// Render sink
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable render sink, e.g. to capture animation frames between steps
    pub const fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the session and keep the sink
    pub fn into_sink(self) -> S {
        self.sink
    }
}

/// Thin-walled mazes open every cell, so only links carry structure
pub const fn default_adjacency(strategy: Strategy) -> Adjacency {
    match strategy {
        Strategy::Unconstrained => Adjacency::Passages,
        Strategy::DegreeConstrained => Adjacency::OpenCells,
    }
}
