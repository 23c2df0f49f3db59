//! Randomized depth-first maze carving as an explicit step state machine
//!
//! Both strategies share one skeleton: open the cursor cell, collect the
//! in-bounds neighbors that may still be carved, then either descend into a
//! uniformly chosen candidate (pushing the cursor onto the trace) or pop the
//! trace to backtrack. Generation is done when no candidate remains and the
//! trace is empty.

use log::{debug, trace};

use crate::algorithm::selection::ChoiceSource;
use crate::io::error::{Result, invalid_parameter};
use crate::io::sink::{CellState, RenderSink};
use crate::spatial::{Coordinate, Grid};

/// Highest open-neighbor degree a cell may have to be carved into by the
/// degree-constrained strategy
pub const MAX_CARVE_DEGREE: u8 = 1;

/// Candidate filtering rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Any unopened in-bounds neighbor may be carved; each carve opens both
    /// ends of the passage (thin walls between cells)
    Unconstrained,
    /// Only unopened neighbors with at most `MAX_CARVE_DEGREE` open neighbors
    /// may be carved, keeping a wall cell between parallel corridors
    DegreeConstrained,
}

impl Strategy {
    /// Build an empty grid suited to this strategy
    ///
    /// # Errors
    ///
    /// Returns `InvalidSize` for zero or oversized dimensions
    pub fn new_grid(self, width: usize, height: usize) -> Result<Grid> {
        match self {
            Self::Unconstrained => Grid::new(width, height),
            Self::DegreeConstrained => Grid::with_degree_tracking(width, height),
        }
    }

    /// Short human-readable name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unconstrained => "unconstrained",
            Self::DegreeConstrained => "degree-constrained",
        }
    }
}

/// Generator lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// A cursor exists and more steps may carve or backtrack
    Active,
    /// Every reachable cell was visited and the trace fully unwound
    Done,
}

/// Result of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Descended from `from` into the newly carved `to`
    Carved {
        /// Previous cursor, now on top of the trace
        from: Coordinate,
        /// New cursor
        to: Coordinate,
    },
    /// Popped the trace because `from` had no candidates left
    Backtracked {
        /// Exhausted cell
        from: Coordinate,
        /// Parent resumed from the trace
        to: Coordinate,
    },
    /// No candidates and an empty trace; the generator is done
    Finished,
}

/// DFS cursor and the path back to the seed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalState {
    /// Cell the next step expands
    pub current: Coordinate,
    /// Ancestors of `current`, seed at the bottom
    pub trace: Vec<Coordinate>,
}

impl TraversalState {
    /// Fresh state starting at `seed`
    pub const fn new(seed: Coordinate) -> Self {
        Self {
            current: seed,
            trace: Vec::new(),
        }
    }
}

/// Counters accumulated since the last reset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Calls to `step` that ran while active, including the finishing one
    pub steps: usize,
    /// Steps that carved into a new cell
    pub carves: usize,
    /// Steps that popped the trace
    pub backtracks: usize,
}

/// Step-wise maze generator owning its grid and traversal state
#[derive(Debug, Clone)]
pub struct MazeGenerator {
    strategy: Strategy,
    grid: Grid,
    traversal: TraversalState,
    phase: Phase,
    stats: GenerationStats,
}

impl MazeGenerator {
    /// Create a generator whose seed cell is drawn uniformly from the grid
    ///
    /// # Errors
    ///
    /// Returns `InvalidSize` for zero or oversized dimensions
    pub fn new<C, S>(
        strategy: Strategy,
        width: usize,
        height: usize,
        selector: &mut C,
        sink: &mut S,
    ) -> Result<Self>
    where
        C: ChoiceSource + ?Sized,
        S: RenderSink + ?Sized,
    {
        let grid = strategy.new_grid(width, height)?;
        let seed = random_cell(&grid, selector);
        Ok(Self::from_grid(strategy, grid, seed, sink))
    }

    /// Create a generator starting at a given seed cell
    ///
    /// # Errors
    ///
    /// Returns `InvalidSize` for zero or oversized dimensions and
    /// `OutOfBounds` if `seed` is not on the grid
    pub fn with_seed_cell<S: RenderSink + ?Sized>(
        strategy: Strategy,
        width: usize,
        height: usize,
        seed: Coordinate,
        sink: &mut S,
    ) -> Result<Self> {
        let grid = strategy.new_grid(width, height)?;
        grid.index_of(seed)?;
        Ok(Self::from_grid(strategy, grid, seed, sink))
    }

    fn from_grid<S: RenderSink + ?Sized>(
        strategy: Strategy,
        grid: Grid,
        seed: Coordinate,
        sink: &mut S,
    ) -> Self {
        debug!(
            "{} generator on {}x{} grid seeded at {seed}",
            strategy.name(),
            grid.width(),
            grid.height()
        );
        sink.on_cell_changed(seed, CellState::Cursor);
        Self {
            strategy,
            grid,
            traversal: TraversalState::new(seed),
            phase: Phase::Active,
            stats: GenerationStats::default(),
        }
    }

    /// Wall every cell and restart from a fresh random seed cell
    ///
    /// Cells that were open are repainted as walls.
    pub fn reset<C, S>(&mut self, selector: &mut C, sink: &mut S)
    where
        C: ChoiceSource + ?Sized,
        S: RenderSink + ?Sized,
    {
        for coordinate in self.grid.iter() {
            if self.grid.is_open(coordinate).unwrap_or(false) {
                sink.on_cell_changed(coordinate, CellState::Wall);
            }
        }
        let cursor = self.traversal.current;
        if self.phase == Phase::Active && !self.grid.is_open(cursor).unwrap_or(true) {
            sink.on_cell_changed(cursor, CellState::Wall);
        }
        self.grid.reset();

        let seed = random_cell(&self.grid, selector);
        debug!("{} generator reset, seeded at {seed}", self.strategy.name());
        sink.on_cell_changed(seed, CellState::Cursor);
        self.traversal = TraversalState::new(seed);
        self.phase = Phase::Active;
        self.stats = GenerationStats::default();
    }

    /// Advance one step; returns `false` once the generator is done
    ///
    /// # Errors
    ///
    /// Propagates grid access errors, which indicate a corrupted traversal
    pub fn step<C, S>(&mut self, selector: &mut C, sink: &mut S) -> Result<bool>
    where
        C: ChoiceSource + ?Sized,
        S: RenderSink + ?Sized,
    {
        Ok(self.step_outcome(selector, sink)? != StepOutcome::Finished)
    }

    /// Advance one step and report what it did
    ///
    /// Calling this after the generator is done returns `Finished` without
    /// touching the grid.
    ///
    /// # Errors
    ///
    /// Propagates grid access errors, which indicate a corrupted traversal
    pub fn step_outcome<C, S>(&mut self, selector: &mut C, sink: &mut S) -> Result<StepOutcome>
    where
        C: ChoiceSource + ?Sized,
        S: RenderSink + ?Sized,
    {
        if self.phase == Phase::Done {
            return Ok(StepOutcome::Finished);
        }
        self.stats.steps += 1;

        let current = self.traversal.current;
        if self.grid.set_open(current, true, sink)? {
            sink.on_cell_changed(current, CellState::Cursor);
        }

        let choices = self.candidates(current)?;
        if choices.is_empty() {
            let Some(parent) = self.traversal.trace.pop() else {
                self.phase = Phase::Done;
                sink.on_cell_changed(current, CellState::Open);
                debug!(
                    "{} generation done after {} steps ({} carves, {} backtracks)",
                    self.strategy.name(),
                    self.stats.steps,
                    self.stats.carves,
                    self.stats.backtracks
                );
                return Ok(StepOutcome::Finished);
            };
            trace!("backtrack {current} -> {parent}");
            self.move_cursor(parent, sink)?;
            self.stats.backtracks += 1;
            return Ok(StepOutcome::Backtracked {
                from: current,
                to: parent,
            });
        }

        let pick = selector.choose(choices.len());
        let next = choices
            .get(pick % choices.len())
            .copied()
            .ok_or_else(|| invalid_parameter("choice", &pick, &"no candidate at index"))?;

        self.traversal.trace.push(current);
        self.grid.link(current, next, sink)?;
        if self.strategy == Strategy::Unconstrained {
            self.grid.set_open(next, true, sink)?;
        }
        trace!("carve {current} -> {next}");
        self.move_cursor(next, sink)?;
        self.stats.carves += 1;

        Ok(StepOutcome::Carved {
            from: current,
            to: next,
        })
    }

    /// Step until done; returns the number of steps taken by this call
    ///
    /// # Errors
    ///
    /// Propagates grid access errors, which indicate a corrupted traversal
    pub fn run<C, S>(&mut self, selector: &mut C, sink: &mut S) -> Result<usize>
    where
        C: ChoiceSource + ?Sized,
        S: RenderSink + ?Sized,
    {
        let before = self.stats.steps;
        while self.step(selector, sink)? {}
        Ok(self.stats.steps - before)
    }

    /// In-bounds neighbors of `current` that may be carved, in enumeration order
    fn candidates(&self, current: Coordinate) -> Result<Vec<Coordinate>> {
        let mut choices = Vec::with_capacity(4);
        for neighbor in self.grid.neighbors(current) {
            if self.grid.is_open(neighbor)? {
                continue;
            }
            let admissible = match self.strategy {
                Strategy::Unconstrained => true,
                Strategy::DegreeConstrained => self
                    .grid
                    .degree(neighbor)?
                    .is_some_and(|degree| degree <= MAX_CARVE_DEGREE),
            };
            if admissible {
                choices.push(neighbor);
            }
        }
        Ok(choices)
    }

    fn move_cursor<S: RenderSink + ?Sized>(&mut self, to: Coordinate, sink: &mut S) -> Result<()> {
        let from = self.traversal.current;
        sink.on_cell_changed(from, CellState::from_open(self.grid.is_open(from)?));
        sink.on_cell_changed(to, CellState::Cursor);
        self.traversal.current = to;
        Ok(())
    }

    /// Candidate filtering rule in use
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Current carve state
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Cursor and backtrack trace
    pub const fn traversal(&self) -> &TraversalState {
        &self.traversal
    }

    /// DFS cursor
    pub const fn current(&self) -> Coordinate {
        self.traversal.current
    }

    /// Lifecycle phase
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether `step` can make no further progress
    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Counters since the last reset
    pub const fn stats(&self) -> GenerationStats {
        self.stats
    }
}

/// Uniformly drawn cell, x then y
fn random_cell<C: ChoiceSource + ?Sized>(grid: &Grid, selector: &mut C) -> Coordinate {
    let x = selector.choose(grid.width());
    let y = selector.choose(grid.height());
    Coordinate::new(x as i32, y as i32)
}
