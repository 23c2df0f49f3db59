//! Render sink interface receiving cell-state notifications
//!
//! The core never reads pixels back; it only pushes `(cell, attribute)` events
//! to whatever renderer subscribes.

use std::collections::HashSet;

use crate::spatial::Coordinate;

/// Visual state of a cell at notification time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    /// Uncarved cell
    Wall,
    /// Carved cell
    Open,
    /// Cell currently under the generator cursor
    Cursor,
}

impl CellState {
    /// Plain state of a cell given its pass flag
    pub const fn from_open(open: bool) -> Self {
        if open { Self::Open } else { Self::Wall }
    }
}

/// Notification target for grid changes and pavement results
pub trait RenderSink {
    /// A cell changed its open/wall/cursor state
    fn on_cell_changed(&mut self, coordinate: Coordinate, state: CellState);

    /// A pavement run reached `coordinate` at `ratio` of the maximum distance
    fn on_cell_distance(&mut self, coordinate: Coordinate, ratio: f64);

    /// A passage was carved between two adjacent cells
    fn on_passage_opened(&mut self, _from: Coordinate, _to: Coordinate) {}

    /// The grid was rebuilt at a new size; every cell is a wall again
    fn on_grid_resized(&mut self, _width: usize, _height: usize) {}
}

impl<S: RenderSink + ?Sized> RenderSink for &mut S {
    fn on_cell_changed(&mut self, coordinate: Coordinate, state: CellState) {
        (**self).on_cell_changed(coordinate, state);
    }

    fn on_cell_distance(&mut self, coordinate: Coordinate, ratio: f64) {
        (**self).on_cell_distance(coordinate, ratio);
    }

    fn on_passage_opened(&mut self, from: Coordinate, to: Coordinate) {
        (**self).on_passage_opened(from, to);
    }

    fn on_grid_resized(&mut self, width: usize, height: usize) {
        (**self).on_grid_resized(width, height);
    }
}

/// Sink that discards every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn on_cell_changed(&mut self, _coordinate: Coordinate, _state: CellState) {}

    fn on_cell_distance(&mut self, _coordinate: Coordinate, _ratio: f64) {}
}

/// One recorded notification
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SinkEvent {
    /// See [`RenderSink::on_cell_changed`]
    CellChanged(Coordinate, CellState),
    /// See [`RenderSink::on_cell_distance`]
    CellDistance(Coordinate, f64),
    /// See [`RenderSink::on_passage_opened`]
    PassageOpened(Coordinate, Coordinate),
}

impl SinkEvent {
    /// Deliver this event to another sink
    pub fn replay<S: RenderSink + ?Sized>(self, sink: &mut S) {
        match self {
            Self::CellChanged(coordinate, state) => sink.on_cell_changed(coordinate, state),
            Self::CellDistance(coordinate, ratio) => sink.on_cell_distance(coordinate, ratio),
            Self::PassageOpened(from, to) => sink.on_passage_opened(from, to),
        }
    }
}

/// Sink that keeps every notification in arrival order
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<SinkEvent>,
}

impl EventLog {
    /// Create an empty log
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// All events received so far
    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    /// Forget all events
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Number of events received
    pub const fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no event was received
    pub const fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Coordinates in the order they were first reported open
    ///
    /// Cursor repaints report already-open cells again; only the first report counts.
    pub fn opened_cells(&self) -> Vec<Coordinate> {
        let mut seen = HashSet::new();
        self.events
            .iter()
            .filter_map(|event| match event {
                SinkEvent::CellChanged(coordinate, CellState::Open) => Some(*coordinate),
                _ => None,
            })
            .filter(|coordinate| seen.insert(*coordinate))
            .collect()
    }

    /// Distance ratios reported by pavement runs, in order
    pub fn distances(&self) -> Vec<(Coordinate, f64)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SinkEvent::CellDistance(coordinate, ratio) => Some((*coordinate, *ratio)),
                _ => None,
            })
            .collect()
    }
}

impl RenderSink for EventLog {
    fn on_cell_changed(&mut self, coordinate: Coordinate, state: CellState) {
        self.events.push(SinkEvent::CellChanged(coordinate, state));
    }

    fn on_cell_distance(&mut self, coordinate: Coordinate, ratio: f64) {
        self.events.push(SinkEvent::CellDistance(coordinate, ratio));
    }

    fn on_passage_opened(&mut self, from: Coordinate, to: Coordinate) {
        self.events.push(SinkEvent::PassageOpened(from, to));
    }
}
