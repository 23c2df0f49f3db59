//! Tests for the render sink trait and the recording sinks

#[cfg(test)]
mod tests {
    use cellmaze::io::sink::{CellState, EventLog, NullSink, RenderSink, SinkEvent};
    use cellmaze::spatial::Coordinate;

    fn c(x: i32, y: i32) -> Coordinate {
        Coordinate::new(x, y)
    }

    fn notify_all<S: RenderSink + ?Sized>(sink: &mut S) {
        sink.on_grid_resized(2, 2);
        sink.on_cell_changed(c(0, 0), CellState::Cursor);
        sink.on_cell_changed(c(0, 0), CellState::Open);
        sink.on_passage_opened(c(0, 0), c(1, 0));
        sink.on_cell_distance(c(1, 0), 0.25);
    }

    // Tests the log keeps events in arrival order and skips resizes
    #[test]
    fn test_event_log_records_in_order() {
        let mut log = EventLog::new();
        notify_all(&mut log);

        assert_eq!(
            log.events(),
            &[
                SinkEvent::CellChanged(c(0, 0), CellState::Cursor),
                SinkEvent::CellChanged(c(0, 0), CellState::Open),
                SinkEvent::PassageOpened(c(0, 0), c(1, 0)),
                SinkEvent::CellDistance(c(1, 0), 0.25),
            ]
        );
        assert_eq!(log.distances(), vec![(c(1, 0), 0.25)]);
    }

    // Tests opened_cells reports each cell once in first-open order
    // Verified by removing the deduplication set
    #[test]
    fn test_opened_cells_deduplicates() {
        let mut log = EventLog::new();
        log.on_cell_changed(c(1, 1), CellState::Open);
        log.on_cell_changed(c(0, 1), CellState::Cursor);
        log.on_cell_changed(c(0, 1), CellState::Open);
        log.on_cell_changed(c(1, 1), CellState::Open);
        log.on_cell_changed(c(2, 1), CellState::Wall);

        assert_eq!(log.opened_cells(), vec![c(1, 1), c(0, 1)]);
    }

    // Tests the &mut forwarding impl reaches the underlying sink
    #[test]
    fn test_mut_reference_forwards() {
        let mut log = EventLog::new();
        {
            let mut forwarded = &mut log;
            notify_all(&mut forwarded);
        }
        assert_eq!(log.len(), 4);

        log.clear();
        assert!(log.is_empty());
    }

    // Tests replaying recorded events reproduces them on another sink
    #[test]
    fn test_replay_round_trip() {
        let mut source_log = EventLog::new();
        notify_all(&mut source_log);

        let mut copy = EventLog::new();
        for event in source_log.events() {
            event.replay(&mut copy);
        }
        assert_eq!(copy.events(), source_log.events());
    }

    // Tests the null sink accepts everything
    #[test]
    fn test_null_sink() {
        let mut sink = NullSink;
        notify_all(&mut sink);
        let dynamic: &mut dyn RenderSink = &mut sink;
        notify_all(dynamic);
    }

    #[test]
    fn test_cell_state_from_open() {
        assert_eq!(CellState::from_open(true), CellState::Open);
        assert_eq!(CellState::from_open(false), CellState::Wall);
    }
}
