//! Tests for the pixel canvas sink and PNG export

#[cfg(test)]
mod tests {
    use cellmaze::MazeError;
    use cellmaze::algorithm::generator::Strategy;
    use cellmaze::io::configuration::{
        CURSOR_COLOR, FAR_COLOR, NEAR_COLOR, OPEN_COLOR, WALL_COLOR,
    };
    use cellmaze::io::image::{Layout, PixelCanvas, distance_color, state_color};
    use cellmaze::io::sink::{CellState, RenderSink};
    use cellmaze::spatial::Coordinate;

    fn c(x: i32, y: i32) -> Coordinate {
        Coordinate::new(x, y)
    }

    // Tests canvas dimensions for both layouts
    // Verified by omitting the outer wall row in the thin layout
    #[test]
    fn test_canvas_dimensions() -> cellmaze::Result<()> {
        let thick = PixelCanvas::new(Layout::Thick, 4, 3, 2)?;
        assert_eq!(thick.image().dimensions(), (8, 6));

        let thin = PixelCanvas::new(Layout::Thin, 4, 3, 2)?;
        assert_eq!(thin.image().dimensions(), (18, 14));
        assert!(thin.image().pixels().all(|pixel| pixel.0 == WALL_COLOR));
        Ok(())
    }

    // Tests invalid block sizes and grids are refused
    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            PixelCanvas::new(Layout::Thick, 4, 4, 0),
            Err(MazeError::InvalidParameter { .. })
        ));
        assert!(matches!(
            PixelCanvas::new(Layout::Thick, 4, 4, 65),
            Err(MazeError::InvalidParameter { .. })
        ));
        assert!(matches!(
            PixelCanvas::new(Layout::Thin, 0, 4, 1),
            Err(MazeError::InvalidSize { .. })
        ));
        assert!(matches!(
            PixelCanvas::new(Layout::Thin, 4096, 4096, 64),
            Err(MazeError::InvalidParameter { .. })
        ));
    }

    // Tests row 0 of the grid is drawn at the bottom of the image
    // Verified by removing the vertical flip in block_origin
    #[test]
    fn test_cells_paint_with_north_up() -> cellmaze::Result<()> {
        let mut canvas = PixelCanvas::new(Layout::Thick, 2, 2, 3)?;
        canvas.on_cell_changed(c(0, 0), CellState::Open);

        assert_eq!(canvas.image().get_pixel(0, 5).0, OPEN_COLOR);
        assert_eq!(canvas.image().get_pixel(2, 3).0, OPEN_COLOR);
        assert_eq!(canvas.image().get_pixel(0, 0).0, WALL_COLOR);
        assert_eq!(canvas.cell_color(c(0, 0)), Some(OPEN_COLOR));
        assert_eq!(canvas.cell_color(c(0, 1)), Some(WALL_COLOR));
        Ok(())
    }

    // Tests thin passages open the wall block between the two cells
    // Verified by painting passages at the first cell's block
    #[test]
    fn test_thin_passage_block() -> cellmaze::Result<()> {
        let mut canvas = PixelCanvas::new(Layout::Thin, 3, 2, 1)?;
        canvas.on_cell_changed(c(0, 0), CellState::Open);
        canvas.on_cell_changed(c(1, 0), CellState::Open);
        canvas.on_passage_opened(c(1, 0), c(0, 0));

        assert_eq!(canvas.passage_color(c(0, 0), c(1, 0)), Some(OPEN_COLOR));
        assert_eq!(canvas.passage_color(c(0, 0), c(0, 1)), Some(WALL_COLOR));
        // Block (2, 1) sits at image row 5 - 1 - 1 = 3
        assert_eq!(canvas.image().get_pixel(2, 3).0, OPEN_COLOR);
        assert_eq!(canvas.passage_color(c(0, 0), c(2, 0)), None);
        Ok(())
    }

    // Tests thick layouts have no passage blocks
    #[test]
    fn test_thick_ignores_passages() -> cellmaze::Result<()> {
        let mut canvas = PixelCanvas::new(Layout::Thick, 2, 1, 1)?;
        canvas.on_passage_opened(c(0, 0), c(1, 0));
        assert!(canvas.image().pixels().all(|pixel| pixel.0 == WALL_COLOR));
        assert_eq!(canvas.passage_color(c(0, 0), c(1, 0)), None);
        Ok(())
    }

    // Tests distance ratios map onto the near/far gradient
    #[test]
    fn test_distance_colors() -> cellmaze::Result<()> {
        let mut canvas = PixelCanvas::new(Layout::Thick, 2, 1, 1)?;
        canvas.on_cell_distance(c(0, 0), 0.0);
        canvas.on_cell_distance(c(1, 0), 1.0);
        assert_eq!(canvas.cell_color(c(0, 0)), Some(NEAR_COLOR));
        assert_eq!(canvas.cell_color(c(1, 0)), Some(FAR_COLOR));
        assert_eq!(distance_color(0.0), NEAR_COLOR);
        assert_eq!(state_color(CellState::Cursor), CURSOR_COLOR);
        Ok(())
    }

    // Tests off-canvas notifications are ignored
    #[test]
    fn test_off_canvas_is_ignored() -> cellmaze::Result<()> {
        let mut canvas = PixelCanvas::new(Layout::Thin, 2, 2, 1)?;
        canvas.on_cell_changed(c(-1, 0), CellState::Open);
        canvas.on_cell_changed(c(5, 5), CellState::Open);
        assert!(canvas.image().pixels().all(|pixel| pixel.0 == WALL_COLOR));
        assert_eq!(canvas.cell_color(c(-1, 0)), None);
        Ok(())
    }

    // Tests a resize reallocates an all-wall canvas
    #[test]
    fn test_resize_reallocates() -> cellmaze::Result<()> {
        let mut canvas = PixelCanvas::new(Layout::Thick, 2, 2, 2)?;
        canvas.on_cell_changed(c(1, 1), CellState::Open);
        canvas.on_grid_resized(5, 1);
        assert_eq!(canvas.image().dimensions(), (10, 2));
        assert!(canvas.image().pixels().all(|pixel| pixel.0 == WALL_COLOR));
        Ok(())
    }

    // Tests a resize past the pixel limit keeps the previous canvas intact
    // Verified by swapping in an empty image when allocation fails
    #[test]
    fn test_oversized_resize_keeps_canvas() -> cellmaze::Result<()> {
        let mut canvas = PixelCanvas::new(Layout::Thick, 3, 2, 8)?;
        canvas.on_cell_changed(c(0, 0), CellState::Open);

        canvas.on_grid_resized(4096, 2048);

        assert_eq!(canvas.image().dimensions(), (24, 16));
        assert_eq!(canvas.cell_color(c(0, 0)), Some(OPEN_COLOR));
        canvas.on_cell_changed(c(4000, 2000), CellState::Open);
        assert_eq!(canvas.image().dimensions(), (24, 16));
        Ok(())
    }

    #[test]
    fn test_layout_for_strategy() {
        assert_eq!(Layout::for_strategy(Strategy::Unconstrained), Layout::Thin);
        assert_eq!(Layout::for_strategy(Strategy::DegreeConstrained), Layout::Thick);
        assert_eq!(Layout::Thin.blocks(3, 2), (7, 5));
    }

    // Tests PNG export creates missing directories and round-trips pixels
    #[test]
    fn test_export_png() -> cellmaze::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested").join("maze.png");
        let mut canvas = PixelCanvas::new(Layout::Thick, 3, 2, 2)?;
        canvas.on_cell_changed(c(2, 1), CellState::Cursor);

        canvas.export_png(&path)?;

        let loaded = image::open(&path)?.to_rgba8();
        assert_eq!(loaded.dimensions(), (6, 4));
        assert_eq!(loaded.get_pixel(4, 0).0, CURSOR_COLOR);
        Ok(())
    }
}
