//! Frame capture and GIF generation for generation visualization

use std::path::Path;

use image::{Frame, RgbaImage};

use crate::io::configuration::{FINAL_FRAME_HOLD, VIEWER_MIN_FRAME_DELAY_MS};
use crate::io::error::{MazeError, Result};
use crate::io::image::PixelCanvas;
use crate::io::sink::{CellState, RenderSink, SinkEvent};
use crate::spatial::Coordinate;

/// Records sink notifications for post-processing into an animation
///
/// Notifications are forwarded to a live canvas and kept in order; frames
/// are only rendered when the animation is exported.
#[derive(Debug, Clone)]
pub struct VisualizationCapture {
    canvas: PixelCanvas,
    blank: PixelCanvas,
    events: Vec<SinkEvent>,
    frame_marks: Vec<usize>,
}

impl VisualizationCapture {
    /// Start capturing on top of `canvas`; its current content is the first frame
    pub fn new(canvas: PixelCanvas) -> Self {
        Self {
            blank: canvas.clone(),
            canvas,
            events: Vec::new(),
            frame_marks: Vec::new(),
        }
    }

    /// Mark the current state as one animation frame
    ///
    /// Consecutive marks without notifications in between collapse into one.
    pub fn capture_frame(&mut self) {
        if self.frame_marks.last() != Some(&self.events.len()) {
            self.frame_marks.push(self.events.len());
        }
    }

    /// Number of frames marked so far
    pub const fn frame_count(&self) -> usize {
        self.frame_marks.len()
    }

    /// Number of notifications recorded since the last resize
    pub const fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Live canvas reflecting every notification so far
    pub const fn canvas(&self) -> &PixelCanvas {
        &self.canvas
    }

    /// Stop capturing and keep the live canvas
    pub fn into_canvas(self) -> PixelCanvas {
        self.canvas
    }

    /// Export the captured frames as a GIF with automatic frame skipping
    ///
    /// Frames are skipped when `frame_delay_ms` is below what viewers honor, so
    /// the apparent speed is kept. The last frame is held `FINAL_FRAME_HOLD`
    /// delays long.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.frame_marks.is_empty() {
            return Err(MazeError::NothingCaptured);
        }

        let frame_delay_ms = frame_delay_ms.max(1);
        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms)
        } else {
            1
        };

        let frames = self.render_frames(effective_delay_ms, skip_factor as usize);

        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| MazeError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| MazeError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| MazeError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Replay the recorded events, keeping every `skip_factor`-th frame
    fn render_frames(&self, delay_ms: u32, skip_factor: usize) -> Vec<Frame> {
        let mut canvas = self.blank.clone();
        let mut frames = Vec::new();
        let mut replayed = 0;
        let mut last_kept = None;

        for (index, &mark) in self.frame_marks.iter().enumerate() {
            for event in self.events.get(replayed..mark).unwrap_or_default() {
                event.replay(&mut canvas);
            }
            replayed = mark;

            if index.is_multiple_of(skip_factor) {
                frames.push(frame(canvas.image().clone(), delay_ms));
                last_kept = Some(index);
            }
        }

        if last_kept != Some(self.frame_marks.len().saturating_sub(1)) {
            frames.push(frame(canvas.image().clone(), delay_ms));
        }

        // Final frame displays longer for better visibility
        frames.push(frame(canvas.image().clone(), delay_ms * FINAL_FRAME_HOLD));

        frames
    }

    fn record(&mut self, event: SinkEvent) {
        event.replay(&mut self.canvas);
        self.events.push(event);
    }
}

fn frame(buffer: RgbaImage, delay_ms: u32) -> Frame {
    Frame::from_parts(buffer, 0, 0, image::Delay::from_numer_denom_ms(delay_ms, 1))
}

impl RenderSink for VisualizationCapture {
    fn on_cell_changed(&mut self, coordinate: Coordinate, state: CellState) {
        self.record(SinkEvent::CellChanged(coordinate, state));
    }

    fn on_cell_distance(&mut self, coordinate: Coordinate, ratio: f64) {
        self.record(SinkEvent::CellDistance(coordinate, ratio));
    }

    fn on_passage_opened(&mut self, from: Coordinate, to: Coordinate) {
        self.record(SinkEvent::PassageOpened(from, to));
    }

    fn on_grid_resized(&mut self, width: usize, height: usize) {
        self.canvas.on_grid_resized(width, height);
        self.blank = self.canvas.clone();
        self.events.clear();
        self.frame_marks.clear();
    }
}
