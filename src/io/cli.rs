//! Command-line interface for generating, paving and exporting a maze

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use log::info;

use crate::algorithm::executor::Maze;
use crate::algorithm::generator::{GenerationStats, Strategy};
use crate::algorithm::selection::RandomSelector;
use crate::io::configuration::{
    DEFAULT_CELL_PIXELS, DEFAULT_HEIGHT, DEFAULT_SEED, DEFAULT_STEPS_PER_FRAME, DEFAULT_WIDTH,
    GIF_FRAME_DELAY_MS, VISUALIZATION_SUFFIX,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{Layout, PixelCanvas};
use crate::io::progress::ProgressManager;
use crate::io::sink::RenderSink;
use crate::io::visualization::VisualizationCapture;
use crate::spatial::Coordinate;

/// Wall style of the generated maze
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Style {
    /// Walls are whole cells; carved cells never touch more than their tree neighbors
    Thick,
    /// Every cell is carved; walls are thin lines between cells
    Thin,
}

impl Style {
    /// Generation strategy producing this style
    pub const fn strategy(self) -> Strategy {
        match self {
            Self::Thick => Strategy::DegreeConstrained,
            Self::Thin => Strategy::Unconstrained,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "cellmaze")]
#[command(
    author,
    version,
    about = "Carve a maze cell by cell and optionally pave a distance field"
)]
/// Command-line arguments for the maze generator
pub struct Cli {
    /// Grid width in cells
    #[arg(short = 'w', long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Grid height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Wall style
    #[arg(long, value_enum, default_value_t = Style::Thick)]
    pub style: Style,

    /// Output PNG path
    #[arg(short, long, default_value = "maze.png")]
    pub output: PathBuf,

    /// Pave a distance field from this cell once generation is done
    #[arg(long, value_name = "X,Y", value_parser = parse_coordinate)]
    pub pave: Option<Coordinate>,

    /// Edge length in pixels of one rendered block
    #[arg(long, default_value_t = DEFAULT_CELL_PIXELS)]
    pub cell_pixels: u32,

    /// Also export the generation as an animated GIF
    ///
    /// Without a path, the GIF is written next to the PNG.
    #[arg(long, value_name = "GIF")]
    pub visualize: Option<Option<PathBuf>>,

    /// Generator steps between two animation frames
    #[arg(long, default_value_t = DEFAULT_STEPS_PER_FRAME)]
    pub steps_per_frame: usize,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Where the animation goes, if one was requested
    pub fn visualization_path(&self) -> Option<PathBuf> {
        if let Some(requested) = self.visualize.as_ref()?.as_ref() {
            return Some(requested.clone());
        }
        let stem = self.output.file_stem().unwrap_or_default();
        let name = format!("{}{VISUALIZATION_SUFFIX}", stem.to_string_lossy());
        Some(self.output.with_file_name(name))
    }
}

/// Parse `"x,y"` into a coordinate
///
/// # Errors
///
/// Returns a message if the text is not two comma-separated integers
pub fn parse_coordinate(text: &str) -> std::result::Result<Coordinate, String> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{text}'"))?;
    let x = x
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("invalid x '{}': {e}", x.trim()))?;
    let y = y
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("invalid y '{}': {e}", y.trim()))?;
    Ok(Coordinate::new(x, y))
}

/// What one run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Steps taken until generation finished
    pub steps: usize,
    /// Carve and backtrack counts
    pub stats: GenerationStats,
    /// Cells open in the finished maze
    pub open_cells: usize,
    /// Largest pavement distance, if a pavement run happened
    pub max_distance: Option<u32>,
    /// Written PNG
    pub image_path: PathBuf,
    /// Written GIF, if requested
    pub visualization_path: Option<PathBuf>,
}

/// Drives one maze from the command line to exported files
pub struct MazeRunner {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl MazeRunner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self {
            cli,
            progress_manager: None,
        }
    }

    /// Generate, optionally pave, and export
    ///
    /// # Errors
    ///
    /// Returns an error if the size or rendering parameters are invalid, or
    /// if exporting the PNG or GIF fails
    pub fn process(&mut self) -> Result<RunSummary> {
        if self.cli.steps_per_frame == 0 {
            return Err(invalid_parameter(
                "steps_per_frame",
                &self.cli.steps_per_frame,
                &"must be at least 1",
            ));
        }

        let start_time = Instant::now();
        let strategy = self.cli.style.strategy();
        let canvas = PixelCanvas::new(
            Layout::for_strategy(strategy),
            self.cli.width,
            self.cli.height,
            self.cli.cell_pixels,
        )?;
        let selector = RandomSelector::new(self.cli.seed);

        if self.cli.should_show_progress() {
            self.progress_manager = Some(ProgressManager::new(
                strategy.name(),
                self.cli.width.saturating_mul(self.cli.height),
            ));
        }

        let summary = if let Some(viz_path) = self.cli.visualization_path() {
            let capture = VisualizationCapture::new(canvas);
            let mut maze = Maze::new(strategy, self.cli.width, self.cli.height, selector, capture)?;
            maze.sink_mut().capture_frame();
            let steps_per_frame = self.cli.steps_per_frame;
            let mut summary = self.drive(&mut maze, |sink, steps| {
                if steps.is_multiple_of(steps_per_frame) {
                    sink.capture_frame();
                }
            })?;

            let mut recorded = maze.into_sink();
            recorded.capture_frame();
            recorded.export_gif(&viz_path, GIF_FRAME_DELAY_MS)?;
            recorded.canvas().export_png(&self.cli.output)?;
            summary.visualization_path = Some(viz_path);
            summary
        } else {
            let mut maze = Maze::new(strategy, self.cli.width, self.cli.height, selector, canvas)?;
            let summary = self.drive(&mut maze, |_, _| {})?;
            maze.into_sink().export_png(&self.cli.output)?;
            summary
        };

        info!(
            "wrote {} in {:.2?}",
            summary.image_path.display(),
            start_time.elapsed()
        );
        Ok(summary)
    }

    /// Step to completion, then pave if requested
    ///
    /// `on_step` sees the sink after every step together with the step count.
    /// The pavement run, if any, is left for the caller to capture.
    // Allow print for user feedback when the pave cell is unusable
    #[allow(clippy::print_stderr)]
    fn drive<S, F>(&self, maze: &mut Maze<RandomSelector, S>, mut on_step: F) -> Result<RunSummary>
    where
        S: RenderSink,
        F: FnMut(&mut S, usize),
    {
        let mut active = true;
        while active {
            active = maze.step()?;
            let steps = maze.stats().steps;
            on_step(maze.sink_mut(), steps);
            if let Some(ref pm) = self.progress_manager {
                pm.update_steps(steps);
            }
        }

        let steps = maze.stats().steps;
        if let Some(ref pm) = self.progress_manager {
            pm.finish(steps);
        }

        let mut max_distance = None;
        if let Some(cell) = self.cli.pave {
            if maze.on_click(cell) {
                max_distance = Some(maze.pavement().max_distance());
            } else if !self.cli.quiet {
                eprintln!("Cannot pave from {cell}: not an open cell of the maze");
            }
        }

        Ok(RunSummary {
            steps,
            stats: maze.stats(),
            open_cells: maze.grid().open_count(),
            max_distance,
            image_path: self.cli.output.clone(),
            visualization_path: None,
        })
    }
}
