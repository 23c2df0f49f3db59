//! Pixel canvas sink and PNG export
//!
//! Each cell maps to a square block of pixels. The thick layout gives every
//! cell its own block; the thin layout interleaves wall blocks between cells
//! so carved passages show up as opened walls.

use std::path::Path;

use image::{Rgba, RgbaImage};
use log::warn;

use crate::algorithm::generator::Strategy;
use crate::io::configuration::{
    CURSOR_COLOR, FAR_COLOR, MAX_CANVAS_PIXELS, MAX_CELL_PIXELS, NEAR_COLOR, OPEN_COLOR,
    WALL_COLOR,
};
use crate::io::error::{MazeError, Result, invalid_parameter};
use crate::io::sink::{CellState, RenderSink};
use crate::math::interpolation::lerp_rgba;
use crate::spatial::Coordinate;
use crate::spatial::grid::validate_size;

/// How cells are laid out on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// One block per cell; walls are whole cells
    Thick,
    /// `(2w + 1) x (2h + 1)` blocks; walls sit between cells
    Thin,
}

impl Layout {
    /// Layout matching how a strategy carves
    pub const fn for_strategy(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Unconstrained => Self::Thin,
            Strategy::DegreeConstrained => Self::Thick,
        }
    }

    /// Canvas size in blocks for a grid size in cells
    pub const fn blocks(self, width: usize, height: usize) -> (usize, usize) {
        match self {
            Self::Thick => (width, height),
            Self::Thin => (2 * width + 1, 2 * height + 1),
        }
    }

    /// Block holding a cell, `None` for negative coordinates
    fn cell_block(self, coordinate: Coordinate) -> Option<(usize, usize)> {
        let x = usize::try_from(coordinate.x).ok()?;
        let y = usize::try_from(coordinate.y).ok()?;
        Some(match self {
            Self::Thick => (x, y),
            Self::Thin => (2 * x + 1, 2 * y + 1),
        })
    }

    /// Wall block between two adjacent cells in the thin layout
    fn passage_block(self, from: Coordinate, to: Coordinate) -> Option<(usize, usize)> {
        match self {
            Self::Thick => None,
            Self::Thin => {
                from.direction_to(to)?;
                let x = usize::try_from(from.x + to.x + 1).ok()?;
                let y = usize::try_from(from.y + to.y + 1).ok()?;
                Some((x, y))
            }
        }
    }
}

/// Render sink painting into an RGBA image
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    layout: Layout,
    cell_pixels: u32,
    blocks: (usize, usize),
    image: RgbaImage,
}

impl PixelCanvas {
    /// Create an all-wall canvas for a `width x height` cell grid
    ///
    /// # Errors
    ///
    /// Returns `InvalidSize` for degenerate grids and `InvalidParameter` if
    /// `cell_pixels` is outside `1..=MAX_CELL_PIXELS` or the canvas would be
    /// too large
    pub fn new(layout: Layout, width: usize, height: usize, cell_pixels: u32) -> Result<Self> {
        if cell_pixels == 0 || cell_pixels > MAX_CELL_PIXELS {
            return Err(invalid_parameter(
                "cell_pixels",
                &cell_pixels,
                &format!("must be between 1 and {MAX_CELL_PIXELS}"),
            ));
        }
        let (image, blocks) = Self::allocate(layout, width, height, cell_pixels)?;
        Ok(Self {
            layout,
            cell_pixels,
            blocks,
            image,
        })
    }

    fn allocate(
        layout: Layout,
        width: usize,
        height: usize,
        cell_pixels: u32,
    ) -> Result<(RgbaImage, (usize, usize))> {
        validate_size(width, height)?;
        let blocks = layout.blocks(width, height);
        let pixel_width = blocks.0 as u64 * u64::from(cell_pixels);
        let pixel_height = blocks.1 as u64 * u64::from(cell_pixels);
        if pixel_width * pixel_height > MAX_CANVAS_PIXELS {
            return Err(invalid_parameter(
                "canvas",
                &format!("{pixel_width}x{pixel_height}"),
                &"canvas would exceed the pixel limit",
            ));
        }
        let image = RgbaImage::from_pixel(
            pixel_width as u32,
            pixel_height as u32,
            Rgba(WALL_COLOR),
        );
        Ok((image, blocks))
    }

    /// Rendered image
    pub const fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Layout in use
    pub const fn layout(&self) -> Layout {
        self.layout
    }

    /// Color currently painted for a cell, `None` if off-canvas
    pub fn cell_color(&self, coordinate: Coordinate) -> Option<[u8; 4]> {
        let (bx, by) = self.layout.cell_block(coordinate)?;
        self.block_color(bx, by)
    }

    /// Color currently painted for the wall between two adjacent cells
    ///
    /// `None` in the thick layout, which has no such blocks.
    pub fn passage_color(&self, from: Coordinate, to: Coordinate) -> Option<[u8; 4]> {
        let (bx, by) = self.layout.passage_block(from, to)?;
        self.block_color(bx, by)
    }

    fn block_color(&self, bx: usize, by: usize) -> Option<[u8; 4]> {
        let (px, py) = self.block_origin(bx, by)?;
        self.image.get_pixel_checked(px, py).map(|pixel| pixel.0)
    }

    /// Top-left pixel of a block; image rows grow downward, grid rows north
    fn block_origin(&self, bx: usize, by: usize) -> Option<(u32, u32)> {
        if bx >= self.blocks.0 || by >= self.blocks.1 {
            return None;
        }
        let flipped = self.blocks.1 - 1 - by;
        let px = u32::try_from(bx).ok()? * self.cell_pixels;
        let py = u32::try_from(flipped).ok()? * self.cell_pixels;
        Some((px, py))
    }

    fn fill_block(&mut self, block: Option<(usize, usize)>, color: [u8; 4]) {
        let Some((px, py)) = block.and_then(|(bx, by)| self.block_origin(bx, by)) else {
            return;
        };
        for dy in 0..self.cell_pixels {
            for dx in 0..self.cell_pixels {
                if let Some(pixel) = self.image.get_pixel_mut_checked(px + dx, py + dy) {
                    *pixel = Rgba(color);
                }
            }
        }
    }

    /// Save the canvas as a PNG, creating parent directories as needed
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The parent directory cannot be created
    /// - The image cannot be encoded or written
    pub fn export_png(&self, output_path: &Path) -> Result<()> {
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| MazeError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        self.image
            .save_with_format(output_path, image::ImageFormat::Png)
            .map_err(|e| MazeError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })
    }
}

/// Palette entry for a cell state
pub const fn state_color(state: CellState) -> [u8; 4] {
    match state {
        CellState::Wall => WALL_COLOR,
        CellState::Open => OPEN_COLOR,
        CellState::Cursor => CURSOR_COLOR,
    }
}

/// Palette entry for a pavement distance ratio
pub fn distance_color(ratio: f64) -> [u8; 4] {
    lerp_rgba(NEAR_COLOR, FAR_COLOR, ratio)
}

impl RenderSink for PixelCanvas {
    fn on_cell_changed(&mut self, coordinate: Coordinate, state: CellState) {
        let block = self.layout.cell_block(coordinate);
        self.fill_block(block, state_color(state));
    }

    fn on_cell_distance(&mut self, coordinate: Coordinate, ratio: f64) {
        let block = self.layout.cell_block(coordinate);
        self.fill_block(block, distance_color(ratio));
    }

    fn on_passage_opened(&mut self, from: Coordinate, to: Coordinate) {
        let block = self.layout.passage_block(from, to);
        self.fill_block(block, OPEN_COLOR);
    }

    fn on_grid_resized(&mut self, width: usize, height: usize) {
        match Self::allocate(self.layout, width, height, self.cell_pixels) {
            Ok((image, blocks)) => {
                self.image = image;
                self.blocks = blocks;
            }
            Err(err) => warn!("canvas kept at its previous size: {err}"),
        }
    }
}
