//! Generation constants and runtime configuration defaults

/// Default grid width in cells
pub const DEFAULT_WIDTH: usize = 32;
/// Default grid height in cells
pub const DEFAULT_HEIGHT: usize = 32;

/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

// Safety limit to prevent excessive memory allocation
/// Maximum number of cells in a grid
pub const MAX_CELLS: usize = 1 << 24;

/// Edge length in pixels of one rendered cell block
pub const DEFAULT_CELL_PIXELS: u32 = 8;
/// Upper bound on the cell block edge length
pub const MAX_CELL_PIXELS: u32 = 64;
/// Upper bound on rendered canvas size in pixels
pub const MAX_CANVAS_PIXELS: u64 = 1 << 28;

// Output settings
/// Suffix added to the PNG stem for the animation file
pub const VISUALIZATION_SUFFIX: &str = "_generation.gif";
/// Generator steps between two captured animation frames
pub const DEFAULT_STEPS_PER_FRAME: usize = 1;
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 20;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
/// The final frame is shown this many frame delays long
pub const FINAL_FRAME_HOLD: u32 = 25;

// Palette
/// Uncarved cell
pub const WALL_COLOR: [u8; 4] = [0, 0, 0, 255];
/// Carved cell
pub const OPEN_COLOR: [u8; 4] = [0, 0, 255, 255];
/// Generator cursor
pub const CURSOR_COLOR: [u8; 4] = [255, 0, 0, 255];
/// Distance ratio 0 (the paved seed)
pub const NEAR_COLOR: [u8; 4] = [0, 255, 0, 255];
/// Distance ratio 1 (the furthest paved cells)
pub const FAR_COLOR: [u8; 4] = [0, 26, 0, 255];

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
/// Steps between two progress bar redraws
pub const PROGRESS_REDRAW_STEPS: usize = 256;
