/// Command-line interface and run orchestration
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// Pixel canvas sink and PNG export
pub mod image;
/// Progress display
pub mod progress;
/// Render sink interface and basic sinks
pub mod sink;
/// Animated GIF capture of the generation
pub mod visualization;
