//! Error types for maze construction, generation and export

use std::fmt;
use std::path::PathBuf;

use crate::spatial::Coordinate;

/// Everything that can go wrong while building, carving, paving or exporting a maze
#[derive(Debug)]
pub enum MazeError {
    /// Coordinate lies outside `[0, width) x [0, height)`
    OutOfBounds {
        /// The rejected coordinate
        coordinate: Coordinate,
        /// Grid width at the time of access
        width: usize,
        /// Grid height at the time of access
        height: usize,
    },

    /// Grid dimensions rejected before allocation
    InvalidSize {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
        /// Explanation of why the size is invalid
        reason: &'static str,
    },

    /// A numeric or textual option was out of range
    InvalidParameter {
        /// Option or argument name
        parameter: &'static str,
        /// Rejected value, rendered for display
        value: String,
        /// Accepted range or rule
        reason: String,
    },

    /// PNG or GIF encoding failed
    ImageExport {
        /// Destination file
        path: PathBuf,
        /// Encoder failure
        source: image::ImageError,
    },

    /// Creating an output file or its directory failed
    FileSystem {
        /// File or directory being written
        path: PathBuf,
        /// What was being attempted, e.g. "create directory"
        operation: &'static str,
        /// OS-level cause
        source: std::io::Error,
    },

    /// An animation export was requested but no frames were captured
    NothingCaptured,
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                coordinate,
                width,
                height,
            } => {
                write!(
                    f,
                    "cell {coordinate} lies outside the {width}x{height} grid"
                )
            }
            Self::InvalidSize {
                width,
                height,
                reason,
            } => {
                write!(f, "cannot build a {width}x{height} grid: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "{parameter} = '{value}' rejected: {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "could not write image '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "{operation} failed for '{}': {source}",
                    path.display()
                )
            }
            Self::NothingCaptured => f.write_str("no generation frames were captured"),
        }
    }
}

impl std::error::Error for MazeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, MazeError>;

impl From<image::ImageError> for MazeError {
    fn from(source: image::ImageError) -> Self {
        Self::ImageExport {
            path: PathBuf::new(),
            source,
        }
    }
}

impl From<std::io::Error> for MazeError {
    fn from(source: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::new(),
            operation: "i/o",
            source,
        }
    }
}

/// `InvalidParameter` from anything displayable
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MazeError {
    MazeError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// `InvalidSize` for a rejected width and height
pub const fn invalid_size(width: usize, height: usize, reason: &'static str) -> MazeError {
    MazeError::InvalidSize {
        width,
        height,
        reason,
    }
}
