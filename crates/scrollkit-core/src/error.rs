use std::fmt;

use thiserror::Error;

use crate::resize::GutterSide;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Row configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Malformed row or section input, detected at `set_rows` time. Never recovered.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// Flat rows and sections were mixed in one input list.
    #[error("item {index} does not match the input kind decided by the first item")]
    MixedInput { index: usize },

    #[error("row {row} in section {section} has invalid height {height}")]
    InvalidHeight {
        section: usize,
        row: usize,
        height: f64,
    },

    #[error("header of section {section} has invalid height {height}")]
    InvalidHeaderHeight { section: usize, height: f64 },

    /// Sectioned input requires every header to carry a stable key.
    #[error("header of section {section} has no key")]
    MissingHeaderKey { section: usize },

    #[error("duplicate key '{key}'")]
    DuplicateKey { key: String },

    #[error("offset buffer must be at least 1")]
    InvalidOffsetBuffer,
}

/// Scroll axis named in bound warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Horizontal => f.write_str("horizontal"),
            Axis::Vertical => f.write_str("vertical"),
        }
    }
}

/// Non-fatal: a requested value was outside the achievable range and was clamped.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundsWarning {
    ScrollClamped {
        axis: Axis,
        requested: f64,
        applied: f64,
    },
    ResizeClamped {
        side: GutterSide,
        requested: f64,
        applied: f64,
    },
}

impl fmt::Display for BoundsWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundsWarning::ScrollClamped {
                axis,
                requested,
                applied,
            } => write!(f, "{} scroll {} clamped to {}", axis, requested, applied),
            BoundsWarning::ResizeClamped {
                side,
                requested,
                applied,
            } => write!(f, "{} gutter width {} clamped to {}", side, requested, applied),
        }
    }
}
