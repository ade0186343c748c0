//! Error types for the ColorBox.

use thiserror::Error;

/// Errors produced while parsing colors, reading configuration, or handling
/// pointer input.
///
/// Only parsing and configuration errors reach callers. Geometry and gesture
/// errors are detected internally, logged, and absorbed so the widget always
/// keeps its last known-good color.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorError {
    /// The input matched none of the recognized color notations.
    #[error("invalid color format: {0}")]
    InvalidColorFormat(String),

    /// A surface was measured with a zero (or negative) extent.
    #[error("degenerate geometry: {width}x{height}")]
    DegenerateGeometry { width: f64, height: f64 },

    /// A pointer event arrived without the data needed to map it.
    #[error("malformed gesture event: {0}")]
    MalformedGestureEvent(&'static str),

    /// A palette lookup named an entry that does not exist.
    #[error("unknown palette entry: {0}")]
    UnknownPaletteEntry(String),

    /// A configuration supplied both `value` and `defaultValue`.
    #[error("`value` and `defaultValue` are mutually exclusive")]
    ConflictingValueSource,
}
