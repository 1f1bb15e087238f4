//! Error types for catalog loading, configuration and tracing.
//!
//! Rejected pointer input is not an error: it is reported as
//! [`TraceEvent::InputRejected`](crate::api::types::TraceEvent) and never
//! surfaces here.

use thiserror::Error;

/// Problems with letter data, found when a catalog is built or parsed.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A catalog must hold at least one letter.
    #[error("letter catalog is empty")]
    EmptyCatalog,

    /// A letter entry has neither strokes nor a glyph region.
    #[error("letter '{letter}' has no strokes")]
    NoStrokes {
        /// Identifier of the offending letter.
        letter: char,
    },

    /// A stroke without guide points.
    #[error("letter '{letter}' stroke {stroke} has no points")]
    EmptyStroke {
        /// Identifier of the offending letter.
        letter: char,
        /// Index of the empty stroke.
        stroke: usize,
    },

    /// An entry carries both guide strokes and a glyph region.
    #[error("letter '{letter}' defines both strokes and a glyph region")]
    AmbiguousLetter {
        /// Identifier of the offending letter.
        letter: char,
    },

    /// A glyph region whose width or height is not positive or too large.
    #[error("letter '{letter}' glyph region size must be positive and at most {max}", max = crate::core::catalog::MAX_GLYPH_EXTENT)]
    InvalidGlyph {
        /// Identifier of the offending letter.
        letter: char,
    },

    /// A guide point or glyph position that is not finite or lies far
    /// outside any canvas.
    #[error("letter '{letter}' coordinate {value} is outside ±{max}", max = crate::core::catalog::MAX_COORDINATE)]
    CoordinateOutOfRange {
        /// Identifier of the offending letter.
        letter: char,
        /// The rejected coordinate.
        value: f32,
    },

    /// Two entries share the same identifier.
    #[error("letter '{letter}' is defined more than once")]
    DuplicateLetter {
        /// The repeated identifier.
        letter: char,
    },

    /// The catalog JSON could not be parsed.
    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Misuse of the trace engine or an engine state that cannot be valid.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TraceError {
    /// A tolerance that is zero, negative or not finite.
    #[error("tolerance `{name}` must be a positive finite number, got {value}")]
    InvalidTolerance {
        /// Which tolerance was rejected.
        name: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// The engine tried to read a stroke past the end of the letter.
    #[error("stroke index {index} out of range for a letter with {len} strokes")]
    StrokeOutOfRange {
        /// Requested stroke index.
        index: usize,
        /// Number of strokes in the letter.
        len: usize,
    },

    /// The engine tried to read a guide point past the end of a stroke.
    #[error("guide point index {index} out of range for a stroke with {len} points")]
    PointOutOfRange {
        /// Requested point index.
        index: usize,
        /// Number of points in the stroke.
        len: usize,
    },
}

/// Invalid tracer configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration JSON could not be parsed.
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// One of the hit-testing tolerances is invalid.
    #[error(transparent)]
    Tolerance(#[from] TraceError),

    /// A numeric field outside its allowed range.
    #[error("config field `{field}` is out of range: {value}")]
    OutOfRange {
        /// Name of the field.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
}

/// Failures of a letter-selection or session operation.
///
/// A failed operation leaves the session exactly as it was.
#[derive(Error, Debug)]
pub enum SessionError {
    /// No catalog entry has this identifier.
    #[error("no letter '{0}' in the catalog")]
    UnknownLetter(char),

    /// Selection index outside the catalog.
    #[error("letter index {index} out of range for a catalog of {len}")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Catalog size.
        len: usize,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Trace(#[from] TraceError),
}
