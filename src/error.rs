//! Error types.
//!
//! None of these are fatal to a drawing session: the renderer drops
//! out-of-bounds pixels, ignores unknown tools, and renders degenerate
//! geometry as nothing. They exist so callers can observe what was absorbed.

/// Anomalies raised while rasterizing or dispatching input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// A pixel coordinate fell outside the buffer extent.
    #[error("pixel ({x}, {y}) outside {width}x{height} buffer")]
    OutOfBounds { x: i32, y: i32, width: u32, height: u32 },
    /// A tool id that is not one of `line`, `rect`, `circle`, `clock`, `erase`.
    #[error("unknown tool: {0}")]
    InvalidTool(String),
    /// A primitive with no extent (zero-length line, zero radius, vertical polynomial line).
    #[error("degenerate geometry")]
    DegenerateGeometry,
}

/// Error returned by [`crate::config::SketchConfig::from_json`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The input is not valid JSON for the config shape.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field parsed but holds an unusable value.
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}
