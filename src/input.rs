//! Input model: tool ids, drawable shapes and the stroke state.
//!
//! The host page reports tool buttons by id string and pointer positions in
//! drawing-surface pixels. `StrokeState` is what survives between those
//! events: the selected shape, the drag anchor and the last rendered end.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::fmt;
use std::str::FromStr;

use crate::error::RenderError;
use crate::raster::Point;

/// A toolbar button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Line,
    Rect,
    Circle,
    /// Analog clock showing the current time.
    Clock,
    /// Wipe the canvas, then return to the previous tool.
    Erase,
}

impl Tool {
    /// The id used by the host page's buttons.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Rect => "rect",
            Self::Circle => "circle",
            Self::Clock => "clock",
            Self::Erase => "erase",
        }
    }

    /// The shape this tool drags out, or `None` for `Erase`.
    #[must_use]
    pub fn shape(self) -> Option<Shape> {
        match self {
            Self::Line => Some(Shape::Line),
            Self::Rect => Some(Shape::Rect),
            Self::Circle => Some(Shape::Circle),
            Self::Clock => Some(Shape::Clock),
            Self::Erase => None,
        }
    }
}

impl FromStr for Tool {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "line" => Ok(Self::Line),
            "rect" => Ok(Self::Rect),
            "circle" => Ok(Self::Circle),
            "clock" => Ok(Self::Clock),
            "erase" => Ok(Self::Erase),
            other => Err(RenderError::InvalidTool(other.to_owned())),
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A shape that can be previewed by dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shape {
    #[default]
    Line,
    Rect,
    Circle,
    Clock,
}

impl From<Shape> for Tool {
    fn from(shape: Shape) -> Self {
        match shape {
            Shape::Line => Self::Line,
            Shape::Rect => Self::Rect,
            Shape::Circle => Self::Circle,
            Shape::Clock => Self::Clock,
        }
    }
}

/// Per-session stroke state, mutated on every input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StrokeState {
    /// The shape the next drag will draw.
    pub shape: Shape,
    /// Drag anchor, set on pointer-down.
    pub start: Option<Point>,
    /// Last pointer position while dragging; `None` until the first move.
    pub end: Option<Point>,
    pub pointer_down: bool,
}

impl StrokeState {
    /// Anchor and end of the shape currently on screen, if one was drawn.
    #[must_use]
    pub fn rendered(&self) -> Option<(Point, Point)> {
        self.start.zip(self.end)
    }
}
