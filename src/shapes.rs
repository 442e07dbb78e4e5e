//! Shape rendering: lines, rectangles, circles and clock faces.
//!
//! Each shape is drawn or undone from the same two control points. Undo
//! replays exactly the primitives that draw produced, in erase mode, so a
//! draw followed by the matching undo leaves the buffer as it was except
//! where committed ink protects a pixel.

#[cfg(test)]
#[path = "shapes_test.rs"]
mod shapes_test;

use std::f64::consts::FRAC_PI_6;

use crate::config::{HourHandFormula, LineAlgorithm, SketchConfig};
use crate::consts::{
    FRAC_PI_30, HOURS_HAND_RATIO, MINUTES_HAND_RATIO, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND,
    SECONDS_HAND_RATIO,
};
use crate::error::RenderError;
use crate::input::Shape;
use crate::pixels::PixelBuffer;
use crate::raster::{Point, Segment, distance, radius_between, rasterize_circle, rotate_point};

/// Whether a primitive sets or clears its pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Draw,
    Erase,
}

// =============================================================
// Clock face
// =============================================================

/// An analog clock dragged out from `center` to `edge`, showing `timestamp_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockFace {
    pub center: Point,
    pub edge: Point,
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
}

/// Tip positions of the three clock hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hands {
    pub seconds: Point,
    pub minutes: Point,
    pub hours: Point,
}

impl ClockFace {
    #[must_use]
    pub fn new(center: Point, edge: Point, timestamp_ms: i64) -> Self {
        Self { center, edge, timestamp_ms }
    }

    /// The same face showing a different time.
    #[must_use]
    pub fn at(self, timestamp_ms: i64) -> Self {
        Self { timestamp_ms, ..self }
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        distance(self.center, self.edge)
    }

    /// Compute hand tips. Lengths are floored fractions of the radius.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hands(&self, formula: HourHandFormula) -> Hands {
        let t = self.timestamp_ms as f64;
        let r = self.radius();

        let seconds_angle = ((t / MS_PER_SECOND) % 60.0).floor() * FRAC_PI_30;
        let minutes_angle = ((t / MS_PER_MINUTE) % 60.0).floor() * FRAC_PI_30;
        let hours = (t / MS_PER_HOUR) % 12.0;
        let hours_angle = match formula {
            HourHandFormula::Legacy => ((hours + 1.0 - 12.0) * FRAC_PI_6).floor(),
            HourHandFormula::Standard => hours.floor() * FRAC_PI_6,
        };

        Hands {
            seconds: self.hand_tip(r * SECONDS_HAND_RATIO, seconds_angle),
            minutes: self.hand_tip(r * MINUTES_HAND_RATIO, minutes_angle),
            hours: self.hand_tip(r * HOURS_HAND_RATIO, hours_angle),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn hand_tip(&self, length: f64, angle: f64) -> Point {
        let length = length.floor() as i32;
        let twelve = Point::new(self.center.x, self.center.y - length);
        rotate_point(self.center, twelve, angle)
    }
}

// =============================================================
// Renderer
// =============================================================

/// Pixels touched by one primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Plotted {
    /// Pixels inside the buffer.
    pub written: usize,
    /// Pixels dropped as out of bounds.
    pub dropped: usize,
}

impl Plotted {
    fn merge(self, other: Self) -> Self {
        Self { written: self.written + other.written, dropped: self.dropped + other.dropped }
    }
}

/// Draws and undoes shapes on a [`PixelBuffer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapeRenderer {
    line_algorithm: LineAlgorithm,
    hour_hand: HourHandFormula,
}

impl ShapeRenderer {
    #[must_use]
    pub fn new(line_algorithm: LineAlgorithm, hour_hand: HourHandFormula) -> Self {
        Self { line_algorithm, hour_hand }
    }

    #[must_use]
    pub fn from_config(config: &SketchConfig) -> Self {
        Self::new(config.line_algorithm, config.hour_hand)
    }

    #[must_use]
    pub fn hour_hand(&self) -> HourHandFormula {
        self.hour_hand
    }

    /// Write every point in `mode`; out-of-bounds points are counted and dropped.
    fn plot(buf: &mut PixelBuffer, points: impl Iterator<Item = Point>, mode: Mode) -> Plotted {
        let mut out = Plotted::default();
        for p in points {
            let res = match mode {
                Mode::Draw => buf.set_pixel(p.x, p.y),
                Mode::Erase => buf.clear_pixel(p.x, p.y),
            };
            match res {
                Ok(()) => out.written += 1,
                Err(RenderError::OutOfBounds { .. }) => out.dropped += 1,
                Err(e) => tracing::debug!(error = %e, "pixel rejected"),
            }
        }
        out
    }

    /// A straight segment, far endpoint excluded under Bresenham.
    pub fn line(&self, buf: &mut PixelBuffer, from: Point, to: Point, mode: Mode) -> Plotted {
        if from == to {
            tracing::trace!(error = %RenderError::DegenerateGeometry, ?from, "zero-length line");
        }
        Self::plot(buf, Segment::new(self.line_algorithm, from, to), mode)
    }

    /// Bounding box of `a` and `b` as four independent lines.
    pub fn rect(&self, buf: &mut PixelBuffer, a: Point, b: Point, mode: Mode) -> Plotted {
        rect_edges(a, b)
            .into_iter()
            .map(|(from, to)| self.line(buf, from, to, mode))
            .fold(Plotted::default(), Plotted::merge)
    }

    /// Circle centered on `center` passing at floored distance to `edge`.
    pub fn circle(&self, buf: &mut PixelBuffer, center: Point, edge: Point, mode: Mode) -> Plotted {
        let radius = radius_between(center, edge);
        if radius <= 0 {
            tracing::trace!(error = %RenderError::DegenerateGeometry, ?center, "zero-radius circle");
        }
        Self::plot(buf, rasterize_circle(center, radius), mode)
    }

    /// Circle, then seconds, minutes and hours hands, all in `mode`.
    pub fn clock(&self, buf: &mut PixelBuffer, face: &ClockFace, mode: Mode) -> Plotted {
        let hands = face.hands(self.hour_hand);
        let mut out = self.circle(buf, face.center, face.edge, mode);
        for tip in [hands.seconds, hands.minutes, hands.hours] {
            out = out.merge(self.line(buf, face.center, tip, mode));
        }
        out
    }

    /// Draw or undo a dragged shape. Clocks render at `timestamp_ms`.
    pub fn shape(
        &self,
        buf: &mut PixelBuffer,
        shape: Shape,
        start: Point,
        end: Point,
        timestamp_ms: i64,
        mode: Mode,
    ) -> Plotted {
        let plotted = match shape {
            Shape::Line => self.line(buf, start, end, mode),
            Shape::Rect => self.rect(buf, start, end, mode),
            Shape::Circle => self.circle(buf, start, end, mode),
            Shape::Clock => self.clock(buf, &ClockFace::new(start, end, timestamp_ms), mode),
        };
        if plotted.dropped > 0 {
            tracing::debug!(?shape, ?mode, dropped = plotted.dropped, "out-of-bounds pixels dropped");
        }
        plotted
    }

    pub fn draw(&self, buf: &mut PixelBuffer, shape: Shape, start: Point, end: Point, timestamp_ms: i64) -> Plotted {
        self.shape(buf, shape, start, end, timestamp_ms, Mode::Draw)
    }

    pub fn undo(&self, buf: &mut PixelBuffer, shape: Shape, start: Point, end: Point, timestamp_ms: i64) -> Plotted {
        self.shape(buf, shape, start, end, timestamp_ms, Mode::Erase)
    }

    pub fn draw_clock(&self, buf: &mut PixelBuffer, face: &ClockFace) -> Plotted {
        self.clock(buf, face, Mode::Draw)
    }

    pub fn undo_clock(&self, buf: &mut PixelBuffer, face: &ClockFace) -> Plotted {
        self.clock(buf, face, Mode::Erase)
    }
}

/// The four edges of the box spanned by `a` and `b`, in drawing order.
#[must_use]
pub fn rect_edges(a: Point, b: Point) -> [(Point, Point); 4] {
    [
        (a, Point::new(b.x, a.y)),
        (a, Point::new(a.x, b.y)),
        (b, Point::new(a.x, b.y)),
        (b, Point::new(b.x, a.y)),
    ]
}
