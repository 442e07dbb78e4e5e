//! Scan-conversion of geometric primitives into integer pixel coordinates.
//!
//! Everything here is pure: iterators yield [`Point`]s lazily and never touch
//! a buffer. Draw and undo replay the same iterator, so any off-by-one in a
//! rasterizer is shared by both and the pair stays pixel-symmetric.

#[cfg(test)]
#[path = "raster_test.rs"]
mod raster_test;

use crate::config::LineAlgorithm;

/// An integer pixel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: Point, b: Point) -> f64 {
    let dx = f64::from(b.x) - f64::from(a.x);
    let dy = f64::from(b.y) - f64::from(a.y);
    dx.hypot(dy)
}

/// Distance between two points, floored to a whole pixel radius.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn radius_between(center: Point, edge: Point) -> i32 {
    distance(center, edge).floor() as i32
}

/// Rotate `point` about `pivot` by `angle` radians.
///
/// Each axis is floored independently, not rounded: a residue such as
/// `cos(π/2) ≈ 6e-17` pushes an exact `0` just below zero and it floors to `-1`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn rotate_point(pivot: Point, point: Point, angle: f64) -> Point {
    let (sin, cos) = angle.sin_cos();
    let px = f64::from(pivot.x);
    let py = f64::from(pivot.y);
    let dx = f64::from(point.x) - px;
    let dy = f64::from(point.y) - py;
    Point {
        x: (px + dx * cos - dy * sin).floor() as i32,
        y: (py + dx * sin + dy * cos).floor() as i32,
    }
}

// =============================================================
// Bresenham line
// =============================================================

/// Bresenham line from `from` towards `to`.
///
/// The axis with the larger delta drives the loop (ties go to y). Exactly
/// `max(|dx|, |dy|)` points are produced: `from` is included, `to` is not.
/// A zero-length segment yields nothing.
#[must_use]
pub fn rasterize_line(from: Point, to: Point) -> LineIter {
    let dx = (i64::from(to.x) - i64::from(from.x)).abs();
    let dy = (i64::from(to.y) - i64::from(from.y)).abs();
    let step_x = if to.x > from.x { 1 } else { -1 };
    let step_y = if to.y > from.y { 1 } else { -1 };
    let x_major = dx > dy;
    let (major, minor) = if x_major { (dx, dy) } else { (dy, dx) };

    LineIter {
        x: from.x,
        y: from.y,
        step_x,
        step_y,
        x_major,
        major,
        minor,
        decision: 2 * minor - major,
        remaining: major,
    }
}

/// Lazy sequence of points on a Bresenham line. See [`rasterize_line`].
#[derive(Debug, Clone)]
pub struct LineIter {
    x: i32,
    y: i32,
    step_x: i32,
    step_y: i32,
    x_major: bool,
    major: i64,
    minor: i64,
    decision: i64,
    remaining: i64,
}

impl Iterator for LineIter {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.remaining <= 0 {
            return None;
        }
        let out = Point::new(self.x, self.y);
        self.remaining -= 1;

        if self.x_major {
            self.x += self.step_x;
        } else {
            self.y += self.step_y;
        }
        if self.decision < 0 {
            self.decision += 2 * self.minor;
        } else {
            if self.x_major {
                self.y += self.step_y;
            } else {
                self.x += self.step_x;
            }
            self.decision += 2 * self.minor - 2 * self.major;
        }
        Some(out)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::try_from(self.remaining).unwrap_or(0);
        (n, Some(n))
    }
}

// =============================================================
// Polynomial line
// =============================================================

/// Slope-intercept line `y = floor(x * m + b)` stepping one column at a time.
///
/// Both endpoints are included. Vertical segments have no defined slope and
/// yield nothing.
#[must_use]
pub fn rasterize_poly_line(from: Point, to: Point) -> PolyLineIter {
    if from.x == to.x {
        return PolyLineIter { x: from.x, end: to.x, step: 1, slope: 0.0, intercept: 0.0, done: true };
    }
    let slope = (f64::from(to.y) - f64::from(from.y)) / (f64::from(to.x) - f64::from(from.x));
    let intercept = f64::from(from.y) - f64::from(from.x) * slope;
    PolyLineIter {
        x: from.x,
        end: to.x,
        step: if from.x < to.x { 1 } else { -1 },
        slope,
        intercept,
        done: false,
    }
}

/// Lazy sequence of points on a slope-intercept line. See [`rasterize_poly_line`].
#[derive(Debug, Clone)]
pub struct PolyLineIter {
    x: i32,
    end: i32,
    step: i32,
    slope: f64,
    intercept: f64,
    done: bool,
}

impl Iterator for PolyLineIter {
    type Item = Point;

    #[allow(clippy::cast_possible_truncation)]
    fn next(&mut self) -> Option<Point> {
        if self.done {
            return None;
        }
        let y = (f64::from(self.x) * self.slope + self.intercept).floor() as i32;
        let out = Point::new(self.x, y);
        if self.x == self.end {
            self.done = true;
        } else {
            self.x += self.step;
        }
        Some(out)
    }
}

/// A straight segment rasterized with the configured algorithm.
#[derive(Debug, Clone)]
pub enum Segment {
    Bresenham(LineIter),
    Polynomial(PolyLineIter),
}

impl Segment {
    #[must_use]
    pub fn new(algorithm: LineAlgorithm, from: Point, to: Point) -> Self {
        match algorithm {
            LineAlgorithm::Bresenham => Self::Bresenham(rasterize_line(from, to)),
            LineAlgorithm::Polynomial => Self::Polynomial(rasterize_poly_line(from, to)),
        }
    }
}

impl Iterator for Segment {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        match self {
            Self::Bresenham(it) => it.next(),
            Self::Polynomial(it) => it.next(),
        }
    }
}

// =============================================================
// Midpoint circle
// =============================================================

/// Midpoint circle of integer `radius` around `center`.
///
/// One octant is walked (`x` from 0 while `y > x`) and each step is mirrored
/// into all eight. Points on the axes are emitted twice; a radius of zero or
/// less yields nothing.
#[must_use]
pub fn rasterize_circle(center: Point, radius: i32) -> CircleIter {
    CircleIter {
        center,
        x: 0,
        y: radius,
        decision: 3 - 2 * i64::from(radius),
        octant: 0,
    }
}

/// Lazy sequence of points on a midpoint circle. See [`rasterize_circle`].
#[derive(Debug, Clone)]
pub struct CircleIter {
    center: Point,
    x: i32,
    y: i32,
    decision: i64,
    octant: u8,
}

impl CircleIter {
    fn mirrored(&self) -> Point {
        let (x, y) = (self.x, self.y);
        let (dx, dy) = match self.octant {
            0 => (x, y),
            1 => (x, -y),
            2 => (-x, y),
            3 => (-x, -y),
            4 => (y, x),
            5 => (y, -x),
            6 => (-y, x),
            _ => (-y, -x),
        };
        Point::new(self.center.x + dx, self.center.y + dy)
    }

    fn advance(&mut self) {
        let (x, y) = (i64::from(self.x), i64::from(self.y));
        if self.decision < 0 {
            self.decision += 4 * x + 6;
        } else {
            self.decision += 4 * (x - y) + 10;
            self.y -= 1;
        }
        self.x += 1;
    }
}

impl Iterator for CircleIter {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        loop {
            if self.y <= self.x {
                return None;
            }
            if self.octant < 8 {
                let out = self.mirrored();
                self.octant += 1;
                return Some(out);
            }
            self.advance();
            self.octant = 0;
        }
    }
}
