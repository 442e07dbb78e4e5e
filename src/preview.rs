//! Live preview: the pointer-driven state machine.
//!
//! While the pointer is down every move undoes the frame drawn for the
//! previous position and draws the frame for the new one. Releasing the
//! pointer commits whatever is on screen as permanent ink, except the clock:
//! its last frame is undone first, and the face keeps animating on ticks
//! until a new clock drag starts or the tool changes.
//!
//! ```text
//!   Idle ──pointer_down──▶ Dragging ──pointer_move──▶ Dragging
//!    ▲                        │
//!    └───────pointer_up───────┘  (commit baseline)
//! ```

#[cfg(test)]
#[path = "preview_test.rs"]
mod preview_test;

use crate::input::{Shape, StrokeState, Tool};
use crate::pixels::PixelBuffer;
use crate::raster::Point;
use crate::shapes::{ClockFace, ShapeRenderer};
use crate::state::{StateCell, SubscriptionId};

/// Whether a drag is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Dragging,
}

/// What a tool selection did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolOutcome {
    /// Already the active shape.
    Unchanged,
    /// The active shape changed; any in-flight preview was undone.
    Switched { from: Shape, to: Shape },
    /// The canvas was wiped; the active shape is unchanged.
    Cleared,
}

#[derive(Debug, Clone, Copy)]
struct ClockPreview {
    face: ClockFace,
    /// Whether `face` is currently drawn in the buffer.
    visible: bool,
}

/// Drives draw/undo of the in-flight shape from pointer and timer events.
#[derive(Debug)]
pub struct PreviewController {
    stroke: StateCell<StrokeState>,
    renderer: ShapeRenderer,
    clock: Option<ClockPreview>,
}

impl PreviewController {
    #[must_use]
    pub fn new(renderer: ShapeRenderer) -> Self {
        Self { stroke: StateCell::default(), renderer, clock: None }
    }

    #[must_use]
    pub fn stroke(&self) -> &StrokeState {
        self.stroke.get()
    }

    #[must_use]
    pub fn shape(&self) -> Shape {
        self.stroke.get().shape
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.stroke.get().pointer_down { Phase::Dragging } else { Phase::Idle }
    }

    /// The clock face that ticks redraw, if a clock has been dragged out.
    #[must_use]
    pub fn clock_face(&self) -> Option<ClockFace> {
        self.clock.map(|c| c.face)
    }

    /// Observe every stroke-state transition.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&StrokeState, &StrokeState) + 'static) -> SubscriptionId {
        self.stroke.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.stroke.unsubscribe(id)
    }

    /// Start a drag at `at`. Returns whether the buffer changed.
    pub fn pointer_down(&mut self, buf: &mut PixelBuffer, at: Point) -> bool {
        let mut mutated = false;
        if self.shape() == Shape::Clock {
            mutated = self.drop_clock(buf);
        }
        self.stroke.update(|s| {
            s.end = None;
            s.start = Some(at);
            s.pointer_down = true;
        });
        tracing::trace!(?at, "drag started");
        mutated
    }

    /// Move the drag to `at`: undo the previous frame, draw the new one.
    ///
    /// Ignored while idle. Returns whether the buffer changed.
    pub fn pointer_move(&mut self, buf: &mut PixelBuffer, at: Point, now_ms: i64) -> bool {
        if !self.stroke.get().pointer_down {
            return false;
        }
        let t = self.stroke.update(|s| s.end = Some(at));
        let Some(start) = t.next.start else {
            return false;
        };
        let shape = t.next.shape;

        if shape == Shape::Clock {
            self.show_clock(buf, ClockFace::new(start, at, now_ms));
        } else {
            if let Some((prev_start, prev_end)) = t.prev.rendered() {
                self.renderer.undo(buf, shape, prev_start, prev_end, now_ms);
            }
            self.renderer.draw(buf, shape, start, at, now_ms);
        }
        tracing::trace!(?shape, ?start, end = ?at, "preview frame");
        true
    }

    /// End the drag and commit the buffer as the new baseline.
    ///
    /// A visible clock frame is undone before the commit so the clock never
    /// becomes permanent ink.
    pub fn pointer_up(&mut self, buf: &mut PixelBuffer) {
        self.stroke.update(|s| s.pointer_down = false);
        if self.shape() == Shape::Clock {
            self.hide_clock(buf);
        }
        buf.commit();
        tracing::debug!(shape = ?self.shape(), "stroke committed");
    }

    /// Switch tools.
    ///
    /// `Erase` wipes the canvas and the baseline, then keeps the current
    /// shape. Any other tool undoes the in-flight preview of the old shape
    /// before switching, and draws nothing.
    pub fn select_tool(&mut self, buf: &mut PixelBuffer, tool: Tool) -> ToolOutcome {
        let Some(to) = tool.shape() else {
            buf.clear_all();
            if let Some(clock) = self.clock.as_mut() {
                clock.visible = false;
            }
            self.stroke.update(|s| s.end = None);
            tracing::info!("canvas cleared");
            return ToolOutcome::Cleared;
        };

        let from = self.shape();
        if from == to {
            return ToolOutcome::Unchanged;
        }

        let stroke = *self.stroke.get();
        if from == Shape::Clock {
            self.drop_clock(buf);
        } else if let (true, Some((start, end))) = (stroke.pointer_down, stroke.rendered()) {
            self.renderer.undo(buf, from, start, end, 0);
        }
        self.stroke.update(|s| {
            s.shape = to;
            s.end = None;
        });
        tracing::info!(?from, ?to, "tool switched");
        ToolOutcome::Switched { from, to }
    }

    /// Advance the clock to `now_ms`. Returns whether the buffer changed.
    ///
    /// Does nothing unless the clock is the active shape and a face exists.
    pub fn tick(&mut self, buf: &mut PixelBuffer, now_ms: i64) -> bool {
        if self.shape() != Shape::Clock {
            return false;
        }
        let Some(clock) = self.clock else {
            return false;
        };
        self.show_clock(buf, clock.face.at(now_ms));
        true
    }

    /// Undo the visible clock frame (if any) and draw `face` in its place.
    fn show_clock(&mut self, buf: &mut PixelBuffer, face: ClockFace) {
        self.hide_clock(buf);
        self.renderer.draw_clock(buf, &face);
        self.clock = Some(ClockPreview { face, visible: true });
    }

    /// Undo the visible clock frame but keep the face for later ticks.
    fn hide_clock(&mut self, buf: &mut PixelBuffer) -> bool {
        match self.clock.as_mut() {
            Some(clock) if clock.visible => {
                self.renderer.undo_clock(buf, &clock.face);
                clock.visible = false;
                true
            }
            _ => false,
        }
    }

    /// Undo the visible clock frame and forget the face.
    fn drop_clock(&mut self, buf: &mut PixelBuffer) -> bool {
        let mutated = self.hide_clock(buf);
        self.clock = None;
        mutated
    }
}
