use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::config::HourHandFormula;
use crate::shapes::ClockFace;
use crate::ticker::{ManualTime, TimeSource};

// =============================================================
// Helpers
// =============================================================

fn session() -> Session {
    Session::new(400, 300, SketchConfig::default(), 0)
}

fn set_points(s: &Session) -> Vec<Point> {
    let buf = s.buffer();
    let mut out = Vec::new();
    for y in 0..i32::try_from(buf.height()).expect("height") {
        for x in 0..i32::try_from(buf.width()).expect("width") {
            if buf.is_set(x, y) {
                out.push(Point::new(x, y));
            }
        }
    }
    out
}

// =============================================================
// End-to-end
// =============================================================

#[test]
fn horizontal_then_diagonal_preview() {
    let mut s = session();
    assert_eq!(s.on_tool_select("line", 0), Vec::new());
    s.on_pointer_down(10, 10);

    assert_eq!(s.on_pointer_move(20, 10, 0), vec![Action::RenderNeeded]);
    let row: Vec<_> = (10..20).map(|x| Point::new(x, 10)).collect();
    assert_eq!(set_points(&s), row);

    s.on_pointer_move(20, 20, 0);
    let diagonal: Vec<_> = (10..20).map(|i| Point::new(i, i)).collect();
    assert_eq!(set_points(&s), diagonal);
}

#[test]
fn release_commits_and_next_stroke_keeps_it() {
    let mut s = session();
    s.on_pointer_down(10, 10);
    s.on_pointer_move(20, 10, 0);
    assert_eq!(s.on_pointer_up(), vec![Action::Committed, Action::RenderNeeded]);

    s.on_pointer_down(15, 0);
    s.on_pointer_move(15, 30, 0);
    s.on_pointer_move(16, 30, 0);
    s.on_pointer_up();

    assert!((10..20).all(|x| s.buffer().is_set(x, 10)));
    assert!(s.buffer().is_committed(15, 10));
}

#[test]
fn move_before_pointer_down_renders_nothing() {
    let mut s = session();
    assert!(s.on_pointer_move(50, 50, 0).is_empty());
    assert_eq!(s.buffer().count_set(), 0);
}

#[test]
fn drag_off_canvas_does_not_abort() {
    let mut s = session();
    s.on_pointer_down(390, 290);
    s.on_pointer_move(900, 800, 0);
    s.on_pointer_move(-50, -50, 0);
    s.on_pointer_up();
    assert!(s.buffer().count_set() > 0);
}

// =============================================================
// Tools
// =============================================================

#[test]
fn unknown_tool_is_ignored() {
    let mut s = session();
    s.on_tool_select("rect", 0);
    assert!(s.on_tool_select("spray", 0).is_empty());
    assert_eq!(s.tool(), Tool::Rect);
}

#[test]
fn tool_change_reports_new_tool() {
    let mut s = session();
    assert_eq!(s.on_tool_select("circle", 0), vec![Action::ToolChanged(Tool::Circle), Action::RenderNeeded]);
    assert_eq!(s.tool_label(), "Current Shape: circle");
}

#[test]
fn erase_clears_everything_and_restores_tool() {
    let mut s = session();
    s.on_tool_select("rect", 0);
    s.on_pointer_down(5, 5);
    s.on_pointer_move(60, 60, 0);
    s.on_pointer_up();

    assert_eq!(s.on_tool_select("erase", 0), vec![Action::Committed, Action::RenderNeeded]);
    assert_eq!(s.buffer().count_set(), 0);
    assert_eq!(s.tool(), Tool::Rect);
    assert_eq!(s.tool_label(), "Current Shape: rect");
}

#[test]
fn erased_ink_is_no_longer_protected() {
    let mut s = session();
    s.on_pointer_down(0, 50);
    s.on_pointer_move(100, 50, 0);
    s.on_pointer_up();
    s.on_tool_select("erase", 0);

    s.on_pointer_down(0, 50);
    s.on_pointer_move(100, 50, 0);
    s.on_pointer_move(0, 51, 0);
    assert!(!s.buffer().is_set(50, 50));
}

#[test]
fn default_label_names_line() {
    assert_eq!(session().tool_label(), "Current Shape: line");
}

// =============================================================
// Clock ticker
// =============================================================

#[test]
fn ticker_only_runs_while_clock_selected() {
    let mut s = session();
    assert!(s.ticker().is_cancelled());
    s.on_tool_select("clock", 0);
    assert!(!s.ticker().is_cancelled());
    s.on_tool_select("line", 0);
    assert!(s.ticker().is_cancelled());
}

#[test]
fn clock_animates_once_per_second() {
    let time = ManualTime::new(1_000_000);
    let mut s = Session::new(400, 300, SketchConfig::default(), time.now_ms());
    s.on_tool_select("clock", time.now_ms());
    s.on_pointer_down(200, 150);
    s.on_pointer_move(280, 150, time.now_ms());
    s.on_pointer_up();
    assert_eq!(s.buffer().count_set(), 0);

    time.advance(500);
    assert!(s.poll(time.now_ms()).is_empty());

    time.advance(500);
    assert_eq!(s.poll(time.now_ms()), vec![Action::RenderNeeded]);
    let face = ClockFace::new(Point::new(200, 150), Point::new(280, 150), time.now_ms());
    let mut expected = PixelBuffer::new(400, 300);
    ShapeRenderer::default().draw_clock(&mut expected, &face);
    assert_eq!(s.buffer().snapshot(), expected.snapshot());

    time.advance(1_000);
    assert_eq!(s.poll(time.now_ms()), vec![Action::RenderNeeded]);
    let mut next = PixelBuffer::new(400, 300);
    ShapeRenderer::default().draw_clock(&mut next, &face.at(time.now_ms()));
    assert_eq!(s.buffer().snapshot(), next.snapshot());
}

#[test]
fn clock_tick_during_drag_redraws_in_place() {
    let mut s = session();
    s.on_tool_select("clock", 0);
    s.on_pointer_down(200, 150);
    s.on_pointer_move(250, 150, 0);
    assert_eq!(s.poll(1_000), vec![Action::RenderNeeded]);
    s.on_pointer_move(260, 150, 1_200);

    let mut expected = PixelBuffer::new(400, 300);
    ShapeRenderer::default().draw_clock(&mut expected, &ClockFace::new(Point::new(200, 150), Point::new(260, 150), 1_200));
    assert_eq!(s.buffer().snapshot(), expected.snapshot());
}

#[test]
fn standard_hour_hand_is_configurable() {
    let config = SketchConfig { hour_hand: HourHandFormula::Standard, ..SketchConfig::default() };
    let s = Session::new(10, 10, config, 0);
    assert_eq!(s.config().hour_hand, HourHandFormula::Standard);
}

// =============================================================
// Observers
// =============================================================

#[test]
fn subscribers_observe_session_events() {
    let mut s = session();
    let shapes = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&shapes);
    let id = s.subscribe(move |prev, next| {
        if prev.shape != next.shape {
            log.borrow_mut().push(next.shape);
        }
    });

    s.on_tool_select("rect", 0);
    s.on_tool_select("bogus", 0);
    s.on_tool_select("clock", 0);
    assert!(s.unsubscribe(id));
    s.on_tool_select("line", 0);

    assert_eq!(*shapes.borrow(), vec![Shape::Rect, Shape::Clock]);
}
