use std::collections::HashSet;
use std::f64::consts::{FRAC_PI_2, PI};

use super::*;

fn pt(x: i32, y: i32) -> Point {
    Point::new(x, y)
}

// =============================================================
// Bresenham line
// =============================================================

#[test]
fn line_shallow_slope_steps_minor_axis() {
    let points: Vec<_> = rasterize_line(pt(0, 0), pt(5, 2)).collect();
    assert_eq!(points, vec![pt(0, 0), pt(1, 0), pt(2, 1), pt(3, 1), pt(4, 2)]);
}

#[test]
fn line_excludes_far_endpoint() {
    let points: Vec<_> = rasterize_line(pt(10, 10), pt(20, 10)).collect();
    assert_eq!(points.len(), 10);
    assert_eq!(points.first(), Some(&pt(10, 10)));
    assert_eq!(points.last(), Some(&pt(19, 10)));
    assert!(!points.contains(&pt(20, 10)));
}

#[test]
fn line_vertical_upwards() {
    let points: Vec<_> = rasterize_line(pt(3, 3), pt(3, 0)).collect();
    assert_eq!(points, vec![pt(3, 3), pt(3, 2), pt(3, 1)]);
}

#[test]
fn line_diagonal_tie_is_y_driven() {
    let points: Vec<_> = rasterize_line(pt(10, 10), pt(20, 20)).collect();
    let expected: Vec<_> = (10..20).map(|i| pt(i, i)).collect();
    assert_eq!(points, expected);
}

#[test]
fn line_zero_length_is_empty() {
    assert_eq!(rasterize_line(pt(7, 7), pt(7, 7)).count(), 0);
}

#[test]
fn line_point_count_is_major_delta_for_all_octants() {
    let origin = pt(50, 50);
    for (dx, dy) in [(9, 4), (4, 9), (-9, 4), (-4, 9), (9, -4), (4, -9), (-9, -4), (-4, -9), (0, 6), (-6, 0)] {
        let to = pt(origin.x + dx, origin.y + dy);
        let count = rasterize_line(origin, to).count();
        let expected = usize::try_from(dx.abs().max(dy.abs())).expect("non-negative");
        assert_eq!(count, expected, "delta ({dx}, {dy})");
    }
}

#[test]
fn line_has_no_gaps() {
    let points: Vec<_> = rasterize_line(pt(0, 0), pt(-13, 37)).collect();
    for pair in points.windows(2) {
        assert!((pair[1].x - pair[0].x).abs() <= 1);
        assert!((pair[1].y - pair[0].y).abs() <= 1);
    }
}

#[test]
fn line_size_hint_is_exact() {
    let it = rasterize_line(pt(0, 0), pt(8, 3));
    assert_eq!(it.size_hint(), (8, Some(8)));
}

// =============================================================
// Polynomial line
// =============================================================

#[test]
fn poly_line_includes_both_endpoints() {
    let points: Vec<_> = rasterize_poly_line(pt(0, 0), pt(4, 2)).collect();
    assert_eq!(points, vec![pt(0, 0), pt(1, 0), pt(2, 1), pt(3, 1), pt(4, 2)]);
}

#[test]
fn poly_line_runs_right_to_left() {
    let points: Vec<_> = rasterize_poly_line(pt(4, 2), pt(0, 0)).collect();
    assert_eq!(points, vec![pt(4, 2), pt(3, 1), pt(2, 1), pt(1, 0), pt(0, 0)]);
}

#[test]
fn poly_line_vertical_is_empty() {
    assert_eq!(rasterize_poly_line(pt(5, 0), pt(5, 9)).count(), 0);
}

#[test]
fn segment_dispatches_on_algorithm() {
    let bresenham = Segment::new(LineAlgorithm::Bresenham, pt(0, 0), pt(4, 0)).count();
    let poly = Segment::new(LineAlgorithm::Polynomial, pt(0, 0), pt(4, 0)).count();
    assert_eq!(bresenham, 4);
    assert_eq!(poly, 5);
}

// =============================================================
// Circle
// =============================================================

#[test]
fn circle_hits_the_four_axis_extremes() {
    let points: HashSet<_> = rasterize_circle(pt(50, 50), 10).collect();
    for p in [pt(60, 50), pt(50, 60), pt(40, 50), pt(50, 40)] {
        assert!(points.contains(&p), "missing {p:?}");
    }
}

#[test]
fn circle_emits_eight_points_per_step() {
    let count = rasterize_circle(pt(50, 50), 10).count();
    assert_eq!(count % 8, 0);
    assert_eq!(count, 56);
}

#[test]
fn circle_is_symmetric_across_all_octants() {
    let c = pt(50, 50);
    let points: HashSet<_> = rasterize_circle(c, 23).collect();
    for p in &points {
        let (dx, dy) = (p.x - c.x, p.y - c.y);
        for (mx, my) in [(dx, dy), (-dx, dy), (dx, -dy), (-dx, -dy), (dy, dx), (-dy, dx), (dy, -dx), (-dy, -dx)] {
            assert!(points.contains(&pt(c.x + mx, c.y + my)), "mirror of {p:?} missing");
        }
    }
}

#[test]
fn circle_points_lie_near_radius() {
    let c = pt(0, 0);
    for p in rasterize_circle(c, 40) {
        let d = distance(c, p);
        assert!((d - 40.0).abs() < 1.5, "{p:?} at distance {d}");
    }
}

#[test]
fn circle_zero_radius_is_empty() {
    assert_eq!(rasterize_circle(pt(5, 5), 0).count(), 0);
}

#[test]
fn radius_is_floored_distance() {
    assert_eq!(radius_between(pt(0, 0), pt(3, 4)), 5);
    assert_eq!(radius_between(pt(0, 0), pt(7, 7)), 9);
}

// =============================================================
// Rotation
// =============================================================

#[test]
fn rotate_quarter_turn_floors_each_axis() {
    // x lands exactly on 10; y is -10 * cos(π/2) ≈ -6e-16, which floors to -1.
    assert_eq!(rotate_point(pt(0, 0), pt(0, -10), FRAC_PI_2), pt(10, -1));
}

#[test]
fn rotate_by_zero_is_identity() {
    assert_eq!(rotate_point(pt(100, 100), pt(100, 5), 0.0), pt(100, 5));
}

#[test]
fn rotate_half_turn_about_offset_pivot() {
    assert_eq!(rotate_point(pt(0, 0), pt(0, -10), PI), pt(0, 10));
    assert_eq!(rotate_point(pt(20, 20), pt(20, 10), PI), pt(20, 30));
}
