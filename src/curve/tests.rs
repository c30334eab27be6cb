// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)

use super::*;
use approx::assert_relative_eq;

fn p(x: Real, y: Real) -> Point {
    Point::new(x, y)
}

// x(t) = 4t(1 - t) + x0, y(t) = 2t: bulges right by 1 at y = 1.
fn bulge(x0: Real) -> Curve {
    let mut v = Vec::new();
    Curve::insert_quad(&mut v, p(x0, 0.0), p(x0 + 2.0, 1.0), p(x0, 2.0));
    assert_eq!(v.len(), 1);
    v[0]
}

fn vline(x: Real, y0: Real, y1: Real) -> Curve {
    let mut v = Vec::new();
    Curve::insert_line(&mut v, p(x, y0), p(x, y1));
    v[0]
}

#[test]
fn horizontal_lines_are_dropped() {
    let mut v = Vec::new();
    Curve::insert_line(&mut v, p(0.0, 1.0), p(5.0, 1.0));
    Curve::insert_quad(&mut v, p(0.0, 1.0), p(2.0, 1.0), p(5.0, 1.0));
    Curve::insert_cubic(&mut v, p(0.0, 1.0), p(1.0, 1.0), p(2.0, 1.0), p(5.0, 1.0));
    assert!(v.is_empty());
}

#[test]
fn upward_line_is_stored_top_down() {
    let mut v = Vec::new();
    Curve::insert_line(&mut v, p(3.0, 4.0), p(1.0, 2.0));
    let c = v[0];
    assert_eq!(c.order(), 1);
    assert_eq!(c.direction(), Direction::Decreasing);
    assert_eq!(c.top(), p(1.0, 2.0));
    assert_eq!(c.start(), p(3.0, 4.0));
    assert_eq!(c.end(), p(1.0, 2.0));
    assert_eq!(c.reversed().start(), p(1.0, 2.0));
}

#[test]
fn s_cubic_splits_into_connected_pieces() {
    let mut v = Vec::new();
    Curve::insert_cubic(&mut v, p(0.0, 0.0), p(1.0, 3.0), p(2.0, -2.0), p(3.0, 1.0));
    assert_eq!(v.len(), 3);
    for w in v.windows(2) {
        let (a, b) = (w[0].end(), w[1].start());
        assert_relative_eq!(a.x, b.x, epsilon = 1e-12);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-12);
    }
    assert_eq!(v[0].start(), p(0.0, 0.0));
    assert_eq!(v[2].end(), p(3.0, 1.0));
    for c in &v {
        assert!(c.y_top() < c.y_bot());
    }
}

#[test]
fn point_curve_behaves_as_marker() {
    let c = Curve::Point(p(1.0, 1.0));
    assert_eq!(c.order(), 0);
    assert_eq!(c.crossings_for(0.0, 1.0), 0);
    assert_eq!(c.segment(), PathEl::MoveTo(p(1.0, 1.0)));
    let mut inside = Crossings::even_odd(0.0, 0.0, 2.0, 2.0);
    assert!(c.accumulate_crossings(&mut inside));
    let mut edge = Crossings::even_odd(1.0, 0.0, 2.0, 2.0);
    assert!(!c.accumulate_crossings(&mut edge));
    assert!(edge.is_empty());
}

#[test]
fn crossings_for_is_half_open_in_y() {
    let l = vline(1.0, 0.0, 2.0);
    assert_eq!(l.crossings_for(0.0, 0.0), 1);
    assert_eq!(l.crossings_for(0.0, 1.0), 1);
    assert_eq!(l.crossings_for(0.0, 2.0), 0);
    assert_eq!(l.crossings_for(1.5, 1.0), 0);

    let q = bulge(0.0);
    assert_eq!(q.crossings_for(0.9, 1.0), 1);
    assert_eq!(q.crossings_for(0.1, 0.01), 0);
}

#[test]
fn curve_crossings_record_or_hit() {
    let q = bulge(0.0);
    let mut right = Crossings::even_odd(2.0, 0.5, 3.0, 1.5);
    assert!(!q.accumulate_crossings(&mut right));
    assert!(right.covers(0.5, 1.5));

    let mut overlapping = Crossings::even_odd(0.5, 0.5, 3.0, 1.5);
    assert!(q.accumulate_crossings(&mut overlapping));

    let mut left = Crossings::even_odd(-3.0, 0.5, -2.0, 1.5);
    assert!(!q.accumulate_crossings(&mut left));
    assert!(left.is_empty());
}

#[test]
fn compare_finds_quad_line_crossing() {
    let q = bulge(0.0);
    let l = vline(0.5, 0.0, 2.0);
    // Crossing at 4t(1 - t) = 0.5, y = 2t.
    let y_cross = 1.0 - 0.5 * 2.0_f64.sqrt();

    let mut yrange = [0.0, 2.0];
    assert_eq!(q.compare_to(&l, &mut yrange).unwrap(), -1);
    assert_relative_eq!(yrange[1], y_cross, epsilon = 1e-4);

    let mut yrange = [0.0, 2.0];
    assert_eq!(l.compare_to(&q, &mut yrange).unwrap(), 1);
    assert_relative_eq!(yrange[1], y_cross, epsilon = 1e-4);

    // Past the crossing the quad is to the right until its x-extremum.
    let mut yrange = [0.3, 2.0];
    assert_eq!(q.compare_to(&l, &mut yrange).unwrap(), 1);
    assert_eq!(yrange[1], 1.0);
}

#[test]
fn coincident_curves_compare_equal() {
    let a = bulge(1.0);
    let b = bulge(1.0);
    let mut yrange = [0.0, 2.0];
    assert_eq!(a.compare_to(&b, &mut yrange).unwrap(), 0);
    assert_eq!(yrange[1], 2.0);
}

#[test]
fn separated_curves_short_circuit() {
    let a = bulge(0.0);
    let b = bulge(5.0);
    let mut yrange = [0.0, 2.0];
    assert_eq!(a.compare_to(&b, &mut yrange).unwrap(), -1);
    assert_eq!(b.compare_to(&a, &mut yrange).unwrap(), 1);
}

#[test]
fn compare_rejects_backstepping() {
    let a = bulge(0.0);
    let b = vline(0.5, 0.0, 2.0);
    let mut yrange = [2.0, 3.0];
    assert!(matches!(a.compare_to(&b, &mut yrange), Err(Error::Invariant(_))));
}

#[test]
fn refine_lands_on_or_below_target() {
    let q = bulge(0.0);
    let t = q.refine_t_for_y(0.0, 0.75);
    assert!(q.y_for_t(t) >= 0.75);
    assert_relative_eq!(t, 0.375, epsilon = 1e-12);
}

#[test]
fn sub_curve_and_segment_follow_direction() {
    let mut v = Vec::new();
    Curve::insert_quad(&mut v, p(0.0, 2.0), p(2.0, 1.0), p(0.0, 0.0));
    let q = v[0];
    assert_eq!(q.direction(), Direction::Decreasing);
    match q.segment() {
        PathEl::QuadTo(c, e) => {
            assert_eq!(c, p(2.0, 1.0));
            assert_eq!(e, p(0.0, 0.0));
        }
        other => panic!("unexpected segment {other:?}"),
    }
    let s = q.sub_curve(0.5, 1.5, Direction::Increasing);
    assert_eq!(s.direction(), Direction::Increasing);
    assert_eq!(s.y_top(), 0.5);
    assert_eq!(s.y_bot(), 1.5);
    assert_relative_eq!(s.x_top(), 0.75, epsilon = 1e-12);

    let mut r = Rect::from_point(q.start());
    q.enlarge(&mut r);
    assert_relative_eq!(r.x1, 1.0, epsilon = 1e-12);
    assert_eq!((r.y0, r.y1), (0.0, 2.0));
}
