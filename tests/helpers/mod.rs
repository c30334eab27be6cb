// Copyright 2025 Lars Brubaker
// Shared test utilities for area-geom tests.

#![allow(dead_code)]

use area_geom::{Area, Path, PathEl, Point, Real, Rect};

/// Route the library's tracing output to the test harness. Safe to call
/// from every test; only the first call installs the subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn rect(x: Real, y: Real, w: Real, h: Real) -> Area {
    Area::from_shape(&Rect::from_xywh(x, y, w, h)).expect("rectangle area")
}

pub fn polygon(points: &[(Real, Real)]) -> Area {
    Area::from_shape(&Path::polygon(points)).expect("polygon area")
}

pub fn circle(cx: Real, cy: Real, r: Real) -> Area {
    Area::from_shape(&Path::ellipse(cx - r, cy - r, 2.0 * r, 2.0 * r)).expect("circle area")
}

/// Enclosed area, measured with the shoelace formula over the flattened
/// boundary. Holes are traced opposite to outer loops, so the signed sum
/// is the net area.
pub fn enclosed_area(a: &Area, flatness: Real) -> Real {
    let mut total = 0.0;
    let mut start = Point::default();
    let mut cur = Point::default();
    for el in a.flattened_path_iter(None, flatness).expect("flatten") {
        match el {
            PathEl::MoveTo(p) => {
                start = p;
                cur = p;
            }
            PathEl::LineTo(p) => {
                total += cur.x * p.y - p.x * cur.y;
                cur = p;
            }
            PathEl::Close => {
                total += cur.x * start.y - start.x * cur.y;
                cur = start;
            }
            other => panic!("flattened stream contained {other:?}"),
        }
    }
    (total * 0.5).abs()
}

/// Sorted, de-duplicated segment end points of the boundary.
pub fn vertex_set(a: &Area) -> Vec<(Real, Real)> {
    let mut v: Vec<(Real, Real)> = a
        .path_iter(None)
        .filter_map(|el| el.end_point())
        .map(|p| (p.x, p.y))
        .collect();
    sort_points(&mut v);
    v.dedup();
    v
}

pub fn sort_points(v: &mut [(Real, Real)]) {
    v.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
}

/// Every loop in the boundary returns to its move-to.
pub fn assert_loops_close(a: &Area) {
    let mut start: Option<Point> = None;
    let mut cur: Option<Point> = None;
    for el in a.path_iter(None) {
        match el {
            PathEl::MoveTo(p) => {
                assert!(start.is_none(), "move-to inside an open loop");
                start = Some(p);
                cur = Some(p);
            }
            PathEl::Close => {
                assert!(start.is_some(), "close without move-to");
                start = None;
                cur = None;
            }
            el => {
                assert!(cur.is_some(), "segment outside a loop");
                cur = el.end_point();
            }
        }
    }
    assert!(start.is_none(), "boundary ended inside an open loop");
}
