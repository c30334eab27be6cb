// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)

use super::*;
use crate::path::Path;
use approx::assert_relative_eq;

fn rect(x: Real, y: Real, w: Real, h: Real) -> Area {
    Area::from_shape(&Rect::from_xywh(x, y, w, h)).unwrap()
}

fn vertices(a: &Area) -> Vec<(Real, Real)> {
    let mut v: Vec<(Real, Real)> = a
        .path_iter(None)
        .filter_map(|el| el.end_point())
        .map(|p| (p.x, p.y))
        .collect();
    v.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
    v.dedup();
    v
}

#[test]
fn empty_area_queries() {
    let a = Area::new();
    assert!(a.is_empty());
    assert!(a.is_polygonal());
    assert!(a.is_rectangular());
    assert!(a.is_singular());
    assert_eq!(a.bounds(), Rect::ZERO);
    assert!(!a.contains(0.0, 0.0));
    assert_eq!(a.path_iter(None).count(), 0);
}

#[test]
fn unit_square_iterates_as_closed_loop() {
    let a = rect(0.0, 0.0, 1.0, 1.0);
    let els: Vec<PathEl> = a.path_iter(None).collect();
    assert_eq!(
        els,
        vec![
            PathEl::MoveTo(Point::new(0.0, 0.0)),
            PathEl::LineTo(Point::new(0.0, 1.0)),
            PathEl::LineTo(Point::new(1.0, 1.0)),
            PathEl::LineTo(Point::new(1.0, 0.0)),
            PathEl::Close,
        ]
    );
    assert!(a.is_rectangular());
    assert!(a.is_singular());
    assert_eq!(a.bounds(), Rect::new(0.0, 0.0, 1.0, 1.0));
}

#[test]
fn containment_is_half_open() {
    let a = rect(0.0, 0.0, 1.0, 1.0);
    assert!(a.contains(0.0, 0.0));
    assert!(a.contains(0.5, 0.5));
    assert!(!a.contains(1.0, 0.5));
    assert!(!a.contains(0.5, 1.0));
    assert!(a.contains_point(Point::new(0.99, 0.99)));
}

#[test]
fn union_of_offset_squares() {
    let mut a = rect(0.0, 0.0, 1.0, 1.0);
    a.add(&rect(0.5, 0.5, 1.0, 1.0)).unwrap();
    let mut want: Vec<(Real, Real)> = vec![
        (0.0, 0.0),
        (1.0, 0.0),
        (1.0, 0.5),
        (1.5, 0.5),
        (1.5, 1.5),
        (0.5, 1.5),
        (0.5, 1.0),
        (0.0, 1.0),
    ];
    want.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
    assert_eq!(vertices(&a), want);
    assert!(a.is_polygonal());
    assert!(a.is_singular());
    assert!(!a.is_rectangular());
    assert!(a.contains(1.2, 1.2));
    assert!(!a.contains(1.2, 0.2));
}

#[test]
fn intersection_of_overlapping_squares() {
    let mut a = rect(0.0, 0.0, 2.0, 2.0);
    a.intersect(&rect(1.0, 1.0, 2.0, 2.0)).unwrap();
    assert!(a.is_rectangular());
    assert_eq!(a.bounds(), Rect::new(1.0, 1.0, 2.0, 2.0));
    assert_eq!(a, rect(1.0, 1.0, 1.0, 1.0));
}

#[test]
fn difference_leaves_an_l_shape() {
    let mut a = rect(0.0, 0.0, 2.0, 2.0);
    a.subtract(&rect(1.0, 1.0, 2.0, 2.0)).unwrap();
    assert!(a.contains(0.5, 0.5));
    assert!(a.contains(1.5, 0.5));
    assert!(a.contains(0.5, 1.5));
    assert!(!a.contains(1.5, 1.5));
    assert!(!a.is_rectangular());
    assert_eq!(a.bounds(), Rect::new(0.0, 0.0, 2.0, 2.0));
}

#[test]
fn xor_with_self_is_empty() {
    let mut a = Area::from_shape(&Path::ellipse(0.0, 0.0, 2.0, 2.0)).unwrap();
    let b = a.clone();
    a.exclusive_or(&b).unwrap();
    assert!(a.is_empty());
}

#[test]
fn circle_union_with_itself_is_unchanged() {
    let circle = Area::from_shape(&Path::ellipse(0.0, 0.0, 2.0, 2.0)).unwrap();
    let mut a = circle.clone();
    a.add(&circle).unwrap();
    assert!(a.geometry_eq(&circle).unwrap());
    assert!(!a.is_polygonal());
    assert!(a.contains(1.0, 1.0));
    let b = a.bounds();
    assert_relative_eq!(b.x0, 0.0, epsilon = 1e-9);
    assert_relative_eq!(b.x1, 2.0, epsilon = 1e-9);
    assert_relative_eq!(b.y0, 0.0, epsilon = 1e-9);
    assert_relative_eq!(b.y1, 2.0, epsilon = 1e-9);
}

#[test]
fn rect_queries() {
    let a = rect(0.0, 0.0, 2.0, 2.0);
    assert!(a.contains_rect(&Rect::from_xywh(0.5, 0.5, 1.0, 1.0)));
    assert!(!a.contains_rect(&Rect::from_xywh(1.5, 1.5, 1.0, 1.0)));
    assert!(!a.contains_rect(&Rect::from_xywh(0.5, 0.5, -1.0, 1.0)));
    assert!(a.intersects_rect(&Rect::from_xywh(1.5, 1.5, 1.0, 1.0)));
    assert!(!a.intersects_rect(&Rect::from_xywh(3.0, 3.0, 1.0, 1.0)));
    assert!(!a.intersects_rect(&Rect::from_xywh(0.5, 0.5, 1.0, -1.0)));

    let mut donut = rect(0.0, 0.0, 4.0, 4.0);
    donut.subtract(&rect(1.0, 1.0, 2.0, 2.0)).unwrap();
    assert!(!donut.intersects_rect(&Rect::from_xywh(1.5, 1.5, 1.0, 1.0)));
    assert!(!donut.contains_rect(&Rect::from_xywh(0.5, 0.5, 3.0, 3.0)));
    assert!(donut.contains_rect(&Rect::from_xywh(0.25, 0.25, 0.5, 3.5)));
}

#[test]
fn disjoint_union_is_not_singular() {
    let mut a = rect(0.0, 0.0, 1.0, 1.0);
    a.add(&rect(2.0, 0.0, 1.0, 1.0)).unwrap();
    assert!(!a.is_singular());
    assert!(!a.is_rectangular());
    assert_eq!(a.bounds(), Rect::new(0.0, 0.0, 3.0, 1.0));
}

#[test]
fn transform_rebuilds_and_invalidates_bounds() {
    let mut a = rect(0.0, 0.0, 1.0, 1.0);
    assert_eq!(a.bounds(), Rect::new(0.0, 0.0, 1.0, 1.0));
    a.transform(&Transform::translate(2.0, 3.0)).unwrap();
    assert_eq!(a.bounds(), Rect::new(2.0, 3.0, 3.0, 4.0));

    let scaled = a.create_transformed_area(&Transform::scale(2.0, 0.5)).unwrap();
    assert!(scaled.is_rectangular());
    assert_eq!(scaled.bounds(), Rect::new(4.0, 1.5, 6.0, 2.0));
    assert_eq!(a.bounds(), Rect::new(2.0, 3.0, 3.0, 4.0));
}

#[test]
fn reset_clears() {
    let mut a = rect(0.0, 0.0, 1.0, 1.0);
    assert!(!a.is_empty());
    a.reset();
    assert!(a.is_empty());
    assert_eq!(a.bounds(), Rect::ZERO);
}

#[test]
fn path_must_start_with_move_to() {
    let p = Path::from_elements(vec![PathEl::LineTo(Point::new(1.0, 1.0))], WindingRule::NonZero);
    assert_eq!(Area::from_shape(&p).err(), Some(Error::MissingMoveTo));
}

#[test]
fn non_finite_coordinates_follow_policy() {
    let mut p = Path::new();
    p.move_to(0.0, 0.0)
        .line_to(1.0, 0.0)
        .line_to(Real::NAN, 0.5)
        .line_to(1.0, 1.0)
        .line_to(0.0, 1.0)
        .close();
    let dropped = Area::from_shape(&p).unwrap();
    assert_eq!(dropped, rect(0.0, 0.0, 1.0, 1.0));

    let err = Area::from_shape_with(&p, &AreaConfig::strict()).unwrap_err();
    assert!(matches!(err, Error::InvalidCoordinate { .. }));
}

#[test]
fn even_odd_input_drops_overlap() {
    let mut p = Path::with_winding_rule(WindingRule::EvenOdd);
    p.move_to(0.0, 0.0).line_to(2.0, 0.0).line_to(2.0, 2.0).line_to(0.0, 2.0).close();
    p.move_to(1.0, 1.0).line_to(3.0, 1.0).line_to(3.0, 3.0).line_to(1.0, 3.0).close();
    let a = Area::from_shape(&p).unwrap();
    assert!(a.contains(0.5, 0.5));
    assert!(!a.contains(1.5, 1.5));
    assert!(a.contains(2.5, 2.5));

    p.set_winding_rule(WindingRule::NonZero);
    let b = Area::from_shape(&p).unwrap();
    assert!(b.contains(1.5, 1.5));
}

#[test]
fn area_is_a_shape() {
    let mut a = rect(0.0, 0.0, 1.0, 1.0);
    a.add(&rect(0.5, 0.5, 1.0, 1.0)).unwrap();
    let again = Area::from_shape(&a).unwrap();
    assert_eq!(again, a);
    assert_eq!(a.winding_rule(), WindingRule::NonZero);
}

#[test]
fn flattened_iteration_has_only_lines() {
    let a = Area::from_shape(&Path::ellipse(0.0, 0.0, 2.0, 2.0)).unwrap();
    assert!(a.flattened_path_iter(None, -0.5).is_err());
    let flat: Vec<PathEl> = a.flattened_path_iter(None, 0.01).unwrap().collect();
    assert!(flat
        .iter()
        .all(|el| matches!(el, PathEl::MoveTo(_) | PathEl::LineTo(_) | PathEl::Close)));
    let coarse = a.flattened_path_iter_with_limit(None, 0.01, 1).unwrap().count();
    assert!(coarse < flat.len());
    let cfg = AreaConfig {
        flatten_limit: 1,
        ..AreaConfig::default()
    };
    assert_eq!(a.flattened_path_iter_with(None, 0.01, &cfg).unwrap().count(), coarse);
    for el in &flat {
        if let Some(p) = el.end_point() {
            let r = ((p.x - 1.0).powi(2) + (p.y - 1.0).powi(2)).sqrt();
            assert_relative_eq!(r, 1.0, epsilon = 1e-3);
        }
    }
}
