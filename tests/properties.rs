// Copyright 2025 Lars Brubaker
// Randomised algebraic properties of the boolean operations.

mod helpers;

use area_geom::Area;
use proptest::prelude::*;

/// Axis-aligned rectangles with integer corners, so every vertex and
/// crossing the sweep produces is exactly representable.
fn int_rect() -> impl Strategy<Value = (f64, f64, f64, f64)> {
    (0i32..10, 0i32..10, 1i32..6, 1i32..6)
        .prop_map(|(x, y, w, h)| (x as f64, y as f64, w as f64, h as f64))
}

fn area_of((x, y, w, h): (f64, f64, f64, f64)) -> Area {
    helpers::rect(x, y, w, h)
}

fn combine(a: &Area, b: &Area, f: fn(&mut Area, &Area) -> area_geom::Result<()>) -> Area {
    let mut out = a.clone();
    f(&mut out, b).unwrap();
    out
}

fn measure(a: &Area) -> f64 {
    helpers::enclosed_area(a, 0.01)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn union_commutes(ra in int_rect(), rb in int_rect()) {
        let (a, b) = (area_of(ra), area_of(rb));
        let ab = combine(&a, &b, Area::add);
        let ba = combine(&b, &a, Area::add);
        prop_assert!(ab.geometry_eq(&ba).unwrap());
    }

    #[test]
    fn union_and_intersection_are_idempotent(ra in int_rect()) {
        let a = area_of(ra);
        prop_assert!(combine(&a, &a, Area::add).geometry_eq(&a).unwrap());
        prop_assert!(combine(&a, &a, Area::intersect).geometry_eq(&a).unwrap());
        prop_assert!(combine(&a, &a, Area::subtract).is_empty());
    }

    #[test]
    fn inclusion_exclusion(ra in int_rect(), rb in int_rect()) {
        let (a, b) = (area_of(ra), area_of(rb));
        let union = measure(&combine(&a, &b, Area::add));
        let inter = measure(&combine(&a, &b, Area::intersect));
        prop_assert!((union + inter - measure(&a) - measure(&b)).abs() < 1e-9);
    }

    #[test]
    fn xor_is_union_minus_intersection(ra in int_rect(), rb in int_rect()) {
        let (a, b) = (area_of(ra), area_of(rb));
        let xor = measure(&combine(&a, &b, Area::exclusive_or));
        let union = measure(&combine(&a, &b, Area::add));
        let inter = measure(&combine(&a, &b, Area::intersect));
        prop_assert!((xor - (union - inter)).abs() < 1e-9);
    }

    #[test]
    fn containment_follows_truth_tables(
        ra in int_rect(),
        rb in int_rect(),
        px in 0i32..16,
        py in 0i32..16,
    ) {
        let (a, b) = (area_of(ra), area_of(rb));
        // Half-integer probes never land on a boundary.
        let (x, y) = (px as f64 + 0.5, py as f64 + 0.5);
        let (in_a, in_b) = (a.contains(x, y), b.contains(x, y));
        prop_assert_eq!(combine(&a, &b, Area::add).contains(x, y), in_a || in_b);
        prop_assert_eq!(combine(&a, &b, Area::intersect).contains(x, y), in_a && in_b);
        prop_assert_eq!(combine(&a, &b, Area::subtract).contains(x, y), in_a && !in_b);
        prop_assert_eq!(combine(&a, &b, Area::exclusive_or).contains(x, y), in_a != in_b);
    }

    #[test]
    fn difference_is_disjoint_from_subtrahend(ra in int_rect(), rb in int_rect()) {
        let (a, b) = (area_of(ra), area_of(rb));
        let diff = combine(&a, &b, Area::subtract);
        prop_assert!(combine(&diff, &b, Area::intersect).is_empty());
    }

    #[test]
    fn results_stay_within_operand_bounds(ra in int_rect(), rb in int_rect()) {
        let (a, b) = (area_of(ra), area_of(rb));
        let union = combine(&a, &b, Area::add);
        let hull = a.bounds().union(&b.bounds());
        let r = union.bounds();
        prop_assert!(r.x0 >= hull.x0 && r.y0 >= hull.y0);
        prop_assert!(r.x1 <= hull.x1 && r.y1 <= hull.y1);
        helpers::assert_loops_close(&union);
    }
}
