// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// A planar region closed under union, intersection, difference and
// symmetric difference.
//
// The region is stored as its boundary: closed loops of y-monotonic pieces,
// each loop introduced by a move-to point. The boundary is always in
// normal form (non-self-intersecting, non-zero winding), so every boolean
// operation is a single sweep over the two operands' pieces.

mod iter;

#[cfg(test)]
mod tests;

pub use iter::{AreaPathIter, FlatteningIter, DEFAULT_FLATTEN_LIMIT};

use std::cell::OnceCell;

use tracing::debug;

use crate::area_op::AreaOp;
use crate::config::{AreaConfig, InvalidCoordPolicy};
use crate::crossings::find_crossings;
use crate::curve::Curve;
use crate::error::{Error, Result};
use crate::geom::{Point, Real, Rect};
use crate::path::{PathEl, Shape, WindingRule};
use crate::sweep;
use crate::transform::Transform;

#[derive(Clone, Debug, Default)]
pub struct Area {
    curves: Vec<Curve>,
    bounds: OnceCell<Rect>,
}

impl Area {
    /// The empty area.
    pub fn new() -> Self {
        Self::default()
    }

    /// The region enclosed by `shape` under its winding rule.
    pub fn from_shape<S: Shape + ?Sized>(shape: &S) -> Result<Self> {
        Self::from_shape_with(shape, &AreaConfig::default())
    }

    pub fn from_shape_with<S: Shape + ?Sized>(shape: &S, cfg: &AreaConfig) -> Result<Self> {
        let curves = path_to_curves(shape.path_elements(), shape.winding_rule(), cfg)?;
        Ok(Area {
            curves,
            bounds: OnceCell::new(),
        })
    }

    /// The boundary pieces, loop by loop.
    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    fn set_curves(&mut self, curves: Vec<Curve>) {
        self.curves = curves;
        self.bounds = OnceCell::new();
    }

    fn combine(&mut self, op: AreaOp, rhs: &Area) -> Result<()> {
        let out = sweep::calculate(op, &self.curves, &rhs.curves)?;
        debug!(?op, before = self.curves.len(), after = out.len(), "combined areas");
        self.set_curves(out);
        Ok(())
    }

    /// Union with `rhs`.
    pub fn add(&mut self, rhs: &Area) -> Result<()> {
        self.combine(AreaOp::Add, rhs)
    }

    /// Remove `rhs` from this area.
    pub fn subtract(&mut self, rhs: &Area) -> Result<()> {
        self.combine(AreaOp::Subtract, rhs)
    }

    pub fn intersect(&mut self, rhs: &Area) -> Result<()> {
        self.combine(AreaOp::Intersect, rhs)
    }

    /// Keep the parts covered by exactly one of the two areas.
    pub fn exclusive_or(&mut self, rhs: &Area) -> Result<()> {
        self.combine(AreaOp::Xor, rhs)
    }

    pub fn reset(&mut self) {
        self.set_curves(Vec::new());
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// True if every boundary piece is straight.
    pub fn is_polygonal(&self) -> bool {
        self.curves.iter().all(|c| c.order() <= 1)
    }

    /// True if the area is an axis-aligned rectangle (or empty).
    pub fn is_rectangular(&self) -> bool {
        match self.curves.as_slice() {
            [] => true,
            [_, Curve::Line(a), Curve::Line(b)] => {
                a.x0 == a.x1 && b.x0 == b.x1 && a.y0 == b.y0 && a.y1 == b.y1
            }
            _ => false,
        }
    }

    /// True if the boundary is a single closed loop (or empty).
    pub fn is_singular(&self) -> bool {
        if self.curves.len() < 3 {
            return true;
        }
        self.curves[1..].iter().all(|c| c.order() != 0)
    }

    /// Tight bounding box of the boundary, including curve extrema.
    pub fn bounds(&self) -> Rect {
        *self.bounds.get_or_init(|| {
            let Some(first) = self.curves.first() else {
                return Rect::ZERO;
            };
            let mut r = Rect::from_point(first.start());
            for c in &self.curves[1..] {
                c.enlarge(&mut r);
            }
            r
        })
    }

    /// Point containment. The boundary's left and top edges are inside,
    /// its right and bottom edges outside.
    pub fn contains(&self, x: Real, y: Real) -> bool {
        if !self.bounds().contains(x, y) {
            return false;
        }
        let crossings: i32 = self.curves.iter().map(|c| c.crossings_for(x, y)).sum();
        crossings & 1 == 1
    }

    pub fn contains_point(&self, p: Point) -> bool {
        self.contains(p.x, p.y)
    }

    /// True if `r` lies entirely inside the area. Rectangles with negative
    /// size are never contained.
    pub fn contains_rect(&self, r: &Rect) -> bool {
        if r.width() < 0.0 || r.height() < 0.0 {
            return false;
        }
        if !self.bounds().contains_rect(r) {
            return false;
        }
        find_crossings(&self.curves, r).is_some_and(|c| c.covers(r.y0, r.y1))
    }

    /// True if `r` and the area's interior overlap.
    pub fn intersects_rect(&self, r: &Rect) -> bool {
        if r.width() < 0.0 || r.height() < 0.0 {
            return false;
        }
        if !self.bounds().intersects(r) {
            return false;
        }
        match find_crossings(&self.curves, r) {
            None => true,
            Some(c) => !c.is_empty(),
        }
    }

    /// True if both areas cover exactly the same region.
    pub fn geometry_eq(&self, other: &Area) -> Result<bool> {
        if std::ptr::eq(self, other) {
            return Ok(true);
        }
        Ok(sweep::calculate(AreaOp::Xor, &self.curves, &other.curves)?.is_empty())
    }

    /// Map the area through `t`. The boundary is rebuilt because a general
    /// affine map does not keep pieces monotonic in y.
    pub fn transform(&mut self, t: &Transform) -> Result<()> {
        let curves = path_to_curves(
            self.path_iter(Some(t)),
            WindingRule::NonZero,
            &AreaConfig::default(),
        )?;
        self.set_curves(curves);
        Ok(())
    }

    pub fn create_transformed_area(&self, t: &Transform) -> Result<Area> {
        let mut a = self.clone();
        a.transform(t)?;
        Ok(a)
    }

    /// The boundary as path elements, optionally mapped through `t`.
    pub fn path_iter(&self, t: Option<&Transform>) -> AreaPathIter<'_> {
        AreaPathIter::new(&self.curves, t)
    }

    /// The boundary with every curve replaced by line segments no further
    /// than `flatness` from it.
    pub fn flattened_path_iter(
        &self,
        t: Option<&Transform>,
        flatness: Real,
    ) -> Result<FlatteningIter<AreaPathIter<'_>>> {
        FlatteningIter::new(self.path_iter(t), flatness)
    }

    /// Flattening with the subdivision depth taken from `cfg`.
    pub fn flattened_path_iter_with(
        &self,
        t: Option<&Transform>,
        flatness: Real,
        cfg: &AreaConfig,
    ) -> Result<FlatteningIter<AreaPathIter<'_>>> {
        self.flattened_path_iter_with_limit(t, flatness, cfg.flatten_limit)
    }

    pub fn flattened_path_iter_with_limit(
        &self,
        t: Option<&Transform>,
        flatness: Real,
        limit: usize,
    ) -> Result<FlatteningIter<AreaPathIter<'_>>> {
        FlatteningIter::with_limit(self.path_iter(t), flatness, limit)
    }
}

impl PartialEq for Area {
    fn eq(&self, other: &Self) -> bool {
        self.geometry_eq(other).unwrap_or(false)
    }
}

impl Shape for Area {
    fn winding_rule(&self) -> WindingRule {
        WindingRule::NonZero
    }

    fn path_elements(&self) -> impl Iterator<Item = PathEl> + '_ {
        self.path_iter(None)
    }
}

fn check_point(p: Point, cfg: &AreaConfig) -> Result<bool> {
    if p.is_finite() {
        return Ok(true);
    }
    match cfg.invalid_coords {
        InvalidCoordPolicy::Drop => Ok(false),
        InvalidCoordPolicy::Reject => Err(Error::InvalidCoordinate { x: p.x, y: p.y }),
    }
}

/// Decompose a segment stream into monotonic pieces and normalise it under
/// `rule`. Open subpaths are closed with a straight line.
pub(crate) fn path_to_curves(
    elements: impl Iterator<Item = PathEl>,
    rule: WindingRule,
    cfg: &AreaConfig,
) -> Result<Vec<Curve>> {
    let mut curves = Vec::new();
    let mut elements = elements.peekable();
    if let Some(first) = elements.peek() {
        if !matches!(first, PathEl::MoveTo(_)) {
            return Err(Error::MissingMoveTo);
        }
    }
    let mut mov = Point::default();
    let mut cur = Point::default();
    let mut dropped = 0usize;
    for el in elements {
        let mut valid = true;
        for p in el.points() {
            valid &= check_point(p, cfg)?;
        }
        if !valid {
            dropped += 1;
            continue;
        }
        match el {
            PathEl::MoveTo(p) => {
                Curve::insert_line(&mut curves, cur, mov);
                mov = p;
                cur = p;
                Curve::insert_move(&mut curves, p);
            }
            PathEl::LineTo(p) => {
                Curve::insert_line(&mut curves, cur, p);
                cur = p;
            }
            PathEl::QuadTo(c, p) => {
                Curve::insert_quad(&mut curves, cur, c, p);
                cur = p;
            }
            PathEl::CurveTo(c0, c1, p) => {
                Curve::insert_cubic(&mut curves, cur, c0, c1, p);
                cur = p;
            }
            PathEl::Close => {
                Curve::insert_line(&mut curves, cur, mov);
                cur = mov;
            }
        }
    }
    Curve::insert_line(&mut curves, cur, mov);
    if dropped > 0 {
        debug!(dropped, "skipped segments with non-finite coordinates");
    }
    let op = match rule {
        WindingRule::EvenOdd => AreaOp::EvenOdd,
        WindingRule::NonZero => AreaOp::NonZero,
    };
    sweep::calculate(op, &curves, &[])
}
