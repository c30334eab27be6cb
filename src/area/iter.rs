// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Iterating an area's boundary as path elements, and flattening any
// element stream into straight lines.

use crate::curve::Curve;
use crate::error::{Error, Result};
use crate::geom::{pt_seg_dist_sq, Point, Real};
use crate::path::{PathEl, WindingRule};
use crate::transform::Transform;

/// Boundary of an [`Area`](crate::Area) as a segment stream.
///
/// Consecutive pieces that do not meet (the sweep drops horizontal runs)
/// are joined by a line-to, and each loop ends with a close.
#[derive(Clone, Debug)]
pub struct AreaPathIter<'a> {
    curves: &'a [Curve],
    index: usize,
    prev: Option<&'a Curve>,
    this: Option<&'a Curve>,
    transform: Option<Transform>,
}

impl<'a> AreaPathIter<'a> {
    pub(crate) fn new(curves: &'a [Curve], transform: Option<&Transform>) -> Self {
        AreaPathIter {
            curves,
            index: 0,
            prev: None,
            this: curves.first(),
            transform: transform.copied(),
        }
    }

    pub fn winding_rule(&self) -> WindingRule {
        WindingRule::NonZero
    }

    fn advance(&mut self) {
        if self.prev.is_some() {
            self.prev = None;
            return;
        }
        self.prev = self.this;
        self.index += 1;
        self.this = self.curves.get(self.index);
        if let (Some(prev), Some(this)) = (self.prev, self.this) {
            if this.order() != 0 && prev.end() == this.start() {
                self.prev = None;
            }
        }
    }
}

impl Iterator for AreaPathIter<'_> {
    type Item = PathEl;

    fn next(&mut self) -> Option<PathEl> {
        let el = if self.prev.is_some() {
            match self.this {
                Some(c) if c.order() != 0 => PathEl::LineTo(c.start()),
                _ => PathEl::Close,
            }
        } else {
            self.this?.segment()
        };
        self.advance();
        Some(match &self.transform {
            Some(t) => el.transformed(t),
            None => el,
        })
    }
}

/// Default recursion limit for [`FlatteningIter`].
pub const DEFAULT_FLATTEN_LIMIT: usize = 10;

/// Replaces every quadratic and cubic in a segment stream with line-tos.
///
/// Curves are subdivided at t = 1/2 until their control points lie within
/// `flatness` of the chord, or `limit` levels deep.
#[derive(Clone, Debug)]
pub struct FlatteningIter<I> {
    src: I,
    squareflat: Real,
    limit: usize,
    // Pending pieces of the current curve with their depth; the top of
    // the stack is emitted first.
    stack: Vec<(Piece, usize)>,
    start: Point,
    cur: Point,
}

#[derive(Copy, Clone, Debug)]
enum Piece {
    Quad([Real; 6]),
    Cubic([Real; 8]),
}

impl Piece {
    fn flatness_sq(&self) -> Real {
        match *self {
            Piece::Quad([x0, y0, cx, cy, x1, y1]) => pt_seg_dist_sq(x0, y0, x1, y1, cx, cy),
            Piece::Cubic([x0, y0, c0x, c0y, c1x, c1y, x1, y1]) => {
                pt_seg_dist_sq(x0, y0, x1, y1, c0x, c0y).max(pt_seg_dist_sq(x0, y0, x1, y1, c1x, c1y))
            }
        }
    }

    fn split(&self) -> (Piece, Piece) {
        match *self {
            Piece::Quad(c) => {
                let (a, b) = crate::curve::split_quad(c, 0.5);
                (Piece::Quad(a), Piece::Quad(b))
            }
            Piece::Cubic(c) => {
                let (a, b) = crate::curve::split_cubic(c, 0.5);
                (Piece::Cubic(a), Piece::Cubic(b))
            }
        }
    }

    fn end(&self) -> Point {
        match *self {
            Piece::Quad(c) => Point::new(c[4], c[5]),
            Piece::Cubic(c) => Point::new(c[6], c[7]),
        }
    }
}

impl<I: Iterator<Item = PathEl>> FlatteningIter<I> {
    pub fn new(src: I, flatness: Real) -> Result<Self> {
        Self::with_limit(src, flatness, DEFAULT_FLATTEN_LIMIT)
    }

    pub fn with_limit(src: I, flatness: Real, limit: usize) -> Result<Self> {
        if flatness.is_nan() || flatness < 0.0 {
            return Err(Error::InvalidFlatness(flatness));
        }
        Ok(FlatteningIter {
            src,
            squareflat: flatness * flatness,
            limit,
            stack: Vec::new(),
            start: Point::default(),
            cur: Point::default(),
        })
    }

    pub fn flatness(&self) -> Real {
        self.squareflat.sqrt()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    fn next_piece(&mut self) -> Option<PathEl> {
        while let Some((piece, level)) = self.stack.pop() {
            if level < self.limit && piece.flatness_sq() >= self.squareflat {
                let (a, b) = piece.split();
                self.stack.push((b, level + 1));
                self.stack.push((a, level + 1));
                continue;
            }
            let p = piece.end();
            self.cur = p;
            return Some(PathEl::LineTo(p));
        }
        None
    }
}

impl<I: Iterator<Item = PathEl>> Iterator for FlatteningIter<I> {
    type Item = PathEl;

    fn next(&mut self) -> Option<PathEl> {
        if let Some(el) = self.next_piece() {
            return Some(el);
        }
        let el = self.src.next()?;
        let c = self.cur;
        match el {
            PathEl::MoveTo(p) => {
                self.start = p;
                self.cur = p;
                Some(el)
            }
            PathEl::LineTo(p) => {
                self.cur = p;
                Some(el)
            }
            PathEl::Close => {
                self.cur = self.start;
                Some(el)
            }
            PathEl::QuadTo(cp, p) => {
                self.stack.push((Piece::Quad([c.x, c.y, cp.x, cp.y, p.x, p.y]), 0));
                self.next_piece()
            }
            PathEl::CurveTo(c0, c1, p) => {
                self.stack.push((
                    Piece::Cubic([c.x, c.y, c0.x, c0.y, c1.x, c1.y, p.x, p.y]),
                    0,
                ));
                self.next_piece()
            }
        }
    }
}
