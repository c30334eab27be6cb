// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Segment streams.
//
// Every shape that can be turned into an area describes its outline as a
// sequence of move-to / line-to / quad-to / curve-to / close elements plus a
// winding rule. `Path` is the owned, buildable form of such a stream; the
// `Shape` trait is the protocol the area code consumes.

use crate::crossings::{self, RectCrossings};
use crate::error::Result;
use crate::geom::{Point, Real, Rect};
use crate::transform::Transform;

/// Rule deciding which regions of a possibly self-intersecting outline are
/// interior.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum WindingRule {
    EvenOdd,
    #[default]
    NonZero,
}

/// One element of a segment stream.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PathEl {
    MoveTo(Point),
    LineTo(Point),
    QuadTo(Point, Point),
    CurveTo(Point, Point, Point),
    Close,
}

impl PathEl {
    /// The point this element ends on, if it carries coordinates.
    pub fn end_point(&self) -> Option<Point> {
        match *self {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(p),
            PathEl::QuadTo(_, p) => Some(p),
            PathEl::CurveTo(_, _, p) => Some(p),
            PathEl::Close => None,
        }
    }

    pub fn transformed(&self, t: &Transform) -> PathEl {
        match *self {
            PathEl::MoveTo(p) => PathEl::MoveTo(t.apply(p)),
            PathEl::LineTo(p) => PathEl::LineTo(t.apply(p)),
            PathEl::QuadTo(c, p) => PathEl::QuadTo(t.apply(c), t.apply(p)),
            PathEl::CurveTo(c0, c1, p) => PathEl::CurveTo(t.apply(c0), t.apply(c1), t.apply(p)),
            PathEl::Close => PathEl::Close,
        }
    }

    pub(crate) fn points(&self) -> impl Iterator<Item = Point> {
        let (pts, n) = match *self {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => ([p, p, p], 1),
            PathEl::QuadTo(c, p) => ([c, p, p], 2),
            PathEl::CurveTo(c0, c1, p) => ([c0, c1, p], 3),
            PathEl::Close => ([Point::default(); 3], 0),
        };
        pts.into_iter().take(n)
    }
}

/// Anything that can stream its outline as path elements.
pub trait Shape {
    fn winding_rule(&self) -> WindingRule;

    fn path_elements(&self) -> impl Iterator<Item = PathEl> + '_;
}

// Control-point offset that makes a cubic approximate a quarter ellipse.
const CTRL_VAL: Real = 0.552_284_749_830_793_3;

/// An owned segment stream with its winding rule.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    elements: Vec<PathEl>,
    winding_rule: WindingRule,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_winding_rule(winding_rule: WindingRule) -> Self {
        Path { elements: Vec::new(), winding_rule }
    }

    pub fn from_elements(elements: Vec<PathEl>, winding_rule: WindingRule) -> Self {
        Path { elements, winding_rule }
    }

    pub fn set_winding_rule(&mut self, rule: WindingRule) {
        self.winding_rule = rule;
    }

    pub fn elements(&self) -> &[PathEl] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn push(&mut self, el: PathEl) {
        self.elements.push(el);
    }

    pub fn move_to(&mut self, x: Real, y: Real) -> &mut Self {
        self.elements.push(PathEl::MoveTo(Point::new(x, y)));
        self
    }

    pub fn line_to(&mut self, x: Real, y: Real) -> &mut Self {
        self.elements.push(PathEl::LineTo(Point::new(x, y)));
        self
    }

    pub fn quad_to(&mut self, cx: Real, cy: Real, x: Real, y: Real) -> &mut Self {
        self.elements.push(PathEl::QuadTo(Point::new(cx, cy), Point::new(x, y)));
        self
    }

    pub fn curve_to(
        &mut self,
        c0x: Real,
        c0y: Real,
        c1x: Real,
        c1y: Real,
        x: Real,
        y: Real,
    ) -> &mut Self {
        self.elements.push(PathEl::CurveTo(
            Point::new(c0x, c0y),
            Point::new(c1x, c1y),
            Point::new(x, y),
        ));
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.elements.push(PathEl::Close);
        self
    }

    pub fn transform(&mut self, t: &Transform) {
        for el in &mut self.elements {
            *el = el.transformed(t);
        }
    }

    /// Axis-aligned rectangle traced clockwise in y-down coordinates. A
    /// negative size yields an empty path.
    pub fn rect(x: Real, y: Real, w: Real, h: Real) -> Self {
        let mut p = Path::new();
        if w < 0.0 || h < 0.0 {
            return p;
        }
        p.move_to(x, y)
            .line_to(x + w, y)
            .line_to(x + w, y + h)
            .line_to(x, y + h)
            .line_to(x, y)
            .close();
        p
    }

    /// Closed polygon through `points`.
    pub fn polygon(points: &[(Real, Real)]) -> Self {
        let mut p = Path::new();
        let mut it = points.iter();
        if let Some(&(x, y)) = it.next() {
            p.move_to(x, y);
            for &(x, y) in it {
                p.line_to(x, y);
            }
            p.close();
        }
        p
    }

    /// Ellipse inscribed in the given frame, as four cubic quadrants.
    pub fn ellipse(x: Real, y: Real, w: Real, h: Real) -> Self {
        const PCV: Real = 0.5 + CTRL_VAL * 0.5;
        const NCV: Real = 0.5 - CTRL_VAL * 0.5;
        const QUADRANTS: [[Real; 6]; 4] = [
            [1.0, PCV, PCV, 1.0, 0.5, 1.0],
            [NCV, 1.0, 0.0, PCV, 0.0, 0.5],
            [0.0, NCV, NCV, 0.0, 0.5, 0.0],
            [PCV, 0.0, 1.0, NCV, 1.0, 0.5],
        ];
        let mut p = Path::new();
        if w < 0.0 || h < 0.0 {
            return p;
        }
        p.move_to(x + w, y + 0.5 * h);
        for c in QUADRANTS.iter() {
            p.curve_to(
                x + c[0] * w,
                y + c[1] * h,
                x + c[2] * w,
                y + c[3] * h,
                x + c[4] * w,
                y + c[5] * h,
            );
        }
        p.close();
        p
    }

    /// Rectangle with elliptical corners of the given total arc size.
    pub fn rounded_rect(x: Real, y: Real, w: Real, h: Real, arc_w: Real, arc_h: Real) -> Self {
        if w < 0.0 || h < 0.0 {
            return Path::new();
        }
        let rx = w.min(arc_w.abs()) * 0.5;
        let ry = h.min(arc_h.abs()) * 0.5;
        let (kx, ky) = (rx * CTRL_VAL, ry * CTRL_VAL);
        let (r, b) = (x + w, y + h);
        let mut p = Path::new();
        p.move_to(x, y + ry)
            .line_to(x, b - ry)
            .curve_to(x, b - ry + ky, x + rx - kx, b, x + rx, b)
            .line_to(r - rx, b)
            .curve_to(r - rx + kx, b, r, b - ry + ky, r, b - ry)
            .line_to(r, y + ry)
            .curve_to(r, y + ry - ky, r - rx + kx, y, r - rx, y)
            .line_to(x + rx, y)
            .curve_to(x + rx - kx, y, x, y + ry - ky, x, y + ry)
            .close();
        p
    }

    /// Loose bounds over every end and control point.
    pub fn control_bounds(&self) -> Option<Rect> {
        let mut pts = self.elements.iter().flat_map(|el| el.points());
        let first = pts.next()?;
        let mut r = Rect::from_point(first);
        for p in pts {
            r.add(p.x, p.y);
        }
        Some(r)
    }

    /// Point containment under the path's own winding rule.
    pub fn contains(&self, x: Real, y: Real) -> Result<bool> {
        let crossings = crossings::point_crossings_for_path(self.elements.iter().copied(), x, y)?;
        let mask = match self.winding_rule {
            WindingRule::NonZero => -1,
            WindingRule::EvenOdd => 1,
        };
        Ok(crossings & mask != 0)
    }

    /// True if the rectangle lies entirely inside the path.
    pub fn contains_rect(&self, r: &Rect) -> Result<bool> {
        if r.width().is_nan() || r.height().is_nan() || r.is_empty() {
            return Ok(false);
        }
        Ok(match crossings::rect_crossings_for_path(self.elements.iter().copied(), r)? {
            RectCrossings::Intersects => false,
            RectCrossings::Count(n) => n & self.rect_mask() != 0,
        })
    }

    /// True if the rectangle and the path interior share any area.
    pub fn intersects_rect(&self, r: &Rect) -> Result<bool> {
        if r.width().is_nan() || r.height().is_nan() || r.is_empty() {
            return Ok(false);
        }
        Ok(match crossings::rect_crossings_for_path(self.elements.iter().copied(), r)? {
            RectCrossings::Intersects => true,
            RectCrossings::Count(n) => n & self.rect_mask() != 0,
        })
    }

    // Rectangle crossings count both the top and bottom edge, so even-odd
    // looks at bit 1 instead of bit 0.
    fn rect_mask(&self) -> i32 {
        match self.winding_rule {
            WindingRule::NonZero => -1,
            WindingRule::EvenOdd => 2,
        }
    }
}

impl Shape for Path {
    fn winding_rule(&self) -> WindingRule {
        self.winding_rule
    }

    fn path_elements(&self) -> impl Iterator<Item = PathEl> + '_ {
        self.elements.iter().copied()
    }
}

impl Shape for Rect {
    fn winding_rule(&self) -> WindingRule {
        WindingRule::NonZero
    }

    fn path_elements(&self) -> impl Iterator<Item = PathEl> + '_ {
        Path::rect(self.x0, self.y0, self.width(), self.height())
            .elements
            .into_iter()
    }
}

impl Extend<PathEl> for Path {
    fn extend<T: IntoIterator<Item = PathEl>>(&mut self, iter: T) {
        self.elements.extend(iter);
    }
}
