// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Pure geometric helpers: points, axis-aligned rectangles and the small
// numeric routines shared by the curve, crossing and sweep code.

pub type Real = f64;

/// A point in the plane.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: Real,
    pub y: Real,
}

impl Point {
    #[inline]
    pub const fn new(x: Real, y: Real) -> Self {
        Point { x, y }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(Real, Real)> for Point {
    fn from((x, y): (Real, Real)) -> Self {
        Point::new(x, y)
    }
}

/// An axis-aligned rectangle stored by its corners, `x0 <= x1`, `y0 <= y1`.
///
/// A rectangle with zero width or height is "empty" for the purpose of
/// rectangle queries but still a valid bounding box (a single point, say).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub x0: Real,
    pub y0: Real,
    pub x1: Real,
    pub y1: Real,
}

impl Rect {
    pub const ZERO: Rect = Rect { x0: 0.0, y0: 0.0, x1: 0.0, y1: 0.0 };

    /// Rectangle from two corners in any order.
    pub fn new(x0: Real, y0: Real, x1: Real, y1: Real) -> Self {
        Rect {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// Rectangle from origin and size. Negative sizes are kept as-is so
    /// that queries can reject them.
    pub fn from_xywh(x: Real, y: Real, w: Real, h: Real) -> Self {
        Rect { x0: x, y0: y, x1: x + w, y1: y + h }
    }

    pub fn from_point(p: Point) -> Self {
        Rect { x0: p.x, y0: p.y, x1: p.x, y1: p.y }
    }

    #[inline]
    pub fn width(&self) -> Real {
        self.x1 - self.x0
    }

    #[inline]
    pub fn height(&self) -> Real {
        self.y1 - self.y0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }

    /// Grow to include `(x, y)`.
    pub fn add(&mut self, x: Real, y: Real) {
        self.x0 = self.x0.min(x);
        self.y0 = self.y0.min(y);
        self.x1 = self.x1.max(x);
        self.y1 = self.y1.max(y);
    }

    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Half-open containment: the right and bottom edges are outside.
    #[inline]
    pub fn contains(&self, x: Real, y: Real) -> bool {
        x >= self.x0 && y >= self.y0 && x < self.x1 && y < self.y1
    }

    pub fn contains_rect(&self, r: &Rect) -> bool {
        if self.is_empty() || r.is_empty() {
            return false;
        }
        r.x0 >= self.x0 && r.y0 >= self.y0 && r.x1 <= self.x1 && r.y1 <= self.y1
    }

    pub fn intersects(&self, r: &Rect) -> bool {
        if self.is_empty() || r.is_empty() {
            return false;
        }
        r.x1 > self.x0 && r.y1 > self.y0 && r.x0 < self.x1 && r.y0 < self.y1
    }
}

/// Sign of `x1 - x2` as -1, 0 or 1.
#[inline]
pub fn orderof(x1: Real, x2: Real) -> i32 {
    if x1 < x2 {
        -1
    } else if x1 > x2 {
        1
    } else {
        0
    }
}

/// Relative closeness test used to treat curve positions as coincident.
#[inline]
pub fn fairly_close(v1: Real, v2: Real) -> bool {
    (v1 - v2).abs() < v1.abs().max(v2.abs()) * 1e-10
}

/// Up to two real roots of a quadratic.
#[derive(Copy, Clone, Debug, Default)]
pub struct Roots {
    vals: [Real; 2],
    len: usize,
}

impl Roots {
    pub(crate) fn push(&mut self, v: Real) {
        self.vals[self.len] = v;
        self.len += 1;
    }

    pub(crate) fn sort(&mut self) {
        if self.len == 2 && self.vals[0] > self.vals[1] {
            self.vals.swap(0, 1);
        }
    }

    pub fn as_slice(&self) -> &[Real] {
        &self.vals[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Roots of `c2*t^2 + c1*t + c0 = 0`.
///
/// One root is computed as `q / c2` and the other as `c0 / q`, choosing the
/// sign of the discriminant so that `c1 + d` grows in magnitude. A constant
/// equation has no roots.
pub fn solve_quadratic(c0: Real, c1: Real, c2: Real) -> Roots {
    let mut roots = Roots::default();
    if c2 == 0.0 {
        if c1 != 0.0 {
            roots.push(-c0 / c1);
        }
        return roots;
    }
    let mut d = c1 * c1 - 4.0 * c2 * c0;
    if d < 0.0 {
        return roots;
    }
    d = d.sqrt();
    if c1 < 0.0 {
        d = -d;
    }
    let q = (c1 + d) / -2.0;
    roots.push(q / c2);
    if q != 0.0 {
        roots.push(c0 / q);
    }
    roots
}

/// Squared distance from `(px, py)` to the segment `(x1, y1)-(x2, y2)`.
pub fn pt_seg_dist_sq(x1: Real, y1: Real, x2: Real, y2: Real, px: Real, py: Real) -> Real {
    let (x2, y2) = (x2 - x1, y2 - y1);
    let (mut px, mut py) = (px - x1, py - y1);
    let mut dot = px * x2 + py * y2;
    let proj_len_sq = if dot <= 0.0 {
        0.0
    } else {
        px = x2 - px;
        py = y2 - py;
        dot = px * x2 + py * y2;
        if dot <= 0.0 {
            0.0
        } else {
            dot * dot / (x2 * x2 + y2 * y2)
        }
    };
    (px * px + py * py - proj_len_sq).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn orderof_basic() {
        assert_eq!(orderof(0.0, 1.0), -1);
        assert_eq!(orderof(1.0, 0.0), 1);
        assert_eq!(orderof(2.0, 2.0), 0);
    }

    #[test]
    fn fairly_close_is_relative() {
        assert!(fairly_close(1.0, 1.0 + 1e-12));
        assert!(!fairly_close(1.0, 1.0 + 1e-8));
        assert!(fairly_close(1e6, 1e6 + 1e-6));
        // Zero is only close to itself... and not even that, strictly.
        assert!(!fairly_close(0.0, 1e-300));
    }

    #[test]
    fn solve_quadratic_two_roots() {
        // (t - 1)(t - 3) = t^2 - 4t + 3
        let r = solve_quadratic(3.0, -4.0, 1.0);
        let mut v = r.as_slice().to_vec();
        v.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(v.len(), 2);
        assert_relative_eq!(v[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(v[1], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn solve_quadratic_degenerate() {
        let r = solve_quadratic(2.0, -4.0, 0.0);
        assert_eq!(r.as_slice(), &[0.5]);
        assert!(solve_quadratic(1.0, 0.0, 0.0).is_empty());
        assert!(solve_quadratic(1.0, 0.0, 1.0).is_empty());
    }

    #[test]
    fn pt_seg_dist_sq_cases() {
        // Perpendicular foot inside the segment.
        assert_relative_eq!(pt_seg_dist_sq(0.0, 0.0, 2.0, 0.0, 1.0, 1.0), 1.0);
        // Beyond the far end.
        assert_relative_eq!(pt_seg_dist_sq(0.0, 0.0, 2.0, 0.0, 3.0, 0.0), 1.0);
        // Behind the start.
        assert_relative_eq!(pt_seg_dist_sq(0.0, 0.0, 2.0, 0.0, -2.0, 0.0), 4.0);
    }

    #[test]
    fn rect_queries() {
        let r = Rect::from_xywh(0.0, 0.0, 2.0, 2.0);
        assert!(r.contains(0.0, 0.0));
        assert!(!r.contains(2.0, 1.0));
        assert!(r.contains_rect(&Rect::from_xywh(0.5, 0.5, 1.0, 1.0)));
        assert!(!r.contains_rect(&Rect::from_xywh(1.5, 0.5, 1.0, 1.0)));
        assert!(r.intersects(&Rect::from_xywh(1.5, 0.5, 1.0, 1.0)));
        assert!(!r.intersects(&Rect::from_xywh(2.0, 0.0, 1.0, 1.0)));
        assert!(Rect::from_xywh(0.0, 0.0, 0.0, 1.0).is_empty());
    }

    #[test]
    fn rect_add_grows() {
        let mut r = Rect::from_point(Point::new(1.0, 1.0));
        r.add(-1.0, 3.0);
        assert_eq!(r, Rect::new(-1.0, 1.0, 1.0, 3.0));
    }
}
