// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Order-2 pieces: y-monotonic quadratic Béziers.
//
// The power-basis coefficients are cached so that evaluation is two
// multiply-adds per axis:
//
//     x(t) = xc[0] + xc[1] t + xc[2] t^2

use super::{Curve, Direction};
use crate::geom::{Point, Real, Rect};
use crate::path::PathEl;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Quad {
    pub(crate) x0: Real,
    pub(crate) y0: Real,
    pub(crate) cx0: Real,
    pub(crate) cy0: Real,
    pub(crate) x1: Real,
    pub(crate) y1: Real,
    pub(crate) xmin: Real,
    pub(crate) xmax: Real,
    xc: [Real; 3],
    yc: [Real; 3],
    pub(crate) direction: Direction,
}

/// Split a quadratic `[x0, y0, cx, cy, x1, y1]` at `t`.
pub(crate) fn split(c: [Real; 6], t: Real) -> ([Real; 6], [Real; 6]) {
    let [x0, y0, cx, cy, x1, y1] = c;
    let (lx, ly) = (x0 + (cx - x0) * t, y0 + (cy - y0) * t);
    let (rx, ry) = (cx + (x1 - cx) * t, cy + (y1 - cy) * t);
    let (mx, my) = (lx + (rx - lx) * t, ly + (ry - ly) * t);
    ([x0, y0, lx, ly, mx, my], [mx, my, rx, ry, x1, y1])
}

impl Quad {
    /// Build a piece from top-down coordinates. The control y is clamped
    /// into `[y0, y1]`; root finding can leave it a rounding step outside.
    pub fn new(
        x0: Real,
        y0: Real,
        cx0: Real,
        cy0: Real,
        x1: Real,
        y1: Real,
        direction: Direction,
    ) -> Self {
        let cy0 = if cy0 < y0 {
            y0
        } else if cy0 > y1 {
            y1
        } else {
            cy0
        };
        Quad {
            x0,
            y0,
            cx0,
            cy0,
            x1,
            y1,
            xmin: x0.min(x1).min(cx0),
            xmax: x0.max(x1).max(cx0),
            xc: [x0, cx0 + cx0 - x0 - x0, x0 - cx0 - cx0 + x1],
            yc: [y0, cy0 + cy0 - y0 - y0, y0 - cy0 - cy0 + y1],
            direction,
        }
    }

    /// Append the monotonic pieces of an arbitrary quadratic, in traversal
    /// order. `c` is already oriented so that its first y is not below its
    /// last; `direction` says whether that matches the input path's traversal.
    pub(crate) fn insert(curves: &mut Vec<Curve>, c: [Real; 6], direction: Direction) {
        let Some(t) = horizontal_param(c[1], c[3], c[5]) else {
            Self::add_instance(curves, c, direction);
            return;
        };
        let (a, b) = split(c, t);
        let (first, second) = match direction {
            Direction::Increasing => (a, b),
            Direction::Decreasing => (b, a),
        };
        Self::add_instance(curves, first, direction);
        Self::add_instance(curves, second, direction);
    }

    fn add_instance(curves: &mut Vec<Curve>, c: [Real; 6], direction: Direction) {
        let [x0, y0, cx, cy, x1, y1] = c;
        if y0 > y1 {
            curves.push(Curve::Quad(Quad::new(x1, y1, cx, cy, x0, y0, direction.reversed())));
        } else if y1 > y0 {
            curves.push(Curve::Quad(Quad::new(x0, y0, cx, cy, x1, y1, direction)));
        }
    }

    pub fn x_for_y(&self, y: Real) -> Real {
        if y <= self.y0 {
            return self.x0;
        }
        if y >= self.y1 {
            return self.x1;
        }
        self.x_for_t(self.t_for_y(y))
    }

    pub fn t_for_y(&self, y: Real) -> Real {
        if y <= self.y0 {
            return 0.0;
        }
        if y >= self.y1 {
            return 1.0;
        }
        t_for_y(y, self.yc[0], self.yc[1], self.yc[2])
    }

    #[inline]
    pub fn x_for_t(&self, t: Real) -> Real {
        (self.xc[2] * t + self.xc[1]) * t + self.xc[0]
    }

    #[inline]
    pub fn y_for_t(&self, t: Real) -> Real {
        (self.yc[2] * t + self.yc[1]) * t + self.yc[0]
    }

    pub fn dx_for_t(&self, t: Real, deriv: u32) -> Real {
        derivative(&self.xc, t, deriv)
    }

    pub fn dy_for_t(&self, t: Real, deriv: u32) -> Real {
        derivative(&self.yc, t, deriv)
    }

    /// Parameter of the vertical tangent if it lies strictly inside
    /// `(t0, t1)`, else `t1`.
    pub fn next_vertical(&self, t0: Real, t1: Real) -> Real {
        let t = -self.xc[1] / (2.0 * self.xc[2]);
        if t > t0 && t < t1 {
            t
        } else {
            t1
        }
    }

    pub fn enlarge(&self, r: &mut Rect) {
        r.add(self.x0, self.y0);
        let t = -self.xc[1] / (2.0 * self.xc[2]);
        if t > 0.0 && t < 1.0 {
            r.add(self.x_for_t(t), self.y_for_t(t));
        }
        r.add(self.x1, self.y1);
    }

    pub fn sub_curve(&self, ystart: Real, yend: Real, dir: Direction) -> Quad {
        let t0 = if ystart <= self.y0 {
            if yend >= self.y1 {
                return self.with_direction(dir);
            }
            0.0
        } else {
            t_for_y(ystart, self.yc[0], self.yc[1], self.yc[2])
        };
        let t1 = if yend >= self.y1 {
            1.0
        } else {
            t_for_y(yend, self.yc[0], self.yc[1], self.yc[2])
        };
        let mut c = [self.x0, self.y0, self.cx0, self.cy0, self.x1, self.y1];
        if t1 < 1.0 {
            c = split(c, t1).0;
        }
        if t0 > 0.0 {
            c = split(c, t0 / t1).1;
        }
        Quad::new(c[0], ystart, c[2], c[3], c[4], yend, dir)
    }

    pub fn with_direction(&self, dir: Direction) -> Quad {
        Quad { direction: dir, ..*self }
    }

    pub fn segment(&self) -> PathEl {
        let c = Point::new(self.cx0, self.cy0);
        match self.direction {
            Direction::Increasing => PathEl::QuadTo(c, Point::new(self.x1, self.y1)),
            Direction::Decreasing => PathEl::QuadTo(c, Point::new(self.x0, self.y0)),
        }
    }
}

/// Parameter of the y-extremum of `c0, cp, c1` if it lies strictly inside
/// `(0, 1)`.
pub(crate) fn horizontal_param(c0: Real, cp: Real, c1: Real) -> Option<Real> {
    if c0 <= cp && cp <= c1 {
        return None;
    }
    let (c0, c1) = (c0 - cp, c1 - cp);
    let denom = c0 + c1;
    if denom == 0.0 {
        return None;
    }
    let t = c0 / denom;
    if t <= 0.0 || t >= 1.0 {
        return None;
    }
    Some(t)
}

/// Parameter in `[0, 1]` at which `c0 + c1 t + c2 t^2 == y`.
///
/// Uses the cancellation-free form of the quadratic formula. If rounding
/// pushes both roots out of range the nearer end of the interval is
/// returned instead.
pub(crate) fn t_for_y(y: Real, c0: Real, c1: Real, c2: Real) -> Real {
    let c0 = c0 - y;
    if c2 == 0.0 {
        let root = -c0 / c1;
        if (0.0..=1.0).contains(&root) {
            return root;
        }
    } else {
        let mut d = c1 * c1 - 4.0 * c2 * c0;
        if d >= 0.0 {
            d = d.sqrt();
            if c1 < 0.0 {
                d = -d;
            }
            let q = (c1 + d) / -2.0;
            let root = q / c2;
            if (0.0..=1.0).contains(&root) {
                return root;
            }
            if q != 0.0 {
                let root = c0 / q;
                if (0.0..=1.0).contains(&root) {
                    return root;
                }
            }
        }
    }
    let ystart = c0;
    let yend = c0 + c1 + c2;
    if 0.0 < (ystart + yend) / 2.0 {
        0.0
    } else {
        1.0
    }
}

fn derivative(c: &[Real; 3], t: Real, deriv: u32) -> Real {
    match deriv {
        0 => (c[2] * t + c[1]) * t + c[0],
        1 => 2.0 * c[2] * t + c[1],
        2 => 2.0 * c[2],
        _ => 0.0,
    }
}
