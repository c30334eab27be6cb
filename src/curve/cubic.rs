// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Order-3 pieces: y-monotonic cubic Béziers.
//
// Inverting y(t) is the expensive query here. The real root is found in
// closed form (trigonometric form for three real roots, Cardano otherwise),
// polished by bracketed Newton iteration, and bisection takes over whenever
// the closed form lands outside the curve.

use super::{quad, Curve, Direction};
use crate::geom::{solve_quadratic, Point, Real, Rect, Roots};
use crate::path::PathEl;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cubic {
    pub(crate) x0: Real,
    pub(crate) y0: Real,
    pub(crate) cx0: Real,
    pub(crate) cy0: Real,
    pub(crate) cx1: Real,
    pub(crate) cy1: Real,
    pub(crate) x1: Real,
    pub(crate) y1: Real,
    pub(crate) xmin: Real,
    pub(crate) xmax: Real,
    xc: [Real; 4],
    yc: [Real; 4],
    pub(crate) direction: Direction,
}

/// Split a cubic `[x0, y0, cx0, cy0, cx1, cy1, x1, y1]` at `t`.
pub(crate) fn split(c: [Real; 8], t: Real) -> ([Real; 8], [Real; 8]) {
    let [x0, y0, cx0, cy0, cx1, cy1, x1, y1] = c;
    let (ax, ay) = (x0 + (cx0 - x0) * t, y0 + (cy0 - y0) * t);
    let (bx, by) = (cx0 + (cx1 - cx0) * t, cy0 + (cy1 - cy0) * t);
    let (cx, cy) = (cx1 + (x1 - cx1) * t, cy1 + (y1 - cy1) * t);
    let (abx, aby) = (ax + (bx - ax) * t, ay + (by - ay) * t);
    let (bcx, bcy) = (bx + (cx - bx) * t, by + (cy - by) * t);
    let (mx, my) = (abx + (bcx - abx) * t, aby + (bcy - aby) * t);
    (
        [x0, y0, ax, ay, abx, aby, mx, my],
        [mx, my, bcx, bcy, cx, cy, x1, y1],
    )
}

fn coefficients(p0: Real, c0: Real, c1: Real, p1: Real) -> [Real; 4] {
    [
        p0,
        (c0 - p0) * 3.0,
        (c1 - c0 - c0 + p0) * 3.0,
        p1 - (c1 - c0) * 3.0 - p0,
    ]
}

impl Cubic {
    /// Build a piece from top-down coordinates. Control y values are
    /// clamped against the ends they neighbour.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        x0: Real,
        y0: Real,
        cx0: Real,
        cy0: Real,
        cx1: Real,
        cy1: Real,
        x1: Real,
        y1: Real,
        direction: Direction,
    ) -> Self {
        let cy0 = cy0.max(y0);
        let cy1 = cy1.min(y1);
        Cubic {
            x0,
            y0,
            cx0,
            cy0,
            cx1,
            cy1,
            x1,
            y1,
            xmin: x0.min(x1).min(cx0.min(cx1)),
            xmax: x0.max(x1).max(cx0.max(cx1)),
            xc: coefficients(x0, cx0, cx1, x1),
            yc: coefficients(y0, cy0, cy1, y1),
            direction,
        }
    }

    fn from_array(c: [Real; 8], direction: Direction) -> Self {
        Cubic::new(c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7], direction)
    }

    /// Append the monotonic pieces of an arbitrary cubic in traversal
    /// order; see [`Quad::insert`](super::Quad) for the orientation contract.
    pub(crate) fn insert(curves: &mut Vec<Curve>, c: [Real; 8], direction: Direction) {
        let params = horizontal_params(c[1], c[3], c[5], c[7]);
        let mut pieces: Vec<[Real; 8]> = Vec::with_capacity(3);
        match *params.as_slice() {
            [] => pieces.push(c),
            [t] => {
                let (a, b) = split(c, t);
                pieces.extend([a, b]);
            }
            [t0, t1, ..] => {
                let (a, rest) = split(c, t0);
                let (b, d) = split(rest, (t1 - t0) / (1.0 - t0));
                pieces.extend([a, b, d]);
            }
        }
        if direction == Direction::Decreasing {
            pieces.reverse();
        }
        for p in pieces {
            Self::add_instance(curves, p, direction);
        }
    }

    fn add_instance(curves: &mut Vec<Curve>, c: [Real; 8], direction: Direction) {
        let [x0, y0, cx0, cy0, cx1, cy1, x1, y1] = c;
        if y0 > y1 {
            curves.push(Curve::Cubic(Cubic::new(
                x1,
                y1,
                cx1,
                cy1,
                cx0,
                cy0,
                x0,
                y0,
                direction.reversed(),
            )));
        } else if y1 > y0 {
            curves.push(Curve::Cubic(Cubic::from_array(c, direction)));
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
        let [c0, c1, c2, c3] = self.yc;
        if c3 == 0.0 {
            return quad::t_for_y(y, c0, c1, c2);
        }

        // Normalised to t^3 + a t^2 + b t + c = 0.
        let a = c2 / c3;
        let b = c1 / c3;
        let c = (c0 - y) / c3;
        let q = (a * a - 3.0 * b) / 9.0;
        let r = (2.0 * a * a * a - 9.0 * a * b + 27.0 * c) / 54.0;
        let r2 = r * r;
        let q3 = q * q * q;
        let a_3 = a / 3.0;
        let mut t = if r2 < q3 {
            let theta = (r / q3.sqrt()).acos();
            let m = -2.0 * q.sqrt();
            let two_pi = std::f64::consts::PI * 2.0;
            [theta, theta + two_pi, theta - two_pi]
                .into_iter()
                .map(|th| self.refine(y, m * (th / 3.0).cos() - a_3))
                .find(|&t| t >= 0.0)
                .unwrap_or(-1.0)
        } else {
            let s = (r2 - q3).sqrt();
            let mut big_a = (r.abs() + s).cbrt();
            if r >= 0.0 {
                big_a = -big_a;
            }
            let big_b = if big_a == 0.0 { 0.0 } else { q / big_a };
            self.refine(y, (big_a + big_b) - a_3)
        };
        if t < 0.0 {
            t = self.bisect_t_for_y(y);
        }
        t
    }

    // Newton iteration toward y(t) == target, bracketed by the interval in
    // which the root is known to lie. Returns a negative value for seeds
    // that are too far off the curve to trust.
    fn refine(&self, target: Real, mut t: Real) -> Real {
        if !(-0.1..=1.1).contains(&t) {
            return -1.0;
        }
        let mut y = self.y_for_t(t);
        let (mut t0, mut t1) = if y < target { (t, 1.0) } else { (0.0, t) };
        let mut use_slope = true;
        while y != target {
            if use_slope {
                let slope = self.dy_for_t(t, 1);
                if slope == 0.0 {
                    use_slope = false;
                    continue;
                }
                let t2 = t + (target - y) / slope;
                if t2 == t || t2 <= t0 || t2 >= t1 {
                    use_slope = false;
                    continue;
                }
                t = t2;
            } else {
                let t2 = (t0 + t1) / 2.0;
                if t2 == t0 || t2 == t1 {
                    break;
                }
                t = t2;
            }
            y = self.y_for_t(t);
            if y < target {
                t0 = t;
            } else if y > target {
                t1 = t;
            } else {
                break;
            }
        }
        if t > 1.0 {
            -1.0
        } else {
            t
        }
    }

    fn bisect_t_for_y(&self, y: Real) -> Real {
        let (mut t0, mut t1) = (0.0, 1.0);
        loop {
            let t = (t0 + t1) / 2.0;
            if t == t0 || t == t1 {
                return t;
            }
            let yt = self.y_for_t(t);
            if yt < y {
                t0 = t;
            } else if yt > y {
                t1 = t;
            } else {
                return t;
            }
        }
    }

    #[inline]
    pub fn x_for_t(&self, t: Real) -> Real {
        eval(&self.xc, t)
    }

    #[inline]
    pub fn y_for_t(&self, t: Real) -> Real {
        eval(&self.yc, t)
    }

    pub fn dx_for_t(&self, t: Real, deriv: u32) -> Real {
        derivative(&self.xc, t, deriv)
    }

    pub fn dy_for_t(&self, t: Real, deriv: u32) -> Real {
        derivative(&self.yc, t, deriv)
    }

    pub fn next_vertical(&self, t0: Real, mut t1: Real) -> Real {
        let roots = solve_quadratic(self.xc[1], 2.0 * self.xc[2], 3.0 * self.xc[3]);
        for &t in roots.as_slice() {
            if t > t0 && t < t1 {
                t1 = t;
            }
        }
        t1
    }

    pub fn enlarge(&self, r: &mut Rect) {
        r.add(self.x0, self.y0);
        let roots = solve_quadratic(self.xc[1], 2.0 * self.xc[2], 3.0 * self.xc[3]);
        for &t in roots.as_slice() {
            if t > 0.0 && t < 1.0 {
                r.add(self.x_for_t(t), self.y_for_t(t));
            }
        }
        r.add(self.x1, self.y1);
    }

    pub fn sub_curve(&self, ystart: Real, yend: Real, dir: Direction) -> Cubic {
        if ystart <= self.y0 && yend >= self.y1 {
            return self.with_direction(dir);
        }
        let mut t0 = self.t_for_y(ystart);
        let mut t1 = self.t_for_y(yend);
        // A very short range can invert under rounding; keep the sliver
        // rather than leave a gap in the chain.
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        let mut c = [
            self.x0, self.y0, self.cx0, self.cy0, self.cx1, self.cy1, self.x1, self.y1,
        ];
        if t1 < 1.0 {
            c = split(c, t1).0;
        }
        if t0 > 0.0 {
            c = split(c, t0 / t1).1;
        }
        Cubic::new(c[0], ystart, c[2], c[3], c[4], c[5], c[6], yend, dir)
    }

    pub fn with_direction(&self, dir: Direction) -> Cubic {
        Cubic { direction: dir, ..*self }
    }

    pub fn segment(&self) -> PathEl {
        let (c0, c1) = (Point::new(self.cx0, self.cy0), Point::new(self.cx1, self.cy1));
        match self.direction {
            Direction::Increasing => PathEl::CurveTo(c0, c1, Point::new(self.x1, self.y1)),
            Direction::Decreasing => PathEl::CurveTo(c1, c0, Point::new(self.x0, self.y0)),
        }
    }
}

/// Sorted parameters strictly inside `(0, 1)` at which the cubic with y
/// values `c0, cp0, cp1, c1` turns around.
pub(crate) fn horizontal_params(c0: Real, cp0: Real, cp1: Real, c1: Real) -> Roots {
    let mut out = Roots::default();
    if c0 <= cp0 && cp0 <= cp1 && cp1 <= c1 {
        return out;
    }
    // Derivative of the cubic, divided by three, as a quadratic in t.
    let d1 = c1 - cp1;
    let dp1 = cp1 - cp0;
    let dp0 = cp0 - c0;
    let roots = solve_quadratic(dp0, (dp1 - dp0) * 2.0, d1 - dp1 - dp1 + dp0);
    for &t in roots.as_slice() {
        if t > 0.0 && t < 1.0 {
            out.push(t);
        }
    }
    out.sort();
    out
}

#[inline]
fn eval(c: &[Real; 4], t: Real) -> Real {
    ((c[3] * t + c[2]) * t + c[1]) * t + c[0]
}

fn derivative(c: &[Real; 4], t: Real, deriv: u32) -> Real {
    match deriv {
        0 => eval(c, t),
        1 => (3.0 * c[3] * t + 2.0 * c[2]) * t + c[1],
        2 => 6.0 * c[3] * t + 2.0 * c[2],
        3 => 6.0 * c[3],
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn s_curve() -> Cubic {
        // Monotone in y, wiggles in x.
        Cubic::new(0.0, 0.0, 3.0, 0.5, -2.0, 2.8, 1.0, 3.0, Direction::Increasing)
    }

    #[test]
    fn split_preserves_curve() {
        let c = [0.0, 0.0, 1.0, 3.0, 2.0, 3.0, 3.0, 0.0];
        let (a, b) = split(c, 0.25);
        assert_eq!(a[0..2], c[0..2]);
        assert_eq!(b[6..8], c[6..8]);
        assert_eq!(a[6..8], b[0..2]);
        let whole = Cubic::from_array(c, Direction::Increasing);
        let right = Cubic::from_array(b, Direction::Increasing);
        assert_relative_eq!(right.x_for_t(0.5), whole.x_for_t(0.625), epsilon = 1e-12);
    }

    #[test]
    fn t_for_y_inverts_y_for_t() {
        let c = s_curve();
        for i in 0..=20 {
            let t = i as Real / 20.0;
            let y = c.y_for_t(t);
            assert_relative_eq!(c.y_for_t(c.t_for_y(y)), y, epsilon = 1e-12);
        }
    }

    #[test]
    fn t_for_y_through_stationary_inflection() {
        // y(t) = 4(t - 1/2)^3 + 1/2: monotone, with zero slope at t = 1/2.
        let c = Cubic::new(0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, Direction::Increasing);
        assert_eq!(c.t_for_y(0.5), 0.5);
        for &y in &[0.1, 0.3, 0.7, 0.9] {
            let t = c.t_for_y(y);
            assert!((0.0..=1.0).contains(&t));
            assert_relative_eq!(c.y_for_t(t), y, epsilon = 1e-9);
        }
    }

    #[test]
    fn horizontal_params_sorted() {
        // Goes up, back down, up again.
        let p = horizontal_params(0.0, 4.0, -3.0, 1.0);
        assert_eq!(p.len(), 2);
        assert!(p.as_slice()[0] < p.as_slice()[1]);
        assert!(horizontal_params(0.0, 1.0, 2.0, 3.0).is_empty());
    }

    #[test]
    fn insert_produces_monotonic_pieces() {
        let mut curves = Vec::new();
        Cubic::insert(
            &mut curves,
            [0.0, 0.0, 1.0, 4.0, 2.0, -3.0, 3.0, 1.0],
            Direction::Increasing,
        );
        assert_eq!(curves.len(), 3);
        assert_eq!(curves[0].start(), Point::new(0.0, 0.0));
        assert_eq!(curves[2].end(), Point::new(3.0, 1.0));
        for w in curves.windows(2) {
            assert_relative_eq!(w[0].end().x, w[1].start().x, epsilon = 1e-12);
            assert_relative_eq!(w[0].end().y, w[1].start().y, epsilon = 1e-12);
        }
    }

    #[test]
    fn next_vertical_stops_at_x_extrema() {
        let c = s_curve();
        let t = c.next_vertical(0.0, 1.0);
        assert_relative_eq!(t, 0.25, epsilon = 1e-12);
        assert_relative_eq!(c.dx_for_t(t, 1), 0.0, epsilon = 1e-9);
        assert_relative_eq!(c.next_vertical(t, 1.0), 0.75, epsilon = 1e-12);
    }

    #[test]
    fn sub_curve_matches_parent() {
        let c = s_curve();
        let s = c.sub_curve(1.0, 2.0, Direction::Decreasing);
        assert_eq!(s.y0, 1.0);
        assert_eq!(s.y1, 2.0);
        assert_relative_eq!(s.x_for_y(1.5), c.x_for_y(1.5), epsilon = 1e-9);
        assert_eq!(s.segment().end_point(), Some(Point::new(s.x0, 1.0)));
    }
}
