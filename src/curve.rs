// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Y-monotonic boundary pieces.
//
// Every outline is cut into pieces along which y only ever grows (or only
// ever shrinks, recorded as `Direction::Decreasing`). Pieces are stored
// top-down regardless of direction, so "top" and "bottom" are always
// `y0 < y1`; `start()`/`end()` give the traversal order back.
//
// The four kinds are a closed set: a bare point that marks the start of a
// subpath, and line, quadratic and cubic segments.

mod cubic;
mod line;
mod quad;

#[cfg(test)]
mod tests;

pub use cubic::Cubic;
pub use line::Line;
pub use quad::Quad;

pub(crate) use cubic::split as split_cubic;
pub(crate) use quad::split as split_quad;

use crate::crossings::Crossings;
use crate::error::{Error, Result};
use crate::geom::{fairly_close, orderof, Point, Real, Rect};
use crate::path::PathEl;

/// Parameter span below which `find_intersect` stops subdividing and
/// intersects the chords.
pub const TMIN: Real = 1e-3;

/// Traversal direction of a piece relative to its top-down storage.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Increasing,
    Decreasing,
}

impl Direction {
    /// `+1` for increasing y, `-1` for decreasing.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Direction::Increasing => 1,
            Direction::Decreasing => -1,
        }
    }

    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Direction::Increasing => Direction::Decreasing,
            Direction::Decreasing => Direction::Increasing,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Curve {
    /// Subpath start marker.
    Point(Point),
    Line(Line),
    Quad(Quad),
    Cubic(Cubic),
}

// A parameter interval on one curve with its endpoint positions.
#[derive(Copy, Clone, Debug)]
struct Span {
    t0: Real,
    x0: Real,
    y0: Real,
    t1: Real,
    x1: Real,
    y1: Real,
}

// Bisection ran out of floating-point resolution.
#[derive(Debug)]
struct NoProgress;

impl Curve {
    // ───────────────────────── Decomposition ─────────────────────────────

    pub fn insert_move(curves: &mut Vec<Curve>, p: Point) {
        curves.push(Curve::Point(p));
    }

    /// Append a line. Horizontal lines carry no crossing information and
    /// are dropped.
    pub fn insert_line(curves: &mut Vec<Curve>, p0: Point, p1: Point) {
        if p0.y < p1.y {
            curves.push(Curve::Line(Line::new(p0.x, p0.y, p1.x, p1.y, Direction::Increasing)));
        } else if p0.y > p1.y {
            curves.push(Curve::Line(Line::new(p1.x, p1.y, p0.x, p0.y, Direction::Decreasing)));
        }
    }

    /// Append a quadratic, split at its y-extremum if it has one.
    pub fn insert_quad(curves: &mut Vec<Curve>, p0: Point, c: Point, p1: Point) {
        if p0.y > p1.y {
            Quad::insert(curves, [p1.x, p1.y, c.x, c.y, p0.x, p0.y], Direction::Decreasing);
        } else if p0.y == p1.y && p0.y == c.y {
            // Flat: nothing to add.
        } else {
            Quad::insert(curves, [p0.x, p0.y, c.x, c.y, p1.x, p1.y], Direction::Increasing);
        }
    }

    /// Append a cubic, split at up to two y-extrema.
    pub fn insert_cubic(curves: &mut Vec<Curve>, p0: Point, c0: Point, c1: Point, p1: Point) {
        if p0.y > p1.y {
            Cubic::insert(
                curves,
                [p1.x, p1.y, c1.x, c1.y, c0.x, c0.y, p0.x, p0.y],
                Direction::Decreasing,
            );
        } else if p0.y == p1.y && p0.y == c0.y && p0.y == c1.y {
            // Flat.
        } else {
            Cubic::insert(
                curves,
                [p0.x, p0.y, c0.x, c0.y, c1.x, c1.y, p1.x, p1.y],
                Direction::Increasing,
            );
        }
    }

    // ───────────────────────── Accessors ─────────────────────────────────

    pub fn order(&self) -> u8 {
        match self {
            Curve::Point(_) => 0,
            Curve::Line(_) => 1,
            Curve::Quad(_) => 2,
            Curve::Cubic(_) => 3,
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            Curve::Point(_) => Direction::Increasing,
            Curve::Line(c) => c.direction,
            Curve::Quad(c) => c.direction,
            Curve::Cubic(c) => c.direction,
        }
    }

    pub fn top(&self) -> Point {
        match self {
            Curve::Point(p) => *p,
            Curve::Line(c) => Point::new(c.x0, c.y0),
            Curve::Quad(c) => Point::new(c.x0, c.y0),
            Curve::Cubic(c) => Point::new(c.x0, c.y0),
        }
    }

    pub fn bottom(&self) -> Point {
        match self {
            Curve::Point(p) => *p,
            Curve::Line(c) => Point::new(c.x1, c.y1),
            Curve::Quad(c) => Point::new(c.x1, c.y1),
            Curve::Cubic(c) => Point::new(c.x1, c.y1),
        }
    }

    #[inline]
    pub fn x_top(&self) -> Real {
        self.top().x
    }

    #[inline]
    pub fn y_top(&self) -> Real {
        self.top().y
    }

    #[inline]
    pub fn x_bot(&self) -> Real {
        self.bottom().x
    }

    #[inline]
    pub fn y_bot(&self) -> Real {
        self.bottom().y
    }

    pub fn x_min(&self) -> Real {
        match self {
            Curve::Point(p) => p.x,
            Curve::Line(c) => c.xmin,
            Curve::Quad(c) => c.xmin,
            Curve::Cubic(c) => c.xmin,
        }
    }

    pub fn x_max(&self) -> Real {
        match self {
            Curve::Point(p) => p.x,
            Curve::Line(c) => c.xmax,
            Curve::Quad(c) => c.xmax,
            Curve::Cubic(c) => c.xmax,
        }
    }

    /// First point in traversal order.
    pub fn start(&self) -> Point {
        match self.direction() {
            Direction::Increasing => self.top(),
            Direction::Decreasing => self.bottom(),
        }
    }

    /// Last point in traversal order.
    pub fn end(&self) -> Point {
        match self.direction() {
            Direction::Increasing => self.bottom(),
            Direction::Decreasing => self.top(),
        }
    }

    // ───────────────────────── Evaluation ────────────────────────────────

    pub fn x_for_y(&self, y: Real) -> Real {
        match self {
            Curve::Point(p) => p.x,
            Curve::Line(c) => c.x_for_y(y),
            Curve::Quad(c) => c.x_for_y(y),
            Curve::Cubic(c) => c.x_for_y(y),
        }
    }

    pub fn t_for_y(&self, y: Real) -> Real {
        match self {
            Curve::Point(_) => 0.0,
            Curve::Line(c) => c.t_for_y(y),
            Curve::Quad(c) => c.t_for_y(y),
            Curve::Cubic(c) => c.t_for_y(y),
        }
    }

    pub fn x_for_t(&self, t: Real) -> Real {
        match self {
            Curve::Point(p) => p.x,
            Curve::Line(c) => c.x_for_t(t),
            Curve::Quad(c) => c.x_for_t(t),
            Curve::Cubic(c) => c.x_for_t(t),
        }
    }

    pub fn y_for_t(&self, t: Real) -> Real {
        match self {
            Curve::Point(p) => p.y,
            Curve::Line(c) => c.y_for_t(t),
            Curve::Quad(c) => c.y_for_t(t),
            Curve::Cubic(c) => c.y_for_t(t),
        }
    }

    /// `deriv`-th derivative of x(t); `deriv == 0` is x(t) itself.
    pub fn dx_for_t(&self, t: Real, deriv: u32) -> Real {
        match self {
            Curve::Point(p) if deriv == 0 => p.x,
            Curve::Point(_) => 0.0,
            Curve::Line(c) => c.dx_for_t(t, deriv),
            Curve::Quad(c) => c.dx_for_t(t, deriv),
            Curve::Cubic(c) => c.dx_for_t(t, deriv),
        }
    }

    pub fn dy_for_t(&self, t: Real, deriv: u32) -> Real {
        match self {
            Curve::Point(p) if deriv == 0 => p.y,
            Curve::Point(_) => 0.0,
            Curve::Line(c) => c.dy_for_t(t, deriv),
            Curve::Quad(c) => c.dy_for_t(t, deriv),
            Curve::Cubic(c) => c.dy_for_t(t, deriv),
        }
    }

    /// The first parameter in `(t0, t1)` where the tangent is vertical, or
    /// `t1` if there is none. Between two such stops x(t) is monotonic.
    pub fn next_vertical(&self, t0: Real, t1: Real) -> Real {
        match self {
            Curve::Point(_) => 0.0,
            Curve::Line(_) => t1,
            Curve::Quad(c) => c.next_vertical(t0, t1),
            Curve::Cubic(c) => c.next_vertical(t0, t1),
        }
    }

    // ───────────────────────── Derived pieces ────────────────────────────

    pub fn with_direction(&self, dir: Direction) -> Curve {
        match self {
            Curve::Point(_) => *self,
            Curve::Line(c) => Curve::Line(c.with_direction(dir)),
            Curve::Quad(c) => Curve::Quad(c.with_direction(dir)),
            Curve::Cubic(c) => Curve::Cubic(c.with_direction(dir)),
        }
    }

    pub fn reversed(&self) -> Curve {
        self.with_direction(self.direction().reversed())
    }

    /// The part of this piece between `ystart` and `yend`, traversed in
    /// direction `dir`.
    pub fn sub_curve(&self, ystart: Real, yend: Real, dir: Direction) -> Curve {
        match self {
            Curve::Point(_) => *self,
            Curve::Line(c) => Curve::Line(c.sub_curve(ystart, yend, dir)),
            Curve::Quad(c) => Curve::Quad(c.sub_curve(ystart, yend, dir)),
            Curve::Cubic(c) => Curve::Cubic(c.sub_curve(ystart, yend, dir)),
        }
    }

    /// Grow `r` to cover this piece, including any x-extremum.
    pub fn enlarge(&self, r: &mut Rect) {
        match self {
            Curve::Point(p) => r.add(p.x, p.y),
            Curve::Line(c) => c.enlarge(r),
            Curve::Quad(c) => c.enlarge(r),
            Curve::Cubic(c) => c.enlarge(r),
        }
    }

    /// The path element that draws this piece from `start()` to `end()`.
    pub fn segment(&self) -> PathEl {
        match self {
            Curve::Point(p) => PathEl::MoveTo(*p),
            Curve::Line(_) => PathEl::LineTo(self.end()),
            Curve::Quad(c) => c.segment(),
            Curve::Cubic(c) => c.segment(),
        }
    }

    // ───────────────────────── Crossings ─────────────────────────────────

    /// 1 if this piece crosses the rightward ray from `(x, y)`, else 0.
    /// The top end is included and the bottom end excluded.
    pub fn crossings_for(&self, x: Real, y: Real) -> i32 {
        if let Curve::Point(_) = self {
            return 0;
        }
        if y >= self.y_top()
            && y < self.y_bot()
            && x < self.x_max()
            && (x < self.x_min() || x < self.x_for_y(y))
        {
            return 1;
        }
        0
    }

    /// Feed this piece to a rectangle crossing accumulator. Returns true if
    /// the piece touches the rectangle interior.
    pub fn accumulate_crossings(&self, c: &mut Crossings) -> bool {
        match self {
            Curve::Point(p) => {
                p.x > c.x_lo() && p.x < c.x_hi() && p.y > c.y_lo() && p.y < c.y_hi()
            }
            Curve::Line(l) => l.accumulate_crossings(c),
            _ => self.accumulate_curve_crossings(c),
        }
    }

    fn accumulate_curve_crossings(&self, c: &mut Crossings) -> bool {
        let (xlo, ylo, xhi, yhi) = (c.x_lo(), c.y_lo(), c.x_hi(), c.y_hi());
        if self.x_min() >= xhi {
            return false;
        }
        let (y0, y1) = (self.y_top(), self.y_bot());
        let (mut tstart, ystart) = if y0 < ylo {
            if y1 <= ylo {
                return false;
            }
            (self.t_for_y(ylo), ylo)
        } else {
            if y0 >= yhi {
                return false;
            }
            (0.0, y0)
        };
        let (tend, yend) = if y1 > yhi {
            (self.t_for_y(yhi), yhi)
        } else {
            (1.0, y1)
        };
        // Walk the x-monotonic stretches; touching both sides of xlo/xhi or
        // landing between them is a hit.
        let mut hit_lo = false;
        let mut hit_hi = false;
        loop {
            let x = self.x_for_t(tstart);
            if x < xhi {
                if hit_hi || x > xlo {
                    return true;
                }
                hit_lo = true;
            } else {
                if hit_lo {
                    return true;
                }
                hit_hi = true;
            }
            if tstart >= tend {
                break;
            }
            tstart = self.next_vertical(tstart, tend);
        }
        if hit_lo {
            c.record(ystart, yend, self.direction().sign());
        }
        false
    }

    // ───────────────────────── Ordering ──────────────────────────────────

    /// Bisect toward the smallest parameter whose y is not above `y0`.
    pub fn refine_t_for_y(&self, mut t0: Real, y0: Real) -> Real {
        let mut t1 = 1.0;
        loop {
            let th = (t0 + t1) / 2.0;
            if th == t0 || th == t1 {
                return t1;
            }
            let y = self.y_for_t(th);
            if y < y0 {
                t0 = th;
            } else if y > y0 {
                t1 = th;
            } else {
                return th;
            }
        }
    }

    // t_for_y(y), pushed down if rounding left it above `ylimit`.
    fn t_not_above(&self, y: Real, ylimit: Real) -> Real {
        let t = self.t_for_y(y);
        if self.y_for_t(t) < ylimit {
            self.refine_t_for_y(t, ylimit)
        } else {
            t
        }
    }

    /// Order this piece against `that` by x over the y interval `yrange`.
    ///
    /// Returns -1, 0 or 1. On return `yrange[1]` has been lowered to the
    /// largest y for which the answer holds: the first crossing, the end
    /// of either piece, or the end of a coincident stretch.
    pub fn compare_to(&self, that: &Curve, yrange: &mut [Real; 2]) -> Result<i32> {
        if let (Curve::Line(a), Curve::Line(b)) = (self, that) {
            return a.compare_lines(b, yrange);
        }
        let y0 = yrange[0];
        let y1 = yrange[1].min(self.y_bot()).min(that.y_bot());
        if y1 <= y0 {
            return Err(Error::invariant(format!("backstepping from {y0} to {y1}")));
        }
        yrange[1] = y1;
        if self.x_max() <= that.x_min() {
            return Ok(if self.x_min() == that.x_max() { 0 } else { -1 });
        }
        if self.x_min() >= that.x_max() {
            return Ok(1);
        }

        // s parameterises this curve, t the other one.
        let mut s0 = self.t_not_above(y0, y0);
        let mut ys0 = self.y_for_t(s0);
        let s1 = self.t_not_above(y1, y0);
        let mut t0 = that.t_not_above(y0, y0);
        let mut yt0 = that.y_for_t(t0);
        let t1 = that.t_not_above(y1, y0);

        let mut xs0 = self.x_for_t(s0);
        let mut xt0 = that.x_for_t(t0);
        let scale = y0.abs().max(y1.abs());
        let ymin = (scale * 1e-14).max(1e-300);
        if fairly_close(xs0, xt0) {
            // Probe downward with a doubling step while the pieces stay
            // together, then halve back onto the last coincident y.
            let mut bump = ymin;
            let maxbump = (ymin * 1e13).min((y1 - y0) * 0.1);
            let mut y = y0 + bump;
            while y <= y1 {
                if fairly_close(self.x_for_y(y), that.x_for_y(y)) {
                    bump *= 2.0;
                    if bump > maxbump {
                        bump = maxbump;
                    }
                } else {
                    y -= bump;
                    loop {
                        bump /= 2.0;
                        let newy = y + bump;
                        if newy <= y {
                            break;
                        }
                        if fairly_close(self.x_for_y(newy), that.x_for_y(newy)) {
                            y = newy;
                        }
                    }
                    break;
                }
                let next = y + bump;
                if next <= y {
                    break;
                }
                y = next;
            }
            if y > y0 {
                if y < y1 {
                    yrange[1] = y;
                }
                return Ok(0);
            }
        }

        while s0 < s1 && t0 < t1 {
            let sh = self.next_vertical(s0, s1);
            let (xsh, ysh) = (self.x_for_t(sh), self.y_for_t(sh));
            let th = that.next_vertical(t0, t1);
            let (xth, yth) = (that.x_for_t(th), that.y_for_t(th));
            let s = Span { t0: s0, x0: xs0, y0: ys0, t1: sh, x1: xsh, y1: ysh };
            let t = Span { t0, x0: xt0, y0: yt0, t1: th, x1: xth, y1: yth };
            match self.find_intersect(that, yrange, s, t) {
                Ok(true) => break,
                Ok(false) => {}
                Err(NoProgress) => {
                    tracing::warn!(
                        y0 = yrange[0],
                        y1 = yrange[1],
                        "intersection search stalled; treating curves as coincident"
                    );
                    return Ok(0);
                }
            }
            if ysh < yth {
                if ysh > yrange[0] {
                    if ysh < yrange[1] {
                        yrange[1] = ysh;
                    }
                    break;
                }
                s0 = sh;
                xs0 = xsh;
                ys0 = ysh;
            } else {
                if yth > yrange[0] {
                    if yth < yrange[1] {
                        yrange[1] = yth;
                    }
                    break;
                }
                t0 = th;
                xt0 = xth;
                yt0 = yth;
            }
        }
        let ymid = (yrange[0] + yrange[1]) / 2.0;
        Ok(orderof(self.x_for_y(ymid), that.x_for_y(ymid)))
    }

    fn bisect(&self, sp: Span) -> std::result::Result<(Span, Span), NoProgress> {
        let m = (sp.t0 + sp.t1) / 2.0;
        if m == sp.t0 || m == sp.t1 {
            return Err(NoProgress);
        }
        let (xm, ym) = (self.x_for_t(m), self.y_for_t(m));
        Ok((
            Span { t1: m, x1: xm, y1: ym, ..sp },
            Span { t0: m, x0: xm, y0: ym, ..sp },
        ))
    }

    // Search two x-monotonic stretches for a crossing. On success
    // `yrange[1]` is lowered to the crossing's y.
    fn find_intersect(
        &self,
        that: &Curve,
        yrange: &mut [Real; 2],
        s: Span,
        t: Span,
    ) -> std::result::Result<bool, NoProgress> {
        if s.y0 > t.y1 || t.y0 > s.y1 {
            return Ok(false);
        }
        if s.x0.min(s.x1) > t.x0.max(t.x1) || s.x0.max(s.x1) < t.x0.min(t.x1) {
            return Ok(false);
        }
        // Boxes overlap: halve the longer stretches until they separate or
        // get short enough to treat as straight.
        if s.t1 - s.t0 > TMIN {
            let (sa, sb) = self.bisect(s)?;
            let ys = sa.y1;
            if t.t1 - t.t0 > TMIN {
                let (ta, tb) = that.bisect(t)?;
                let yt = ta.y1;
                if ys >= t.y0 && yt >= s.y0 && self.find_intersect(that, yrange, sa, ta)? {
                    return Ok(true);
                }
                if ys >= yt && self.find_intersect(that, yrange, sa, tb)? {
                    return Ok(true);
                }
                if yt >= ys && self.find_intersect(that, yrange, sb, ta)? {
                    return Ok(true);
                }
                if s.y1 >= yt && t.y1 >= ys && self.find_intersect(that, yrange, sb, tb)? {
                    return Ok(true);
                }
            } else {
                if ys >= t.y0 && self.find_intersect(that, yrange, sa, t)? {
                    return Ok(true);
                }
                if t.y1 >= ys && self.find_intersect(that, yrange, sb, t)? {
                    return Ok(true);
                }
            }
        } else if t.t1 - t.t0 > TMIN {
            let (ta, tb) = that.bisect(t)?;
            let yt = ta.y1;
            if yt >= s.y0 && self.find_intersect(that, yrange, s, ta)? {
                return Ok(true);
            }
            if s.y1 >= yt && self.find_intersect(that, yrange, s, tb)? {
                return Ok(true);
            }
        } else {
            // Intersect the chords.
            let xlk = s.x1 - s.x0;
            let ylk = s.y1 - s.y0;
            let xnm = t.x1 - t.x0;
            let ynm = t.y1 - t.y0;
            let xmk = t.x0 - s.x0;
            let ymk = t.y0 - s.y0;
            let det = xnm * ylk - ynm * xlk;
            if det != 0.0 {
                let detinv = 1.0 / det;
                let u = (xnm * ymk - ynm * xmk) * detinv;
                let v = (xlk * ymk - ylk * xmk) * detinv;
                if (0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&v) {
                    let ps = s.t0 + u * (s.t1 - s.t0);
                    let pt = t.t0 + v * (t.t1 - t.t0);
                    let y = (self.y_for_t(ps) + that.y_for_t(pt)) / 2.0;
                    if y <= yrange[1] && y > yrange[0] {
                        yrange[1] = y;
                        return Ok(true);
                    }
                }
            }
        }
        Ok(false)
    }
}
