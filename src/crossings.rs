// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Crossing counters used for containment queries.
//
// Two families live here:
//
//   - Free functions that count how often a path crosses the rightward
//     horizontal ray from a point, or the "right shadow" of a rectangle.
//     These back `Path::contains` / `Path::intersects_rect` directly.
//
//   - `Crossings`, an accumulator that records the y intervals over which
//     a boundary passes entirely to the left of a rectangle. Once every
//     boundary piece has been fed in, the rectangle is inside iff its whole
//     height is covered. Any boundary piece that touches the rectangle
//     short-circuits the accumulation.

use crate::curve::Curve;
use crate::error::{Error, Result};
use crate::geom::{Point, Real, Rect};
use crate::path::{PathEl, Shape, WindingRule};

// Subdivision depth past which a curve is treated as its chord; an f64
// mantissa carries 52 bits.
const MAX_SUBDIVISION_LEVEL: u32 = 52;

/// Outcome of a rectangle crossing count.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RectCrossings {
    /// The path boundary passes through the rectangle interior.
    Intersects,
    /// Signed count of crossings of the rectangle's right shadow. Every
    /// full crossing contributes two (one per horizontal edge).
    Count(i32),
}

// ─────────────────────────── Point crossings ──────────────────────────────────

/// Signed number of times the path crosses the ray from `(px, py)` toward
/// +x. Open subpaths are implicitly closed.
pub fn point_crossings_for_path<I>(path: I, px: Real, py: Real) -> Result<i32>
where
    I: IntoIterator<Item = PathEl>,
{
    let mut it = path.into_iter();
    let start = match it.next() {
        None => return Ok(0),
        Some(PathEl::MoveTo(p)) => p,
        Some(_) => return Err(Error::MissingMoveTo),
    };
    let (mut mov, mut cur) = (start, start);
    let mut crossings = 0;
    for el in it {
        match el {
            PathEl::MoveTo(p) => {
                if cur.y != mov.y {
                    crossings += point_crossings_for_line(px, py, cur.x, cur.y, mov.x, mov.y);
                }
                mov = p;
                cur = p;
            }
            PathEl::LineTo(p) => {
                crossings += point_crossings_for_line(px, py, cur.x, cur.y, p.x, p.y);
                cur = p;
            }
            PathEl::QuadTo(c, p) => {
                crossings += point_crossings_for_quad(px, py, cur.x, cur.y, c.x, c.y, p.x, p.y, 0);
                cur = p;
            }
            PathEl::CurveTo(c0, c1, p) => {
                crossings += point_crossings_for_cubic(
                    px, py, cur.x, cur.y, c0.x, c0.y, c1.x, c1.y, p.x, p.y, 0,
                );
                cur = p;
            }
            PathEl::Close => {
                if cur.y != mov.y {
                    crossings += point_crossings_for_line(px, py, cur.x, cur.y, mov.x, mov.y);
                }
                cur = mov;
            }
        }
    }
    if cur.y != mov.y {
        crossings += point_crossings_for_line(px, py, cur.x, cur.y, mov.x, mov.y);
    }
    Ok(crossings)
}

/// Crossing contribution of one line. The segment's lower endpoint counts
/// as on the ray, the upper one does not.
pub fn point_crossings_for_line(px: Real, py: Real, x0: Real, y0: Real, x1: Real, y1: Real) -> i32 {
    if py < y0 && py < y1 {
        return 0;
    }
    if py >= y0 && py >= y1 {
        return 0;
    }
    if px >= x0 && px >= x1 {
        return 0;
    }
    let dir = if y0 < y1 { 1 } else { -1 };
    if px < x0 && px < x1 {
        return dir;
    }
    let xintercept = x0 + (py - y0) * (x1 - x0) / (y1 - y0);
    if px >= xintercept {
        return 0;
    }
    dir
}

#[allow(clippy::too_many_arguments)]
pub fn point_crossings_for_quad(
    px: Real,
    py: Real,
    x0: Real,
    y0: Real,
    xc: Real,
    yc: Real,
    x1: Real,
    y1: Real,
    level: u32,
) -> i32 {
    if py < y0 && py < yc && py < y1 {
        return 0;
    }
    if py >= y0 && py >= yc && py >= y1 {
        return 0;
    }
    if px >= x0 && px >= xc && px >= x1 {
        return 0;
    }
    if px < x0 && px < xc && px < x1 {
        // Entirely right of the point: only the endpoints decide.
        if py >= y0 {
            if py < y1 {
                return 1;
            }
        } else if py >= y1 {
            return -1;
        }
        return 0;
    }
    if level > MAX_SUBDIVISION_LEVEL {
        return point_crossings_for_line(px, py, x0, y0, x1, y1);
    }
    let (x0c, y0c) = ((x0 + xc) / 2.0, (y0 + yc) / 2.0);
    let (xc1, yc1) = ((xc + x1) / 2.0, (yc + y1) / 2.0);
    let (xm, ym) = ((x0c + xc1) / 2.0, (y0c + yc1) / 2.0);
    if xm.is_nan() || ym.is_nan() {
        return 0;
    }
    point_crossings_for_quad(px, py, x0, y0, x0c, y0c, xm, ym, level + 1)
        + point_crossings_for_quad(px, py, xm, ym, xc1, yc1, x1, y1, level + 1)
}

#[allow(clippy::too_many_arguments)]
pub fn point_crossings_for_cubic(
    px: Real,
    py: Real,
    x0: Real,
    y0: Real,
    xc0: Real,
    yc0: Real,
    xc1: Real,
    yc1: Real,
    x1: Real,
    y1: Real,
    level: u32,
) -> i32 {
    if py < y0 && py < yc0 && py < yc1 && py < y1 {
        return 0;
    }
    if py >= y0 && py >= yc0 && py >= yc1 && py >= y1 {
        return 0;
    }
    if px >= x0 && px >= xc0 && px >= xc1 && px >= x1 {
        return 0;
    }
    if px < x0 && px < xc0 && px < xc1 && px < x1 {
        if py >= y0 {
            if py < y1 {
                return 1;
            }
        } else if py >= y1 {
            return -1;
        }
        return 0;
    }
    if level > MAX_SUBDIVISION_LEVEL {
        return point_crossings_for_line(px, py, x0, y0, x1, y1);
    }
    let [a, b] = split_cubic([x0, y0, xc0, yc0, xc1, yc1, x1, y1]);
    if b[0].is_nan() || b[1].is_nan() {
        return 0;
    }
    point_crossings_for_cubic(px, py, a[0], a[1], a[2], a[3], a[4], a[5], a[6], a[7], level + 1)
        + point_crossings_for_cubic(px, py, b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7], level + 1)
}

// de Casteljau split at t = 1/2.
fn split_cubic(c: [Real; 8]) -> [[Real; 8]; 2] {
    let (x0, y0, xc0, yc0, xc1, yc1, x1, y1) = (c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]);
    let (xmid, ymid) = ((xc0 + xc1) / 2.0, (yc0 + yc1) / 2.0);
    let (xc0, yc0) = ((x0 + xc0) / 2.0, (y0 + yc0) / 2.0);
    let (xc1, yc1) = ((xc1 + x1) / 2.0, (yc1 + y1) / 2.0);
    let (xc0m, yc0m) = ((xc0 + xmid) / 2.0, (yc0 + ymid) / 2.0);
    let (xmc1, ymc1) = ((xmid + xc1) / 2.0, (ymid + yc1) / 2.0);
    let (xmid, ymid) = ((xc0m + xmc1) / 2.0, (yc0m + ymc1) / 2.0);
    [
        [x0, y0, xc0, yc0, xc0m, yc0m, xmid, ymid],
        [xmid, ymid, xmc1, ymc1, xc1, yc1, x1, y1],
    ]
}

// ─────────────────────────── Rectangle crossings ──────────────────────────────

/// Crossings of the path against the right shadow of `r`, or
/// `Intersects` as soon as any boundary piece enters `r`.
pub fn rect_crossings_for_path<I>(path: I, r: &Rect) -> Result<RectCrossings>
where
    I: IntoIterator<Item = PathEl>,
{
    if r.x1 <= r.x0 || r.y1 <= r.y0 {
        return Ok(RectCrossings::Count(0));
    }
    let mut it = path.into_iter();
    let start = match it.next() {
        None => return Ok(RectCrossings::Count(0)),
        Some(PathEl::MoveTo(p)) => p,
        Some(_) => return Err(Error::MissingMoveTo),
    };
    Ok(match rect_crossings_inner(it, r, start) {
        Some(n) => RectCrossings::Count(n),
        None => RectCrossings::Intersects,
    })
}

fn rect_crossings_inner(it: impl Iterator<Item = PathEl>, r: &Rect, start: Point) -> Option<i32> {
    let (mut mov, mut cur) = (start, start);
    let mut crossings = 0;
    for el in it {
        match el {
            PathEl::MoveTo(p) => {
                if cur != mov {
                    crossings = rect_crossings_for_line(crossings, r, cur.x, cur.y, mov.x, mov.y)?;
                }
                mov = p;
                cur = p;
            }
            PathEl::LineTo(p) => {
                crossings = rect_crossings_for_line(crossings, r, cur.x, cur.y, p.x, p.y)?;
                cur = p;
            }
            PathEl::QuadTo(c, p) => {
                crossings = rect_crossings_for_quad(crossings, r, [cur.x, cur.y, c.x, c.y, p.x, p.y], 0)?;
                cur = p;
            }
            PathEl::CurveTo(c0, c1, p) => {
                crossings = rect_crossings_for_cubic(
                    crossings,
                    r,
                    [cur.x, cur.y, c0.x, c0.y, c1.x, c1.y, p.x, p.y],
                    0,
                )?;
                cur = p;
            }
            PathEl::Close => {
                if cur != mov {
                    crossings = rect_crossings_for_line(crossings, r, cur.x, cur.y, mov.x, mov.y)?;
                }
                cur = mov;
            }
        }
    }
    if cur != mov {
        crossings = rect_crossings_for_line(crossings, r, cur.x, cur.y, mov.x, mov.y)?;
    }
    Some(crossings)
}

// Shared tail of the line/quad/cubic rules once a piece is known to sit
// entirely right of the rectangle: judge it by its endpoints alone.
fn right_shadow_crossings(mut crossings: i32, r: &Rect, y0: Real, y1: Real) -> i32 {
    if y0 < y1 {
        if y0 <= r.y0 && y1 > r.y0 {
            crossings += 1;
        }
        if y0 < r.y1 && y1 >= r.y1 {
            crossings += 1;
        }
    } else if y1 < y0 {
        if y1 <= r.y0 && y0 > r.y0 {
            crossings -= 1;
        }
        if y1 < r.y1 && y0 >= r.y1 {
            crossings -= 1;
        }
    }
    crossings
}

#[inline]
fn strictly_inside(r: &Rect, x: Real, y: Real) -> bool {
    x > r.x0 && x < r.x1 && y > r.y0 && y < r.y1
}

/// `None` means the line enters the rectangle.
pub fn rect_crossings_for_line(
    crossings: i32,
    r: &Rect,
    x0: Real,
    y0: Real,
    x1: Real,
    y1: Real,
) -> Option<i32> {
    if y0 >= r.y1 && y1 >= r.y1 {
        return Some(crossings);
    }
    if y0 <= r.y0 && y1 <= r.y0 {
        return Some(crossings);
    }
    if x0 <= r.x0 && x1 <= r.x0 {
        return Some(crossings);
    }
    if x0 >= r.x1 && x1 >= r.x1 {
        return Some(right_shadow_crossings(crossings, r, y0, y1));
    }
    if strictly_inside(r, x0, y0) || strictly_inside(r, x1, y1) {
        return None;
    }
    // Clip the line to the rectangle's y range and look at where the
    // clipped ends fall in x.
    let mut xi0 = x0;
    if y0 < r.y0 {
        xi0 += (r.y0 - y0) * (x1 - x0) / (y1 - y0);
    } else if y0 > r.y1 {
        xi0 += (r.y1 - y0) * (x1 - x0) / (y1 - y0);
    }
    let mut xi1 = x1;
    if y1 < r.y0 {
        xi1 += (r.y0 - y1) * (x0 - x1) / (y0 - y1);
    } else if y1 > r.y1 {
        xi1 += (r.y1 - y1) * (x0 - x1) / (y0 - y1);
    }
    if xi0 <= r.x0 && xi1 <= r.x0 {
        return Some(crossings);
    }
    if xi0 >= r.x1 && xi1 >= r.x1 {
        return Some(right_shadow_crossings(crossings, r, y0, y1));
    }
    None
}

fn rect_crossings_for_quad(crossings: i32, r: &Rect, q: [Real; 6], level: u32) -> Option<i32> {
    let [x0, y0, xc, yc, x1, y1] = q;
    if y0 >= r.y1 && yc >= r.y1 && y1 >= r.y1 {
        return Some(crossings);
    }
    if y0 <= r.y0 && yc <= r.y0 && y1 <= r.y0 {
        return Some(crossings);
    }
    if x0 <= r.x0 && xc <= r.x0 && x1 <= r.x0 {
        return Some(crossings);
    }
    if x0 >= r.x1 && xc >= r.x1 && x1 >= r.x1 {
        return Some(right_shadow_crossings(crossings, r, y0, y1));
    }
    if strictly_inside(r, x0, y0) || strictly_inside(r, x1, y1) {
        return None;
    }
    if level > MAX_SUBDIVISION_LEVEL {
        return rect_crossings_for_line(crossings, r, x0, y0, x1, y1);
    }
    let (x0c, y0c) = ((x0 + xc) / 2.0, (y0 + yc) / 2.0);
    let (xc1, yc1) = ((xc + x1) / 2.0, (yc + y1) / 2.0);
    let (xm, ym) = ((x0c + xc1) / 2.0, (y0c + yc1) / 2.0);
    if xm.is_nan() || ym.is_nan() {
        return Some(0);
    }
    let crossings = rect_crossings_for_quad(crossings, r, [x0, y0, x0c, y0c, xm, ym], level + 1)?;
    rect_crossings_for_quad(crossings, r, [xm, ym, xc1, yc1, x1, y1], level + 1)
}

fn rect_crossings_for_cubic(crossings: i32, r: &Rect, c: [Real; 8], level: u32) -> Option<i32> {
    let [x0, y0, xc0, yc0, xc1, yc1, x1, y1] = c;
    if y0 >= r.y1 && yc0 >= r.y1 && yc1 >= r.y1 && y1 >= r.y1 {
        return Some(crossings);
    }
    if y0 <= r.y0 && yc0 <= r.y0 && yc1 <= r.y0 && y1 <= r.y0 {
        return Some(crossings);
    }
    if x0 <= r.x0 && xc0 <= r.x0 && xc1 <= r.x0 && x1 <= r.x0 {
        return Some(crossings);
    }
    if x0 >= r.x1 && xc0 >= r.x1 && xc1 >= r.x1 && x1 >= r.x1 {
        return Some(right_shadow_crossings(crossings, r, y0, y1));
    }
    if strictly_inside(r, x0, y0) || strictly_inside(r, x1, y1) {
        return None;
    }
    if level > MAX_SUBDIVISION_LEVEL {
        return rect_crossings_for_line(crossings, r, x0, y0, x1, y1);
    }
    let [a, b] = split_cubic(c);
    if b[0].is_nan() || b[1].is_nan() {
        return Some(0);
    }
    let crossings = rect_crossings_for_cubic(crossings, r, a, level + 1)?;
    rect_crossings_for_cubic(crossings, r, b, level + 1)
}

// ─────────────────────────── Crossings accumulator ────────────────────────────

/// Accumulates the y intervals over which boundary pieces pass entirely to
/// the left of a test rectangle.
#[derive(Clone, Debug)]
pub struct Crossings {
    rule: WindingRule,
    xlo: Real,
    ylo: Real,
    xhi: Real,
    yhi: Real,
    /// Sorted, disjoint `[lo, hi]` pairs, flattened.
    yranges: Vec<Real>,
    /// Signed crossing count per pair; only maintained for non-zero.
    counts: Vec<i32>,
}

impl Crossings {
    pub fn new(rule: WindingRule, xlo: Real, ylo: Real, xhi: Real, yhi: Real) -> Self {
        Crossings {
            rule,
            xlo,
            ylo,
            xhi,
            yhi,
            yranges: Vec::with_capacity(10),
            counts: Vec::new(),
        }
    }

    pub fn even_odd(xlo: Real, ylo: Real, xhi: Real, yhi: Real) -> Self {
        Self::new(WindingRule::EvenOdd, xlo, ylo, xhi, yhi)
    }

    pub fn non_zero(xlo: Real, ylo: Real, xhi: Real, yhi: Real) -> Self {
        Self::new(WindingRule::NonZero, xlo, ylo, xhi, yhi)
    }

    #[inline]
    pub fn x_lo(&self) -> Real {
        self.xlo
    }
    #[inline]
    pub fn y_lo(&self) -> Real {
        self.ylo
    }
    #[inline]
    pub fn x_hi(&self) -> Real {
        self.xhi
    }
    #[inline]
    pub fn y_hi(&self) -> Real {
        self.yhi
    }

    /// True if no interval has been recorded.
    pub fn is_empty(&self) -> bool {
        self.yranges.is_empty()
    }

    /// Recorded intervals as `(lo, hi)` pairs.
    pub fn ranges(&self) -> impl Iterator<Item = (Real, Real)> + '_ {
        self.yranges.chunks_exact(2).map(|p| (p[0], p[1]))
    }

    /// True if `[ystart, yend]` is entirely inside recorded intervals.
    pub fn covers(&self, mut ystart: Real, yend: Real) -> bool {
        match self.rule {
            WindingRule::EvenOdd => {
                self.yranges.len() == 2 && self.yranges[0] <= ystart && self.yranges[1] >= yend
            }
            WindingRule::NonZero => {
                for (lo, hi) in self.ranges() {
                    if ystart >= hi {
                        continue;
                    }
                    if ystart < lo {
                        return false;
                    }
                    if yend <= hi {
                        return true;
                    }
                    ystart = hi;
                }
                ystart >= yend
            }
        }
    }

    pub fn record(&mut self, ystart: Real, yend: Real, direction: i32) {
        if ystart >= yend {
            return;
        }
        match self.rule {
            WindingRule::EvenOdd => self.record_even_odd(ystart, yend),
            WindingRule::NonZero => self.record_non_zero(ystart, yend, direction),
        }
    }

    // Toggle occupancy over [ystart, yend]: the new interval set is the
    // symmetric difference of the old one and the new range.
    fn record_even_odd(&mut self, mut ystart: Real, mut yend: Real) {
        let old = std::mem::take(&mut self.yranges);
        let mut out = Vec::with_capacity(old.len() + 2);
        let mut from = 0;
        while from < old.len() && ystart > old[from + 1] {
            out.extend_from_slice(&old[from..from + 2]);
            from += 2;
        }
        while from < old.len() {
            let (yrlo, yrhi) = (old[from], old[from + 1]);
            from += 2;
            if yend < yrlo {
                out.push(ystart);
                out.push(yend);
                ystart = yrlo;
                yend = yrhi;
                continue;
            }
            let (yll, mut ylh) = if ystart < yrlo { (ystart, yrlo) } else { (yrlo, ystart) };
            let (mut yhl, yhh) = if yend < yrhi { (yend, yrhi) } else { (yrhi, yend) };
            if ylh == yhl {
                ystart = yll;
                yend = yhh;
            } else {
                if ylh > yhl {
                    std::mem::swap(&mut ylh, &mut yhl);
                }
                if yll != ylh {
                    out.push(yll);
                    out.push(ylh);
                }
                ystart = yhl;
                yend = yhh;
            }
            if ystart >= yend {
                break;
            }
        }
        out.extend_from_slice(&old[from..]);
        if ystart < yend {
            out.push(ystart);
            out.push(yend);
        }
        self.yranges = out;
    }

    // Add `direction` to the count over [ystart, yend]; intervals whose count
    // returns to zero disappear.
    fn record_non_zero(&mut self, ystart: Real, yend: Real, direction: i32) {
        let old_ranges = std::mem::take(&mut self.yranges);
        let old_counts = std::mem::take(&mut self.counts);
        let mut y = ystart;
        for (i, &count) in old_counts.iter().enumerate() {
            let (lo, hi) = (old_ranges[2 * i], old_ranges[2 * i + 1]);
            if hi <= y || y >= yend {
                self.push_range(lo, hi, count);
                continue;
            }
            if lo >= yend {
                self.push_range(y, yend, direction);
                y = yend;
                self.push_range(lo, hi, count);
                continue;
            }
            if y < lo {
                self.push_range(y, lo, direction);
                y = lo;
            } else if lo < y {
                self.push_range(lo, y, count);
            }
            let end = hi.min(yend);
            self.push_range(y, end, count + direction);
            if end < hi {
                self.push_range(end, hi, count);
            }
            y = end;
        }
        if y < yend {
            self.push_range(y, yend, direction);
        }
    }

    fn push_range(&mut self, lo: Real, hi: Real, count: i32) {
        if count == 0 || lo >= hi {
            return;
        }
        let n = self.counts.len();
        if n > 0 && self.counts[n - 1] == count && self.yranges[2 * n - 1] == lo {
            self.yranges[2 * n - 1] = hi;
            return;
        }
        self.yranges.push(lo);
        self.yranges.push(hi);
        self.counts.push(count);
    }

    /// Feed one line. Returns true if it touches the rectangle.
    pub fn accumulate_line(&mut self, x0: Real, y0: Real, x1: Real, y1: Real) -> bool {
        if y0 <= y1 {
            self.accumulate_line_dir(x0, y0, x1, y1, 1)
        } else {
            self.accumulate_line_dir(x1, y1, x0, y0, -1)
        }
    }

    /// Feed a line already ordered so that `y0 <= y1`.
    pub fn accumulate_line_dir(
        &mut self,
        x0: Real,
        y0: Real,
        x1: Real,
        y1: Real,
        direction: i32,
    ) -> bool {
        if self.yhi <= y0 || self.ylo >= y1 {
            return false;
        }
        if x0 >= self.xhi && x1 >= self.xhi {
            return false;
        }
        if y0 == y1 {
            return x0 >= self.xlo || x1 >= self.xlo;
        }
        let (dx, dy) = (x1 - x0, y1 - y0);
        let (xstart, ystart) = if y0 < self.ylo {
            (x0 + (self.ylo - y0) * dx / dy, self.ylo)
        } else {
            (x0, y0)
        };
        let (xend, yend) = if self.yhi < y1 {
            (x0 + (self.yhi - y0) * dx / dy, self.yhi)
        } else {
            (x1, y1)
        };
        if xstart >= self.xhi && xend >= self.xhi {
            return false;
        }
        if xstart > self.xlo || xend > self.xlo {
            return true;
        }
        self.record(ystart, yend, direction);
        false
    }

    pub fn accumulate_quad(&mut self, p0: Point, c: Point, p1: Point) -> bool {
        if p0.y < self.ylo && c.y < self.ylo && p1.y < self.ylo {
            return false;
        }
        if p0.y > self.yhi && c.y > self.yhi && p1.y > self.yhi {
            return false;
        }
        if p0.x > self.xhi && c.x > self.xhi && p1.x > self.xhi {
            return false;
        }
        if p0.x < self.xlo && c.x < self.xlo && p1.x < self.xlo {
            self.record_left_of(p0.y, p1.y);
            return false;
        }
        let mut tmp = Vec::with_capacity(2);
        Curve::insert_quad(&mut tmp, p0, c, p1);
        tmp.iter().any(|c| c.accumulate_crossings(self))
    }

    pub fn accumulate_cubic(&mut self, p0: Point, c0: Point, c1: Point, p1: Point) -> bool {
        if p0.y < self.ylo && c0.y < self.ylo && c1.y < self.ylo && p1.y < self.ylo {
            return false;
        }
        if p0.y > self.yhi && c0.y > self.yhi && c1.y > self.yhi && p1.y > self.yhi {
            return false;
        }
        if p0.x > self.xhi && c0.x > self.xhi && c1.x > self.xhi && p1.x > self.xhi {
            return false;
        }
        if p0.x < self.xlo && c0.x < self.xlo && c1.x < self.xlo && p1.x < self.xlo {
            self.record_left_of(p0.y, p1.y);
            return false;
        }
        let mut tmp = Vec::with_capacity(3);
        Curve::insert_cubic(&mut tmp, p0, c0, c1, p1);
        tmp.iter().any(|c| c.accumulate_crossings(self))
    }

    // A curve entirely left of the rectangle crosses it like its chord.
    fn record_left_of(&mut self, y0: Real, y1: Real) {
        if y0 < y1 {
            self.record(y0.max(self.ylo), y1.min(self.yhi), 1);
        } else if y0 > y1 {
            self.record(y1.max(self.ylo), y0.min(self.yhi), -1);
        }
    }
}

/// Even-odd crossings of a finished curve set against `r`, or `None` if
/// some curve touches the rectangle.
pub fn find_crossings(curves: &[Curve], r: &Rect) -> Option<Crossings> {
    let mut cross = Crossings::even_odd(r.x0, r.y0, r.x1, r.y1);
    for c in curves {
        if c.accumulate_crossings(&mut cross) {
            return None;
        }
    }
    Some(cross)
}

/// Crossings of an arbitrary shape against `r` under the shape's winding
/// rule. `Ok(None)` means the boundary touches the rectangle.
pub fn find_path_crossings<S: Shape + ?Sized>(shape: &S, r: &Rect) -> Result<Option<Crossings>> {
    let mut cross = Crossings::new(shape.winding_rule(), r.x0, r.y0, r.x1, r.y1);
    let mut it = shape.path_elements();
    let start = match it.next() {
        None => return Ok(Some(cross)),
        Some(PathEl::MoveTo(p)) => p,
        Some(_) => return Err(Error::MissingMoveTo),
    };
    let (mut mov, mut cur) = (start, start);
    for el in it {
        let hit = match el {
            PathEl::MoveTo(p) => {
                let hit = mov.y != cur.y && cross.accumulate_line(cur.x, cur.y, mov.x, mov.y);
                mov = p;
                cur = p;
                hit
            }
            PathEl::LineTo(p) => {
                let hit = cross.accumulate_line(cur.x, cur.y, p.x, p.y);
                cur = p;
                hit
            }
            PathEl::QuadTo(c, p) => {
                let hit = cross.accumulate_quad(cur, c, p);
                cur = p;
                hit
            }
            PathEl::CurveTo(c0, c1, p) => {
                let hit = cross.accumulate_cubic(cur, c0, c1, p);
                cur = p;
                hit
            }
            PathEl::Close => {
                let hit = mov.y != cur.y && cross.accumulate_line(cur.x, cur.y, mov.x, mov.y);
                cur = mov;
                hit
            }
        };
        if hit {
            return Ok(None);
        }
    }
    if mov.y != cur.y && cross.accumulate_line(cur.x, cur.y, mov.x, mov.y) {
        return Ok(None);
    }
    Ok(Some(cross))
}
