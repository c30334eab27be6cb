// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Order-1 pieces: straight, non-horizontal line segments.

use super::Direction;
use crate::crossings::Crossings;
use crate::error::{Error, Result};
use crate::geom::{orderof, Real, Rect};

/// A line segment stored top-down (`y0 < y1`).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Line {
    pub(crate) x0: Real,
    pub(crate) y0: Real,
    pub(crate) x1: Real,
    pub(crate) y1: Real,
    pub(crate) xmin: Real,
    pub(crate) xmax: Real,
    pub(crate) direction: Direction,
}

impl Line {
    pub fn new(x0: Real, y0: Real, x1: Real, y1: Real, direction: Direction) -> Self {
        Line {
            x0,
            y0,
            x1,
            y1,
            xmin: x0.min(x1),
            xmax: x0.max(x1),
            direction,
        }
    }

    pub fn x_for_y(&self, y: Real) -> Real {
        if self.x0 == self.x1 || y <= self.y0 {
            return self.x0;
        }
        if y >= self.y1 {
            return self.x1;
        }
        self.x0 + (y - self.y0) * (self.x1 - self.x0) / (self.y1 - self.y0)
    }

    pub fn t_for_y(&self, y: Real) -> Real {
        if y <= self.y0 {
            return 0.0;
        }
        if y >= self.y1 {
            return 1.0;
        }
        (y - self.y0) / (self.y1 - self.y0)
    }

    #[inline]
    pub fn x_for_t(&self, t: Real) -> Real {
        self.x0 + t * (self.x1 - self.x0)
    }

    #[inline]
    pub fn y_for_t(&self, t: Real) -> Real {
        self.y0 + t * (self.y1 - self.y0)
    }

    pub fn dx_for_t(&self, t: Real, deriv: u32) -> Real {
        match deriv {
            0 => self.x_for_t(t),
            1 => self.x1 - self.x0,
            _ => 0.0,
        }
    }

    pub fn dy_for_t(&self, t: Real, deriv: u32) -> Real {
        match deriv {
            0 => self.y_for_t(t),
            1 => self.y1 - self.y0,
            _ => 0.0,
        }
    }

    pub fn sub_curve(&self, ystart: Real, yend: Real, dir: Direction) -> Line {
        if ystart == self.y0 && yend == self.y1 {
            return self.with_direction(dir);
        }
        if self.x0 == self.x1 {
            return Line::new(self.x0, ystart, self.x1, yend, dir);
        }
        let num = self.x0 - self.x1;
        let denom = self.y0 - self.y1;
        let xstart = self.x0 + (ystart - self.y0) * num / denom;
        let xend = self.x0 + (yend - self.y0) * num / denom;
        Line::new(xstart, ystart, xend, yend, dir)
    }

    pub fn with_direction(&self, dir: Direction) -> Line {
        Line { direction: dir, ..*self }
    }

    pub fn enlarge(&self, r: &mut Rect) {
        r.add(self.x0, self.y0);
        r.add(self.x1, self.y1);
    }

    /// Ordering of two lines over `yrange`, solved in closed form.
    ///
    /// Narrows `yrange[1]` to the lines' crossing point when it falls inside
    /// the range.
    pub fn compare_lines(&self, other: &Line, yrange: &mut [Real; 2]) -> Result<i32> {
        if yrange[1] <= yrange[0] {
            return Err(Error::invariant(format!(
                "empty y range [{}, {}] before line comparison",
                yrange[0], yrange[1]
            )));
        }
        yrange[1] = yrange[1].min(self.y1).min(other.y1);
        if yrange[1] <= yrange[0] {
            return Err(Error::invariant(format!(
                "backstepping from {} to {}",
                yrange[0], yrange[1]
            )));
        }
        if self.xmax <= other.xmin {
            return Ok(if self.xmin == other.xmax { 0 } else { -1 });
        }
        if self.xmin >= other.xmax {
            return Ok(1);
        }

        // x_a(y) = x0a + (y - y0a) * dxa / dya, likewise for b. Equating the
        // two and clearing denominators gives y at the crossing.
        let dxa = self.x1 - self.x0;
        let dya = self.y1 - self.y0;
        let dxb = other.x1 - other.x0;
        let dyb = other.y1 - other.y0;
        let denom = dxb * dya - dxa * dyb;
        let y = if denom != 0.0 {
            let num = (self.x0 - other.x0) * dya * dyb - self.y0 * dxa * dyb + other.y0 * dxb * dya;
            let y = num / denom;
            if y <= yrange[0] {
                // Crossing above the range: compare at the bottom.
                self.y1.min(other.y1)
            } else {
                if y < yrange[1] {
                    yrange[1] = y;
                }
                self.y0.max(other.y0)
            }
        } else {
            // Parallel; an endpoint keeps x_for_y on its fast path.
            self.y0.max(other.y0)
        };
        Ok(orderof(self.x_for_y(y), other.x_for_y(y)))
    }

    pub fn accumulate_crossings(&self, c: &mut Crossings) -> bool {
        let (xlo, ylo, xhi, yhi) = (c.x_lo(), c.y_lo(), c.x_hi(), c.y_hi());
        if self.xmin >= xhi {
            return false;
        }
        let (xstart, ystart) = if self.y0 < ylo {
            if self.y1 <= ylo {
                return false;
            }
            (self.x_for_y(ylo), ylo)
        } else {
            if self.y0 >= yhi {
                return false;
            }
            (self.x0, self.y0)
        };
        let (xend, yend) = if self.y1 > yhi {
            (self.x_for_y(yhi), yhi)
        } else {
            (self.x1, self.y1)
        };
        if xstart >= xhi && xend >= xhi {
            return false;
        }
        if xstart > xlo || xend > xlo {
            return true;
        }
        c.record(ystart, yend, self.direction.sign());
        false
    }
}
