// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Boolean and winding operators, and the per-row state machine that tells
// the sweep whether crossing an edge enters or leaves the result.

use crate::curve::Curve;
use crate::edge::{CurveTag, Edge, EdgeTag};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AreaOp {
    /// Union.
    Add,
    /// Left minus right.
    Subtract,
    Intersect,
    /// Symmetric difference.
    Xor,
    /// Normalise one operand under the non-zero winding rule.
    NonZero,
    /// Normalise one operand under the even-odd rule.
    EvenOdd,
}

impl AreaOp {
    /// For the two-operand ops, whether a point inside/outside each
    /// operand lies in the result. `None` for the winding ops.
    pub fn retains(self, in_left: bool, in_right: bool) -> Option<bool> {
        match self {
            AreaOp::Add => Some(in_left || in_right),
            AreaOp::Subtract => Some(in_left && !in_right),
            AreaOp::Intersect => Some(in_left && in_right),
            AreaOp::Xor => Some(in_left != in_right),
            AreaOp::NonZero | AreaOp::EvenOdd => None,
        }
    }
}

/// Whether the sweep is currently inside the result.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RowState {
    Inside,
    Outside,
}

/// Left-to-right classification state for one sweep row.
#[derive(Clone, Debug)]
pub struct Classifier {
    op: AreaOp,
    in_left: bool,
    in_right: bool,
    in_result: bool,
    count: i32,
}

impl Classifier {
    pub fn new(op: AreaOp) -> Self {
        Classifier {
            op,
            in_left: false,
            in_right: false,
            in_result: false,
            count: 0,
        }
    }

    pub fn new_row(&mut self) {
        self.in_left = false;
        self.in_right = false;
        self.in_result = false;
        self.count = 0;
    }

    /// Step across `edge` (whose piece is `curve`) and report how the
    /// result changes.
    pub fn classify(&mut self, edge: &Edge, curve: &Curve) -> EdgeTag {
        match self.op {
            AreaOp::NonZero => {
                let tag = if self.count == 0 {
                    EdgeTag::Enter
                } else {
                    EdgeTag::Ignore
                };
                self.count += curve.direction().sign();
                if self.count == 0 {
                    EdgeTag::Exit
                } else {
                    tag
                }
            }
            AreaOp::EvenOdd => {
                self.in_result = !self.in_result;
                if self.in_result {
                    EdgeTag::Enter
                } else {
                    EdgeTag::Exit
                }
            }
            op => {
                match edge.ctag {
                    CurveTag::Left => self.in_left = !self.in_left,
                    CurveTag::Right => self.in_right = !self.in_right,
                }
                let now = op.retains(self.in_left, self.in_right).unwrap_or(false);
                if now == self.in_result {
                    return EdgeTag::Ignore;
                }
                self.in_result = now;
                if now {
                    EdgeTag::Enter
                } else {
                    EdgeTag::Exit
                }
            }
        }
    }

    pub fn state(&self) -> RowState {
        let inside = match self.op {
            AreaOp::NonZero => self.count != 0,
            _ => self.in_result,
        };
        if inside {
            RowState::Inside
        } else {
            RowState::Outside
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;

    fn down_and_up() -> (Curve, Curve) {
        let mut v = Vec::new();
        Curve::insert_line(&mut v, Point::new(0.0, 0.0), Point::new(0.0, 1.0));
        Curve::insert_line(&mut v, Point::new(1.0, 1.0), Point::new(1.0, 0.0));
        (v[0], v[1])
    }

    #[test]
    fn truth_tables() {
        use AreaOp::*;
        let cases = [(false, false), (true, false), (false, true), (true, true)];
        let expect = |op: AreaOp| cases.map(|(l, r)| op.retains(l, r).unwrap());
        assert_eq!(expect(Add), [false, true, true, true]);
        assert_eq!(expect(Subtract), [false, true, false, false]);
        assert_eq!(expect(Intersect), [false, false, false, true]);
        assert_eq!(expect(Xor), [false, true, true, false]);
        assert_eq!(NonZero.retains(true, true), None);
    }

    #[test]
    fn union_ignores_inner_boundaries() {
        let (a, _) = down_and_up();
        let mut c = Classifier::new(AreaOp::Add);
        let left = Edge::new(0, CurveTag::Left);
        let right = Edge::new(0, CurveTag::Right);
        assert_eq!(c.classify(&left, &a), EdgeTag::Enter);
        assert_eq!(c.classify(&right, &a), EdgeTag::Ignore);
        assert_eq!(c.state(), RowState::Inside);
        assert_eq!(c.classify(&left, &a), EdgeTag::Ignore);
        assert_eq!(c.classify(&right, &a), EdgeTag::Exit);
        assert_eq!(c.state(), RowState::Outside);
    }

    #[test]
    fn non_zero_counts_direction() {
        let (down, up) = down_and_up();
        let e = Edge::new(0, CurveTag::Left);
        let mut c = Classifier::new(AreaOp::NonZero);
        // Two nested loops with the same orientation: only the outer
        // boundary survives.
        assert_eq!(c.classify(&e, &down), EdgeTag::Enter);
        assert_eq!(c.classify(&e, &down), EdgeTag::Ignore);
        assert_eq!(c.classify(&e, &up), EdgeTag::Ignore);
        assert_eq!(c.classify(&e, &up), EdgeTag::Exit);
        c.new_row();
        assert_eq!(c.state(), RowState::Outside);
    }

    #[test]
    fn even_odd_alternates() {
        let (down, _) = down_and_up();
        let e = Edge::new(0, CurveTag::Left);
        let mut c = Classifier::new(AreaOp::EvenOdd);
        assert_eq!(c.classify(&e, &down), EdgeTag::Enter);
        assert_eq!(c.classify(&e, &down), EdgeTag::Exit);
        assert_eq!(c.classify(&e, &down), EdgeTag::Enter);
        assert_eq!(c.state(), RowState::Inside);
    }
}
