// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Sweep edges: a boundary piece tagged with the operand it came from and
// the classification it last received.

use crate::curve::{Curve, Direction};
use crate::error::Result;
use crate::geom::Real;

/// Index of a curve in the sweep's curve table.
pub type CurveIdx = u32;

pub const INVALID: u32 = u32::MAX;

/// Which operand of a binary operation a piece belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CurveTag {
    Left,
    Right,
}

/// Classification of a piece over one sweep row.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EdgeTag {
    Ignore,
    /// Crossing this piece left to right enters the result.
    Enter,
    /// Crossing this piece left to right leaves the result.
    Exit,
}

impl EdgeTag {
    /// Traversal direction that keeps the result's interior on the
    /// conventional side: entering edges run downward.
    pub fn direction(self) -> Direction {
        match self {
            EdgeTag::Exit => Direction::Decreasing,
            _ => Direction::Increasing,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Edge {
    pub curve: CurveIdx,
    pub ctag: CurveTag,
    pub etag: EdgeTag,
    /// Bottom of the last row this edge was retained for.
    pub active_y: Real,
    /// Coincidence group id; 0 means none.
    pub equivalence: u32,
}

impl Edge {
    pub fn new(curve: CurveIdx, ctag: CurveTag) -> Self {
        Edge {
            curve,
            ctag,
            etag: EdgeTag::Ignore,
            active_y: Real::NEG_INFINITY,
            equivalence: 0,
        }
    }

    pub fn record(&mut self, yend: Real, etag: EdgeTag) {
        self.active_y = yend;
        self.etag = etag;
    }

    /// True if this edge was retained with `etag` for a row ending at or
    /// below `y`.
    pub fn is_active_for(&self, y: Real, etag: EdgeTag) -> bool {
        self.etag == etag && self.active_y >= y
    }
}

#[derive(Copy, Clone, Debug)]
struct Memo {
    other: u32,
    result: i32,
    limit: Real,
}

/// Remembers each edge's most recent comparison so that re-sorting an
/// unchanged row does not repeat the intersection search.
///
/// Edges are addressed by their index in the sweep's edge list.
#[derive(Debug, Default)]
pub struct CompareCache {
    memo: Vec<Option<Memo>>,
}

impl CompareCache {
    pub fn new(num_edges: usize) -> Self {
        CompareCache {
            memo: vec![None; num_edges],
        }
    }

    /// Order edge `a` against edge `b` over `yrange`, narrowing
    /// `yrange[1]` as [`Curve::compare_to`] does.
    pub fn compare(
        &mut self,
        edges: &[Edge],
        curves: &[&Curve],
        a: u32,
        b: u32,
        yrange: &mut [Real; 2],
    ) -> Result<i32> {
        if let Some(m) = self.memo[a as usize] {
            if m.other == b && yrange[0] < m.limit {
                if yrange[1] > m.limit {
                    yrange[1] = m.limit;
                }
                return Ok(m.result);
            }
        }
        if let Some(m) = self.memo[b as usize] {
            if m.other == a && yrange[0] < m.limit {
                if yrange[1] > m.limit {
                    yrange[1] = m.limit;
                }
                return Ok(-m.result);
            }
        }
        let ca = curves[edges[a as usize].curve as usize];
        let cb = curves[edges[b as usize].curve as usize];
        let result = ca.compare_to(cb, yrange)?;
        self.memo[a as usize] = Some(Memo {
            other: b,
            result,
            limit: yrange[1],
        });
        Ok(result)
    }
}
