// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Stitching retained edge fragments back into closed boundaries.
//
// Each sweep row yields a left-to-right list of retained fragments
// (`CurveLink`s). Fragments are threaded into singly linked chains, and each
// open chain is represented by a pair of `ChainEnd`s: one whose last
// fragment enters the result and one whose last fragment exits it. As rows
// advance, neighbouring ends are joined until every chain closes on itself.
//
// Links and ends live in flat arenas addressed by u32 handles, the same way
// the mesh stores its vertices and half-edges.

use crate::curve::Curve;
use crate::edge::{CurveIdx, EdgeTag, INVALID};
use crate::error::{Error, Result};
use crate::geom::{Point, Real};

pub type LinkIdx = u32;
pub type EndIdx = u32;

/// A retained `[ytop, ybot]` slice of one curve.
#[derive(Clone, Debug)]
pub struct CurveLink {
    pub curve: CurveIdx,
    pub ytop: Real,
    pub ybot: Real,
    pub etag: EdgeTag,
    pub next: LinkIdx,
}

#[derive(Clone, Debug)]
pub struct ChainEnd {
    pub head: LinkIdx,
    pub tail: LinkIdx,
    pub partner: EndIdx,
    pub etag: EdgeTag,
}

/// Arena for one sweep's links and chain ends.
#[derive(Debug, Default)]
pub struct Chains {
    pub links: Vec<CurveLink>,
    pub ends: Vec<ChainEnd>,
}

impl Chains {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a link for `[ystart, yend]` of `curves[curve]`.
    pub fn new_link(
        &mut self,
        curves: &[&Curve],
        curve: CurveIdx,
        ystart: Real,
        yend: Real,
        etag: EdgeTag,
    ) -> Result<LinkIdx> {
        let c = curves[curve as usize];
        if ystart < c.y_top() || yend > c.y_bot() {
            return Err(Error::invariant(format!(
                "link [{ystart} => {yend}] outside its curve [{} => {}]",
                c.y_top(),
                c.y_bot()
            )));
        }
        let idx = self.links.len() as LinkIdx;
        self.links.push(CurveLink {
            curve,
            ytop: ystart,
            ybot: yend,
            etag,
            next: INVALID,
        });
        Ok(idx)
    }

    // ───────────────────────── Links ─────────────────────────────────────

    /// Merge `other` into `link` if both are overlapping or touching slices
    /// of the same curve with the same tag.
    pub fn absorb(&mut self, curves: &[&Curve], link: LinkIdx, other: LinkIdx) -> Result<bool> {
        let o = &self.links[other as usize];
        let (curve, ystart, yend, etag) = (o.curve, o.ytop, o.ybot, o.etag);
        let l = &mut self.links[link as usize];
        if l.curve != curve || l.etag != etag || l.ybot < ystart || l.ytop > yend {
            return Ok(false);
        }
        let c = curves[curve as usize];
        if ystart < c.y_top() || yend > c.y_bot() {
            return Err(Error::invariant(format!(
                "absorbing [{ystart} => {yend}] outside its curve"
            )));
        }
        l.ytop = l.ytop.min(ystart);
        l.ybot = l.ybot.max(yend);
        Ok(true)
    }

    pub fn link_x_top(&self, curves: &[&Curve], link: LinkIdx) -> Real {
        let l = &self.links[link as usize];
        curves[l.curve as usize].x_for_y(l.ytop)
    }

    pub fn link_x_bot(&self, curves: &[&Curve], link: LinkIdx) -> Real {
        let l = &self.links[link as usize];
        curves[l.curve as usize].x_for_y(l.ybot)
    }

    pub fn link_move_to(&self, curves: &[&Curve], link: LinkIdx) -> Curve {
        let l = &self.links[link as usize];
        Curve::Point(Point::new(self.link_x_top(curves, link), l.ytop))
    }

    /// The piece this link stands for, oriented by its tag.
    pub fn link_sub_curve(&self, curves: &[&Curve], link: LinkIdx) -> Curve {
        let l = &self.links[link as usize];
        let c = curves[l.curve as usize];
        let dir = l.etag.direction();
        if l.ytop == c.y_top() && l.ybot == c.y_bot() {
            c.with_direction(dir)
        } else {
            c.sub_curve(l.ytop, l.ybot, dir)
        }
    }

    // ───────────────────────── Chain ends ────────────────────────────────

    /// Open a chain from two fragments of the same row. The first end takes
    /// the first fragment's tag.
    pub fn new_pair(&mut self, open: LinkIdx, close: LinkIdx) -> (EndIdx, EndIdx) {
        let a = self.ends.len() as EndIdx;
        let b = a + 1;
        self.ends.push(ChainEnd {
            head: open,
            tail: open,
            partner: b,
            etag: self.links[open as usize].etag,
        });
        self.ends.push(ChainEnd {
            head: close,
            tail: close,
            partner: a,
            etag: self.links[close as usize].etag,
        });
        (a, b)
    }

    /// x where the next fragment must attach to this end.
    pub fn end_x(&self, curves: &[&Curve], end: EndIdx) -> Real {
        let e = &self.ends[end as usize];
        let link = if e.etag == EdgeTag::Enter { e.tail } else { e.head };
        self.link_x_bot(curves, link)
    }

    /// Extend a chain end by one fragment: entering ends grow at the tail,
    /// exiting ends at the head.
    pub fn add_link(&mut self, end: EndIdx, link: LinkIdx) {
        let e = &self.ends[end as usize];
        if e.etag == EdgeTag::Enter {
            let tail = e.tail;
            self.links[tail as usize].next = link;
            self.ends[end as usize].tail = link;
        } else {
            self.links[link as usize].next = e.head;
            self.ends[end as usize].head = link;
        }
    }

    /// Join two ends of opposite tags.
    ///
    /// If they are the two ends of the same chain the loop closes and its
    /// first link is returned. Otherwise the two chains merge into one whose
    /// ends are the former partners.
    pub fn link_to(&mut self, this: EndIdx, that: EndIdx) -> Result<Option<LinkIdx>> {
        let (tag_this, tag_that) = (self.ends[this as usize].etag, self.ends[that as usize].etag);
        if tag_this == EdgeTag::Ignore || tag_that == EdgeTag::Ignore {
            return Err(Error::invariant("chain end linked more than once"));
        }
        if tag_this == tag_that {
            return Err(Error::invariant("linking chain ends of the same type"));
        }
        let (enter, exit) = if tag_this == EdgeTag::Enter {
            (this, that)
        } else {
            (that, this)
        };
        self.ends[this as usize].etag = EdgeTag::Ignore;
        self.ends[that as usize].etag = EdgeTag::Ignore;

        let (exit_head, exit_tail) = {
            let x = &self.ends[exit as usize];
            (x.head, x.tail)
        };
        let enter_tail = self.ends[enter as usize].tail;
        self.links[enter_tail as usize].next = exit_head;
        self.ends[enter as usize].tail = exit_tail;

        if self.ends[this as usize].partner == that {
            return Ok(Some(self.ends[enter as usize].head));
        }

        let other_enter = self.ends[exit as usize].partner;
        let other_exit = self.ends[enter as usize].partner;
        self.ends[other_enter as usize].partner = other_exit;
        self.ends[other_exit as usize].partner = other_enter;

        let enter_head = self.ends[enter as usize].head;
        let other_enter_head = self.ends[other_enter as usize].head;
        if self.links[enter_head as usize].ytop < self.links[other_enter_head as usize].ytop {
            self.links[exit_tail as usize].next = other_enter_head;
            self.ends[other_enter as usize].head = enter_head;
        } else {
            let other_exit_tail = self.ends[other_exit as usize].tail;
            self.links[other_exit_tail as usize].next = enter_head;
            self.ends[other_exit as usize].tail = exit_tail;
        }
        Ok(None)
    }
}

// Phase 0 (opening) lets equal x obstruct; phase 1 (closing) does not.
fn obstructs(v1: Real, v2: Real, phase: usize) -> bool {
    if phase & 1 == 0 {
        v1 <= v2
    } else {
        v1 < v2
    }
}

/// Merge one row's fragments into the open chains.
///
/// `chains` holds the open ends left to right and is replaced with the
/// ends still open after this row. Closed loops are appended to
/// `subcurves` by their first link.
pub fn resolve_links(
    arena: &mut Chains,
    curves: &[&Curve],
    subcurves: &mut Vec<LinkIdx>,
    chains: &mut Vec<EndIdx>,
    links: &[LinkIdx],
) -> Result<()> {
    if links.len() & 1 != 0 {
        return Err(Error::invariant(format!(
            "odd number of new links ({})",
            links.len()
        )));
    }
    if chains.len() & 1 != 0 {
        return Err(Error::invariant(format!(
            "odd number of chains ({})",
            chains.len()
        )));
    }
    let endlist = std::mem::take(chains);
    let chain_at = |i: usize| endlist.get(i).copied();
    let link_at = |i: usize| links.get(i).copied();

    let (mut curchain, mut curlink) = (0usize, 0usize);
    loop {
        let chain = chain_at(curchain);
        let link = link_at(curlink);
        if chain.is_none() && link.is_none() {
            break;
        }
        let nextchain = chain_at(curchain + 1);
        let nextlink = link_at(curlink + 1);

        let mut connect_chains = link.is_none();
        let mut connect_links = chain.is_none();
        if let (Some(c), Some(l)) = (chain, link) {
            let cx = arena.end_x(curves, c);
            let lx = arena.link_x_top(curves, l);
            connect_chains = curchain & 1 == 0
                && nextchain.is_some_and(|n| arena.end_x(curves, n) == cx);
            connect_links = curlink & 1 == 0
                && nextlink.is_some_and(|n| arena.link_x_top(curves, n) == lx);
            if !connect_chains && !connect_links {
                connect_chains = cx < lx
                    && nextchain.is_some_and(|n| obstructs(arena.end_x(curves, n), lx, curchain));
                connect_links = lx < cx
                    && nextlink.is_some_and(|n| obstructs(arena.link_x_top(curves, n), cx, curlink));
            }
        }

        if connect_chains {
            let (Some(c), Some(n)) = (chain, nextchain) else {
                return Err(Error::invariant("unpaired chain end"));
            };
            if let Some(closed) = arena.link_to(c, n)? {
                subcurves.push(closed);
            }
            curchain += 2;
        }
        if connect_links {
            let (Some(l), Some(n)) = (link, nextlink) else {
                return Err(Error::invariant("unpaired link"));
            };
            let (open, close) = arena.new_pair(l, n);
            chains.push(open);
            chains.push(close);
            curlink += 2;
        }
        if !connect_chains && !connect_links {
            let (Some(c), Some(l)) = (chain, link) else {
                return Err(Error::invariant("chain and link lists out of step"));
            };
            arena.add_link(c, l);
            chains.push(c);
            curchain += 1;
            curlink += 1;
        }
    }
    if chains.len() & 1 != 0 {
        tracing::warn!(open = chains.len(), "odd number of open chains after row");
    }
    Ok(())
}

/// Close every open chain by joining consecutive ends pairwise.
pub fn finalize_sub_curves(
    arena: &mut Chains,
    subcurves: &mut Vec<LinkIdx>,
    chains: &mut Vec<EndIdx>,
) -> Result<()> {
    if chains.is_empty() {
        return Ok(());
    }
    if chains.len() & 1 != 0 {
        return Err(Error::invariant(format!(
            "odd number of chains ({})",
            chains.len()
        )));
    }
    for pair in chains.chunks_exact(2) {
        if let Some(closed) = arena.link_to(pair[0], pair[1])? {
            subcurves.push(closed);
        }
    }
    chains.clear();
    Ok(())
}
