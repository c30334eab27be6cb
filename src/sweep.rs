// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// The sweep line that combines two sets of monotonic pieces.
//
// Edges are sorted by their top point and swept downward in rows. A row is
// a y interval over which the left-to-right order of the active edges does
// not change: it ends at the next edge top, the first edge bottom, or the
// first crossing found while sorting. Within a row each edge is classified
// by the operator; the retained slices are handed to the chain stitcher,
// which reassembles them into closed boundaries.

use tracing::{debug, instrument, trace, warn};

use crate::area_op::{AreaOp, Classifier, RowState};
use crate::chain::{finalize_sub_curves, resolve_links, Chains};
use crate::curve::Curve;
use crate::edge::{CompareCache, CurveIdx, CurveTag, Edge, EdgeTag, INVALID};
use crate::error::{Error, Result};
use crate::geom::Real;

/// Combine `left` and `right` under `op`, returning the boundary of the
/// result as closed loops, each introduced by a move-to point.
///
/// The winding ops read only `left`; pass an empty `right`.
#[instrument(level = "debug", skip_all, fields(op = ?op, left = left.len(), right = right.len()))]
pub fn calculate(op: AreaOp, left: &[Curve], right: &[Curve]) -> Result<Vec<Curve>> {
    let mut curves: Vec<&Curve> = Vec::with_capacity(left.len() + right.len());
    let mut edges = Vec::with_capacity(left.len() + right.len());
    for (tag, operand) in [(CurveTag::Left, left), (CurveTag::Right, right)] {
        for c in operand.iter().filter(|c| c.order() > 0) {
            edges.push(Edge::new(curves.len() as CurveIdx, tag));
            curves.push(c);
        }
    }
    debug!(edges = edges.len(), "sweeping");
    let out = prune_edges(op, &curves, &mut edges)?;
    debug!(curves = out.len(), "sweep done");
    Ok(out)
}

fn edge_curve<'a>(curves: &[&'a Curve], edges: &[Edge], e: u32) -> &'a Curve {
    curves[edges[e as usize].curve as usize]
}

fn prune_edges(op: AreaOp, curves: &[&Curve], edges: &mut [Edge]) -> Result<Vec<Curve>> {
    let numedges = edges.len();
    if numedges < 2 {
        return Ok(Vec::new());
    }
    let mut edgelist: Vec<u32> = (0..numedges as u32).collect();
    edgelist.sort_by(|&a, &b| {
        let (ca, cb) = (edge_curve(curves, edges, a), edge_curve(curves, edges, b));
        ca.y_top()
            .total_cmp(&cb.y_top())
            .then(ca.x_top().total_cmp(&cb.x_top()))
    });

    let mut classifier = Classifier::new(op);
    let mut cache = CompareCache::new(numedges);
    let mut arena = Chains::new();
    let mut subcurves = Vec::new();
    let mut chains = Vec::new();
    let mut links = Vec::new();
    let mut nexteq = 1u32;
    let mut yrange: [Real; 2] = [0.0, 0.0];
    let (mut left, mut right) = (0usize, 0usize);
    let mut rows = 0usize;

    while left < numedges {
        let mut y = yrange[0];

        // Retire edges that end at or above the row top.
        let mut next = right;
        for cur in (left..right).rev() {
            let e = edgelist[cur];
            if edge_curve(curves, edges, e).y_bot() > y {
                next -= 1;
                edgelist[next] = e;
            }
        }
        left = next;

        // Nothing active: jump to the next edge top, closing whatever the
        // gap separates.
        if left >= right {
            if right >= numedges {
                break;
            }
            y = edge_curve(curves, edges, edgelist[right]).y_top();
            if y > yrange[0] {
                finalize_sub_curves(&mut arena, &mut subcurves, &mut chains)?;
            }
            yrange[0] = y;
        }

        while right < numedges && edge_curve(curves, edges, edgelist[right]).y_top() <= y {
            right += 1;
        }

        yrange[1] = edge_curve(curves, edges, edgelist[left]).y_bot();
        if right < numedges {
            let ynext = edge_curve(curves, edges, edgelist[right]).y_top();
            if yrange[1] > ynext {
                yrange[1] = ynext;
            }
        }

        // Insertion sort by x; comparisons lower yrange[1] to the first
        // crossing and group coincident edges.
        for cur in left..right {
            let e = edgelist[cur];
            edges[e as usize].equivalence = 0;
            let mut next = cur;
            while next > left {
                let prev = edgelist[next - 1];
                let ordering = cache.compare(edges, curves, e, prev, &mut yrange)?;
                if yrange[1] <= yrange[0] {
                    return Err(Error::invariant(format!(
                        "backstepping to {} from {}",
                        yrange[1], yrange[0]
                    )));
                }
                if ordering >= 0 {
                    if ordering == 0 {
                        let mut eq = edges[prev as usize].equivalence;
                        if eq == 0 {
                            eq = nexteq;
                            nexteq += 1;
                            edges[prev as usize].equivalence = eq;
                        }
                        edges[e as usize].equivalence = eq;
                    }
                    break;
                }
                edgelist[next] = prev;
                next -= 1;
            }
            edgelist[next] = e;
        }
        trace!(y0 = yrange[0], y1 = yrange[1], active = right - left, "row");

        classifier.new_row();
        let (ystart, yend) = (yrange[0], yrange[1]);
        let mut cur = left;
        while cur < right {
            let mut e = edgelist[cur];
            let eq = edges[e as usize].equivalence;
            let etag = if eq != 0 {
                // A coincident group flips the state at most once; keep a
                // single representative, preferring one already carrying
                // the same tag so that its link extends.
                let origstate = classifier.state();
                let etag = if origstate == RowState::Inside {
                    EdgeTag::Exit
                } else {
                    EdgeTag::Enter
                };
                let mut active_match = None;
                let mut longest_match = e;
                let mut furthest_y = yend;
                loop {
                    let ed = edgelist[cur];
                    let curve = curves[edges[ed as usize].curve as usize];
                    classifier.classify(&edges[ed as usize], curve);
                    if active_match.is_none() && edges[ed as usize].is_active_for(ystart, etag) {
                        active_match = Some(ed);
                    }
                    if curve.y_bot() > furthest_y {
                        longest_match = ed;
                        furthest_y = curve.y_bot();
                    }
                    cur += 1;
                    if cur >= right || edges[edgelist[cur] as usize].equivalence != eq {
                        break;
                    }
                }
                if classifier.state() == origstate {
                    EdgeTag::Ignore
                } else {
                    e = active_match.unwrap_or(longest_match);
                    etag
                }
            } else {
                let curve = curves[edges[e as usize].curve as usize];
                cur += 1;
                classifier.classify(&edges[e as usize], curve)
            };
            if etag != EdgeTag::Ignore {
                let edge = &mut edges[e as usize];
                edge.record(yend, etag);
                links.push(arena.new_link(curves, edge.curve, ystart, yend, etag)?);
            }
        }
        if classifier.state() != RowState::Outside {
            warn!(y0 = ystart, y1 = yend, "still inside at end of active edge list");
        }
        resolve_links(&mut arena, curves, &mut subcurves, &mut chains, &links)?;
        links.clear();
        yrange[0] = yend;
        rows += 1;
    }
    finalize_sub_curves(&mut arena, &mut subcurves, &mut chains)?;
    debug!(rows, loops = subcurves.len(), "rows swept");

    let mut out = Vec::new();
    for &head in &subcurves {
        out.push(arena.link_move_to(curves, head));
        let mut link = head;
        let mut nextlink = arena.links[head as usize].next;
        while nextlink != INVALID {
            if !arena.absorb(curves, link, nextlink)? {
                out.push(arena.link_sub_curve(curves, link));
                link = nextlink;
            }
            nextlink = arena.links[nextlink as usize].next;
        }
        out.push(arena.link_sub_curve(curves, link));
    }
    Ok(out)
}
