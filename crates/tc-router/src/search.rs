//! Shortest-path trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! [`TransportRouter`](crate::TransportRouter) calls the search engine via
//! the [`ShortestPath`] trait, so a different engine (A*, precomputed
//! all-pairs tables) can be swapped in without touching graph construction
//! or itinerary reconstruction.
//!
//! # Cost units
//!
//! Costs are `f64` minutes.  Edge weights are never negative (wait and ride
//! times are both ≥ 0), which is all Dijkstra needs.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use tc_core::{EdgeId, StopId};

use crate::graph::TransitGraph;
use crate::{RouterError, RouterResult};

// ── Path ──────────────────────────────────────────────────────────────────────

/// The result of a search: edges to traverse in order plus their total cost.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub edges: Vec<EdgeId>,
    /// Sum of edge weights, minutes.
    pub total_weight: f64,
}

impl Path {
    /// `true` if the source and destination are the same vertex.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }
}

// ── ShortestPath trait ────────────────────────────────────────────────────────

/// Pluggable shortest-path engine over a [`TransitGraph`].
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`: a built router is shared
/// read-only between request handlers.
pub trait ShortestPath: Send + Sync {
    /// Cheapest path from `from` to `to`.
    ///
    /// `from == to` yields an empty path, not an error.
    fn shortest_path(
        &self,
        graph: &TransitGraph,
        from: StopId,
        to: StopId,
    ) -> RouterResult<Path>;
}

// ── Dijkstra ──────────────────────────────────────────────────────────────────

/// Standard Dijkstra's algorithm over the CSR graph.
///
/// Ties on cost are broken by the lower vertex id, so results are
/// deterministic for a given graph.
#[derive(Copy, Clone, Debug, Default)]
pub struct Dijkstra;

impl ShortestPath for Dijkstra {
    fn shortest_path(
        &self,
        graph: &TransitGraph,
        from: StopId,
        to: StopId,
    ) -> RouterResult<Path> {
        dijkstra(graph, from, to)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Total order over non-NaN costs so they can live in a `BinaryHeap`.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Cost(f64);

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

fn dijkstra(graph: &TransitGraph, from: StopId, to: StopId) -> RouterResult<Path> {
    for v in [from, to] {
        if !graph.contains_vertex(v) {
            return Err(RouterError::VertexNotFound(v));
        }
    }

    if from == to {
        return Ok(Path { edges: vec![], total_weight: 0.0 });
    }

    let n = graph.vertex_count();
    // dist[v] = best known cost to reach v.
    let mut dist      = vec![f64::INFINITY; n];
    // prev_edge[v] = EdgeId that reached v; EdgeId::INVALID for unreached vertices.
    let mut prev_edge = vec![EdgeId::INVALID; n];

    dist[from.index()] = 0.0;

    // Min-heap: (cost, vertex).  Reverse makes BinaryHeap (max) behave as min-heap.
    let mut heap: BinaryHeap<Reverse<(Cost, StopId)>> = BinaryHeap::new();
    heap.push(Reverse((Cost(0.0), from)));

    while let Some(Reverse((Cost(cost), vertex))) = heap.pop() {
        if vertex == to {
            return Ok(reconstruct(graph, &prev_edge, from, to, cost));
        }

        // Skip stale heap entries.
        if cost > dist[vertex.index()] {
            continue;
        }

        for edge in graph.out_edges(vertex) {
            let neighbor = graph.edge_to[edge.index()];
            let new_cost = cost + graph.edge_weight[edge.index()];

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_edge[neighbor.index()] = edge;
                heap.push(Reverse((Cost(new_cost), neighbor)));
            }
        }
    }

    Err(RouterError::NoRoute { from, to })
}

fn reconstruct(
    graph: &TransitGraph,
    prev_edge: &[EdgeId],
    from: StopId,
    to: StopId,
    total_weight: f64,
) -> Path {
    let mut edges = Vec::new();
    let mut cur = to;
    while cur != from {
        let e = prev_edge[cur.index()];
        debug_assert!(e.is_valid(), "reached vertex without a predecessor");
        edges.push(e);
        cur = graph.edge_from[e.index()];
    }
    edges.reverse();
    Path { edges, total_weight }
}
