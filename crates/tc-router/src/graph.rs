//! Routing graph representation and builder.
//!
//! # Data layout
//!
//! One vertex per stop (vertex id = `StopId`).  Outgoing edges use
//! **Compressed Sparse Row (CSR)** format: given a vertex `v`, its edges
//! occupy
//!
//! ```text
//! edge_*[ vertex_out_start[v] .. vertex_out_start[v+1] ]
//! ```
//!
//! All edge arrays (`edge_from`, `edge_to`, `edge_weight`, `edge_info`) are
//! parallel and indexed by `EdgeId`.  `edge_info` carries the wait/ride
//! semantics needed to turn a path back into an itinerary.

use tc_core::{BusId, EdgeId, StopId};

// ── Edge metadata ─────────────────────────────────────────────────────────────

/// Waiting at `stop` before boarding, `time` minutes.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Wait {
    pub stop: StopId,
    pub time: f64,
}

/// Riding `bus` across `stop_count` consecutive hops, `time` minutes.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub bus: BusId,
    pub time: f64,
    pub stop_count: u32,
}

/// What one graph edge means: wait at the boarding stop, then ride.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeInfo {
    pub wait: Wait,
    pub span: Span,
}

impl EdgeInfo {
    /// Edge cost in minutes.
    #[inline]
    pub fn weight(&self) -> f64 {
        self.wait.time + self.span.time
    }
}

// ── TransitGraph ──────────────────────────────────────────────────────────────

/// Directed weighted graph in CSR format.
///
/// Immutable once built.  Do not construct directly; use
/// [`TransitGraphBuilder`] (or deserialize a persisted one).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitGraph {
    /// CSR row pointer.  Length = `vertex_count + 1`.
    pub vertex_out_start: Vec<u32>,

    /// Source vertex of each edge.  Redundant with CSR but needed to walk a
    /// `prev_edge` chain back to the origin.
    pub edge_from: Vec<StopId>,

    /// Destination vertex of each edge.
    pub edge_to: Vec<StopId>,

    /// Cost of each edge in minutes (`wait + ride`).
    pub edge_weight: Vec<f64>,

    /// Wait/ride components of each edge.
    pub edge_info: Vec<EdgeInfo>,
}

impl TransitGraph {
    pub fn vertex_count(&self) -> usize {
        self.vertex_out_start.len().saturating_sub(1)
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn contains_vertex(&self, v: StopId) -> bool {
        v.index() < self.vertex_count()
    }

    /// Iterator over the `EdgeId`s of all outgoing edges from `v`.
    #[inline]
    pub fn out_edges(&self, v: StopId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.vertex_out_start[v.index()] as usize;
        let end   = self.vertex_out_start[v.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    #[inline]
    pub fn out_degree(&self, v: StopId) -> usize {
        let start = self.vertex_out_start[v.index()] as usize;
        let end   = self.vertex_out_start[v.index() + 1] as usize;
        end - start
    }

    #[inline]
    pub fn info(&self, edge: EdgeId) -> &EdgeInfo {
        &self.edge_info[edge.index()]
    }

    /// `true` if the CSR arrays are mutually consistent.  Used to vet graphs
    /// that come from outside (persisted snapshots).
    ///
    /// Besides array lengths and vertex bounds, every edge must lie in the
    /// CSR row of its `edge_from` vertex, board at that vertex, and carry
    /// the weight its metadata implies.
    pub fn is_well_formed(&self) -> bool {
        let n = self.vertex_count();
        let m = self.edge_count();
        let shape_ok = !self.vertex_out_start.is_empty()
            && self.vertex_out_start[0] == 0
            && self.vertex_out_start[n] as usize == m
            && self.vertex_out_start.windows(2).all(|w| w[0] <= w[1])
            && self.edge_from.len() == m
            && self.edge_weight.len() == m
            && self.edge_info.len() == m
            && self.edge_from.iter().chain(&self.edge_to).all(|v| v.index() < n);
        if !shape_ok {
            return false;
        }

        self.vertex_out_start.windows(2).enumerate().all(|(v, row)| {
            (row[0] as usize..row[1] as usize).all(|e| {
                let info = &self.edge_info[e];
                let w = self.edge_weight[e];
                self.edge_from[e].index() == v
                    && info.wait.stop == self.edge_from[e]
                    && w.is_finite()
                    && w >= 0.0
                    && w == info.weight()
            })
        })
    }

    /// Largest bus id referenced by any edge, if there are edges.
    pub fn max_bus(&self) -> Option<BusId> {
        self.edge_info.iter().map(|info| info.span.bus).max()
    }
}

// ── TransitGraphBuilder ───────────────────────────────────────────────────────

/// Accumulate edges in any order, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use tc_core::{BusId, StopId};
/// use tc_router::{EdgeInfo, Span, TransitGraphBuilder, Wait};
///
/// let mut b = TransitGraphBuilder::new(2);
/// b.add_edge(StopId(0), StopId(1), EdgeInfo {
///     wait: Wait { stop: StopId(0), time: 6.0 },
///     span: Span { bus: BusId(0), time: 1.5, stop_count: 1 },
/// });
/// let g = b.build();
/// assert_eq!(g.edge_count(), 1);
/// assert_eq!(g.edge_weight[0], 7.5);
/// ```
pub struct TransitGraphBuilder {
    vertex_count: usize,
    raw_edges:    Vec<RawEdge>,
}

struct RawEdge {
    from: StopId,
    to:   StopId,
    info: EdgeInfo,
}

impl TransitGraphBuilder {
    pub fn new(vertex_count: usize) -> Self {
        Self { vertex_count, raw_edges: Vec::new() }
    }

    /// Add a directed edge `from → to`; its weight is `info.weight()`.
    ///
    /// # Panics
    /// Panics if either endpoint is not below `vertex_count`.
    pub fn add_edge(&mut self, from: StopId, to: StopId, info: EdgeInfo) {
        assert!(
            from.index() < self.vertex_count && to.index() < self.vertex_count,
            "edge {from} -> {to} outside a {}-vertex graph",
            self.vertex_count,
        );
        self.raw_edges.push(RawEdge { from, to, info });
    }

    pub fn vertex_count(&self) -> usize { self.vertex_count }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`TransitGraph`].
    ///
    /// Edges are stably sorted by source, so edges of one vertex keep their
    /// insertion order.
    pub fn build(self) -> TransitGraph {
        let vertex_count = self.vertex_count;

        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_from:   Vec<StopId>   = raw.iter().map(|e| e.from).collect();
        let edge_to:     Vec<StopId>   = raw.iter().map(|e| e.to).collect();
        let edge_weight: Vec<f64>      = raw.iter().map(|e| e.info.weight()).collect();
        let edge_info:   Vec<EdgeInfo> = raw.iter().map(|e| e.info).collect();

        let mut vertex_out_start = vec![0u32; vertex_count + 1];
        for e in &raw {
            vertex_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=vertex_count {
            vertex_out_start[i] += vertex_out_start[i - 1];
        }
        debug_assert_eq!(vertex_out_start[vertex_count] as usize, raw.len());

        TransitGraph {
            vertex_out_start,
            edge_from,
            edge_to,
            edge_weight,
            edge_info,
        }
    }
}
