//! The transport router: settings, graph and search engine in one value.
//!
//! A router is built once per catalogue snapshot and only read afterwards,
//! so it is `Send + Sync` and can answer queries from many threads.

use log::debug;

use tc_catalogue::TransportCatalogue;
use tc_core::StopId;

use crate::graph::{Span, TransitGraph, Wait};
use crate::search::{Dijkstra, ShortestPath};
use crate::trips::build_graph;
use crate::{RouterError, RouterResult};

// ── RoutingSettings ───────────────────────────────────────────────────────────

/// Wait time and bus speed used to weigh graph edges.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutingSettings {
    /// Minutes spent waiting at a stop before every boarding.
    pub bus_wait_time: f64,
    /// Bus speed in km/h.
    pub bus_velocity: f64,
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self { bus_wait_time: 6.0, bus_velocity: 40.0 }
    }
}

impl RoutingSettings {
    pub fn new(bus_wait_time: f64, bus_velocity: f64) -> Self {
        Self { bus_wait_time, bus_velocity }
    }

    /// Bus speed converted to metres per minute.
    #[inline]
    pub fn meters_per_minute(&self) -> f64 {
        self.bus_velocity * 1000.0 / 60.0
    }

    pub fn validate(&self) -> RouterResult<()> {
        if !(self.bus_velocity.is_finite() && self.bus_velocity > 0.0) {
            return Err(RouterError::InvalidSettings(format!(
                "bus_velocity must be a positive number, got {}",
                self.bus_velocity
            )));
        }
        if !(self.bus_wait_time.is_finite() && self.bus_wait_time >= 0.0) {
            return Err(RouterError::InvalidSettings(format!(
                "bus_wait_time must be a non-negative number, got {}",
                self.bus_wait_time
            )));
        }
        Ok(())
    }
}

// ── RouteInfo ─────────────────────────────────────────────────────────────────

/// One step of an itinerary.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RouteItem {
    Wait(Wait),
    Span(Span),
}

impl RouteItem {
    pub fn time(&self) -> f64 {
        match self {
            RouteItem::Wait(w) => w.time,
            RouteItem::Span(s) => s.time,
        }
    }
}

/// A found route: total minutes plus the ordered wait/ride steps.
///
/// Every traversed edge contributes exactly one `Wait` followed by one
/// `Span`; consecutive rides on the same bus are not merged.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteInfo {
    pub total_time: f64,
    pub items: Vec<RouteItem>,
}

// ── TransportRouter ───────────────────────────────────────────────────────────

/// Routing graph plus the search engine used to query it.
#[derive(Debug)]
pub struct TransportRouter<S: ShortestPath = Dijkstra> {
    settings: RoutingSettings,
    graph:    TransitGraph,
    search:   S,
}

impl TransportRouter<Dijkstra> {
    /// Validate `settings` and build the graph for `catalogue`.
    pub fn build(catalogue: &TransportCatalogue, settings: RoutingSettings) -> RouterResult<Self> {
        settings.validate()?;
        let graph = build_graph(catalogue, &settings);
        Ok(Self { settings, graph, search: Dijkstra })
    }

    /// Reassemble a router from a previously built graph (e.g. a loaded
    /// snapshot) without rebuilding it.
    pub fn from_parts(settings: RoutingSettings, graph: TransitGraph) -> RouterResult<Self> {
        settings.validate()?;
        if !graph.is_well_formed() {
            return Err(RouterError::MalformedGraph);
        }
        Ok(Self { settings, graph, search: Dijkstra })
    }
}

impl<S: ShortestPath> TransportRouter<S> {
    /// Swap the search engine, keeping settings and graph.
    pub fn with_search<T: ShortestPath>(self, search: T) -> TransportRouter<T> {
        TransportRouter { settings: self.settings, graph: self.graph, search }
    }

    pub fn settings(&self) -> &RoutingSettings {
        &self.settings
    }

    pub fn graph(&self) -> &TransitGraph {
        &self.graph
    }

    /// Fastest itinerary from `from` to `to`.
    ///
    /// Returns `None` when no path exists or either stop is unknown to the
    /// graph.  `from == to` yields a zero-time route with no items.
    pub fn route(&self, from: StopId, to: StopId) -> Option<RouteInfo> {
        let path = match self.search.shortest_path(&self.graph, from, to) {
            Ok(path) => path,
            Err(e) => {
                debug!("route {from} -> {to}: {e}");
                return None;
            }
        };

        let items = path
            .edges
            .iter()
            .flat_map(|&e| {
                let info = self.graph.info(e);
                [RouteItem::Wait(info.wait), RouteItem::Span(info.span)]
            })
            .collect();

        Some(RouteInfo { total_time: path.total_weight, items })
    }
}
