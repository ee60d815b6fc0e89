//! Read-only facade over catalogue, router and renderer.
//!
//! All answers are derived from data that never changes after load, so
//! results are memoised per name.  The caches sit behind `Mutex`es so a
//! handler can be shared between threads; when two threads compute the
//! same entry the first insert wins and both return the stored value.

use std::sync::{Mutex, OnceLock, PoisonError};

use log::debug;
use rustc_hash::FxHashMap;

use tc_catalogue::TransportCatalogue;
use tc_render::MapRenderer;
use tc_router::{Dijkstra, RouteInfo, ShortestPath, TransportRouter};

/// Answer to a bus query.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BusStat {
    /// Road length of one full run, metres.
    pub route_length: u64,
    /// Road length over great-circle length; `0.0` when the latter is zero.
    pub curvature: f64,
    pub stop_count: usize,
    pub unique_stop_count: usize,
}

pub struct RequestHandler<'a, S: ShortestPath = Dijkstra> {
    catalogue: &'a TransportCatalogue,
    router:    &'a TransportRouter<S>,
    renderer:  &'a MapRenderer,

    bus_stats:  Mutex<FxHashMap<String, BusStat>>,
    stop_buses: Mutex<FxHashMap<String, Vec<String>>>,
    map:        OnceLock<String>,
}

impl<'a, S: ShortestPath> RequestHandler<'a, S> {
    pub fn new(
        catalogue: &'a TransportCatalogue,
        router: &'a TransportRouter<S>,
        renderer: &'a MapRenderer,
    ) -> Self {
        Self {
            catalogue,
            router,
            renderer,
            bus_stats:  Mutex::default(),
            stop_buses: Mutex::default(),
            map:        OnceLock::new(),
        }
    }

    pub fn catalogue(&self) -> &'a TransportCatalogue {
        self.catalogue
    }

    /// Statistics for the bus called `name`, or `None` if there is no such bus.
    pub fn get_bus_stat(&self, name: &str) -> Option<BusStat> {
        if let Some(stat) = lock(&self.bus_stats).get(name) {
            return Some(*stat);
        }

        let id = self.catalogue.bus_id(name)?;
        let route_length = self.catalogue.route_length(id);
        let geo_length = self.catalogue.geo_length(id);
        let curvature = if geo_length > 0.0 { route_length as f64 / geo_length } else { 0.0 };
        let stat = BusStat {
            route_length,
            curvature,
            stop_count: self.catalogue.stops_on_route(id),
            unique_stop_count: self.catalogue.unique_stops_on_route(id),
        };

        Some(*lock(&self.bus_stats).entry(name.to_owned()).or_insert(stat))
    }

    /// Names of the buses through stop `name` in lexicographic order, or
    /// `None` if there is no such stop.  A known stop without buses yields
    /// an empty list.
    pub fn get_sorted_buses_by_stop(&self, name: &str) -> Option<Vec<String>> {
        if let Some(buses) = lock(&self.stop_buses).get(name) {
            return Some(buses.clone());
        }

        let stop = self.catalogue.stop_id(name)?;
        let mut buses: Vec<String> = self
            .catalogue
            .buses_at_stop(stop)
            .iter()
            .map(|&b| self.catalogue.bus(b).name.clone())
            .collect();
        buses.sort_unstable();

        Some(lock(&self.stop_buses).entry(name.to_owned()).or_insert(buses).clone())
    }

    /// Fastest itinerary between two stops given by name.
    ///
    /// `None` when either stop is unknown or no route connects them.
    pub fn build_route(&self, from: &str, to: &str) -> Option<RouteInfo> {
        let (Some(from_id), Some(to_id)) = (self.catalogue.stop_id(from), self.catalogue.stop_id(to)) else {
            debug!("route {from:?} -> {to:?}: unknown stop");
            return None;
        };
        self.router.route(from_id, to_id)
    }

    /// The SVG map of the whole catalogue.  Rendered once on first use.
    pub fn render_map(&self) -> &str {
        self.map.get_or_init(|| self.renderer.render_svg(self.catalogue))
    }
}

/// Cache contents stay valid even if another thread panicked mid-insert.
fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}
