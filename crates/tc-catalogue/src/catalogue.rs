//! The catalogue store: entity arenas, name indices, distances, statistics.
//!
//! # Data layout
//!
//! Stops and buses are kept in append-only `Vec` arenas indexed by
//! [`StopId`] / [`BusId`].  Name lookups go through `FxHashMap<String, Id>`
//! side tables, and the stop → buses reverse index is a `Vec` parallel to
//! the stop arena, maintained at bus-add time:
//!
//! ```text
//! stops[StopId]          buses[BusId]
//! buses_at_stop[StopId] ─▶ { BusId, … }
//! ```
//!
//! # Distances
//!
//! Road distances are directed: `(from, to) → metres`.  Setting a distance
//! always records the forward entry and backfills the reverse entry only
//! when none exists yet, so explicit entries win regardless of load order.

use log::{debug, warn};
use rustc_hash::{FxHashMap, FxHashSet};

use tc_core::{BusId, GeoPoint, StopId};

use crate::domain::{Bus, Stop};
use crate::{CatalogueError, CatalogueResult};

// ── DuplicatePolicy ───────────────────────────────────────────────────────────

/// What happens when a stop or bus name is added twice.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DuplicatePolicy {
    /// Last write wins.  The entity keeps its index; its data is replaced.
    #[default]
    Overwrite,
    /// The second add fails and the catalogue is left untouched.
    Reject,
}

// ── TransportCatalogue ────────────────────────────────────────────────────────

/// Owns every stop and bus plus the inter-stop distance table.
///
/// Built once during load, then treated as immutable: all query methods
/// take `&self`, so a finished catalogue can be shared across threads.
#[derive(Debug, Default)]
pub struct TransportCatalogue {
    policy: DuplicatePolicy,

    stops: Vec<Stop>,
    buses: Vec<Bus>,

    stop_index: FxHashMap<String, StopId>,
    bus_index:  FxHashMap<String, BusId>,

    /// Parallel to `stops`.
    buses_at_stop: Vec<FxHashSet<BusId>>,

    distances: FxHashMap<(StopId, StopId), u32>,
}

impl TransportCatalogue {
    /// Empty catalogue with the default [`DuplicatePolicy::Overwrite`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self { policy, ..Self::default() }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    // ── Loading ───────────────────────────────────────────────────────────

    /// Add a stop and return its id.
    ///
    /// Re-adding an existing name follows the catalogue's [`DuplicatePolicy`].
    pub fn add_stop(&mut self, name: impl Into<String>, position: GeoPoint) -> CatalogueResult<StopId> {
        let name = name.into();

        if let Some(&id) = self.stop_index.get(&name) {
            return match self.policy {
                DuplicatePolicy::Reject => Err(CatalogueError::DuplicateStop(name)),
                DuplicatePolicy::Overwrite => {
                    warn!("stop {name:?} redefined; replacing its coordinates");
                    self.stops[id.index()].position = position;
                    Ok(id)
                }
            };
        }

        let id = StopId::try_from(self.stops.len())
            .map_err(|_| CatalogueError::CapacityExceeded("stops"))?;
        self.stop_index.insert(name.clone(), id);
        self.stops.push(Stop { name, position });
        self.buses_at_stop.push(FxHashSet::default());
        Ok(id)
    }

    /// Add a bus running through `stop_names` in order.
    ///
    /// Every name is resolved before anything is modified, so a bus that
    /// references an unknown stop leaves the catalogue exactly as it was.
    pub fn add_bus<S: AsRef<str>>(
        &mut self,
        name: impl Into<String>,
        circular: bool,
        stop_names: &[S],
    ) -> CatalogueResult<BusId> {
        let name = name.into();

        let stops = stop_names
            .iter()
            .map(|s| {
                let s = s.as_ref();
                self.stop_id(s)
                    .ok_or_else(|| CatalogueError::UnknownStop(s.to_owned()))
            })
            .collect::<CatalogueResult<Vec<StopId>>>()?;

        if let Some(&id) = self.bus_index.get(&name) {
            if self.policy == DuplicatePolicy::Reject {
                return Err(CatalogueError::DuplicateBus(name));
            }
            warn!("bus {name:?} redefined; replacing its route");
            for stop in &self.buses[id.index()].unique_stops {
                self.buses_at_stop[stop.index()].remove(&id);
            }
            let bus = Bus::new(name, circular, stops);
            self.index_bus_stops(id, &bus);
            self.buses[id.index()] = bus;
            return Ok(id);
        }

        let id = BusId::try_from(self.buses.len())
            .map_err(|_| CatalogueError::CapacityExceeded("buses"))?;
        let bus = Bus::new(name.clone(), circular, stops);
        self.index_bus_stops(id, &bus);
        self.bus_index.insert(name, id);
        self.buses.push(bus);
        Ok(id)
    }

    fn index_bus_stops(&mut self, id: BusId, bus: &Bus) {
        for stop in &bus.unique_stops {
            self.buses_at_stop[stop.index()].insert(id);
        }
    }

    /// Record the road distance `from → to`.
    ///
    /// The forward entry is always overwritten; the reverse entry is only
    /// filled in if it is still missing.
    pub fn set_distance(&mut self, from: StopId, to: StopId, meters: u32) {
        self.distances.insert((from, to), meters);
        self.distances.entry((to, from)).or_insert(meters);
    }

    /// Record a batch of `(from_name, to_name, metres)` distances.
    ///
    /// Must be called after the named stops exist.  Stops at the first
    /// unknown name; entries before it stay recorded.
    pub fn set_distances<I, A, B>(&mut self, entries: I) -> CatalogueResult<()>
    where
        I: IntoIterator<Item = (A, B, u32)>,
        A: AsRef<str>,
        B: AsRef<str>,
    {
        for (from, to, meters) in entries {
            let (from, to) = (from.as_ref(), to.as_ref());
            let from_id = self
                .stop_id(from)
                .ok_or_else(|| CatalogueError::UnknownStop(from.to_owned()))?;
            let to_id = self
                .stop_id(to)
                .ok_or_else(|| CatalogueError::UnknownStop(to.to_owned()))?;
            debug!("distance {from:?} -> {to:?}: {meters} m");
            self.set_distance(from_id, to_id, meters);
        }
        Ok(())
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn stop_id(&self, name: &str) -> Option<StopId> {
        self.stop_index.get(name).copied()
    }

    pub fn bus_id(&self, name: &str) -> Option<BusId> {
        self.bus_index.get(name).copied()
    }

    pub fn get_stop(&self, name: &str) -> Option<&Stop> {
        self.stop_id(name).map(|id| self.stop(id))
    }

    pub fn get_bus(&self, name: &str) -> Option<&Bus> {
        self.bus_id(name).map(|id| self.bus(id))
    }

    /// # Panics
    /// Panics if `id` did not come from this catalogue.
    #[inline]
    pub fn stop(&self, id: StopId) -> &Stop {
        &self.stops[id.index()]
    }

    /// # Panics
    /// Panics if `id` did not come from this catalogue.
    #[inline]
    pub fn bus(&self, id: BusId) -> &Bus {
        &self.buses[id.index()]
    }

    /// All stops, indexed by `StopId`.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// All buses, indexed by `BusId`.
    pub fn buses(&self) -> &[Bus] {
        &self.buses
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn bus_count(&self) -> usize {
        self.buses.len()
    }

    pub fn stop_ids(&self) -> impl Iterator<Item = StopId> + '_ {
        (0..self.stops.len() as u32).map(StopId)
    }

    pub fn bus_ids(&self) -> impl Iterator<Item = BusId> + '_ {
        (0..self.buses.len() as u32).map(BusId)
    }

    /// Buses whose route passes through `stop`.
    pub fn buses_at_stop(&self, stop: StopId) -> &FxHashSet<BusId> {
        &self.buses_at_stop[stop.index()]
    }

    // ── Distances ─────────────────────────────────────────────────────────

    /// Road distance `from → to` in metres.
    ///
    /// Falls back to the reverse entry, and to `0` when neither direction is
    /// known.  Missing data is not an error.
    pub fn distance(&self, from: StopId, to: StopId) -> u32 {
        self.distances
            .get(&(from, to))
            .or_else(|| self.distances.get(&(to, from)))
            .copied()
            .unwrap_or(0)
    }

    /// Every stored `(from, to) → metres` entry, including backfilled ones.
    pub fn distance_entries(&self) -> impl Iterator<Item = (StopId, StopId, u32)> + '_ {
        self.distances.iter().map(|(&(from, to), &m)| (from, to, m))
    }

    // ── Route statistics ──────────────────────────────────────────────────

    /// Road length of one full run of `bus`, metres.
    ///
    /// Sums [`distance`](Self::distance) over consecutive pairs of the
    /// effective path, so the return leg of a linear bus uses the reverse
    /// pair order.
    pub fn route_length(&self, bus: BusId) -> u64 {
        self.bus(bus)
            .effective_path()
            .windows(2)
            .map(|w| u64::from(self.distance(w[0], w[1])))
            .sum()
    }

    /// Great-circle length of one full run of `bus`, metres.
    pub fn geo_length(&self, bus: BusId) -> f64 {
        self.bus(bus)
            .effective_path()
            .windows(2)
            .map(|w| self.stop(w[0]).position.distance_m(self.stop(w[1]).position))
            .sum()
    }

    pub fn stops_on_route(&self, bus: BusId) -> usize {
        self.bus(bus).stop_count()
    }

    pub fn unique_stops_on_route(&self, bus: BusId) -> usize {
        self.bus(bus).unique_stop_count()
    }
}
