//! Catalogue entities.
//!
//! Both entity types are created once during load and never move: the
//! catalogue hands out [`StopId`]/[`BusId`] indices instead of references, so
//! other crates (router, renderer, persistence) can hold onto them freely.

use rustc_hash::FxHashSet;

use tc_core::{GeoPoint, StopId};

// ── Stop ──────────────────────────────────────────────────────────────────────

/// A named geographic point served by zero or more buses.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stop {
    pub name: String,
    pub position: GeoPoint,
}

// ── Bus ───────────────────────────────────────────────────────────────────────

/// A named route: an ordered stop sequence plus a circularity flag.
///
/// `stops` keeps insertion order and may contain repeats.  A circular bus
/// travels the sequence once and returns to its first stop; a linear bus
/// travels it forward and then back again.
#[derive(Clone, Debug)]
pub struct Bus {
    pub name: String,
    pub circular: bool,
    pub stops: Vec<StopId>,
    /// Distinct stops of `stops`, for unique-stop counts.
    pub unique_stops: FxHashSet<StopId>,
}

impl Bus {
    pub fn new(name: String, circular: bool, stops: Vec<StopId>) -> Self {
        let unique_stops = stops.iter().copied().collect();
        Self { name, circular, stops, unique_stops }
    }

    /// Number of stop visits along the route.
    ///
    /// `len` for circular buses, `2 * len - 1` for linear ones (the far
    /// terminus is visited once).
    pub fn stop_count(&self) -> usize {
        match (self.circular, self.stops.len()) {
            (_, 0) => 0,
            (true, n) => n,
            (false, n) => 2 * n - 1,
        }
    }

    pub fn unique_stop_count(&self) -> usize {
        self.unique_stops.len()
    }

    /// `true` if the stored sequence already returns to its first stop.
    pub fn is_closed(&self) -> bool {
        self.stops.len() > 1 && self.stops.first() == self.stops.last()
    }

    /// Stops of one trip in the direction of travel.
    ///
    /// For a circular bus this is the full loop: the sequence plus the
    /// closing stop when the sequence does not already end where it started.
    /// For a linear bus it is the outbound leg only; the return leg is the
    /// same slice reversed.
    pub fn forward_leg(&self) -> Vec<StopId> {
        let mut leg = self.stops.clone();
        if self.circular && self.stops.len() > 1 && !self.is_closed() {
            leg.push(self.stops[0]);
        }
        leg
    }

    /// Every stop visited in order over a full run of the route.
    ///
    /// Linear buses go out and come back; the turnaround stop appears once.
    pub fn effective_path(&self) -> Vec<StopId> {
        let mut path = self.forward_leg();
        if !self.circular {
            path.extend(self.stops.iter().rev().skip(1).copied());
        }
        path
    }
}
