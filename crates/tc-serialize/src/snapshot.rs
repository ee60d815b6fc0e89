//! Plain-data mirror of everything a query process needs.
//!
//! The catalogue itself holds name indices and reverse indices that are
//! cheap to rebuild, so only its source data (stops, bus stop-id lists,
//! distance entries) is stored.  The routing graph is stored as built.

use serde::{Deserialize, Serialize};

use tc_catalogue::{Stop, TransportCatalogue};
use tc_core::StopId;
use tc_render::RenderSettings;
use tc_router::{RoutingSettings, TransitGraph, TransportRouter};

use crate::{SerializeError, SerializeResult};

/// Bumped whenever the layout of [`Snapshot`] changes.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BusRecord {
    pub name: String,
    pub circular: bool,
    pub stops: Vec<StopId>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogueSnapshot {
    /// In `StopId` order.
    pub stops: Vec<Stop>,
    /// In `BusId` order.
    pub buses: Vec<BusRecord>,
    /// Every stored ordered pair, including backfilled reverse entries.
    pub distances: Vec<(StopId, StopId, u32)>,
}

impl CatalogueSnapshot {
    pub fn capture(catalogue: &TransportCatalogue) -> Self {
        let buses = catalogue
            .buses()
            .iter()
            .map(|b| BusRecord { name: b.name.clone(), circular: b.circular, stops: b.stops.clone() })
            .collect();

        let mut distances: Vec<_> = catalogue.distance_entries().collect();
        // Hash-map iteration order is arbitrary; sort for reproducible bytes.
        distances.sort_unstable();

        Self { stops: catalogue.stops().to_vec(), buses, distances }
    }

    /// Rebuild a catalogue with the same ids, routes and distances.
    pub fn restore(&self) -> SerializeResult<TransportCatalogue> {
        let mut catalogue = TransportCatalogue::new();

        for stop in &self.stops {
            let id = catalogue.add_stop(stop.name.clone(), stop.position)?;
            if id.index() + 1 != catalogue.stop_count() {
                return Err(SerializeError::Corrupt(format!("duplicate stop name {:?}", stop.name)));
            }
        }

        let stop_count = self.stops.len();
        let check = |id: StopId| {
            if id.index() < stop_count {
                Ok(id)
            } else {
                Err(SerializeError::Corrupt(format!("{id} out of range ({stop_count} stops)")))
            }
        };

        for (from, to, meters) in &self.distances {
            catalogue.set_distance(check(*from)?, check(*to)?, *meters);
        }

        for bus in &self.buses {
            let names = bus
                .stops
                .iter()
                .map(|&id| check(id).map(|id| self.stops[id.index()].name.as_str()))
                .collect::<SerializeResult<Vec<&str>>>()?;
            let id = catalogue.add_bus(bus.name.clone(), bus.circular, &names)?;
            if id.index() + 1 != catalogue.bus_count() {
                return Err(SerializeError::Corrupt(format!("duplicate bus name {:?}", bus.name)));
            }
        }

        Ok(catalogue)
    }
}

/// The complete on-disk snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub format_version:   u32,
    pub catalogue:        CatalogueSnapshot,
    pub render_settings:  RenderSettings,
    pub routing_settings: RoutingSettings,
    pub graph:            TransitGraph,
}

impl Snapshot {
    pub fn capture<S>(
        catalogue: &TransportCatalogue,
        render_settings: &RenderSettings,
        router: &TransportRouter<S>,
    ) -> Self
    where
        S: tc_router::ShortestPath,
    {
        Self {
            format_version:   FORMAT_VERSION,
            catalogue:        CatalogueSnapshot::capture(catalogue),
            render_settings:  render_settings.clone(),
            routing_settings: *router.settings(),
            graph:            router.graph().clone(),
        }
    }
}
