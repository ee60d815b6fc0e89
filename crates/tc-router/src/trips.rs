//! Catalogue → routing graph.
//!
//! Every bus trip contributes one edge per (boarding, alighting) pair along
//! its direction of travel, so a rider never needs to chain two edges of the
//! same ride.  For each leg the builder keeps a list of "open" boardings and
//! extends all of them by one hop as the leg advances, which keeps the work
//! at O(stops²) per leg.

use log::{debug, info};

use tc_catalogue::TransportCatalogue;
use tc_core::{BusId, StopId};

use crate::graph::{EdgeInfo, Span, TransitGraph, TransitGraphBuilder, Wait};
use crate::router::RoutingSettings;

/// Build the routing graph for `catalogue`.
///
/// Circular buses contribute their loop; linear buses contribute the
/// outbound leg and the return leg separately.  Buses with fewer than two
/// stops contribute nothing.
pub fn build_graph(catalogue: &TransportCatalogue, settings: &RoutingSettings) -> TransitGraph {
    let mut builder = TransitGraphBuilder::new(catalogue.stop_count());

    for bus_id in catalogue.bus_ids() {
        let bus = catalogue.bus(bus_id);
        if bus.stops.len() < 2 {
            continue;
        }

        let leg = bus.forward_leg();
        add_leg(&mut builder, catalogue, settings, bus_id, &leg);
        if !bus.circular {
            let back: Vec<StopId> = bus.stops.iter().rev().copied().collect();
            add_leg(&mut builder, catalogue, settings, bus_id, &back);
        }
        debug!("bus {:?}: graph now has {} edges", bus.name, builder.edge_count());
    }

    let graph = builder.build();
    info!(
        "routing graph built: {} vertices, {} edges",
        graph.vertex_count(),
        graph.edge_count()
    );
    graph
}

/// Ride time of one hop in minutes.
fn hop_time(catalogue: &TransportCatalogue, settings: &RoutingSettings, from: StopId, to: StopId) -> f64 {
    f64::from(catalogue.distance(from, to)) / settings.meters_per_minute()
}

fn add_leg(
    builder:   &mut TransitGraphBuilder,
    catalogue: &TransportCatalogue,
    settings:  &RoutingSettings,
    bus:       BusId,
    leg:       &[StopId],
) {
    // (boarding stop, ride time so far, hops so far)
    let mut open: Vec<(StopId, f64, u32)> = Vec::with_capacity(leg.len());

    for hop in leg.windows(2) {
        let (from, to) = (hop[0], hop[1]);
        let time = hop_time(catalogue, settings, from, to);

        open.push((from, 0.0, 0));
        for (boarding, ride_time, hops) in open.iter_mut() {
            *ride_time += time;
            *hops += 1;
            if *boarding == to {
                continue;
            }
            builder.add_edge(*boarding, to, EdgeInfo {
                wait: Wait { stop: *boarding, time: settings.bus_wait_time },
                span: Span { bus, time: *ride_time, stop_count: *hops },
            });
        }
    }
}
