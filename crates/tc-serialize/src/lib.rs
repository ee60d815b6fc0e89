//! `tc-serialize` — binary snapshots for the two-phase workflow.
//!
//! `make_base` builds the catalogue and routing graph once and saves them;
//! `process_requests` loads the snapshot and answers queries without
//! re-reading the base requests or rebuilding the graph.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`snapshot`] | `Snapshot`, `CatalogueSnapshot`, `BusRecord`              |
//! | [`error`]    | `SerializeError`, `SerializeResult<T>`                    |
//!
//! The encoding is `bincode`; the layout carries a format version that is
//! checked on load.

pub mod error;
pub mod snapshot;


use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::info;

use tc_catalogue::TransportCatalogue;
use tc_render::RenderSettings;
use tc_router::{ShortestPath, TransportRouter};

pub use error::{SerializeError, SerializeResult};
pub use snapshot::{BusRecord, CatalogueSnapshot, Snapshot, FORMAT_VERSION};

/// Everything restored from a snapshot, ready to serve queries.
#[derive(Debug)]
pub struct Restored {
    pub catalogue:       TransportCatalogue,
    pub render_settings: RenderSettings,
    pub router:          TransportRouter,
}

/// Encode a snapshot of `catalogue`, `render_settings` and `router` into `writer`.
pub fn save<W, S>(
    writer: W,
    catalogue: &TransportCatalogue,
    render_settings: &RenderSettings,
    router: &TransportRouter<S>,
) -> SerializeResult<()>
where
    W: Write,
    S: ShortestPath,
{
    let snapshot = Snapshot::capture(catalogue, render_settings, router);
    bincode::serialize_into(writer, &snapshot)?;
    info!(
        "snapshot saved: {} stops, {} buses, {} graph edges",
        snapshot.catalogue.stops.len(),
        snapshot.catalogue.buses.len(),
        snapshot.graph.edge_count()
    );
    Ok(())
}

/// Decode a snapshot from `reader` and rebuild catalogue and router.
///
/// The router reuses the stored graph as-is.
pub fn load<R: Read>(reader: R) -> SerializeResult<Restored> {
    let snapshot: Snapshot = bincode::deserialize_from(reader)?;
    if snapshot.format_version != FORMAT_VERSION {
        return Err(SerializeError::UnsupportedVersion {
            found:    snapshot.format_version,
            expected: FORMAT_VERSION,
        });
    }

    let catalogue = snapshot.catalogue.restore()?;
    if snapshot.graph.vertex_count() != catalogue.stop_count() {
        return Err(SerializeError::Corrupt(format!(
            "graph has {} vertices but the catalogue has {} stops",
            snapshot.graph.vertex_count(),
            catalogue.stop_count()
        )));
    }
    // Boarding stops are tied to `edge_from`, so this also bounds every `wait.stop`.
    if !snapshot.graph.is_well_formed() {
        return Err(SerializeError::Corrupt("inconsistent routing graph".to_owned()));
    }
    if let Some(bus) = snapshot.graph.max_bus() {
        if bus.index() >= catalogue.bus_count() {
            return Err(SerializeError::Corrupt(format!(
                "graph edge rides {bus} but the catalogue has {} buses",
                catalogue.bus_count()
            )));
        }
    }
    snapshot.render_settings.validate()?;
    let router = TransportRouter::from_parts(snapshot.routing_settings, snapshot.graph)?;

    info!(
        "snapshot loaded: {} stops, {} buses, {} graph edges",
        catalogue.stop_count(),
        catalogue.bus_count(),
        router.graph().edge_count()
    );
    Ok(Restored { catalogue, render_settings: snapshot.render_settings, router })
}

/// [`save`] to a file, creating or truncating it.
pub fn save_to_path<S: ShortestPath>(
    path: &Path,
    catalogue: &TransportCatalogue,
    render_settings: &RenderSettings,
    router: &TransportRouter<S>,
) -> SerializeResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    save(&mut writer, catalogue, render_settings, router)?;
    writer.flush()?;
    Ok(())
}

/// [`load`] from a file.
pub fn load_from_path(path: &Path) -> SerializeResult<Restored> {
    load(BufReader::new(File::open(path)?))
}
