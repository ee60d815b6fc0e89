//! The two process modes.
//!
//! `make_base` turns the base requests into a snapshot file;
//! `process_requests` answers stat requests against a snapshot file.

use log::info;

use tc_catalogue::DuplicatePolicy;
use tc_render::{MapRenderer, RenderSettings};
use tc_router::TransportRouter;

use crate::handler::RequestHandler;
use crate::json::{answer_all, load_catalogue, InputDocument, Response, SerializationSettings};
use crate::{RequestError, RequestResult};

fn serialization_settings(doc: &InputDocument) -> RequestResult<&SerializationSettings> {
    doc.serialization_settings
        .as_ref()
        .ok_or(RequestError::MissingSection("serialization_settings"))
}

/// Load the catalogue, build the router and write the snapshot file.
///
/// Missing `routing_settings` / `render_settings` fall back to defaults.
pub fn make_base(doc: &InputDocument, policy: DuplicatePolicy) -> RequestResult<()> {
    let target = serialization_settings(doc)?;

    let catalogue = load_catalogue(&doc.base_requests, policy)?;
    let routing = doc.routing_settings.unwrap_or_default();
    let render: RenderSettings = doc.render_settings.clone().map(Into::into).unwrap_or_default();
    render.validate()?;

    let router = TransportRouter::build(&catalogue, routing)?;
    tc_serialize::save_to_path(&target.file, &catalogue, &render, &router)?;
    info!("base written to {}", target.file.display());
    Ok(())
}

/// Load the snapshot named in `doc` and answer its stat requests.
pub fn process_requests(doc: &InputDocument) -> RequestResult<Vec<Response>> {
    let source = serialization_settings(doc)?;
    let restored = tc_serialize::load_from_path(&source.file)?;
    let renderer = MapRenderer::new(restored.render_settings)?;

    let handler = RequestHandler::new(&restored.catalogue, &restored.router, &renderer);
    let responses = answer_all(&handler, &doc.stat_requests);
    info!("answered {} requests", responses.len());
    Ok(responses)
}
