//! JSON query protocol.
//!
//! # Input document
//!
//! ```json
//! {
//!   "serialization_settings": { "file": "transport.db" },
//!   "routing_settings": { "bus_wait_time": 6, "bus_velocity": 40 },
//!   "render_settings": { "width": 1200, "height": 1200, "...": "..." },
//!   "base_requests": [
//!     { "type": "Stop", "name": "A", "latitude": 55.6, "longitude": 37.2,
//!       "road_distances": { "B": 3900 } },
//!     { "type": "Bus", "name": "14", "stops": ["A", "B", "A"], "is_roundtrip": true }
//!   ],
//!   "stat_requests": [
//!     { "id": 1, "type": "Bus", "name": "14" },
//!     { "id": 4, "type": "Route", "from": "A", "to": "B" }
//!   ]
//! }
//! ```
//!
//! Every section is optional at parse time; each process mode checks for
//! the sections it needs.
//!
//! # Colours
//!
//! A colour is a name (`"green"`), `[r, g, b]` or `[r, g, b, opacity]`.

use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::PathBuf;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use tc_catalogue::{DuplicatePolicy, TransportCatalogue};
use tc_core::GeoPoint;
use tc_render::{Color, Point, RenderSettings, Rgb, Rgba};
use tc_router::{RouteInfo, RouteItem, RoutingSettings, ShortestPath};

use crate::handler::RequestHandler;
use crate::RequestResult;

// ── Input ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, Deserialize)]
pub struct InputDocument {
    pub serialization_settings: Option<SerializationSettings>,
    pub routing_settings: Option<RoutingSettings>,
    pub render_settings: Option<JsonRenderSettings>,
    #[serde(default)]
    pub base_requests: Vec<BaseRequest>,
    #[serde(default)]
    pub stat_requests: Vec<StatRequest>,
}

impl InputDocument {
    pub fn from_reader<R: Read>(reader: R) -> RequestResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}

/// Where the binary snapshot lives.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SerializationSettings {
    pub file: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum JsonColor {
    Named(String),
    Rgb(u8, u8, u8),
    Rgba(u8, u8, u8, f64),
}

impl From<JsonColor> for Color {
    fn from(c: JsonColor) -> Self {
        match c {
            JsonColor::Named(name) => Color::Named(name),
            JsonColor::Rgb(red, green, blue) => Color::Rgb(Rgb { red, green, blue }),
            JsonColor::Rgba(red, green, blue, opacity) => Color::Rgba(Rgba { red, green, blue, opacity }),
        }
    }
}

/// Render settings as written in the input document.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct JsonRenderSettings {
    pub width:   f64,
    pub height:  f64,
    pub padding: f64,

    pub line_width:  f64,
    pub stop_radius: f64,

    pub bus_label_font_size:  u32,
    pub bus_label_offset:     [f64; 2],
    pub stop_label_font_size: u32,
    pub stop_label_offset:    [f64; 2],

    pub underlayer_color: JsonColor,
    pub underlayer_width: f64,

    pub color_palette: Vec<JsonColor>,
}

impl From<JsonRenderSettings> for RenderSettings {
    fn from(s: JsonRenderSettings) -> Self {
        let [bdx, bdy] = s.bus_label_offset;
        let [sdx, sdy] = s.stop_label_offset;
        RenderSettings {
            width:   s.width,
            height:  s.height,
            padding: s.padding,

            line_width:  s.line_width,
            stop_radius: s.stop_radius,

            bus_label_font_size:  s.bus_label_font_size,
            bus_label_offset:     Point::new(bdx, bdy),
            stop_label_font_size: s.stop_label_font_size,
            stop_label_offset:    Point::new(sdx, sdy),

            underlayer_color: s.underlayer_color.into(),
            underlayer_width: s.underlayer_width,

            color_palette: s.color_palette.into_iter().map(Color::from).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum BaseRequest {
    Stop {
        name: String,
        latitude: f64,
        longitude: f64,
        #[serde(default)]
        road_distances: BTreeMap<String, u32>,
    },
    Bus {
        name: String,
        stops: Vec<String>,
        is_roundtrip: bool,
    },
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum StatRequest {
    Bus { id: i64, name: String },
    Stop { id: i64, name: String },
    Map { id: i64 },
    Route { id: i64, from: String, to: String },
}

impl StatRequest {
    pub fn id(&self) -> i64 {
        match self {
            StatRequest::Bus { id, .. }
            | StatRequest::Stop { id, .. }
            | StatRequest::Map { id }
            | StatRequest::Route { id, .. } => *id,
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Build a catalogue from base requests.
///
/// Requests are applied in three passes (stops, then road distances, then
/// buses) so that any request may refer to a stop declared later in the
/// array.
pub fn load_catalogue(requests: &[BaseRequest], policy: DuplicatePolicy) -> RequestResult<TransportCatalogue> {
    let mut catalogue = TransportCatalogue::with_policy(policy);

    for req in requests {
        if let BaseRequest::Stop { name, latitude, longitude, .. } = req {
            catalogue.add_stop(name.as_str(), GeoPoint::new(*latitude, *longitude))?;
        }
    }

    for req in requests {
        if let BaseRequest::Stop { name, road_distances, .. } = req {
            catalogue.set_distances(
                road_distances.iter().map(|(to, &meters)| (name.as_str(), to.as_str(), meters)),
            )?;
        }
    }

    for req in requests {
        if let BaseRequest::Bus { name, stops, is_roundtrip } = req {
            catalogue.add_bus(name.as_str(), *is_roundtrip, stops.as_slice())?;
        }
    }

    info!(
        "catalogue loaded: {} stops, {} buses",
        catalogue.stop_count(),
        catalogue.bus_count()
    );
    Ok(catalogue)
}

// ── Output ────────────────────────────────────────────────────────────────────

const NOT_FOUND: &str = "not found";

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum JsonRouteItem {
    Wait { stop_name: String, time: f64 },
    Bus { bus: String, span_count: u32, time: f64 },
}

/// One answer.  Serialised as a flat object without a type tag.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Bus {
        request_id: i64,
        curvature: f64,
        route_length: u64,
        stop_count: usize,
        unique_stop_count: usize,
    },
    Stop {
        request_id: i64,
        buses: Vec<String>,
    },
    Map {
        request_id: i64,
        map: String,
    },
    Route {
        request_id: i64,
        total_time: f64,
        items: Vec<JsonRouteItem>,
    },
    NotFound {
        request_id: i64,
        error_message: String,
    },
}

impl Response {
    fn not_found(request_id: i64) -> Self {
        Response::NotFound { request_id, error_message: NOT_FOUND.to_owned() }
    }
}

fn route_response<S: ShortestPath>(handler: &RequestHandler<'_, S>, request_id: i64, route: RouteInfo) -> Response {
    let catalogue = handler.catalogue();
    let items = route
        .items
        .into_iter()
        .map(|item| match item {
            RouteItem::Wait(w) => JsonRouteItem::Wait {
                stop_name: catalogue.stop(w.stop).name.clone(),
                time:      w.time,
            },
            RouteItem::Span(s) => JsonRouteItem::Bus {
                bus:        catalogue.bus(s.bus).name.clone(),
                span_count: s.stop_count,
                time:       s.time,
            },
        })
        .collect();
    Response::Route { request_id, total_time: route.total_time, items }
}

/// Answer a single stat request.
pub fn answer<S: ShortestPath>(handler: &RequestHandler<'_, S>, request: &StatRequest) -> Response {
    let request_id = request.id();
    debug!("stat request {request_id}: {request:?}");

    let response = match request {
        StatRequest::Bus { name, .. } => handler.get_bus_stat(name).map(|stat| Response::Bus {
            request_id,
            curvature: stat.curvature,
            route_length: stat.route_length,
            stop_count: stat.stop_count,
            unique_stop_count: stat.unique_stop_count,
        }),
        StatRequest::Stop { name, .. } => handler
            .get_sorted_buses_by_stop(name)
            .map(|buses| Response::Stop { request_id, buses }),
        StatRequest::Map { .. } => Some(Response::Map { request_id, map: handler.render_map().to_owned() }),
        StatRequest::Route { from, to, .. } => handler
            .build_route(from, to)
            .map(|route| route_response(handler, request_id, route)),
    };
    response.unwrap_or_else(|| Response::not_found(request_id))
}

/// Answer every request, in order.
pub fn answer_all<S: ShortestPath>(handler: &RequestHandler<'_, S>, requests: &[StatRequest]) -> Vec<Response> {
    requests.iter().map(|r| answer(handler, r)).collect()
}

/// Write `responses` as a pretty-printed JSON array.
pub fn write_responses<W: Write>(mut writer: W, responses: &[Response]) -> RequestResult<()> {
    serde_json::to_writer_pretty(&mut writer, responses)?;
    writer.write_all(b"\n")?;
    Ok(())
}
