//! Unit tests for tc-requests.

#[cfg(test)]
mod helpers {
    use serde_json::{json, Value};

    use crate::InputDocument;

    /// Three stops one degree of longitude apart on the 1st parallel, 1 km
    /// apart by road, served by circular bus "1" (A→B→C→A).  "D" has no
    /// buses.  Wait 5 min, 60 km/h = 1 km/min.
    pub fn document(file: &str) -> Value {
        json!({
            "serialization_settings": { "file": file },
            "routing_settings": { "bus_wait_time": 5, "bus_velocity": 60 },
            "render_settings": {
                "width": 600, "height": 400, "padding": 50,
                "line_width": 14, "stop_radius": 5,
                "bus_label_font_size": 20, "bus_label_offset": [7, 15],
                "stop_label_font_size": 18, "stop_label_offset": [7, -3],
                "underlayer_color": [255, 255, 255, 0.85], "underlayer_width": 3,
                "color_palette": ["green", [255, 160, 0], "red"]
            },
            "base_requests": [
                { "type": "Bus", "name": "1", "stops": ["A", "B", "C", "A"], "is_roundtrip": true },
                { "type": "Stop", "name": "A", "latitude": 1.0, "longitude": 1.0,
                  "road_distances": { "B": 1000 } },
                { "type": "Stop", "name": "B", "latitude": 1.0, "longitude": 2.0,
                  "road_distances": { "C": 1000 } },
                { "type": "Stop", "name": "C", "latitude": 1.0, "longitude": 3.0,
                  "road_distances": { "A": 1000 } },
                { "type": "Stop", "name": "D", "latitude": 2.0, "longitude": 2.0 }
            ],
            "stat_requests": [
                { "id": 1, "type": "Bus", "name": "1" },
                { "id": 2, "type": "Stop", "name": "B" },
                { "id": 3, "type": "Stop", "name": "D" },
                { "id": 4, "type": "Route", "from": "A", "to": "C" },
                { "id": 5, "type": "Bus", "name": "nope" },
                { "id": 6, "type": "Route", "from": "A", "to": "D" },
                { "id": 7, "type": "Map" }
            ]
        })
    }

    pub fn parse(value: Value) -> InputDocument {
        serde_json::from_value(value).unwrap()
    }
}

// ── Input parsing & catalogue loading ─────────────────────────────────────────

#[cfg(test)]
mod loading {
    use serde_json::json;

    use tc_catalogue::{CatalogueError, DuplicatePolicy};
    use tc_render::{Color, Point, RenderSettings, Rgb, Rgba};

    use super::helpers::{document, parse};
    use crate::{load_catalogue, BaseRequest, InputDocument, RequestError, StatRequest};

    #[test]
    fn parses_sections() {
        let doc = parse(document("base.db"));
        assert_eq!(doc.serialization_settings.unwrap().file.to_str(), Some("base.db"));
        let routing = doc.routing_settings.unwrap();
        assert_eq!((routing.bus_wait_time, routing.bus_velocity), (5.0, 60.0));
        assert_eq!(doc.base_requests.len(), 5);
        assert_eq!(doc.stat_requests[3], StatRequest::Route { id: 4, from: "A".into(), to: "C".into() });
        assert_eq!(doc.stat_requests[6].id(), 7);
    }

    #[test]
    fn render_settings_colours_and_offsets() {
        let doc = parse(document("base.db"));
        let render: RenderSettings = doc.render_settings.unwrap().into();
        assert_eq!(render.bus_label_offset, Point::new(7.0, 15.0));
        assert_eq!(render.stop_label_offset, Point::new(7.0, -3.0));
        assert_eq!(
            render.underlayer_color,
            Color::Rgba(Rgba { red: 255, green: 255, blue: 255, opacity: 0.85 })
        );
        assert_eq!(
            render.color_palette,
            vec![
                Color::from("green"),
                Color::Rgb(Rgb { red: 255, green: 160, blue: 0 }),
                Color::from("red"),
            ]
        );
    }

    #[test]
    fn missing_sections_are_allowed() {
        let doc: InputDocument = serde_json::from_value(json!({})).unwrap();
        assert!(doc.serialization_settings.is_none());
        assert!(doc.base_requests.is_empty());
        assert!(doc.stat_requests.is_empty());
    }

    #[test]
    fn malformed_document() {
        let err = InputDocument::from_reader(&b"{ \"base_requests\": [ { \"type\": \"Tram\" } ] }"[..]).unwrap_err();
        assert!(matches!(err, RequestError::Json(_)));
    }

    #[test]
    fn buses_may_precede_their_stops() {
        let doc = parse(document("base.db"));
        let tc = load_catalogue(&doc.base_requests, DuplicatePolicy::Overwrite).unwrap();
        assert_eq!(tc.stop_count(), 4);
        assert_eq!(tc.bus_count(), 1);
        let (a, b, c) = (tc.stop_id("A").unwrap(), tc.stop_id("B").unwrap(), tc.stop_id("C").unwrap());
        assert_eq!(tc.distance(a, b), 1000);
        // Backfilled reverse entry.
        assert_eq!(tc.distance(b, a), 1000);
        assert_eq!(tc.distance(a, c), 1000);
    }

    #[test]
    fn bus_with_unknown_stop_fails() {
        let requests = vec![BaseRequest::Bus {
            name: "x".into(),
            stops: vec!["nowhere".into()],
            is_roundtrip: false,
        }];
        let err = load_catalogue(&requests, DuplicatePolicy::Overwrite).unwrap_err();
        assert!(matches!(err, RequestError::Catalogue(CatalogueError::UnknownStop(s)) if s == "nowhere"));
    }

    #[test]
    fn duplicates_follow_policy() {
        let stop = |lat: f64| BaseRequest::Stop {
            name: "A".into(),
            latitude: lat,
            longitude: 0.0,
            road_distances: Default::default(),
        };
        let requests = vec![stop(1.0), stop(2.0)];

        let tc = load_catalogue(&requests, DuplicatePolicy::Overwrite).unwrap();
        assert_eq!(tc.stop_count(), 1);
        assert_eq!(tc.get_stop("A").unwrap().position.lat, 2.0);

        let err = load_catalogue(&requests, DuplicatePolicy::Reject).unwrap_err();
        assert!(matches!(err, RequestError::Catalogue(CatalogueError::DuplicateStop(_))));
    }
}

// ── Handler facade ────────────────────────────────────────────────────────────

#[cfg(test)]
mod handler {
    use tc_catalogue::{DuplicatePolicy, TransportCatalogue};
    use tc_render::{MapRenderer, RenderSettings};
    use tc_router::{RouteItem, TransportRouter};

    use super::helpers::{document, parse};
    use crate::{load_catalogue, RequestHandler};

    const EPS: f64 = 1e-9;

    fn fixture() -> (TransportCatalogue, TransportRouter, MapRenderer) {
        let doc = parse(document("base.db"));
        let tc = load_catalogue(&doc.base_requests, DuplicatePolicy::Overwrite).unwrap();
        let router = TransportRouter::build(&tc, doc.routing_settings.unwrap()).unwrap();
        let renderer = MapRenderer::new(RenderSettings::from(doc.render_settings.unwrap())).unwrap();
        (tc, router, renderer)
    }

    #[test]
    fn bus_stat() {
        let (tc, router, renderer) = fixture();
        let h = RequestHandler::new(&tc, &router, &renderer);

        let stat = h.get_bus_stat("1").unwrap();
        assert_eq!(stat.route_length, 3000);
        assert_eq!(stat.stop_count, 4);
        assert_eq!(stat.unique_stop_count, 3);
        let geo = tc.geo_length(tc.bus_id("1").unwrap());
        assert!((stat.curvature - 3000.0 / geo).abs() < EPS);

        assert!(h.get_bus_stat("2").is_none());
    }

    #[test]
    fn bus_stat_is_cached() {
        let (tc, router, renderer) = fixture();
        let h = RequestHandler::new(&tc, &router, &renderer);
        assert_eq!(h.get_bus_stat("1"), h.get_bus_stat("1"));
    }

    #[test]
    fn degenerate_bus_has_zero_curvature() {
        let (mut tc, _, renderer) = fixture();
        tc.add_bus("solo", true, &["A"]).unwrap();
        let router = TransportRouter::build(&tc, Default::default()).unwrap();
        let h = RequestHandler::new(&tc, &router, &renderer);
        let stat = h.get_bus_stat("solo").unwrap();
        assert_eq!(stat.route_length, 0);
        assert_eq!(stat.curvature, 0.0);
        assert_eq!(stat.stop_count, 1);
    }

    #[test]
    fn buses_by_stop() {
        let (mut tc, _, renderer) = fixture();
        tc.add_bus("0", false, &["B", "D"]).unwrap();
        let router = TransportRouter::build(&tc, Default::default()).unwrap();
        let h = RequestHandler::new(&tc, &router, &renderer);

        assert_eq!(h.get_sorted_buses_by_stop("B"), Some(vec!["0".to_owned(), "1".to_owned()]));
        assert_eq!(h.get_sorted_buses_by_stop("A"), Some(vec!["1".to_owned()]));
        assert_eq!(h.get_sorted_buses_by_stop("Z"), None);
    }

    #[test]
    fn stop_without_buses_is_empty_not_missing() {
        let (tc, router, renderer) = fixture();
        let h = RequestHandler::new(&tc, &router, &renderer);
        assert_eq!(h.get_sorted_buses_by_stop("D"), Some(vec![]));
    }

    #[test]
    fn route_by_name() {
        let (tc, router, renderer) = fixture();
        let h = RequestHandler::new(&tc, &router, &renderer);

        let route = h.build_route("A", "C").unwrap();
        assert!((route.total_time - 7.0).abs() < EPS);
        assert_eq!(route.items.len(), 2);
        assert!(matches!(route.items[0], RouteItem::Wait(w) if w.stop == tc.stop_id("A").unwrap()));
        assert!(matches!(route.items[1], RouteItem::Span(s) if s.stop_count == 2));

        assert!(h.build_route("A", "D").is_none());
        assert!(h.build_route("A", "nowhere").is_none());
        let same = h.build_route("B", "B").unwrap();
        assert_eq!(same.total_time, 0.0);
        assert!(same.items.is_empty());
    }

    #[test]
    fn map_is_rendered_once() {
        let (tc, router, renderer) = fixture();
        let h = RequestHandler::new(&tc, &router, &renderer);
        let first = h.render_map();
        assert!(first.starts_with("<?xml"));
        assert!(first.ends_with("</svg>"));
        assert!(std::ptr::eq(first, h.render_map()));
    }

    #[test]
    fn shared_between_threads() {
        let (tc, router, renderer) = fixture();
        let h = RequestHandler::new(&tc, &router, &renderer);
        let stats: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4).map(|_| s.spawn(|| h.get_bus_stat("1"))).collect();
            handles.into_iter().map(|t| t.join().unwrap()).collect()
        });
        assert!(stats.windows(2).all(|w| w[0] == w[1]));
    }
}

// ── JSON responses ────────────────────────────────────────────────────────────

#[cfg(test)]
mod responses {
    use serde_json::{json, Value};

    use tc_catalogue::DuplicatePolicy;
    use tc_render::MapRenderer;
    use tc_router::TransportRouter;

    use super::helpers::{document, parse};
    use crate::{answer_all, load_catalogue, write_responses, RequestHandler};

    fn answers() -> Vec<Value> {
        let doc = parse(document("base.db"));
        let tc = load_catalogue(&doc.base_requests, DuplicatePolicy::Overwrite).unwrap();
        let router = TransportRouter::build(&tc, doc.routing_settings.unwrap()).unwrap();
        let renderer = MapRenderer::new(doc.render_settings.clone().unwrap().into()).unwrap();
        let h = RequestHandler::new(&tc, &router, &renderer);
        let responses = answer_all(&h, &doc.stat_requests);

        let mut out = Vec::new();
        write_responses(&mut out, &responses).unwrap();
        match serde_json::from_slice(&out).unwrap() {
            Value::Array(items) => items,
            other => panic!("expected an array, got {other}"),
        }
    }

    #[test]
    fn one_answer_per_request_in_order() {
        let ids: Vec<_> = answers().iter().map(|a| a["request_id"].as_i64().unwrap()).collect();
        assert_eq!(ids, [1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn bus_answer() {
        let a = &answers()[0];
        assert_eq!(a["route_length"], json!(3000));
        assert_eq!(a["stop_count"], json!(4));
        assert_eq!(a["unique_stop_count"], json!(3));
        assert!(a["curvature"].as_f64().unwrap() > 0.0);
        assert!(a.get("error_message").is_none());
    }

    #[test]
    fn stop_answers() {
        let all = answers();
        assert_eq!(all[1], json!({ "request_id": 2, "buses": ["1"] }));
        assert_eq!(all[2], json!({ "request_id": 3, "buses": [] }));
    }

    #[test]
    fn route_answer() {
        assert_eq!(
            answers()[3],
            json!({
                "request_id": 4,
                "total_time": 7.0,
                "items": [
                    { "type": "Wait", "stop_name": "A", "time": 5.0 },
                    { "type": "Bus", "bus": "1", "span_count": 2, "time": 2.0 }
                ]
            })
        );
    }

    #[test]
    fn misses_are_not_found() {
        let all = answers();
        assert_eq!(all[4], json!({ "request_id": 5, "error_message": "not found" }));
        assert_eq!(all[5], json!({ "request_id": 6, "error_message": "not found" }));
    }

    #[test]
    fn map_answer() {
        let map = answers()[6]["map"].as_str().unwrap().to_owned();
        assert!(map.contains(r#"<polyline points=""#));
        assert!(map.contains(r#"stroke="green""#));
        assert!(map.contains(">A</text>"));
        assert!(!map.contains(">D</text>"));
    }
}

// ── Process modes ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod modes {
    use serde_json::json;

    use tc_catalogue::DuplicatePolicy;

    use super::helpers::{document, parse};
    use crate::{make_base, process_requests, RequestError, Response};

    #[test]
    fn make_base_then_process_requests() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("transport.db");
        let doc = parse(document(file.to_str().unwrap()));

        make_base(&doc, DuplicatePolicy::Overwrite).unwrap();
        assert!(file.exists());

        // The query phase only needs the snapshot, not the base requests.
        let query = parse(json!({
            "serialization_settings": { "file": file.to_str().unwrap() },
            "stat_requests": [ { "id": 9, "type": "Route", "from": "A", "to": "C" } ]
        }));
        let responses = process_requests(&query).unwrap();
        assert_eq!(responses.len(), 1);
        assert!(matches!(&responses[0], Response::Route { request_id: 9, total_time, .. } if (*total_time - 7.0).abs() < 1e-9));
    }

    #[test]
    fn missing_serialization_settings() {
        let doc = parse(json!({ "base_requests": [] }));
        assert!(matches!(
            make_base(&doc, DuplicatePolicy::Overwrite),
            Err(RequestError::MissingSection("serialization_settings"))
        ));
        assert!(matches!(process_requests(&doc), Err(RequestError::MissingSection(_))));
    }

    #[test]
    fn missing_snapshot_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("absent.db");
        let doc = parse(json!({ "serialization_settings": { "file": file.to_str().unwrap() } }));
        assert!(matches!(process_requests(&doc), Err(RequestError::Snapshot(_))));
    }

    #[test]
    fn invalid_routing_settings() {
        let dir = tempfile::tempdir().unwrap();
        let mut value = document(dir.path().join("x.db").to_str().unwrap());
        value["routing_settings"]["bus_velocity"] = json!(0);
        let err = make_base(&parse(value), DuplicatePolicy::Overwrite).unwrap_err();
        assert!(matches!(err, RequestError::Router(_)));
    }
}
