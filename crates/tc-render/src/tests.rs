//! Unit tests for tc-render.

#[cfg(test)]
mod helpers {
    use tc_catalogue::TransportCatalogue;
    use tc_core::GeoPoint;

    use crate::{Color, RenderSettings};

    /// Two served stops on opposite corners of a 1°×1° box plus one unserved
    /// stop far away:
    ///
    ///   A:(0,0)  B:(1,1)  C:(5,5, no buses)
    ///
    /// Bus "2" is linear A–B, bus "1" is circular A→B.
    pub fn corners() -> TransportCatalogue {
        let mut tc = TransportCatalogue::new();
        tc.add_stop("A", GeoPoint::new(0.0, 0.0)).unwrap();
        tc.add_stop("B", GeoPoint::new(1.0, 1.0)).unwrap();
        tc.add_stop("C", GeoPoint::new(5.0, 5.0)).unwrap();
        tc.add_bus("2", false, &["A", "B"]).unwrap();
        tc.add_bus("1", true, &["A", "B"]).unwrap();
        tc
    }

    /// 100×100 canvas with 10 px padding: A lands on (10,90), B on (90,10).
    pub fn small_canvas(palette: &[&str]) -> RenderSettings {
        RenderSettings {
            width: 100.0,
            height: 100.0,
            padding: 10.0,
            color_palette: palette.iter().map(|&c| Color::from(c)).collect(),
            ..RenderSettings::default()
        }
    }
}

// ── SVG primitives ────────────────────────────────────────────────────────────

#[cfg(test)]
mod svg {
    use crate::svg::{Circle, Color, Document, Num, Point, Polyline, Rgb, Rgba, StrokeLineCap, StrokeLineJoin, Text};

    #[test]
    fn numbers_use_six_significant_digits() {
        assert_eq!(Num(0.0).to_string(), "0");
        assert_eq!(Num(-3.0).to_string(), "-3");
        assert_eq!(Num(0.85).to_string(), "0.85");
        assert_eq!(Num(99.22833251953125).to_string(), "99.2283");
        assert_eq!(Num(1.0 / 3.0).to_string(), "0.333333");
        assert_eq!(Num(999999.5).to_string(), "1e+06");
        assert_eq!(Num(1234567.0).to_string(), "1.23457e+06");
        assert_eq!(Num(0.000001234).to_string(), "1.234e-06");
        assert_eq!(Num(0.0001).to_string(), "0.0001");
    }

    #[test]
    fn coordinates_are_rounded() {
        let p = Point::new(99.22833251953125, 0.000001234);
        assert_eq!(p.to_string(), "99.2283,1.234e-06");

        let mut doc = Document::new();
        doc.add(Circle::new().center(Point::new(1.0 / 3.0, 2.0 / 3.0)).radius(5.0));
        assert!(doc.to_string().contains(r#"<circle cx="0.333333" cy="0.666667" r="5""#));
    }

    #[test]
    fn color_formats() {
        assert_eq!(Color::None.to_string(), "none");
        assert_eq!(Color::from("green").to_string(), "green");
        assert_eq!(Color::from(Rgb { red: 255, green: 160, blue: 0 }).to_string(), "rgb(255,160,0)");
        assert_eq!(
            Color::from(Rgba { red: 1, green: 2, blue: 3, opacity: 0.5 }).to_string(),
            "rgba(1,2,3,0.5)"
        );
    }

    #[test]
    fn empty_document() {
        assert_eq!(
            Document::new().to_string(),
            "<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n\
             <svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\">\n\
             </svg>"
        );
    }

    #[test]
    fn objects_one_per_line() {
        let mut doc = Document::new();
        doc.add(Circle::new().center(Point::new(20.0, 20.0)).radius(10.0));
        doc.add(Polyline::new().point(Point::new(1.0, 2.0)).point(Point::new(3.5, 4.0)));
        let out = doc.to_string();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[2], r#"  <circle cx="20" cy="20" r="10"/>"#);
        assert_eq!(lines[3], r#"  <polyline points="1,2 3.5,4"/>"#);
        assert_eq!(lines[4], "</svg>");
    }

    #[test]
    fn unset_attributes_are_omitted() {
        let mut doc = Document::new();
        doc.add(
            Polyline::new()
                .point(Point::new(0.0, 0.0))
                .fill(Color::None)
                .stroke("red")
                .stroke_width(2.0)
                .line_cap(StrokeLineCap::Butt)
                .line_join(StrokeLineJoin::MiterClip),
        );
        doc.add(Circle::new().fill("white"));
        let out = doc.to_string();
        assert!(out.contains(
            r#"<polyline points="0,0" fill="none" stroke="red" stroke-width="2" stroke-linecap="butt" stroke-linejoin="miter-clip"/>"#
        ));
        assert!(out.contains(r#"<circle cx="0" cy="0" r="1" fill="white"/>"#));
    }

    #[test]
    fn text_layout_and_escaping() {
        let mut doc = Document::new();
        doc.add(
            Text::new()
                .position(Point::new(35.0, 20.0))
                .offset(Point::new(0.0, 6.0))
                .font_size(12)
                .font_family("Verdana")
                .font_weight("bold")
                .fill("black")
                .data(r#"<Tom & "Jerry's">"#),
        );
        assert!(doc.to_string().contains(
            r#"<text fill="black" x="35" y="20" dx="0" dy="6" font-size="12" font-family="Verdana" font-weight="bold">&lt;Tom &amp; &quot;Jerry&apos;s&quot;&gt;</text>"#
        ));
    }

    #[test]
    fn text_without_font_options() {
        let mut doc = Document::new();
        doc.add(Text::new().data("x"));
        assert!(doc.to_string().contains(r#"<text x="0" y="0" dx="0" dy="0" font-size="1">x</text>"#));
    }
}

// ── Projection ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod projector {
    use tc_core::GeoPoint;

    use crate::svg::Point;
    use crate::SphereProjector;

    #[test]
    fn fits_smaller_zoom() {
        let pts = [GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 2.0)];
        let p = SphereProjector::new(pts, 200.0, 100.0, 10.0);
        // width zoom 180/2 = 90, height zoom 80/1 = 80.
        assert_eq!(p.zoom(), 80.0);
        assert_eq!(p.project(pts[0]), Point::new(10.0, 90.0));
        assert_eq!(p.project(pts[1]), Point::new(170.0, 10.0));
    }

    #[test]
    fn single_axis_span() {
        let pts = [GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0)];
        let p = SphereProjector::new(pts, 100.0, 100.0, 10.0);
        assert_eq!(p.zoom(), 80.0);
        assert_eq!(p.project(pts[1]), Point::new(90.0, 10.0));
    }

    #[test]
    fn degenerate_box_maps_to_padding() {
        let pts = [GeoPoint::new(3.0, 3.0), GeoPoint::new(3.0, 3.0)];
        let p = SphereProjector::new(pts, 100.0, 100.0, 25.0);
        assert_eq!(p.zoom(), 0.0);
        assert_eq!(p.project(pts[0]), Point::new(25.0, 25.0));
    }

    #[test]
    fn empty_input() {
        let p = SphereProjector::new(std::iter::empty(), 100.0, 100.0, 5.0);
        assert_eq!(p.zoom(), 0.0);
        assert_eq!(p.project(GeoPoint::new(10.0, 10.0)), Point::new(5.0, 5.0));
    }
}

// ── Map renderer ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod renderer {
    use tc_catalogue::TransportCatalogue;
    use tc_core::GeoPoint;

    use super::helpers::{corners, small_canvas};
    use crate::svg::Object;
    use crate::{MapRenderer, RenderError, RenderSettings};

    #[test]
    fn layer_order_and_counts() {
        let tc = corners();
        let doc = MapRenderer::new(small_canvas(&["red", "blue"])).unwrap().render(&tc);
        let kinds: Vec<&str> = doc
            .objects()
            .iter()
            .map(|o| match o {
                Object::Polyline(_) => "line",
                Object::Text(_) => "text",
                Object::Circle(_) => "circle",
            })
            .collect();
        // 2 lines; bus "1" labelled once, bus "2" twice (2 texts each);
        // 2 circles; 2 stop labels (2 texts each).
        let mut expected = vec!["line"; 2];
        expected.extend(["text"; 6]);
        expected.extend(["circle"; 2]);
        expected.extend(["text"; 4]);
        assert_eq!(kinds, expected);
    }

    #[test]
    fn bus_lines_sorted_by_name_with_palette() {
        let svg = MapRenderer::new(small_canvas(&["red", "blue"])).unwrap().render_svg(&corners());
        let first = svg.lines().nth(2).unwrap();
        let second = svg.lines().nth(3).unwrap();
        // Both buses travel A→B→A: the circular one closes the loop, the
        // linear one comes back.
        assert_eq!(
            first,
            r#"  <polyline points="10,90 90,10 10,90" fill="none" stroke="red" stroke-width="14" stroke-linecap="round" stroke-linejoin="round"/>"#
        );
        assert!(second.contains(r#"stroke="blue""#));
    }

    #[test]
    fn bus_labels_have_underlayer() {
        let svg = MapRenderer::new(small_canvas(&["red", "blue"])).unwrap().render_svg(&corners());
        assert!(svg.contains(
            r#"<text fill="rgba(255,255,255,0.85)" stroke="rgba(255,255,255,0.85)" stroke-width="3" stroke-linecap="round" stroke-linejoin="round" x="10" y="90" dx="7" dy="15" font-size="20" font-family="Verdana" font-weight="bold">1</text>"#
        ));
        assert!(svg.contains(
            r#"<text fill="red" x="10" y="90" dx="7" dy="15" font-size="20" font-family="Verdana" font-weight="bold">1</text>"#
        ));
        // Linear bus "2" is labelled at both terminals.
        assert!(svg.contains(r#"<text fill="blue" x="90" y="10" dx="7" dy="15""#));
        assert!(!svg.contains(r#"<text fill="red" x="90" y="10""#));
    }

    #[test]
    fn stops_without_buses_are_not_drawn() {
        let svg = MapRenderer::new(small_canvas(&["red"])).unwrap().render_svg(&corners());
        assert!(svg.contains(r#"<circle cx="10" cy="90" r="5" fill="white"/>"#));
        assert!(svg.contains(
            r#"<text fill="black" x="90" y="10" dx="7" dy="-3" font-size="20" font-family="Verdana">B</text>"#
        ));
        assert!(!svg.contains(">C</text>"));
    }

    #[test]
    fn palette_wraps_and_may_be_empty() {
        let one = MapRenderer::new(small_canvas(&["red"])).unwrap().render_svg(&corners());
        assert_eq!(one.matches(r#"<polyline points="10,90 90,10 10,90" fill="none" stroke="red""#).count(), 2);

        let none = MapRenderer::new(small_canvas(&[])).unwrap().render_svg(&corners());
        assert_eq!(none.matches(r#"fill="none" stroke="none""#).count(), 2);
    }

    #[test]
    fn empty_buses_are_skipped() {
        let mut tc = corners();
        tc.add_bus("0", true, &[] as &[&str]).unwrap();
        let svg = MapRenderer::new(small_canvas(&["red", "blue"])).unwrap().render_svg(&tc);
        // "0" sorts first but draws nothing, so "1" still gets the first colour.
        assert!(svg.lines().nth(2).unwrap().contains(r#"stroke="red""#));
        assert!(!svg.contains(">0</text>"));
    }

    #[test]
    fn empty_catalogue() {
        let doc = MapRenderer::new(RenderSettings::default()).unwrap().render(&TransportCatalogue::new());
        assert!(doc.is_empty());
    }

    #[test]
    fn output_is_deterministic() {
        let mut tc = corners();
        tc.add_stop("D", GeoPoint::new(0.5, 0.2)).unwrap();
        tc.add_bus("3", false, &["D", "A", "B"]).unwrap();
        let r = MapRenderer::new(small_canvas(&["red", "blue"])).unwrap();
        assert_eq!(r.render_svg(&tc), r.render_svg(&tc));
    }

    #[test]
    fn invalid_settings_rejected() {
        let too_much_padding = RenderSettings { padding: 60.0, ..small_canvas(&[]) };
        assert!(matches!(MapRenderer::new(too_much_padding), Err(RenderError::InvalidSettings(_))));

        let negative = RenderSettings { width: -1.0, ..small_canvas(&[]) };
        assert!(matches!(MapRenderer::new(negative), Err(RenderError::InvalidSettings(_))));
    }
}
