//! Map renderer: catalogue → SVG document.
//!
//! The document is assembled in four layers, each painted over the
//! previous one:
//!
//! 1. bus polylines,
//! 2. bus name labels at the terminals,
//! 3. stop circles,
//! 4. stop name labels.
//!
//! Only stops served by at least one bus are drawn, and they also define
//! the projection's bounding box.

use log::debug;

use tc_catalogue::{Bus, Stop, TransportCatalogue};

use crate::projector::SphereProjector;
use crate::svg::{Circle, Color, Document, Point, Polyline, Rgba, StrokeLineCap, StrokeLineJoin, Text};
use crate::{RenderError, RenderResult};

const FONT_FAMILY: &str = "Verdana";

// ── RenderSettings ────────────────────────────────────────────────────────────

/// Canvas geometry, label styling and bus colour palette.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderSettings {
    pub width:   f64,
    pub height:  f64,
    pub padding: f64,

    pub line_width:  f64,
    pub stop_radius: f64,

    pub bus_label_font_size:  u32,
    pub bus_label_offset:     Point,
    pub stop_label_font_size: u32,
    pub stop_label_offset:    Point,

    pub underlayer_color: Color,
    pub underlayer_width: f64,

    /// Bus colours, assigned in bus-name order and reused cyclically.
    pub color_palette: Vec<Color>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width:   1200.0,
            height:  1200.0,
            padding: 50.0,

            line_width:  14.0,
            stop_radius: 5.0,

            bus_label_font_size:  20,
            bus_label_offset:     Point::new(7.0, 15.0),
            stop_label_font_size: 20,
            stop_label_offset:    Point::new(7.0, -3.0),

            underlayer_color: Color::Rgba(Rgba { red: 255, green: 255, blue: 255, opacity: 0.85 }),
            underlayer_width: 3.0,

            color_palette: vec![Color::from("green"), Color::from("red")],
        }
    }
}

impl RenderSettings {
    pub fn validate(&self) -> RenderResult<()> {
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("padding", self.padding),
            ("line_width", self.line_width),
            ("stop_radius", self.stop_radius),
            ("underlayer_width", self.underlayer_width),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(RenderError::InvalidSettings(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if 2.0 * self.padding > self.width.min(self.height) {
            return Err(RenderError::InvalidSettings(format!(
                "padding {} does not fit a {}x{} canvas",
                self.padding, self.width, self.height
            )));
        }
        Ok(())
    }

    /// Palette colour for the `index`-th drawn bus.
    fn palette_color(&self, index: usize) -> Color {
        if self.color_palette.is_empty() {
            return Color::None;
        }
        self.color_palette[index % self.color_palette.len()].clone()
    }
}

// ── MapRenderer ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct MapRenderer {
    settings: RenderSettings,
}

impl MapRenderer {
    pub fn new(settings: RenderSettings) -> RenderResult<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Render `catalogue` as an SVG document string.
    pub fn render_svg(&self, catalogue: &TransportCatalogue) -> String {
        self.render(catalogue).to_string()
    }

    pub fn render(&self, catalogue: &TransportCatalogue) -> Document {
        let mut buses: Vec<&Bus> = catalogue.buses().iter().filter(|b| !b.stops.is_empty()).collect();
        buses.sort_unstable_by(|a, b| a.name.cmp(&b.name));

        let mut stops: Vec<&Stop> = catalogue
            .stop_ids()
            .filter(|&id| !catalogue.buses_at_stop(id).is_empty())
            .map(|id| catalogue.stop(id))
            .collect();
        stops.sort_unstable_by(|a, b| a.name.cmp(&b.name));

        let s = &self.settings;
        let projector = SphereProjector::new(
            stops.iter().map(|stop| stop.position),
            s.width,
            s.height,
            s.padding,
        );

        let mut doc = Document::new();
        self.add_bus_lines(&mut doc, catalogue, &buses, &projector);
        self.add_bus_labels(&mut doc, catalogue, &buses, &projector);
        self.add_stop_circles(&mut doc, &stops, &projector);
        self.add_stop_labels(&mut doc, &stops, &projector);

        debug!(
            "rendered map: {} buses, {} stops, {} objects",
            buses.len(),
            stops.len(),
            doc.len()
        );
        doc
    }

    // ── Layers ───────────────────────────────────────────────────────────────

    fn add_bus_lines(
        &self,
        doc:       &mut Document,
        catalogue: &TransportCatalogue,
        buses:     &[&Bus],
        projector: &SphereProjector,
    ) {
        let s = &self.settings;
        for (i, bus) in buses.iter().enumerate() {
            let points = bus
                .effective_path()
                .into_iter()
                .map(|id| projector.project(catalogue.stop(id).position));
            doc.add(
                Polyline::new()
                    .points(points)
                    .fill(Color::None)
                    .stroke(s.palette_color(i))
                    .stroke_width(s.line_width)
                    .line_cap(StrokeLineCap::Round)
                    .line_join(StrokeLineJoin::Round),
            );
        }
    }

    fn add_bus_labels(
        &self,
        doc:       &mut Document,
        catalogue: &TransportCatalogue,
        buses:     &[&Bus],
        projector: &SphereProjector,
    ) {
        for (i, bus) in buses.iter().enumerate() {
            let color = self.settings.palette_color(i);
            let (Some(&first), Some(&last)) = (bus.stops.first(), bus.stops.last()) else {
                continue;
            };

            let mut terminals = vec![first];
            if !bus.circular && first != last {
                terminals.push(last);
            }
            for stop in terminals {
                let at = projector.project(catalogue.stop(stop).position);
                self.add_label(doc, self.bus_label(&bus.name, at), color.clone());
            }
        }
    }

    fn add_stop_circles(&self, doc: &mut Document, stops: &[&Stop], projector: &SphereProjector) {
        for stop in stops {
            doc.add(
                Circle::new()
                    .center(projector.project(stop.position))
                    .radius(self.settings.stop_radius)
                    .fill("white"),
            );
        }
    }

    fn add_stop_labels(&self, doc: &mut Document, stops: &[&Stop], projector: &SphereProjector) {
        for stop in stops {
            let at = projector.project(stop.position);
            self.add_label(doc, self.stop_label(&stop.name, at), Color::from("black"));
        }
    }

    // ── Label helpers ────────────────────────────────────────────────────────

    fn bus_label(&self, name: &str, at: Point) -> Text {
        Text::new()
            .position(at)
            .offset(self.settings.bus_label_offset)
            .font_size(self.settings.bus_label_font_size)
            .font_family(FONT_FAMILY)
            .font_weight("bold")
            .data(name)
    }

    fn stop_label(&self, name: &str, at: Point) -> Text {
        Text::new()
            .position(at)
            .offset(self.settings.stop_label_offset)
            .font_size(self.settings.stop_label_font_size)
            .font_family(FONT_FAMILY)
            .data(name)
    }

    /// Emit `text` twice: once as the underlayer halo, then filled with `fill`.
    fn add_label(&self, doc: &mut Document, text: Text, fill: Color) {
        let s = &self.settings;
        doc.add(
            text.clone()
                .fill(s.underlayer_color.clone())
                .stroke(s.underlayer_color.clone())
                .stroke_width(s.underlayer_width)
                .line_cap(StrokeLineCap::Round)
                .line_join(StrokeLineJoin::Round),
        );
        doc.add(text.fill(fill));
    }
}
