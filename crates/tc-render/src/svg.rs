//! Minimal SVG object model.
//!
//! Only what the map needs: circles, polylines and text with the common
//! presentation attributes.  Objects are built with consuming setters:
//!
//! ```
//! use tc_render::svg::{Circle, Document, Point};
//!
//! let mut doc = Document::new();
//! doc.add(Circle::new().center(Point::new(20.0, 20.0)).radius(5.0).fill("white"));
//! assert!(doc.to_string().contains(r#"<circle cx="20" cy="20" r="5" fill="white"/>"#));
//! ```

use std::fmt::{self, Write};

// ── Numbers ───────────────────────────────────────────────────────────────────

/// Number as written into SVG attributes: six significant digits, trailing
/// zeros dropped, exponent form outside `1e-5 ..< 1e6` (`1.23457e+06`).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Num(pub f64);

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if v == 0.0 {
            return f.write_str("0");
        }
        if !v.is_finite() {
            return write!(f, "{v}");
        }

        // Rounding to six digits first settles the decimal exponent.
        let sci = format!("{v:.5e}");
        let Some((mantissa, exp)) = sci.split_once('e') else {
            return write!(f, "{v}");
        };
        let Ok(exp) = exp.parse::<i32>() else {
            return write!(f, "{v}");
        };

        if (-5..6).contains(&exp) {
            let fixed = format!("{:.*}", (5 - exp) as usize, v);
            f.write_str(trim_fraction(&fixed))
        } else {
            let sign = if exp < 0 { '-' } else { '+' };
            write!(f, "{}e{sign}{:02}", trim_fraction(mantissa), exp.abs())
        }
    }
}

// ── Point ─────────────────────────────────────────────────────────────────────

/// Canvas coordinate (or offset) in user units.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", Num(self.x), Num(self.y))
    }
}

// ── Color ─────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub opacity: f64,
}

/// Fill or stroke colour.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    /// Rendered as `none`.
    #[default]
    None,
    /// A CSS colour name such as `green`.
    Named(String),
    Rgb(Rgb),
    Rgba(Rgba),
}

impl From<&str> for Color {
    fn from(name: &str) -> Self {
        Color::Named(name.to_owned())
    }
}

impl From<String> for Color {
    fn from(name: String) -> Self {
        Color::Named(name)
    }
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::Rgb(c)
    }
}

impl From<Rgba> for Color {
    fn from(c: Rgba) -> Self {
        Color::Rgba(c)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::None => f.write_str("none"),
            Color::Named(name) => f.write_str(name),
            Color::Rgb(c) => write!(f, "rgb({},{},{})", c.red, c.green, c.blue),
            Color::Rgba(c) => write!(f, "rgba({},{},{},{})", c.red, c.green, c.blue, Num(c.opacity)),
        }
    }
}

// ── Stroke styles ─────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StrokeLineCap {
    Butt,
    Round,
    Square,
}

impl StrokeLineCap {
    pub fn as_str(self) -> &'static str {
        match self {
            StrokeLineCap::Butt   => "butt",
            StrokeLineCap::Round  => "round",
            StrokeLineCap::Square => "square",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StrokeLineJoin {
    Arcs,
    Bevel,
    Miter,
    MiterClip,
    Round,
}

impl StrokeLineJoin {
    pub fn as_str(self) -> &'static str {
        match self {
            StrokeLineJoin::Arcs      => "arcs",
            StrokeLineJoin::Bevel     => "bevel",
            StrokeLineJoin::Miter     => "miter",
            StrokeLineJoin::MiterClip => "miter-clip",
            StrokeLineJoin::Round     => "round",
        }
    }
}

// ── Shared presentation attributes ────────────────────────────────────────────

/// Attributes common to every shape.  Unset attributes are not written.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathProps {
    pub fill:         Option<Color>,
    pub stroke:       Option<Color>,
    pub stroke_width: Option<f64>,
    pub line_cap:     Option<StrokeLineCap>,
    pub line_join:    Option<StrokeLineJoin>,
}

impl PathProps {
    fn write_attrs(&self, out: &mut impl Write) -> fmt::Result {
        if let Some(fill) = &self.fill {
            write!(out, r#" fill="{fill}""#)?;
        }
        if let Some(stroke) = &self.stroke {
            write!(out, r#" stroke="{stroke}""#)?;
        }
        if let Some(width) = self.stroke_width {
            write!(out, r#" stroke-width="{}""#, Num(width))?;
        }
        if let Some(cap) = self.line_cap {
            write!(out, r#" stroke-linecap="{}""#, cap.as_str())?;
        }
        if let Some(join) = self.line_join {
            write!(out, r#" stroke-linejoin="{}""#, join.as_str())?;
        }
        Ok(())
    }
}

/// Generate the consuming presentation-attribute setters for a shape type.
macro_rules! path_props_setters {
    ($ty:ty) => {
        impl $ty {
            pub fn fill(mut self, color: impl Into<Color>) -> Self {
                self.props.fill = Some(color.into());
                self
            }

            pub fn stroke(mut self, color: impl Into<Color>) -> Self {
                self.props.stroke = Some(color.into());
                self
            }

            pub fn stroke_width(mut self, width: f64) -> Self {
                self.props.stroke_width = Some(width);
                self
            }

            pub fn line_cap(mut self, cap: StrokeLineCap) -> Self {
                self.props.line_cap = Some(cap);
                self
            }

            pub fn line_join(mut self, join: StrokeLineJoin) -> Self {
                self.props.line_join = Some(join);
                self
            }
        }
    };
}

// ── Circle ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Circle {
    center: Point,
    radius: f64,
    props:  PathProps,
}

impl Circle {
    pub fn new() -> Self {
        Self { center: Point::default(), radius: 1.0, props: PathProps::default() }
    }

    pub fn center(mut self, center: Point) -> Self {
        self.center = center;
        self
    }

    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    fn write_svg(&self, out: &mut impl Write) -> fmt::Result {
        write!(
            out,
            r#"<circle cx="{}" cy="{}" r="{}""#,
            Num(self.center.x),
            Num(self.center.y),
            Num(self.radius)
        )?;
        self.props.write_attrs(out)?;
        out.write_str("/>")
    }
}

impl Default for Circle {
    fn default() -> Self {
        Self::new()
    }
}

path_props_setters!(Circle);

// ── Polyline ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polyline {
    points: Vec<Point>,
    props:  PathProps,
}

impl Polyline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn point(mut self, point: Point) -> Self {
        self.points.push(point);
        self
    }

    pub fn points(mut self, points: impl IntoIterator<Item = Point>) -> Self {
        self.points.extend(points);
        self
    }

    fn write_svg(&self, out: &mut impl Write) -> fmt::Result {
        out.write_str(r#"<polyline points=""#)?;
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 {
                out.write_char(' ')?;
            }
            write!(out, "{p}")?;
        }
        out.write_char('"')?;
        self.props.write_attrs(out)?;
        out.write_str("/>")
    }
}

path_props_setters!(Polyline);

// ── Text ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Text {
    position:    Point,
    offset:      Point,
    font_size:   u32,
    font_family: Option<String>,
    font_weight: Option<String>,
    data:        String,
    props:       PathProps,
}

impl Text {
    pub fn new() -> Self {
        Self {
            position:    Point::default(),
            offset:      Point::default(),
            font_size:   1,
            font_family: None,
            font_weight: None,
            data:        String::new(),
            props:       PathProps::default(),
        }
    }

    pub fn position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    /// Offset relative to `position` (`dx`/`dy` attributes).
    pub fn offset(mut self, offset: Point) -> Self {
        self.offset = offset;
        self
    }

    pub fn font_size(mut self, size: u32) -> Self {
        self.font_size = size;
        self
    }

    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn font_weight(mut self, weight: impl Into<String>) -> Self {
        self.font_weight = Some(weight.into());
        self
    }

    pub fn data(mut self, data: impl Into<String>) -> Self {
        self.data = data.into();
        self
    }

    fn write_svg(&self, out: &mut impl Write) -> fmt::Result {
        out.write_str("<text")?;
        self.props.write_attrs(out)?;
        write!(
            out,
            r#" x="{}" y="{}" dx="{}" dy="{}" font-size="{}""#,
            Num(self.position.x),
            Num(self.position.y),
            Num(self.offset.x),
            Num(self.offset.y),
            self.font_size
        )?;
        if let Some(family) = &self.font_family {
            write!(out, r#" font-family="{family}""#)?;
        }
        if let Some(weight) = &self.font_weight {
            write!(out, r#" font-weight="{weight}""#)?;
        }
        out.write_char('>')?;
        write_escaped(out, &self.data)?;
        out.write_str("</text>")
    }
}

impl Default for Text {
    fn default() -> Self {
        Self::new()
    }
}

path_props_setters!(Text);

/// XML-escape text content.
fn write_escaped(out: &mut impl Write, s: &str) -> fmt::Result {
    for c in s.chars() {
        match c {
            '"'  => out.write_str("&quot;")?,
            '\'' => out.write_str("&apos;")?,
            '<'  => out.write_str("&lt;")?,
            '>'  => out.write_str("&gt;")?,
            '&'  => out.write_str("&amp;")?,
            c    => out.write_char(c)?,
        }
    }
    Ok(())
}

// ── Document ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum Object {
    Circle(Circle),
    Polyline(Polyline),
    Text(Text),
}

impl Object {
    fn write_svg(&self, out: &mut impl Write) -> fmt::Result {
        match self {
            Object::Circle(c)   => c.write_svg(out),
            Object::Polyline(p) => p.write_svg(out),
            Object::Text(t)     => t.write_svg(out),
        }
    }
}

impl From<Circle> for Object {
    fn from(c: Circle) -> Self {
        Object::Circle(c)
    }
}

impl From<Polyline> for Object {
    fn from(p: Polyline) -> Self {
        Object::Polyline(p)
    }
}

impl From<Text> for Object {
    fn from(t: Text) -> Self {
        Object::Text(t)
    }
}

/// An ordered list of objects; later objects paint over earlier ones.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    objects: Vec<Object>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, object: impl Into<Object>) {
        self.objects.push(object.into());
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n")?;
        f.write_str("<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\">\n")?;
        for object in &self.objects {
            f.write_str("  ")?;
            object.write_svg(f)?;
            f.write_char('\n')?;
        }
        f.write_str("</svg>")
    }
}
