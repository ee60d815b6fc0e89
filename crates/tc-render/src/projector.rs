//! Geographic → canvas projection.

use tc_core::GeoPoint;

use crate::svg::Point;

/// Spans smaller than this are treated as degenerate.
pub const EPSILON: f64 = 1e-6;

fn is_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

/// Linear equirectangular projection fitted to a set of points.
///
/// The bounding box of the input is scaled uniformly so that it fits inside
/// `width × height` minus `padding` on every side; north is up.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SphereProjector {
    padding: f64,
    min_lon: f64,
    max_lat: f64,
    zoom:    f64,
}

impl SphereProjector {
    /// Fit a projector to `points`.  An empty input yields a projector that
    /// maps everything onto `(padding, padding)`.
    pub fn new<I>(points: I, width: f64, height: f64, padding: f64) -> Self
    where
        I: IntoIterator<Item = GeoPoint>,
    {
        let mut points = points.into_iter();
        let Some(first) = points.next() else {
            return Self { padding, min_lon: 0.0, max_lat: 0.0, zoom: 0.0 };
        };

        let (mut min_lat, mut max_lat) = (first.lat, first.lat);
        let (mut min_lon, mut max_lon) = (first.lon, first.lon);
        for p in points {
            min_lat = min_lat.min(p.lat);
            max_lat = max_lat.max(p.lat);
            min_lon = min_lon.min(p.lon);
            max_lon = max_lon.max(p.lon);
        }

        let width_zoom = (!is_zero(max_lon - min_lon))
            .then(|| (width - 2.0 * padding) / (max_lon - min_lon));
        let height_zoom = (!is_zero(max_lat - min_lat))
            .then(|| (height - 2.0 * padding) / (max_lat - min_lat));

        let zoom = match (width_zoom, height_zoom) {
            (Some(w), Some(h)) => w.min(h),
            (Some(w), None)    => w,
            (None, Some(h))    => h,
            (None, None)       => 0.0,
        };

        Self { padding, min_lon, max_lat, zoom }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn project(&self, point: GeoPoint) -> Point {
        Point::new(
            (point.lon - self.min_lon) * self.zoom + self.padding,
            (self.max_lat - point.lat) * self.zoom + self.padding,
        )
    }
}
