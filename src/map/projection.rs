use crate::error::QuizError;
use crate::quiz::region::{GeoRing, PixelRing};

/// Geographic bounding box spanning a whole dataset: (min_lon, min_lat,
/// max_lon, max_lat). Computed once at load time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoBounds {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl GeoBounds {
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Accumulate the bounds of every (lon, lat) pair in the iterator.
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let mut bounds = Self::new(
            f64::INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::NEG_INFINITY,
        );
        for (lon, lat) in points {
            bounds.expand(lon, lat);
        }
        bounds
    }

    pub fn expand(&mut self, lon: f64, lat: f64) {
        self.min_lon = self.min_lon.min(lon);
        self.max_lon = self.max_lon.max(lon);
        self.min_lat = self.min_lat.min(lat);
        self.max_lat = self.max_lat.max(lat);
    }

    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }
}

/// Linear map from geographic coordinates onto a fixed pixel surface.
///
/// One uniform scale factor `min(width / lon_span, height / lat_span)` is
/// used for both axes, so the dataset fits the surface without aspect
/// distortion. The projected extent is anchored at the surface's top-left
/// corner: `(min_lon, max_lat)` lands on pixel (0, 0). The y axis is flipped
/// because latitude grows northward while pixel rows grow downward.
///
/// Scale and origin are fixed at construction; every `project_point` call
/// recomputes from them, so projecting the same point twice always yields
/// the same pixel.
#[derive(Clone, Debug)]
pub struct Projector {
    min_lon: f64,
    max_lat: f64,
    scale: f64,
}

impl Projector {
    /// Fails with `DegenerateBounds` when either span is non-positive
    /// (single-point or collinear datasets cannot be scaled).
    pub fn new(
        bounds: GeoBounds,
        surface_width: usize,
        surface_height: usize,
    ) -> Result<Self, QuizError> {
        let lon_span = bounds.lon_span();
        let lat_span = bounds.lat_span();
        if !(lon_span > 0.0 && lat_span > 0.0) {
            return Err(QuizError::DegenerateBounds { lon_span, lat_span });
        }

        let scale = (surface_width as f64 / lon_span).min(surface_height as f64 / lat_span);
        Ok(Self {
            min_lon: bounds.min_lon,
            max_lat: bounds.max_lat,
            scale,
        })
    }

    /// Project one geographic point to pixel coordinates.
    /// Rounded, not truncated: truncation would bias every vertex south-west.
    pub fn project_point(&self, lon: f64, lat: f64) -> (i32, i32) {
        let x = (lon - self.min_lon) * self.scale;
        let y = (self.max_lat - lat) * self.scale;
        (x.round() as i32, y.round() as i32)
    }

    /// Project every vertex of a ring in order. Ring closure is preserved:
    /// identical input vertices project to identical pixels.
    pub fn project_ring(&self, ring: &GeoRing) -> PixelRing {
        ring.iter()
            .map(|&(lon, lat)| self.project_point(lon, lat))
            .collect()
    }
}
