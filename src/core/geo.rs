use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::constants::TILE_SIZE;

/// Web Mercator latitude limit
const MAX_LATITUDE: f64 = 85.0511287798;

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lng >= -180.0 && self.lng <= 180.0
    }

    /// Clamps latitude to the range the Mercator projection can represent
    pub fn clamp_lat(lat: f64) -> f64 {
        lat.clamp(-MAX_LATITUDE, MAX_LATITUDE)
    }

    /// Projects to world pixel coordinates at the given zoom (EPSG:3857)
    pub fn to_world_pixel(&self, zoom: f64) -> (f64, f64) {
        let scale = TILE_SIZE * 2_f64.powf(zoom);
        let lat_rad = Self::clamp_lat(self.lat).to_radians();

        let x = (self.lng + 180.0) / 360.0 * scale;
        let y = (1.0 - (PI / 4.0 + lat_rad / 2.0).tan().ln() / PI) / 2.0 * scale;

        (x, y)
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl std::fmt::Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

/// Represents a bounding box of geographical coordinates.
///
/// Bounds start out empty and grow with [`LatLngBounds::extend`]; an empty
/// box holds inverted infinite corners so the first extension collapses it
/// onto that point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Creates bounds from individual coordinates
    pub fn from_coords(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self::new(LatLng::new(south, west), LatLng::new(north, east))
    }

    /// Creates empty bounds that can be extended
    pub fn empty() -> Self {
        Self::new(
            LatLng::new(f64::INFINITY, f64::INFINITY),
            LatLng::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        )
    }

    /// True until the first point is added
    pub fn is_empty(&self) -> bool {
        self.south_west.lat > self.north_east.lat || self.south_west.lng > self.north_east.lng
    }

    /// Checks if the bounds contain a point
    pub fn contains(&self, point: &LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }

    /// Extends the bounds to include a point
    pub fn extend(&mut self, point: &LatLng) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }

    /// Gets the center point of the bounds, `None` when empty
    pub fn center(&self) -> Option<LatLng> {
        if self.is_empty() {
            return None;
        }
        Some(LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        ))
    }

    /// Gets the span of the bounds
    pub fn span(&self) -> LatLng {
        if self.is_empty() {
            return LatLng::default();
        }
        LatLng::new(
            self.north_east.lat - self.south_west.lat,
            self.north_east.lng - self.south_west.lng,
        )
    }

    /// A non-empty box whose corners coincide
    pub fn is_point(&self) -> bool {
        !self.is_empty() && self.south_west == self.north_east
    }
}

impl Default for LatLngBounds {
    fn default() -> Self {
        Self::empty()
    }
}

/// Base map imagery, serialised as the SDK's string ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapTypeId {
    Roadmap,
    Satellite,
    #[default]
    Hybrid,
    Terrain,
}

impl MapTypeId {
    pub fn as_str(&self) -> &'static str {
        match self {
            MapTypeId::Roadmap => "roadmap",
            MapTypeId::Satellite => "satellite",
            MapTypeId::Hybrid => "hybrid",
            MapTypeId::Terrain => "terrain",
        }
    }
}

impl std::fmt::Display for MapTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
