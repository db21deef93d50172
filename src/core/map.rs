use serde::{Deserialize, Serialize};

use crate::{
    constants::{DEFAULT_VIEWPORT_SIZE, FIT_BOUNDS_PADDING, MAX_ZOOM, MIN_ZOOM},
    core::geo::{LatLng, LatLngBounds, MapTypeId},
    layers::marker::Marker,
    Result,
};

/// View options applied in one shot, mirroring the SDK's `setOptions`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapOptions {
    pub center: LatLng,
    pub zoom: u8,
    #[serde(rename = "mapTypeId")]
    pub map_type: MapTypeId,
}

/// A map the widget can steer.
///
/// Implemented by the in-memory [`MapView`] and, in the browser, by the
/// Google Maps handle in `web::google_maps`.
pub trait MapSurface {
    /// Overwrites center, zoom and map type
    fn set_options(&mut self, options: MapOptions) -> Result<()>;

    /// Adjusts center and zoom so `bounds` is fully visible
    fn fit_bounds(&mut self, bounds: &LatLngBounds) -> Result<()>;

    /// Places a marker; markers are owned by the map from then on
    fn add_marker(&mut self, marker: Marker) -> Result<()>;

    fn center(&self) -> LatLng;

    fn zoom(&self) -> u8;

    fn map_type(&self) -> MapTypeId;

    fn marker_count(&self) -> usize;
}

/// Headless map state: what the SDK map would show, without rendering
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    center: LatLng,
    zoom: u8,
    map_type: MapTypeId,
    /// Container size in pixels
    size: (f64, f64),
    markers: Vec<Marker>,
}

impl MapView {
    pub fn new(options: MapOptions) -> Self {
        Self::with_size(options, DEFAULT_VIEWPORT_SIZE)
    }

    pub fn with_size(options: MapOptions, size: (f64, f64)) -> Self {
        Self {
            center: options.center,
            zoom: options.zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            map_type: options.map_type,
            size,
            markers: Vec::new(),
        }
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Largest zoom at which `bounds` fits inside the padded viewport
    fn best_fit_zoom(&self, bounds: &LatLngBounds) -> u8 {
        let available = (
            (self.size.0 - 2.0 * FIT_BOUNDS_PADDING).max(1.0),
            (self.size.1 - 2.0 * FIT_BOUNDS_PADDING).max(1.0),
        );
        let north_west = LatLng::new(bounds.north_east.lat, bounds.south_west.lng);
        let south_east = LatLng::new(bounds.south_west.lat, bounds.north_east.lng);

        let mut best_zoom = MIN_ZOOM;
        for zoom in MIN_ZOOM..=MAX_ZOOM {
            let (nw_x, nw_y) = north_west.to_world_pixel(zoom as f64);
            let (se_x, se_y) = south_east.to_world_pixel(zoom as f64);

            if (se_x - nw_x).abs() <= available.0 && (se_y - nw_y).abs() <= available.1 {
                best_zoom = zoom;
            } else {
                break;
            }
        }
        best_zoom
    }
}

impl MapSurface for MapView {
    fn set_options(&mut self, options: MapOptions) -> Result<()> {
        self.center = options.center;
        self.zoom = options.zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.map_type = options.map_type;
        Ok(())
    }

    fn fit_bounds(&mut self, bounds: &LatLngBounds) -> Result<()> {
        let Some(center) = bounds.center() else {
            return Ok(());
        };

        self.center = center;
        self.zoom = self.best_fit_zoom(bounds);
        log::debug!("fit bounds -> center {} zoom {}", self.center, self.zoom);
        Ok(())
    }

    fn add_marker(&mut self, marker: Marker) -> Result<()> {
        self.markers.push(marker);
        Ok(())
    }

    fn center(&self) -> LatLng {
        self.center
    }

    fn zoom(&self) -> u8 {
        self.zoom
    }

    fn map_type(&self) -> MapTypeId {
        self.map_type
    }

    fn marker_count(&self) -> usize {
        self.markers.len()
    }
}
