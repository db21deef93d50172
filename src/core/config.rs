//! Configuration for the location widget.
//!
//! Every option has a default matching the stock widget, so callers
//! usually start from [`WidgetOptions::default`] and override a field or
//! two. The structs derive `serde`, which lets the browser entry point take
//! its configuration as a JSON object.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_FORM_SELECTOR, DEFAULT_LAT, DEFAULT_LNG, DEFAULT_MAP_SELECTOR, DEFAULT_MARKER_TITLE,
    DEFAULT_ZOOM,
};
use crate::core::geo::{LatLng, MapTypeId};
use crate::core::map::MapOptions;
use crate::geocoding::google::GeocoderConfig;

/// Decides which view wins after a location is added.
///
/// Re-centering on the new point and fitting all accumulated points pull
/// the viewport in different directions; the policy picks one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewportPolicy {
    /// Center on the latest location at the default zoom.
    #[default]
    CenterOnLatest,
    /// Fit the viewport to every location added so far.
    FitAllLocations,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetOptions {
    pub default_center: LatLng,
    pub default_zoom: u8,
    pub map_type: MapTypeId,
    pub default_marker_title: String,
    pub viewport_policy: ViewportPolicy,
    pub form_selector: String,
    pub map_selector: String,
    /// Element whose text mirrors the widget status, if any.
    pub status_selector: Option<String>,
    pub geocoder: GeocoderConfig,
}

impl WidgetOptions {
    /// Map options for the startup view
    pub fn initial_map_options(&self) -> MapOptions {
        MapOptions {
            center: self.default_center,
            zoom: self.default_zoom,
            map_type: self.map_type,
        }
    }

    /// Map options used when re-centering on `center`
    pub fn recenter_options(&self, center: LatLng) -> MapOptions {
        MapOptions {
            center,
            zoom: self.default_zoom,
            map_type: self.map_type,
        }
    }

    pub fn with_viewport_policy(mut self, policy: ViewportPolicy) -> Self {
        self.viewport_policy = policy;
        self
    }

    pub fn with_geocoder(mut self, geocoder: GeocoderConfig) -> Self {
        self.geocoder = geocoder;
        self
    }
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            default_center: LatLng::new(DEFAULT_LAT, DEFAULT_LNG),
            default_zoom: DEFAULT_ZOOM,
            map_type: MapTypeId::Hybrid,
            default_marker_title: DEFAULT_MARKER_TITLE.to_string(),
            viewport_policy: ViewportPolicy::default(),
            form_selector: DEFAULT_FORM_SELECTOR.to_string(),
            map_selector: DEFAULT_MAP_SELECTOR.to_string(),
            status_selector: None,
            geocoder: GeocoderConfig::default(),
        }
    }
}
