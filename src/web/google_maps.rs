//! Bindings to the hosted Google Maps JavaScript SDK.
//!
//! Only the handful of constructors and methods the widget drives are
//! bound. The SDK must already be loaded on the page (`google.maps`).

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::{
    core::{
        geo::{LatLng, LatLngBounds, MapTypeId},
        map::{MapOptions, MapSurface},
    },
    layers::marker::Marker,
    PinpointError, Result,
};

pub mod sdk {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = ["google", "maps"])]
        pub type Map;

        #[wasm_bindgen(constructor, js_namespace = ["google", "maps"])]
        pub fn new(element: &web_sys::Element, options: &JsValue) -> Map;

        #[wasm_bindgen(method, js_name = setOptions)]
        pub fn set_options(this: &Map, options: &JsValue);

        #[wasm_bindgen(method, js_name = fitBounds)]
        pub fn fit_bounds(this: &Map, bounds: &LatLngBounds);

        #[wasm_bindgen(method, js_name = getCenter)]
        pub fn get_center(this: &Map) -> Option<LatLng>;

        #[wasm_bindgen(method, js_name = getZoom)]
        pub fn get_zoom(this: &Map) -> Option<f64>;

        #[wasm_bindgen(js_namespace = ["google", "maps"])]
        pub type Marker;

        #[wasm_bindgen(constructor, js_namespace = ["google", "maps"])]
        pub fn new(options: &JsValue) -> Marker;

        #[wasm_bindgen(js_namespace = ["google", "maps"])]
        pub type LatLng;

        #[wasm_bindgen(constructor, js_namespace = ["google", "maps"])]
        pub fn new(lat: f64, lng: f64) -> LatLng;

        #[wasm_bindgen(method)]
        pub fn lat(this: &LatLng) -> f64;

        #[wasm_bindgen(method)]
        pub fn lng(this: &LatLng) -> f64;

        #[wasm_bindgen(js_namespace = ["google", "maps"])]
        pub type LatLngBounds;

        #[wasm_bindgen(constructor, js_namespace = ["google", "maps"])]
        pub fn new() -> LatLngBounds;

        #[wasm_bindgen(method)]
        pub fn extend(this: &LatLngBounds, point: &LatLng) -> LatLngBounds;
    }
}

/// Converts any serde value into a plain JS object
fn to_js<T: Serialize>(value: &T) -> Result<JsValue> {
    let json = serde_json::to_string(value)?;
    js_sys::JSON::parse(&json).map_err(|e| PinpointError::Dom(format!("{e:?}")))
}

/// A `google.maps.Map` steered by the widget.
///
/// `center()` and `zoom()` ask the SDK for its live view. `fitBounds`
/// animates, so right after [`MapSurface::fit_bounds`] they may still show
/// the previous view. When the SDK reports nothing yet, they fall back to
/// the last options applied through [`MapSurface::set_options`].
pub struct GoogleMap {
    handle: sdk::Map,
    markers: Vec<sdk::Marker>,
    /// Last options handed to `setOptions`
    applied: MapOptions,
}

impl GoogleMap {
    /// Creates the SDK map inside `element`
    pub fn attach(element: &web_sys::Element, options: MapOptions) -> Result<Self> {
        let handle = sdk::Map::new(element, &to_js(&options)?);
        Ok(Self {
            handle,
            markers: Vec::new(),
            applied: options,
        })
    }

    pub fn handle(&self) -> &sdk::Map {
        &self.handle
    }
}

impl MapSurface for GoogleMap {
    fn set_options(&mut self, options: MapOptions) -> Result<()> {
        self.handle.set_options(&to_js(&options)?);
        self.applied = options;
        Ok(())
    }

    fn fit_bounds(&mut self, bounds: &LatLngBounds) -> Result<()> {
        if bounds.is_empty() {
            return Ok(());
        }

        let sdk_bounds = sdk::LatLngBounds::new();
        sdk_bounds.extend(&sdk::LatLng::new(bounds.south_west.lat, bounds.south_west.lng));
        sdk_bounds.extend(&sdk::LatLng::new(bounds.north_east.lat, bounds.north_east.lng));
        self.handle.fit_bounds(&sdk_bounds);
        Ok(())
    }

    fn add_marker(&mut self, marker: Marker) -> Result<()> {
        let options = to_js(&marker.options())?;
        js_sys::Reflect::set(&options, &JsValue::from_str("map"), &self.handle)
            .map_err(|e| PinpointError::Dom(format!("{e:?}")))?;

        self.markers.push(sdk::Marker::new(&options));
        Ok(())
    }

    fn center(&self) -> LatLng {
        self.handle
            .get_center()
            .map(|center| LatLng::new(center.lat(), center.lng()))
            .unwrap_or(self.applied.center)
    }

    fn zoom(&self) -> u8 {
        self.handle
            .get_zoom()
            .map(|zoom| zoom.round().clamp(0.0, u8::MAX as f64) as u8)
            .unwrap_or(self.applied.zoom)
    }

    fn map_type(&self) -> MapTypeId {
        self.applied.map_type
    }

    fn marker_count(&self) -> usize {
        self.markers.len()
    }
}
