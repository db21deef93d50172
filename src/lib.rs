//! # pinpoint
//!
//! A small location widget: an embedded map, an address form, and a
//! geocoder that turns the submitted address into a pin on the map.
//!
//! The widget logic is independent of the browser. Map handles, geocoders
//! and form fields sit behind traits, so the same [`LocationWidget`] drives
//! the hosted Google Maps SDK in the browser (feature `wasm`) and the
//! in-memory [`MapView`] in tests and headless tools.

pub mod core;
pub mod geocoding;
pub mod layers;
pub mod prelude;
pub mod widget;

#[cfg(feature = "wasm")]
pub mod web;

pub use crate::core::constants;

// Re-export public API
pub use core::{
    config::{ViewportPolicy, WidgetOptions},
    geo::{LatLng, LatLngBounds, MapTypeId},
    map::{MapOptions, MapSurface, MapView},
};

pub use geocoding::{
    google::{GeocoderConfig, GoogleGeocoder},
    GeocodeCandidate, Geocoder,
};

pub use layers::marker::Marker;

pub use widget::{
    handler::{AddressField, SubmitEvent, SubmitHandler},
    status::{SubmissionOutcome, WidgetStatus},
    LocationWidget, Submission,
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, PinpointError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum PinpointError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Geocoding request failed with HTTP status {0}")]
    HttpStatus(u16),

    #[error("Geocoding service returned {status}: {message}")]
    Service { status: String, message: String },

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("DOM error: {0}")]
    Dom(String),
}

/// Error type alias for convenience
pub type Error = PinpointError;

/// Installs `env_logger` as the `log` backend for native tools and demos.
#[cfg(all(feature = "debug", not(target_arch = "wasm32")))]
pub fn init_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
