//! Prelude module for common pinpoint types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use pinpoint::prelude::*;`

pub use crate::core::{
    config::{ViewportPolicy, WidgetOptions},
    geo::{LatLng, LatLngBounds, MapTypeId},
    map::{MapOptions, MapSurface, MapView},
};

pub use crate::geocoding::{
    google::{GeocoderConfig, GoogleGeocoder},
    GeocodeCandidate, Geocoder,
};

pub use crate::layers::marker::Marker;

pub use crate::widget::{
    handler::{AddressField, SubmitEvent, SubmitHandler},
    LocationWidget, Submission, SubmissionOutcome, WidgetStatus,
};

pub use crate::{Error as PinpointError, Result};

pub use std::{cell::RefCell, rc::Rc};
