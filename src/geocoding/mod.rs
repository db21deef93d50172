pub mod google;

use serde::{Deserialize, Serialize};

use crate::{core::geo::LatLng, Result};

/// One ranked match for a submitted address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeCandidate {
    pub location: LatLng,
    pub formatted_address: Option<String>,
    pub place_id: Option<String>,
}

impl GeocodeCandidate {
    pub fn new(location: LatLng) -> Self {
        Self {
            location,
            formatted_address: None,
            place_id: None,
        }
    }
}

/// A geocoding provider that resolves a free-text address to ranked
/// candidates, best match first.
///
/// An address with no match is `Ok(vec![])`, not an error. Futures are not
/// required to be `Send`: the browser HTTP client is single-threaded.
#[async_trait::async_trait(?Send)]
pub trait Geocoder {
    async fn geocode(&self, address: &str) -> Result<Vec<GeocodeCandidate>>;
}

#[async_trait::async_trait(?Send)]
impl<G: Geocoder + ?Sized> Geocoder for std::rc::Rc<G> {
    async fn geocode(&self, address: &str) -> Result<Vec<GeocodeCandidate>> {
        (**self).geocode(address).await
    }
}
