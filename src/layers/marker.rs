use serde::{Deserialize, Serialize};

use crate::core::geo::LatLng;

/// A pin placed on the map. Once added, a marker is never removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    position: LatLng,
    title: String,
}

impl Marker {
    pub fn new(position: LatLng, title: impl Into<String>) -> Self {
        Self {
            position,
            title: title.into(),
        }
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Marker options in the shape the SDK constructor expects
    pub fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "position": {
                "lat": self.position.lat,
                "lng": self.position.lng
            },
            "title": self.title
        })
    }
}
