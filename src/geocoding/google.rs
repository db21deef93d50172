//! Google Geocoding API backend.
//!
//! One `GET {base_url}?address=<urlencoded>` per lookup. The response is
//! consumed as `{ status, results: [ { geometry: { location } } ] }` and
//! everything else in the payload is ignored.

use serde::{Deserialize, Serialize};
use url::Url;

use super::{GeocodeCandidate, Geocoder};
use crate::{constants::GEOCODE_ENDPOINT, core::geo::LatLng, PinpointError, Result};

const STATUS_OK: &str = "OK";
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    /// ccTLD region bias, e.g. `"us"`
    pub region: Option<String>,
    pub language: Option<String>,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: GEOCODE_ENDPOINT.to_string(),
            api_key: None,
            region: None,
            language: None,
        }
    }
}

impl GeocoderConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    status: Option<String>,
    /// Entries are decoded one by one so a broken lower-ranked entry
    /// cannot sink the whole lookup
    #[serde(default)]
    results: Vec<serde_json::Value>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
    #[serde(default)]
    formatted_address: Option<String>,
    #[serde(default)]
    place_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Clone)]
pub struct GoogleGeocoder {
    client: reqwest::Client,
    config: GeocoderConfig,
}

impl GoogleGeocoder {
    pub fn new(config: GeocoderConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: GeocoderConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &GeocoderConfig {
        &self.config
    }

    /// Builds the lookup URL; the address is passed through untrimmed
    pub fn request_url(&self, address: &str) -> Result<Url> {
        let mut url = Url::parse(&self.config.base_url)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("address", address);
            if let Some(key) = &self.config.api_key {
                query.append_pair("key", key);
            }
            if let Some(region) = &self.config.region {
                query.append_pair("region", region);
            }
            if let Some(language) = &self.config.language {
                query.append_pair("language", language);
            }
        }
        Ok(url)
    }
}

impl Default for GoogleGeocoder {
    fn default() -> Self {
        Self::new(GeocoderConfig::default())
    }
}

#[async_trait::async_trait(?Send)]
impl Geocoder for GoogleGeocoder {
    async fn geocode(&self, address: &str) -> Result<Vec<GeocodeCandidate>> {
        let url = self.request_url(address)?;
        log::debug!("geocoding {:?}", address);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PinpointError::HttpStatus(status.as_u16()));
        }

        let body = response.text().await?;
        parse_response(&body)
    }
}

/// Turns a Geocoding API body into ranked candidates
fn parse_response(body: &str) -> Result<Vec<GeocodeCandidate>> {
    let response: GeocodeResponse = serde_json::from_str(body)?;

    match response.status.as_deref() {
        None | Some(STATUS_OK) => {}
        Some(STATUS_ZERO_RESULTS) => return Ok(Vec::new()),
        Some(other) => {
            return Err(PinpointError::Service {
                status: other.to_string(),
                message: response.error_message.unwrap_or_default(),
            })
        }
    }

    let mut candidates = Vec::with_capacity(response.results.len());
    let mut first_error = None;
    for (rank, raw) in response.results.into_iter().enumerate() {
        match candidate_from(raw) {
            Ok(candidate) => candidates.push(candidate),
            Err(err) => {
                log::debug!("skipping geocode result #{}: {}", rank, err);
                first_error.get_or_insert(err);
            }
        }
    }

    // Only fail when nothing usable came back
    match first_error {
        Some(err) if candidates.is_empty() => Err(err),
        _ => Ok(candidates),
    }
}

fn candidate_from(raw: serde_json::Value) -> Result<GeocodeCandidate> {
    let result: GeocodeResult = serde_json::from_value(raw)?;
    let location = result.geometry.location;
    if !location.is_valid() {
        return Err(PinpointError::InvalidCoordinates(location.to_string()));
    }
    Ok(GeocodeCandidate {
        location,
        formatted_address: result.formatted_address,
        place_id: result.place_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url_encodes_address() {
        let geocoder = GoogleGeocoder::default();
        let url = geocoder
            .request_url("1 Infinite Loop, Cupertino, CA")
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://maps.googleapis.com/maps/api/geocode/json?address=1+Infinite+Loop%2C+Cupertino%2C+CA"
        );
    }

    #[test]
    fn test_request_url_keeps_empty_address_and_appends_key() {
        let geocoder = GoogleGeocoder::new(GeocoderConfig::default().with_api_key("secret"));
        let url = geocoder.request_url("").unwrap();
        assert_eq!(url.query(), Some("address=&key=secret"));
    }

    #[test]
    fn test_invalid_base_url() {
        let geocoder = GoogleGeocoder::new(GeocoderConfig::default().with_base_url("not a url"));
        assert!(matches!(
            geocoder.request_url("x"),
            Err(PinpointError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_parse_ranked_results() {
        let body = r#"{
            "status": "OK",
            "results": [
                { "formatted_address": "1 Infinite Loop", "place_id": "abc",
                  "geometry": { "location": { "lat": 37.3318, "lng": -122.0312 } } },
                { "geometry": { "location": { "lat": 37.0, "lng": -122.0 } } }
            ]
        }"#;

        let candidates = parse_response(body).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].location, LatLng::new(37.3318, -122.0312));
        assert_eq!(candidates[0].formatted_address.as_deref(), Some("1 Infinite Loop"));
        assert_eq!(candidates[1].place_id, None);
    }

    #[test]
    fn test_parse_without_status_field() {
        let body = r#"{ "results": [ { "geometry": { "location": { "lat": 1.5, "lng": 2.5 } } } ] }"#;
        let candidates = parse_response(body).unwrap();
        assert_eq!(candidates[0].location, LatLng::new(1.5, 2.5));
    }

    #[test]
    fn test_parse_zero_results() {
        assert!(parse_response(r#"{ "status": "ZERO_RESULTS", "results": [] }"#)
            .unwrap()
            .is_empty());
        assert!(parse_response(r#"{ "results": [] }"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_service_error() {
        let err = parse_response(
            r#"{ "status": "REQUEST_DENIED", "results": [], "error_message": "API key missing" }"#,
        )
        .unwrap_err();

        match err {
            PinpointError::Service { status, message } => {
                assert_eq!(status, "REQUEST_DENIED");
                assert_eq!(message, "API key missing");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_malformed_json() {
        assert!(matches!(
            parse_response("<html>"),
            Err(PinpointError::Serialization(_))
        ));
    }

    #[test]
    fn test_broken_lower_ranked_results_are_skipped() {
        let body = r#"{
            "status": "OK",
            "results": [
                { "geometry": { "location": { "lat": 37.3318, "lng": -122.0312 } } },
                { "types": ["route"] },
                { "geometry": { "location": { "lat": 95.0, "lng": 0.0 } } }
            ]
        }"#;

        let candidates = parse_response(body).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].location, LatLng::new(37.3318, -122.0312));
    }

    #[test]
    fn test_broken_top_result_falls_back_to_next() {
        let body = r#"{ "results": [
            { "geometry": { "location": { "lat": 95.0, "lng": 0.0 } } },
            { "geometry": { "location": { "lat": 1.5, "lng": 2.5 } } }
        ] }"#;

        let candidates = parse_response(body).unwrap();
        assert_eq!(candidates[0].location, LatLng::new(1.5, 2.5));
    }

    #[test]
    fn test_all_results_broken_is_an_error() {
        let missing = parse_response(r#"{ "results": [ { "types": ["route"] } ] }"#);
        assert!(matches!(missing, Err(PinpointError::Serialization(_))));

        let out_of_range = parse_response(
            r#"{ "results": [ { "geometry": { "location": { "lat": 95.0, "lng": 0.0 } } } ] }"#,
        );
        assert!(matches!(out_of_range, Err(PinpointError::InvalidCoordinates(_))));
    }

    #[test]
    fn test_request_url_appends_region_and_language() {
        let config = GeocoderConfig {
            region: Some("us".to_string()),
            language: Some("en".to_string()),
            ..GeocoderConfig::default().with_api_key("secret")
        };
        let url = GoogleGeocoder::new(config).request_url("Cupertino").unwrap();
        assert_eq!(
            url.query(),
            Some("address=Cupertino&key=secret&region=us&language=en")
        );
    }
}
