//! Widget-wide defaults. Keeping them in a single place makes the
//! startup view easy to retarget.

/// Latitude of the initial map center.
pub const DEFAULT_LAT: f64 = 39.957139;

/// Longitude of the initial map center.
pub const DEFAULT_LNG: f64 = -86.17521599999999;

/// Zoom level used at startup and after every re-center.
pub const DEFAULT_ZOOM: u8 = 15;

/// Title of the marker dropped at the default center.
pub const DEFAULT_MARKER_TITLE: &str = "Eleven Fifty Coding Academy";

/// Google Geocoding JSON endpoint.
pub const GEOCODE_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// CSS selector of the address form.
pub const DEFAULT_FORM_SELECTOR: &str = "form#geocoder";

/// CSS selector of the map container.
pub const DEFAULT_MAP_SELECTOR: &str = "#map";

/// Name of the address input inside the form.
pub const ADDRESS_FIELD_NAME: &str = "address";

/// Square tile size in pixels used by the Web-Mercator projection.
pub const TILE_SIZE: f64 = 256.0;

/// Zoom range supported by the hosted SDK.
pub const MIN_ZOOM: u8 = 0;
pub const MAX_ZOOM: u8 = 21;

/// Headless viewport size used when no container size is known.
pub const DEFAULT_VIEWPORT_SIZE: (f64, f64) = (800.0, 600.0);

/// Padding in pixels kept around fitted bounds.
pub const FIT_BOUNDS_PADDING: f64 = 20.0;
