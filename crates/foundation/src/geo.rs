/// Camera altitude used when nothing better is known: the initial view and
/// recentring when data first arrives.
pub const DEFAULT_ALTITUDE: f64 = 2.5;

/// Smallest representable camera altitude. Altitude is strictly positive;
/// zero would put the camera on the surface and break the zoom mapping.
pub const MIN_ALTITUDE: f64 = 1e-5;

/// The one logical camera position shared by both renderers.
///
/// Constructors clamp into the valid domain; malformed input is absorbed,
/// never surfaced as an error.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Position {
    /// Latitude in degrees, [-90, 90].
    pub lat_deg: f64,
    /// Longitude in degrees, [-180, 180].
    pub lon_deg: f64,
    /// Camera distance from the surface in globe units, > 0.
    pub altitude: f64,
}

impl Position {
    pub fn new(lat_deg: f64, lon_deg: f64, altitude: f64) -> Self {
        Self {
            lat_deg: clamp_lat_deg(lat_deg),
            lon_deg: clamp_lon_deg(lon_deg),
            altitude: clamp_altitude(altitude),
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(0.0, 0.0, DEFAULT_ALTITUDE)
    }
}

/// A visited place: one marker or path vertex. Immutable once received.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Point {
    pub id: i64,
    pub lat_deg: f64,
    pub lon_deg: f64,
}

impl Point {
    pub fn new(id: i64, lat_deg: f64, lon_deg: f64) -> Self {
        Self {
            id,
            lat_deg: clamp_lat_deg(lat_deg),
            lon_deg: clamp_lon_deg(lon_deg),
        }
    }
}

pub fn clamp_lat_deg(deg: f64) -> f64 {
    if deg.is_nan() { 0.0 } else { deg.clamp(-90.0, 90.0) }
}

pub fn clamp_lon_deg(deg: f64) -> f64 {
    if deg.is_nan() {
        0.0
    } else {
        deg.clamp(-180.0, 180.0)
    }
}

pub fn clamp_altitude(altitude: f64) -> f64 {
    if altitude.is_nan() {
        DEFAULT_ALTITUDE
    } else {
        altitude.max(MIN_ALTITUDE)
    }
}
