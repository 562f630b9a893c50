use foundation::geo::Point;
use serde::Deserialize;

/// One feed record: a visited place and the moment it was recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedPoint {
    pub point: Point,
    /// ISO-8601 timestamp as the backend sent it.
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
struct FeedRecord {
    timestamp: String,
    coordinates: FeedCoordinates,
}

#[derive(Debug, Deserialize)]
struct FeedCoordinates {
    id: i64,
    lat: f64,
    lon: f64,
}

#[derive(Debug)]
pub enum FeedError {
    Json(serde_json::Error),
    /// A record carried a NaN or infinite coordinate.
    NonFiniteCoordinate { id: i64 },
}

impl std::fmt::Display for FeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedError::Json(e) => write!(f, "malformed point feed: {e}"),
            FeedError::NonFiniteCoordinate { id } => {
                write!(f, "non-finite coordinate in record {id}")
            }
        }
    }
}

impl std::error::Error for FeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeedError::Json(e) => Some(e),
            FeedError::NonFiniteCoordinate { .. } => None,
        }
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(e: serde_json::Error) -> Self {
        FeedError::Json(e)
    }
}

/// Decode the backend's point feed shape:
/// `[{ "timestamp": ..., "coordinates": { "id", "lat", "lon" } }]`.
///
/// Coordinates outside the valid lat/lon domain are clamped by
/// [`Point::new`]; non-finite values are rejected outright.
pub fn decode_point_feed(json: &str) -> Result<Vec<TimedPoint>, FeedError> {
    let records: Vec<FeedRecord> = serde_json::from_str(json)?;

    let mut out = Vec::with_capacity(records.len());
    for record in records {
        let c = &record.coordinates;
        if !c.lat.is_finite() || !c.lon.is_finite() {
            return Err(FeedError::NonFiniteCoordinate { id: c.id });
        }
        out.push(TimedPoint {
            point: Point::new(c.id, c.lat, c.lon),
            timestamp: record.timestamp,
        });
    }
    Ok(out)
}

/// Order feed records as a path: ascending by timestamp. The backend emits
/// ISO-8601 timestamps, which sort correctly as plain strings.
pub fn path_order(mut records: Vec<TimedPoint>) -> Vec<TimedPoint> {
    records.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    records
}
