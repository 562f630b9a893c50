use foundation::geo::Point;

/// A drawable polyline in geographic coordinates (degrees).
///
/// A single visited place is a degenerate segment with both endpoints
/// equal, so one drawing primitive serves both routes and scatters.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub vertices: Vec<(f64, f64)>,
}

/// Build the drawable geometry for the current collections.
///
/// A non-empty path wins and becomes one connected line in its given
/// (time) order; otherwise every point stands alone as a zero-length
/// segment.
pub fn track_geometry(points: &[Point], path: &[Point]) -> Vec<Segment> {
    if !path.is_empty() {
        return vec![Segment {
            vertices: path.iter().map(|p| (p.lat_deg, p.lon_deg)).collect(),
        }];
    }

    points
        .iter()
        .map(|p| Segment {
            vertices: vec![(p.lat_deg, p.lon_deg); 2],
        })
        .collect()
}
