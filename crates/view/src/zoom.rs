//! Bidirectional mapping between discrete tile zoom and camera altitude.
//!
//! The flat map thinks in integer tile zoom, the globe in continuous
//! altitude; this lattice is the bridge. Both directions are pure, total
//! functions: out-of-range input clamps to the nearest endpoint.

/// Finest tile zoom level the flat map supports.
pub const MAX_TILE_ZOOM: u8 = 18;

/// Representative camera altitude for each tile zoom level, coarsest first.
/// Strictly decreasing, roughly halving per level.
const ZOOM_ALTITUDES: [f64; 19] = [
    28.0, 14.0, 7.0, 3.5, 1.75, 0.875, 0.44, 0.22, 0.11, 0.055, 0.027, 0.014, 0.0069, 0.0035,
    0.0017, 0.00086, 0.00043, 0.00016, 0.00008,
];

/// Representative altitude for a tile zoom level. Zoom beyond the lattice
/// clamps to the finest level.
pub fn zoom_to_altitude(zoom: u8) -> f64 {
    ZOOM_ALTITUDES[zoom.min(MAX_TILE_ZOOM) as usize]
}

/// Tile zoom for a camera altitude: the level whose altitude threshold is
/// the smallest one still covering `altitude`. Altitude above the coarsest
/// threshold maps to zoom 0, below the finest to zoom 18.
pub fn altitude_to_zoom(altitude: f64) -> u8 {
    match ZOOM_ALTITUDES.iter().rposition(|&a| a >= altitude) {
        Some(zoom) => zoom as u8,
        // Above the coarsest threshold (or NaN): coarsest view.
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::{MAX_TILE_ZOOM, ZOOM_ALTITUDES, altitude_to_zoom, zoom_to_altitude};

    #[test]
    fn lattice_is_strictly_decreasing() {
        for pair in ZOOM_ALTITUDES.windows(2) {
            assert!(pair[0] > pair[1], "{} !> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn round_trips_at_every_lattice_point() {
        for zoom in 0..=MAX_TILE_ZOOM {
            assert_eq!(altitude_to_zoom(zoom_to_altitude(zoom)), zoom);
        }
    }

    #[test]
    fn higher_altitude_never_yields_finer_zoom() {
        let mut samples = vec![1e-9, 0.00008, 0.0004, 0.01, 0.1, 0.4, 0.41, 1.0, 2.5, 14.0, 28.0, 100.0];
        samples.extend(ZOOM_ALTITUDES);
        samples.sort_by(|a, b| a.partial_cmp(b).unwrap());
        for pair in samples.windows(2) {
            assert!(
                altitude_to_zoom(pair[0]) >= altitude_to_zoom(pair[1]),
                "altitude {} mapped finer than {}",
                pair[1],
                pair[0],
            );
        }
    }

    #[test]
    fn clamps_out_of_range_altitude() {
        assert_eq!(altitude_to_zoom(1_000.0), 0);
        assert_eq!(altitude_to_zoom(1e-9), MAX_TILE_ZOOM);
        assert_eq!(altitude_to_zoom(-1.0), MAX_TILE_ZOOM);
        assert_eq!(altitude_to_zoom(f64::NAN), 0);
    }

    #[test]
    fn clamps_out_of_range_zoom() {
        assert_eq!(zoom_to_altitude(200), zoom_to_altitude(MAX_TILE_ZOOM));
    }
}
