/// Altitude above which the 3D globe takes over from the flat tile map.
pub const GLOBE_ALTITUDE_THRESHOLD: f64 = 0.4;

/// Camera scale unit, renderer dependent: the flat map thinks in discrete
/// tile zoom, the globe in continuous altitude.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum CameraScale {
    TileZoom(u8),
    Altitude(f64),
}

/// Snapshot of a renderer camera.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraView {
    pub lat_deg: f64,
    pub lon_deg: f64,
    pub scale: CameraScale,
}

impl CameraView {
    pub fn new(lat_deg: f64, lon_deg: f64, scale: CameraScale) -> Self {
        Self {
            lat_deg,
            lon_deg,
            scale,
        }
    }
}

/// Which renderer owns the screen.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RendererMode {
    Globe,
    FlatMap,
}

impl RendererMode {
    /// Pure function of the current altitude, recomputed on every change.
    /// No hysteresis.
    pub fn for_altitude(altitude: f64) -> Self {
        if altitude > GLOBE_ALTITUDE_THRESHOLD {
            RendererMode::Globe
        } else {
            RendererMode::FlatMap
        }
    }
}

/// Opaque renderer seam.
///
/// Real tile/WebGL renderers live behind this trait; the synchronizer only
/// ever writes and reads the camera through it and never touches engine
/// internals. Move-completion events arrive out of band: the embedder
/// forwards them to [`ViewSynchronizer::handle_move_end`](crate::sync::ViewSynchronizer::handle_move_end).
pub trait MapRenderer {
    fn set_camera(&mut self, view: CameraView);
    fn camera(&self) -> CameraView;
}
