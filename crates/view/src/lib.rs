//! View-state synchronization between a flat tile map and a 3D globe.
//!
//! One logical camera [`Position`](foundation::geo::Position) is kept in
//! sync with whichever renderer is active for the current altitude.
//! External writes flow down into the renderer camera behind a feedback
//! guard; user interaction flows back up through a debounced emitter, so a
//! camera write can never re-trigger its own reporting path.

pub mod debounce;
pub mod guard;
pub mod renderer;
pub mod sync;
pub mod track;
pub mod zoom;

pub use renderer::{CameraScale, CameraView, MapRenderer, RendererMode};
pub use sync::ViewSynchronizer;
