use foundation::geo::{DEFAULT_ALTITUDE, Point, Position};
use foundation::time::Time;
use runtime::event_bus::EventBus;

use crate::debounce::DebouncedEmitter;
use crate::guard::FeedbackGuard;
use crate::renderer::{CameraScale, CameraView, MapRenderer, RendererMode};
use crate::track::{Segment, track_geometry};
use crate::zoom::{altitude_to_zoom, zoom_to_altitude};

/// Keeps one logical camera [`Position`] synchronized with whichever
/// renderer is active for the current altitude.
///
/// Downward: external position writes move the active camera, guarded so
/// the renderer's own completion events are not re-reported. Upward: user
/// moves flow through the feedback guard and the debounced emitter back to
/// the embedder, which commits the emission to its own position state and
/// feeds it down again through [`set_position`](Self::set_position); the
/// guard absorbs that echo, closing the loop without re-triggering it.
///
/// Everything is driven by logical [`Time`]; the embedder calls
/// [`poll`](Self::poll) from its event loop to expire timers.
pub struct ViewSynchronizer {
    position: Position,
    mode: RendererMode,
    // Renderer handles are created once by the embedder and held for the
    // synchronizer's whole lifetime, never reconstructed per update.
    flat_map: Box<dyn MapRenderer>,
    globe: Box<dyn MapRenderer>,
    guard: FeedbackGuard,
    emitter: DebouncedEmitter,
    points: Vec<Point>,
    path: Vec<Point>,
    points_were_empty: bool,
    path_was_empty: bool,
}

impl ViewSynchronizer {
    /// Start at the default position; the active renderer derives its
    /// camera from it immediately.
    pub fn new(
        now: Time,
        bus: &mut EventBus,
        flat_map: Box<dyn MapRenderer>,
        globe: Box<dyn MapRenderer>,
    ) -> Self {
        let position = Position::default();
        let mut sync = Self {
            position,
            mode: RendererMode::for_altitude(position.altitude),
            flat_map,
            globe,
            guard: FeedbackGuard::new(),
            emitter: DebouncedEmitter::new(),
            points: Vec::new(),
            path: Vec::new(),
            points_were_empty: true,
            path_was_empty: true,
        };
        sync.apply_camera(now, bus);
        sync
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn mode(&self) -> RendererMode {
        self.mode
    }

    /// Externally-imposed position change (the downward direction).
    ///
    /// Clamps, stores, switches renderer mode if the altitude crossed the
    /// threshold, then moves the active camera behind the feedback guard.
    pub fn set_position(&mut self, now: Time, bus: &mut EventBus, position: Position) {
        self.position = Position::new(position.lat_deg, position.lon_deg, position.altitude);

        let mode = RendererMode::for_altitude(self.position.altitude);
        if mode != self.mode {
            self.mode = mode;
            // The incoming renderer re-derives its camera from `position`,
            // not from the outgoing renderer's live state, so the switch
            // can visibly jump. Accepted behavior.
            bus.emit(now, "mode", format!("{mode:?}"));
        }

        self.apply_camera(now, bus);
    }

    /// Replace the data collections, recentring once per arrival.
    ///
    /// Recentring goes to the first element of the path if one has arrived,
    /// else the first point, at [`DEFAULT_ALTITUDE`]. It deliberately
    /// overrides whatever the user last set; the source gives data arrival
    /// precedence over an in-flight pan.
    pub fn sync_data(&mut self, now: Time, bus: &mut EventBus, points: &[Point], path: &[Point]) {
        self.points = points.to_vec();
        self.path = path.to_vec();

        // Keyed on the empty -> non-empty transition of each collection,
        // not on every refresh.
        let path_arrived = self.path_was_empty && !self.path.is_empty();
        let points_arrived = self.points_were_empty && !self.points.is_empty();
        self.path_was_empty = self.path.is_empty();
        self.points_were_empty = self.points.is_empty();

        let recenter = if path_arrived {
            Some(self.path[0])
        } else if points_arrived && self.path.is_empty() {
            Some(self.points[0])
        } else {
            None
        };

        if let Some(first) = recenter {
            bus.emit(
                now,
                "recenter",
                format!("({:.4}, {:.4})", first.lat_deg, first.lon_deg),
            );
            self.set_position(
                now,
                bus,
                Position::new(first.lat_deg, first.lon_deg, DEFAULT_ALTITUDE),
            );
        }
    }

    /// Move-completion raised by the active renderer.
    ///
    /// Guarded events are echoes of our own camera write and are dropped;
    /// everything else is translated back into a [`Position`] and handed to
    /// the debounced emitter.
    pub fn handle_move_end(&mut self, now: Time, bus: &mut EventBus) {
        if self.guard.is_active(now) {
            bus.emit(now, "echo", "discarded renderer move inside guard window");
            return;
        }

        let view = self.active().camera();
        let altitude = match view.scale {
            CameraScale::TileZoom(zoom) => zoom_to_altitude(zoom),
            CameraScale::Altitude(altitude) => altitude,
        };
        self.emitter
            .schedule(now, Position::new(view.lat_deg, view.lon_deg, altitude));
    }

    /// Drive pending timers.
    ///
    /// A returned position is the debounced user move; the embedder commits
    /// it to its externally-owned position state and feeds it back down
    /// through [`set_position`](Self::set_position).
    pub fn poll(&mut self, now: Time, bus: &mut EventBus) -> Option<Position> {
        let emitted = self.emitter.poll(now);
        if let Some(p) = emitted {
            bus.emit(
                now,
                "emit",
                format!("({:.4}, {:.4}, {:.5})", p.lat_deg, p.lon_deg, p.altitude),
            );
        }
        emitted
    }

    /// Teardown: cancel every pending timer so nothing fires against a
    /// renderer that no longer exists.
    pub fn cancel_pending(&mut self) {
        self.guard.cancel();
        self.emitter.cancel();
    }

    /// Drawable geometry for the current collections.
    pub fn geometry(&self) -> Vec<Segment> {
        track_geometry(&self.points, &self.path)
    }

    fn active(&self) -> &dyn MapRenderer {
        match self.mode {
            RendererMode::Globe => self.globe.as_ref(),
            RendererMode::FlatMap => self.flat_map.as_ref(),
        }
    }

    fn apply_camera(&mut self, now: Time, bus: &mut EventBus) {
        // The guard must be armed before the camera call returns so no
        // synchronous completion event can leak through.
        self.guard.arm(now);

        let scale = match self.mode {
            RendererMode::FlatMap => CameraScale::TileZoom(altitude_to_zoom(self.position.altitude)),
            RendererMode::Globe => CameraScale::Altitude(self.position.altitude),
        };
        let view = CameraView::new(self.position.lat_deg, self.position.lon_deg, scale);
        match self.mode {
            RendererMode::Globe => self.globe.set_camera(view),
            RendererMode::FlatMap => self.flat_map.set_camera(view),
        }
        bus.emit(
            now,
            "camera",
            format!("{:?} ({:.4}, {:.4}) {:?}", self.mode, view.lat_deg, view.lon_deg, view.scale),
        );
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use foundation::geo::{DEFAULT_ALTITUDE, Point, Position};
    use foundation::time::Time;
    use pretty_assertions::assert_eq;
    use runtime::event_bus::EventBus;

    use crate::renderer::{CameraScale, CameraView, MapRenderer, RendererMode};
    use crate::sync::ViewSynchronizer;

    /// Renderer double: a camera cell the test can mutate directly to fake
    /// a user drag, shared with the synchronizer's boxed handle.
    #[derive(Clone)]
    struct FakeRenderer {
        camera: Rc<RefCell<CameraView>>,
    }

    impl FakeRenderer {
        fn new(scale: CameraScale) -> Self {
            Self {
                camera: Rc::new(RefCell::new(CameraView::new(0.0, 0.0, scale))),
            }
        }

        fn drag_to(&self, lat_deg: f64, lon_deg: f64) {
            let mut camera = self.camera.borrow_mut();
            camera.lat_deg = lat_deg;
            camera.lon_deg = lon_deg;
        }
    }

    impl MapRenderer for FakeRenderer {
        fn set_camera(&mut self, view: CameraView) {
            *self.camera.borrow_mut() = view;
        }

        fn camera(&self) -> CameraView {
            *self.camera.borrow()
        }
    }

    fn harness() -> (ViewSynchronizer, FakeRenderer, FakeRenderer, EventBus) {
        let flat = FakeRenderer::new(CameraScale::TileZoom(0));
        let globe = FakeRenderer::new(CameraScale::Altitude(DEFAULT_ALTITUDE));
        let mut bus = EventBus::new();
        let sync = ViewSynchronizer::new(
            Time(0.0),
            &mut bus,
            Box::new(flat.clone()),
            Box::new(globe.clone()),
        );
        (sync, flat, globe, bus)
    }

    #[test]
    fn starts_on_the_globe_at_the_default_position() {
        let (sync, _flat, globe, _bus) = harness();
        assert_eq!(sync.mode(), RendererMode::Globe);
        assert_eq!(
            globe.camera(),
            CameraView::new(0.0, 0.0, CameraScale::Altitude(DEFAULT_ALTITUDE))
        );
    }

    #[test]
    fn low_altitude_write_switches_to_the_flat_map_with_tile_zoom() {
        let (mut sync, flat, _globe, mut bus) = harness();
        sync.set_position(Time(1.0), &mut bus, Position::new(44.49, 11.34, 0.39));

        assert_eq!(sync.mode(), RendererMode::FlatMap);
        // 0.39 sits between the zoom-6 (0.44) and zoom-7 (0.22) thresholds.
        assert_eq!(
            flat.camera(),
            CameraView::new(44.49, 11.34, CameraScale::TileZoom(6))
        );
    }

    #[test]
    fn programmatic_write_never_triggers_its_own_emission() {
        let (mut sync, _flat, _globe, mut bus) = harness();
        sync.set_position(Time(1.0), &mut bus, Position::new(10.0, 20.0, 2.0));

        // The renderer raises a completion event for the write it was just
        // handed, synchronously and again shortly after.
        sync.handle_move_end(Time(1.0), &mut bus);
        sync.handle_move_end(Time(1.1), &mut bus);

        for step in 0..100 {
            assert_eq!(sync.poll(Time(1.1 + step as f64 * 0.1), &mut bus), None);
        }
        assert!(bus.events().iter().any(|e| e.kind == "echo"));
    }

    #[test]
    fn drag_burst_emits_once_with_the_settled_position() {
        let (mut sync, _flat, globe, mut bus) = harness();

        // Well past the mount guard window.
        globe.drag_to(1.0, 1.0);
        sync.handle_move_end(Time(1.0), &mut bus);
        globe.drag_to(2.0, 2.0);
        sync.handle_move_end(Time(1.2), &mut bus);
        globe.drag_to(3.0, 3.0);
        sync.handle_move_end(Time(1.4), &mut bus);

        assert_eq!(sync.poll(Time(1.8), &mut bus), None);
        assert_eq!(
            sync.poll(Time(1.9), &mut bus),
            Some(Position::new(3.0, 3.0, DEFAULT_ALTITUDE))
        );
        assert_eq!(sync.poll(Time(5.0), &mut bus), None);
    }

    #[test]
    fn flat_map_moves_report_altitude_derived_from_zoom() {
        let (mut sync, flat, _globe, mut bus) = harness();
        sync.set_position(Time(0.0), &mut bus, Position::new(0.0, 0.0, 0.1));
        assert_eq!(sync.mode(), RendererMode::FlatMap);

        flat.drag_to(45.0, 9.0);
        sync.handle_move_end(Time(1.0), &mut bus);
        let emitted = sync.poll(Time(1.5), &mut bus).expect("debounced emission");

        // The flat camera still holds zoom 8 (threshold 0.11 covers 0.1),
        // so the reported altitude is the zoom-8 lattice value.
        assert_eq!(emitted, Position::new(45.0, 9.0, 0.11));
    }

    #[test]
    fn committing_an_emission_does_not_echo() {
        let (mut sync, _flat, globe, mut bus) = harness();

        globe.drag_to(7.0, 8.0);
        sync.handle_move_end(Time(1.0), &mut bus);
        let emitted = sync.poll(Time(1.5), &mut bus).expect("debounced emission");

        // Embedder commits the emission, which flows back down.
        sync.set_position(Time(1.5), &mut bus, emitted);
        sync.handle_move_end(Time(1.55), &mut bus);
        for step in 0..100 {
            assert_eq!(sync.poll(Time(1.6 + step as f64 * 0.1), &mut bus), None);
        }
    }

    #[test]
    fn teardown_drops_the_pending_emission() {
        let (mut sync, _flat, globe, mut bus) = harness();
        globe.drag_to(5.0, 5.0);
        sync.handle_move_end(Time(1.0), &mut bus);

        sync.cancel_pending();
        assert_eq!(sync.poll(Time(10.0), &mut bus), None);
    }

    #[test]
    fn first_points_arrival_recentres_to_the_first_point() {
        let (mut sync, _flat, _globe, mut bus) = harness();
        let points = [Point::new(1, 10.0, 20.0), Point::new(2, 30.0, 40.0)];
        sync.sync_data(Time(0.5), &mut bus, &points, &[]);

        assert_eq!(sync.position(), Position::new(10.0, 20.0, DEFAULT_ALTITUDE));
        assert_eq!(sync.geometry().len(), 2);
    }

    #[test]
    fn recentring_is_one_shot_per_collection() {
        let (mut sync, _flat, _globe, mut bus) = harness();
        let points = [Point::new(1, 10.0, 20.0)];
        sync.sync_data(Time(0.5), &mut bus, &points, &[]);

        // User pans away; a refresh of the same collection must not yank
        // the view back.
        sync.set_position(Time(1.0), &mut bus, Position::new(-30.0, 60.0, 1.0));
        sync.sync_data(Time(1.1), &mut bus, &points, &[]);
        assert_eq!(sync.position(), Position::new(-30.0, 60.0, 1.0));

        // A path arriving later is a fresh collection and recentres again,
        // overriding the user position by design.
        let path = [Point::new(3, 44.0, 11.0), Point::new(4, 45.0, 12.0)];
        sync.sync_data(Time(2.0), &mut bus, &points, &path);
        assert_eq!(sync.position(), Position::new(44.0, 11.0, DEFAULT_ALTITUDE));
        assert_eq!(sync.geometry().len(), 1);
    }

    #[test]
    fn cleared_and_refilled_path_recentres_again() {
        let (mut sync, _flat, _globe, mut bus) = harness();
        let path = [Point::new(1, 44.0, 11.0), Point::new(2, 45.0, 12.0)];
        sync.sync_data(Time(0.5), &mut bus, &[], &path);

        // Query cleared, then a new query narrows to a different day.
        sync.sync_data(Time(1.0), &mut bus, &[], &[]);
        sync.set_position(Time(1.5), &mut bus, Position::new(0.0, 0.0, 1.0));
        let other = [Point::new(3, 41.9, 12.5)];
        sync.sync_data(Time(2.0), &mut bus, &[], &other);
        assert_eq!(sync.position(), Position::new(41.9, 12.5, DEFAULT_ALTITUDE));
    }

    #[test]
    fn recentring_arms_the_guard() {
        let (mut sync, _flat, _globe, mut bus) = harness();
        sync.sync_data(Time(1.0), &mut bus, &[Point::new(1, 10.0, 20.0)], &[]);

        // Renderer acknowledges the recentring write; must not re-emit.
        sync.handle_move_end(Time(1.05), &mut bus);
        assert_eq!(sync.poll(Time(5.0), &mut bus), None);
    }

    #[test]
    fn mode_switch_is_traced_and_camera_follows_position() {
        let (mut sync, flat, globe, mut bus) = harness();
        sync.set_position(Time(1.0), &mut bus, Position::new(50.0, 8.0, 0.2));
        assert_eq!(sync.mode(), RendererMode::FlatMap);
        assert_eq!(flat.camera().lat_deg, 50.0);

        sync.set_position(Time(2.0), &mut bus, Position::new(50.0, 8.0, 3.0));
        assert_eq!(sync.mode(), RendererMode::Globe);
        // The globe re-derives from position, not from the flat camera.
        assert_eq!(
            globe.camera(),
            CameraView::new(50.0, 8.0, CameraScale::Altitude(3.0))
        );
        assert_eq!(bus.events().iter().filter(|e| e.kind == "mode").count(), 2);
    }
}
