use std::cell::RefCell;
use std::env;
use std::fs;
use std::rc::Rc;

use foundation::geo::{DEFAULT_ALTITUDE, Position};
use formats::{decode_point_feed, path_order};
use runtime::clock::Clock;
use runtime::event_bus::EventBus;
use serde::Deserialize;
use view::renderer::{CameraScale, CameraView, MapRenderer, RendererMode};
use view::sync::ViewSynchronizer;
use view::zoom::{MAX_TILE_ZOOM, zoom_to_altitude};

fn main() {
    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let mut args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(usage());
    }

    let cmd = args[1].clone();
    args.drain(0..2);

    match cmd.as_str() {
        "replay" => cmd_replay(args),
        "geometry" => cmd_geometry(args),
        "zoom-table" => cmd_zoom_table(),
        _ => Err(usage()),
    }
}

fn usage() -> String {
    "usage:\n  \
     tracks replay <feed.json> <script.json> [--path] [--trace]\n  \
     tracks geometry <feed.json> [--path]\n  \
     tracks zoom-table"
        .to_string()
}

/// One step of a recorded interaction script.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ScriptEvent {
    /// Advance the logical clock.
    Advance { dt_s: f64 },
    /// External position write (e.g. a point selected elsewhere in the UI).
    SetPosition { lat: f64, lon: f64, altitude: f64 },
    /// User drags the active renderer camera to a new center.
    Drag { lat: f64, lon: f64 },
    /// The active renderer reports move completion.
    MoveEnd,
}

/// Scripted stand-in for a real renderer: a camera cell the script can
/// drag directly, shared with the synchronizer's boxed handle.
#[derive(Clone)]
struct ScriptedRenderer {
    camera: Rc<RefCell<CameraView>>,
}

impl ScriptedRenderer {
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

impl MapRenderer for ScriptedRenderer {
    fn set_camera(&mut self, view: CameraView) {
        *self.camera.borrow_mut() = view;
    }

    fn camera(&self) -> CameraView {
        *self.camera.borrow()
    }
}

struct FeedArgs {
    feed_path: String,
    script_path: Option<String>,
    as_path: bool,
    trace: bool,
}

fn parse_feed_args(args: Vec<String>, want_script: bool) -> Result<FeedArgs, String> {
    let mut positional: Vec<String> = Vec::new();
    let mut as_path = false;
    let mut trace = false;

    for arg in args {
        match arg.as_str() {
            "--path" => as_path = true,
            "--trace" => trace = true,
            s if s.starts_with('-') => {
                return Err(format!("unknown arg: {s}\n\n{}", usage()));
            }
            _ => positional.push(arg),
        }
    }

    let expected = if want_script { 2 } else { 1 };
    if positional.len() != expected {
        return Err(usage());
    }

    let mut positional = positional.into_iter();
    Ok(FeedArgs {
        feed_path: positional.next().unwrap_or_default(),
        script_path: positional.next(),
        as_path,
        trace,
    })
}

fn load_feed(path: &str, as_path: bool) -> Result<(Vec<foundation::geo::Point>, Vec<foundation::geo::Point>), String> {
    let json = fs::read_to_string(path).map_err(|e| format!("read {path}: {e}"))?;
    let records = decode_point_feed(&json).map_err(|e| format!("decode {path}: {e}"))?;

    if as_path {
        let ordered = path_order(records);
        Ok((Vec::new(), ordered.into_iter().map(|r| r.point).collect()))
    } else {
        Ok((records.into_iter().map(|r| r.point).collect(), Vec::new()))
    }
}

fn cmd_replay(args: Vec<String>) -> Result<(), String> {
    let parsed = parse_feed_args(args, true)?;
    let script_path = parsed.script_path.as_deref().unwrap_or_default();

    let (points, path) = load_feed(&parsed.feed_path, parsed.as_path)?;

    let script_json =
        fs::read_to_string(script_path).map_err(|e| format!("read {script_path}: {e}"))?;
    let events: Vec<ScriptEvent> =
        serde_json::from_str(&script_json).map_err(|e| format!("decode {script_path}: {e}"))?;

    let mut clock = Clock::new();
    let mut bus = EventBus::new();
    let flat_map = ScriptedRenderer::new(CameraScale::TileZoom(0));
    let globe = ScriptedRenderer::new(CameraScale::Altitude(DEFAULT_ALTITUDE));

    let mut sync = ViewSynchronizer::new(
        clock.now(),
        &mut bus,
        Box::new(flat_map.clone()),
        Box::new(globe.clone()),
    );
    sync.sync_data(clock.now(), &mut bus, &points, &path);

    for event in events {
        match event {
            ScriptEvent::Advance { dt_s } => {
                clock.advance(dt_s);
            }
            ScriptEvent::SetPosition { lat, lon, altitude } => {
                sync.set_position(clock.now(), &mut bus, Position::new(lat, lon, altitude));
            }
            ScriptEvent::Drag { lat, lon } => {
                let handle = match sync.mode() {
                    RendererMode::FlatMap => &flat_map,
                    RendererMode::Globe => &globe,
                };
                handle.drag_to(lat, lon);
            }
            ScriptEvent::MoveEnd => sync.handle_move_end(clock.now(), &mut bus),
        }

        if let Some(p) = sync.poll(clock.now(), &mut bus) {
            println!(
                "{}",
                serde_json::json!({
                    "lat": p.lat_deg,
                    "lon": p.lon_deg,
                    "altitude": p.altitude,
                })
            );
            // Commit the emission the way an embedder would; the guard
            // absorbs the resulting echo.
            sync.set_position(clock.now(), &mut bus, p);
        }
    }

    sync.cancel_pending();

    if parsed.trace {
        for e in bus.drain() {
            eprintln!("[{:8.3}] {:>8} {}", e.time.0, e.kind, e.message);
        }
    }

    Ok(())
}

fn cmd_geometry(args: Vec<String>) -> Result<(), String> {
    let parsed = parse_feed_args(args, false)?;
    let (points, path) = load_feed(&parsed.feed_path, parsed.as_path)?;

    for segment in view::track::track_geometry(&points, &path) {
        let vertices: Vec<_> = segment
            .vertices
            .iter()
            .map(|(lat, lon)| serde_json::json!([lat, lon]))
            .collect();
        println!("{}", serde_json::json!({ "vertices": vertices }));
    }

    Ok(())
}

fn cmd_zoom_table() -> Result<(), String> {
    for zoom in 0..=MAX_TILE_ZOOM {
        println!("{zoom:2}  {}", zoom_to_altitude(zoom));
    }
    Ok(())
}
