//! The host-agnostic application state machine.
//!
//! One instance per page. The wasm layer feeds it browser events and a
//! monotonic clock; input draining, camera update, world animation, overlay
//! sync, and render submission all happen inside `tick`, in that order, so
//! there is never a staleness window between 3D state and DOM state.

use camera::{CameraConfig, CameraController};
use catalog::{CatalogError, RawSection, SectionCatalog};
use foundation::SectionId;
use foundation::math::Vec3;
use overlay::{DomPort, OverlayManager, ScrollMap};
use route::{RingRoute, Route, RouteError, SplineRoute};
use runtime::{
    Frame, FrameProfiler, InputEvent, InputQueue, QualityGovernor, TraceEvent, TraceKind,
    TraceLog,
};
use serde::Deserialize;
use world::{RenderPort, World, WorldSettings};

/// Page-level configuration embedded in the host document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    pub sections: Vec<RawSection>,
    #[serde(default)]
    pub route: Option<RouteConfig>,
    /// Scroll track height in CSS pixels.
    #[serde(default)]
    pub page_height: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RouteConfig {
    Spline { control_points: Vec<[f64; 3]> },
    Ring {
        radius: f64,
        wobble_amplitude: f64,
        wobble_lobes: f64,
    },
}

#[derive(Debug)]
pub enum AppError {
    Parse(String),
    Config(CatalogError),
    Route(RouteError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Parse(msg) => write!(f, "app config parse error: {msg}"),
            AppError::Config(e) => write!(f, "section config error: {e}"),
            AppError::Route(e) => write!(f, "route config error: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

/// The default scenic route used when the page does not author one: a
/// gentle S-curve heading into the distance.
fn default_route() -> SplineRoute {
    let points = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(18.0, 0.0, 60.0),
        Vec3::new(-14.0, 0.0, 130.0),
        Vec3::new(10.0, 0.0, 200.0),
        Vec3::new(0.0, 0.0, 270.0),
    ];
    SplineRoute::new(points).expect("static control points")
}

fn build_route(config: Option<RouteConfig>) -> Result<Box<dyn Route>, RouteError> {
    match config {
        None => Ok(Box::new(default_route())),
        Some(RouteConfig::Spline { control_points }) => {
            let points = control_points
                .into_iter()
                .map(|[x, y, z]| Vec3::new(x, y, z))
                .collect();
            Ok(Box::new(SplineRoute::new(points)?))
        }
        Some(RouteConfig::Ring {
            radius,
            wobble_amplitude,
            wobble_lobes,
        }) => Ok(Box::new(RingRoute::new(radius, wobble_amplitude, wobble_lobes))),
    }
}

pub struct App<P: DomPort, R: RenderPort> {
    catalog: SectionCatalog,
    world: World,
    controller: CameraController,
    overlay: OverlayManager<P>,
    renderer: R,

    input: InputQueue,
    trace: TraceLog,
    profiler: FrameProfiler,
    governor: QualityGovernor,

    frame: Frame,
    last_now_s: Option<f64>,
    scroll_map: ScrollMap,
    viewport: (f64, f64),
    previous_active: Option<SectionId>,
}

impl<P: DomPort, R: RenderPort> std::fmt::Debug for App<P, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App").finish_non_exhaustive()
    }
}

impl<P: DomPort, R: RenderPort> App<P, R> {
    pub fn new(config_json: &str, dom: P, mut renderer: R) -> Result<Self, AppError> {
        let config: AppConfig =
            serde_json::from_str(config_json).map_err(|e| AppError::Parse(e.to_string()))?;

        let catalog = SectionCatalog::from_raw(config.sections).map_err(AppError::Config)?;
        let route = build_route(config.route).map_err(AppError::Route)?;

        let world = World::build(route.as_ref(), &catalog, WorldSettings::default());
        renderer.upload_scene(world.scene());

        let controller =
            CameraController::new(route, catalog.clone(), CameraConfig::default());

        let mut trace = TraceLog::new();
        trace.emit(
            Frame::first(),
            TraceKind::Config,
            format!("loaded {} sections", catalog.len()),
        );

        Ok(Self {
            catalog,
            world,
            controller,
            overlay: OverlayManager::new(dom),
            renderer,
            input: InputQueue::new(),
            trace,
            profiler: FrameProfiler::new(),
            governor: QualityGovernor::new(),
            frame: Frame::first(),
            last_now_s: None,
            scroll_map: ScrollMap {
                page_height: config.page_height.unwrap_or(6000.0),
                viewport_height: 720.0,
            },
            viewport: (1280.0, 720.0),
            previous_active: None,
        })
    }

    pub fn catalog(&self) -> &SectionCatalog {
        &self.catalog
    }

    pub fn controller(&self) -> &CameraController {
        &self.controller
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn on_scroll(&mut self, scroll_px: f64) {
        let t = self.scroll_map.progress_for_scroll(scroll_px);
        self.input.push(InputEvent::ScrollTo(t));
    }

    pub fn on_pointer(&mut self, nx: f64, ny: f64) {
        self.input.push(InputEvent::PointerMove { nx, ny });
    }

    pub fn on_resize(&mut self, width: f64, height: f64) {
        self.input.push(InputEvent::Resize { width, height });
    }

    /// Explicit navigation. Returns the page scroll offset the host should
    /// apply so the scrollbar agrees with where the camera went.
    pub fn nav_next(&mut self) -> Option<f64> {
        self.input.push(InputEvent::NavNext);
        Some(self.scroll_map.scroll_for_progress(self.peek_nav_target(1)?))
    }

    pub fn nav_prev(&mut self) -> Option<f64> {
        self.input.push(InputEvent::NavPrev);
        Some(self.scroll_map.scroll_for_progress(self.peek_nav_target(-1)?))
    }

    pub fn nav_to(&mut self, section_id: &str) -> Option<f64> {
        let id = self.catalog.index_of(section_id)?;
        self.input.push(InputEvent::NavTo(id));
        let t = self.catalog.get(id)?.curve_parameter;
        Some(self.scroll_map.scroll_for_progress(t))
    }

    fn peek_nav_target(&self, dir: i64) -> Option<f64> {
        let idx = self.controller.current_index() as i64 + dir;
        let idx = idx.clamp(0, self.catalog.len() as i64 - 1) as u32;
        Some(self.catalog.get(SectionId(idx))?.curve_parameter)
    }

    /// One frame: drain input, update camera, world, overlay, renderer.
    /// Returns the trace events produced this tick for the host logger.
    pub fn tick(&mut self, now_s: f64) -> Vec<TraceEvent> {
        let dt = match self.last_now_s {
            Some(last) => (now_s - last).max(0.0),
            None => 0.0,
        };
        self.last_now_s = Some(now_s);
        self.frame = self.frame.advance(dt);

        for event in self.input.drain() {
            match event {
                InputEvent::ScrollTo(t) => self.controller.set_target_progress(t),
                InputEvent::PointerMove { nx, ny } => self.controller.set_pointer(nx, ny),
                InputEvent::Resize { width, height } => {
                    self.viewport = (width.max(1.0), height.max(1.0));
                    self.scroll_map.viewport_height = height.max(1.0);
                    self.controller.set_viewport(width, height);
                }
                InputEvent::NavNext => {
                    if let Some(id) = self.controller.go_to_next() {
                        self.trace_nav("next", id);
                    }
                }
                InputEvent::NavPrev => {
                    if let Some(id) = self.controller.go_to_prev() {
                        self.trace_nav("prev", id);
                    }
                }
                InputEvent::NavTo(id) => {
                    if let Some(id) = self.controller.go_to_section(id) {
                        self.trace_nav("jump", id);
                    }
                }
            }
        }

        // Face info for the dock blend comes from the previous frame's
        // active section; at capture time the lock factor is ~0, so the
        // one-frame latency has no visible effect.
        let face = self
            .previous_active
            .and_then(|id| self.world.billboard_face(id));
        let state = self.controller.update(self.frame, face);

        if state.active_section != self.previous_active {
            match state.active_section {
                Some(id) => {
                    let name = self
                        .catalog
                        .get(id)
                        .map(|s| s.id.as_str())
                        .unwrap_or("?");
                    self.trace
                        .emit(self.frame, TraceKind::Dock, format!("capture {name}"));
                }
                None => self.trace.emit(self.frame, TraceKind::Dock, "release"),
            }
            self.previous_active = state.active_section;
        }

        self.world.set_active_section(state.active_section);
        self.world.update(&state);

        self.overlay.set_active_section(
            state.active_section,
            &self.catalog,
            self.controller.has_prev(),
            self.controller.has_next(),
        );
        self.overlay.tick(state.frame.dt_s);
        let corners = state
            .active_section
            .and_then(|id| self.world.billboard_corners(id));
        self.overlay.position_panel(
            &state,
            corners,
            &self.catalog,
            self.viewport.0,
            self.viewport.1,
        );

        self.profiler.record(state.frame.dt_s);
        if let Some(tier) = self.governor.step(self.profiler.average_ms()) {
            self.trace
                .emit(self.frame, TraceKind::Quality, format!("tier {tier:?}"));
        }
        let tier = self.governor.tier();

        self.renderer
            .set_camera(state.eye, state.view_proj.to_f32_cols());
        for (part, poses) in self.world.part_poses(state.eye) {
            self.renderer.set_part_poses(part, &poses);
        }
        let uniforms = self
            .world
            .uniforms(tier.bloom_strength(), tier.pixel_ratio());
        self.renderer.render(&state.frame, &uniforms);

        self.trace.drain()
    }

    fn trace_nav(&mut self, verb: &str, id: SectionId) {
        let name = self
            .catalog
            .get(id)
            .map(|s| s.id.as_str())
            .unwrap_or("?");
        self.trace
            .emit(self.frame, TraceKind::Nav, format!("{verb} -> {name}"));
    }
}
