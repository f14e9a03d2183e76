use catalog::SectionCatalog;
use foundation::SectionId;
use foundation::math::{
    Vec2, Vec3, damp_towards, smoothstep, wrap_unit, wrapped_delta,
};
use route::Route;
use runtime::{BillboardFace, Frame, FrameState, NavCooldown};

use crate::pose::{CameraPose, Lens};

/// Largest curve parameter handed to the route. Querying at exactly 1.0
/// degenerates the endpoint tangent on open splines.
const MAX_PARAM: f64 = 0.999;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraConfig {
    /// Eye height above the route while traveling.
    pub travel_height: f64,
    /// Look-ahead along the curve parameter while traveling.
    pub look_ahead: f64,
    /// Eye distance from the billboard face when docked.
    pub dock_distance: f64,
    /// Curve-parameter distance at which a section starts capturing the
    /// camera.
    pub snap_window: f64,
    /// Smoothing rate for the curve parameter (per second).
    pub progress_rate: f64,
    /// Maximum idle-parallax sway in world units.
    pub parallax_amplitude: f64,
    /// Smoothing rate for the parallax offset (per second).
    pub parallax_rate: f64,
    /// Window during which repeated navigation commands are ignored.
    pub nav_cooldown_s: f64,
    /// Window during which scroll input is ignored after an explicit jump.
    pub snap_duration_s: f64,
    pub lens: Lens,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            travel_height: 4.5,
            look_ahead: 0.06,
            dock_distance: 11.0,
            snap_window: 0.05,
            progress_rate: 2.5,
            parallax_amplitude: 1.2,
            parallax_rate: 3.0,
            nav_cooldown_s: 0.6,
            snap_duration_s: 1.5,
            lens: Lens::default(),
        }
    }
}

/// The travel/dock state machine.
///
/// There is no discrete state switch: a lock factor in [0, 1], a
/// smoothstep of how close the current parameter is to the nearest
/// section, blends every pose ingredient (position, up vector, look
/// target, parallax) between the two regimes.
///
/// Zero pitch when docked is exact, not damped: the dock position copies
/// the face center's vertical coordinate, so the forward vector's vertical
/// component vanishes by construction. Zero roll comes from blending the
/// camera up toward the billboard's own up axis.
pub struct CameraController {
    route: Box<dyn Route>,
    catalog: SectionCatalog,
    config: CameraConfig,

    current_t: f64,
    target_t: f64,
    lock_t: f64,
    active: Option<SectionId>,

    pointer: Vec2,
    parallax: Vec2,

    cooldown: NavCooldown,
    snap_remaining_s: f64,

    viewport: (f64, f64),
}

impl CameraController {
    pub fn new(route: Box<dyn Route>, catalog: SectionCatalog, config: CameraConfig) -> Self {
        Self {
            route,
            catalog,
            config,
            current_t: 0.0,
            target_t: 0.0,
            lock_t: 0.0,
            active: None,
            pointer: Vec2::ZERO,
            parallax: Vec2::ZERO,
            cooldown: NavCooldown::new(config.nav_cooldown_s),
            snap_remaining_s: 0.0,
            viewport: (1280.0, 720.0),
        }
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = (width.max(1.0), height.max(1.0));
    }

    /// Scroll-driven progress. Ignored while an explicit jump is settling,
    /// so the two input sources cannot fight.
    pub fn set_target_progress(&mut self, t: f64) {
        if self.is_transitioning() {
            return;
        }
        self.target_t = if self.route.is_closed() {
            wrap_unit(t)
        } else {
            t.clamp(0.0, 1.0)
        };
    }

    /// Pointer position normalized to [-1, 1]; drives idle parallax.
    pub fn set_pointer(&mut self, nx: f64, ny: f64) {
        self.pointer = Vec2::new(nx.clamp(-1.0, 1.0), ny.clamp(-1.0, 1.0));
    }

    pub fn progress(&self) -> f64 {
        self.current_t
    }

    pub fn target_progress(&self) -> f64 {
        self.target_t
    }

    pub fn lock_factor(&self) -> f64 {
        self.lock_t
    }

    pub fn active_section(&self) -> Option<SectionId> {
        self.active
    }

    pub fn is_transitioning(&self) -> bool {
        self.snap_remaining_s > 0.0
    }

    /// Section the target parameter currently rests on.
    pub fn current_index(&self) -> usize {
        self.catalog
            .nearest(self.target_t, self.route.is_closed())
            .map(|(id, _)| id.index())
            .unwrap_or(0)
    }

    pub fn has_prev(&self) -> bool {
        self.current_index() > 0
    }

    pub fn has_next(&self) -> bool {
        self.current_index() + 1 < self.catalog.len()
    }

    /// Jump to a section. Returns the section actually targeted, or `None`
    /// when the command was swallowed by the cooldown or the id is unknown.
    pub fn go_to_section(&mut self, id: SectionId) -> Option<SectionId> {
        let section = self.catalog.get(id)?;
        if !self.cooldown.try_begin() {
            return None;
        }
        self.target_t = section.curve_parameter.min(MAX_PARAM);
        self.snap_remaining_s = self.config.snap_duration_s;
        Some(id)
    }

    /// Advance one section. At the last section this is a no-op that
    /// reports the section the camera is already on.
    pub fn go_to_next(&mut self) -> Option<SectionId> {
        let idx = self.current_index();
        let next = (idx + 1).min(self.catalog.len().saturating_sub(1));
        if next == idx {
            return Some(SectionId(idx as u32));
        }
        self.go_to_section(SectionId(next as u32))
    }

    /// Back one section; no-op at the first, mirroring `go_to_next`.
    pub fn go_to_prev(&mut self) -> Option<SectionId> {
        let idx = self.current_index();
        if idx == 0 {
            return Some(SectionId(0));
        }
        self.go_to_section(SectionId((idx - 1) as u32))
    }

    /// The per-frame pose computation. `face` is the docking face of the
    /// active section, when the host has one (typically from the previous
    /// frame's active section; at the moment of capture the lock factor
    /// is still ~0, so the one-frame latency is invisible).
    pub fn update(&mut self, frame: Frame, face: Option<BillboardFace>) -> FrameState {
        let dt = frame.dt_s;
        let closed = self.route.is_closed();

        self.cooldown.tick(dt);
        self.snap_remaining_s = (self.snap_remaining_s - dt).max(0.0);

        // 1. Ease the parameter toward the target, frame-rate independent.
        if closed {
            let step = wrapped_delta(self.current_t, self.target_t);
            self.current_t = wrap_unit(damp_towards(0.0, step, self.config.progress_rate, dt)
                + self.current_t);
        } else {
            self.current_t =
                damp_towards(self.current_t, self.target_t, self.config.progress_rate, dt);
        }
        let query_t = if closed {
            self.current_t
        } else {
            self.current_t.clamp(0.0, MAX_PARAM)
        };

        // 2. Lock factor from proximity to the nearest section.
        let nearest = self.catalog.nearest(self.current_t, closed);
        self.lock_t = match nearest {
            Some((_, dist)) => smoothstep(self.config.snap_window, 0.0, dist),
            None => 0.0,
        };
        self.active = match nearest {
            Some((id, dist)) if dist <= self.config.snap_window => Some(id),
            _ => None,
        };

        // 3. Idle parallax, fully suppressed as the lock engages.
        let sway_target = self.pointer.scale(self.config.parallax_amplitude);
        self.parallax = Vec2::new(
            damp_towards(self.parallax.x, sway_target.x, self.config.parallax_rate, dt),
            damp_towards(self.parallax.y, sway_target.y, self.config.parallax_rate, dt),
        );
        let sway = 1.0 - self.lock_t;

        // 4/5/6. Travel pose, dock pose, blended by the lock factor.
        let on_route = self.route.point_at(query_t);
        let tangent = self.route.tangent_at(query_t);
        let right = tangent.cross(Vec3::Y).normalized_or(Vec3::X);

        let travel_eye = on_route
            + Vec3::Y.scale(self.config.travel_height)
            + right.scale(self.parallax.x * sway)
            + Vec3::Y.scale(self.parallax.y * sway * 0.4);

        let look_param = if closed {
            wrap_unit(query_t + self.config.look_ahead)
        } else {
            (query_t + self.config.look_ahead).min(MAX_PARAM)
        };
        let travel_target =
            self.route.point_at(look_param) + Vec3::Y.scale(self.config.travel_height * 0.85);

        let pose = match face {
            Some(face) => {
                // Dock position: face-normal offset, with the vertical
                // coordinate copied from the face center. The look vector's
                // vertical component is zero by construction.
                let offset = face.center + face.normal.scale(self.config.dock_distance);
                let dock_eye = Vec3::new(offset.x, face.center.y, offset.z);

                CameraPose {
                    eye: travel_eye.lerp(dock_eye, self.lock_t),
                    target: travel_target.lerp(face.center, self.lock_t),
                    up: Vec3::Y.lerp(face.up, self.lock_t).normalized_or(Vec3::Y),
                }
            }
            None => CameraPose {
                eye: travel_eye,
                target: travel_target,
                up: Vec3::Y,
            },
        };

        let aspect = self.viewport.0 / self.viewport.1;
        FrameState {
            frame,
            eye: pose.eye,
            up: pose.up,
            look_target: pose.target,
            view_proj: pose.view_proj(self.config.lens, aspect),
            progress: self.current_t,
            lock_factor: self.lock_t,
            active_section: self.active,
        }
    }
}
