use catalog::ThemeVariant;
use foundation::SectionId;
use foundation::math::{Quat, Vec3, damp_towards};
use runtime::BillboardFace;

use crate::mesh::MeshDescriptor;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BillboardSettings {
    /// Panel quad width.
    pub panel_width: f64,
    /// Panel quad height.
    pub panel_height: f64,
    /// Ground-to-panel-bottom post height.
    pub post_height: f64,
    /// Lateral offset of the billboard from the route centerline.
    pub side_offset: f64,
    /// Smoothing rate for all pose/material animations (per second).
    pub anim_rate: f64,
    /// Peak yaw the panel turns toward the camera when active (radians).
    pub face_camera_yaw: f64,
    /// Idle micro-rotation amplitude (radians).
    pub sway_amplitude: f64,
}

impl Default for BillboardSettings {
    fn default() -> Self {
        Self {
            panel_width: 9.0,
            panel_height: 5.0,
            post_height: 3.0,
            side_offset: 7.0,
            anim_rate: 6.0,
            face_camera_yaw: 0.35,
            sway_amplitude: 0.02,
        }
    }
}

/// One themed landmark anchored to a section.
///
/// Built once; only its active flag and minor pose mutate afterwards. The
/// panel's effective basis (micro sway + face-camera yaw) feeds both the
/// docking face info and the overlay corner query, so everything agrees on
/// where the panel actually is.
#[derive(Debug, Clone, PartialEq)]
pub struct Billboard {
    pub section: SectionId,
    pub variant: ThemeVariant,
    pub accent: [f32; 3],

    settings: BillboardSettings,
    /// Base position on the ground.
    position: Vec3,
    /// Rest orientation: local +Z is the face normal.
    orientation: Quat,
    rest_right: Vec3,
    rest_up: Vec3,
    rest_normal: Vec3,
    /// Per-billboard phase so the field does not sway in unison.
    sway_phase: f64,

    active: bool,
    /// Decoration depth squash: 1 at rest, near 0 when active.
    depth_scale: f64,
    /// Accent/light intensity blend.
    glow: f64,
    /// Face-the-camera yaw blend.
    face_blend: f64,
    /// Current effective yaw around the local up axis.
    yaw: f64,
}

impl Billboard {
    /// Anchor a billboard beside the route.
    ///
    /// Open routes: the face looks back along the incoming travel
    /// direction. Closed routes: the face looks radially outward from the
    /// loop's vertical axis.
    pub fn anchor(
        section: SectionId,
        variant: ThemeVariant,
        accent: [f32; 3],
        route_point: Vec3,
        route_tangent: Vec3,
        ground_height: f64,
        closed: bool,
        settings: BillboardSettings,
    ) -> Self {
        let normal = if closed {
            Vec3::new(route_point.x, 0.0, route_point.z).normalized_or(-route_tangent)
        } else {
            (-route_tangent).normalized_or(Vec3::Z)
        };
        // Keep the face vertical: project the normal into the ground plane.
        let normal = Vec3::new(normal.x, 0.0, normal.z).normalized_or(Vec3::Z);
        let right = Vec3::Y.cross(normal).normalized_or(Vec3::X);
        let up = normal.cross(right);

        let side = route_tangent.cross(Vec3::Y).normalized_or(Vec3::X);
        let base = route_point + side.scale(settings.side_offset);
        let position = Vec3::new(base.x, ground_height, base.z);

        let sway_phase = f64::from(section.0) * 1.7;

        Self {
            section,
            variant,
            accent,
            settings,
            position,
            orientation: Quat::from_basis(right, up, normal),
            rest_right: right,
            rest_up: up,
            rest_normal: normal,
            sway_phase,
            active: false,
            depth_scale: 1.0,
            glow: 0.0,
            face_blend: 0.0,
            yaw: 0.0,
        }
    }

    pub fn glow(&self) -> f64 {
        self.glow
    }

    pub fn depth_scale(&self) -> f64 {
        self.depth_scale
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Advance pose/material animation. Independent of camera state except
    /// for the face-the-camera yaw, which needs the eye position.
    pub fn update(&mut self, dt: f64, time_s: f64, camera_pos: Vec3) {
        let rate = self.settings.anim_rate;
        let depth_target = if self.active { 0.18 } else { 1.0 };
        let glow_target = if self.active { 1.0 } else { 0.0 };
        let face_target = if self.active { 1.0 } else { 0.0 };
        self.depth_scale = damp_towards(self.depth_scale, depth_target, rate, dt);
        self.glow = damp_towards(self.glow, glow_target, rate, dt);
        self.face_blend = damp_towards(self.face_blend, face_target, rate, dt);

        let sway = self.settings.sway_amplitude
            * (1.0 - self.face_blend)
            * (time_s * 0.3 + self.sway_phase).sin();

        // Signed yaw from the rest normal to the camera, around local up.
        let center = self.face_center_rest();
        let mut to_cam = camera_pos - center;
        to_cam = to_cam - self.rest_up.scale(to_cam.dot(self.rest_up));
        let face_yaw = match to_cam.normalized() {
            Some(dir) => {
                let s = self.rest_normal.cross(dir).dot(self.rest_up);
                let c = self.rest_normal.dot(dir);
                s.atan2(c)
                    .clamp(-self.settings.face_camera_yaw, self.settings.face_camera_yaw)
            }
            None => 0.0,
        };

        self.yaw = sway + face_yaw * self.face_blend;
    }

    fn face_center_rest(&self) -> Vec3 {
        let s = &self.settings;
        self.position + self.rest_up.scale(s.post_height + s.panel_height * 0.5)
    }

    fn effective_basis(&self) -> (Vec3, Vec3, Vec3) {
        let spin = Quat::from_axis_angle(self.rest_up, self.yaw);
        (
            spin.rotate(self.rest_right),
            self.rest_up,
            spin.rotate(self.rest_normal),
        )
    }

    /// Docking face info, reflecting the current animated transform.
    pub fn face(&self) -> BillboardFace {
        let (_, up, normal) = self.effective_basis();
        BillboardFace {
            center: self.face_center_rest() + normal.scale(0.12),
            normal,
            up,
        }
    }

    /// World-space panel corners, counter-clockwise from top-left as seen
    /// from the face-normal side.
    pub fn corners(&self) -> [Vec3; 4] {
        let (right, up, _) = self.effective_basis();
        let face = self.face();
        let pop = 1.0 + 0.04 * self.glow;
        let hw = self.settings.panel_width * 0.5 * pop;
        let hh = self.settings.panel_height * 0.5 * pop;

        let r = right.scale(hw);
        let u = up.scale(hh);
        [
            face.center + u - r,
            face.center + u + r,
            face.center - u + r,
            face.center - u - r,
        ]
    }

    /// Static themed mesh in world space.
    pub fn build_mesh(&self) -> MeshDescriptor {
        let local = build_themed_mesh(self.variant, self.accent, &self.settings);
        let mut out = MeshDescriptor::new();
        out.append_transformed(&local, self.position, self.orientation);
        out
    }
}

/// Build a themed billboard mesh in local space: +X right, +Y up, +Z the
/// face normal, origin at the ground under the panel center.
pub fn build_themed_mesh(
    variant: ThemeVariant,
    accent: [f32; 3],
    settings: &BillboardSettings,
) -> MeshDescriptor {
    let w = settings.panel_width;
    let h = settings.panel_height;
    let post_h = settings.post_height;
    let panel_center = post_h + h * 0.5;

    let steel = [0.22, 0.23, 0.26];
    let panel_face = [0.08, 0.08, 0.10];

    let mut mesh = MeshDescriptor::new();

    // Support posts.
    for sx in [-1.0, 1.0] {
        mesh.push_box(
            Vec3::new(sx * (w * 0.5 - 0.3), post_h * 0.5, 0.0),
            Vec3::new(0.14, post_h * 0.5, 0.14),
            steel,
        );
    }

    // Panel backing.
    mesh.push_box(
        Vec3::new(0.0, panel_center, 0.0),
        Vec3::new(w * 0.5, h * 0.5, 0.08),
        panel_face,
    );

    // Frame rails.
    for sy in [-1.0, 1.0] {
        mesh.push_box(
            Vec3::new(0.0, panel_center + sy * (h * 0.5 + 0.08), 0.1),
            Vec3::new(w * 0.5 + 0.16, 0.08, 0.1),
            steel,
        );
    }
    for sx in [-1.0, 1.0] {
        mesh.push_box(
            Vec3::new(sx * (w * 0.5 + 0.08), panel_center, 0.1),
            Vec3::new(0.08, h * 0.5 + 0.16, 0.1),
            steel,
        );
    }

    // Accent band under the panel.
    mesh.push_box(
        Vec3::new(0.0, post_h - 0.25, 0.05),
        Vec3::new(w * 0.5, 0.1, 0.12),
        accent,
    );

    // Top light.
    mesh.push_box(
        Vec3::new(0.0, panel_center + h * 0.5 + 0.5, 0.0),
        Vec3::new(0.25, 0.15, 0.15),
        accent,
    );

    // Per-theme flourish.
    match variant {
        ThemeVariant::Hero => {
            // Wide marquee crown.
            mesh.push_box(
                Vec3::new(0.0, panel_center + h * 0.5 + 1.1, 0.0),
                Vec3::new(w * 0.35, 0.3, 0.2),
                accent,
            );
        }
        ThemeVariant::Directing => {
            // Clapper wedge on the top-left corner.
            mesh.push_box(
                Vec3::new(-w * 0.4, panel_center + h * 0.5 + 0.6, 0.0),
                Vec3::new(0.8, 0.18, 0.18),
                steel,
            );
        }
        ThemeVariant::Network => {
            // A small antenna lattice.
            for i in 0..3 {
                let y = panel_center + h * 0.5 + 0.6 + f64::from(i) * 0.5;
                mesh.push_box(
                    Vec3::new(w * 0.38, y, 0.0),
                    Vec3::new(0.35 - f64::from(i) * 0.1, 0.06, 0.06),
                    steel,
                );
            }
        }
        ThemeVariant::Ugc => {
            // Stacked tiles down the right post.
            for i in 0..3 {
                mesh.push_box(
                    Vec3::new(w * 0.5 + 0.5, post_h - 0.4 - f64::from(i) * 0.7, 0.0),
                    Vec3::new(0.25, 0.25, 0.1),
                    accent,
                );
            }
        }
        ThemeVariant::Clientele => {
            // Plinth in front of the posts.
            mesh.push_box(
                Vec3::new(0.0, 0.3, 1.2),
                Vec3::new(1.2, 0.3, 0.5),
                steel,
            );
        }
        ThemeVariant::Projects => {
            // Scaffold bar across the back.
            mesh.push_box(
                Vec3::new(0.0, post_h * 0.5, -0.5),
                Vec3::new(w * 0.45, 0.1, 0.1),
                steel,
            );
        }
        ThemeVariant::Social => {
            // Twin flags on the frame.
            for sx in [-1.0, 1.0] {
                mesh.push_box(
                    Vec3::new(sx * w * 0.45, panel_center + h * 0.5 + 0.9, 0.0),
                    Vec3::new(0.3, 0.2, 0.05),
                    accent,
                );
            }
        }
        ThemeVariant::Resume => {
            // Ledger slab at the base.
            mesh.push_box(
                Vec3::new(0.0, 0.25, 0.9),
                Vec3::new(0.9, 0.25, 0.35),
                panel_face,
            );
        }
        ThemeVariant::Contact => {
            // Beacon mast.
            mesh.push_box(
                Vec3::new(0.0, panel_center + h * 0.5 + 1.6, 0.0),
                Vec3::new(0.08, 1.0, 0.08),
                steel,
            );
        }
        ThemeVariant::Default => {}
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::{Billboard, BillboardSettings, build_themed_mesh};
    use catalog::ThemeVariant;
    use foundation::SectionId;
    use foundation::math::Vec3;

    fn make(closed: bool) -> Billboard {
        Billboard::anchor(
            SectionId(0),
            ThemeVariant::Hero,
            [1.0, 0.5, 0.0],
            Vec3::new(0.0, 0.0, 40.0),
            Vec3::Z,
            0.0,
            closed,
            BillboardSettings::default(),
        )
    }

    #[test]
    fn open_route_face_looks_back_along_travel() {
        let b = make(false);
        let face = b.face();
        // Travel direction is +Z, so the face normal points back at -Z.
        assert!((face.normal - -Vec3::Z).length() < 1e-9);
        assert!((face.up - Vec3::Y).length() < 1e-9);
    }

    #[test]
    fn face_center_is_at_panel_height() {
        let b = make(false);
        let s = BillboardSettings::default();
        let expected_y = s.post_height + s.panel_height * 0.5;
        assert!((b.face().center.y - expected_y).abs() < 1e-9);
    }

    #[test]
    fn corners_span_the_panel() {
        let b = make(false);
        let s = BillboardSettings::default();
        let c = b.corners();
        let width = (c[1] - c[0]).length();
        let height = (c[0] - c[3]).length();
        assert!((width - s.panel_width).abs() < 1e-9);
        assert!((height - s.panel_height).abs() < 1e-9);
        // All corners share the face plane.
        let n = b.face().normal;
        let d0 = c[0].dot(n);
        for corner in &c[1..] {
            assert!((corner.dot(n) - d0).abs() < 1e-9);
        }
    }

    #[test]
    fn activation_flattens_and_glows() {
        let mut b = make(false);
        b.set_active(true);
        for _ in 0..600 {
            b.update(0.016, 0.0, Vec3::new(0.0, 4.0, 20.0));
        }
        assert!(b.depth_scale() < 0.2);
        assert!(b.glow() > 0.99);

        b.set_active(false);
        for _ in 0..600 {
            b.update(0.016, 10.0, Vec3::new(0.0, 4.0, 20.0));
        }
        assert!(b.depth_scale() > 0.99);
        assert!(b.glow() < 0.01);
    }

    #[test]
    fn active_panel_yaws_toward_offset_camera() {
        let mut b = make(false);
        b.set_active(true);
        // Camera well off to the side of the face normal.
        let cam = Vec3::new(30.0, 5.0, 10.0);
        for _ in 0..600 {
            b.update(0.016, 0.0, cam);
        }
        let face = b.face();
        let to_cam = Vec3::new(cam.x - face.center.x, 0.0, cam.z - face.center.z)
            .normalized()
            .expect("offset");
        let rest_alignment = (-Vec3::Z).dot(to_cam);
        let now_alignment = face.normal.dot(to_cam);
        assert!(now_alignment > rest_alignment);
    }

    #[test]
    fn closed_route_face_points_radially_outward() {
        let b = Billboard::anchor(
            SectionId(1),
            ThemeVariant::Default,
            [1.0; 3],
            Vec3::new(50.0, 0.0, 0.0),
            Vec3::Z,
            0.0,
            true,
            BillboardSettings::default(),
        );
        assert!((b.face().normal - Vec3::X).length() < 1e-9);
    }

    #[test]
    fn themed_meshes_differ_by_variant() {
        let s = BillboardSettings::default();
        let hero = build_themed_mesh(ThemeVariant::Hero, [1.0; 3], &s);
        let plain = build_themed_mesh(ThemeVariant::Default, [1.0; 3], &s);
        assert!(hero.vertex_count() > plain.vertex_count());
        assert!(plain.triangle_count() > 0);
    }
}
