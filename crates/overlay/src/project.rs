use foundation::math::{Mat4, Vec3};

/// Viewport-space rectangle in CSS pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Where a panel should be pinned: its bounding rect plus the exact
/// projected quad as a CSS clip-path, relative to the rect origin.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelPlacement {
    pub rect: PixelRect,
    pub clip_path: String,
}

/// Smallest projected rect worth pinning a panel to. Below this the panel
/// reverts to its default layout instead of rendering a sliver.
const MIN_PANEL_PX: f64 = 40.0;

/// Project a billboard's four world-space corners into a panel placement.
///
/// Returns `None`, meaning "fall back to the default centered layout",
/// when any corner is behind the camera or outside the depth range, or the
/// projected bounding rect is below the minimum pixel size.
pub fn project_panel(
    view_proj: Mat4,
    corners: [Vec3; 4],
    viewport_width: f64,
    viewport_height: f64,
) -> Option<PanelPlacement> {
    let mut px = [[0.0f64; 2]; 4];
    for (i, corner) in corners.iter().enumerate() {
        let ndc = view_proj.project_point(*corner)?;
        if ndc.z > 1.0 {
            return None;
        }
        px[i] = [
            (ndc.x * 0.5 + 0.5) * viewport_width,
            (1.0 - (ndc.y * 0.5 + 0.5)) * viewport_height,
        ];
    }

    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for p in &px {
        min_x = min_x.min(p[0]);
        min_y = min_y.min(p[1]);
        max_x = max_x.max(p[0]);
        max_y = max_y.max(p[1]);
    }

    if max_x - min_x < MIN_PANEL_PX || max_y - min_y < MIN_PANEL_PX {
        return None;
    }

    // Clamp the rect to the viewport; the clip quad stays relative to the
    // clamped origin so the visible part still matches the billboard.
    let x = min_x.max(0.0);
    let y = min_y.max(0.0);
    let width = (max_x.min(viewport_width) - x).max(0.0);
    let height = (max_y.min(viewport_height) - y).max(0.0);
    if width < MIN_PANEL_PX || height < MIN_PANEL_PX {
        return None;
    }

    let rect = PixelRect {
        x,
        y,
        width,
        height,
    };

    // Exact projected quadrilateral, not just the bounding box.
    let clip_path = format!(
        "polygon({:.1}px {:.1}px, {:.1}px {:.1}px, {:.1}px {:.1}px, {:.1}px {:.1}px)",
        px[0][0] - x,
        px[0][1] - y,
        px[1][0] - x,
        px[1][1] - y,
        px[2][0] - x,
        px[2][1] - y,
        px[3][0] - x,
        px[3][1] - y,
    );

    Some(PanelPlacement { rect, clip_path })
}

#[cfg(test)]
mod tests {
    use super::{PixelRect, project_panel};
    use foundation::math::{Mat4, Vec3};

    fn face_on_view_proj(eye_z: f64) -> Mat4 {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, eye_z), Vec3::ZERO, Vec3::Y);
        let proj = Mat4::perspective_rh_z0(1.0, 1.0, 0.1, 1000.0);
        proj.mul(view)
    }

    fn quad() -> [Vec3; 4] {
        [
            Vec3::new(-4.0, 3.0, 0.0),
            Vec3::new(4.0, 3.0, 0.0),
            Vec3::new(4.0, -3.0, 0.0),
            Vec3::new(-4.0, -3.0, 0.0),
        ]
    }

    #[test]
    fn front_facing_quad_lands_in_viewport() {
        let placement =
            project_panel(face_on_view_proj(20.0), quad(), 1280.0, 720.0).expect("visible");
        let r = placement.rect;
        assert!(r.x >= 0.0 && r.y >= 0.0);
        assert!(r.x + r.width <= 1280.0);
        assert!(r.y + r.height <= 720.0);
        // Centered billboard projects to a centered rect.
        assert!((r.x + r.width * 0.5 - 640.0).abs() < 1.0);
        assert!((r.y + r.height * 0.5 - 360.0).abs() < 1.0);
        assert!(placement.clip_path.starts_with("polygon("));
    }

    #[test]
    fn quad_behind_camera_is_rejected() {
        // Eye at z = -20 looking away from the quad.
        let view = Mat4::look_at_rh(
            Vec3::new(0.0, 0.0, -20.0),
            Vec3::new(0.0, 0.0, -40.0),
            Vec3::Y,
        );
        let proj = Mat4::perspective_rh_z0(1.0, 1.0, 0.1, 1000.0);
        assert!(project_panel(proj.mul(view), quad(), 1280.0, 720.0).is_none());
    }

    #[test]
    fn tiny_projection_is_rejected() {
        // Very far away: the quad projects to a few pixels.
        assert!(project_panel(face_on_view_proj(900.0), quad(), 1280.0, 720.0).is_none());
    }

    #[test]
    fn axis_aligned_quad_has_degenerate_free_clip() {
        let placement =
            project_panel(face_on_view_proj(20.0), quad(), 1280.0, 720.0).expect("visible");
        // A face-on quad's clip path starts at its own rect corner.
        assert!(placement.clip_path.contains("0.0px 0.0px"));
    }

    #[test]
    fn offscreen_rect_is_clamped() {
        // Billboard far to the left: part of the quad leaves the viewport.
        let view = Mat4::look_at_rh(
            Vec3::new(6.5, 0.0, 20.0),
            Vec3::new(6.5, 0.0, 0.0),
            Vec3::Y,
        );
        let proj = Mat4::perspective_rh_z0(1.0, 1.0, 0.1, 1000.0);
        if let Some(placement) = project_panel(proj.mul(view), quad(), 1280.0, 720.0) {
            assert!(placement.rect.x >= 0.0);
            assert!(placement.rect.x + placement.rect.width <= 1280.0);
        }
    }

    #[test]
    fn rect_type_is_plain_data() {
        let r = PixelRect {
            x: 1.0,
            y: 2.0,
            width: 3.0,
            height: 4.0,
        };
        assert_eq!(r, r);
    }
}
