use catalog::SectionCatalog;
use foundation::SectionId;
use foundation::math::Vec3;
use runtime::{BillboardFace, FrameState};
use route::Route;

use crate::billboard::{Billboard, BillboardSettings};
use crate::render::{InstancePose, MaterialUniforms, SceneDescriptor, SceneMesh, ScenePart};
use crate::sky::{CloudLayer, build_cloud_mesh, build_sky_dome, sun_direction};
use crate::terrain::{RoadCorridor, TerrainField, TerrainSettings, build_road_ribbon};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WorldSettings {
    pub terrain: TerrainSettings,
    pub billboard: BillboardSettings,
    /// Route samples used for the corridor and the road ribbon.
    pub road_samples: usize,
    pub road_ribbon_width: f64,
    pub sky_radius: f64,
    pub cloud_count: usize,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            terrain: TerrainSettings::default(),
            billboard: BillboardSettings::default(),
            road_samples: 160,
            road_ribbon_width: 8.0,
            sky_radius: 480.0,
            cloud_count: 18,
        }
    }
}

/// The static world and its decorative animation state.
///
/// Built once from the route and the section catalog. Per-frame `update`
/// only mutates the world's own objects (cloud angles, billboard pose
/// blends, the material clock), never camera or overlay state.
#[derive(Debug)]
pub struct World {
    terrain: TerrainField,
    billboards: Vec<Billboard>,
    clouds: CloudLayer,
    scene: SceneDescriptor,
    active: Option<SectionId>,
    time_s: f64,
}

impl World {
    pub fn build(route: &dyn Route, catalog: &SectionCatalog, settings: WorldSettings) -> Self {
        let samples = route.spaced_points(settings.road_samples.max(2));
        let corridor = RoadCorridor::new(samples, route.is_closed());
        let terrain = TerrainField::new(settings.terrain, corridor);

        let mut billboards = Vec::with_capacity(catalog.len());
        for (id, section) in catalog.iter() {
            // Clamp away from the exact endpoint to keep the tangent sane.
            let t = section.curve_parameter.clamp(0.0, 0.999);
            let billboard = Billboard::anchor(
                id,
                section.variant,
                section.accent,
                route.point_at(t),
                route.tangent_at(t),
                settings.terrain.road_height,
                route.is_closed(),
                settings.billboard,
            );
            billboards.push(billboard);
        }

        let clouds = CloudLayer::generate(
            settings.terrain.seed ^ 0xC10D,
            settings.cloud_count,
            settings.terrain.size * 0.4,
        );

        let mut meshes = vec![
            SceneMesh {
                part: ScenePart::Terrain,
                mesh: terrain.build_mesh(),
            },
            SceneMesh {
                part: ScenePart::Road,
                mesh: build_road_ribbon(
                    terrain.corridor(),
                    settings.road_ribbon_width,
                    settings.terrain.road_height,
                ),
            },
            SceneMesh {
                part: ScenePart::Sky,
                mesh: build_sky_dome(settings.sky_radius, 32),
            },
            SceneMesh {
                part: ScenePart::Clouds,
                mesh: build_cloud_mesh(),
            },
        ];
        for billboard in &billboards {
            meshes.push(SceneMesh {
                part: ScenePart::Billboard(billboard.section),
                mesh: billboard.build_mesh(),
            });
        }

        Self {
            terrain,
            billboards,
            clouds,
            scene: SceneDescriptor { meshes },
            active: None,
            time_s: 0.0,
        }
    }

    /// Static geometry for the rendering collaborator; built once.
    pub fn scene(&self) -> &SceneDescriptor {
        &self.scene
    }

    pub fn terrain_height(&self, x: f64, z: f64) -> f64 {
        self.terrain.height_at(x, z)
    }

    pub fn active_section(&self) -> Option<SectionId> {
        self.active
    }

    /// Flip billboard active flags; the pose animation catches up in
    /// `update` via exponential smoothing.
    pub fn set_active_section(&mut self, id: Option<SectionId>) {
        if self.active == id {
            return;
        }
        self.active = id;
        for billboard in &mut self.billboards {
            billboard.set_active(Some(billboard.section) == id);
        }
    }

    pub fn billboard_face(&self, id: SectionId) -> Option<BillboardFace> {
        self.billboards
            .iter()
            .find(|b| b.section == id)
            .map(Billboard::face)
    }

    pub fn billboard_corners(&self, id: SectionId) -> Option<[Vec3; 4]> {
        self.billboards
            .iter()
            .find(|b| b.section == id)
            .map(Billboard::corners)
    }

    /// Advance decorative animation from the frame snapshot.
    pub fn update(&mut self, state: &FrameState) {
        let dt = state.frame.dt_s;
        self.time_s += dt;
        self.clouds.update(dt);
        for billboard in &mut self.billboards {
            billboard.update(dt, self.time_s, state.eye);
        }
    }

    /// Animated per-part poses for the renderer. The sky dome follows the
    /// camera; clouds orbit the world origin.
    pub fn part_poses(&self, eye: Vec3) -> Vec<(ScenePart, Vec<InstancePose>)> {
        let sky_pose = InstancePose {
            // The dome is modeled around the origin; pin it to the eye.
            position_rel: [0.0, 0.0, 0.0],
            yaw_rad: 0.0,
            scale: [1.0; 3],
        };
        let mut out = vec![
            (ScenePart::Sky, vec![sky_pose]),
            (ScenePart::Clouds, self.clouds.poses(eye)),
        ];
        for billboard in &self.billboards {
            let depth = billboard.depth_scale() as f32;
            out.push((
                ScenePart::Billboard(billboard.section),
                vec![InstancePose {
                    position_rel: [0.0, 0.0, 0.0],
                    yaw_rad: 0.0,
                    // Decorations squash toward the panel plane when active.
                    scale: [1.0, 1.0, depth],
                }],
            ));
        }
        out
    }

    /// Uniforms for the shading collaborator.
    pub fn uniforms(&self, bloom_strength: f64, pixel_ratio: f64) -> MaterialUniforms {
        MaterialUniforms {
            time_s: self.time_s as f32,
            sun_direction: sun_direction(self.time_s),
            bloom_strength: bloom_strength as f32,
            pixel_ratio: pixel_ratio as f32,
        }
    }
}
