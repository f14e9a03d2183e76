//! The boundary to the rendering collaborator.
//!
//! The core never draws; it describes. Static geometry goes over once as a
//! `SceneDescriptor`, the camera and animated part poses are set per frame,
//! and `render` is called with the material uniforms for the shading
//! collaborator. Everything behind the trait is opaque to this workspace.

use foundation::SectionId;
use foundation::math::Vec3;
use foundation::math::precision::CameraRelativeF32;
use runtime::Frame;

use crate::mesh::MeshDescriptor;

/// Which logical piece of the scene a mesh or pose batch belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ScenePart {
    Terrain,
    Road,
    Sky,
    Clouds,
    Billboard(SectionId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneMesh {
    pub part: ScenePart,
    pub mesh: MeshDescriptor,
}

/// All static geometry, built once by the world generator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneDescriptor {
    pub meshes: Vec<SceneMesh>,
}

impl SceneDescriptor {
    pub fn mesh_for(&self, part: ScenePart) -> Option<&MeshDescriptor> {
        self.meshes
            .iter()
            .find(|m| m.part == part)
            .map(|m| &m.mesh)
    }
}

/// Per-frame pose of one animated instance. Positions are camera-relative
/// f32 per the precision policy.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct InstancePose {
    pub position_rel: CameraRelativeF32,
    pub yaw_rad: f32,
    pub scale: [f32; 3],
}

/// Uniforms handed to the shading collaborator each frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MaterialUniforms {
    pub time_s: f32,
    pub sun_direction: [f32; 3],
    pub bloom_strength: f32,
    pub pixel_ratio: f32,
}

pub trait RenderPort {
    fn upload_scene(&mut self, scene: &SceneDescriptor);
    fn set_camera(&mut self, eye: Vec3, view_proj: [[f32; 4]; 4]);
    fn set_part_poses(&mut self, part: ScenePart, poses: &[InstancePose]);
    fn render(&mut self, frame: &Frame, uniforms: &MaterialUniforms);
}

/// Renderer that draws nothing. Used by tests and headless hosts.
#[derive(Debug, Default)]
pub struct NoopRenderer {
    pub uploaded_meshes: usize,
    pub frames_rendered: u64,
}

impl RenderPort for NoopRenderer {
    fn upload_scene(&mut self, scene: &SceneDescriptor) {
        self.uploaded_meshes = scene.meshes.len();
    }

    fn set_camera(&mut self, _eye: Vec3, _view_proj: [[f32; 4]; 4]) {}

    fn set_part_poses(&mut self, _part: ScenePart, _poses: &[InstancePose]) {}

    fn render(&mut self, _frame: &Frame, _uniforms: &MaterialUniforms) {
        self.frames_rendered += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::{NoopRenderer, RenderPort, SceneDescriptor, SceneMesh, ScenePart};
    use crate::mesh::MeshDescriptor;
    use foundation::SectionId;
    use runtime::Frame;

    fn scene() -> SceneDescriptor {
        SceneDescriptor {
            meshes: vec![
                SceneMesh {
                    part: ScenePart::Terrain,
                    mesh: MeshDescriptor::new(),
                },
                SceneMesh {
                    part: ScenePart::Billboard(SectionId(0)),
                    mesh: MeshDescriptor::new(),
                },
            ],
        }
    }

    #[test]
    fn mesh_lookup_by_part() {
        let s = scene();
        assert!(s.mesh_for(ScenePart::Terrain).is_some());
        assert!(s.mesh_for(ScenePart::Billboard(SectionId(0))).is_some());
        assert!(s.mesh_for(ScenePart::Billboard(SectionId(1))).is_none());
        assert!(s.mesh_for(ScenePart::Sky).is_none());
    }

    #[test]
    fn noop_renderer_counts_activity() {
        let mut r = NoopRenderer::default();
        r.upload_scene(&scene());
        assert_eq!(r.uploaded_meshes, 2);
        let frame = Frame::first();
        r.render(&frame, &super::MaterialUniforms {
            time_s: 0.0,
            sun_direction: [0.0, 1.0, 0.0],
            bloom_strength: 1.0,
            pixel_ratio: 2.0,
        });
        assert_eq!(r.frames_rendered, 1);
    }
}
