//! Procedural world generation.
//!
//! Everything visual is built once from the route and the section catalog:
//! terrain heightfield, road ribbon, sky dome, clouds, and one themed
//! billboard per section. After the build the world only animates; nothing
//! is created or destroyed during a session.

pub mod billboard;
pub mod mesh;
pub mod noise;
pub mod render;
pub mod sky;
pub mod terrain;
pub mod world;

pub use billboard::{Billboard, BillboardSettings, build_themed_mesh};
pub use mesh::MeshDescriptor;
pub use render::{
    InstancePose, MaterialUniforms, NoopRenderer, RenderPort, SceneDescriptor, SceneMesh,
    ScenePart,
};
pub use terrain::{RoadCorridor, TerrainField, TerrainSettings};
pub use world::{World, WorldSettings};
