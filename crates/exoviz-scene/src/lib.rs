//! CPU-side scene description for one rendered celestial body.
//!
//! [`Scene::build`] turns [`VisualAttributes`](exoviz_params::VisualAttributes)
//! and a [`VariantDescriptor`] into meshes, materials, lights and a camera.
//! Uploading the result to the GPU is the renderer's job.

pub mod mesh;
pub mod scene;
pub mod starfield;
pub mod texture;
pub mod variant;

pub use mesh::{MeshData, ring_mesh, uv_sphere};
pub use scene::{
    AmbientLight, CameraSetup, DirectionalLight, Facing, Material, Scene, SceneAssets,
    SceneObject,
};
pub use starfield::{STARFIELD_EXTENT, StarfieldGenerator};
pub use texture::{TextureError, TextureImage};
pub use variant::{LightingStrategy, MaterialStrategy, Variant, VariantDescriptor};
