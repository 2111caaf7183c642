//! Scene assembly from mapped attributes and a variant descriptor.

use std::f32::consts::FRAC_PI_2;
use std::path::PathBuf;

use exoviz_params::{AMBIENT_COLOR, Rgb, VisualAttributes};
use glam::{Mat4, Vec3};

use crate::mesh::{MeshData, ring_mesh, uv_sphere};
use crate::starfield::StarfieldGenerator;
use crate::texture::TextureImage;
use crate::variant::{LightingStrategy, MaterialStrategy, Variant, VariantDescriptor};

const BODY_OPACITY: f32 = 0.95;
const BODY_SHININESS: f32 = 50.0;
const ATMOSPHERE_SCALE: f32 = 1.1;
const ATMOSPHERE_SEGMENTS: u32 = 32;
const ATMOSPHERE_OPACITY: f32 = 0.15;
const RING_INNER_SCALE: f32 = 1.5;
const RING_OUTER_SCALE: f32 = 2.5;
const RING_SEGMENTS: u32 = 64;
const RING_OPACITY: f32 = 0.4;
const CAMERA_DISTANCE_SCALE: f32 = 3.0;
const CAMERA_FOV_DEGREES: f32 = 75.0;
const CAMERA_NEAR: f32 = 0.1;
const CAMERA_FAR: f32 = 1000.0;

/// Which triangle faces are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Front,
    Back,
    Both,
}

/// Surface appearance of one object.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub base_color: Rgb,
    pub opacity: f32,
    /// Phong exponent. Ignored when `lit` is false.
    pub shininess: f32,
    pub lit: bool,
    pub facing: Facing,
    pub surface_map: Option<TextureImage>,
    pub bump_map: Option<TextureImage>,
    pub bump_scale: f32,
}

impl Material {
    fn flat(base_color: Rgb, opacity: f32, facing: Facing) -> Self {
        Self {
            base_color,
            opacity,
            shininess: 0.0,
            lit: false,
            facing,
            surface_map: None,
            bump_map: None,
            bump_scale: 0.0,
        }
    }
}

/// A mesh, its material and its placement.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub mesh: MeshData,
    pub material: Material,
    /// Local transform applied before the body orientation.
    pub transform: Mat4,
    /// Whether the interaction orientation rotates this object.
    pub follows_orientation: bool,
}

/// Light from a fixed point toward the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub position: Vec3,
    pub color: Rgb,
    pub intensity: f32,
}

impl DirectionalLight {
    /// Unit vector the light travels along.
    #[must_use]
    pub fn direction(&self) -> Vec3 {
        (-self.position).normalize_or(Vec3::NEG_Z)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Rgb,
    pub intensity: f32,
}

/// Perspective camera parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSetup {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

/// Paths and counts that come from configuration rather than the record.
///
/// The default texture paths point at maps that are not bundled; a missing
/// file leaves the textured body flat white.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneAssets {
    pub surface_map: PathBuf,
    pub bump_map: PathBuf,
    pub sphere_segments: u32,
    pub star_count: u32,
    pub star_seed: u64,
}

impl Default for SceneAssets {
    fn default() -> Self {
        Self {
            surface_map: PathBuf::from("assets").join("plutomap1k.jpg"),
            bump_map: PathBuf::from("assets").join("plutobump1k.jpg"),
            sphere_segments: 64,
            star_count: 10_000,
            star_seed: 0x57A2_F1E1D,
        }
    }
}

/// Everything needed to draw one body, before GPU upload.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub variant: Variant,
    pub body: SceneObject,
    pub atmosphere: Option<SceneObject>,
    pub ring: Option<SceneObject>,
    /// Star positions, drawn as white points.
    pub stars: Option<Vec<Vec3>>,
    pub key_light: DirectionalLight,
    pub ambient: AmbientLight,
    pub camera: CameraSetup,
}

impl Scene {
    /// Assemble a scene. Only texture decoding touches the filesystem, and
    /// a failed decode degrades to an untextured white body.
    pub fn build(attrs: &VisualAttributes, desc: &VariantDescriptor, assets: &SceneAssets) -> Self {
        let radius = attrs.visual_radius;
        let segments = assets.sphere_segments;

        let body_material = match desc.material {
            MaterialStrategy::ProceduralColor => Material {
                base_color: attrs.body_color,
                opacity: BODY_OPACITY,
                shininess: BODY_SHININESS,
                lit: true,
                facing: Facing::Front,
                surface_map: None,
                bump_map: None,
                bump_scale: 0.0,
            },
            MaterialStrategy::Textured { bump_scale } => Material {
                base_color: Rgb::WHITE,
                opacity: BODY_OPACITY,
                shininess: BODY_SHININESS,
                lit: true,
                facing: Facing::Front,
                surface_map: TextureImage::load_or_warn(&assets.surface_map),
                bump_map: TextureImage::load_or_warn(&assets.bump_map),
                bump_scale,
            },
        };

        let body = SceneObject {
            mesh: uv_sphere(radius, segments, segments),
            material: body_material,
            transform: Mat4::IDENTITY,
            follows_orientation: true,
        };

        let atmosphere = (desc.allows_atmosphere && attrs.has_atmosphere).then(|| SceneObject {
            mesh: uv_sphere(
                radius * ATMOSPHERE_SCALE,
                ATMOSPHERE_SEGMENTS,
                ATMOSPHERE_SEGMENTS,
            ),
            material: Material::flat(attrs.body_color, ATMOSPHERE_OPACITY, Facing::Back),
            transform: Mat4::IDENTITY,
            follows_orientation: false,
        });

        let ring = (desc.allows_rings && attrs.has_rings).then(|| SceneObject {
            mesh: ring_mesh(
                radius * RING_INNER_SCALE,
                radius * RING_OUTER_SCALE,
                RING_SEGMENTS,
            ),
            material: Material::flat(Rgb::WHITE, RING_OPACITY, Facing::Both),
            transform: Mat4::from_rotation_x(FRAC_PI_2),
            follows_orientation: false,
        });

        let stars = desc
            .has_starfield
            .then(|| StarfieldGenerator::new(assets.star_seed, assets.star_count).generate());

        let (light_color, light_intensity) = match desc.lighting {
            LightingStrategy::Mapped => (attrs.light_color, attrs.light_intensity),
            LightingStrategy::Fixed { intensity } => (Rgb::WHITE, intensity),
        };

        let scene = Self {
            variant: desc.variant,
            body,
            atmosphere,
            ring,
            stars,
            key_light: DirectionalLight {
                position: desc.light_position,
                color: light_color,
                intensity: light_intensity,
            },
            ambient: AmbientLight {
                color: AMBIENT_COLOR,
                intensity: desc.ambient_intensity,
            },
            camera: CameraSetup {
                position: Vec3::new(0.0, 0.0, radius * CAMERA_DISTANCE_SCALE),
                target: Vec3::ZERO,
                fov_y_degrees: CAMERA_FOV_DEGREES,
                near: CAMERA_NEAR,
                far: CAMERA_FAR,
            },
        };
        log::info!(
            "Built {} scene: radius {radius:.2}, atmosphere {}, rings {}, {} stars",
            desc.variant.label(),
            scene.atmosphere.is_some(),
            scene.ring.is_some(),
            scene.stars.as_ref().map_or(0, Vec::len),
        );
        scene
    }

    /// Meshed objects in draw order: body, ring, then atmosphere shell.
    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        std::iter::once(&self.body)
            .chain(self.ring.as_ref())
            .chain(self.atmosphere.as_ref())
    }
}
