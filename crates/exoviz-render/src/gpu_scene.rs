//! GPU-resident copy of a [`Scene`].
//!
//! Uploaded once per mount. Per-frame work is limited to rewriting the camera
//! uniform and the model matrices of objects that follow the body
//! orientation.

use bytemuck::Zeroable;
use exoviz_scene::{Facing, Scene, TextureImage};
use glam::{Mat4, Quat};
use wgpu::util::DeviceExt;

use crate::buffer::{MeshBuffer, PointBuffer};
use crate::camera::Camera;
use crate::pipeline::CelestialPipelines;
use crate::uniforms::{CameraUniform, LightUniform, MaterialUniform};

/// What [`GpuScene::release`] destroyed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReleasedResources {
    pub buffers: usize,
    pub textures: usize,
}

struct GpuObject {
    mesh: MeshBuffer,
    material_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    facing: Facing,
    uniform: MaterialUniform,
    transform: Mat4,
    follows_orientation: bool,
}

/// Buffers, textures and bind groups for one scene.
pub struct GpuScene {
    pipelines: CelestialPipelines,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    light_buffer: wgpu::Buffer,
    light_bind_group: wgpu::BindGroup,
    objects: Vec<GpuObject>,
    stars: Option<PointBuffer>,
    textures: Vec<wgpu::Texture>,
}

impl GpuScene {
    /// Create every GPU resource the scene needs.
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        scene: &Scene,
    ) -> Self {
        let pipelines = CelestialPipelines::new(device, surface_format);

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("camera-uniform"),
            contents: bytemuck::cast_slice(&[CameraUniform::zeroed()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera-bind-group"),
            layout: &pipelines.camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let light = LightUniform::new(&scene.key_light, &scene.ambient);
        let light_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("light-uniform"),
            contents: bytemuck::cast_slice(&[light]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let light_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("light-bind-group"),
            layout: &pipelines.light_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: light_buffer.as_entire_binding(),
            }],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("map-sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let mut textures = Vec::new();
        let white = upload_texture(device, queue, "white-texture", &white_pixel(), true);
        let white_view = white.create_view(&wgpu::TextureViewDescriptor::default());
        textures.push(white);

        let mut objects = Vec::new();
        for (index, object) in scene.objects().enumerate() {
            let label = format!("object-{index}");
            let mut map_view = |image: Option<&TextureImage>, name: &str, srgb: bool| {
                image.map_or_else(
                    || white_view.clone(),
                    |image| {
                        let texture =
                            upload_texture(device, queue, &format!("{label}-{name}"), image, srgb);
                        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
                        textures.push(texture);
                        view
                    },
                )
            };
            let surface_view = map_view(object.material.surface_map.as_ref(), "surface", true);
            let bump_view = map_view(object.material.bump_map.as_ref(), "bump", false);

            let uniform = MaterialUniform::new(&object.material, object.transform);
            let material_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label}-material")),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(&format!("{label}-bind-group")),
                layout: &pipelines.material_bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: material_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(&surface_view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::TextureView(&bump_view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 3,
                        resource: wgpu::BindingResource::Sampler(&sampler),
                    },
                ],
            });

            objects.push(GpuObject {
                mesh: MeshBuffer::upload(device, &label, &object.mesh),
                material_buffer,
                bind_group,
                facing: object.material.facing,
                uniform,
                transform: object.transform,
                follows_orientation: object.follows_orientation,
            });
        }

        let stars = scene
            .stars
            .as_deref()
            .map(|points| PointBuffer::upload(device, "starfield", points));

        log::info!(
            "Uploaded scene: {} objects, {} textures, {} stars",
            objects.len(),
            textures.len(),
            stars.as_ref().map_or(0, |s| s.vertex_count),
        );

        Self {
            pipelines,
            camera_buffer,
            camera_bind_group,
            light_buffer,
            light_bind_group,
            objects,
            stars,
            textures,
        }
    }

    /// Write the camera and the body orientation for the next frame.
    pub fn update(&self, queue: &wgpu::Queue, camera: &Camera, orientation: Quat) {
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[camera.to_uniform()]),
        );
        let rotation = Mat4::from_quat(orientation);
        for object in self.objects.iter().filter(|o| o.follows_orientation) {
            let uniform = object.uniform.with_model(rotation * object.transform);
            queue.write_buffer(&object.material_buffer, 0, bytemuck::cast_slice(&[uniform]));
        }
    }

    /// Record draw calls: stars, then objects in scene order.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);

        if let Some(stars) = &self.stars {
            render_pass.set_pipeline(&self.pipelines.stars);
            stars.draw(render_pass);
        }

        render_pass.set_bind_group(1, &self.light_bind_group, &[]);
        for object in &self.objects {
            render_pass.set_pipeline(self.pipelines.for_facing(object.facing));
            render_pass.set_bind_group(2, &object.bind_group, &[]);
            object.mesh.draw(render_pass);
        }
    }

    #[must_use]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Destroy every buffer and texture created by [`upload`](Self::upload).
    pub fn release(self) -> ReleasedResources {
        let mut released = ReleasedResources::default();

        self.camera_buffer.destroy();
        self.light_buffer.destroy();
        released.buffers += 2;
        for object in &self.objects {
            released.buffers += object.mesh.destroy();
            object.material_buffer.destroy();
            released.buffers += 1;
        }
        if let Some(stars) = &self.stars {
            released.buffers += stars.destroy();
        }
        for texture in &self.textures {
            texture.destroy();
        }
        released.textures = self.textures.len();

        log::info!(
            "Released scene: {} buffers, {} textures",
            released.buffers,
            released.textures
        );
        released
    }
}

fn white_pixel() -> TextureImage {
    TextureImage {
        width: 1,
        height: 1,
        rgba: vec![255; 4],
    }
}

fn upload_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    label: &str,
    image: &TextureImage,
    srgb: bool,
) -> wgpu::Texture {
    device.create_texture_with_data(
        queue,
        &wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: image.width,
                height: image.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: if srgb {
                wgpu::TextureFormat::Rgba8UnormSrgb
            } else {
                wgpu::TextureFormat::Rgba8Unorm
            },
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        },
        wgpu::util::TextureDataOrder::LayerMajor,
        &image.rgba,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::create_test_device;
    use exoviz_params::{CelestialBodyParameters, map_to_visual_attributes};
    use exoviz_scene::{SceneAssets, Variant};

    fn ringed_scene() -> Scene {
        let attrs = map_to_visual_attributes(&CelestialBodyParameters {
            radius: Some(5.0),
            equilibrium_temperature: Some(150.0),
            ..Default::default()
        });
        Scene::build(
            &attrs,
            &Variant::Exoplanet.descriptor(),
            &SceneAssets::default(),
        )
    }

    #[test]
    fn test_upload_and_release_counts() {
        let Some((device, queue)) = create_test_device() else {
            return;
        };
        let scene = ringed_scene();
        let gpu = GpuScene::upload(&device, &queue, wgpu::TextureFormat::Bgra8UnormSrgb, &scene);
        assert_eq!(gpu.object_count(), 3);

        let released = gpu.release();
        // camera + light, then vertex/index/material per object
        assert_eq!(released.buffers, 2 + 3 * 3);
        assert_eq!(released.textures, 1);
    }

    #[test]
    fn test_textured_scene_uploads_maps() {
        let Some((device, queue)) = create_test_device() else {
            return;
        };
        let dir = tempfile::tempdir().unwrap();
        let surface = dir.path().join("surface.png");
        let bump = dir.path().join("bump.png");
        image::RgbaImage::new(4, 4).save(&surface).unwrap();
        image::RgbaImage::new(4, 4).save(&bump).unwrap();

        let attrs = map_to_visual_attributes(&CelestialBodyParameters::default());
        let assets = SceneAssets {
            surface_map: surface,
            bump_map: bump,
            star_count: 50,
            ..Default::default()
        };
        let scene = Scene::build(&attrs, &Variant::DwarfPlanet.descriptor(), &assets);
        let gpu = GpuScene::upload(&device, &queue, wgpu::TextureFormat::Bgra8UnormSrgb, &scene);

        let released = gpu.release();
        assert_eq!(released.textures, 3);
        // camera + light + body (3) + stars (1)
        assert_eq!(released.buffers, 6);
    }
}
