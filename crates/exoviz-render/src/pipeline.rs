//! Render pipelines for the body, its translucent companions and the starfield.
//!
//! All surface pipelines share one layout: camera at group 0, light at
//! group 1, material uniform plus surface/bump maps at group 2. They differ in
//! culling and depth writes. The star pipeline only binds the camera.

use std::num::NonZeroU64;

use exoviz_scene::Facing;

use crate::buffer::{BodyVertex, StarVertex};
use crate::depth::DepthBuffer;

/// Every render pipeline a scene needs, plus their bind group layouts.
pub struct CelestialPipelines {
    /// Front faces, depth write.
    pub opaque: wgpu::RenderPipeline,
    /// Back faces only, no depth write.
    pub back_shell: wgpu::RenderPipeline,
    /// Both faces, no depth write.
    pub double_sided: wgpu::RenderPipeline,
    pub stars: wgpu::RenderPipeline,
    pub camera_bind_group_layout: wgpu::BindGroupLayout,
    pub light_bind_group_layout: wgpu::BindGroupLayout,
    pub material_bind_group_layout: wgpu::BindGroupLayout,
}

impl CelestialPipelines {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("celestial-shader"),
            source: wgpu::ShaderSource::Wgsl(CELESTIAL_SHADER_SOURCE.into()),
        });

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("camera-bgl"),
                entries: &[uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT, 80)],
            });

        let light_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("light-bgl"),
                entries: &[uniform_entry(0, wgpu::ShaderStages::FRAGMENT, 48)],
            });

        let texture_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };
        let material_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("material-bgl"),
                entries: &[
                    uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT, 96),
                    texture_entry(1),
                    texture_entry(2),
                    wgpu::BindGroupLayoutEntry {
                        binding: 3,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let surface_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("surface-pipeline-layout"),
            bind_group_layouts: &[
                &camera_bind_group_layout,
                &light_bind_group_layout,
                &material_bind_group_layout,
            ],
            immediate_size: 0,
        });
        let star_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("star-pipeline-layout"),
            bind_group_layouts: &[&camera_bind_group_layout],
            immediate_size: 0,
        });

        let surface = |label, facing| {
            surface_pipeline(device, &surface_layout, &shader, surface_format, label, facing)
        };
        let opaque = surface("body-pipeline", Facing::Front);
        let back_shell = surface("shell-pipeline", Facing::Back);
        let double_sided = surface("ring-pipeline", Facing::Both);
        let stars = star_pipeline(device, &star_layout, &shader, surface_format);

        Self {
            opaque,
            back_shell,
            double_sided,
            stars,
            camera_bind_group_layout,
            light_bind_group_layout,
            material_bind_group_layout,
        }
    }

    /// The surface pipeline for a material's facing.
    pub fn for_facing(&self, facing: Facing) -> &wgpu::RenderPipeline {
        match facing {
            Facing::Front => &self.opaque,
            Facing::Back => &self.back_shell,
            Facing::Both => &self.double_sided,
        }
    }
}

fn uniform_entry(
    binding: u32,
    visibility: wgpu::ShaderStages,
    size: u64,
) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: NonZeroU64::new(size),
        },
        count: None,
    }
}

/// Culled face and depth-write flag for a facing.
fn facing_state(facing: Facing) -> (Option<wgpu::Face>, bool) {
    match facing {
        Facing::Front => (Some(wgpu::Face::Back), true),
        Facing::Back => (Some(wgpu::Face::Front), false),
        Facing::Both => (None, false),
    }
}

fn surface_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    surface_format: wgpu::TextureFormat,
    label: &str,
    facing: Facing,
) -> wgpu::RenderPipeline {
    let (cull_mode, depth_write_enabled) = facing_state(facing);

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[BodyVertex::layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode,
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DepthBuffer::FORMAT,
            depth_write_enabled,
            depth_compare: DepthBuffer::COMPARE_FUNCTION,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_phong"),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        multiview_mask: None,
        cache: None,
    })
}

fn star_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    surface_format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("star-pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_star"),
            buffers: &[StarVertex::layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::PointList,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DepthBuffer::FORMAT,
            depth_write_enabled: true,
            depth_compare: DepthBuffer::COMPARE_FUNCTION,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_star"),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        multiview_mask: None,
        cache: None,
    })
}

/// WGSL for all pipelines.
///
/// `fs_phong` shades with an ambient term, Lambert diffuse and a normalized
/// Blinn-Phong highlight. Bump mapping perturbs the normal from screen-space
/// height derivatives; a flat bump map leaves it unchanged. Unlit materials
/// output the textured base color. Output is premultiplied alpha.
pub const CELESTIAL_SHADER_SOURCE: &str = r#"
const PI: f32 = 3.14159265359;
const SPECULAR: f32 = 0.0056;

struct Camera {
    view_proj: mat4x4<f32>,
    position: vec4<f32>,
};

struct Light {
    direction_intensity: vec4<f32>,
    color: vec4<f32>,
    ambient: vec4<f32>,
};

struct Material {
    model: mat4x4<f32>,
    base_color: vec4<f32>,
    shading: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> camera: Camera;

@group(1) @binding(0)
var<uniform> light: Light;

@group(2) @binding(0)
var<uniform> material: Material;

@group(2) @binding(1)
var surface_map: texture_2d<f32>;

@group(2) @binding(2)
var bump_map: texture_2d<f32>;

@group(2) @binding(3)
var map_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    let world = material.model * vec4<f32>(in.position, 1.0);
    var out: VertexOutput;
    out.clip_position = camera.view_proj * world;
    out.world_position = world.xyz;
    out.normal = (material.model * vec4<f32>(in.normal, 0.0)).xyz;
    out.uv = in.uv;
    return out;
}

fn bump_gradient(uv: vec2<f32>) -> vec2<f32> {
    let scale = material.shading.z;
    let h = scale * textureSample(bump_map, map_sampler, uv).x;
    let hx = scale * textureSample(bump_map, map_sampler, uv + dpdx(uv)).x - h;
    let hy = scale * textureSample(bump_map, map_sampler, uv + dpdy(uv)).x - h;
    return vec2<f32>(hx, hy);
}

fn perturb_normal(position: vec3<f32>, normal: vec3<f32>, dh: vec2<f32>, face: f32) -> vec3<f32> {
    let sigma_x = dpdx(position);
    let sigma_y = dpdy(position);
    let r1 = cross(sigma_y, normal);
    let r2 = cross(normal, sigma_x);
    let det = dot(sigma_x, r1) * face;
    let grad = sign(det) * (dh.x * r1 + dh.y * r2);
    let bumped = abs(det) * normal - grad;
    return select(normal, normalize(bumped), length(bumped) > 1e-12);
}

@fragment
fn fs_phong(in: VertexOutput, @builtin(front_facing) front: bool) -> @location(0) vec4<f32> {
    let texel = textureSample(surface_map, map_sampler, in.uv);
    let albedo = material.base_color.rgb * texel.rgb;
    let alpha = material.base_color.a * texel.a;

    let face = select(-1.0, 1.0, front);
    let dh = bump_gradient(in.uv);
    let n = perturb_normal(in.world_position, normalize(in.normal) * face, dh, face);

    let l = -normalize(light.direction_intensity.xyz);
    let v = normalize(camera.position.xyz - in.world_position);
    let h = normalize(l + v);

    let irradiance = light.color.rgb * light.direction_intensity.w * max(dot(n, l), 0.0);
    let shininess = material.shading.x;
    let fresnel = SPECULAR + (1.0 - SPECULAR) * pow(1.0 - max(dot(v, h), 0.0), 5.0);
    let distribution = (0.5 * shininess + 1.0) / PI * pow(max(dot(n, h), 0.0), shininess);

    let diffuse = albedo * irradiance;
    let specular = irradiance * fresnel * 0.25 * distribution;
    let ambient = albedo * light.ambient.rgb;

    let rgb = select(albedo, ambient + diffuse + specular, material.shading.y > 0.5);
    return vec4<f32>(rgb * alpha, alpha);
}

@vertex
fn vs_star(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    return camera.view_proj * vec4<f32>(position, 1.0);
}

@fragment
fn fs_star() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 1.0, 1.0, 1.0);
}
"#;
