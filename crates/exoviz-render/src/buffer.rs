//! Vertex formats and mesh buffers.

use bytemuck::{Pod, Zeroable};
use exoviz_scene::MeshData;
use glam::Vec3;
use wgpu::util::DeviceExt;

/// Lit-surface vertex: position, normal and UV.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct BodyVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl BodyVertex {
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        use wgpu::{VertexAttribute, VertexFormat};

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<BodyVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: VertexFormat::Float32x3,
                },
                VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: VertexFormat::Float32x3,
                },
                VertexAttribute {
                    offset: (std::mem::size_of::<[f32; 3]>() * 2) as wgpu::BufferAddress,
                    shader_location: 2,
                    format: VertexFormat::Float32x2,
                },
            ],
        }
    }

    /// Interleave a mesh's attribute arrays.
    #[must_use]
    pub fn from_mesh(mesh: &MeshData) -> Vec<Self> {
        mesh.positions
            .iter()
            .zip(&mesh.normals)
            .zip(&mesh.uvs)
            .map(|((p, n), uv)| Self {
                position: p.to_array(),
                normal: n.to_array(),
                uv: *uv,
            })
            .collect()
    }
}

/// Position-only vertex for point sprites.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct StarVertex {
    pub position: [f32; 3],
}

impl StarVertex {
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<StarVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            }],
        }
    }

    #[must_use]
    pub fn from_points(points: &[Vec3]) -> Vec<Self> {
        points
            .iter()
            .map(|p| Self {
                position: p.to_array(),
            })
            .collect()
    }
}

/// Indexed mesh on the GPU.
pub struct MeshBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl MeshBuffer {
    pub fn upload(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Self {
        let vertices = BodyVertex::from_mesh(mesh);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}-vertices")),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}-indices")),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }

    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }

    /// Free both buffers. Returns the number destroyed.
    pub fn destroy(&self) -> usize {
        self.vertex_buffer.destroy();
        self.index_buffer.destroy();
        2
    }
}

/// Non-indexed point list on the GPU.
pub struct PointBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub vertex_count: u32,
}

impl PointBuffer {
    pub fn upload(device: &wgpu::Device, label: &str, points: &[Vec3]) -> Self {
        let vertices = StarVertex::from_points(points);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Self {
            vertex_buffer,
            vertex_count: points.len() as u32,
        }
    }

    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        if self.vertex_count == 0 {
            return;
        }
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.draw(0..self.vertex_count, 0..1);
    }

    pub fn destroy(&self) -> usize {
        self.vertex_buffer.destroy();
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::create_test_device;
    use exoviz_scene::uv_sphere;

    #[test]
    fn test_body_vertex_size() {
        assert_eq!(std::mem::size_of::<BodyVertex>(), 32);
        assert_eq!(BodyVertex::layout().array_stride, 32);
        assert_eq!(BodyVertex::layout().attributes.len(), 3);
    }

    #[test]
    fn test_star_vertex_size() {
        assert_eq!(std::mem::size_of::<StarVertex>(), 12);
        assert_eq!(StarVertex::layout().array_stride, 12);
    }

    #[test]
    fn test_interleave_keeps_order() {
        let mesh = uv_sphere(2.0, 8, 6);
        let vertices = BodyVertex::from_mesh(&mesh);
        assert_eq!(vertices.len(), mesh.vertex_count());
        assert_eq!(vertices[10].position, mesh.positions[10].to_array());
        assert_eq!(vertices[10].normal, mesh.normals[10].to_array());
        assert_eq!(vertices[10].uv, mesh.uvs[10]);
    }

    #[test]
    fn test_upload_mesh() {
        let Some((device, _queue)) = create_test_device() else {
            return;
        };
        let mesh = uv_sphere(1.0, 16, 16);
        let buffer = MeshBuffer::upload(&device, "test-sphere", &mesh);
        assert_eq!(buffer.index_count as usize, mesh.indices.len());
        assert_eq!(buffer.vertex_buffer.size(), (mesh.vertex_count() * 32) as u64);
        assert_eq!(buffer.destroy(), 2);
    }
}
