//! Procedural sphere and annulus meshes.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

/// Indexed triangle mesh with per-vertex normals and UVs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    /// Equirectangular UVs, `v = 0` at the north pole.
    pub uvs: Vec<[f32; 2]>,
    /// Counter-clockwise triangles seen from the front.
    pub indices: Vec<u32>,
}

impl MeshData {
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Latitude/longitude sphere centred on the origin.
///
/// Produces `(width_segments + 1) * (height_segments + 1)` vertices; the seam
/// column is duplicated so UVs wrap cleanly. Degenerate pole triangles are
/// skipped.
pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);
    let row = width_segments + 1;
    let vertex_count = (row * (height_segments + 1)) as usize;

    let mut positions = Vec::with_capacity(vertex_count);
    let mut normals = Vec::with_capacity(vertex_count);
    let mut uvs = Vec::with_capacity(vertex_count);

    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        let (sin_phi, cos_phi) = (v * PI).sin_cos();
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let (sin_theta, cos_theta) = (u * TAU).sin_cos();
            let normal = Vec3::new(-cos_theta * sin_phi, cos_phi, sin_theta * sin_phi);
            positions.push(normal * radius);
            normals.push(normal);
            uvs.push([u, v]);
        }
    }

    let mut indices = Vec::with_capacity((width_segments * height_segments * 6) as usize);
    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    MeshData {
        positions,
        normals,
        uvs,
        indices,
    }
}

/// Flat annulus in the XY plane facing +Z.
pub fn ring_mesh(inner_radius: f32, outer_radius: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let row = segments + 1;

    let mut positions = Vec::with_capacity((row * 2) as usize);
    let mut uvs = Vec::with_capacity((row * 2) as usize);

    for radius in [inner_radius, outer_radius] {
        for i in 0..=segments {
            let (sin, cos) = (i as f32 / segments as f32 * TAU).sin_cos();
            let p = Vec3::new(radius * cos, radius * sin, 0.0);
            positions.push(p);
            uvs.push([
                (p.x / outer_radius + 1.0) * 0.5,
                (p.y / outer_radius + 1.0) * 0.5,
            ]);
        }
    }
    let normals = vec![Vec3::Z; positions.len()];

    let mut indices = Vec::with_capacity((segments * 6) as usize);
    for i in 0..segments {
        let a = i;
        let b = a + row;
        let c = a + row + 1;
        let d = a + 1;
        indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    MeshData {
        positions,
        normals,
        uvs,
        indices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_vertices_on_radius() {
        let mesh = uv_sphere(2.5, 64, 64);
        for pos in &mesh.positions {
            assert!(
                (pos.length() - 2.5).abs() < 1e-4,
                "vertex off sphere: length = {}",
                pos.length()
            );
        }
    }

    #[test]
    fn test_sphere_counts() {
        let mesh = uv_sphere(1.0, 64, 64);
        assert_eq!(mesh.vertex_count(), 65 * 65);
        // Two triangles per quad minus one per quad in the pole rows.
        assert_eq!(mesh.triangle_count(), 64 * 64 * 2 - 64 * 2);
        assert_eq!(mesh.normals.len(), mesh.vertex_count());
        assert_eq!(mesh.uvs.len(), mesh.vertex_count());
    }

    #[test]
    fn test_sphere_indices_valid() {
        let mesh = uv_sphere(1.0, 32, 32);
        let n = mesh.vertex_count() as u32;
        assert!(mesh.indices.iter().all(|&i| i < n));
    }

    #[test]
    fn test_sphere_winding_faces_outward() {
        let mesh = uv_sphere(1.0, 16, 16);
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [0, 1, 2].map(|k| mesh.positions[tri[k] as usize]);
            let face_normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(face_normal.dot(centroid) > 0.0, "inward-facing triangle {tri:?}");
        }
    }

    #[test]
    fn test_sphere_uv_range() {
        let mesh = uv_sphere(1.0, 8, 8);
        for [u, v] in &mesh.uvs {
            assert!((0.0..=1.0).contains(u) && (0.0..=1.0).contains(v));
        }
        assert_eq!(mesh.positions[0].y, 1.0);
    }

    #[test]
    fn test_ring_spans_radii() {
        let mesh = ring_mesh(1.5, 2.5, 64);
        assert_eq!(mesh.vertex_count(), 65 * 2);
        assert_eq!(mesh.triangle_count(), 128);
        for p in &mesh.positions {
            let r = p.length();
            assert!((r - 1.5).abs() < 1e-4 || (r - 2.5).abs() < 1e-4);
            assert_eq!(p.z, 0.0);
        }
    }

    #[test]
    fn test_ring_faces_positive_z() {
        let mesh = ring_mesh(1.0, 2.0, 16);
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [0, 1, 2].map(|k| mesh.positions[tri[k] as usize]);
            assert!((b - a).cross(c - a).z > 0.0);
        }
    }
}
