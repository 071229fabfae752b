//! Box mesh generation for panels
//!
//! Builds the 24-vertex box a panel renders with, carrying per-face UVs in the
//! same face order the UV mapping uses.

use bytemuck::{Pod, Zeroable};
use glam::{DVec3, Vec3};

use crate::layout::{BoxFace, BoxUvs};

/// Vertex for a panel box mesh
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct PanelVertex {
    /// Position in panel space
    pub position: [f32; 3],
    /// Texture coordinates
    pub uv: [f32; 2],
    /// Outward face normal
    pub normal: [f32; 3],
}

impl PanelVertex {
    /// Size of vertex in bytes
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;
}

/// Generated mesh data
#[derive(Debug, Clone)]
pub struct BoxMesh {
    pub vertices: Vec<PanelVertex>,
    pub indices: Vec<u32>,
}

/// Outward normal and up direction of a face
fn face_axes(face: BoxFace) -> (Vec3, Vec3) {
    match face {
        BoxFace::Top => (Vec3::Y, Vec3::NEG_Z),
        BoxFace::Bottom => (Vec3::NEG_Y, Vec3::Z),
        BoxFace::Back => (Vec3::Z, Vec3::Y),
        BoxFace::Front => (Vec3::NEG_Z, Vec3::Y),
        BoxFace::Right => (Vec3::X, Vec3::Y),
        BoxFace::Left => (Vec3::NEG_X, Vec3::Y),
    }
}

impl BoxMesh {
    /// Generate a box of `size` centered on the origin
    ///
    /// Each face gets 4 vertices ordered top-right, top-left, bottom-left,
    /// bottom-right as seen from outside, matching `UvRect::corners`.
    pub fn panel(size: DVec3, uvs: &BoxUvs) -> Self {
        let half = size.as_vec3() * 0.5;
        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        for face in BoxFace::ALL {
            let (normal, up) = face_axes(face);
            // Viewer's right when looking at the face from outside
            let right = (-normal).cross(up);
            let base_idx = vertices.len() as u32;

            let corners = [(1.0, 1.0), (-1.0, 1.0), (-1.0, -1.0), (1.0, -1.0)];
            for ((sx, sy), uv) in corners.into_iter().zip(uvs.face(face)) {
                let position = (normal + right * sx + up * sy) * half;
                vertices.push(PanelVertex {
                    position: position.to_array(),
                    uv: *uv,
                    normal: normal.to_array(),
                });
            }

            // CCW winding seen from outside
            indices.extend_from_slice(&[base_idx, base_idx + 1, base_idx + 2]);
            indices.extend_from_slice(&[base_idx, base_idx + 2, base_idx + 3]);
        }

        Self { vertices, indices }
    }

    /// Vertices of one face
    pub fn face_vertices(&self, face: BoxFace) -> &[PanelVertex] {
        let start = face.index() * 4;
        &self.vertices[start..start + 4]
    }

    /// Raw vertex bytes for upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get index count
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }
}
