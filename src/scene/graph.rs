//! Scene-graph collaborator interface
//!
//! The host engine owns entities, rendering, physics and materials. A curved
//! screen only needs two operations from it, described by [`SceneGraph`].

use glam::{DMat4, DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::layout::{BoxUvs, LayoutError};

/// Position, rotation and scale of an entity relative to its parent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    #[serde(rename = "position", with = "crate::layout::config::point3_xml")]
    pub position: DVec3,
    #[serde(rename = "rotation", with = "quat_xml")]
    pub rotation: DQuat,
    #[serde(rename = "scale", with = "crate::layout::config::point3_xml")]
    pub scale: DVec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        position: DVec3::ZERO,
        rotation: DQuat::IDENTITY,
        scale: DVec3::ONE,
    };

    pub fn new(position: DVec3, rotation: DQuat, scale: DVec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Local-to-parent matrix
    pub fn matrix(&self) -> DMat4 {
        DMat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// Surface material of a panel
///
/// Panels self-illuminate with the video so scene lighting does not change them.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelMaterial<T> {
    /// Base-color texture
    pub texture: T,
    /// Emissive texture (the same video)
    pub emissive_texture: T,
    pub roughness: f32,
    pub metallic: f32,
    pub specular_intensity: f32,
    pub emissive_intensity: f32,
    /// Emissive tint (RGB)
    pub emissive_color: [f32; 3],
}

impl<T: Clone> PanelMaterial<T> {
    /// Fully rough, non-metallic, emissive white material showing `texture`
    pub fn video(texture: T) -> Self {
        Self {
            emissive_texture: texture.clone(),
            texture,
            roughness: 1.0,
            metallic: 0.0,
            specular_intensity: 0.0,
            emissive_intensity: 1.0,
            emissive_color: [1.0, 1.0, 1.0],
        }
    }
}

/// Everything needed to create one panel entity
#[derive(Debug, Clone)]
pub struct PanelSpec<'a, T> {
    /// Panel index along the arc
    pub index: u32,
    /// Transform relative to the screen root; scale is the box size
    pub transform: Transform,
    /// Per-face UVs for the box renderable
    pub uvs: BoxUvs,
    /// Shared video material
    pub material: &'a PanelMaterial<T>,
}

/// Host engine entity registry
///
/// Implementations create a transform-only root node and textured, collidable
/// box panels parented to it. Errors are propagated to the caller untouched.
pub trait SceneGraph {
    /// Opaque entity handle
    type Entity: Copy;
    /// Texture reference understood by the engine's material system
    type Texture: Clone;
    /// Engine error; must be able to carry layout validation failures
    type Error: From<LayoutError>;

    /// Create a transform-only node
    fn create_root_entity(&mut self, transform: &Transform) -> Result<Self::Entity, Self::Error>;

    /// Create a box panel with renderable, collider and material under `parent`
    fn create_panel_entity(
        &mut self,
        parent: Self::Entity,
        panel: &PanelSpec<'_, Self::Texture>,
    ) -> Result<Self::Entity, Self::Error>;
}

/// XML representation of a quaternion as `<x/><y/><z/><w/>` children
mod quat_xml {
    use glam::DQuat;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Quat4 {
        x: f64,
        y: f64,
        z: f64,
        w: f64,
    }

    pub fn serialize<S: Serializer>(q: &DQuat, s: S) -> Result<S::Ok, S::Error> {
        Quat4 {
            x: q.x,
            y: q.y,
            z: q.z,
            w: q.w,
        }
        .serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DQuat, D::Error> {
        let Quat4 { x, y, z, w } = Quat4::deserialize(d)?;
        Ok(DQuat::from_xyzw(x, y, z, w))
    }
}
