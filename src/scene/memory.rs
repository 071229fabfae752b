//! In-memory scene graph
//!
//! A [`SceneGraph`] that records entities instead of handing them to an engine.
//! Used for previews, the CLI and tests.

use glam::DVec3;
use thiserror::Error;

use super::graph::{PanelMaterial, PanelSpec, SceneGraph, Transform};
use super::mesh::BoxMesh;
use crate::layout::{BoxUvs, LayoutError};

/// Handle of an entity in an [`InMemoryScene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EntityId(pub u32);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity {}", self.0)
    }
}

/// Errors raised by the in-memory scene
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("invalid layout: {0}")]
    Layout(#[from] LayoutError),
    #[error("parent {0} is not a root entity")]
    UnknownParent(EntityId),
}

/// Physics collider attached to a panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Collider {
    /// Axis-aligned box in panel space
    Box { size: DVec3 },
}

/// Transform-only root node
#[derive(Debug, Clone)]
pub struct RootRecord {
    pub id: EntityId,
    pub transform: Transform,
}

/// One created panel entity
#[derive(Debug, Clone)]
pub struct PanelRecord {
    pub id: EntityId,
    pub parent: EntityId,
    pub index: u32,
    pub transform: Transform,
    pub uvs: BoxUvs,
    pub mesh: BoxMesh,
    pub collider: Collider,
    pub material: PanelMaterial<String>,
}

/// Recording scene graph with `String` texture references
#[derive(Debug, Default)]
pub struct InMemoryScene {
    roots: Vec<RootRecord>,
    panels: Vec<PanelRecord>,
    next_id: u32,
}

impl InMemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Root entities in creation order
    pub fn roots(&self) -> &[RootRecord] {
        &self.roots
    }

    /// Panel entities in creation order
    pub fn panels(&self) -> &[PanelRecord] {
        &self.panels
    }

    /// Panels parented to `root`
    pub fn children_of(&self, root: EntityId) -> impl Iterator<Item = &PanelRecord> {
        self.panels.iter().filter(move |p| p.parent == root)
    }

    /// Find a root by ID
    pub fn find_root(&self, id: EntityId) -> Option<&RootRecord> {
        self.roots.iter().find(|r| r.id == id)
    }

    /// Find a panel by ID
    pub fn find_panel(&self, id: EntityId) -> Option<&PanelRecord> {
        self.panels.iter().find(|p| p.id == id)
    }

    /// Scene-space center of a panel (root transform applied)
    pub fn world_position(&self, panel: &PanelRecord) -> Option<DVec3> {
        self.find_root(panel.parent)
            .map(|root| root.transform.matrix().transform_point3(panel.transform.position))
    }

    /// Drop every entity
    pub fn clear(&mut self) {
        self.roots.clear();
        self.panels.clear();
    }
}

impl SceneGraph for InMemoryScene {
    type Entity = EntityId;
    type Texture = String;
    type Error = SceneError;

    fn create_root_entity(&mut self, transform: &Transform) -> Result<EntityId, SceneError> {
        let id = self.allocate_id();
        self.roots.push(RootRecord {
            id,
            transform: *transform,
        });
        Ok(id)
    }

    fn create_panel_entity(
        &mut self,
        parent: EntityId,
        panel: &PanelSpec<'_, String>,
    ) -> Result<EntityId, SceneError> {
        if self.find_root(parent).is_none() {
            return Err(SceneError::UnknownParent(parent));
        }

        let id = self.allocate_id();
        let size = panel.transform.scale;
        self.panels.push(PanelRecord {
            id,
            parent,
            index: panel.index,
            // Scale is baked into the mesh and collider
            transform: Transform {
                scale: DVec3::ONE,
                ..panel.transform
            },
            uvs: panel.uvs,
            mesh: BoxMesh::panel(size, &panel.uvs),
            collider: Collider::Box { size },
            material: panel.material.clone(),
        });
        Ok(id)
    }
}
