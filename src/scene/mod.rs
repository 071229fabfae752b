//! Scene assembly for curved screens
//!
//! Defines the scene-graph collaborator interface, the screen builder that
//! drives it, and an in-memory implementation for previews and tests.

pub mod builder;
pub mod graph;
pub mod memory;
pub mod mesh;

pub use builder::{build_screen, panel_spec, plan_panels, ScreenOptions};
pub use graph::{PanelMaterial, PanelSpec, SceneGraph, Transform};
pub use memory::{Collider, EntityId, InMemoryScene, PanelRecord, RootRecord, SceneError};
pub use mesh::{BoxMesh, PanelVertex};
