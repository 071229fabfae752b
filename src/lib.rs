//! Curved Screen Library
//!
//! Builds a curved video wall out of flat box panels laid along a circular arc,
//! each textured with its own vertical strip of one shared video texture.
//! Entity creation is delegated to a host scene graph through [`scene::SceneGraph`].

pub mod layout;
pub mod scene;
pub mod settings;
pub mod telemetry;

pub use layout::{
    box_uvs, compute_all_transforms, compute_segment_transform, compute_uv_rect,
    compute_uv_rect_with_policy, ArcMetrics, BoxFace, BoxUvs, HingePolicy, LayoutConfig,
    LayoutError, SegmentTransform, UvRect,
};
pub use scene::{
    build_screen, plan_panels, InMemoryScene, PanelMaterial, PanelSpec, SceneGraph,
    ScreenOptions, Transform,
};
pub use settings::{ScreenSettings, SettingsError};
