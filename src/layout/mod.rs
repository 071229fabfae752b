//! Curved panel layout
//!
//! Pure geometry for a curved video wall:
//! - Arc placement (position and yaw of each flat panel)
//! - UV slice mapping (which strip of the shared texture each panel shows)
//!
//! Nothing here touches a scene; see `scene` for entity creation.

pub mod arc;
pub mod config;
pub mod uv;

pub use arc::{compute_all_transforms, compute_segment_transform, ArcMetrics, SegmentTransform, PANEL_FRONT_AXIS};
pub use config::{HingePolicy, LayoutConfig, LayoutError};
pub use uv::{box_uvs, compute_uv_rect, compute_uv_rect_with_policy, BoxFace, BoxUvs, UvRect};
