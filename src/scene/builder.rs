//! Curved screen assembly
//!
//! Ties the layout math to a [`SceneGraph`]: one root entity, then one panel
//! entity per segment parented to it.

use tracing::{debug, info};

use super::graph::{PanelMaterial, PanelSpec, SceneGraph, Transform};
use crate::layout::{
    box_uvs, compute_segment_transform, compute_uv_rect_with_policy, LayoutConfig, LayoutError,
};

/// Everything a driver supplies to build a screen
#[derive(Debug, Clone)]
pub struct ScreenOptions<T> {
    /// Root transform in the scene
    pub transform: Transform,
    /// Shared video texture
    pub texture: T,
    /// Arc geometry
    pub layout: LayoutConfig,
}

impl<T> ScreenOptions<T> {
    /// Default production layout at the scene origin
    pub fn new(texture: T) -> Self {
        Self {
            transform: Transform::IDENTITY,
            texture,
            layout: LayoutConfig::default(),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }
}

/// Spec for panel `index` of a validated layout
pub fn panel_spec<'a, T>(
    index: u32,
    layout: &LayoutConfig,
    material: &'a PanelMaterial<T>,
) -> PanelSpec<'a, T> {
    let segment = compute_segment_transform(index, layout);
    let rect = compute_uv_rect_with_policy(index, layout.segment_count, layout.hinge_policy);

    PanelSpec {
        index,
        transform: Transform::new(segment.position, segment.rotation, layout.panel_scale()),
        uvs: box_uvs(&rect, layout.textured_face),
        material,
    }
}

/// Validate `layout` and produce the spec of every panel, in index order
pub fn plan_panels<'a, T>(
    layout: &LayoutConfig,
    material: &'a PanelMaterial<T>,
) -> Result<Vec<PanelSpec<'a, T>>, LayoutError> {
    layout.validate()?;
    Ok((0..layout.segment_count)
        .map(|index| panel_spec(index, layout, material))
        .collect())
}

/// Build a curved screen into `scene` and return its root entity
///
/// The layout is validated before anything is created, so an invalid layout
/// leaves the scene untouched. Scene errors are returned as-is.
pub fn build_screen<S: SceneGraph>(
    options: &ScreenOptions<S::Texture>,
    scene: &mut S,
) -> Result<S::Entity, S::Error> {
    let material = PanelMaterial::video(options.texture.clone());
    let panels = plan_panels(&options.layout, &material)?;

    let root = scene.create_root_entity(&options.transform)?;
    for panel in &panels {
        debug!(
            index = panel.index,
            x = panel.transform.position.x,
            z = panel.transform.position.z,
            "Creating screen panel"
        );
        scene.create_panel_entity(root, panel)?;
    }

    info!(
        panels = panels.len(),
        radius = options.layout.curve_radius,
        span = options.layout.arc_span_degrees,
        "Curved screen built"
    );
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{BoxFace, HingePolicy};
    use crate::scene::memory::{Collider, InMemoryScene, SceneError};
    use approx::assert_relative_eq;
    use glam::{DQuat, DVec3};

    /// Scene that fails after a fixed number of panels
    struct FailingScene {
        remaining: usize,
        created: usize,
    }

    #[derive(Debug, PartialEq)]
    enum FailingError {
        Layout(LayoutError),
        Full,
    }

    impl From<LayoutError> for FailingError {
        fn from(e: LayoutError) -> Self {
            FailingError::Layout(e)
        }
    }

    impl SceneGraph for FailingScene {
        type Entity = usize;
        type Texture = ();
        type Error = FailingError;

        fn create_root_entity(&mut self, _transform: &Transform) -> Result<usize, FailingError> {
            self.created += 1;
            Ok(0)
        }

        fn create_panel_entity(
            &mut self,
            _parent: usize,
            _panel: &PanelSpec<'_, ()>,
        ) -> Result<usize, FailingError> {
            if self.remaining == 0 {
                return Err(FailingError::Full);
            }
            self.remaining -= 1;
            self.created += 1;
            Ok(self.created)
        }
    }

    #[test]
    fn test_build_production_screen() {
        let mut scene = InMemoryScene::new();
        let options = ScreenOptions::new("video.mp4".to_string());
        let root = build_screen(&options, &mut scene).unwrap();

        assert_eq!(scene.roots().len(), 1);
        assert_eq!(scene.panels().len(), 23);
        assert!(scene.panels().iter().all(|p| p.parent == root));
        assert!(scene.panels().iter().all(|p| p.material.texture == "video.mp4"));

        let first = &scene.panels()[0];
        assert_eq!(first.index, 0);
        assert_eq!(
            first.collider,
            Collider::Box {
                size: DVec3::new(1.145, 13.5, 0.0)
            }
        );
        assert_relative_eq!(first.transform.position.z, 16.0, epsilon = 1e-12);
        let front = first.uvs.face(BoxFace::Front);
        assert_eq!(front[1], [0.0, 1.0]);
        assert_eq!(front[0], [(1.0f64 / 22.0) as f32, 1.0]);
    }

    #[test]
    fn test_root_transform_is_passed_through() {
        let transform = Transform::new(
            DVec3::new(10.0, 0.0, -4.0),
            DQuat::from_rotation_y(0.5),
            DVec3::splat(0.5),
        );
        let mut scene = InMemoryScene::new();
        let options = ScreenOptions::new("video".to_string()).with_transform(transform);
        build_screen(&options, &mut scene).unwrap();
        assert_eq!(scene.roots()[0].transform, transform);
    }

    #[test]
    fn test_invalid_layout_creates_nothing() {
        let mut scene = InMemoryScene::new();
        let options = ScreenOptions::new("video".to_string()).with_layout(LayoutConfig::new(1, 8.0));

        let err = build_screen(&options, &mut scene).unwrap_err();
        assert!(matches!(err, SceneError::Layout(LayoutError::TooFewSegments(1))));
        assert!(scene.roots().is_empty());
        assert!(scene.panels().is_empty());
    }

    #[test]
    fn test_scene_error_propagates_unchanged() {
        let mut scene = FailingScene {
            remaining: 5,
            created: 0,
        };
        let options = ScreenOptions::new(());
        assert_eq!(build_screen(&options, &mut scene), Err(FailingError::Full));
        // Root plus the five panels that fit
        assert_eq!(scene.created, 6);
    }

    #[test]
    fn test_panel_scale_is_box_size() {
        let layout = LayoutConfig::default();
        let material = PanelMaterial::video(());
        let panels = plan_panels(&layout, &material).unwrap();
        assert_eq!(panels.len(), 23);
        assert!(panels
            .iter()
            .all(|p| p.transform.scale == DVec3::new(1.145, 13.5, 0.0)));
    }

    #[test]
    fn test_hidden_hinge_panel() {
        let mut layout = LayoutConfig::default();
        layout.hinge_policy = HingePolicy::Hidden;
        let material = PanelMaterial::video(());
        let panels = plan_panels(&layout, &material).unwrap();

        let hinge = &panels[layout.hinge_index() as usize];
        assert!(hinge.uvs.pairs().iter().all(|p| *p == [0.0, 0.0]));
        assert!(panels
            .iter()
            .filter(|p| p.index != layout.hinge_index())
            .all(|p| p.uvs.face(BoxFace::Front)[0][0] > 0.0));
    }

    #[test]
    fn test_textured_face_follows_layout() {
        let mut layout = LayoutConfig::default();
        layout.textured_face = BoxFace::Right;
        let material = PanelMaterial::video(());
        let spec = panel_spec(0, &layout, &material);
        assert_eq!(spec.uvs.face(BoxFace::Right)[0], [(1.0f64 / 22.0) as f32, 1.0]);
        assert!(spec.uvs.face(BoxFace::Front).iter().all(|p| *p == [0.0, 0.0]));
    }
}
