//! Arc placement of flat panels
//!
//! Panels sit at equal angular steps on a circle around the curve center, in the
//! horizontal plane. The hinge panel sits at angle 0; lower indices sweep towards
//! `+span/2`, higher indices towards `-span/2`.

use glam::{DQuat, DVec3};

use super::config::LayoutConfig;

/// Local axis the visible side of a panel faces (glam/wgpu forward)
pub const PANEL_FRONT_AXIS: DVec3 = DVec3::NEG_Z;

/// Arc lengths and angular step derived from a layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcMetrics {
    /// Arc length of the full span at the curve radius
    pub total_arc_length: f64,
    /// Arc length left for panels after removing the gaps
    pub effective_arc_length: f64,
    /// Arc length each panel step gets, gap excluded
    pub arc_length_per_panel: f64,
    /// Angle between neighbouring panel centers, in degrees
    pub angular_step_degrees: f64,
}

impl ArcMetrics {
    /// Derive the metrics for a layout
    ///
    /// Gaps shrink the panel share of each step but never the total span, so the
    /// angular step is always `span / (n - 1)`.
    pub fn from_config(config: &LayoutConfig) -> Self {
        let steps = config.gap_count().max(1) as f64;
        let total_arc_length = config.curve_radius * config.arc_span_degrees.to_radians();
        let effective_arc_length = total_arc_length - steps * config.screen_gap;
        Self {
            total_arc_length,
            effective_arc_length,
            arc_length_per_panel: effective_arc_length / steps,
            angular_step_degrees: config.arc_span_degrees / steps,
        }
    }
}

/// World placement of one panel, relative to the screen root
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentTransform {
    /// Panel index along the arc
    pub index: u32,
    /// Angle of the panel center around the curve center, in degrees
    pub angle_degrees: f64,
    /// Rotation around +Y, in degrees
    pub yaw_degrees: f64,
    /// Panel center
    pub position: DVec3,
    /// Yaw-only orientation
    pub rotation: DQuat,
}

impl SegmentTransform {
    /// Direction the visible side of the panel faces
    pub fn front_direction(&self) -> DVec3 {
        self.rotation * PANEL_FRONT_AXIS
    }
}

/// Compute the placement of panel `index`
///
/// # Panics
///
/// Panics if `index >= config.segment_count`. The config is expected to be
/// validated already.
pub fn compute_segment_transform(index: u32, config: &LayoutConfig) -> SegmentTransform {
    assert!(
        index < config.segment_count,
        "segment index {} out of range for {} segments",
        index,
        config.segment_count
    );

    let metrics = ArcMetrics::from_config(config);
    // Half-integer midpoint keeps the angles exactly antisymmetric
    let midpoint = config.gap_count() as f64 / 2.0;
    let angle_degrees = (midpoint - index as f64) * metrics.angular_step_degrees;
    let angle = angle_degrees.to_radians();

    let position = DVec3::new(
        config.curve_center.x + config.curve_radius * angle.cos(),
        config.base_height,
        config.curve_center.z + config.curve_radius * angle.sin(),
    );

    let yaw_degrees = config.reference_yaw_degrees - angle_degrees;
    let rotation = DQuat::from_rotation_y(yaw_degrees.to_radians());

    SegmentTransform {
        index,
        angle_degrees,
        yaw_degrees,
        position,
        rotation,
    }
}

/// Compute the placement of every panel, in index order
pub fn compute_all_transforms(config: &LayoutConfig) -> Vec<SegmentTransform> {
    (0..config.segment_count)
        .map(|i| compute_segment_transform(i, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn horizontal_distance(config: &LayoutConfig, t: &SegmentTransform) -> f64 {
        let dx = t.position.x - config.curve_center.x;
        let dz = t.position.z - config.curve_center.z;
        (dx * dx + dz * dz).sqrt()
    }

    #[test]
    fn test_metrics_without_gap() {
        let config = LayoutConfig::default();
        let metrics = ArcMetrics::from_config(&config);
        assert_relative_eq!(metrics.total_arc_length, 8.0 * std::f64::consts::PI);
        assert_eq!(metrics.effective_arc_length, metrics.total_arc_length);
        assert_relative_eq!(metrics.angular_step_degrees, 180.0 / 22.0);
    }

    #[test]
    fn test_gap_keeps_total_span() {
        let mut config = LayoutConfig::default();
        config.screen_gap = 0.05;
        let metrics = ArcMetrics::from_config(&config);

        assert_relative_eq!(
            metrics.effective_arc_length,
            metrics.total_arc_length - 22.0 * 0.05
        );
        let step_from_lengths =
            ((metrics.arc_length_per_panel + config.screen_gap) / config.curve_radius).to_degrees();
        assert_relative_eq!(step_from_lengths, metrics.angular_step_degrees, epsilon = 1e-9);

        let first = compute_segment_transform(0, &config);
        let last = compute_segment_transform(22, &config);
        assert_relative_eq!(first.angle_degrees - last.angle_degrees, 180.0, epsilon = 1e-9);
    }

    #[test]
    fn test_production_first_panel() {
        let config = LayoutConfig::default();
        let t = compute_segment_transform(0, &config);

        assert_relative_eq!(t.angle_degrees, 90.0, epsilon = 1e-12);
        let theta = t.angle_degrees.to_radians();
        assert_relative_eq!(t.position.x, 8.0 + 8.0 * theta.cos(), epsilon = 1e-12);
        assert_eq!(t.position.y, 6.8275);
        assert_relative_eq!(t.position.z, 8.0 + 8.0 * theta.sin(), epsilon = 1e-12);
        assert_relative_eq!(t.yaw_degrees, 180.0, epsilon = 1e-12);
    }

    #[test]
    fn test_hinge_at_apex() {
        let config = LayoutConfig::default();
        let hinge = compute_segment_transform(config.hinge_index(), &config);

        assert_eq!(hinge.angle_degrees, 0.0);
        assert_eq!(hinge.yaw_degrees, 270.0);
        assert_relative_eq!(hinge.position.x, 16.0);
        assert_relative_eq!(hinge.position.z, 8.0);
    }

    #[test]
    fn test_positions_on_circle() {
        for (count, radius, span) in [(2, 1.0, 90.0), (5, 3.5, 120.0), (23, 8.0, 180.0), (40, 12.0, 360.0)] {
            let mut config = LayoutConfig::new(count, radius);
            config.arc_span_degrees = span;
            config.curve_center = DVec3::new(-3.0, 1.0, 42.0);

            for t in compute_all_transforms(&config) {
                assert_relative_eq!(horizontal_distance(&config, &t), radius, max_relative = 1e-9);
                assert_eq!(t.position.y, config.base_height);
            }
        }
    }

    #[test]
    fn test_symmetry_around_hinge() {
        let config = LayoutConfig::default();
        let n = config.segment_count;
        for i in 0..config.hinge_index() {
            let left = compute_segment_transform(i, &config);
            let right = compute_segment_transform(n - 1 - i, &config);
            assert_eq!(left.angle_degrees, -right.angle_degrees);
            assert!(left.angle_degrees > 0.0);
            assert_relative_eq!(left.position.x, right.position.x, epsilon = 1e-12);
            assert_relative_eq!(
                left.position.z - config.curve_center.z,
                -(right.position.z - config.curve_center.z),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_even_count_has_no_apex_panel() {
        let config = LayoutConfig::new(4, 5.0);
        let angles: Vec<f64> = compute_all_transforms(&config)
            .iter()
            .map(|t| t.angle_degrees)
            .collect();
        assert_eq!(angles, vec![90.0, 30.0, -30.0, -90.0]);
    }

    #[test]
    fn test_angles_are_monotonic_and_evenly_spaced() {
        let config = LayoutConfig::default();
        let step = ArcMetrics::from_config(&config).angular_step_degrees;
        let transforms = compute_all_transforms(&config);
        for pair in transforms.windows(2) {
            assert_relative_eq!(pair[0].angle_degrees - pair[1].angle_degrees, step, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_front_faces_radially_outward() {
        let config = LayoutConfig::default();
        for t in compute_all_transforms(&config) {
            let radial = DVec3::new(
                t.position.x - config.curve_center.x,
                0.0,
                t.position.z - config.curve_center.z,
            )
            .normalize();
            let front = t.front_direction();
            assert_abs_diff_eq!(front.x, radial.x, epsilon = 1e-9);
            assert_abs_diff_eq!(front.y, 0.0, epsilon = 1e-9);
            assert_abs_diff_eq!(front.z, radial.z, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_idempotent() {
        let config = LayoutConfig::default();
        for i in 0..config.segment_count {
            let a = compute_segment_transform(i, &config);
            let b = compute_segment_transform(i, &config);
            assert_eq!(a.position.to_array().map(f64::to_bits), b.position.to_array().map(f64::to_bits));
            assert_eq!(a.rotation.to_array().map(f64::to_bits), b.rotation.to_array().map(f64::to_bits));
            assert_eq!(a.angle_degrees.to_bits(), b.angle_degrees.to_bits());
        }
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_index_panics() {
        let config = LayoutConfig::default();
        compute_segment_transform(23, &config);
    }
}
