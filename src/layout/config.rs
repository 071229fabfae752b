//! Layout configuration for a curved screen
//!
//! A `LayoutConfig` fully describes the arc a screen is laid out on: how many
//! panels, how far they sit from the curve center, and how big each panel is.
//! It is supplied once per screen and never mutated afterwards.

use glam::DVec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::uv::BoxFace;

/// Treatment of the hinge (apex) panel in the texture partition
///
/// The hinge panel is excluded from the UV partition so the remaining panels
/// share the texture without a gap. What the hinge itself shows is a choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HingePolicy {
    /// Show the slice its unshifted index would get (duplicates the next panel's slice)
    #[default]
    Sliver,
    /// Degenerate UVs, the hinge shows no texture detail
    Hidden,
}

impl HingePolicy {
    /// Human-readable name, shown in the panel plan
    pub fn display_name(&self) -> &'static str {
        match self {
            HingePolicy::Sliver => "Sliver (duplicate neighbour slice)",
            HingePolicy::Hidden => "Hidden (no texture)",
        }
    }
}

/// Invalid layout configuration
///
/// Raised before any entity is created, so a failed build leaves no partial screen.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("segment count must be at least 2, got {0}")]
    TooFewSegments(u32),
    #[error("curve radius must be positive, got {0}")]
    NonPositiveRadius(f64),
    #[error("arc span must be in (0, 360] degrees, got {0}")]
    InvalidArcSpan(f64),
    #[error("screen gap must not be negative, got {0}")]
    NegativeGap(f64),
    #[error("screen gaps ({gaps_total}) consume the whole arc length ({arc_length})")]
    GapExceedsArc { gaps_total: f64, arc_length: f64 },
    #[error("panel {dimension} must be positive, got {value}")]
    NonPositivePanelSize { dimension: &'static str, value: f64 },
    #[error("{field} is not a finite number")]
    NonFinite { field: &'static str },
}

/// Geometry of a curved screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "CurvedScreenLayout")]
pub struct LayoutConfig {
    /// Number of flat panels, hinge included (>= 2)
    #[serde(rename = "segmentCount", default = "default_segment_count")]
    pub segment_count: u32,

    /// Distance from the curve center to each panel center
    #[serde(rename = "curveRadius", default = "default_curve_radius")]
    pub curve_radius: f64,

    /// Total angular extent covered by the panel centers, in degrees
    #[serde(rename = "arcSpanDegrees", default = "default_arc_span_degrees")]
    pub arc_span_degrees: f64,

    /// Panel width in world units
    #[serde(rename = "panelWidth", default = "default_panel_width")]
    pub panel_width: f64,

    /// Panel height in world units
    #[serde(rename = "panelHeight", default = "default_panel_height")]
    pub panel_height: f64,

    /// Panel depth in world units (0 = flat box)
    #[serde(rename = "panelDepth", default)]
    pub panel_depth: f64,

    /// Height of every panel center above the root origin
    #[serde(rename = "baseHeight", default = "default_base_height")]
    pub base_height: f64,

    /// Center of the circle the panels sit on (only x and z are used for placement)
    #[serde(rename = "curveCenter", with = "point3_xml", default = "default_curve_center")]
    pub curve_center: DVec3,

    /// Arc length left empty between neighbouring panels
    #[serde(rename = "screenGap", default)]
    pub screen_gap: f64,

    /// Yaw of a panel at angle 0, in degrees (engine forward-axis convention)
    #[serde(rename = "referenceYaw", default = "default_reference_yaw")]
    pub reference_yaw_degrees: f64,

    /// What the hinge panel shows
    #[serde(rename = "hingePolicy", default)]
    pub hinge_policy: HingePolicy,

    /// Box face that carries the video slice
    #[serde(rename = "texturedFace", default)]
    pub textured_face: BoxFace,
}

fn default_segment_count() -> u32 {
    23
}
fn default_curve_radius() -> f64 {
    8.0
}
fn default_arc_span_degrees() -> f64 {
    180.0
}
fn default_panel_width() -> f64 {
    1.145
}
fn default_panel_height() -> f64 {
    13.5
}
fn default_base_height() -> f64 {
    6.8275
}
fn default_curve_center() -> DVec3 {
    DVec3::new(8.0, default_base_height(), 8.0)
}
fn default_reference_yaw() -> f64 {
    270.0
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            segment_count: default_segment_count(),
            curve_radius: default_curve_radius(),
            arc_span_degrees: default_arc_span_degrees(),
            panel_width: default_panel_width(),
            panel_height: default_panel_height(),
            panel_depth: 0.0,
            base_height: default_base_height(),
            curve_center: default_curve_center(),
            screen_gap: 0.0,
            reference_yaw_degrees: default_reference_yaw(),
            hinge_policy: HingePolicy::default(),
            textured_face: BoxFace::default(),
        }
    }
}

impl LayoutConfig {
    /// Create a layout with the given panel count and radius, other values default
    pub fn new(segment_count: u32, curve_radius: f64) -> Self {
        Self {
            segment_count,
            curve_radius,
            ..Default::default()
        }
    }

    /// Check every invariant the layout math relies on
    pub fn validate(&self) -> Result<(), LayoutError> {
        let finite = [
            ("curveRadius", self.curve_radius),
            ("arcSpanDegrees", self.arc_span_degrees),
            ("panelWidth", self.panel_width),
            ("panelHeight", self.panel_height),
            ("panelDepth", self.panel_depth),
            ("baseHeight", self.base_height),
            ("curveCenter.x", self.curve_center.x),
            ("curveCenter.y", self.curve_center.y),
            ("curveCenter.z", self.curve_center.z),
            ("screenGap", self.screen_gap),
            ("referenceYaw", self.reference_yaw_degrees),
        ];
        if let Some(&(field, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(LayoutError::NonFinite { field });
        }

        if self.segment_count < 2 {
            return Err(LayoutError::TooFewSegments(self.segment_count));
        }
        if self.curve_radius <= 0.0 {
            return Err(LayoutError::NonPositiveRadius(self.curve_radius));
        }
        if self.arc_span_degrees <= 0.0 || self.arc_span_degrees > 360.0 {
            return Err(LayoutError::InvalidArcSpan(self.arc_span_degrees));
        }
        if self.panel_width <= 0.0 {
            return Err(LayoutError::NonPositivePanelSize {
                dimension: "width",
                value: self.panel_width,
            });
        }
        if self.panel_height <= 0.0 {
            return Err(LayoutError::NonPositivePanelSize {
                dimension: "height",
                value: self.panel_height,
            });
        }
        if self.panel_depth < 0.0 {
            return Err(LayoutError::NonPositivePanelSize {
                dimension: "depth",
                value: self.panel_depth,
            });
        }
        if self.screen_gap < 0.0 {
            return Err(LayoutError::NegativeGap(self.screen_gap));
        }

        let arc_length = self.curve_radius * self.arc_span_degrees.to_radians();
        let gaps_total = self.gap_count() as f64 * self.screen_gap;
        if gaps_total >= arc_length {
            return Err(LayoutError::GapExceedsArc {
                gaps_total,
                arc_length,
            });
        }

        Ok(())
    }

    /// Index of the hinge panel (the apex for odd counts)
    pub fn hinge_index(&self) -> u32 {
        self.segment_count / 2
    }

    /// Number of angular steps between the first and last panel
    pub fn gap_count(&self) -> u32 {
        self.segment_count.saturating_sub(1)
    }

    /// Panel size as a scale vector (width, height, depth)
    pub fn panel_scale(&self) -> DVec3 {
        DVec3::new(self.panel_width, self.panel_height, self.panel_depth)
    }

    /// Chord length between two neighbouring panel centers
    ///
    /// A panel this wide closes the arc without overlaps or holes.
    pub fn chord_width(&self) -> f64 {
        let step = self.arc_span_degrees.to_radians() / self.gap_count().max(1) as f64;
        2.0 * self.curve_radius * (step / 2.0).sin() - self.screen_gap
    }

    /// Replace the panel width with the seamless chord width
    pub fn with_fitted_panel_width(mut self) -> Self {
        self.panel_width = self.chord_width();
        self
    }
}

/// XML representation of a 3D point as `<x/><y/><z/>` children
pub(crate) mod point3_xml {
    use glam::DVec3;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Point3 {
        x: f64,
        y: f64,
        z: f64,
    }

    pub fn serialize<S: Serializer>(v: &DVec3, s: S) -> Result<S::Ok, S::Error> {
        Point3 {
            x: v.x,
            y: v.y,
            z: v.z,
        }
        .serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DVec3, D::Error> {
        let Point3 { x, y, z } = Point3::deserialize(d)?;
        Ok(DVec3::new(x, y, z))
    }
}
