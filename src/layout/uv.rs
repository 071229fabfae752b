//! UV slice mapping
//!
//! The shared video texture is cut into `n - 1` equal vertical strips, one per
//! panel. The hinge panel is left out of the partition and panels after it shift
//! one slot left, so the strips tile [0, 1] without a gap.

use serde::{Deserialize, Serialize};

use super::config::HingePolicy;

/// Faces of a box mesh, in the order the host renderer expects UVs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BoxFace {
    Top,
    Bottom,
    Back,
    #[default]
    Front,
    Right,
    Left,
}

impl BoxFace {
    /// All faces in renderer order
    pub const ALL: [BoxFace; 6] = [
        BoxFace::Top,
        BoxFace::Bottom,
        BoxFace::Back,
        BoxFace::Front,
        BoxFace::Right,
        BoxFace::Left,
    ];

    /// Position of this face in renderer order
    pub fn index(self) -> usize {
        match self {
            BoxFace::Top => 0,
            BoxFace::Bottom => 1,
            BoxFace::Back => 2,
            BoxFace::Front => 3,
            BoxFace::Right => 4,
            BoxFace::Left => 5,
        }
    }

    /// Human-readable name, shown in the panel plan
    pub fn display_name(&self) -> &'static str {
        match self {
            BoxFace::Top => "Top",
            BoxFace::Bottom => "Bottom",
            BoxFace::Back => "Back",
            BoxFace::Front => "Front",
            BoxFace::Right => "Right",
            BoxFace::Left => "Left",
        }
    }
}

/// Texture sub-rectangle shown on a panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvRect {
    pub u_start: f64,
    pub u_end: f64,
    pub v_start: f64,
    pub v_end: f64,
}

impl UvRect {
    /// Zero-area rect, renders no texture detail
    pub const DEGENERATE: UvRect = UvRect {
        u_start: 0.0,
        u_end: 0.0,
        v_start: 0.0,
        v_end: 0.0,
    };

    /// Full-height strip between two u coordinates
    pub fn strip(u_start: f64, u_end: f64) -> Self {
        Self {
            u_start,
            u_end,
            v_start: 0.0,
            v_end: 1.0,
        }
    }

    pub fn width(&self) -> f64 {
        self.u_end - self.u_start
    }

    pub fn is_degenerate(&self) -> bool {
        *self == Self::DEGENERATE
    }

    /// Corners in front-face vertex order: (uEnd, vEnd), (uStart, vEnd), (uStart, vStart), (uEnd, vStart)
    ///
    /// Reordering these mirrors the video on screen.
    pub fn corners(&self) -> [[f64; 2]; 4] {
        [
            [self.u_end, self.v_end],
            [self.u_start, self.v_end],
            [self.u_start, self.v_start],
            [self.u_end, self.v_start],
        ]
    }
}

/// Texture slot a panel samples, or `None` for a hidden hinge
fn texture_slot(index: u32, segment_count: u32, policy: HingePolicy) -> Option<u32> {
    let hinge = segment_count / 2;
    if index < hinge {
        Some(index)
    } else if index > hinge {
        Some(index - 1)
    } else {
        match policy {
            // Clamped so a two-panel screen still samples inside the texture
            HingePolicy::Sliver => Some(index.min(segment_count - 2)),
            HingePolicy::Hidden => None,
        }
    }
}

/// UV strip for panel `index` with the default hinge policy
pub fn compute_uv_rect(index: u32, segment_count: u32) -> UvRect {
    compute_uv_rect_with_policy(index, segment_count, HingePolicy::default())
}

/// UV strip for panel `index`
///
/// # Panics
///
/// Panics if `segment_count < 2` or `index >= segment_count`.
pub fn compute_uv_rect_with_policy(index: u32, segment_count: u32, policy: HingePolicy) -> UvRect {
    assert!(
        segment_count >= 2,
        "a curved screen needs at least 2 segments, got {}",
        segment_count
    );
    assert!(
        index < segment_count,
        "segment index {} out of range for {} segments",
        index,
        segment_count
    );

    let slots = (segment_count - 1) as f64;
    match texture_slot(index, segment_count, policy) {
        Some(slot) => UvRect::strip(slot as f64 / slots, (slot + 1) as f64 / slots),
        None => UvRect::DEGENERATE,
    }
}

/// UVs for all six faces of a panel box (24 pairs)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxUvs {
    pairs: [[f32; 2]; 24],
}

impl BoxUvs {
    pub const PAIR_COUNT: usize = 24;

    /// Every face degenerate
    pub fn untextured() -> Self {
        Self {
            pairs: [[0.0; 2]; 24],
        }
    }

    /// UV pairs in renderer face order
    pub fn pairs(&self) -> &[[f32; 2]; 24] {
        &self.pairs
    }

    /// The four UV pairs of one face
    pub fn face(&self, face: BoxFace) -> &[[f32; 2]] {
        let start = face.index() * 4;
        &self.pairs[start..start + 4]
    }

    /// Flattened `u, v, u, v, ...` list as host box renderers take it
    pub fn to_flat(&self) -> Vec<f32> {
        self.pairs.iter().flatten().copied().collect()
    }
}

/// Expand a panel's UV strip to the full box, texturing only `face`
pub fn box_uvs(rect: &UvRect, face: BoxFace) -> BoxUvs {
    let mut uvs = BoxUvs::untextured();
    let start = face.index() * 4;
    for (slot, [u, v]) in uvs.pairs[start..start + 4].iter_mut().zip(rect.corners()) {
        *slot = [u as f32, v as f32];
    }
    uvs
}
