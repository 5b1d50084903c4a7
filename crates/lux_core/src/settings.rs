//! Render configuration supplied by the scene-description layer.

use serde::{Deserialize, Serialize};

/// How a BVH node orders its triangles before the midpoint split.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitPolicy {
    /// Sort by the first vertex's X coordinate regardless of the mesh's
    /// actual extent. A deliberately simple, non-adaptive heuristic kept
    /// as the default because changing it can shift renders at their
    /// margins, not just their speed.
    #[default]
    FirstVertexX,
    /// Sort by triangle centroid along the longest axis of the centroid
    /// bounds. Produces tighter, better balanced trees.
    LongestAxis,
}

/// Render configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Anti-aliasing grid multiplier; each pixel gets `aa_multiplier^2`
    /// sub-pixel samples on a uniform grid (>= 1)
    pub aa_multiplier: u32,
    /// Depth-of-field grid multiplier; each sub-pixel gets
    /// `dof_samples^2` aperture samples when the camera aperture is
    /// open (>= 1)
    pub dof_samples: u32,
    /// Maximum shading recursion depth
    pub max_depth: u32,
    /// Horizontal field of view in degrees (> 0)
    pub hfov_degrees: f32,
    /// BVH split policy for mesh entities
    pub split_policy: SplitPolicy,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            aa_multiplier: 1,
            dof_samples: 2,
            max_depth: 8,
            hfov_degrees: 60.0,
            split_policy: SplitPolicy::default(),
        }
    }
}
