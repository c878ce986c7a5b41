use serde::{Deserialize, Serialize};

/// Discretized stem profile of a single tree.
///
/// Three parallel columns with one entry per height increment, from just
/// above the stump to the tree top. Heights are strictly increasing;
/// diameters follow the fitted taper curve (decreasing for a well-formed
/// stem); cumulative volumes are measured from the stump upward.
///
/// Built once per tree by [`crate::taper::build_stem_profile`] and read-only
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StemProfile {
    /// Diameter at each increment in mm
    pub diameters: Vec<f64>,
    /// Height of each increment in m
    pub heights: Vec<f64>,
    /// Cumulative volume from the stump to each increment in m³
    pub cum_volumes: Vec<f64>,
}

impl StemProfile {
    /// Number of profile points.
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    /// True if the profile has no points.
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Total stem volume from stump to top, in m³.
    pub fn total_volume(&self) -> f64 {
        self.cum_volumes.last().copied().unwrap_or(0.0)
    }
}
