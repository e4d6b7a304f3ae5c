//! Rendering configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ViewResult;
use crate::view::ViewFlags;

/// Sizes, thresholds and visibility used when building a scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Height of the tallest arrow of a distributed-load diagram
    pub load_size: f64,
    /// Node point size
    pub node_size: f64,
    /// Font size of node and bar labels
    pub label_size: f64,
    /// Scale of the bar local-axes triad
    pub local_axes_scale: f64,
    /// Distance of release glyphs from the bar ends
    pub release_radius: f64,
    /// Load case read by the results panel and reactions
    pub results_load_case: String,
    /// Draw support reactions when results are attached
    pub show_reactions: bool,
    /// Pick distance for polylines
    pub line_threshold: f64,
    /// Pick distance for points
    pub points_threshold: f64,
    /// Pick distance for solid meshes
    pub mesh_threshold: f64,
    pub flags: ViewFlags,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            load_size: 1.0,
            node_size: 0.1,
            label_size: 0.1,
            local_axes_scale: 0.25,
            release_radius: 0.1,
            results_load_case: "L1".to_string(),
            show_reactions: true,
            line_threshold: 0.1,
            points_threshold: 0.1,
            mesh_threshold: 0.0,
            flags: ViewFlags::default(),
        }
    }
}

impl ViewConfig {
    /// Load from a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> ViewResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn with_flags(mut self, flags: ViewFlags) -> Self {
        self.flags = flags;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_partial_config() {
        let config: ViewConfig =
            serde_json::from_str(r#"{"load_size":2.0,"flags":{"supports":false}}"#).unwrap();
        assert_relative_eq!(config.load_size, 2.0);
        assert_relative_eq!(config.node_size, 0.1);
        assert_eq!(config.results_load_case, "L1");
        assert!(!config.flags.supports);
        assert!(config.flags.bars);
    }

    #[test]
    fn test_with_flags() {
        let config = ViewConfig::default().with_flags(ViewFlags::none());
        assert!(!config.flags.nodes);
        assert!(!config.flags.bars);
    }

    #[test]
    fn test_from_missing_file() {
        assert!(ViewConfig::from_json_file("/nonexistent/structview.json").is_err());
    }
}
