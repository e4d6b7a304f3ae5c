//! Node element - a named point in 3D space

use serde::{Deserialize, Serialize};

use crate::math::Vec3;

/// Joint type tag carried by the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NodeType {
    #[default]
    Fixed,
    Hinged,
    #[serde(rename = "spring")]
    Spring,
    #[serde(rename = "blend")]
    Blend,
}

/// A node of the structure (Z-up, right-handed coordinates)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique name within the structure
    pub name: String,
    /// Global coordinates `[x, y, z]`
    pub position: [f64; 3],
    #[serde(rename = "type", default)]
    pub node_type: NodeType,
}

impl Node {
    /// Create a new node at the given coordinates
    pub fn new(name: &str, x: f64, y: f64, z: f64) -> Self {
        Self {
            name: name.to_string(),
            position: [x, y, z],
            node_type: NodeType::default(),
        }
    }

    pub fn coords(&self) -> Vec3 {
        Vec3::from(self.position)
    }

    /// Calculate distance to another node
    pub fn distance_to(&self, other: &Node) -> f64 {
        (other.coords() - self.coords()).norm()
    }
}
