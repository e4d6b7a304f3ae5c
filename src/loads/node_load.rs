//! Node loads - forces and moments applied directly to nodes

use serde::{Deserialize, Serialize};

use super::LoadVector;

/// A load applied directly to a node, in global axes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodalLoad {
    pub name: String,
    /// Loaded node name
    pub node: String,
    pub loads: LoadVector,
}

impl NodalLoad {
    pub fn new(name: &str, node: &str, loads: LoadVector) -> Self {
        Self {
            name: name.to_string(),
            node: node.to_string(),
            loads,
        }
    }

    /// Force-only node load
    pub fn force(name: &str, node: &str, fx: f64, fy: f64, fz: f64) -> Self {
        Self::new(name, node, LoadVector::new(fx, fy, fz, 0.0, 0.0, 0.0))
    }

    /// Moment-only node load
    pub fn moment(name: &str, node: &str, mx: f64, my: f64, mz: f64) -> Self {
        Self::new(name, node, LoadVector::new(0.0, 0.0, 0.0, mx, my, mz))
    }
}
