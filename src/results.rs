//! Analysis results attached to a document after calculation
//!
//! Results are produced by the external analysis backend and are only read
//! here: reactions are drawn at supports and the results panel reports the
//! values of the selected entity.

use serde::{Deserialize, Serialize};

use crate::elements::Dof;
use crate::loads::LoadVector;

/// Displacements and rotations at a node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeDisplacement {
    #[serde(rename = "Dx")]
    pub dx: f64,
    #[serde(rename = "Dy")]
    pub dy: f64,
    #[serde(rename = "Dz")]
    pub dz: f64,
    #[serde(rename = "Rx")]
    pub rx: f64,
    #[serde(rename = "Ry")]
    pub ry: f64,
    #[serde(rename = "Rz")]
    pub rz: f64,
}

impl NodeDisplacement {
    /// Create from array [DX, DY, DZ, RX, RY, RZ]
    pub fn from_array(arr: [f64; 6]) -> Self {
        Self {
            dx: arr[0],
            dy: arr[1],
            dz: arr[2],
            rx: arr[3],
            ry: arr[4],
            rz: arr[5],
        }
    }

    pub fn get(&self, dof: Dof) -> f64 {
        match dof {
            Dof::Dx => self.dx,
            Dof::Dy => self.dy,
            Dof::Dz => self.dz,
            Dof::Rx => self.rx,
            Dof::Ry => self.ry,
            Dof::Rz => self.rz,
        }
    }

    /// Get translation magnitude
    pub fn translation_magnitude(&self) -> f64 {
        (self.dx.powi(2) + self.dy.powi(2) + self.dz.powi(2)).sqrt()
    }
}

/// Displacement row of a result set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplacementRow {
    pub node: String,
    #[serde(flatten)]
    pub values: NodeDisplacement,
}

/// Support reaction row of a result set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionRow {
    pub node: String,
    #[serde(flatten)]
    pub values: LoadVector,
}

/// End forces of a bar: `i` at the start node, `j` at the end node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtremeForcesRow {
    pub bar: String,
    #[serde(rename = "Fxi")]
    pub fxi: f64,
    #[serde(rename = "Fyi")]
    pub fyi: f64,
    #[serde(rename = "Fzi")]
    pub fzi: f64,
    #[serde(rename = "Mxi")]
    pub mxi: f64,
    #[serde(rename = "Myi")]
    pub myi: f64,
    #[serde(rename = "Mzi")]
    pub mzi: f64,
    #[serde(rename = "Fxj")]
    pub fxj: f64,
    #[serde(rename = "Fyj")]
    pub fyj: f64,
    #[serde(rename = "Fzj")]
    pub fzj: f64,
    #[serde(rename = "Mxj")]
    pub mxj: f64,
    #[serde(rename = "Myj")]
    pub myj: f64,
    #[serde(rename = "Mzj")]
    pub mzj: f64,
}

impl ExtremeForcesRow {
    /// Forces at the start node
    pub fn start(&self) -> LoadVector {
        LoadVector::new(self.fxi, self.fyi, self.fzi, self.mxi, self.myi, self.mzi)
    }

    /// Forces at the end node
    pub fn end(&self) -> LoadVector {
        LoadVector::new(self.fxj, self.fyj, self.fzj, self.mxj, self.myj, self.mzj)
    }
}

/// Results of one load case
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResultSet {
    pub load_case: String,
    #[serde(default)]
    pub displacements: Vec<DisplacementRow>,
    #[serde(default)]
    pub reactions: Vec<ReactionRow>,
    #[serde(default)]
    pub extreme_forces: Vec<ExtremeForcesRow>,
}

impl ResultSet {
    pub fn displacement(&self, node: &str) -> Option<&NodeDisplacement> {
        self.displacements
            .iter()
            .find(|r| r.node == node)
            .map(|r| &r.values)
    }

    pub fn reaction(&self, node: &str) -> Option<&LoadVector> {
        self.reactions
            .iter()
            .find(|r| r.node == node)
            .map(|r| &r.values)
    }

    pub fn extreme_forces(&self, bar: &str) -> Option<&ExtremeForcesRow> {
        self.extreme_forces.iter().find(|r| r.bar == bar)
    }
}
