//! Cross-section properties

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Inertias {
    #[serde(rename = "Ix")]
    pub ix: f64,
    #[serde(rename = "Iy")]
    pub iy: f64,
    #[serde(rename = "Iz")]
    pub iz: f64,
}

/// Named cross section; carried through the document but not drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub area: f64,
    pub inertias: Inertias,
}

impl Section {
    pub fn new(name: &str, area: f64, inertias: Inertias) -> Self {
        Self {
            name: name.to_string(),
            area,
            inertias,
        }
    }

    /// Solid rectangle `b x h`
    pub fn rectangular(name: &str, b: f64, h: f64) -> Self {
        let iy = b * h.powi(3) / 12.0;
        let iz = h * b.powi(3) / 12.0;
        // Saint-Venant approximation for the torsion constant
        let (long, short) = if b > h { (b, h) } else { (h, b) };
        let ix = long * short.powi(3) * (1.0 / 3.0 - 0.21 * short / long * (1.0 - short.powi(4) / (12.0 * long.powi(4))));
        Self::new(name, b * h, Inertias { ix, iy, iz })
    }
}
