//! Material properties

use serde::{Deserialize, Serialize};

/// Elastic constants of a material
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// Modulus of elasticity
    #[serde(rename = "E")]
    pub e: f64,
    /// Shear modulus
    #[serde(rename = "G")]
    pub g: f64,
    /// Poisson's ratio
    pub ni: f64,
    /// Density
    pub rho: f64,
}

/// Named material; carried through the document but not drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub properties: MaterialProperties,
}

impl Material {
    pub fn new(name: &str, properties: MaterialProperties) -> Self {
        Self {
            name: name.to_string(),
            properties,
        }
    }

    /// Isotropic material, `G = E / (2 (1 + ni))`
    pub fn isotropic(name: &str, e: f64, ni: f64, rho: f64) -> Self {
        Self::new(
            name,
            MaterialProperties {
                e,
                g: e / (2.0 * (1.0 + ni)),
                ni,
                rho,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_material_schema() {
        let m: Material = serde_json::from_str(
            r#"{"name":"steel","properties":{"E":200e9,"G":77e9,"ni":0.3,"rho":7850}}"#,
        )
        .unwrap();
        assert_relative_eq!(m.properties.e, 200e9);
        assert_relative_eq!(m.properties.ni, 0.3);

        let iso = Material::isotropic("steel", 200e9, 0.25, 7850.0);
        assert_relative_eq!(iso.properties.g, 80e9);
    }
}
