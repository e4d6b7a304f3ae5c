//! Support conditions

use serde::{Deserialize, Serialize};

use crate::math::Axis;

/// Nodal degree of freedom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dof {
    Dx,
    Dy,
    Dz,
    Rx,
    Ry,
    Rz,
}

impl Dof {
    pub const ALL: [Dof; 6] = [Dof::Dx, Dof::Dy, Dof::Dz, Dof::Rx, Dof::Ry, Dof::Rz];

    pub fn axis(self) -> Axis {
        match self {
            Dof::Dx | Dof::Rx => Axis::X,
            Dof::Dy | Dof::Ry => Axis::Y,
            Dof::Dz | Dof::Rz => Axis::Z,
        }
    }

    pub fn is_rotation(self) -> bool {
        matches!(self, Dof::Rx | Dof::Ry | Dof::Rz)
    }

    pub fn label(self) -> &'static str {
        match self {
            Dof::Dx => "Dx",
            Dof::Dy => "Dy",
            Dof::Dz => "Dz",
            Dof::Rx => "Rx",
            Dof::Ry => "Ry",
            Dof::Rz => "Rz",
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawDof {
    Flag(bool),
    Stiffness(f64),
}

/// Restraint of one degree of freedom: `false`, `true` or a spring stiffness
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RawDof", into = "RawDof")]
pub enum SupportDof {
    #[default]
    Free,
    Fixed,
    Spring(f64),
}

impl From<RawDof> for SupportDof {
    fn from(raw: RawDof) -> Self {
        match raw {
            RawDof::Flag(true) => SupportDof::Fixed,
            RawDof::Flag(false) => SupportDof::Free,
            RawDof::Stiffness(k) => SupportDof::Spring(k),
        }
    }
}

impl From<SupportDof> for RawDof {
    fn from(dof: SupportDof) -> Self {
        match dof {
            SupportDof::Free => RawDof::Flag(false),
            SupportDof::Fixed => RawDof::Flag(true),
            SupportDof::Spring(k) => RawDof::Stiffness(k),
        }
    }
}

impl SupportDof {
    pub fn is_free(self) -> bool {
        self == SupportDof::Free
    }

    pub fn is_fixed(self) -> bool {
        self == SupportDof::Fixed
    }

    pub fn stiffness(self) -> Option<f64> {
        match self {
            SupportDof::Spring(k) => Some(k),
            _ => None,
        }
    }
}

/// Restraints of the six nodal degrees of freedom
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SupportDofs {
    #[serde(rename = "Dx", default)]
    pub dx: SupportDof,
    #[serde(rename = "Dy", default)]
    pub dy: SupportDof,
    #[serde(rename = "Dz", default)]
    pub dz: SupportDof,
    #[serde(rename = "Rx", default)]
    pub rx: SupportDof,
    #[serde(rename = "Ry", default)]
    pub ry: SupportDof,
    #[serde(rename = "Rz", default)]
    pub rz: SupportDof,
}

impl SupportDofs {
    pub fn get(&self, dof: Dof) -> SupportDof {
        match dof {
            Dof::Dx => self.dx,
            Dof::Dy => self.dy,
            Dof::Dz => self.dz,
            Dof::Rx => self.rx,
            Dof::Ry => self.ry,
            Dof::Rz => self.rz,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dof, SupportDof)> + '_ {
        Dof::ALL.into_iter().map(move |d| (d, self.get(d)))
    }
}

/// Support conditions at a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Support {
    /// Supported node name
    pub node: String,
    pub supports: SupportDofs,
}

impl Support {
    /// Support with no restraints
    pub fn new(node: &str) -> Self {
        Self {
            node: node.to_string(),
            supports: SupportDofs::default(),
        }
    }

    /// All six DOFs restrained
    pub fn fixed(node: &str) -> Self {
        Self::new(node).with_all(SupportDof::Fixed)
    }

    /// Translations restrained, rotations free
    pub fn pinned(node: &str) -> Self {
        Self::new(node)
            .with(Dof::Dx, SupportDof::Fixed)
            .with(Dof::Dy, SupportDof::Fixed)
            .with(Dof::Dz, SupportDof::Fixed)
    }

    pub fn with(mut self, dof: Dof, value: SupportDof) -> Self {
        let slot = match dof {
            Dof::Dx => &mut self.supports.dx,
            Dof::Dy => &mut self.supports.dy,
            Dof::Dz => &mut self.supports.dz,
            Dof::Rx => &mut self.supports.rx,
            Dof::Ry => &mut self.supports.ry,
            Dof::Rz => &mut self.supports.rz,
        };
        *slot = value;
        self
    }

    fn with_all(self, value: SupportDof) -> Self {
        Dof::ALL.into_iter().fold(self, |s, d| s.with(d, value))
    }

    /// No DOF free and none elastic
    pub fn is_fully_fixed(&self) -> bool {
        self.supports.iter().all(|(_, v)| v.is_fixed())
    }

    /// All three translations rigidly restrained
    pub fn has_all_displacements_fixed(&self) -> bool {
        [Dof::Dx, Dof::Dy, Dof::Dz]
            .into_iter()
            .all(|d| self.supports.get(d).is_fixed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dof_deserializes_bool_or_number() {
        let s: Support = serde_json::from_str(
            r#"{"node":"1","supports":{"Dx":true,"Dy":false,"Dz":1500,"Rx":false,"Ry":true,"Rz":2.5}}"#,
        )
        .unwrap();
        assert_eq!(s.supports.dx, SupportDof::Fixed);
        assert_eq!(s.supports.dy, SupportDof::Free);
        assert_eq!(s.supports.dz, SupportDof::Spring(1500.0));
        assert_eq!(s.supports.rz.stiffness(), Some(2.5));

        let back = serde_json::to_value(&s).unwrap();
        assert_eq!(back["supports"]["Dx"], serde_json::json!(true));
        assert_eq!(back["supports"]["Dz"], serde_json::json!(1500.0));
    }

    #[test]
    fn test_support_classification() {
        assert!(Support::fixed("1").is_fully_fixed());
        assert!(!Support::pinned("1").is_fully_fixed());
        assert!(Support::pinned("1").has_all_displacements_fixed());

        let spring = Support::fixed("1").with(Dof::Rz, SupportDof::Spring(10.0));
        assert!(!spring.is_fully_fixed());
    }
}
