//! Bar element - a straight line element between two nodes

use serde::{Deserialize, Serialize};

use crate::math::Axis;

/// Which end of a bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarEnd {
    /// The `i` end, at the start node
    Start,
    /// The `j` end, at the end node
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleaseKind {
    Displacement,
    Rotation,
}

/// End release flag: freed degree of freedom at one end of a bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Release {
    Dxi,
    Dyi,
    Dzi,
    Rxi,
    Ryi,
    Rzi,
    Dxj,
    Dyj,
    Dzj,
    Rxj,
    Ryj,
    Rzj,
}

impl Release {
    pub const ALL: [Release; 12] = [
        Release::Dxi,
        Release::Dyi,
        Release::Dzi,
        Release::Rxi,
        Release::Ryi,
        Release::Rzi,
        Release::Dxj,
        Release::Dyj,
        Release::Dzj,
        Release::Rxj,
        Release::Ryj,
        Release::Rzj,
    ];

    pub fn end(self) -> BarEnd {
        match self {
            Release::Dxi | Release::Dyi | Release::Dzi | Release::Rxi | Release::Ryi | Release::Rzi => {
                BarEnd::Start
            }
            _ => BarEnd::End,
        }
    }

    pub fn kind(self) -> ReleaseKind {
        match self {
            Release::Dxi | Release::Dyi | Release::Dzi | Release::Dxj | Release::Dyj | Release::Dzj => {
                ReleaseKind::Displacement
            }
            _ => ReleaseKind::Rotation,
        }
    }

    /// Local bar axis the release acts along (or about)
    pub fn axis(self) -> Axis {
        match self {
            Release::Dxi | Release::Rxi | Release::Dxj | Release::Rxj => Axis::X,
            Release::Dyi | Release::Ryi | Release::Dyj | Release::Ryj => Axis::Y,
            Release::Dzi | Release::Rzi | Release::Dzj | Release::Rzj => Axis::Z,
        }
    }
}

/// A bar of the structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Unique name within the structure
    pub name: String,
    /// Name of the start (i) node
    pub start_node: String,
    /// Name of the end (j) node
    pub end_node: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub material: String,
    /// Section rotation about the bar axis, in degrees
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub releases: Vec<Release>,
}

impl Bar {
    /// Create a new bar between two nodes
    pub fn new(name: &str, start_node: &str, end_node: &str) -> Self {
        Self {
            name: name.to_string(),
            start_node: start_node.to_string(),
            end_node: end_node.to_string(),
            section: String::new(),
            material: String::new(),
            rotation: 0.0,
            releases: Vec::new(),
        }
    }

    pub fn with_section(mut self, section: &str, material: &str) -> Self {
        self.section = section.to_string();
        self.material = material.to_string();
        self
    }

    /// Set the section rotation, in degrees
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_releases(mut self, releases: &[Release]) -> Self {
        self.releases = releases.to_vec();
        self
    }

    /// Section rotation in radians
    pub fn twist(&self) -> f64 {
        self.rotation.to_radians()
    }

    pub fn releases_at(&self, end: BarEnd) -> impl Iterator<Item = Release> + '_ {
        self.releases.iter().copied().filter(move |r| r.end() == end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_release_classification() {
        assert_eq!(Release::Ryj.end(), BarEnd::End);
        assert_eq!(Release::Ryj.kind(), ReleaseKind::Rotation);
        assert_eq!(Release::Ryj.axis(), Axis::Y);
        assert_eq!(Release::Dzi.end(), BarEnd::Start);
        assert_eq!(Release::Dzi.kind(), ReleaseKind::Displacement);

        let starts = Release::ALL.iter().filter(|r| r.end() == BarEnd::Start).count();
        assert_eq!(starts, 6);
    }

    #[test]
    fn test_bar_schema() {
        let bar: Bar = serde_json::from_str(
            r#"{"name":"B1","start_node":"1","end_node":"2","section":"S","material":"M",
                "rotation":90,"releases":["Rzi","Dxj"]}"#,
        )
        .unwrap();
        assert_relative_eq!(bar.twist(), std::f64::consts::FRAC_PI_2);
        assert_eq!(bar.releases_at(BarEnd::End).collect::<Vec<_>>(), vec![Release::Dxj]);
    }
}
