//! Load data: nodal loads, bar point loads and bar distributed loads

mod distributed;
mod node_load;
mod point_load;

use serde::{Deserialize, Serialize};

use crate::error::{ViewError, ViewResult};
use crate::math::Axis;

pub use distributed::BarDistributedLoad;
pub use node_load::NodalLoad;
pub use point_load::BarPointLoad;

/// Force or moment component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForceComponent {
    Fx,
    Fy,
    Fz,
    Mx,
    My,
    Mz,
}

impl ForceComponent {
    pub const ALL: [ForceComponent; 6] = [
        ForceComponent::Fx,
        ForceComponent::Fy,
        ForceComponent::Fz,
        ForceComponent::Mx,
        ForceComponent::My,
        ForceComponent::Mz,
    ];

    pub fn axis(self) -> Axis {
        match self {
            ForceComponent::Fx | ForceComponent::Mx => Axis::X,
            ForceComponent::Fy | ForceComponent::My => Axis::Y,
            ForceComponent::Fz | ForceComponent::Mz => Axis::Z,
        }
    }

    pub fn is_moment(self) -> bool {
        matches!(self, ForceComponent::Mx | ForceComponent::My | ForceComponent::Mz)
    }

    pub fn label(self) -> &'static str {
        match self {
            ForceComponent::Fx => "Fx",
            ForceComponent::Fy => "Fy",
            ForceComponent::Fz => "Fz",
            ForceComponent::Mx => "Mx",
            ForceComponent::My => "My",
            ForceComponent::Mz => "Mz",
        }
    }
}

/// Coordinate system a bar load is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadSystem {
    #[default]
    Local,
    Global,
}

/// One value per force/moment component
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Components<T> {
    #[serde(rename = "Fx")]
    pub fx: T,
    #[serde(rename = "Fy")]
    pub fy: T,
    #[serde(rename = "Fz")]
    pub fz: T,
    #[serde(rename = "Mx")]
    pub mx: T,
    #[serde(rename = "My")]
    pub my: T,
    #[serde(rename = "Mz")]
    pub mz: T,
}

impl<T: Copy> Components<T> {
    pub fn get(&self, component: ForceComponent) -> T {
        match component {
            ForceComponent::Fx => self.fx,
            ForceComponent::Fy => self.fy,
            ForceComponent::Fz => self.fz,
            ForceComponent::Mx => self.mx,
            ForceComponent::My => self.my,
            ForceComponent::Mz => self.mz,
        }
    }

    pub fn set(&mut self, component: ForceComponent, value: T) {
        let slot = match component {
            ForceComponent::Fx => &mut self.fx,
            ForceComponent::Fy => &mut self.fy,
            ForceComponent::Fz => &mut self.fz,
            ForceComponent::Mx => &mut self.mx,
            ForceComponent::My => &mut self.my,
            ForceComponent::Mz => &mut self.mz,
        };
        *slot = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (ForceComponent, T)> + '_ {
        ForceComponent::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

/// Six-component force/moment vector
pub type LoadVector = Components<f64>;

/// Start and end magnitudes per component
pub type LoadDiagramValues = Components<[f64; 2]>;

impl LoadVector {
    pub fn new(fx: f64, fy: f64, fz: f64, mx: f64, my: f64, mz: f64) -> Self {
        Self { fx, fy, fz, mx, my, mz }
    }

    pub fn is_zero(&self) -> bool {
        self.iter().all(|(_, v)| v == 0.0)
    }
}

/// Bar loads of a load group
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BarLoads {
    #[serde(default)]
    pub point: Vec<BarPointLoad>,
    #[serde(default)]
    pub distributed: Vec<BarDistributedLoad>,
}

/// Named group of loads
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Load {
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<NodalLoad>,
    #[serde(default)]
    pub bars: BarLoads,
}

impl Load {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_nodal(mut self, load: NodalLoad) -> Self {
        self.nodes.push(load);
        self
    }

    pub fn with_point(mut self, load: BarPointLoad) -> Self {
        self.bars.point.push(load);
        self
    }

    pub fn with_distributed(mut self, load: BarDistributedLoad) -> Self {
        self.bars.distributed.push(load);
        self
    }
}

/// Slack allowed past either bar end
const POSITION_TOLERANCE: f64 = 1e-6;

/// Check a distance along a bar of `length` lies on the bar
pub(crate) fn check_bar_position(load: &str, position: f64, length: f64) -> ViewResult<()> {
    if !position.is_finite() {
        return Err(ViewError::InvalidInput(format!(
            "load '{}' has a non-finite position",
            load
        )));
    }
    if position < -POSITION_TOLERANCE || position > length + POSITION_TOLERANCE {
        return Err(ViewError::InvalidInput(format!(
            "load '{}' position {} lies outside the bar (length {})",
            load, position, length
        )));
    }
    Ok(())
}
