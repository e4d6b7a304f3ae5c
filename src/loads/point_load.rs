//! Concentrated loads on bars

use serde::{Deserialize, Serialize};

use crate::error::ViewResult;

use super::{check_bar_position, LoadSystem, LoadVector};

/// A concentrated load on a bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarPointLoad {
    pub name: String,
    /// Loaded bar name
    pub bar: String,
    /// Distance from the start node
    pub position: f64,
    #[serde(default)]
    pub system: LoadSystem,
    pub loads: LoadVector,
}

impl BarPointLoad {
    pub fn new(name: &str, bar: &str, position: f64, system: LoadSystem, loads: LoadVector) -> Self {
        Self {
            name: name.to_string(),
            bar: bar.to_string(),
            position,
            system,
            loads,
        }
    }

    /// The load point lies on a bar of `length`
    pub fn check_on(&self, length: f64) -> ViewResult<()> {
        check_bar_position(&self.name, self.position, length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_must_lie_on_the_bar() {
        let p = |x| BarPointLoad::new("P", "B1", x, LoadSystem::Local, LoadVector::new(0.0, 0.0, -10.0, 0.0, 0.0, 0.0));
        assert!(p(2.5).check_on(5.0).is_ok());
        assert!(p(5.0).check_on(5.0).is_ok());
        assert!(p(7.0).check_on(5.0).is_err());
        assert!(p(f64::NAN).check_on(5.0).is_err());
    }
}
