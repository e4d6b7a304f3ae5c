//! Distributed (line) loads on bars

use serde::{Deserialize, Serialize};

use crate::error::{ViewError, ViewResult};

use super::{check_bar_position, ForceComponent, LoadDiagramValues, LoadSystem};

/// A linearly varying load over part of a bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarDistributedLoad {
    pub name: String,
    /// Loaded bar name
    pub bar: String,
    /// Start and end distance from the start node
    pub position: [f64; 2],
    #[serde(default)]
    pub system: LoadSystem,
    /// Start and end magnitude per component
    pub loads: LoadDiagramValues,
}

impl BarDistributedLoad {
    pub fn new(name: &str, bar: &str, position: [f64; 2], system: LoadSystem) -> Self {
        Self {
            name: name.to_string(),
            bar: bar.to_string(),
            position,
            system,
            loads: LoadDiagramValues::default(),
        }
    }

    /// Set the start and end magnitude of one component
    pub fn with(mut self, component: ForceComponent, start: f64, end: f64) -> Self {
        self.loads.set(component, [start, end]);
        self
    }

    /// Uniform load over the given span
    pub fn uniform(name: &str, bar: &str, span: [f64; 2], system: LoadSystem, component: ForceComponent, w: f64) -> Self {
        Self::new(name, bar, span, system).with(component, w, w)
    }

    /// Components with a non-zero magnitude at either end
    pub fn active_components(&self) -> impl Iterator<Item = (ForceComponent, [f64; 2])> + '_ {
        self.loads.iter().filter(|(_, [a, b])| *a != 0.0 || *b != 0.0)
    }

    /// Both ends on a bar of `length`, in either order, and apart
    pub fn check_on(&self, length: f64) -> ViewResult<()> {
        let [start, end] = self.position;
        check_bar_position(&self.name, start, length)?;
        check_bar_position(&self.name, end, length)?;
        if start == end {
            return Err(ViewError::InvalidInput(format!(
                "load '{}' starts and ends at {}",
                self.name, start
            )));
        }
        for (component, [a, b]) in self.loads.iter() {
            if !a.is_finite() || !b.is_finite() {
                return Err(ViewError::InvalidInput(format!(
                    "load '{}' has a non-finite {} magnitude",
                    self.name,
                    component.label()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_components() {
        let q = BarDistributedLoad::new("q", "B1", [0.0, 5.0], LoadSystem::Local)
            .with(ForceComponent::Fz, 2.0, -3.0)
            .with(ForceComponent::My, 0.0, 1.0);
        let active: Vec<_> = q.active_components().map(|(c, _)| c).collect();
        assert_eq!(active, vec![ForceComponent::Fz, ForceComponent::My]);
    }

    #[test]
    fn test_span_must_lie_on_the_bar() {
        let q = |position| BarDistributedLoad::uniform("q", "B1", position, LoadSystem::Global, ForceComponent::Fz, -2.0);
        assert!(q([0.0, 5.0]).check_on(5.0).is_ok());
        assert!(q([4.0, 1.0]).check_on(5.0).is_ok());
        assert!(matches!(q([0.0, 50.0]).check_on(5.0), Err(ViewError::InvalidInput(_))));
        assert!(matches!(q([0.0, 1e300]).check_on(5.0), Err(ViewError::InvalidInput(_))));
        assert!(matches!(q([2.0, 2.0]).check_on(5.0), Err(ViewError::InvalidInput(_))));

        let nan = BarDistributedLoad::new("q", "B1", [0.0, 5.0], LoadSystem::Local).with(ForceComponent::My, f64::NAN, 1.0);
        assert!(matches!(nan.check_on(5.0), Err(ViewError::InvalidInput(_))));
    }
}
