//! Structural document - the model being viewed
//!
//! A [`Structure`] is an immutable snapshot produced by a file open or a
//! completed calculation. [`DocumentState`] owns the current snapshot and
//! replaces it as a whole.

use std::collections::HashSet;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::elements::{Bar, Material, Node, Section, Support};
use crate::error::{ViewError, ViewResult};
use crate::loads::Load;
use crate::math::Vec3;
use crate::results::ResultSet;
use crate::selection::SelectionState;

/// The structural document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Structure {
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub bars: Vec<Bar>,
    #[serde(default)]
    pub supports: Vec<Support>,
    #[serde(default)]
    pub loads: Vec<Load>,
    /// Present once the structure has been calculated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<ResultSet>>,
}

impl Structure {
    /// Create a new empty structure
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document without validating it
    pub fn from_json_str(json: &str) -> ViewResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a document from disk
    pub fn from_json_file(path: impl AsRef<Path>) -> ViewResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    // ========================
    // Building
    // ========================

    /// Add a node to the structure
    pub fn add_node(&mut self, node: Node) -> ViewResult<()> {
        if self.node(&node.name).is_some() {
            return Err(ViewError::DuplicateName(node.name));
        }
        self.nodes.push(node);
        Ok(())
    }

    /// Add a bar; both end nodes must already exist
    pub fn add_bar(&mut self, bar: Bar) -> ViewResult<()> {
        if self.node(&bar.start_node).is_none() {
            return Err(ViewError::NodeNotFound(bar.start_node));
        }
        if self.node(&bar.end_node).is_none() {
            return Err(ViewError::NodeNotFound(bar.end_node));
        }
        if self.bar(&bar.name).is_some() {
            return Err(ViewError::DuplicateName(bar.name));
        }
        self.bars.push(bar);
        Ok(())
    }

    /// Add a support condition
    pub fn add_support(&mut self, support: Support) -> ViewResult<()> {
        if self.node(&support.node).is_none() {
            return Err(ViewError::SupportNodeNotFound(support.node));
        }
        self.supports.push(support);
        Ok(())
    }

    pub fn add_material(&mut self, material: Material) {
        self.materials.push(material);
    }

    pub fn add_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    pub fn add_load(&mut self, load: Load) {
        self.loads.push(load);
    }

    /// Attach calculation results
    pub fn with_results(mut self, results: Vec<ResultSet>) -> Self {
        self.results = Some(results);
        self
    }

    // ========================
    // Lookup
    // ========================

    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn bar(&self, name: &str) -> Option<&Bar> {
        self.bars.iter().find(|b| b.name == name)
    }

    pub fn support(&self, node: &str) -> Option<&Support> {
        self.supports.iter().find(|s| s.node == node)
    }

    /// Start and end coordinates of a bar
    pub fn bar_points(&self, bar: &Bar) -> ViewResult<(Vec3, Vec3)> {
        let start = self
            .node(&bar.start_node)
            .ok_or_else(|| ViewError::NodeNotFound(bar.start_node.clone()))?;
        let end = self
            .node(&bar.end_node)
            .ok_or_else(|| ViewError::NodeNotFound(bar.end_node.clone()))?;
        Ok((start.coords(), end.coords()))
    }

    /// Whether any calculation results are attached
    pub fn has_results(&self) -> bool {
        self.results.as_ref().is_some_and(|r| !r.is_empty())
    }

    pub fn result_set(&self, load_case: &str) -> Option<&ResultSet> {
        self.results
            .as_ref()?
            .iter()
            .find(|r| r.load_case == load_case)
    }

    // ========================
    // Validation
    // ========================

    fn bar_length(&self, name: &str) -> ViewResult<f64> {
        let bar = self
            .bar(name)
            .ok_or_else(|| ViewError::BarNotFound(name.to_string()))?;
        let (p0, p1) = self.bar_points(bar)?;
        Ok((p1 - p0).norm())
    }

    /// Check names are unique, every reference resolves and bar loads lie
    /// on their bars
    pub fn validate(&self) -> ViewResult<()> {
        let mut seen = HashSet::new();
        for node in &self.nodes {
            if !seen.insert(node.name.as_str()) {
                return Err(ViewError::DuplicateName(node.name.clone()));
            }
        }

        let mut seen = HashSet::new();
        for bar in &self.bars {
            if !seen.insert(bar.name.as_str()) {
                return Err(ViewError::DuplicateName(bar.name.clone()));
            }
            let (p0, p1) = self.bar_points(bar)?;
            if (p1 - p0).norm() < f64::EPSILON {
                return Err(ViewError::InvalidGeometry(format!(
                    "bar '{}' has zero length",
                    bar.name
                )));
            }
        }

        for support in &self.supports {
            if self.node(&support.node).is_none() {
                return Err(ViewError::SupportNodeNotFound(support.node.clone()));
            }
        }

        for load in &self.loads {
            for nodal in &load.nodes {
                if self.node(&nodal.node).is_none() {
                    return Err(ViewError::NodeNotFound(nodal.node.clone()));
                }
            }
            for point in &load.bars.point {
                point.check_on(self.bar_length(&point.bar)?)?;
            }
            for distributed in &load.bars.distributed {
                distributed.check_on(self.bar_length(&distributed.bar)?)?;
            }
        }

        Ok(())
    }
}

/// Owner of the current document and of the selection made on it
#[derive(Debug, Default)]
pub struct DocumentState {
    structure: Structure,
    pub selection: SelectionState,
}

impl DocumentState {
    pub fn new(structure: Structure) -> ViewResult<Self> {
        structure.validate()?;
        Ok(Self {
            structure,
            selection: SelectionState::default(),
        })
    }

    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    /// Swap in a new document as a whole. The selection is cleared; an
    /// invalid document is rejected and the current one kept.
    pub fn replace(&mut self, structure: Structure) -> ViewResult<()> {
        structure.validate()?;
        info!(
            "Document replaced: {} nodes, {} bars, {} supports, results: {}",
            structure.nodes.len(),
            structure.bars.len(),
            structure.supports.len(),
            structure.has_results()
        );
        self.structure = structure;
        self.selection = SelectionState::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::{BarDistributedLoad, LoadSystem};
    use crate::scene::EntityRef;

    fn portal() -> Structure {
        let mut s = Structure::new();
        s.add_node(Node::new("1", 0.0, 0.0, 0.0)).unwrap();
        s.add_node(Node::new("2", 0.0, 0.0, 3.0)).unwrap();
        s.add_node(Node::new("3", 5.0, 0.0, 3.0)).unwrap();
        s.add_bar(Bar::new("B1", "1", "2")).unwrap();
        s.add_bar(Bar::new("B2", "2", "3")).unwrap();
        s.add_support(Support::fixed("1")).unwrap();
        s
    }

    #[test]
    fn test_build_and_lookup() {
        let s = portal();
        assert!(s.validate().is_ok());
        let (p0, p1) = s.bar_points(s.bar("B2").unwrap()).unwrap();
        assert_eq!(p1 - p0, Vec3::new(5.0, 0.0, 0.0));
        assert!(!s.has_results());
    }

    #[test]
    fn test_reference_errors() {
        let mut s = portal();
        assert!(matches!(s.add_node(Node::new("1", 1.0, 1.0, 1.0)), Err(ViewError::DuplicateName(_))));
        assert!(matches!(s.add_bar(Bar::new("B3", "1", "9")), Err(ViewError::NodeNotFound(_))));
        assert!(matches!(s.add_support(Support::fixed("9")), Err(ViewError::SupportNodeNotFound(_))));

        s.supports.push(Support::fixed("9"));
        assert!(matches!(s.validate(), Err(ViewError::SupportNodeNotFound(_))));
    }

    #[test]
    fn test_validate_load_and_geometry() {
        let mut s = portal();
        s.add_load(
            crate::loads::Load::new("L1").with_distributed(BarDistributedLoad::new(
                "q",
                "B9",
                [0.0, 1.0],
                LoadSystem::Local,
            )),
        );
        assert!(matches!(s.validate(), Err(ViewError::BarNotFound(_))));

        let mut s = portal();
        s.nodes.push(Node::new("4", 5.0, 0.0, 3.0));
        s.bars.push(Bar::new("B3", "3", "4"));
        assert!(matches!(s.validate(), Err(ViewError::InvalidGeometry(_))));
    }

    #[test]
    fn test_validate_distributed_load_beyond_bar() {
        let mut s = portal();
        s.add_load(crate::loads::Load::new("L1").with_distributed(BarDistributedLoad::uniform(
            "q",
            "B2",
            [0.0, 50.0],
            LoadSystem::Global,
            crate::loads::ForceComponent::Fz,
            -2.0,
        )));
        assert!(matches!(s.validate(), Err(ViewError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_distributed_load_without_span() {
        let mut s = portal();
        s.add_load(crate::loads::Load::new("L1").with_distributed(BarDistributedLoad::uniform(
            "q",
            "B2",
            [2.0, 2.0],
            LoadSystem::Local,
            crate::loads::ForceComponent::Fz,
            -2.0,
        )));
        assert!(matches!(s.validate(), Err(ViewError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_point_load_positions() {
        let point = |x| {
            crate::loads::BarPointLoad::new(
                "P",
                "B1",
                x,
                LoadSystem::Global,
                crate::loads::LoadVector::new(0.0, 0.0, -5.0, 0.0, 0.0, 0.0),
            )
        };
        let mut s = portal();
        s.add_load(crate::loads::Load::new("L1").with_point(point(3.0)));
        assert!(s.validate().is_ok());

        for x in [-1.0, 3.5, f64::NAN] {
            let mut s = portal();
            s.add_load(crate::loads::Load::new("L1").with_point(point(x)));
            assert!(matches!(s.validate(), Err(ViewError::InvalidInput(_))));
        }
    }

    #[test]
    fn test_replace_clears_selection() {
        let mut doc = DocumentState::new(portal()).unwrap();
        doc.selection.selection = Some(EntityRef::bar("B1"));
        doc.selection.click_void = false;

        doc.replace(portal().with_results(vec![ResultSet::default()])).unwrap();
        assert!(doc.selection.selection.is_none());
        assert!(doc.selection.click_void);
        assert!(doc.structure().has_results());

        let mut broken = portal();
        broken.bars.push(Bar::new("B1", "1", "3"));
        assert!(doc.replace(broken).is_err());
        assert_eq!(doc.structure().bars.len(), 2);
    }
}
