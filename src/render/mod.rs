//! Scene construction from a structural document
//!
//! [`SceneBuilder`] turns a [`Structure`] into a scene graph. Every top-level
//! entity (node, bar, support, reaction) is rendered on its own: a failure
//! is logged, recorded in the [`SceneReport`] and the entity is left out, so
//! one malformed element never blanks the rest of the scene. Loads attached
//! to an entity are isolated the same way.

pub mod bar;
pub mod distributed;
pub mod node;
pub mod point_load;
pub mod reaction;
pub mod release;
pub mod support;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::ViewConfig;
use crate::error::ViewResult;
use crate::loads::ForceComponent;
use crate::model::Structure;
use crate::scene::{Color, SceneNode};

pub use distributed::{bar_distributed_load, DiagramStyle, LoadDiagram};
pub use point_load::{bar_point_load, ForceGlyph, MomentGlyph, PointLoadGlyph};

/// Font size of load and reaction value labels
pub const LABEL_FONT_SIZE: f64 = 0.1;

/// Plain number formatting used by every value label
pub fn number_text(value: f64) -> String {
    format!("{}", value)
}

/// Arrow and label colors for positive and negative values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub positive_arrow: Color,
    pub negative_arrow: Color,
    pub positive_label: Color,
    pub negative_label: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            positive_arrow: Color::CYAN,
            negative_arrow: Color::MAGENTA,
            positive_label: Color::CYAN,
            negative_label: Color::MAGENTA,
        }
    }
}

impl Palette {
    /// Same color for arrows and labels
    pub fn uniform(positive: Color, negative: Color) -> Self {
        Self {
            positive_arrow: positive,
            negative_arrow: negative,
            positive_label: positive,
            negative_label: negative,
        }
    }

    pub fn arrow(&self, negative: bool) -> Color {
        if negative {
            self.negative_arrow
        } else {
            self.positive_arrow
        }
    }

    pub fn label(&self, negative: bool) -> Color {
        if negative {
            self.negative_label
        } else {
            self.positive_label
        }
    }

    pub fn for_value(&self, value: f64) -> Color {
        self.arrow(value < 0.0)
    }
}

/// Colors of a load or reaction component: x red, y green, z blue, with
/// lighter shades for negative values
pub fn component_colors(component: ForceComponent) -> Palette {
    match component {
        ForceComponent::Fx | ForceComponent::Mx => Palette::uniform(Color::RED, Color::LIGHT_RED),
        ForceComponent::Fy | ForceComponent::My => Palette::uniform(Color::GREEN, Color::LIGHT_GREEN),
        ForceComponent::Fz | ForceComponent::Mz => Palette::uniform(Color::BLUE, Color::LIGHT_BLUE),
    }
}

// ========================
// Scene building
// ========================

/// Collected warnings of one render; each entry names the failing entity
#[derive(Debug, Default)]
pub struct Warnings(Vec<String>);

impl Warnings {
    /// Keep the node on success; log and record the failure otherwise
    pub fn isolate(&mut self, entity: &str, result: ViewResult<SceneNode>) -> Option<SceneNode> {
        match result {
            Ok(node) => Some(node),
            Err(err) => {
                let err = err.in_entity(entity);
                warn!("{}", err);
                self.0.push(err.to_string());
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

/// Scene graph plus the entities that could not be rendered
#[derive(Debug, Clone, Serialize)]
pub struct SceneReport {
    pub scene: SceneNode,
    pub warnings: Vec<String>,
}

/// Builds the scene of a document under a configuration
#[derive(Debug, Clone, Default)]
pub struct SceneBuilder {
    pub config: ViewConfig,
}

impl SceneBuilder {
    pub fn new(config: ViewConfig) -> Self {
        Self { config }
    }

    pub fn build(&self, structure: &Structure) -> SceneReport {
        let flags = &self.config.flags;
        let mut warnings = Warnings::default();
        let mut scene = SceneNode::group();

        if flags.nodes {
            for node in &structure.nodes {
                scene.push_child(node::render_node(node, structure, &self.config));
            }
        }

        if flags.bars {
            for bar in &structure.bars {
                let result = bar::render_bar(bar, structure, &self.config, &mut warnings);
                if let Some(glyph) = warnings.isolate(&bar.name, result) {
                    scene.push_child(glyph);
                }
            }
        }

        if flags.supports {
            for s in &structure.supports {
                if let Some(glyph) = warnings.isolate(&s.node, support::render_support(s, structure)) {
                    scene.push_child(glyph);
                }
            }
        }

        if self.config.show_reactions {
            if let Some(set) = structure.result_set(&self.config.results_load_case) {
                for row in &set.reactions {
                    let result = reaction::render_reaction(row, structure);
                    if let Some(glyph) = warnings.isolate(&row.node, result) {
                        scene.push_child(glyph);
                    }
                }
            }
        }

        debug!(
            "Scene built: {} top-level groups, {} warnings",
            scene.children.len(),
            warnings.len()
        );
        SceneReport {
            scene,
            warnings: warnings.into_vec(),
        }
    }
}

/// Build a scene with a given configuration
pub fn build_scene(structure: &Structure, config: &ViewConfig) -> SceneReport {
    SceneBuilder::new(config.clone()).build(structure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Bar, Node, Support};
    use crate::error::ViewError;

    fn frame() -> Structure {
        let mut s = Structure::new();
        s.add_node(Node::new("1", 0.0, 0.0, 0.0)).unwrap();
        s.add_node(Node::new("2", 0.0, 0.0, 3.0)).unwrap();
        s.add_bar(Bar::new("B1", "1", "2")).unwrap();
        s.add_support(Support::fixed("1")).unwrap();
        s
    }

    #[test]
    fn test_palette_by_sign() {
        let p = component_colors(ForceComponent::My);
        assert_eq!(p.for_value(2.0), Color::GREEN);
        assert_eq!(p.for_value(-2.0), Color::LIGHT_GREEN);
        assert_eq!(p.label(true), Color::LIGHT_GREEN);
        assert_eq!(Palette::default().arrow(true), Color::MAGENTA);
    }

    #[test]
    fn test_number_text() {
        assert_eq!(number_text(2.0), "2");
        assert_eq!(number_text(-3.5), "-3.5");
    }

    #[test]
    fn test_scene_has_named_entities() {
        let report = SceneBuilder::default().build(&frame());
        assert!(report.warnings.is_empty());
        assert!(report.scene.find_by_name("node-1").is_some());
        assert!(report.scene.find_by_name("bar-B1").is_some());
        assert!(report.scene.find_by_name("support-1").is_some());
    }

    #[test]
    fn test_hidden_categories_are_skipped() {
        let mut config = ViewConfig::default();
        config.flags.bars = false;
        config.flags.supports = false;
        let report = build_scene(&frame(), &config);
        assert!(report.scene.find_by_name("bar-B1").is_none());
        assert!(report.scene.find_by_name("support-1").is_none());
        assert!(report.scene.find_by_name("node-2").is_some());
    }

    #[test]
    fn test_failing_entity_is_isolated() {
        let mut s = frame();
        s.supports.push(Support::fixed("9"));
        let report = SceneBuilder::default().build(&s);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("'9'"));
        assert!(report.scene.find_by_name("support-1").is_some());
        assert!(report.scene.find_by_name("bar-B1").is_some());
    }

    #[test]
    fn test_load_off_the_bar_is_isolated() {
        let mut s = frame();
        s.add_load(
            crate::loads::Load::new("L1")
                .with_distributed(crate::loads::BarDistributedLoad::uniform(
                    "huge",
                    "B1",
                    [0.0, 1e300],
                    crate::loads::LoadSystem::Global,
                    ForceComponent::Fz,
                    -2.0,
                ))
                .with_distributed(crate::loads::BarDistributedLoad::uniform(
                    "q",
                    "B1",
                    [0.0, 3.0],
                    crate::loads::LoadSystem::Global,
                    ForceComponent::Fx,
                    1.0,
                )),
        );
        assert!(s.validate().is_err());

        let mut config = ViewConfig::default();
        config.flags.nodes = false;
        config.flags.supports = false;
        config.flags.bar_label = false;
        config.flags.bar_local_axes = false;
        let report = build_scene(&s, &config);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].starts_with("Render of 'B1/huge' failed"));
        assert!(report.scene.find_by_name("bar-B1").is_some());

        // The sibling load on the same bar is still drawn
        let texts: Vec<_> = report.scene.labels().iter().map(|l| l.text.clone()).collect();
        assert_eq!(texts, vec!["1", "1"]);
    }

    #[test]
    fn test_isolate_wraps_entity_name() {
        let mut warnings = Warnings::default();
        let out = warnings.isolate("B7", Err(ViewError::VerticalLine));
        assert!(out.is_none());
        assert_eq!(warnings.len(), 1);
        assert!(warnings.into_vec()[0].starts_with("Render of 'B7' failed"));
    }
}
