//! Node glyphs: the pickable point, its name and the loads applied to it

use crate::config::ViewConfig;
use crate::elements::Node;
use crate::glyphs::ScreenLabel;
use crate::math::Vec3;
use crate::model::Structure;
use crate::scene::{AnchorX, AnchorY, Color, EntityRef, PointMark, Primitive, SceneNode};

use super::point_load::PointLoadGlyph;

const NODE_COLOR: Color = Color::CYAN;

/// Offset of the name from the node point inside the screen plane
pub fn label_shift(node_size: f64, label_size: f64) -> (f64, f64) {
    (
        node_size / 4.0 - label_size / 10.5,
        node_size / 4.0 - label_size / 4.1,
    )
}

/// Render a node at its position.
///
/// Only the point group is named; loads and the label are siblings of it.
pub fn render_node(node: &Node, structure: &Structure, config: &ViewConfig) -> SceneNode {
    let flags = &config.flags;
    let mut group = SceneNode::group()
        .with_position(node.coords())
        .with_child(
            SceneNode::named(format!("node-{}", node.name))
                .with_entity(EntityRef::node(&node.name))
                .with_primitive(Primitive::Point(PointMark {
                    position: Vec3::zeros(),
                    size: config.node_size,
                    color: NODE_COLOR,
                })),
        );

    if flags.nodal_loads {
        for nodal in structure.loads.iter().flat_map(|l| &l.nodes) {
            if nodal.node == node.name {
                group.push_child(PointLoadGlyph::new(Vec3::zeros(), nodal.loads).build());
            }
        }
    }

    if flags.nodes_label {
        let (x, y) = label_shift(config.node_size, config.label_size);
        group.push_child(
            ScreenLabel::new(&node.name, config.label_size, NODE_COLOR)
                .with_anchor(AnchorX::Left, AnchorY::Bottom)
                .shifted(x, y)
                .build(),
        );
    }

    group
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::{Load, NodalLoad};
    use approx::assert_relative_eq;

    fn structure() -> Structure {
        let mut s = Structure::new();
        s.add_node(Node::new("1", 1.0, 2.0, 3.0)).unwrap();
        s.add_node(Node::new("2", 4.0, 2.0, 3.0)).unwrap();
        s.add_load(Load::new("L1").with_nodal(NodalLoad::force("P", "2", 0.0, 0.0, -10.0)));
        s
    }

    #[test]
    fn test_node_point_and_label() {
        let s = structure();
        let node = render_node(&s.nodes[0], &s, &ViewConfig::default());
        assert_relative_eq!(node.transform.position, Vec3::new(1.0, 2.0, 3.0));
        let point = node.find_by_name("node-1").unwrap();
        assert_eq!(point.entity, Some(EntityRef::node("1")));
        assert_eq!(node.labels()[0].text, "1");
        assert_eq!(node.labels()[0].anchor_x, AnchorX::Left);
        assert_eq!(node.children.len(), 2);
    }

    #[test]
    fn test_nodal_loads_on_their_node_only() {
        let s = structure();
        let config = ViewConfig::default();
        assert_eq!(render_node(&s.nodes[0], &s, &config).cone_tips().len(), 0);
        let loaded = render_node(&s.nodes[1], &s, &config);
        let tips = loaded.cone_tips();
        assert_eq!(tips.len(), 1);
        assert_relative_eq!(tips[0], Vec3::new(4.0, 2.0, 3.0), epsilon = 1e-12);
    }

    #[test]
    fn test_label_shift() {
        let (x, y) = label_shift(0.1, 0.1);
        assert_relative_eq!(x, 0.025 - 0.1 / 10.5);
        assert_relative_eq!(y, 0.025 - 0.1 / 4.1);
    }
}
