//! Support reaction glyphs drawn from calculation results
//!
//! Reactions use flat line arrows so they read differently from the solid
//! load arrows at the same node.

use std::f64::consts::FRAC_PI_4;

use crate::error::{ViewError, ViewResult};
use crate::glyphs::{AxisDirection, AxisLabel, LineArrow, LineCurvedArrow};
use crate::loads::ForceComponent;
use crate::math::{euler_xyz, Quat};
use crate::model::Structure;
use crate::results::ReactionRow;
use crate::scene::{AnchorY, Color, SceneNode};

use super::point_load::{ForceGlyph, MomentGlyph};
use super::{component_colors, number_text, LABEL_FONT_SIZE};

const ARROW_SIZE: f64 = 0.15;
const FORCE_LENGTH: f64 = 0.35;
const MOMENT_RADIUS: f64 = 0.4;

/// Tilt of the curved arrow so its head is not hidden behind the support
fn moment_tilt(direction: AxisDirection) -> Quat {
    let three_quarters = 3.0 * FRAC_PI_4;
    match direction {
        AxisDirection::PosX => euler_xyz(-FRAC_PI_4, 0.0, 0.0),
        AxisDirection::PosY | AxisDirection::NegY => euler_xyz(0.0, three_quarters, 0.0),
        AxisDirection::PosZ => euler_xyz(0.0, 0.0, FRAC_PI_4),
        AxisDirection::NegX => euler_xyz(three_quarters, 0.0, 0.0),
        AxisDirection::NegZ => euler_xyz(0.0, 0.0, -three_quarters),
    }
}

/// Reaction force: line arrow ending on the node
pub fn reaction_force(direction: AxisDirection, value: f64, color: Color) -> SceneNode {
    let (position, anchor_x) = ForceGlyph::label_placement(direction);
    SceneNode::group()
        .with_child(
            LineArrow::new(direction.vector())
                .with_length(FORCE_LENGTH)
                .with_arrow_size(ARROW_SIZE)
                .with_line_width(0.015)
                .with_color(color)
                .end_base()
                .build(),
        )
        .with_child(
            AxisLabel::new(number_text(value), direction.axis(), LABEL_FONT_SIZE, color)
                .at(position)
                .with_anchor(anchor_x, AnchorY::Bottom)
                .build(),
        )
}

/// Reaction moment: line curved arrow about the component axis
pub fn reaction_moment(direction: AxisDirection, value: f64, color: Color) -> SceneNode {
    let (position, anchor_x) = MomentGlyph::label_placement(direction, MOMENT_RADIUS);
    SceneNode::group()
        .with_child(
            LineCurvedArrow::new(direction.vector())
                .with_rotation(moment_tilt(direction))
                .with_radius(MOMENT_RADIUS)
                .with_arrow_size(ARROW_SIZE)
                .with_color(color)
                .build(),
        )
        .with_child(
            AxisLabel::new(number_text(value), direction.axis(), LABEL_FONT_SIZE, color)
                .at(position)
                .with_anchor(anchor_x, AnchorY::Middle)
                .with_offset(0.03, 0.0)
                .build(),
        )
}

fn component_glyph(component: ForceComponent, value: f64) -> SceneNode {
    let direction = AxisDirection::from_sign(component.axis(), value);
    let color = component_colors(component).for_value(value);
    if component.is_moment() {
        reaction_moment(direction, value, color)
    } else {
        reaction_force(direction, value, color)
    }
}

/// Reactions at one supported node; zero components are skipped
pub fn render_reaction(row: &ReactionRow, structure: &Structure) -> ViewResult<SceneNode> {
    let node = structure
        .node(&row.node)
        .ok_or_else(|| ViewError::NodeNotFound(row.node.clone()))?;

    let mut group = SceneNode::group().with_position(node.coords());
    for (component, value) in row.values.iter() {
        if value != 0.0 {
            group.push_child(component_glyph(component, value));
        }
    }
    Ok(group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::Node;
    use crate::loads::LoadVector;
    use crate::scene::{AnchorX, Primitive};

    fn row(values: LoadVector) -> ReactionRow {
        ReactionRow {
            node: "1".to_string(),
            values,
        }
    }

    fn structure() -> Structure {
        let mut s = Structure::new();
        s.add_node(Node::new("1", 0.0, 0.0, 0.0)).unwrap();
        s
    }

    #[test]
    fn test_reaction_components() {
        let r = row(LoadVector::new(0.0, 0.0, 12.5, 0.0, -4.0, 0.0));
        let node = render_reaction(&r, &structure()).unwrap();
        assert_eq!(node.children.len(), 2);

        let labels = node.labels();
        assert_eq!(labels[0].text, "12.5");
        assert_eq!(labels[0].color, Color::BLUE);
        assert_eq!(labels[0].anchor_x, AnchorX::Right);
        assert_eq!(labels[1].text, "-4");
        assert_eq!(labels[1].color, Color::LIGHT_GREEN);
        assert_eq!(labels[1].anchor_x, AnchorX::Right);

        // No solid cones: reactions are line-drawn
        assert_eq!(node.count_primitives(|p| matches!(p, Primitive::Cone(_))), 0);
    }

    #[test]
    fn test_reaction_on_unknown_node() {
        let r = ReactionRow {
            node: "9".to_string(),
            values: LoadVector::new(1.0, 0.0, 0.0, 0.0, 0.0, 0.0),
        };
        assert!(matches!(render_reaction(&r, &structure()), Err(ViewError::NodeNotFound(_))));
    }
}
