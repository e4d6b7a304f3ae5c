//! Unit coordinate triad with optional axis letters

use super::ScreenLabel;
use crate::math::{Axis, Quat, Vec3};
use crate::scene::{Color, Polyline, Primitive, SceneNode};

#[derive(Debug, Clone)]
pub struct Axes {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: f64,
    pub label: bool,
    /// Letter color
    pub color: Color,
}

impl Default for Axes {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: 1.0,
            label: false,
            color: Color::WHITE,
        }
    }
}

impl Axes {
    pub fn build(&self) -> SceneNode {
        let mut node = SceneNode::group()
            .with_position(self.position)
            .with_rotation(self.rotation)
            .with_scale(self.scale);

        for (axis, color) in [(Axis::X, Color::RED), (Axis::Y, Color::GREEN), (Axis::Z, Color::BLUE)] {
            node.push_primitive(Primitive::Polyline(Polyline::new(
                vec![Vec3::zeros(), axis.unit()],
                color,
                0.1 * self.scale,
            )));
            if self.label {
                node.push_child(
                    ScreenLabel::new(axis.label(), 0.4, self.color)
                        .at(axis.unit() * 1.3)
                        .build(),
                );
            }
        }
        node
    }
}
