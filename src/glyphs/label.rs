//! Text labels: axis-aligned billboarded text and screen-facing text

use crate::billboard::text_axis_base;
use crate::math::{Axis, Vec2, Vec3};
use crate::scene::{AnchorX, AnchorY, Billboard, Color, Label, Primitive, SceneNode};

/// Text node that applies its label's anchor offset and readability flips
fn text_node(label: Label) -> SceneNode {
    let offset = label.anchor_position();
    SceneNode::group()
        .with_position(Vec3::new(offset.x, offset.y, 0.0))
        .with_billboard(Billboard::TextFace)
        .with_primitive(Primitive::Text(label))
}

/// Text laid along a coordinate axis, spinning about that axis toward
/// the camera
#[derive(Debug, Clone)]
pub struct AxisLabel {
    pub axis: Axis,
    pub position: Vec3,
    pub label: Label,
}

impl AxisLabel {
    pub fn new(text: impl Into<String>, axis: Axis, font_size: f64, color: Color) -> Self {
        Self {
            axis,
            position: Vec3::zeros(),
            label: Label::new(text, font_size, color),
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_anchor(mut self, x: AnchorX, y: AnchorY) -> Self {
        self.label = self.label.with_anchor(x, y);
        self
    }

    pub fn with_offset(mut self, x: f64, y: f64) -> Self {
        self.label = self.label.with_offset(x, y);
        self
    }

    pub fn build(self) -> SceneNode {
        SceneNode::group()
            .with_position(self.position)
            .with_billboard(Billboard::Axis {
                axis: self.axis.unit(),
            })
            .with_child(
                SceneNode::group()
                    .with_rotation(text_axis_base(self.axis))
                    .with_child(text_node(self.label)),
            )
    }
}

/// Text that always faces the screen
#[derive(Debug, Clone)]
pub struct ScreenLabel {
    pub position: Vec3,
    /// Offset inside the screen-facing plane
    pub shift: Vec2,
    pub label: Label,
}

impl ScreenLabel {
    pub fn new(text: impl Into<String>, font_size: f64, color: Color) -> Self {
        Self {
            position: Vec3::zeros(),
            shift: Vec2::zeros(),
            label: Label::new(text, font_size, color),
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_anchor(mut self, x: AnchorX, y: AnchorY) -> Self {
        self.label = self.label.with_anchor(x, y);
        self
    }

    /// Move the text within the screen-facing plane
    pub fn shifted(mut self, x: f64, y: f64) -> Self {
        self.shift = Vec2::new(x, y);
        self
    }

    pub fn build(self) -> SceneNode {
        let text = text_node(self.label);
        let content = if self.shift == Vec2::zeros() {
            text
        } else {
            SceneNode::group()
                .with_position(Vec3::new(self.shift.x, self.shift.y, 0.0))
                .with_child(text)
        };
        SceneNode::group()
            .with_position(self.position)
            .with_billboard(Billboard::Full)
            .with_child(content)
    }
}
