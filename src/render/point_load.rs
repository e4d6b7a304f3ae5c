//! Concentrated force and moment glyphs
//!
//! Used for nodal loads and bar point loads. Each non-zero component of a
//! load vector becomes one arrow (forces) or one curved arrow (moments)
//! pointing along the signed component axis, optionally labelled with its
//! value.

use crate::elements::Bar;
use crate::error::ViewResult;
use crate::frame::{build_frame, UpHint};
use crate::glyphs::{Arrow, AxisDirection, AxisLabel, CurvedArrow};
use crate::loads::{BarPointLoad, LoadSystem, LoadVector};
use crate::math::Vec3;
use crate::scene::{AnchorX, AnchorY, Color, SceneNode};

use super::{component_colors, number_text, LABEL_FONT_SIZE};

// ========================
// Force
// ========================

/// Arrow whose apex sits on the loaded point
#[derive(Debug, Clone)]
pub struct ForceGlyph {
    pub direction: AxisDirection,
    pub value: f64,
    pub length: f64,
    pub scale: f64,
    pub arrow_color: Color,
    pub label_color: Color,
    pub label: bool,
}

impl ForceGlyph {
    pub fn new(direction: AxisDirection, value: f64) -> Self {
        Self {
            direction,
            value,
            length: 0.35,
            scale: 0.4,
            arrow_color: Color::WHITE,
            label_color: Color::WHITE,
            label: false,
        }
    }

    pub fn with_colors(mut self, arrow: Color, label: Color) -> Self {
        self.arrow_color = arrow;
        self.label_color = label;
        self
    }

    pub fn with_label(mut self, label: bool) -> Self {
        self.label = label;
        self
    }

    /// Label position and horizontal anchor; the label sits behind the
    /// arrow base
    pub fn label_placement(direction: AxisDirection) -> (Vec3, AnchorX) {
        let anchor = if direction.is_negative() {
            AnchorX::Left
        } else {
            AnchorX::Right
        };
        (-direction.vector() * 0.2, anchor)
    }

    pub fn build(&self) -> SceneNode {
        let mut node = SceneNode::group().with_child(
            Arrow::new(self.direction)
                .with_length(self.length)
                .with_scale(self.scale)
                .with_color(self.arrow_color)
                .end_base()
                .build(),
        );

        if self.label {
            let (position, anchor_x) = Self::label_placement(self.direction);
            node.push_child(
                AxisLabel::new(
                    number_text(self.value),
                    self.direction.axis(),
                    LABEL_FONT_SIZE,
                    self.label_color,
                )
                .at(position)
                .with_anchor(anchor_x, AnchorY::Bottom)
                .build(),
            );
        }
        node
    }
}

// ========================
// Moment
// ========================

/// Curved arrow turning about the signed component axis
#[derive(Debug, Clone)]
pub struct MomentGlyph {
    pub direction: AxisDirection,
    pub value: f64,
    pub radius: f64,
    pub scale: f64,
    pub arrow_color: Color,
    pub label_color: Color,
    pub label: bool,
}

impl MomentGlyph {
    pub fn new(direction: AxisDirection, value: f64) -> Self {
        Self {
            direction,
            value,
            radius: 0.4,
            scale: 0.35,
            arrow_color: Color::WHITE,
            label_color: Color::WHITE,
            label: false,
        }
    }

    pub fn with_size(mut self, radius: f64, scale: f64) -> Self {
        self.radius = radius;
        self.scale = scale;
        self
    }

    pub fn with_colors(mut self, arrow: Color, label: Color) -> Self {
        self.arrow_color = arrow;
        self.label_color = label;
        self
    }

    pub fn with_label(mut self, label: bool) -> Self {
        self.label = label;
        self
    }

    /// Label position and horizontal anchor for an arc of `radius`.
    /// Offsets scale with the radius from a reference radius of 0.4.
    pub fn label_placement(direction: AxisDirection, radius: f64) -> (Vec3, AnchorX) {
        let k = radius / 0.4;
        let (o1, o2, on) = (0.28 * k, 0.3 * k, 0.03 * k);
        match direction {
            AxisDirection::PosX => (Vec3::new(0.0, o1, -o2), AnchorX::Left),
            AxisDirection::PosY => (Vec3::new(o1, 0.0, o2), AnchorX::Left),
            AxisDirection::PosZ => (Vec3::new(-o1, o2, 0.0), AnchorX::Left),
            AxisDirection::NegX => (Vec3::new(0.0, -o1, o2 - on), AnchorX::Right),
            AxisDirection::NegY => (Vec3::new(-o1, 0.0, -o2 + on), AnchorX::Right),
            AxisDirection::NegZ => (Vec3::new(o1, -o2 + on, 0.0), AnchorX::Right),
        }
    }

    pub fn build(&self) -> SceneNode {
        let mut node = SceneNode::group().with_child(
            CurvedArrow::new(self.direction)
                .with_radius(self.radius)
                .with_scale(self.scale)
                .with_color(self.arrow_color)
                .build(),
        );

        if self.label {
            let (position, anchor_x) = Self::label_placement(self.direction, self.radius);
            node.push_child(
                AxisLabel::new(
                    number_text(self.value),
                    self.direction.axis(),
                    LABEL_FONT_SIZE,
                    self.label_color,
                )
                .at(position)
                .with_anchor(anchor_x, AnchorY::Middle)
                .with_offset(0.03, 0.0)
                .build(),
            );
        }
        node
    }
}

// ========================
// Composition
// ========================

/// All components of a load vector at one point
#[derive(Debug, Clone)]
pub struct PointLoadGlyph {
    pub position: Vec3,
    pub loads: LoadVector,
    pub label: bool,
}

impl PointLoadGlyph {
    pub fn new(position: Vec3, loads: LoadVector) -> Self {
        Self {
            position,
            loads,
            label: true,
        }
    }

    pub fn with_label(mut self, label: bool) -> Self {
        self.label = label;
        self
    }

    pub fn build(&self) -> SceneNode {
        let mut node = SceneNode::group().with_position(self.position);
        for (component, value) in self.loads.iter() {
            if value == 0.0 {
                continue;
            }
            let direction = AxisDirection::from_sign(component.axis(), value);
            let color = component_colors(component).for_value(value);
            let glyph = if component.is_moment() {
                MomentGlyph::new(direction, value)
                    .with_colors(color, color)
                    .with_label(self.label)
                    .build()
            } else {
                ForceGlyph::new(direction, value)
                    .with_colors(color, color)
                    .with_label(self.label)
                    .build()
            };
            node.push_child(glyph);
        }
        node
    }
}

/// Point load on a bar, placed `position` along the bar from its start.
///
/// Local loads are drawn in the bar frame (twist included); global loads
/// keep the world axes and are only moved along the bar.
pub fn bar_point_load(load: &BarPointLoad, bar: &Bar, p0: &Vec3, p1: &Vec3) -> ViewResult<SceneNode> {
    let direction = p1 - p0;
    load.check_on(direction.norm())?;
    let node = match load.system {
        LoadSystem::Local => {
            let frame = build_frame(&direction, bar.twist(), UpHint::ZUp)?;
            SceneNode::group()
                .with_position(*p0)
                .with_rotation(frame.rotation())
                .with_child(
                    PointLoadGlyph::new(Vec3::new(load.position, 0.0, 0.0), load.loads)
                        .build(),
                )
        }
        LoadSystem::Global => {
            let along = direction.normalize() * load.position;
            SceneNode::group()
                .with_position(*p0)
                .with_child(PointLoadGlyph::new(along, load.loads).build())
        }
    };
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Primitive;
    use approx::assert_relative_eq;

    #[test]
    fn test_force_apex_on_load_point() {
        for dir in [AxisDirection::PosZ, AxisDirection::NegX] {
            let node = ForceGlyph::new(dir, -10.0).build();
            let tips = node.cone_tips();
            assert_eq!(tips.len(), 1);
            assert_relative_eq!(tips[0], Vec3::zeros(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_force_label_table() {
        let (pos, anchor) = ForceGlyph::label_placement(AxisDirection::PosY);
        assert_relative_eq!(pos, Vec3::new(0.0, -0.2, 0.0));
        assert_eq!(anchor, AnchorX::Right);

        let (pos, anchor) = ForceGlyph::label_placement(AxisDirection::NegZ);
        assert_relative_eq!(pos, Vec3::new(0.0, 0.0, 0.2));
        assert_eq!(anchor, AnchorX::Left);
    }

    #[test]
    fn test_moment_label_scales_with_radius() {
        let (pos, anchor) = MomentGlyph::label_placement(AxisDirection::NegZ, 0.8);
        assert_relative_eq!(pos, Vec3::new(0.56, -0.6 + 0.06, 0.0), epsilon = 1e-12);
        assert_eq!(anchor, AnchorX::Right);
    }

    #[test]
    fn test_point_load_skips_zero_components() {
        let loads = LoadVector::new(0.0, 0.0, -10.0, 0.0, 5.0, 0.0);
        let node = PointLoadGlyph::new(Vec3::new(1.0, 2.0, 3.0), loads).build();
        assert_eq!(node.children.len(), 2);
        assert_eq!(node.count_primitives(|p| matches!(p, Primitive::Cone(_))), 2);

        let texts: Vec<_> = node.labels().iter().map(|l| l.text.clone()).collect();
        assert_eq!(texts, vec!["-10", "5"]);
        assert_eq!(node.labels()[0].color, Color::LIGHT_BLUE);
        assert_eq!(node.labels()[1].color, Color::GREEN);
    }

    #[test]
    fn test_bar_point_load_global_moves_along_bar() {
        let bar = Bar::new("B1", "1", "2");
        let load = BarPointLoad::new(
            "P",
            "B1",
            2.0,
            LoadSystem::Global,
            LoadVector::new(0.0, 0.0, -1.0, 0.0, 0.0, 0.0),
        );
        let p0 = Vec3::new(1.0, 0.0, 0.0);
        let p1 = Vec3::new(1.0, 4.0, 0.0);
        let node = bar_point_load(&load, &bar, &p0, &p1).unwrap();
        let tips = node.cone_tips();
        assert_relative_eq!(tips[0], Vec3::new(1.0, 2.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_bar_point_load_local_uses_bar_frame() {
        let bar = Bar::new("B1", "1", "2");
        let load = BarPointLoad::new(
            "P",
            "B1",
            3.0,
            LoadSystem::Local,
            LoadVector::new(0.0, 0.0, -1.0, 0.0, 0.0, 0.0),
        );
        // Bar along global Y: local z stays global Z
        let node = bar_point_load(&load, &bar, &Vec3::zeros(), &Vec3::new(0.0, 5.0, 0.0)).unwrap();
        let tips = node.cone_tips();
        assert_relative_eq!(tips[0], Vec3::new(0.0, 3.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_bar_point_load_past_the_end() {
        let bar = Bar::new("B1", "1", "2");
        let load = BarPointLoad::new(
            "P",
            "B1",
            9.0,
            LoadSystem::Global,
            LoadVector::new(0.0, 0.0, -1.0, 0.0, 0.0, 0.0),
        );
        assert!(bar_point_load(&load, &bar, &Vec3::zeros(), &Vec3::new(5.0, 0.0, 0.0)).is_err());
    }
}
