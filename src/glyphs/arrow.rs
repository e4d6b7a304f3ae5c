//! Straight arrow with a cone head along a signed coordinate axis

use std::f64::consts::{FRAC_PI_2, PI};

use super::AxisDirection;
use crate::math::{euler_xyz, Quat, Vec3};
use crate::scene::{Color, Cone, Polyline, Primitive, SceneNode};

#[derive(Debug, Clone)]
pub struct Arrow {
    pub direction: AxisDirection,
    pub position: Vec3,
    /// Distance from the base to the apex
    pub length: f64,
    pub color: Color,
    /// Scale applied to the head and to the shaft width
    pub scale: f64,
    pub height_arrow: f64,
    pub radius_arrow: f64,
    pub line_weight: f64,
    /// Shift the arrow back so its apex sits on `position`
    pub end_base: bool,
    /// Draw the head only
    pub not_line: bool,
}

impl Default for Arrow {
    fn default() -> Self {
        Self {
            direction: AxisDirection::PosY,
            position: Vec3::zeros(),
            length: 1.0,
            color: Color::WHITE,
            scale: 1.0,
            height_arrow: 0.4,
            radius_arrow: 0.12,
            line_weight: 0.08,
            end_base: false,
            not_line: false,
        }
    }
}

/// Rotation carrying local +Y onto `direction`
pub fn arrow_rotation(direction: AxisDirection) -> Quat {
    let (rot_x, rot_z) = match direction {
        AxisDirection::PosX => (0.0, -FRAC_PI_2),
        AxisDirection::PosY => (0.0, 0.0),
        AxisDirection::PosZ => (FRAC_PI_2, 0.0),
        AxisDirection::NegX => (0.0, FRAC_PI_2),
        AxisDirection::NegY => (0.0, PI),
        AxisDirection::NegZ => (-FRAC_PI_2, 0.0),
    };
    euler_xyz(rot_x, 0.0, rot_z)
}

impl Arrow {
    pub fn new(direction: AxisDirection) -> Self {
        Self {
            direction,
            ..Default::default()
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn end_base(mut self) -> Self {
        self.end_base = true;
        self
    }

    pub fn head_only(mut self) -> Self {
        self.not_line = true;
        self
    }

    pub fn build(&self) -> SceneNode {
        let move_base = if self.end_base { self.length } else { 0.0 };
        let head_half = self.scale * self.height_arrow / 2.0;

        let mut body = SceneNode::group().with_rotation(arrow_rotation(self.direction));

        body.push_primitive(Primitive::Cone(Cone {
            position: Vec3::new(0.0, self.length - move_base - head_half, 0.0),
            rotation: Quat::identity(),
            scale: self.scale,
            radius: self.radius_arrow,
            height: self.height_arrow,
            color: self.color,
        }));

        if !self.not_line {
            body.push_primitive(Primitive::Polyline(Polyline::new(
                vec![
                    Vec3::new(0.0, -move_base, 0.0),
                    Vec3::new(0.0, self.length - head_half - move_base, 0.0),
                ],
                self.color,
                self.line_weight * self.scale,
            )));
        }

        SceneNode::group().with_position(self.position).with_child(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const ALL: [AxisDirection; 6] = [
        AxisDirection::PosX,
        AxisDirection::PosY,
        AxisDirection::PosZ,
        AxisDirection::NegX,
        AxisDirection::NegY,
        AxisDirection::NegZ,
    ];

    #[test]
    fn test_rotation_maps_y_onto_direction() {
        for d in ALL {
            assert_relative_eq!(arrow_rotation(d) * Vec3::y(), d.vector(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_tip_at_length() {
        for d in ALL {
            let node = Arrow::new(d).with_length(2.0).with_scale(0.5).build();
            let tips = node.cone_tips();
            assert_eq!(tips.len(), 1);
            assert_relative_eq!(tips[0], d.vector() * 2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_end_base_tip_on_anchor() {
        let anchor = Vec3::new(1.0, 2.0, 3.0);
        for d in ALL {
            let node = Arrow::new(d)
                .at(anchor)
                .with_length(0.35)
                .with_scale(0.4)
                .end_base()
                .build();
            assert_relative_eq!(node.cone_tips()[0], anchor, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_head_only_has_no_shaft() {
        let node = Arrow::new(AxisDirection::PosZ).head_only().build();
        assert_eq!(node.count_primitives(|p| matches!(p, Primitive::Polyline(_))), 0);
        assert_eq!(node.count_primitives(|p| matches!(p, Primitive::Cone(_))), 1);
    }
}
