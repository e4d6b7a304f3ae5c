//! Half-circle arrow with a cone head, used for moments

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use super::{Arc, AxisDirection};
use crate::math::{euler_xyz, Quat, Vec3};
use crate::scene::{Color, Cone, Primitive, SceneNode};

#[derive(Debug, Clone)]
pub struct CurvedArrow {
    pub direction: AxisDirection,
    pub position: Vec3,
    pub radius: f64,
    pub color: Color,
    pub scale: f64,
    pub height_arrow: f64,
    pub radius_arrow: f64,
    pub line_weight: f64,
}

impl Default for CurvedArrow {
    fn default() -> Self {
        Self {
            direction: AxisDirection::PosX,
            position: Vec3::zeros(),
            radius: 1.0,
            color: Color::WHITE,
            scale: 1.0,
            height_arrow: 0.4,
            radius_arrow: 0.12,
            line_weight: 0.08,
        }
    }
}

/// `(inner rotation, outer z rotation)` placing the arc around `direction`
fn orientation(direction: AxisDirection) -> (Quat, f64) {
    let q = 3.0 * FRAC_PI_4;
    match direction {
        AxisDirection::PosX => (euler_xyz(-FRAC_PI_4, 0.0, 0.0), 0.0),
        AxisDirection::NegX => (euler_xyz(-FRAC_PI_4, 0.0, PI), 0.0),
        AxisDirection::PosY => (euler_xyz(0.0, q, FRAC_PI_2), 0.0),
        AxisDirection::NegY => (euler_xyz(0.0, q, -FRAC_PI_2), 0.0),
        AxisDirection::PosZ => (euler_xyz(0.0, -FRAC_PI_2, 0.0), FRAC_PI_4),
        AxisDirection::NegZ => (euler_xyz(0.0, FRAC_PI_2, 0.0), -q),
    }
}

impl CurvedArrow {
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

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
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

    pub fn build(&self) -> SceneNode {
        let (inner, end_z) = orientation(self.direction);

        let arc = Arc::new(self.radius, PI)
            .with_color(self.color)
            .with_line_width(self.line_weight * self.scale)
            .build()
            .with_rotation(euler_xyz(0.0, FRAC_PI_2, FRAC_PI_2));

        let body = SceneNode::group()
            .with_rotation(inner)
            .with_primitive(Primitive::Cone(Cone {
                position: Vec3::new(0.0, -self.radius, -self.scale * self.height_arrow / 2.0),
                rotation: euler_xyz(-FRAC_PI_2, 0.0, 0.0),
                scale: self.scale,
                radius: self.radius_arrow,
                height: self.height_arrow,
                color: self.color,
            }))
            .with_child(arc);

        SceneNode::group().with_position(self.position).with_child(
            SceneNode::group()
                .with_rotation(euler_xyz(0.0, 0.0, end_z))
                .with_child(body),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn test_head_starts_at_arc_end() {
        let arrow = CurvedArrow::new(AxisDirection::PosZ).with_radius(0.4).with_scale(0.35);
        let node = arrow.build();
        let body = node.get(&[0, 0]).unwrap();

        let Primitive::Cone(cone) = &body.primitives[0] else {
            panic!("expected cone");
        };
        assert_relative_eq!(cone.base(), Vec3::new(0.0, -0.4, 0.0), epsilon = 1e-12);

        let arc = &body.children[0];
        let Primitive::Polyline(line) = &arc.primitives[0] else {
            panic!("expected arc");
        };
        let end = arc.transform.to_similarity() * Point3::from(*line.points.last().unwrap());
        assert_relative_eq!(end.coords, cone.base(), epsilon = 1e-12);
    }

    #[test]
    fn test_every_direction_builds_one_head() {
        for d in [
            AxisDirection::PosX,
            AxisDirection::NegX,
            AxisDirection::PosY,
            AxisDirection::NegY,
            AxisDirection::PosZ,
            AxisDirection::NegZ,
        ] {
            let node = CurvedArrow::new(d).build();
            assert_eq!(node.count_primitives(|p| matches!(p, Primitive::Cone(_))), 1);
            assert_eq!(node.count_primitives(|p| matches!(p, Primitive::Polyline(_))), 1);
        }
    }
}
