//! Flat line-drawn arrows that spin about their own axis to face the camera

use std::f64::consts::{FRAC_PI_2, PI};

use super::Arc;
use crate::math::{euler_xyz, rotation_between, Quat, Vec3};
use crate::scene::{Billboard, Color, Polyline, Primitive, SceneNode};

/// Chevron head points with the apex at `apex_x` on the local X axis
fn chevron(apex_x: f64, size: f64) -> Vec<Vec3> {
    vec![
        Vec3::new(apex_x, 0.0, 0.0),
        Vec3::new(apex_x - size, size * 0.4, 0.0),
        Vec3::new(apex_x, 0.0, 0.0),
        Vec3::new(apex_x - size, -size * 0.4, 0.0),
    ]
}

// ========================
// LineArrow
// ========================

#[derive(Debug, Clone)]
pub struct LineArrow {
    pub position: Vec3,
    pub direction: Vec3,
    pub length: f64,
    pub arrow_size: f64,
    pub color: Color,
    pub line_width: f64,
    pub end_base: bool,
    pub not_line: bool,
}

impl Default for LineArrow {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            direction: Vec3::x(),
            length: 1.0,
            arrow_size: 0.25,
            color: Color::WHITE,
            line_width: 2.0,
            end_base: false,
            not_line: false,
        }
    }
}

impl LineArrow {
    pub fn new(direction: Vec3) -> Self {
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

    pub fn with_arrow_size(mut self, size: f64) -> Self {
        self.arrow_size = size;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }

    pub fn end_base(mut self) -> Self {
        self.end_base = true;
        self
    }

    pub fn build(&self) -> SceneNode {
        let dir = self.direction.normalize();
        let orient = rotation_between(&Vec3::x(), &dir);
        // Shifted back so the apex lands on the billboard origin
        let offset = if self.end_base { -dir * self.length } else { Vec3::zeros() };

        let line = |points: Vec<Vec3>| {
            SceneNode::group()
                .with_position(offset)
                .with_rotation(orient)
                .with_primitive(Primitive::Polyline(Polyline::new(
                    points,
                    self.color,
                    self.line_width,
                )))
        };

        let vertical = self.direction.x == 0.0 && self.direction.y == 0.0;
        let mut spin = SceneNode::group()
            .with_rotation(euler_xyz(0.0, 0.0, if vertical { FRAC_PI_2 } else { 0.0 }));
        if !self.not_line {
            spin.push_child(line(vec![Vec3::zeros(), Vec3::new(self.length, 0.0, 0.0)]));
        }
        spin.push_child(line(chevron(self.length, self.arrow_size)));

        SceneNode::group()
            .with_position(self.position)
            .with_billboard(Billboard::Axis { axis: self.direction })
            .with_child(spin)
    }
}

// ========================
// LineCurvedArrow
// ========================

#[derive(Debug, Clone)]
pub struct LineCurvedArrow {
    pub position: Vec3,
    /// Extra rotation applied around the whole glyph
    pub rotation: Quat,
    pub direction: Vec3,
    pub arrow_size: f64,
    pub radius: f64,
    pub scale: f64,
    pub color: Color,
    pub line_width: f64,
}

impl Default for LineCurvedArrow {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            direction: Vec3::x(),
            arrow_size: 0.25,
            radius: 1.0,
            scale: 1.0,
            color: Color::WHITE,
            line_width: 0.015,
        }
    }
}

impl LineCurvedArrow {
    pub fn new(direction: Vec3) -> Self {
        Self {
            direction,
            ..Default::default()
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_arrow_size(mut self, size: f64) -> Self {
        self.arrow_size = size;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn build(&self) -> SceneNode {
        let width = self.line_width * self.scale;
        let orient = rotation_between(&Vec3::x(), &self.direction.normalize());

        let arc = Arc::new(self.radius, PI)
            .with_color(self.color)
            .with_line_width(width)
            .build()
            .with_rotation(euler_xyz(0.0, FRAC_PI_2, FRAC_PI_2));

        let head = SceneNode::group()
            .with_position(Vec3::new(0.0, -self.radius, 0.0))
            .with_rotation(euler_xyz(0.0, FRAC_PI_2, 0.0))
            .with_child(
                SceneNode::group()
                    .with_billboard(Billboard::Axis { axis: Vec3::x() })
                    .with_primitive(Primitive::Polyline(Polyline::new(
                        chevron(0.0, self.arrow_size),
                        self.color,
                        width,
                    ))),
            );

        SceneNode::group()
            .with_position(self.position)
            .with_rotation(self.rotation)
            .with_child(
                SceneNode::group()
                    .with_rotation(orient)
                    .with_child(arc)
                    .with_child(head),
            )
    }
}
