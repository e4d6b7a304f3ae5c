//! Circular arc polyline in the local XY plane

use crate::math::{lin_space, Vec3};
use crate::scene::{Color, Polyline, Primitive, SceneNode};

/// Default number of points sampled along an arc
pub const ARC_SEGMENTS: usize = 64;

#[derive(Debug, Clone)]
pub struct Arc {
    pub radius: f64,
    /// Swept angle in radians, starting on +X
    pub angle: f64,
    pub color: Color,
    pub line_width: f64,
    pub segments: usize,
}

impl Default for Arc {
    fn default() -> Self {
        Self {
            radius: 1.0,
            angle: std::f64::consts::TAU,
            color: Color::WHITE,
            line_width: 0.01,
            segments: ARC_SEGMENTS,
        }
    }
}

impl Arc {
    pub fn new(radius: f64, angle: f64) -> Self {
        Self {
            radius,
            angle,
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }

    pub fn with_segments(mut self, segments: usize) -> Self {
        self.segments = segments;
        self
    }

    pub fn points(&self) -> Vec<Vec3> {
        lin_space(0.0, self.angle, self.segments)
            .into_iter()
            .map(|t| Vec3::new(self.radius * t.cos(), self.radius * t.sin(), 0.0))
            .collect()
    }

    pub fn polyline(&self) -> Polyline {
        Polyline::new(self.points(), self.color, self.line_width)
    }

    pub fn build(&self) -> SceneNode {
        SceneNode::group().with_primitive(Primitive::Polyline(self.polyline()))
    }
}
