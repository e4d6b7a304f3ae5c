//! Camera-facing orientation of glyphs and labels
//!
//! Billboard nodes are re-oriented every frame from the camera pose by
//! [`update_billboards`]. Four behaviors are supported, see
//! [`Billboard`](crate::scene::Billboard).

use std::f64::consts::{FRAC_PI_2, PI};

use nalgebra::{Rotation3, Similarity3, Unit};
use serde::{Deserialize, Serialize};

use crate::math::{euler_xyz, Axis, Pt3, Quat, Vec3};
use crate::scene::{Billboard, Primitive, SceneNode, TextBox};

// ========================
// Camera
// ========================

/// Perspective camera looking down its local -Z axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    pub rotation: Quat,
    /// Vertical field of view in degrees
    pub fov_y: f64,
    /// Viewport width over height
    pub aspect: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Camera::look_at(Vec3::new(20.0, -20.0, 20.0), Vec3::zeros(), Vec3::z())
    }
}

impl Camera {
    /// Camera at `position` aimed at `target`, keeping `up` vertical on screen
    pub fn look_at(position: Vec3, target: Vec3, up: Vec3) -> Self {
        let back = {
            let d = position - target;
            if d.norm() < f64::EPSILON { Vec3::z() } else { d.normalize() }
        };
        let mut right = up.cross(&back);
        if right.norm() < 1e-9 {
            // up parallel to the view direction
            right = Vec3::x().cross(&back);
            if right.norm() < 1e-9 {
                right = Vec3::y().cross(&back);
            }
        }
        let right = right.normalize();
        let true_up = back.cross(&right);
        let basis = Rotation3::from_basis_unchecked(&[right, true_up, back]);

        Self {
            position,
            rotation: Quat::from_rotation_matrix(&basis),
            fov_y: 50.0,
            aspect: 1.0,
        }
    }

    pub fn with_aspect(mut self, aspect: f64) -> Self {
        self.aspect = aspect;
        self
    }

    /// Screen-up direction in world space
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::y()
    }

    /// Viewing direction in world space
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::z()
    }
}

// ========================
// Rotations
// ========================

/// Orthonormal pair spanning the plane perpendicular to `axis`
pub fn plane_basis(axis: &Vec3) -> (Vec3, Vec3) {
    let a = axis.normalize();
    let seed = if a.x.abs() < 0.9 { Vec3::x() } else { Vec3::y() };
    let u = a.cross(&seed).normalize();
    let v = a.cross(&u).normalize();
    (u, v)
}

/// Angle about `axis` that turns a glyph toward `dir` (same coordinates)
pub fn axis_billboard_angle(axis: &Vec3, dir: &Vec3) -> f64 {
    let (u, v) = plane_basis(axis);
    dir.dot(&v).atan2(dir.dot(&u))
}

/// Rotation about `axis` that turns a glyph toward `dir`
pub fn axis_billboard_rotation(axis: &Vec3, dir: &Vec3) -> Quat {
    if axis.norm() < f64::EPSILON {
        return Quat::identity();
    }
    let angle = axis_billboard_angle(axis, dir);
    Quat::from_axis_angle(&Unit::new_normalize(*axis), angle)
}

/// Rotation about one coordinate axis so the glyph faces along `dir`
pub fn single_axis_rotation(axis: Axis, dir: &Vec3) -> Quat {
    match axis {
        Axis::Y => euler_xyz(0.0, dir.x.atan2(dir.z), 0.0),
        Axis::X => euler_xyz(-dir.y.atan2(dir.z), 0.0, 0.0),
        Axis::Z => euler_xyz(0.0, 0.0, dir.y.atan2(dir.x)),
    }
}

/// Base orientation of text that runs along a coordinate axis
pub fn text_axis_base(axis: Axis) -> Quat {
    match axis {
        Axis::X => Quat::identity(),
        Axis::Y => euler_xyz(0.0, PI, FRAC_PI_2),
        Axis::Z => euler_xyz(FRAC_PI_2, PI, FRAC_PI_2),
    }
}

/// Half turns that keep text readable from the camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextFlip {
    /// Text up points away from screen up
    pub upside_down: bool,
    /// Text faces away from the camera
    pub mirrored: bool,
}

impl TextFlip {
    /// Evaluate for text whose frame has world `rotation` and `position`
    pub fn evaluate(rotation: &Quat, position: &Vec3, camera: &Camera) -> Self {
        let text_up = rotation * Vec3::y();
        let text_forward = rotation * Vec3::z();
        let to_camera = camera.position - position;

        Self {
            upside_down: text_up.dot(&camera.up()) < 0.0,
            mirrored: text_forward.dot(&to_camera) < 0.0,
        }
    }

    pub fn rotation(&self) -> Quat {
        euler_xyz(
            0.0,
            if self.mirrored { PI } else { 0.0 },
            if self.upside_down { PI } else { 0.0 },
        )
    }
}

// ========================
// Text measurement
// ========================

/// Measures laid-out text
pub trait TextMetrics {
    fn measure(&self, text: &str, font_size: f64) -> TextBox;
}

/// Fixed advance per character, single line
#[derive(Debug, Clone, Copy)]
pub struct MonospaceMetrics {
    /// Character advance as a fraction of the font size
    pub advance: f64,
    /// Line height as a fraction of the font size
    pub line_height: f64,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self {
            advance: 0.6,
            line_height: 1.2,
        }
    }
}

impl TextMetrics for MonospaceMetrics {
    fn measure(&self, text: &str, font_size: f64) -> TextBox {
        TextBox {
            width: text.chars().count() as f64 * self.advance * font_size,
            height: self.line_height * font_size,
        }
    }
}

// ========================
// Per-frame update
// ========================

/// Re-orient every billboard node of `root` for `camera`.
///
/// Returns the number of nodes updated.
pub fn update_billboards(root: &mut SceneNode, camera: &Camera, metrics: &dyn TextMetrics) -> usize {
    update_node(root, &Similarity3::identity(), camera, metrics)
}

fn update_node(
    node: &mut SceneNode,
    parent: &Similarity3<f64>,
    camera: &Camera,
    metrics: &dyn TextMetrics,
) -> usize {
    let mut updated = 0;

    if let Some(billboard) = node.billboard.clone() {
        let world_pos = parent.transform_point(&Pt3::from(node.transform.position)).coords;

        match billboard {
            Billboard::Axis { axis } => {
                let to_camera = camera.position - world_pos;
                if to_camera.norm() > f64::EPSILON {
                    let target = world_pos + to_camera.normalize();
                    let local = parent.inverse_transform_point(&Pt3::from(target)).coords;
                    let dir = local - node.transform.position;
                    if dir.norm() > f64::EPSILON {
                        node.transform.rotation = axis_billboard_rotation(&axis, &dir.normalize());
                    }
                }
            }
            Billboard::Full => {
                node.transform.rotation = parent.isometry.rotation.inverse() * camera.rotation;
            }
            Billboard::SingleAxis { axis } => {
                let dir = camera.position - world_pos;
                node.transform.rotation = single_axis_rotation(axis, &dir);
            }
            Billboard::TextFace => {
                let flip = TextFlip::evaluate(
                    &parent.isometry.rotation,
                    &parent.isometry.translation.vector,
                    camera,
                );
                node.transform.rotation = flip.rotation();

                for primitive in node.primitives.iter_mut() {
                    if let Primitive::Text(label) = primitive {
                        label.layout.advance();
                        let offset = label.anchor_position();
                        node.transform.position = Vec3::new(offset.x, offset.y, 0.0);
                        label.layout.sync(metrics.measure(&label.text, label.font_size));
                    }
                }
            }
        }
        updated += 1;
    }

    let world = parent * node.transform.to_similarity();
    for child in node.children.iter_mut() {
        updated += update_node(child, &world, camera, metrics);
    }
    updated
}
