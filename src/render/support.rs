//! Support condition glyphs
//!
//! A support is drawn at its node as one of:
//!
//! - a hatched ground line when all six DOFs are rigidly fixed
//! - a hatched triangle when all three translations are fixed
//! - per-DOF glyphs otherwise: a triangle (fixed translation), a square
//!   plate (fixed rotation), a zig-zag spring or a spiral spring, each
//!   colored by its axis
//!
//! Spring glyphs carry their stiffness as a label.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::elements::{Dof, Support, SupportDof};
use crate::error::{ViewError, ViewResult};
use crate::glyphs::ScreenLabel;
use crate::math::{euler_xyz, lin_space, Axis, Quat, Vec3};
use crate::model::Structure;
use crate::scene::{AnchorX, AnchorY, Billboard, Color, EntityRef, Polyline, Primitive, SceneNode};

use super::number_text;

const LINE_WIDTH: f64 = 0.02;
const SUPPORT_COLOR: Color = Color::MAGENTA;

/// Triangle side length
const TRIANGLE_SIZE: f64 = 0.2;

fn line(points: Vec<Vec3>, color: Color) -> Primitive {
    Primitive::Polyline(Polyline::new(points, color, LINE_WIDTH))
}

fn axis_color(axis: Axis) -> Color {
    match axis {
        Axis::X => Color::RED,
        Axis::Y => Color::GREEN,
        Axis::Z => Color::BLUE,
    }
}

/// Height of the equilateral support triangle
fn triangle_height() -> f64 {
    TRIANGLE_SIZE * 3f64.sqrt() / 2.0
}

/// Closed equilateral triangle centered on its centroid, apex up
fn triangle() -> Vec<Vec3> {
    let half = TRIANGLE_SIZE / 2.0;
    let h = triangle_height();
    vec![
        Vec3::new(-half, -h / 3.0, 0.0),
        Vec3::new(half, -h / 3.0, 0.0),
        Vec3::new(0.0, 2.0 * h / 3.0, 0.0),
        Vec3::new(-half, -h / 3.0, 0.0),
    ]
}

/// Orientation putting a translational glyph along its axis
fn displacement_rotation(axis: Axis) -> Quat {
    match axis {
        Axis::X => euler_xyz(0.0, 0.0, PI),
        Axis::Y => euler_xyz(0.0, FRAC_PI_2, -FRAC_PI_2),
        Axis::Z => euler_xyz(FRAC_PI_2, 0.0, -FRAC_PI_2),
    }
}

/// Orientation putting a rotational glyph along its axis
fn rotation_rotation(axis: Axis) -> Quat {
    match axis {
        Axis::X => Quat::identity(),
        Axis::Y => euler_xyz(0.0, 0.0, FRAC_PI_2),
        Axis::Z => euler_xyz(0.0, -FRAC_PI_2, 0.0),
    }
}

// ========================
// Rigid glyphs
// ========================

/// All six DOFs fixed: ground line with five hatch strokes
pub fn fixed_all() -> SceneNode {
    let half = 0.2;
    let count = 5;
    let offset = half / (count - 1) as f64 * 2.0;

    let mut node = SceneNode::group()
        .with_billboard(Billboard::Full)
        .with_primitive(line(
            vec![Vec3::new(-half, 0.0, 0.0), Vec3::new(half, 0.0, 0.0)],
            SUPPORT_COLOR,
        ));
    for i in 0..count {
        let x = -half + i as f64 * offset;
        node.push_primitive(line(
            vec![Vec3::new(x, 0.0, 0.0), Vec3::new(x - 0.1, -0.15, 0.0)],
            SUPPORT_COLOR,
        ));
    }
    node
}

/// All translations fixed: hatched triangle whose apex sits on the node
pub fn fixed_all_displacement() -> SceneNode {
    let half = TRIANGLE_SIZE / 2.0;
    let h = triangle_height();
    let base = TRIANGLE_SIZE * 0.3;
    let line_size = (TRIANGLE_SIZE + base) / 2.0;
    let count = 5;
    let offset = line_size / (count - 1) as f64 * 2.0;

    let mut inner = SceneNode::group()
        .with_position(Vec3::new(0.0, -(h / 3.0) * 2.0, 0.0))
        .with_primitive(line(triangle(), SUPPORT_COLOR))
        .with_primitive(line(
            vec![
                Vec3::new(-half - base / 2.0, -h / 3.0, 0.0),
                Vec3::new(half + base / 2.0, -h / 3.0, 0.0),
            ],
            SUPPORT_COLOR,
        ));
    for i in 0..count {
        let x = -line_size + i as f64 * offset;
        inner.push_primitive(line(
            vec![
                Vec3::new(x, -(h + 0.005) / 3.0, 0.0),
                Vec3::new(x - 0.05, -0.05 - h / 2.0, 0.0),
            ],
            SUPPORT_COLOR,
        ));
    }

    SceneNode::group()
        .with_billboard(Billboard::Full)
        .with_child(inner)
}

/// One fixed translation: triangle with a base line, pointing at the node
/// along the negative axis
pub fn fixed_displacement(axis: Axis) -> SceneNode {
    let half = TRIANGLE_SIZE / 2.0;
    let h = triangle_height();
    let base = TRIANGLE_SIZE * 0.3;
    let color = axis_color(axis);

    let inner = SceneNode::group()
        .with_position(Vec3::new((h / 3.0) * 2.0, 0.0, 0.0))
        .with_rotation(euler_xyz(0.0, 0.0, FRAC_PI_2))
        .with_primitive(line(triangle(), color))
        .with_primitive(line(
            vec![
                Vec3::new(-half - base / 2.0, -h / 3.0 - 0.04, 0.0),
                Vec3::new(half + base / 2.0, -h / 3.0 - 0.04, 0.0),
            ],
            color,
        ));

    SceneNode::group()
        .with_rotation(displacement_rotation(axis))
        .with_child(inner)
}

/// One fixed rotation: a stem ending in a square plate normal to the axis
pub fn fixed_rotation(axis: Axis) -> SceneNode {
    let stem = 0.15;
    let s = 0.1;
    let color = axis_color(axis);
    let square = [(s, s), (-s, s), (-s, -s), (s, -s), (s, s)]
        .into_iter()
        .map(|(y, z)| Vec3::new(stem, y, z))
        .collect();

    SceneNode::group()
        .with_rotation(rotation_rotation(axis))
        .with_primitive(line(vec![Vec3::zeros(), Vec3::new(stem, 0.0, 0.0)], color))
        .with_primitive(line(square, color))
}

// ========================
// Springs
// ========================

fn stiffness_label(stiffness: f64, position: Vec3, anchor: AnchorX) -> SceneNode {
    ScreenLabel::new(number_text(stiffness), 0.1, Color::WHITE)
        .at(position)
        .with_anchor(anchor, AnchorY::Middle)
        .build()
}

/// Elastic translation: zig-zag spring along the axis, labelled with its
/// stiffness
pub fn spring_displacement(axis: Axis, stiffness: f64) -> SceneNode {
    let s = 0.05;
    let points = [
        (0.0, 0.0),
        (s, s),
        (2.0 * s, -s),
        (3.0 * s, s),
        (4.0 * s, -s),
        (5.0 * s, 0.0),
        (5.0 * s, 2.0 * s),
        (5.0 * s, -2.0 * s),
    ]
    .into_iter()
    .map(|(x, y)| Vec3::new(x, y, 0.0))
    .collect();
    let anchor = match axis {
        Axis::Y => AnchorX::Left,
        Axis::X | Axis::Z => AnchorX::Right,
    };

    SceneNode::group()
        .with_rotation(displacement_rotation(axis))
        .with_primitive(line(points, axis_color(axis)))
        .with_child(stiffness_label(stiffness, Vec3::new(0.4, 0.0, 0.0), anchor))
}

/// Points of a flat spiral of `laps` turns growing to `radius`, in the
/// plane x = `x`
pub fn spiral(x: f64, radius: f64, laps: f64, count: usize) -> Vec<Vec3> {
    let angles = lin_space(0.0, laps * TAU, count);
    let radii = lin_space(0.0001, radius, count);
    angles
        .into_iter()
        .zip(radii)
        .map(|(t, r)| Vec3::new(x, r * t.cos(), r * t.sin()))
        .collect()
}

/// Elastic rotation: stem ending in a spiral about the axis, labelled with
/// its stiffness
pub fn spring_rotation(axis: Axis, stiffness: f64) -> SceneNode {
    let stem = 0.15;
    let color = axis_color(axis);

    SceneNode::group()
        .with_rotation(rotation_rotation(axis))
        .with_primitive(line(vec![Vec3::zeros(), Vec3::new(stem, 0.0, 0.0)], color))
        .with_primitive(line(spiral(stem, 0.15, 3.0, 100), color))
        .with_child(stiffness_label(stiffness, Vec3::new(0.25, 0.0, 0.0), AnchorX::Left))
}

// ========================
// Composition
// ========================

/// Glyph for a single restrained DOF, `None` when the DOF is free
pub fn dof_glyph(dof: Dof, value: SupportDof) -> Option<SceneNode> {
    let axis = dof.axis();
    match (value, dof.is_rotation()) {
        (SupportDof::Free, _) => None,
        (SupportDof::Fixed, false) => Some(fixed_displacement(axis)),
        (SupportDof::Fixed, true) => Some(fixed_rotation(axis)),
        (SupportDof::Spring(k), false) => Some(spring_displacement(axis, k)),
        (SupportDof::Spring(k), true) => Some(spring_rotation(axis, k)),
    }
}

/// Build the `support-<node>` group at the supported node
pub fn render_support(support: &Support, structure: &Structure) -> ViewResult<SceneNode> {
    let node = structure
        .node(&support.node)
        .ok_or_else(|| ViewError::SupportNodeNotFound(support.node.clone()))?;

    let mut group = SceneNode::named(format!("support-{}", support.node))
        .with_entity(EntityRef::support(&support.node))
        .with_position(node.coords());

    if support.is_fully_fixed() {
        group.push_child(fixed_all());
        return Ok(group);
    }

    let grouped_translations = support.has_all_displacements_fixed();
    if grouped_translations {
        group.push_child(fixed_all_displacement());
    }
    for (dof, value) in support.supports.iter() {
        if grouped_translations && !dof.is_rotation() {
            continue;
        }
        if let Some(glyph) = dof_glyph(dof, value) {
            group.push_child(glyph);
        }
    }
    Ok(group)
}
