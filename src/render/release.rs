//! Bar end-release glyphs
//!
//! Releases are drawn in the bar frame a short distance inside each end: a
//! pair of parallel strokes for a freed translation, a full circle for a
//! freed rotation.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::elements::{Bar, BarEnd, Release, ReleaseKind};
use crate::error::ViewResult;
use crate::frame::{build_frame_unflipped, UpHint};
use crate::glyphs::Arc;
use crate::math::{euler_xyz, Axis, Quat, Vec3};
use crate::scene::{Color, Polyline, Primitive, SceneNode};

const RELEASE_WIDTH: f64 = 0.01;

fn release_color(axis: Axis) -> Color {
    match axis {
        Axis::X => Color::RED,
        Axis::Y => Color::GREEN,
        Axis::Z => Color::BLUE,
    }
}

/// Two strokes parallel to the released axis
pub fn displacement_release(axis: Axis) -> SceneNode {
    let (length, offset) = (0.08, 0.02);
    let rotation = match axis {
        Axis::X => Quat::identity(),
        Axis::Y => euler_xyz(0.0, 0.0, FRAC_PI_2),
        Axis::Z => euler_xyz(FRAC_PI_2, 0.0, FRAC_PI_2),
    };
    let color = release_color(axis);
    let stroke = |z: f64| {
        Primitive::Polyline(Polyline::new(
            vec![Vec3::new(-length, 0.0, z), Vec3::new(length, 0.0, z)],
            color,
            RELEASE_WIDTH,
        ))
    };

    SceneNode::group()
        .with_rotation(rotation)
        .with_primitive(stroke(offset))
        .with_primitive(stroke(-offset))
}

/// Circle normal to the released axis
pub fn rotation_release(axis: Axis, radius: f64) -> SceneNode {
    let rotation = match axis {
        Axis::X => euler_xyz(0.0, FRAC_PI_2, FRAC_PI_2),
        Axis::Y => euler_xyz(FRAC_PI_2, 0.0, FRAC_PI_2),
        Axis::Z => Quat::identity(),
    };
    Arc::new(radius, TAU)
        .with_color(release_color(axis))
        .with_line_width(RELEASE_WIDTH)
        .build()
        .with_rotation(rotation)
}

fn release_glyph(release: Release, radius: f64) -> SceneNode {
    match release.kind() {
        ReleaseKind::Displacement => displacement_release(release.axis()),
        ReleaseKind::Rotation => rotation_release(release.axis(), radius),
    }
}

/// All releases of a bar, placed in the bar frame at the start node. This
/// frame skips the half turn given to downward bars.
pub fn bar_releases(bar: &Bar, p0: &Vec3, p1: &Vec3, radius: f64) -> ViewResult<SceneNode> {
    let direction = p1 - p0;
    let frame = build_frame_unflipped(&direction, bar.twist(), UpHint::ZUp)?;
    let length = direction.norm();

    let mut node = SceneNode::group()
        .with_position(*p0)
        .with_rotation(frame.rotation());
    for (end, x) in [(BarEnd::Start, radius), (BarEnd::End, length - radius)] {
        let mut group = SceneNode::group().with_position(Vec3::new(x, 0.0, 0.0));
        for release in bar.releases_at(end) {
            group.push_child(release_glyph(release, radius));
        }
        if !group.children.is_empty() {
            node.push_child(group);
        }
    }
    Ok(node)
}
