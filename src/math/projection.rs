//! Projection of a bar onto its primary global axis
//!
//! Distributed-load diagrams sample the load along one global coordinate of
//! the bar (the *primary* axis) and recover the other two coordinates from
//! straight-line fits of the bar in the coordinate planes. The primary axis
//! is Z for vertical bars, Y for bars in a plane of constant X, and X
//! otherwise.

use serde::{Deserialize, Serialize};

use super::space2d::LinearFunction;
use super::{Mat3, Vec3};
use crate::error::ViewResult;

/// Global coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::x(),
            Axis::Y => Vec3::y(),
            Axis::Z => Vec3::z(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

/// Line fits of a bar against its primary axis
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionPlane {
    pub primary: Axis,
    /// The two remaining axes, in X-Y-Z order
    pub secondary: [Axis; 2],
    /// `secondary[i]` coordinate as a function of the primary coordinate
    pub fits: [LinearFunction; 2],
}

impl ProjectionPlane {
    /// Offset from the bar start of the bar point whose primary coordinate
    /// lies `s` past the start
    pub fn point_at(&self, s: f64) -> Vec3 {
        let mut p = Vec3::zeros();
        p[self.primary.index()] = s;
        for (axis, fit) in self.secondary.iter().zip(self.fits.iter()) {
            p[axis.index()] = fit.delta(s);
        }
        p
    }

    /// Primary coordinate, relative to the bar start, of the point at
    /// `position` along the bar (`rotation` is the bar's direction cosines)
    pub fn global_position(&self, rotation: &Mat3, position: f64) -> f64 {
        rotation[(0, self.primary.index())] * position
    }
}

/// Pick the primary axis of `p0 -> p1` and fit the secondary coordinates.
///
/// Axis-aligned ties are resolved by exact coordinate equality, so bars
/// whose endpoints share coordinates in the document are classified as
/// degenerate.
pub fn projection_plane_for(p0: &Vec3, p1: &Vec3) -> ViewResult<ProjectionPlane> {
    let (primary, secondary) = if p0.x == p1.x && p0.y == p1.y {
        (Axis::Z, [Axis::X, Axis::Y])
    } else if p0.x == p1.x {
        (Axis::Y, [Axis::X, Axis::Z])
    } else {
        (Axis::X, [Axis::Y, Axis::Z])
    };

    let fit = |axis: Axis| {
        LinearFunction::through(
            (p0[primary.index()], p0[axis.index()]),
            (p1[primary.index()], p1[axis.index()]),
        )
    };

    Ok(ProjectionPlane {
        primary,
        secondary,
        fits: [fit(secondary[0])?, fit(secondary[1])?],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::rotation_matrix;
    use approx::assert_relative_eq;

    #[test]
    fn test_primary_axis_selection() {
        let o = Vec3::zeros();
        let vertical = projection_plane_for(&o, &Vec3::new(0.0, 0.0, 4.0)).unwrap();
        assert_eq!(vertical.primary, Axis::Z);

        let yz = projection_plane_for(&o, &Vec3::new(0.0, 3.0, 4.0)).unwrap();
        assert_eq!(yz.primary, Axis::Y);

        let skew = projection_plane_for(&o, &Vec3::new(2.0, 3.0, 4.0)).unwrap();
        assert_eq!(skew.primary, Axis::X);
    }

    #[test]
    fn test_point_at_follows_bar() {
        let p0 = Vec3::new(1.0, 1.0, 0.0);
        let p1 = Vec3::new(3.0, 5.0, 2.0);
        let plane = projection_plane_for(&p0, &p1).unwrap();
        let r = rotation_matrix(&p0, &p1).unwrap();
        let length = (p1 - p0).norm();

        // Half-way along the bar
        let s = plane.global_position(&r, length / 2.0);
        assert_relative_eq!(p0 + plane.point_at(s), (p0 + p1) / 2.0, epsilon = 1e-12);
        assert_relative_eq!(p0 + plane.point_at(2.0), p1, epsilon = 1e-12);
    }

    #[test]
    fn test_vertical_bar_offsets() {
        let plane =
            projection_plane_for(&Vec3::new(2.0, 2.0, 0.0), &Vec3::new(2.0, 2.0, 3.0)).unwrap();
        assert_relative_eq!(plane.point_at(1.5), Vec3::new(0.0, 0.0, 1.5));
    }
}
