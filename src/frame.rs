//! Local reference frames for bar-attached glyphs
//!
//! A bar's local x axis runs from its start node to its end node. The local
//! y and z axes are derived from a reference "up" direction and then twisted
//! about x by the bar's section rotation.

use std::f64::consts::PI;

use nalgebra::{Rotation3, Unit};
use serde::{Deserialize, Serialize};

use crate::error::{ViewError, ViewResult};
use crate::math::{is_close, Mat3, Quat, Vec3};

/// World convention used to pick the reference up direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UpHint {
    #[default]
    ZUp,
    YUp,
}

/// Orthonormal frame attached to a direction
#[derive(Debug, Clone, PartialEq)]
pub struct LocalFrame {
    /// Unit direction
    pub x: Vec3,
    /// Untwisted y axis
    pub y: Vec3,
    /// Untwisted z axis
    pub z: Vec3,
    /// y axis after the twist about x
    pub twisted_y: Vec3,
    /// z axis after the twist about x
    pub twisted_z: Vec3,
    /// Total twist about x (radians), including any downward correction
    pub twist: f64,
}

impl LocalFrame {
    /// Untwisted basis as matrix columns `[x y z]`
    pub fn basis(&self) -> Mat3 {
        Mat3::from_columns(&[self.x, self.y, self.z])
    }

    /// Twisted basis as matrix columns `[x y' z']`
    pub fn twisted_basis(&self) -> Mat3 {
        Mat3::from_columns(&[self.x, self.twisted_y, self.twisted_z])
    }

    /// Rotation taking global axes onto the twisted frame
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_matrix(&Rotation3::from_matrix_unchecked(self.twisted_basis()))
    }

    /// Map a vector from frame coordinates to global coordinates
    pub fn to_global(&self, local: &Vec3) -> Vec3 {
        self.twisted_basis() * local
    }
}

fn is_straight_down(x: &Vec3) -> bool {
    *x == Vec3::new(0.0, 0.0, -1.0)
}

fn untwisted_axes(x: &Vec3, up: UpHint) -> (Vec3, Vec3) {
    match up {
        UpHint::ZUp => {
            let reference = if is_close(x.x, 0.0) && is_close(x.y, 0.0) {
                -Vec3::x()
            } else {
                Vec3::z()
            };
            let y = reference.cross(x).normalize();
            let z = x.cross(&y).normalize();
            (y, z)
        }
        UpHint::YUp => {
            let reference = if is_close(x.x, 0.0) && is_close(x.z, 0.0) {
                -Vec3::x()
            } else {
                Vec3::y()
            };
            let z = x.cross(&reference).normalize();
            let y = z.cross(x).normalize();
            (y, z)
        }
    }
}

fn frame(direction: &Vec3, twist: f64, up: UpHint, flip_downward: bool) -> ViewResult<LocalFrame> {
    let norm = direction.norm();
    if !norm.is_finite() || norm < f64::EPSILON {
        return Err(ViewError::InvalidGeometry(format!(
            "cannot build a frame on direction {:?}",
            direction.as_slice()
        )));
    }

    let x = direction / norm;
    let (y, z) = untwisted_axes(&x, up);

    let twist = if flip_downward && is_straight_down(&x) {
        twist + PI
    } else {
        twist
    };
    let q = Quat::from_axis_angle(&Unit::new_unchecked(x), twist);

    Ok(LocalFrame {
        x,
        y,
        z,
        twisted_y: q * y,
        twisted_z: q * z,
        twist,
    })
}

/// Frame on `direction`, twisted by `twist` radians about it.
///
/// A direction pointing exactly down the negative Z axis receives an extra
/// half turn so its y axis agrees with that of an upward bar.
pub fn build_frame(direction: &Vec3, twist: f64, up: UpHint) -> ViewResult<LocalFrame> {
    frame(direction, twist, up, true)
}

/// Like [`build_frame`] but without the half turn for downward directions
pub fn build_frame_unflipped(direction: &Vec3, twist: f64, up: UpHint) -> ViewResult<LocalFrame> {
    frame(direction, twist, up, false)
}

/// Orientation of a Z-up frame on `direction` with `twist` radians about it
pub fn compute_orientation(direction: &Vec3, twist: f64) -> ViewResult<Quat> {
    Ok(build_frame(direction, twist, UpHint::ZUp)?.rotation())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn assert_orthonormal(f: &LocalFrame) {
        for v in [f.x, f.twisted_y, f.twisted_z] {
            assert_relative_eq!(v.norm(), 1.0, epsilon = 1e-12);
        }
        assert_relative_eq!(f.x.dot(&f.twisted_y), 0.0, epsilon = 1e-12);
        assert_relative_eq!(f.x.dot(&f.twisted_z), 0.0, epsilon = 1e-12);
        assert_relative_eq!(f.twisted_y.dot(&f.twisted_z), 0.0, epsilon = 1e-12);
        assert_relative_eq!(f.x.cross(&f.twisted_y), f.twisted_z, epsilon = 1e-12);
    }

    #[test]
    fn test_horizontal_bar_frame() {
        let f = build_frame(&Vec3::new(5.0, 0.0, 0.0), 0.0, UpHint::ZUp).unwrap();
        assert_relative_eq!(f.x, Vec3::x());
        assert_relative_eq!(f.y, Vec3::y(), epsilon = 1e-12);
        assert_relative_eq!(f.z, Vec3::z(), epsilon = 1e-12);
    }

    #[test]
    fn test_frames_are_orthonormal() {
        let directions = [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(-3.0, 4.0, 2.0),
            Vec3::new(0.2, -0.1, -5.0),
        ];
        for d in directions {
            for twist in [0.0, 0.3, FRAC_PI_2, -2.0] {
                for up in [UpHint::ZUp, UpHint::YUp] {
                    assert_orthonormal(&build_frame(&d, twist, up).unwrap());
                }
            }
        }
    }

    #[test]
    fn test_twist_rotates_y_and_z() {
        let f = build_frame(&Vec3::x(), FRAC_PI_2, UpHint::ZUp).unwrap();
        assert_relative_eq!(f.twisted_y, Vec3::z(), epsilon = 1e-12);
        assert_relative_eq!(f.twisted_z, -Vec3::y(), epsilon = 1e-12);
    }

    #[test]
    fn test_downward_bar_gets_half_turn() {
        let up = build_frame(&Vec3::new(0.0, 0.0, 2.0), 0.0, UpHint::ZUp).unwrap();
        let down = build_frame(&Vec3::new(0.0, 0.0, -2.0), 0.0, UpHint::ZUp).unwrap();
        assert_relative_eq!(down.twist, PI);
        assert_relative_eq!(up.twisted_y, down.twisted_y, epsilon = 1e-12);

        let raw = build_frame_unflipped(&Vec3::new(0.0, 0.0, -2.0), 0.0, UpHint::ZUp).unwrap();
        assert_relative_eq!(raw.twist, 0.0);
        assert_relative_eq!(raw.twisted_y, -up.twisted_y, epsilon = 1e-12);
    }

    #[test]
    fn test_orientation_maps_axes() {
        let d = Vec3::new(1.0, 2.0, -0.5);
        let f = build_frame(&d, 0.7, UpHint::ZUp).unwrap();
        let q = compute_orientation(&d, 0.7).unwrap();
        assert_relative_eq!(q * Vec3::x(), f.x, epsilon = 1e-12);
        assert_relative_eq!(q * Vec3::y(), f.twisted_y, epsilon = 1e-12);
        assert_relative_eq!(q * Vec3::z(), f.twisted_z, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_direction_rejected() {
        assert!(build_frame(&Vec3::zeros(), 0.0, UpHint::ZUp).is_err());
    }
}
