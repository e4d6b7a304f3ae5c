//! Mathematical utilities for glyph construction

pub mod matrix;
pub mod numeric;
pub mod projection;
pub mod space2d;

use nalgebra::{DMatrix, Matrix3, Point3, UnitQuaternion, Vector2, Vector3};

pub use matrix::{multiply, rotation_matrix, trans};
pub use numeric::{is_close, is_close_with, lin_space, opposite_signs, Sign};
pub use projection::{projection_plane_for, Axis, ProjectionPlane};
pub use space2d::{
    create_linear_function, parameters_of_linear_function, root_linear, LinearFunction,
};

pub type Mat = DMatrix<f64>;
pub type Mat3 = Matrix3<f64>;
pub type Vec2 = Vector2<f64>;
pub type Vec3 = Vector3<f64>;
pub type Pt3 = Point3<f64>;
pub type Quat = UnitQuaternion<f64>;

/// Rotation from intrinsic X-Y-Z Euler angles (radians).
///
/// Matches the `XYZ` order used by most scene graphs: the resulting
/// matrix is `Rx * Ry * Rz`.
pub fn euler_xyz(x: f64, y: f64, z: f64) -> Quat {
    Quat::from_axis_angle(&Vector3::x_axis(), x)
        * Quat::from_axis_angle(&Vector3::y_axis(), y)
        * Quat::from_axis_angle(&Vector3::z_axis(), z)
}

/// Shortest rotation taking `from` onto `to` (both normalized internally).
///
/// Antiparallel inputs have no unique answer; a half turn about an axis
/// orthogonal to `from` is returned.
pub fn rotation_between(from: &Vec3, to: &Vec3) -> Quat {
    match Quat::rotation_between(from, to) {
        Some(q) => q,
        None => {
            let f = from.normalize();
            let axis = if f.x.abs() > f.z.abs() {
                Vec3::new(-f.y, f.x, 0.0)
            } else {
                Vec3::new(0.0, -f.z, f.y)
            };
            Quat::from_axis_angle(&nalgebra::Unit::new_normalize(axis), std::f64::consts::PI)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_euler_xyz_order() {
        // Rz first, then Ry, then Rx on the column vector
        let q = euler_xyz(FRAC_PI_2, 0.0, FRAC_PI_2);
        let v = q * Vec3::x();
        // Rz(90) maps X -> Y, Rx(90) maps Y -> Z
        assert_relative_eq!(v, Vec3::z(), epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_between_antiparallel() {
        let q = rotation_between(&Vec3::x(), &(-Vec3::x()));
        assert_relative_eq!(q * Vec3::x(), -Vec3::x(), epsilon = 1e-12);
    }
}
