//! Dense matrix helpers and the bar direction-cosine matrix

use super::{Mat, Mat3, Vec3};
use crate::error::{ViewError, ViewResult};

/// Matrix product `a * b`, checking inner dimensions
pub fn multiply(a: &Mat, b: &Mat) -> ViewResult<Mat> {
    if a.ncols() != b.nrows() {
        return Err(ViewError::DimensionMismatch(format!(
            "cannot multiply {}x{} by {}x{}",
            a.nrows(),
            a.ncols(),
            b.nrows(),
            b.ncols()
        )));
    }
    Ok(a * b)
}

/// Transpose
pub fn trans(m: &Mat) -> Mat {
    m.transpose()
}

/// Direction-cosine matrix of the bar `p0 -> p1`.
///
/// Row 0 is the unit bar direction. Row 2 is perpendicular to the bar and
/// to an auxiliary vector (global Z, or ±X for vertical bars). Row 1
/// completes the right-handed triad.
pub fn rotation_matrix(p0: &Vec3, p1: &Vec3) -> ViewResult<Mat3> {
    let d = p1 - p0;
    let length = d.norm();
    if length < f64::EPSILON {
        return Err(ViewError::InvalidGeometry(
            "bar endpoints coincide".to_string(),
        ));
    }

    let r0 = d / length;
    let aux = if d.x != 0.0 || d.y != 0.0 {
        Vec3::z()
    } else if d.z > 0.0 {
        -Vec3::x()
    } else {
        Vec3::x()
    };
    let r2 = r0.cross(&aux).normalize();
    let r1 = Vec3::new(
        r0.z * r2.y - r0.y * r2.z,
        r0.x * r2.z - r0.z * r2.x,
        r0.y * r2.x - r0.x * r2.y,
    );

    #[rustfmt::skip]
    let m = Mat3::new(
        r0.x, r0.y, r0.z,
        r1.x, r1.y, r1.z,
        r2.x, r2.y, r2.z,
    );
    Ok(m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_multiply_and_transpose() {
        let a = Mat::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let b = trans(&a);
        assert_eq!(b.shape(), (3, 2));

        let c = multiply(&a, &b).unwrap();
        assert_relative_eq!(c[(0, 0)], 14.0);
        assert_relative_eq!(c[(0, 1)], 32.0);
        assert_relative_eq!(c[(1, 1)], 77.0);

        assert!(matches!(multiply(&a, &a), Err(ViewError::DimensionMismatch(_))));
    }

    #[test]
    fn test_rotation_matrix_horizontal_bar() {
        let r = rotation_matrix(&Vec3::zeros(), &Vec3::new(5.0, 0.0, 0.0)).unwrap();
        assert_relative_eq!(r.row(0).transpose(), Vec3::x(), epsilon = 1e-12);
        assert_relative_eq!(r.row(1).transpose(), Vec3::z(), epsilon = 1e-12);
        assert_relative_eq!(r.row(2).transpose(), -Vec3::y(), epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_matrix_is_orthonormal() {
        let cases = [
            (Vec3::zeros(), Vec3::new(0.0, 0.0, 3.0)),
            (Vec3::zeros(), Vec3::new(0.0, 0.0, -3.0)),
            (Vec3::new(1.0, 2.0, 3.0), Vec3::new(-2.0, 5.0, 4.0)),
        ];
        for (p0, p1) in cases {
            let r = rotation_matrix(&p0, &p1).unwrap();
            assert_relative_eq!(r * r.transpose(), Mat3::identity(), epsilon = 1e-12);
            assert_relative_eq!(r.determinant(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_rotation_matrix_zero_length() {
        let p = Vec3::new(1.0, 1.0, 1.0);
        assert!(rotation_matrix(&p, &p).is_err());
    }
}
