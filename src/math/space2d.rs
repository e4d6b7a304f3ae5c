//! Straight lines in the plane: fitting and root finding
//!
//! The distributed-load diagrams fit a line through two `(position, value)`
//! pairs and look for its zero crossing. Degenerate fits are reported as
//! errors instead of producing infinities.

use crate::error::{ViewError, ViewResult};

/// A point `(x, y)` in the plane
pub type Point2 = (f64, f64);

/// Line `y = a * x + b`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFunction {
    /// Slope
    pub a: f64,
    /// Intercept
    pub b: f64,
}

impl LinearFunction {
    /// Fit the line through two points
    pub fn through(p1: Point2, p2: Point2) -> ViewResult<Self> {
        let (x1, y1) = p1;
        let (x2, y2) = p2;

        if x1 == x2 {
            return Err(ViewError::VerticalLine);
        }

        let a = (y2 - y1) / (x2 - x1);
        let b = y1 - a * x1;
        Ok(Self { a, b })
    }

    /// Evaluate at `x`
    pub fn eval(&self, x: f64) -> f64 {
        self.a * x + self.b
    }

    /// Value relative to the intercept, i.e. `eval(x) - b`
    pub fn delta(&self, x: f64) -> f64 {
        self.eval(x) - self.b
    }
}

/// Build `y = f(x)` for the line through two points
pub fn create_linear_function(p1: Point2, p2: Point2) -> ViewResult<impl Fn(f64) -> f64> {
    let line = LinearFunction::through(p1, p2)?;
    Ok(move |x: f64| line.eval(x))
}

/// Slope and intercept of the line through two points
pub fn parameters_of_linear_function(p1: Point2, p2: Point2) -> ViewResult<LinearFunction> {
    LinearFunction::through(p1, p2)
}

/// The `x` where the line through two points crosses `y = 0`
pub fn root_linear(p1: Point2, p2: Point2) -> ViewResult<f64> {
    let (x1, y1) = p1;
    let (x2, y2) = p2;

    if x1 == x2 {
        return Err(ViewError::NoFiniteRoot);
    }

    if y1 == y2 {
        return if y1 == 0.0 {
            Err(ViewError::InfiniteRoots)
        } else {
            Err(ViewError::NoRoot)
        };
    }

    let m = (y2 - y1) / (x2 - x1);
    let c = y1 - m * x1;
    Ok(-c / m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_function_through_points() {
        let f = create_linear_function((0.0, 1.0), (2.0, 5.0)).unwrap();
        assert_relative_eq!(f(1.0), 3.0);
        assert_relative_eq!(f(-1.0), -1.0);

        let p = parameters_of_linear_function((0.0, 1.0), (2.0, 5.0)).unwrap();
        assert_relative_eq!(p.a, 2.0);
        assert_relative_eq!(p.b, 1.0);
        assert_relative_eq!(p.delta(3.0), 6.0);
    }

    #[test]
    fn test_vertical_line_rejected() {
        assert!(matches!(
            create_linear_function((1.0, 0.0), (1.0, 4.0)),
            Err(ViewError::VerticalLine)
        ));
        assert!(matches!(
            parameters_of_linear_function((1.0, 0.0), (1.0, 4.0)),
            Err(ViewError::VerticalLine)
        ));
    }

    #[test]
    fn test_root_between_opposite_signs() {
        let cases = [
            ((0.0, 2.0), (5.0, -3.0)),
            ((1.0, -0.5), (4.0, 7.0)),
            ((3.0, 10.0), (-2.0, -1.0)),
        ];
        for (p1, p2) in cases {
            let root = root_linear(p1, p2).unwrap();
            let f = LinearFunction::through(p1, p2).unwrap();
            assert_relative_eq!(f.eval(root), 0.0, epsilon = 1e-12);
            let (lo, hi) = if p1.0 < p2.0 { (p1.0, p2.0) } else { (p2.0, p1.0) };
            assert!(lo < root && root < hi);
        }
    }

    #[test]
    fn test_root_degenerate_cases() {
        assert!(matches!(root_linear((1.0, 1.0), (1.0, 2.0)), Err(ViewError::NoFiniteRoot)));
        assert!(matches!(root_linear((0.0, 0.0), (1.0, 0.0)), Err(ViewError::InfiniteRoots)));
        assert!(matches!(root_linear((0.0, 2.0), (1.0, 2.0)), Err(ViewError::NoRoot)));
    }
}
