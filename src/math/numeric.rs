//! Scalar helpers: sequences, tolerant comparison and sign classification

/// Default relative and absolute tolerance for [`is_close`]
pub const TOLERANCE: f64 = 1e-9;

/// `quantity` evenly spaced values from `start` to `end` inclusive
pub fn lin_space(start: f64, end: f64, quantity: usize) -> Vec<f64> {
    match quantity {
        0 => Vec::new(),
        1 => vec![start],
        n => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Approximate equality with the default tolerances
pub fn is_close(a: f64, b: f64) -> bool {
    is_close_with(a, b, TOLERANCE, TOLERANCE)
}

/// Approximate equality: `|a - b| <= max(rel * max(|a|, |b|), abs)`
pub fn is_close_with(a: f64, b: f64, rel_tol: f64, abs_tol: f64) -> bool {
    (a - b).abs() <= (rel_tol * a.abs().max(b.abs())).max(abs_tol)
}

/// Sign of a magnitude, with values close to zero classified as zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Positive,
    Negative,
    Zero,
}

impl Sign {
    pub fn of(value: f64) -> Self {
        if is_close(value, 0.0) {
            Sign::Zero
        } else if value < 0.0 {
            Sign::Negative
        } else {
            Sign::Positive
        }
    }

    pub fn is_zero(self) -> bool {
        self == Sign::Zero
    }
}

/// True when one value is strictly positive and the other strictly negative
pub fn opposite_signs(a: f64, b: f64) -> bool {
    (a > 0.0 && b < 0.0) || (a < 0.0 && b > 0.0)
}
