//! Dense vector arithmetic used by training.

/// Compute dot product between two vectors.
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// `y += a * x`
pub fn axpy(a: f32, x: &[f32], y: &mut [f32]) {
    for (yi, xi) in y.iter_mut().zip(x.iter()) {
        *yi += a * xi;
    }
}

/// Multiply every component by `a`.
pub fn scale(vector: &mut [f32], a: f32) {
    for v in vector.iter_mut() {
        *v *= a;
    }
}

/// Logistic sigmoid, clamped to avoid overflow in `exp`.
pub fn sigmoid(x: f32) -> f32 {
    if x > 30.0 {
        1.0
    } else if x < -30.0 {
        0.0
    } else {
        1.0 / (1.0 + (-x).exp())
    }
}

/// `-ln(sigmoid(x))`, used for loss tracking.
pub fn neg_log_sigmoid(x: f32) -> f64 {
    // ln(1 + e^-x), stable for large |x|
    let x = x as f64;
    if x > 0.0 {
        (-x).exp().ln_1p()
    } else {
        -x + x.exp().ln_1p()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_and_axpy() {
        let a = vec![1.0, 2.0, 3.0];
        let mut b = vec![1.0, 1.0, 1.0];
        assert!((dot_product(&a, &b) - 6.0).abs() < 0.001);

        axpy(2.0, &a, &mut b);
        assert_eq!(b, vec![3.0, 5.0, 7.0]);

        scale(&mut b, 0.5);
        assert_eq!(b, vec![1.5, 2.5, 3.5]);
    }

    #[test]
    fn test_sigmoid() {
        assert!((sigmoid(0.0) - 0.5).abs() < 0.001);
        assert_eq!(sigmoid(100.0), 1.0);
        assert_eq!(sigmoid(-100.0), 0.0);
        assert!(sigmoid(2.0) > 0.5);
    }

    #[test]
    fn test_neg_log_sigmoid() {
        assert!((neg_log_sigmoid(0.0) - std::f64::consts::LN_2).abs() < 1e-9);
        assert!(neg_log_sigmoid(50.0) < 1e-9);
        assert!((neg_log_sigmoid(-50.0) - 50.0).abs() < 1e-6);
    }
}
