//! Scalar helpers shared by the horizontal and vertical models.

/// Relative tolerance used for near-equal comparisons.
pub const REL_EPSILON: f64 = 1e-12;
/// Absolute tolerance, used when comparing against zero.
pub const ABS_EPSILON: f64 = 1e-12;

/// Tolerance-based equality for root and bound comparisons.
///
/// Two values are almost equal when they are identical, or when their
/// difference is within `ABS_EPSILON` or within `REL_EPSILON` of the larger
/// magnitude. NaN is never almost equal to anything.
pub fn almost_equals(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    let diff = (a - b).abs();
    if !diff.is_finite() {
        return false;
    }
    diff <= ABS_EPSILON || diff <= REL_EPSILON * a.abs().max(b.abs())
}

/// Sign with `sign(0) == 1`.
pub fn sign(x: f64) -> f64 {
    if x >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

pub fn sq(x: f64) -> f64 {
    x * x
}

/// Root of `a*x^2 + 2*b*x + c = 0` selected by `eps` (-1 smaller, +1 larger
/// for positive `a`). NaN when `a == 0` or the discriminant is negative.
pub fn root2b(a: f64, b: f64, c: f64, eps: i32) -> f64 {
    if a == 0.0 {
        return f64::NAN;
    }
    let discr = sq(b) - a * c;
    if discr < 0.0 {
        return f64::NAN;
    }
    (-b + f64::from(eps) * discr.sqrt()) / a
}
