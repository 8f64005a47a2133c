//! Floating-point helpers shared by the pitch and string models.

/// Tolerance for zero and equality tests.
pub const EPSILON: f64 = 1e-10;

/// Reports whether `x` is zero within [`EPSILON`].
pub fn is_zero(x: f64) -> bool {
    x == 0.0 || x.abs() < EPSILON
}

/// Reports whether `a` is greater than `b` by more than [`EPSILON`].
pub fn is_greater_than(a: f64, b: f64) -> bool {
    a > b && a - b > EPSILON
}

/// Reports whether `a` and `b` are equal within [`EPSILON`].
pub fn approx_eq(a: f64, b: f64) -> bool {
    is_zero(a - b)
}

/// Greatest common divisor of two reals.
///
/// Euclid's algorithm on `f64` remainders, stopping once the remainder is
/// zero within [`EPSILON`]. For a rational `p/q` in lowest terms,
/// `gcd(1.0, p/q)` is `1/q`.
pub fn gcd(a: f64, b: f64) -> f64 {
    let (mut a, mut b) = (a, b);
    while !is_zero(b) {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Greatest common divisor of two integers.
pub fn gcd_u32(a: u32, b: u32) -> u32 {
    let (mut a, mut b) = (a, b);
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}
