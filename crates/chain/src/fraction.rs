//! Nearest-fraction display approximation.
//!
//! The solution stage reports each stationary probability as the closest
//! fraction with a bounded denominator, purely for readability. This is a
//! presentation step; the numeric solve path never touches it.

/// Formats `x` as the nearest fraction with denominator at most `max_denominator`.
///
/// Whole numbers render without a denominator ("0", "1"); everything else as
/// "p/q" in lowest terms. Non-finite values fall back to their float
/// representation. `max_denominator` is clamped to at least 1.
pub fn nearest_fraction(x: f64, max_denominator: u64) -> String {
    if !x.is_finite() {
        return x.to_string();
    }
    let (num, den) = limit_denominator(x.abs(), max_denominator.max(1));
    let mut out = if den == 1 {
        num.to_string()
    } else {
        format!("{num}/{den}")
    };
    if x < 0.0 && num != 0 {
        out.insert(0, '-');
    }
    out
}

/// Best rational approximation of a non-negative `x` with denominator <= `max_den`.
///
/// Walks the continued-fraction convergents of `x` until the denominator
/// bound is hit, then compares the last convergent against the best
/// semiconvergent and returns whichever is closer.
fn limit_denominator(x: f64, max_den: u64) -> (u128, u128) {
    let max_den = max_den as u128;
    let (mut p0, mut q0): (u128, u128) = (0, 1);
    let (mut p1, mut q1): (u128, u128) = (1, 0);
    let mut val = x;

    loop {
        let a_f = val.floor();
        if a_f > u64::MAX as f64 {
            break;
        }
        let a = a_f as u128;
        let q2 = q0 + a * q1;
        if q2 > max_den {
            // q1 >= 1 here: the first convergent always has denominator 1.
            let k = (max_den - q0) / q1;
            let (sp, sq) = (p0 + k * p1, q0 + k * q1);
            let err_semi = (sp as f64 / sq as f64 - x).abs();
            let err_conv = (p1 as f64 / q1 as f64 - x).abs();
            return if err_conv <= err_semi {
                (p1, q1)
            } else {
                (sp, sq)
            };
        }
        let p2 = p0 + a * p1;
        p0 = p1;
        q0 = q1;
        p1 = p2;
        q1 = q2;

        let frac = val - a_f;
        if frac <= 0.0 {
            break;
        }
        let next = 1.0 / frac;
        if !next.is_finite() {
            break;
        }
        val = next;
    }
    (p1, q1)
}
