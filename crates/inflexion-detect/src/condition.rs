//! The two per-position change-point conditions.

/// Sign as -1, 0 or 1; `None` for NaN.
fn sign(x: f64) -> Option<i8> {
    if x > 0.0 {
        Some(1)
    } else if x < 0.0 {
        Some(-1)
    } else if x == 0.0 {
        Some(0)
    } else {
        None
    }
}

/// Flags positions where momentum changes sign.
///
/// Position `t` is flagged when `momentum[t - 1]` and `momentum[t]` are both
/// defined, their signs differ, and `momentum[t - 1]` is non-zero. A move out
/// of exactly flat momentum is therefore never a flip, while a move into flat
/// momentum is. Position 0 has no predecessor and is never flagged.
pub fn momentum_flips(momentum: &[Option<f64>]) -> Vec<bool> {
    let mut flags = Vec::with_capacity(momentum.len());
    if momentum.is_empty() {
        return flags;
    }

    flags.push(false);
    flags.extend(momentum.windows(2).map(|pair| match (pair[0], pair[1]) {
        (Some(prev), Some(curr)) => match (sign(prev), sign(curr)) {
            (Some(a), Some(b)) => a != b && prev != 0.0,
            _ => false,
        },
        _ => false,
    }));
    flags
}

/// Flags positions where `|reversion[t]| > threshold`.
///
/// Undefined positions are never flagged. A negative threshold flags every
/// defined position.
pub fn reversion_breaches(reversion: &[Option<f64>], threshold: f64) -> Vec<bool> {
    reversion
        .iter()
        .map(|r| r.is_some_and(|r| r.abs() > threshold))
        .collect()
}
