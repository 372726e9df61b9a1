//! Output rounding.
//!
//! Money → 2 decimals, percentages → 1 decimal, odds → 3 decimals.
//! Applied once, at the public boundary of the engine; internal steps
//! always chain unrounded values.
//!
//! Rounding is half away from zero and symmetric in sign. A nudge of a few ULPs
//! absorbs binary representation error, so 1.005 rounds to 1.01 rather than
//! to 1.00 because 1.005 is stored as 1.00499999999999989...

pub const MONEY_DECIMALS: i32 = 2;
pub const PERCENT_DECIMALS: i32 = 1;
pub const ODD_DECIMALS: i32 = 3;

/// Representation error tolerance, in ULPs of the scaled value.
const REPRESENTATION_NUDGE_ULPS: f64 = 4.0;

/// No nudge at or above this scaled magnitude: a few ULPs there are no
/// longer small next to the last kept decimal.
const NUDGE_CEILING: f64 = (1u64 << 45) as f64;

/// Round half away from zero. Non-finite input is returned unchanged; `-0`
/// is normalised to `0`.
#[inline]
pub fn round_half_away(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    let nudge = if scaled.abs() < NUDGE_CEILING {
        scaled.abs() * f64::EPSILON * REPRESENTATION_NUDGE_ULPS
    } else {
        0.0
    };
    let nudged = scaled + scaled.signum() * nudge;
    let rounded = nudged.round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

#[inline]
pub fn money(value: f64) -> f64 {
    round_half_away(value, MONEY_DECIMALS)
}

#[inline]
pub fn percent(value: f64) -> f64 {
    round_half_away(value, PERCENT_DECIMALS)
}

#[inline]
pub fn odd(value: f64) -> f64 {
    round_half_away(value, ODD_DECIMALS)
}

/// Derived values that know how to present themselves at the boundary.
pub trait Rounded {
    fn rounded(&self) -> Self;
}
