//! Pre-checks run before any solver.
//!
//! Stakes: finite and >= 0. Odds: finite and either 0 (unset) or > 1.
//! Commission: [0, 100). Every violation is a `ValidationError` with a
//! field path the caller can map back onto its form.
use crate::calc::types::{HedgeInputs, Leg, StakeEntry};
use crate::errors::{Reason, ValidationError};

#[inline]
pub fn check_stake(field: &str, stake: f64) -> Result<(), ValidationError> {
    if !stake.is_finite() {
        return Err(ValidationError::new(field, Reason::NonFinite));
    }
    if stake < 0.0 {
        return Err(ValidationError::new(field, Reason::NegativeStake));
    }
    Ok(())
}

/// Odd that may still be unset (0).
#[inline]
pub fn check_odd(field: &str, odd: f64) -> Result<(), ValidationError> {
    if !odd.is_finite() {
        return Err(ValidationError::new(field, Reason::NonFinite));
    }
    if odd != 0.0 && odd <= 1.0 {
        return Err(ValidationError::new(field, Reason::OddOutOfRange));
    }
    Ok(())
}

/// Odd that a solver needs: must be set.
#[inline]
pub fn check_required_odd(field: &str, odd: f64) -> Result<(), ValidationError> {
    check_odd(field, odd)?;
    if odd == 0.0 {
        return Err(ValidationError::new(field, Reason::OddRequired));
    }
    Ok(())
}

#[inline]
pub fn check_commission(field: &str, commission_pct: f64) -> Result<(), ValidationError> {
    if !commission_pct.is_finite() {
        return Err(ValidationError::new(field, Reason::NonFinite));
    }
    if !(0.0..100.0).contains(&commission_pct) {
        return Err(ValidationError::new(field, Reason::CommissionOutOfRange));
    }
    Ok(())
}

fn check_entry(leg_idx: usize, entry_idx: usize, entry: &StakeEntry) -> [Option<ValidationError>; 2] {
    let prefix = format!("legs[{leg_idx}].entries[{entry_idx}]");
    [
        check_odd(&format!("{prefix}.odd"), entry.odd).err(),
        check_stake(&format!("{prefix}.stake"), entry.stake).err(),
    ]
}

/// Every violation across all legs, in input order.
pub fn audit_legs(legs: &[Leg]) -> Vec<ValidationError> {
    let errors: Vec<ValidationError> = legs
        .iter()
        .enumerate()
        .flat_map(|(li, leg)| {
            leg.entries
                .iter()
                .enumerate()
                .flat_map(move |(ei, entry)| check_entry(li, ei, entry))
        })
        .flatten()
        .collect();

    if !errors.is_empty() {
        tracing::debug!(count = errors.len(), first = %errors[0], "legs rejected");
    }
    errors
}

/// First violation across all legs, if any.
pub fn check_legs(legs: &[Leg]) -> Result<(), ValidationError> {
    match audit_legs(legs).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

pub fn check_hedge(inputs: &HedgeInputs) -> Result<(), ValidationError> {
    check_stake("back_stake", inputs.back_stake)?;
    check_required_odd("back_odd", inputs.back_odd)?;
    check_required_odd("lay_odd", inputs.lay_odd)?;
    check_commission("commission_pct", inputs.commission_pct)?;

    // Implied by lay > 1 and commission < 100%; the solver divides by it.
    if inputs.lay_odd - inputs.commission_pct / 100.0 <= 0.0 {
        return Err(ValidationError::new(
            "lay_odd",
            Reason::NonPositiveLayDenominator,
        ));
    }
    Ok(())
}
