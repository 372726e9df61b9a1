//! Back/lay hedge solver for bonus extraction.
//!
//! Given a fixed back bet and an exchange lay odd with commission c
//! (as a fraction), solve the lay stake and both outcome profits:
//!
//!   QUALIFYING    lay = S * B / (L - c)
//!                 back wins: S(B - 1) - lay(L - 1)
//!                 lay wins:  lay(1 - c) - S
//!
//!   FREE_BET_SNR  lay = S * (B - 1) / (L - c)
//!                 back wins: S(B - 1) - lay(L - 1)
//!                 lay wins:  lay(1 - c)
//!
//!   FREE_BET_SR   lay = S * B / (L - c)
//!                 back wins: S(B - 1) - lay(L - 1)
//!                 lay wins:  lay(1 - c)
//!
//! SNR pays only winnings, so its numerator uses B - 1. Free-bet lay wins
//! never subtract S: the stake was never real money. Each mode is its own
//! function; do not fold them into one flagged formula.
use crate::calc::rounding::{self, Rounded};
use crate::calc::types::{HedgeInputs, HedgeMode, HedgeResult};
use crate::calc::validation;
use crate::errors::ValidationError;

/// Lay stake and outcome profits before aggregation. Stack-allocated.
#[derive(Debug, Clone, Copy)]
struct HedgeLegs {
    lay_stake: f64,
    profit_if_back_wins: f64,
    profit_if_lay_wins: f64,
}

#[inline]
fn qualifying(i: &HedgeInputs, c: f64) -> HedgeLegs {
    let lay_stake = i.back_stake * i.back_odd / (i.lay_odd - c);
    HedgeLegs {
        lay_stake,
        profit_if_back_wins: i.back_stake * (i.back_odd - 1.0) - lay_stake * (i.lay_odd - 1.0),
        profit_if_lay_wins: lay_stake * (1.0 - c) - i.back_stake,
    }
}

#[inline]
fn free_bet_snr(i: &HedgeInputs, c: f64) -> HedgeLegs {
    let lay_stake = i.back_stake * (i.back_odd - 1.0) / (i.lay_odd - c);
    HedgeLegs {
        lay_stake,
        profit_if_back_wins: i.back_stake * (i.back_odd - 1.0) - lay_stake * (i.lay_odd - 1.0),
        profit_if_lay_wins: lay_stake * (1.0 - c),
    }
}

#[inline]
fn free_bet_sr(i: &HedgeInputs, c: f64) -> HedgeLegs {
    let lay_stake = i.back_stake * i.back_odd / (i.lay_odd - c);
    HedgeLegs {
        lay_stake,
        profit_if_back_wins: i.back_stake * (i.back_odd - 1.0) - lay_stake * (i.lay_odd - 1.0),
        profit_if_lay_wins: lay_stake * (1.0 - c),
    }
}

/// Solve the hedge for one back bet.
///
/// Rejects unset odds, negative stakes and commission outside [0, 100)
/// before any division. A zero back stake solves to all zeros.
///
/// Pure function, rounded at the boundary.
pub fn solve_hedge(inputs: &HedgeInputs) -> Result<HedgeResult, ValidationError> {
    validation::check_hedge(inputs)?;
    Ok(solve_raw(inputs).rounded())
}

fn solve_raw(inputs: &HedgeInputs) -> HedgeResult {
    let c = inputs.commission_pct / 100.0;

    let legs = match inputs.mode {
        HedgeMode::Qualifying => qualifying(inputs, c),
        HedgeMode::FreeBetSnr => free_bet_snr(inputs, c),
        HedgeMode::FreeBetSr => free_bet_sr(inputs, c),
    };

    let settled_value = legs.profit_if_back_wins.min(legs.profit_if_lay_wins);

    let extraction_rate = if !inputs.mode.is_free_bet() {
        None
    } else if inputs.back_stake > 0.0 {
        Some(settled_value / inputs.back_stake * 100.0)
    } else {
        Some(0.0)
    };

    HedgeResult {
        mode: inputs.mode,
        lay_stake: legs.lay_stake,
        liability: legs.lay_stake * (inputs.lay_odd - 1.0),
        profit_if_back_wins: legs.profit_if_back_wins,
        profit_if_lay_wins: legs.profit_if_lay_wins,
        settled_value,
        extraction_rate,
    }
}

impl Rounded for HedgeResult {
    fn rounded(&self) -> Self {
        Self {
            mode: self.mode,
            lay_stake: rounding::money(self.lay_stake),
            liability: rounding::money(self.liability),
            profit_if_back_wins: rounding::money(self.profit_if_back_wins),
            profit_if_lay_wins: rounding::money(self.profit_if_lay_wins),
            settled_value: rounding::money(self.settled_value),
            extraction_rate: self.extraction_rate.map(rounding::percent),
        }
    }
}
