//! Stake distribution around a fixed reference leg.
//!
//! The reference leg keeps its stake S_f at its weighted odd o_f; the other
//! legs' stakes are solved from their weighted odds o_j:
//!
//!   auto      stake_j = S_f * o_f / o_j
//!             every leg returns the same amount
//!
//!   directed  stake_j = T / o_j,  T = S_f / (1 - sum_{j != f} 1 / o_j)
//!             other legs break even, all profit lands on the reference leg
//!
//! A leg with nothing staked yet is priced at its first set odd.
use crate::calc::arbitrage;
use crate::calc::rounding::{self, Rounded};
use crate::calc::types::{ArbitrageResult, Leg, LegResolution, StakeEntry};
use crate::calc::validation;
use crate::calc::weighted;
use crate::errors::{Reason, ValidationError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionMode {
    /// Equalise the return of every leg.
    Auto,
    /// Other legs break even; profit concentrated on the reference leg.
    Directed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakePlan {
    pub fixed_leg_index: usize,
    pub mode: DistributionMode,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionResult {
    /// One per leg, in input order. The reference leg keeps its stake.
    pub suggested_stakes: Vec<f64>,
    /// The proposed book, each leg placed at its weighted odd.
    pub arbitrage: ArbitrageResult,
}

/// Solve the other legs' stakes around `plan.fixed_leg_index`.
///
/// Requires every leg's odd to be set and the reference leg to carry a
/// positive stake. Directed mode also requires the other legs' implied
/// probabilities to stay below 100%.
pub fn distribute_stakes(legs: &[Leg], plan: &StakePlan) -> Result<DistributionResult, ValidationError> {
    validation::check_legs(legs)?;

    let fixed = plan.fixed_leg_index;
    if fixed >= legs.len() {
        return Err(ValidationError::new("fixed_leg_index", Reason::IndexOutOfRange));
    }
    if legs.len() < arbitrage::MIN_COMPLETE_LEGS {
        return Err(ValidationError::new("legs", Reason::InsufficientLegs));
    }

    let resolutions: Vec<_> = legs.iter().map(|l| weighted::blend(&l.entries)).collect();
    let odds: Vec<f64> = legs.iter().zip(&resolutions).map(|(l, r)| quoted_odd(l, r)).collect();

    if resolutions[fixed].leg_stake <= 0.0 {
        return Err(ValidationError::new(
            format!("legs[{fixed}].stake"),
            Reason::NonPositiveStake,
        ));
    }
    if let Some(idx) = odds.iter().position(|o| *o <= 1.0) {
        return Err(ValidationError::new(format!("legs[{idx}].odd"), Reason::OddRequired));
    }

    let fixed_stake = resolutions[fixed].leg_stake;
    let fixed_odd = odds[fixed];

    let total_return = match plan.mode {
        DistributionMode::Auto => fixed_stake * fixed_odd,
        DistributionMode::Directed => {
            let others_implied: f64 = odds
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != fixed)
                .map(|(_, o)| 1.0 / o)
                .sum();
            if others_implied >= 1.0 {
                return Err(ValidationError::new("legs", Reason::OverroundedBook));
            }
            // Book total; every other leg returns exactly this.
            fixed_stake / (1.0 - others_implied)
        }
    };

    // Placeable amounts: the proposed book is resolved from these, not from
    // the exact solution.
    let suggested: Vec<f64> = odds
        .iter()
        .enumerate()
        .map(|(i, o)| if i == fixed { fixed_stake } else { total_return / o })
        .map(rounding::money)
        .collect();

    let proposed: Vec<Leg> = legs
        .iter()
        .zip(&odds)
        .zip(&suggested)
        .map(|((leg, odd), stake)| Leg::new(leg.label.clone(), [StakeEntry::new("", *odd, *stake)]))
        .collect();

    tracing::debug!(fixed, mode = ?plan.mode, legs = legs.len(), "stakes distributed");

    Ok(DistributionResult {
        suggested_stakes: suggested,
        arbitrage: arbitrage::resolve_raw(&proposed),
    }
    .rounded())
}

/// Odd a leg is priced at: its blend once staked, otherwise its first set
/// odd.
fn quoted_odd(leg: &Leg, resolution: &LegResolution) -> f64 {
    if resolution.leg_stake > 0.0 {
        return resolution.weighted_odd;
    }
    leg.entries
        .iter()
        .map(|e| e.odd)
        .find(|o| o.is_finite() && *o > 1.0)
        .unwrap_or(0.0)
}

impl Rounded for DistributionResult {
    fn rounded(&self) -> Self {
        Self {
            suggested_stakes: self.suggested_stakes.iter().copied().map(rounding::money).collect(),
            arbitrage: self.arbitrage.rounded(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leg(label: &str, odd: f64, stake: f64) -> Leg {
        Leg::new(label, [StakeEntry::new("bk", odd, stake)])
    }

    fn plan(fixed_leg_index: usize, mode: DistributionMode) -> StakePlan {
        StakePlan { fixed_leg_index, mode }
    }

    #[test]
    fn test_auto_equalises_returns() {
        let legs = vec![leg("1", 2.0, 100.0), leg("X", 4.0, 0.0), leg("2", 5.0, 0.0)];
        let r = distribute_stakes(&legs, &plan(0, DistributionMode::Auto)).unwrap();
        assert_eq!(r.suggested_stakes, vec![100.0, 50.0, 40.0]);
        let returns: Vec<f64> = r.arbitrage.leg_analyses.iter().map(|a| a.leg_return).collect();
        assert_eq!(returns, vec![200.0, 200.0, 200.0]);
        // book 95%: 200 back on 190 staked
        assert_eq!(r.arbitrage.total_stake, 190.0);
        assert_eq!(r.arbitrage.guaranteed_profit, Some(10.0));
        assert_eq!(r.arbitrage.book_percentage, Some(95.0));
    }

    #[test]
    fn test_directed_concentrates_profit_on_reference_leg() {
        let legs = vec![leg("1", 2.0, 100.0), leg("X", 4.0, 0.0), leg("2", 5.0, 0.0)];
        let r = distribute_stakes(&legs, &plan(0, DistributionMode::Directed)).unwrap();
        // others' implied = 0.45, T = 100 / 0.55 = 181.818...
        assert_eq!(r.suggested_stakes, vec![100.0, 45.45, 36.36]);
        // Figures are those of the cent stakes actually placed: 181.81 in,
        // 181.80 back on either other leg.
        let a = &r.arbitrage;
        assert_eq!(a.total_stake, 181.81);
        assert_eq!(a.leg_analyses[0].profit, 18.19);
        assert_eq!(a.leg_analyses[1].profit, -0.01);
        assert_eq!(a.leg_analyses[2].profit, -0.01);
        assert_eq!(a.guaranteed_profit, Some(-0.01));
    }

    #[test]
    fn test_proposed_book_matches_suggested_stakes() {
        let legs = vec![
            Leg::new(
                "1",
                [StakeEntry::new("a", 2.9, 120.0), StakeEntry::new("b", 3.05, 35.0)],
            ),
            leg("X", 3.7, 0.0),
            leg("2", 3.3, 0.0),
        ];
        for mode in [DistributionMode::Auto, DistributionMode::Directed] {
            let r = distribute_stakes(&legs, &plan(0, mode)).unwrap();
            let placed: f64 = r.suggested_stakes.iter().sum();
            assert_eq!(r.arbitrage.total_stake, rounding::money(placed), "{mode:?}");
            for (a, stake) in r.arbitrage.leg_analyses.iter().zip(&r.suggested_stakes) {
                assert_eq!(a.leg_stake, *stake, "{mode:?}");
            }
        }
    }

    #[test]
    fn test_fixed_leg_uses_blended_odd() {
        let legs = vec![
            Leg::new(
                "1",
                [StakeEntry::new("a", 2.0, 300.0), StakeEntry::new("b", 3.0, 100.0)],
            ),
            leg("2", 3.0, 0.0),
        ];
        let r = distribute_stakes(&legs, &plan(0, DistributionMode::Auto)).unwrap();
        // 400 @ 2.25 returns 900, so leg 2 needs 300 @ 3.0
        assert_eq!(r.suggested_stakes, vec![400.0, 300.0]);
        assert_eq!(r.arbitrage.guaranteed_profit, Some(200.0));
    }

    #[test]
    fn test_directed_overround_rejected() {
        let legs = vec![leg("1", 1.5, 100.0), leg("X", 1.8, 0.0), leg("2", 2.0, 0.0)];
        let err = distribute_stakes(&legs, &plan(0, DistributionMode::Directed)).unwrap_err();
        assert_eq!(err.reason, Reason::OverroundedBook);
    }

    #[test]
    fn test_rejections() {
        let legs = vec![leg("1", 2.0, 100.0), leg("2", 0.0, 0.0)];
        let err = distribute_stakes(&legs, &plan(5, DistributionMode::Auto)).unwrap_err();
        assert_eq!(err.reason, Reason::IndexOutOfRange);

        let err = distribute_stakes(&legs, &plan(0, DistributionMode::Auto)).unwrap_err();
        assert_eq!(err.field, "legs[1].odd");
        assert_eq!(err.reason, Reason::OddRequired);

        let legs = vec![leg("1", 2.0, 0.0), leg("2", 2.0, 50.0)];
        let err = distribute_stakes(&legs, &plan(0, DistributionMode::Auto)).unwrap_err();
        assert_eq!(err.field, "legs[0].stake");
        assert_eq!(err.reason, Reason::NonPositiveStake);

        let single = vec![leg("1", 2.0, 100.0)];
        let err = distribute_stakes(&single, &plan(0, DistributionMode::Auto)).unwrap_err();
        assert_eq!(err.reason, Reason::InsufficientLegs);
    }
}
