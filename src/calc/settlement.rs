use crate::calc::arbitrage;
use crate::calc::rounding::{self, Rounded};
use crate::calc::types::Leg;
use crate::calc::validation;
use crate::errors::{Reason, ValidationError};
use serde::{Deserialize, Serialize};

/// Caller-supplied result of a leg once the event is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegOutcome {
    /// Leg won: stake * odd paid back.
    Green,
    /// Leg lost: nothing back.
    Red,
    /// Leg cancelled: stake refunded.
    Void,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SettlementResult {
    pub total_cost: f64,
    pub total_return: f64,
    pub realized_profit: f64,
    pub realized_roi: f64,
    /// Guaranteed profit the book promised before settlement.
    pub expected_profit: Option<f64>,
    /// realized - expected.
    pub deviation: Option<f64>,
}

/// Reconcile a book against the outcomes the caller reports.
///
/// Only placed entries (odd > 1, stake > 0) count. The engine never decides
/// outcomes; it only prices the ones it is given.
pub fn settle(legs: &[Leg], outcomes: &[LegOutcome]) -> Result<SettlementResult, ValidationError> {
    validation::check_legs(legs)?;
    if outcomes.len() != legs.len() {
        return Err(ValidationError::new("outcomes", Reason::LengthMismatch));
    }

    let mut total_cost = 0.0;
    let mut total_return = 0.0;

    for (leg, outcome) in legs.iter().zip(outcomes) {
        for entry in leg.entries.iter().filter(|e| e.is_placed()) {
            total_cost += entry.stake;
            total_return += match outcome {
                LegOutcome::Green => entry.stake * entry.odd,
                LegOutcome::Red => 0.0,
                LegOutcome::Void => entry.stake,
            };
        }
    }

    let realized_profit = total_return - total_cost;
    let realized_roi = if total_cost > 0.0 {
        realized_profit / total_cost * 100.0
    } else {
        0.0
    };

    let expected_profit = arbitrage::resolve_raw(legs).guaranteed_profit;
    let deviation = expected_profit.map(|e| realized_profit - e);

    if let Some(d) = deviation {
        tracing::debug!(realized = realized_profit, deviation = d, "book settled");
    }

    Ok(SettlementResult {
        total_cost,
        total_return,
        realized_profit,
        realized_roi,
        expected_profit,
        deviation,
    }
    .rounded())
}

impl Rounded for SettlementResult {
    fn rounded(&self) -> Self {
        Self {
            total_cost: rounding::money(self.total_cost),
            total_return: rounding::money(self.total_return),
            realized_profit: rounding::money(self.realized_profit),
            realized_roi: rounding::percent(self.realized_roi),
            expected_profit: self.expected_profit.map(rounding::money),
            deviation: self.deviation.map(rounding::money),
        }
    }
}
