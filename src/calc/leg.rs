use crate::calc::rounding::{self, Rounded};
use crate::calc::types::LegAnalysis;

/// Return, profit and ROI of one leg if it is the outcome that lands.
///
/// Profit is measured against `total_stake`, the capital committed to the
/// whole book, never against this leg's own stake. ROI is 0 when nothing
/// is staked.
///
/// Rounded at the boundary.
pub fn evaluate_leg_profit(leg_stake: f64, weighted_odd: f64, total_stake: f64) -> LegAnalysis {
    analyze(leg_stake, weighted_odd, total_stake).rounded()
}

#[inline]
pub(crate) fn analyze(leg_stake: f64, weighted_odd: f64, total_stake: f64) -> LegAnalysis {
    let leg_return = leg_stake * weighted_odd;
    let profit = leg_return - total_stake;
    let roi = if total_stake > 0.0 {
        profit / total_stake * 100.0
    } else {
        0.0
    };

    LegAnalysis {
        weighted_odd,
        leg_stake,
        leg_return,
        profit,
        roi,
        is_complete: leg_stake > 0.0 && weighted_odd > 1.0,
    }
}

impl Rounded for LegAnalysis {
    fn rounded(&self) -> Self {
        Self {
            weighted_odd: rounding::odd(self.weighted_odd),
            leg_stake: rounding::money(self.leg_stake),
            leg_return: rounding::money(self.leg_return),
            profit: rounding::money(self.profit),
            roi: rounding::percent(self.roi),
            is_complete: self.is_complete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profit_against_total_stake() {
        // 52.63 on 1.95 out of a 100 book.
        let a = evaluate_leg_profit(52.63, 1.95, 100.0);
        assert_eq!(a.leg_return, 102.63);
        assert_eq!(a.profit, 2.63);
        assert_eq!(a.roi, 2.6);
        assert!(a.is_complete);
    }

    #[test]
    fn test_losing_leg_negative_roi() {
        let a = evaluate_leg_profit(40.0, 2.0, 100.0);
        assert_eq!(a.profit, -20.0);
        assert_eq!(a.roi, -20.0);
    }

    #[test]
    fn test_zero_total_stake_guarded() {
        let a = evaluate_leg_profit(0.0, 0.0, 0.0);
        assert_eq!(a.roi, 0.0);
        assert!(a.roi.is_finite());
        assert!(!a.is_complete);
    }
}
