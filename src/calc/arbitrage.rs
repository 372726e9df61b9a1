use crate::calc::leg;
use crate::calc::rounding::{self, Rounded};
use crate::calc::types::{ArbitrageResult, Leg};
use crate::calc::validation;
use crate::calc::weighted;
use crate::errors::{Reason, ValidationError};

/// Minimum number of complete legs before a guaranteed figure exists.
pub const MIN_COMPLETE_LEGS: usize = 2;

/// Resolve a whole book of legs.
///
/// guaranteed_profit = min(profit_i) over complete legs
///
/// A hedge is only as good as its worst outcome, so the headline figure is
/// the minimum, never an average or the first leg. With fewer than two
/// complete legs every guaranteed figure is `None`: a 0 here would read as
/// a verified break-even.
///
/// Pure function, rounded at the boundary. Invalid entries are skipped by
/// the resolver; use [`resolve_arbitrage_checked`] to reject them instead.
pub fn resolve_arbitrage(legs: &[Leg]) -> ArbitrageResult {
    resolve_raw(legs).rounded()
}

/// Validation gate first, then [`resolve_arbitrage`].
pub fn resolve_arbitrage_checked(legs: &[Leg]) -> Result<ArbitrageResult, ValidationError> {
    validation::check_legs(legs)?;
    Ok(resolve_arbitrage(legs))
}

pub(crate) fn resolve_raw(legs: &[Leg]) -> ArbitrageResult {
    let resolutions: Vec<_> = legs.iter().map(|l| weighted::blend(&l.entries)).collect();
    let total_stake: f64 = resolutions.iter().map(|r| r.leg_stake).sum();

    let leg_analyses: Vec<_> = legs
        .iter()
        .zip(&resolutions)
        .map(|(l, r)| {
            let mut analysis = leg::analyze(r.leg_stake, r.weighted_odd, total_stake);
            analysis.is_complete = l.is_complete();
            analysis
        })
        .collect();

    let complete_legs = leg_analyses.iter().filter(|a| a.is_complete).count();
    let is_complete = complete_legs >= MIN_COMPLETE_LEGS;

    let bonus_stake: f64 = legs
        .iter()
        .flat_map(|l| l.entries.iter())
        .filter(|e| e.is_bonus_stake && e.stake.is_finite() && e.stake > 0.0)
        .map(|e| e.stake)
        .sum();

    let mut result = ArbitrageResult {
        total_stake,
        leg_analyses,
        guaranteed_profit: None,
        guaranteed_roi: None,
        binding_leg: None,
        complete_legs,
        is_complete,
        book_percentage: None,
        bonus_stake,
        extraction_rate: None,
    };

    if !is_complete {
        tracing::debug!(complete_legs, "book incomplete, no guaranteed figure");
        return result;
    }

    let binding = result
        .leg_analyses
        .iter()
        .enumerate()
        .filter(|(_, a)| a.is_complete)
        .min_by(|(_, a), (_, b)| a.profit.total_cmp(&b.profit));

    if let Some((idx, worst)) = binding {
        result.binding_leg = Some(idx);
        result.guaranteed_profit = Some(worst.profit);
        result.guaranteed_roi = Some(worst.roi);
        if bonus_stake > 0.0 {
            result.extraction_rate = Some(worst.profit / bonus_stake * 100.0);
        }
    }

    // An uncovered outcome would make a partial sum look like a surebet.
    if complete_legs == result.leg_analyses.len() {
        result.book_percentage = Some(
            result
                .leg_analyses
                .iter()
                .map(|a| 100.0 / a.weighted_odd)
                .sum(),
        );
    }

    result
}

impl ArbitrageResult {
    /// The guaranteed (profit, ROI) pair, or a rejection naming `legs` when
    /// the book is still incomplete.
    pub fn require_guaranteed(&self) -> Result<(f64, f64), ValidationError> {
        match (self.guaranteed_profit, self.guaranteed_roi) {
            (Some(profit), Some(roi)) => Ok((profit, roi)),
            _ => Err(ValidationError::new("legs", Reason::InsufficientLegs)),
        }
    }
}

impl Rounded for ArbitrageResult {
    fn rounded(&self) -> Self {
        Self {
            total_stake: rounding::money(self.total_stake),
            leg_analyses: self.leg_analyses.iter().map(|a| a.rounded()).collect(),
            guaranteed_profit: self.guaranteed_profit.map(rounding::money),
            guaranteed_roi: self.guaranteed_roi.map(rounding::percent),
            binding_leg: self.binding_leg,
            complete_legs: self.complete_legs,
            is_complete: self.is_complete,
            book_percentage: self.book_percentage.map(rounding::percent),
            bonus_stake: rounding::money(self.bonus_stake),
            extraction_rate: self.extraction_rate.map(rounding::percent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::types::StakeEntry;

    fn leg(label: &str, odd: f64, stake: f64) -> Leg {
        Leg::new(label, [StakeEntry::new("bk", odd, stake)])
    }

    #[test]
    fn test_two_way_surebet() {
        // 2.10 / 2.05: book 96.4%. Stakes proportional to 1/odd on 100.
        let legs = vec![leg("1", 2.10, 49.40), leg("2", 2.05, 50.60)];
        let r = resolve_arbitrage(&legs);
        assert!(r.is_complete);
        assert_eq!(r.total_stake, 100.0);
        // 49.40 * 2.10 = 103.74 ; 50.60 * 2.05 = 103.73
        assert_eq!(r.leg_analyses[0].profit, 3.74);
        assert_eq!(r.leg_analyses[1].profit, 3.73);
        assert_eq!(r.guaranteed_profit, Some(3.73));
        assert_eq!(r.guaranteed_roi, Some(3.7));
        assert_eq!(r.binding_leg, Some(1));
        assert_eq!(r.book_percentage, Some(96.4));
    }

    #[test]
    fn test_minimum_not_average() {
        let legs = vec![leg("1", 3.0, 50.0), leg("X", 3.5, 30.0), leg("2", 4.0, 20.0)];
        let r = resolve_arbitrage(&legs);
        // returns 150 / 105 / 80 on 100 staked
        assert_eq!(r.guaranteed_profit, Some(-20.0));
        assert_eq!(r.guaranteed_roi, Some(-20.0));
        assert_eq!(r.binding_leg, Some(2));
    }

    #[test]
    fn test_single_complete_leg_is_incomplete() {
        let legs = vec![leg("1", 2.0, 100.0), leg("2", 0.0, 0.0)];
        let r = resolve_arbitrage(&legs);
        assert!(!r.is_complete);
        assert_eq!(r.complete_legs, 1);
        assert_eq!(r.guaranteed_profit, None);
        assert_eq!(r.guaranteed_roi, None);
        assert_eq!(r.binding_leg, None);
        assert_eq!(r.book_percentage, None);
        assert_eq!(r.leg_analyses.len(), 2);

        let err = r.require_guaranteed().unwrap_err();
        assert_eq!(err.reason, Reason::InsufficientLegs);
    }

    #[test]
    fn test_empty_book() {
        let r = resolve_arbitrage(&[]);
        assert!(!r.is_complete);
        assert_eq!(r.total_stake, 0.0);
        assert!(r.leg_analyses.is_empty());
    }

    #[test]
    fn test_order_invariance() {
        let legs = vec![
            Leg::new(
                "1",
                [StakeEntry::new("a", 2.9, 120.0), StakeEntry::new("b", 3.05, 35.0)],
            ),
            leg("X", 3.4, 140.0),
            Leg::new(
                "2",
                [StakeEntry::new("c", 3.6, 90.0), StakeEntry::new("d", 3.75, 40.0)],
            ),
        ];
        let base = resolve_arbitrage(&legs);

        let mut reversed = legs.clone();
        reversed.reverse();
        for l in reversed.iter_mut() {
            l.entries.reverse();
        }
        let other = resolve_arbitrage(&reversed);

        assert_eq!(base.guaranteed_profit, other.guaranteed_profit);
        assert_eq!(base.guaranteed_roi, other.guaranteed_roi);
        assert_eq!(base.total_stake, other.total_stake);
        assert_eq!(base.book_percentage, other.book_percentage);
    }

    #[test]
    fn test_proportional_stakes_never_lose_on_surebet() {
        let pairs = [(2.1, 2.05), (1.5, 3.2), (1.25, 5.5), (3.0, 1.6), (10.0, 1.12)];
        for (o1, o2) in pairs {
            let book: f64 = 1.0 / o1 + 1.0 / o2;
            assert!(book < 1.0, "fixture {o1}/{o2} is not a surebet");
            let total = 1000.0;
            let legs = vec![
                leg("1", o1, total * (1.0 / o1) / book),
                leg("2", o2, total * (1.0 / o2) / book),
            ];
            let g = resolve_arbitrage(&legs).guaranteed_profit.unwrap();
            assert!(g >= 0.0, "{o1}/{o2} guaranteed {g}");
        }
    }

    #[test]
    fn test_incomplete_leg_ignored_for_minimum() {
        let legs = vec![leg("1", 2.0, 60.0), leg("X", 0.0, 0.0), leg("2", 2.5, 40.0)];
        let r = resolve_arbitrage(&legs);
        assert!(r.is_complete);
        assert_eq!(r.complete_legs, 2);
        assert_eq!(r.guaranteed_profit, Some(0.0));
        assert!(!r.leg_analyses[1].is_complete);
        // 50% + 40% over two of three outcomes is not a surebet.
        assert_eq!(r.book_percentage, None);
    }

    #[test]
    fn test_bonus_extraction_rate() {
        let legs = vec![
            Leg::new("1", [StakeEntry::bonus("promo", 4.0, 50.0)]),
            leg("2", 1.3, 150.0),
        ];
        let r = resolve_arbitrage(&legs);
        // returns 200 / 195 on 200 staked
        assert_eq!(r.bonus_stake, 50.0);
        assert_eq!(r.guaranteed_profit, Some(-5.0));
        assert_eq!(r.extraction_rate, Some(-10.0));
    }

    #[test]
    fn test_checked_rejects_bad_entry() {
        let legs = vec![leg("1", 2.0, 50.0), leg("2", 0.9, 50.0)];
        let err = resolve_arbitrage_checked(&legs).unwrap_err();
        assert_eq!(err.field, "legs[1].entries[0].odd");
        assert_eq!(err.reason, Reason::OddOutOfRange);
    }

    #[test]
    fn test_tied_minimum_same_figure() {
        let legs = vec![leg("1", 2.0, 50.0), leg("2", 2.0, 50.0)];
        let r = resolve_arbitrage(&legs);
        assert_eq!(r.guaranteed_profit, Some(0.0));
        assert!(r.binding_leg.is_some());
    }
}
