use crate::calc::rounding::{self, Rounded};
use crate::calc::types::{LegResolution, StakeEntry};

/// Collapse a leg's entries into one stake-weighted odd.
///
/// weighted_odd = sum(stake_i * odd_i) / sum(stake_i)
///
/// A leg split across two bookmakers at different odds reflects the blended
/// realised return, never the better or worse of the two. Entries with a
/// non-finite or non-positive odd, or a non-finite or negative stake, are
/// left out of both sums (the validation gate reports them).
///
/// Rounded at the boundary.
pub fn resolve_leg(entries: &[StakeEntry]) -> LegResolution {
    blend(entries).rounded()
}

/// Unrounded blend, for chaining inside the engine.
pub(crate) fn blend(entries: &[StakeEntry]) -> LegResolution {
    let mut leg_stake = 0.0;
    let mut weighted_sum = 0.0;
    let mut excluded_entries = 0;

    for entry in entries {
        let usable = entry.odd.is_finite()
            && entry.odd > 0.0
            && entry.stake.is_finite()
            && entry.stake >= 0.0;
        if !usable {
            excluded_entries += 1;
            continue;
        }
        leg_stake += entry.stake;
        weighted_sum += entry.stake * entry.odd;
    }

    let weighted_odd = if leg_stake > 0.0 {
        weighted_sum / leg_stake
    } else {
        0.0
    };

    LegResolution {
        weighted_odd,
        leg_stake,
        excluded_entries,
    }
}

impl Rounded for LegResolution {
    fn rounded(&self) -> Self {
        Self {
            weighted_odd: rounding::odd(self.weighted_odd),
            leg_stake: rounding::money(self.leg_stake),
            excluded_entries: self.excluded_entries,
        }
    }
}
