use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// ── Inputs ──

/// One placed (or planned) wager contributing to a leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakeEntry {
    /// Opaque venue identifier, carried but never resolved.
    #[serde(default)]
    pub bookmaker_ref: String,
    /// Decimal odd. 0 means unset.
    pub odd: f64,
    /// Amount in the entry's own currency.
    pub stake: f64,
    #[serde(default)]
    pub is_bonus_stake: bool,
}

impl StakeEntry {
    pub fn new(bookmaker_ref: impl Into<String>, odd: f64, stake: f64) -> Self {
        Self {
            bookmaker_ref: bookmaker_ref.into(),
            odd,
            stake,
            is_bonus_stake: false,
        }
    }

    pub fn bonus(bookmaker_ref: impl Into<String>, odd: f64, stake: f64) -> Self {
        Self {
            is_bonus_stake: true,
            ..Self::new(bookmaker_ref, odd, stake)
        }
    }

    /// Both odd and stake are usable for a payout.
    #[inline]
    pub fn is_placed(&self) -> bool {
        self.odd.is_finite() && self.stake.is_finite() && self.odd > 1.0 && self.stake > 0.0
    }
}

/// Entries of one leg. Most legs are split across at most a few bookmakers.
pub type Entries = SmallVec<[StakeEntry; 4]>;

/// One mutually exclusive outcome of the hedged event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub label: String,
    pub entries: Entries,
}

impl Leg {
    pub fn new(label: impl Into<String>, entries: impl IntoIterator<Item = StakeEntry>) -> Self {
        Self {
            label: label.into(),
            entries: entries.into_iter().collect(),
        }
    }

    /// At least one entry with odd > 1 and stake > 0.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.entries.iter().any(StakeEntry::is_placed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HedgeMode {
    /// Real-money bet hedged to satisfy a wagering requirement.
    Qualifying,
    /// Free bet, stake returned on a win.
    FreeBetSr,
    /// Free bet, stake not returned.
    FreeBetSnr,
}

impl HedgeMode {
    #[inline]
    pub fn is_free_bet(self) -> bool {
        !matches!(self, HedgeMode::Qualifying)
    }
}

impl std::fmt::Display for HedgeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Qualifying => write!(f, "QUALIFYING"),
            Self::FreeBetSr => write!(f, "FREE_BET_SR"),
            Self::FreeBetSnr => write!(f, "FREE_BET_SNR"),
        }
    }
}

/// A back bet and the exchange lay that hedges it. Stack-allocated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HedgeInputs {
    pub back_stake: f64,
    pub back_odd: f64,
    pub lay_odd: f64,
    /// Exchange commission in percent, [0, 100).
    pub commission_pct: f64,
    pub mode: HedgeMode,
}

// ── Derived ──

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LegResolution {
    pub weighted_odd: f64,
    pub leg_stake: f64,
    /// Entries skipped because their odd or stake was unusable.
    pub excluded_entries: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LegAnalysis {
    pub weighted_odd: f64,
    pub leg_stake: f64,
    pub leg_return: f64,
    /// Measured against the stake committed across all legs.
    pub profit: f64,
    pub roi: f64,
    pub is_complete: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArbitrageResult {
    pub total_stake: f64,
    /// One per leg, in input order.
    pub leg_analyses: Vec<LegAnalysis>,
    /// Worst-case profit over complete legs. `None` while incomplete.
    pub guaranteed_profit: Option<f64>,
    pub guaranteed_roi: Option<f64>,
    /// Index of a leg attaining the guaranteed profit.
    pub binding_leg: Option<usize>,
    pub complete_legs: usize,
    pub is_complete: bool,
    /// Sum of 100 / odd over all legs, only once every leg is complete.
    /// Under 100 the odds admit a surebet.
    pub book_percentage: Option<f64>,
    pub bonus_stake: f64,
    pub extraction_rate: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HedgeResult {
    pub mode: HedgeMode,
    pub lay_stake: f64,
    pub liability: f64,
    pub profit_if_back_wins: f64,
    pub profit_if_lay_wins: f64,
    /// Worse of the two outcomes.
    pub settled_value: f64,
    /// Free-bet modes only.
    pub extraction_rate: Option<f64>,
}

impl HedgeResult {
    /// Signed cost of a qualifying bet (negative = money paid to unlock the bonus).
    pub fn qualifying_loss(&self) -> Option<f64> {
        (self.mode == HedgeMode::Qualifying).then_some(self.settled_value)
    }

    /// Guaranteed profit extracted from a free bet.
    pub fn extracted_profit(&self) -> Option<f64> {
        self.mode.is_free_bet().then_some(self.settled_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leg_completeness() {
        let unset = Leg::new("1", [StakeEntry::new("a", 0.0, 100.0)]);
        let unstaked = Leg::new("1", [StakeEntry::new("a", 2.1, 0.0)]);
        let even = Leg::new("1", [StakeEntry::new("a", 1.0, 100.0)]);
        let split = Leg::new(
            "1",
            [StakeEntry::new("a", 0.0, 100.0), StakeEntry::new("b", 2.1, 40.0)],
        );
        assert!(!unset.is_complete());
        assert!(!unstaked.is_complete());
        assert!(!even.is_complete(), "odd of exactly 1 pays nothing beyond stake");
        assert!(split.is_complete());
    }

    #[test]
    fn test_hedge_mode_wire_names() {
        let mode: HedgeMode = serde_json::from_str("\"FREE_BET_SNR\"").unwrap();
        assert_eq!(mode, HedgeMode::FreeBetSnr);
        assert_eq!(serde_json::to_string(&HedgeMode::Qualifying).unwrap(), "\"QUALIFYING\"");
        assert_eq!(HedgeMode::FreeBetSr.to_string(), "FREE_BET_SR");
    }

    #[test]
    fn test_entry_defaults_on_deserialize() {
        let entry: StakeEntry = serde_json::from_str(r#"{"odd": 2.5, "stake": 10}"#).unwrap();
        assert!(entry.bookmaker_ref.is_empty());
        assert!(!entry.is_bonus_stake);
        assert!(entry.is_placed());
    }
}
