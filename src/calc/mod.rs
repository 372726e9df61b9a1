pub mod arbitrage;
pub mod distribution;
pub mod hedge;
pub mod leg;
pub mod rounding;
pub mod settlement;
pub mod types;
pub mod validation;
pub mod weighted;

pub use arbitrage::{resolve_arbitrage, resolve_arbitrage_checked};
pub use distribution::{distribute_stakes, DistributionMode, DistributionResult, StakePlan};
pub use hedge::solve_hedge;
pub use leg::evaluate_leg_profit;
pub use rounding::Rounded;
pub use settlement::{settle, LegOutcome, SettlementResult};
pub use types::*;
pub use validation::{audit_legs, check_hedge, check_legs};
pub use weighted::resolve_leg;
