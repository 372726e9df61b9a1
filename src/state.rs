use crate::config::AppConfig;
use portable_atomic::{AtomicU64, Ordering};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use surebet_desk::calc::{
    ArbitrageResult, DistributionResult, Entries, HedgeInputs, HedgeMode, HedgeResult, Leg,
    LegOutcome, LegResolution, SettlementResult, StakePlan,
};
use surebet_desk::errors::{Reason, ValidationError};

// ── Requests INTO the calculator ──

#[derive(Debug, Clone, Deserialize)]
pub struct LegRequest {
    pub entries: Entries,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArbitrageRequest {
    pub legs: Vec<Leg>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HedgeRequest {
    pub back_stake: f64,
    pub back_odd: f64,
    pub lay_odd: f64,
    /// Falls back to the configured default.
    #[serde(default)]
    pub commission_pct: Option<f64>,
    pub mode: HedgeMode,
}

impl HedgeRequest {
    pub fn into_inputs(self, default_commission_pct: f64) -> HedgeInputs {
        HedgeInputs {
            back_stake: self.back_stake,
            back_odd: self.back_odd,
            lay_odd: self.lay_odd,
            commission_pct: self.commission_pct.unwrap_or(default_commission_pct),
            mode: self.mode,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DistributeRequest {
    pub legs: Vec<Leg>,
    pub plan: StakePlan,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SettleRequest {
    pub legs: Vec<Leg>,
    pub outcomes: Vec<LegOutcome>,
}

/// One calculation, tagged by kind. The same shape travels over HTTP and
/// over the WebSocket.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CalcRequest {
    Leg(LegRequest),
    Arbitrage(ArbitrageRequest),
    Hedge(HedgeRequest),
    Distribute(DistributeRequest),
    Settle(SettleRequest),
}

impl CalcRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Leg(_) => "leg",
            Self::Arbitrage(_) => "arbitrage",
            Self::Hedge(_) => "hedge",
            Self::Distribute(_) => "distribute",
            Self::Settle(_) => "settle",
        }
    }
}

// ── Responses OUT of the calculator ──

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CalcResponse {
    Leg(LegResolution),
    Arbitrage(ArbitrageResult),
    Hedge(HedgeResult),
    Distribute(DistributionResult),
    Settle(SettlementResult),
    Rejected {
        field: String,
        reason: Reason,
        message: String,
    },
}

impl CalcResponse {
    #[inline]
    pub fn is_rejected(&self) -> bool {
        matches!(self, CalcResponse::Rejected { .. })
    }
}

impl From<ValidationError> for CalcResponse {
    fn from(e: ValidationError) -> Self {
        CalcResponse::Rejected {
            message: e.to_string(),
            field: e.field,
            reason: e.reason,
        }
    }
}

// ── Performance Counters (lock-free) ──

pub struct PerfCounters {
    pub calculations: AtomicU64,
    pub rejections: AtomicU64,
    pub ws_sessions: AtomicU64,
    pub ws_messages_sent: AtomicU64,
}

impl PerfCounters {
    pub fn new() -> Self {
        Self {
            calculations: AtomicU64::new(0),
            rejections: AtomicU64::new(0),
            ws_sessions: AtomicU64::new(0),
            ws_messages_sent: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn record(&self, response: &CalcResponse) {
        self.calculations.fetch_add(1, Ordering::Relaxed);
        if response.is_rejected() {
            self.rejections.fetch_add(1, Ordering::Relaxed);
        }
    }
}

// ── Application shared state (immutable config + atomics, no locks) ──

pub struct AppState {
    pub config: AppConfig,
    pub counters: PerfCounters,
    pub started_at: String,
}

impl AppState {
    pub fn new(config: AppConfig) -> Arc<Self> {
        Arc::new(Self {
            config,
            counters: PerfCounters::new(),
            started_at: chrono::Utc::now().to_rfc3339(),
        })
    }
}
