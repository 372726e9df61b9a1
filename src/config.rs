use surebet_desk::calc::validation;
use surebet_desk::errors::{EngineError, EngineResult};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    /// Exchange commission applied when a hedge request omits one.
    pub default_commission_pct: f64,
    pub max_legs: usize,
    pub max_entries_per_leg: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: 3001,
            default_commission_pct: 5.0,
            max_legs: 12,
            max_entries_per_leg: 8,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> EngineResult<Self> {
        dotenvy::dotenv().ok();

        let server_port = env_var_or("SERVER_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| EngineError::Config(format!("SERVER_PORT: {e}")))?;

        let default_commission_pct = parse_commission(&env_var_or("DEFAULT_COMMISSION_PCT", "5.0"))?;

        let max_legs = env_var_or("MAX_LEGS", "12")
            .parse::<usize>()
            .map_err(|e| EngineError::Config(format!("MAX_LEGS: {e}")))?;

        let max_entries_per_leg = env_var_or("MAX_ENTRIES_PER_LEG", "8")
            .parse::<usize>()
            .map_err(|e| EngineError::Config(format!("MAX_ENTRIES_PER_LEG: {e}")))?;

        if max_legs < 2 {
            return Err(EngineError::Config("MAX_LEGS: must be at least 2".into()));
        }

        Ok(Self {
            server_port,
            default_commission_pct,
            max_legs,
            max_entries_per_leg,
        })
    }
}

fn parse_commission(raw: &str) -> EngineResult<f64> {
    let pct = raw
        .parse::<f64>()
        .map_err(|e| EngineError::Config(format!("DEFAULT_COMMISSION_PCT: {e}")))?;
    validation::check_commission("DEFAULT_COMMISSION_PCT", pct)
        .map_err(|e| EngineError::Config(e.to_string()))?;
    Ok(pct)
}

fn env_var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
