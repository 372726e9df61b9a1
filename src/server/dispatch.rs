use crate::config::AppConfig;
use crate::state::{CalcRequest, CalcResponse};
use surebet_desk::calc::{self, Leg};
use surebet_desk::errors::{Reason, ValidationError};

/// Run one calculation. Shared by the HTTP routes and the WebSocket, so
/// both surfaces answer identically. Never fails: rejections are a response.
pub fn evaluate(request: CalcRequest, config: &AppConfig) -> CalcResponse {
    match run(request, config) {
        Ok(resp) => resp,
        Err(e) => {
            tracing::debug!(field = %e.field, reason = %e.reason, "calculation rejected");
            e.into()
        }
    }
}

fn run(request: CalcRequest, config: &AppConfig) -> Result<CalcResponse, ValidationError> {
    match request {
        CalcRequest::Leg(req) => {
            check_entry_count("entries", req.entries.len(), config)?;
            validate_entries(&req.entries)?;
            Ok(CalcResponse::Leg(calc::resolve_leg(&req.entries)))
        }
        CalcRequest::Arbitrage(req) => {
            check_limits(&req.legs, config)?;
            Ok(CalcResponse::Arbitrage(calc::resolve_arbitrage_checked(&req.legs)?))
        }
        CalcRequest::Hedge(req) => {
            let inputs = req.into_inputs(config.default_commission_pct);
            Ok(CalcResponse::Hedge(calc::solve_hedge(&inputs)?))
        }
        CalcRequest::Distribute(req) => {
            check_limits(&req.legs, config)?;
            Ok(CalcResponse::Distribute(calc::distribute_stakes(&req.legs, &req.plan)?))
        }
        CalcRequest::Settle(req) => {
            check_limits(&req.legs, config)?;
            Ok(CalcResponse::Settle(calc::settle(&req.legs, &req.outcomes)?))
        }
    }
}

fn check_limits(legs: &[Leg], config: &AppConfig) -> Result<(), ValidationError> {
    if legs.len() > config.max_legs {
        return Err(ValidationError::new("legs", Reason::TooMany));
    }
    for (i, leg) in legs.iter().enumerate() {
        check_entry_count(&format!("legs[{i}].entries"), leg.entries.len(), config)?;
    }
    Ok(())
}

fn check_entry_count(field: &str, count: usize, config: &AppConfig) -> Result<(), ValidationError> {
    if count > config.max_entries_per_leg {
        return Err(ValidationError::new(field, Reason::TooMany));
    }
    Ok(())
}

/// A lone leg is checked with the same field paths as leg 0 of a book.
fn validate_entries(entries: &[calc::StakeEntry]) -> Result<(), ValidationError> {
    let leg = Leg::new("", entries.iter().cloned());
    calc::check_legs(std::slice::from_ref(&leg)).map_err(|e| ValidationError {
        field: e.field.trim_start_matches("legs[0].").to_string(),
        reason: e.reason,
    })
}
