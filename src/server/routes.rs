use crate::server::dispatch;
use crate::state::{
    AppState, ArbitrageRequest, CalcRequest, CalcResponse, DistributeRequest, HedgeRequest,
    LegRequest, SettleRequest,
};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use std::sync::Arc;

type CalcReply = (StatusCode, Json<CalcResponse>);

fn respond(state: &AppState, request: CalcRequest) -> CalcReply {
    let kind = request.kind();
    let response = dispatch::evaluate(request, &state.config);
    state.counters.record(&response);

    let status = if response.is_rejected() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::OK
    };
    tracing::debug!(kind, status = status.as_u16(), "calculation served");
    (status, Json(response))
}

/// POST /api/calc -- any calculation, tagged by `type`
pub async fn post_calc(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CalcRequest>,
) -> CalcReply {
    respond(&state, request)
}

/// POST /api/leg -- weighted odd of one leg
pub async fn post_leg(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LegRequest>,
) -> CalcReply {
    respond(&state, CalcRequest::Leg(body))
}

/// POST /api/arbitrage -- guaranteed profit of a book
pub async fn post_arbitrage(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ArbitrageRequest>,
) -> CalcReply {
    respond(&state, CalcRequest::Arbitrage(body))
}

/// POST /api/hedge -- lay stake for a qualifying or free bet
pub async fn post_hedge(
    State(state): State<Arc<AppState>>,
    Json(body): Json<HedgeRequest>,
) -> CalcReply {
    respond(&state, CalcRequest::Hedge(body))
}

/// POST /api/distribute -- stakes around a reference leg
pub async fn post_distribute(
    State(state): State<Arc<AppState>>,
    Json(body): Json<DistributeRequest>,
) -> CalcReply {
    respond(&state, CalcRequest::Distribute(body))
}

/// POST /api/settle -- realised vs expected profit
pub async fn post_settle(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SettleRequest>,
) -> CalcReply {
    respond(&state, CalcRequest::Settle(body))
}

/// GET /api/health
pub async fn get_health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "started_at": state.started_at,
    }))
}

/// GET /api/counters -- performance counters (lock-free reads)
pub async fn get_counters(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    use portable_atomic::Ordering::Relaxed;
    Json(serde_json::json!({
        "calculations": state.counters.calculations.load(Relaxed),
        "rejections": state.counters.rejections.load(Relaxed),
        "ws_sessions": state.counters.ws_sessions.load(Relaxed),
        "ws_messages_sent": state.counters.ws_messages_sent.load(Relaxed),
    }))
}
