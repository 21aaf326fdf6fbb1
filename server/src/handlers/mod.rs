//! HTTP handlers for the move-selection API.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use shared::{ErrorKind, ErrorResponse, MoveRequest, MoveResponse};
use std::sync::Arc;
use tictactoe_core::{select_move_for, EngineError, SearchConfig};
use tracing::{error, info, warn};


pub struct AppState {
    /// Search defaults layered under every request's config.
    pub engine_defaults: SearchConfig,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `POST /api/move`: picks a move for the side to move on the posted board.
///
/// The search runs on the blocking pool so long MCTS or IDS runs do not stall
/// the runtime. A request may lower the server's time budget and simulation
/// count but never raise them.
pub async fn select_move(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MoveRequest>, JsonRejection>,
) -> Result<Json<MoveResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "rejected move request");
        api_error(ErrorKind::InvalidRequest, rejection.body_text())
    })?;

    let board = request.board().map_err(|err| engine_error(&err))?;
    let config = request.config_over(&state.engine_defaults);
    let algorithm = request.algorithm;

    let algorithm_name = algorithm.clone();
    let outcome = tokio::task::spawn_blocking(move || select_move_for(&board, &algorithm, &config))
        .await
        .map_err(|err| {
            error!(error = %err, "search task failed");
            api_error(ErrorKind::Internal, "search task failed")
        })?;

    let (mv, stats) = outcome.map_err(|err| engine_error(&err))?;
    info!(
        algorithm = %algorithm_name,
        position = mv.position,
        evaluation = ?mv.evaluation,
        depth = stats.depth,
        nodes = stats.nodes,
        simulations = stats.simulations,
        time_ms = stats.time_ms,
        timed_out = stats.timed_out,
        "move selected"
    );
    Ok(Json(MoveResponse::new(mv, stats)))
}

pub const fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidBoard | ErrorKind::UnknownAlgorithm | ErrorKind::InvalidRequest => {
            StatusCode::BAD_REQUEST
        }
        ErrorKind::NoLegalMoves => StatusCode::CONFLICT,
        ErrorKind::IllegalMove | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn api_error(kind: ErrorKind, message: impl Into<String>) -> ApiError {
    (status_for(kind), Json(ErrorResponse::new(kind, message)))
}

fn engine_error(err: &EngineError) -> ApiError {
    let response = ErrorResponse::from(err);
    if matches!(response.kind, ErrorKind::IllegalMove) {
        error!(error = %err, "engine produced an illegal move");
    } else {
        info!(kind = err.kind(), error = %err, "move request refused");
    }
    (status_for(response.kind), Json(response))
}
