use axum::{
    debug_handler,
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use shared::page_view::PublicPage;
use shared::shared_spin_tracker::{
    EditHistoryRequest, SetLimitRequest, SetLimitResponse, SubmitSpinRequest,
    SubmitSpinResponse, SwitchPageRequest, TrackerStateResponse,
};
use tracing::info;
use validator::Validate;

use crate::error::Error;
use crate::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/state", get(get_state))
        .route("/pages/:index", get(get_page))
        .route("/spin", post(submit_spin))
        .route("/limit", post(set_limit))
        .route("/history", post(edit_history))
        .route("/page", post(switch_page))
        .route("/restart", post(restart))
}

// Every handler holds the registry lock for its whole read-modify-write so
// the ranking is always computed from a consistent history + limit.

#[debug_handler]
async fn get_state(State(state): State<AppState>) -> Json<TrackerStateResponse> {
    let registry = state.registry.lock().await;
    Json(registry.to_public())
}

#[debug_handler]
async fn get_page(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<PublicPage>, Error> {
    let registry = state.registry.lock().await;
    let page = registry.page(index)?;
    Ok(Json(page.to_public()))
}

#[debug_handler]
async fn submit_spin(
    State(state): State<AppState>,
    Json(request): Json<SubmitSpinRequest>,
) -> Result<Json<SubmitSpinResponse>, Error> {
    let spin = request.spin()?;
    let mut registry = state.registry.lock().await;
    let outcome = registry.submit_spin(spin);

    if let Some(hit) = &outcome.hit {
        info!(
            "HIT on page {}: {} from slot S{} at cycle C{}",
            registry.active_index() + 1,
            hit.number,
            hit.previous_position,
            hit.cycle
        );
    }

    Ok(Json(SubmitSpinResponse {
        outcome,
        state: registry.to_public(),
    }))
}

#[debug_handler]
async fn set_limit(
    State(state): State<AppState>,
    Json(request): Json<SetLimitRequest>,
) -> Json<SetLimitResponse> {
    let mut registry = state.registry.lock().await;
    let limit = match request.requested_limit() {
        Some(requested) => {
            let limit = registry.set_unique_limit(requested);
            if i64::from(limit) != requested {
                info!("Unique limit {} clamped to {}", requested, limit);
            }
            limit
        }
        None => {
            info!("Ignoring non-numeric unique limit {:?}", request.limit);
            registry.active_page().unique_limit()
        }
    };
    Json(SetLimitResponse {
        limit,
        state: registry.to_public(),
    })
}

#[debug_handler]
async fn edit_history(
    State(state): State<AppState>,
    Json(request): Json<EditHistoryRequest>,
) -> Result<Json<TrackerStateResponse>, Error> {
    request.validate()?;

    let mut registry = state.registry.lock().await;
    match (request.numbers, request.text) {
        (Some(numbers), _) => registry.replace_history(&numbers),
        (None, Some(text)) => registry.replace_history_text(&text),
        (None, None) => registry.replace_history(&[]),
    }
    info!(
        "Page {} history replaced ({} spins)",
        registry.active_index() + 1,
        registry.active_page().history_len()
    );
    Ok(Json(registry.to_public()))
}

#[debug_handler]
async fn switch_page(
    State(state): State<AppState>,
    Json(request): Json<SwitchPageRequest>,
) -> Result<Json<TrackerStateResponse>, Error> {
    let mut registry = state.registry.lock().await;
    registry.switch_active(request.index)?;
    Ok(Json(registry.to_public()))
}

#[debug_handler]
async fn restart(State(state): State<AppState>) -> Json<TrackerStateResponse> {
    let mut registry = state.registry.lock().await;
    registry.restart_all();
    info!("All pages restarted");
    Json(registry.to_public())
}
