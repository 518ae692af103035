use crate::errors::AppError;
use crate::models::{with_placeholder, FilterRequest, Player, SelectRequest};
use crate::selection::PitcherFilter;
use crate::session::{load_pitcher, ChartsView};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{extract::State, response::Html, Json};
use tracing::error;

/// Longest pitcher id or name accepted by `/api/filter`.
pub const MAX_FILTER_LEN: usize = 256;

pub async fn index() -> Html<String> {
    Html(render_index())
}

pub async fn get_players(State(state): State<AppState>) -> Result<Json<Vec<Player>>, AppError> {
    let players = state.source.players().await.map_err(|err| {
        error!("failed to fetch players: {err}");
        err
    })?;
    Ok(Json(with_placeholder(players)))
}

pub async fn get_charts(State(state): State<AppState>) -> Json<ChartsView> {
    let session = state.session.lock().await;
    Json(session.charts())
}

pub async fn select(
    State(state): State<AppState>,
    Json(payload): Json<SelectRequest>,
) -> Result<Json<ChartsView>, AppError> {
    let player = payload.player.trim();
    if player.is_empty() {
        return Ok(get_charts(State(state)).await);
    }

    let view = load_pitcher(&state.session, state.source.as_ref(), player).await?;
    Ok(Json(view))
}

pub async fn filter(
    State(state): State<AppState>,
    Json(payload): Json<FilterRequest>,
) -> Result<Json<ChartsView>, AppError> {
    if payload.pitcher.len() > MAX_FILTER_LEN {
        return Err(AppError::bad_request("pitcher filter is too long"));
    }

    let mut session = state.session.lock().await;
    session.select(PitcherFilter::parse(&payload.pitcher));
    Ok(Json(session.charts()))
}
