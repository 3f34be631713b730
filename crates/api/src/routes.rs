use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use projection::Scenario;

use crate::{
    dto::{
        ImportResponseDto, ParametersDto, ResultsDto, SessionDto, SessionPatchDto, StatusDto,
    },
    state::AppState,
    ws,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/parameters", get(get_parameters).put(put_parameters))
        .route("/sessions", get(get_sessions))
        .route("/sessions/import", post(import_session_flags))
        .route("/sessions/:sequence_index", patch(patch_session))
        .route("/results", get(get_results))
        .route("/results/:scenario/export.csv", get(export_outcome_csv))
        .route("/status", get(get_status))
        .route("/ws/events", get(ws::events_socket))
        .with_state(state)
}

async fn get_parameters(State(state): State<AppState>) -> Json<ParametersDto> {
    Json(ParametersDto::from_params(&state.parameters().await))
}

async fn put_parameters(
    State(state): State<AppState>,
    Json(dto): Json<ParametersDto>,
) -> Result<Json<ParametersDto>, (StatusCode, String)> {
    let parameters = dto
        .to_params()
        .map_err(|err| (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()))?;
    state.update_parameters(parameters).await;

    Ok(Json(ParametersDto::from_params(&state.parameters().await)))
}

async fn get_sessions(State(state): State<AppState>) -> Json<Vec<SessionDto>> {
    let sessions = state.sessions().await;
    Json(sessions.iter().map(SessionDto::from_session).collect())
}

async fn patch_session(
    State(state): State<AppState>,
    Path(sequence_index): Path<usize>,
    Json(patch): Json<SessionPatchDto>,
) -> Result<Json<SessionDto>, StatusCode> {
    state
        .toggle_session(sequence_index, patch.morning, patch.afternoon)
        .await
        .map(|session| Json(SessionDto::from_session(&session)))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn import_session_flags(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ImportResponseDto>, (StatusCode, String)> {
    let applied_rows = state
        .import_flags(&body)
        .await
        .map_err(|err| (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()))?;

    Ok(Json(ImportResponseDto { applied_rows }))
}

async fn get_results(State(state): State<AppState>) -> Json<ResultsDto> {
    Json(ResultsDto::from_results(&state.results().await))
}

async fn export_outcome_csv(
    State(state): State<AppState>,
    Path(scenario): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    let scenario = Scenario::parse(&scenario).ok_or(StatusCode::NOT_FOUND)?;
    let csv = state
        .export_csv(scenario)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], csv))
}

async fn get_status(State(state): State<AppState>) -> Json<StatusDto> {
    let status = state.status().await;
    Json(StatusDto {
        revision: status.revision,
        active_half_sessions: status.active_half_sessions,
        total_half_sessions: status.total_half_sessions,
        logged_events: status.logged_events,
    })
}
