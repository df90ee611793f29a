//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::state::{
    timer_state::ADJUST_STEP_SECONDS, AppState, Event, Preset, Theme,
};
use super::responses::{
    ApiResponse, HealthResponse, HistoryResponse, PresetRequest, SessionView, StatusResponse,
    ThemesResponse,
};

/// Dispatch an event and shape the response
fn apply(state: &AppState, event: Event) -> Result<Json<ApiResponse>, StatusCode> {
    match state.dispatch(event) {
        Ok(transition) => Ok(Json(ApiResponse::from_transition(event.name(), &transition))),
        Err(e) => {
            error!("Failed to apply {}: {}", event.name(), e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /start - Start or resume the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    apply(&state, Event::Start)
}

/// Handle POST /stop - Pause the countdown, keeping the remaining time
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    apply(&state, Event::Stop)
}

/// Handle POST /reset - Back to a full, idle work block
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    apply(&state, Event::Reset)
}

/// Handle POST /work/increase - +1 minute
pub async fn increase_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    apply(&state, Event::AdjustWork { delta_seconds: ADJUST_STEP_SECONDS })
}

/// Handle POST /work/decrease - -1 minute
pub async fn decrease_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    apply(&state, Event::AdjustWork { delta_seconds: -ADJUST_STEP_SECONDS })
}

/// Handle POST /preset - Select a work/break preset
pub async fn preset_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PresetRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let preset: Preset = match request.preset.parse() {
        Ok(preset) => preset,
        Err(e) => {
            warn!("Rejected preset request: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };
    info!("Preset {} selected", preset);
    apply(&state, Event::SelectPreset(preset))
}

/// Handle POST /choose/work - Start a work block after expiry
pub async fn choose_work_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    apply(&state, Event::ChooseWork)
}

/// Handle POST /choose/break - Start a break after expiry
pub async fn choose_break_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    apply(&state, Event::ChooseBreak)
}

/// Handle POST /dismiss - Close the expiry prompt without starting
pub async fn dismiss_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    apply(&state, Event::Dismiss)
}

/// Handle GET /themes - List palettes and the current selection
pub async fn themes_handler(State(state): State<Arc<AppState>>) -> Result<Json<ThemesResponse>, StatusCode> {
    match state.get_theme() {
        Ok(theme) => Ok(Json(themes_response(theme.index))),
        Err(e) => {
            error!("Failed to get theme: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /theme/:index - Select a palette
pub async fn select_theme_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<Json<ThemesResponse>, StatusCode> {
    match state.select_theme(index) {
        Ok(theme) => Ok(Json(themes_response(theme.index))),
        Err(e) => {
            warn!("Rejected theme selection: {}", e);
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

fn themes_response(selected: usize) -> ThemesResponse {
    ThemesResponse {
        selected,
        themes: Theme::all().map(|theme| theme.name.to_string()).collect(),
    }
}

/// Handle GET /history - Started work sessions, most recent first
pub async fn history_handler(State(state): State<Arc<AppState>>) -> Result<Json<HistoryResponse>, StatusCode> {
    match state.get_sessions() {
        Ok(sessions) => Ok(Json(HistoryResponse {
            count: sessions.len(),
            sessions: sessions.iter().map(SessionView::from).collect(),
        })),
        Err(e) => {
            error!("Failed to get session history: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer_state = match state.get_timer_state() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let theme = match state.get_theme() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get theme: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let sessions = match state.get_sessions() {
        Ok(s) => s.len(),
        Err(e) => {
            error!("Failed to get session history: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer: (&timer_state).into(),
        theme: theme.name.to_string(),
        theme_index: theme.index,
        sessions,
        notifications_enabled: state.notifications_enabled,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
