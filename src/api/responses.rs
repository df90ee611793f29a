//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{Phase, SessionRecord, Status, TimerState, Transition};

/// Timer snapshot included in every timer response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerView {
    pub status: Status,
    pub phase: Phase,
    pub running: bool,
    pub remaining_seconds: u64,
    /// Remaining time as MM:SS
    pub display: String,
    pub mode: String,
    pub work_seconds: u64,
    pub break_seconds: u64,
}

impl From<&TimerState> for TimerView {
    fn from(state: &TimerState) -> Self {
        Self {
            status: state.status,
            phase: state.phase,
            running: state.is_running(),
            remaining_seconds: state.remaining_seconds,
            display: state.display(),
            mode: state.config.mode_label(),
            work_seconds: state.config.work_seconds,
            break_seconds: state.config.break_seconds,
        }
    }
}

/// API response structure for action endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Controller status after the action, or "ignored"
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerView,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, timer: &TimerState) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timer: TimerView::from(timer),
        }
    }

    /// Build the response for a dispatched action
    pub fn from_transition(action: &str, transition: &Transition) -> Self {
        let state = &transition.state;
        if transition.accepted {
            Self::new(
                state.status.as_str().to_string(),
                format!("{} applied", action),
                state,
            )
        } else {
            Self::new(
                "ignored".to_string(),
                format!("{} has no effect while {}", action, state.status.as_str()),
                state,
            )
        }
    }
}

/// Body of POST /preset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetRequest {
    pub preset: String,
}

/// Enhanced status response with timer information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerView,
    pub theme: String,
    pub theme_index: usize,
    pub sessions: usize,
    pub notifications_enabled: bool,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// One history entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    pub start_timestamp_ms: i64,
    pub started_at: Option<DateTime<Utc>>,
    pub work_minutes: u64,
    pub break_minutes: u64,
    pub mode: String,
    /// Local start time, "HH:MM, DD Mon"
    pub label: String,
}

impl From<&SessionRecord> for SessionView {
    fn from(record: &SessionRecord) -> Self {
        Self {
            start_timestamp_ms: record.start_timestamp_ms,
            started_at: record.started_at(),
            work_minutes: record.work_minutes,
            break_minutes: record.break_minutes,
            mode: record.mode_label(),
            label: record.local_time_label(),
        }
    }
}

/// Session history, most recent first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub count: usize,
    pub sessions: Vec<SessionView>,
}

/// Theme list and current selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemesResponse {
    pub selected: usize,
    pub themes: Vec<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
