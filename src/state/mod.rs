//! State management module
//!
//! This module contains the timer controller, its host state, the session
//! log and the theme selection.

pub mod app_state;
pub mod machine;
pub mod session_log;
pub mod theme;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, RunSignal, TICK_INTERVAL};
pub use machine::{transition, Effect, Event, Transition};
pub use session_log::{SessionLog, SessionRecord};
pub use theme::{Theme, THEME_NAMES};
pub use timer_state::{Phase, Preset, Status, TimerConfig, TimerState};
