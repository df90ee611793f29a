//! Pomodoro Server - A Pomodoro timer daemon
//!
//! This library provides the timer session controller, its host state,
//! the countdown ticker and the HTTP surface used to drive it.

pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
