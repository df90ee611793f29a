//! External service module
//!
//! This module contains the platform integrations used by the timer,
//! currently desktop notifications.

pub mod notifications;

// Re-export main types
pub use notifications::{check_permission, DesktopNotifier, Notification, Notifier, CHANNEL_ID};
