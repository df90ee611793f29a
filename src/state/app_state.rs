//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use super::{
    machine::{transition, Effect, Event, Transition},
    SessionLog, SessionRecord, Theme, TimerConfig, TimerState,
};
use crate::services::{Notification, Notifier};

/// Countdown cadence
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Published whenever a countdown starts or stops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSignal {
    pub run_id: u64,
    pub running: bool,
}

/// Owns the timer state and executes the effects of each transition
#[derive(Debug)]
pub struct AppState {
    /// Current controller state
    pub timer_state: Arc<Mutex<TimerState>>,
    /// Started work sessions, most recent first
    pub sessions: Arc<Mutex<SessionLog>>,
    pub theme: Arc<Mutex<Theme>>,
    /// Alert delivery and whether it was permitted at launch
    pub notifier: Arc<dyn Notifier>,
    pub notifications_enabled: bool,
    pub tick_interval: Duration,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for countdown start/stop, consumed by the ticker
    pub run_signal_tx: broadcast::Sender<RunSignal>,
    /// Channel for timer updates
    pub timer_update_tx: watch::Sender<TimerState>,
    /// Keep the receiver alive to prevent channel closure
    pub _timer_update_rx: watch::Receiver<TimerState>,
}

impl AppState {
    /// Create a new AppState with an idle timer
    pub fn new(
        port: u16,
        host: String,
        config: TimerConfig,
        theme: Theme,
        notifier: Arc<dyn Notifier>,
        notifications_enabled: bool,
    ) -> Self {
        let initial = TimerState::new(config);
        let (run_signal_tx, _) = broadcast::channel(100);
        let (timer_update_tx, timer_update_rx) = watch::channel(initial.clone());

        Self {
            timer_state: Arc::new(Mutex::new(initial)),
            sessions: Arc::new(Mutex::new(SessionLog::new())),
            theme: Arc::new(Mutex::new(theme)),
            notifier,
            notifications_enabled,
            tick_interval: TICK_INTERVAL,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            run_signal_tx,
            timer_update_tx,
            _timer_update_rx: timer_update_rx,
        }
    }

    /// Apply an event to the timer and run the resulting effects
    pub fn dispatch(&self, event: Event) -> Result<Transition, String> {
        let mut timer_state = self.timer_state.lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;

        let result = transition(&timer_state, event);
        *timer_state = result.state.clone();
        drop(timer_state); // Release the lock before running effects

        if !matches!(event, Event::Tick { .. }) {
            if result.accepted {
                info!("{} -> {} ({} {})", event.name(), result.state.status.as_str(),
                      result.state.phase.as_str(), result.state.display());
            } else {
                debug!("{} ignored while {}", event.name(), result.state.status.as_str());
            }
            self.track_action(event.name());
        }

        for effect in &result.effects {
            self.run_effect(*effect, &result.state)?;
        }

        if result.accepted {
            if let Err(e) = self.timer_update_tx.send(result.state.clone()) {
                warn!("Failed to send timer update: {}", e);
            }
        }

        Ok(result)
    }

    fn run_effect(&self, effect: Effect, state: &TimerState) -> Result<(), String> {
        match effect {
            Effect::RecordSession { work_minutes, break_minutes } => {
                let mut sessions = self.sessions.lock()
                    .map_err(|e| format!("Failed to lock session log: {}", e))?;
                sessions.record(Utc::now(), work_minutes, break_minutes);
                debug!("Recorded {}/{} session ({} total)", work_minutes, break_minutes, sessions.len());
            }
            Effect::Notify => {
                info!("Countdown finished");
                if self.notifications_enabled {
                    if let Err(e) = self.notifier.notify(&Notification::times_up()) {
                        warn!("Failed to send notification: {}", e);
                    }
                } else {
                    debug!("Notifications not permitted, alert suppressed");
                }
            }
            Effect::StartTicking { run_id } => self.signal_run(RunSignal { run_id, running: true }),
            Effect::StopTicking => self.signal_run(RunSignal { run_id: state.run_id, running: false }),
        }
        Ok(())
    }

    fn signal_run(&self, signal: RunSignal) {
        // No receiver just means the ticker is not up yet
        if let Err(e) = self.run_signal_tx.send(signal) {
            debug!("No ticker listening for {:?}: {}", signal, e);
        }
    }

    fn track_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Get current timer state
    pub fn get_timer_state(&self) -> Result<TimerState, String> {
        self.timer_state.lock()
            .map(|state| state.clone())
            .map_err(|e| format!("Failed to lock timer state: {}", e))
    }

    /// Subscribe to timer updates
    pub fn watch_timer(&self) -> watch::Receiver<TimerState> {
        self.timer_update_tx.subscribe()
    }

    /// Snapshot of the session log, most recent first
    pub fn get_sessions(&self) -> Result<Vec<SessionRecord>, String> {
        self.sessions.lock()
            .map(|log| log.entries().cloned().collect())
            .map_err(|e| format!("Failed to lock session log: {}", e))
    }

    pub fn get_theme(&self) -> Result<Theme, String> {
        self.theme.lock()
            .map(|theme| *theme)
            .map_err(|e| format!("Failed to lock theme: {}", e))
    }

    /// Select a theme by index; out-of-range leaves the selection unchanged
    pub fn select_theme(&self, index: usize) -> Result<Theme, String> {
        let selected = Theme::from_index(index)?;
        let mut theme = self.theme.lock()
            .map_err(|e| format!("Failed to lock theme: {}", e))?;
        *theme = selected;
        drop(theme);

        info!("Theme set to {} ({})", selected.name, selected.index);
        self.track_action("theme");
        Ok(selected)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
