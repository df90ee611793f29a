//! Timer state structure and duration configuration

use std::{fmt, str::FromStr};
use serde::{Deserialize, Serialize};

/// Default work block length in minutes
pub const DEFAULT_WORK_MINUTES: u64 = 25;
/// Default break length in minutes
pub const DEFAULT_BREAK_MINUTES: u64 = 5;
/// Step applied by the +1 min / -1 min actions
pub const ADJUST_STEP_SECONDS: i64 = 60;
/// The work duration can never be adjusted below this
pub const MIN_WORK_SECONDS: u64 = 60;
/// Upper bound for either duration
pub const MAX_MINUTES: u64 = 24 * 60;
pub const MAX_SECONDS: u64 = MAX_MINUTES * 60;

/// Configured work/break duration pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    pub work_seconds: u64,
    pub break_seconds: u64,
}

impl TimerConfig {
    /// Create a config from minute values, clamped to [`MAX_MINUTES`]
    pub fn from_minutes(work_minutes: u64, break_minutes: u64) -> Self {
        Self {
            work_seconds: work_minutes.min(MAX_MINUTES) * 60,
            break_seconds: break_minutes.min(MAX_MINUTES) * 60,
        }
    }

    pub fn work_minutes(&self) -> u64 {
        self.work_seconds / 60
    }

    pub fn break_minutes(&self) -> u64 {
        self.break_seconds / 60
    }

    /// Mode label as shown to the user, e.g. "25/5"
    pub fn mode_label(&self) -> String {
        format!("{}/{}", self.work_minutes(), self.break_minutes())
    }

    /// Configured duration for a phase
    pub fn duration_for(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Work => self.work_seconds,
            Phase::Break => self.break_seconds,
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self::from_minutes(DEFAULT_WORK_MINUTES, DEFAULT_BREAK_MINUTES)
    }
}

impl From<Preset> for TimerConfig {
    fn from(preset: Preset) -> Self {
        let (work, rest) = preset.minutes();
        Self::from_minutes(work, rest)
    }
}

/// Quick-select (work, break) pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// 25 minutes of work, 5 of rest
    Classic,
    /// 35/10
    Extended,
    /// 50/10
    Deep,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Classic, Preset::Extended, Preset::Deep];

    /// (work, break) in minutes
    pub fn minutes(&self) -> (u64, u64) {
        match self {
            Preset::Classic => (25, 5),
            Preset::Extended => (35, 10),
            Preset::Deep => (50, 10),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Preset::Classic => "25/5",
            Preset::Extended => "35/10",
            Preset::Deep => "50/10",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Classic => "classic",
            Preset::Extended => "extended",
            Preset::Deep => "deep",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Preset {
    type Err = String;

    /// Accepts either the label ("35/10") or the name ("extended")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Preset::ALL
            .into_iter()
            .find(|p| p.label() == wanted || p.name() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = Preset::ALL.iter().map(|p| p.label()).collect();
                format!("Unknown preset '{}', expected one of {}", s, known.join(", "))
            })
    }
}

/// Whether the active countdown is work time or break time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Break,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Work => "work",
            Phase::Break => "break",
        }
    }
}

/// Controller status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Not running, waiting for Start
    Idle,
    /// Counting down
    Running,
    /// Countdown reached zero, waiting for the user to pick the next phase
    Expired,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Idle => "idle",
            Status::Running => "running",
            Status::Expired => "expired",
        }
    }
}

/// Timer state for the countdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub config: TimerConfig,
    pub remaining_seconds: u64,
    pub status: Status,
    pub phase: Phase,
    /// Bumped on every entry into Running; ticks carrying an older id are stale
    pub run_id: u64,
}

impl TimerState {
    /// Create an idle timer loaded with the configured work duration
    pub fn new(config: TimerConfig) -> Self {
        Self {
            config,
            remaining_seconds: config.work_seconds,
            status: Status::Idle,
            phase: Phase::Work,
            run_id: 0,
        }
    }

    /// Check if the timer is counting down
    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    pub fn is_idle(&self) -> bool {
        self.status == Status::Idle
    }

    pub fn is_expired(&self) -> bool {
        self.status == Status::Expired
    }

    /// Remaining time as MM:SS
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.remaining_seconds / 60, self.remaining_seconds % 60)
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(TimerConfig::default())
    }
}
