//! Timer session controller
//!
//! A pure transition function over [`TimerState`]. The host applies the
//! returned state and executes the effects afterwards, in order.

use super::timer_state::{
    Phase, Preset, Status, TimerConfig, TimerState, MAX_SECONDS, MIN_WORK_SECONDS,
};

/// User actions and the periodic tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Start,
    Stop,
    Reset,
    /// One second elapsed for the countdown identified by `run_id`
    Tick { run_id: u64 },
    ChooseWork,
    ChooseBreak,
    /// Leave the expired prompt without starting anything
    Dismiss,
    AdjustWork { delta_seconds: i64 },
    SelectPreset(Preset),
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::Start => "start",
            Event::Stop => "stop",
            Event::Reset => "reset",
            Event::Tick { .. } => "tick",
            Event::ChooseWork => "choose-work",
            Event::ChooseBreak => "choose-break",
            Event::Dismiss => "dismiss",
            Event::AdjustWork { .. } => "adjust-work",
            Event::SelectPreset(_) => "preset",
        }
    }
}

/// Side effects requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Append a session record; the host supplies the timestamp
    RecordSession { work_minutes: u64, break_minutes: u64 },
    /// Countdown reached zero
    Notify,
    /// A new countdown began; any previous tick source must be replaced
    StartTicking { run_id: u64 },
    StopTicking,
}

/// Result of applying an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: TimerState,
    pub effects: Vec<Effect>,
    /// False when the event is not valid in the current status
    pub accepted: bool,
}

impl Transition {
    fn ignored(state: &TimerState) -> Self {
        Self {
            state: state.clone(),
            effects: Vec::new(),
            accepted: false,
        }
    }

    fn to(state: TimerState, effects: Vec<Effect>) -> Self {
        Self {
            state,
            effects,
            accepted: true,
        }
    }
}

/// Apply `event` to `state`
pub fn transition(state: &TimerState, event: Event) -> Transition {
    match (state.status, event) {
        (Status::Idle, Event::Start) => {
            let mut next = state.clone();
            if next.remaining_seconds == 0 {
                next.remaining_seconds = next.config.duration_for(next.phase);
            }
            enter_running(state, next)
        }
        (Status::Expired, Event::Start) | (Status::Expired, Event::ChooseWork) => {
            enter_phase(state, Phase::Work)
        }
        (Status::Expired, Event::ChooseBreak) => enter_phase(state, Phase::Break),

        (Status::Running, Event::Tick { run_id }) if run_id == state.run_id => {
            let mut next = state.clone();
            next.remaining_seconds = next.remaining_seconds.saturating_sub(1);
            if next.remaining_seconds == 0 {
                next.status = Status::Expired;
                Transition::to(next, vec![Effect::Notify, Effect::StopTicking])
            } else {
                Transition::to(next, Vec::new())
            }
        }

        (Status::Running, Event::Stop) => {
            let mut next = state.clone();
            next.status = Status::Idle;
            Transition::to(next, vec![Effect::StopTicking])
        }

        (status, Event::Reset) => {
            let next = TimerState {
                run_id: state.run_id,
                ..TimerState::new(state.config)
            };
            let effects = if status == Status::Running {
                vec![Effect::StopTicking]
            } else {
                Vec::new()
            };
            Transition::to(next, effects)
        }

        (Status::Expired, Event::Dismiss) => Transition::to(
            TimerState {
                run_id: state.run_id,
                ..TimerState::new(state.config)
            },
            Vec::new(),
        ),

        (_, Event::AdjustWork { delta_seconds }) => {
            let adjusted = match state.config.work_seconds.checked_add_signed(delta_seconds) {
                Some(seconds) if (MIN_WORK_SECONDS..=MAX_SECONDS).contains(&seconds) => seconds,
                _ => return Transition::ignored(state),
            };
            let config = TimerConfig {
                work_seconds: adjusted,
                ..state.config
            };
            Transition::to(reconfigure(state, config), Vec::new())
        }

        (_, Event::SelectPreset(preset)) => {
            Transition::to(reconfigure(state, TimerConfig::from(preset)), Vec::new())
        }

        _ => Transition::ignored(state),
    }
}

/// Swap in a new config; an idle timer re-syncs to the work duration
fn reconfigure(state: &TimerState, config: TimerConfig) -> TimerState {
    let mut next = state.clone();
    next.config = config;
    if next.is_idle() {
        next.phase = Phase::Work;
        next.remaining_seconds = config.work_seconds;
    }
    next
}

fn enter_phase(state: &TimerState, phase: Phase) -> Transition {
    let mut next = state.clone();
    next.phase = phase;
    next.remaining_seconds = next.config.duration_for(phase);
    enter_running(state, next)
}

/// A zero-length countdown never enters Running
fn enter_running(state: &TimerState, mut next: TimerState) -> Transition {
    if next.remaining_seconds == 0 {
        return Transition::ignored(state);
    }
    next.status = Status::Running;
    next.run_id += 1;

    let mut effects = vec![Effect::StartTicking { run_id: next.run_id }];
    if next.phase == Phase::Work {
        effects.push(Effect::RecordSession {
            work_minutes: next.config.work_minutes(),
            break_minutes: next.config.break_minutes(),
        });
    }
    Transition::to(next, effects)
}
