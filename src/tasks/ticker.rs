//! Countdown tick background task

use std::sync::Arc;
use tokio::{
    sync::broadcast::{self, error::RecvError},
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, error, info, warn};

use crate::state::{machine::Event, AppState, RunSignal};

/// Background task that drives the countdown while the timer is running.
///
/// Exactly one countdown is active at a time. A newer run id replaces the
/// current countdown; a stop signal for the current run ends it.
pub async fn ticker_task(state: Arc<AppState>) {
    info!("Starting ticker task");

    let mut signal_rx = state.run_signal_tx.subscribe();
    let mut pending: Option<u64> = current_run(&state);

    loop {
        let run_id = match pending.take() {
            Some(run_id) => run_id,
            None => match signal_rx.recv().await {
                Ok(RunSignal { run_id, running: true }) => run_id,
                Ok(signal) => {
                    debug!("Ticker idle, ignoring {:?}", signal);
                    continue;
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Ticker lagged by {} signals, resyncing", skipped);
                    pending = current_run(&state);
                    continue;
                }
                Err(RecvError::Closed) => {
                    info!("Run signal channel closed, ticker exiting");
                    return;
                }
            },
        };

        pending = countdown(&state, &mut signal_rx, run_id).await;
    }
}

/// Run id of the countdown in progress, if any
fn current_run(state: &AppState) -> Option<u64> {
    match state.get_timer_state() {
        Ok(timer) if timer.is_running() => Some(timer.run_id),
        Ok(_) => None,
        Err(e) => {
            error!("Failed to read timer state: {}", e);
            None
        }
    }
}

/// Tick one countdown until it ends. Returns a newer run to switch to.
async fn countdown(
    state: &AppState,
    signal_rx: &mut broadcast::Receiver<RunSignal>,
    run_id: u64,
) -> Option<u64> {
    debug!("Countdown {} started", run_id);

    let period = state.tick_interval;
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Burst);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match state.dispatch(Event::Tick { run_id }) {
                    Ok(result) if result.accepted && result.state.is_running() => {}
                    Ok(result) => {
                        debug!("Countdown {} ended as {}", run_id, result.state.status.as_str());
                        return None;
                    }
                    Err(e) => {
                        error!("Failed to apply tick: {}", e);
                        return None;
                    }
                }
            }

            signal = signal_rx.recv() => {
                match signal {
                    Ok(RunSignal { run_id: next, running: true }) if next > run_id => {
                        info!("Countdown {} replaced by {}", run_id, next);
                        return Some(next);
                    }
                    Ok(RunSignal { run_id: stopped, running: false }) if stopped == run_id => {
                        debug!("Countdown {} stopped", run_id);
                        return None;
                    }
                    Ok(stale) => debug!("Ignoring stale {:?}", stale),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Ticker lagged by {} signals, resyncing", skipped);
                        match current_run(state) {
                            Some(current) if current == run_id => {}
                            other => return other,
                        }
                    }
                    Err(RecvError::Closed) => return None,
                }
            }
        }
    }
}
