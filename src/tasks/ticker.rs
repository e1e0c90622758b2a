//! One-second tick source for the countdown

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::{state::AppState, timer::Phase};

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Background task that ticks the timer once per second while it is running
pub async fn ticker_task(state: Arc<AppState>) {
    info!("Starting ticker task");

    let mut timer_rx = state.subscribe();

    loop {
        // Wait until the timer enters the running phase
        if !timer_rx.borrow_and_update().is_running() {
            if timer_rx.changed().await.is_err() {
                debug!("Timer update channel closed, stopping ticker");
                return;
            }
            continue;
        }

        debug!("Timer running, ticking every second");

        // First tick lands one full period after entering the running phase
        let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match state.tick() {
                        Ok(snapshot) if snapshot.phase == Phase::Completed => {
                            debug!("Countdown finished, ticker idle");
                            break;
                        }
                        Ok(snapshot) if !snapshot.is_running() => break,
                        Ok(_) => {}
                        Err(e) => {
                            error!("Failed to tick timer: {}", e);
                            break;
                        }
                    }
                }

                changed = timer_rx.changed() => {
                    if changed.is_err() {
                        debug!("Timer update channel closed, stopping ticker");
                        return;
                    }
                    if !timer_rx.borrow().is_running() {
                        debug!("Timer left running phase, ticker idle");
                        break;
                    }
                }
            }
        }
    }
}
