//! Periodic re-trigger
//!
//! Fires the trigger on a fixed period regardless of filesystem activity.
//! It is polled from the session's main `select!`, so it never runs
//! concurrently with event handling.

use std::time::Duration;
use tokio::time::{interval, Interval, MissedTickBehavior};

/// Fixed-period tick source; idle when no period is configured
pub struct Periodic {
    timer: Option<Interval>,
}

impl Periodic {
    /// Start ticking every `period`; `None` or zero stays idle forever
    ///
    /// The first tick completes immediately. Must be called inside a tokio
    /// runtime when a period is given.
    pub fn new(period: Option<Duration>) -> Self {
        let timer = period.filter(|p| !p.is_zero()).map(|p| {
            let mut timer = interval(p);
            // a late tick pushes the schedule back instead of bursting
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            timer
        });

        if let Some(timer) = &timer {
            tracing::info!("Repeating every {:?}", timer.period());
        }

        Self { timer }
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Wait for the next tick; never completes when idle
    ///
    /// Cancel safe.
    pub async fn tick(&mut self) {
        match &mut self.timer {
            Some(timer) => {
                timer.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
