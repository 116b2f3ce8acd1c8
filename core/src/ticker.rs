//! Cancellable timer task driving the metrics simulator.
//!
//! The ticker owns the simulation loop; whoever mounts it owns the ticker.
//! Cancelling (or dropping) the ticker aborts the task, which drops the
//! sending half of the watch channel, so subscribers observe the end of the
//! stream and no snapshot is published after teardown.

use crate::{
    metrics::{self, LiveMetricsSnapshot},
    rng::RandomSource,
};
use chrono::Utc;
use std::time::Duration;
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};

pub struct MetricsTicker {
    task:   Option<JoinHandle<()>>,
    latest: watch::Receiver<LiveMetricsSnapshot>,
    period: Duration,
}

impl MetricsTicker {
    /// Spawn the tick loop on the current tokio runtime. The first tick
    /// fires one full `period` after start.
    pub fn start<R>(initial: LiveMetricsSnapshot, mut rng: R, period: Duration) -> Self
    where
        R: RandomSource + Send + 'static,
    {
        let (tx, rx) = watch::channel(initial.clone());

        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut current = initial;

            loop {
                interval.tick().await;
                current = metrics::tick(&current, &mut rng, Utc::now());
                log::debug!(
                    "tick={} energy={} flow={} anomalies={} renewable={:.0} tank={:.0}",
                    current.tick,
                    current.energy_demand,
                    current.water_flow,
                    current.anomalies,
                    current.renewable_percent,
                    current.water_tank_level
                );
                if tx.send(current.clone()).is_err() {
                    // Every receiver is gone; nothing left to publish to.
                    break;
                }
            }
        });

        Self { task: Some(task), latest: rx, period }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// The most recently published snapshot.
    pub fn latest(&self) -> LiveMetricsSnapshot {
        self.latest.borrow().clone()
    }

    /// A receiver that is notified on every new snapshot.
    pub fn subscribe(&self) -> watch::Receiver<LiveMetricsSnapshot> {
        self.latest.clone()
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop producing ticks. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Cancel and wait until the task has actually been torn down.
    pub async fn shutdown(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
        }
    }
}

impl Drop for MetricsTicker {
    fn drop(&mut self) {
        self.cancel();
    }
}
