//! ---
//! pointy_section: "01-core-functionality"
//! pointy_subsection: "module"
//! pointy_type: "source"
//! pointy_scope: "code"
//! pointy_description: "Runtime helpers driving the simulators."
//! pointy_version: "v0.1.0"
//! pointy_owner: "tbd"
//! ---
use std::time::Duration;

use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchedulingError {
    #[error("tick period for {0} must be greater than zero")]
    ZeroPeriod(String),
    #[error("no tokio runtime available to schedule {0}")]
    NoRuntime(String),
}

/// Lifecycle of a simulator instance. There is no transition out of `Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimulatorState {
    #[default]
    Idle,
    Running,
    Stopped,
}

impl SimulatorState {
    pub fn label(&self) -> &'static str {
        match self {
            SimulatorState::Idle => "idle",
            SimulatorState::Running => "running",
            SimulatorState::Stopped => "stopped",
        }
    }
}

/// Async rate limiter with interval semantics: the first tick fires one period
/// after creation and late ticks are delayed rather than bunched.
#[derive(Debug)]
pub struct RateLimiter {
    interval: tokio::time::Interval,
}

impl RateLimiter {
    pub fn new(period: Duration) -> Self {
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }

    pub async fn tick(&mut self) -> Instant {
        self.interval.tick().await
    }
}

/// Recurring task invoking a synchronous callback once per period until stopped.
///
/// Dropping a task that was not stopped aborts it, so a torn-down owner never
/// receives further ticks.
#[derive(Debug)]
pub struct TickingTask {
    name: String,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<u64>>,
}

impl TickingTask {
    /// Spawn on the current tokio runtime. The callback receives the 1-based tick number.
    pub fn spawn<F>(
        name: impl Into<String>,
        period: Duration,
        mut on_tick: F,
    ) -> Result<Self, SchedulingError>
    where
        F: FnMut(u64) + Send + 'static,
    {
        let name = name.into();
        if period.is_zero() {
            return Err(SchedulingError::ZeroPeriod(name));
        }
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|_| SchedulingError::NoRuntime(name.clone()))?;

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
        let task_name = name.clone();
        let handle = runtime.spawn(async move {
            let mut limiter = RateLimiter::new(period);
            let mut ticks: u64 = 0;
            loop {
                tokio::select! {
                    biased;
                    _ = &mut shutdown_rx => {
                        debug!(task = %task_name, ticks, "ticking task shutdown signal received");
                        break;
                    }
                    _ = limiter.tick() => {
                        ticks += 1;
                        on_tick(ticks);
                    }
                }
            }
            ticks
        });

        info!(
            task = %name,
            period_ms = period.as_millis() as u64,
            state = SimulatorState::Running.label(),
            "ticking task started"
        );
        Ok(Self {
            name,
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Signal shutdown and wait for the loop to exit. Returns the number of ticks executed.
    pub async fn stop(mut self) -> u64 {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let ticks = match self.handle.take() {
            Some(handle) => match handle.await {
                Ok(ticks) => ticks,
                Err(err) => {
                    warn!(task = %self.name, error = %err, "ticking task join failure");
                    0
                }
            },
            None => 0,
        };
        info!(
            task = %self.name,
            ticks,
            state = SimulatorState::Stopped.label(),
            "ticking task stopped"
        );
        ticks
    }
}

impl Drop for TickingTask {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!(task = %self.name, "ticking task aborted on drop");
        }
    }
}
