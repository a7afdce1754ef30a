//! ---
//! pointy_section: "01-core-functionality"
//! pointy_subsection: "module"
//! pointy_type: "source"
//! pointy_scope: "code"
//! pointy_description: "Live record feeds driven by ticking simulators."
//! pointy_version: "v0.1.0"
//! pointy_owner: "tbd"
//! ---
//! A feed owns one record collection and the simulator that replaces it.
//!
//! Readers take cheap `Arc` snapshots; every accepted tick or user action
//! swaps in a new collection and bumps the snapshot generation, so derived
//! views can key their memoisation on it.

use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use pointy_rt::{Clock, SharedClock, SimulatorState, TickingTask};
use pointy_sim::{dismiss_alert, resolve_alert, Alert, AlertMutator, Employee, EmployeeMutator};
use tracing::{debug, info};

use crate::errors::{FeedError, Result};

/// Simulator computing the replacement for a record collection.
pub trait Mutator: Debug + Send + 'static {
    type Record: Clone + Debug + Send + Sync + 'static;

    /// `None` leaves the collection untouched for this tick.
    fn advance(
        &mut self,
        current: &[Self::Record],
        now: DateTime<Utc>,
    ) -> Option<Vec<Self::Record>>;
}

impl Mutator for EmployeeMutator {
    type Record = Employee;

    fn advance(&mut self, current: &[Employee], now: DateTime<Utc>) -> Option<Vec<Employee>> {
        self.tick(current, now).map(|tick| tick.employees)
    }
}

impl Mutator for AlertMutator {
    type Record = Alert;

    fn advance(&mut self, current: &[Alert], now: DateTime<Utc>) -> Option<Vec<Alert>> {
        self.tick(current, now).map(|tick| tick.alerts)
    }
}

/// Immutable view of a feed at one point in time.
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    pub records: Arc<Vec<T>>,
    /// Incremented on every replacement of `records`.
    pub generation: u64,
}

#[derive(Debug)]
struct Shared<M: Mutator> {
    name: String,
    mutator: Mutex<M>,
    snapshot: RwLock<Snapshot<M::Record>>,
    clock: SharedClock,
}

impl<M: Mutator> Shared<M> {
    fn tick(&self) -> bool {
        let now = self.clock.now();
        let mut mutator = self.mutator.lock();
        let mut snapshot = self.snapshot.write();
        match mutator.advance(&snapshot.records, now) {
            Some(next) => {
                snapshot.records = Arc::new(next);
                snapshot.generation += 1;
                true
            }
            None => false,
        }
    }

    fn replace_with<F>(&self, update: F) -> bool
    where
        F: FnOnce(&[M::Record]) -> Option<Vec<M::Record>>,
    {
        let mut snapshot = self.snapshot.write();
        match update(&snapshot.records) {
            Some(next) => {
                snapshot.records = Arc::new(next);
                snapshot.generation += 1;
                true
            }
            None => false,
        }
    }
}

/// Record collection plus the simulator lifecycle around it.
#[derive(Debug)]
pub struct Feed<M: Mutator> {
    shared: Arc<Shared<M>>,
    period: Duration,
    state: SimulatorState,
    task: Option<TickingTask>,
}

pub type EmployeeFeed = Feed<EmployeeMutator>;
pub type AlertFeed = Feed<AlertMutator>;

impl<M: Mutator> Feed<M> {
    pub fn new(
        name: impl Into<String>,
        mutator: M,
        initial: Vec<M::Record>,
        period: Duration,
        clock: SharedClock,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                name: name.into(),
                mutator: Mutex::new(mutator),
                snapshot: RwLock::new(Snapshot {
                    records: Arc::new(initial),
                    generation: 0,
                }),
                clock,
            }),
            period,
            state: SimulatorState::Idle,
            task: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.shared.name
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn state(&self) -> SimulatorState {
        self.state
    }

    pub fn snapshot(&self) -> Snapshot<M::Record> {
        self.shared.snapshot.read().clone()
    }

    pub fn records(&self) -> Arc<Vec<M::Record>> {
        self.shared.snapshot.read().records.clone()
    }

    pub fn generation(&self) -> u64 {
        self.shared.snapshot.read().generation
    }

    /// Run one tick inline, stamped with the feed clock. Returns whether the
    /// collection changed.
    pub fn step(&self) -> bool {
        self.shared.tick()
    }

    /// Begin ticking on the current tokio runtime, first tick one period from now.
    pub fn start(&mut self) -> Result<()> {
        match self.state {
            SimulatorState::Running => {
                return Err(FeedError::AlreadyRunning(self.name().to_owned()))
            }
            SimulatorState::Stopped => return Err(FeedError::Stopped(self.name().to_owned())),
            SimulatorState::Idle => {}
        }
        let shared = Arc::clone(&self.shared);
        let task = TickingTask::spawn(self.name().to_owned(), self.period, move |tick| {
            let changed = shared.tick();
            debug!(feed = %shared.name, tick, changed, "feed tick");
        })?;
        self.task = Some(task);
        self.state = SimulatorState::Running;
        Ok(())
    }

    /// Cancel the pending timer. Returns the ticks executed while running.
    /// Stopping an idle feed retires it without ever ticking.
    pub async fn stop(&mut self) -> u64 {
        let ticks = match self.task.take() {
            Some(task) => task.stop().await,
            None => 0,
        };
        if self.state != SimulatorState::Stopped {
            info!(feed = %self.name(), ticks, generation = self.generation(), "feed stopped");
        }
        self.state = SimulatorState::Stopped;
        ticks
    }

    pub(crate) fn replace_with<F>(&self, update: F) -> bool
    where
        F: FnOnce(&[M::Record]) -> Option<Vec<M::Record>>,
    {
        self.shared.replace_with(update)
    }
}

impl Feed<AlertMutator> {
    /// Mark an alert resolved. Unknown ids leave the feed untouched.
    pub fn resolve(&self, id: &str) -> bool {
        self.replace_with(|alerts| resolve_alert(alerts, id))
    }

    /// Remove an alert entirely.
    pub fn dismiss(&self, id: &str) -> bool {
        self.replace_with(|alerts| dismiss_alert(alerts, id))
    }

    pub fn unread_count(&self) -> usize {
        pointy_views::unread_count(&self.records())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pointy_rt::ManualClock;
    use pointy_sim::{seed_alerts, RecordGenerator};

    fn clock() -> ManualClock {
        ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 14, 12, 0, 0).unwrap())
    }

    fn alert_feed(clock: &ManualClock) -> AlertFeed {
        Feed::new(
            "alerts",
            AlertMutator::seeded(5).with_probability(1.0).unwrap(),
            seed_alerts(clock.now()),
            Duration::from_secs(15),
            Arc::new(clock.clone()),
        )
    }

    #[test]
    fn manual_steps_bump_generation() {
        let clock = clock();
        let feed = alert_feed(&clock);
        let before = feed.records();
        assert!(feed.step());
        assert_eq!(feed.generation(), 1);
        assert_eq!(feed.records().len(), 6);
        assert_eq!(before.len(), 5);
    }

    #[test]
    fn advance_forwards_the_mutator_tick() {
        let now = clock().now();
        let employees = RecordGenerator::seeded(8).employees(12, now);
        let expected = EmployeeMutator::seeded(2).tick(&employees, now).unwrap();
        let advanced = EmployeeMutator::seeded(2).advance(&employees, now).unwrap();
        assert_eq!(advanced, expected.employees);

        let alerts = seed_alerts(now);
        let mut mutator = AlertMutator::seeded(4).with_probability(1.0).unwrap();
        let next = mutator.advance(&alerts, now).unwrap();
        assert_eq!(next.len(), 6);
        assert_eq!(&next[1..], &alerts[..]);
    }

    #[test]
    fn empty_employee_feed_never_changes() {
        let clock = clock();
        let feed = EmployeeFeed::new(
            "employees",
            EmployeeMutator::seeded(1),
            Vec::new(),
            Duration::from_secs(3),
            Arc::new(clock),
        );
        assert!(!feed.step());
        assert_eq!(feed.generation(), 0);
    }

    #[test]
    fn resolve_and_dismiss_replace_collection() {
        let clock = clock();
        let feed = alert_feed(&clock);
        assert_eq!(feed.unread_count(), 4);
        assert!(feed.resolve("3"));
        assert_eq!(feed.unread_count(), 3);
        assert_eq!(feed.records().len(), 5);
        assert!(feed.dismiss("3"));
        assert_eq!(feed.records().len(), 4);
        assert!(!feed.dismiss("3"));
        assert_eq!(feed.generation(), 2);
    }

    #[test]
    fn employee_steps_use_feed_clock() {
        let clock = clock();
        let employees = RecordGenerator::seeded(2).employees(10, clock.now());
        let feed = EmployeeFeed::new(
            "employees",
            EmployeeMutator::seeded(3),
            employees,
            Duration::from_secs(3),
            Arc::new(clock.clone()),
        );
        let later = clock.advance(chrono::Duration::seconds(3));
        assert!(feed.step());
        assert!(feed.records().iter().any(|e| e.last_detected == later));
    }

    #[tokio::test]
    async fn lifecycle_has_no_resume() {
        let clock = clock();
        let mut feed = alert_feed(&clock);
        assert_eq!(feed.state(), SimulatorState::Idle);
        feed.start().unwrap();
        assert_eq!(feed.state(), SimulatorState::Running);
        assert!(matches!(feed.start(), Err(FeedError::AlreadyRunning(_))));
        feed.stop().await;
        assert_eq!(feed.state(), SimulatorState::Stopped);
        assert!(matches!(feed.start(), Err(FeedError::Stopped(_))));
    }
}
