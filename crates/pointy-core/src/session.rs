//! ---
//! pointy_section: "01-core-functionality"
//! pointy_subsection: "module"
//! pointy_type: "source"
//! pointy_scope: "code"
//! pointy_description: "Per-page session owning generators, feeds, and memoised views."
//! pointy_version: "v0.1.0"
//! pointy_owner: "tbd"
//! ---
//! Each page owns its own snapshot. Two sessions never share records, even for
//! the same page, and nothing is reconciled between them.

use std::sync::Arc;

use pointy_common::AppConfig;
use pointy_rt::{Clock, ManualClock, SharedClock, SimulatorState};
use pointy_sim::{
    payroll_roster, seed_alerts, Alert, AlertMutator, AttendanceRecord, DailyStat, Employee,
    EmployeeMutator, HourlyPresence, PayrollEntry, RecordGenerator, SecurityLog, Zone,
};
use pointy_views as views;
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::{FeedError, Result};
use crate::feeds::{AlertFeed, EmployeeFeed};
use crate::page::{
    AnalyticsView, AttendanceView, DashboardView, EmployeesView, LocationsView, PageKind,
    PageView, PayrollView, PresenceView, SecurityView, ViewRequest,
};

const GENERATOR_STREAM: u64 = 1;
const EMPLOYEE_STREAM: u64 = 2;
const ALERT_STREAM: u64 = 3;

fn derive_seed(base: u64, page: PageKind, stream: u64) -> u64 {
    base.wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add(page.seed_index() << 8)
        .wrapping_add(stream)
}

/// Value regenerated only when its key changes.
#[derive(Debug)]
struct Memo<K, T> {
    key: Option<K>,
    value: Arc<T>,
}

impl<K: PartialEq, T: Default> Memo<K, T> {
    fn new() -> Self {
        Self {
            key: None,
            value: Arc::new(T::default()),
        }
    }

    fn get_or_refresh(&mut self, key: K, refresh: impl FnOnce() -> T) -> Arc<T> {
        if self.key.as_ref() != Some(&key) {
            self.value = Arc::new(refresh());
            self.key = Some(key);
        }
        Arc::clone(&self.value)
    }
}

/// Counters logged by the daemon on every summary interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub page: PageKind,
    pub employees: usize,
    pub on_site: usize,
    pub checked_in_today: usize,
    pub alerts: usize,
    pub unread_alerts: usize,
    pub employee_generation: u64,
    pub alert_generation: u64,
}

/// Tick counts reported when a session stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionTicks {
    pub employee_ticks: u64,
    pub alert_ticks: u64,
}

/// One open page: its generated snapshot, live feeds, and memoised derivations.
#[derive(Debug)]
pub struct PageSession {
    kind: PageKind,
    config: Arc<AppConfig>,
    clock: SharedClock,
    /// Present when the session was opened for manual replay.
    manual: Option<ManualClock>,
    generator: RecordGenerator,
    employees: Option<EmployeeFeed>,
    alerts: Option<AlertFeed>,
    zones: Vec<Zone>,
    daily: Vec<DailyStat>,
    hourly: Vec<HourlyPresence>,
    payroll: Vec<PayrollEntry>,
    attendance: Memo<(u64, u32), Vec<AttendanceRecord>>,
    security: Memo<u64, Vec<SecurityLog>>,
    attendance_refreshes: u64,
}

impl PageSession {
    /// Generate the initial snapshot for `kind`. Feeds are created idle.
    pub fn open(kind: PageKind, config: Arc<AppConfig>, clock: SharedClock) -> Result<Self> {
        let simulation = &config.simulation;
        let now = clock.now();
        let seed = simulation.random_seed;
        let mut generator = match seed {
            Some(base) => RecordGenerator::seeded(derive_seed(base, kind, GENERATOR_STREAM)),
            None => RecordGenerator::from_entropy(),
        }
        .with_on_site_probability(simulation.on_site_probability)?;

        let employees = match kind.roster_size(&config.pages) {
            Some(count) => {
                let mutator = match seed {
                    Some(base) => EmployeeMutator::seeded(derive_seed(base, kind, EMPLOYEE_STREAM)),
                    None => EmployeeMutator::from_entropy(),
                }
                .with_max_mutations(simulation.max_mutations_per_tick)?;
                Some(EmployeeFeed::new(
                    format!("{kind}-employees"),
                    mutator,
                    generator.employees(count, now),
                    simulation.employee_tick,
                    Arc::clone(&clock),
                ))
            }
            None => None,
        };

        let alerts = if kind.has_alerts() {
            let mutator = match seed {
                Some(base) => AlertMutator::seeded(derive_seed(base, kind, ALERT_STREAM)),
                None => AlertMutator::from_entropy(),
            }
            .with_probability(simulation.alert_probability)?
            .with_retention(simulation.alert_retention)?;
            Some(AlertFeed::new(
                format!("{kind}-alerts"),
                mutator,
                seed_alerts(now),
                simulation.alert_tick,
                Arc::clone(&clock),
            ))
        } else {
            None
        };

        let zones = if kind.has_zones() {
            generator.zones()
        } else {
            Vec::new()
        };
        let (daily, hourly) = if kind.has_trend_charts() {
            (
                generator.daily_stats(config.pages.daily_stats_days, now),
                generator.hourly_presence(),
            )
        } else {
            (Vec::new(), Vec::new())
        };
        let payroll = if kind == PageKind::Payroll {
            payroll_roster()
        } else {
            Vec::new()
        };

        info!(
            page = %kind,
            employees = employees.as_ref().map_or(0, |feed| feed.records().len()),
            alerts = alerts.is_some(),
            zones = zones.len(),
            seeded = seed.is_some(),
            "page session opened"
        );

        Ok(Self {
            kind,
            config,
            clock,
            manual: None,
            generator,
            employees,
            alerts,
            zones,
            daily,
            hourly,
            payroll,
            attendance: Memo::new(),
            security: Memo::new(),
            attendance_refreshes: 0,
        })
    }

    /// Open a session driven by `clock`, which [`PageSession::replay`] advances.
    pub fn open_manual(
        kind: PageKind,
        config: Arc<AppConfig>,
        clock: ManualClock,
    ) -> Result<Self> {
        let mut session = Self::open(kind, config, Arc::new(clock.clone()))?;
        session.manual = Some(clock);
        Ok(session)
    }

    pub fn kind(&self) -> PageKind {
        self.kind
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn employee_feed(&self) -> Option<&EmployeeFeed> {
        self.employees.as_ref()
    }

    pub fn alert_feed(&self) -> Option<&AlertFeed> {
        self.alerts.as_ref()
    }

    /// Current employee snapshot; empty on pages without a roster.
    pub fn employees(&self) -> Arc<Vec<Employee>> {
        self.employees
            .as_ref()
            .map_or_else(|| Arc::new(Vec::new()), |feed| feed.records())
    }

    pub fn alerts(&self) -> Arc<Vec<Alert>> {
        self.alerts
            .as_ref()
            .map_or_else(|| Arc::new(Vec::new()), |feed| feed.records())
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn state(&self) -> SimulatorState {
        self.employees
            .as_ref()
            .map(|feed| feed.state())
            .or_else(|| self.alerts.as_ref().map(|feed| feed.state()))
            .unwrap_or_default()
    }

    /// Start every feed this page owns.
    pub fn start(&mut self) -> Result<()> {
        if let Some(feed) = self.employees.as_mut() {
            feed.start()?;
        }
        if let Some(feed) = self.alerts.as_mut() {
            feed.start()?;
        }
        info!(page = %self.kind, "page session started");
        Ok(())
    }

    /// Cancel every pending timer. Safe to call more than once.
    pub async fn stop(&mut self) -> SessionTicks {
        let mut ticks = SessionTicks::default();
        if let Some(feed) = self.employees.as_mut() {
            ticks.employee_ticks = feed.stop().await;
        }
        if let Some(feed) = self.alerts.as_mut() {
            ticks.alert_ticks = feed.stop().await;
        }
        info!(
            page = %self.kind,
            employee_ticks = ticks.employee_ticks,
            alert_ticks = ticks.alert_ticks,
            "page session stopped"
        );
        ticks
    }

    /// Replay `ticks` employee periods on the session's manual clock,
    /// interleaving alert ticks whenever the elapsed time crosses an alert period.
    pub fn replay(&self, ticks: u32) -> Result<SessionTicks> {
        let clock = self
            .manual
            .as_ref()
            .ok_or_else(|| FeedError::NotReplayable(self.kind.to_string()))?;
        let employee_period = self.config.simulation.employee_tick;
        let alert_period = self.config.simulation.alert_tick;
        let mut done = SessionTicks::default();
        let mut elapsed = std::time::Duration::ZERO;
        for _ in 0..ticks {
            elapsed += employee_period;
            clock.advance(chrono::Duration::milliseconds(employee_period.as_millis() as i64));
            if let Some(feed) = &self.employees {
                feed.step();
                done.employee_ticks += 1;
            }
            if let Some(feed) = &self.alerts {
                let due = (elapsed.as_millis() / alert_period.as_millis().max(1)) as u64;
                while done.alert_ticks < due {
                    feed.step();
                    done.alert_ticks += 1;
                }
            }
        }
        debug!(page = %self.kind, ?done, "manual replay finished");
        Ok(done)
    }

    pub fn resolve_alert(&self, id: &str) -> bool {
        self.alerts.as_ref().is_some_and(|feed| feed.resolve(id))
    }

    pub fn dismiss_alert(&self, id: &str) -> bool {
        self.alerts.as_ref().is_some_and(|feed| feed.dismiss(id))
    }

    /// Attendance history for the current roster, regenerated only when the
    /// roster generation or the day count changes.
    pub fn attendance(&mut self, days: u32) -> Arc<Vec<AttendanceRecord>> {
        let generation = self.employees.as_ref().map_or(0, |feed| feed.generation());
        let employees = self.employees();
        let now = self.clock.now();
        let generator = &mut self.generator;
        let refreshes = &mut self.attendance_refreshes;
        self.attendance.get_or_refresh((generation, days), || {
            *refreshes += 1;
            debug!(generation, days, "regenerating attendance");
            generator.attendance(&employees, days, now)
        })
    }

    /// How many times attendance has been regenerated in this session.
    pub fn attendance_refreshes(&self) -> u64 {
        self.attendance_refreshes
    }

    /// Access log for the current roster, regenerated when the roster changes.
    pub fn security_logs(&mut self) -> Arc<Vec<SecurityLog>> {
        let generation = self.employees.as_ref().map_or(0, |feed| feed.generation());
        let employees = self.employees();
        let now = self.clock.now();
        let count = self.config.pages.security_log_count;
        let generator = &mut self.generator;
        self.security.get_or_refresh(generation, || {
            generator.security_logs(&employees, count, now)
        })
    }

    pub fn summary(&self) -> SessionSummary {
        let employees = self.employees();
        let alerts = self.alerts();
        let stats = views::presence_stats(&employees);
        SessionSummary {
            page: self.kind,
            employees: employees.len(),
            on_site: stats.on_site,
            checked_in_today: stats.checked_in_today,
            alerts: alerts.len(),
            unread_alerts: views::unread_count(&alerts),
            employee_generation: self.employees.as_ref().map_or(0, |feed| feed.generation()),
            alert_generation: self.alerts.as_ref().map_or(0, |feed| feed.generation()),
        }
    }

    /// Render the page from the latest snapshot.
    pub fn view(&mut self, request: &ViewRequest) -> PageView {
        let page_sizes = self.config.views.clone();
        match self.kind {
            PageKind::Dashboard => {
                let employees = self.employees();
                let stats = views::presence_stats(&employees);
                PageView::Dashboard(DashboardView {
                    stats,
                    pending_verification: views::pending_verification(&stats),
                    presence: views::presence_table(
                        &employees,
                        &request.employees,
                        request.sort,
                        page_sizes.presence_page_size,
                    ),
                    buildings: views::group_by_building(&self.zones),
                    alerts: views::AlertPanel::from_alerts(&self.alerts()),
                    departments: views::department_stats(&employees),
                    daily: self.daily.clone(),
                    hourly: self.hourly.clone(),
                })
            }
            PageKind::Presence => {
                let employees = self.employees();
                PageView::Presence(PresenceView {
                    stats: views::presence_stats(&employees),
                    departments: views::departments(&employees),
                    table: views::presence_table(
                        &employees,
                        &request.employees,
                        request.sort,
                        page_sizes.presence_page_size,
                    ),
                })
            }
            PageKind::Attendance => {
                let days = self.config.pages.attendance_days;
                let records = self.attendance(days);
                PageView::Attendance(AttendanceView {
                    days,
                    table: views::attendance_table(
                        &records,
                        &request.attendance,
                        page_sizes.attendance_page_size,
                    ),
                })
            }
            PageKind::Alerts => PageView::Alerts(views::AlertPanel::from_alerts(&self.alerts())),
            PageKind::Analytics => PageView::Analytics(AnalyticsView {
                departments: views::department_stats(&self.employees()),
                daily: self.daily.clone(),
                hourly: self.hourly.clone(),
            }),
            PageKind::Employees => {
                let employees = self.employees();
                PageView::Employees(EmployeesView {
                    headcount: views::headcount(&employees),
                    departments: views::departments(&employees),
                    table: views::presence_table(
                        &employees,
                        &request.employees,
                        request.sort,
                        page_sizes.employees_page_size,
                    ),
                })
            }
            PageKind::Locations => PageView::Locations(LocationsView {
                summary: views::zone_summary(&self.zones),
                buildings: views::group_by_building(&self.zones),
            }),
            PageKind::Payroll => PageView::Payroll(PayrollView {
                summary: views::payroll_summary(&self.payroll),
                slips: self.payroll.iter().map(views::pay_slip).collect(),
                roster: self.payroll.clone(),
            }),
            PageKind::Security => {
                let now = self.clock.now();
                let logs = self.security_logs();
                PageView::Security(SecurityView {
                    counters: views::security_counters(&logs, now),
                    table: views::security_table(
                        &logs,
                        &request.security,
                        page_sizes.security_page_size,
                    ),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_seeds_differ_per_page_and_stream() {
        let a = derive_seed(42, PageKind::Dashboard, EMPLOYEE_STREAM);
        let b = derive_seed(42, PageKind::Presence, EMPLOYEE_STREAM);
        let c = derive_seed(42, PageKind::Dashboard, ALERT_STREAM);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, derive_seed(42, PageKind::Dashboard, EMPLOYEE_STREAM));
    }

    #[test]
    fn memo_refreshes_only_on_key_change() {
        let mut memo: Memo<u64, Vec<u8>> = Memo::new();
        let mut calls = 0;
        let first = memo.get_or_refresh(1, || {
            calls += 1;
            vec![1]
        });
        let again = memo.get_or_refresh(1, || {
            calls += 1;
            vec![2]
        });
        assert!(Arc::ptr_eq(&first, &again));
        let changed = memo.get_or_refresh(2, || {
            calls += 1;
            vec![3]
        });
        assert_eq!(*changed, vec![3]);
        assert_eq!(calls, 2);
    }
}
