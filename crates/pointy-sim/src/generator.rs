//! ---
//! pointy_section: "11-simulation"
//! pointy_subsection: "module"
//! pointy_type: "source"
//! pointy_scope: "code"
//! pointy_description: "Seedable record generators for the dashboard pages."
//! pointy_version: "v0.1.0"
//! pointy_owner: "tbd"
//! ---
use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use pointy_common::time::{days_ago, hours, hours_between, start_of_day};
use rand::prelude::*;
use rand_distr::Bernoulli;
use tracing::debug;

use crate::errors::{bernoulli, Result};
use crate::records::{
    AccessAction, AccessMethod, Alert, AlertKind, AttendanceRecord, AttendanceStatus, DailyStat,
    Employee, HourlyPresence, PayrollEntry, PayrollStatus, PresenceStatus, SecurityLog, Severity,
    Zone,
};
use crate::reference::{
    BUILDINGS, DEPARTMENTS, FIRST_NAMES, LAST_NAMES, MONITORED_ZONES_PER_BUILDING,
    SECURITY_ZONES, ZONES,
};

const ID_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ID_LENGTH: usize = 6;

const CHECK_IN_WINDOW: (f64, f64) = (7.0, 10.0);
const CHECK_OUT_WINDOW: (f64, f64) = (16.0, 18.0);

const PRESENT_PROBABILITY: f64 = 0.9;
const LATE_PROBABILITY: f64 = 0.15;
const EARLY_LEAVE_PROBABILITY: f64 = 0.1;

const DENIED_PROBABILITY: f64 = 0.05;
const SECURITY_LOOKBACK_DAYS: i64 = 7;

const MILLIS_PER_HOUR: i64 = 3_600_000;

const FIRST_HOUR: u32 = 6;
const LAST_HOUR: u32 = 20;

/// Default share of generated employees that start on site.
pub const DEFAULT_ON_SITE_PROBABILITY: f64 = 0.8;

/// Produces synthetic records from a seedable random source.
#[derive(Debug)]
pub struct RecordGenerator {
    rng: StdRng,
    on_site: Bernoulli,
}

impl RecordGenerator {
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            on_site: Bernoulli::new(DEFAULT_ON_SITE_PROBABILITY)
                .unwrap_or_else(|_| unreachable!("default probability is within [0, 1]")),
        }
    }

    /// Override the share of employees generated on site.
    pub fn with_on_site_probability(mut self, probability: f64) -> Result<Self> {
        self.on_site = bernoulli("on_site_probability", probability)?;
        Ok(self)
    }

    /// Generate `count` employees with ids unique within the batch.
    ///
    /// Check-in falls in `[07:00, 10:00)` of `now`'s day, check-out (off-site
    /// employees only) in `[16:00, 18:00)`, last detection within the past hour.
    pub fn employees(&mut self, count: usize, now: DateTime<Utc>) -> Vec<Employee> {
        let today = start_of_day(now);
        let mut seen = HashSet::with_capacity(count);
        let mut employees = Vec::with_capacity(count);

        for _ in 0..count {
            let id = loop {
                let candidate = self.employee_id();
                if seen.insert(candidate.clone()) {
                    break candidate;
                }
            };
            let on_site = self.on_site.sample(&mut self.rng);
            let location = self.pick(BUILDINGS).to_owned();
            let name = format!("{} {}", self.pick(FIRST_NAMES), self.pick(LAST_NAMES));
            let department = self.pick(DEPARTMENTS).to_owned();
            let zone = self.pick(ZONES).to_owned();
            let check_in = self.instant_between(
                today + hours(CHECK_IN_WINDOW.0),
                today + hours(CHECK_IN_WINDOW.1),
            );
            let check_out = if on_site {
                None
            } else {
                Some(self.instant_between(
                    today + hours(CHECK_OUT_WINDOW.0),
                    today + hours(CHECK_OUT_WINDOW.1),
                ))
            };
            let last_detected = self.instant_between(now - Duration::hours(1), now);

            employees.push(Employee {
                id,
                name,
                department,
                status: if on_site {
                    PresenceStatus::OnSite
                } else {
                    PresenceStatus::OffSite
                },
                location,
                zone,
                last_detected,
                check_in_time: Some(check_in),
                check_out_time: check_out,
            });
        }

        debug!(count, "generated employees");
        employees
    }

    /// One zone per building for the first monitored zone names, 20 in total.
    pub fn zones(&mut self) -> Vec<Zone> {
        let mut zones = Vec::with_capacity(BUILDINGS.len() * MONITORED_ZONES_PER_BUILDING);
        for building in BUILDINGS {
            for name in ZONES.iter().take(MONITORED_ZONES_PER_BUILDING) {
                let capacity = self.rng.gen_range(20..70u32);
                let occupancy = self.rng.gen_range(0..capacity + 10);
                zones.push(Zone {
                    id: Zone::slug(building, name),
                    name: (*name).to_owned(),
                    building: (*building).to_owned(),
                    capacity,
                    current_occupancy: occupancy.min(capacity + 5),
                });
            }
        }
        zones
    }

    /// Attendance for every employee on each of the last `days` days, most recent day first.
    pub fn attendance(
        &mut self,
        employees: &[Employee],
        days: u32,
        now: DateTime<Utc>,
    ) -> Vec<AttendanceRecord> {
        let mut records = Vec::with_capacity(employees.len() * days as usize);
        for offset in 0..days {
            let midnight = days_ago(now, offset);
            let date = midnight.date_naive();
            for employee in employees {
                let present = self.rng.gen_bool(PRESENT_PROBABILITY);
                let late = present && self.rng.gen_bool(LATE_PROBABILITY);
                let early_leave = present && !late && self.rng.gen_bool(EARLY_LEAVE_PROBABILITY);

                let (check_in, check_out) = if present {
                    let arrival = if late { 10.0 } else { 8.0 };
                    let departure = if early_leave { 15.0 } else { 17.0 };
                    let check_in = midnight + hours(arrival) + self.within_hour();
                    let check_out = midnight + hours(departure) + self.within_hour();
                    (Some(check_in), Some(check_out))
                } else {
                    (None, None)
                };

                let status = if !present {
                    AttendanceStatus::Absent
                } else if late {
                    AttendanceStatus::Late
                } else if early_leave {
                    AttendanceStatus::EarlyLeave
                } else {
                    AttendanceStatus::Present
                };

                let total_hours = match (check_in, check_out) {
                    (Some(start), Some(end)) => hours_between(start, end),
                    _ => 0.0,
                };

                records.push(AttendanceRecord {
                    id: format!("{}-{}", employee.id, date.format("%Y-%m-%d")),
                    employee_id: employee.id.clone(),
                    employee_name: employee.name.clone(),
                    date,
                    check_in,
                    check_out,
                    status,
                    total_hours,
                });
            }
        }
        debug!(
            employees = employees.len(),
            days,
            records = records.len(),
            "generated attendance history"
        );
        records
    }

    /// Independent random counts per day, oldest day first, ending today.
    pub fn daily_stats(&mut self, days: u32, now: DateTime<Utc>) -> Vec<DailyStat> {
        (0..days)
            .rev()
            .map(|offset| DailyStat {
                date: days_ago(now, offset).date_naive(),
                present: 200 + self.rng.gen_range(0..50),
                absent: 5 + self.rng.gen_range(0..20),
                late: 2 + self.rng.gen_range(0..15),
            })
            .collect()
    }

    /// Diurnal headcount from 06:00 to 20:00 inclusive.
    pub fn hourly_presence(&mut self) -> Vec<HourlyPresence> {
        (FIRST_HOUR..=LAST_HOUR)
            .map(|hour| {
                let (base, spread) = diurnal_band(hour);
                HourlyPresence {
                    hour,
                    label: format!("{}:00", hour),
                    count: base + self.rng.gen_range(0..spread),
                }
            })
            .collect()
    }

    /// Access-control events over the last week, newest first.
    pub fn security_logs(
        &mut self,
        employees: &[Employee],
        count: usize,
        now: DateTime<Utc>,
    ) -> Vec<SecurityLog> {
        if employees.is_empty() {
            debug!("no employees available, skipping security log generation");
            return Vec::new();
        }
        let mut logs: Vec<SecurityLog> = (0..count)
            .map(|index| {
                let employee = &employees[self.rng.gen_range(0..employees.len())];
                let action = if self.rng.gen_bool(DENIED_PROBABILITY) {
                    AccessAction::Denied
                } else if self.rng.gen_bool(0.5) {
                    AccessAction::Entry
                } else {
                    AccessAction::Exit
                };
                let zone = self.pick(SECURITY_ZONES).to_owned();
                let timestamp =
                    self.instant_between(now - Duration::days(SECURITY_LOOKBACK_DAYS), now);
                let method = match self.rng.gen_range(0..3) {
                    0 => AccessMethod::Badge,
                    1 => AccessMethod::Biometric,
                    _ => AccessMethod::Manual,
                };
                SecurityLog {
                    id: format!("log-{}", index),
                    employee_id: employee.id.clone(),
                    employee_name: employee.name.clone(),
                    action,
                    location: employee.location.clone(),
                    zone,
                    timestamp,
                    method,
                }
            })
            .collect();
        logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        logs
    }

    fn within_hour(&mut self) -> Duration {
        Duration::milliseconds(self.rng.gen_range(0..MILLIS_PER_HOUR))
    }

    fn employee_id(&mut self) -> String {
        let suffix: String = (0..ID_LENGTH)
            .map(|_| char::from(ID_ALPHABET[self.rng.gen_range(0..ID_ALPHABET.len())]))
            .collect();
        format!("EMP-{}", suffix)
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.rng.gen_range(0..items.len())]
    }

    fn instant_between(&mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> DateTime<Utc> {
        let span = (end - start).num_milliseconds();
        if span <= 0 {
            return start;
        }
        start + Duration::milliseconds(self.rng.gen_range(0..span))
    }
}

/// `(base, spread)` of the on-site headcount for an hour of the day.
fn diurnal_band(hour: u32) -> (u32, u32) {
    match hour {
        h if h < 8 => (10, 20),
        h if h < 10 => (150, 100),
        h if h < 12 => (220, 30),
        h if h < 14 => (180, 40),
        h if h < 17 => (210, 30),
        h if h < 19 => (100, 80),
        _ => (20, 30),
    }
}

/// Fixed illustrative alerts used as the initial alert list.
pub fn seed_alerts(now: DateTime<Utc>) -> Vec<Alert> {
    let alert = |id: &str, kind, message: &str, severity, minutes_ago: i64, resolved| Alert {
        id: id.to_owned(),
        kind,
        message: message.to_owned(),
        severity,
        timestamp: now - Duration::minutes(minutes_ago),
        resolved,
    };
    vec![
        alert(
            "1",
            AlertKind::Overcrowding,
            "Floor 2 in HQ Building A has exceeded 90% capacity",
            Severity::High,
            5,
            false,
        ),
        alert(
            "2",
            AlertKind::Missing,
            "Critical employee Mohamed Benali not detected in assigned zone",
            Severity::Medium,
            15,
            false,
        ),
        alert(
            "3",
            AlertKind::Unauthorized,
            "Unauthorized access attempt at Server Room - R&D Center",
            Severity::High,
            30,
            false,
        ),
        alert(
            "4",
            AlertKind::Late,
            "12 employees arrived late today (after 9:30 AM)",
            Severity::Low,
            120,
            true,
        ),
        alert(
            "5",
            AlertKind::Overcrowding,
            "Cafeteria approaching maximum capacity (85%)",
            Severity::Medium,
            45,
            false,
        ),
    ]
}

/// Fixed payroll roster backing the payroll page and its exports.
pub fn payroll_roster() -> Vec<PayrollEntry> {
    use PayrollStatus::{Pending, Processed};

    // (id, name, department, hours, rate, status, overtime, deductions, work days, absences)
    let rows = [
        (1, "Ahmed Benali", "Production", 168, 800, Processed, 8, 15_000, 21, 0),
        (2, "Fatima Zerhouni", "Administration", 160, 950, Processed, 0, 18_000, 20, 1),
        (3, "Karim Meziane", "Production", 172, 750, Pending, 12, 12_000, 22, 0),
        (4, "Sarah Amrani", "Quality Control", 165, 900, Processed, 5, 16_500, 21, 0),
        (5, "Youcef Toumi", "Logistics", 158, 850, Pending, 0, 14_000, 20, 1),
    ];
    rows.into_iter()
        .map(
            |(id, name, department, hours, rate, status, overtime, deductions, days, absences)| {
                PayrollEntry {
                    id,
                    name: name.to_owned(),
                    department: department.to_owned(),
                    hours,
                    rate,
                    verified: true,
                    status,
                    overtime_hours: overtime,
                    deductions,
                    work_days: days,
                    absences,
                }
            },
        )
        .collect()
}
