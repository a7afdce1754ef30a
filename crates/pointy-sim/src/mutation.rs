//! ---
//! pointy_section: "11-simulation"
//! pointy_subsection: "module"
//! pointy_type: "source"
//! pointy_scope: "code"
//! pointy_description: "Tick functions mutating employee and alert collections."
//! pointy_version: "v0.1.0"
//! pointy_owner: "tbd"
//! ---
//! Each tick reads the current collection and returns a replacement; records are
//! never edited in place.

use chrono::{DateTime, Utc};
use rand::prelude::*;
use rand_distr::Bernoulli;
use strum::IntoEnumIterator;
use tracing::{debug, trace};

use crate::errors::{bernoulli, Result, SimulationError};
use crate::records::{Alert, AlertKind, Employee, PresenceStatus};
use crate::reference::RELOCATION_ZONES;

pub const DEFAULT_MAX_MUTATIONS: usize = 3;
pub const DEFAULT_ALERT_PROBABILITY: f64 = 0.3;
pub const DEFAULT_ALERT_RETENTION: usize = 10;

const TOGGLE_PROBABILITY: f64 = 0.5;

/// Outcome of one employee simulator tick.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeTick {
    pub employees: Vec<Employee>,
    pub toggled: usize,
    pub relocated: usize,
}

/// Toggles presence or relocates a handful of random employees per tick.
#[derive(Debug)]
pub struct EmployeeMutator {
    rng: StdRng,
    toggle: Bernoulli,
    max_mutations: usize,
    relocation_zones: Vec<String>,
}

impl EmployeeMutator {
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            toggle: Bernoulli::new(TOGGLE_PROBABILITY)
                .unwrap_or_else(|_| unreachable!("toggle probability is within [0, 1]")),
            max_mutations: DEFAULT_MAX_MUTATIONS,
            relocation_zones: RELOCATION_ZONES.iter().map(|z| (*z).to_owned()).collect(),
        }
    }

    /// Upper bound of records touched per tick; at least one is always touched.
    pub fn with_max_mutations(mut self, max_mutations: usize) -> Result<Self> {
        if max_mutations == 0 {
            return Err(SimulationError::ZeroMutations);
        }
        self.max_mutations = max_mutations;
        Ok(self)
    }

    pub fn with_relocation_zones<I, S>(mut self, zones: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let zones: Vec<String> = zones.into_iter().map(Into::into).collect();
        if zones.is_empty() {
            return Err(SimulationError::EmptyRelocationZones);
        }
        self.relocation_zones = zones;
        Ok(self)
    }

    /// Produce the next employee collection, or `None` when there is nothing to mutate.
    ///
    /// Indices are drawn with replacement, so the same employee may be touched twice.
    pub fn tick(&mut self, current: &[Employee], now: DateTime<Utc>) -> Option<EmployeeTick> {
        if current.is_empty() {
            trace!("employee collection empty, skipping tick");
            return None;
        }
        let mut employees = current.to_vec();
        let touches = self.rng.gen_range(1..=self.max_mutations);
        let mut toggled = 0;
        let mut relocated = 0;

        for _ in 0..touches {
            let index = self.rng.gen_range(0..employees.len());
            let previous = &employees[index];
            let next = if self.toggle.sample(&mut self.rng) {
                toggled += 1;
                toggle_presence(previous, now)
            } else {
                relocated += 1;
                let pick = self.rng.gen_range(0..self.relocation_zones.len());
                let zone = self.relocation_zones[pick].clone();
                Employee {
                    zone,
                    last_detected: previous.last_detected.max(now),
                    ..previous.clone()
                }
            };
            trace!(
                employee = %next.id,
                status = %next.status,
                zone = %next.zone,
                "employee updated"
            );
            employees[index] = next;
        }

        debug!(touches, toggled, relocated, "employee tick applied");
        Some(EmployeeTick {
            employees,
            toggled,
            relocated,
        })
    }
}

/// Flip presence while keeping the check-out time consistent with the new status.
fn toggle_presence(previous: &Employee, now: DateTime<Utc>) -> Employee {
    let status = previous.status.toggled();
    let (check_in_time, check_out_time) = match status {
        PresenceStatus::OnSite => (previous.check_in_time.or(Some(now)), None),
        PresenceStatus::OffSite => (previous.check_in_time, Some(now)),
    };
    Employee {
        status,
        check_in_time,
        check_out_time,
        last_detected: previous.last_detected.max(now),
        ..previous.clone()
    }
}

/// Outcome of an alert simulator tick that raised a new alert.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertTick {
    pub alerts: Vec<Alert>,
    pub raised: Alert,
    pub evicted: usize,
}

/// Probabilistically prepends a new alert and caps the retained list.
#[derive(Debug)]
pub struct AlertMutator {
    rng: StdRng,
    raise: Bernoulli,
    retention: usize,
}

impl AlertMutator {
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            raise: Bernoulli::new(DEFAULT_ALERT_PROBABILITY)
                .unwrap_or_else(|_| unreachable!("default alert probability is within [0, 1]")),
            retention: DEFAULT_ALERT_RETENTION,
        }
    }

    pub fn with_probability(mut self, probability: f64) -> Result<Self> {
        self.raise = bernoulli("alert_probability", probability)?;
        Ok(self)
    }

    pub fn with_retention(mut self, retention: usize) -> Result<Self> {
        if retention == 0 {
            return Err(SimulationError::ZeroRetention);
        }
        self.retention = retention;
        Ok(self)
    }

    pub fn retention(&self) -> usize {
        self.retention
    }

    /// Roll for a new alert. `None` means the list is unchanged this tick.
    pub fn tick(&mut self, current: &[Alert], now: DateTime<Utc>) -> Option<AlertTick> {
        if !self.raise.sample(&mut self.rng) {
            trace!("no alert raised this tick");
            return None;
        }
        let raised = self.synthesize(now);
        let kept = current.len().min(self.retention - 1);
        let mut alerts = Vec::with_capacity(kept + 1);
        alerts.push(raised.clone());
        alerts.extend_from_slice(&current[..kept]);

        let evicted = current.len() - kept;
        debug!(
            alert = %raised.id,
            kind = %raised.kind,
            severity = %raised.severity,
            evicted,
            "alert raised"
        );
        Some(AlertTick {
            alerts,
            raised,
            evicted,
        })
    }

    fn synthesize(&mut self, now: DateTime<Utc>) -> Alert {
        let kinds: Vec<AlertKind> = AlertKind::iter().collect();
        let kind = kinds[self.rng.gen_range(0..kinds.len())];
        let id = uuid::Builder::from_random_bytes(self.rng.gen()).into_uuid();
        Alert {
            id: id.to_string(),
            kind,
            message: kind.template().to_owned(),
            severity: kind.default_severity(),
            timestamp: now,
            resolved: false,
        }
    }
}

/// Mark one alert resolved. `None` when no alert carries `id`.
pub fn resolve_alert(current: &[Alert], id: &str) -> Option<Vec<Alert>> {
    if !current.iter().any(|alert| alert.id == id) {
        return None;
    }
    Some(
        current
            .iter()
            .map(|alert| {
                if alert.id == id {
                    Alert {
                        resolved: true,
                        ..alert.clone()
                    }
                } else {
                    alert.clone()
                }
            })
            .collect(),
    )
}

/// Remove one alert entirely. `None` when no alert carries `id`.
pub fn dismiss_alert(current: &[Alert], id: &str) -> Option<Vec<Alert>> {
    let position = current.iter().position(|alert| alert.id == id)?;
    let mut next = current.to_vec();
    next.remove(position);
    Some(next)
}
