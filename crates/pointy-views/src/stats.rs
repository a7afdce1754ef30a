//! ---
//! pointy_section: "12-derived-views"
//! pointy_subsection: "module"
//! pointy_type: "source"
//! pointy_scope: "code"
//! pointy_description: "Headline counters for the dashboard and employees pages."
//! pointy_version: "v0.1.0"
//! pointy_owner: "tbd"
//! ---
use std::collections::HashSet;

use pointy_sim::Employee;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PresenceStats {
    pub on_site: usize,
    pub checked_in_today: usize,
    pub absent: usize,
    /// Distinct `location` values across the snapshot.
    pub locations: usize,
}

pub fn presence_stats(employees: &[Employee]) -> PresenceStats {
    let on_site = employees.iter().filter(|e| e.is_on_site()).count();
    let checked_in_today = employees.iter().filter(|e| e.checked_in()).count();
    let locations = employees
        .iter()
        .map(|e| e.location.as_str())
        .collect::<HashSet<_>>()
        .len();
    PresenceStats {
        on_site,
        checked_in_today,
        absent: employees.len() - checked_in_today,
        locations,
    }
}

/// Check-ins still awaiting verification: 2% of today's check-ins, rounded down.
pub fn pending_verification(stats: &PresenceStats) -> usize {
    stats.checked_in_today * 2 / 100
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Headcount {
    pub total: usize,
    pub departments: usize,
    pub on_site: usize,
    pub off_site: usize,
}

pub fn headcount(employees: &[Employee]) -> Headcount {
    let on_site = employees.iter().filter(|e| e.is_on_site()).count();
    Headcount {
        total: employees.len(),
        departments: employees
            .iter()
            .map(|e| e.department.as_str())
            .collect::<HashSet<_>>()
            .len(),
        on_site,
        off_site: employees.len() - on_site,
    }
}
