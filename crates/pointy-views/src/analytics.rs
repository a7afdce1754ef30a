//! ---
//! pointy_section: "12-derived-views"
//! pointy_subsection: "module"
//! pointy_type: "source"
//! pointy_scope: "code"
//! pointy_description: "Per-department presence aggregation for the analytics charts."
//! pointy_version: "v0.1.0"
//! pointy_owner: "tbd"
//! ---
//! Department stats are the one chart series computed from the live employee
//! snapshot. Daily and hourly series come straight from the generators and are
//! not reconciled with it.

use indexmap::IndexMap;
use pointy_sim::Employee;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentStat {
    pub name: String,
    pub total: usize,
    pub present: usize,
    /// Percentage on site rounded to the nearest integer; `None` for an empty department.
    pub rate: Option<u32>,
}

/// Departments in order of first appearance in the snapshot.
pub fn department_stats(employees: &[Employee]) -> Vec<DepartmentStat> {
    let mut tallies: IndexMap<&str, (usize, usize)> = IndexMap::new();
    for employee in employees {
        let (total, present) = tallies.entry(employee.department.as_str()).or_default();
        *total += 1;
        if employee.is_on_site() {
            *present += 1;
        }
    }
    tallies
        .into_iter()
        .map(|(name, (total, present))| DepartmentStat {
            name: name.to_owned(),
            total,
            present,
            rate: presence_rate(present, total),
        })
        .collect()
}

fn presence_rate(present: usize, total: usize) -> Option<u32> {
    if total == 0 {
        return None;
    }
    Some((present as f64 / total as f64 * 100.0).round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pointy_sim::PresenceStatus;

    fn employee(department: &str, status: PresenceStatus) -> Employee {
        let now = Utc::now();
        Employee {
            id: format!("EMP-{department}"),
            name: "Rachid Khelifi".to_owned(),
            department: department.to_owned(),
            status,
            location: "R&D Center".to_owned(),
            zone: "Floor 2".to_owned(),
            last_detected: now,
            check_in_time: Some(now),
            check_out_time: matches!(status, PresenceStatus::OffSite).then_some(now),
        }
    }

    #[test]
    fn rates_per_department_in_first_seen_order() {
        let employees = vec![
            employee("Eng", PresenceStatus::OnSite),
            employee("Eng", PresenceStatus::OffSite),
            employee("HR", PresenceStatus::OnSite),
        ];
        assert_eq!(
            department_stats(&employees),
            vec![
                DepartmentStat {
                    name: "Eng".into(),
                    total: 2,
                    present: 1,
                    rate: Some(50),
                },
                DepartmentStat {
                    name: "HR".into(),
                    total: 1,
                    present: 1,
                    rate: Some(100),
                },
            ]
        );
    }

    #[test]
    fn rate_rounds_to_nearest() {
        assert_eq!(presence_rate(1, 3), Some(33));
        assert_eq!(presence_rate(2, 3), Some(67));
        assert_eq!(presence_rate(0, 0), None);
    }

    #[test]
    fn empty_snapshot_has_no_departments() {
        assert!(department_stats(&[]).is_empty());
    }
}
