//! ---
//! pointy_section: "12-derived-views"
//! pointy_subsection: "module"
//! pointy_type: "source"
//! pointy_scope: "code"
//! pointy_description: "Security and attendance log filtering."
//! pointy_version: "v0.1.0"
//! pointy_owner: "tbd"
//! ---
use chrono::{DateTime, NaiveDate, Utc};
use pointy_common::time::same_calendar_day;
use pointy_sim::{AccessAction, AttendanceRecord, AttendanceStatus, SecurityLog};
use serde::{Deserialize, Serialize};

use crate::{filter::name_or_id_matches, paging::Page, Selection};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityQuery {
    pub search: String,
    pub action: Selection<AccessAction>,
    pub date: Option<NaiveDate>,
}

impl SecurityQuery {
    pub fn matches(&self, log: &SecurityLog) -> bool {
        name_or_id_matches(&self.search, &log.employee_name, &log.employee_id)
            && self.action.matches(&log.action)
            && self
                .date
                .map_or(true, |day| same_calendar_day(log.timestamp, day))
    }
}

/// Filtered events, keeping the newest-first order of the log.
pub fn security_table(
    logs: &[SecurityLog],
    query: &SecurityQuery,
    page_size: usize,
) -> Page<SecurityLog> {
    Page::truncate(
        logs.iter().filter(|log| query.matches(log)).cloned().collect(),
        page_size,
    )
}

/// Header counters, computed over the whole log regardless of filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SecurityCounters {
    pub events_today: usize,
    pub entries: usize,
    pub exits: usize,
    pub denied: usize,
}

pub fn security_counters(logs: &[SecurityLog], now: DateTime<Utc>) -> SecurityCounters {
    let today = now.date_naive();
    logs.iter().fold(SecurityCounters::default(), |mut counters, log| {
        if same_calendar_day(log.timestamp, today) {
            counters.events_today += 1;
        }
        match log.action {
            AccessAction::Entry => counters.entries += 1,
            AccessAction::Exit => counters.exits += 1,
            AccessAction::Denied => counters.denied += 1,
        }
        counters
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttendanceQuery {
    pub search: String,
    pub status: Selection<AttendanceStatus>,
    pub date: Option<NaiveDate>,
}

impl AttendanceQuery {
    pub fn matches(&self, record: &AttendanceRecord) -> bool {
        name_or_id_matches(&self.search, &record.employee_name, &record.employee_id)
            && self.status.matches(&record.status)
            && self.date.map_or(true, |day| record.date == day)
    }
}

pub fn attendance_table(
    records: &[AttendanceRecord],
    query: &AttendanceQuery,
    page_size: usize,
) -> Page<AttendanceRecord> {
    Page::truncate(
        records
            .iter()
            .filter(|record| query.matches(record))
            .cloned()
            .collect(),
        page_size,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pointy_sim::AccessMethod;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 14, 15, 0, 0).unwrap()
    }

    fn log(id: &str, name: &str, action: AccessAction, hours_ago: i64) -> SecurityLog {
        SecurityLog {
            id: format!("LOG-{id}-{hours_ago}"),
            employee_id: id.to_owned(),
            employee_name: name.to_owned(),
            action,
            location: "HQ Building B".to_owned(),
            zone: "Main Entrance".to_owned(),
            timestamp: now() - Duration::hours(hours_ago),
            method: AccessMethod::Badge,
        }
    }

    fn logs() -> Vec<SecurityLog> {
        vec![
            log("EMP-0000AA", "Nadia Rahmani", AccessAction::Entry, 1),
            log("EMP-0000BB", "Ali Benmoussa", AccessAction::Denied, 2),
            log("EMP-0000AA", "Nadia Rahmani", AccessAction::Exit, 30),
            log("EMP-0000CC", "Samira Hamidi", AccessAction::Entry, 50),
        ]
    }

    #[test]
    fn counters_cover_whole_log() {
        let counters = security_counters(&logs(), now());
        assert_eq!(
            counters,
            SecurityCounters {
                events_today: 2,
                entries: 2,
                exits: 1,
                denied: 1,
            }
        );
    }

    #[test]
    fn security_filter_combines_search_action_and_day() {
        let query = SecurityQuery {
            search: "nadia".into(),
            ..SecurityQuery::default()
        };
        assert_eq!(security_table(&logs(), &query, 50).total, 2);

        let query = SecurityQuery {
            action: Selection::Only(AccessAction::Entry),
            date: Some(NaiveDate::from_ymd_opt(2024, 5, 14).unwrap()),
            ..SecurityQuery::default()
        };
        let page = security_table(&logs(), &query, 50);
        assert_eq!(page.total, 1);
        assert_eq!(page.rows[0].employee_name, "Nadia Rahmani");
    }

    #[test]
    fn security_table_truncates() {
        let page = security_table(&logs(), &SecurityQuery::default(), 3);
        assert_eq!(page.caption("events"), "Showing 3 of 4 events");
        assert!(page.rows[0].timestamp > page.rows[1].timestamp);
    }

    fn record(id: &str, name: &str, day: u32, status: AttendanceStatus) -> AttendanceRecord {
        let date = NaiveDate::from_ymd_opt(2024, 5, day).unwrap();
        AttendanceRecord {
            id: format!("{id}-{date}"),
            employee_id: id.to_owned(),
            employee_name: name.to_owned(),
            date,
            check_in: None,
            check_out: None,
            status,
            total_hours: 0.0,
        }
    }

    #[test]
    fn attendance_filter_by_status_and_date() {
        let records = vec![
            record("EMP-0000AA", "Nadia Rahmani", 14, AttendanceStatus::Absent),
            record("EMP-0000BB", "Ali Benmoussa", 14, AttendanceStatus::Late),
            record("EMP-0000AA", "Nadia Rahmani", 13, AttendanceStatus::Late),
        ];
        let query = AttendanceQuery {
            status: Selection::Only(AttendanceStatus::Late),
            ..AttendanceQuery::default()
        };
        assert_eq!(attendance_table(&records, &query, 50).total, 2);

        let query = AttendanceQuery {
            search: "emp-0000aa".into(),
            date: NaiveDate::from_ymd_opt(2024, 5, 13),
            ..AttendanceQuery::default()
        };
        let page = attendance_table(&records, &query, 50);
        assert_eq!(page.total, 1);
        assert_eq!(page.rows[0].status, AttendanceStatus::Late);

        assert!(attendance_table(&[], &AttendanceQuery::default(), 50).is_empty());
    }
}
