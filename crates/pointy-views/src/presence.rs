//! ---
//! pointy_section: "12-derived-views"
//! pointy_subsection: "module"
//! pointy_type: "source"
//! pointy_scope: "code"
//! pointy_description: "Presence and employee table filtering and sorting."
//! pointy_version: "v0.1.0"
//! pointy_owner: "tbd"
//! ---
use std::cmp::Ordering;
use std::collections::BTreeSet;

use pointy_sim::{Employee, PresenceStatus};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::{filter::name_or_id_matches, paging::Page, Selection};

/// Search box plus the status and department dropdowns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployeeQuery {
    pub search: String,
    pub status: Selection<PresenceStatus>,
    pub department: Selection<String>,
}

impl EmployeeQuery {
    pub fn search(mut self, needle: impl Into<String>) -> Self {
        self.search = needle.into();
        self
    }

    pub fn status(mut self, status: PresenceStatus) -> Self {
        self.status = Selection::Only(status);
        self
    }

    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = Selection::Only(department.into());
        self
    }

    pub fn matches(&self, employee: &Employee) -> bool {
        name_or_id_matches(&self.search, &employee.name, &employee.id)
            && self.status.matches(&employee.status)
            && self.department.matches(&employee.department)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SortField {
    Name,
    Department,
    Status,
    Location,
    Zone,
    LastDetected,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Active sort column. Defaults to most recently detected first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            field: SortField::LastDetected,
            direction: SortDirection::Desc,
        }
    }
}

impl SortState {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Column header click: the active field flips direction, a new field starts ascending.
    pub fn select(self, field: SortField) -> Self {
        if self.field == field {
            Self::new(field, self.direction.flipped())
        } else {
            Self::new(field, SortDirection::Asc)
        }
    }

    pub fn compare(&self, a: &Employee, b: &Employee) -> Ordering {
        let ordering = match self.field {
            SortField::Name => compare_text(&a.name, &b.name),
            SortField::Department => compare_text(&a.department, &b.department),
            SortField::Status => compare_text(a.status.as_ref(), b.status.as_ref()),
            SortField::Location => compare_text(&a.location, &b.location),
            SortField::Zone => compare_text(&a.zone, &b.zone),
            SortField::LastDetected => a.last_detected.cmp(&b.last_detected),
        };
        self.direction.apply(ordering)
    }
}

/// Collation approximating a locale compare: case-folded first, exact text breaks ties.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Matching employees in display order. The sort is stable, so equal keys keep
/// snapshot order and repeated calls give identical results.
pub fn filter_and_sort(
    employees: &[Employee],
    query: &EmployeeQuery,
    sort: SortState,
) -> Vec<Employee> {
    let mut rows: Vec<Employee> = employees
        .iter()
        .filter(|employee| query.matches(employee))
        .cloned()
        .collect();
    rows.sort_by(|a, b| sort.compare(a, b));
    rows
}

pub fn presence_table(
    employees: &[Employee],
    query: &EmployeeQuery,
    sort: SortState,
    page_size: usize,
) -> Page<Employee> {
    Page::truncate(filter_and_sort(employees, query, sort), page_size)
}

/// Distinct departments for the department dropdown, sorted.
pub fn departments(employees: &[Employee]) -> Vec<String> {
    employees
        .iter()
        .map(|employee| employee.department.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn employee(
        id: &str,
        name: &str,
        department: &str,
        status: PresenceStatus,
        minutes_ago: i64,
    ) -> Employee {
        let now = Utc.with_ymd_and_hms(2024, 5, 14, 12, 0, 0).unwrap();
        Employee {
            id: id.to_owned(),
            name: name.to_owned(),
            department: department.to_owned(),
            status,
            location: "HQ Building A".to_owned(),
            zone: "Floor 1".to_owned(),
            last_detected: now - Duration::minutes(minutes_ago),
            check_in_time: Some(now - Duration::hours(3)),
            check_out_time: match status {
                PresenceStatus::OffSite => Some(now),
                PresenceStatus::OnSite => None,
            },
        }
    }

    fn roster() -> Vec<Employee> {
        vec![
            employee("EMP-000001", "omar Hadj", "Sales", PresenceStatus::OnSite, 30),
            employee("EMP-000002", "Amina Larbi", "Engineering", PresenceStatus::OffSite, 5),
            employee("EMP-000003", "Karim Saidi", "Engineering", PresenceStatus::OnSite, 50),
            employee("EMP-000004", "Leila Cherif", "HR", PresenceStatus::OnSite, 1),
        ]
    }

    fn ids(rows: &[Employee]) -> Vec<&str> {
        rows.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn default_sort_is_most_recent_first() {
        let rows = filter_and_sort(&roster(), &EmployeeQuery::default(), SortState::default());
        assert_eq!(ids(&rows), ["EMP-000004", "EMP-000002", "EMP-000001", "EMP-000003"]);
    }

    #[test]
    fn name_sort_ignores_case() {
        let sort = SortState::new(SortField::Name, SortDirection::Asc);
        let rows = filter_and_sort(&roster(), &EmployeeQuery::default(), sort);
        let names: Vec<_> = rows.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Amina Larbi", "Karim Saidi", "Leila Cherif", "omar Hadj"]);
    }

    #[test]
    fn filters_combine_with_and() {
        let query = EmployeeQuery::default()
            .department("Engineering")
            .status(PresenceStatus::OnSite);
        let rows = filter_and_sort(&roster(), &query, SortState::default());
        assert_eq!(ids(&rows), ["EMP-000003"]);

        let by_id = EmployeeQuery::default().search("emp-000004");
        assert_eq!(ids(&filter_and_sort(&roster(), &by_id, SortState::default())), ["EMP-000004"]);
    }

    #[test]
    fn repeated_application_is_identical() {
        let query = EmployeeQuery::default().search("a");
        let sort = SortState::new(SortField::Department, SortDirection::Desc);
        let employees = roster();
        let first = filter_and_sort(&employees, &query, sort);
        let second = filter_and_sort(&employees, &query, sort);
        assert_eq!(first, second);
        assert_eq!(employees, roster());
    }

    #[test]
    fn selecting_active_field_flips_and_new_field_resets() {
        let state = SortState::default();
        let flipped = state.select(SortField::LastDetected);
        assert_eq!(flipped, SortState::new(SortField::LastDetected, SortDirection::Asc));
        assert_eq!(flipped.select(SortField::LastDetected), state);

        let by_name = state.select(SortField::Name);
        assert_eq!(by_name, SortState::new(SortField::Name, SortDirection::Asc));
        assert_eq!(
            by_name.select(SortField::Name).select(SortField::Zone),
            SortState::new(SortField::Zone, SortDirection::Asc)
        );
    }

    #[test]
    fn table_truncates_to_page_size() {
        let page = presence_table(&roster(), &EmployeeQuery::default(), SortState::default(), 2);
        assert_eq!(page.caption("employees"), "Showing 2 of 4 employees");
        assert_eq!(ids(&page.rows), ["EMP-000004", "EMP-000002"]);
    }

    #[test]
    fn departments_are_sorted_and_unique() {
        assert_eq!(departments(&roster()), ["Engineering", "HR", "Sales"]);
        assert!(departments(&[]).is_empty());
    }
}
