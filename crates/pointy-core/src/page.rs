//! ---
//! pointy_section: "01-core-functionality"
//! pointy_subsection: "module"
//! pointy_type: "source"
//! pointy_scope: "code"
//! pointy_description: "Dashboard pages and the derived views they render."
//! pointy_version: "v0.1.0"
//! pointy_owner: "tbd"
//! ---
use pointy_common::PagesConfig;
use pointy_sim::{
    AttendanceRecord, DailyStat, Employee, HourlyPresence, PayrollEntry, SecurityLog,
};
use pointy_views::{
    AlertPanel, AttendanceQuery, BuildingGroup, DepartmentStat, EmployeeQuery, Headcount, Page,
    PaySlip, PayrollSummary, PresenceStats, SecurityCounters, SecurityQuery, SortState,
    ZoneSummary,
};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PageKind {
    Dashboard,
    Presence,
    Attendance,
    Alerts,
    Analytics,
    Employees,
    Locations,
    Payroll,
    Security,
}

impl PageKind {
    /// Size of the live employee roster, `None` for pages without one.
    pub fn roster_size(self, pages: &PagesConfig) -> Option<usize> {
        match self {
            PageKind::Dashboard => Some(pages.dashboard_employees),
            PageKind::Presence => Some(pages.presence_employees),
            PageKind::Analytics => Some(pages.analytics_employees),
            PageKind::Attendance => Some(pages.attendance_employees),
            PageKind::Employees => Some(pages.employees_employees),
            PageKind::Security => Some(pages.security_employees),
            PageKind::Alerts | PageKind::Locations | PageKind::Payroll => None,
        }
    }

    pub fn has_alerts(self) -> bool {
        matches!(self, PageKind::Dashboard | PageKind::Alerts)
    }

    pub fn has_zones(self) -> bool {
        matches!(self, PageKind::Dashboard | PageKind::Locations)
    }

    pub fn has_trend_charts(self) -> bool {
        matches!(self, PageKind::Dashboard | PageKind::Analytics)
    }

    /// Index mixed into the base seed so pages draw independent sequences.
    pub(crate) fn seed_index(self) -> u64 {
        self as u64
    }
}

/// User selections feeding the derived views.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewRequest {
    pub employees: EmployeeQuery,
    pub sort: SortState,
    pub attendance: AttendanceQuery,
    pub security: SecurityQuery,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub stats: PresenceStats,
    pub pending_verification: usize,
    pub presence: Page<Employee>,
    pub buildings: Vec<BuildingGroup>,
    pub alerts: AlertPanel,
    pub departments: Vec<DepartmentStat>,
    pub daily: Vec<DailyStat>,
    pub hourly: Vec<HourlyPresence>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresenceView {
    pub stats: PresenceStats,
    pub departments: Vec<String>,
    pub table: Page<Employee>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceView {
    pub days: u32,
    pub table: Page<AttendanceRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsView {
    pub departments: Vec<DepartmentStat>,
    pub daily: Vec<DailyStat>,
    pub hourly: Vec<HourlyPresence>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeesView {
    pub headcount: Headcount,
    pub departments: Vec<String>,
    pub table: Page<Employee>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationsView {
    pub summary: ZoneSummary,
    pub buildings: Vec<BuildingGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayrollView {
    pub summary: PayrollSummary,
    pub roster: Vec<PayrollEntry>,
    pub slips: Vec<PaySlip>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecurityView {
    pub counters: SecurityCounters,
    pub table: Page<SecurityLog>,
}

/// Everything one page renders, tagged by page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum PageView {
    Dashboard(DashboardView),
    Presence(PresenceView),
    Attendance(AttendanceView),
    Alerts(AlertPanel),
    Analytics(AnalyticsView),
    Employees(EmployeesView),
    Locations(LocationsView),
    Payroll(PayrollView),
    Security(SecurityView),
}

impl PageView {
    pub fn kind(&self) -> PageKind {
        match self {
            PageView::Dashboard(_) => PageKind::Dashboard,
            PageView::Presence(_) => PageKind::Presence,
            PageView::Attendance(_) => PageKind::Attendance,
            PageView::Alerts(_) => PageKind::Alerts,
            PageView::Analytics(_) => PageKind::Analytics,
            PageView::Employees(_) => PageKind::Employees,
            PageView::Locations(_) => PageKind::Locations,
            PageView::Payroll(_) => PageKind::Payroll,
            PageView::Security(_) => PageKind::Security,
        }
    }
}
