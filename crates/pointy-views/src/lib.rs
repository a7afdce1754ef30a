//! ---
//! pointy_section: "12-derived-views"
//! pointy_subsection: "01-bootstrap"
//! pointy_type: "source"
//! pointy_scope: "code"
//! pointy_description: "Derived-view module exports."
//! pointy_version: "v0.1.0"
//! pointy_owner: "tbd"
//! ---
//! Pure projections over the current record snapshot.
//!
//! Every function here is synchronous and total: empty inputs yield empty
//! tables or all-clear panels, never errors. Nothing is cached; callers
//! recompute after each snapshot change.

pub mod alerts;
pub mod analytics;
pub mod filter;
pub mod logs;
pub mod paging;
pub mod payroll;
pub mod presence;
pub mod stats;
pub mod zones;

pub use alerts::{unread_count, AlertPanel};
pub use analytics::{department_stats, DepartmentStat};
pub use filter::Selection;
pub use logs::{
    attendance_table, security_counters, security_table, AttendanceQuery, SecurityCounters,
    SecurityQuery,
};
pub use paging::Page;
pub use payroll::{pay_slip, payroll_summary, PaySlip, PayrollSummary};
pub use presence::{
    departments, filter_and_sort, presence_table, EmployeeQuery, SortDirection, SortField,
    SortState,
};
pub use stats::{headcount, pending_verification, presence_stats, Headcount, PresenceStats};
pub use zones::{
    capacity_status, fill_percent, group_by_building, zone_summary, BuildingGroup,
    CapacityStatus, ZoneSummary, ZoneView,
};
