//! ---
//! pointy_section: "01-core-functionality"
//! pointy_subsection: "01-bootstrap"
//! pointy_type: "source"
//! pointy_scope: "code"
//! pointy_description: "Live feeds and page sessions."
//! pointy_version: "v0.1.0"
//! pointy_owner: "tbd"
//! ---
//! Live state for the pointy dashboards.
//!
//! A [`PageSession`] generates a page's initial snapshot, owns the employee
//! and alert [`Feed`]s that tick against it, and renders [`PageView`]s from
//! whatever the feeds hold at that moment.

pub mod errors;
pub mod feeds;
pub mod page;
pub mod session;

pub use errors::FeedError;
pub use feeds::{AlertFeed, EmployeeFeed, Feed, Mutator, Snapshot};
pub use page::{
    AnalyticsView, AttendanceView, DashboardView, EmployeesView, LocationsView, PageKind,
    PageView, PayrollView, PresenceView, SecurityView, ViewRequest,
};
pub use session::{PageSession, SessionSummary, SessionTicks};
