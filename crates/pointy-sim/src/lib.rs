//! ---
//! pointy_section: "11-simulation"
//! pointy_subsection: "01-bootstrap"
//! pointy_type: "source"
//! pointy_scope: "code"
//! pointy_description: "Simulation module exports and shared record types."
//! pointy_version: "v0.1.0"
//! pointy_owner: "tbd"
//! ---
//! Synthetic workforce data for the pointy dashboards.
//!
//! [`RecordGenerator`] produces the initial snapshot a page works from, while
//! [`EmployeeMutator`] and [`AlertMutator`] compute the replacement collections
//! applied on every simulator tick. All randomness comes from seedable `StdRng`
//! instances so sequences can be replayed in tests.

pub mod errors;
pub mod generator;
pub mod mutation;
pub mod records;
pub mod reference;

pub use errors::SimulationError;
pub use generator::{payroll_roster, seed_alerts, RecordGenerator};
pub use mutation::{
    dismiss_alert, resolve_alert, AlertMutator, AlertTick, EmployeeMutator, EmployeeTick,
};
pub use records::{
    AccessAction, AccessMethod, Alert, AlertKind, AttendanceRecord, AttendanceStatus, DailyStat,
    Employee, HourlyPresence, PayrollEntry, PayrollStatus, PresenceStatus, SecurityLog, Severity,
    Zone,
};
