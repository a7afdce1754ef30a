//! ---
//! pointy_section: "11-simulation"
//! pointy_subsection: "module"
//! pointy_type: "source"
//! pointy_scope: "code"
//! pointy_description: "Domain records produced by the generators and simulators."
//! pointy_version: "v0.1.0"
//! pointy_owner: "tbd"
//! ---
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Presence state of an employee at a monitored facility.
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
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum PresenceStatus {
    OnSite,
    OffSite,
}

impl PresenceStatus {
    pub fn toggled(self) -> Self {
        match self {
            PresenceStatus::OnSite => PresenceStatus::OffSite,
            PresenceStatus::OffSite => PresenceStatus::OnSite,
        }
    }
}

/// Identity and live presence state of one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub department: String,
    pub status: PresenceStatus,
    /// Building the employee is assigned to.
    pub location: String,
    pub zone: String,
    pub last_detected: DateTime<Utc>,
    #[serde(default)]
    pub check_in_time: Option<DateTime<Utc>>,
    /// Present only while the employee is off site.
    #[serde(default)]
    pub check_out_time: Option<DateTime<Utc>>,
}

impl Employee {
    pub fn is_on_site(&self) -> bool {
        matches!(self.status, PresenceStatus::OnSite)
    }

    pub fn checked_in(&self) -> bool {
        self.check_in_time.is_some()
    }
}

/// A capacity-bounded area inside a building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
    pub building: String,
    pub capacity: u32,
    /// May exceed `capacity` to model overcrowding.
    pub current_occupancy: u32,
}

impl Zone {
    /// Slug built from building and zone name, e.g. `hq-building-a-floor-1`.
    pub fn slug(building: &str, name: &str) -> String {
        format!("{}-{}", building, name)
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
    }
}

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
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum AlertKind {
    Overcrowding,
    Missing,
    Unauthorized,
    Late,
}

impl AlertKind {
    /// Severity assigned to alerts raised by the live simulator.
    pub fn default_severity(self) -> Severity {
        match self {
            AlertKind::Unauthorized => Severity::High,
            AlertKind::Overcrowding => Severity::Medium,
            AlertKind::Missing | AlertKind::Late => Severity::Low,
        }
    }

    /// Message template used by the live simulator.
    pub fn template(self) -> &'static str {
        match self {
            AlertKind::Overcrowding => "Zone capacity exceeded in Meeting Rooms",
            AlertKind::Missing => "Employee not detected in expected zone",
            AlertKind::Unauthorized => "Badge scan rejected at restricted area",
            AlertKind::Late => "New late arrival detected",
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// A notifiable event. `resolved` only ever moves from false to true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub kind: AlertKind,
    pub message: String,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
    pub resolved: bool,
}

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
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    EarlyLeave,
}

/// One employee's attendance on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// `<employee id>-<YYYY-MM-DD>`.
    pub id: String,
    pub employee_id: String,
    pub employee_name: String,
    pub date: NaiveDate,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    pub status: AttendanceStatus,
    pub total_hours: f64,
}

/// Present/absent/late counts for one day of the trend chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStat {
    pub date: NaiveDate,
    pub present: u32,
    pub absent: u32,
    pub late: u32,
}

/// Headcount on site for one hour of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyPresence {
    pub hour: u32,
    pub label: String,
    pub count: u32,
}

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
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum AccessAction {
    Entry,
    Exit,
    Denied,
}

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
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum AccessMethod {
    Badge,
    Biometric,
    Manual,
}

/// Access-control audit event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityLog {
    pub id: String,
    pub employee_id: String,
    pub employee_name: String,
    pub action: AccessAction,
    pub location: String,
    pub zone: String,
    pub timestamp: DateTime<Utc>,
    pub method: AccessMethod,
}

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
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum PayrollStatus {
    Processed,
    Pending,
}

/// Monthly payroll line for one employee. Monetary values are whole dinars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollEntry {
    pub id: u32,
    pub name: String,
    pub department: String,
    pub hours: u32,
    pub rate: u64,
    pub verified: bool,
    pub status: PayrollStatus,
    pub overtime_hours: u32,
    pub deductions: u64,
    pub work_days: u32,
    pub absences: u32,
}
