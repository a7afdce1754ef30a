//! ---
//! pointy_section: "12-derived-views"
//! pointy_subsection: "module"
//! pointy_type: "source"
//! pointy_scope: "code"
//! pointy_description: "Alert panel projection."
//! pointy_version: "v0.1.0"
//! pointy_owner: "tbd"
//! ---
use pointy_sim::{Alert, Severity};
use serde::Serialize;

pub fn unread_count(alerts: &[Alert]) -> usize {
    alerts.iter().filter(|alert| !alert.resolved).count()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertPanel {
    pub alerts: Vec<Alert>,
    pub unread: usize,
    pub high_severity_open: usize,
}

impl AlertPanel {
    pub fn from_alerts(alerts: &[Alert]) -> Self {
        Self {
            alerts: alerts.to_vec(),
            unread: unread_count(alerts),
            high_severity_open: alerts
                .iter()
                .filter(|alert| !alert.resolved && alert.severity == Severity::High)
                .count(),
        }
    }

    /// Nothing to show at all.
    pub fn all_clear(&self) -> bool {
        self.alerts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pointy_sim::seed_alerts;

    #[test]
    fn seeded_alerts_have_four_unread() {
        let panel = AlertPanel::from_alerts(&seed_alerts(Utc::now()));
        assert_eq!(panel.alerts.len(), 5);
        assert_eq!(panel.unread, 4);
        assert!(!panel.all_clear());
    }

    #[test]
    fn empty_list_is_all_clear() {
        let panel = AlertPanel::from_alerts(&[]);
        assert!(panel.all_clear());
        assert_eq!(panel.unread, 0);
        assert_eq!(panel.high_severity_open, 0);
    }
}
