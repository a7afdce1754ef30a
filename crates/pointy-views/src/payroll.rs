//! ---
//! pointy_section: "12-derived-views"
//! pointy_subsection: "module"
//! pointy_type: "source"
//! pointy_scope: "code"
//! pointy_description: "Pay slip breakdown and payroll totals backing the export."
//! pointy_version: "v0.1.0"
//! pointy_owner: "tbd"
//! ---
use pointy_sim::{PayrollEntry, PayrollStatus};
use serde::Serialize;

const OVERTIME_MULTIPLIER: f64 = 1.5;
const SOCIAL_SECURITY_SHARE: f64 = 0.6;
const INCOME_TAX_SHARE: f64 = 0.4;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaySlip {
    pub employee_id: u32,
    pub gross: u64,
    pub net: i64,
    pub base_pay: u64,
    pub overtime_pay: f64,
    pub social_security: u64,
    pub income_tax: u64,
}

pub fn pay_slip(entry: &PayrollEntry) -> PaySlip {
    let gross = u64::from(entry.hours) * entry.rate;
    let regular_hours = entry.hours.saturating_sub(entry.overtime_hours);
    PaySlip {
        employee_id: entry.id,
        gross,
        net: gross as i64 - entry.deductions as i64,
        base_pay: u64::from(regular_hours) * entry.rate,
        overtime_pay: f64::from(entry.overtime_hours) * entry.rate as f64 * OVERTIME_MULTIPLIER,
        social_security: (entry.deductions as f64 * SOCIAL_SECURITY_SHARE).round() as u64,
        income_tax: (entry.deductions as f64 * INCOME_TAX_SHARE).round() as u64,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayrollSummary {
    pub total_employees: usize,
    pub total_payroll: u64,
    pub processed: usize,
    pub pending: usize,
    /// Rounded mean gross; absent for an empty roster.
    pub average_salary: Option<u64>,
    pub average_hours: Option<f64>,
}

pub fn payroll_summary(entries: &[PayrollEntry]) -> PayrollSummary {
    let total_payroll: u64 = entries
        .iter()
        .map(|entry| u64::from(entry.hours) * entry.rate)
        .sum();
    let processed = entries
        .iter()
        .filter(|entry| entry.status == PayrollStatus::Processed)
        .count();
    let count = entries.len();
    let (average_salary, average_hours) = if count == 0 {
        (None, None)
    } else {
        let hours: u64 = entries.iter().map(|entry| u64::from(entry.hours)).sum();
        (
            Some((total_payroll as f64 / count as f64).round() as u64),
            Some(hours as f64 / count as f64),
        )
    };
    PayrollSummary {
        total_employees: count,
        total_payroll,
        processed,
        pending: count - processed,
        average_salary,
        average_hours,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pointy_sim::payroll_roster;

    #[test]
    fn slip_breaks_down_gross_and_deductions() {
        let roster = payroll_roster();
        let slip = pay_slip(&roster[0]);
        assert_eq!(slip.gross, 134_400);
        assert_eq!(slip.net, 119_400);
        assert_eq!(slip.base_pay, 128_000);
        assert_eq!(slip.overtime_pay, 9_600.0);
        assert_eq!(slip.social_security, 9_000);
        assert_eq!(slip.income_tax, 6_000);
    }

    #[test]
    fn slip_without_overtime() {
        let roster = payroll_roster();
        let slip = pay_slip(&roster[1]);
        assert_eq!(slip.base_pay, slip.gross);
        assert_eq!(slip.overtime_pay, 0.0);
    }

    #[test]
    fn roster_summary() {
        let summary = payroll_summary(&payroll_roster());
        assert_eq!(summary.total_employees, 5);
        assert_eq!(summary.total_payroll, 698_200);
        assert_eq!(summary.processed, 3);
        assert_eq!(summary.pending, 2);
        assert_eq!(summary.average_salary, Some(139_640));
        assert_eq!(summary.average_hours, Some(164.6));
    }

    #[test]
    fn empty_roster_has_no_averages() {
        let summary = payroll_summary(&[]);
        assert_eq!(summary.total_payroll, 0);
        assert_eq!(summary.average_salary, None);
        assert_eq!(summary.average_hours, None);
    }
}
