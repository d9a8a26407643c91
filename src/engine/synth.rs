use tracing::warn;

use crate::model::employee::Employee;

use super::kpi::{round2, MonthlyKpiSummary, SummarySource};

/// Stable per-employee variation in [-10, +10] percent, derived from the last
/// two digits of the id so the same employee always varies the same way.
fn variation_percent(employee_id: u64) -> i64 {
    ((employee_id % 100) % 21) as i64 - 10
}

/// Derives per-employee rows from a department aggregate when no real
/// per-employee monthly KPI data exists.
///
/// This is a display-only approximation: each score is the department score
/// shifted by the employee's stable variation and clamped to [0,100], and the
/// rows are tagged [`SummarySource::Synthesized`] so no caller can mistake
/// them for reported data.
pub fn synthesize_employee_summaries(
    department_summary: &MonthlyKpiSummary,
    employees: &[Employee],
) -> Vec<MonthlyKpiSummary> {
    employees
        .iter()
        .map(|employee| {
            let factor = 1.0 + variation_percent(employee.id) as f64 / 100.0;
            let scale = |score: f64| round2((score * factor).clamp(0.0, 100.0));
            MonthlyKpiSummary {
                employee_id: employee.id,
                employee_name: employee.name.clone(),
                department_id: department_summary.department_id,
                department: department_summary.department.clone(),
                year: department_summary.year,
                month: department_summary.month,
                attendance_score: scale(department_summary.attendance_score),
                attendance_weight: department_summary.attendance_weight,
                training_score: scale(department_summary.training_score),
                training_weight: department_summary.training_weight,
                other_weight_sum: department_summary.other_weight_sum,
                other_weighted_sum: round2(department_summary.other_weighted_sum * factor),
                other_indicators_kpi: scale(department_summary.other_indicators_kpi),
                final_kpi: scale(department_summary.final_kpi),
                source: SummarySource::Synthesized,
            }
        })
        .collect()
}

/// Same shape as the real aggregator's output: reported rows win, the
/// synthesizer only fills the gap when a department/month has none.
pub fn summaries_or_fallback(
    reported: Vec<MonthlyKpiSummary>,
    department_summary: &MonthlyKpiSummary,
    employees: &[Employee],
) -> Vec<MonthlyKpiSummary> {
    if reported.is_empty() {
        warn!(
            department = %department_summary.department,
            year = department_summary.year,
            month = department_summary.month,
            employees = employees.len(),
            "no per-employee KPI rows, synthesizing from department aggregate"
        );
        synthesize_employee_summaries(department_summary, employees)
    } else {
        reported
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dept_summary(final_kpi: f64) -> MonthlyKpiSummary {
        MonthlyKpiSummary {
            employee_id: 0,
            employee_name: String::new(),
            department_id: Some(1),
            department: "Engineering".to_string(),
            year: 2025,
            month: 6,
            attendance_score: 90.0,
            attendance_weight: 0.4,
            training_score: 80.0,
            training_weight: 0.2,
            other_weight_sum: 0.4,
            other_weighted_sum: 30.0,
            other_indicators_kpi: 75.0,
            final_kpi,
            source: SummarySource::Reported,
        }
    }

    fn employee(id: u64) -> Employee {
        Employee {
            id,
            name: format!("Employee {id}"),
            position: None,
            department: None,
        }
    }

    #[test]
    fn variation_is_stable_and_bounded() {
        for id in 0..500u64 {
            let v = variation_percent(id);
            assert!((-10..=10).contains(&v), "id {id} -> {v}");
            assert_eq!(v, variation_percent(id));
        }
        // id ending in 10 sits exactly at the department score
        assert_eq!(variation_percent(10), 0);
        assert_eq!(variation_percent(110), 0);
    }

    #[test]
    fn synthesized_rows_are_tagged_and_clamped() {
        let rows = synthesize_employee_summaries(&dept_summary(98.0), &[
            employee(20), // +10 percent, would exceed 100
            employee(10), // unchanged
            employee(0),  // -10 percent
        ]);
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.source == SummarySource::Synthesized));
        assert_eq!(rows[0].final_kpi, 100.0);
        assert_eq!(rows[1].final_kpi, 98.0);
        assert_eq!(rows[2].final_kpi, 88.2);
        for row in &rows {
            assert!((0.0..=100.0).contains(&row.final_kpi));
            assert!((0.0..=100.0).contains(&row.attendance_score));
        }
    }

    #[test]
    fn fallback_only_fires_on_empty_reported_set() {
        let dept = dept_summary(80.0);
        let reported = vec![MonthlyKpiSummary {
            employee_id: 3,
            ..dept.clone()
        }];
        let kept = summaries_or_fallback(reported.clone(), &dept, &[employee(1), employee(2)]);
        assert_eq!(kept, reported);

        let synthesized = summaries_or_fallback(Vec::new(), &dept, &[employee(1), employee(2)]);
        assert_eq!(synthesized.len(), 2);
        assert!(synthesized.iter().all(|r| r.source == SummarySource::Synthesized));
    }
}
