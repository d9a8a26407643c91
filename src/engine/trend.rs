use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use super::calendar::{month_label, parse_month_label};
use super::kpi::{round2, MonthlyKpiSummary};

/// Exact-match predicates over monthly summaries; `None` means "all" and
/// disables that field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryFilter {
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub department_id: Option<u64>,
}

/// Keeps summaries matching every enabled predicate. Input order is
/// preserved, but callers re-sort for their own views.
pub fn filter_summaries(
    summaries: &[MonthlyKpiSummary],
    filter: &SummaryFilter,
) -> Vec<MonthlyKpiSummary> {
    summaries
        .iter()
        .filter(|s| filter.month.map_or(true, |m| s.month == m))
        .filter(|s| filter.year.map_or(true, |y| s.year == y))
        .filter(|s| filter.department_id.map_or(true, |d| s.department_id == Some(d)))
        .cloned()
        .collect()
}

/// One charted point of the month-over-month trend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    /// Display label, "Abbrev YYYY" from the fixed abbreviation table.
    pub label: String,
    /// Mean final KPI of the month's summaries, display-rounded.
    pub final_kpi: f64,
}

/// Groups summaries by (year, month) and orders them chronologically by the
/// zero-padded "YYYY-MM" key, so charts are reproducible across environments.
pub fn trend_points(summaries: &[MonthlyKpiSummary]) -> Vec<TrendPoint> {
    let mut groups: HashMap<String, (i32, u32, f64, u32)> = HashMap::new();
    for s in summaries {
        let key = format!("{:04}-{:02}", s.year, s.month);
        let entry = groups.entry(key).or_insert((s.year, s.month, 0.0, 0));
        entry.2 += s.final_kpi;
        entry.3 += 1;
    }

    let mut keys: Vec<String> = groups.keys().cloned().collect();
    keys.sort();

    keys.into_iter()
        .filter_map(|key| groups.remove(&key))
        .map(|(year, month, sum, count)| TrendPoint {
            label: month_label(year, month),
            final_kpi: round2(sum / f64::from(count)),
        })
        .collect()
}

/// Keeps trend points inside the inclusive (year, month) window.
///
/// A point whose label cannot be parsed back into a period is kept rather
/// than dropped: losing a chart point silently is worse than showing one
/// that cannot be range-checked.
pub fn window_trend(
    points: &[TrendPoint],
    start: (i32, u32),
    end: (i32, u32),
) -> Vec<TrendPoint> {
    points
        .iter()
        .filter(|p| match parse_month_label(&p.label) {
            Some(period) => period >= start && period <= end,
            None => true,
        })
        .cloned()
        .collect()
}

/// Top `n` employees of a department by final KPI, using each employee's
/// latest-month summary. The sort is stable: employees with equal scores
/// keep their input order.
pub fn leaderboard(
    summaries: &[MonthlyKpiSummary],
    department_id: u64,
    n: usize,
) -> Vec<MonthlyKpiSummary> {
    let mut order: Vec<u64> = Vec::new();
    let mut latest: HashMap<u64, MonthlyKpiSummary> = HashMap::new();

    for s in summaries {
        if s.department_id != Some(department_id) {
            continue;
        }
        let replace = match latest.get(&s.employee_id) {
            // >= so a duplicate row for the same period is last-write-wins
            Some(current) => (s.year, s.month) >= (current.year, current.month),
            None => {
                order.push(s.employee_id);
                true
            }
        };
        if replace {
            latest.insert(s.employee_id, s.clone());
        }
    }

    let mut ranked: Vec<MonthlyKpiSummary> = order
        .into_iter()
        .filter_map(|id| latest.remove(&id))
        .collect();
    ranked.sort_by(|a, b| {
        b.final_kpi
            .partial_cmp(&a.final_kpi)
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(n);
    ranked
}
