use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::model::kpi::{IndicatorKind, Kpi, KpiDetail};

/// Where a monthly summary came from. Synthesized rows are a display-only
/// approximation and must stay distinguishable from reported data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SummarySource {
    Reported,
    Synthesized,
}

/// One row per (employee, department, year, month) with the weighted final
/// KPI. Scores are display-rounded to 2 decimals; weights are fractions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyKpiSummary {
    pub employee_id: u64,
    pub employee_name: String,
    pub department_id: Option<u64>,
    pub department: String,
    pub year: i32,
    pub month: u32,
    pub attendance_score: f64,
    pub attendance_weight: f64,
    pub training_score: f64,
    pub training_weight: f64,
    pub other_weight_sum: f64,
    pub other_weighted_sum: f64,
    /// Weighted average of the custom indicators, for detail views.
    pub other_indicators_kpi: f64,
    /// Weighted combination of all contributions, clamped to [0,100].
    pub final_kpi: f64,
    pub source: SummarySource,
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Indicator weights arrive either as fractions in [0,1] or as percentages.
/// Anything above 1 is treated as a percentage.
fn weight_fraction(weight: f64) -> f64 {
    if weight > 1.0 { weight / 100.0 } else { weight.max(0.0) }
}

/// A detail's stored score wins when present; otherwise the score is derived
/// from realized/target scaled to 0-100. A zero target scores 0, never a
/// division error.
fn indicator_score(detail: &KpiDetail) -> f64 {
    match detail.score {
        Some(score) => score.clamp(0.0, 100.0),
        None if detail.target == 0.0 => 0.0,
        None => (detail.realized / detail.target * 100.0).clamp(0.0, 100.0),
    }
}

struct SummaryAccumulator {
    employee_id: u64,
    employee_name: String,
    department_id: Option<u64>,
    department: String,
    year: i32,
    month: u32,
    attendance: Option<(f64, f64)>, // (score, weight fraction)
    training: Option<(f64, f64)>,
    other_order: Vec<u64>,
    other: HashMap<u64, (f64, f64)>, // indicator id -> (score, weight fraction)
}

impl SummaryAccumulator {
    fn apply(&mut self, detail: &KpiDetail) {
        let score = indicator_score(detail);
        let weight = weight_fraction(detail.indicator.weight);
        match detail.indicator.kind() {
            // last-write-wins for duplicate rows of the same indicator
            IndicatorKind::Attendance => self.attendance = Some((score, weight)),
            IndicatorKind::Training => self.training = Some((score, weight)),
            IndicatorKind::Other => {
                if self.other.insert(detail.indicator.id, (score, weight)).is_none() {
                    self.other_order.push(detail.indicator.id);
                }
            }
        }
    }

    fn finish(self) -> MonthlyKpiSummary {
        let (attendance_score, attendance_weight) = self.attendance.unwrap_or((0.0, 0.0));
        let (training_score, training_weight) = self.training.unwrap_or((0.0, 0.0));

        let mut other_weight_sum = 0.0;
        let mut other_weighted_sum = 0.0;
        for id in &self.other_order {
            if let Some((score, weight)) = self.other.get(id) {
                other_weight_sum += weight;
                other_weighted_sum += score * weight;
            }
        }
        let other_indicators_kpi = if other_weight_sum > 0.0 {
            other_weighted_sum / other_weight_sum
        } else {
            0.0
        };

        // accumulate unrounded, round once for display
        let final_kpi = (attendance_score * attendance_weight
            + training_score * training_weight
            + other_weighted_sum)
            .clamp(0.0, 100.0);

        MonthlyKpiSummary {
            employee_id: self.employee_id,
            employee_name: self.employee_name,
            department_id: self.department_id,
            department: self.department,
            year: self.year,
            month: self.month,
            attendance_score: round2(attendance_score),
            attendance_weight,
            training_score: round2(training_score),
            training_weight,
            other_weight_sum: round2(other_weight_sum),
            other_weighted_sum: round2(other_weighted_sum),
            other_indicators_kpi: round2(other_indicators_kpi),
            final_kpi: round2(final_kpi),
            source: SummarySource::Reported,
        }
    }
}

/// Groups KPI detail records into one summary per (employee, year, month).
///
/// Months without any detail rows simply produce no summary; there is no
/// zero-filling or interpolation. Groups come out in first-seen order.
pub fn monthly_summaries(kpis: &[Kpi]) -> Vec<MonthlyKpiSummary> {
    let mut order: Vec<(u64, i32, u32)> = Vec::new();
    let mut groups: HashMap<(u64, i32, u32), SummaryAccumulator> = HashMap::new();

    for kpi in kpis {
        for detail in &kpi.details {
            let key = (kpi.employee_id, detail.period_year, detail.period_month);
            let acc = groups.entry(key).or_insert_with(|| {
                order.push(key);
                SummaryAccumulator {
                    employee_id: kpi.employee_id,
                    employee_name: kpi.employee_name.clone(),
                    department_id: kpi.department.as_ref().map(|d| d.id),
                    department: kpi
                        .department
                        .as_ref()
                        .map(|d| d.name.clone())
                        .unwrap_or_default(),
                    year: detail.period_year,
                    month: detail.period_month,
                    attendance: None,
                    training: None,
                    other_order: Vec::new(),
                    other: HashMap::new(),
                }
            });
            acc.apply(detail);
        }
    }

    let summaries: Vec<MonthlyKpiSummary> = order
        .into_iter()
        .filter_map(|key| groups.remove(&key))
        .map(SummaryAccumulator::finish)
        .collect();

    debug!(kpis = kpis.len(), summaries = summaries.len(), "aggregated monthly KPI summaries");
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::employee::DepartmentRef;
    use crate::model::kpi::KpiIndicator;

    fn indicator(id: u64, name: &str, weight: f64) -> KpiIndicator {
        KpiIndicator {
            id,
            name: name.to_string(),
            description: None,
            weight,
            department_id: None,
        }
    }

    fn detail(
        id: u64,
        ind: KpiIndicator,
        target: f64,
        realized: f64,
        score: Option<f64>,
        month: u32,
    ) -> KpiDetail {
        KpiDetail {
            id,
            kpi_id: 1,
            indicator: ind,
            target,
            realized,
            score,
            period_year: 2025,
            period_month: month,
        }
    }

    fn kpi(employee_id: u64, details: Vec<KpiDetail>) -> Kpi {
        Kpi {
            id: employee_id,
            employee_id,
            employee_name: format!("Employee {employee_id}"),
            department: Some(DepartmentRef {
                id: 1,
                name: "Engineering".to_string(),
            }),
            details,
        }
    }

    #[test]
    fn weighted_combination_of_attendance_and_one_indicator() {
        // indicator weight 0.6, score 100; attendance weight 0.4, score 50
        let rows = monthly_summaries(&[kpi(
            1,
            vec![
                detail(1, indicator(10, "Attendance", 0.4), 0.0, 0.0, Some(50.0), 6),
                detail(2, indicator(11, "Delivery", 0.6), 0.0, 0.0, Some(100.0), 6),
            ],
        )]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].final_kpi, 80.00);
        assert_eq!(rows[0].attendance_score, 50.0);
        assert_eq!(rows[0].other_indicators_kpi, 100.0);
        assert_eq!(rows[0].source, SummarySource::Reported);
    }

    #[test]
    fn percentage_style_weights_are_normalized() {
        // same configuration, weights sent as 40 / 60 instead of 0.4 / 0.6
        let rows = monthly_summaries(&[kpi(
            1,
            vec![
                detail(1, indicator(10, "Attendance", 40.0), 0.0, 0.0, Some(50.0), 6),
                detail(2, indicator(11, "Delivery", 60.0), 0.0, 0.0, Some(100.0), 6),
            ],
        )]);
        assert_eq!(rows[0].final_kpi, 80.00);
    }

    #[test]
    fn score_derived_from_realized_over_target() {
        let rows = monthly_summaries(&[kpi(
            1,
            vec![detail(1, indicator(11, "Sales", 0.5), 120.0, 90.0, None, 6)],
        )]);
        // 90/120 = 75%, weighted 0.5
        assert_eq!(rows[0].other_indicators_kpi, 75.0);
        assert_eq!(rows[0].final_kpi, 37.5);
    }

    #[test]
    fn zero_target_scores_zero_not_infinity() {
        let rows = monthly_summaries(&[kpi(
            1,
            vec![detail(1, indicator(11, "Sales", 0.5), 0.0, 5.0, None, 6)],
        )]);
        assert_eq!(rows[0].other_indicators_kpi, 0.0);
        assert_eq!(rows[0].final_kpi, 0.0);
        assert!(rows[0].final_kpi.is_finite());
    }

    #[test]
    fn final_kpi_is_clamped_under_inconsistent_weights() {
        // weights sum to well over 1
        let rows = monthly_summaries(&[kpi(
            1,
            vec![
                detail(1, indicator(10, "Attendance", 0.9), 0.0, 0.0, Some(100.0), 6),
                detail(2, indicator(12, "Training", 0.9), 0.0, 0.0, Some(100.0), 6),
                detail(3, indicator(11, "Sales", 0.9), 100.0, 200.0, None, 6),
            ],
        )]);
        assert_eq!(rows[0].final_kpi, 100.0);
    }

    #[test]
    fn overachieved_indicator_is_capped_at_100() {
        let rows = monthly_summaries(&[kpi(
            1,
            vec![detail(1, indicator(11, "Sales", 1.0), 100.0, 250.0, None, 6)],
        )]);
        assert_eq!(rows[0].other_indicators_kpi, 100.0);
    }

    #[test]
    fn months_without_data_produce_no_rows() {
        let rows = monthly_summaries(&[kpi(
            1,
            vec![
                detail(1, indicator(10, "Attendance", 0.4), 0.0, 0.0, Some(80.0), 3),
                detail(2, indicator(10, "Attendance", 0.4), 0.0, 0.0, Some(90.0), 7),
            ],
        )]);
        let months: Vec<u32> = rows.iter().map(|r| r.month).collect();
        assert_eq!(months, vec![3, 7]);
    }

    #[test]
    fn duplicate_indicator_rows_are_last_write_wins() {
        let rows = monthly_summaries(&[kpi(
            1,
            vec![
                detail(1, indicator(11, "Sales", 0.5), 0.0, 0.0, Some(40.0), 6),
                detail(2, indicator(11, "Sales", 0.5), 0.0, 0.0, Some(60.0), 6),
            ],
        )]);
        // replaced, not summed
        assert_eq!(rows[0].other_weighted_sum, 30.0);
        assert_eq!(rows[0].other_weight_sum, 0.5);
    }

    #[test]
    fn groups_keep_first_seen_order_across_employees() {
        let rows = monthly_summaries(&[
            kpi(2, vec![detail(1, indicator(10, "Attendance", 0.4), 0.0, 0.0, Some(80.0), 6)]),
            kpi(1, vec![detail(2, indicator(10, "Attendance", 0.4), 0.0, 0.0, Some(70.0), 6)]),
        ]);
        let ids: Vec<u64> = rows.iter().map(|r| r.employee_id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn training_indicator_contributes_separately() {
        let rows = monthly_summaries(&[kpi(
            1,
            vec![
                detail(1, indicator(10, "Attendance", 0.3), 0.0, 0.0, Some(90.0), 6),
                detail(2, indicator(12, "Training completion", 0.3), 0.0, 0.0, Some(70.0), 6),
                detail(3, indicator(11, "Quality", 0.4), 100.0, 80.0, None, 6),
            ],
        )]);
        let row = &rows[0];
        assert_eq!(row.training_score, 70.0);
        assert_eq!(row.training_weight, 0.3);
        // 90*0.3 + 70*0.3 + 80*0.4 = 27 + 21 + 32
        assert_eq!(row.final_kpi, 80.0);
        assert_eq!(row.other_indicators_kpi, 80.0);
    }
}
