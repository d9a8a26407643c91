use std::collections::HashMap;

use chrono::Datelike;
use derive_more::Display;
use serde::Serialize;
use tracing::debug;

use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::employee::Employee;

use super::calendar::enumerate_days;

/// Derived state of one (employee, day) cell in the attendance matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayCell {
    #[display(fmt = "P")]
    Present,
    #[display(fmt = "L")]
    Late,
    #[display(fmt = "A")]
    Absent,
    #[display(fmt = "V")]
    Leave,
    /// Weekend or holiday; never contributes to any counter.
    #[display(fmt = "-")]
    NotApplicable,
}

/// One employee's row in the monthly attendance matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeAttendanceRow {
    pub employee_id: u64,
    pub employee_name: String,
    pub position: Option<String>,
    /// One cell per day of the month, index 0 = day 1.
    pub cells: Vec<DayCell>,
    pub present_days: u32,
    pub late_days: u32,
    pub absent_days: u32,
    pub working_days: u32,
    /// Integer percentage in [0,100]; 0 when the month has no working days.
    pub attendance_rate: u32,
}

/// Department-level fold of the matrix rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceSummary {
    pub total_present: u32,
    pub total_late: u32,
    pub total_absent: u32,
    pub working_days: u32,
    /// Integer percentage in [0,100]; 0 when there are no rows or no working days.
    pub average_attendance: u32,
}

struct EmployeeBucket {
    employee: Employee,
    by_day: HashMap<u32, AttendanceStatus>,
}

/// Builds the per-employee daily attendance matrix for one department and
/// month.
///
/// Records outside the requested department or month are dropped; for
/// duplicate (employee, day) rows the most recently supplied record wins.
/// Rows come out in the order employees are first seen in the input. A day
/// with no record counts as absent; leave and sick days count as present.
pub fn build_attendance_matrix(
    records: &[AttendanceRecord],
    department: &str,
    year: i32,
    month: u32,
) -> Vec<EmployeeAttendanceRow> {
    let days = enumerate_days(year, month);

    let mut order: Vec<u64> = Vec::new();
    let mut buckets: HashMap<u64, EmployeeBucket> = HashMap::new();

    for record in records {
        let Some(dept) = record.employee.department.as_ref() else {
            continue;
        };
        if dept.name != department {
            continue;
        }
        if record.date.year() != year || record.date.month() != month {
            continue;
        }
        let bucket = buckets.entry(record.employee.id).or_insert_with(|| {
            order.push(record.employee.id);
            EmployeeBucket {
                employee: record.employee.clone(),
                by_day: HashMap::new(),
            }
        });
        // later source rows overwrite earlier ones for the same day
        bucket.by_day.insert(record.date.day(), record.status);
    }

    let rows: Vec<EmployeeAttendanceRow> = order
        .iter()
        .filter_map(|id| buckets.get(id))
        .map(|bucket| {
            let mut cells = Vec::with_capacity(days.len());
            let mut present_days = 0u32;
            let mut late_days = 0u32;
            let mut absent_days = 0u32;
            let mut working_days = 0u32;

            for day in &days {
                if day.is_weekend {
                    cells.push(DayCell::NotApplicable);
                    continue;
                }
                working_days += 1;
                let cell = match bucket.by_day.get(&day.day) {
                    Some(AttendanceStatus::Present) => {
                        present_days += 1;
                        DayCell::Present
                    }
                    Some(AttendanceStatus::Late) => {
                        late_days += 1;
                        DayCell::Late
                    }
                    Some(AttendanceStatus::OnLeave) | Some(AttendanceStatus::Sick) => {
                        // leave counts toward attendance, not as a penalty
                        present_days += 1;
                        DayCell::Leave
                    }
                    Some(AttendanceStatus::Absent)
                    | Some(AttendanceStatus::NotYetRecorded)
                    | None => {
                        absent_days += 1;
                        DayCell::Absent
                    }
                };
                cells.push(cell);
            }

            let attended = present_days + late_days;
            let attendance_rate = if working_days > 0 {
                (100.0 * f64::from(attended) / f64::from(working_days)).round() as u32
            } else {
                0
            };

            EmployeeAttendanceRow {
                employee_id: bucket.employee.id,
                employee_name: bucket.employee.name.clone(),
                position: bucket.employee.position.clone(),
                cells,
                present_days,
                late_days,
                absent_days,
                working_days,
                attendance_rate,
            }
        })
        .collect();

    debug!(
        department,
        year,
        month,
        records = records.len(),
        rows = rows.len(),
        "built attendance matrix"
    );
    rows
}

/// Folds matrix rows into department totals. All rows share one month window,
/// so `working_days` comes from the first row; an empty input yields all
/// zeros.
pub fn summarize_attendance(rows: &[EmployeeAttendanceRow]) -> AttendanceSummary {
    let total_present: u32 = rows.iter().map(|r| r.present_days).sum();
    let total_late: u32 = rows.iter().map(|r| r.late_days).sum();
    let total_absent: u32 = rows.iter().map(|r| r.absent_days).sum();
    let working_days = rows.first().map(|r| r.working_days).unwrap_or(0);

    let denominator = rows.len() as f64 * f64::from(working_days);
    let average_attendance = if denominator > 0.0 {
        (100.0 * f64::from(total_present + total_late) / denominator).round() as u32
    } else {
        0
    };

    AttendanceSummary {
        total_present,
        total_late,
        total_absent,
        working_days,
        average_attendance,
    }
}
