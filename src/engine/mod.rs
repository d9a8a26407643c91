//! The attendance & KPI aggregation engine.
//!
//! Everything in here is synchronous, pure computation over in-memory
//! snapshots fetched by the [`crate::client`] layer: raw records go in,
//! derived matrices, summaries and rankings come out. No function mutates
//! its input or shares state, so calls are safe to repeat and to run from
//! concurrent callers.

pub mod attendance;
pub mod calendar;
pub mod kpi;
pub mod synth;
pub mod trend;

pub use attendance::{
    build_attendance_matrix, summarize_attendance, AttendanceSummary, DayCell,
    EmployeeAttendanceRow,
};
pub use calendar::{days_in_month, enumerate_days, CalendarDay};
pub use kpi::{monthly_summaries, MonthlyKpiSummary, SummarySource};
pub use synth::{summaries_or_fallback, synthesize_employee_summaries};
pub use trend::{filter_summaries, leaderboard, trend_points, window_trend, SummaryFilter, TrendPoint};
