//! Attendance matrix and KPI aggregation engine for the HR dashboard.
//!
//! The [`client`] module fetches raw attendance/KPI snapshots from the HR
//! REST API; the [`engine`] module turns them into the derived structures
//! the dashboard renders: per-employee daily attendance matrices with
//! counters, monthly per-department KPI summaries with a single weighted
//! final KPI, and the filtered/ranked views behind trend charts and
//! leaderboards.
//!
//! ```
//! use hrm_analytics::engine::{build_attendance_matrix, summarize_attendance};
//!
//! let rows = build_attendance_matrix(&[], "Engineering", 2025, 9);
//! let summary = summarize_attendance(&rows);
//! assert_eq!(summary.average_attendance, 0);
//! ```

pub mod client;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;

pub use client::{ApiClient, FetchSequencer};
pub use config::Config;
pub use error::ApiError;
