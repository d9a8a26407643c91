pub mod attendance;
pub mod department;
pub mod employee;
pub mod kpi;

pub use attendance::{AttendanceRecord, AttendanceStatus};
pub use department::Department;
pub use employee::{DepartmentRef, Employee};
pub use kpi::{IndicatorKind, Kpi, KpiDetail, KpiIndicator};
