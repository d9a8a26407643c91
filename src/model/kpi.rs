use serde::{Deserialize, Deserializer, Serialize};

use super::employee::DepartmentRef;

/// KPI indicator metadata. `weight` may arrive as a fraction in [0,1] or as a
/// percentage; the aggregator normalizes before doing arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiIndicator {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub weight: f64,
    /// None means the indicator applies to all departments.
    #[serde(default)]
    pub department_id: Option<u64>,
}

/// Classification the aggregator uses to route an indicator's contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorKind {
    Attendance,
    Training,
    Other,
}

impl KpiIndicator {
    /// Attendance and training indicators are recognized by name, which is
    /// how the dashboard tells them apart from custom indicators.
    pub fn kind(&self) -> IndicatorKind {
        let name = self.name.to_ascii_lowercase();
        if name.contains("attendance") {
            IndicatorKind::Attendance
        } else if name.contains("training") {
            IndicatorKind::Training
        } else {
            IndicatorKind::Other
        }
    }
}

/// One scored indicator entry inside a KPI record, pinned to a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiDetail {
    pub id: u64,
    pub kpi_id: u64,
    pub indicator: KpiIndicator,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub target: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub realized: f64,
    /// Upstream-computed score; when absent the aggregator derives one from
    /// realized/target.
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub score: Option<f64>,
    pub period_year: i32,
    pub period_month: u32,
}

/// A KPI record as returned by the KPI fetch endpoint, with nested details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    pub id: u64,
    pub employee_id: u64,
    #[serde(default)]
    pub employee_name: String,
    #[serde(default)]
    pub department: Option<DepartmentRef>,
    #[serde(default)]
    pub details: Vec<KpiDetail>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

/// Percentage-like inputs arrive as numbers or as strings depending on the
/// upstream serializer. Missing or unparseable values become 0.0 so NaN never
/// reaches the arithmetic.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(NumberOrText::Number(n)) if n.is_finite() => n,
        Some(NumberOrText::Text(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

/// Same leniency for optional scores; an unparseable string means "no stored
/// score" so the caller falls back to computing one.
pub(crate) fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(NumberOrText::Number(n)) if n.is_finite() => Some(n),
        Some(NumberOrText::Text(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
