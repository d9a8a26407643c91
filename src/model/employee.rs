use serde::{Deserialize, Deserializer, Serialize};

/// Lightweight department reference as embedded in employee snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentRef {
    pub id: u64,
    pub name: String,
}

/// Employee snapshot as embedded in attendance and KPI payloads.
///
/// An employee has exactly one current department. The upstream API
/// historically sent a list here with only the first element meaningful,
/// so deserialization accepts both shapes and keeps the first entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "first_department")]
    pub department: Option<DepartmentRef>,
}

fn first_department<'de, D>(deserializer: D) -> Result<Option<DepartmentRef>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        One(DepartmentRef),
        Many(Vec<DepartmentRef>),
    }

    Ok(match Option::<Wire>::deserialize(deserializer)? {
        Some(Wire::One(dept)) => Some(dept),
        Some(Wire::Many(depts)) => depts.into_iter().next(),
        None => None,
    })
}
