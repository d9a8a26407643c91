use serde::{Deserialize, Serialize};

/// Department row from the list endpoint, used to populate filter options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: u64,
    pub name: String,
}
