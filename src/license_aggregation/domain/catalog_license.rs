use serde::{Deserialize, Serialize};

/// A license as known to the license catalog, with its remediation todos
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogLicense {
    pub id: String,
    #[serde(default)]
    pub todos: Vec<String>,
}

impl CatalogLicense {
    pub fn new(id: impl Into<String>, todos: Vec<String>) -> Self {
        Self {
            id: id.into(),
            todos,
        }
    }
}
