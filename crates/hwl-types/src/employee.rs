use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::hospital::Role;
use crate::identity::NestedEntry;

/// An employee on a hospital's worklist.
///
/// Fields a request leaves out deserialize to their empty value, which the
/// patch rules treat as "not present".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeListEntry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: Role,
    /// Current performance rating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performances: Option<Vec<PerformanceEntry>>,
}

impl EmployeeListEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn with_performance(mut self, rating: f64) -> Self {
        self.performance = Some(rating);
        self
    }

    pub fn with_performances(mut self, performances: Vec<PerformanceEntry>) -> Self {
        self.performances = Some(performances);
        self
    }
}

impl NestedEntry for EmployeeListEntry {
    const KIND: &'static str = "Entry";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// A performance record of one employee.
///
/// Apart from `id` the payload is opaque: every other JSON member is kept
/// as-is.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceEntry {
    #[serde(default)]
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl PerformanceEntry {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

impl NestedEntry for PerformanceEntry {
    const KIND: &'static str = "Performance entry";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}
