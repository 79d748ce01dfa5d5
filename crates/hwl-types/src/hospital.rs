use serde::{Deserialize, Serialize};

use crate::employee::EmployeeListEntry;

/// A role a hospital employs, e.g. `{ "value": "Doctor", "code": "rhinitis" }`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub code: String,
}

impl Role {
    pub fn new(value: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            code: code.into(),
        }
    }
}

/// The stored aggregate.
///
/// The hospital is always loaded and written back as a whole; nested entries
/// have no storage identity of their own.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub address: String,
    #[serde(default)]
    pub employee_list: Vec<EmployeeListEntry>,
    #[serde(default)]
    pub predefined_roles: Vec<Role>,
}

impl Hospital {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_roles(mut self, roles: Vec<Role>) -> Self {
        self.predefined_roles = roles;
        self
    }

    pub fn with_entry(mut self, entry: EmployeeListEntry) -> Self {
        self.employee_list.push(entry);
        self
    }

    /// Look up an employee entry by id.
    pub fn entry(&self, id: &str) -> Option<&EmployeeListEntry> {
        self.employee_list.iter().find(|e| e.id == id)
    }
}
