//! Ticket and component records as seen by the policy.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Numeric ticket identifier.
pub type TicketId = i64;

/// An administrator-defined ticket classification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
}

impl Component {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A ticket snapshot loaded from the host store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub reporter: String,
    /// Raw cc text: usernames and/or email addresses, comma/space separated.
    #[serde(default)]
    pub cc: String,
    /// Component name, empty when the ticket has none.
    #[serde(default)]
    pub component: String,
    /// Custom field values keyed by field name.
    #[serde(default)]
    pub values: HashMap<String, String>,
}

impl Ticket {
    pub fn new(id: TicketId) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    /// Look up a custom field value.
    pub fn value(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    pub fn has_component(&self) -> bool {
        !self.component.is_empty()
    }
}
