//! Resource descriptors handed to the policy by the host framework.

use crate::ticket::TicketId;

/// Realm name of ticket resources.
pub const TICKET_REALM: &str = "ticket";

/// A resource in the host's resource graph: a realm, an optional id, and an
/// optional parent (an attachment's parent is its ticket, for instance).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub realm: String,
    pub id: Option<String>,
    pub parent: Option<Box<Resource>>,
}

impl Resource {
    pub fn new(realm: impl Into<String>, id: Option<String>) -> Self {
        Self {
            realm: realm.into(),
            id,
            parent: None,
        }
    }

    /// Shorthand for a concrete ticket resource.
    pub fn ticket(id: TicketId) -> Self {
        Self::new(TICKET_REALM, Some(id.to_string()))
    }

    /// Attach this resource under `parent`.
    pub fn with_parent(mut self, parent: Resource) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }

    /// Walk up from this resource to the nearest ticket-realm ancestor (itself included).
    pub fn enclosing_ticket(&self) -> Option<&Resource> {
        let mut current = Some(self);
        while let Some(resource) = current {
            if resource.realm == TICKET_REALM {
                return Some(resource);
            }
            current = resource.parent.as_deref();
        }
        None
    }
}
