//! Read-only store backed by a single JSON document.

use crate::types::{StoreDocument, UserRecord};
use compperm_policy::{IdentityService, TicketStore};
use compperm_types::{Component, StoreError, Ticket, TicketId};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Tickets, components and users loaded from a JSON file.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    components: Vec<Component>,
    tickets: HashMap<TicketId, Ticket>,
    users: Arc<HashMap<String, UserRecord>>,
}

impl JsonStore {
    /// Read and index the document at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)?;
        let document: StoreDocument = serde_json::from_str(&data)?;
        let store = Self::from_document(path.to_path_buf(), document);
        tracing::debug!(
            "Opened store {} ({} tickets, {} components)",
            path.display(),
            store.tickets.len(),
            store.components.len()
        );
        Ok(store)
    }

    pub fn from_document(path: PathBuf, document: StoreDocument) -> Self {
        let mut tickets = HashMap::with_capacity(document.tickets.len());
        for ticket in document.tickets {
            if tickets.contains_key(&ticket.id) {
                tracing::warn!("Duplicate ticket #{} in {}; keeping the last", ticket.id, path.display());
            }
            tickets.insert(ticket.id, ticket);
        }
        let users: HashMap<String, UserRecord> = document
            .users
            .into_iter()
            .map(|u| (u.username.clone(), u))
            .collect();
        Self {
            path,
            components: document.components,
            tickets,
            users: Arc::new(users),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Identity service backed by the `email_verified` flags of this store.
    pub fn verifier(&self) -> VerifiedEmails {
        VerifiedEmails {
            users: Arc::clone(&self.users),
        }
    }
}

impl TicketStore for JsonStore {
    fn load_ticket(&self, id: TicketId) -> Result<Ticket, StoreError> {
        self.tickets
            .get(&id)
            .cloned()
            .ok_or(StoreError::TicketNotFound { id })
    }

    fn list_components(&self) -> Result<Vec<Component>, StoreError> {
        Ok(self.components.clone())
    }

    fn user_email(&self, username: &str) -> Option<String> {
        self.users.get(username).and_then(|u| u.email.clone())
    }
}

/// Confirms an email only if it is the user's recorded address and is flagged verified.
#[derive(Debug, Clone)]
pub struct VerifiedEmails {
    users: Arc<HashMap<String, UserRecord>>,
}

impl IdentityService for VerifiedEmails {
    fn email_verified(&self, username: &str, email: &str) -> bool {
        self.users
            .get(username)
            .is_some_and(|u| u.email_verified && u.email.as_deref() == Some(email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> StoreDocument {
        serde_json::from_str(
            r#"{
                "components": [{"name": "Backend"}],
                "tickets": [{"id": 1, "owner": "alice", "component": "Backend"}],
                "users": [
                    {"username": "dave", "email": "dave@x.com", "email_verified": true},
                    {"username": "erin", "email": "erin@x.com"}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_load_ticket() {
        let store = JsonStore::from_document(PathBuf::from("mem"), document());
        assert_eq!(store.load_ticket(1).unwrap().owner, "alice");
        assert!(store.load_ticket(2).unwrap_err().is_not_found());
    }

    #[test]
    fn test_user_email() {
        let store = JsonStore::from_document(PathBuf::from("mem"), document());
        assert_eq!(store.user_email("dave").as_deref(), Some("dave@x.com"));
        assert!(store.user_email("nobody").is_none());
    }

    #[test]
    fn test_verifier() {
        let store = JsonStore::from_document(PathBuf::from("mem"), document());
        let verifier = store.verifier();
        assert!(verifier.email_verified("dave", "dave@x.com"));
        assert!(!verifier.email_verified("dave", "other@x.com"));
        assert!(!verifier.email_verified("erin", "erin@x.com"));
        assert!(!verifier.email_verified("nobody", "dave@x.com"));
    }

    #[test]
    fn test_duplicate_ticket_keeps_last() {
        let mut doc = document();
        let mut dup = doc.tickets[0].clone();
        dup.owner = "zoe".into();
        doc.tickets.push(dup);
        let store = JsonStore::from_document(PathBuf::from("mem"), doc);
        assert_eq!(store.load_ticket(1).unwrap().owner, "zoe");
    }
}
