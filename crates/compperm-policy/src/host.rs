//! Collaborators the host application provides to the policy.

use compperm_types::{Component, StoreError, Ticket, TicketId};

/// Read access to tickets, the component catalog and user email addresses.
pub trait TicketStore: Send + Sync {
    /// Load a ticket. A deleted ticket must yield [`StoreError::TicketNotFound`].
    fn load_ticket(&self, id: TicketId) -> Result<Ticket, StoreError>;

    /// The live component catalog.
    fn list_components(&self) -> Result<Vec<Component>, StoreError>;

    /// Email address recorded for an authenticated user, if any.
    fn user_email(&self, username: &str) -> Option<String>;
}

/// Confirms that a user's email address has been verified.
///
/// Optional: without it, an email listed in cc is trusted as-is.
pub trait IdentityService: Send + Sync {
    fn email_verified(&self, username: &str, email: &str) -> bool;
}
