//! Shared ticket types and error hierarchy for compperm.

pub mod error;
pub mod resource;
pub mod ticket;
pub mod util;

pub use error::{ConfigError, StoreError};
pub use resource::{Resource, TICKET_REALM};
pub use ticket::{Component, Ticket, TicketId};
pub use util::as_bool;
