//! JSON-file ticket store for compperm.
//!
//! Stands in for the host application's ticket database, component
//! catalog and account records.

pub mod store;
pub mod types;

pub use store::{JsonStore, VerifiedEmails};
pub use types::{StoreDocument, UserRecord};
