//! Component-scoped ticket permission policy.
//!
//! Decisions: abstain / deny. Granting is left to the host's permission store.
//! Vocabulary: `COMPONENT_VIEW` plus one `COMPONENT_<NAME>_VIEW` per component.

pub mod activation;
pub mod bypass;
pub mod derive;
pub mod engine;
pub mod filter;
pub mod host;
pub mod types;

pub use activation::is_active;
pub use bypass::{has_bypass, split_cc};
pub use derive::{COMPONENT_VIEW, permission_name};
pub use engine::PolicyEngine;
pub use filter::VisibilityFilter;
pub use host::{IdentityService, TicketStore};
pub use types::*;
