//! Core types for the component permission policy.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Custom field consulted by the default activation policy.
pub const DEFAULT_ACTIVATION_FIELD: &str = "component_permissions_field";

/// Username the host assigns to unauthenticated requests.
pub const ANONYMOUS: &str = "anonymous";

/// Action owned by the cooperating sensitive-ticket policy.
pub const SENSITIVE_VIEW: &str = "SENSITIVE_VIEW";

/// Outcome of a policy check. There is no allow: granting is up to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// No opinion, defer to other policies.
    Abstain,
    /// Explicitly refuse the action.
    Deny { reason: String },
}

impl Decision {
    pub fn is_deny(&self) -> bool {
        matches!(self, Decision::Deny { .. })
    }
}

/// Which tickets component enforcement applies to. Exactly one is configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ActivationPolicy {
    /// Every ticket is enforced.
    Always,
    /// Tickets whose custom field parses as true are enforced.
    /// An empty field name behaves like `Always`.
    Field { field: String },
    /// Tickets in one of the listed components are enforced.
    Components { components: BTreeSet<String> },
}

impl Default for ActivationPolicy {
    fn default() -> Self {
        ActivationPolicy::Field {
            field: DEFAULT_ACTIVATION_FIELD.to_string(),
        }
    }
}

impl ActivationPolicy {
    /// True when enforcement does not depend on the ticket at all.
    pub fn is_global(&self) -> bool {
        match self {
            ActivationPolicy::Always => true,
            ActivationPolicy::Field { field } => field.is_empty(),
            ActivationPolicy::Components { .. } => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivationPolicy::Always => "always",
            ActivationPolicy::Field { .. } => "field",
            ActivationPolicy::Components { .. } => "components",
        }
    }
}

/// Immutable policy configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub activation: ActivationPolicy,
    /// Ticket owner sees the ticket without the component permission.
    pub allow_owner: bool,
    /// Ticket reporter sees the ticket without the component permission.
    pub allow_reporter: bool,
    /// Usernames listed in cc see the ticket without the component permission.
    pub allow_cc: bool,
    /// Users whose email is listed in cc see the ticket without the component permission.
    /// Without an identity service the email is not checked for verification.
    pub allow_cc_email: bool,
    /// Strip component options the user cannot view from rendered pages.
    pub hide_components: bool,
}

impl PolicyConfig {
    pub fn any_cc_bypass(&self) -> bool {
        self.allow_cc || self.allow_cc_email
    }
}

/// The permissions a user holds for the current check. Read-only to the policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet(HashSet<String>);

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    pub fn insert(&mut self, token: impl Into<String>) {
        self.0.insert(token.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
