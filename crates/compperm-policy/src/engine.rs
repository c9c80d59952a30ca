//! Policy engine — the entry point the host calls for every permission check.

use crate::activation::is_active;
use crate::bypass::has_bypass;
use crate::derive::{COMPONENT_VIEW, looks_like_component_token, permission_name};
use crate::filter::VisibilityFilter;
use crate::host::{IdentityService, TicketStore};
use crate::types::*;
use compperm_types::{Resource, Ticket, TicketId};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Restricts ticket visibility to holders of the ticket's component permission.
pub struct PolicyEngine {
    /// Immutable configuration shared by every check.
    config: PolicyConfig,
    /// Host ticket store and component catalog.
    store: Arc<dyn TicketStore>,
    /// Optional email verification; absent means cc emails are trusted as listed.
    identity: Option<Arc<dyn IdentityService>>,
    filter: VisibilityFilter,
}

impl PolicyEngine {
    pub fn new(
        config: PolicyConfig,
        store: Arc<dyn TicketStore>,
        identity: Option<Arc<dyn IdentityService>>,
    ) -> Self {
        if config.allow_cc_email && identity.is_none() {
            tracing::warn!(
                "allow_cc_email is enabled without an identity service; unverified cc emails grant access"
            );
        }
        let filter = VisibilityFilter::new(&config);
        Self {
            config,
            store,
            identity,
            filter,
        }
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// The permission vocabulary: `COMPONENT_VIEW` plus one token per component
    /// whose name derives to one. Recomputed from the catalog on every call.
    pub fn enumerate_actions(&self) -> BTreeSet<String> {
        let mut actions = BTreeSet::from([COMPONENT_VIEW.to_string()]);
        match self.store.list_components() {
            Ok(components) => {
                actions.extend(components.iter().filter_map(|c| permission_name(&c.name)));
            }
            Err(e) => {
                tracing::warn!("Failed to list components: {}", e);
            }
        }
        actions
    }

    /// Decide on `action` by `username` against `resource`.
    ///
    /// Evaluation order:
    /// 1. Our own tokens and `SENSITIVE_VIEW` abstain (the host enumerates
    ///    permissions through the policy chain, so deciding them would recurse).
    /// 2. Resources outside a concrete ticket abstain.
    /// 3. A ticket that cannot be loaded, or whose id is not a number, is
    ///    enforced with no bypass.
    /// 4. Inactive tickets abstain.
    /// 5. Holders of the component token or `COMPONENT_VIEW` abstain,
    ///    as do bypassing stakeholders. Everyone else is denied.
    pub fn check_permission(
        &self,
        action: &str,
        username: &str,
        resource: &Resource,
        perm: &PermissionSet,
    ) -> Decision {
        if self.is_own_action(action) || action == SENSITIVE_VIEW {
            return Decision::Abstain;
        }

        let id = match ticket_id(resource) {
            None => return Decision::Abstain,
            Some(Ok(id)) => id,
            Some(Err(raw)) => {
                tracing::debug!("Ticket resource has non-numeric id '{}'", raw);
                if perm.contains(COMPONENT_VIEW) {
                    return Decision::Abstain;
                }
                return deny(COMPONENT_VIEW, username, raw);
            }
        };

        let ticket = match self.store.load_ticket(id) {
            Ok(ticket) => ticket,
            Err(e) => {
                if e.is_not_found() {
                    tracing::debug!("Ticket #{} vanished during check of {}", id, action);
                } else {
                    tracing::error!("Failed to load ticket #{}: {}", id, e);
                }
                if perm.contains(COMPONENT_VIEW) {
                    return Decision::Abstain;
                }
                return deny(COMPONENT_VIEW, username, id);
            }
        };

        if !is_active(&ticket, &self.config) {
            return Decision::Abstain;
        }

        let required = self.required_permission(&ticket);
        if perm.contains(&required) || perm.contains(COMPONENT_VIEW) {
            return Decision::Abstain;
        }
        if has_bypass(
            &ticket,
            username,
            &self.config,
            self.store.as_ref(),
            self.identity.as_deref(),
        ) {
            return Decision::Abstain;
        }
        deny(&required, username, id)
    }

    /// Strip component options `perm` cannot view from rendered page data.
    /// Returns the number of entries removed.
    pub fn filter_rendered_data(
        &self,
        template: &str,
        data: &mut serde_json::Value,
        perm: &PermissionSet,
    ) -> usize {
        self.filter.filter(template, data, perm)
    }

    /// The token a user must hold to see an active ticket.
    fn required_permission(&self, ticket: &Ticket) -> String {
        if ticket.has_component() {
            if let Some(token) = permission_name(&ticket.component) {
                if self.enumerate_actions().contains(&token) {
                    return token;
                }
            }
        }
        COMPONENT_VIEW.to_string()
    }

    fn is_own_action(&self, action: &str) -> bool {
        if !looks_like_component_token(action) {
            return false;
        }
        action == COMPONENT_VIEW || self.enumerate_actions().contains(action)
    }
}

fn deny(required: &str, username: &str, id: impl std::fmt::Display) -> Decision {
    tracing::debug!("Denying '{}' on ticket #{}: lacks {}", username, id, required);
    Decision::Deny {
        reason: format!("'{username}' lacks {required} for ticket #{id}"),
    }
}

/// The ticket id a resource belongs to: `None` outside tickets or for a
/// ticket without an id, `Err` with the raw id when it is not a number.
fn ticket_id(resource: &Resource) -> Option<Result<TicketId, &str>> {
    let ticket = resource.enclosing_ticket()?;
    let raw = ticket.id.as_deref()?;
    Some(raw.trim().parse::<TicketId>().map_err(|_| raw))
}
