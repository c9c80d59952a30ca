//! Stakeholder bypass: owner, reporter and cc'd users may see a ticket
//! without holding its component permission.

use crate::host::{IdentityService, TicketStore};
use crate::types::{ANONYMOUS, PolicyConfig};
use compperm_types::Ticket;

/// Split raw cc text into addresses. Separators are commas, semicolons and whitespace.
pub fn split_cc(cc: &str) -> Vec<&str> {
    cc.split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Check whether `username` is exempt from the component check on `ticket`.
///
/// Evaluation order (first match wins):
/// 1. Anonymous or empty user: never.
/// 2. Owner, if `allow_owner`.
/// 3. Reporter, if `allow_reporter`.
/// 4. Username listed in cc, if `allow_cc`.
/// 5. User's email listed in cc, if `allow_cc_email`. With an identity
///    service the email must be verified; without one, listing is enough.
pub fn has_bypass(
    ticket: &Ticket,
    username: &str,
    config: &PolicyConfig,
    store: &dyn TicketStore,
    identity: Option<&dyn IdentityService>,
) -> bool {
    if username.is_empty() || username == ANONYMOUS {
        return false;
    }
    if config.allow_owner && ticket.owner == username {
        return true;
    }
    if config.allow_reporter && ticket.reporter == username {
        return true;
    }
    if !config.any_cc_bypass() {
        return false;
    }

    let cc_list = split_cc(&ticket.cc);
    if config.allow_cc && cc_list.contains(&username) {
        return true;
    }
    if config.allow_cc_email {
        let Some(email) = store.user_email(username).filter(|e| !e.is_empty()) else {
            return false;
        };
        if !cc_list.contains(&email.as_str()) {
            return false;
        }
        return match identity {
            Some(identity) => {
                let verified = identity.email_verified(username, &email);
                if !verified {
                    tracing::debug!(
                        "cc email {} of '{}' on ticket #{} is not verified",
                        email,
                        username,
                        ticket.id
                    );
                }
                verified
            }
            None => true,
        };
    }
    false
}
