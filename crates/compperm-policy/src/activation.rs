//! Activation: does component enforcement apply to a ticket?

use crate::types::{ActivationPolicy, PolicyConfig};
use compperm_types::{Ticket, as_bool};

/// Decide whether `ticket` is subject to component enforcement under `config`.
pub fn is_active(ticket: &Ticket, config: &PolicyConfig) -> bool {
    match &config.activation {
        ActivationPolicy::Always => true,
        ActivationPolicy::Field { field } if field.is_empty() => true,
        // Missing field reads as "0"
        ActivationPolicy::Field { field } => ticket.value(field).is_some_and(as_bool),
        ActivationPolicy::Components { components } => {
            ticket.has_component() && components.contains(&ticket.component)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn field_config(field: &str) -> PolicyConfig {
        PolicyConfig {
            activation: ActivationPolicy::Field {
                field: field.to_string(),
            },
            ..Default::default()
        }
    }

    fn ticket_with(field: &str, value: &str) -> Ticket {
        let mut ticket = Ticket::new(1);
        ticket.values.insert(field.to_string(), value.to_string());
        ticket
    }

    #[test]
    fn test_empty_field_always_active() {
        assert!(is_active(&Ticket::new(1), &field_config("")));
    }

    #[test]
    fn test_always_policy() {
        let config = PolicyConfig {
            activation: ActivationPolicy::Always,
            ..Default::default()
        };
        assert!(is_active(&Ticket::new(1), &config));
    }

    #[test]
    fn test_missing_field_inactive() {
        assert!(!is_active(&Ticket::new(1), &field_config("private")));
    }

    #[test]
    fn test_field_truthy_values() {
        let config = field_config("private");
        assert!(is_active(&ticket_with("private", "1"), &config));
        assert!(is_active(&ticket_with("private", "yes"), &config));
        assert!(is_active(&ticket_with("private", "enabled"), &config));
        assert!(is_active(&ticket_with("private", "1.0"), &config));
        assert!(is_active(&ticket_with("private", "2.5"), &config));
        assert!(!is_active(&ticket_with("private", "0"), &config));
        assert!(!is_active(&ticket_with("private", ""), &config));
        assert!(!is_active(&ticket_with("other", "1"), &config));
    }

    #[test]
    fn test_component_list_policy() {
        let config = PolicyConfig {
            activation: ActivationPolicy::Components {
                components: BTreeSet::from(["Security".to_string()]),
            },
            ..Default::default()
        };
        let mut ticket = Ticket::new(1);
        assert!(!is_active(&ticket, &config));
        ticket.component = "Security".into();
        assert!(is_active(&ticket, &config));
        ticket.component = "Docs".into();
        assert!(!is_active(&ticket, &config));
    }

    #[test]
    fn test_component_list_ignores_field() {
        let config = PolicyConfig {
            activation: ActivationPolicy::Components {
                components: BTreeSet::from(["Security".to_string()]),
            },
            ..Default::default()
        };
        let ticket = ticket_with(crate::types::DEFAULT_ACTIVATION_FIELD, "1");
        assert!(!is_active(&ticket, &config));
    }
}
