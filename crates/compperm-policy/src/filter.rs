//! Post-render filter that hides component options a user cannot view.
//!
//! This is UI hygiene only; [`PolicyEngine`](crate::PolicyEngine) stays
//! authoritative for ticket access.

use crate::derive::{COMPONENT_VIEW, permission_name};
use crate::types::{PermissionSet, PolicyConfig};
use serde_json::Value;

/// Page templates whose data carries component options.
pub const FILTERED_TEMPLATES: &[&str] = &["ticket.html", "query.html", "report_view.html"];

const COMPONENT_FIELD: &str = "component";

/// Removes component options, metadata and result groups from page data.
#[derive(Debug, Clone, Copy)]
pub struct VisibilityFilter {
    enabled: bool,
}

impl VisibilityFilter {
    /// Enabled only when hiding is requested and enforcement is ticket-independent.
    /// With per-ticket activation some tickets are exempt, so blanket hiding
    /// would remove components the user can legitimately use.
    pub fn new(config: &PolicyConfig) -> Self {
        let enabled = config.hide_components && config.activation.is_global();
        if config.hide_components && !enabled {
            tracing::warn!(
                "hide_components ignored: activation mode '{}' is not global",
                config.activation.as_str()
            );
        }
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn applies_to(&self, template: &str) -> bool {
        self.enabled && FILTERED_TEMPLATES.contains(&template)
    }

    /// Filter `data` in place for `template`. Returns the number of removed entries.
    ///
    /// Filtered locations:
    /// - `fields[]` entries named `component`: their `options`
    /// - `properties.component.options` (client-side field metadata)
    /// - `groups` (`[value, rows]` pairs) when results are grouped by component
    pub fn filter(&self, template: &str, data: &mut Value, perm: &PermissionSet) -> usize {
        if !self.applies_to(template) || perm.contains(COMPONENT_VIEW) {
            return 0;
        }

        let mut removed = 0;

        if let Some(fields) = data.get_mut("fields").and_then(Value::as_array_mut) {
            for field in fields
                .iter_mut()
                .filter(|f| f.get("name").and_then(Value::as_str) == Some(COMPONENT_FIELD))
            {
                if let Some(options) = field.get_mut("options") {
                    removed += retain_options(options, perm);
                }
            }
        }

        if let Some(options) = data
            .get_mut("properties")
            .and_then(|p| p.get_mut(COMPONENT_FIELD))
            .and_then(|c| c.get_mut("options"))
        {
            removed += retain_options(options, perm);
        }

        if grouped_by_component(data) {
            if let Some(groups) = data.get_mut("groups").and_then(Value::as_array_mut) {
                let before = groups.len();
                groups.retain(|group| {
                    group
                        .get(0)
                        .and_then(Value::as_str)
                        .is_none_or(|name| can_view_component(name, perm))
                });
                removed += before - groups.len();
            }
        }

        if removed > 0 {
            tracing::debug!("Hid {} component entries from {}", removed, template);
        }
        removed
    }
}

/// Whether `perm` lets its holder see `component` in lists.
/// The empty option (no component) is always visible.
pub fn can_view_component(component: &str, perm: &PermissionSet) -> bool {
    if component.is_empty() || perm.contains(COMPONENT_VIEW) {
        return true;
    }
    permission_name(component).is_some_and(|token| perm.contains(&token))
}

fn grouped_by_component(data: &Value) -> bool {
    let group = data
        .get("query")
        .and_then(|q| q.get("group"))
        .or_else(|| data.get("group"));
    group.and_then(Value::as_str) == Some(COMPONENT_FIELD)
}

/// Options are plain strings or objects with a `name`; anything else is kept.
fn retain_options(options: &mut Value, perm: &PermissionSet) -> usize {
    let Some(list) = options.as_array_mut() else {
        return 0;
    };
    let before = list.len();
    list.retain(|option| {
        let name = option
            .as_str()
            .or_else(|| option.get("name").and_then(Value::as_str));
        name.is_none_or(|name| can_view_component(name, perm))
    });
    before - list.len()
}
