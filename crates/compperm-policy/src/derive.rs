//! Permission name derivation from component names.

/// Universal token that satisfies every component requirement.
pub const COMPONENT_VIEW: &str = "COMPONENT_VIEW";

const TOKEN_PREFIX: &str = "COMPONENT_";
const TOKEN_SUFFIX: &str = "_VIEW";

/// Normalize a component name: every run of characters outside `[A-Za-z0-9]`
/// becomes a single `_`, edge separators are dropped, letters are upper-cased.
pub fn normalize_component_name(name: &str) -> String {
    let mut core = String::with_capacity(name.len());
    let mut pending_separator = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !core.is_empty() {
                core.push('_');
            }
            pending_separator = false;
            core.push(c.to_ascii_uppercase());
        } else {
            pending_separator = true;
        }
    }
    core
}

/// The dedicated permission for a component, or `None` when the name has no
/// alphanumeric content (only `COMPONENT_VIEW` governs such a component).
pub fn permission_name(component: &str) -> Option<String> {
    let core = normalize_component_name(component);
    if core.is_empty() {
        None
    } else {
        Some(format!("{TOKEN_PREFIX}{core}{TOKEN_SUFFIX}"))
    }
}

/// Cheap shape test: could `action` be one of this policy's tokens?
pub fn looks_like_component_token(action: &str) -> bool {
    action == COMPONENT_VIEW || (action.starts_with(TOKEN_PREFIX) && action.ends_with(TOKEN_SUFFIX))
}
