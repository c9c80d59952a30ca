//! Building resource chains from command-line arguments.

use anyhow::{Result, bail};
use compperm_types::Resource;

/// Build a resource with its parent chain. `parents` are `REALM:ID`, innermost first.
pub fn build(realm: &str, id: Option<String>, parents: &[String]) -> Result<Resource> {
    let mut chain = Vec::with_capacity(parents.len());
    for spec in parents {
        let Some((realm, id)) = spec.split_once(':') else {
            bail!("Invalid parent '{spec}': expected REALM:ID");
        };
        if realm.is_empty() {
            bail!("Invalid parent '{spec}': empty realm");
        }
        let id = (!id.is_empty()).then(|| id.to_string());
        chain.push(Resource::new(realm, id));
    }

    let parent = chain
        .into_iter()
        .rev()
        .reduce(|outer, inner| inner.with_parent(outer));

    let resource = Resource::new(realm, id);
    Ok(match parent {
        Some(parent) => resource.with_parent(parent),
        None => resource,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_ticket() {
        let r = build("ticket", Some("5".into()), &[]).unwrap();
        assert_eq!(r, Resource::ticket(5));
    }

    #[test]
    fn test_parent_chain_order() {
        let r = build(
            "attachment",
            Some("a.txt".into()),
            &["ticket:3".into(), "milestone:m1".into()],
        )
        .unwrap();
        let parent = r.parent.as_deref().unwrap();
        assert_eq!(parent.realm, "ticket");
        assert_eq!(parent.parent.as_deref().unwrap().realm, "milestone");
        assert_eq!(r.enclosing_ticket().unwrap().id.as_deref(), Some("3"));
    }

    #[test]
    fn test_invalid_parent() {
        assert!(build("attachment", None, &["ticket".into()]).is_err());
        assert!(build("attachment", None, &[":3".into()]).is_err());
    }

    #[test]
    fn test_parent_without_id() {
        let r = build("attachment", None, &["ticket:".into()]).unwrap();
        assert!(r.parent.unwrap().id.is_none());
    }
}
