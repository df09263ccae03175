//! Resource identity: fragment normalization and the identity registry.
//!
//! An identifier is `inst:` followed by the node kind tag and the
//! normalized natural-key parts, joined with `_`. Normalization is lossy:
//! two keys that differ only in characters outside `[A-Za-z0-9_:-]`
//! map to the same identifier. Downstream consumers rely on the exact
//! scheme, so collisions are accepted rather than disambiguated.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::config::{EMPTY_FRAGMENT, INSTANCE_PREFIX};
use crate::types::{NodeKind, ResourceId};

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static FRAGMENT_FORBIDDEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_:-]").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static FRAGMENT_UNDERSCORES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_+").expect("valid regex"));

/// Normalize one natural-key part into an identifier fragment.
///
/// Original casing is kept. Spaces and any character outside
/// `[A-Za-z0-9_:-]` become `_`, runs of `_` collapse, and leading or
/// trailing `_` are trimmed. A part that normalizes to nothing becomes `X`.
///
/// # Examples
/// ```
/// use sfs_lawgraph::identity::normalize_fragment;
///
/// assert_eq!(normalize_fragment("2010:110"), "2010:110");
/// assert_eq!(normalize_fragment(" Avdelning  A "), "Avdelning_A");
/// assert_eq!(normalize_fragment("Träder i kraft"), "Tr_der_i_kraft");
/// assert_eq!(normalize_fragment("§§"), "X");
/// ```
#[must_use]
pub fn normalize_fragment(value: &str) -> String {
    let spaced = value.trim().replace(' ', "_");
    let replaced = FRAGMENT_FORBIDDEN.replace_all(&spaced, "_");
    let collapsed = FRAGMENT_UNDERSCORES.replace_all(&replaced, "_");
    let trimmed = collapsed.trim_matches('_');
    if trimmed.is_empty() {
        EMPTY_FRAGMENT.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Derive the identifier for a node kind and its natural-key parts.
///
/// Blank parts are dropped before joining.
#[must_use]
pub fn make_resource_id(kind: NodeKind, parts: &[&str]) -> ResourceId {
    let fragment = std::iter::once(kind.tag())
        .chain(parts.iter().copied())
        .filter(|p| !p.trim().is_empty())
        .map(normalize_fragment)
        .collect::<Vec<_>>()
        .join("_");
    ResourceId::new(format!("{INSTANCE_PREFIX}{fragment}"))
}

/// Maps (node kind, natural key) to a stable identifier.
///
/// Identifiers are created lazily on first sight and never reassigned
/// or released.
#[derive(Debug, Default)]
pub struct IdentityRegistry {
    ids: HashMap<(NodeKind, Vec<String>), ResourceId>,
    issued: HashSet<ResourceId>,
    counts: HashMap<NodeKind, usize>,
}

impl IdentityRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the identifier for a key, creating it on first sight.
    pub fn get_or_create(&mut self, kind: NodeKind, parts: &[&str]) -> ResourceId {
        let key = (kind, parts.iter().map(|p| (*p).to_string()).collect());
        if let Some(id) = self.ids.get(&key) {
            return id.clone();
        }

        let id = make_resource_id(kind, parts);
        if self.issued.insert(id.clone()) {
            tracing::trace!(%kind, id = %id, "registered resource");
            *self.counts.entry(kind).or_default() += 1;
        } else {
            tracing::debug!(%kind, id = %id, "natural key collides with an issued identifier");
        }
        self.ids.insert(key, id.clone());
        id
    }

    /// Whether a key has already been registered.
    #[must_use]
    pub fn has(&self, kind: NodeKind, parts: &[&str]) -> bool {
        let key = (kind, parts.iter().map(|p| (*p).to_string()).collect());
        self.ids.contains_key(&key)
    }

    /// Look up an identifier without creating it.
    #[must_use]
    pub fn get(&self, kind: NodeKind, parts: &[&str]) -> Option<&ResourceId> {
        let key = (kind, parts.iter().map(|p| (*p).to_string()).collect());
        self.ids.get(&key)
    }

    /// Number of distinct identifiers issued for a kind.
    ///
    /// Colliding natural keys share one identifier and count once.
    #[must_use]
    pub fn count(&self, kind: NodeKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Number of keys registered across all kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_fragment_keeps_allowed() {
        assert_eq!(normalize_fragment("inst:Paragraf_LAG_1"), "inst:Paragraf_LAG_1");
        assert_eq!(normalize_fragment("a-b"), "a-b");
    }

    #[test]
    fn test_normalize_fragment_collapses_and_trims() {
        assert_eq!(normalize_fragment("  a   b  "), "a_b");
        assert_eq!(normalize_fragment("(a)/(b)"), "a_b");
        assert_eq!(normalize_fragment("__a__"), "a");
        assert_eq!(normalize_fragment("a\tb"), "a_b");
    }

    #[test]
    fn test_normalize_fragment_empty() {
        assert_eq!(normalize_fragment(""), "X");
        assert_eq!(normalize_fragment("åäö"), "X");
    }

    #[test]
    fn test_make_resource_id() {
        let id = make_resource_id(NodeKind::Chapter, &["LAG", "1"]);
        assert_eq!(id.as_str(), "inst:Kapitel_LAG_1");

        let id = make_resource_id(
            NodeKind::Paragraph,
            &["LAG", "DIRECT", "3", "Träder i kraft I:2021-01-01"],
        );
        assert_eq!(
            id.as_str(),
            "inst:Paragraf_LAG_DIRECT_3_Tr_der_i_kraft_I:2021-01-01"
        );
    }

    #[test]
    fn test_make_resource_id_drops_blank_parts() {
        let id = make_resource_id(NodeKind::Law, &["", "2010:110", "  "]);
        assert_eq!(id.as_str(), "inst:Lag_2010:110");
    }

    #[test]
    fn test_make_resource_id_nested_parent() {
        let id = make_resource_id(NodeKind::SubParagraph, &["inst:Paragraf_LAG_DIRECT_3_base", "1"]);
        assert_eq!(id.as_str(), "inst:Stycke_inst:Paragraf_LAG_DIRECT_3_base_1");
    }

    #[test]
    fn test_registry_is_idempotent() {
        let mut registry = IdentityRegistry::new();
        let first = registry.get_or_create(NodeKind::Division, &["1"]);
        let second = registry.get_or_create(NodeKind::Division, &["1"]);
        let third = registry.get_or_create(NodeKind::Division, &["1"]);

        assert_eq!(first, second);
        assert_eq!(second, third);
        assert_eq!(registry.count(NodeKind::Division), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_order_independent() {
        let mut forward = IdentityRegistry::new();
        let a1 = forward.get_or_create(NodeKind::Chapter, &["A", "1"]);
        let b1 = forward.get_or_create(NodeKind::Chapter, &["B", "1"]);

        let mut backward = IdentityRegistry::new();
        let b2 = backward.get_or_create(NodeKind::Chapter, &["B", "1"]);
        let a2 = backward.get_or_create(NodeKind::Chapter, &["A", "1"]);

        assert_eq!(a1, a2);
        assert_eq!(b1, b2);
    }

    #[test]
    fn test_registry_has_does_not_create() {
        let mut registry = IdentityRegistry::new();
        assert!(!registry.has(NodeKind::Division, &["1"]));
        assert!(registry.get(NodeKind::Division, &["1"]).is_none());
        assert!(registry.is_empty());

        registry.get_or_create(NodeKind::Division, &["1"]);
        assert!(registry.has(NodeKind::Division, &["1"]));
        assert!(!registry.has(NodeKind::Chapter, &["1"]));
    }

    #[test]
    fn test_registry_counts_per_kind() {
        let mut registry = IdentityRegistry::new();
        registry.get_or_create(NodeKind::Division, &["1"]);
        registry.get_or_create(NodeKind::Division, &["2"]);
        registry.get_or_create(NodeKind::Chapter, &["1", "1"]);

        assert_eq!(registry.count(NodeKind::Division), 2);
        assert_eq!(registry.count(NodeKind::Chapter), 1);
        assert_eq!(registry.count(NodeKind::Point), 0);
    }

    #[test]
    fn test_registry_known_collision() {
        // Keys differing only in stripped characters share an identifier.
        let mut registry = IdentityRegistry::new();
        let a = registry.get_or_create(NodeKind::Division, &["A.1"]);
        let b = registry.get_or_create(NodeKind::Division, &["A/1"]);
        assert_eq!(a, b);
        assert_eq!(registry.count(NodeKind::Division), 1);
        assert_eq!(registry.len(), 2);
        assert!(registry.has(NodeKind::Division, &["A/1"]));
    }
}
