//! De-duplicated parent → child membership edges.

use std::collections::{HashMap, HashSet};

use crate::types::{Relation, ResourceId};

/// One membership edge. Rendered as a forward and an inverse relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub relation: Relation,
    pub source: ResourceId,
    pub target: ResourceId,
}

/// Edge sets keyed by relation, each de-duplicated by (source, target)
/// and kept in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct EdgeStore {
    edges: Vec<Edge>,
    seen: HashSet<(Relation, ResourceId, ResourceId)>,
    incoming: HashMap<ResourceId, Vec<usize>>,
}

impl EdgeStore {
    /// Record an edge. Returns `false` if it was already present.
    pub fn insert(&mut self, relation: Relation, source: &ResourceId, target: &ResourceId) -> bool {
        if !self
            .seen
            .insert((relation, source.clone(), target.clone()))
        {
            return false;
        }

        self.incoming
            .entry(target.clone())
            .or_default()
            .push(self.edges.len());
        self.edges.push(Edge {
            relation,
            source: source.clone(),
            target: target.clone(),
        });
        true
    }

    /// Edges of one relation, in first-seen order.
    pub fn by_relation(&self, relation: Relation) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.relation == relation)
    }

    /// All edges grouped by relation in declaration order.
    pub fn in_emission_order(&self) -> impl Iterator<Item = &Edge> {
        Relation::ALL
            .into_iter()
            .flat_map(move |relation| self.by_relation(relation))
    }

    /// Edges pointing at a node, in first-seen order.
    pub fn incoming(&self, target: &ResourceId) -> impl Iterator<Item = &Edge> {
        self.incoming
            .get(target)
            .into_iter()
            .flatten()
            .filter_map(move |&i| self.edges.get(i))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::make_resource_id;
    use crate::types::NodeKind;

    #[test]
    fn test_insert_deduplicates() {
        let law = make_resource_id(NodeKind::Law, &["2010:110"]);
        let division = make_resource_id(NodeKind::Division, &["A"]);
        let mut store = EdgeStore::default();

        assert!(store.insert(Relation::HasDivision, &law, &division));
        assert!(!store.insert(Relation::HasDivision, &law, &division));
        assert_eq!(store.len(), 1);
        assert_eq!(store.incoming(&division).count(), 1);
    }

    #[test]
    fn test_emission_order_groups_by_relation() {
        let law = make_resource_id(NodeKind::Law, &["L"]);
        let paragraph = make_resource_id(NodeKind::Paragraph, &["LAG", "DIRECT", "1", "base"]);
        let division = make_resource_id(NodeKind::Division, &["A"]);
        let mut store = EdgeStore::default();

        store.insert(Relation::HasParagraphDirect, &law, &paragraph);
        store.insert(Relation::HasDivision, &law, &division);

        let relations: Vec<Relation> = store.in_emission_order().map(|e| e.relation).collect();
        assert_eq!(
            relations,
            vec![Relation::HasDivision, Relation::HasParagraphDirect]
        );
    }

    #[test]
    fn test_by_relation_keeps_first_seen_order() {
        let law = make_resource_id(NodeKind::Law, &["L"]);
        let b = make_resource_id(NodeKind::Division, &["B"]);
        let a = make_resource_id(NodeKind::Division, &["A"]);
        let mut store = EdgeStore::default();

        store.insert(Relation::HasDivision, &law, &b);
        store.insert(Relation::HasDivision, &law, &a);

        let targets: Vec<&str> = store
            .by_relation(Relation::HasDivision)
            .map(|e| e.target.as_str())
            .collect();
        assert_eq!(targets, vec!["inst:Avdelning_B", "inst:Avdelning_A"]);
    }

    #[test]
    fn test_incoming_unknown_is_empty() {
        let store = EdgeStore::default();
        let id = make_resource_id(NodeKind::Point, &["x"]);
        assert_eq!(store.incoming(&id).count(), 0);
        assert!(store.is_empty());
    }
}
