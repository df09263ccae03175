//! Format-neutral view of the graph's nodes in emission order.

use chrono::NaiveDate;

use crate::graph::{LawGraph, PointNode};
use crate::types::{NodeKind, ResourceId, Validity};

/// Optional node attribute, named by meaning rather than by output form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute<'g> {
    /// Division or subdivision title.
    Title(&'g str),
    /// Chapter name.
    ChapterName(&'g str),
    ValidFrom(NaiveDate),
    ValidUntil(NaiveDate),
    /// Accumulated point text. Always present on points, possibly empty.
    Text(&'g str),
}

/// One node ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRecord<'g> {
    pub kind: NodeKind,
    pub id: &'g ResourceId,
    pub label: String,
    pub attributes: Vec<Attribute<'g>>,
}

fn validity_attributes<'g>(validity: &Validity) -> impl Iterator<Item = Attribute<'g>> {
    let from = validity.start.map(Attribute::ValidFrom);
    let until = validity.end.map(Attribute::ValidUntil);
    from.into_iter().chain(until)
}

/// Every node of the graph: the law first, then each kind in level order,
/// each kind in its own sort order.
#[must_use]
pub fn node_records(graph: &LawGraph) -> Vec<NodeRecord<'_>> {
    let mut records = Vec::with_capacity(graph.node_count());

    let law = graph.law();
    records.push(NodeRecord {
        kind: NodeKind::Law,
        id: &law.id,
        label: law.label.clone(),
        attributes: Vec::new(),
    });

    for node in graph.divisions() {
        records.push(NodeRecord {
            kind: NodeKind::Division,
            id: &node.id,
            label: node.label(),
            attributes: node.title.as_deref().map(Attribute::Title).into_iter().collect(),
        });
    }

    for node in graph.subdivisions() {
        records.push(NodeRecord {
            kind: NodeKind::Subdivision,
            id: &node.id,
            label: node.label(),
            attributes: node.title.as_deref().map(Attribute::Title).into_iter().collect(),
        });
    }

    for node in graph.chapters() {
        let name = node.title.as_ref().map(|t| Attribute::ChapterName(t.text()));
        records.push(NodeRecord {
            kind: NodeKind::Chapter,
            id: &node.id,
            label: node.label(),
            attributes: name.into_iter().chain(validity_attributes(&node.validity)).collect(),
        });
    }

    for node in graph.paragraphs() {
        records.push(NodeRecord {
            kind: NodeKind::Paragraph,
            id: &node.id,
            label: node.label(),
            attributes: validity_attributes(&node.validity).collect(),
        });
    }

    for node in graph.sub_paragraphs() {
        records.push(NodeRecord {
            kind: NodeKind::SubParagraph,
            id: &node.id,
            label: node.label(),
            attributes: Vec::new(),
        });
    }

    for node in graph.points() {
        records.push(NodeRecord {
            kind: NodeKind::Point,
            id: &node.id,
            label: PointNode::LABEL.to_string(),
            attributes: vec![Attribute::Text(&node.text)],
        });
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompileOptions;
    use crate::graph::compile;
    use crate::row::RawRow;

    fn row(kapitel: &str, paragraf: &str, text: &str) -> RawRow {
        RawRow {
            lag: Some("Testlag (2000:1)".to_string()),
            avdelning: Some("A Allmänna bestämmelser".to_string()),
            kapitel: Some(kapitel.to_string()),
            kapitel_namn: Some("Inledande bestämmelser".to_string()),
            kapitel_periodisering: Some("Träder i kraft I:2011-01-01".to_string()),
            paragraf: Some(paragraf.to_string()),
            stycke: Some("1".to_string()),
            text: Some(text.to_string()),
            ..RawRow::default()
        }
    }

    #[test]
    fn test_records_cover_every_node_in_level_order() {
        let graph = compile(&[row("1", "1", "Första"), row("1", "2", "Andra")], &CompileOptions::new())
            .unwrap();
        let records = node_records(&graph);

        assert_eq!(records.len(), graph.node_count());
        let kinds: Vec<NodeKind> = records.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Law,
                NodeKind::Division,
                NodeKind::Chapter,
                NodeKind::Paragraph,
                NodeKind::Paragraph,
                NodeKind::SubParagraph,
                NodeKind::SubParagraph,
                NodeKind::Point,
                NodeKind::Point,
            ]
        );
    }

    #[test]
    fn test_chapter_record_attributes() {
        let graph = compile(&[row("1", "1", "Första")], &CompileOptions::new()).unwrap();
        let records = node_records(&graph);
        let chapter = records
            .iter()
            .find(|r| r.kind == NodeKind::Chapter)
            .unwrap();

        assert_eq!(chapter.label, "Kapitel 1");
        assert_eq!(
            chapter.attributes,
            vec![
                Attribute::ChapterName("Inledande bestämmelser"),
                Attribute::ValidFrom(NaiveDate::from_ymd_opt(2011, 1, 1).unwrap()),
            ]
        );
    }

    #[test]
    fn test_point_record_always_has_text() {
        let graph = compile(&[row("1", "1", "")], &CompileOptions::new()).unwrap();
        let records = node_records(&graph);
        let point = records.iter().find(|r| r.kind == NodeKind::Point).unwrap();

        assert_eq!(point.label, "Textpunkt");
        assert_eq!(point.attributes, vec![Attribute::Text("")]);
    }
}
