//! Neo4j Cypher upsert script.
//!
//! Every statement is a `MERGE`, so replaying a script against a database
//! that already holds the graph changes nothing.

use super::records::{node_records, Attribute, NodeRecord};
use super::GraphSerializer;
use crate::graph::LawGraph;

/// First line of every generated script.
const HEADER: &str = "// Generated from flat JSON by sfs-lawgraph";

/// Uniqueness constraint on the shared node label.
const CONSTRAINT: &str =
    "CREATE CONSTRAINT resurs_id IF NOT EXISTS FOR (n:Resurs) REQUIRE n.id IS UNIQUE;";

/// Escape a value for a single-quoted Cypher string literal.
///
/// ```
/// use sfs_lawgraph::render::cypher_escape;
///
/// assert_eq!(cypher_escape(r"it's a\b"), r"it\'s a\\b");
/// ```
#[must_use]
pub fn cypher_escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

fn property_name(attribute: &Attribute<'_>) -> &'static str {
    match attribute {
        Attribute::Title(_) => "harTitel",
        Attribute::ChapterName(_) => "namn",
        Attribute::ValidFrom(_) => "giltigFrom",
        Attribute::ValidUntil(_) => "giltigTill",
        Attribute::Text(_) => "harText",
    }
}

fn property_value(attribute: &Attribute<'_>) -> String {
    match attribute {
        Attribute::Title(text) | Attribute::ChapterName(text) | Attribute::Text(text) => {
            (*text).to_string()
        }
        Attribute::ValidFrom(date) | Attribute::ValidUntil(date) => {
            date.format("%Y-%m-%d").to_string()
        }
    }
}

fn property_map(properties: &[(&str, String)]) -> String {
    let entries: Vec<String> = properties
        .iter()
        .map(|(name, value)| format!("{name}: '{}'", cypher_escape(value)))
        .collect();
    format!("{{ {} }}", entries.join(", "))
}

fn merge_node(record: &NodeRecord<'_>) -> String {
    let id = record.id.as_str();
    // Point text sits between the uri and the category tags.
    let (text, rest): (Vec<_>, Vec<_>) = record
        .attributes
        .iter()
        .partition(|a| matches!(a, Attribute::Text(_)));
    let entry = |a: &Attribute<'_>| (property_name(a), property_value(a));

    let mut properties = vec![("label_sv", record.label.clone()), ("uri", id.to_string())];
    properties.extend(text.into_iter().map(entry));
    properties.push(("eliType", record.kind.eli_type().to_string()));
    properties.push(("subdivisionCode", record.kind.subdivision_code().to_string()));
    properties.extend(rest.into_iter().map(entry));

    format!(
        "MERGE (n:Resurs:{} {{id: '{}'}}) SET n += {};",
        record.kind.tag(),
        cypher_escape(id),
        property_map(&properties)
    )
}

fn match_pair(source: &str, target: &str) -> String {
    format!(
        "MATCH (a:Resurs {{id: '{}'}}), (b:Resurs {{id: '{}'}})",
        cypher_escape(source),
        cypher_escape(target)
    )
}

/// Writes the graph as a Cypher script.
#[derive(Debug, Clone, Copy, Default)]
pub struct CypherSerializer;

impl GraphSerializer for CypherSerializer {
    fn file_extension(&self) -> &'static str {
        "cypher"
    }

    fn render(&self, graph: &LawGraph) -> String {
        let records = node_records(graph);
        let mut lines = Vec::with_capacity(records.len() + graph.edges().len() * 2 + 8);

        lines.push(HEADER.to_string());
        lines.push(CONSTRAINT.to_string());
        lines.push(String::new());

        let mut records = records.iter();
        if let Some(law) = records.next() {
            lines.push(merge_node(law));
            lines.push(String::new());
        }
        lines.extend(records.map(merge_node));
        lines.push(String::new());

        for edge in graph.edges().in_emission_order() {
            let pair = match_pair(edge.source.as_str(), edge.target.as_str());
            lines.push(format!(
                "{pair} MERGE (a)-[:{}]->(b);",
                edge.relation.forward_type()
            ));
            lines.push(format!(
                "{pair} MERGE (b)-[:{}]->(a);",
                edge.relation.inverse_type()
            ));
        }
        lines.push(String::new());

        let stats = graph.stats();
        lines.push(format!(
            "// Summary: source_rows={}, processed={}, skipped={}, synthetic_context={}",
            stats.source_rows, stats.processed, stats.skipped, stats.synthetic_context
        ));

        let mut script = lines.join("\n");
        script.push('\n');
        script
    }
}
