//! RDF Turtle document.

use super::records::{node_records, Attribute, NodeRecord};
use super::GraphSerializer;
use crate::config::{
    Namespaces, DCT_NAMESPACE, EU_SUBDIVISION_NAMESPACE, RDFS_NAMESPACE, XSD_NAMESPACE,
};
use crate::graph::{Edge, LawGraph};

/// Quote a value as a Turtle string literal using JSON escaping.
///
/// Non-ASCII characters are written as-is.
///
/// ```
/// use sfs_lawgraph::render::turtle_string;
///
/// assert_eq!(turtle_string("Träder \"i\" kraft"), r#""Träder \"i\" kraft""#);
/// assert_eq!(turtle_string("a\nb"), r#""a\nb""#);
/// ```
#[must_use]
pub fn turtle_string(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

fn predicate(attribute: &Attribute<'_>) -> String {
    match attribute {
        Attribute::Title(text) => format!("def:harTitel {}", turtle_string(text)),
        Attribute::ChapterName(text) => format!("rdfs:comment {}@sv", turtle_string(text)),
        Attribute::ValidFrom(date) => format!(
            "def:giltigFrom {}^^xsd:date",
            turtle_string(&date.format("%Y-%m-%d").to_string())
        ),
        Attribute::ValidUntil(date) => format!(
            "def:giltigTill {}^^xsd:date",
            turtle_string(&date.format("%Y-%m-%d").to_string())
        ),
        Attribute::Text(text) => format!("def:harText {}", turtle_string(text)),
    }
}

/// Subject line, predicates separated by ` ;`, closing ` .`, blank line.
fn push_block(lines: &mut Vec<String>, subject: &str, rdf_type: &str, predicates: &[String]) {
    if predicates.is_empty() {
        lines.push(format!("{subject} a {rdf_type} ."));
    } else {
        lines.push(format!("{subject} a {rdf_type} ;"));
        let last = predicates.len() - 1;
        for (i, p) in predicates.iter().enumerate() {
            let end = if i == last { " ." } else { " ;" };
            lines.push(format!("    {p}{end}"));
        }
    }
    lines.push(String::new());
}

fn push_membership(lines: &mut Vec<String>, edge: &Edge) {
    lines.push(format!(
        "{} {} {} .",
        edge.source,
        edge.relation.forward_predicate(),
        edge.target
    ));
    lines.push(format!(
        "{} {} {} .",
        edge.target,
        edge.relation.inverse_predicate(),
        edge.source
    ));
}

fn node_predicates(record: &NodeRecord<'_>) -> Vec<String> {
    let mut predicates = vec![format!("rdfs:label {}@sv", turtle_string(&record.label))];
    predicates.extend(record.attributes.iter().map(predicate));
    predicates.push(format!("def:subdivisionCode {}", record.kind.subdivision_code()));
    predicates
}

/// Writes the graph as Turtle with configurable `inst:` and `def:` bases.
#[derive(Debug, Clone, Default)]
pub struct TurtleSerializer {
    namespaces: Namespaces,
}

impl TurtleSerializer {
    #[must_use]
    pub fn new(namespaces: Namespaces) -> Self {
        Self { namespaces }
    }

    fn prefixes(&self) -> Vec<String> {
        vec![
            format!("@prefix def: <{}> .", self.namespaces.definitions),
            format!("@prefix inst: <{}> .", self.namespaces.instance_base),
            format!("@prefix dct: <{DCT_NAMESPACE}> ."),
            format!("@prefix eu: <{EU_SUBDIVISION_NAMESPACE}> ."),
            format!("@prefix rdfs: <{RDFS_NAMESPACE}> ."),
            format!("@prefix xsd: <{XSD_NAMESPACE}> ."),
            String::new(),
        ]
    }
}

impl GraphSerializer for TurtleSerializer {
    fn file_extension(&self) -> &'static str {
        "ttl"
    }

    fn render(&self, graph: &LawGraph) -> String {
        let mut lines = self.prefixes();
        let mut records = node_records(graph).into_iter();

        if let Some(law) = records.next() {
            push_block(
                &mut lines,
                law.id.as_str(),
                "def:Lag",
                &[
                    format!("rdfs:label {}@sv", turtle_string(&law.label)),
                    "dct:type eu:ACT".to_string(),
                ],
            );
        }

        for record in records {
            for edge in graph.edges().incoming(record.id) {
                push_membership(&mut lines, edge);
            }
            let rdf_type = format!("def:{}", record.kind.tag());
            push_block(&mut lines, record.id.as_str(), &rdf_type, &node_predicates(&record));
        }

        let stats = graph.stats();
        lines.push(format!(
            "# Summary: source_rows={}, processed={}, skipped={}, synthetic_context={}",
            stats.source_rows, stats.processed, stats.skipped, stats.synthetic_context
        ));

        let mut document = lines.join("\n");
        document.push('\n');
        document
    }
}
