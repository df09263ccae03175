//! Serialization of an assembled [`LawGraph`].
//!
//! Both output forms walk the same node records and the same
//! de-duplicated edge store; they differ only in how a record or an edge
//! is written.

mod cypher;
mod records;
mod turtle;
mod writer;

use clap::ValueEnum;

use crate::config::Namespaces;
use crate::graph::LawGraph;

pub use cypher::{cypher_escape, CypherSerializer};
pub use records::{node_records, Attribute, NodeRecord};
pub use turtle::{turtle_string, TurtleSerializer};
pub use writer::{save_outputs, write_atomic};

/// A rendering target for the law graph.
pub trait GraphSerializer {
    /// Extension of files in this form, without the dot.
    fn file_extension(&self) -> &'static str;

    /// Render the whole graph as text.
    fn render(&self, graph: &LawGraph) -> String;
}

/// Output forms selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Property-graph upsert script.
    Cypher,
    /// RDF triples in Turtle.
    Turtle,
    /// Both forms.
    Both,
}

impl OutputFormat {
    /// Serializers for this selection, Cypher first.
    #[must_use]
    pub fn serializers(&self, namespaces: &Namespaces) -> Vec<Box<dyn GraphSerializer>> {
        let cypher = || Box::new(CypherSerializer) as Box<dyn GraphSerializer>;
        let turtle = || Box::new(TurtleSerializer::new(namespaces.clone())) as Box<dyn GraphSerializer>;
        match self {
            Self::Cypher => vec![cypher()],
            Self::Turtle => vec![turtle()],
            Self::Both => vec![cypher(), turtle()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_serializers() {
        let ns = Namespaces::default();
        let extensions = |format: OutputFormat| -> Vec<&'static str> {
            format
                .serializers(&ns)
                .iter()
                .map(|s| s.file_extension())
                .collect()
        };
        assert_eq!(extensions(OutputFormat::Cypher), vec!["cypher"]);
        assert_eq!(extensions(OutputFormat::Turtle), vec!["ttl"]);
        assert_eq!(extensions(OutputFormat::Both), vec!["cypher", "ttl"]);
    }
}
