//! SFS law graph compiler - turn flattened Swedish statutes into a graph.
//!
//! This crate reads the flat JSON rows produced by flattening an act of the
//! Svensk författningssamling (one row per text unit, with the law, division,
//! chapter, paragraph and sub-paragraph it belongs to) and compiles them into
//! a hierarchical structure graph. The graph can be written as a Neo4j
//! Cypher script or as RDF Turtle.
//!
//! # Example
//!
//! ```
//! use sfs_lawgraph::{compile, CompileOptions, CypherSerializer, GraphSerializer, RawRow};
//!
//! let rows = vec![RawRow {
//!     lag: Some("Socialförsäkringsbalk (2010:110)".to_string()),
//!     kapitel: Some("1".to_string()),
//!     paragraf: Some("1".to_string()),
//!     stycke: Some("1".to_string()),
//!     text: Some("Denna balk innehåller bestämmelser om social trygghet.".to_string()),
//!     ..RawRow::default()
//! }];
//!
//! let graph = compile(&rows, &CompileOptions::new()).unwrap();
//! assert_eq!(graph.law().id.as_str(), "inst:Lag_2010:110");
//!
//! let script = CypherSerializer.render(&graph);
//! assert!(script.contains("MERGE (n:Resurs:Kapitel {id: 'inst:Kapitel_LAG_1'})"));
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants, static patterns and compile options
//! - [`types`]: Node kinds, identifiers, relations and validity windows
//! - [`error`]: Error types and Result alias
//! - [`identity`]: Identifier derivation and the identity registry
//! - [`temporal`]: Periodization marker extraction
//! - [`row`]: Raw and normalized input rows
//! - [`graph`]: Natural keys, nodes, edges and the graph assembler
//! - [`render`]: Cypher and Turtle serializers and file output
//! - [`compiler`]: Input loading and end-to-end compilation
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod compiler;
pub mod config;
pub mod error;
pub mod graph;
pub mod identity;
pub mod render;
pub mod row;
pub mod temporal;
pub mod types;

// Re-export main functions
pub use compiler::{compile_file, load_rows, parse_rows};
pub use graph::{compile, LawGraph};

// Re-export commonly used items
pub use config::{CompileOptions, Namespaces};
pub use error::{LawGraphError, Result};
pub use render::{CypherSerializer, GraphSerializer, OutputFormat, TurtleSerializer};
pub use row::RawRow;
pub use types::{NodeKind, Relation, ResourceId, RunStats};
