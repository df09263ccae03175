//! Law structure graph: keys, nodes, edges and the assembler that builds
//! them from flat rows.
//!
//! Nodes are keyed by structured natural keys whose ordering is the
//! emission order of each kind, so both serializers walk the same
//! collections in the same order.

mod assembler;
mod edges;
mod keys;
mod nodes;

pub use assembler::{compile, law_key, resolve_law_label, GraphBuilder};
pub use edges::{Edge, EdgeStore};
pub use keys::{
    paragraph_sort_key, ChapterKey, DivisionKey, ParagraphKey, PointKey, Scope, SubParagraphKey,
    SubdivisionKey,
};
pub use nodes::{
    ChapterNode, ChapterTitle, DivisionNode, LawGraph, LawNode, ParagraphNode, PointNode,
    SubParagraphNode, SubdivisionNode,
};
