//! Node types and the assembled law graph.

use std::collections::BTreeMap;

use super::edges::EdgeStore;
use super::keys::{ChapterKey, DivisionKey, ParagraphKey, SubParagraphKey, SubdivisionKey};
use crate::types::{NodeKind, ResourceId, RunStats, Validity};

/// The legal act at the root of the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LawNode {
    pub id: ResourceId,
    /// Full label as given in the input, e.g. "Socialförsäkringsbalk (2010:110)".
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DivisionNode {
    pub id: ResourceId,
    pub key: DivisionKey,
    pub title: Option<String>,
}

impl DivisionNode {
    #[must_use]
    pub fn label(&self) -> String {
        format!("Avdelning {}", self.key.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubdivisionNode {
    pub id: ResourceId,
    pub key: SubdivisionKey,
    pub title: Option<String>,
}

impl SubdivisionNode {
    #[must_use]
    pub fn label(&self) -> String {
        format!("Underavdelning {}", self.key.id)
    }
}

/// A chapter title and where it came from.
///
/// An explicit `kapitel_namn` replaces the placeholder of an
/// auto-generated chapter, never the other way round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChapterTitle {
    Explicit(String),
    Synthetic(String),
}

impl ChapterTitle {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Explicit(text) | Self::Synthetic(text) => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterNode {
    pub id: ResourceId,
    pub key: ChapterKey,
    pub title: Option<ChapterTitle>,
    pub validity: Validity,
}

impl ChapterNode {
    #[must_use]
    pub fn label(&self) -> String {
        format!("Kapitel {}", self.key.number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphNode {
    pub id: ResourceId,
    pub key: ParagraphKey,
    pub heading: Option<String>,
    pub subheading: Option<String>,
    pub validity: Validity,
}

impl ParagraphNode {
    /// Display label: chapter tag, paragraph tag, heading, subheading and
    /// variant tag, joined by " - ".
    #[must_use]
    pub fn label(&self) -> String {
        let mut parts = Vec::with_capacity(5);
        if let Some(chapter) = &self.key.chapter {
            parts.push(format!("Kapitel {chapter}"));
        }
        parts.push(format!("Paragraf {}", self.key.number));
        if let Some(heading) = &self.heading {
            parts.push(heading.clone());
        }
        if let Some(subheading) = &self.subheading {
            parts.push(subheading.clone());
        }
        if let Some(variant) = &self.key.variant {
            parts.push(format!("variant: {variant}"));
        }
        parts.join(" - ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubParagraphNode {
    pub id: ResourceId,
    pub key: SubParagraphKey,
}

impl SubParagraphNode {
    #[must_use]
    pub fn label(&self) -> String {
        format!("Stycke {}", self.key.number)
    }
}

/// Leaf text unit; its text accumulates across rows in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointNode {
    pub id: ResourceId,
    pub sub_paragraph: ResourceId,
    pub text: String,
}

impl PointNode {
    /// Fixed display label of every point.
    pub const LABEL: &'static str = "Textpunkt";

    /// Append a row's text, newline-separated. Empty text adds nothing.
    pub fn append_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if !self.text.is_empty() {
            self.text.push('\n');
        }
        self.text.push_str(text);
    }
}

/// The assembled, immutable structure graph of one law.
///
/// Node collections iterate in emission order.
#[derive(Debug, Clone)]
pub struct LawGraph {
    pub(crate) law: LawNode,
    pub(crate) divisions: BTreeMap<DivisionKey, DivisionNode>,
    pub(crate) subdivisions: BTreeMap<SubdivisionKey, SubdivisionNode>,
    pub(crate) chapters: BTreeMap<ChapterKey, ChapterNode>,
    pub(crate) paragraphs: BTreeMap<ParagraphKey, ParagraphNode>,
    pub(crate) sub_paragraphs: BTreeMap<SubParagraphKey, SubParagraphNode>,
    pub(crate) points: BTreeMap<ResourceId, PointNode>,
    pub(crate) edges: EdgeStore,
    pub(crate) stats: RunStats,
}

impl LawGraph {
    pub(crate) fn new(law: LawNode) -> Self {
        Self {
            law,
            divisions: BTreeMap::new(),
            subdivisions: BTreeMap::new(),
            chapters: BTreeMap::new(),
            paragraphs: BTreeMap::new(),
            sub_paragraphs: BTreeMap::new(),
            points: BTreeMap::new(),
            edges: EdgeStore::default(),
            stats: RunStats::default(),
        }
    }

    #[must_use]
    pub fn law(&self) -> &LawNode {
        &self.law
    }

    /// Divisions sorted by id.
    pub fn divisions(&self) -> impl Iterator<Item = &DivisionNode> {
        self.divisions.values()
    }

    /// Subdivisions sorted by (division, subdivision).
    pub fn subdivisions(&self) -> impl Iterator<Item = &SubdivisionNode> {
        self.subdivisions.values()
    }

    /// Chapters sorted by (scope, numeric chapter, raw chapter).
    pub fn chapters(&self) -> impl Iterator<Item = &ChapterNode> {
        self.chapters.values()
    }

    /// Paragraphs sorted by (scope, numeric chapter, numeric paragraph, suffix).
    pub fn paragraphs(&self) -> impl Iterator<Item = &ParagraphNode> {
        self.paragraphs.values()
    }

    /// Sub-paragraphs sorted by (paragraph, numeric number, raw number).
    pub fn sub_paragraphs(&self) -> impl Iterator<Item = &SubParagraphNode> {
        self.sub_paragraphs.values()
    }

    /// Points sorted by identifier.
    pub fn points(&self) -> impl Iterator<Item = &PointNode> {
        self.points.values()
    }

    #[must_use]
    pub fn edges(&self) -> &EdgeStore {
        &self.edges
    }

    #[must_use]
    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Number of nodes of one kind.
    #[must_use]
    pub fn count(&self, kind: NodeKind) -> usize {
        match kind {
            NodeKind::Law => 1,
            NodeKind::Division => self.divisions.len(),
            NodeKind::Subdivision => self.subdivisions.len(),
            NodeKind::Chapter => self.chapters.len(),
            NodeKind::Paragraph => self.paragraphs.len(),
            NodeKind::SubParagraph => self.sub_paragraphs.len(),
            NodeKind::Point => self.points.len(),
        }
    }

    /// Total number of nodes, the law included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        [
            NodeKind::Law,
            NodeKind::Division,
            NodeKind::Subdivision,
            NodeKind::Chapter,
            NodeKind::Paragraph,
            NodeKind::SubParagraph,
            NodeKind::Point,
        ]
        .iter()
        .map(|kind| self.count(*kind))
        .sum()
    }

    /// Look up a point by identifier.
    #[must_use]
    pub fn point(&self, id: &ResourceId) -> Option<&PointNode> {
        self.points.get(id)
    }
}
