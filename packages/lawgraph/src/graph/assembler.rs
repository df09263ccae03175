//! Hierarchy assembler: folds normalized rows into a [`LawGraph`].

use std::collections::btree_map::Entry;
use std::collections::HashSet;

use super::keys::{
    ChapterKey, DivisionKey, ParagraphKey, PointKey, Scope, SubParagraphKey, SubdivisionKey,
};
use super::nodes::{
    ChapterNode, ChapterTitle, DivisionNode, LawGraph, LawNode, ParagraphNode, PointNode,
    SubParagraphNode, SubdivisionNode,
};
use crate::config::{CompileOptions, LAW_CITATION_PATTERN, POINT_ORDINAL, SYNTHETIC_CHAPTER_TITLE};
use crate::error::{LawGraphError, Result};
use crate::identity::{normalize_fragment, IdentityRegistry};
use crate::row::{normalize_row, NormalizedRow, RawRow, RowOutcome};
use crate::temporal::extract_periodization;
use crate::types::{NodeKind, Relation, ResourceId};

/// Natural key of the law: the SFS citation when the label ends with one,
/// otherwise the normalized label.
///
/// # Examples
/// ```
/// use sfs_lawgraph::graph::law_key;
///
/// assert_eq!(law_key("Socialförsäkringsbalk (2010:110)"), "2010:110");
/// assert_eq!(law_key("Okänd lag"), "Ok_nd_lag");
/// ```
#[must_use]
pub fn law_key(label: &str) -> String {
    LAW_CITATION_PATTERN
        .captures(label)
        .and_then(|caps| caps.get(1))
        .map_or_else(|| normalize_fragment(label), |m| m.as_str().to_string())
}

/// Pick the law label: the first non-empty `lag`, else the configured fallback.
pub fn resolve_law_label(rows: &[RawRow], options: &CompileOptions) -> Result<String> {
    rows.iter()
        .filter_map(|row| row.lag.as_deref().map(str::trim))
        .find(|lag| !lag.is_empty())
        .map(str::to_string)
        .or_else(|| options.fallback_law_label.clone())
        .ok_or(LawGraphError::MissingLawLabel)
}

/// Mutable graph builder threaded through the single pass over the rows.
///
/// Owns the identity registry and every accumulator; nothing is shared
/// outside the builder until [`GraphBuilder::finish`].
#[derive(Debug)]
pub struct GraphBuilder {
    options: CompileOptions,
    registry: IdentityRegistry,
    graph: LawGraph,
    /// Divisions seen under a real (non-placeholder) heading.
    real_divisions: HashSet<DivisionKey>,
}

impl GraphBuilder {
    /// Start a graph for the law with the given label.
    #[must_use]
    pub fn new(law_label: &str, options: CompileOptions) -> Self {
        let mut registry = IdentityRegistry::new();
        let key = law_key(law_label);
        let id = registry.get_or_create(NodeKind::Law, &[&key]);
        let law = LawNode {
            id,
            label: law_label.to_string(),
        };

        Self {
            options,
            registry,
            graph: LawGraph::new(law),
            real_divisions: HashSet::new(),
        }
    }

    /// The identity registry, for inspection.
    #[must_use]
    pub fn registry(&self) -> &IdentityRegistry {
        &self.registry
    }

    /// The graph assembled so far.
    #[must_use]
    pub fn graph(&self) -> &LawGraph {
        &self.graph
    }

    /// Normalize and add one raw row, or count it as skipped.
    pub fn push_row(&mut self, index: usize, raw: &RawRow) {
        self.graph.stats.source_rows += 1;
        match normalize_row(raw, &self.options) {
            RowOutcome::Usable(row) => self.add_row(&row),
            RowOutcome::Skip(field) => {
                tracing::debug!(row = index, field = field.field_name(), "skipping row");
                self.graph.stats.skipped += 1;
            }
        }
    }

    /// Add one normalized row to the graph.
    pub fn add_row(&mut self, row: &NormalizedRow) {
        self.graph.stats.processed += 1;
        if row.synthetic {
            tracing::debug!(paragraph = %row.paragraph, "placing chapterless row under synthetic context");
            self.graph.stats.synthetic_context = true;
        }

        let division = self.add_division(row);
        if let (Some(division_id), Some(_)) = (&division, &row.subdivision) {
            self.add_subdivision(row, division_id);
        }

        let chapter = row
            .chapter
            .as_deref()
            .map(|number| self.add_chapter(row, number));

        let paragraph = self.add_paragraph(row, chapter.as_ref());
        let sub_paragraph = self.add_sub_paragraph(row, &paragraph);
        self.add_point(row, &sub_paragraph);
    }

    /// Finish the pass and hand out the graph.
    #[must_use]
    pub fn finish(self) -> LawGraph {
        self.graph
    }

    fn add_division(&mut self, row: &NormalizedRow) -> Option<ResourceId> {
        let heading = row.division.as_ref()?;
        let key = DivisionKey {
            id: heading.id.clone(),
        };
        let id = self.registry.get_or_create(NodeKind::Division, &key.parts());

        let node = self
            .graph
            .divisions
            .entry(key.clone())
            .or_insert_with(|| DivisionNode {
                id: id.clone(),
                key: key.clone(),
                title: None,
            });

        // Real titles: last non-empty wins. The placeholder title only
        // fills a gap and gives way to any real heading.
        if row.synthetic_division {
            if node.title.is_none() && !self.real_divisions.contains(&key) {
                node.title.clone_from(&heading.title);
            }
        } else {
            let first_real = self.real_divisions.insert(key);
            if first_real || heading.title.is_some() {
                node.title.clone_from(&heading.title);
            }
        }

        let law = self.graph.law.id.clone();
        self.graph.edges.insert(Relation::HasDivision, &law, &id);
        Some(id)
    }

    fn add_subdivision(&mut self, row: &NormalizedRow, division: &ResourceId) {
        let (Some(parent), Some(heading)) = (&row.division, &row.subdivision) else {
            return;
        };
        let key = SubdivisionKey {
            division: parent.id.clone(),
            id: heading.id.clone(),
        };
        let id = self
            .registry
            .get_or_create(NodeKind::Subdivision, &key.parts());

        let node = self
            .graph
            .subdivisions
            .entry(key.clone())
            .or_insert_with(|| SubdivisionNode {
                id: id.clone(),
                key,
                title: None,
            });
        if heading.title.is_some() {
            node.title.clone_from(&heading.title);
        }

        self.graph
            .edges
            .insert(Relation::HasSubdivision, division, &id);
    }

    fn add_chapter(&mut self, row: &NormalizedRow, number: &str) -> (ChapterKey, ResourceId) {
        let division_id = row.division.as_ref().map(|d| d.id.as_str());
        let key = ChapterKey {
            scope: Scope::from_division(division_id),
            number: number.to_string(),
        };
        let id = self.registry.get_or_create(NodeKind::Chapter, &key.parts());

        let node = match self.graph.chapters.entry(key.clone()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(ChapterNode {
                id: id.clone(),
                key: key.clone(),
                title: None,
                validity: Default::default(),
            }),
        };

        let replaceable = matches!(node.title, None | Some(ChapterTitle::Synthetic(_)));
        if let (true, Some(title)) = (replaceable, &row.chapter_title) {
            node.title = Some(ChapterTitle::Explicit(title.clone()));
        } else if node.title.is_none() && row.synthetic {
            node.title = Some(ChapterTitle::Synthetic(SYNTHETIC_CHAPTER_TITLE.to_string()));
        }

        if let Some(marker) = row
            .chapter_periodization
            .as_deref()
            .and_then(extract_periodization)
        {
            node.validity.apply(marker);
        }

        let (relation, parent) = match division_id {
            Some(d) if self.registry.has(NodeKind::Division, &[d]) => (
                Relation::HasChapter,
                self.registry.get_or_create(NodeKind::Division, &[d]),
            ),
            _ => (Relation::HasChapterDirect, self.graph.law.id.clone()),
        };
        self.graph.edges.insert(relation, &parent, &id);

        (key, id)
    }

    fn add_paragraph(
        &mut self,
        row: &NormalizedRow,
        chapter: Option<&(ChapterKey, ResourceId)>,
    ) -> ResourceId {
        let variant = row.paragraph_periodization.as_deref();
        let key = match chapter {
            Some((chapter_key, _)) => ParagraphKey::in_chapter(chapter_key, &row.paragraph, variant),
            None => ParagraphKey::direct(&row.paragraph, variant),
        };
        let id = self
            .registry
            .get_or_create(NodeKind::Paragraph, &key.parts());

        let node = self
            .graph
            .paragraphs
            .entry(key.clone())
            .or_insert_with(|| ParagraphNode {
                id: id.clone(),
                key,
                heading: None,
                subheading: None,
                validity: Default::default(),
            });
        if node.heading.is_none() {
            node.heading.clone_from(&row.heading);
        }
        if node.subheading.is_none() {
            node.subheading.clone_from(&row.subheading);
        }
        if let Some(marker) = variant.and_then(extract_periodization) {
            node.validity.apply(marker);
        }

        match chapter {
            Some((_, chapter_id)) => {
                self.graph
                    .edges
                    .insert(Relation::HasParagraph, chapter_id, &id);
            }
            None => {
                let law = self.graph.law.id.clone();
                self.graph
                    .edges
                    .insert(Relation::HasParagraphDirect, &law, &id);
            }
        }

        id
    }

    fn add_sub_paragraph(&mut self, row: &NormalizedRow, paragraph: &ResourceId) -> ResourceId {
        let key = SubParagraphKey {
            paragraph: paragraph.clone(),
            number: row.sub_paragraph.clone(),
        };
        let id = self
            .registry
            .get_or_create(NodeKind::SubParagraph, &key.parts());

        self.graph
            .sub_paragraphs
            .entry(key.clone())
            .or_insert_with(|| SubParagraphNode { id: id.clone(), key });
        self.graph
            .edges
            .insert(Relation::HasSubParagraph, paragraph, &id);
        id
    }

    fn add_point(&mut self, row: &NormalizedRow, sub_paragraph: &ResourceId) {
        let key = PointKey {
            sub_paragraph: sub_paragraph.clone(),
            ordinal: POINT_ORDINAL.to_string(),
        };
        let id = self.registry.get_or_create(NodeKind::Point, &key.parts());

        match self.graph.points.entry(id.clone()) {
            Entry::Occupied(mut entry) => entry.get_mut().append_text(&row.text),
            Entry::Vacant(entry) => {
                entry.insert(PointNode {
                    id: id.clone(),
                    sub_paragraph: sub_paragraph.clone(),
                    text: row.text.clone(),
                });
            }
        }

        self.graph
            .edges
            .insert(Relation::HasPoint, sub_paragraph, &id);
    }
}

/// Compile raw rows into a law graph in a single pass.
///
/// Fails only if the input is empty or the law label cannot be
/// determined; rows lacking a paragraph or sub-paragraph are skipped and
/// counted.
pub fn compile(rows: &[RawRow], options: &CompileOptions) -> Result<LawGraph> {
    if rows.is_empty() {
        return Err(LawGraphError::EmptyInput);
    }

    let label = resolve_law_label(rows, options)?;
    let mut builder = GraphBuilder::new(&label, options.clone());
    for (index, row) in rows.iter().enumerate() {
        builder.push_row(index, row);
    }

    let graph = builder.finish();
    let stats = graph.stats();
    tracing::info!(
        law = %graph.law().label,
        source_rows = stats.source_rows,
        processed = stats.processed,
        skipped = stats.skipped,
        synthetic_context = stats.synthetic_context,
        nodes = graph.node_count(),
        edges = graph.edges().len(),
        "compiled law graph"
    );
    Ok(graph)
}
