//! Structured natural keys for each node kind.
//!
//! A key's `Ord` is the emission order of its kind, so keyed maps iterate
//! in output order. Every ordering ends with the raw fields as
//! tie-breakers to stay consistent with `Eq`.

use std::cmp::Ordering;

use crate::config::{
    BASE_VARIANT_MARKER, DIRECT_CHAPTER_MARKER, LAW_SCOPE_MARKER, PARAGRAPH_NUMBER_PATTERN,
};
use crate::types::{numeric_value, ResourceId};

/// Sort rank for paragraph numbers that are not `<digits><letter?>`.
const UNPARSED_PARAGRAPH_RANK: i64 = 1_000_000_000;

/// Where a chapter (or a chapter's paragraphs) hangs: under a division or
/// directly under the law.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    Law,
    Division(String),
}

impl Scope {
    /// Scope from an optional division id.
    #[must_use]
    pub fn from_division(division: Option<&str>) -> Self {
        division.map_or(Self::Law, |id| Self::Division(id.to_string()))
    }

    /// Textual marker used in identifiers and ordering.
    #[must_use]
    pub fn marker(&self) -> &str {
        match self {
            Self::Law => LAW_SCOPE_MARKER,
            Self::Division(id) => id,
        }
    }

    /// Division id, if scoped to a division.
    #[must_use]
    pub fn division(&self) -> Option<&str> {
        match self {
            Self::Law => None,
            Self::Division(id) => Some(id),
        }
    }
}

impl Ord for Scope {
    fn cmp(&self, other: &Self) -> Ordering {
        self.marker()
            .cmp(other.marker())
            .then_with(|| self.division().is_some().cmp(&other.division().is_some()))
    }
}

impl PartialOrd for Scope {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Split a paragraph number into (numeric part, lowercase suffix).
///
/// `"2a"` sorts as `(2, "a")`; anything else sorts after all numbered
/// paragraphs, by its raw text.
#[must_use]
pub fn paragraph_sort_key(number: &str) -> (i64, String) {
    PARAGRAPH_NUMBER_PATTERN
        .captures(number)
        .and_then(|caps| {
            let digits = caps.get(1)?.as_str().parse().ok()?;
            let suffix = caps.get(2).map_or("", |m| m.as_str()).to_lowercase();
            Some((digits, suffix))
        })
        .unwrap_or_else(|| (UNPARSED_PARAGRAPH_RANK, number.to_string()))
}

/// Division key: its id token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DivisionKey {
    pub id: String,
}

impl DivisionKey {
    #[must_use]
    pub fn parts(&self) -> Vec<&str> {
        vec![&self.id]
    }
}

/// Subdivision key: (division id, subdivision id).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubdivisionKey {
    pub division: String,
    pub id: String,
}

impl SubdivisionKey {
    #[must_use]
    pub fn parts(&self) -> Vec<&str> {
        vec![&self.division, &self.id]
    }
}

/// Chapter key: (scope, chapter number).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChapterKey {
    pub scope: Scope,
    pub number: String,
}

impl ChapterKey {
    #[must_use]
    pub fn parts(&self) -> Vec<&str> {
        vec![self.scope.marker(), &self.number]
    }
}

impl Ord for ChapterKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.scope
            .cmp(&other.scope)
            .then_with(|| numeric_value(&self.number).cmp(&numeric_value(&other.number)))
            .then_with(|| self.number.cmp(&other.number))
    }
}

impl PartialOrd for ChapterKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Paragraph key: (scope, chapter or direct, paragraph number, variant).
///
/// Paragraphs without a chapter are always law-scoped. The variant is the
/// paragraph's periodization text, so one number may exist as several
/// time-bounded nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParagraphKey {
    pub scope: Scope,
    pub chapter: Option<String>,
    pub number: String,
    pub variant: Option<String>,
}

impl ParagraphKey {
    /// Key for a paragraph inside a chapter.
    #[must_use]
    pub fn in_chapter(chapter: &ChapterKey, number: &str, variant: Option<&str>) -> Self {
        Self {
            scope: chapter.scope.clone(),
            chapter: Some(chapter.number.clone()),
            number: number.to_string(),
            variant: variant.map(str::to_string),
        }
    }

    /// Key for a paragraph attached directly to the law.
    #[must_use]
    pub fn direct(number: &str, variant: Option<&str>) -> Self {
        Self {
            scope: Scope::Law,
            chapter: None,
            number: number.to_string(),
            variant: variant.map(str::to_string),
        }
    }

    #[must_use]
    pub fn parts(&self) -> Vec<&str> {
        vec![
            self.scope.marker(),
            self.chapter.as_deref().unwrap_or(DIRECT_CHAPTER_MARKER),
            &self.number,
            self.variant.as_deref().unwrap_or(BASE_VARIANT_MARKER),
        ]
    }

    fn chapter_value(&self) -> i64 {
        self.chapter.as_deref().map_or(0, numeric_value)
    }
}

impl Ord for ParagraphKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.scope
            .cmp(&other.scope)
            .then_with(|| self.chapter_value().cmp(&other.chapter_value()))
            .then_with(|| paragraph_sort_key(&self.number).cmp(&paragraph_sort_key(&other.number)))
            .then_with(|| self.chapter.cmp(&other.chapter))
            .then_with(|| self.number.cmp(&other.number))
            .then_with(|| self.variant.cmp(&other.variant))
    }
}

impl PartialOrd for ParagraphKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sub-paragraph key: (owning paragraph, sub-paragraph number).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubParagraphKey {
    pub paragraph: ResourceId,
    pub number: String,
}

impl SubParagraphKey {
    #[must_use]
    pub fn parts(&self) -> Vec<&str> {
        vec![self.paragraph.as_str(), &self.number]
    }
}

impl Ord for SubParagraphKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.paragraph
            .cmp(&other.paragraph)
            .then_with(|| numeric_value(&self.number).cmp(&numeric_value(&other.number)))
            .then_with(|| self.number.cmp(&other.number))
    }
}

impl PartialOrd for SubParagraphKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Point key: (owning sub-paragraph, ordinal).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointKey {
    pub sub_paragraph: ResourceId,
    pub ordinal: String,
}

impl PointKey {
    #[must_use]
    pub fn parts(&self) -> Vec<&str> {
        vec![self.sub_paragraph.as_str(), &self.ordinal]
    }
}
