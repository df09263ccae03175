//! Core data types shared by the assembler and the serializers.
//!
//! These types describe the structure of a Swedish statute: a law
//! (lag) split into divisions (avdelning), subdivisions (underavdelning),
//! chapters (kapitel), paragraphs (paragraf), sub-paragraphs (stycke)
//! and points (punkt).

use std::fmt;

use chrono::NaiveDate;

/// Kind of structural node in the law graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeKind {
    /// The legal act itself.
    Law,
    /// Avdelning.
    Division,
    /// Underavdelning.
    Subdivision,
    /// Kapitel.
    Chapter,
    /// Paragraf.
    Paragraph,
    /// Stycke.
    SubParagraph,
    /// Textpunkt.
    Point,
}

impl NodeKind {
    /// Tag used as the first part of a resource identifier and as the
    /// node label in both output forms.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Law => "Lag",
            Self::Division => "Avdelning",
            Self::Subdivision => "Underavdelning",
            Self::Chapter => "Kapitel",
            Self::Paragraph => "Paragraf",
            Self::SubParagraph => "Stycke",
            Self::Point => "Punkt",
        }
    }

    /// EU subdivision authority code for this kind.
    #[must_use]
    pub fn subdivision_code(&self) -> &'static str {
        match self {
            Self::Law => "eu:ACT",
            Self::Division => "eu:PRT",
            Self::Subdivision => "eu:TIS",
            Self::Chapter => "eu:CPT",
            Self::Paragraph => "eu:ART",
            Self::SubParagraph => "eu:PAR",
            Self::Point => "eu:SUB",
        }
    }

    /// ELI resource type for this kind.
    #[must_use]
    pub fn eli_type(&self) -> &'static str {
        match self {
            Self::Law => "eli:LegalResource",
            _ => "eli:LegalResourceSubdivision",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Stable synthetic identifier of a node, e.g. `inst:Kapitel_LAG_1`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceId(String);

impl ResourceId {
    pub(crate) fn new(value: String) -> Self {
        Self(value)
    }

    /// The identifier as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Parent-to-child membership relation, one per level pair.
///
/// Declaration order is the emission order of edge sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Relation {
    /// Law → Division.
    HasDivision,
    /// Division → Subdivision.
    HasSubdivision,
    /// Division → Chapter.
    HasChapter,
    /// Law → Chapter (no division).
    HasChapterDirect,
    /// Chapter → Paragraph.
    HasParagraph,
    /// Law → Paragraph (no chapter).
    HasParagraphDirect,
    /// Paragraph → SubParagraph.
    HasSubParagraph,
    /// SubParagraph → Point.
    HasPoint,
}

impl Relation {
    /// All relations in emission order.
    pub const ALL: [Relation; 8] = [
        Self::HasDivision,
        Self::HasSubdivision,
        Self::HasChapter,
        Self::HasChapterDirect,
        Self::HasParagraph,
        Self::HasParagraphDirect,
        Self::HasSubParagraph,
        Self::HasPoint,
    ];

    /// Property-graph relationship type, parent → child.
    #[must_use]
    pub fn forward_type(&self) -> &'static str {
        match self {
            Self::HasDivision => "HAR_AVDELNING",
            Self::HasSubdivision => "HAR_UNDERAVDELNING",
            Self::HasChapter => "HAR_KAPITEL",
            Self::HasChapterDirect => "HAR_KAPITEL_DIREKT",
            Self::HasParagraph => "HAR_PARAGRAF",
            Self::HasParagraphDirect => "HAR_PARAGRAF_DIREKT",
            Self::HasSubParagraph => "HAR_STYCKE",
            Self::HasPoint => "HAR_PUNKT",
        }
    }

    /// Property-graph relationship type, child → parent.
    #[must_use]
    pub fn inverse_type(&self) -> &'static str {
        match self {
            Self::HasDivision => "INGAR_I_LAG",
            Self::HasSubdivision => "INGAR_I_AVDELNING",
            Self::HasChapter => "INGAR_I_AVDELNING_KAPITEL",
            Self::HasChapterDirect => "INGAR_I_LAG_KAPITEL",
            Self::HasParagraph => "INGAR_I_KAPITEL",
            Self::HasParagraphDirect => "INGAR_I_LAG_PARAGRAF",
            Self::HasSubParagraph => "INGAR_I_PARAGRAF",
            Self::HasPoint => "INGAR_I_STYCKE",
        }
    }

    /// RDF predicate, parent → child.
    #[must_use]
    pub fn forward_predicate(&self) -> &'static str {
        match self {
            Self::HasDivision => "def:harAvdelning",
            Self::HasSubdivision => "def:harUnderavdelning",
            Self::HasChapter => "def:harKapitel",
            Self::HasChapterDirect => "def:harKapitelDirekt",
            Self::HasParagraph => "def:harParagraf",
            Self::HasParagraphDirect => "def:harParagrafDirekt",
            Self::HasSubParagraph => "def:harStycke",
            Self::HasPoint => "def:harPunkt",
        }
    }

    /// RDF predicate, child → parent.
    #[must_use]
    pub fn inverse_predicate(&self) -> &'static str {
        match self {
            Self::HasDivision => "def:ingårILag",
            Self::HasSubdivision => "def:ingårIAvdelning",
            Self::HasChapter => "def:ingårIAvdelningKapitel",
            Self::HasChapterDirect => "def:ingårILagKapitel",
            Self::HasParagraph => "def:ingårIKapitel",
            Self::HasParagraphDirect => "def:ingårILagParagraf",
            Self::HasSubParagraph => "def:ingårIParagraf",
            Self::HasPoint => "def:ingårIStycke",
        }
    }
}

/// Which end of a validity window a periodization marker sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `I`: enters into force (träder i kraft).
    Inception,
    /// `U`: ceases to apply (upphör att gälla).
    Expiry,
}

impl Direction {
    /// Parse the marker letter, case-insensitively.
    #[must_use]
    pub fn from_letter(letter: &str) -> Option<Self> {
        match letter {
            "I" | "i" => Some(Self::Inception),
            "U" | "u" => Some(Self::Expiry),
            _ => None,
        }
    }
}

/// A dated periodization marker extracted from free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Periodization {
    pub direction: Direction,
    pub date: NaiveDate,
}

/// Validity window of a chapter or paragraph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Validity {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl Validity {
    /// Fold a marker into the window; the latest marker per direction wins.
    pub fn apply(&mut self, marker: Periodization) {
        match marker.direction {
            Direction::Inception => self.start = Some(marker.date),
            Direction::Expiry => self.end = Some(marker.date),
        }
    }

    /// Whether neither end is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// Row accounting for a compilation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Rows in the input collection.
    pub source_rows: usize,
    /// Rows that contributed to the graph.
    pub processed: usize,
    /// Rows excluded for lacking a paragraph or sub-paragraph.
    pub skipped: usize,
    /// Whether any row was placed under synthetic context.
    pub synthetic_context: bool,
}

/// Lenient integer reading of a number designator; non-numeric gives 0.
#[must_use]
pub fn numeric_value(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_node_kind_tags() {
        assert_eq!(NodeKind::Chapter.tag(), "Kapitel");
        assert_eq!(NodeKind::SubParagraph.to_string(), "Stycke");
        assert_eq!(NodeKind::Law.eli_type(), "eli:LegalResource");
        assert_eq!(NodeKind::Point.eli_type(), "eli:LegalResourceSubdivision");
        assert_eq!(NodeKind::Paragraph.subdivision_code(), "eu:ART");
    }

    #[test]
    fn test_relation_order_matches_declaration() {
        let mut sorted = Relation::ALL;
        sorted.sort();
        assert_eq!(sorted, Relation::ALL);
    }

    #[test]
    fn test_direction_from_letter() {
        assert_eq!(Direction::from_letter("I"), Some(Direction::Inception));
        assert_eq!(Direction::from_letter("u"), Some(Direction::Expiry));
        assert_eq!(Direction::from_letter("X"), None);
    }

    #[test]
    fn test_validity_last_write_wins() {
        let mut validity = Validity::default();
        assert!(validity.is_empty());

        validity.apply(Periodization {
            direction: Direction::Inception,
            date: date("2020-01-01"),
        });
        validity.apply(Periodization {
            direction: Direction::Inception,
            date: date("2021-01-01"),
        });
        validity.apply(Periodization {
            direction: Direction::Expiry,
            date: date("2022-06-30"),
        });

        assert_eq!(validity.start, Some(date("2021-01-01")));
        assert_eq!(validity.end, Some(date("2022-06-30")));
    }

    #[test]
    fn test_numeric_value() {
        assert_eq!(numeric_value("12"), 12);
        assert_eq!(numeric_value(" 3 "), 3);
        assert_eq!(numeric_value("2a"), 0);
        assert_eq!(numeric_value(""), 0);
    }
}
