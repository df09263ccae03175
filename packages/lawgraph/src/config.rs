//! Configuration constants, static patterns and compile options.

use regex::Regex;
use std::sync::LazyLock;

/// Prefix of every synthetic resource identifier.
pub const INSTANCE_PREFIX: &str = "inst:";

/// Fallback fragment for a natural-key part that normalizes to nothing.
pub const EMPTY_FRAGMENT: &str = "X";

/// Law label used when no row carries a `lag` value.
pub const DEFAULT_LAW_LABEL: &str = "Unknown law";

/// Scope marker for chapters and paragraphs attached directly to the law.
pub const LAW_SCOPE_MARKER: &str = "LAG";

/// Chapter slot of a paragraph key when the paragraph has no chapter.
pub const DIRECT_CHAPTER_MARKER: &str = "DIRECT";

/// Variant slot of a paragraph identifier when no periodization is present.
pub const BASE_VARIANT_MARKER: &str = "base";

/// Division id used when a heading has no leading token.
pub const FALLBACK_DIVISION_ID: &str = "A";

/// Division placeholder applied to divisionless rows in synthetic-context mode.
pub const SYNTHETIC_DIVISION: &str = "A AUTO";

/// Chapter number applied to chapterless rows in synthetic-context mode.
pub const SYNTHETIC_CHAPTER: &str = "0";

/// Title given to the auto-generated chapter when no explicit title exists.
pub const SYNTHETIC_CHAPTER_TITLE: &str = "Auto-generated chapter for chapterless act";

/// Ordinal of the single point modeled under each sub-paragraph.
pub const POINT_ORDINAL: &str = "1";

/// Default base IRI for the `inst:` prefix.
pub const DEFAULT_INSTANCE_BASE: &str = "http://fk.se/ontology/instances/";

/// Default base IRI for the `def:` prefix.
pub const DEFAULT_DEFINITIONS_BASE: &str = "http://fk.se/ontology/definitions#";

/// Dublin Core terms namespace.
pub const DCT_NAMESPACE: &str = "http://purl.org/dc/terms/";

/// EU publications office subdivision authority table.
pub const EU_SUBDIVISION_NAMESPACE: &str =
    "http://publications.europa.eu/resource/authority/subdivision/";

/// RDF Schema namespace.
pub const RDFS_NAMESPACE: &str = "http://www.w3.org/2000/01/rdf-schema#";

/// XML Schema datatypes namespace.
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";

/// SFS citation at the end of a law label, e.g. "Socialförsäkringsbalk (2010:110)".
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub static LAW_CITATION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((\d{4}:\d+)\)\s*$").expect("valid regex"));

/// Periodization marker: phrase, direction letter and date.
///
/// Captures: (1) phrase, (2) direction `I`/`U`, (3) `YYYY-MM-DD`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub static PERIODIZATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(Upphor att galla|Upph[öo]r att g[äa]lla|Trader i kraft|Tr[äa]der i kraft)\s+([UI]):(\d{4}-\d{2}-\d{2})",
    )
    .expect("valid regex")
});

/// Paragraph number: digits with an optional single-letter suffix ("2", "2a").
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub static PARAGRAPH_NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)\s*([a-zA-Z]?)\s*$").expect("valid regex"));

/// Options controlling how rows are compiled into a graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Place chapterless rows under an auto-generated chapter "0".
    pub synthetic_context: bool,

    /// Law label used when no row has a `lag` value.
    ///
    /// `None` makes a missing label a fatal error.
    pub fallback_law_label: Option<String>,
}

impl CompileOptions {
    /// Create options with the defaults: synthetic context off and
    /// [`DEFAULT_LAW_LABEL`] as the fallback label.
    #[must_use]
    pub fn new() -> Self {
        Self {
            synthetic_context: false,
            fallback_law_label: Some(DEFAULT_LAW_LABEL.to_string()),
        }
    }

    /// Enable or disable synthetic-context mode.
    #[must_use]
    pub fn with_synthetic_context(mut self, enabled: bool) -> Self {
        self.synthetic_context = enabled;
        self
    }

    /// Set (or clear) the fallback law label.
    #[must_use]
    pub fn with_fallback_law_label(mut self, label: Option<String>) -> Self {
        self.fallback_law_label = label;
        self
    }
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Base IRIs for the configurable Turtle prefixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespaces {
    /// Base IRI bound to `inst:`.
    pub instance_base: String,

    /// Base IRI bound to `def:`.
    pub definitions: String,
}

impl Namespaces {
    /// Create namespaces with explicit base IRIs.
    #[must_use]
    pub fn new(instance_base: impl Into<String>, definitions: impl Into<String>) -> Self {
        Self {
            instance_base: instance_base.into(),
            definitions: definitions.into(),
        }
    }
}

impl Default for Namespaces {
    fn default() -> Self {
        Self::new(DEFAULT_INSTANCE_BASE, DEFAULT_DEFINITIONS_BASE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_law_citation_pattern() {
        let caps = LAW_CITATION_PATTERN
            .captures("Socialförsäkringsbalk (2010:110)")
            .unwrap();
        assert_eq!(&caps[1], "2010:110");
        assert!(LAW_CITATION_PATTERN.captures("Socialförsäkringsbalk").is_none());
        assert!(LAW_CITATION_PATTERN
            .captures("Lag (2010:110) om något")
            .is_none());
    }

    #[test]
    fn test_periodization_pattern_diacritics() {
        assert!(PERIODIZATION_PATTERN.is_match("Träder i kraft I:2021-01-01"));
        assert!(PERIODIZATION_PATTERN.is_match("Trader i kraft I:2021-01-01"));
        assert!(PERIODIZATION_PATTERN.is_match("Upphör att gälla U:2022-07-01"));
        assert!(PERIODIZATION_PATTERN.is_match("UPPHOR ATT GALLA u:2022-07-01"));
        assert!(!PERIODIZATION_PATTERN.is_match("Träder i kraft I:den dag regeringen bestämmer"));
    }

    #[test]
    fn test_paragraph_number_pattern() {
        let caps = PARAGRAPH_NUMBER_PATTERN.captures(" 12 b ").unwrap();
        assert_eq!(&caps[1], "12");
        assert_eq!(&caps[2], "b");
        assert!(PARAGRAPH_NUMBER_PATTERN.captures("12bc").is_none());
    }

    #[test]
    fn test_compile_options_defaults() {
        let options = CompileOptions::default();
        assert!(!options.synthetic_context);
        assert_eq!(options.fallback_law_label.as_deref(), Some(DEFAULT_LAW_LABEL));

        let options = CompileOptions::new()
            .with_synthetic_context(true)
            .with_fallback_law_label(None);
        assert!(options.synthetic_context);
        assert!(options.fallback_law_label.is_none());
    }

    #[test]
    fn test_namespaces_default() {
        let ns = Namespaces::default();
        assert_eq!(ns.instance_base, DEFAULT_INSTANCE_BASE);
        assert_eq!(ns.definitions, DEFAULT_DEFINITIONS_BASE);
    }
}
