//! Flat input rows and the row normalizer.
//!
//! Rows come from an upstream flattening step that linearizes the
//! structured statute into one record per sub-paragraph (stycke), each
//! tagged with its positional context. Field names are the Swedish ones
//! used by that step.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::config::{CompileOptions, FALLBACK_DIVISION_ID, SYNTHETIC_CHAPTER, SYNTHETIC_DIVISION};
use crate::identity::normalize_fragment;

/// One flat input row as deserialized, before normalization.
///
/// Every field accepts a string, number or boolean; `null` and missing
/// fields are absent. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawRow {
    #[serde(default, deserialize_with = "lenient_text")]
    pub lag: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub avdelning: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub underavdelning: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub kapitel: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub kapitel_namn: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub kapitel_periodisering: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub paragraf: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub paragraf_rubrik: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub paragraf_underrubrik: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub paragraf_periodisering: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub stycke: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub text: Option<String>,
}

/// Coerce a scalar JSON value to text; `null` becomes `None`.
fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

/// Trim a field and drop it if nothing is left.
fn present(field: Option<&str>) -> Option<String> {
    field
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// A structural heading split into its id token and title,
/// e.g. `"A Gemensamma bestämmelser"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// First whitespace-delimited token.
    pub id: String,
    /// Remainder after the id, if any.
    pub title: Option<String>,
}

impl Heading {
    /// Split a trimmed, non-empty heading.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.split_once(char::is_whitespace) {
            Some((id, rest)) => Self {
                id: id.to_string(),
                title: present(Some(rest)),
            },
            None => Self {
                id: raw.to_string(),
                title: None,
            },
        }
    }
}

/// A usable row: trimmed, with every optional field explicitly optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRow {
    pub division: Option<Heading>,
    /// Subdivision id token, or the normalized raw heading when it has none.
    pub subdivision: Option<Heading>,
    pub chapter: Option<String>,
    pub chapter_title: Option<String>,
    pub chapter_periodization: Option<String>,
    pub paragraph: String,
    pub heading: Option<String>,
    pub subheading: Option<String>,
    pub paragraph_periodization: Option<String>,
    pub sub_paragraph: String,
    pub text: String,
    /// Whether chapter "0" (and possibly the division) was synthesized.
    pub synthetic: bool,
    /// Whether the division is the "A AUTO" placeholder.
    pub synthetic_division: bool,
}

/// Required field whose absence excludes a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Paragraph,
    SubParagraph,
}

impl MissingField {
    /// Input field name.
    #[must_use]
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Paragraph => "paragraf",
            Self::SubParagraph => "stycke",
        }
    }
}

/// Outcome of normalizing one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Usable(Box<NormalizedRow>),
    Skip(MissingField),
}

/// Normalize one raw row, or decide to skip it.
///
/// A row needs both `paragraf` and `stycke`. Without a chapter, a row
/// either stays attached to the law or, in synthetic-context mode, is
/// placed under chapter "0" (and division "A AUTO" when it also has no
/// division).
#[must_use]
pub fn normalize_row(raw: &RawRow, options: &CompileOptions) -> RowOutcome {
    let Some(paragraph) = present(raw.paragraf.as_deref()) else {
        return RowOutcome::Skip(MissingField::Paragraph);
    };
    let Some(sub_paragraph) = present(raw.stycke.as_deref()) else {
        return RowOutcome::Skip(MissingField::SubParagraph);
    };

    let mut division = present(raw.avdelning.as_deref());
    let mut chapter = present(raw.kapitel.as_deref());
    let mut synthetic = false;
    let mut synthetic_division = false;

    if chapter.is_none() && options.synthetic_context {
        chapter = Some(SYNTHETIC_CHAPTER.to_string());
        if division.is_none() {
            division = Some(SYNTHETIC_DIVISION.to_string());
            synthetic_division = true;
        }
        synthetic = true;
    }

    let division = division.map(|raw| {
        let mut heading = Heading::parse(&raw);
        if heading.id.is_empty() {
            heading.id = FALLBACK_DIVISION_ID.to_string();
        }
        heading
    });

    // Subdivisions only exist inside a division.
    let subdivision = division
        .as_ref()
        .and_then(|_| present(raw.underavdelning.as_deref()))
        .map(|raw| {
            let mut heading = Heading::parse(&raw);
            if heading.id.is_empty() {
                heading.id = normalize_fragment(&raw);
            }
            heading
        });

    RowOutcome::Usable(Box::new(NormalizedRow {
        division,
        subdivision,
        chapter,
        chapter_title: present(raw.kapitel_namn.as_deref()),
        chapter_periodization: present(raw.kapitel_periodisering.as_deref()),
        paragraph,
        heading: present(raw.paragraf_rubrik.as_deref()),
        subheading: present(raw.paragraf_underrubrik.as_deref()),
        paragraph_periodization: present(raw.paragraf_periodisering.as_deref()),
        sub_paragraph,
        text: present(raw.text.as_deref()).unwrap_or_default(),
        synthetic,
        synthetic_division,
    }))
}
