//! Periodization marker extraction.
//!
//! Periodization texts look like `Träder i kraft I:2021-01-01` or
//! `Upphör att gälla U:2025-07-01`. Only the first marker in a text is
//! read; relative markers ("den dag regeringen bestämmer") carry no date
//! and yield nothing.

use chrono::NaiveDate;

use crate::config::PERIODIZATION_PATTERN;
use crate::types::{Direction, Periodization};

/// Extract the first dated periodization marker from free text.
///
/// The direction letter decides which end of the validity window the
/// date belongs to. A date that is not a real calendar day is treated as
/// absent.
///
/// # Examples
/// ```
/// use sfs_lawgraph::temporal::extract_periodization;
/// use sfs_lawgraph::types::Direction;
///
/// let marker = extract_periodization("/Träder i kraft I:2021-01-01/").unwrap();
/// assert_eq!(marker.direction, Direction::Inception);
/// assert_eq!(marker.date.to_string(), "2021-01-01");
///
/// assert!(extract_periodization("Träder i kraft I:den dag regeringen bestämmer").is_none());
/// ```
#[must_use]
pub fn extract_periodization(text: &str) -> Option<Periodization> {
    let caps = PERIODIZATION_PATTERN.captures(text)?;
    let direction = Direction::from_letter(caps.get(2)?.as_str())?;
    let raw_date = caps.get(3)?.as_str();

    match NaiveDate::parse_from_str(raw_date, "%Y-%m-%d") {
        Ok(date) => Some(Periodization { direction, date }),
        Err(_) => {
            tracing::warn!(marker = %text, date = raw_date, "ignoring periodization with impossible date");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_extract_inception() {
        let marker = extract_periodization("Träder i kraft I:2021-01-01").unwrap();
        assert_eq!(marker.direction, Direction::Inception);
        assert_eq!(marker.date, date("2021-01-01"));
    }

    #[test]
    fn test_extract_expiry() {
        let marker = extract_periodization("Upphör att gälla U:2025-07-01").unwrap();
        assert_eq!(marker.direction, Direction::Expiry);
        assert_eq!(marker.date, date("2025-07-01"));
    }

    #[test]
    fn test_extract_without_diacritics_and_case() {
        let marker = extract_periodization("upphor att galla u:2019-12-31").unwrap();
        assert_eq!(marker.direction, Direction::Expiry);
        assert_eq!(marker.date, date("2019-12-31"));
    }

    #[test]
    fn test_direction_follows_letter() {
        // The letter, not the phrase, decides the direction.
        let marker = extract_periodization("Träder i kraft U:2023-01-01").unwrap();
        assert_eq!(marker.direction, Direction::Expiry);
    }

    #[test]
    fn test_only_first_marker_is_used() {
        let marker = extract_periodization(
            "Upphör att gälla U:2024-01-01 / Träder i kraft I:2024-01-02",
        )
        .unwrap();
        assert_eq!(marker.direction, Direction::Expiry);
        assert_eq!(marker.date, date("2024-01-01"));
    }

    #[test]
    fn test_marker_embedded_in_text() {
        let marker =
            extract_periodization("Lydelse enligt SFS 2020:1 /Träder i kraft I:2020-07-01/")
                .unwrap();
        assert_eq!(marker.date, date("2020-07-01"));
    }

    #[test]
    fn test_no_marker() {
        assert!(extract_periodization("").is_none());
        assert!(extract_periodization("Ingen periodisering").is_none());
        assert!(extract_periodization("Träder i kraft I:2021-1-1").is_none());
    }

    #[test]
    fn test_impossible_date_is_ignored() {
        assert!(extract_periodization("Träder i kraft I:2021-02-30").is_none());
        assert!(extract_periodization("Träder i kraft I:2021-13-01").is_none());
    }
}
