//! Date normalization for Spanish-language documents.
//!
//! Month names are translated through a fixed table and parsed with
//! chrono's English names, so results never depend on the host locale.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::DateFormat;
use super::engine::FieldMatch;
use crate::models::sentinel::{DATE_FORMAT_ERROR, NOT_FOUND};

lazy_static! {
    static ref LONG_DATE: Regex =
        Regex::new(r"(?i)\b(\d{1,2})\s+de\s+(\p{L}+)\s+del?\s+(\d{4})\b").unwrap();
    static ref SHORT_DATE: Regex =
        Regex::new(r"\b(\d{1,2})[\s/\-](\d{1,2})[\s/\-](\d{4}|\d{2})\b").unwrap();
}

/// Canonical output format: `DD-MM-YY`.
pub const OUTPUT_FORMAT: &str = "%d-%m-%y";

const SPANISH_MONTHS: [(&str, &str); 12] = [
    ("enero", "January"),
    ("febrero", "February"),
    ("marzo", "March"),
    ("abril", "April"),
    ("mayo", "May"),
    ("junio", "June"),
    ("julio", "July"),
    ("agosto", "August"),
    ("septiembre", "September"),
    ("octubre", "October"),
    ("noviembre", "November"),
    ("diciembre", "December"),
];

/// Result of normalizing a date field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DateOutcome {
    /// Canonical `DD-MM-YY` date.
    Normalized(String),
    /// No date-shaped text was found.
    NotFound,
    /// Date-shaped text was found but is not a calendar date.
    FormatError,
}

impl DateOutcome {
    /// Normalized date or the matching placeholder.
    pub fn as_str(&self) -> &str {
        match self {
            DateOutcome::Normalized(date) => date,
            DateOutcome::NotFound => NOT_FOUND,
            DateOutcome::FormatError => DATE_FORMAT_ERROR,
        }
    }
}

/// Translate a Spanish month name to English.
pub fn translate_month(name: &str) -> Option<&'static str> {
    let name = name.trim().to_lowercase();
    SPANISH_MONTHS
        .iter()
        .find(|(spanish, _)| *spanish == name)
        .map(|(_, english)| *english)
}

/// Normalize `<day> de <month-name> de|del <year>`.
///
/// The translated month name is tried first, the name as written second.
pub fn normalize_long_date(day: &str, month: &str, year: &str) -> DateOutcome {
    let (Ok(day), Ok(year)) = (day.trim().parse::<u32>(), year.trim().parse::<i32>()) else {
        return DateOutcome::FormatError;
    };

    let parse = |month_name: &str| {
        NaiveDate::parse_from_str(&format!("{day:02} {month_name} {year:04}"), "%d %B %Y").ok()
    };

    translate_month(month)
        .and_then(parse)
        .or_else(|| parse(month.trim()))
        .map(|date| DateOutcome::Normalized(date.format(OUTPUT_FORMAT).to_string()))
        .unwrap_or(DateOutcome::FormatError)
}

/// Normalize `<day>[sep]<month>[sep]<year>`.
///
/// Two-digit years are read as `20YY`.
pub fn normalize_short_date(day: &str, month: &str, year: &str) -> DateOutcome {
    let year = year.trim();
    let year = if year.len() == 2 {
        format!("20{year}")
    } else {
        year.to_string()
    };

    let (Ok(day), Ok(month), Ok(year)) = (
        day.trim().parse::<u32>(),
        month.trim().parse::<u32>(),
        year.parse::<i32>(),
    ) else {
        return DateOutcome::FormatError;
    };

    NaiveDate::from_ymd_opt(year, month, day)
        .map(|date| DateOutcome::Normalized(date.format(OUTPUT_FORMAT).to_string()))
        .unwrap_or(DateOutcome::FormatError)
}

/// Find and normalize a date anywhere in `text`, long form first.
pub fn normalize_date_text(text: &str) -> DateOutcome {
    if let Some(caps) = LONG_DATE.captures(text) {
        return normalize_long_date(&caps[1], &caps[2], &caps[3]);
    }
    if let Some(caps) = SHORT_DATE.captures(text) {
        return normalize_short_date(&caps[1], &caps[2], &caps[3]);
    }
    DateOutcome::NotFound
}

/// Normalize a rule match. Tagged matches use their capture groups;
/// untagged matches are scanned for either shape.
pub fn normalize_match(m: &FieldMatch) -> DateOutcome {
    let group = |i: usize| m.groups.get(i).and_then(|g| g.as_deref());

    match m.format {
        Some(format) => match (group(0), group(1), group(2)) {
            (Some(day), Some(month), Some(year)) => match format {
                DateFormat::Long => normalize_long_date(day, month, year),
                DateFormat::Short => normalize_short_date(day, month, year),
            },
            _ => DateOutcome::FormatError,
        },
        None => match normalize_date_text(&m.value) {
            DateOutcome::NotFound => DateOutcome::FormatError,
            outcome => outcome,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_form() {
        assert_eq!(
            normalize_date_text("14 de Agosto del 2025"),
            DateOutcome::Normalized("14-08-25".to_string())
        );
        assert_eq!(
            normalize_date_text("Fecha Emision: 3 de diciembre de 2024"),
            DateOutcome::Normalized("03-12-24".to_string())
        );
    }

    #[test]
    fn test_short_form() {
        assert_eq!(
            normalize_date_text("10-2-20"),
            DateOutcome::Normalized("10-02-20".to_string())
        );
        assert_eq!(
            normalize_date_text("05/11/2023"),
            DateOutcome::Normalized("05-11-23".to_string())
        );
        assert_eq!(
            normalize_date_text("7 3 21"),
            DateOutcome::Normalized("07-03-21".to_string())
        );
    }

    #[test]
    fn test_invalid_day_is_format_error() {
        assert_eq!(normalize_date_text("32 de Enero de 2020"), DateOutcome::FormatError);
        assert_eq!(normalize_date_text("30-2-20"), DateOutcome::FormatError);
        assert_eq!(normalize_date_text("29-2-21"), DateOutcome::FormatError);
        assert_eq!(
            normalize_date_text("29-2-24"),
            DateOutcome::Normalized("29-02-24".to_string())
        );
    }

    #[test]
    fn test_unknown_month_is_format_error() {
        assert_eq!(normalize_date_text("14 de Agostoo del 2025"), DateOutcome::FormatError);
    }

    #[test]
    fn test_untranslated_fallback() {
        assert_eq!(
            normalize_long_date("14", "August", "2025"),
            DateOutcome::Normalized("14-08-25".to_string())
        );
    }

    #[test]
    fn test_not_found_is_distinct_from_format_error() {
        let missing = normalize_date_text("sin fecha");
        assert_eq!(missing, DateOutcome::NotFound);
        assert_eq!(missing.as_str(), NOT_FOUND);
        assert_eq!(DateOutcome::FormatError.as_str(), DATE_FORMAT_ERROR);
        assert_ne!(missing.as_str(), DateOutcome::FormatError.as_str());
    }

    #[test]
    fn test_translate_month() {
        assert_eq!(translate_month("Agosto"), Some("August"));
        assert_eq!(translate_month("SEPTIEMBRE"), Some("September"));
        assert_eq!(translate_month("Setiembre"), None);
    }

    #[test]
    fn test_tagged_match_with_missing_group() {
        let m = FieldMatch {
            value: "14".to_string(),
            groups: vec![Some("14".to_string()), None, Some("2025".to_string())],
            raw: "14 de  del 2025".to_string(),
            rule: 0,
            format: Some(DateFormat::Long),
        };
        assert_eq!(normalize_match(&m), DateOutcome::FormatError);
    }

    #[test]
    fn test_untagged_match_is_scanned() {
        let m = FieldMatch {
            value: "Emitida el 1/3/2024".to_string(),
            groups: vec![Some("Emitida el 1/3/2024".to_string())],
            raw: "Fecha: Emitida el 1/3/2024".to_string(),
            rule: 0,
            format: None,
        };
        assert_eq!(normalize_match(&m), DateOutcome::Normalized("01-03-24".to_string()));

        let m = FieldMatch {
            value: "pronto".to_string(),
            groups: vec![],
            raw: "pronto".to_string(),
            rule: 0,
            format: None,
        };
        assert_eq!(normalize_match(&m), DateOutcome::FormatError);
    }
}
