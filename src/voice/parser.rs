//! Transcript-to-value parsing.
//!
//! Converts a free-text voice transcript into a typed [`SlotValue`] for a
//! declared field type. Pure functions, no side effects, never panic on any
//! input. Unparseable input degrades to a tagged outcome rather than an
//! error: the orchestrator decides what to do with ambiguity.

use chrono::{Duration, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;

use crate::form::{FieldType, SlotValue};

/// Result of parsing one transcript against one field type.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// Clean match for the declared type.
    Parsed(SlotValue),
    /// Nothing matched cleanly; `best` is the documented fallback guess
    /// (e.g. the first dropdown option) and `raw` the trimmed transcript.
    Ambiguous { best: SlotValue, raw: String },
    /// No value could be produced at all.
    Unparsed(String),
}

impl ParseOutcome {
    /// The value to store, if any. `Ambiguous` yields its best guess.
    pub fn value(&self) -> Option<&SlotValue> {
        match self {
            ParseOutcome::Parsed(v) => Some(v),
            ParseOutcome::Ambiguous { best, .. } => Some(best),
            ParseOutcome::Unparsed(_) => None,
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, ParseOutcome::Ambiguous { .. })
    }
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\w.-]+@[\w.-]+\.\w+").unwrap())
}

fn number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+(\.\d+)?").unwrap())
}

fn date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(\d{1,2})[/-](\d{1,2})[/-](\d{4})\b").unwrap())
}

/// Unit synonyms spoken transcripts commonly contain. Maps lowercase spoken
/// form to the canonical dropdown label.
const UNIT_SYNONYMS: &[(&str, &str)] = &[
    ("kilogram", "kg"),
    ("kilograms", "kg"),
    ("kilo", "kg"),
    ("kilos", "kg"),
    ("tonne", "ton"),
    ("tonnes", "ton"),
    ("tons", "ton"),
    ("sack", "bag"),
    ("sacks", "bag"),
    ("quintals", "quintal"),
];

/// Parse `text` as a value for a field of type `field_type`.
///
/// `options` is the declared option list for dropdown fields (ignored for
/// other types). `today` anchors relative date words; production callers pass
/// the current local date.
pub fn parse_voice_input(
    text: &str,
    field_type: FieldType,
    options: &[String],
    today: NaiveDate,
) -> ParseOutcome {
    let trimmed = text.trim();

    match field_type {
        FieldType::Text | FieldType::Textarea => {
            ParseOutcome::Parsed(SlotValue::Text(trimmed.to_string()))
        }
        FieldType::Email => parse_email(trimmed),
        FieldType::Phone => parse_phone(trimmed),
        FieldType::Number => parse_number(trimmed),
        FieldType::Date => parse_date(trimmed, today),
        FieldType::Dropdown => parse_dropdown(trimmed, options),
        FieldType::Image => {
            let lower = trimmed.to_lowercase();
            let wants = lower.contains("yes") || lower.contains("add") || lower.contains("upload");
            ParseOutcome::Parsed(SlotValue::Flag(wants))
        }
    }
}

fn parse_email(trimmed: &str) -> ParseOutcome {
    match email_re().find(trimmed) {
        Some(m) => ParseOutcome::Parsed(SlotValue::Text(m.as_str().to_string())),
        None => ParseOutcome::Ambiguous {
            best: SlotValue::Text(trimmed.to_string()),
            raw: trimmed.to_string(),
        },
    }
}

fn parse_phone(trimmed: &str) -> ParseOutcome {
    // No length validation at this layer; the form owner validates on save.
    let digits: String = trimmed.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        ParseOutcome::Unparsed(trimmed.to_string())
    } else {
        ParseOutcome::Parsed(SlotValue::Text(digits))
    }
}

fn parse_number(trimmed: &str) -> ParseOutcome {
    match number_re().find(trimmed) {
        Some(m) => match m.as_str().parse::<f64>() {
            Ok(n) => ParseOutcome::Parsed(SlotValue::Number(n)),
            Err(_) => ParseOutcome::Unparsed(trimmed.to_string()),
        },
        None => ParseOutcome::Unparsed(trimmed.to_string()),
    }
}

fn parse_date(trimmed: &str, today: NaiveDate) -> ParseOutcome {
    let lower = trimmed.to_lowercase();

    let relative = if lower.contains("today") {
        Some(today)
    } else if lower.contains("yesterday") {
        Some(today - Duration::days(1))
    } else if lower.contains("tomorrow") {
        Some(today + Duration::days(1))
    } else {
        None
    };
    if let Some(date) = relative {
        return ParseOutcome::Parsed(SlotValue::Date(date.format("%Y-%m-%d").to_string()));
    }

    // DD/MM/YYYY or DD-MM-YYYY, reformatted to YYYY-MM-DD.
    if let Some(caps) = date_re().captures(trimmed) {
        let (day, month, year) = (&caps[1], &caps[2], &caps[3]);
        if let (Ok(d), Ok(m), Ok(y)) = (
            day.parse::<u32>(),
            month.parse::<u32>(),
            year.parse::<i32>(),
        ) {
            if NaiveDate::from_ymd_opt(y, m, d).is_some() {
                return ParseOutcome::Parsed(SlotValue::Date(format!(
                    "{:04}-{:02}-{:02}",
                    y, m, d
                )));
            }
        }
    }

    ParseOutcome::Unparsed(trimmed.to_string())
}

fn parse_dropdown(trimmed: &str, options: &[String]) -> ParseOutcome {
    if options.is_empty() {
        return ParseOutcome::Unparsed(trimmed.to_string());
    }
    let lower = trimmed.to_lowercase();

    // Case-insensitive exact match.
    if let Some(opt) = options.iter().find(|o| o.to_lowercase() == lower) {
        return ParseOutcome::Parsed(SlotValue::Choice(opt.clone()));
    }

    // Substring match either direction.
    if let Some(opt) = options.iter().find(|o| {
        let ol = o.to_lowercase();
        lower.contains(&ol) || ol.contains(&lower)
    }) {
        return ParseOutcome::Parsed(SlotValue::Choice(opt.clone()));
    }

    // Spoken-form synonyms ("kilogram" → "kg").
    for (spoken, canonical) in UNIT_SYNONYMS {
        if lower.contains(spoken) {
            if let Some(opt) = options.iter().find(|o| o.eq_ignore_ascii_case(canonical)) {
                return ParseOutcome::Parsed(SlotValue::Choice(opt.clone()));
            }
        }
    }

    // Documented fallback: first option, flagged as a guess.
    ParseOutcome::Ambiguous {
        best: SlotValue::Choice(options[0].clone()),
        raw: trimmed.to_string(),
    }
}
