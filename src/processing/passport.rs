//! Free-text field extractors for the passport data page.
//!
//! These are the fallbacks behind the MRZ. Label patterns carry the OCR
//! misreadings seen on real scans ("Oule of Brih", "Geven nares", ...).

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::processing::dates::standardize_date;
use crate::processing::strategy::{
    char_len, first_match, lines_after, next_line, scan_lines, split_lines, split_trimmed,
    window, LineStrategy, Strategy,
};

/// Lines searched after a date or sex label (the label line included).
const LABEL_LOOKAHEAD: usize = 2;

/// The three printed dates of the data page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Birth,
    Issue,
    Expiry,
}

impl DateField {
    fn label(&self) -> &'static Regex {
        match self {
            DateField::Birth => &BIRTH_LABEL,
            DateField::Issue => &ISSUE_LABEL,
            DateField::Expiry => &EXPIRY_LABEL,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            DateField::Birth => "Date of birth",
            DateField::Issue => "Date of issue",
            DateField::Expiry => "Date of expiry",
        }
    }
}

lazy_static! {
    static ref SURNAME_LABEL: Regex =
        Regex::new(r"(?i)(?:Surname|Sur\s*name|Serna|Family\s*name|Nom)[:\s/]*").unwrap();
    static ref GIVEN_NAMES_LABEL: Regex =
        Regex::new(r"(?i)(?:Given\s+names?|Geven\s+nares|First\s+name|Frome)[:\s/]*").unwrap();
    static ref CAPS_WORDS: Regex = Regex::new(r"^[A-Z\s]{2,}$").unwrap();

    static ref PASSPORT_NUMBER_LABELLED: Regex = Regex::new(
        r"(?i)(?:Passport\s+No\.?|Document\s+No\.?|Passepart\s+Ng)[:\s/]*([A-Z0-9]{6,10})"
    ).unwrap();
    static ref PASSPORT_NUMBER_SHAPE: Regex =
        Regex::new(r"^([A-Z][0-9]{7}|[A-Z]{2}[0-9]{6,8}|[0-9]{8,9})$").unwrap();

    static ref NATIONALITY_LABEL: Regex =
        Regex::new(r"(?i)(?:Nationality|Nabonakty|Nations?|Naan|Country)[:\s/]*").unwrap();
    static ref NATIONALITY_KEYWORD: Regex = Regex::new(r"(?i)CITIZEN|NATIONAL").unwrap();
    static ref NATIONALITY_CAPS: Regex = Regex::new(r"^[A-Z\s]{3,30}$").unwrap();
    static ref KNOWN_NATIONALITY: Regex =
        Regex::new(r"(?i)^(BRITISH\s+CITIZEN|INDIAN|AMERICAN|CANADIAN|AUSTRALIAN)$").unwrap();
    static ref CITIZEN_OF: Regex = Regex::new(r"(?i)^([A-Z]{3,20}\s+CITIZEN)$").unwrap();
    static ref ANY_KNOWN_NATIONALITY: Regex = Regex::new(
        r"(?i)^(BRITISH\s+CITIZEN|INDIAN|AMERICAN|CANADIAN|AUSTRALIAN|FRENCH|GERMAN|ITALIAN|SPANISH|PORTUGUESE)$"
    ).unwrap();

    static ref BIRTH_LABEL: Regex =
        Regex::new(r"(?i)(?:Date\s+of\s+(?:birth|Brih|BrihvDate)|DOB|Oule\s+of\s+Brih)").unwrap();
    static ref ISSUE_LABEL: Regex =
        Regex::new(r"(?i)(?:Date\s+of\s+(?:issue|sues|dedvrance)|Dute\s+of\s+sue)").unwrap();
    static ref EXPIRY_LABEL: Regex = Regex::new(
        r"(?i)(?:Date\s+of\s+(?:expiry|coping|expivation|opin)|Valid\s+until|Dute\s+of\s+opin)"
    ).unwrap();
    static ref DATE_PATTERNS: Vec<Regex> = vec![
        Regex::new(
            r"(?i)([0-9]{1,2}\s+(?:JAN|FEB|MAR|APR|MAY|JUN|JUL|AUG|SEP|OCT|NOV|DEC)(?:\s*/\s*[A-Z]{3})?\s+[0-9]{2,4})"
        ).unwrap(),
        Regex::new(r"([0-9]{2}[/\-][0-9]{2}[/\-][0-9]{4})").unwrap(),
        Regex::new(r"([0-9]{2}-[0-9]{2}-[0-9]{4})").unwrap(),
    ];

    static ref SEX_LABEL: Regex = Regex::new(r"(?i)(?:Sex|Gender|Sen/Sene|Sen/Sear)").unwrap();
    static ref LEADING_M: Regex = Regex::new(r"^M\s").unwrap();
    static ref TRAILING_M: Regex = Regex::new(r"\sM$").unwrap();
    static ref LEADING_F: Regex = Regex::new(r"^F\s").unwrap();
    static ref TRAILING_F: Regex = Regex::new(r"\sF$").unwrap();

    static ref BIRTHPLACE_LABEL: Regex = Regex::new(
        r"(?i)(?:Place\s+of\s+birth|Pore\s+of\s+beth|Lioy\s+de\s+nadssance|Liew\s+de\s+nadtsacce)"
    ).unwrap();
    static ref GENDER_PREFIX: Regex = Regex::new(r"^[MF]\s+").unwrap();
    static ref PLACE_NAME: Regex = Regex::new(r"(?i)^[A-Z][A-Z\s,']{1,30}$").unwrap();
}

/// Everything the free-text heuristics found on one data page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassportTextFields {
    pub surname: String,
    pub given_names: String,
    pub passport_number: String,
    pub nationality: String,
    pub date_of_birth: String,
    pub date_of_issue: String,
    pub date_of_expiry: String,
    pub gender: String,
    pub place_of_birth: String,
}

impl PassportTextFields {
    pub fn extract(text: &str) -> Self {
        PassportTextFields {
            surname: PassportTextExtractor::extract_surname(text),
            given_names: PassportTextExtractor::extract_given_names(text),
            passport_number: PassportTextExtractor::extract_passport_number(text),
            nationality: PassportTextExtractor::extract_nationality(text),
            date_of_birth: PassportTextExtractor::extract_date(text, DateField::Birth),
            date_of_issue: PassportTextExtractor::extract_date(text, DateField::Issue),
            date_of_expiry: PassportTextExtractor::extract_date(text, DateField::Expiry),
            gender: PassportTextExtractor::extract_gender(text),
            place_of_birth: PassportTextExtractor::extract_place_of_birth(text),
        }
    }
}

/// Printed-text extractors for passports. Each returns "" when not found.
pub struct PassportTextExtractor;

impl PassportTextExtractor {
    pub fn extract_surname(text: &str) -> String {
        let lines = split_trimmed(text);
        first_match(
            "Surname",
            &lines,
            &[Strategy::new("caps line after label", |lines| {
                caps_line_after(lines, &SURNAME_LABEL)
            })],
        )
    }

    pub fn extract_given_names(text: &str) -> String {
        let lines = split_trimmed(text);
        first_match(
            "Given names",
            &lines,
            &[Strategy::new("caps line after label", |lines| {
                caps_line_after(lines, &GIVEN_NAMES_LABEL)
            })],
        )
    }

    pub fn extract_passport_number(text: &str) -> String {
        let lines = split_trimmed(text);
        first_match(
            "Passport number",
            &lines,
            &[Strategy::new("labelled or passport shaped", passport_number_lines)],
        )
    }

    /// Nationality as printed, e.g. "BRITISH CITIZEN" or "INDIAN".
    pub fn extract_nationality(text: &str) -> String {
        let lines = split_trimmed(text);
        first_match(
            "Nationality",
            &lines,
            &[
                Strategy::new("nationality lines", nationality_lines),
                Strategy::new("known nationality", known_nationality),
            ],
        )
    }

    /// A labelled date normalized to `DD/MM/YYYY`.
    pub fn extract_date(text: &str, field: DateField) -> String {
        let lines = split_lines(text);
        let label = field.label();

        for (i, line) in lines.iter().enumerate() {
            if !label.is_match(line) {
                continue;
            }
            for candidate in window(&lines, i, LABEL_LOOKAHEAD) {
                if let Some(date) = DATE_PATTERNS
                    .iter()
                    .find_map(|pattern| pattern.captures(candidate))
                {
                    let value = standardize_date(date[1].trim());
                    debug!("{}: found {:?}", field.name(), value);
                    return value;
                }
            }
        }
        debug!("{}: not found", field.name());
        String::new()
    }

    /// "Male" or "Female" near a sex label.
    pub fn extract_gender(text: &str) -> String {
        let lines = split_lines(text);
        first_match(
            "Gender",
            &lines,
            &[Strategy::new("near sex label", gender_near_label)],
        )
    }

    pub fn extract_place_of_birth(text: &str) -> String {
        let lines = split_lines(text);
        first_match(
            "Place of birth",
            &lines,
            &[Strategy::new("line after label", place_after_label)],
        )
    }
}

fn caps_line_after(lines: &[&str], label: &Regex) -> Option<String> {
    lines.iter().enumerate().find_map(|(i, line)| {
        if !label.is_match(line) {
            return None;
        }
        let next = next_line(lines, i);
        let len = char_len(next);
        if CAPS_WORDS.is_match(next) && len > 1 && len < 40 {
            Some(next.to_string())
        } else {
            None
        }
    })
}

fn passport_number_lines(lines: &[&str]) -> Option<String> {
    lines.iter().find_map(|line| {
        PASSPORT_NUMBER_LABELLED
            .captures(line)
            .or_else(|| PASSPORT_NUMBER_SHAPE.captures(line))
            .map(|caps| caps[1].trim().to_string())
    })
}

fn nationality_lines(lines: &[&str]) -> Option<String> {
    scan_lines(
        "Nationality",
        lines,
        &[
            LineStrategy::new("line after label", nationality_after_label),
            LineStrategy::new("common nationality", |lines, i| {
                KNOWN_NATIONALITY.captures(lines[i]).map(|c| c[1].trim().to_string())
            }),
            LineStrategy::new("citizen of", |lines, i| {
                CITIZEN_OF.captures(lines[i]).map(|c| c[1].trim().to_string())
            }),
        ],
    )
}

fn nationality_after_label(lines: &[&str], i: usize) -> Option<String> {
    if !NATIONALITY_LABEL.is_match(lines[i]) {
        return None;
    }
    let next = lines_after(lines, i, 1).first()?.trim();
    let len = char_len(next);

    if NATIONALITY_KEYWORD.is_match(next) || (NATIONALITY_CAPS.is_match(next) && len >= 3) {
        return Some(next.to_string());
    }
    if len > 0 && len < 30 {
        return Some(next.to_string());
    }
    None
}

fn known_nationality(lines: &[&str]) -> Option<String> {
    lines
        .iter()
        .find(|line| ANY_KNOWN_NATIONALITY.is_match(line))
        .map(|line| line.trim().to_string())
}

fn gender_near_label(lines: &[&str]) -> Option<String> {
    for (i, line) in lines.iter().enumerate() {
        if !SEX_LABEL.is_match(line.trim()) {
            continue;
        }
        for candidate in window(lines, i, LABEL_LOOKAHEAD) {
            let candidate = candidate.trim().to_uppercase();

            if candidate == "M" || LEADING_M.is_match(&candidate) || TRAILING_M.is_match(&candidate) {
                return Some("Male".to_string());
            }
            if candidate == "F" || LEADING_F.is_match(&candidate) || TRAILING_F.is_match(&candidate) {
                return Some("Female".to_string());
            }
            if candidate.contains("MALE") && !candidate.contains("FEMALE") {
                return Some("Male".to_string());
            }
            if candidate.contains("FEMALE") {
                return Some("Female".to_string());
            }
        }
    }
    None
}

fn place_after_label(lines: &[&str]) -> Option<String> {
    lines.iter().enumerate().find_map(|(i, line)| {
        if !BIRTHPLACE_LABEL.is_match(line.trim()) {
            return None;
        }
        let next = lines_after(lines, i, 1).first()?.trim();
        let place = GENDER_PREFIX.replace(next, "");
        if PLACE_NAME.is_match(&place) && char_len(&place) >= 2 {
            Some(place.into_owned())
        } else {
            None
        }
    })
}
