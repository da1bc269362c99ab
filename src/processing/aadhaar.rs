//! Field extractors for Aadhaar cards (old and new layouts).

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::processing::address::extract_address;
use crate::processing::strategy::{
    char_len, first_match, lines_after, next_line, scan_lines, split_lines, split_trimmed,
    window, LineStrategy, Strategy,
};

/// Lines searched after an Aadhaar/UIDAI keyword line (the keyword line included).
const AADHAAR_KEYWORD_LOOKAHEAD: usize = 2;
/// Lines checked after a date of birth label.
const DOB_LABEL_LOOKAHEAD: usize = 1;
/// Lines checked after a sex/gender label.
const GENDER_LABEL_LOOKAHEAD: usize = 1;
/// Lines searched for a PIN after an address keyword.
const PIN_ADDRESS_LOOKAHEAD: usize = 4;

const INDIAN_STATES: [&str; 33] = [
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
    "Delhi",
    "Jammu and Kashmir",
    "Ladakh",
    "Puducherry",
    "Chandigarh",
];

lazy_static! {
    static ref GROUPED_NUMBER: Regex = Regex::new(r"[0-9]{4}\s+[0-9]{4}\s+[0-9]{4}").unwrap();
    static ref CONSECUTIVE_NUMBER: Regex = Regex::new(r"[0-9]{12}").unwrap();
    static ref ANY_NUMBER: Regex =
        Regex::new(r"([0-9]{4}\s+[0-9]{4}\s+[0-9]{4})|([0-9]{12})").unwrap();
    static ref AADHAAR_KEYWORD: Regex = Regex::new(r"(?i)aadhaar|aadhar|uidai|uid").unwrap();

    static ref HEADER_LINE: Regex = Regex::new(
        r"(?i)government|india|uidai|भारत|आधार|aadhar|aadhaar|unique|identification|authority"
    ).unwrap();
    static ref CAPS_NAME: Regex = Regex::new(r"^[A-Z][A-Z\s]{2,40}$").unwrap();
    static ref NAME_FOLLOWER: Regex = Regex::new(r"(?i)male|female|dob|birth|year").unwrap();
    static ref SLASH_DATE: Regex = Regex::new(r"[0-9]{2}/[0-9]{2}/[0-9]{4}").unwrap();

    static ref RELATION_LABEL: Regex = Regex::new(r"(?i)(?:S/O|D/O|C/O)[:\s]+(.+?)(?:,|$)").unwrap();
    static ref HONORIFIC: Regex = Regex::new(r"(?i)(?:Sri|Shri)\s+([A-Z][A-Za-z\s]{5,50})").unwrap();
    static ref DASH_BETWEEN_COMMAS: Regex = Regex::new(r",\s*-\s*,").unwrap();
    static ref DASHES: Regex = Regex::new(r"-+").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref AFTER_COMMA: Regex = Regex::new(r",.*$").unwrap();
    static ref FATHER_KEYWORD: Regex = Regex::new(r"(?i)father|पिता").unwrap();
    static ref FATHER_NAME_LINE: Regex = Regex::new(r"^[A-Z][A-Z\s]{5,40}$").unwrap();

    static ref DOB_WITH_DATE: Regex = Regex::new(
        r"(?i)(?:DOB|Date\s+of\s+Birth|जन्म.*?तिथि|Birth)[:\s]*([0-9]{2}[/\-][0-9]{2}[/\-][0-9]{4})"
    ).unwrap();
    static ref YEAR_OF_BIRTH: Regex = Regex::new(r"(?i)(?:Year\s+of\s+Birth|YOB)[:\s]*([0-9]{4})").unwrap();
    static ref DOB_LABEL: Regex = Regex::new(r"(?i)DOB|Date\s+of\s+Birth|जन्म|Birth").unwrap();
    static ref DATE: Regex = Regex::new(r"[0-9]{2}[/\-][0-9]{2}[/\-][0-9]{4}").unwrap();
    static ref BARE_YEAR: Regex = Regex::new(r"^([0-9]{4})$").unwrap();
    static ref NOT_A_BIRTH_DATE: Regex = Regex::new(r"(?i)aadhaar|male|female|address|pin").unwrap();

    static ref GENDER_LABEL: Regex = Regex::new(r"(?i)SEX|GENDER|लिंग").unwrap();
    // ASCII word boundaries: a Hindi label run into the value still splits.
    static ref MALE_WORD: Regex = Regex::new(r"(?-u:\b)MALE(?-u:\b)").unwrap();
    static ref FEMALE_WORD: Regex = Regex::new(r"(?-u:\b)FEMALE(?-u:\b)").unwrap();

    static ref PIN_WITH_LABEL: Regex = Regex::new(r"(?i)(?:PIN|Pincode|Pin\s*Code)[:\s]*([0-9]{6})").unwrap();
    static ref GROUPED_PREFIX: Regex = Regex::new(r"[0-9]{4}\s+[0-9]{4}").unwrap();
    static ref AADHAAR_WORD: Regex = Regex::new(r"(?i)aadhaar|aadhar").unwrap();
    static ref STANDALONE_PIN: Regex = Regex::new(r"(?-u:\b)([0-9]{6})(?-u:\b)").unwrap();
    static ref SIX_DIGITS: Regex = Regex::new(r"[0-9]{6}").unwrap();
    static ref ADDRESS_KEYWORD: Regex = Regex::new(r"(?i)address|पता").unwrap();
}

/// Extractors for the fields printed on an Aadhaar card. Every function takes
/// normalized OCR text and returns "" when the field is not found.
pub struct AadhaarExtractor;

impl AadhaarExtractor {
    /// 12 digit Aadhaar number, always returned as `XXXX XXXX XXXX`.
    pub fn extract_aadhaar_number(text: &str) -> String {
        let lines = split_lines(text);
        first_match(
            "Aadhaar number",
            &lines,
            &[
                Strategy::new("grouped digits", grouped_number),
                Strategy::new("consecutive digits", consecutive_number),
                Strategy::new("digits near keyword", number_near_keyword),
            ],
        )
    }

    /// Card holder name: an all-caps line corroborated by the line after it.
    pub fn extract_name(text: &str) -> String {
        let lines = split_trimmed(text);
        first_match(
            "Name",
            &lines,
            &[Strategy::new("corroborated caps line", corroborated_caps_name)],
        )
    }

    /// Father's name from S/O, D/O, C/O or Sri/Shri mentions; the longest
    /// cleaned candidate wins.
    pub fn extract_father_name(text: &str) -> String {
        let lines = split_trimmed(text);
        first_match(
            "Father name",
            &lines,
            &[
                Strategy::new("longest relation mention", longest_relation_mention),
                Strategy::new("line after father keyword", line_after_father_keyword),
            ],
        )
    }

    /// Date of birth as printed, or a bare year of birth.
    pub fn extract_dob(text: &str) -> String {
        let lines = split_lines(text);
        first_match(
            "Date of birth",
            &lines,
            &[
                Strategy::new("labelled date", labelled_birth_date),
                Strategy::new("standalone date", standalone_birth_date),
            ],
        )
    }

    /// "Male" or "Female".
    pub fn extract_gender(text: &str) -> String {
        let lines = split_lines(text);
        first_match(
            "Gender",
            &lines,
            &[Strategy::new("gender lines", gender_lines)],
        )
    }

    pub fn extract_address(text: &str) -> String {
        extract_address(text)
    }

    /// Six digit postal PIN code.
    pub fn extract_pin(text: &str) -> String {
        let lines = split_lines(text);
        first_match(
            "PIN code",
            &lines,
            &[
                Strategy::new("labelled pin", labelled_pin),
                Strategy::new("standalone six digits", standalone_pin),
                Strategy::new("six digits near address", pin_near_address),
            ],
        )
    }

    /// First state or union territory of the fixed list found in the text.
    pub fn extract_state(text: &str) -> String {
        let upper = text.to_uppercase();
        match INDIAN_STATES
            .iter()
            .find(|state| upper.contains(&state.to_uppercase()))
        {
            Some(state) => {
                debug!("State: found {}", state);
                state.to_string()
            }
            None => String::new(),
        }
    }
}

fn group_digits(digits: &str) -> String {
    format!("{} {} {}", &digits[0..4], &digits[4..8], &digits[8..12])
}

fn canonical_grouping(grouped: &str) -> String {
    grouped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn grouped_number(lines: &[&str]) -> Option<String> {
    lines
        .iter()
        .find_map(|line| GROUPED_NUMBER.find(line))
        .map(|m| canonical_grouping(m.as_str()))
}

fn consecutive_number(lines: &[&str]) -> Option<String> {
    lines
        .iter()
        .find_map(|line| CONSECUTIVE_NUMBER.find(line))
        .map(|m| group_digits(m.as_str()))
}

fn number_near_keyword(lines: &[&str]) -> Option<String> {
    for (i, line) in lines.iter().enumerate() {
        if !AADHAAR_KEYWORD.is_match(line) {
            continue;
        }
        for candidate in window(lines, i, AADHAAR_KEYWORD_LOOKAHEAD) {
            if let Some(caps) = ANY_NUMBER.captures(candidate) {
                if let Some(grouped) = caps.get(1) {
                    return Some(canonical_grouping(grouped.as_str()));
                }
                if let Some(plain) = caps.get(2) {
                    return Some(group_digits(plain.as_str()));
                }
            }
        }
    }
    None
}

fn corroborated_caps_name(lines: &[&str]) -> Option<String> {
    for (i, line) in lines.iter().enumerate() {
        if char_len(line) < 3 || HEADER_LINE.is_match(line) {
            continue;
        }
        if !CAPS_NAME.is_match(line) {
            continue;
        }

        let next = next_line(lines, i);
        if CAPS_NAME.is_match(next) && !next.chars().any(|c| c.is_ascii_digit()) {
            return Some(line.to_string());
        }
        if i + 1 < lines.len() && (NAME_FOLLOWER.is_match(next) || SLASH_DATE.is_match(next)) {
            return Some(line.to_string());
        }
    }
    None
}

fn clean_relation_name(raw: &str) -> String {
    let cleaned = DASH_BETWEEN_COMMAS.replace_all(raw, "");
    let cleaned = DASHES.replace_all(&cleaned, "");
    WHITESPACE.replace_all(&cleaned, " ").trim().to_string()
}

fn longest_relation_mention(lines: &[&str]) -> Option<String> {
    let mut candidates: Vec<String> = Vec::new();

    for line in lines {
        if let Some(caps) = RELATION_LABEL.captures(line) {
            let cleaned = clean_relation_name(caps[1].trim());
            debug!("Father name: relation candidate {:?}", cleaned);
            if char_len(&cleaned) > 3 {
                candidates.push(cleaned);
            }
        }

        if let Some(caps) = HONORIFIC.captures(line) {
            let cleaned = AFTER_COMMA.replace(caps[1].trim(), "").trim().to_string();
            debug!("Father name: honorific candidate {:?}", cleaned);
            if char_len(&cleaned) > 5 && cleaned.split_whitespace().count() >= 2 {
                candidates.push(cleaned);
            }
        }
    }

    // Longest wins; the earliest candidate keeps ties.
    candidates.into_iter().fold(None, |best, candidate| match best {
        Some(best) if char_len(&best) >= char_len(&candidate) => Some(best),
        _ => Some(candidate),
    })
}

fn line_after_father_keyword(lines: &[&str]) -> Option<String> {
    lines.iter().enumerate().find_map(|(i, line)| {
        let next = next_line(lines, i);
        if FATHER_KEYWORD.is_match(line) && FATHER_NAME_LINE.is_match(next) {
            Some(next.to_string())
        } else {
            None
        }
    })
}

fn labelled_birth_date(lines: &[&str]) -> Option<String> {
    scan_lines(
        "Date of birth",
        lines,
        &[
            LineStrategy::new("label and date", dob_label_and_date),
            LineStrategy::new("year of birth", year_of_birth),
            LineStrategy::new("label then nearby date", dob_label_then_nearby),
        ],
    )
}

fn dob_label_and_date(lines: &[&str], i: usize) -> Option<String> {
    DOB_WITH_DATE.captures(lines[i]).map(|caps| caps[1].to_string())
}

fn year_of_birth(lines: &[&str], i: usize) -> Option<String> {
    YEAR_OF_BIRTH.captures(lines[i]).map(|caps| caps[1].to_string())
}

fn dob_label_then_nearby(lines: &[&str], i: usize) -> Option<String> {
    if !DOB_LABEL.is_match(lines[i]) {
        return None;
    }
    if let Some(date) = DATE.find(lines[i]) {
        return Some(date.as_str().to_string());
    }
    for next in lines_after(lines, i, DOB_LABEL_LOOKAHEAD) {
        if let Some(date) = DATE.find(next) {
            return Some(date.as_str().to_string());
        }
        if let Some(caps) = BARE_YEAR.captures(next) {
            return Some(caps[1].to_string());
        }
    }
    None
}

// Lines mentioning the Aadhaar number, gender, address or PIN carry other digits.
fn standalone_birth_date(lines: &[&str]) -> Option<String> {
    lines
        .iter()
        .filter(|line| !NOT_A_BIRTH_DATE.is_match(line))
        .find_map(|line| DATE.find(line))
        .map(|m| m.as_str().to_string())
}

fn gender_lines(lines: &[&str]) -> Option<String> {
    scan_lines(
        "Gender",
        lines,
        &[
            LineStrategy::new("gender label", gender_near_label),
            LineStrategy::new("standalone gender", standalone_gender),
        ],
    )
}

fn gender_near_label(lines: &[&str], i: usize) -> Option<String> {
    let line = lines[i].trim().to_uppercase();
    if !GENDER_LABEL.is_match(&line) {
        return None;
    }

    // FEMALE contains MALE, so it is always checked first.
    if line.contains("FEMALE") {
        return Some("Female".to_string());
    }
    if line.contains(" M") || line.contains("M ") || line.contains("/M") || line.ends_with('M') {
        return Some("Male".to_string());
    }
    if line.contains(" F") || line.contains("F ") || line.contains("/F") || line.ends_with('F') {
        return Some("Female".to_string());
    }

    for next in lines_after(lines, i, GENDER_LABEL_LOOKAHEAD) {
        let next = next.trim().to_uppercase();
        if next == "F" || next.contains("FEMALE") {
            return Some("Female".to_string());
        }
        if next == "M" || next.contains("MALE") {
            return Some("Male".to_string());
        }
    }
    None
}

fn standalone_gender(lines: &[&str], i: usize) -> Option<String> {
    let line = lines[i].trim().to_uppercase();
    if line == "FEMALE" || line == "F" || FEMALE_WORD.is_match(&line) {
        return Some("Female".to_string());
    }
    if line == "MALE" || line == "M" || MALE_WORD.is_match(&line) {
        return Some("Male".to_string());
    }
    None
}

fn labelled_pin(lines: &[&str]) -> Option<String> {
    lines
        .iter()
        .find_map(|line| PIN_WITH_LABEL.captures(line))
        .map(|caps| caps[1].to_string())
}

fn standalone_pin(lines: &[&str]) -> Option<String> {
    lines
        .iter()
        .filter(|line| !GROUPED_PREFIX.is_match(line) && !AADHAAR_WORD.is_match(line))
        .find_map(|line| STANDALONE_PIN.captures(line))
        .map(|caps| caps[1].to_string())
}

fn pin_near_address(lines: &[&str]) -> Option<String> {
    for (i, line) in lines.iter().enumerate() {
        if !ADDRESS_KEYWORD.is_match(line) {
            continue;
        }
        for candidate in lines_after(lines, i, PIN_ADDRESS_LOOKAHEAD) {
            if GROUPED_PREFIX.is_match(candidate) {
                continue;
            }
            if let Some(pin) = SIX_DIGITS.find(candidate) {
                return Some(pin.as_str().to_string());
            }
        }
    }
    None
}
