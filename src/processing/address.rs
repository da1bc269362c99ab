//! Aadhaar address assembly: label-anchored collection first, then a
//! backward scan from the PIN line, followed by OCR garbage cleanup.

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

use crate::processing::strategy::{
    char_len, first_match, lines_after, lines_before, split_trimmed, Strategy,
};

/// Lines collected after an address label.
const ADDRESS_LABEL_WINDOW: usize = 7;
/// Lines scanned backwards from a PIN line.
const ADDRESS_LOOKBACK: usize = 6;

// Word boundaries are ASCII-only so Devanagari glued to Latin or digits still splits.
lazy_static! {
    static ref ADDRESS_LABEL: Regex = Regex::new(r"(?i)(?:gar:\s*)?(?:Address|पता)[:\s]*$").unwrap();
    static ref ADDRESS_INLINE: Regex = Regex::new(r"(?i)^(?:Address|पता)[:\s]+(.+)$").unwrap();
    static ref STARTS_WITH_SO: Regex = Regex::new(r"(?i)^S/O").unwrap();
    static ref RELATION_LINE: Regex = Regex::new(r"(?i)^(?:S/O|D/O|C/O)[:\s]").unwrap();
    static ref BARE_PIN: Regex = Regex::new(r"^[0-9]{6}$").unwrap();
    static ref NEXT_FIELD: Regex = Regex::new(r"(?i)^(?:PIN|State|Help|VID)").unwrap();
    static ref PIN_IN_LINE: Regex = Regex::new(r"(?-u:\b)[0-9]{6}(?-u:\b)").unwrap();
    static ref NOT_ADDRESS: Regex = Regex::new(
        r"(?i)government|india|uidai|aadhar|dob|birth|male|female|year|^address"
    ).unwrap();

    static ref LEADING_SYMBOLS: Regex = Regex::new(r"^[^a-zA-Z0-9\s]{3,}").unwrap();
    static ref OCR_SYMBOL_MIX: Regex = Regex::new(r"[=][A-Z]|[0-9]%[A-Z]|[A-Z]{2}\)").unwrap();
    static ref SCRIPT_WITH_PUNCTUATION: Regex = Regex::new(r"[^\x00-\x7F]{3,}.*[,\s-]{3,}").unwrap();
    static ref SHORT_WORD_RUN: Regex =
        Regex::new(r"(?i)(?-u:\b)[a-z]{2,4}\s[a-z]{2,4}\s[a-z]{2,4}(?-u:\b)").unwrap();
    static ref ADDRESS_MARKER: Regex = Regex::new(
        r"(?i)[0-9]+|ward|nagar|ganj|road|street|village|district|city|town"
    ).unwrap();

    static ref EMBEDDED_PIN: Regex = Regex::new(r",?\s*[0-9]{6}\s*[,\s]*").unwrap();
    static ref EMPTY_SEGMENT: Regex = Regex::new(r",\s*,").unwrap();
    static ref LEADING_WORD_GROUPS: Regex =
        Regex::new(r"(?i)^([a-z]{3,8}\s+[a-z]{3,8}\s+[a-z]{3,8}[,\s]+){1,2}").unwrap();
    static ref WORD_TRIPLE: Regex =
        Regex::new(r"(?i)(?-u:\b)[a-z]{2,4}\s+[a-z]{2,4}\s+[a-z]{2,4}(?-u:\b)[,\s]*").unwrap();
    static ref LEADING_SHORT_WORD: Regex = Regex::new(r"(?i)^[a-z]{2,4}\s+([a-z])").unwrap();
    static ref SHORT_WORD_BEFORE_CAPS: Regex = Regex::new(r"(?-u:\b)[a-z]{2,4}\s+([A-Z]{2,})").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref EDGE_SEPARATORS: Regex = Regex::new(r"^[,\s]+|[,\s]+$").unwrap();
}

/// Postal address from normalized Aadhaar text, or "" when none is found.
pub fn extract_address(text: &str) -> String {
    let lines = split_trimmed(text);
    first_match(
        "Address",
        &lines,
        &[
            Strategy::new("address label", after_address_label),
            Strategy::new("lines before pin", before_pin_line),
        ],
    )
}

/// OCR noise rather than address content.
pub fn is_garbage_line(line: &str) -> bool {
    if char_len(line) < 5 {
        return true;
    }
    if LEADING_SYMBOLS.is_match(line)
        || OCR_SYMBOL_MIX.is_match(line)
        || SCRIPT_WITH_PUNCTUATION.is_match(line)
    {
        return true;
    }
    SHORT_WORD_RUN.is_match(line) && !ADDRESS_MARKER.is_match(line)
}

fn after_address_label(lines: &[&str]) -> Option<String> {
    for (i, line) in lines.iter().enumerate() {
        if ADDRESS_LABEL.is_match(line) {
            let mut collected = Vec::new();
            for candidate in lines_after(lines, i, ADDRESS_LABEL_WINDOW) {
                if candidate.is_empty()
                    || BARE_PIN.is_match(candidate)
                    || NEXT_FIELD.is_match(candidate)
                {
                    break;
                }
                if RELATION_LINE.is_match(candidate) || is_garbage_line(candidate) {
                    trace!("Address: skipping {:?}", candidate);
                    continue;
                }
                let len = char_len(candidate);
                if len > 5 && len < 150 {
                    collected.push(*candidate);
                }
            }
            if !collected.is_empty() {
                return Some(assemble(&collected));
            }
        }

        if let Some(caps) = ADDRESS_INLINE.captures(line) {
            let rest = &caps[1];
            if char_len(rest) > 10 && !STARTS_WITH_SO.is_match(rest) {
                return Some(rest.to_string());
            }
        }
    }
    None
}

fn before_pin_line(lines: &[&str]) -> Option<String> {
    for (i, line) in lines.iter().enumerate() {
        if i <= 2 || !PIN_IN_LINE.is_match(line) {
            continue;
        }

        let mut collected = Vec::new();
        for candidate in lines_before(lines, i, ADDRESS_LOOKBACK) {
            if NOT_ADDRESS.is_match(candidate) {
                break;
            }
            if RELATION_LINE.is_match(candidate) || is_garbage_line(candidate) {
                trace!("Address: skipping {:?}", candidate);
                continue;
            }
            let len = char_len(candidate);
            if len > 10 && len < 150 {
                collected.push(candidate);
            }
        }
        if !collected.is_empty() {
            // Collected nearest first; restore reading order.
            collected.reverse();
            return Some(assemble(&collected));
        }
    }
    None
}

fn assemble(parts: &[&str]) -> String {
    let joined = parts.join(", ");
    let without_pin = EMBEDDED_PIN.replace_all(&joined, ", ");
    let without_pin = EMPTY_SEGMENT.replace_all(&without_pin, ", ");
    let trimmed = without_pin.trim();
    let trimmed = trimmed.strip_suffix(',').unwrap_or(trimmed);
    clean_garbage(trimmed)
}

fn clean_garbage(address: &str) -> String {
    let cleaned = LEADING_WORD_GROUPS.replace(address, "");
    let cleaned = WORD_TRIPLE.replace_all(&cleaned, " ");
    let cleaned = LEADING_SHORT_WORD.replace(&cleaned, "$1");
    let cleaned = SHORT_WORD_BEFORE_CAPS.replace_all(&cleaned, "$1");
    let cleaned = WHITESPACE.replace_all(&cleaned, " ");
    let cleaned = EMPTY_SEGMENT.replace_all(&cleaned, ",");
    EDGE_SEPARATORS.replace_all(cleaned.trim(), "").to_string()
}
