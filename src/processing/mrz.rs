//! TD3 (passport) machine readable zone detection and decoding, ICAO 9303.

use log::{debug, warn};

use crate::models::MrzData;
use crate::processing::dates::format_mrz_date;

/// Cleaned MRZ candidate length bounds (TD3 lines are 44 characters).
const MIN_LINE_LEN: usize = 40;
const MAX_LINE_LEN: usize = 50;
/// Line 2 shorter than this is not decoded at all.
const LINE2_MIN_LEN: usize = 44;

/// Digit recovery applied to every candidate line, in order. Lossy for real
/// letters; name and country segments undo the `0` and `1` cases.
const OCR_CONFUSIONS: [(char, char); 7] = [
    ('O', '0'),
    ('B', '8'),
    ('Z', '2'),
    ('S', '5'),
    ('I', '1'),
    ('L', '<'),
    ('|', '1'),
];

pub struct MrzDecoder;

impl MrzDecoder {
    /// Detect the MRZ in OCR text and decode the first two candidate lines.
    /// Fewer than two candidates gives an empty record.
    pub fn decode(text: &str) -> MrzData {
        let lines = Self::find_candidate_lines(text);
        debug!("Found {} MRZ candidate lines", lines.len());

        if lines.len() < 2 {
            warn!("Less than 2 MRZ lines found");
            return MrzData::default();
        }

        Self::decode_lines(&lines[0], &lines[1])
    }

    /// Lines that look like MRZ after whitespace removal and upper-casing,
    /// in their original order, with OCR confusions corrected.
    pub fn find_candidate_lines(text: &str) -> Vec<String> {
        text.split('\n')
            .filter_map(|line| {
                let cleaned = Self::clean_line(line);
                let len = cleaned.chars().count();
                if cleaned.contains("<<") && (MIN_LINE_LEN..=MAX_LINE_LEN).contains(&len) {
                    Some(Self::correct_line(&cleaned))
                } else {
                    None
                }
            })
            .collect()
    }

    /// Apply the fixed digit/letter substitution pass to a cleaned line.
    /// Whitespace removed and upper-cased.
    pub fn clean_line(line: &str) -> String {
        line.chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_uppercase()
    }

    pub fn correct_line(line: &str) -> String {
        line.chars()
            .map(|c| {
                OCR_CONFUSIONS
                    .iter()
                    .find(|(from, _)| *from == c)
                    .map(|(_, to)| *to)
                    .unwrap_or(c)
            })
            .collect()
    }

    /// Decode an explicit, already corrected line pair.
    pub fn decode_lines(line1: &str, line2: &str) -> MrzData {
        debug!("MRZ line 1 (normalized): {}", line1);
        debug!("MRZ line 2 (normalized): {}", line2);

        let mut data = MrzData::default();
        Self::decode_name_line(line1, &mut data);
        Self::decode_data_line(line2, &mut data);
        data
    }

    // Line 1: P<CCCSURNAME<<GIVEN<NAMES<<<...
    fn decode_name_line(line: &str, data: &mut MrzData) {
        if !(line.starts_with("P<") || line.starts_with("P0")) {
            debug!("MRZ line 1 does not start with a passport marker");
            return;
        }
        let chars: Vec<char> = line.chars().collect();

        data.document_type = Some("P".to_string());
        data.issuing_country = non_empty(
            segment(&chars, 2, 5)
                .replace('<', "")
                .replace('0', "O")
                .trim(),
        );

        let names = segment(&chars, 5, chars.len());
        let (surname, rest) = match names.split_once("<<") {
            Some((surname, rest)) => (surname, Some(rest)),
            None => (names.as_str(), None),
        };
        data.surname = non_empty(&clean_name(surname));
        data.given_names = rest
            .and_then(|rest| rest.split("<<").next())
            .and_then(|given| non_empty(&clean_name(given)));
    }

    // Line 2: NUMBER(9) CHECK NAT(3) DOB(6) CHECK SEX EXPIRY(6) CHECK ...
    fn decode_data_line(line: &str, data: &mut MrzData) {
        let chars: Vec<char> = line.chars().collect();
        if chars.len() < LINE2_MIN_LEN {
            debug!("MRZ line 2 too short ({} chars), skipping", chars.len());
            return;
        }

        data.passport_number = non_empty(segment(&chars, 0, 9).replace('<', "").trim());
        data.nationality = non_empty(
            segment(&chars, 10, 13)
                .replace('<', "")
                .replace('0', "O")
                .trim(),
        );

        let dob = segment(&chars, 13, 19);
        data.date_of_birth = format_mrz_date(&dob);
        if data.date_of_birth.is_none() {
            debug!("DOB {:?} does not match pattern, skipping", dob);
        }

        data.gender = match chars.get(20) {
            Some('M') => Some("Male".to_string()),
            Some('F') => Some("Female".to_string()),
            _ => None,
        };

        let doe = segment(&chars, 21, 27);
        data.date_of_expiry = format_mrz_date(&doe);
        if data.date_of_expiry.is_none() {
            debug!("DOE {:?} does not match pattern, skipping", doe);
        }
    }
}

fn segment(chars: &[char], start: usize, end: usize) -> String {
    let end = end.min(chars.len());
    let start = start.min(end);
    chars[start..end].iter().collect()
}

// Names are letters: undo the digit recovery for 0 and 1.
fn clean_name(raw: &str) -> String {
    raw.replace('<', " ")
        .replace('0', "O")
        .replace('1', "I")
        .trim()
        .to_string()
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE1: &str = "P<UTOMARTIN<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<<<";
    const LINE2: &str = "P123456784UTO8503121M3007152<<<<<<<<<<<<<<04";

    #[test]
    fn test_decode_full_zone() {
        let text = format!("PASSPORT\nSurname\nMARTIN\n{}\n{}", LINE1, LINE2);
        let mrz = MrzDecoder::decode(&text);

        assert_eq!(mrz.document_type.as_deref(), Some("P"));
        assert_eq!(mrz.issuing_country.as_deref(), Some("UTO"));
        assert_eq!(mrz.surname.as_deref(), Some("MARTIN"));
        assert_eq!(mrz.given_names.as_deref(), Some("ANNA MARIA"));
        assert_eq!(mrz.passport_number.as_deref(), Some("P12345678"));
        assert_eq!(mrz.nationality.as_deref(), Some("UTO"));
        assert_eq!(mrz.date_of_birth.as_deref(), Some("12/03/1985"));
        assert_eq!(mrz.gender.as_deref(), Some("Male"));
        assert_eq!(mrz.date_of_expiry.as_deref(), Some("15/07/2030"));
    }

    #[test]
    fn test_candidate_detection_strips_whitespace() {
        let text = "P<UTOMARTIN<<ANNA<MARIA<<<<< <<<<<<<<<<<<<<<<\nshort<<line\n";
        let lines = MrzDecoder::find_candidate_lines(text);
        assert_eq!(lines.len(), 1);
        assert!(!lines[0].contains(' '));
    }

    #[test]
    fn test_clean_then_correct_pasted_line() {
        let pasted = "p<gbrmartin << anna<maria <<<<<<<<<<<<<<<<<<<<<<<<<";
        let line = MrzDecoder::correct_line(&MrzDecoder::clean_line(pasted));
        assert!(line.starts_with("P<G8RMART1N<<ANNA<MAR1A<<"));
        assert!(!line.contains(' '));

        let mrz = MrzDecoder::decode_lines(&line, LINE2);
        assert_eq!(mrz.document_type.as_deref(), Some("P"));
        assert_eq!(mrz.issuing_country.as_deref(), Some("G8R"));
        assert_eq!(mrz.surname.as_deref(), Some("MARTIN"));
        assert_eq!(mrz.given_names.as_deref(), Some("ANNA MARIA"));
    }

    #[test]
    fn test_candidate_length_bounds() {
        let too_long = "<".repeat(51);
        let just_right = format!("P<{}", "<".repeat(38));
        let text = format!("{}\n{}", too_long, just_right);
        assert_eq!(MrzDecoder::find_candidate_lines(&text).len(), 1);
    }

    #[test]
    fn test_ocr_confusion_correction() {
        assert_eq!(MrzDecoder::correct_line("OBZSIL|"), "08251<1");
    }

    #[test]
    fn test_name_corrections_are_lossy() {
        let line1 = "P<UTOSMITH<<JOHN<<<<<<<<<<<<<<<<<<<<<<<<<<<<";
        let mrz = MrzDecoder::decode_lines(&MrzDecoder::correct_line(line1), LINE2);
        // S is recovered as a digit and not restored in names.
        assert_eq!(mrz.surname.as_deref(), Some("5MITH"));
        assert_eq!(mrz.given_names.as_deref(), Some("JOHN"));
    }

    #[test]
    fn test_single_line_gives_empty_record() {
        let mrz = MrzDecoder::decode(LINE1);
        assert!(mrz.is_empty());
        assert!(MrzDecoder::decode("").is_empty());
    }

    #[test]
    fn test_malformed_date_does_not_abort_decode() {
        let line2 = "P123456784UTO85X3121M3007152<<<<<<<<<<<<<<04";
        let mrz = MrzDecoder::decode_lines(LINE1, line2);
        assert_eq!(mrz.date_of_birth, None);
        assert_eq!(mrz.gender.as_deref(), Some("Male"));
        assert_eq!(mrz.date_of_expiry.as_deref(), Some("15/07/2030"));
        assert_eq!(mrz.passport_number.as_deref(), Some("P12345678"));
    }

    #[test]
    fn test_short_second_line_only_decodes_names() {
        let mrz = MrzDecoder::decode_lines(LINE1, "P123456784UTO8503121M3007152<<<<<<");
        assert_eq!(mrz.surname.as_deref(), Some("MARTIN"));
        assert_eq!(mrz.passport_number, None);
    }

    #[test]
    fn test_non_passport_first_line() {
        let mrz = MrzDecoder::decode_lines("I<UTOMARTIN<<ANNA<<<<<<<<<<<<<<<<<<<<<<<<<<<", LINE2);
        assert_eq!(mrz.document_type, None);
        assert_eq!(mrz.surname, None);
        assert_eq!(mrz.nationality.as_deref(), Some("UTO"));
    }
}
