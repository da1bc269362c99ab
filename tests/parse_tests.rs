use std::io::Write;

use idextract::models::field_names::*;
use idextract::models::{DocumentRules, DocumentType, OcrInput, ParseResult};
use idextract::processing::TextFileOcr;
use idextract::{parse, parse_file, ExtractionError};

const AADHAAR_CARD: &str = "भारत सरकार
GOVERNMENT OF INDIA
RAHUL KUMAR SHARMA
जन्म तिथि / DOB: 15/08/1990
पुरुष / MALE
1234 5678 9012
Address:
S/O: Suresh Kumar Sharma,
House No 12, Gandhi Nagar
Near Bus Stand
Jaipur, Rajasthan 302001";

const PASSPORT_PAGE: &str = "PASSPORT
Surname / Nom
MARTIN
Given names / Prenoms
ANNA MARIA
Nationality / Nationalite
BRITISH CITIZEN
Date of birth / Date de naissance
12 FEB /FEV 85
Sex / Sexe   Place of birth / Lieu de naissance
F   LONDON
Date of issue / Date de delivrance
15 OCT /OCT 20
Date of expiry / Date d'expiration
15 OCT /OCT 30
Passport No. 123456784
P<GBRMARTIN<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<<<
1234567842GBR8502124F3010157<<<<<<<<<<<<<<02";

fn input(text: &str) -> OcrInput {
    OcrInput::new(text, 88.0).unwrap()
}

fn confidence(result: &ParseResult, name: &str) -> f64 {
    result.field(name).map(|f| f.confidence_score).unwrap_or(-1.0)
}

fn assert_invariants(result: &ParseResult) {
    for field in &result.fields {
        assert_eq!(
            field.field_value.is_empty(),
            field.confidence_score == 0.0,
            "{} = {:?} scored {}",
            field.field_name,
            field.field_value,
            field.confidence_score
        );
    }
    assert!((0.0..=1.0).contains(&result.confidence_overall));
}

#[test]
fn test_full_aadhaar_card() {
    let result = parse(DocumentType::Aadhaar, &input(AADHAAR_CARD)).unwrap();
    assert_invariants(&result);

    assert_eq!(result.value(NAME), "RAHUL KUMAR SHARMA");
    assert_eq!(result.value(FATHER_NAME), "Suresh Kumar Sharma");
    assert_eq!(result.value(DATE_OF_BIRTH), "15/08/1990");
    assert_eq!(result.value(GENDER), "Male");
    assert_eq!(result.value(AADHAAR_NUMBER), "1234 5678 9012");
    assert_eq!(
        result.value(ADDRESS),
        "House No 12, Gandhi Nagar, Near Bus Stand, Jaipur, Rajasthan"
    );
    assert_eq!(result.value(PIN_CODE), "302001");
    assert_eq!(result.value(STATE), "Rajasthan");

    assert_eq!(confidence(&result, AADHAAR_NUMBER), 0.98);
    let average = (0.90 + 0.85 + 0.90 + 0.95 + 0.98 + 0.80 + 0.90 + 0.85) / 8.0;
    assert!((result.confidence_overall - average).abs() < 1e-9);
    assert!(result.meets_threshold());
}

#[test]
fn test_aadhaar_without_essential_fields_scores_zero() {
    let text = "Near Bus Stand, Jaipur\nJaipur, Rajasthan 302001";
    let result = parse(DocumentType::Aadhaar, &input(text)).unwrap();
    assert_invariants(&result);
    assert_eq!(result.value(STATE), "Rajasthan");
    assert_eq!(result.confidence_overall, 0.0);
    assert!(!result.meets_threshold());
}

#[test]
fn test_full_passport() {
    let result = parse(DocumentType::Passport, &input(PASSPORT_PAGE)).unwrap();
    assert_invariants(&result);
    assert_eq!(result.fields.len(), 9);

    assert_eq!(result.value(SURNAME), "MARTIN");
    assert_eq!(confidence(&result, SURNAME), 0.95);
    assert_eq!(result.value(GIVEN_NAMES), "ANNA MARIA");
    assert_eq!(result.value(PASSPORT_NUMBER), "123456784");
    assert_eq!(confidence(&result, PASSPORT_NUMBER), 0.98);
    assert_eq!(result.value(NATIONALITY), "BRITISH CITIZEN");
    assert_eq!(confidence(&result, NATIONALITY), 0.95);
    assert_eq!(result.value(DATE_OF_BIRTH), "12/02/1985");
    assert_eq!(confidence(&result, DATE_OF_BIRTH), 0.90);
    assert_eq!(result.value(GENDER), "Female");
    assert_eq!(confidence(&result, GENDER), 0.98);
    assert_eq!(result.value(DATE_OF_ISSUE), "15/10/2020");
    assert_eq!(result.value(DATE_OF_EXPIRY), "15/10/2030");
    assert_eq!(result.value(PLACE_OF_BIRTH), "LONDON");

    let average = (0.95 + 0.95 + 0.98 + 0.95 + 0.90 + 0.98 + 0.85 + 0.90 + 0.80) / 9.0;
    assert!((result.confidence_overall - average).abs() < 1e-9);
}

#[test]
fn test_passport_without_mrz_uses_printed_text() {
    let printed: String = PASSPORT_PAGE
        .lines()
        .filter(|line| !line.contains("<<"))
        .collect::<Vec<_>>()
        .join("\n");
    let result = parse(DocumentType::Passport, &input(&printed)).unwrap();
    assert_invariants(&result);

    assert_eq!(result.value(SURNAME), "MARTIN");
    assert_eq!(confidence(&result, SURNAME), 0.85);
    assert_eq!(confidence(&result, PASSPORT_NUMBER), 0.85);
    assert_eq!(result.value(GENDER), "Female");
    assert_eq!(confidence(&result, GENDER), 0.85);
    assert_eq!(confidence(&result, NATIONALITY), 0.95);
}

#[test]
fn test_mrz_only_passport() {
    let mrz: String = PASSPORT_PAGE
        .lines()
        .filter(|line| line.contains("<<"))
        .collect::<Vec<_>>()
        .join("\n");
    let result = parse(DocumentType::Passport, &input(&mrz)).unwrap();
    assert_invariants(&result);

    // Country codes go through the digit recovery pass: B reads as 8.
    assert_eq!(result.value(NATIONALITY), "G8R");
    assert_eq!(result.value(DATE_OF_BIRTH), "12/02/1985");
    assert_eq!(confidence(&result, DATE_OF_BIRTH), 0.85);
    assert_eq!(result.value(DATE_OF_EXPIRY), "15/10/2030");
    assert_eq!(result.value(DATE_OF_ISSUE), "");
    assert_eq!(result.value(PLACE_OF_BIRTH), "");
}

#[test]
fn test_parse_is_deterministic() {
    for (document_type, text) in [
        (DocumentType::Aadhaar, AADHAAR_CARD),
        (DocumentType::Passport, PASSPORT_PAGE),
        (DocumentType::Passport, AADHAAR_CARD),
    ] {
        let first = parse(document_type, &input(text)).unwrap();
        let second = parse(document_type, &input(text)).unwrap();
        assert_eq!(first, second);
        assert_invariants(&first);
    }
}

#[test]
fn test_field_order_matches_rules() {
    let result = parse(DocumentType::Aadhaar, &input("")).unwrap();
    let names: Vec<&str> = result.fields.iter().map(|f| f.field_name.as_str()).collect();
    assert_eq!(names, DocumentRules::aadhaar().field_names());
    assert_eq!(result.threshold, 0.70);
}

#[test]
fn test_null_text_is_invalid_input() {
    let err = OcrInput::from_json(r#"{"text": null, "confidence": 90}"#).unwrap_err();
    assert!(matches!(err, ExtractionError::InvalidInput(_)));

    let err = OcrInput::from_json(r#"{"text": 42, "confidence": 90}"#).unwrap_err();
    assert!(matches!(err, ExtractionError::InvalidInput(_)));
}

#[test]
fn test_unsupported_document_type() {
    let err = "pan_card".parse::<DocumentType>().unwrap_err();
    assert!(matches!(err, ExtractionError::UnsupportedDocumentType(_)));
}

#[test]
fn test_parse_file_through_ocr_boundary() {
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    file.write_all(AADHAAR_CARD.as_bytes()).unwrap();

    let result = parse_file(&TextFileOcr::new(75.0), DocumentType::Aadhaar, file.path()).unwrap();
    assert_eq!(result.value(AADHAAR_NUMBER), "1234 5678 9012");
}
