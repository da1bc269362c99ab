use std::path::Path;

use log::{debug, info};

use crate::models::field_names::*;
use crate::models::*;
use crate::processing::*;
use crate::utils::Result;
use crate::validation::ConfidenceScorer;

/// One document type's extraction pipeline: normalized text in, scored
/// field list out.
pub trait DocumentParser {
    fn document_type(&self) -> DocumentType;

    /// Extract every field of the document type from normalized text, in
    /// rule order. Missing fields are present with an empty value.
    fn extract_fields(&self, text: &str) -> Vec<ExtractedField>;

    // Main parse function that orchestrates the entire process
    fn parse(&self, input: &OcrInput) -> Result<ParseResult> {
        // Step 1: Check the input contract
        input.validate()?;

        // Step 2: Normalize OCR confusions
        let text = normalize(&input.text);
        debug!(
            "Parsing {} text: {} chars, {} lines",
            self.document_type(),
            text.chars().count(),
            text.lines().count()
        );

        // Step 3: Run the field extractors
        let fields = self.extract_fields(&text);

        // Step 4: Score the result
        let rules = DocumentRules::for_document(self.document_type());
        let summary = ConfidenceScorer::score(&rules, &fields);

        Ok(ParseResult {
            fields,
            confidence_overall: summary.overall,
            threshold: CONFIDENCE_THRESHOLD,
        })
    }
}

pub struct AadhaarParser;

impl DocumentParser for AadhaarParser {
    fn document_type(&self) -> DocumentType {
        DocumentType::Aadhaar
    }

    fn extract_fields(&self, text: &str) -> Vec<ExtractedField> {
        DocumentRules::aadhaar()
            .fields
            .iter()
            .map(|rule| {
                let value = match rule.field_name {
                    NAME => AadhaarExtractor::extract_name(text),
                    FATHER_NAME => AadhaarExtractor::extract_father_name(text),
                    DATE_OF_BIRTH => AadhaarExtractor::extract_dob(text),
                    GENDER => AadhaarExtractor::extract_gender(text),
                    AADHAAR_NUMBER => AadhaarExtractor::extract_aadhaar_number(text),
                    ADDRESS => AadhaarExtractor::extract_address(text),
                    PIN_CODE => AadhaarExtractor::extract_pin(text),
                    STATE => AadhaarExtractor::extract_state(text),
                    _ => String::new(),
                };
                ExtractedField::new(rule.field_name, value, rule.text_confidence)
            })
            .collect()
    }
}

pub struct PassportParser;

impl DocumentParser for PassportParser {
    fn document_type(&self) -> DocumentType {
        DocumentType::Passport
    }

    fn extract_fields(&self, text: &str) -> Vec<ExtractedField> {
        // The MRZ is decoded once and only feeds reconciliation.
        let mrz = MrzDecoder::decode(text);
        let printed = PassportTextFields::extract(text);
        debug!("MRZ: {:?}", mrz);
        debug!("Printed text: {:?}", printed);

        FieldCorrection::reconcile(&mrz, &printed)
    }
}

/// The parser for a document type.
pub fn parser_for(document_type: DocumentType) -> Box<dyn DocumentParser> {
    match document_type {
        DocumentType::Aadhaar => Box::new(AadhaarParser),
        DocumentType::Passport => Box::new(PassportParser),
    }
}

/// Parse one OCR input as the given document type.
pub fn parse(document_type: DocumentType, input: &OcrInput) -> Result<ParseResult> {
    let result = parser_for(document_type).parse(input)?;
    info!(
        "{} parsed: overall confidence {:.1}% (threshold {:.0}%)",
        document_type,
        result.confidence_overall * 100.0,
        result.threshold * 100.0
    );
    Ok(result)
}

/// Run the OCR collaborator on `source`, then parse its output.
pub fn parse_file<E: OcrEngine + ?Sized>(
    engine: &E,
    document_type: DocumentType,
    source: &Path,
) -> Result<ParseResult> {
    let input = engine.run_ocr(source, document_type)?;
    parse(document_type, &input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ExtractionError;

    #[test]
    fn test_field_lists_follow_rules() {
        let input = OcrInput::new("", 90.0).unwrap();
        for document_type in [DocumentType::Aadhaar, DocumentType::Passport] {
            let result = parse(document_type, &input).unwrap();
            let expected = DocumentRules::for_document(document_type).field_names();
            let names: Vec<&str> = result.fields.iter().map(|f| f.field_name.as_str()).collect();
            assert_eq!(names, expected);
            assert_eq!(result.confidence_overall, 0.0);
            assert_eq!(result.threshold, 0.70);
        }
    }

    #[test]
    fn test_invalid_confidence_is_rejected() {
        let input = OcrInput {
            text: "RAHUL KUMAR".to_string(),
            confidence: f64::NAN,
        };
        assert!(matches!(
            parse(DocumentType::Aadhaar, &input),
            Err(ExtractionError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_text_is_normalized_before_extraction() {
        let input = OcrInput::new("  RAHU| KUMAR\nMale'\n`1234 5678 9012  ", 80.0).unwrap();
        let result = AadhaarParser.parse(&input).unwrap();
        assert_eq!(result.value(NAME), "RAHUI KUMAR");
        assert_eq!(result.value(GENDER), "Male");
        assert_eq!(result.value(AADHAAR_NUMBER), "1234 5678 9012");
    }
}
