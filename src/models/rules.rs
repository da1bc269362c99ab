use crate::models::DocumentType;

/// Threshold carried on every parse result for the caller's convenience.
pub const CONFIDENCE_THRESHOLD: f64 = 0.70;

/// Score for a passport nationality taken from a descriptive text value
/// such as "BRITISH CITIZEN".
pub const QUALIFIED_NATIONALITY_CONFIDENCE: f64 = 0.95;

pub mod field_names {
    pub const NAME: &str = "Name";
    pub const FATHER_NAME: &str = "Father Name";
    pub const DATE_OF_BIRTH: &str = "Date of Birth";
    pub const GENDER: &str = "Gender";
    pub const AADHAAR_NUMBER: &str = "Aadhaar Number";
    pub const ADDRESS: &str = "Address";
    pub const PIN_CODE: &str = "PIN Code";
    pub const STATE: &str = "State";

    pub const SURNAME: &str = "Surname";
    pub const GIVEN_NAMES: &str = "Given Names";
    pub const PASSPORT_NUMBER: &str = "Passport Number";
    pub const NATIONALITY: &str = "Nationality";
    pub const DATE_OF_ISSUE: &str = "Date of Issue";
    pub const DATE_OF_EXPIRY: &str = "Date of Expiry";
    pub const PLACE_OF_BIRTH: &str = "Place of Birth";
}

/// How much a field value is trusted, by the source that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    pub field_name: &'static str,
    pub essential: bool,
    /// Confidence of a value found by the free-text heuristics.
    pub text_confidence: f64,
    /// Confidence of a value decoded from the MRZ, for fields the MRZ encodes.
    pub mrz_confidence: Option<f64>,
}

impl FieldRule {
    fn text(field_name: &'static str, essential: bool, text_confidence: f64) -> Self {
        FieldRule {
            field_name,
            essential,
            text_confidence,
            mrz_confidence: None,
        }
    }

    fn with_mrz(
        field_name: &'static str,
        essential: bool,
        text_confidence: f64,
        mrz_confidence: f64,
    ) -> Self {
        FieldRule {
            field_name,
            essential,
            text_confidence,
            mrz_confidence: Some(mrz_confidence),
        }
    }
}

/// Ordered field table of one document type. Essential fields come first.
#[derive(Debug, Clone)]
pub struct DocumentRules {
    pub document_type: DocumentType,
    pub fields: Vec<FieldRule>,
}

impl DocumentRules {
    pub fn for_document(document_type: DocumentType) -> Self {
        match document_type {
            DocumentType::Aadhaar => Self::aadhaar(),
            DocumentType::Passport => Self::passport(),
        }
    }

    pub fn aadhaar() -> Self {
        use field_names::*;

        DocumentRules {
            document_type: DocumentType::Aadhaar,
            fields: vec![
                FieldRule::text(NAME, true, 0.90),
                FieldRule::text(FATHER_NAME, true, 0.85),
                FieldRule::text(DATE_OF_BIRTH, true, 0.90),
                FieldRule::text(GENDER, true, 0.95),
                FieldRule::text(AADHAAR_NUMBER, true, 0.98),
                FieldRule::text(ADDRESS, false, 0.80),
                FieldRule::text(PIN_CODE, false, 0.90),
                FieldRule::text(STATE, false, 0.85),
            ],
        }
    }

    pub fn passport() -> Self {
        use field_names::*;

        DocumentRules {
            document_type: DocumentType::Passport,
            fields: vec![
                FieldRule::with_mrz(SURNAME, true, 0.85, 0.95),
                FieldRule::with_mrz(GIVEN_NAMES, true, 0.85, 0.95),
                FieldRule::with_mrz(PASSPORT_NUMBER, true, 0.85, 0.98),
                FieldRule::with_mrz(NATIONALITY, true, 0.80, 0.95),
                // Dates prefer the printed text; the MRZ copy is the fallback.
                FieldRule::with_mrz(DATE_OF_BIRTH, true, 0.90, 0.85),
                FieldRule::with_mrz(GENDER, true, 0.85, 0.98),
                FieldRule::text(DATE_OF_ISSUE, true, 0.85),
                FieldRule::with_mrz(DATE_OF_EXPIRY, true, 0.90, 0.85),
                FieldRule::text(PLACE_OF_BIRTH, false, 0.80),
            ],
        }
    }

    pub fn get_rule(&self, field_name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|rule| rule.field_name == field_name)
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|rule| rule.field_name).collect()
    }

    /// Length of the essential prefix of the field list.
    pub fn essential_count(&self) -> usize {
        self.fields.iter().take_while(|rule| rule.essential).count()
    }
}
