pub mod data;
pub mod rules;

pub use data::{DocumentType, ExtractedField, MrzData, OcrInput, ParseResult};
pub use rules::{field_names, DocumentRules, FieldRule, CONFIDENCE_THRESHOLD};
