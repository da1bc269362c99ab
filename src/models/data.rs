use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::{ExtractionError, Result};

/// Document types the engine knows how to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    #[serde(rename = "aadhar", alias = "aadhaar")]
    Aadhaar,
    Passport,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Aadhaar => "aadhar",
            DocumentType::Passport => "passport",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = ExtractionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "aadhar" | "aadhaar" => Ok(DocumentType::Aadhaar),
            "passport" => Ok(DocumentType::Passport),
            other => Err(ExtractionError::UnsupportedDocumentType(other.to_string())),
        }
    }
}

/// Raw OCR output handed to the engine: multi-line text plus the OCR
/// engine's own confidence on a 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrInput {
    pub text: String,
    pub confidence: f64,
}

impl OcrInput {
    pub fn new(text: impl Into<String>, confidence: f64) -> Result<Self> {
        let input = OcrInput {
            text: text.into(),
            confidence,
        };
        input.validate()?;
        Ok(input)
    }

    /// Build an input from untrusted bytes; the text must be UTF-8.
    pub fn from_bytes(bytes: &[u8], confidence: f64) -> Result<Self> {
        let text = std::str::from_utf8(bytes).map_err(|e| {
            ExtractionError::InvalidInput(format!("OCR text is not valid UTF-8: {}", e))
        })?;
        Self::new(text, confidence)
    }

    /// Parse the `{ "text": ..., "confidence": ... }` shape produced by an OCR
    /// collaborator. A null, missing or non-string `text` is an input-contract
    /// violation, not an empty document.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| ExtractionError::InvalidInput(format!("OCR payload is not JSON: {}", e)))?;

        let text = match value.get("text") {
            Some(serde_json::Value::String(text)) => text.clone(),
            Some(serde_json::Value::Null) | None => {
                return Err(ExtractionError::InvalidInput(
                    "OCR text is missing or null".to_string(),
                ))
            }
            Some(other) => {
                return Err(ExtractionError::InvalidInput(format!(
                    "OCR text must be a string, got {}",
                    other
                )))
            }
        };

        let confidence = value
            .get("confidence")
            .and_then(serde_json::Value::as_f64)
            .ok_or_else(|| {
                ExtractionError::InvalidInput("OCR confidence must be a number".to_string())
            })?;

        Self::new(text, confidence)
    }

    pub fn validate(&self) -> Result<()> {
        crate::validation::input::validate_ocr_input(self)
    }
}

/// One extracted field. An empty value always carries a zero confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedField {
    pub field_name: String,
    pub field_value: String,
    pub confidence_score: f64,
}

impl ExtractedField {
    pub fn new(field_name: &str, field_value: impl Into<String>, confidence_score: f64) -> Self {
        let field_value = field_value.into();
        let confidence_score = if field_value.is_empty() {
            0.0
        } else {
            confidence_score.clamp(0.0, 1.0)
        };
        ExtractedField {
            field_name: field_name.to_string(),
            field_value,
            confidence_score,
        }
    }

    pub fn is_found(&self) -> bool {
        !self.field_value.is_empty()
    }
}

/// Result of parsing one document. Field order is the display order and the
/// first N entries are the document type's essential fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    pub fields: Vec<ExtractedField>,
    pub confidence_overall: f64,
    pub threshold: f64,
}

impl ParseResult {
    pub fn field(&self, name: &str) -> Option<&ExtractedField> {
        self.fields.iter().find(|f| f.field_name == name)
    }

    /// Value of a field, or "" when the field is absent or was not found.
    pub fn value(&self, name: &str) -> &str {
        self.field(name).map(|f| f.field_value.as_str()).unwrap_or("")
    }

    pub fn meets_threshold(&self) -> bool {
        self.confidence_overall >= self.threshold
    }
}

/// Values decoded from a TD3 machine readable zone. Every field is optional:
/// malformed segments leave their field unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MrzData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuing_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_names: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passport_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_expiry: Option<String>,
}

impl MrzData {
    pub fn is_empty(&self) -> bool {
        *self == MrzData::default()
    }
}
