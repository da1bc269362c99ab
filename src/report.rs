//! Caller-facing summary of one parse, as handed to a presentation layer.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{DocumentRules, DocumentType, ExtractedField, ParseResult};
use crate::utils::Result;

/// Default overall confidence needed for a `success` status.
pub const DEFAULT_ACCEPT_THRESHOLD: f64 = 0.75;
/// Field confidence at or above which a field counts as validated.
pub const FIELD_VALIDATED_CONFIDENCE: f64 = 0.80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStatus {
    Success,
    Failed,
}

impl fmt::Display for ExtractionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionStatus::Success => write!(f, "SUCCESS"),
            ExtractionStatus::Failed => write!(f, "FAILED"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportField {
    pub field_name: String,
    pub field_value: String,
    /// Rounded percentage.
    pub confidence_score: u32,
    pub validated: bool,
}

impl From<&ExtractedField> for ReportField {
    fn from(field: &ExtractedField) -> Self {
        ReportField {
            field_name: field.field_name.clone(),
            field_value: field.field_value.clone(),
            confidence_score: percent(field.confidence_score),
            validated: field.confidence_score >= FIELD_VALIDATED_CONFIDENCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub document_type: DocumentType,
    pub status: ExtractionStatus,
    /// Rounded percentage.
    pub overall_confidence: u32,
    pub processing_time_ms: u64,
    pub extracted_fields: Vec<ReportField>,
    pub timestamp: String,
}

impl ExtractionReport {
    pub fn from_parse(
        document_type: DocumentType,
        result: &ParseResult,
        accept_threshold: f64,
        processing_time: Duration,
    ) -> Self {
        Self::at(document_type, result, accept_threshold, processing_time, Utc::now())
    }

    fn at(
        document_type: DocumentType,
        result: &ParseResult,
        accept_threshold: f64,
        processing_time: Duration,
        now: DateTime<Utc>,
    ) -> Self {
        let status = if result.confidence_overall >= accept_threshold {
            ExtractionStatus::Success
        } else {
            ExtractionStatus::Failed
        };

        ExtractionReport {
            document_type,
            status,
            overall_confidence: percent(result.confidence_overall),
            processing_time_ms: processing_time.as_millis() as u64,
            extracted_fields: result.fields.iter().map(ReportField::from).collect(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn missing_fields(&self) -> impl Iterator<Item = &ReportField> {
        self.extracted_fields.iter().filter(|f| f.field_value.is_empty())
    }

    /// Names of missing fields the document's rules mark essential.
    pub fn missing_essential_fields(&self) -> Vec<&str> {
        let rules = DocumentRules::for_document(self.document_type);
        self.missing_fields()
            .filter(|f| rules.get_rule(&f.field_name).map_or(false, |rule| rule.essential))
            .map(|f| f.field_name.as_str())
            .collect()
    }
}

fn percent(score: f64) -> u32 {
    (score.clamp(0.0, 1.0) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn parsed(overall: f64) -> ParseResult {
        ParseResult {
            fields: vec![
                ExtractedField::new("Name", "RAHUL KUMAR", 0.90),
                ExtractedField::new("Father Name", "Ram Lal", 0.799),
                ExtractedField::new("Address", "", 0.80),
            ],
            confidence_overall: overall,
            threshold: 0.70,
        }
    }

    #[test]
    fn test_status_uses_accept_threshold() {
        let took = Duration::from_millis(12);
        let report = ExtractionReport::from_parse(DocumentType::Aadhaar, &parsed(0.75), 0.75, took);
        assert_eq!(report.status, ExtractionStatus::Success);

        // Above the carried 0.70 threshold but below the acceptance cut-off.
        let report = ExtractionReport::from_parse(DocumentType::Aadhaar, &parsed(0.72), 0.75, took);
        assert_eq!(report.status, ExtractionStatus::Failed);
        assert_eq!(report.overall_confidence, 72);
        assert_eq!(report.processing_time_ms, 12);
    }

    #[test]
    fn test_fields_in_percent() {
        let report = ExtractionReport::from_parse(
            DocumentType::Aadhaar,
            &parsed(0.5),
            DEFAULT_ACCEPT_THRESHOLD,
            Duration::ZERO,
        );
        let fields = &report.extracted_fields;
        assert_eq!(fields[0].confidence_score, 90);
        assert!(fields[0].validated);
        assert_eq!(fields[1].confidence_score, 80);
        assert!(!fields[1].validated);
        assert_eq!(fields[2].confidence_score, 0);
        assert_eq!(report.missing_fields().count(), 1);
    }

    #[test]
    fn test_missing_essential_fields() {
        let result = ParseResult {
            fields: vec![
                ExtractedField::new("Name", "RAHUL KUMAR", 0.90),
                ExtractedField::new("Gender", "", 0.85),
                ExtractedField::new("Address", "", 0.80),
                ExtractedField::new("Blood Group", "", 0.80),
            ],
            confidence_overall: 0.3,
            threshold: 0.70,
        };
        let report = ExtractionReport::from_parse(
            DocumentType::Aadhaar,
            &result,
            DEFAULT_ACCEPT_THRESHOLD,
            Duration::ZERO,
        );
        assert_eq!(report.missing_fields().count(), 3);
        assert_eq!(report.missing_essential_fields(), vec!["Gender"]);
    }

    #[test]
    fn test_json_shape() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap();
        let report = ExtractionReport::at(
            DocumentType::Aadhaar,
            &parsed(0.8),
            DEFAULT_ACCEPT_THRESHOLD,
            Duration::from_millis(3),
            now,
        );
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["document_type"], "aadhar");
        assert_eq!(json["status"], "success");
        assert_eq!(json["overall_confidence"], 80);
        assert_eq!(json["timestamp"], "2024-05-01T10:30:00.000Z");
        assert_eq!(json["extracted_fields"][0]["field_name"], "Name");
    }
}
