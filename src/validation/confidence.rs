use log::{debug, info};

use crate::models::{DocumentRules, ExtractedField};

/// Breakdown of the overall confidence of one parse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceSummary {
    pub essential_found: usize,
    pub essential_total: usize,
    pub extraction_rate: f64,
    pub average_confidence: f64,
    pub overall: f64,
}

pub struct ConfidenceScorer;

impl ConfidenceScorer {
    /// `overall = mean confidence of found fields * essential extraction rate`.
    ///
    /// The essential set is the leading `essential_count` entries of
    /// `fields`, which must be in rule order.
    pub fn score(rules: &DocumentRules, fields: &[ExtractedField]) -> ConfidenceSummary {
        let essential_total = rules.essential_count();
        let essential_found = fields
            .iter()
            .take(essential_total)
            .filter(|f| f.is_found())
            .count();
        let extraction_rate = if essential_total == 0 {
            0.0
        } else {
            essential_found as f64 / essential_total as f64
        };

        let found: Vec<f64> = fields
            .iter()
            .filter(|f| f.is_found())
            .map(|f| f.confidence_score)
            .collect();
        let average_confidence = if found.is_empty() {
            0.0
        } else {
            found.iter().sum::<f64>() / found.len() as f64
        };

        let overall = (average_confidence * extraction_rate).clamp(0.0, 1.0);

        info!(
            "{}: extracted {}/{} essential fields",
            rules.document_type, essential_found, essential_total
        );
        debug!(
            "Extraction rate {:.1}%, average confidence {:.1}%, overall {:.1}%",
            extraction_rate * 100.0,
            average_confidence * 100.0,
            overall * 100.0
        );

        ConfidenceSummary {
            essential_found,
            essential_total,
            extraction_rate,
            average_confidence,
            overall,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::field_names::*;

    fn aadhaar_fields(values: [&str; 8]) -> Vec<ExtractedField> {
        DocumentRules::aadhaar()
            .fields
            .iter()
            .zip(values)
            .map(|(rule, value)| ExtractedField::new(rule.field_name, value, rule.text_confidence))
            .collect()
    }

    #[test]
    fn test_all_essential_missing_scores_zero() {
        let fields = aadhaar_fields(["", "", "", "", "", "Some address here", "110001", "Delhi"]);
        let summary = ConfidenceScorer::score(&DocumentRules::aadhaar(), &fields);
        assert_eq!(summary.essential_found, 0);
        assert_eq!(summary.overall, 0.0);
        assert!(summary.average_confidence > 0.0);
    }

    #[test]
    fn test_aadhaar_denominator_is_five() {
        let fields = aadhaar_fields(["RAHUL KUMAR", "", "", "Male", "1234 5678 9012", "", "", ""]);
        let summary = ConfidenceScorer::score(&DocumentRules::aadhaar(), &fields);
        assert_eq!(summary.essential_total, 5);
        assert_eq!(summary.essential_found, 3);
        let average = (0.90 + 0.95 + 0.98) / 3.0;
        assert!((summary.overall - average * 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_passport_denominator_is_eight() {
        let rules = DocumentRules::passport();
        let fields: Vec<ExtractedField> = rules
            .fields
            .iter()
            .map(|rule| {
                let value = if rule.field_name == PLACE_OF_BIRTH { "" } else { "X" };
                ExtractedField::new(rule.field_name, value, 1.0)
            })
            .collect();
        let summary = ConfidenceScorer::score(&rules, &fields);
        assert_eq!(summary.essential_total, 8);
        assert_eq!(summary.extraction_rate, 1.0);
        assert_eq!(summary.overall, 1.0);
    }

    #[test]
    fn test_no_fields() {
        let summary = ConfidenceScorer::score(&DocumentRules::aadhaar(), &[]);
        assert_eq!(summary.overall, 0.0);
        assert_eq!(summary.average_confidence, 0.0);
    }
}
