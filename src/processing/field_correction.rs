use std::collections::BTreeMap;

use log::debug;

use crate::models::field_names::*;
use crate::models::rules::QUALIFIED_NATIONALITY_CONFIDENCE;
use crate::models::{DocumentRules, ExtractedField, FieldRule, MrzData};
use crate::processing::passport::PassportTextFields;

/// Which source supplied a reconciled value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
    Mrz,
    Text,
    Missing,
}

/// FieldCorrection merges MRZ and printed-text values into the final passport
/// field list, choosing a source per field and scoring by that source.
pub struct FieldCorrection;

impl FieldCorrection {
    /// Reconcile both sources into the passport field list, in rule order.
    pub fn reconcile(mrz: &MrzData, text: &PassportTextFields) -> Vec<ExtractedField> {
        let rules = DocumentRules::passport();
        let mut sources = BTreeMap::new();
        let mut fields = Vec::with_capacity(rules.fields.len());

        for rule in &rules.fields {
            let (value, confidence, source) = match rule.field_name {
                SURNAME => Self::mrz_first(rule, mrz.surname.as_deref(), &text.surname),
                GIVEN_NAMES => Self::mrz_first(rule, mrz.given_names.as_deref(), &text.given_names),
                PASSPORT_NUMBER => {
                    Self::mrz_first(rule, mrz.passport_number.as_deref(), &text.passport_number)
                }
                NATIONALITY => Self::nationality(rule, mrz.nationality.as_deref(), &text.nationality),
                DATE_OF_BIRTH => {
                    Self::text_first(rule, &text.date_of_birth, mrz.date_of_birth.as_deref())
                }
                GENDER => Self::mrz_first(rule, mrz.gender.as_deref(), &text.gender),
                DATE_OF_ISSUE => Self::text_first(rule, &text.date_of_issue, None),
                DATE_OF_EXPIRY => {
                    Self::text_first(rule, &text.date_of_expiry, mrz.date_of_expiry.as_deref())
                }
                PLACE_OF_BIRTH => Self::text_first(rule, &text.place_of_birth, None),
                _ => (String::new(), 0.0, FieldSource::Missing),
            };
            sources.insert(rule.field_name, source);
            fields.push(ExtractedField::new(rule.field_name, value, confidence));
        }

        debug!("Passport field sources: {:?}", sources);
        fields
    }

    /// MRZ value when decoded, else the printed text.
    fn mrz_first(rule: &FieldRule, mrz: Option<&str>, text: &str) -> (String, f64, FieldSource) {
        match (mrz.filter(|v| !v.is_empty()), rule.mrz_confidence) {
            (Some(value), Some(confidence)) => (value.to_string(), confidence, FieldSource::Mrz),
            _ => Self::text_first(rule, text, None),
        }
    }

    /// Printed text when found, else the MRZ value.
    fn text_first(rule: &FieldRule, text: &str, mrz: Option<&str>) -> (String, f64, FieldSource) {
        if !text.is_empty() {
            return (text.to_string(), rule.text_confidence, FieldSource::Text);
        }
        match (mrz.filter(|v| !v.is_empty()), rule.mrz_confidence) {
            (Some(value), Some(confidence)) => (value.to_string(), confidence, FieldSource::Mrz),
            _ => (String::new(), 0.0, FieldSource::Missing),
        }
    }

    /// A descriptive printed nationality ("BRITISH CITIZEN") beats the three
    /// letter MRZ code; otherwise the MRZ wins.
    fn nationality(rule: &FieldRule, mrz: Option<&str>, text: &str) -> (String, f64, FieldSource) {
        let mrz = mrz.filter(|v| !v.is_empty());
        let is_citizen = text.contains("CITIZEN");
        let descriptive = is_citizen || text.chars().count() > 10;

        let (value, source) = match mrz {
            _ if !text.is_empty() && descriptive => (text.to_string(), FieldSource::Text),
            Some(code) => (code.to_string(), FieldSource::Mrz),
            None if !text.is_empty() => (text.to_string(), FieldSource::Text),
            None => return (String::new(), 0.0, FieldSource::Missing),
        };

        let confidence = if is_citizen {
            QUALIFIED_NATIONALITY_CONFIDENCE
        } else if let (Some(_), Some(mrz_confidence)) = (mrz, rule.mrz_confidence) {
            mrz_confidence
        } else {
            rule.text_confidence
        };
        (value, confidence, source)
    }
}
