use crate::models::OcrInput;
use crate::utils::{ExtractionError, Result};

/// Highest confidence an OCR engine may report.
pub const MAX_OCR_CONFIDENCE: f64 = 100.0;

/// Check the OCR input contract. An empty transcript is valid (it simply
/// yields no fields); a confidence that is not a finite 0-100 value is not.
pub fn validate_ocr_input(input: &OcrInput) -> Result<()> {
    if !input.confidence.is_finite() {
        return Err(ExtractionError::InvalidInput(format!(
            "OCR confidence must be a finite number, got {}",
            input.confidence
        )));
    }
    if !(0.0..=MAX_OCR_CONFIDENCE).contains(&input.confidence) {
        return Err(ExtractionError::InvalidInput(format!(
            "OCR confidence {} is outside 0..={}",
            input.confidence, MAX_OCR_CONFIDENCE
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(confidence: f64) -> OcrInput {
        OcrInput {
            text: "RAHUL KUMAR".to_string(),
            confidence,
        }
    }

    #[test]
    fn test_accepts_contract_range() {
        assert!(validate_ocr_input(&raw(0.0)).is_ok());
        assert!(validate_ocr_input(&raw(100.0)).is_ok());
        assert!(validate_ocr_input(&OcrInput {
            text: String::new(),
            confidence: 42.0
        })
        .is_ok());
    }

    #[test]
    fn test_rejects_bad_confidence() {
        for bad in [f64::NAN, f64::INFINITY, -1.0, 100.5] {
            assert!(matches!(
                validate_ocr_input(&raw(bad)),
                Err(ExtractionError::InvalidInput(_))
            ));
        }
    }
}
