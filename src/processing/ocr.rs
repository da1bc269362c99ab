use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::models::{DocumentType, OcrInput};
use crate::utils::{ExtractionError, Result};

/// Confidence reported for plain-text OCR transcripts that carry none.
pub const DEFAULT_TEXT_CONFIDENCE: f64 = 100.0;

/// The OCR collaborator: turns a captured document into text with its line
/// breaks preserved, plus the engine's own 0-100 confidence.
pub trait OcrEngine {
    fn run_ocr(&self, source: &Path, hint: DocumentType) -> Result<OcrInput>;
}

/// Reads OCR output that was produced earlier and saved to disk.
///
/// `.json` files must hold `{"text": ..., "confidence": ...}`; any other
/// file is taken as the raw transcript and gets `confidence`.
#[derive(Debug, Clone)]
pub struct TextFileOcr {
    pub confidence: f64,
}

impl TextFileOcr {
    pub fn new(confidence: f64) -> Self {
        TextFileOcr { confidence }
    }
}

impl Default for TextFileOcr {
    fn default() -> Self {
        Self::new(DEFAULT_TEXT_CONFIDENCE)
    }
}

impl OcrEngine for TextFileOcr {
    fn run_ocr(&self, source: &Path, hint: DocumentType) -> Result<OcrInput> {
        info!("Loading {} OCR output from {}", hint, source.display());

        let bytes = fs::read(source)?;
        let is_json = source
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let input = if is_json {
            let payload = std::str::from_utf8(&bytes).map_err(|e| {
                ExtractionError::InvalidInput(format!("OCR payload is not valid UTF-8: {}", e))
            })?;
            OcrInput::from_json(payload)?
        } else {
            OcrInput::from_bytes(&bytes, self.confidence)?
        };

        debug!(
            "OCR input: {} lines, confidence {:.1}",
            input.text.lines().count(),
            input.confidence
        );
        Ok(input)
    }
}
