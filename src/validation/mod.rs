pub mod confidence;
pub mod input;

pub use confidence::ConfidenceScorer;
pub use input::validate_ocr_input;
