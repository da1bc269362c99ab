pub mod aadhaar;
pub mod address;
pub mod dates;
pub mod field_correction;
pub mod mrz;
pub mod normalizer;
pub mod ocr;
pub mod passport;
pub mod strategy;

pub use aadhaar::AadhaarExtractor;
pub use field_correction::FieldCorrection;
pub use mrz::MrzDecoder;
pub use normalizer::normalize;
pub use ocr::{OcrEngine, TextFileOcr};
pub use passport::{DateField, PassportTextExtractor, PassportTextFields};
