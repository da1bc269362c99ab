pub mod document_parser;
pub mod models;
pub mod processing;
pub mod report;
pub mod utils;
pub mod validation;

pub use document_parser::{parse, parse_file, AadhaarParser, DocumentParser, PassportParser};
pub use models::{DocumentType, ExtractedField, MrzData, OcrInput, ParseResult};
pub use report::ExtractionReport;
pub use utils::{ExtractionError, Result};
