use thiserror::Error;

/// Errors raised by the extraction engine and its boundaries.
///
/// Missing or malformed fields are never errors: extractors degrade to an
/// empty value. Only a broken input contract or boundary I/O ends up here.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unsupported document type: {0}")]
    UnsupportedDocumentType(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ExtractionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_is_distinct_message() {
        let err = ExtractionError::InvalidInput("text is null".to_string());
        assert_eq!(err.to_string(), "Invalid input: text is null");
        assert!(matches!(err, ExtractionError::InvalidInput(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.txt");
        let err: ExtractionError = io.into();
        assert!(err.to_string().starts_with("IO error"));
    }
}
