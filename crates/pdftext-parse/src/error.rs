//! Error types for the parsing layer.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Provides [`BackendError`]
//! and its conversion into the request-level [`DocError`].

use pdftext_core::DocError;
use thiserror::Error;

/// Placeholder path reported for documents opened from memory.
pub const IN_MEMORY_PATH: &str = "<memory>";

/// Error type for PDF backend operations.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The bytes are not a parseable PDF container.
    #[error("PDF parse error: {0}")]
    Parse(String),

    /// The document could not be unlocked with the supplied password.
    #[error("decryption failed: {0}")]
    Decrypt(String),

    /// A 0-based page index past the end of the page list.
    #[error("page index {index} out of range (0..{count})")]
    PageOutOfRange {
        /// The requested 0-based index.
        index: usize,
        /// Number of pages in the document.
        count: usize,
    },

    /// The page exists but its content could not be turned into text.
    #[error("text extraction failed: {0}")]
    Text(String),
}

impl From<BackendError> for DocError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Parse(msg) => DocError::invalid_path(IN_MEMORY_PATH, msg),
            BackendError::Decrypt(_) => DocError::InvalidPassword,
            BackendError::PageOutOfRange { index, .. } => DocError::PageNotFound { page: index + 1 },
            BackendError::Text(msg) => DocError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_error_parse() {
        let err = BackendError::Parse("invalid xref table".to_string());
        assert_eq!(err.to_string(), "PDF parse error: invalid xref table");
    }

    #[test]
    fn parse_converts_to_invalid_path() {
        let doc_err: DocError = BackendError::Parse("bad header".to_string()).into();
        match doc_err {
            DocError::InvalidPath { path, reason } => {
                assert_eq!(path, IN_MEMORY_PATH);
                assert_eq!(reason, "bad header");
            }
            other => panic!("expected InvalidPath, got {other:?}"),
        }
    }

    #[test]
    fn decrypt_converts_to_invalid_password() {
        let doc_err: DocError = BackendError::Decrypt("incorrect password".to_string()).into();
        assert_eq!(doc_err, DocError::InvalidPassword);
    }

    #[test]
    fn page_out_of_range_converts_to_one_based_page_not_found() {
        let err = BackendError::PageOutOfRange { index: 4, count: 3 };
        assert_eq!(err.to_string(), "page index 4 out of range (0..3)");
        let doc_err: DocError = err.into();
        assert_eq!(doc_err, DocError::PageNotFound { page: 5 });
    }

    #[test]
    fn backend_error_implements_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(BackendError::Parse("test".to_string()));
        assert!(err.to_string().contains("test"));
    }
}
