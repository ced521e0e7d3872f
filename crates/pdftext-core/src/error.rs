//! Error taxonomy for pdftext-rs.
//!
//! Provides [`DocError`], the single terminal error type reported for a
//! request, and [`ErrorBody`], its `{code, message}` wire form.

use std::fmt;

/// Terminal error for a document request.
///
/// Every variant maps to a stable machine-readable code (see
/// [`DocError::code`]). None of these errors is retried.
#[derive(Debug, Clone, PartialEq)]
pub enum DocError {
    /// A request field is missing or has the wrong type.
    ///
    /// Raised by the transport before the extraction core is invoked.
    InvalidArguments(String),
    /// The path does not resolve to a readable, parseable PDF.
    InvalidPath {
        /// The path as supplied by the caller.
        path: String,
        /// Why the path was rejected.
        reason: String,
    },
    /// The document is protected and the supplied password does not unlock it.
    InvalidPassword,
    /// The requested page does not exist in the document.
    PageNotFound {
        /// The requested page number (1-based).
        page: usize,
    },
    /// The request never produced a result (worker lost or panicked).
    Internal(String),
}

impl DocError {
    /// Build an [`InvalidPath`](DocError::InvalidPath) error.
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        DocError::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Returns the machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            DocError::InvalidArguments(_) => "INVALID_ARGUMENTS",
            DocError::InvalidPath { .. } => "INVALID_PATH",
            DocError::InvalidPassword => "INVALID_PASSWORD",
            DocError::PageNotFound { .. } => "PAGE_NOT_FOUND",
            DocError::Internal(_) => "INTERNAL",
        }
    }

    /// Convert into the `{code, message}` pair reported to callers.
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            code: self.code().to_string(),
            message: self.to_string(),
        }
    }
}

impl fmt::Display for DocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocError::InvalidArguments(msg) => write!(f, "invalid arguments: {msg}"),
            DocError::InvalidPath { path, reason } => {
                write!(f, "file path or file type is invalid: {path} ({reason})")
            }
            DocError::InvalidPassword => write!(f, "the password is invalid"),
            DocError::PageNotFound { page } => write!(f, "page {page} not found in document"),
            DocError::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for DocError {}

/// Wire form of a [`DocError`]: a machine code and a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorBody {
    /// Machine-readable code (e.g. `INVALID_PATH`).
    pub code: String,
    /// Human-readable description.
    pub message: String,
}

impl ErrorBody {
    /// Create an error body from arbitrary parts.
    ///
    /// Used by transports for conditions outside the [`DocError`] taxonomy,
    /// such as an unrecognized operation name.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&DocError> for ErrorBody {
    fn from(err: &DocError) -> Self {
        err.to_body()
    }
}
