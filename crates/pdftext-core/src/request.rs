//! Typed requests and results exchanged with a transport.
//!
//! A transport validates its call envelope and hands the core a [`Request`];
//! the core answers with a [`Response`] or a [`DocError`](crate::DocError).

use crate::metadata::DocumentMetadata;

/// A request to the extraction core.
///
/// Page numbers are 1-based. Every request carries the path and password
/// it needs, since no document is kept open between requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Report page count and descriptive metadata.
    InitDoc {
        /// Filesystem path of the PDF.
        path: String,
        /// Password to unlock the document; empty for none.
        password: String,
    },
    /// Extract the text of a single page.
    GetDocPageText {
        /// Filesystem path of the PDF.
        path: String,
        /// Password to unlock the document; empty for none.
        password: String,
        /// 1-based page number.
        number: usize,
    },
    /// Extract the text of several pages, in request order.
    GetDocText {
        /// Filesystem path of the PDF.
        path: String,
        /// Password to unlock the document; empty for none.
        password: String,
        /// 1-based page numbers. Repeats are allowed and numbers past the
        /// end extract as empty text.
        missing_pages_numbers: Vec<usize>,
    },
}

impl Request {
    /// Operation name as used on the wire.
    pub fn method(&self) -> &'static str {
        match self {
            Request::InitDoc { .. } => "initDoc",
            Request::GetDocPageText { .. } => "getDocPageText",
            Request::GetDocText { .. } => "getDocText",
        }
    }

    /// Path of the document this request targets.
    pub fn path(&self) -> &str {
        match self {
            Request::InitDoc { path, .. }
            | Request::GetDocPageText { path, .. }
            | Request::GetDocText { path, .. } => path,
        }
    }

    /// Password supplied with this request (empty for none).
    pub fn password(&self) -> &str {
        match self {
            Request::InitDoc { password, .. }
            | Request::GetDocPageText { password, .. }
            | Request::GetDocText { password, .. } => password,
        }
    }
}

/// Successful result of a [`Request`].
///
/// Serializes untagged, so each variant appears on the wire as its bare
/// result shape: an object, a string, or an array of strings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum Response {
    /// Result of [`Request::InitDoc`].
    Metadata(DocumentMetadata),
    /// Result of [`Request::GetDocPageText`].
    PageText(String),
    /// Result of [`Request::GetDocText`], one entry per requested page.
    Texts(Vec<String>),
}
