//! PDF parsing backend trait.
//!
//! Defines the [`PdfBackend`] trait that abstracts the few PDF operations the
//! extraction core needs, so the lopdf implementation stays behind one seam.

use pdftext_core::{DocError, InfoDictionary};

/// Trait abstracting PDF parsing operations.
///
/// A backend opens (and if necessary unlocks) a document, reports its page
/// count and /Info dictionary, and extracts the text of a single page.
///
/// # Usage
///
/// ```ignore
/// let doc = MyBackend::open_with_password(pdf_bytes, "")?;
/// let count = MyBackend::page_count(&doc);
/// let text = MyBackend::page_text(&doc, 0)?;
/// ```
pub trait PdfBackend {
    /// The parsed, unlocked document type.
    type Document;

    /// Backend-specific error type, convertible to [`DocError`].
    type Error: std::error::Error + Into<DocError>;

    /// Parse PDF bytes and unlock the document with `password`.
    ///
    /// An empty password is a valid attempt. Unencrypted documents ignore
    /// the password. A returned document has always passed unlocking.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a parseable PDF, or if the
    /// document is encrypted and `password` does not unlock it.
    fn open_with_password(bytes: &[u8], password: &str) -> Result<Self::Document, Self::Error>;

    /// Return the number of pages in the document.
    fn page_count(doc: &Self::Document) -> usize;

    /// Read the /Info dictionary.
    ///
    /// Missing or malformed entries are reported as `None`; this never fails.
    fn info_dictionary(doc: &Self::Document) -> InfoDictionary;

    /// Extract the plain text of the page at 0-based `index`.
    ///
    /// A page without a text layer yields an empty string.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range or the page content
    /// cannot be decoded.
    fn page_text(doc: &Self::Document, index: usize) -> Result<String, Self::Error>;
}
