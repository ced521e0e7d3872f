//! An opened, unlocked PDF and the three read operations run against it.

use std::fmt::Display;
use std::path::Path;

use chrono::{Local, TimeZone};
use pdftext_core::{DocError, DocumentInfo, DocumentMetadata};
use pdftext_parse::{LopdfBackend, LopdfDocument, PdfBackend};
use tracing::{debug, warn};

/// A PDF document opened for a single request.
///
/// A `Document` only exists once the file has been parsed and, if it is
/// encrypted, unlocked. It is read-only and is meant to be dropped when the
/// request that opened it completes.
///
/// # Example
///
/// ```ignore
/// let doc = Document::open_file("report.pdf", "")?;
/// assert_eq!(doc.metadata().page_count, doc.page_count());
/// let text = doc.extract_page(1)?;
/// ```
#[derive(Debug)]
pub struct Document {
    doc: LopdfDocument,
}

impl Document {
    /// Open a PDF document from a file path.
    ///
    /// Reads the file into memory and delegates to [`Document::open`]. The
    /// file is never modified.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::InvalidPath`] if the path does not exist, is not a
    /// regular file, cannot be read, or is not a parseable PDF. Returns
    /// [`DocError::InvalidPassword`] if the document is encrypted and
    /// `password` does not unlock it.
    pub fn open_file(path: impl AsRef<Path>, password: &str) -> Result<Self, DocError> {
        let path = path.as_ref();
        let shown = path.display().to_string();

        let meta =
            std::fs::metadata(path).map_err(|e| DocError::invalid_path(&shown, e.to_string()))?;
        if !meta.is_file() {
            return Err(DocError::invalid_path(&shown, "not a regular file"));
        }
        let bytes = std::fs::read(path).map_err(|e| DocError::invalid_path(&shown, e.to_string()))?;

        Self::open(&bytes, password).map_err(|err| match err {
            DocError::InvalidPath { reason, .. } => DocError::InvalidPath {
                path: shown.clone(),
                reason,
            },
            other => other,
        })
    }

    /// Open a PDF document from bytes.
    ///
    /// An empty `password` is a valid attempt and opens documents that have
    /// no user password. Unencrypted documents ignore the password.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::InvalidPath`] if the bytes are not a parseable PDF
    /// and [`DocError::InvalidPassword`] if unlocking fails.
    pub fn open(bytes: &[u8], password: &str) -> Result<Self, DocError> {
        let doc = LopdfBackend::open_with_password(bytes, password)
            .map_err(DocError::from)?;
        Ok(Self { doc })
    }

    /// Return the number of pages in the document.
    pub fn page_count(&self) -> usize {
        LopdfBackend::page_count(&self.doc)
    }

    /// Read page count and descriptive metadata, dates in local time.
    ///
    /// Never fails: attributes the document lacks, and dates that cannot be
    /// parsed, are reported as absent.
    pub fn metadata(&self) -> DocumentMetadata {
        self.metadata_in(&Local)
    }

    /// Like [`Document::metadata`], rendering dates in the given time zone.
    pub fn metadata_in<Tz>(&self, tz: &Tz) -> DocumentMetadata
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let dict = LopdfBackend::info_dictionary(&self.doc);
        DocumentMetadata {
            page_count: self.page_count(),
            info: DocumentInfo::from_dictionary(&dict, tz),
        }
    }

    /// Extract the text of one page (1-based).
    ///
    /// A page with no text layer yields an empty string.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::PageNotFound`] carrying `page_number` if it is 0 or
    /// greater than the page count.
    pub fn extract_page(&self, page_number: usize) -> Result<String, DocError> {
        let index = page_number
            .checked_sub(1)
            .filter(|&i| i < self.page_count())
            .ok_or(DocError::PageNotFound { page: page_number })?;
        Ok(self.page_text_at(index))
    }

    /// Extract the text of several pages (1-based), in request order.
    ///
    /// The result has one entry per requested number, duplicates included.
    /// A page that does not exist contributes an empty string and does not
    /// stop the remaining pages.
    pub fn extract_pages(&self, page_numbers: &[usize]) -> Vec<String> {
        page_numbers
            .iter()
            .map(|&page| {
                self.extract_page(page).unwrap_or_else(|_| {
                    debug!(page, "requested page not in document, substituting empty text");
                    String::new()
                })
            })
            .collect()
    }

    /// Text of the page at a valid 0-based index.
    ///
    /// Content that cannot be decoded counts as no text layer.
    fn page_text_at(&self, index: usize) -> String {
        match LopdfBackend::page_text(&self.doc, index) {
            Ok(text) => text,
            Err(err) => {
                warn!(page = index + 1, error = %err, "page content not decodable, returning empty text");
                String::new()
            }
        }
    }
}
