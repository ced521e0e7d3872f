//! pdftext: Password-aware PDF metadata and text extraction.
//!
//! This is the public API facade crate for pdftext-rs. It re-exports types from
//! pdftext-core and uses pdftext-parse for PDF reading.
//!
//! # Architecture
//!
//! - **pdftext-core**: Error taxonomy, metadata types, typed requests
//! - **pdftext-parse**: PDF loading, unlocking, and page text (lopdf backend)
//! - **pdftext** (this crate): [`Document`] operations and the worker-pool
//!   [`DocumentService`]
//!
//! Every request opens its own [`Document`], uses it, and drops it. Nothing is
//! cached between requests.
//!
//! ```ignore
//! let doc = pdftext::Document::open_file("report.pdf", "")?;
//! let meta = doc.metadata();
//! let first = doc.extract_page(1)?;
//! let some = doc.extract_pages(&[1, 5, 2]);
//! ```

mod document;
mod service;

pub use document::Document;
pub use pdftext_core::{
    DocError, DocumentInfo, DocumentMetadata, ErrorBody, INFO_DATE_FORMAT, InfoDictionary,
    Request, Response, format_info_date, parse_pdf_date,
};
pub use pdftext_parse;
pub use service::{Completion, DocumentService, ServiceOptions, handle};
