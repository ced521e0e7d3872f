//! pdftext-core: Backend-independent data types for pdftext-rs.
//!
//! This crate provides the error taxonomy ([`DocError`]), the document
//! metadata types ([`InfoDictionary`], [`DocumentInfo`], [`DocumentMetadata`])
//! with PDF date handling, and the typed [`Request`] / [`Response`] values
//! exchanged between a transport and the extraction core.

#![warn(missing_docs)]

pub mod error;
pub mod metadata;
pub mod request;

pub use error::{DocError, ErrorBody};
pub use metadata::{
    DocumentInfo, DocumentMetadata, INFO_DATE_FORMAT, InfoDictionary, format_info_date,
    parse_pdf_date,
};
pub use request::{Request, Response};
