//! pdftext-parse: PDF parsing backend.
//!
//! This crate loads PDF bytes, unlocks encrypted documents, enumerates pages,
//! reads the /Info dictionary, and extracts the text of individual pages.
//! It depends on pdftext-core for shared data types.

pub mod backend;
pub mod error;
pub mod lopdf_backend;

pub use backend::PdfBackend;
pub use error::BackendError;
pub use lopdf_backend::{LopdfBackend, LopdfDocument};
pub use pdftext_core;
