//! PDF loading module.

pub mod backend;
mod loader;
mod options;

pub use backend::{LopdfBackend, PageId, PdfBackend, RawAttribute};
pub use loader::{parse_pdf_date, DocumentLoader};
pub use options::{ErrorMode, LoadOptions};
