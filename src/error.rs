//! Error types for pdfpager.

use std::io;
use thiserror::Error;

/// Result type alias for pdfpager operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading or viewing a document.
#[derive(Error, Debug)]
pub enum Error {
    /// Reading the document from disk or a reader failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// No `%PDF-` header near the start of the input.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// Header version outside 1.0-1.7 and 2.0.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// lopdf rejected the file, or a page attribute is unusable in strict mode.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The document needs a password.
    #[error("Document is encrypted")]
    Encrypted,

    /// A referenced object (page, pages node) is absent.
    #[error("Missing required object: {0}")]
    MissingObject(String),

    /// A page boundary box is malformed.
    #[error("Invalid {kind} on page {page}: {reason}")]
    InvalidPageBox {
        page: u32,
        kind: &'static str,
        reason: String,
    },

    /// Error producing output (JSON serialization).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Requested page does not exist: (requested, page count), 1-based.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// A content-fit mode name was not recognized.
    #[error("Unknown content mode: {0}")]
    InvalidFitMode(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::PageOutOfRange(4, 3).to_string(),
            "Page 4 is out of range (document has 3 pages)"
        );
        assert_eq!(
            Error::InvalidFitMode("stretch".to_string()).to_string(),
            "Unknown content mode: stretch"
        );

        let err = Error::InvalidPageBox {
            page: 2,
            kind: "CropBox",
            reason: "expected 4 numbers".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid CropBox on page 2: expected 4 numbers"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let missing = io::Error::new(io::ErrorKind::NotFound, "Sample Document.pdf");
        let err: Error = missing.into();
        assert!(matches!(err, Error::Io(ref e) if e.kind() == io::ErrorKind::NotFound));
    }
}
