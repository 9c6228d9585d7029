//! Document-level types.

use super::Page;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A loaded PDF document: metadata plus the geometry of every page.
///
/// Built once by the loader and read-only afterwards. Page descriptors
/// borrow pages from it, so it must outlive the viewing session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (title, author, etc.)
    pub metadata: Metadata,

    /// Pages in document order
    pub pages: Vec<Page>,

    /// Last path component of the file the document came from, if any.
    pub source_name: Option<String>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Get a page by zero-based index.
    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Get a page by number (1-indexed).
    pub fn page_by_number(&self, number: u32) -> Option<&Page> {
        number
            .checked_sub(1)
            .and_then(|index| self.pages.get(index as usize))
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
        self.metadata.page_count = self.pages.len() as u32;
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Title attribute from the document information dictionary.
    ///
    /// Blank titles count as missing; others are returned untouched.
    pub fn title_attribute(&self) -> Option<&str> {
        self.metadata
            .title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
    }

    /// Title to display: the title attribute, then the source file name,
    /// then `fallback`.
    pub fn display_title<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.title_attribute()
            .or(self.source_name.as_deref())
            .unwrap_or(fallback)
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Creator application
    pub creator: Option<String>,

    /// PDF producer
    pub producer: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,

    /// PDF version (e.g., "1.7")
    pub pdf_version: String,

    /// Total number of pages
    pub page_count: u32,

    /// Whether the document is encrypted
    pub encrypted: bool,
}

impl Metadata {
    /// Create new metadata with PDF version.
    pub fn with_version(version: impl Into<String>) -> Self {
        Self {
            pdf_version: version.into(),
            ..Default::default()
        }
    }
}
