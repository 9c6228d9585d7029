//! Page descriptors: the per-page display bundle handed to the pager.

use super::{Document, Page};

/// Title used when the document has neither a title attribute nor a file name.
pub const DEFAULT_TITLE: &str = "Title";

/// Display metadata for one page plus a borrowed reference to the page.
///
/// All fields are set at construction; there is no partially built state.
#[derive(Debug, Clone, PartialEq)]
pub struct PageDescriptor<'doc> {
    index: usize,
    title_text: String,
    page_number_text: String,
    page: &'doc Page,
}

impl<'doc> PageDescriptor<'doc> {
    /// Create a descriptor for the page at `index` (zero-based).
    pub fn new(
        index: usize,
        title_text: impl Into<String>,
        page_number_text: impl Into<String>,
        page: &'doc Page,
    ) -> Self {
        Self {
            index,
            title_text: title_text.into(),
            page_number_text: page_number_text.into(),
            page,
        }
    }

    /// Zero-based position in the document.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn title_text(&self) -> &str {
        &self.title_text
    }

    /// Label of the form "Page 3 of 10".
    pub fn page_number_text(&self) -> &str {
        &self.page_number_text
    }

    /// The page this descriptor points at. Owned by the document.
    pub fn page(&self) -> &'doc Page {
        self.page
    }
}

/// "Page N of M" label for a zero-based index.
pub fn page_number_label(index: usize, count: usize) -> String {
    format!("Page {} of {}", index + 1, count)
}

/// Build one descriptor per page, in page order.
///
/// The title falls back from the title attribute to the source file name to
/// `default_title`.
pub fn build_descriptors<'doc>(
    document: &'doc Document,
    default_title: &str,
) -> Vec<PageDescriptor<'doc>> {
    let count = document.page_count();
    let title = document.display_title(default_title);

    log::debug!("Building {} page descriptors titled {:?}", count, title);

    document
        .pages
        .iter()
        .enumerate()
        .map(|(index, page)| {
            PageDescriptor::new(index, title, page_number_label(index, count), page)
        })
        .collect()
}
