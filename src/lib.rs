//! # pdfpager
//!
//! Page-at-a-time PDF viewing for Rust.
//!
//! This library loads a PDF, builds one descriptor per page (title,
//! "Page N of M" label, page reference), answers the before/after queries of
//! a swipe-style pager and computes how each page is fitted into a view.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfpager::{ContentFitMode, Viewer};
//!
//! fn main() -> pdfpager::Result<()> {
//!     let session = Viewer::new()
//!         .with_fit_mode(ContentFitMode::ScaleAspectFit)
//!         .open("document.pdf")?;
//!
//!     let pager = session.pager();
//!     if let Some(first) = pager.initial() {
//!         println!("{} - {}", first.title_text(), first.page_number_text());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Pieces
//!
//! - **Loading**: [`parser::DocumentLoader`] over the lopdf-backed
//!   [`parser::PdfBackend`]
//! - **Model**: [`Document`], [`Page`] geometry, [`PageDescriptor`]
//! - **Paging**: [`PagingCoordinator`]
//! - **Rendering**: [`fit_transform`], [`PageView`], [`DrawingSurface`]

pub mod config;
pub mod detect;
pub mod error;
pub mod model;
pub mod paging;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use config::{ViewerOptions, BUNDLED_DOCUMENT_NAME};
pub use detect::{is_pdf_bytes, sniff_bytes, sniff_file, PdfHeader};
pub use error::{Error, Result};
pub use model::{build_descriptors, Document, Metadata, Page, PageBox, PageDescriptor};
pub use paging::PagingCoordinator;
pub use parser::{DocumentLoader, ErrorMode, LoadOptions};
pub use render::{
    fit_transform, ContentFitMode, DrawCommand, DrawingSurface, JsonFormat, PageContent,
    PageView, Placeholder, RecordingSurface,
};

use std::io::Read;
use std::path::Path;

/// Load a PDF file.
///
/// # Example
///
/// ```no_run
/// let doc = pdfpager::open_file("document.pdf").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn open_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    DocumentLoader::open(path)?.load()
}

/// Load a PDF file with custom options.
///
/// # Example
///
/// ```no_run
/// use pdfpager::{open_file_with_options, LoadOptions};
///
/// let doc = open_file_with_options("scan.pdf", LoadOptions::new().lenient()).unwrap();
/// ```
pub fn open_file_with_options<P: AsRef<Path>>(path: P, options: LoadOptions) -> Result<Document> {
    DocumentLoader::open_with_options(path, options)?.load()
}

/// Load a PDF from bytes.
pub fn open_bytes(data: &[u8]) -> Result<Document> {
    DocumentLoader::from_bytes(data)?.load()
}

/// Load a PDF from a reader.
pub fn open_reader<R: Read>(reader: R) -> Result<Document> {
    DocumentLoader::from_reader(reader)?.load()
}

/// Load the bundled document named by `options`.
///
/// This is the startup step of a viewer: failure means there is nothing to
/// show.
pub fn open_bundled(options: &ViewerOptions) -> Result<Document> {
    let path = options.bundled_document_path();
    log::debug!("Opening bundled document {}", path.display());
    open_file_with_options(path, options.load.clone())
}

/// Builder for opening a document into a viewing session.
///
/// # Example
///
/// ```no_run
/// use pdfpager::{ContentFitMode, Viewer};
///
/// let session = Viewer::new()
///     .with_bundle_dir("./assets")
///     .with_fit_mode(ContentFitMode::ScaleAspectFit)
///     .open_bundled()?;
/// println!("{} pages", session.document().page_count());
/// # Ok::<(), pdfpager::Error>(())
/// ```
pub struct Viewer {
    options: ViewerOptions,
}

impl Viewer {
    /// Create a new Viewer builder.
    pub fn new() -> Self {
        Self {
            options: ViewerOptions::default(),
        }
    }

    /// Start from existing options.
    pub fn with_options(options: ViewerOptions) -> Self {
        Self { options }
    }

    /// Set the directory holding the bundled document.
    pub fn with_bundle_dir(mut self, dir: impl Into<std::path::PathBuf>) -> Self {
        self.options = self.options.with_bundle_dir(dir);
        self
    }

    /// Set the content-fit mode.
    pub fn with_fit_mode(mut self, mode: ContentFitMode) -> Self {
        self.options = self.options.with_fit_mode(mode);
        self
    }

    /// Set the view size in points.
    pub fn with_view_size(mut self, width: f64, height: f64) -> Self {
        self.options = self.options.with_view_size(width, height);
        self
    }

    /// Draw pages through their media box.
    pub fn with_media_box(mut self) -> Self {
        self.options = self.options.with_media_box();
        self
    }

    /// Replace malformed page boxes with defaults instead of failing.
    pub fn lenient(mut self) -> Self {
        self.options.load = self.options.load.lenient();
        self
    }

    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(self, path: P) -> Result<ViewerSession> {
        let document = open_file_with_options(path, self.options.load.clone())?;
        Ok(ViewerSession::new(document, self.options))
    }

    /// Open the bundled document.
    pub fn open_bundled(self) -> Result<ViewerSession> {
        let document = open_bundled(&self.options)?;
        Ok(ViewerSession::new(document, self.options))
    }

    /// Open a PDF from bytes.
    pub fn open_bytes(self, data: &[u8]) -> Result<ViewerSession> {
        let document =
            DocumentLoader::from_bytes_with_options(data, self.options.load.clone())?.load()?;
        Ok(ViewerSession::new(document, self.options))
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new()
    }
}

/// A loaded document plus the options it is viewed with.
///
/// Owns the document; descriptors, pagers and views borrow from it.
pub struct ViewerSession {
    document: Document,
    options: ViewerOptions,
}

impl ViewerSession {
    /// Wrap an already loaded document.
    pub fn new(document: Document, options: ViewerOptions) -> Self {
        Self { document, options }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn options(&self) -> &ViewerOptions {
        &self.options
    }

    /// Title shown on every page.
    pub fn title(&self) -> &str {
        self.document.display_title(&self.options.default_title)
    }

    /// One descriptor per page, in page order.
    pub fn descriptors(&self) -> Vec<PageDescriptor<'_>> {
        build_descriptors(&self.document, &self.options.default_title)
    }

    /// Pager over all pages, showing the first.
    pub fn pager(&self) -> PagingCoordinator<'_> {
        PagingCoordinator::new(self.descriptors())
    }

    /// Screen content for a descriptor, using the session's view options.
    pub fn content<'s>(&'s self, descriptor: &PageDescriptor<'s>) -> PageContent<'s> {
        PageContent::new(descriptor, &self.options)
    }

    /// Record the draw commands for the page at `index` (zero-based).
    pub fn plan_page(&self, index: usize) -> Result<Vec<DrawCommand>> {
        let descriptors = self.descriptors();
        let descriptor = descriptors.get(index).ok_or_else(|| {
            Error::PageOutOfRange(
                page_number(index),
                u32::try_from(descriptors.len()).unwrap_or(u32::MAX),
            )
        })?;

        let mut surface = RecordingSurface::new();
        self.content(descriptor).draw(&mut surface);
        Ok(surface.into_commands())
    }

    /// Record the draw commands of a view with no page bound.
    ///
    /// Only the placeholder, when configured, is drawn.
    pub fn plan_blank(&self) -> Vec<DrawCommand> {
        let mut surface = RecordingSurface::new();
        PageView::from_options(&self.options).draw(&mut surface);
        surface.into_commands()
    }
}

/// 1-based page number for a zero-based index, saturating at `u32::MAX`.
fn page_number(index: usize) -> u32 {
    u32::try_from(index)
        .ok()
        .and_then(|i| i.checked_add(1))
        .unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with_pages(count: u32) -> ViewerSession {
        let mut doc = Document::new();
        for number in 1..=count {
            doc.add_page(Page::letter(number));
        }
        ViewerSession::new(doc, ViewerOptions::default())
    }

    #[test]
    fn test_viewer_builder() {
        let viewer = Viewer::new()
            .lenient()
            .with_media_box()
            .with_fit_mode(ContentFitMode::Center)
            .with_view_size(10.0, 20.0);

        assert_eq!(viewer.options.load.error_mode, ErrorMode::Lenient);
        assert!(!viewer.options.use_crop_box);
        assert_eq!(viewer.options.fit_mode, ContentFitMode::Center);
    }

    #[test]
    fn test_open_bytes_rejects_garbage() {
        assert!(open_bytes(b"").is_err());
        assert!(matches!(open_bytes(b"%PDF"), Err(Error::UnknownFormat)));
        assert!(Viewer::new().open_bytes(b"not a pdf").is_err());
    }

    #[test]
    fn test_open_bundled_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let options = ViewerOptions::new().with_bundle_dir(dir.path());
        assert!(matches!(open_bundled(&options), Err(Error::Io(_))));
    }

    #[test]
    fn test_session_title_and_pager() {
        let session = session_with_pages(3);
        assert_eq!(session.title(), "Title");

        let pager = session.pager();
        assert_eq!(pager.count(), 3);
        assert_eq!(
            pager.initial().map(|d| d.page_number_text()),
            Some("Page 1 of 3")
        );
    }

    #[test]
    fn test_plan_page() {
        let session = session_with_pages(2);
        let commands = session.plan_page(1).unwrap();
        assert!(commands
            .iter()
            .any(|c| matches!(c, DrawCommand::DrawPage { page_number: 2, .. })));

        assert!(matches!(
            session.plan_page(2),
            Err(Error::PageOutOfRange(3, 2))
        ));
    }

    #[test]
    fn test_plan_page_far_out_of_range() {
        let session = session_with_pages(1);
        assert!(matches!(
            session.plan_page(u32::MAX as usize),
            Err(Error::PageOutOfRange(u32::MAX, 1))
        ));
        assert!(matches!(
            session.plan_page(usize::MAX),
            Err(Error::PageOutOfRange(u32::MAX, 1))
        ));
    }

    #[test]
    fn test_plan_blank_draws_placeholder() {
        let options = ViewerOptions::new()
            .with_view_size(196.0, 240.0)
            .with_fit_mode(ContentFitMode::ScaleAspectFit)
            .with_placeholder(Some(Placeholder::document_symbol()));
        let session = ViewerSession::new(Document::new(), options);

        let commands = session.plan_blank();
        let rect = commands
            .iter()
            .find_map(|c| match c {
                DrawCommand::DrawImage { rect, .. } => Some(*rect),
                _ => None,
            })
            .expect("placeholder drawn");
        assert_eq!(rect, kurbo::Rect::new(0.0, 0.0, 196.0, 240.0));

        let bare = ViewerSession::new(Document::new(), ViewerOptions::default());
        assert_eq!(
            bare.plan_blank(),
            vec![DrawCommand::SaveState, DrawCommand::RestoreState]
        );
    }
}
