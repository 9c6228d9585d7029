//! Viewer configuration.

use std::path::PathBuf;

use kurbo::Size;

use crate::model::DEFAULT_TITLE;
use crate::parser::LoadOptions;
use crate::render::{ContentFitMode, Placeholder};

/// File name of the document opened when none is given.
pub const BUNDLED_DOCUMENT_NAME: &str = "Sample Document.pdf";

/// Default view size in points (a phone-sized screen).
pub const DEFAULT_VIEW_SIZE: Size = Size::new(390.0, 844.0);

/// Options for opening and displaying a document.
#[derive(Debug, Clone)]
pub struct ViewerOptions {
    /// Directory holding the bundled document
    pub bundle_dir: PathBuf,

    /// File name of the bundled document
    pub document_name: String,

    /// Title used when the document has no title and no file name
    pub default_title: String,

    /// How pages are fitted into the view
    pub fit_mode: ContentFitMode,

    /// Draw through the crop box rather than the media box
    pub use_crop_box: bool,

    /// Size of the page view
    pub view_size: Size,

    /// Image shown when a view has no page
    pub placeholder: Option<Placeholder>,

    /// Loader options
    pub load: LoadOptions,
}

impl ViewerOptions {
    /// Create new viewer options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bundle directory.
    pub fn with_bundle_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.bundle_dir = dir.into();
        self
    }

    /// Set the bundled document's file name.
    pub fn with_document_name(mut self, name: impl Into<String>) -> Self {
        self.document_name = name.into();
        self
    }

    /// Set the fallback title.
    pub fn with_default_title(mut self, title: impl Into<String>) -> Self {
        self.default_title = title.into();
        self
    }

    /// Set the content-fit mode.
    pub fn with_fit_mode(mut self, mode: ContentFitMode) -> Self {
        self.fit_mode = mode;
        self
    }

    /// Draw pages through their media box.
    pub fn with_media_box(mut self) -> Self {
        self.use_crop_box = false;
        self
    }

    /// Set the view size in points.
    pub fn with_view_size(mut self, width: f64, height: f64) -> Self {
        self.view_size = Size::new(width, height);
        self
    }

    /// Set or clear the placeholder image.
    pub fn with_placeholder(mut self, placeholder: Option<Placeholder>) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Set loader options.
    pub fn with_load_options(mut self, load: LoadOptions) -> Self {
        self.load = load;
        self
    }

    /// Full path of the bundled document.
    pub fn bundled_document_path(&self) -> PathBuf {
        self.bundle_dir.join(&self.document_name)
    }
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            bundle_dir: PathBuf::from("."),
            document_name: BUNDLED_DOCUMENT_NAME.to_string(),
            default_title: DEFAULT_TITLE.to_string(),
            fit_mode: ContentFitMode::default(),
            use_crop_box: true,
            view_size: DEFAULT_VIEW_SIZE,
            placeholder: None,
            load: LoadOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewer_options_builder() {
        let options = ViewerOptions::new()
            .with_bundle_dir("/srv/docs")
            .with_document_name("Manual.pdf")
            .with_fit_mode(ContentFitMode::ScaleAspectFill)
            .with_media_box()
            .with_view_size(100.0, 200.0);

        assert_eq!(
            options.bundled_document_path(),
            PathBuf::from("/srv/docs/Manual.pdf")
        );
        assert_eq!(options.fit_mode, ContentFitMode::ScaleAspectFill);
        assert!(!options.use_crop_box);
        assert_eq!(options.view_size, Size::new(100.0, 200.0));
    }

    #[test]
    fn test_default_options() {
        let options = ViewerOptions::default();
        assert_eq!(options.document_name, "Sample Document.pdf");
        assert_eq!(options.default_title, "Title");
        assert!(options.use_crop_box);
        assert!(options.placeholder.is_none());
        assert_eq!(options.fit_mode, ContentFitMode::ScaleToFill);
    }
}
