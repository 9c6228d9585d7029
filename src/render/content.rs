//! Per-page screen content: two labels and a page view.

use kurbo::Size;

use super::surface::DrawingSurface;
use super::view::PageView;
use crate::config::ViewerOptions;
use crate::model::PageDescriptor;

/// What one pager screen shows for a descriptor.
#[derive(Debug, Clone)]
pub struct PageContent<'doc> {
    title_label: String,
    page_number_label: String,
    page_view: PageView<'doc>,
}

impl<'doc> PageContent<'doc> {
    /// Bind a descriptor to labels and a view configured from `options`.
    pub fn new(descriptor: &PageDescriptor<'doc>, options: &ViewerOptions) -> Self {
        let page_view = PageView::from_options(options).with_page(Some(descriptor.page()));

        Self {
            title_label: descriptor.title_text().to_string(),
            page_number_label: descriptor.page_number_text().to_string(),
            page_view,
        }
    }

    pub fn title_label(&self) -> &str {
        &self.title_label
    }

    pub fn page_number_label(&self) -> &str {
        &self.page_number_label
    }

    pub fn page_view(&self) -> &PageView<'doc> {
        &self.page_view
    }

    /// Follow a change in the available screen area.
    pub fn resize(&mut self, size: Size) {
        self.page_view.set_size(size);
    }

    pub fn draw<S: DrawingSurface + ?Sized>(&self, surface: &mut S) {
        self.page_view.draw(surface);
    }
}
