//! Document model types.
//!
//! The loader turns a PDF into these plain values. Nothing here touches the
//! PDF library; pages carry only the geometry needed to place them on screen.

mod descriptor;
mod document;
mod page;

pub use descriptor::{build_descriptors, page_number_label, PageDescriptor, DEFAULT_TITLE};
pub use document::{Document, Metadata};
pub use page::{normalize_rotation, Page, PageBox, DEFAULT_MEDIA_BOX};
