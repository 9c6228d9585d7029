//! Page rendering: content-fit transforms, the page view and drawing surfaces.

mod content;
pub mod fit;
mod json;
pub mod surface;
mod view;

pub use content::PageContent;
pub use fit::{fit_transform, ContentFitMode};
pub use json::{to_json, JsonFormat};
pub use surface::{DrawCommand, DrawingSurface, RecordingSurface};
pub use view::{PageView, Placeholder};
