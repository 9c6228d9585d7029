//! JSON output for documents and draw plans.

use serde::Serialize;

use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize any model value (a document, a page, recorded draw commands).
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Document, Page};
    use crate::render::surface::{DrawingSurface, RecordingSurface};

    #[test]
    fn test_document_to_json_pretty() {
        let mut doc = Document::new();
        doc.metadata.title = Some("Test".to_string());
        doc.add_page(Page::letter(1).with_rotation(90));

        let json = to_json(&doc, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\""));
        assert!(json.contains("\"rotation\": 90"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_commands_to_json_compact() {
        let mut surface = RecordingSurface::new();
        surface.save_state();
        surface.draw_page(&Page::letter(3), crate::model::PageBox::Crop);
        surface.restore_state();

        let json = to_json(surface.commands(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains(r#""op":"draw_page""#));
        assert!(json.contains(r#""page_box":"crop""#));
    }
}
