//! PDF backend abstraction layer.
//!
//! Provides a trait-based interface for the few PDF operations the viewer
//! needs, isolating the concrete PDF library (lopdf) from the loader.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Page identifier: (object number, generation number).
pub type PageId = (u32, u16);

/// Pages-tree levels walked when resolving inherited attributes.
const MAX_INHERITANCE_DEPTH: usize = 32;

/// Page attributes a page may inherit from its ancestors in the pages tree.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"MediaBox", b"CropBox", b"Rotate", b"Resources"];

/// A raw page attribute as found in the page tree.
#[derive(Debug, Clone, PartialEq)]
pub enum RawAttribute {
    /// Four numbers `[x0 y0 x1 y1]`.
    Rect([f64; 4]),
    Integer(i64),
    /// Present but not of the expected shape.
    Malformed(String),
}

/// Abstract interface for PDF document access.
///
/// Implementations provide page enumeration, inheritable page attributes and
/// document information entries without exposing any concrete PDF library
/// types.
pub trait PdfBackend {
    /// Return all pages as (page_number → PageId).
    fn pages(&self) -> BTreeMap<u32, PageId>;

    /// Look up a page attribute, walking up the pages tree for inheritable
    /// keys only. `None` when no applicable level defines it.
    fn page_attribute(&self, page: PageId, key: &[u8]) -> Result<Option<RawAttribute>>;

    /// A text entry of the document information dictionary.
    fn info_string(&self, key: &[u8]) -> Option<String>;

    /// PDF version string from the header.
    fn version(&self) -> String;

    fn is_encrypted(&self) -> bool;
}

/// Decode a PDF text string: UTF-16BE with BOM, then UTF-8, then Latin-1.
pub fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let utf16: Vec<u16> = rest
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

// ---------------------------------------------------------------------------
// LopdfBackend: implementation backed by lopdf
// ---------------------------------------------------------------------------

use lopdf::{Dictionary, Document as LopdfDocument, Object};

/// Concrete [`PdfBackend`] backed by `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
}

impl LopdfBackend {
    /// Load from a file path.
    pub fn load_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let doc = LopdfDocument::load(path)?;
        Ok(Self { doc })
    }

    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self { doc })
    }

    /// Wrap an already parsed document.
    pub fn from_document(doc: LopdfDocument) -> Self {
        Self { doc }
    }

    /// Follow a reference to its target; other objects are returned as is.
    fn resolve<'a>(&'a self, obj: &'a Object) -> Result<&'a Object> {
        match obj {
            Object::Reference(id) => Ok(self.doc.get_object(*id)?),
            other => Ok(other),
        }
    }

    fn info_dict(&self) -> Option<&Dictionary> {
        let info = self.doc.trailer.get(b"Info").ok()?;
        self.resolve(info).ok()?.as_dict().ok()
    }
}

impl PdfBackend for LopdfBackend {
    fn pages(&self) -> BTreeMap<u32, PageId> {
        self.doc.get_pages()
    }

    fn page_attribute(&self, page: PageId, key: &[u8]) -> Result<Option<RawAttribute>> {
        let mut dict = self
            .doc
            .get_dictionary(page)
            .map_err(|_| Error::MissingObject(format!("page object {} {} R", page.0, page.1)))?;

        for _ in 0..MAX_INHERITANCE_DEPTH {
            if let Ok(value) = dict.get(key) {
                return Ok(Some(self.convert_attribute(value)));
            }
            if !INHERITABLE_KEYS.contains(&key) {
                return Ok(None);
            }

            let parent = match dict.get(b"Parent") {
                Ok(parent) => parent,
                Err(_) => return Ok(None),
            };
            dict = match self.resolve(parent).and_then(|p| Ok(p.as_dict()?)) {
                Ok(parent_dict) => parent_dict,
                Err(_) => return Ok(None),
            };
        }

        Err(Error::PdfParse(format!(
            "pages tree deeper than {} levels",
            MAX_INHERITANCE_DEPTH
        )))
    }

    fn info_string(&self, key: &[u8]) -> Option<String> {
        match self.resolve(self.info_dict()?.get(key).ok()?).ok()? {
            Object::String(bytes, _) => Some(decode_text_string(bytes)),
            Object::Name(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
            _ => None,
        }
    }

    fn version(&self) -> String {
        self.doc.version.to_string()
    }

    fn is_encrypted(&self) -> bool {
        self.doc.is_encrypted()
    }
}

impl LopdfBackend {
    fn convert_attribute(&self, value: &Object) -> RawAttribute {
        let value = match self.resolve(value) {
            Ok(v) => v,
            Err(e) => return RawAttribute::Malformed(e.to_string()),
        };

        match value {
            Object::Integer(i) => RawAttribute::Integer(*i),
            Object::Real(r) if r.fract() == 0.0 => RawAttribute::Integer(*r as i64),
            Object::Real(r) => RawAttribute::Malformed(format!("expected an integer, found {}", r)),
            Object::Array(items) => {
                if items.len() != 4 {
                    return RawAttribute::Malformed(format!(
                        "expected 4 numbers, found {}",
                        items.len()
                    ));
                }
                let mut rect = [0.0; 4];
                for (slot, item) in rect.iter_mut().zip(items) {
                    match self.resolve(item).ok().and_then(number_from_object) {
                        Some(n) => *slot = n,
                        None => {
                            return RawAttribute::Malformed(format!(
                                "non-numeric entry {:?}",
                                item
                            ))
                        }
                    }
                }
                RawAttribute::Rect(rect)
            }
            other => RawAttribute::Malformed(format!("unexpected object {:?}", other)),
        }
    }
}

/// Helper: extract a number from a `lopdf::Object`.
fn number_from_object(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(*r as f64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;

    fn two_level_tree() -> (LopdfBackend, PageId, PageId) {
        let mut doc = LopdfDocument::with_version("1.5");
        let pages_id = doc.new_object_id();

        let inherits = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
        });
        let overrides = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 200.into(), Object::Real(100.5)],
            "Rotate" => 90,
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![inherits.into(), overrides.into()],
                "Count" => 2,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Rotate" => 180,
            }),
        );
        let catalog = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog);

        (LopdfBackend::from_document(doc), inherits, overrides)
    }

    #[test]
    fn test_decode_text_string_utf8() {
        assert_eq!(decode_text_string(b"Hello"), "Hello");
    }

    #[test]
    fn test_decode_text_string_latin1() {
        // 0xE9 = 'é' in Latin-1
        assert_eq!(decode_text_string(&[0x48, 0x65, 0x6C, 0x6C, 0xE9]), "Hellé");
    }

    #[test]
    fn test_decode_text_string_utf16be() {
        assert_eq!(decode_text_string(&[0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69]), "Hi");
    }

    #[test]
    fn test_inherited_attributes() {
        let (backend, inherits, _) = two_level_tree();

        assert_eq!(
            backend.page_attribute(inherits, b"MediaBox").unwrap(),
            Some(RawAttribute::Rect([0.0, 0.0, 612.0, 792.0]))
        );
        assert_eq!(
            backend.page_attribute(inherits, b"Rotate").unwrap(),
            Some(RawAttribute::Integer(180))
        );
        assert_eq!(backend.page_attribute(inherits, b"CropBox").unwrap(), None);
    }

    #[test]
    fn test_page_level_attributes_win() {
        let (backend, _, overrides) = two_level_tree();

        assert_eq!(
            backend.page_attribute(overrides, b"MediaBox").unwrap(),
            Some(RawAttribute::Rect([0.0, 0.0, 200.0, 100.5]))
        );
        assert_eq!(
            backend.page_attribute(overrides, b"Rotate").unwrap(),
            Some(RawAttribute::Integer(90))
        );
    }

    #[test]
    fn test_non_inheritable_keys_stay_on_the_page() {
        let mut doc = LopdfDocument::with_version("1.5");
        let pages_id = doc.new_object_id();
        let page = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page.into()],
                "Count" => 1,
                "ArtBox" => vec![0.into(), 0.into(), 10.into(), 10.into()],
                "TrimBox" => vec![0.into(), 0.into(), 10.into(), 10.into()],
            }),
        );
        let backend = LopdfBackend::from_document(doc);

        assert_eq!(backend.page_attribute(page, b"ArtBox").unwrap(), None);
        assert_eq!(backend.page_attribute(page, b"TrimBox").unwrap(), None);
    }

    #[test]
    fn test_fractional_rotate_is_malformed() {
        let mut doc = LopdfDocument::with_version("1.5");
        let whole = doc.add_object(dictionary! { "Type" => "Page", "Rotate" => Object::Real(90.0) });
        let fractional =
            doc.add_object(dictionary! { "Type" => "Page", "Rotate" => Object::Real(90.5) });
        let backend = LopdfBackend::from_document(doc);

        assert_eq!(
            backend.page_attribute(whole, b"Rotate").unwrap(),
            Some(RawAttribute::Integer(90))
        );
        assert!(matches!(
            backend.page_attribute(fractional, b"Rotate").unwrap(),
            Some(RawAttribute::Malformed(_))
        ));
    }

    #[test]
    fn test_pages_are_enumerated_in_order() {
        let (backend, inherits, overrides) = two_level_tree();
        let pages = backend.pages();
        assert_eq!(pages.get(&1), Some(&inherits));
        assert_eq!(pages.get(&2), Some(&overrides));
    }

    #[test]
    fn test_missing_info_dictionary() {
        let (backend, _, _) = two_level_tree();
        assert_eq!(backend.info_string(b"Title"), None);
        assert_eq!(backend.version(), "1.5");
    }
}
