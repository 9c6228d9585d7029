//! Document loader: resolves page geometry and metadata through a backend.

use std::io::Read;
use std::path::Path;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use kurbo::Rect;

use crate::detect::{sniff_bytes, sniff_file};
use crate::error::{Error, Result};
use crate::model::{normalize_rotation, Document, Metadata, Page, PageBox, DEFAULT_MEDIA_BOX};

use super::backend::{LopdfBackend, PageId, PdfBackend, RawAttribute};
use super::options::{ErrorMode, LoadOptions};

/// Loads a [`Document`] from a PDF backend.
pub struct DocumentLoader<B: PdfBackend = LopdfBackend> {
    backend: B,
    options: LoadOptions,
    source_name: Option<String>,
}

impl DocumentLoader<LopdfBackend> {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, LoadOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: LoadOptions) -> Result<Self> {
        let path = path.as_ref();

        if !options.skip_detection {
            sniff_file(path)?;
        }

        let backend = LopdfBackend::load_file(path)?;
        let source_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());

        log::debug!("Opened {} (PDF {})", path.display(), backend.version());

        Ok(Self {
            backend,
            options,
            source_name,
        })
    }

    /// Load from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, LoadOptions::default())
    }

    /// Load from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: LoadOptions) -> Result<Self> {
        if !options.skip_detection {
            sniff_bytes(data)?;
        }
        let backend = LopdfBackend::load_bytes(data)?;
        Ok(Self::with_backend(backend, options))
    }

    /// Load from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }
}

impl<B: PdfBackend> DocumentLoader<B> {
    /// Use an arbitrary backend.
    pub fn with_backend(backend: B, options: LoadOptions) -> Self {
        Self {
            backend,
            options,
            source_name: None,
        }
    }

    /// Name reported as the document's source file.
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Resolve metadata and every page into a [`Document`].
    pub fn load(&self) -> Result<Document> {
        let mut document = Document::new();
        document.metadata = self.load_metadata();
        document.source_name = self.source_name.clone();

        for (number, id) in self.backend.pages() {
            let page = self.load_page(number, id)?;
            log::debug!(
                "Page {}: crop {:?}, rotation {}",
                page.number,
                page.crop_box,
                page.rotation
            );
            document.add_page(page);
        }

        log::info!(
            "Loaded {} ({} pages, PDF {})",
            document.source_name.as_deref().unwrap_or("document"),
            document.page_count(),
            document.metadata.pdf_version
        );

        Ok(document)
    }

    fn load_metadata(&self) -> Metadata {
        let mut metadata = Metadata::with_version(self.backend.version());
        metadata.encrypted = self.backend.is_encrypted();
        metadata.title = self.backend.info_string(b"Title");
        metadata.author = self.backend.info_string(b"Author");
        metadata.subject = self.backend.info_string(b"Subject");
        metadata.creator = self.backend.info_string(b"Creator");
        metadata.producer = self.backend.info_string(b"Producer");
        metadata.created = self
            .backend
            .info_string(b"CreationDate")
            .and_then(|s| parse_pdf_date(&s));
        metadata.modified = self
            .backend
            .info_string(b"ModDate")
            .and_then(|s| parse_pdf_date(&s));
        metadata
    }

    fn load_page(&self, number: u32, id: PageId) -> Result<Page> {
        let media_box = match self.page_rect(number, id, PageBox::Media)? {
            Some(rect) => rect,
            None => {
                log::warn!("Page {} has no MediaBox, assuming US Letter", number);
                DEFAULT_MEDIA_BOX
            }
        };

        let mut page = Page::new(number, media_box);
        if let Some(rect) = self.page_rect(number, id, PageBox::Crop)? {
            page = page.with_box(PageBox::Crop, rect);
        }

        // Advisory boxes: a malformed one is dropped in either mode.
        for kind in [PageBox::Bleed, PageBox::Trim, PageBox::Art] {
            match self.page_rect(number, id, kind) {
                Ok(Some(rect)) => page = page.with_box(kind, rect),
                Ok(None) => {}
                Err(e) => log::warn!("Ignoring {} on page {}: {}", kind, number, e),
            }
        }
        page.rotation = self.page_rotation(number, id)?;

        Ok(page)
    }

    fn page_rect(&self, number: u32, id: PageId, kind: PageBox) -> Result<Option<Rect>> {
        let reason = match self.backend.page_attribute(id, kind.key().as_bytes())? {
            None => return Ok(None),
            Some(RawAttribute::Rect([x0, y0, x1, y1])) => {
                let rect = Rect::new(x0, y0, x1, y1).abs();
                if rect.width() > 0.0 && rect.height() > 0.0 {
                    return Ok(Some(rect));
                }
                "zero area".to_string()
            }
            Some(RawAttribute::Integer(i)) => format!("expected an array, found {}", i),
            Some(RawAttribute::Malformed(reason)) => reason,
        };

        match self.options.error_mode {
            ErrorMode::Strict => Err(Error::InvalidPageBox {
                page: number,
                kind: kind.key(),
                reason,
            }),
            ErrorMode::Lenient => {
                log::warn!("Ignoring {} on page {}: {}", kind, number, reason);
                Ok(None)
            }
        }
    }

    fn page_rotation(&self, number: u32, id: PageId) -> Result<u16> {
        let reason = match self.backend.page_attribute(id, b"Rotate")? {
            None => return Ok(0),
            Some(RawAttribute::Integer(degrees)) => match normalize_rotation(degrees) {
                Some(rotation) => return Ok(rotation),
                None => format!("{} is not a multiple of 90", degrees),
            },
            Some(RawAttribute::Rect(_)) => "expected an integer, found an array".to_string(),
            Some(RawAttribute::Malformed(reason)) => reason,
        };

        match self.options.error_mode {
            ErrorMode::Strict => Err(Error::PdfParse(format!(
                "invalid Rotate on page {}: {}",
                number, reason
            ))),
            ErrorMode::Lenient => {
                log::warn!("Ignoring Rotate on page {}: {}", number, reason);
                Ok(0)
            }
        }
    }
}

/// Parse a PDF date string (D:YYYYMMDDHHmmSSOHH'mm').
///
/// Everything after the year is optional; a missing offset means UTC.
pub fn parse_pdf_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    let s = s.strip_prefix("D:").unwrap_or(s);

    let field = |range: std::ops::Range<usize>, default: u32| -> Option<u32> {
        match s.get(range) {
            Some(digits) if digits.bytes().all(|b| b.is_ascii_digit()) => digits.parse().ok(),
            Some(_) => None,
            None => Some(default),
        }
    };

    let year: i32 = s
        .get(0..4)
        .filter(|digits| digits.bytes().all(|b| b.is_ascii_digit()))?
        .parse()
        .ok()?;
    let month = field(4..6, 1)?;
    let day = field(6..8, 1)?;
    let hour = field(8..10, 0)?;
    let minute = field(10..12, 0)?;
    let second = field(12..14, 0)?;

    let naive = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)?;

    let offset_seconds = match s.get(14..15) {
        Some(sign @ ("+" | "-")) => {
            let digits: String = s[15..].chars().filter(char::is_ascii_digit).collect();
            let hours: i32 = digits.get(0..2)?.parse().ok()?;
            let minutes: i32 = digits.get(2..4).and_then(|m| m.parse().ok()).unwrap_or(0);
            let total = hours * 3600 + minutes * 60;
            if sign == "-" {
                -total
            } else {
                total
            }
        }
        _ => 0,
    };

    let offset = FixedOffset::east_opt(offset_seconds)?;
    let local = offset.from_local_datetime(&naive).single()?;
    Some(local.with_timezone(&Utc))
}
