//! Page-level types.

use kurbo::{Affine, Rect, Size};
use serde::{Deserialize, Serialize};

/// US Letter, used when a page declares no usable MediaBox.
pub const DEFAULT_MEDIA_BOX: Rect = Rect::new(0.0, 0.0, 612.0, 792.0);

/// PDF page boundary boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageBox {
    /// Full physical medium.
    Media,
    /// Visible region; what viewers show by default.
    #[default]
    Crop,
    /// Region to which content is clipped in production.
    Bleed,
    /// Intended dimensions of the finished page.
    Trim,
    /// Meaningful content as defined by the author.
    Art,
}

impl PageBox {
    /// Dictionary key of the box in a page object.
    pub fn key(self) -> &'static str {
        match self {
            PageBox::Media => "MediaBox",
            PageBox::Crop => "CropBox",
            PageBox::Bleed => "BleedBox",
            PageBox::Trim => "TrimBox",
            PageBox::Art => "ArtBox",
        }
    }
}

impl std::fmt::Display for PageBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A single page of a loaded document.
///
/// Holds only geometry: content streams stay inside the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Physical medium, in default user space units (points).
    pub media_box: Rect,

    /// Visible region, already clipped to the media box.
    pub crop_box: Rect,

    pub bleed_box: Option<Rect>,
    pub trim_box: Option<Rect>,
    pub art_box: Option<Rect>,

    /// Clockwise display rotation in degrees (0, 90, 180, 270)
    pub rotation: u16,
}

impl Page {
    /// Create a page whose crop box equals its media box.
    pub fn new(number: u32, media_box: Rect) -> Self {
        let media_box = media_box.abs();
        Self {
            number,
            media_box,
            crop_box: media_box,
            bleed_box: None,
            trim_box: None,
            art_box: None,
            rotation: 0,
        }
    }

    /// US Letter page (8.5 x 11 inches).
    pub fn letter(number: u32) -> Self {
        Self::new(number, DEFAULT_MEDIA_BOX)
    }

    /// Set the crop box. It is clipped to the media box.
    pub fn with_crop_box(mut self, crop_box: Rect) -> Self {
        self.crop_box = clip_to(crop_box.abs(), self.media_box);
        self
    }

    /// Set the display rotation. Values are normalized to 0, 90, 180 or 270.
    pub fn with_rotation(mut self, degrees: i64) -> Self {
        self.rotation = normalize_rotation(degrees).unwrap_or(0);
        self
    }

    /// Set any page box. Boxes other than the media box are clipped to it.
    pub fn with_box(mut self, kind: PageBox, rect: Rect) -> Self {
        let clipped = clip_to(rect.abs(), self.media_box);
        match kind {
            PageBox::Media => {
                self.media_box = rect.abs();
                self.crop_box = clip_to(self.crop_box, self.media_box);
            }
            PageBox::Crop => self.crop_box = clipped,
            PageBox::Bleed => self.bleed_box = Some(clipped),
            PageBox::Trim => self.trim_box = Some(clipped),
            PageBox::Art => self.art_box = Some(clipped),
        }
        self
    }

    /// Bounds of the given box in page space.
    ///
    /// Bleed, trim and art boxes fall back to the crop box when absent.
    pub fn bounds_for(&self, kind: PageBox) -> Rect {
        match kind {
            PageBox::Media => self.media_box,
            PageBox::Crop => self.crop_box,
            PageBox::Bleed => self.bleed_box.unwrap_or(self.crop_box),
            PageBox::Trim => self.trim_box.unwrap_or(self.crop_box),
            PageBox::Art => self.art_box.unwrap_or(self.crop_box),
        }
    }

    /// Transform taking the given box to a zero-origin rectangle in display
    /// orientation.
    ///
    /// The box origin is moved to (0, 0), then the page rotation is applied
    /// clockwise so that the result stays in the positive quadrant.
    pub fn transform_for(&self, kind: PageBox) -> Affine {
        let bounds = self.bounds_for(kind);
        let to_origin = Affine::translate((-bounds.x0, -bounds.y0));
        let (w, h) = (bounds.width(), bounds.height());

        let rotate = match self.rotation {
            90 => Affine::new([0.0, -1.0, 1.0, 0.0, 0.0, w]),
            180 => Affine::new([-1.0, 0.0, 0.0, -1.0, w, h]),
            270 => Affine::new([0.0, 1.0, -1.0, 0.0, h, 0.0]),
            _ => Affine::IDENTITY,
        };

        rotate * to_origin
    }

    /// Size of the given box as displayed, i.e. after rotation.
    pub fn display_size(&self, kind: PageBox) -> Size {
        let size = self.bounds_for(kind).size();
        if self.is_rotated_sideways() {
            Size::new(size.height, size.width)
        } else {
            size
        }
    }

    /// True for 90 and 270 degree rotations.
    pub fn is_rotated_sideways(&self) -> bool {
        self.rotation == 90 || self.rotation == 270
    }

    /// Check if the page displays in landscape orientation.
    pub fn is_landscape(&self) -> bool {
        let size = self.display_size(PageBox::Crop);
        size.width > size.height
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::letter(1)
    }
}

/// Normalize a /Rotate value. Returns `None` for values that are not a
/// multiple of 90.
pub fn normalize_rotation(degrees: i64) -> Option<u16> {
    if degrees % 90 != 0 {
        return None;
    }
    Some(degrees.rem_euclid(360) as u16)
}

/// Intersection of `rect` and `limit`; zero-sized when they do not overlap.
fn clip_to(rect: Rect, limit: Rect) -> Rect {
    rect.intersect(limit)
}
