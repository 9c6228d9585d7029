//! Content-fit transforms.
//!
//! Maps a source rectangle (a page's crop box, or a placeholder image) into a
//! destination rectangle (the view bounds). The destination's Y axis points
//! up, so "top" means the max-Y edge.

use std::str::FromStr;

use kurbo::{Affine, Rect};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// How content is fitted into a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentFitMode {
    /// Scale each axis independently to fill the view exactly.
    #[default]
    ScaleToFill,
    /// Uniform scale so the whole source is visible; may letterbox.
    ScaleAspectFit,
    /// Uniform scale so the view is covered; may crop.
    ScaleAspectFill,
    /// No positioning at all.
    Redraw,
    Center,
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ContentFitMode {
    /// Every mode, in declaration order.
    pub const ALL: [ContentFitMode; 13] = [
        ContentFitMode::ScaleToFill,
        ContentFitMode::ScaleAspectFit,
        ContentFitMode::ScaleAspectFill,
        ContentFitMode::Redraw,
        ContentFitMode::Center,
        ContentFitMode::Top,
        ContentFitMode::Bottom,
        ContentFitMode::Left,
        ContentFitMode::Right,
        ContentFitMode::TopLeft,
        ContentFitMode::TopRight,
        ContentFitMode::BottomLeft,
        ContentFitMode::BottomRight,
    ];

    /// Kebab-case name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            ContentFitMode::ScaleToFill => "scale-to-fill",
            ContentFitMode::ScaleAspectFit => "scale-aspect-fit",
            ContentFitMode::ScaleAspectFill => "scale-aspect-fill",
            ContentFitMode::Redraw => "redraw",
            ContentFitMode::Center => "center",
            ContentFitMode::Top => "top",
            ContentFitMode::Bottom => "bottom",
            ContentFitMode::Left => "left",
            ContentFitMode::Right => "right",
            ContentFitMode::TopLeft => "top-left",
            ContentFitMode::TopRight => "top-right",
            ContentFitMode::BottomLeft => "bottom-left",
            ContentFitMode::BottomRight => "bottom-right",
        }
    }

    /// True for the three scaling modes.
    pub fn scales(self) -> bool {
        matches!(
            self,
            ContentFitMode::ScaleToFill
                | ContentFitMode::ScaleAspectFit
                | ContentFitMode::ScaleAspectFill
        )
    }
}

impl std::fmt::Display for ContentFitMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ContentFitMode {
    type Err = Error;

    /// Accepts the kebab-case names plus the short forms `fill`,
    /// `aspect-fit` and `aspect-fill`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "fill" => return Ok(ContentFitMode::ScaleToFill),
            "aspect-fit" | "fit" => return Ok(ContentFitMode::ScaleAspectFit),
            "aspect-fill" => return Ok(ContentFitMode::ScaleAspectFill),
            _ => {}
        }
        ContentFitMode::ALL
            .into_iter()
            .find(|mode| mode.name() == normalized)
            .ok_or_else(|| Error::InvalidFitMode(s.to_string()))
    }
}

/// Compute the transform placing `source` inside `destination`.
///
/// Scaling modes scale first, then translate the scaled source so its center
/// meets the destination's center. Anchor modes only translate; an axis the
/// anchor does not name is centered. A zero-length source axis is left
/// unscaled.
pub fn fit_transform(source: Rect, destination: Rect, mode: ContentFitMode) -> Affine {
    let scale_x = axis_scale(destination.width(), source.width());
    let scale_y = axis_scale(destination.height(), source.height());

    let scale_and_center = |sx: f64, sy: f64| -> Affine {
        let scale = Affine::scale_non_uniform(sx, sy);
        let scaled = scale.transform_rect_bbox(source);
        let offset = destination.center() - scaled.center();
        Affine::translate(offset) * scale
    };

    let (tx, ty) = match mode {
        ContentFitMode::ScaleToFill => return scale_and_center(scale_x, scale_y),
        ContentFitMode::ScaleAspectFit => {
            let scale = scale_x.min(scale_y);
            return scale_and_center(scale, scale);
        }
        ContentFitMode::ScaleAspectFill => {
            let scale = scale_x.max(scale_y);
            return scale_and_center(scale, scale);
        }

        ContentFitMode::Center => (
            destination.center().x - source.center().x,
            destination.center().y - source.center().y,
        ),
        ContentFitMode::Top => (
            destination.center().x - source.center().x,
            destination.max_y() - source.max_y(),
        ),
        ContentFitMode::Bottom => (
            destination.center().x - source.center().x,
            destination.min_y() - source.min_y(),
        ),
        ContentFitMode::Left => (
            destination.min_x() - source.min_x(),
            destination.center().y - source.center().y,
        ),
        ContentFitMode::Right => (
            destination.max_x() - source.max_x(),
            destination.center().y - source.center().y,
        ),
        ContentFitMode::TopLeft => (
            destination.min_x() - source.min_x(),
            destination.max_y() - source.max_y(),
        ),
        ContentFitMode::TopRight => (
            destination.max_x() - source.max_x(),
            destination.max_y() - source.max_y(),
        ),
        ContentFitMode::BottomLeft => (
            destination.min_x() - source.min_x(),
            destination.min_y() - source.min_y(),
        ),
        ContentFitMode::BottomRight => (
            destination.max_x() - source.max_x(),
            destination.min_y() - source.min_y(),
        ),
        ContentFitMode::Redraw => (0.0, 0.0),
    };

    Affine::translate((tx, ty))
}

fn axis_scale(destination: f64, source: f64) -> f64 {
    if source == 0.0 {
        1.0
    } else {
        destination / source
    }
}
