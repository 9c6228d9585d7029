//! The page drawing view.

use kurbo::{Affine, Point, Rect, Size};
use serde::{Deserialize, Serialize};

use super::fit::{fit_transform, ContentFitMode};
use super::surface::DrawingSurface;
use crate::config::ViewerOptions;
use crate::model::{Page, PageBox};

/// Image drawn when the view has no page. Only its pixel extent matters here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placeholder {
    pub size: Size,
}

impl Placeholder {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
        }
    }

    /// Rich-text document symbol at a 100 point size.
    pub fn document_symbol() -> Self {
        Self::new(98.0, 120.0)
    }
}

/// Draws one page, or a placeholder, fitted into its bounds.
#[derive(Debug, Clone)]
pub struct PageView<'doc> {
    size: Size,
    bounds: Rect,
    content_mode: ContentFitMode,
    use_crop_box: bool,
    page: Option<&'doc Page>,
    placeholder: Option<Placeholder>,
}

impl<'doc> PageView<'doc> {
    /// Empty view of the given size, drawing through the crop box.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            bounds: Rect::from_origin_size(Point::ORIGIN, size),
            content_mode: ContentFitMode::default(),
            use_crop_box: true,
            page: None,
            placeholder: None,
        }
    }

    /// Empty view sized and configured from viewer options.
    pub fn from_options(options: &ViewerOptions) -> Self {
        Self::new(options.view_size)
            .with_content_mode(options.fit_mode)
            .with_crop_box(options.use_crop_box)
            .with_placeholder(options.placeholder)
    }

    pub fn with_content_mode(mut self, mode: ContentFitMode) -> Self {
        self.content_mode = mode;
        self
    }

    /// Draw through the crop box (default) or the full media box.
    pub fn with_crop_box(mut self, use_crop_box: bool) -> Self {
        self.use_crop_box = use_crop_box;
        self
    }

    pub fn with_placeholder(mut self, placeholder: Option<Placeholder>) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn with_page(mut self, page: Option<&'doc Page>) -> Self {
        self.set_page(page);
        self
    }

    /// Replace the page and recompute the bounds from it.
    ///
    /// With a page, the bounds are the view-sized rect at the origin mapped
    /// through the page's crop-box transform.
    pub fn set_page(&mut self, page: Option<&'doc Page>) {
        let zero_origin = Rect::from_origin_size(Point::ORIGIN, self.size);
        self.bounds = match page {
            Some(page) => page
                .transform_for(PageBox::Crop)
                .transform_rect_bbox(zero_origin),
            None => zero_origin,
        };
        self.page = page;
    }

    /// Resize the view, keeping the current page.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
        self.set_page(self.page);
    }

    pub fn page(&self) -> Option<&'doc Page> {
        self.page
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn content_mode(&self) -> ContentFitMode {
        self.content_mode
    }

    pub fn uses_crop_box(&self) -> bool {
        self.use_crop_box
    }

    /// Natural size for layout: the crop box, else the placeholder, else zero.
    pub fn intrinsic_size(&self) -> Size {
        if let Some(page) = self.page {
            page.bounds_for(PageBox::Crop).size()
        } else if let Some(placeholder) = self.placeholder {
            placeholder.size
        } else {
            Size::ZERO
        }
    }

    /// Transform from the page's display-oriented crop box into the view.
    pub fn fit_for_page(&self, page: &Page) -> Affine {
        let crop_transform = page.transform_for(PageBox::Crop);
        let transformed_crop = crop_transform.transform_rect_bbox(page.bounds_for(PageBox::Crop));
        fit_transform(transformed_crop, self.bounds, self.content_mode)
    }

    /// Full mapping from page space into view space, as drawn.
    pub fn content_transform(&self) -> Option<Affine> {
        self.page
            .map(|page| self.fit_for_page(page) * page.transform_for(PageBox::Crop))
    }

    /// Placeholder rect in view space after fitting.
    pub fn placeholder_rect(&self) -> Option<Rect> {
        let placeholder = self.placeholder?;
        let image_rect = Rect::from_origin_size(Point::ORIGIN, placeholder.size);
        let fit = fit_transform(image_rect, self.bounds, self.content_mode);
        Some(fit.transform_rect_bbox(image_rect))
    }

    /// Issue the draw calls for the current state.
    pub fn draw<S: DrawingSurface + ?Sized>(&self, surface: &mut S) {
        surface.save_state();

        if let Some(page) = self.page {
            log::debug!(
                "Drawing page {} into {:?} ({})",
                page.number,
                self.bounds,
                self.content_mode
            );
            surface.concat(self.fit_for_page(page));

            if self.use_crop_box {
                surface.draw_page(page, PageBox::Crop);
            } else {
                surface.concat(page.transform_for(PageBox::Crop));
                surface.draw_page(page, PageBox::Media);
            }
        } else if let Some(rect) = self.placeholder_rect() {
            // Images are stored top-down; flip about the rect's own extent.
            surface.concat(Affine::translate((rect.x0, rect.y0 + rect.height())));
            surface.concat(Affine::scale_non_uniform(1.0, -1.0));
            surface.concat(Affine::translate((-rect.x0, -rect.y0)));
            surface.draw_image(rect);
        }

        surface.restore_state();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::surface::{DrawCommand, RecordingSurface};

    fn assert_point_eq(a: Point, b: Point) {
        assert!((a - b).hypot() < 1e-9, "{a:?} != {b:?}");
    }

    fn commands(view: &PageView<'_>) -> Vec<DrawCommand> {
        let mut surface = RecordingSurface::new();
        view.draw(&mut surface);
        assert_eq!(surface.depth(), 0);
        surface.into_commands()
    }

    #[test]
    fn test_intrinsic_size() {
        let page = Page::letter(1).with_crop_box(Rect::new(0.0, 0.0, 300.0, 400.0));
        let view = PageView::new(Size::new(100.0, 100.0));
        assert_eq!(view.intrinsic_size(), Size::ZERO);

        let view = view.with_placeholder(Some(Placeholder::new(20.0, 30.0)));
        assert_eq!(view.intrinsic_size(), Size::new(20.0, 30.0));

        let view = view.with_page(Some(&page));
        assert_eq!(view.intrinsic_size(), Size::new(300.0, 400.0));
    }

    #[test]
    fn test_bounds_follow_page_rotation() {
        let page = Page::letter(1).with_rotation(90);
        let mut view = PageView::new(Size::new(300.0, 500.0));
        assert_eq!(view.bounds(), Rect::new(0.0, 0.0, 300.0, 500.0));

        // Axes swap and the origin moves with the rotated crop box.
        view.set_page(Some(&page));
        assert_eq!(view.bounds(), Rect::new(0.0, 312.0, 500.0, 612.0));
        assert_eq!(view.bounds().size(), Size::new(500.0, 300.0));

        view.set_page(None);
        assert_eq!(view.bounds(), Rect::new(0.0, 0.0, 300.0, 500.0));
    }

    #[test]
    fn test_crop_box_maps_into_view() {
        let page = Page::new(1, Rect::new(0.0, 0.0, 200.0, 100.0))
            .with_crop_box(Rect::new(50.0, 0.0, 150.0, 50.0));
        let view = PageView::new(Size::new(200.0, 200.0))
            .with_content_mode(ContentFitMode::ScaleAspectFit)
            .with_page(Some(&page));

        // Bounds start at the crop offset: (-50, 0, 150, 200).
        assert_eq!(view.bounds(), Rect::new(-50.0, 0.0, 150.0, 200.0));

        let t = view.content_transform().unwrap();
        let mapped = t.transform_rect_bbox(page.crop_box);
        assert_point_eq(mapped.origin(), Point::new(-50.0, 50.0));
        assert_point_eq(Point::new(mapped.x1, mapped.y1), Point::new(150.0, 150.0));
    }

    #[test]
    fn test_draw_with_crop_box() {
        let page = Page::letter(2);
        let view = PageView::new(Size::new(306.0, 396.0))
            .with_content_mode(ContentFitMode::ScaleAspectFit)
            .with_page(Some(&page));

        let cmds = commands(&view);
        assert_eq!(cmds.len(), 4);
        assert_eq!(cmds[0], DrawCommand::SaveState);
        assert_eq!(
            cmds[2],
            DrawCommand::DrawPage {
                page_number: 2,
                page_box: PageBox::Crop,
                ctm: Affine::scale(0.5),
            }
        );
        assert_eq!(cmds[3], DrawCommand::RestoreState);
    }

    #[test]
    fn test_draw_with_media_box_concats_crop_transform() {
        let page = Page::letter(1).with_crop_box(Rect::new(100.0, 100.0, 200.0, 200.0));
        let view = PageView::new(Size::new(100.0, 100.0))
            .with_content_mode(ContentFitMode::ScaleToFill)
            .with_crop_box(false)
            .with_page(Some(&page));

        let cmds = commands(&view);
        match &cmds[3] {
            DrawCommand::DrawPage { page_box, ctm, .. } => {
                assert_eq!(*page_box, PageBox::Media);
                // The crop box corner lands on the bounds origin.
                assert_point_eq(*ctm * Point::new(100.0, 100.0), view.bounds().origin());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_placeholder_is_flipped() {
        let view = PageView::new(Size::new(200.0, 200.0))
            .with_content_mode(ContentFitMode::Center)
            .with_placeholder(Some(Placeholder::new(100.0, 50.0)));

        let rect = view.placeholder_rect().unwrap();
        assert_eq!(rect, Rect::new(50.0, 75.0, 150.0, 125.0));

        let cmds = commands(&view);
        match &cmds[4] {
            DrawCommand::DrawImage { rect: drawn, ctm } => {
                assert_eq!(*drawn, rect);
                // Top edge of the image maps to the bottom edge and back.
                assert_point_eq(*ctm * Point::new(50.0, 75.0), Point::new(50.0, 125.0));
                assert_point_eq(*ctm * Point::new(150.0, 125.0), Point::new(150.0, 75.0));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_nothing_to_draw() {
        let view = PageView::new(Size::new(10.0, 10.0));
        assert_eq!(
            commands(&view),
            vec![DrawCommand::SaveState, DrawCommand::RestoreState]
        );
    }

    #[test]
    fn test_resize_keeps_page() {
        let page = Page::letter(1);
        let mut view = PageView::new(Size::new(10.0, 10.0)).with_page(Some(&page));
        view.set_size(Size::new(612.0, 792.0));
        assert!(view.page().is_some());
        assert_eq!(view.bounds(), Rect::new(0.0, 0.0, 612.0, 792.0));
    }
}
