//! Drawing surfaces.
//!
//! A [`DrawingSurface`] is whatever actually puts pixels on screen. Its
//! coordinate system has the Y axis pointing up, like PDF user space.

use kurbo::{Affine, Rect};
use serde::Serialize;

use crate::model::{Page, PageBox};

/// Sink for the draw calls issued by a [`super::PageView`].
pub trait DrawingSurface {
    /// Push the graphics state (current transform).
    fn save_state(&mut self);

    /// Pop the graphics state pushed by the matching [`Self::save_state`].
    fn restore_state(&mut self);

    /// Concatenate `transform` onto the current transform. It applies before
    /// the transforms already in effect.
    fn concat(&mut self, transform: Affine);

    /// Draw the content of `page` clipped to `kind`, in page space adjusted by
    /// the page's own transform for that box.
    fn draw_page(&mut self, page: &Page, kind: PageBox);

    /// Draw the placeholder image stretched into `rect`.
    fn draw_image(&mut self, rect: Rect);
}

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    SaveState,
    RestoreState,
    Concat {
        transform: Affine,
    },
    DrawPage {
        page_number: u32,
        page_box: PageBox,
        /// Transform in effect when the page was drawn.
        ctm: Affine,
    },
    DrawImage {
        rect: Rect,
        ctm: Affine,
    },
}

/// Surface that records every call instead of drawing.
///
/// Tracks the current transformation matrix so each draw command carries the
/// transform it was issued under.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    ctm: Affine,
    saved: Vec<Affine>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    /// Current transformation matrix.
    pub fn ctm(&self) -> Affine {
        self.ctm
    }

    /// Number of `save_state` calls not yet matched by `restore_state`.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }
}

impl DrawingSurface for RecordingSurface {
    fn save_state(&mut self) {
        self.saved.push(self.ctm);
        self.commands.push(DrawCommand::SaveState);
    }

    fn restore_state(&mut self) {
        match self.saved.pop() {
            Some(ctm) => self.ctm = ctm,
            None => log::warn!("restore_state without matching save_state"),
        }
        self.commands.push(DrawCommand::RestoreState);
    }

    fn concat(&mut self, transform: Affine) {
        self.ctm = self.ctm * transform;
        self.commands.push(DrawCommand::Concat { transform });
    }

    fn draw_page(&mut self, page: &Page, kind: PageBox) {
        self.commands.push(DrawCommand::DrawPage {
            page_number: page.number,
            page_box: kind,
            ctm: self.ctm,
        });
    }

    fn draw_image(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::DrawImage {
            rect,
            ctm: self.ctm,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn test_concat_applies_before_existing_transform() {
        let mut surface = RecordingSurface::new();
        surface.concat(Affine::translate((10.0, 0.0)));
        surface.concat(Affine::scale(2.0));

        // Scale first, then translate.
        assert_eq!(surface.ctm() * Point::new(1.0, 1.0), Point::new(12.0, 2.0));
    }

    #[test]
    fn test_save_and_restore() {
        let mut surface = RecordingSurface::new();
        surface.save_state();
        surface.concat(Affine::scale(3.0));
        assert_eq!(surface.depth(), 1);
        surface.restore_state();

        assert_eq!(surface.ctm(), Affine::IDENTITY);
        assert_eq!(surface.depth(), 0);
        assert_eq!(surface.commands().len(), 3);
    }

    #[test]
    fn test_unbalanced_restore_keeps_transform() {
        let mut surface = RecordingSurface::new();
        surface.concat(Affine::scale(2.0));
        surface.restore_state();
        assert_eq!(surface.ctm(), Affine::scale(2.0));
    }

    #[test]
    fn test_draw_commands_carry_ctm() {
        let mut surface = RecordingSurface::new();
        surface.concat(Affine::translate((5.0, 5.0)));
        surface.draw_page(&Page::letter(4), PageBox::Crop);
        surface.draw_image(Rect::new(0.0, 0.0, 1.0, 1.0));

        match &surface.commands()[1] {
            DrawCommand::DrawPage {
                page_number, ctm, ..
            } => {
                assert_eq!(*page_number, 4);
                assert_eq!(*ctm, Affine::translate((5.0, 5.0)));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(surface.commands()[2], DrawCommand::DrawImage { .. }));
    }

    #[test]
    fn test_commands_serialize_with_op_tag() {
        let mut surface = RecordingSurface::new();
        surface.save_state();
        let json = serde_json::to_string(surface.commands()).unwrap();
        assert_eq!(json, r#"[{"op":"save_state"}]"#);
    }
}
