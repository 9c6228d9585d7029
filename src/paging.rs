//! One-page-at-a-time navigation over a fixed descriptor sequence.

use crate::model::PageDescriptor;

/// Answers the adjacent-page queries of a swipe-style pager.
///
/// The descriptor sequence is fixed at construction. The coordinator also
/// tracks which descriptor the host is showing, but that never feeds into
/// [`PagingCoordinator::current_index`].
#[derive(Debug, Clone)]
pub struct PagingCoordinator<'doc> {
    descriptors: Vec<PageDescriptor<'doc>>,
    visible: Option<usize>,
}

impl<'doc> PagingCoordinator<'doc> {
    /// Take ownership of the descriptors and show the first one, if any.
    pub fn new(descriptors: Vec<PageDescriptor<'doc>>) -> Self {
        let visible = if descriptors.is_empty() { None } else { Some(0) };
        Self {
            descriptors,
            visible,
        }
    }

    /// Number of pages, for the progress indicator.
    pub fn count(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Position reported to the progress indicator.
    ///
    /// Always 0: it is not updated as the user pages.
    pub fn current_index(&self) -> usize {
        0
    }

    /// Descriptor shown on first load.
    pub fn initial(&self) -> Option<&PageDescriptor<'doc>> {
        self.descriptors.first()
    }

    pub fn descriptors(&self) -> &[PageDescriptor<'doc>] {
        &self.descriptors
    }

    pub fn get(&self, index: usize) -> Option<&PageDescriptor<'doc>> {
        self.descriptors.get(index)
    }

    /// Descriptor preceding `descriptor`, or `None` at the start.
    pub fn before(&self, descriptor: &PageDescriptor<'doc>) -> Option<&PageDescriptor<'doc>> {
        let index = self.position_of(descriptor)?;
        self.descriptors.get(index.checked_sub(1)?)
    }

    /// Descriptor following `descriptor`, or `None` at the end.
    pub fn after(&self, descriptor: &PageDescriptor<'doc>) -> Option<&PageDescriptor<'doc>> {
        let index = self.position_of(descriptor)?;
        self.descriptors.get(index + 1)
    }

    /// Index of `descriptor` in this coordinator, if it belongs here.
    fn position_of(&self, descriptor: &PageDescriptor<'doc>) -> Option<usize> {
        let index = descriptor.index();
        match self.descriptors.get(index) {
            Some(own) if std::ptr::eq(own.page(), descriptor.page()) => Some(index),
            _ => None,
        }
    }

    /// Descriptor the host is currently showing.
    pub fn visible(&self) -> Option<&PageDescriptor<'doc>> {
        self.descriptors.get(self.visible?)
    }

    /// Show the descriptor at `index`. Returns it, or `None` (leaving the
    /// visible page unchanged) when out of range.
    pub fn show(&mut self, index: usize) -> Option<&PageDescriptor<'doc>> {
        if index >= self.descriptors.len() {
            return None;
        }
        self.visible = Some(index);
        self.descriptors.get(index)
    }

    /// Move to the next page. Stays put on the last page.
    pub fn turn_forward(&mut self) -> Option<&PageDescriptor<'doc>> {
        let next = self.visible()?.index() + 1;
        self.show(next)
    }

    /// Move to the previous page. Stays put on the first page.
    pub fn turn_back(&mut self) -> Option<&PageDescriptor<'doc>> {
        let previous = self.visible()?.index().checked_sub(1)?;
        self.show(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{build_descriptors, Document, Page, DEFAULT_TITLE};

    fn document(count: u32) -> Document {
        let mut doc = Document::new();
        for number in 1..=count {
            doc.add_page(Page::letter(number));
        }
        doc
    }

    #[test]
    fn test_before_and_after_at_the_ends() {
        let doc = document(3);
        let pager = PagingCoordinator::new(build_descriptors(&doc, DEFAULT_TITLE));
        let seq = pager.descriptors();

        assert!(pager.before(&seq[0]).is_none());
        assert!(pager.after(&seq[2]).is_none());
    }

    #[test]
    fn test_adjacency_in_the_middle() {
        let doc = document(5);
        let pager = PagingCoordinator::new(build_descriptors(&doc, DEFAULT_TITLE));
        let seq = pager.descriptors();

        for i in 1..seq.len() - 1 {
            assert_eq!(pager.after(&seq[i]), Some(&seq[i + 1]));
            assert_eq!(pager.before(&seq[i]), Some(&seq[i - 1]));
        }
    }

    #[test]
    fn test_single_page_has_no_neighbours() {
        let doc = document(1);
        let pager = PagingCoordinator::new(build_descriptors(&doc, DEFAULT_TITLE));
        let only = pager.initial().unwrap();
        assert!(pager.before(only).is_none());
        assert!(pager.after(only).is_none());
    }

    #[test]
    fn test_foreign_descriptor_is_not_found() {
        let doc = document(2);
        let other = document(2);
        let pager = PagingCoordinator::new(build_descriptors(&doc, DEFAULT_TITLE));
        let stranger = build_descriptors(&other, DEFAULT_TITLE).remove(0);

        assert!(pager.after(&stranger).is_none());
    }

    #[test]
    fn test_count_and_fixed_current_index() {
        let doc = document(4);
        let mut pager = PagingCoordinator::new(build_descriptors(&doc, DEFAULT_TITLE));
        assert_eq!(pager.count(), 4);
        assert_eq!(pager.current_index(), 0);

        pager.show(3);
        assert_eq!(pager.current_index(), 0);
    }

    #[test]
    fn test_empty_sequence_shows_nothing() {
        let doc = document(0);
        let mut pager = PagingCoordinator::new(build_descriptors(&doc, DEFAULT_TITLE));
        assert!(pager.is_empty());
        assert!(pager.initial().is_none());
        assert!(pager.visible().is_none());
        assert!(pager.turn_forward().is_none());
    }

    #[test]
    fn test_turning_pages() {
        let doc = document(3);
        let mut pager = PagingCoordinator::new(build_descriptors(&doc, DEFAULT_TITLE));
        assert_eq!(pager.visible().map(|d| d.index()), Some(0));

        assert!(pager.turn_back().is_none());
        assert_eq!(pager.turn_forward().map(|d| d.index()), Some(1));
        assert_eq!(pager.turn_forward().map(|d| d.index()), Some(2));
        assert!(pager.turn_forward().is_none());
        assert_eq!(pager.visible().map(|d| d.index()), Some(2));
        assert_eq!(pager.turn_back().map(|d| d.index()), Some(1));

        assert!(pager.show(7).is_none());
        assert_eq!(pager.visible().map(|d| d.index()), Some(1));
    }
}
