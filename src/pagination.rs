//! "Load more" pagination over a fixed-length listing.

/// How many entries of a listing are revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    visible: usize,
    increment: usize,
    total: usize,
}

impl Pagination {
    /// `initial` and `increment` are clamped to at least one.
    pub fn new(initial: usize, increment: usize, total: usize) -> Self {
        Self {
            visible: initial.max(1).min(total),
            increment: increment.max(1),
            total,
        }
    }

    pub const fn visible_count(&self) -> usize {
        self.visible
    }

    pub const fn total(&self) -> usize {
        self.total
    }

    pub const fn has_more(&self) -> bool {
        self.visible < self.total
    }

    /// Reveal the next batch. No-op once everything is visible.
    pub fn load_more(&mut self) {
        self.visible = self.visible.saturating_add(self.increment).min(self.total);
    }

    /// The revealed prefix of `items`.
    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.visible.min(items.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_is_capped_by_total() {
        assert_eq!(Pagination::new(6, 3, 4).visible_count(), 4);
        assert!(!Pagination::new(6, 3, 4).has_more());
        assert_eq!(Pagination::new(6, 3, 0).visible_count(), 0);
    }

    #[test]
    fn test_load_more_reaches_total_in_expected_steps() {
        for (initial, increment, total) in [(6, 3, 8), (3, 3, 4), (1, 2, 10), (2, 5, 2)] {
            let mut page = Pagination::new(initial, increment, total);
            let steps = total.saturating_sub(initial).div_ceil(increment);
            let mut last = page.visible_count();
            for _ in 0..steps {
                page.load_more();
                assert!(page.visible_count() >= last);
                assert!(page.visible_count() <= total);
                last = page.visible_count();
            }
            assert!(!page.has_more(), "{initial}/{increment}/{total}");
            assert_eq!(page.visible_count(), total);
        }
    }

    #[test]
    fn test_load_more_at_cap_is_noop() {
        let mut page = Pagination::new(3, 3, 4);
        page.load_more();
        let capped = page;
        page.load_more();
        page.load_more();
        assert_eq!(page, capped);
    }

    #[test]
    fn test_visible_slice() {
        let items = [1, 2, 3, 4, 5];
        let mut page = Pagination::new(2, 2, items.len());
        assert_eq!(page.visible(&items), &[1, 2]);
        page.load_more();
        assert_eq!(page.visible(&items), &[1, 2, 3, 4]);
    }
}
