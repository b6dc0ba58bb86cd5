use std::num::NonZeroUsize;
use std::ops::RangeInclusive;
use std::sync::Arc;

/// Fixed-size pages over a shared, ordered collection.
///
/// The collection is held as `Arc<[T]>` and its identity (the allocation, not
/// the contents) decides when the current page resets to 1.
#[derive(Debug, Clone)]
pub struct Paginator<T> {
    source: Arc<[T]>,
    items_per_page: NonZeroUsize,
    current_page: usize,
}

/// Result of a page request. The owner must scroll the viewport to the top.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageChange {
    pub from: usize,
    pub to: usize,
}

/// What a pager widget shows for the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageControls {
    pub current: usize,
    pub total: usize,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

impl PageControls {
    /// A single page (or none) needs no pager.
    pub fn visible(&self) -> bool {
        self.total > 1
    }

    pub fn pages(&self) -> RangeInclusive<usize> {
        1..=self.total
    }
}

impl<T> Paginator<T> {
    pub fn new(items_per_page: NonZeroUsize) -> Self {
        Self::with_source(Arc::from(Vec::new()), items_per_page)
    }

    pub fn with_source(source: Arc<[T]>, items_per_page: NonZeroUsize) -> Self {
        Self {
            source,
            items_per_page,
            current_page: 1,
        }
    }

    /// Replaces the paginated collection. A different allocation resets the
    /// current page to 1, even when the old page number would still be valid.
    /// Returns whether a reset happened.
    pub fn set_source(&mut self, source: Arc<[T]>) -> bool {
        if Arc::ptr_eq(&self.source, &source) {
            return false;
        }
        self.source = source;
        self.current_page = 1;
        true
    }

    pub fn source(&self) -> &Arc<[T]> {
        &self.source
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page.get()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.source.len().div_ceil(self.items_per_page.get())
    }

    /// Items `[(page - 1) * size, page * size)` clipped to the collection.
    /// A page outside the collection yields an empty slice.
    pub fn current_items(&self) -> &[T] {
        let Some(index) = self.current_page.checked_sub(1) else {
            return &[];
        };
        let size = self.items_per_page.get();
        let len = self.source.len();
        let start = index.saturating_mul(size);
        if start >= len {
            return &[];
        }
        let end = start.saturating_add(size).min(len);
        &self.source[start..end]
    }

    /// Moves to `page` without clamping. Keeping requests inside
    /// `1..=total_pages()` is the caller's job; see [`PageControls`].
    pub fn request_page(&mut self, page: usize) -> PageChange {
        let change = PageChange {
            from: self.current_page,
            to: page,
        };
        self.current_page = page;
        change
    }

    pub fn controls(&self) -> PageControls {
        let total = self.total_pages();
        PageControls {
            current: self.current_page,
            total,
            previous_enabled: self.current_page > 1,
            next_enabled: self.current_page < total,
        }
    }
}
