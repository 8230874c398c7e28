// 📑 Pagination Cursor - Incremental reveal ("Load more / Show all / Show less")
//
// States are strictly ordered: Initial → Expanded(k) → Full.
// load_more / show_all only move forward; collapse (or any upstream filter
// change, see filter::reduce) returns to Initial. The cursor never needs to
// know the result size: visible_count clamps against it.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_INITIAL_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "visible", rename_all = "snake_case")]
pub enum CursorState {
    Initial,
    Expanded(usize),
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    state: CursorState,
    page_size: usize,
    initial_size: usize,
}

impl Default for PageCursor {
    fn default() -> Self {
        PageCursor::new(DEFAULT_INITIAL_PAGE_SIZE, DEFAULT_PAGE_SIZE)
    }
}

impl PageCursor {
    /// Zero sizes are bumped to 1 so the cursor always makes progress
    pub fn new(initial_size: usize, page_size: usize) -> Self {
        PageCursor {
            state: CursorState::Initial,
            page_size: page_size.max(1),
            initial_size: initial_size.max(1),
        }
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn initial_size(&self) -> usize {
        self.initial_size
    }

    /// How many records are visible out of `total`
    pub fn visible_count(&self, total: usize) -> usize {
        match self.state {
            CursorState::Initial => self.initial_size.min(total),
            CursorState::Expanded(k) => k.min(total),
            CursorState::Full => total,
        }
    }

    /// Reveal one more page. Full stays Full.
    pub fn load_more(self) -> Self {
        let state = match self.state {
            CursorState::Initial => CursorState::Expanded(self.initial_size + self.page_size),
            CursorState::Expanded(k) => CursorState::Expanded(k + self.page_size),
            CursorState::Full => CursorState::Full,
        };
        PageCursor { state, ..self }
    }

    /// Jump straight to `visible` records (e.g. restored from a URL parameter).
    /// Anything at or below the first page is the first page.
    pub fn expanded_to(self, visible: usize) -> Self {
        let state = if visible <= self.initial_size {
            CursorState::Initial
        } else {
            CursorState::Expanded(visible)
        };
        PageCursor { state, ..self }
    }

    pub fn show_all(self) -> Self {
        PageCursor {
            state: CursorState::Full,
            ..self
        }
    }

    pub fn collapse(self) -> Self {
        PageCursor {
            state: CursorState::Initial,
            ..self
        }
    }

    pub fn has_more(&self, total: usize) -> bool {
        self.visible_count(total) < total
    }

    /// "Show less" only makes sense once something beyond the first page is shown
    pub fn can_collapse(&self, total: usize) -> bool {
        self.visible_count(total) > self.initial_size.min(total)
    }
}

/// A capped slice of a filtered sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub has_more: bool,
}

/// First `visible_count` records plus whether more remain
pub fn paginate<T>(records: &[T], visible_count: usize) -> Page<'_, T> {
    let end = visible_count.min(records.len());
    Page {
        items: &records[..end],
        has_more: visible_count < records.len(),
    }
}
