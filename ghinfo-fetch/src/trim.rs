//! Cutting a listing page at the upper range bound.

use ghinfo_core::Identified;

/// What to do with one page relative to `max_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCut {
    /// The page has no entries. Stop.
    Empty,
    /// Every id is above the bound. Drop the page and stop.
    BeyondBound,
    /// The last id is the bound. Keep the page and stop.
    ExactBound,
    /// The bound falls inside the page. Keep this many entries and stop.
    Truncated(usize),
    /// Every id is below the bound. Keep the page and continue.
    Below,
}

impl PageCut {
    /// Entries of a page of `len` that are kept.
    pub fn kept(self, len: usize) -> usize {
        match self {
            Self::Empty | Self::BeyondBound => 0,
            Self::ExactBound | Self::Below => len,
            Self::Truncated(n) => n,
        }
    }

    /// Returns true if no further page should be requested.
    pub fn is_final(self) -> bool {
        !matches!(self, Self::Below)
    }
}

/// Classifies an ascending page against `max_id`.
pub fn cut_page<T: Identified>(max_id: u64, page: &[T]) -> PageCut {
    let (Some(first), Some(last)) = (page.first(), page.last()) else {
        return PageCut::Empty;
    };

    if first.id() > max_id {
        return PageCut::BeyondBound;
    }
    if last.id() == max_id {
        return PageCut::ExactBound;
    }
    if last.id() < max_id {
        return PageCut::Below;
    }

    let idx = page.partition_point(|item| item.id() < max_id);
    if page[idx].id() == max_id {
        PageCut::Truncated(idx + 1)
    } else {
        PageCut::Truncated(idx)
    }
}

/// Returns the prefix of `page` with ids `<= max_id`.
pub fn trim<T: Identified>(max_id: u64, page: &[T]) -> &[T] {
    &page[..cut_page(max_id, page).kept(page.len())]
}
