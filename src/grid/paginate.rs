//! Paginator: page-sized windows over the processed rows.

use std::ops::Range;

/// Allowed page sizes.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 20, 50];

/// Page size used when neither the host nor settings provide one.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Check if `size` is one of [`PAGE_SIZE_OPTIONS`].
pub fn is_valid_page_size(size: usize) -> bool {
    PAGE_SIZE_OPTIONS.contains(&size)
}

/// Number of pages needed for `count` items.
pub fn total_pages(count: usize, size: usize) -> usize {
    if size == 0 {
        0
    } else {
        count.div_ceil(size)
    }
}

/// Index range of page `page` within `count` items.
///
/// Out-of-range pages yield an empty range.
pub fn page_range(count: usize, page: usize, size: usize) -> Range<usize> {
    let start = page.saturating_mul(size).min(count);
    let end = start.saturating_add(size).min(count);
    start..end
}

/// Slice one page out of `items`.
pub fn slice<X>(items: &[X], page: usize, size: usize) -> &[X] {
    &items[page_range(items.len(), page, size)]
}
