//! Page-number strips and item ranges for paginated lists.

use serde::Serialize;

pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;
pub const DEFAULT_MAX_VISIBLE_PAGES: usize = 5;

/// Entry of a rendered page strip. Serializes as the page number or `null`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

/// Computes which page numbers and ellipses to render.
///
/// The first and last pages are always shown. The remaining `max_visible - 2`
/// slots form a window around the current page that is pushed inwards when it
/// would collide with either edge.
pub fn visible_pages(current_page: i64, total_pages: usize, max_visible: usize) -> Vec<PageItem> {
    if total_pages == 0 {
        return vec![];
    }

    let max_visible = max_visible.max(3);
    if total_pages <= max_visible {
        return (1..=total_pages).map(PageItem::Page).collect();
    }

    let current = usize::try_from(current_page.max(1))
        .unwrap_or(usize::MAX)
        .min(total_pages);

    let window = max_visible - 2;
    let last_inner = total_pages - 1;

    let mut start = current.saturating_sub(window / 2).max(2);
    let mut end = start + window - 1;
    if end > last_inner {
        end = last_inner;
        start = (end + 1).saturating_sub(window).max(2);
    }

    let mut pages = Vec::with_capacity(max_visible + 2);
    pages.push(PageItem::Page(1));
    if start > 2 {
        pages.push(PageItem::Ellipsis);
    }
    pages.extend((start..=end).map(PageItem::Page));
    if end < last_inner {
        pages.push(PageItem::Ellipsis);
    }
    pages.push(PageItem::Page(total_pages));

    pages
}

/// 1-indexed inclusive range of items shown on a page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DisplayRange {
    pub start: usize,
    pub end: usize,
}

/// Returns `{0, 0}` for empty lists. Pages past the end show the last page.
pub fn display_range(page: usize, limit: usize, total: usize) -> DisplayRange {
    if total == 0 {
        return DisplayRange::default();
    }

    let limit = limit.max(1);
    let page = page.clamp(1, total.div_ceil(limit));
    let start = (page - 1) * limit + 1;
    let end = (page * limit).min(total);

    DisplayRange { start, end }
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<PageItem>,
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
    pub range: DisplayRange,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, limit: usize, total: usize) -> Self {
        let current_page = if current_page == 0 { 1 } else { current_page };
        let total_pages = total.div_ceil(limit.max(1));

        let pages = visible_pages(
            i64::try_from(current_page).unwrap_or(i64::MAX),
            total_pages,
            DEFAULT_MAX_VISIBLE_PAGES,
        );

        Self {
            items,
            pages,
            page: current_page,
            limit,
            total,
            total_pages,
            range: display_range(current_page, limit, total),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            pages: self.pages,
            page: self.page,
            limit: self.limit,
            total: self.total,
            total_pages: self.total_pages,
            range: self.range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PageItem::{Ellipsis, Page};
    use super::*;

    fn ellipses(pages: &[PageItem]) -> usize {
        pages.iter().filter(|p| **p == Ellipsis).count()
    }

    #[test]
    fn first_page_hugs_the_start() {
        assert_eq!(
            visible_pages(1, 10, 5),
            vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn middle_page_gets_both_ellipses() {
        assert_eq!(
            visible_pages(5, 10, 5),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn last_page_hugs_the_end() {
        assert_eq!(
            visible_pages(10, 10, 5),
            vec![Page(1), Ellipsis, Page(7), Page(8), Page(9), Page(10)]
        );
    }

    #[test]
    fn small_totals_list_every_page() {
        assert_eq!(visible_pages(3, 0, 5), vec![]);
        assert_eq!(visible_pages(1, 1, 5), vec![Page(1)]);
        for total in 1..=5 {
            let pages = visible_pages(2, total, 5);
            assert_eq!(pages, (1..=total).map(Page).collect::<Vec<_>>());
        }
    }

    #[test]
    fn out_of_range_current_page_is_clamped() {
        for total in 1..30 {
            for current in -3..(total as i64 + 4) {
                let clamped = current.clamp(1, total as i64);
                assert_eq!(
                    visible_pages(current, total, 5),
                    visible_pages(clamped, total, 5),
                    "current={current} total={total}"
                );
            }
        }
    }

    #[test]
    fn strip_is_bounded_by_first_and_last_page() {
        for max_visible in [3, 5, 7, 6] {
            for total in 2..40 {
                for current in 1..=total {
                    let pages = visible_pages(current as i64, total, max_visible);
                    assert_eq!(pages.first(), Some(&Page(1)));
                    assert_eq!(pages.last(), Some(&Page(total)));
                    assert!(ellipses(&pages) <= 2);
                    assert!(pages.contains(&Page(current)));
                }
            }
        }
    }

    #[test]
    fn display_range_examples() {
        assert_eq!(display_range(2, 20, 50), DisplayRange { start: 21, end: 40 });
        assert_eq!(display_range(3, 20, 50), DisplayRange { start: 41, end: 50 });
        assert_eq!(display_range(1, 20, 0), DisplayRange { start: 0, end: 0 });
        assert_eq!(display_range(9, 20, 50), DisplayRange { start: 41, end: 50 });
    }

    #[test]
    fn display_range_never_exceeds_limit_or_total() {
        for total in 1..60 {
            for limit in 1..12 {
                for page in 0..10 {
                    let range = display_range(page, limit, total);
                    assert!(range.end <= total);
                    assert!(range.start >= 1);
                    assert!(range.end - range.start < limit);
                }
            }
        }
    }

    #[test]
    fn paginated_serializes_ellipsis_as_null() {
        let page = Paginated::new(vec![1, 2], 5, 1, 10);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["pages"], serde_json::json!([1, null, 4, 5, 6, null, 10]));
        assert_eq!(json["total_pages"], 10);
    }
}
