use serde::{Deserialize, Serialize};

/// Mentors shown per page.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// One page of an already-fetched result list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_index: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

/// Slices `items[i·P .. min((i+1)·P, M))`. A zero page size is treated as 1.
/// An index past the end yields an empty page.
pub fn paginate<T: Clone>(items: &[T], page_index: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let start = page_index.saturating_mul(page_size).min(total_items);
    let end = page_index
        .saturating_add(1)
        .saturating_mul(page_size)
        .min(total_items);

    Page {
        items: items[start..end].to_vec(),
        page_index,
        page_size,
        total_items,
        total_pages: total_items.div_ceil(page_size),
        has_next: page_index.saturating_add(1).saturating_mul(page_size) < total_items,
        has_previous: page_index > 0,
    }
}
