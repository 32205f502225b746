//! Pagination drivers for the two conventions the management API uses.
//!
//! Cursor style: each response names the next page; a `-1` cursor ends the
//! collection. Count style: the first response carries the total item count
//! and pages are requested by incrementing a 1-based page number.
//!
//! Both drivers refuse to loop forever. A page that makes no progress, a
//! cursor the server already handed out, or an absurd page count all abort
//! with [`SensorError::PaginationStalled`] instead of hanging the poll.

use crate::error::SensorError;
use std::{
    collections::HashSet,
    future::Future,
};

/// Cursor value the server sends on the last page.
pub const LAST_PAGE: i64 = -1;

/// Upper bound on pages fetched per collection.
pub const MAX_PAGES: usize = 10_000;

/// One page of a cursor-paginated collection.
#[derive(Debug, Clone)]
pub struct CursorPage<T> {
    pub items: Vec<T>,
    pub next_page_id: i64,
}

/// One page of a count-paginated collection. `total` is the item count
/// across all pages, as reported by the server.
#[derive(Debug, Clone)]
pub struct CountedPage<T> {
    pub items: Vec<T>,
    pub total: usize,
}

/// Drain a cursor-paginated collection.
///
/// `fetch_page` is called with `None` first and with the returned cursor
/// afterwards. Items are concatenated in page-fetch order. Any page failure
/// aborts with that error and no items.
pub async fn paginate_cursor<T, F, Fut>(label: &str, mut fetch_page: F) -> Result<Vec<T>, SensorError>
where
    F: FnMut(Option<i64>) -> Fut,
    Fut: Future<Output = Result<CursorPage<T>, SensorError>>,
{
    let mut items = Vec::new();
    let mut seen_cursors = HashSet::new();
    let mut cursor = None;

    for page_no in 1..=MAX_PAGES {
        let page = fetch_page(cursor).await?;
        let page_was_empty = page.items.is_empty();
        items.extend(page.items);

        if page.next_page_id == LAST_PAGE {
            return Ok(items);
        }
        // An empty page that still promises more, or a cursor we have
        // already followed, means the server is not making progress.
        if page_was_empty || !seen_cursors.insert(page.next_page_id) {
            return Err(SensorError::PaginationStalled {
                path: label.to_string(),
                pages: page_no,
            });
        }
        cursor = Some(page.next_page_id);
    }

    Err(SensorError::PaginationStalled {
        path: label.to_string(),
        pages: MAX_PAGES,
    })
}

/// Drain a count-paginated collection.
///
/// `fetch_page` is called with `None` for the implicit first page and with
/// `Some(2), Some(3), …` afterwards; the total comes from the first page
/// and is never re-read. Terminates once the accumulated item count reaches
/// that total.
pub async fn paginate_counted<T, F, Fut>(label: &str, mut fetch_page: F) -> Result<Vec<T>, SensorError>
where
    F: FnMut(Option<u64>) -> Fut,
    Fut: Future<Output = Result<CountedPage<T>, SensorError>>,
{
    let first = fetch_page(None).await?;
    let total = first.total;
    let mut items = first.items;

    let mut page_id: u64 = 2;
    while items.len() < total {
        if page_id as usize > MAX_PAGES {
            return Err(SensorError::PaginationStalled {
                path: label.to_string(),
                pages: MAX_PAGES,
            });
        }
        let page = fetch_page(Some(page_id)).await?;
        if page.items.is_empty() {
            // The server promised `total` items but stopped delivering.
            return Err(SensorError::PaginationStalled {
                path: label.to_string(),
                pages: page_id as usize,
            });
        }
        items.extend(page.items);
        page_id += 1;
    }

    Ok(items)
}
