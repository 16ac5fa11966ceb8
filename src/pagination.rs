//! Cursor-following pagination.
//!
//! Monday.com pages items with an opaque cursor: the first page comes from
//! `items_page` on a board and every later page from `next_items_page`. A
//! [`Pager`] drives that loop as a two-state machine and collects the
//! filtered items of each page in order.
//!
//! # Example
//!
//! ```rust
//! use monday_api::pagination::{Page, Pager};
//!
//! # tokio_test_block_on(async {
//! let pages = vec![
//!     Page::new(vec![1, 2], Some("next".to_string())),
//!     Page::new(vec![3], None),
//! ];
//! let mut pages = pages.into_iter();
//!
//! let items = Pager::new(true)
//!     .collect(
//!         |_cursor| {
//!             let page = pages.next().unwrap_or_default();
//!             async move { Ok::<_, std::convert::Infallible>(page) }
//!         },
//!         |n: &u32| n % 2 == 1,
//!     )
//!     .await
//!     .unwrap();
//!
//! assert_eq!(items, vec![1, 3]);
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

use std::future::Future;

/// One page of results and the cursor for the next one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page, in server order.
    pub items: Vec<T>,
    /// Cursor for the next page; `None` or empty on the last page.
    pub cursor: Option<String>,
}

impl<T> Page<T> {
    /// Creates a page.
    #[must_use]
    pub const fn new(items: Vec<T>, cursor: Option<String>) -> Self {
        Self { items, cursor }
    }

    /// Creates an empty last page.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            cursor: None,
        }
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Pager state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PagerState {
    /// Another page will be requested, after `cursor` if set.
    Fetching {
        /// Cursor returned by the previous page; `None` before the first.
        cursor: Option<String>,
    },
    /// No more pages will be requested.
    Done,
}

/// Drives cursor pagination.
///
/// Starts in [`PagerState::Fetching`] without a cursor and moves to
/// [`PagerState::Done`] when a page returns no cursor (or an empty one), or
/// after the first page when `fetch_all` is off. There is no page limit
/// when `fetch_all` is on.
#[derive(Clone, Debug)]
pub struct Pager {
    state: PagerState,
    fetch_all: bool,
    pages_fetched: usize,
}

impl Pager {
    /// Creates a pager before its first page.
    #[must_use]
    pub const fn new(fetch_all: bool) -> Self {
        Self {
            state: PagerState::Fetching { cursor: None },
            fetch_all,
            pages_fetched: 0,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &PagerState {
        &self.state
    }

    /// Returns `true` once no more pages will be requested.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self.state, PagerState::Done)
    }

    /// Returns the number of pages recorded with [`advance`](Self::advance).
    #[must_use]
    pub const fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Records a fetched page and its next cursor.
    pub fn advance(&mut self, next_cursor: Option<String>) {
        self.pages_fetched += 1;
        self.state = match next_cursor.filter(|cursor| !cursor.is_empty()) {
            Some(cursor) if self.fetch_all => PagerState::Fetching {
                cursor: Some(cursor),
            },
            _ => PagerState::Done,
        };
    }

    /// Runs the loop to completion.
    ///
    /// `fetch` is called with the current cursor and must return the next
    /// page; calls are awaited one at a time. Items for which `keep` returns
    /// `false` are dropped.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `fetch`; items gathered so far
    /// are discarded.
    pub async fn collect<T, E, F, Fut, K>(mut self, mut fetch: F, mut keep: K) -> Result<Vec<T>, E>
    where
        F: FnMut(Option<String>) -> Fut,
        Fut: Future<Output = Result<Page<T>, E>>,
        K: FnMut(&T) -> bool,
    {
        let mut collected = Vec::new();
        while let PagerState::Fetching { cursor } = &mut self.state {
            let page = fetch(cursor.take()).await?;
            collected.extend(page.items.into_iter().filter(|item| keep(item)));
            self.advance(page.cursor);
            tracing::debug!(
                "Fetched page {} ({} items so far)",
                self.pages_fetched,
                collected.len()
            );
        }
        Ok(collected)
    }
}
