//! Incremental "load more" pagination over post summaries

use std::future::Future;

use serde::Serialize;

use crate::content::PostSummary;
use crate::prismic::{ApiResponse, ContentError};

/// Fetches one page of results from an opaque cursor URL
pub trait PageFetcher {
    fn fetch_page(&self, url: &str)
        -> impl Future<Output = Result<ApiResponse, ContentError>> + Send;
}

/// Plain GET against the cursor; cursors come pre-authorized by the API
#[derive(Debug, Clone, Default)]
pub struct HttpPageFetcher {
    http: reqwest::Client,
}

impl HttpPageFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PageFetcher for HttpPageFetcher {
    async fn fetch_page(&self, url: &str) -> Result<ApiResponse, ContentError> {
        crate::prismic::get_json(&self.http, url).await
    }
}

/// Loaded summaries plus the cursor to the next page
///
/// `loaded` only ever grows at the end. A `None` cursor is final.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaginationState {
    pub loaded: Vec<PostSummary>,
    pub next_page: Option<String>,
}

impl PaginationState {
    pub fn new(loaded: Vec<PostSummary>, next_page: Option<String>) -> Self {
        Self { loaded, next_page }
    }

    /// Whether the load-more control should be shown
    pub fn has_more(&self) -> bool {
        self.next_page.is_some()
    }

    /// Fetch the next page and return the extended state
    ///
    /// On failure the error is logged and the state comes back untouched.
    pub async fn load_more<F: PageFetcher>(self, fetcher: &F) -> Self {
        let Some(cursor) = self.next_page.clone() else {
            tracing::debug!("No next page, nothing to load");
            return self;
        };

        let page = match fetcher.fetch_page(&cursor).await {
            Ok(page) => page,
            Err(e) => {
                tracing::error!("Failed to load more posts: {}", e);
                return self;
            }
        };

        let before = self.loaded.len();
        let mut loaded = self.loaded;
        loaded.extend(page.results.iter().map(PostSummary::from_document));

        tracing::debug!(
            "Loaded {} more posts (total {})",
            loaded.len() - before,
            loaded.len()
        );

        Self {
            loaded,
            next_page: page.next_page,
        }
    }

    /// Keep loading until the API reports no further pages
    ///
    /// Stops early, with what was loaded so far, if a page fails.
    pub async fn load_all<F: PageFetcher>(self, fetcher: &F) -> Self {
        let mut state = self;
        while state.has_more() {
            let cursor = state.next_page.clone();
            state = state.load_more(fetcher).await;
            if state.next_page == cursor {
                break;
            }
        }
        state
    }
}
