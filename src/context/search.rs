use super::Fetcher;
use crate::query::Query;
use crate::types::{SearchFilters, SearchRequest, SearchResponse, SearchType};
use crate::FetchError;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Search results plus the result-type filters the user has selected.
///
/// A search with a blank query or with every filter switched off resolves to an
/// empty result without calling the backend. It still requires a session, like
/// every other fetch.
#[derive(Debug)]
pub struct SearchContext {
    fetcher: Fetcher,
    default_limit: u32,
    results: Query<SearchResponse>,
    filters: Mutex<SearchFilters>,
    last_request: Mutex<Option<SearchRequest>>,
}

impl SearchContext {
    pub fn new(fetcher: Fetcher, default_limit: u32) -> Self {
        Self {
            fetcher,
            default_limit,
            results: Query::new(),
            filters: Mutex::new(SearchFilters::default()),
            last_request: Mutex::new(None),
        }
    }

    pub fn results(&self) -> &Query<SearchResponse> {
        &self.results
    }

    pub fn filters(&self) -> SearchFilters {
        *lock(&self.filters)
    }

    pub fn set_filters(&self, filters: SearchFilters) {
        *lock(&self.filters) = filters;
    }

    pub fn update_filter(&self, kind: SearchType, enabled: bool) {
        lock(&self.filters).set(kind, enabled);
    }

    pub fn toggle_filter(&self, kind: SearchType) {
        lock(&self.filters).toggle(kind);
    }

    /// The most recently initiated search, if any.
    pub fn last_request(&self) -> Option<SearchRequest> {
        lock(&self.last_request).clone()
    }

    /// Search for `query` across the active filters, from the first page.
    pub async fn search(
        &self,
        query: &str,
        limit: Option<u32>,
    ) -> Result<SearchResponse, FetchError> {
        let request = SearchRequest::new(
            query,
            self.filters().active_types(),
            limit.unwrap_or(self.default_limit),
        );
        self.search_with(request).await
    }

    /// Run an explicit search request, ignoring the stored filters.
    pub async fn search_with(&self, request: SearchRequest) -> Result<SearchResponse, FetchError> {
        *lock(&self.last_request) = Some(request.clone());

        if request.is_empty() {
            log::debug!("Empty search request, not calling the backend");
            return self
                .fetcher
                .run(&self.results, "search results", |_| async move {
                    Ok(SearchResponse {
                        request: Some(request),
                        ..SearchResponse::default()
                    })
                })
                .await;
        }

        self.fetcher
            .run(&self.results, "search results", |api| async move {
                let outcome = api.search(&request).await;
                outcome.map(|results| SearchResponse {
                    request: Some(request),
                    ..results
                })
            })
            .await
    }

    /// Fetch the page after the current results.
    ///
    /// The next page is taken from the request the visible results answer.
    /// Returns `Ok(None)` without calling the backend while a search is still
    /// pending, when nothing has been loaded, or when no section has a further
    /// page.
    pub async fn fetch_next_page(&self) -> Result<Option<SearchResponse>, FetchError> {
        if self.results.is_pending() {
            log::debug!("Search still pending, not fetching the next page");
            return Ok(None);
        }
        let Some(previous) = self
            .results
            .payload()
            .filter(SearchResponse::has_next_page)
            .and_then(|results| results.request)
        else {
            return Ok(None);
        };

        self.search_with(previous.next_page()).await.map(Some)
    }

    pub fn reset(&self) {
        self.results.reset();
        *lock(&self.last_request) = None;
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
