use std::sync::Arc;

use async_trait::async_trait;

use super::error::Result;
use super::json::SearchResponseJson;
use super::types::SearchResults;
use super::{Params, TwitterClient};

pub const DEFAULT_RESULTS_PER_PAGE: u32 = 50;

/// Tweet search. Works without authorization.
#[async_trait]
pub trait SearchOperations: Send + Sync {
    /// First page, [`DEFAULT_RESULTS_PER_PAGE`] results.
    async fn search(&self, query: &str) -> Result<SearchResults>;

    async fn search_page(&self, query: &str, page: u32, results_per_page: u32)
    -> Result<SearchResults>;

    /// `since_id` and `max_id` are only sent when non-zero.
    async fn search_range(
        &self,
        query: &str,
        page: u32,
        results_per_page: u32,
        since_id: u64,
        max_id: u64,
    ) -> Result<SearchResults>;
}

#[derive(Debug, Clone)]
pub struct SearchTemplate {
    client: Arc<TwitterClient>,
}

impl SearchTemplate {
    pub(crate) fn new(client: Arc<TwitterClient>) -> Self {
        Self { client }
    }
}

fn search_params(
    query: &str,
    page: u32,
    results_per_page: u32,
    since_id: u64,
    max_id: u64,
) -> Params<'_> {
    let mut params: Params<'_> = vec![
        ("q", query.into()),
        ("rpp", results_per_page.to_string().into()),
        ("page", page.to_string().into()),
    ];
    if since_id > 0 {
        params.push(("since_id", since_id.to_string().into()));
    }
    if max_id > 0 {
        params.push(("max_id", max_id.to_string().into()));
    }
    params
}

#[async_trait]
impl SearchOperations for SearchTemplate {
    async fn search(&self, query: &str) -> Result<SearchResults> {
        self.search_range(query, 1, DEFAULT_RESULTS_PER_PAGE, 0, 0)
            .await
    }

    async fn search_page(
        &self,
        query: &str,
        page: u32,
        results_per_page: u32,
    ) -> Result<SearchResults> {
        self.search_range(query, page, results_per_page, 0, 0)
            .await
    }

    async fn search_range(
        &self,
        query: &str,
        page: u32,
        results_per_page: u32,
        since_id: u64,
        max_id: u64,
    ) -> Result<SearchResults> {
        let params = search_params(query, page, results_per_page, since_id, max_id);
        let response: SearchResponseJson = self.client.search(params).await?;
        let results = SearchResults::from(response);
        tracing::debug!(
            query,
            page,
            hits = results.tweets.len(),
            last_page = results.last_page,
            "twitter.search.done"
        );
        Ok(results)
    }
}
