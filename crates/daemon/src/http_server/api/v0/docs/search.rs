use axum::extract::{Json, Query, State};
use axum::response::{IntoResponse, Response};
use common::search::{self, SearchHit};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use crate::http_server::api::client::ApiRequest;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct SearchRequest {
    /// Substring to look for in document names and content
    pub q: String,

    /// Wrap matches in the response in `<mark>` tags (HTML-escaped)
    #[arg(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Query(req): Query<SearchRequest>,
) -> Response {
    let mut results = {
        let index = state.index().read();
        search::search(&index, &req.q)
    };

    if req.highlight.unwrap_or(false) {
        for hit in &mut results {
            hit.name = search::highlight(&hit.name, &req.q);
            hit.snippet = search::highlight(&hit.snippet, &req.q);
        }
    }

    (http::StatusCode::OK, Json(SearchResponse { results })).into_response()
}

impl ApiRequest for SearchRequest {
    type Response = SearchResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let mut full_url = base_url.join("/api/v0/docs/search").unwrap();
        {
            let mut pairs = full_url.query_pairs_mut();
            pairs.append_pair("q", &self.q);
            if let Some(highlight) = self.highlight {
                pairs.append_pair("highlight", if highlight { "true" } else { "false" });
            }
        }
        client.get(full_url)
    }
}
