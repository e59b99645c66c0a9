use axum::extract::{Json, State};
use axum::response::{IntoResponse, Response};
use common::index::DocMeta;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use crate::http_server::api::client::ApiRequest;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListRequest {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub docs: Vec<DocMeta>,
}

pub async fn handler(State(state): State<ServiceState>) -> Response {
    let docs = state.index().read().list();
    (http::StatusCode::OK, Json(ListResponse { docs })).into_response()
}

impl ApiRequest for ListRequest {
    type Response = ListResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/v0/docs").unwrap();
        client.get(full_url)
    }
}
