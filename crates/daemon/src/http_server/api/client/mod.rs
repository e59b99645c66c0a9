//! Typed client for the daemon's HTTP API.
//!
//! Every endpoint's request type implements [`ApiRequest`], so the CLI
//! and other consumers drive the API through one generic call path.

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

#[allow(clippy::module_inception)]
mod client;
mod error;

pub use client::ApiClient;
pub use error::ApiError;

/// A request that knows how to address and encode itself.
pub trait ApiRequest: Serialize + Send {
    type Response: DeserializeOwned;

    /// Builds the HTTP request against the daemon's base URL.
    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder;
}
