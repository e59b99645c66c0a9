use std::fmt;

use clap::Args;
use owo_colors::OwoColorize;

use common::search::SearchHit;
use fastdoc_daemon::http_server::api::client::ApiError;
use fastdoc_daemon::http_server::api::v0::docs::{SearchRequest, SearchResponse};

#[derive(Args, Debug, Clone)]
pub struct Search {
    #[command(flatten)]
    pub request: SearchRequest,
}

#[derive(Debug)]
pub struct SearchOutput {
    pub query: String,
    pub hits: Vec<SearchHit>,
}

impl fmt::Display for SearchOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hits.is_empty() {
            return write!(f, "No matches for '{}'", self.query);
        }

        write!(
            f,
            "{} {} match(es) for '{}'",
            "Found".green().bold(),
            self.hits.len(),
            self.query
        )?;
        for hit in &self.hits {
            write!(
                f,
                "\n\n{} {}",
                hit.name.bold(),
                format!("({})", hit.path).dimmed()
            )?;
            if !hit.snippet.is_empty() {
                write!(f, "\n  {}", hit.snippet)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Search {
    type Error = SearchError;
    type Output = SearchOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut client = ctx.client.clone();
        let response: SearchResponse = client.call(self.request.clone()).await?;

        Ok(SearchOutput {
            query: self.request.q.clone(),
            hits: response.results,
        })
    }
}
