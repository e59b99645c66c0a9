use std::fmt;

use clap::Args;

use fastdoc_daemon::http_server::api::client::ApiError;
use fastdoc_daemon::http_server::api::v0::docs::{EntryRequest, EntryResponse};

#[derive(Args, Debug, Clone)]
pub struct Cat {
    #[command(flatten)]
    pub request: EntryRequest,
}

#[derive(Debug)]
pub struct CatOutput {
    pub content: String,
}

impl fmt::Display for CatOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.content)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Cat {
    type Error = CatError;
    type Output = CatOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut client = ctx.client.clone();
        let response: EntryResponse = client.call(self.request.clone()).await?;

        Ok(CatOutput {
            content: response.content,
        })
    }
}
